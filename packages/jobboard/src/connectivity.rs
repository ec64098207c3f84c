//! Connectivity flag shared by the API client and the list view.

use std::sync::Arc;

use tokio::sync::watch;

/// Shared connected/disconnected flag. Clones observe the same flag.
///
/// Starts out connected. Whoever observes the network (the API client on
/// every transport outcome, or an OS-level monitor) calls
/// [`Connectivity::set_connected`]; renderers read [`Connectivity::is_offline`].
#[derive(Debug, Clone)]
pub struct Connectivity {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for Connectivity {
    fn default() -> Self {
        let (tx, _) = watch::channel(true);
        Self { tx: Arc::new(tx) }
    }
}

impl Connectivity {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observer callback: report the current connection state.
    pub fn set_connected(&self, connected: bool) {
        let previous = self.tx.send_replace(connected);
        if previous != connected {
            tracing::info!(connected, "Connectivity changed");
        }
    }

    #[must_use]
    pub fn is_connected(&self) -> bool {
        *self.tx.borrow()
    }

    #[must_use]
    pub fn is_offline(&self) -> bool {
        !self.is_connected()
    }

    /// Receiver notified on every transition.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_connected() {
        let connectivity = Connectivity::new();
        assert!(connectivity.is_connected());
        assert!(!connectivity.is_offline());
    }

    #[test]
    fn test_clones_share_flag() {
        let connectivity = Connectivity::new();
        let observer = connectivity.clone();
        observer.set_connected(false);
        assert!(connectivity.is_offline());
        observer.set_connected(true);
        assert!(connectivity.is_connected());
    }

    #[tokio::test]
    async fn test_subscribe_sees_transition() {
        let connectivity = Connectivity::new();
        let mut rx = connectivity.subscribe();
        connectivity.set_connected(false);
        rx.changed().await.unwrap();
        assert!(!*rx.borrow());
    }
}
