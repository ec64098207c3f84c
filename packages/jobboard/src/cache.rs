//! Process-wide query cache.
//!
//! Every API request is memoized under a [`QueryKey`] built from its
//! endpoint and arguments. Entries are never evicted: after N distinct
//! requests the cache holds exactly N entries. Listing returns entries in
//! first-insertion order.
//!
//! The cache also deduplicates in-flight requests. [`QueryCache::begin`]
//! tells the caller whether to serve a cached value, wait for a request
//! someone else already issued, or issue the request itself and report the
//! outcome with [`QueryCache::complete`].

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::sync::watch;

use crate::types::{Job, JobResponse, JobsListResponse, ListJobsArgs};

/// Normalized request: endpoint plus arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryKey {
    ListJobs(ListJobsArgs),
    GetJob(String),
}

impl QueryKey {
    /// Name of the endpoint this key belongs to.
    #[must_use]
    pub fn endpoint(&self) -> &'static str {
        match self {
            Self::ListJobs(_) => "listJobs",
            Self::GetJob(_) => "getJob",
        }
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ListJobs(args) => write!(
                f,
                "listJobs({{\"pageNum\":{},\"pageSize\":{}}})",
                args.page_num, args.page_size
            ),
            Self::GetJob(id) => write!(f, "getJob(\"{id}\")"),
        }
    }
}

/// Lifecycle of a cache entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStatus {
    Pending,
    Success,
    Error,
}

/// Response payload held by an entry.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryData {
    Jobs(JobsListResponse),
    Job(JobResponse),
}

/// One memoized request.
///
/// `data` always holds the last successful payload; it is kept while the
/// request is refetched and when a refetch fails.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryEntry {
    pub status: QueryStatus,
    pub data: Option<QueryData>,
    pub error: Option<String>,
}

impl QueryEntry {
    #[must_use]
    pub fn pending() -> Self {
        Self {
            status: QueryStatus::Pending,
            data: None,
            error: None,
        }
    }

    #[must_use]
    pub fn success(data: QueryData) -> Self {
        Self {
            status: QueryStatus::Success,
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: QueryStatus::Error,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Jobs embedded in a list payload; empty for anything else.
    #[must_use]
    pub fn list_items(&self) -> &[Job] {
        match &self.data {
            Some(QueryData::Jobs(resp)) => &resp.data.items,
            _ => &[],
        }
    }
}

/// Whether a cached success may be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchPolicy {
    /// Serve a successful entry without touching the network.
    #[default]
    CacheFirst,
    /// Always issue the request again (pull-to-refresh).
    Refetch,
}

/// What the caller of [`QueryCache::begin`] should do next.
#[derive(Debug)]
pub enum Begin {
    /// A successful entry is available.
    Cached(QueryEntry),
    /// Another caller is fetching this key; wait with [`QueryCache::wait`].
    Wait(watch::Receiver<bool>),
    /// The entry is now pending and this caller must fetch it.
    Fetch,
}

#[derive(Debug)]
struct Slot {
    seq: u64,
    entry: QueryEntry,
    resolved: watch::Sender<bool>,
}

#[derive(Debug, Default)]
struct CacheInner {
    next_seq: u64,
    slots: HashMap<QueryKey, Slot>,
}

impl CacheInner {
    fn slot_mut(&mut self, key: &QueryKey) -> &mut Slot {
        let next_seq = &mut self.next_seq;
        self.slots.entry(key.clone()).or_insert_with(|| {
            let seq = *next_seq;
            *next_seq += 1;
            let (resolved, _) = watch::channel(true);
            Slot {
                seq,
                entry: QueryEntry::pending(),
                resolved,
            }
        })
    }
}

/// Shared handle to the query cache. Clones refer to the same cache.
#[derive(Debug, Clone, Default)]
pub struct QueryCache {
    inner: Arc<Mutex<CacheInner>>,
}

impl QueryCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, CacheInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Current entry for a key.
    #[must_use]
    pub fn get(&self, key: &QueryKey) -> Option<QueryEntry> {
        self.lock().slots.get(key).map(|slot| slot.entry.clone())
    }

    /// Store an entry, keeping the key's original position.
    pub fn put(&self, key: QueryKey, entry: QueryEntry) {
        let mut inner = self.lock();
        inner.slot_mut(&key).entry = entry;
    }

    /// All entries in first-insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<(QueryKey, QueryEntry)> {
        let inner = self.lock();
        let mut slots: Vec<_> = inner.slots.iter().collect();
        slots.sort_by_key(|(_, slot)| slot.seq);
        slots
            .into_iter()
            .map(|(key, slot)| (key.clone(), slot.entry.clone()))
            .collect()
    }

    /// Number of distinct keys ever requested.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Claim a key for fetching, or find out why not to.
    pub fn begin(&self, key: &QueryKey, policy: FetchPolicy) -> Begin {
        let mut inner = self.lock();
        let slot = inner.slot_mut(key);

        if !*slot.resolved.borrow() {
            tracing::debug!(%key, "Joining in-flight request");
            return Begin::Wait(slot.resolved.subscribe());
        }

        if policy == FetchPolicy::CacheFirst && slot.entry.status == QueryStatus::Success {
            tracing::debug!(%key, "Cache hit");
            return Begin::Cached(slot.entry.clone());
        }

        slot.entry.status = QueryStatus::Pending;
        slot.entry.error = None;
        let (resolved, _) = watch::channel(false);
        slot.resolved = resolved;
        Begin::Fetch
    }

    /// Record the outcome of a fetch claimed with [`QueryCache::begin`].
    pub fn complete(&self, key: &QueryKey, outcome: std::result::Result<QueryData, String>) {
        let mut inner = self.lock();
        let slot = inner.slot_mut(key);
        match outcome {
            Ok(data) => {
                slot.entry = QueryEntry::success(data);
            }
            Err(message) => {
                slot.entry.status = QueryStatus::Error;
                slot.entry.error = Some(message);
            }
        }
        slot.resolved.send_replace(true);
    }

    /// Wait for an in-flight request and return the resulting entry.
    pub async fn wait(&self, key: &QueryKey, mut resolved: watch::Receiver<bool>) -> QueryEntry {
        // A dropped sender means the slot was claimed again; read whatever is there.
        let _ = resolved.wait_for(|done| *done).await;
        self.get(key).unwrap_or_else(QueryEntry::pending)
    }
}
