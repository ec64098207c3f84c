//! Pagination state machine for the job list.
//!
//! `ListAggregator` does no I/O. Starting a load hands out a [`PageTicket`];
//! the caller fetches that page and reports back with
//! [`ListAggregator::complete`]. Only the outstanding ticket of the current
//! generation is applied, so a refresh always wins over a load-more that
//! was still in flight when the refresh started.

use crate::types::{Job, ListJobsArgs};

/// Fetch status of the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListStatus {
    Idle,
    /// First load of page 0.
    Loading,
    /// Fetching the page after the current one.
    LoadingNext,
    /// Page 0 again after the list was cleared.
    Refreshing,
    Loaded,
    /// Last request failed; displayed items are untouched.
    Failed,
}

/// Identifies one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageTicket {
    pub generation: u64,
    pub page: u32,
}

/// Result of reporting a ticket back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// Ticket belongs to a superseded request; outcome ignored.
    Stale,
}

/// Accumulates pages into one displayed list.
#[derive(Debug, Clone)]
pub struct ListAggregator {
    page_size: u32,
    page: u32,
    generation: u64,
    items: Vec<Job>,
    status: ListStatus,
    error: Option<String>,
    outstanding: Option<PageTicket>,
    exhausted: bool,
}

impl ListAggregator {
    #[must_use]
    pub fn new(page_size: u32) -> Self {
        Self {
            page_size,
            page: 0,
            generation: 0,
            items: Vec::new(),
            status: ListStatus::Idle,
            error: None,
            outstanding: None,
            exhausted: false,
        }
    }

    /// Request page 0 for the first time.
    pub fn begin_initial(&mut self) -> PageTicket {
        self.restart(ListStatus::Loading)
    }

    /// Pull-to-refresh: drop everything and request page 0 again.
    pub fn begin_refresh(&mut self) -> PageTicket {
        self.restart(ListStatus::Refreshing)
    }

    fn restart(&mut self, status: ListStatus) -> PageTicket {
        self.generation += 1;
        self.page = 0;
        self.items.clear();
        self.error = None;
        self.exhausted = false;
        self.status = status;
        self.issue(0)
    }

    /// The consumer reached the end of the list: request the next page.
    ///
    /// Returns `None` while another request is outstanding, before the
    /// first page has loaded, or once a page came back empty.
    pub fn begin_load_more(&mut self) -> Option<PageTicket> {
        if self.outstanding.is_some() || self.exhausted || self.status == ListStatus::Idle {
            return None;
        }
        if self.items.is_empty() && self.status != ListStatus::Loaded {
            // Nothing loaded yet; retry page 0 through refresh instead
            return None;
        }
        self.status = ListStatus::LoadingNext;
        Some(self.issue(self.page + 1))
    }

    fn issue(&mut self, page: u32) -> PageTicket {
        let ticket = PageTicket {
            generation: self.generation,
            page,
        };
        self.outstanding = Some(ticket);
        ticket
    }

    /// Report the outcome of a ticket's request.
    pub fn complete(
        &mut self,
        ticket: PageTicket,
        outcome: std::result::Result<Vec<Job>, String>,
    ) -> Completion {
        if self.outstanding != Some(ticket) {
            tracing::debug!(
                page = ticket.page,
                generation = ticket.generation,
                current_generation = self.generation,
                "Discarding stale page result"
            );
            return Completion::Stale;
        }
        self.outstanding = None;

        match outcome {
            Ok(jobs) => {
                if ticket.page == 0 {
                    self.items = jobs;
                    self.exhausted = self.items.is_empty();
                } else {
                    self.exhausted = jobs.is_empty();
                    self.items.extend(jobs);
                }
                self.page = ticket.page;
                self.error = None;
                self.status = ListStatus::Loaded;
            }
            Err(message) => {
                tracing::warn!(page = ticket.page, error = %message, "Page request failed");
                self.error = Some(message);
                self.status = ListStatus::Failed;
            }
        }
        Completion::Applied
    }

    /// Query arguments for a ticket.
    #[must_use]
    pub fn args(&self, ticket: PageTicket) -> ListJobsArgs {
        ListJobsArgs::new(ticket.page, self.page_size)
    }

    #[must_use]
    pub fn items(&self) -> &[Job] {
        &self.items
    }

    #[must_use]
    pub fn status(&self) -> ListStatus {
        self.status
    }

    /// Last page whose result was applied.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
    }

    #[must_use]
    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.outstanding.is_some()
    }

    /// A page came back empty; no further pages are requested.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }
}
