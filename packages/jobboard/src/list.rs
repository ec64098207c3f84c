//! Job list screen model: pagination driven through the API.

use crate::api::JobsApi;
use crate::cache::FetchPolicy;
use crate::pagination::{Completion, ListAggregator, ListStatus, PageTicket};
use crate::types::Job;

/// What the list screen should render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListView<'a> {
    /// No connectivity; overrides every other state.
    Offline,
    /// First load with nothing to show yet.
    Loading,
    /// Request failed with nothing to show.
    Failed { message: &'a str },
    /// Loaded, but the feed has no jobs.
    Empty,
    Jobs {
        jobs: &'a [Job],
        fetching_more: bool,
        error: Option<&'a str>,
    },
}

/// Paginated job list bound to an API client.
#[derive(Debug)]
pub struct JobList {
    api: JobsApi,
    list: ListAggregator,
}

impl JobList {
    #[must_use]
    pub fn new(api: JobsApi, page_size: u32) -> Self {
        Self {
            api,
            list: ListAggregator::new(page_size),
        }
    }

    /// Load page 0, replacing anything displayed.
    pub async fn load_initial(&mut self) -> Completion {
        let ticket = self.list.begin_initial();
        self.run(ticket, FetchPolicy::CacheFirst).await
    }

    /// Load the next page and append it. `None` if no request was started.
    pub async fn load_more(&mut self) -> Option<Completion> {
        let ticket = self.list.begin_load_more()?;
        Some(self.run(ticket, FetchPolicy::CacheFirst).await)
    }

    /// Clear the list and fetch page 0 from the network again.
    pub async fn refresh(&mut self) -> Completion {
        let ticket = self.list.begin_refresh();
        self.run(ticket, FetchPolicy::Refetch).await
    }

    async fn run(&mut self, ticket: PageTicket, policy: FetchPolicy) -> Completion {
        let outcome = self
            .api
            .list_jobs(self.list.args(ticket), policy)
            .await
            .map(|resp| resp.data.items)
            .map_err(|e| e.to_string());
        self.list.complete(ticket, outcome)
    }

    #[must_use]
    pub fn aggregator(&self) -> &ListAggregator {
        &self.list
    }

    /// Mutable access, for callers that drive tickets themselves.
    pub fn aggregator_mut(&mut self) -> &mut ListAggregator {
        &mut self.list
    }

    #[must_use]
    pub fn view(&self) -> ListView<'_> {
        render(&self.list, self.api.connectivity().is_offline())
    }
}

/// Decide what to render for a list state.
#[must_use]
pub fn render(list: &ListAggregator, offline: bool) -> ListView<'_> {
    if offline {
        return ListView::Offline;
    }

    let items = list.items();
    if items.is_empty() {
        return match (list.status(), list.error()) {
            (ListStatus::Failed, Some(message)) => ListView::Failed { message },
            (ListStatus::Loaded, _) => ListView::Empty,
            _ => ListView::Loading,
        };
    }

    ListView::Jobs {
        jobs: items,
        fetching_more: list.is_fetching(),
        error: list.error(),
    }
}
