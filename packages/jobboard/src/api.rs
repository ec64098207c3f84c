//! Job feed client backed by the query cache.
//!
//! `JobsApi` is the only place that talks to the network. Each call goes
//! through [`QueryCache::begin`], so a page that was already fetched is not
//! requested again and concurrent requests for the same key share one
//! network call.

use std::future::Future;

use reqwest::Client;

use crate::cache::{Begin, FetchPolicy, QueryCache, QueryData, QueryEntry, QueryKey, QueryStatus};
use crate::config::{job_url, list_url, validate_job_id, validate_page_size, ClientConfig};
use crate::connectivity::Connectivity;
use crate::error::{JobBoardError, Result};
use crate::http::{create_client, get_json};
use crate::types::{JobResponse, JobsListResponse, ListJobsArgs};

/// Client for the public job feed.
#[derive(Debug, Clone)]
pub struct JobsApi {
    http: Client,
    base_url: String,
    cache: QueryCache,
    connectivity: Connectivity,
}

impl JobsApi {
    /// Create a client that records into `cache` and reports to `connectivity`.
    pub fn new(
        config: &ClientConfig,
        cache: QueryCache,
        connectivity: Connectivity,
    ) -> Result<Self> {
        Ok(Self {
            http: create_client(config.timeout_secs)?,
            base_url: config.base_url.clone(),
            cache,
            connectivity,
        })
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    #[must_use]
    pub fn connectivity(&self) -> &Connectivity {
        &self.connectivity
    }

    /// Fetch one page of jobs.
    pub async fn list_jobs(
        &self,
        args: ListJobsArgs,
        policy: FetchPolicy,
    ) -> Result<JobsListResponse> {
        validate_page_size(args.page_size)?;
        let url = list_url(&self.base_url, args.page_num, args.page_size);

        let http = &self.http;
        let url = &url;
        let data = self
            .query(QueryKey::ListJobs(args), policy, move || async move {
                let resp: JobsListResponse = get_json(http, url).await?;
                tracing::debug!(
                    page = args.page_num,
                    items = resp.data.items.len(),
                    "Fetched job page"
                );
                Ok(QueryData::Jobs(resp))
            })
            .await?;

        match data {
            QueryData::Jobs(resp) => Ok(resp),
            QueryData::Job(_) => Err(JobBoardError::Query(format!(
                "unexpected payload cached for page {}",
                args.page_num
            ))),
        }
    }

    /// Fetch a single job by id.
    pub async fn get_job(&self, id: &str) -> Result<JobResponse> {
        validate_job_id(id)?;
        let url = job_url(&self.base_url, id);

        let http = &self.http;
        let url = &url;
        let data = self
            .query(QueryKey::GetJob(id.to_string()), FetchPolicy::CacheFirst, move || async move {
                let resp: JobResponse = get_json(http, url).await?;
                Ok(QueryData::Job(resp))
            })
            .await?;

        match data {
            QueryData::Job(resp) => Ok(resp),
            QueryData::Jobs(_) => Err(JobBoardError::Query(format!(
                "unexpected payload cached for job {id}"
            ))),
        }
    }

    async fn query<F, Fut>(&self, key: QueryKey, policy: FetchPolicy, fetch: F) -> Result<QueryData>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<QueryData>>,
    {
        match self.cache.begin(&key, policy) {
            Begin::Cached(entry) => entry_result(entry),
            Begin::Wait(resolved) => entry_result(self.cache.wait(&key, resolved).await),
            Begin::Fetch => {
                let in_flight = InFlight::new(&self.cache, &key);
                let outcome = fetch().await;
                self.observe(&outcome);
                in_flight.finish(match &outcome {
                    Ok(data) => Ok(data.clone()),
                    Err(e) => Err(e.to_string()),
                });
                outcome
            }
        }
    }

    /// Feed the connectivity flag from a transport outcome.
    fn observe(&self, outcome: &Result<QueryData>) {
        match outcome {
            Err(e) if e.is_connect() => self.connectivity.set_connected(false),
            Err(JobBoardError::Network(_)) => {}
            _ => self.connectivity.set_connected(true),
        }
    }
}

fn entry_result(entry: QueryEntry) -> Result<QueryData> {
    match (entry.status, entry.data, entry.error) {
        (QueryStatus::Success, Some(data), _) => Ok(data),
        (QueryStatus::Error, _, Some(message)) => Err(JobBoardError::Query(message)),
        (status, _, _) => Err(JobBoardError::Query(format!(
            "request finished in unexpected state {status:?}"
        ))),
    }
}

/// Marks a claimed key as failed if the fetching future is dropped early,
/// so waiters are released.
struct InFlight<'a> {
    cache: &'a QueryCache,
    key: &'a QueryKey,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn new(cache: &'a QueryCache, key: &'a QueryKey) -> Self {
        Self {
            cache,
            key,
            finished: false,
        }
    }

    fn finish(mut self, outcome: std::result::Result<QueryData, String>) {
        self.cache.complete(self.key, outcome);
        self.finished = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.finished {
            tracing::debug!(key = %self.key, "Request dropped before completion");
            self.cache
                .complete(self.key, Err("request cancelled".to_string()));
        }
    }
}
