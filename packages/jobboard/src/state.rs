//! Shared application state handed to every view.

use std::sync::Arc;

use crate::api::JobsApi;
use crate::cache::QueryCache;
use crate::config::{validate_job_id, ClientConfig};
use crate::connectivity::Connectivity;
use crate::error::Result;
use crate::favourites::FavouritesStore;
use crate::favourites_view::{collect_favourite_jobs, resolve_favourite_jobs};
use crate::list::JobList;
use crate::types::Job;

/// Process-wide state: API client with its query cache, favourites and
/// connectivity. Cloning is cheap and shares everything.
#[derive(Debug, Clone)]
pub struct AppState {
    pub api: JobsApi,
    pub favourites: Arc<FavouritesStore>,
    page_size: u32,
}

impl AppState {
    /// Build the state from configuration, loading persisted favourites.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api = JobsApi::new(config, QueryCache::new(), Connectivity::new())?;
        let favourites = Arc::new(FavouritesStore::open(config.favourites_path())?);
        Ok(Self {
            api,
            favourites,
            page_size: config.page_size,
        })
    }

    #[must_use]
    pub fn cache(&self) -> &QueryCache {
        self.api.cache()
    }

    #[must_use]
    pub fn connectivity(&self) -> &Connectivity {
        self.api.connectivity()
    }

    /// A fresh job list sharing this state's cache.
    #[must_use]
    pub fn job_list(&self) -> JobList {
        JobList::new(self.api.clone(), self.page_size)
    }

    /// Favourite jobs currently present in the cache.
    #[must_use]
    pub fn favourite_jobs(&self) -> Vec<Job> {
        collect_favourite_jobs(self.cache(), &self.favourites)
    }

    /// Favourite jobs, fetching by id those missing from the cache.
    pub async fn resolve_favourite_jobs(&self) -> Vec<Job> {
        resolve_favourite_jobs(&self.api, &self.favourites).await
    }

    /// Toggle a favourite after checking the id is a usable job id.
    pub fn toggle_favourite(&self, id: &str) -> Result<bool> {
        validate_job_id(id)?;
        self.favourites.toggle(id)
    }

    #[must_use]
    pub fn is_favourite(&self, id: &str) -> bool {
        self.favourites.contains(id)
    }
}
