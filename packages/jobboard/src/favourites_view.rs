//! Favourites view derived from the query cache.
//!
//! There is no dedicated store of favourite job records. The view is built
//! by scanning every list response still held in the [`QueryCache`] and
//! keeping the jobs whose id is a favourite. A favourite whose page has not
//! been fetched in this process is therefore missing from the view until
//! that page is loaded again. [`resolve_favourite_jobs`] closes that gap by
//! fetching such jobs by id; it is opt-in.

use std::collections::HashMap;

use crate::api::JobsApi;
use crate::cache::QueryCache;
use crate::favourites::FavouritesStore;
use crate::types::Job;

/// Favourite jobs found in cached list responses.
///
/// Entries are scanned in cache insertion order. Each id appears once, at
/// the position it was first seen, holding the record seen last.
#[must_use]
pub fn collect_favourite_jobs(cache: &QueryCache, favourites: &FavouritesStore) -> Vec<Job> {
    let ids = favourites.ids();
    if ids.is_empty() {
        return Vec::new();
    }

    let mut jobs: Vec<Job> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for (_, entry) in cache.list() {
        for job in entry.list_items() {
            if !ids.iter().any(|id| id == job.id()) {
                continue;
            }
            match positions.get(job.id()) {
                Some(&idx) => jobs[idx] = job.clone(),
                None => {
                    positions.insert(job.id().to_string(), jobs.len());
                    jobs.push(job.clone());
                }
            }
        }
    }

    jobs
}

/// Favourite jobs from the cache, plus any remaining favourites fetched by id.
///
/// Fetched jobs follow the cached ones, in favourites order. A favourite
/// that cannot be fetched is logged and left out.
pub async fn resolve_favourite_jobs(api: &JobsApi, favourites: &FavouritesStore) -> Vec<Job> {
    let mut jobs = collect_favourite_jobs(api.cache(), favourites);

    let missing: Vec<String> = favourites
        .ids()
        .into_iter()
        .filter(|id| !jobs.iter().any(|job| job.id() == id))
        .collect();

    for id in missing {
        match api.get_job(&id).await {
            Ok(resp) => jobs.push(resp.data),
            Err(e) => tracing::warn!(id, error = %e, "Could not fetch favourite job"),
        }
    }

    jobs
}
