//! Jobboard - Client for a paginated public job feed.
//!
//! This crate fetches pages of jobs from a remote REST API, accumulates
//! them into a scrollable list, keeps favourite job ids in a local JSON
//! file and derives a favourites view from the cached list responses.
//!
//! # Example
//!
//! ```
//! use jobboard::config::{list_url, validate_job_id};
//! use jobboard::format::format_date;
//!
//! assert!(validate_job_id("wa-1").is_ok());
//! assert_eq!(list_url("https://example.test", 0, 30), "https://example.test/list?pageNum=0&pageSize=30");
//! assert_eq!(format_date(1_700_000_000), format_date(1_700_000_000_000));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Constants, validation, URL building and `ClientConfig`
//! - [`types`]: Wire types (Job, list and detail responses)
//! - [`error`]: Error types and Result alias
//! - [`http`]: HTTP client for the feed
//! - [`cache`]: Query cache with in-flight deduplication
//! - [`api`]: Cache-backed feed client
//! - [`connectivity`]: Shared online/offline flag
//! - [`pagination`]: Pagination state machine
//! - [`list`]: Job list driver and render states
//! - [`favourites`]: Persisted favourites set
//! - [`favourites_view`]: Favourites derived from the cache
//! - [`state`]: Shared application state
//! - [`format`]: Date and wage formatting
//! - [`cli`]: Command-line interface

pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod connectivity;
pub mod error;
pub mod favourites;
pub mod favourites_view;
pub mod format;
pub mod http;
pub mod list;
pub mod pagination;
pub mod state;
pub mod types;

pub use api::JobsApi;
pub use cache::{FetchPolicy, QueryCache, QueryEntry, QueryKey, QueryStatus};
pub use config::ClientConfig;
pub use error::{JobBoardError, Result};
pub use favourites::FavouritesStore;
pub use list::{JobList, ListView};
pub use state::AppState;
pub use types::{Job, JobResponse, JobsListResponse, ListJobsArgs};
