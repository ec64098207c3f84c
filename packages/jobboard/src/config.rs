//! Configuration constants, validation and URL building for the job feed.

use std::path::PathBuf;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{JobBoardError, Result};

/// Base URL of the public job feed.
pub const DEFAULT_BASE_URL: &str =
    "https://www.coople.com/ch/resources/api/work-assignments/public-jobs";

/// Jobs requested per page.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// HTTP timeout in seconds.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default directory for persisted local state.
pub const DEFAULT_DATA_DIR: &str = ".jobboard";

/// File (inside the data directory) holding the favourite ids.
pub const FAVOURITES_FILE: &str = "favourites.json";

/// Timestamps above this value are milliseconds, not seconds.
pub const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// User agent string identifying this client.
pub const USER_AGENT: &str = concat!("jobboard/", env!("CARGO_PKG_VERSION"));

/// Job id: a single URL path segment.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static JOB_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^/?#\s]+$").expect("valid regex"));

/// Validate a job identifier before it is used in a request path.
///
/// # Examples
/// ```
/// use jobboard::config::validate_job_id;
///
/// assert!(validate_job_id("5f0c1a2b-77aa").is_ok());
/// assert!(validate_job_id("").is_err());
/// assert!(validate_job_id("list/../x").is_err());
/// ```
pub fn validate_job_id(id: &str) -> Result<()> {
    if JOB_ID_PATTERN.is_match(id) {
        Ok(())
    } else {
        Err(JobBoardError::InvalidJobId(id.to_string()))
    }
}

/// Validate a page size.
pub fn validate_page_size(page_size: u32) -> Result<()> {
    if page_size == 0 {
        return Err(JobBoardError::InvalidPageSize(page_size));
    }
    Ok(())
}

/// Build the URL of one list page.
///
/// # Examples
/// ```
/// use jobboard::config::list_url;
///
/// assert_eq!(
///     list_url("https://example.test/jobs", 2, 30),
///     "https://example.test/jobs/list?pageNum=2&pageSize=30"
/// );
/// ```
pub fn list_url(base_url: &str, page_num: u32, page_size: u32) -> String {
    format!(
        "{}/list?pageNum={page_num}&pageSize={page_size}",
        base_url.trim_end_matches('/')
    )
}

/// Build the URL of a single job.
///
/// The id is percent-encoded; callers should run [`validate_job_id`] first.
pub fn job_url(base_url: &str, id: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(id)
    )
}

/// Runtime configuration of the client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub page_size: u32,
    pub timeout_secs: u64,
    pub data_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let base_url =
            std::env::var("JOBBOARD_API_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let page_size = match std::env::var("JOBBOARD_PAGE_SIZE") {
            Ok(v) => v.parse().map_err(|_| {
                JobBoardError::Config(format!("JOBBOARD_PAGE_SIZE is not a number: {v}"))
            })?,
            Err(_) => DEFAULT_PAGE_SIZE,
        };
        validate_page_size(page_size)?;

        let timeout_secs = std::env::var("JOBBOARD_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(HTTP_TIMEOUT_SECS);

        let data_dir = std::env::var("JOBBOARD_DATA_DIR")
            .unwrap_or_else(|_| DEFAULT_DATA_DIR.into())
            .into();

        Ok(Self {
            base_url,
            page_size,
            timeout_secs,
            data_dir,
        })
    }

    /// Create a config builder with default values.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder {
            base_url: DEFAULT_BASE_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: HTTP_TIMEOUT_SECS,
            data_dir: DEFAULT_DATA_DIR.into(),
        }
    }

    /// Path of the persisted favourites file.
    pub fn favourites_path(&self) -> PathBuf {
        self.data_dir.join(FAVOURITES_FILE)
    }
}

/// Builder for constructing `ClientConfig`, mostly in tests.
pub struct ClientConfigBuilder {
    base_url: String,
    page_size: u32,
    timeout_secs: u64,
    data_dir: PathBuf,
}

impl ClientConfigBuilder {
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    pub fn data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn build(self) -> ClientConfig {
        ClientConfig {
            base_url: self.base_url,
            page_size: self.page_size,
            timeout_secs: self.timeout_secs,
            data_dir: self.data_dir,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_job_id_valid() {
        assert!(validate_job_id("abc123").is_ok());
        assert!(validate_job_id("5f0c1a2b-77aa-4e1b-9b2d-0c1d2e3f4a5b").is_ok());
        assert!(validate_job_id("WA_000123").is_ok());
    }

    #[test]
    fn test_validate_job_id_invalid() {
        assert!(validate_job_id("").is_err());
        assert!(validate_job_id("a/b").is_err());
        assert!(validate_job_id("list?pageNum=1").is_err());
        assert!(validate_job_id("has space").is_err());
        assert!(validate_job_id("frag#1").is_err());
    }

    #[test]
    fn test_validate_page_size() {
        assert!(validate_page_size(1).is_ok());
        assert!(validate_page_size(30).is_ok());
        assert!(validate_page_size(0).is_err());
    }

    #[test]
    fn test_list_url() {
        assert_eq!(
            list_url(DEFAULT_BASE_URL, 0, 30),
            "https://www.coople.com/ch/resources/api/work-assignments/public-jobs/list?pageNum=0&pageSize=30"
        );
        // Trailing slash on the base does not double up
        assert_eq!(
            list_url("http://localhost:8080/", 3, 10),
            "http://localhost:8080/list?pageNum=3&pageSize=10"
        );
    }

    #[test]
    fn test_job_url_encodes_id() {
        assert_eq!(
            job_url("http://localhost:8080", "abc-1"),
            "http://localhost:8080/abc-1"
        );
        assert_eq!(
            job_url("http://localhost:8080", "ä1"),
            "http://localhost:8080/%C3%A41"
        );
    }

    #[test]
    fn test_builder_defaults() {
        let config = ClientConfig::builder().build();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
        assert_eq!(config.timeout_secs, HTTP_TIMEOUT_SECS);
        assert_eq!(
            config.favourites_path(),
            PathBuf::from(".jobboard").join("favourites.json")
        );
    }

    #[test]
    fn test_builder_overrides() {
        let config = ClientConfig::builder()
            .base_url("http://127.0.0.1:9000")
            .page_size(5)
            .timeout_secs(2)
            .data_dir("/tmp/jobs")
            .build();
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.page_size, 5);
        assert_eq!(config.timeout_secs, 2);
        assert_eq!(config.data_dir, PathBuf::from("/tmp/jobs"));
    }
}
