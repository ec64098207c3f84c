//! Wire types of the public job feed.
//!
//! Field names follow the feed's camelCase JSON. Nested objects are often
//! partially null in practice, so everything except the job id falls back
//! to a default instead of failing the whole page.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

/// Deserialize an explicit `null` as the type's default.
fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

/// Deserialize a timestamp from any JSON number, truncating fractions.
/// `null` becomes 0.
fn timestamp<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let number = Option::<Number>::deserialize(deserializer)?;
    Ok(number
        .and_then(|n| n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)))
        .unwrap_or_default())
}

/// A monetary amount with the feed's numeric currency id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Money {
    #[serde(deserialize_with = "null_default")]
    pub amount: f64,
    #[serde(deserialize_with = "null_default")]
    pub currency_id: i64,
}

/// Skill classification of a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobSkill {
    #[serde(deserialize_with = "null_default")]
    pub job_profile_id: i64,
    #[serde(deserialize_with = "null_default")]
    pub educational_level_id: i64,
}

/// Where the work takes place.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JobLocation {
    pub address_street: Option<String>,
    pub extra_address: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country_id: Option<i64>,
}

/// One work assignment from the feed.
///
/// Unknown fields are kept in `extra` so a re-serialized job loses nothing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub work_assignment_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub wa_readable_id: String,
    #[serde(default, deserialize_with = "null_default")]
    pub hourly_wage: Money,
    #[serde(default, deserialize_with = "null_default")]
    pub salary: Money,
    #[serde(default, deserialize_with = "null_default")]
    pub job_skill: JobSkill,
    #[serde(default, deserialize_with = "null_default")]
    pub work_assignment_name: String,
    #[serde(default, deserialize_with = "null_default")]
    pub job_location: JobLocation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requirements: Option<String>,
    /// Epoch seconds or milliseconds, see [`crate::format::normalize_timestamp`].
    #[serde(default, deserialize_with = "timestamp")]
    pub period_from: i64,
    #[serde(default, deserialize_with = "timestamp")]
    pub period_to: i64,
    #[serde(default, deserialize_with = "timestamp")]
    pub date_published: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch_link: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Job {
    /// Unique identifier of the job.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.work_assignment_id
    }

    /// City of the job location, if the feed provided one.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        self.job_location
            .city
            .as_deref()
            .filter(|c| !c.trim().is_empty())
    }
}

/// Arguments of one list query; also its cache key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListJobsArgs {
    pub page_num: u32,
    pub page_size: u32,
}

impl ListJobsArgs {
    #[must_use]
    pub fn new(page_num: u32, page_size: u32) -> Self {
        Self {
            page_num,
            page_size,
        }
    }
}

/// Payload of a list response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobsPage {
    #[serde(default, deserialize_with = "null_default")]
    pub items: Vec<Job>,
}

/// `GET /list` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobsListResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub status: u16,
    #[serde(default, deserialize_with = "null_default")]
    pub data: JobsPage,
}

/// `GET /{jobId}` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobResponse {
    #[serde(default, deserialize_with = "null_default")]
    pub status: u16,
    pub data: Job,
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// Minimal job with the given id and name.
    pub fn job(id: &str, name: &str) -> Job {
        Job {
            work_assignment_id: id.to_string(),
            wa_readable_id: format!("R-{id}"),
            hourly_wage: Money {
                amount: 25.0,
                currency_id: 1,
            },
            salary: Money::default(),
            job_skill: JobSkill::default(),
            work_assignment_name: name.to_string(),
            job_location: JobLocation {
                city: Some("Zürich".to_string()),
                ..JobLocation::default()
            },
            requirements: None,
            period_from: 1_700_000_000,
            period_to: 1_700_086_400,
            date_published: 1_699_900_000,
            branch_link: None,
            extra: Map::new(),
        }
    }

    pub fn list_response(jobs: Vec<Job>) -> JobsListResponse {
        JobsListResponse {
            status: 200,
            data: JobsPage { items: jobs },
        }
    }
}
