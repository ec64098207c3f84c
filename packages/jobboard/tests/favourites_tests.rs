//! Favourites persistence and the cache-derived favourites view.

use jobboard::{AppState, ClientConfig, Job};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn job_json(id: &str) -> Value {
    json!({
        "workAssignmentId": id,
        "workAssignmentName": format!("Job {id}"),
        "hourlyWage": {"amount": 30, "currencyId": 1},
        "jobLocation": {"city": "Bern"},
        "periodFrom": 1700000000,
        "periodTo": 1700086400
    })
}

async fn mount_page(server: &MockServer, page: u32, ids: &[&str]) {
    let items: Vec<Value> = ids.iter().map(|id| job_json(id)).collect();
    Mock::given(method("GET"))
        .and(path("/list"))
        .and(query_param("pageNum", page.to_string()))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "data": {"items": items}})),
        )
        .mount(server)
        .await;
}

fn state(server: &MockServer, dir: &TempDir) -> AppState {
    let config = ClientConfig::builder()
        .base_url(server.uri())
        .page_size(2)
        .timeout_secs(5)
        .data_dir(dir.path())
        .build();
    AppState::new(&config).expect("state")
}

fn ids(jobs: &[Job]) -> Vec<&str> {
    jobs.iter().map(Job::id).collect()
}

#[tokio::test]
async fn test_toggle_scenario_through_list() {
    let server = MockServer::start().await;
    mount_page(&server, 0, &["A", "B"]).await;
    let dir = TempDir::new().expect("tempdir");
    let state = state(&server, &dir);

    let mut list = state.job_list();
    list.load_initial().await;

    assert!(state.toggle_favourite("A").expect("toggle"));
    assert_eq!(ids(&state.favourite_jobs()), vec!["A"]);

    assert!(!state.toggle_favourite("A").expect("toggle"));
    assert!(state.favourite_jobs().is_empty());
}

#[tokio::test]
async fn test_favourites_need_cached_page_after_restart() {
    let server = MockServer::start().await;
    mount_page(&server, 0, &["A", "B"]).await;
    mount_page(&server, 1, &["C"]).await;
    let dir = TempDir::new().expect("tempdir");

    {
        let state = state(&server, &dir);
        state.toggle_favourite("B").expect("toggle");
        state.toggle_favourite("C").expect("toggle");
    }

    // New process: favourites are persisted, the cache is not
    let state = state(&server, &dir);
    assert_eq!(state.favourites.ids(), vec!["B", "C"]);
    assert!(state.favourite_jobs().is_empty());

    let mut list = state.job_list();
    list.load_initial().await;
    assert_eq!(ids(&state.favourite_jobs()), vec!["B"]);

    list.load_more().await;
    assert_eq!(ids(&state.favourite_jobs()), vec!["B", "C"]);
}

#[tokio::test]
async fn test_fetch_missing_favourites_by_id() {
    let server = MockServer::start().await;
    mount_page(&server, 0, &["A", "B"]).await;
    Mock::given(method("GET"))
        .and(path("/Z"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"status": 200, "data": job_json("Z")})),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/gone"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;
    let dir = TempDir::new().expect("tempdir");
    let state = state(&server, &dir);

    for id in ["Z", "A", "gone"] {
        state.toggle_favourite(id).expect("toggle");
    }
    let mut list = state.job_list();
    list.load_initial().await;

    // Cache-only view sees A; the fallback adds Z and skips the 404
    assert_eq!(ids(&state.favourite_jobs()), vec!["A"]);
    let resolved = state.resolve_favourite_jobs().await;
    assert_eq!(ids(&resolved), vec!["A", "Z"]);

    // Detail responses never feed the cache-only view
    assert_eq!(ids(&state.favourite_jobs()), vec!["A"]);
}

#[tokio::test]
async fn test_invalid_id_is_not_stored() {
    let server = MockServer::start().await;
    let dir = TempDir::new().expect("tempdir");
    let state = state(&server, &dir);

    assert!(state.toggle_favourite("").is_err());
    assert!(state.toggle_favourite("a/b").is_err());
    assert!(state.favourites.is_empty());
}
