//! In-process mock of the jobs REST API.
//!
//! Binds to port 0 and serves `/jobs/` and `/jobs/:id` the way the real
//! backend does: server-side filtering and sorting, server-assigned ids and
//! posting dates, `400` with a text body for invalid updates.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, Query, RawQuery, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use job_board::{ClientConfig, HttpJobService, Job, JobId, JobInput};
use serde_json::json;

/// Posting date the mock assigns to every job it creates.
pub fn created_on() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

pub fn job(id: i64, title: &str, date: Option<&str>) -> Job {
    Job {
        id: JobId::new(id),
        title: title.to_string(),
        company: "Co".to_string(),
        location: "Berlin".to_string(),
        job_type: "Full-time".to_string(),
        tags: vec!["rust".to_string()],
        posting_date: date.map(|d| d.parse().unwrap()),
    }
}

#[derive(Default)]
struct MockApi {
    jobs: Vec<Job>,
    next_id: i64,
    fail_list: bool,
    queries: Vec<Option<String>>,
    requests: Vec<String>,
}

#[derive(Clone, Default)]
pub struct MockServer {
    inner: Arc<Mutex<MockApi>>,
}

impl MockServer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_jobs(jobs: Vec<Job>) -> Self {
        let next_id = jobs.iter().map(|j| j.id.get()).max().unwrap_or(0);
        Self {
            inner: Arc::new(Mutex::new(MockApi {
                jobs,
                next_id,
                ..MockApi::default()
            })),
        }
    }

    /// Bind to port 0 and return the base URL.
    pub async fn start(&self) -> String {
        let app = Router::new()
            .route("/jobs/", get(list_jobs).post(create_job))
            .route(
                "/jobs/:id",
                get(get_job).put(update_job).delete(delete_job),
            )
            .with_state(self.clone());
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    /// Start the server and build an HTTP client pointed at it.
    pub async fn client(&self) -> HttpJobService {
        let base = self.start().await;
        HttpJobService::new(ClientConfig::new().with_base_url(base)).unwrap()
    }

    pub fn fail_list(&self, fail: bool) {
        self.inner.lock().unwrap().fail_list = fail;
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.inner.lock().unwrap().jobs.clone()
    }

    /// Raw query strings received by the list endpoint, in order.
    pub fn queries(&self) -> Vec<Option<String>> {
        self.inner.lock().unwrap().queries.clone()
    }

    /// `"METHOD /path"` for every request served.
    pub fn requests(&self) -> Vec<String> {
        self.inner.lock().unwrap().requests.clone()
    }
}

/// An address nothing is listening on.
pub async fn closed_address() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

async fn list_jobs(
    State(server): State<MockServer>,
    RawQuery(raw): RawQuery,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    let mut api = server.inner.lock().unwrap();
    api.requests.push("GET /jobs/".to_string());
    api.queries.push(raw);

    if api.fail_list {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": "Database query error." })),
        )
            .into_response();
    }

    let mut jobs: Vec<Job> = api
        .jobs
        .iter()
        .filter(|j| params.get("job_type").map_or(true, |t| &j.job_type == t))
        .filter(|j| params.get("location").map_or(true, |l| contains_ci(&j.location, l)))
        .filter(|j| {
            params
                .get("tag")
                .map_or(true, |t| j.tags.iter().any(|tag| contains_ci(tag, t)))
        })
        .cloned()
        .collect();

    jobs.sort_by_key(|j| j.id);
    match params.get("sort").map(String::as_str) {
        Some("title_asc") => jobs.sort_by(|a, b| a.title.cmp(&b.title)),
        Some("title_desc") => jobs.sort_by(|a, b| b.title.cmp(&a.title)),
        Some("posting_date_asc") => jobs.sort_by_key(|j| j.posting_date),
        _ => jobs.sort_by(|a, b| b.posting_date.cmp(&a.posting_date)),
    }

    Json(jobs).into_response()
}

async fn get_job(State(server): State<MockServer>, Path(id): Path<i64>) -> Response {
    let mut api = server.inner.lock().unwrap();
    api.requests.push(format!("GET /jobs/{id}"));
    match api.jobs.iter().find(|j| j.id.get() == id) {
        Some(job) => Json(job.clone()).into_response(),
        None => not_found(id),
    }
}

async fn create_job(State(server): State<MockServer>, Json(input): Json<JobInput>) -> Response {
    let mut api = server.inner.lock().unwrap();
    api.requests.push("POST /jobs/".to_string());

    if input.title.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Validation failed" })),
        )
            .into_response();
    }

    api.next_id += 1;
    let job = Job {
        id: JobId::new(api.next_id),
        title: input.title,
        company: input.company,
        location: input.location,
        job_type: input.job_type,
        tags: input.tags,
        posting_date: Some(created_on()),
    };
    api.jobs.push(job.clone());
    (StatusCode::CREATED, Json(job)).into_response()
}

async fn update_job(
    State(server): State<MockServer>,
    Path(id): Path<i64>,
    Json(input): Json<JobInput>,
) -> Response {
    let mut api = server.inner.lock().unwrap();
    api.requests.push(format!("PUT /jobs/{id}"));

    let Some(job) = api.jobs.iter_mut().find(|j| j.id.get() == id) else {
        return not_found(id);
    };
    if input.title.is_empty() {
        return (StatusCode::BAD_REQUEST, "invalid title").into_response();
    }

    job.title = input.title;
    job.company = input.company;
    job.location = input.location;
    job.job_type = input.job_type;
    job.tags = input.tags;
    Json(job.clone()).into_response()
}

async fn delete_job(State(server): State<MockServer>, Path(id): Path<i64>) -> Response {
    let mut api = server.inner.lock().unwrap();
    api.requests.push(format!("DELETE /jobs/{id}"));

    let before = api.jobs.len();
    api.jobs.retain(|j| j.id.get() != id);
    if api.jobs.len() == before {
        return not_found(id);
    }
    StatusCode::NO_CONTENT.into_response()
}

fn not_found(id: i64) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": format!("Job with ID {id} not found.") })),
    )
        .into_response()
}
