//! reqwest implementation of [`JobService`].

use std::time::Instant;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use super::config::ClientConfig;
use super::JobService;
use crate::error::{ErrorKind, JobsError, Result};
use crate::model::{FilterSpec, Job, JobId, JobInput};

const FETCH_FAILED: &str = "Failed to fetch jobs";
const NOT_FOUND: &str = "Job not found";
const CREATE_FAILED: &str = "Failed to create job";
const DELETE_FAILED: &str = "Failed to delete job";

/// HTTP client for the jobs API.
///
/// Cheap to clone; clones share the underlying connection pool.
///
/// ```rust,no_run
/// use job_board::{ClientConfig, FilterSpec, HttpJobService, JobService};
///
/// # async fn example() -> job_board::Result<()> {
/// let service = HttpJobService::new(ClientConfig::new().with_base_url("http://localhost:5000"))?;
/// let jobs = service.list_jobs(&FilterSpec::new().tag("rust")).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpJobService {
    base_url: Url,
    http: Client,
}

impl HttpJobService {
    pub fn new(config: ClientConfig) -> Result<Self> {
        config.validate()?;
        let base_url = config.parsed_base_url()?;

        let http = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(|e| JobsError::Config(e.to_string()))?;

        debug!(base_url = %base_url, "jobs client configured");
        Ok(Self { base_url, http })
    }

    /// Build a client from [`ClientConfig::from_env`].
    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `GET` target for a listing, with only the constrained filters encoded.
    pub fn list_url(&self, filters: &FilterSpec) -> Result<Url> {
        let mut url = self.collection_url(ErrorKind::Fetch)?;
        let pairs = filters.query_pairs();
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        Ok(url)
    }

    fn collection_url(&self, kind: ErrorKind) -> Result<Url> {
        self.base_url
            .join("jobs/")
            .map_err(|e| JobsError::new(kind, e.to_string()))
    }

    fn job_url(&self, id: JobId, kind: ErrorKind) -> Result<Url> {
        self.base_url
            .join(&format!("jobs/{}", id))
            .map_err(|e| JobsError::new(kind, e.to_string()))
    }

    /// Send a request, turning transport failures into `kind` errors.
    async fn send(&self, kind: ErrorKind, request: RequestBuilder) -> Result<Response> {
        let request = request
            .build()
            .map_err(|e| JobsError::new(kind, e.to_string()))?;
        let method = request.method().clone();
        let url = request.url().clone();

        let start = Instant::now();
        match self.http.execute(request).await {
            Ok(response) => {
                debug!(
                    %method,
                    %url,
                    status = response.status().as_u16(),
                    elapsed = ?start.elapsed(),
                    "jobs api responded"
                );
                Ok(response)
            }
            Err(e) => {
                warn!(%method, %url, error = %e, "jobs api request failed");
                Err(JobsError::new(kind, e.to_string()))
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(kind: ErrorKind, response: Response) -> Result<T> {
    response
        .json::<T>()
        .await
        .map_err(|e| JobsError::new(kind, e.to_string()))
}

impl JobService for HttpJobService {
    async fn list_jobs(&self, filters: &FilterSpec) -> Result<Vec<Job>> {
        let url = self.list_url(filters)?;
        let response = self.send(ErrorKind::Fetch, self.http.get(url)).await?;
        if !response.status().is_success() {
            return Err(JobsError::Fetch(FETCH_FAILED.into()));
        }
        decode(ErrorKind::Fetch, response).await
    }

    async fn get_job(&self, id: JobId) -> Result<Job> {
        // Only a non-2xx reply means "not found"; a failed read is a fetch error.
        let url = self.job_url(id, ErrorKind::Fetch)?;
        let response = self.send(ErrorKind::Fetch, self.http.get(url)).await?;
        if !response.status().is_success() {
            return Err(JobsError::NotFound(NOT_FOUND.into()));
        }
        decode(ErrorKind::Fetch, response).await
    }

    async fn create_job(&self, input: &JobInput) -> Result<Job> {
        let url = self.collection_url(ErrorKind::Create)?;
        let response = self
            .send(ErrorKind::Create, self.http.post(url).json(input))
            .await?;
        if !response.status().is_success() {
            return Err(JobsError::Create(CREATE_FAILED.into()));
        }
        decode(ErrorKind::Create, response).await
    }

    async fn update_job(&self, id: JobId, input: &JobInput) -> Result<Job> {
        let url = self.job_url(id, ErrorKind::Update)?;
        let response = self
            .send(ErrorKind::Update, self.http.put(url).json(input))
            .await?;

        let status = response.status();
        if !status.is_success() {
            // The body explains validation failures, so it goes into the message.
            let body = response.text().await.unwrap_or_default();
            let detail = if body.trim().is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(JobsError::Update(format!("Update failed: {}", detail)));
        }
        decode(ErrorKind::Update, response).await
    }

    async fn delete_job(&self, id: JobId) -> Result<JobId> {
        let url = self.job_url(id, ErrorKind::Delete)?;
        let response = self.send(ErrorKind::Delete, self.http.delete(url)).await?;
        if !response.status().is_success() {
            return Err(JobsError::Delete(DELETE_FAILED.into()));
        }
        Ok(id)
    }
}
