//! Remote job service: the five calls the store makes against the jobs API.
//!
//! [`JobService`] is the seam between the store and the network.
//! [`HttpJobService`] implements it over HTTP with reqwest:
//!
//! | Call | Request |
//! |---|---|
//! | `list_jobs` | `GET /jobs/?<query>` |
//! | `get_job` | `GET /jobs/{id}` |
//! | `create_job` | `POST /jobs/` |
//! | `update_job` | `PUT /jobs/{id}` |
//! | `delete_job` | `DELETE /jobs/{id}` |
//!
//! Every call resolves to exactly one of its success value or a [`JobsError`]
//! of the matching kind.
//!
//! [`JobsError`]: crate::JobsError

mod config;
mod http;

use std::future::Future;
use std::sync::Arc;

use crate::error::Result;
use crate::model::{FilterSpec, Job, JobId, JobInput};

pub use config::{ClientConfig, ENV_API_URL, ENV_TIMEOUT_SECS};
pub use http::HttpJobService;

/// Asynchronous CRUD access to the jobs API.
pub trait JobService: Send + Sync {
    /// List jobs matching `filters`, in the server's order.
    fn list_jobs(&self, filters: &FilterSpec) -> impl Future<Output = Result<Vec<Job>>> + Send;

    fn get_job(&self, id: JobId) -> impl Future<Output = Result<Job>> + Send;

    /// Create a job; the server assigns `id` and `posting_date`.
    fn create_job(&self, input: &JobInput) -> impl Future<Output = Result<Job>> + Send;

    /// Replace every editable field of job `id`.
    fn update_job(&self, id: JobId, input: &JobInput)
        -> impl Future<Output = Result<Job>> + Send;

    /// Delete job `id`, returning the same id.
    fn delete_job(&self, id: JobId) -> impl Future<Output = Result<JobId>> + Send;
}

impl<S: JobService> JobService for Arc<S> {
    fn list_jobs(&self, filters: &FilterSpec) -> impl Future<Output = Result<Vec<Job>>> + Send {
        (**self).list_jobs(filters)
    }

    fn get_job(&self, id: JobId) -> impl Future<Output = Result<Job>> + Send {
        (**self).get_job(id)
    }

    fn create_job(&self, input: &JobInput) -> impl Future<Output = Result<Job>> + Send {
        (**self).create_job(input)
    }

    fn update_job(
        &self,
        id: JobId,
        input: &JobInput,
    ) -> impl Future<Output = Result<Job>> + Send {
        (**self).update_job(id, input)
    }

    fn delete_job(&self, id: JobId) -> impl Future<Output = Result<JobId>> + Send {
        (**self).delete_job(id)
    }
}
