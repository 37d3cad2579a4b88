//! JobStore - session state kept in sync with the jobs API.
//!
//! The store owns a [`StoreState`] and is its only writer. Each operation calls
//! the [`JobService`] and then applies one patch to the state under a single
//! write guard, so a completion is never observed half-applied. The lock is
//! never held across an `.await`.
//!
//! ## Example
//!
//! ```ignore
//! use job_board::{ClientConfig, FilterSpec, JobInput, JobStore};
//!
//! let store = JobStore::connect(ClientConfig::from_env()?)?;
//! store.apply_filters(FilterSpec::new().tag("rust")).await?;
//!
//! store.begin_create();
//! let job = store.save_job(JobInput::new("Engineer", "Acme", "Berlin")).await?;
//!
//! store.request_delete(&job);
//! store.confirm_delete().await?;
//! ```

mod state;

use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::{debug, warn};

use crate::client::{ClientConfig, HttpJobService, JobService};
use crate::error::{JobsError, Result};
use crate::model::{FilterSpec, Job, JobId, JobInput};
use crate::notify::{Notification, NotificationKind};

#[cfg(feature = "emitter")]
use crate::notify::Notifier;

pub use state::{EditTarget, StoreState};

const NOTHING_TO_DELETE: &str = "No job selected for deletion";

/// Client-side job state for one session.
///
/// Generic over the [`JobService`] it talks to; use [`JobStore::connect`] for
/// the HTTP one. Operations take `&self`, so a store can be shared behind an
/// `Arc` between tasks.
pub struct JobStore<S> {
    service: S,
    state: RwLock<StoreState>,
    /// Sequence number of the most recent `apply_filters`.
    fetch_seq: AtomicU64,
    #[cfg(feature = "emitter")]
    notifier: Notifier,
}

impl JobStore<HttpJobService> {
    /// Build a store talking HTTP to the API described by `config`.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(HttpJobService::new(config)?))
    }
}

impl<S: JobService> JobStore<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: RwLock::new(StoreState::default()),
            fetch_seq: AtomicU64::new(0),
            #[cfg(feature = "emitter")]
            notifier: Notifier::new(),
        }
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    // Patches are plain assignments that cannot leave the state half-written,
    // so a poisoned lock still holds consistent data.
    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    // =========================================================================
    // Read access
    // =========================================================================

    /// A snapshot of the whole state.
    pub fn state(&self) -> StoreState {
        self.read().clone()
    }

    pub fn jobs(&self) -> Vec<Job> {
        self.read().jobs.clone()
    }

    pub fn job(&self) -> Option<Job> {
        self.read().job.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn error(&self) -> Option<String> {
        self.read().error.clone()
    }

    pub fn filters(&self) -> FilterSpec {
        self.read().filters.clone()
    }

    pub fn editing(&self) -> Option<EditTarget> {
        self.read().editing.clone()
    }

    pub fn deleting(&self) -> Option<Job> {
        self.read().deleting.clone()
    }

    // =========================================================================
    // Listing
    // =========================================================================

    /// Replace the filters and re-fetch the job list.
    ///
    /// The filters, `loading = true` and the cleared error are applied before
    /// this returns, i.e. before the returned future is first polled. When the
    /// fetch completes, `jobs` is replaced wholesale (or `error` set) and
    /// `loading` cleared, unless another `apply_filters` started in the
    /// meantime; such a superseded result is dropped and the caller still gets
    /// it back.
    ///
    /// Dropping the returned future before it completes clears `loading` if it
    /// was the latest fetch. `jobs` then keeps its previous contents.
    pub fn apply_filters(
        &self,
        filters: FilterSpec,
    ) -> impl Future<Output = Result<Vec<Job>>> + Send + '_ {
        let seq = {
            let mut state = self.write();
            state.filters = filters.clone();
            state.loading = true;
            state.error = None;
            self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1
        };
        debug!(seq, ?filters, "fetching jobs");

        let pending = PendingFetch {
            store: self,
            seq,
            settled: false,
        };
        async move {
            let result = self.service.list_jobs(&filters).await;
            pending.settle(&result);
            result
        }
    }

    /// Re-fetch with the current filters.
    pub fn refresh(&self) -> impl Future<Output = Result<Vec<Job>>> + Send + '_ {
        self.apply_filters(self.filters())
    }

    fn settle_fetch(&self, seq: u64, result: &Result<Vec<Job>>) {
        let mut state = self.write();
        let latest = self.fetch_seq.load(Ordering::SeqCst);
        if seq != latest {
            warn!(seq, latest, "discarding superseded job listing");
            return;
        }

        state.loading = false;
        match result {
            Ok(jobs) => {
                debug!(seq, count = jobs.len(), "job list replaced");
                state.jobs = jobs.clone();
            }
            Err(e) => {
                warn!(seq, error = %e, "fetching jobs failed");
                state.error = Some(e.to_string());
            }
        }
    }

    /// Load a single job into `job`. Leaves the list and `loading` alone.
    pub async fn load_job(&self, id: JobId) -> Result<Job> {
        let result = self.service.get_job(id).await;
        match &result {
            Ok(job) => self.write().job = Some(job.clone()),
            Err(e) => self.record_error(e),
        }
        result
    }

    // =========================================================================
    // Saving
    // =========================================================================

    /// Submit the open form.
    ///
    /// Updates when the selection is an existing job, creates otherwise. On
    /// success the list is patched, the selection cleared and a notification
    /// raised; on failure the list and the selection stay as they were.
    pub async fn save_job(&self, input: JobInput) -> Result<Job> {
        let existing = self.read().editing.as_ref().and_then(EditTarget::job_id);

        let outcome = match existing {
            Some(id) => {
                debug!(%id, "updating job");
                self.service
                    .update_job(id, &input)
                    .await
                    .map(|job| (job, NotificationKind::Updated))
            }
            None => {
                debug!("creating job");
                self.service
                    .create_job(&input)
                    .await
                    .map(|job| (job, NotificationKind::Created))
            }
        };

        match outcome {
            Ok((job, kind)) => {
                self.apply_saved(existing, &job, kind);
                self.notify(Notification::new(kind, job.id));
                Ok(job)
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    /// `submitted` is the selection the save was issued for. The form is only
    /// closed if it still shows that selection.
    fn apply_saved(&self, submitted: Option<JobId>, job: &Job, kind: NotificationKind) {
        let mut state = self.write();
        match kind {
            NotificationKind::Updated => {
                if !state.replace_updated(job.clone()) {
                    debug!(id = %job.id, "updated job is not listed; list unchanged");
                }
            }
            _ => state.insert_created(job.clone()),
        }
        if state.editing.as_ref().and_then(EditTarget::job_id) == submitted {
            state.editing = None;
        }
    }

    // =========================================================================
    // Deleting
    // =========================================================================

    /// Delete the job awaiting confirmation.
    ///
    /// On failure the confirmation stays open and `error` is set, so the
    /// prompt can show what went wrong. On success the confirmation closes
    /// unless another job was selected while the request was in flight.
    pub async fn confirm_delete(&self) -> Result<JobId> {
        let selected = self.read().deleting.as_ref().map(|job| job.id);
        let Some(id) = selected else {
            let err = JobsError::Delete(NOTHING_TO_DELETE.into());
            self.record_error(&err);
            return Err(err);
        };

        debug!(%id, "deleting job");
        match self.service.delete_job(id).await {
            Ok(deleted) => {
                {
                    let mut state = self.write();
                    if !state.remove(deleted) {
                        debug!(id = %deleted, "deleted job is not listed");
                    }
                    if state.deleting.as_ref().map(|job| job.id) == Some(id) {
                        state.deleting = None;
                    }
                }
                self.notify(Notification::new(NotificationKind::Deleted, deleted));
                Ok(deleted)
            }
            Err(e) => {
                self.record_error(&e);
                Err(e)
            }
        }
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// Open the add/edit form on `target`.
    pub fn select_for_edit(&self, target: EditTarget) {
        self.write().editing = Some(target);
    }

    /// Open the form for a new job.
    pub fn begin_create(&self) {
        self.select_for_edit(EditTarget::New);
    }

    /// Open the form on a copy of `job`.
    pub fn begin_edit(&self, job: &Job) {
        self.select_for_edit(EditTarget::Existing(job.clone()));
    }

    pub fn cancel_edit(&self) {
        self.write().editing = None;
    }

    /// Ask for confirmation before deleting a copy of `job`.
    pub fn request_delete(&self, job: &Job) {
        self.write().deleting = Some(job.clone());
    }

    pub fn cancel_delete(&self) {
        self.write().deleting = None;
    }

    pub fn clear_error(&self) {
        self.write().error = None;
    }

    // =========================================================================
    // Notifications
    // =========================================================================

    /// Register a listener for success notifications. Returns its id.
    #[cfg(feature = "emitter")]
    pub fn on_notification<F>(&self, listener: F) -> String
    where
        F: Fn(Notification) + Send + Sync + 'static,
    {
        self.notifier.subscribe(listener)
    }

    #[cfg(feature = "emitter")]
    pub fn remove_notification_listener(&self, listener_id: &str) -> bool {
        self.notifier.unsubscribe(listener_id)
    }

    fn notify(&self, notification: Notification) {
        debug!(
            kind = ?notification.kind,
            id = %notification.job_id,
            "{}",
            notification.message
        );
        #[cfg(feature = "emitter")]
        self.notifier.notify(notification);
    }

    fn record_error(&self, err: &JobsError) {
        warn!(kind = ?err.kind(), error = %err, "jobs operation rejected");
        self.write().error = Some(err.to_string());
    }
}

/// A listing started by [`JobStore::apply_filters`] that has not settled yet.
struct PendingFetch<'a, S: JobService> {
    store: &'a JobStore<S>,
    seq: u64,
    settled: bool,
}

impl<S: JobService> PendingFetch<'_, S> {
    fn settle(mut self, result: &Result<Vec<Job>>) {
        self.settled = true;
        self.store.settle_fetch(self.seq, result);
    }
}

impl<S: JobService> Drop for PendingFetch<'_, S> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut state = self.store.write();
        if self.store.fetch_seq.load(Ordering::SeqCst) == self.seq {
            debug!(seq = self.seq, "job listing abandoned");
            state.loading = false;
        }
    }
}
