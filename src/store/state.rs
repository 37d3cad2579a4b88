//! Session state held by the job store and the patches applied to it.

use crate::model::{FilterSpec, Job, JobId, JobInput};

/// What an open add/edit form is working on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditTarget {
    /// Creating a job that has no id yet.
    New,
    /// Editing a copy of an existing job.
    Existing(Job),
}

impl EditTarget {
    pub fn job_id(&self) -> Option<JobId> {
        match self {
            EditTarget::New => None,
            EditTarget::Existing(job) => Some(job.id),
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, EditTarget::New)
    }

    /// Initial form contents: blank for a new job, pre-filled for an edit.
    pub fn initial_input(&self) -> JobInput {
        match self {
            EditTarget::New => JobInput::default(),
            EditTarget::Existing(job) => JobInput::from(job),
        }
    }
}

/// Everything the presentation layer renders for one session.
///
/// `editing` and `deleting` hold copies of jobs, so patches to `jobs` never
/// change an open selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreState {
    /// Result of the latest applied listing, in server order.
    pub jobs: Vec<Job>,
    /// The job last loaded on its own.
    pub job: Option<Job>,
    pub loading: bool,
    pub error: Option<String>,
    pub filters: FilterSpec,
    /// Set while an add/edit form is open.
    pub editing: Option<EditTarget>,
    /// Set while a delete confirmation is open.
    pub deleting: Option<Job>,
}

impl StoreState {
    pub fn find(&self, id: JobId) -> Option<&Job> {
        self.jobs.iter().find(|job| job.id == id)
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn is_confirming_delete(&self) -> bool {
        self.deleting.is_some()
    }

    fn position(&self, id: JobId) -> Option<usize> {
        self.jobs.iter().position(|job| job.id == id)
    }

    /// Append a newly created job, or replace it in place if its id is already listed.
    pub(crate) fn insert_created(&mut self, job: Job) {
        match self.position(job.id) {
            Some(index) => self.jobs[index] = job,
            None => self.jobs.push(job),
        }
    }

    /// Replace the job with the same id, keeping its position.
    /// Returns false, leaving the list untouched, when no job has that id.
    pub(crate) fn replace_updated(&mut self, job: Job) -> bool {
        match self.position(job.id) {
            Some(index) => {
                self.jobs[index] = job;
                true
            }
            None => false,
        }
    }

    /// Remove the job with `id`. Returns false if it was not listed.
    pub(crate) fn remove(&mut self, id: JobId) -> bool {
        let before = self.jobs.len();
        self.jobs.retain(|job| job.id != id);
        self.jobs.len() != before
    }
}
