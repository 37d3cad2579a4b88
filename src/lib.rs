//! Client-side state for a job-listings board.
//!
//! - [`client`]: the jobs REST API behind the [`JobService`] trait, with
//!   [`HttpJobService`] as the reqwest implementation.
//! - [`store`]: [`JobStore`], which keeps an in-memory job list, filters,
//!   loading/error flags and the open edit/delete selections in sync with the
//!   API.

pub mod client;
mod error;
pub mod model;
pub mod notify;
pub mod store;

pub use client::{ClientConfig, HttpJobService, JobService};
pub use error::{ErrorKind, JobsError, Result};
pub use model::{parse_tags, FilterSpec, Job, JobId, JobInput, SortOrder};
pub use notify::{Notification, NotificationKind, NOTIFICATION_EVENT};
pub use store::{EditTarget, JobStore, StoreState};

#[cfg(feature = "emitter")]
pub use notify::Notifier;

// Re-export the emitter the notifier is built on
#[cfg(feature = "emitter")]
pub use event_emitter_rs::EventEmitter;
