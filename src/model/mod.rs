//! Job records and the query used to list them.
//!
//! ## Example
//!
//! ```ignore
//! use job_board::{FilterSpec, JobInput, SortOrder};
//!
//! let filters = FilterSpec::new().location("Berlin").sort(SortOrder::TitleAsc);
//! let input = JobInput::new("Engineer", "Acme", "Berlin")
//!     .job_type("Full-time")
//!     .tags_from_text("rust, backend");
//! ```

mod filter;
mod job;

pub use filter::{FilterSpec, SortOrder};
pub use job::{parse_tags, Job, JobId, JobInput};
