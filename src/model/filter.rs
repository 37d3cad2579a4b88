//! Server-side filter and sort parameters for listing jobs.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Sort order understood by the jobs endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    /// Newest first. The server uses this when no sort is given.
    #[default]
    PostingDateDesc,
    PostingDateAsc,
    TitleAsc,
    TitleDesc,
}

impl SortOrder {
    /// The value sent in the `sort` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::PostingDateDesc => "posting_date_desc",
            SortOrder::PostingDateAsc => "posting_date_asc",
            SortOrder::TitleAsc => "title_asc",
            SortOrder::TitleDesc => "title_desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters applied to the job list.
///
/// An empty string leaves that field unconstrained, and `sort: None` lets the
/// server pick its default order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub job_type: String,
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn job_type(mut self, job_type: impl Into<String>) -> Self {
        self.job_type = job_type.into();
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = tag.into();
        self
    }

    pub fn sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Query parameters for the constrained fields only, in a fixed order.
    pub fn query_pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(4);
        for (key, value) in [
            ("location", self.location.as_str()),
            ("job_type", self.job_type.as_str()),
            ("tag", self.tag.as_str()),
        ] {
            if !value.is_empty() {
                pairs.push((key, value));
            }
        }
        if let Some(sort) = self.sort {
            pairs.push(("sort", sort.as_str()));
        }
        pairs
    }

    pub fn is_unconstrained(&self) -> bool {
        self.query_pairs().is_empty()
    }
}
