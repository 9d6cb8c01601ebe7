/*
    query_engine.rs - List queries over a user's records

    Read-only projections used by list views: category filter, free-text
    search, completion tab and sort order. Nothing here mutates a store.
*/

use crate::core_store::model::Entity;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Category value that disables the category filter
pub const ALL_CATEGORIES: &str = "all";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} '{value}'")]
pub struct ParseQueryError {
    kind: &'static str,
    value: String,
}

/// Sorting options for list views
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOption {
    #[default]
    Newest,
    Oldest,
    Alphabetical,
    Pinned,
}

impl SortOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Newest => "newest",
            SortOption::Oldest => "oldest",
            SortOption::Alphabetical => "alphabetical",
            SortOption::Pinned => "pinned",
        }
    }

    /// Comparator for this order; ties keep store order
    pub fn compare<T: Entity>(&self, a: &T, b: &T) -> Ordering {
        match self {
            SortOption::Newest => b.created_at().cmp(&a.created_at()),
            SortOption::Oldest => a.created_at().cmp(&b.created_at()),
            SortOption::Alphabetical => a
                .title()
                .to_lowercase()
                .cmp(&b.title().to_lowercase())
                .then_with(|| a.title().cmp(b.title())),
            SortOption::Pinned => b
                .pinned()
                .cmp(&a.pinned())
                .then_with(|| b.created_at().cmp(&a.created_at())),
        }
    }
}

impl fmt::Display for SortOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortOption {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "newest" => Ok(SortOption::Newest),
            "oldest" => Ok(SortOption::Oldest),
            "alphabetical" => Ok(SortOption::Alphabetical),
            "pinned" => Ok(SortOption::Pinned),
            _ => Err(ParseQueryError {
                kind: "sort option",
                value: s.to_string(),
            }),
        }
    }
}

/// Completion tab for airdrops and testnets
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Completed,
}

impl StatusFilter {
    /// Kinds without a completed flag always match
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        match (self, entity.completed()) {
            (StatusFilter::All, _) | (_, None) => true,
            (StatusFilter::Active, Some(completed)) => !completed,
            (StatusFilter::Completed, Some(completed)) => completed,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ParseQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(StatusFilter::All),
            "active" => Ok(StatusFilter::Active),
            "completed" => Ok(StatusFilter::Completed),
            _ => Err(ParseQueryError {
                kind: "status",
                value: s.to_string(),
            }),
        }
    }
}

/// Filter, search and sort settings for one list view
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListQuery {
    /// Exact category name; `None` or "all" keeps everything
    pub category: Option<String>,
    /// Case-insensitive substring of title or description
    pub search: Option<String>,
    pub sort: SortOption,
    pub status: StatusFilter,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_status(mut self, status: StatusFilter) -> Self {
        self.status = status;
        self
    }

    /// Whether a single record passes every filter
    pub fn matches<T: Entity>(&self, entity: &T) -> bool {
        let category_match = match self.category.as_deref() {
            None | Some(ALL_CATEGORIES) => true,
            Some(category) => entity.category() == category,
        };

        let search_match = match self.search.as_deref() {
            None | Some("") => true,
            Some(term) => {
                let term = term.to_lowercase();
                entity.title().to_lowercase().contains(&term)
                    || entity.description().to_lowercase().contains(&term)
            }
        };

        category_match && search_match && self.status.matches(entity)
    }

    /// Filter then stable-sort a slice of records
    pub fn apply<T: Entity>(&self, items: &[T]) -> Vec<T> {
        let mut result: Vec<T> = items.iter().filter(|e| self.matches(*e)).cloned().collect();
        result.sort_by(|a, b| self.sort.compare(a, b));
        result
    }
}
