//! Filtered, searched and ordered projection of the store's items.
//!
//! `project` is pure: it never touches its input and the same inputs always
//! produce the same output. Sorting is stable, so items that compare equal
//! keep their relative input order in both directions.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use icu_collator::options::CollatorOptions;
use icu_collator::{Collator, CollatorBorrowed};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::types::TodoItem;

/// Completion-status filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    #[default]
    All,
    Active,
    Completed,
}

impl Filter {
    pub fn matches(self, item: &TodoItem) -> bool {
        match self {
            Filter::All => true,
            Filter::Active => !item.completed,
            Filter::Completed => item.completed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SortBy {
    #[default]
    CreatedAt,
    Title,
}

impl SortBy {
    pub fn compare(self, a: &TodoItem, b: &TodoItem) -> Ordering {
        match self {
            SortBy::CreatedAt => compare_created_at(&a.created_at, &b.created_at),
            SortBy::Title => compare_titles(&a.title, &b.title),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    pub fn toggled(self) -> Self {
        match self {
            SortOrder::Asc => SortOrder::Desc,
            SortOrder::Desc => SortOrder::Asc,
        }
    }

    /// Orient an ascending comparison result.
    pub fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortOrder::Asc => ordering,
            SortOrder::Desc => ordering.reverse(),
        }
    }
}

/// Unrecognized filter, sort key or sort order string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {param} value: {value:?}")]
pub struct ParseParamError {
    param: &'static str,
    value: String,
}

impl FromStr for Filter {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "active" => Ok(Filter::Active),
            "completed" => Ok(Filter::Completed),
            other => Err(ParseParamError {
                param: "filter",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for SortBy {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "createdAt" => Ok(SortBy::CreatedAt),
            "title" => Ok(SortBy::Title),
            other => Err(ParseParamError {
                param: "sortBy",
                value: other.to_string(),
            }),
        }
    }
}

impl FromStr for SortOrder {
    type Err = ParseParamError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ParseParamError {
                param: "sortOrder",
                value: other.to_string(),
            }),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Filter::All => "all",
            Filter::Active => "active",
            Filter::Completed => "completed",
        })
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortBy::CreatedAt => "createdAt",
            SortBy::Title => "title",
        })
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        })
    }
}

/// Transient view state. The default is the list screen's initial state.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewParams {
    pub filter: Filter,
    pub search: String,
    pub sort_by: SortBy,
    pub sort_order: SortOrder,
}

/// Filter by status, then by case-insensitive title substring, then sort.
pub fn project(items: &[TodoItem], params: &ViewParams) -> Vec<TodoItem> {
    let needle = params.search.to_lowercase();
    let mut out: Vec<TodoItem> = items
        .iter()
        .filter(|item| params.filter.matches(item))
        .filter(|item| item.title.to_lowercase().contains(&needle))
        .cloned()
        .collect();
    out.sort_by(|a, b| params.sort_order.apply(params.sort_by.compare(a, b)));
    out
}

/// Root-locale collator at the default (tertiary) strength.
static TITLE_COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    Collator::try_new(Default::default(), CollatorOptions::default())
        .map_err(|e| warn!("title collator unavailable, falling back to code point order: {e}"))
        .ok()
});

/// Locale-aware title order (Unicode collation, root locale).
///
/// Accents and case are secondary and tertiary differences, so "École"
/// sorts with the e's and "apple" before "Apple". Strings the collator
/// considers equal fall back to reversed byte order; only identical strings
/// compare equal.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let collated = match TITLE_COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b),
        None => a
            .chars()
            .flat_map(char::to_lowercase)
            .cmp(b.chars().flat_map(char::to_lowercase)),
    };
    collated.then_with(|| b.cmp(a))
}

/// Chronological order. Unparseable timestamps sort first and tie with each other.
pub fn compare_created_at(a: &str, b: &str) -> Ordering {
    timestamp_millis(a).cmp(&timestamp_millis(b))
}

/// Milliseconds since the epoch for RFC 3339, naive ISO datetimes and bare
/// dates. Naive values are read as UTC.
pub fn timestamp_millis(raw: &str) -> Option<i64> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(dt.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc().timestamp_millis())
}
