//! Filter engine for university lists.
//!
//! Filtering is a stable, order-preserving subset selection. Every axis of a
//! [`FilterSpec`] is a case-insensitive substring check and all axes must
//! hold. There is no ranking.

use serde::{Deserialize, Serialize};

use crate::model::University;

/// Optional constraints applied to a list operation.
///
/// An absent or empty field places no constraint on its axis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Matched against name and location.
    #[serde(default)]
    pub search: Option<String>,
    /// Matched against location.
    #[serde(default)]
    pub city: Option<String>,
    /// Matched against program titles.
    #[serde(default)]
    pub program: Option<String>,
}

impl FilterSpec {
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = Some(program.into());
        self
    }

    /// City constraint usable as a server-side range, if any.
    pub fn city_constraint(&self) -> Option<&str> {
        active(&self.city)
    }

    /// True when no axis is constrained.
    pub fn is_unconstrained(&self) -> bool {
        active(&self.search).is_none()
            && active(&self.city).is_none()
            && active(&self.program).is_none()
    }

    /// Checks a single record against every constrained axis.
    pub fn matches(&self, university: &University) -> bool {
        let matches_search = active(&self.search).is_none_or(|needle| {
            contains_ignore_case(&university.name, needle)
                || contains_ignore_case(&university.location, needle)
        });
        let matches_city = active(&self.city)
            .is_none_or(|needle| contains_ignore_case(&university.location, needle));
        let matches_program = active(&self.program).is_none_or(|needle| {
            university
                .programs
                .iter()
                .any(|program| contains_ignore_case(&program.title, needle))
        });

        matches_search && matches_city && matches_program
    }
}

/// Applies `filter` to `items`, keeping input order.
pub fn apply_filter(items: &[University], filter: &FilterSpec) -> Vec<University> {
    items
        .iter()
        .filter(|university| filter.matches(university))
        .cloned()
        .collect()
}

fn active(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
