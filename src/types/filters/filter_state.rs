use serde::Serialize;
use std::fmt::Display;

use super::{date_range::DateRange, selection::Selection};

pub const FIRST_PAGE: usize = 1;

/// User-controlled inputs of a list view. Page size lives on the view-model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(bound(serialize = "C: Display, S: Display"))]
pub struct FilterState<C, S> {
    pub search_term: String,
    pub category: Selection<C>,
    pub status: Selection<S>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    pub current_page: usize,
}

impl<C, S> Default for FilterState<C, S> {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            category: Selection::All,
            status: Selection::All,
            date_range: None,
            current_page: FIRST_PAGE,
        }
    }
}

impl<C, S> FilterState<C, S> {
    /// True when no predicate constrains the record set.
    pub fn is_identity(&self) -> bool {
        self.search_term.trim().is_empty()
            && self.category.is_all()
            && self.status.is_all()
            && self.date_range.is_none_or(|range| range.is_unbounded())
    }
}
