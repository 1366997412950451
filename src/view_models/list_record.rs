use chrono::NaiveDate;
use std::{borrow::Cow, fmt};

pub type FieldAccessor<R> = for<'a> fn(&'a R) -> Cow<'a, str>;

/// A named string field the free-text search looks into.
pub struct SearchField<R> {
    pub name: &'static str,
    accessor: FieldAccessor<R>,
}

impl<R> SearchField<R> {
    pub const fn new(name: &'static str, accessor: FieldAccessor<R>) -> Self {
        Self { name, accessor }
    }

    pub fn value<'a>(&self, record: &'a R) -> Cow<'a, str> {
        (self.accessor)(record)
    }
}

impl<R> Clone for SearchField<R> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<R> Copy for SearchField<R> {}

impl<R> fmt::Debug for SearchField<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SearchField").field(&self.name).finish()
    }
}

/// Shape every record shown in a filterable list must expose.
///
/// `Category` is the coarse grouping a list filters on (a member's role, a
/// harvest's crop), `Status` its lifecycle state.
pub trait ListRecord: Sized {
    type Category: PartialEq + Clone + fmt::Debug;
    type Status: PartialEq + Clone + fmt::Debug;

    fn category(&self) -> &Self::Category;

    fn status(&self) -> &Self::Status;

    /// Date used by the date-range predicate, if the record has one.
    fn recorded_on(&self) -> Option<NaiveDate> {
        None
    }

    fn default_search_fields() -> Vec<SearchField<Self>>;
}
