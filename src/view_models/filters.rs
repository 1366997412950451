use super::list_record::{ListRecord, SearchField};
use crate::types::filters::filter_state::FilterState;

/// The active predicates of one filter pass, prepared once and AND-combined.
pub struct Predicates<'a, R: ListRecord> {
    needle: Option<String>,
    fields: &'a [SearchField<R>],
    filters: &'a FilterState<R::Category, R::Status>,
}

impl<'a, R: ListRecord> Predicates<'a, R> {
    pub fn new(
        filters: &'a FilterState<R::Category, R::Status>,
        fields: &'a [SearchField<R>],
    ) -> Self {
        let needle = filters.search_term.trim().to_lowercase();
        Self {
            needle: (!needle.is_empty()).then_some(needle),
            fields,
            filters,
        }
    }

    pub fn accepts(&self, record: &R) -> bool {
        self.matches_search(record)
            && self.filters.category.matches(record.category())
            && self.filters.status.matches(record.status())
            && self
                .filters
                .date_range
                .is_none_or(|range| range.contains(record.recorded_on()))
    }

    fn matches_search(&self, record: &R) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        self.fields
            .iter()
            .any(|field| field.value(record).to_lowercase().contains(needle.as_str()))
    }
}

/// Positions in `records` that pass every active predicate, in source order.
pub fn filter_indices<R: ListRecord>(
    records: &[R],
    filters: &FilterState<R::Category, R::Status>,
    fields: &[SearchField<R>],
) -> Vec<usize> {
    let predicates = Predicates::new(filters, fields);
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| predicates.accepts(record))
        .map(|(index, _)| index)
        .collect()
}
