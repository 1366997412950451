use serde::Deserialize;
use std::str::FromStr;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    types::{
        filters::{date_range::DateRange, filter_state::FilterState, selection::Selection},
        models::{
            harvest::{assistance_status::AssistanceStatus, crop_type::CropType},
            member::{member_status::MemberStatus, role::Role},
        },
    },
    utils::{locale_utils::Messages, validation_utils::add_error},
    validations::fields::parse_date,
};

#[derive(Debug, Default, Deserialize, Validate)]
pub struct MemberListQuery {
    #[validate(length(max = 100))]
    pub search: Option<String>,

    pub role: Option<String>,

    pub status: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Validate)]
pub struct HarvestListQuery {
    #[validate(length(max = 100))]
    pub search: Option<String>,

    pub crop: Option<String>,

    pub status: Option<String>,

    pub from: Option<String>,

    pub to: Option<String>,

    #[validate(range(min = 1))]
    pub page: Option<usize>,
}

fn parse_selection<T: FromStr>(
    value: Option<&str>,
    messages: &Messages,
) -> Result<Selection<T>, ValidationError> {
    match value {
        None => Ok(Selection::All),
        Some(raw) => raw.parse::<Selection<T>>().map_err(|err| {
            add_error(
                "filter.invalid",
                messages.get_validation_message("filter.invalid", "Unknown filter value"),
                &err.value,
            )
        }),
    }
}

fn parse_optional_date(
    value: Option<&str>,
    messages: &Messages,
) -> Result<Option<chrono::NaiveDate>, ValidationError> {
    match value.map(str::trim).filter(|raw| !raw.is_empty()) {
        None => Ok(None),
        Some(raw) => parse_date(Some(raw), messages).map(Some),
    }
}

fn field<T>(
    errors: &mut ValidationErrors,
    name: &'static str,
    result: Result<T, ValidationError>,
) -> Option<T> {
    result.map_err(|error| errors.add(name, error)).ok()
}

impl MemberListQuery {
    pub fn into_filters(
        self,
        messages: &Messages,
    ) -> Result<FilterState<Role, MemberStatus>, ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        let role = field(&mut errors, "role", parse_selection(self.role.as_deref(), messages));
        let status = field(
            &mut errors,
            "status",
            parse_selection(self.status.as_deref(), messages),
        );

        match (role, status) {
            (Some(category), Some(status)) if errors.errors().is_empty() => Ok(FilterState {
                search_term: self.search.unwrap_or_default(),
                category,
                status,
                date_range: None,
                current_page: self.page.unwrap_or(1),
            }),
            _ => Err(errors),
        }
    }
}

impl HarvestListQuery {
    pub fn into_filters(
        self,
        messages: &Messages,
    ) -> Result<FilterState<CropType, AssistanceStatus>, ValidationErrors> {
        let mut errors = self.validate().err().unwrap_or_else(ValidationErrors::new);

        let crop = field(&mut errors, "crop", parse_selection(self.crop.as_deref(), messages));
        let status = field(
            &mut errors,
            "status",
            parse_selection(self.status.as_deref(), messages),
        );
        let from = field(&mut errors, "from", parse_optional_date(self.from.as_deref(), messages));
        let to = field(&mut errors, "to", parse_optional_date(self.to.as_deref(), messages));

        match (crop, status, from, to) {
            (Some(category), Some(status), Some(from), Some(to)) if errors.errors().is_empty() => {
                let range = DateRange::new(from, to);
                Ok(FilterState {
                    search_term: self.search.unwrap_or_default(),
                    category,
                    status,
                    date_range: (!range.is_unbounded()).then_some(range),
                    current_page: self.page.unwrap_or(1),
                })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn empty_query_means_no_constraints() {
        let filters = MemberListQuery::default()
            .into_filters(&Messages::default())
            .unwrap();
        assert!(filters.is_identity());
        assert_eq!(filters.current_page, 1);
    }

    #[test]
    fn member_query_parses_selections() {
        let query = MemberListQuery {
            search: Some("jane".into()),
            role: Some("admin".into()),
            status: Some("all".into()),
            page: Some(3),
        };
        let filters = query.into_filters(&Messages::default()).unwrap();
        assert_eq!(filters.category, Selection::Only(Role::Admin));
        assert_eq!(filters.status, Selection::All);
        assert_eq!(filters.current_page, 3);
    }

    #[test]
    fn invalid_values_are_collected_per_field() {
        let query = MemberListQuery {
            search: Some("x".repeat(101)),
            role: Some("owner".into()),
            status: Some("Active".into()),
            page: Some(0),
        };
        let errors = query.into_filters(&Messages::default()).unwrap_err();
        let fields = errors.field_errors();
        for name in ["search", "role", "status", "page"] {
            assert!(fields.contains_key(name), "{name}");
        }
    }

    #[test]
    fn harvest_query_builds_date_range() {
        let query = HarvestListQuery {
            crop: Some("rice".into()),
            from: Some("2024-04-01".into()),
            to: Some("".into()),
            ..Default::default()
        };
        let filters = query.into_filters(&Messages::default()).unwrap();
        assert_eq!(filters.category, Selection::Only(CropType::Rice));
        assert_eq!(
            filters.date_range,
            Some(DateRange::new(NaiveDate::from_ymd_opt(2024, 4, 1), None))
        );

        let bad = HarvestListQuery {
            to: Some("April".into()),
            ..Default::default()
        };
        assert!(bad.into_filters(&Messages::default()).unwrap_err().field_errors().contains_key("to"));
    }
}
