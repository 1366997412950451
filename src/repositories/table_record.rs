use log::warn;
use rayon::prelude::*;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use validator::ValidationErrors;

use crate::{
    constants::{HARVESTS_SELECT, HARVESTS_TABLE, MEMBERS_SELECT, MEMBERS_TABLE},
    models::{
        harvest_model::{HarvestRecord, HarvestRow},
        member_model::{Member, MemberRow},
    },
    utils::{
        locale_utils::Messages,
        validation_utils::{add_error, validate_harvest_row},
    },
    view_models::list_record::ListRecord,
};

/// A list record backed by one remote table whose rows are validated before
/// they are trusted.
pub trait TableRecord: ListRecord + Clone + Send + Sync + 'static {
    type Row: DeserializeOwned + Send;

    const TABLE: &'static str;
    const SELECT: &'static str;

    fn from_row(row: &Self::Row, messages: &Messages) -> Result<Self, ValidationErrors>;
}

impl TableRecord for Member {
    type Row = MemberRow;

    const TABLE: &'static str = MEMBERS_TABLE;
    const SELECT: &'static str = MEMBERS_SELECT;

    fn from_row(row: &MemberRow, messages: &Messages) -> Result<Self, ValidationErrors> {
        Member::try_from_row(row, messages)
    }
}

impl TableRecord for HarvestRecord {
    type Row = HarvestRow;

    const TABLE: &'static str = HARVESTS_TABLE;
    const SELECT: &'static str = HARVESTS_SELECT;

    fn from_row(row: &HarvestRow, messages: &Messages) -> Result<Self, ValidationErrors> {
        validate_harvest_row(row, messages)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RejectedRow {
    pub index: usize,
    pub errors: ValidationErrors,
}

#[derive(Debug, Clone)]
pub struct Ingested<R> {
    pub records: Vec<R>,
    pub rejected: Vec<RejectedRow>,
}

fn convert_row<R: TableRecord>(row: Value, messages: &Messages) -> Result<R, ValidationErrors> {
    let typed: R::Row = serde_json::from_value(row).map_err(|err| {
        let mut errors = ValidationErrors::new();
        errors.add(
            "row",
            add_error(
                "row.malformed",
                messages.get_validation_message("row.malformed", "Row has an unexpected shape"),
                &err.to_string(),
            ),
        );
        errors
    })?;
    R::from_row(&typed, messages)
}

/// Validates raw rows in parallel. Valid records keep their source order;
/// invalid ones are logged and reported, never stored.
pub fn ingest_rows<R: TableRecord>(rows: Vec<Value>, messages: &Messages) -> Ingested<R> {
    let results: Vec<Result<R, ValidationErrors>> = rows
        .into_par_iter()
        .map(|row| convert_row::<R>(row, messages))
        .collect();

    let mut records = Vec::with_capacity(results.len());
    let mut rejected = Vec::new();
    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(record) => records.push(record),
            Err(errors) => {
                warn!("Rejected {} row {}: {}", R::TABLE, index, errors);
                rejected.push(RejectedRow { index, errors });
            }
        }
    }

    Ingested { records, rejected }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn keeps_valid_rows_in_order_and_reports_the_rest() {
        let rows = vec![
            json!({
                "id": "0b6c2c59-6f0e-4a53-9d8e-5c1b2a3d4e5f",
                "farmer_name": "Pedro Santos",
                "crop": "rice",
                "area_hectares": 1.25,
                "harvested_on": "2024-04-12",
                "status": "pending",
                "created_at": "2024-04-13T01:00:00Z"
            }),
            json!({ "id": 42, "farmer_name": ["not", "a", "string"] }),
            json!({
                "id": "1c7d3d6a-7a1f-4b64-8e9f-6d2c3b4e5f60",
                "farmer_name": "Ana Reyes",
                "crop": "corn",
                "area_hectares": 0.5,
                "harvested_on": "2024-04-20",
                "status": "released",
                "created_at": "2024-04-21T01:00:00Z"
            }),
            json!({ "id": "nope", "crop": "wheat" }),
        ];

        let ingested = ingest_rows::<HarvestRecord>(rows, &Messages::default());
        let names: Vec<&str> = ingested
            .records
            .iter()
            .map(|record| record.farmer_name.as_str())
            .collect();
        assert_eq!(names, ["Pedro Santos", "Ana Reyes"]);

        let rejected: Vec<usize> = ingested.rejected.iter().map(|row| row.index).collect();
        assert_eq!(rejected, [1, 3]);
        assert!(ingested.rejected[0].errors.field_errors().contains_key("row"));
        assert!(ingested.rejected[1].errors.field_errors().contains_key("crop"));
    }

    #[test]
    fn members_with_suffixes_in_their_names_are_kept() {
        let rows = vec![json!({
            "id": "7f1c6a52-0d0e-4c1b-9a4e-0b7f6a3c2d11",
            "created_at": "2024-02-01T09:00:00Z",
            "user_id": "b3c1d1e2-5f6a-4b7c-8d9e-0f1a2b3c4d5e",
            "role": "technician",
            "status": "active",
            "user": {
                "id": "b3c1d1e2-5f6a-4b7c-8d9e-0f1a2b3c4d5e",
                "email": "juan.delacruz@agri.gov.ph",
                "full_name": "Juan Dela Cruz, Jr.",
                "created_at": "2024-01-31T12:00:00Z"
            }
        })];

        let ingested = ingest_rows::<Member>(rows, &Messages::default());
        assert!(ingested.rejected.is_empty());
        assert_eq!(ingested.records[0].user.full_name, "Juan Dela Cruz, Jr.");
    }
}
