use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use uuid::Uuid;

use crate::{
    types::{
        filters::selection::Selection,
        models::harvest::{assistance_status::AssistanceStatus, crop_type::CropType},
    },
    view_models::{
        list_record::{ListRecord, SearchField},
        list_view_model::ListViewModel,
    },
};

/// Harvest assistance extended to a farmer for one harvested crop.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct HarvestRecord {
    pub id: Uuid,

    pub farmer_name: String,

    pub crop: CropType,

    pub area_hectares: f64,

    pub harvested_on: NaiveDate,

    pub status: AssistanceStatus,

    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct HarvestRow {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    pub farmer_name: Option<String>,

    #[serde(default)]
    pub crop: Option<String>,

    #[serde(default)]
    pub area_hectares: Option<f64>,

    #[serde(default)]
    pub harvested_on: Option<String>,

    #[serde(default)]
    pub status: Option<String>,

    #[serde(default)]
    pub created_at: Option<String>,
}

fn farmer_name(record: &HarvestRecord) -> Cow<'_, str> {
    Cow::Borrowed(&record.farmer_name)
}

fn crop(record: &HarvestRecord) -> Cow<'_, str> {
    Cow::Borrowed(record.crop.as_ref())
}

fn status(record: &HarvestRecord) -> Cow<'_, str> {
    Cow::Borrowed(record.status.as_ref())
}

pub const FARMER_NAME_FIELD: SearchField<HarvestRecord> =
    SearchField::new("farmer_name", farmer_name);
pub const CROP_FIELD: SearchField<HarvestRecord> = SearchField::new("crop", crop);
pub const STATUS_FIELD: SearchField<HarvestRecord> = SearchField::new("status", status);

impl ListRecord for HarvestRecord {
    type Category = CropType;
    type Status = AssistanceStatus;

    fn category(&self) -> &CropType {
        &self.crop
    }

    fn status(&self) -> &AssistanceStatus {
        &self.status
    }

    fn recorded_on(&self) -> Option<NaiveDate> {
        Some(self.harvested_on)
    }

    fn default_search_fields() -> Vec<SearchField<Self>> {
        vec![FARMER_NAME_FIELD, CROP_FIELD, STATUS_FIELD]
    }
}

impl ListViewModel<HarvestRecord> {
    pub fn set_crop_filter(&mut self, crop: Selection<CropType>) {
        self.set_category_filter(crop);
    }

    pub fn crop_filter(&self) -> &Selection<CropType> {
        self.category_filter()
    }
}
