use anyhow::Result;
use log::{debug, info, warn};
use std::{num::NonZeroUsize, sync::Arc};
use tokio::sync::{Mutex, RwLock};

use crate::{
    query::QueryState,
    repositories::{
        record_repository::RecordRepository,
        table_record::{Ingested, TableRecord, ingest_rows},
    },
    types::filters::filter_state::FilterState,
    utils::locale_utils::Messages,
    view_models::list_view_model::{ListSnapshot, ListViewModel},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RefreshSummary {
    pub loaded: usize,
    pub rejected: usize,
}

/// Keeps the latest fetched snapshot of one table and derives list views
/// from it on demand.
pub struct RecordService<R: TableRecord> {
    repository: Arc<RecordRepository>,
    state: RwLock<QueryState<Arc<Vec<R>>>>,
    refresh_lock: Mutex<()>,
    page_size: NonZeroUsize,
}

impl<R: TableRecord> RecordService<R> {
    pub fn new(repository: Arc<RecordRepository>, page_size: NonZeroUsize) -> Self {
        Self {
            repository,
            state: RwLock::new(QueryState::Loading),
            refresh_lock: Mutex::new(()),
            page_size,
        }
    }

    /// Fetches the table again and replaces the cached snapshot. A failure
    /// replaces the snapshot with the error; there is no retry.
    ///
    /// Refreshes run one at a time in the order they were requested, so the
    /// last one requested is the one left in the cache.
    pub async fn refresh(&self, messages: &Messages) -> Result<RefreshSummary> {
        let _refreshing = self.refresh_lock.lock().await;
        let fetched = self
            .repository
            .fetch_rows(R::TABLE, R::SELECT)
            .await
            .map(|rows| ingest_rows::<R>(rows, messages));

        let mut state = self.state.write().await;
        match fetched {
            Ok(Ingested { records, rejected }) => {
                let summary = RefreshSummary {
                    loaded: records.len(),
                    rejected: rejected.len(),
                };
                if summary.rejected > 0 {
                    warn!(
                        "{} of {} {} rows failed validation",
                        summary.rejected,
                        summary.loaded + summary.rejected,
                        R::TABLE
                    );
                }
                info!("Loaded {} {} records", summary.loaded, R::TABLE);
                *state = QueryState::Data(Arc::new(records));
                Ok(summary)
            }
            Err(err) => {
                warn!("Failed to refresh {}: {:#}", R::TABLE, err);
                *state = QueryState::Error(format!("{err:#}"));
                Err(err)
            }
        }
    }

    pub async fn state(&self) -> QueryState<Arc<Vec<R>>> {
        self.state.read().await.clone()
    }

    pub async fn list(
        &self,
        filters: FilterState<R::Category, R::Status>,
    ) -> QueryState<ListSnapshot<R>> {
        let page_size = self.page_size;
        self.state()
            .await
            .map(|records| derive_snapshot(records.to_vec(), page_size, filters))
    }
}

/// Builds a view-model over the snapshot with the requested filters and
/// returns its visible page.
pub fn derive_snapshot<R: TableRecord>(
    records: Vec<R>,
    page_size: NonZeroUsize,
    filters: FilterState<R::Category, R::Status>,
) -> ListSnapshot<R> {
    let view_model = ListViewModel::with_filters(records, page_size, filters);
    debug!(
        "{} view derived: page {}/{} of {} matches",
        R::TABLE,
        view_model.current_page(),
        view_model.total_pages(),
        view_model.filtered_count()
    );
    view_model.snapshot()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        models::harvest_model::HarvestRecord,
        types::models::harvest::{assistance_status::AssistanceStatus, crop_type::CropType},
    };
    use chrono::{NaiveDate, Utc};
    use std::{fs, path::Path};
    use uuid::Uuid;

    const ONE_HARVEST: &str = r#"[{
        "id": "0b6c2c59-6f0e-4a53-9d8e-5c1b2a3d4e5f",
        "farmer_name": "Pedro Santos",
        "crop": "rice",
        "area_hectares": 1.25,
        "harvested_on": "2024-04-12",
        "status": "pending",
        "created_at": "2024-04-13T01:00:00Z"
    }]"#;

    fn service(dir: &Path) -> RecordService<HarvestRecord> {
        let repository = Arc::new(RecordRepository::from_fixtures(dir));
        RecordService::new(repository, NonZeroUsize::new(5).unwrap())
    }

    #[tokio::test]
    async fn refresh_waits_for_the_one_in_flight() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("harvest_assistance.json"), "[]").unwrap();
        let service = service(dir.path());
        let messages = Messages::default();

        let in_flight = service.refresh_lock.lock().await;
        let mut queued = Box::pin(service.refresh(&messages));
        assert!(futures::poll!(queued.as_mut()).is_pending());

        fs::write(dir.path().join("harvest_assistance.json"), ONE_HARVEST).unwrap();
        drop(in_flight);

        let summary = queued.await.unwrap();
        assert_eq!(summary.loaded, 1);
        let cached = service.state().await;
        assert_eq!(cached.data().map(|records| records.len()), Some(1));
    }

    #[test]
    fn snapshot_uses_the_requested_page() {
        let records: Vec<HarvestRecord> = (1..=7)
            .map(|day| HarvestRecord {
                id: Uuid::new_v4(),
                farmer_name: format!("Farmer {day}"),
                crop: CropType::Corn,
                area_hectares: 1.0,
                harvested_on: NaiveDate::from_ymd_opt(2024, 4, day).unwrap(),
                status: AssistanceStatus::Pending,
                created_at: Utc::now(),
            })
            .collect();

        let filters = FilterState {
            current_page: 2,
            ..FilterState::default()
        };
        let snapshot = derive_snapshot(records, NonZeroUsize::new(5).unwrap(), filters);
        assert_eq!(snapshot.current_page, 2);
        assert_eq!(snapshot.records.len(), 2);
        assert_eq!(snapshot.records[0].farmer_name, "Farmer 6");
    }
}
