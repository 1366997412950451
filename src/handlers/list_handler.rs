use actix_web::{HttpRequest, HttpResponse, web};
use log::info;
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

use crate::{
    models::{harvest_model::HarvestRecord, member_model::Member},
    query::QueryState,
    repositories::table_record::TableRecord,
    services::record_service::RecordService,
    types::{
        requests::list_query::{HarvestListQuery, MemberListQuery},
        responses::api_response::{ApiResponse, ErrorDetails},
    },
    utils::{
        locale_utils::{MessageCatalog, Messages, get_lang},
        validation_utils::handle_validation_error,
    },
};

fn respond_with_state<T: Serialize>(state: QueryState<T>, messages: &Messages) -> HttpResponse {
    match state {
        QueryState::Loading => HttpResponse::ServiceUnavailable().json(ApiResponse::<()>::error(
            messages.get_list_message("fetch.loading", "Records are still loading"),
            ErrorDetails::new("loading", None),
        )),
        QueryState::Error(err) => HttpResponse::BadGateway().json(ApiResponse::<()>::error(
            messages.get_list_message("fetch.failed", "Records could not be fetched"),
            ErrorDetails::new("upstream_error", Some(json!(err))),
        )),
        QueryState::Data(data) => HttpResponse::Ok().json(ApiResponse::success(
            messages.get_list_message("fetch.success", "Records fetched"),
            data,
        )),
    }
}

pub async fn list_members_handler(
    req: HttpRequest,
    member_service: web::Data<Arc<RecordService<Member>>>,
    catalog: web::Data<Arc<MessageCatalog>>,
    query: web::Query<MemberListQuery>,
) -> HttpResponse {
    let messages = catalog.get(get_lang(&req));

    let filters = match query.into_inner().into_filters(messages) {
        Ok(filters) => filters,
        Err(errs) => {
            let err_msg = messages.get_list_message("filter.invalid", "Invalid list filters");
            return handle_validation_error(errs, &err_msg);
        }
    };

    respond_with_state(member_service.list(filters).await, messages)
}

pub async fn list_harvests_handler(
    req: HttpRequest,
    harvest_service: web::Data<Arc<RecordService<HarvestRecord>>>,
    catalog: web::Data<Arc<MessageCatalog>>,
    query: web::Query<HarvestListQuery>,
) -> HttpResponse {
    let messages = catalog.get(get_lang(&req));

    let filters = match query.into_inner().into_filters(messages) {
        Ok(filters) => filters,
        Err(errs) => {
            let err_msg = messages.get_list_message("filter.invalid", "Invalid list filters");
            return handle_validation_error(errs, &err_msg);
        }
    };

    respond_with_state(harvest_service.list(filters).await, messages)
}

pub async fn refresh_handler<R: TableRecord>(
    req: HttpRequest,
    service: web::Data<Arc<RecordService<R>>>,
    catalog: web::Data<Arc<MessageCatalog>>,
) -> HttpResponse {
    let messages = catalog.get(get_lang(&req));

    let result = service.refresh(messages).await;
    if let Ok(summary) = &result {
        info!(
            "Refreshed {}: {} loaded, {} rejected",
            R::TABLE,
            summary.loaded,
            summary.rejected
        );
    }
    respond_with_state(QueryState::from_result(result), messages)
}

pub async fn health_handler() -> HttpResponse {
    HttpResponse::Ok().json(ApiResponse::success("ok", json!({ "status": "up" })))
}
