use actix_web::web;
use std::sync::Arc;

use crate::{
    handlers::list_handler::{
        health_handler, list_harvests_handler, list_members_handler, refresh_handler,
    },
    models::{harvest_model::HarvestRecord, member_model::Member},
    services::record_service::RecordService,
    utils::{locale_utils::MessageCatalog, validation_utils::handle_query_error},
};

pub fn configure_list_routes(
    cfg: &mut web::ServiceConfig,
    member_service_data: web::Data<Arc<RecordService<Member>>>,
    harvest_service_data: web::Data<Arc<RecordService<HarvestRecord>>>,
    catalog_data: web::Data<Arc<MessageCatalog>>,
) {
    cfg.service(
        web::scope("/api")
            .app_data(member_service_data)
            .app_data(harvest_service_data)
            .app_data(catalog_data)
            .app_data(web::QueryConfig::default().error_handler(handle_query_error))
            .route("/health", web::get().to(health_handler))
            .route("/members", web::get().to(list_members_handler))
            .route("/members/refresh", web::post().to(refresh_handler::<Member>))
            .route("/harvests", web::get().to(list_harvests_handler))
            .route(
                "/harvests/refresh",
                web::post().to(refresh_handler::<HarvestRecord>),
            ),
    );
}
