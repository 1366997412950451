use actix_web::{App, HttpServer, middleware::Logger, web};
use anyhow::{Context, Result};
use dotenv::dotenv;
use log::{info, warn};
use std::sync::Arc;

use growsmart::{
    config::{cors::configure_cors, settings::Settings},
    models::{harvest_model::HarvestRecord, member_model::Member},
    repositories::record_repository::RecordRepository,
    routes::list_routes::configure_list_routes,
    services::record_service::RecordService,
    utils::locale_utils::{Lang, MessageCatalog},
};

#[actix_web::main]
async fn main() -> Result<()> {
    dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = Settings::from_env().context("Invalid configuration")?;
    info!("Starting GrowSmart list service on {}", settings.bind_addr);

    let catalog = Arc::new(MessageCatalog::load(&settings.locales_dir));
    let repository = Arc::new(RecordRepository::new(&settings.source)?);
    let member_service = Arc::new(RecordService::<Member>::new(
        repository.clone(),
        settings.page_size,
    ));
    let harvest_service = Arc::new(RecordService::<HarvestRecord>::new(
        repository,
        settings.page_size,
    ));

    {
        let catalog = catalog.clone();
        let member_service = member_service.clone();
        let harvest_service = harvest_service.clone();
        actix_rt::spawn(async move {
            let messages = catalog.get(Lang::En);
            let (members, harvests) = futures::join!(
                member_service.refresh(messages),
                harvest_service.refresh(messages)
            );
            if let Err(err) = members.and(harvests) {
                warn!("Initial load incomplete: {:#}", err);
            }
        });
    }

    let member_service_data = web::Data::new(member_service);
    let harvest_service_data = web::Data::new(harvest_service);
    let catalog_data = web::Data::new(catalog);
    let allowed_origin = settings.allowed_origin.clone();

    HttpServer::new(move || {
        let member_service_data = member_service_data.clone();
        let harvest_service_data = harvest_service_data.clone();
        let catalog_data = catalog_data.clone();
        App::new()
            .wrap(Logger::default())
            .wrap(configure_cors(allowed_origin.as_deref()))
            .configure(move |cfg| {
                configure_list_routes(cfg, member_service_data, harvest_service_data, catalog_data)
            })
    })
    .bind(&settings.bind_addr)
    .with_context(|| format!("Failed to bind {}", settings.bind_addr))?
    .run()
    .await
    .context("Server terminated with an error")
}
