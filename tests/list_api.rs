use actix_web::{App, http::StatusCode, test, web};
use serde_json::Value;
use std::{num::NonZeroUsize, path::PathBuf, sync::Arc};

use growsmart::{
    models::{harvest_model::HarvestRecord, member_model::Member},
    repositories::record_repository::RecordRepository,
    routes::list_routes::configure_list_routes,
    services::record_service::RecordService,
    utils::locale_utils::{Lang, MessageCatalog},
};

struct Fixture {
    members: Arc<RecordService<Member>>,
    harvests: Arc<RecordService<HarvestRecord>>,
    catalog: Arc<MessageCatalog>,
}

fn crate_dir(child: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join(child)
}

fn fixture(rows_dir: PathBuf) -> Fixture {
    let repository = Arc::new(RecordRepository::from_fixtures(rows_dir));
    let page_size = NonZeroUsize::new(5).unwrap();
    Fixture {
        members: Arc::new(RecordService::new(repository.clone(), page_size)),
        harvests: Arc::new(RecordService::new(repository, page_size)),
        catalog: Arc::new(MessageCatalog::load(&crate_dir("locales"))),
    }
}

impl Fixture {
    async fn refresh_all(&self) {
        let messages = self.catalog.get(Lang::En);
        self.members.refresh(messages).await.unwrap();
        self.harvests.refresh(messages).await.unwrap();
    }
}

macro_rules! init_app {
    ($fixture:expr) => {
        test::init_service(App::new().configure(|cfg| {
            configure_list_routes(
                cfg,
                web::Data::new($fixture.members.clone()),
                web::Data::new($fixture.harvests.clone()),
                web::Data::new($fixture.catalog.clone()),
            )
        }))
        .await
    };
}

#[actix_rt::test]
async fn lists_are_unavailable_until_first_load() {
    let fixture = fixture(crate_dir("fixtures"));
    let app = init_app!(fixture);

    let req = test::TestRequest::get().uri("/api/members").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "loading");
}

#[actix_rt::test]
async fn member_list_applies_role_filter() {
    let fixture = fixture(crate_dir("fixtures"));
    fixture.refresh_all().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/members?role=admin&page=3")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let data = &body["data"];
    assert_eq!(data["filtered_count"], 2);
    assert_eq!(data["total_count"], 20);
    assert_eq!(data["total_pages"], 1);
    assert_eq!(data["current_page"], 1);
    assert_eq!(data["records"].as_array().unwrap().len(), 2);
    assert_eq!(data["filters"]["category"], "admin");
}

#[actix_rt::test]
async fn member_search_and_page_clamping() {
    let fixture = fixture(crate_dir("fixtures"));
    fixture.refresh_all().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/members?search=JANE")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["filtered_count"], 1);
    assert_eq!(body["data"]["records"][0]["user"]["full_name"], "Jane Doe");

    let req = test::TestRequest::get().uri("/api/members?page=9").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["total_pages"], 4);
    assert_eq!(body["data"]["current_page"], 4);
    assert_eq!(body["data"]["records"].as_array().unwrap().len(), 5);

    let req = test::TestRequest::get()
        .uri("/api/members?status=resigned")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["filtered_count"], 3);
}

#[actix_rt::test]
async fn invalid_filters_are_rejected_with_field_details() {
    let fixture = fixture(crate_dir("fixtures"));
    fixture.refresh_all().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/members?role=owner&page=0")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "validation_failed");
    assert!(body["error"]["details"].get("role").is_some());
    assert!(body["error"]["details"].get("page").is_some());
}

#[actix_rt::test]
async fn unreadable_query_strings_use_the_error_envelope() {
    let fixture = fixture(crate_dir("fixtures"));
    fixture.refresh_all().await;
    let app = init_app!(fixture);

    for uri in ["/api/members?page=abc", "/api/harvests?page=-1"] {
        let req = test::TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{uri}");

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"]["code"], "validation_failed", "{uri}");
        assert!(body["error"]["details"].get("query").is_some(), "{uri}");
    }

    let req = test::TestRequest::get()
        .uri("/api/members?page=abc")
        .insert_header(("Accept-Language", "fil"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Hindi wastong mga filter");
}

#[actix_rt::test]
async fn messages_follow_accept_language() {
    let fixture = fixture(crate_dir("fixtures"));
    fixture.refresh_all().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/members")
        .insert_header(("Accept-Language", "fil-PH"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["message"], "Nakuha ang mga tala");
}

#[actix_rt::test]
async fn harvest_list_filters_by_crop_and_dates() {
    let fixture = fixture(crate_dir("fixtures"));
    fixture.refresh_all().await;
    let app = init_app!(fixture);

    let req = test::TestRequest::get()
        .uri("/api/harvests?crop=rice&from=2024-04-01&to=2024-04-30")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let records = body["data"]["records"].as_array().unwrap();
    assert!(!records.is_empty());
    assert!(records.iter().all(|record| record["crop"] == "rice"));

    let req = test::TestRequest::get()
        .uri("/api/harvests?from=04/01/2024")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn failed_refresh_surfaces_as_upstream_error() {
    let empty = tempfile::tempdir().unwrap();
    let fixture = fixture(empty.path().to_path_buf());
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/members/refresh")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

    let req = test::TestRequest::get().uri("/api/members").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["code"], "upstream_error");
}

#[actix_rt::test]
async fn refresh_reports_loaded_rows() {
    let fixture = fixture(crate_dir("fixtures"));
    let app = init_app!(fixture);

    let req = test::TestRequest::post()
        .uri("/api/harvests/refresh")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"]["loaded"], 8);
    assert_eq!(body["data"]["rejected"], 0);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());
}
