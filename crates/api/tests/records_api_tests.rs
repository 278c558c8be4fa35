use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use hatedns_api::{create_api_routes, AppState};
use hatedns_application::ports::RecordStore;
use hatedns_application::use_cases::{DumpRecordsUseCase, GetRecordUseCase, PutRecordUseCase};
use hatedns_domain::config::{DatabaseConfig, RecordsConfig};
use hatedns_infrastructure::database::create_pool;
use hatedns_infrastructure::repositories::SqliteRecordStore;
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt;

async fn create_test_app() -> (Router, Arc<SqliteRecordStore>) {
    let pool = create_pool(&DatabaseConfig::default()).await.unwrap();
    let store = Arc::new(SqliteRecordStore::new(pool));

    let state = AppState {
        get_record: Arc::new(GetRecordUseCase::new(store.clone())),
        put_record: Arc::new(PutRecordUseCase::new(store.clone())),
        dump_records: Arc::new(DumpRecordsUseCase::new(store.clone())),
        records: Arc::new(RecordsConfig::default()),
    };

    (create_api_routes(state), store)
}

async fn send(app: &Router, method: &str, uri: &str) -> (StatusCode, String) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn test_put_with_defaults_then_get() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, "PUT", "/example.com/1.2.3.4").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());

    let (status, body) = send(&app, "GET", "/example.com/A").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "example.com. 60 IN A 1.2.3.4\n");
}

#[tokio::test]
async fn test_get_missing_is_nxdomain() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/nowhere.test/A").await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, "NXDOMAIN\n");
}

#[tokio::test]
async fn test_second_put_replaces_first() {
    let (app, store) = create_test_app().await;

    send(&app, "PUT", "/example.com/1.2.3.4").await;
    send(&app, "PUT", "/example.com/5.6.7.8").await;

    let (_, body) = send(&app, "GET", "/example.com/A").await;
    assert_eq!(body, "example.com. 60 IN A 5.6.7.8\n");
    assert_eq!(store.count().await.unwrap(), 1);
}

#[tokio::test]
async fn test_put_with_ttl_and_type() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(&app, "PUT", "/example.com/300/AAAA/::1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&app, "GET", "/example.com/IN/AAAA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "example.com. 300 IN AAAA ::1\n");
}

#[tokio::test]
async fn test_put_typed_with_multiple_rdata() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(&app, "PUT", "/example.com/A/1.2.3.4,5.6.7.8").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/example.com/A").await;
    assert_eq!(
        body,
        "example.com. 60 IN A 1.2.3.4\nexample.com. 60 IN A 5.6.7.8\n"
    );
}

#[tokio::test]
async fn test_put_fully_specified() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(&app, "PUT", "/mail.example/120/IN/MX/10%20mx.example").await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", "/mail.example/MX").await;
    assert_eq!(body, "mail.example. 120 IN MX 10 mx.example.\n");
}

#[tokio::test]
async fn test_put_soa_and_multi_string_txt() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(
        &app,
        "PUT",
        "/example.com/3600/SOA/ns1.example.com%20hostmaster.example.com%201%207200%203600%201209600%20300",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/example.com/SOA").await;
    assert_eq!(
        body,
        "example.com. 3600 IN SOA ns1.example.com. hostmaster.example.com. 1 7200 3600 1209600 300\n"
    );

    let (status, _) = send(&app, "PUT", "/example.com/TXT/%22v=spf1%22%20%22-all%22").await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", "/example.com/TXT").await;
    assert_eq!(body, "example.com. 60 IN TXT \"v=spf1\" \"-all\"\n");
}

#[tokio::test]
async fn test_put_any_is_rejected_without_mutation() {
    let (app, store) = create_test_app().await;

    let (status, body) = send(&app, "PUT", "/example.com/ANY/1.2.3.4").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.ends_with('\n'));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_rdata_is_bad_request() {
    let (app, store) = create_test_app().await;

    let (status, body) = send(&app, "PUT", "/example.com/not-an-ip").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body.contains("not-an-ip"));
    assert_eq!(store.count().await.unwrap(), 0);
}

#[tokio::test]
async fn test_malformed_ttl_and_type_are_bad_requests() {
    let (app, _) = create_test_app().await;

    let (status, _) = send(&app, "PUT", "/example.com/soon/A/1.2.3.4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "PUT", "/example.com/BOGUS/1.2.3.4").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(&app, "GET", "/example.com/BOGUS").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_name_only_and_trailing_slash() {
    let (app, _) = create_test_app().await;
    send(&app, "PUT", "/example.com/1.2.3.4").await;

    for uri in ["/example.com", "/example.com/", "/example.com/A/", "/example.com/IN/A/"] {
        let (status, body) = send(&app, "GET", uri).await;
        assert_eq!(status, StatusCode::OK, "{}", uri);
        assert_eq!(body, "example.com. 60 IN A 1.2.3.4\n", "{}", uri);
    }
}

#[tokio::test]
async fn test_lookup_is_case_insensitive() {
    let (app, _) = create_test_app().await;
    send(&app, "PUT", "/Example.COM/1.2.3.4").await;

    let (status, _) = send(&app, "GET", "/EXAMPLE.com/a").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_dump_lists_every_record() {
    let (app, _) = create_test_app().await;
    send(&app, "PUT", "/a.example/1.2.3.4").await;
    send(&app, "PUT", "/b.example/TXT/hello").await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "text/plain; charset=utf-8"
    );

    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = String::from_utf8(body.to_vec()).unwrap();
    assert_eq!(
        body,
        "a.example. 60 IN A 1.2.3.4\nb.example. 60 IN TXT \"hello\"\n"
    );
}

#[tokio::test]
async fn test_dump_empty_store() {
    let (app, _) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.is_empty());
}
