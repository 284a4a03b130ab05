use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use gambit_codec::SequenceCodec;
use gambit_gateway::{App, AppState};
use gambit_shortener::ShortenerService;
use gambit_storage::InMemoryRepository;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

const BASE_URL: &str = "https://gambit.example";

fn router() -> Router {
    let service = ShortenerService::new(InMemoryRepository::new(), SequenceCodec::default());
    App::router(AppState::new(Arc::new(service), BASE_URL))
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = router
        .clone()
        .oneshot(request.body(body).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

#[tokio::test]
async fn health() {
    let (status, body) = send(&router(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_generated_url() {
    let router = router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/v1/urls",
        Some(json!({ "url": "https://example.com/very-long-link" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["sequence"], "Qxf7.Bd2.h3.fxe6.f5");
    assert_eq!(
        body["data"]["shortUrl"],
        "https://gambit.example/Qxf7.Bd2.h3.fxe6.f5"
    );
    assert_eq!(body["data"]["originalUrl"], "https://example.com/very-long-link");
    assert_eq!(body["data"]["isCustom"], false);
    assert_eq!(body["data"]["expiresAt"], Value::Null);
}

#[tokio::test]
async fn create_custom_url_with_expiry() {
    let router = router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/v1/urls",
        Some(json!({
            "url": "https://example.com",
            "customSequence": "e4.Nf3.d4.exd5.O-O",
            "title": "opening",
            "expiresIn": 7,
            "maxVisits": 3,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["sequence"], "e4.Nf3.d4.exd5.O-O");
    assert_eq!(body["data"]["isCustom"], true);
    assert_eq!(body["data"]["title"], "opening");
    assert_eq!(body["data"]["maxVisits"], 3);
    assert!(body["data"]["expiresAt"].is_string());
}

#[tokio::test]
async fn taken_custom_sequence_is_a_conflict() {
    let router = router();
    let request = json!({ "url": "https://example.com", "customSequence": "d4.d5.c4" });

    let (status, _) = send(&router, Method::POST, "/v1/urls", Some(request.clone())).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(&router, Method::POST, "/v1/urls", Some(request)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn bad_requests() {
    let router = router();

    let cases = [
        json!({ "url": "not-a-url" }),
        json!({ "url": "https://example.com", "customSequence": "e4.castle.d4" }),
        json!({ "url": "https://example.com", "customSequence": "e4.e5" }),
        json!({ "url": "https://example.com", "expiresIn": 0 }),
        json!({}),
        json!({ "customSequence": "e4.e5.Nf3" }),
        json!({ "url": "https://example.com", "expiresIn": -1 }),
        json!({ "url": 42 }),
    ];

    for case in cases {
        let (status, body) = send(&router, Method::POST, "/v1/urls", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{case}");
        assert_eq!(body["success"], false);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn body_that_is_not_json_is_a_bad_request() {
    let response = router()
        .oneshot(
            Request::post("/v1/urls")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("url=https://example.com"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["success"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn info_does_not_count_visits() {
    let router = router();
    send(
        &router,
        Method::POST,
        "/v1/urls",
        Some(json!({ "url": "https://example.com", "customSequence": "c4.e5.Nc3" })),
    )
    .await;

    let (status, body) = send(&router, Method::GET, "/v1/urls/c4.e5.Nc3", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["visitCount"], 0);

    let (status, _) = send(&router, Method::GET, "/v1/urls/e4.e5.Nf3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn redirect_counts_visits_until_cap() {
    let router = router();
    send(
        &router,
        Method::POST,
        "/v1/urls",
        Some(json!({
            "url": "https://example.com/target",
            "customSequence": "e4.c5.Nf3",
            "maxVisits": 1,
        })),
    )
    .await;

    let response = router
        .clone()
        .oneshot(Request::get("/e4.c5.Nf3").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/target"
    );

    let (status, _) = send(&router, Method::GET, "/e4.c5.Nf3", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn redirect_of_malformed_sequence_is_not_found() {
    let (status, body) = send(&router(), Method::GET, "/favicon.ico", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn delete_url() {
    let router = router();
    send(
        &router,
        Method::POST,
        "/v1/urls",
        Some(json!({ "url": "https://example.com", "customSequence": "e4.e6.d4" })),
    )
    .await;

    let (status, _) = send(&router, Method::DELETE, "/v1/urls/e4.e6.d4", None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&router, Method::DELETE, "/v1/urls/e4.e6.d4", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn availability() {
    let router = router();

    let (status, body) = send(
        &router,
        Method::GET,
        "/v1/sequences/e4.e5.Nf3/availability",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["data"],
        json!({ "sequence": "e4.e5.Nf3", "valid": true, "available": true })
    );

    let (_, body) = send(
        &router,
        Method::GET,
        "/v1/sequences/e4.e5/availability",
        None,
    )
    .await;
    assert_eq!(body["data"]["valid"], false);
    assert!(body["data"]["reason"].is_string());
}

#[tokio::test]
async fn stats() {
    let (status, body) = send(&router(), Method::GET, "/v1/stats", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["moveSetSize"], 231);
    assert_eq!(body["data"]["defaultLength"], 5);
    assert_eq!(body["data"]["combinations"]["3_moves"], "12326391");
    assert_eq!(body["data"]["combinations"]["5_moves"], "657748550151");
}

#[tokio::test]
async fn cors_preflight() {
    let response = router()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/v1/urls")
                .header(header::ORIGIN, "https://app.example")
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
