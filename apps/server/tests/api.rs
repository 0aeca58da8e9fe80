//! Router-level tests for every path that rejects before touching the
//! database.

mod support;

use axum::http::{header, Method, StatusCode};
use serde_json::json;
use support::{TestApp, IT_NIP, NURSE_NIP};

#[tokio::test]
async fn health_reports_ok_with_request_id() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let (status, headers, body) = app.request(Method::GET, "/health", None, None).await?;

    assert_eq!(status, StatusCode::OK);
    assert!(headers.contains_key("x-request-id"));
    let body: serde_json::Value = serde_json::from_slice(&body)?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn client_request_id_is_echoed_as_correlation_id() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let request = axum::http::Request::builder()
        .uri("/health")
        .header("x-request-id", "client-abc")
        .body(axum::body::Body::empty())?;

    let response = tower::ServiceExt::oneshot(app.router.clone(), request).await?;
    assert_eq!(
        response.headers().get("x-correlation-id").unwrap(),
        "client-abc"
    );
    Ok(())
}

#[tokio::test]
async fn metrics_exposes_http_counters() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    app.request(Method::GET, "/health", None, None).await?;

    let (status, _, body) = app.request(Method::GET, "/metrics", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    let text = String::from_utf8(body.to_vec())?;
    assert!(text.contains("halo_http_requests_total"));
    Ok(())
}

#[tokio::test]
async fn unknown_route_is_json_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let (status, body) = app.json(Method::GET, "/v1/nothing", None, None).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn protected_routes_require_a_token() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    for (method, uri) in [
        (Method::GET, "/v1/user"),
        (Method::GET, "/v1/medical/patient"),
        (Method::GET, "/v1/medical/record"),
        (Method::POST, "/v1/user/nurse/register"),
    ] {
        let (status, headers, _) = app.request(method, uri, None, None).await?;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{uri}");
        assert_eq!(headers.get(header::WWW_AUTHENTICATE).unwrap(), "Bearer");
    }
    Ok(())
}

#[tokio::test]
async fn token_signed_with_another_secret_is_rejected() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let foreign = halo::auth::TokenService::new("another-secret", 1)
        .issue(uuid::Uuid::new_v4(), halo_identifiers::StaffId::decode(IT_NIP)?)?;

    let (status, _) = app
        .json(Method::GET, "/v1/user", None, Some(&foreign))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn it_register_rejects_malformed_nip() -> anyhow::Result<()> {
    let app = TestApp::new()?;

    // month 13
    let (status, body) = app
        .json(
            Method::POST,
            "/v1/user/it/register",
            Some(json!({ "nip": 6151202413123u64, "name": "Dewi Lestari", "password": "secret123" })),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());

    // twelve digits
    let (status, _) = app
        .json(
            Method::POST,
            "/v1/user/it/register",
            Some(json!({ "nip": 615120240112u64, "name": "Dewi Lestari", "password": "secret123" })),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn it_register_rejects_nurse_nip_and_short_fields() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let nurse_nip: u64 = NURSE_NIP.parse()?;

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/user/it/register",
            Some(json!({ "nip": nurse_nip, "name": "Dewi Lestari", "password": "secret123" })),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/user/it/register",
            Some(json!({ "nip": 6151202401123u64, "name": "Dewi", "password": "secret123" })),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn login_with_unknown_or_wrong_role_is_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let nurse_nip: u64 = NURSE_NIP.parse()?;
    let it_nip: u64 = IT_NIP.parse()?;

    let cases = [
        ("/v1/user/it/login", 1112202401123u64),
        ("/v1/user/it/login", nurse_nip),
        ("/v1/user/nurse/login", it_nip),
    ];
    for (uri, nip) in cases {
        let (status, _) = app
            .json(
                Method::POST,
                uri,
                Some(json!({ "nip": nip, "password": "secret123" })),
                None,
            )
            .await?;
        assert_eq!(status, StatusCode::NOT_FOUND, "{uri} {nip}");
    }
    Ok(())
}

#[tokio::test]
async fn malformed_json_body_is_bad_request() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let (status, body) = app
        .json(
            Method::POST,
            "/v1/user/it/login",
            Some(json!({ "nip": "not a number", "password": "secret123" })),
            None,
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
    Ok(())
}

#[tokio::test]
async fn nurse_cannot_use_it_only_routes() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = app.token_for(NURSE_NIP)?;

    let (status, _) = app
        .json(Method::GET, "/v1/user?name=dewi", None, Some(&token))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/user/nurse/register",
            Some(json!({
                "nip": 3031200001001u64,
                "name": "Sari Wulandari",
                "identityCardScanImg": "https://example.com/card.png"
            })),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .json(
            Method::DELETE,
            &format!("/v1/user/nurse/{}", uuid::Uuid::new_v4()),
            None,
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn nurse_register_requires_nurse_nip() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = app.token_for(IT_NIP)?;

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/user/nurse/register",
            Some(json!({
                "nip": 6152200001001u64,
                "name": "Sari Wulandari",
                "identityCardScanImg": "https://example.com/card.png"
            })),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/user/nurse/register",
            Some(json!({
                "nip": 3031200001001u64,
                "name": "Sari Wulandari",
                "identityCardScanImg": "not a url"
            })),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn nurse_paths_with_non_uuid_ids_are_not_found() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = app.token_for(IT_NIP)?;

    let (status, _) = app
        .json(
            Method::PUT,
            "/v1/user/nurse/12345",
            Some(json!({ "nip": 3031200001001u64, "name": "Sari Wulandari" })),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/user/nurse/not-a-user/access",
            Some(json!({ "password": "secret123" })),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn patient_registration_validates_before_saving() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = app.token_for(NURSE_NIP)?;

    let valid = json!({
        "identityNumber": 3201234567890123u64,
        "phoneNumber": "+6281234567890",
        "name": "Budi Santoso",
        "birthDate": "1990-05-17T00:00:00Z",
        "gender": "male",
        "identityCardScanImg": "https://example.com/ktp.png"
    });

    let mut bad_phone = valid.clone();
    bad_phone["phoneNumber"] = json!("081234567890");
    let mut short_identity = valid.clone();
    short_identity["identityNumber"] = json!(320123456789u64);
    let mut bad_gender = valid.clone();
    bad_gender["gender"] = json!("unknown");
    let mut short_name = valid;
    short_name["name"] = json!("Bu");

    for body in [bad_phone, short_identity, bad_gender, short_name] {
        let (status, response) = app
            .json(Method::POST, "/v1/medical/patient", Some(body), Some(&token))
            .await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{response}");
    }
    Ok(())
}

#[tokio::test]
async fn record_creation_validates_before_saving() -> anyhow::Result<()> {
    let app = TestApp::new()?;
    let token = app.token_for(IT_NIP)?;

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/medical/record",
            Some(json!({ "identityNumber": 12345u64, "symptoms": "fever", "medications": "rest" })),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .json(
            Method::POST,
            "/v1/medical/record",
            Some(json!({
                "identityNumber": 3201234567890123u64,
                "symptoms": "",
                "medications": "rest"
            })),
            Some(&token),
        )
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}
