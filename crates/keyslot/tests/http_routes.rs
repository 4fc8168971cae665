//! Router-level tests for `/` and `/secrets`

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use keyslot::http::{AppState, router};
use keyslot::info::InfoVariant;
use keyslot_secrets::{DeploymentConfig, ErrorPolicy, MemoryResolver};
use serde_json::{Value, json};
use tower::ServiceExt;

fn seeded() -> MemoryResolver {
    MemoryResolver::new()
        .with_secret("acme", "staging-first-api-key", "A")
        .with_secret("acme", "staging-second-api-key", "B")
        .with_secret("acme", "staging-third-api-key", "C")
        .with_secret("acme", "staging-forth-api-key", "D")
}

fn full_config() -> DeploymentConfig {
    DeploymentConfig::new(Some("staging".into()), Some("acme".into()))
}

fn app(
    resolver: &Arc<MemoryResolver>,
    config: DeploymentConfig,
    policy: ErrorPolicy,
    variant: InfoVariant,
) -> Router {
    router(AppState::new(resolver.clone(), config, policy, variant))
}

async fn get(app: &Router, path: &str) -> (StatusCode, String) {
    let request = Request::builder()
        .method("GET")
        .uri(path)
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, String::from_utf8(body.to_vec()).unwrap())
}

#[tokio::test]
async fn secrets_returns_all_four_slots_in_order() {
    let resolver = Arc::new(seeded());
    let app = app(
        &resolver,
        full_config(),
        ErrorPolicy::Strict,
        InfoVariant::ModuleName,
    );

    let (status, body) = get(&app, "/secrets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, r#"{"first":"A","second":"B","third":"C","forth":"D"}"#);
    assert_eq!(resolver.fetch_count(), 4);

    let mut requested = resolver.requested();
    requested.sort();
    assert_eq!(
        requested,
        [
            "projects/acme/secrets/staging-first-api-key/versions/latest",
            "projects/acme/secrets/staging-forth-api-key/versions/latest",
            "projects/acme/secrets/staging-second-api-key/versions/latest",
            "projects/acme/secrets/staging-third-api-key/versions/latest",
        ]
    );
}

#[tokio::test]
async fn secrets_without_deploy_env_fails_before_fetching() {
    let resolver = Arc::new(seeded());
    for policy in [ErrorPolicy::Strict, ErrorPolicy::Permissive] {
        let app = app(
            &resolver,
            DeploymentConfig::new(None, Some("acme".into())),
            policy,
            InfoVariant::ModuleName,
        );

        let (status, body) = get(&app, "/secrets").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["error"], "configuration_error");
        assert_eq!(json["message"], "Missing DEPLOY_ENV environment variable");
    }
    assert_eq!(resolver.fetch_count(), 0);
}

#[tokio::test]
async fn secrets_without_project_fails_before_fetching() {
    let resolver = Arc::new(seeded());
    let app = app(
        &resolver,
        DeploymentConfig::new(Some("staging".into()), None),
        ErrorPolicy::Permissive,
        InfoVariant::ModuleName,
    );

    let (status, body) = get(&app, "/secrets").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body.contains("Missing GOOGLE_CLOUD_PROJECT environment variable"));
    assert_eq!(resolver.fetch_count(), 0);
}

#[tokio::test]
async fn strict_policy_fails_whole_request() {
    let resolver = Arc::new(seeded().with_failure("acme", "staging-second-api-key", "boom"));
    let app = app(
        &resolver,
        full_config(),
        ErrorPolicy::Strict,
        InfoVariant::ModuleName,
    );

    let (status, body) = get(&app, "/secrets").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json, json!({"error": "secret_fetch_error", "message": "boom"}));
    assert!(!body.contains("\"first\""));
}

#[tokio::test]
async fn permissive_policy_replaces_failed_slot_with_message() {
    let resolver = Arc::new(seeded().with_failure("acme", "staging-second-api-key", "boom"));
    let app = app(
        &resolver,
        full_config(),
        ErrorPolicy::Permissive,
        InfoVariant::ModuleName,
    );

    let (status, body) = get(&app, "/secrets").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        r#"{"first":"A","second":"boom","third":"C","forth":"D"}"#
    );
}

#[tokio::test]
async fn concurrent_secret_requests_fetch_independently() {
    let resolver = Arc::new(seeded());
    let app = app(
        &resolver,
        full_config(),
        ErrorPolicy::Strict,
        InfoVariant::ModuleName,
    );

    let requests = (0..8).map(|_| get(&app, "/secrets"));
    let responses = futures::future::join_all(requests).await;

    for (status, body) in responses {
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, r#"{"first":"A","second":"B","third":"C","forth":"D"}"#);
    }
    assert_eq!(resolver.fetch_count(), 32);
}

#[tokio::test]
async fn info_is_identical_across_concurrent_requests() {
    temp_env::async_with_vars([("GAE_SERVICE", Some("default"))], async {
        let resolver = Arc::new(MemoryResolver::new());
        let app = app(
            &resolver,
            DeploymentConfig::default(),
            ErrorPolicy::Strict,
            InfoVariant::Service,
        );

        let requests = (0..16).map(|_| get(&app, "/"));
        let responses = futures::future::join_all(requests).await;

        for (status, body) in &responses {
            assert_eq!(*status, StatusCode::OK);
            let json: Value = serde_json::from_str(body).unwrap();
            assert_eq!(
                json,
                json!({"message": "Welcome to my API", "GAE_SERVICE": "default"})
            );
        }
        assert!(responses.windows(2).all(|pair| pair[0] == pair[1]));
        assert_eq!(resolver.fetch_count(), 0);
    })
    .await;
}

#[tokio::test]
async fn info_module_name_variant() {
    temp_env::async_with_vars([("GAE_MODULE_NAME", Some("api"))], async {
        let resolver = Arc::new(MemoryResolver::new());
        let app = app(
            &resolver,
            DeploymentConfig::default(),
            ErrorPolicy::Strict,
            InfoVariant::ModuleName,
        );

        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(
            json,
            json!({"message": "Welcome to my API", "GAE_MODULE_NAME": "api"})
        );
    })
    .await;
}

#[tokio::test]
async fn info_service_variant_reports_null_when_unset() {
    temp_env::async_with_vars([("GAE_SERVICE", None::<&str>)], async {
        let resolver = Arc::new(MemoryResolver::new());
        let app = app(
            &resolver,
            DeploymentConfig::default(),
            ErrorPolicy::Strict,
            InfoVariant::Service,
        );

        let (status, body) = get(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        let json: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(json["GAE_SERVICE"], Value::Null);
    })
    .await;
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let resolver = Arc::new(MemoryResolver::new());
    let app = app(
        &resolver,
        full_config(),
        ErrorPolicy::Strict,
        InfoVariant::ModuleName,
    );

    let (status, _) = get(&app, "/secret").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
