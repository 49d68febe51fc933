//! Top-level router: mounts every endpoint group under `/api` and applies
//! the shared tower layers.

use axum::routing::get;
use axum::{Json, Router};
use http::{header, HeaderValue, Method};
use serde_json::{json, Value};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::community::community_routes;
use super::gamification::{gamification_routes, test_harness_routes};
use super::incident::{analytics_routes, incident_routes, streak_routes};
use super::state::AppState;
use super::user::user_routes;
use crate::config::AppConfig;

const REQUEST_ID_HEADER: &str = "x-request-id";

/// Build the full application router.
///
/// The test harness is only mounted when `features.enable_test_harness` is
/// set; otherwise its paths fall through to 404.
pub fn app_router(state: AppState, config: &AppConfig) -> Router {
    let mut api = Router::new()
        .nest("/users", user_routes())
        .nest("/logs", incident_routes())
        .nest("/streak", streak_routes())
        .nest("/analytics", analytics_routes())
        .nest("/community", community_routes())
        .merge(gamification_routes());

    if config.features.enable_test_harness {
        tracing::warn!("Gamification test harness mounted at /api/test/gamification");
        api = api.nest("/test/gamification", test_harness_routes());
    }

    let request_id = header::HeaderName::from_static(REQUEST_ID_HEADER);

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(CompressionLayer::new())
        .layer(cors_layer(config))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(PropagateRequestIdLayer::new(request_id.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(request_id, MakeRequestUuid))
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Explicit origins when configured. Without any, development is
/// permissive and production allows no cross-origin calls.
fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match HeaderValue::from_str(&origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        if config.is_production() {
            return CorsLayer::new();
        }
        return CorsLayer::permissive();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-user-id"),
        ])
        .max_age(std::time::Duration::from_secs(60 * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::adapters::http::auth::USER_ID_HEADER;
    use crate::adapters::memory::InMemoryStore;
    use crate::config::FeatureFlags;
    use crate::domain::foundation::UserId;
    use crate::domain::user::User;
    use crate::ports::UserRepository;

    fn router_with(store: Arc<InMemoryStore>, enable_test_harness: bool) -> Router {
        let config = AppConfig {
            features: FeatureFlags {
                enable_test_harness,
            },
            ..Default::default()
        };
        app_router(AppState::in_memory(store), &config)
    }

    fn router(enable_test_harness: bool) -> Router {
        router_with(Arc::new(InMemoryStore::new()), enable_test_harness)
    }

    #[tokio::test]
    async fn configured_origins_are_echoed() {
        let config = AppConfig {
            server: crate::config::ServerConfig {
                cors_origins: Some("https://app.junkstop.test, ".to_string()),
                ..Default::default()
            },
            ..Default::default()
        };
        let app = app_router(AppState::in_memory(Arc::new(InMemoryStore::new())), &config);

        let response = app
            .oneshot(
                Request::get("/health")
                    .header(header::ORIGIN, "https://app.junkstop.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN),
            Some(&HeaderValue::from_static("https://app.junkstop.test"))
        );
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let response = router(false)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn harness_is_absent_unless_enabled() {
        let store = Arc::new(InMemoryStore::new());
        let user = User::new(UserId::new(), "tester", "tester@example.com").unwrap();
        UserRepository::create(store.as_ref(), &user).await.unwrap();

        let request = || {
            Request::post("/api/test/gamification/reset-user")
                .header(USER_ID_HEADER, user.id.to_string())
                .body(Body::empty())
                .unwrap()
        };

        let disabled = router_with(store.clone(), false)
            .oneshot(request())
            .await
            .unwrap();
        assert_eq!(disabled.status(), StatusCode::NOT_FOUND);

        let enabled = router_with(store, true).oneshot(request()).await.unwrap();
        assert_eq!(enabled.status(), StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn protected_routes_require_user_header() {
        let response = router(false)
            .oneshot(Request::get("/api/user/xp").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
