use std::time::Duration;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::{
    handlers::{
        health::{healthz, livez},
        weather::{bulk_weather, current_weather},
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, request_timeout: Duration) -> Router {
    let api_routes = Router::new().route(
        "/weather.current",
        get(current_weather).post(bulk_weather),
    );

    Router::new()
        .route("/livez", get(livez))
        .route("/healthz", get(healthz))
        .nest("/api/v1", api_routes)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::{
        engine::{ApiKeyGate, EngineConfig},
        test_support::{
            engine_with, test_engine_config, RecordingCache, StubKeyStore, StubProvider,
        },
    };
    use axum::{body::Body, http::Request};
    use havo_core::weather::{WeatherError, GENERIC_SERVER_ERROR};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const API_KEY: &str = "key-123";

    struct Harness {
        app: Router,
        cache: Arc<RecordingCache>,
        provider: Arc<StubProvider>,
        keys: Arc<StubKeyStore>,
    }

    fn harness_with(provider: StubProvider, config: EngineConfig) -> Harness {
        let cache = Arc::new(RecordingCache::new());
        let provider = Arc::new(provider);
        let keys = Arc::new(StubKeyStore::with_keys(&[API_KEY]));
        let state = AppState::new(
            engine_with(&cache, &provider, config),
            ApiKeyGate::new(keys.clone()),
        );

        Harness {
            app: create_app(state, Duration::from_secs(10)),
            cache,
            provider,
            keys,
        }
    }

    fn harness() -> Harness {
        harness_with(StubProvider::with_known_locations(), test_engine_config())
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json = if body.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&body).unwrap()
        };
        (status, json)
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn bulk_request(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("Content-Type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_livez() {
        let h = harness();

        let (status, _) = send(&h.app, get_request("/livez")).await;

        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_current_weather_for_tashkent() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            get_request("/api/v1/weather.current?key=key-123&q=tashkent"),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["location"]["name"], "Tashkent");
        assert_eq!(body["location"]["country"], "Uzbekistan");
        assert_eq!(body["location"]["cloud"], 0);
        assert!(body["location"]["temp_color"].is_string());
        assert_eq!(h.cache.keys(), vec!["Tashkent"]);
    }

    #[tokio::test]
    async fn test_missing_key_is_rejected() {
        let h = harness();

        let (status, body) = send(&h.app, get_request("/api/v1/weather.current?q=tashkent")).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "api key is missing or invalid. Please include a valid API key in your request"})
        );
        assert_eq!(h.keys.call_count(), 0);
    }

    #[tokio::test]
    async fn test_missing_query_is_rejected() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            get_request("/api/v1/weather.current?key=key-123&q="),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "parameter q is missing"}));
    }

    #[tokio::test]
    async fn test_invalid_key_never_reaches_cache_or_provider() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            get_request("/api/v1/weather.current?key=nope&q=tashkent"),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "API key has been disabled."}));
        assert_eq!(h.keys.call_count(), 1);
        assert_eq!(h.provider.call_count(), 0);
        assert_eq!(h.cache.get_count(), 0);
        assert_eq!(h.cache.set_count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_location_is_404() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            get_request("/api/v1/weather.current?key=key-123&q=locationnotfound"),
        )
        .await;

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "no matching location found"}));
    }

    #[tokio::test]
    async fn test_upstream_failure_hides_details() {
        let h = harness_with(
            StubProvider::new().with_failure(
                "atlantis",
                WeatherError::UpstreamUnavailable("status 502 from upstream".to_string()),
            ),
            test_engine_config(),
        );

        let (status, body) = send(
            &h.app,
            get_request("/api/v1/weather.current?key=key-123&q=atlantis"),
        )
        .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": GENERIC_SERVER_ERROR}));
    }

    #[tokio::test]
    async fn test_bulk_partitions_found_and_not_found() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            bulk_request(
                "/api/v1/weather.current?key=key-123&q=bulk",
                json!({"locations": [
                    {"q": "new york"},
                    {"q": "london"},
                    {"q": "locationnotfound"}
                ]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["bulk"]
            .as_array()
            .unwrap()
            .iter()
            .map(|record| record["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["New York", "London"]);
        assert_eq!(body["not_found"], json!(["'locationnotfound' not found"]));
    }

    #[tokio::test]
    async fn test_bulk_all_found_omits_not_found() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            bulk_request(
                "/api/v1/weather.current?key=key-123&q=bulk",
                json!({"locations": [{"q": "london"}, {"q": " "}]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bulk"].as_array().unwrap().len(), 1);
        assert!(body.get("not_found").is_none());
        assert_eq!(h.provider.calls(), vec!["london"]);
    }

    #[tokio::test]
    async fn test_bulk_requires_bulk_query() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            bulk_request(
                "/api/v1/weather.current?key=key-123&q=london",
                json!({"locations": [{"q": "london"}]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "parameter q='bulk' is required"}));
        assert_eq!(h.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_bulk_without_query_requires_bulk() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            bulk_request(
                "/api/v1/weather.current?key=key-123",
                json!({"locations": [{"q": "london"}]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "parameter q='bulk' is required"}));
        assert_eq!(h.keys.call_count(), 0);
    }

    #[tokio::test]
    async fn test_bulk_invalid_key_never_reaches_cache_or_provider() {
        let h = harness();

        let (status, body) = send(
            &h.app,
            bulk_request(
                "/api/v1/weather.current?key=nope&q=bulk",
                json!({"locations": [{"q": "london"}, {"q": "tashkent"}]}),
            ),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body, json!({"error": "API key has been disabled."}));
        assert_eq!(h.keys.call_count(), 1);
        assert_eq!(h.provider.call_count(), 0);
        assert_eq!(h.cache.get_count(), 0);
        assert_eq!(h.cache.set_count(), 0);
    }

    #[tokio::test]
    async fn test_bulk_rejects_malformed_body() {
        let h = harness();

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/weather.current?key=key-123&q=bulk")
            .header("Content-Type", "application/json")
            .body(Body::from("{\"locations\": ["))
            .unwrap();
        let (status, body) = send(&h.app, request).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert_eq!(h.provider.call_count(), 0);
    }

    #[tokio::test]
    async fn test_healthz_reports_cache_writes() {
        let h = harness();

        let (status, body) = send(&h.app, get_request("/healthz")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cache_writes"]["degraded"], false);
        assert_eq!(body["cache_writes"]["consecutive_failures"], 0);
    }

    #[tokio::test]
    async fn test_healthz_degrades_after_failed_writes() {
        let h = harness_with(
            StubProvider::with_known_locations(),
            EngineConfig {
                write_failure_threshold: 1,
                ..test_engine_config()
            },
        );
        h.cache.fail_sets(true);

        let (status, _) = send(
            &h.app,
            get_request("/api/v1/weather.current?key=key-123&q=london"),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, body) = send(&h.app, get_request("/healthz")).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["cache_writes"]["degraded"], true);
    }
}
