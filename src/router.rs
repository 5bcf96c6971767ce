use axum::{
    extract::{DefaultBodyLimit, State},
    http::HeaderValue,
    middleware::from_fn_with_state,
    response::Json,
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use tower_http::{
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::handlers::{protected, public};
use crate::middleware::jwt_auth_middleware;
use crate::state::AppState;

/// Build the full application router around `state`
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let router = Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes(&state))
        .merge(reading_routes())
        .merge(threshold_routes(&state))
        .with_state(state)
        // Global middleware
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.api.max_request_size_bytes))
        .layer(cors_layer(&config));

    if config.api.enable_request_logging {
        router.layer(TraceLayer::new_for_http())
    } else {
        router
    }
}

fn auth_routes(state: &AppState) -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/auth/register", post(auth::register_post))
        .route("/api/auth/login", post(auth::login_post))
        .route(
            "/api/auth/profile",
            get(protected::auth::profile_get)
                .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware)),
        )
}

fn reading_routes() -> Router<AppState> {
    use public::readings;

    Router::new()
        .route("/api/readings", get(readings::list).post(readings::create))
        .route("/api/readings/latest", get(readings::latest))
}

fn threshold_routes(state: &AppState) -> Router<AppState> {
    use public::thresholds;

    Router::new()
        // Only POST is gated; the layer applies to routes added before it
        .route(
            "/api/thresholds",
            post(protected::thresholds::create)
                .route_layer(from_fn_with_state(state.clone(), jwt_auth_middleware))
                .get(thresholds::list),
        )
        .route("/api/thresholds/latest", get(thresholds::latest))
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins = &config.security.cors_origins;
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_methods(Any)
        .allow_headers(Any)
}

async fn root() -> Json<Value> {
    Json(json!({
        "name": "Sensor API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/health (public)",
            "auth": "/api/auth/register, /api/auth/login (public), /api/auth/profile (token)",
            "readings": "/api/readings[?page&limit], /api/readings/latest (public)",
            "thresholds": "/api/thresholds[?page&limit], /api/thresholds/latest (public), POST /api/thresholds (token)",
        }
    }))
}

async fn health(State(state): State<AppState>) -> Result<Json<Value>, ApiError> {
    if let Err(e) = state.store.health_check().await {
        tracing::error!(backend = state.store.backend_name(), "Store health check failed: {}", e);
        return Err(ApiError::service_unavailable("Store unavailable"));
    }

    Ok(Json(json!({
        "status": "ok",
        "store": "ok",
        "backend": state.store.backend_name(),
        "timestamp": chrono::Utc::now(),
    })))
}
