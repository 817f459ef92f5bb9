//! Router assembly: the protected translations API behind the API-key gate,
//! plus open liveness routes.

use axum::{
    middleware,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::{api, security, AppState};

pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Everything under /api/translations re-authenticates per request; all
    // other routes bypass the gate.
    let translations = Router::new()
        .route(
            "/api/translations",
            post(api::create_translation)
                .put(api::update_translation)
                .delete(api::delete_translation),
        )
        .route("/api/translations/single", get(api::get_translation))
        .route(
            "/api/translations/category",
            get(api::get_translations_by_category_and_locale),
        )
        .route(
            "/api/translations/locale",
            get(api::get_translations_by_locale),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            security::require_api_key,
        ));

    Router::new()
        .merge(translations)
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Liveness endpoint, outside the auth gate.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "translation-service",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}
