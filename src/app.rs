//! HTTP router.
//!
//! Public lookups are always mounted. Word/phrase creation and the `/test`
//! routes exist only outside production.

use crate::config::Config;
use crate::dictionary::embedded::Dictionary;
use crate::dictionary::handlers::handle_populate;
use crate::entities::handlers::{
    handle_create_phrase, handle_create_word, handle_get_example, handle_get_phrase,
    handle_get_word,
};
use crate::entities::repository::Repository;
use crate::search::handlers::{handle_search_dictionary, handle_search_words};
use crate::shutdown::Shutdown;

use axum::http::HeaderName;
use axum::routing::{get, post};
use axum::{Extension, Router};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub const API_PREFIX: &str = "/api/v1";

pub fn build_router(
    repo: Arc<Repository>,
    dictionary: Arc<Dictionary>,
    config: Arc<Config>,
    shutdown: Shutdown,
) -> Router {
    let production = config.is_production();

    let mut api = Router::new()
        .route("/words/:id", get(handle_get_word))
        .route("/phrases/:id", get(handle_get_phrase))
        .route("/examples/:id", get(handle_get_example));

    if production {
        api = api.route("/words", get(handle_search_words));
    } else {
        api = api
            .route("/words", get(handle_search_words).post(handle_create_word))
            .route("/phrases", post(handle_create_phrase))
            .nest("/test", test_routes());
    }

    tracing::debug!(
        "Router built for {:?} ({} routes)",
        config.runtime_env,
        if production { "public" } else { "all" }
    );

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any)
        .expose_headers([
            HeaderName::from_static("content-range"),
            HeaderName::from_static("x-content-range"),
        ]);

    Router::new()
        .route("/", get(|| async { "Hello World!" }))
        .nest(API_PREFIX, api)
        .layer(Extension(repo))
        .layer(Extension(dictionary))
        .layer(Extension(config))
        .layer(Extension(shutdown))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

fn test_routes() -> Router {
    Router::new()
        .route("/words", get(handle_search_dictionary))
        .route("/populate", get(handle_populate))
}
