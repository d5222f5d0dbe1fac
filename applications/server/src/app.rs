/// Router assembly
use crate::{api, config::ServerConfig, state::AppState};
use axum::{routing::get, Router};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router around an injected state
///
/// Nothing here is process-global, so tests can assemble as many isolated
/// instances as they need.
pub fn create_app(app_state: AppState, config: &ServerConfig) -> Router {
    let user_routes = Router::new()
        .route("/users", get(api::users::list_users).post(api::users::create_user))
        .route("/users/ping", get(api::users::ping))
        .route("/users/:id", get(api::users::get_user));

    let page_routes = Router::new().route("/", get(api::index::index).post(api::index::add_user));

    Router::new()
        .merge(user_routes)
        .merge(page_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(config.debug())),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
