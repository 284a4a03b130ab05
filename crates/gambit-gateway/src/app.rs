use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::Method;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers::{
    availability_handler, create_url_handler, delete_url_handler, get_url_handler,
    health_handler, redirect_handler, stats_handler,
};
use crate::state::AppState;

pub struct App {}

impl App {
    pub fn router(state: AppState) -> Router {
        Router::new()
            .route("/health", get(health_handler))
            .nest(
                "/v1",
                Router::new()
                    .route("/urls", post(create_url_handler))
                    .route(
                        "/urls/{sequence}",
                        get(get_url_handler).delete(delete_url_handler),
                    )
                    .route(
                        "/sequences/{sequence}/availability",
                        get(availability_handler),
                    )
                    .route("/stats", get(stats_handler)),
            )
            .route("/{sequence}", get(redirect_handler))
            .layer(Self::cors())
            .layer(TraceLayer::new_for_http())
            .with_state(state)
    }

    fn cors() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
            .allow_headers([CONTENT_TYPE, AUTHORIZATION])
    }
}
