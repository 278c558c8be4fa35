use crate::handlers;
use crate::state::AppState;
use axum::Router;
use tower_http::trace::TraceLayer;

pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .merge(handlers::records::routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
