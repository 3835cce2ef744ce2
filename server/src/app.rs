use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;

use crate::routes;
use crate::state::AppState;

pub(crate) fn build_app(state: AppState) -> Router {
    let app = Router::new()
        .route("/api/territory", get(routes::overlay::get_territory))
        .route("/api/tile", get(routes::overlay::get_tile))
        .route("/api/group", get(routes::overlay::get_group))
        .route("/api/overlay", get(routes::overlay::get_overlay))
        .route("/api/tint", post(routes::overlay::post_tint))
        .route("/api/text-filter", post(routes::text::post_text_filter))
        .route("/api/health", get(routes::api::health))
        .route("/api/metrics", get(routes::api::metrics));

    app.layer(CompressionLayer::new()).with_state(state)
}
