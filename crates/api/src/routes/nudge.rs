//! Route definitions for the `/nudges` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::nudge;
use crate::state::AppState;

/// Routes mounted at `/nudges`.
///
/// ```text
/// POST   /        -> create  (multipart)
/// GET    /        -> list
/// GET    /{id}    -> get_by_id
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(nudge::list).post(nudge::create))
        .route(
            "/{id}",
            get(nudge::get_by_id)
                .put(nudge::update)
                .delete(nudge::delete),
        )
}
