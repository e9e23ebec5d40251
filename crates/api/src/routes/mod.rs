pub mod health;
pub mod home;
pub mod nudge;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v3/app` route tree.
///
/// ```text
/// /nudges          POST create, GET list
/// /nudges/{id}     GET get_by_id, PUT update, DELETE delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/nudges", nudge::router())
}
