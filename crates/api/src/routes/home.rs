//! The root route: a static HTML landing page.
//!
//! Rendering proper views is a presentation concern that lives outside
//! this service; the page only names the API so a browser hitting the
//! bare host sees something useful.

use axum::response::Html;
use axum::{routing::get, Router};

use crate::state::AppState;

const HOME_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <title>Nudge API</title>
</head>
<body>
  <h1>Nudge API</h1>
  <p>The nudge collection lives under <code>/api/v3/app/nudges</code>.</p>
</body>
</html>
"#;

async fn home() -> Html<&'static str> {
    Html(HOME_PAGE)
}

/// Mount the root route.
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(home))
}
