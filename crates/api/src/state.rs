use std::sync::Arc;

use nudge_db::NudgeStore;
use nudge_store::ObjectStore;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc`). Both stores
/// are created once at startup and shared for the process lifetime.
/// Configuration is consumed entirely at router-build time and is not
/// carried here.
#[derive(Clone)]
pub struct AppState {
    /// The nudges collection.
    pub nudges: Arc<dyn NudgeStore>,
    /// Cover image storage.
    pub objects: Arc<dyn ObjectStore>,
}
