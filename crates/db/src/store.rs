//! The storage abstraction for the nudges collection.

use async_trait::async_trait;
use nudge_core::nudge::{Nudge, NudgeDraft};
use nudge_core::types::NudgeId;

/// Errors surfaced by a [`NudgeStore`].
///
/// Handlers treat every variant as an internal failure; classification
/// into HTTP statuses happens at the API layer.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// CRUD operations over the nudges collection.
///
/// Every method is a single atomic storage operation. In particular
/// [`replace`](NudgeStore::replace) and [`delete`](NudgeStore::delete)
/// report absence through their return value instead of requiring a
/// separate existence check, so concurrent requests against the same id
/// cannot race a check-then-act sequence.
#[async_trait]
pub trait NudgeStore: Send + Sync {
    /// Insert a new nudge, returning the generated id.
    async fn insert(&self, draft: &NudgeDraft) -> Result<NudgeId, StoreError>;

    /// List every nudge in insertion order.
    async fn list(&self) -> Result<Vec<Nudge>, StoreError>;

    /// Find a single nudge by id.
    async fn find_by_id(&self, id: NudgeId) -> Result<Option<Nudge>, StoreError>;

    /// Replace every client-controlled field of the nudge with `id`.
    ///
    /// Returns the post-update record, or `None` if no such nudge exists.
    async fn replace(&self, id: NudgeId, draft: &NudgeDraft)
        -> Result<Option<Nudge>, StoreError>;

    /// Delete the nudge with `id`. Returns `true` if a record was removed.
    async fn delete(&self, id: NudgeId) -> Result<bool, StoreError>;

    /// Verify the backing storage is reachable.
    async fn ping(&self) -> Result<(), StoreError>;
}
