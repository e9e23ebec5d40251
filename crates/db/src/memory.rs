//! In-memory [`NudgeStore`] implementation.
//!
//! Keeps the whole collection in a `Vec` behind an async lock,
//! preserving insertion order to match the Postgres listing behaviour.
//! Used for local development without a database and by the API
//! integration tests.

use async_trait::async_trait;
use chrono::Utc;
use nudge_core::nudge::{Nudge, NudgeDraft};
use nudge_core::types::NudgeId;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::store::{NudgeStore, StoreError};

#[derive(Debug, Default)]
pub struct MemoryNudgeStore {
    nudges: RwLock<Vec<Nudge>>,
}

impl MemoryNudgeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn materialize(id: NudgeId, draft: &NudgeDraft, created_at: chrono::DateTime<Utc>) -> Nudge {
    Nudge {
        id,
        tag: draft.tag.clone(),
        title: draft.title.clone(),
        cover_image: draft.cover_image.clone(),
        schedule: draft.schedule.clone(),
        description: draft.description.clone(),
        icon: draft.icon.clone(),
        invitation_text: draft.invitation_text.clone(),
        created_at,
        updated_at: Utc::now(),
    }
}

#[async_trait]
impl NudgeStore for MemoryNudgeStore {
    async fn insert(&self, draft: &NudgeDraft) -> Result<NudgeId, StoreError> {
        let id = Uuid::now_v7();
        let mut nudges = self.nudges.write().await;
        nudges.push(materialize(id, draft, Utc::now()));
        Ok(id)
    }

    async fn list(&self) -> Result<Vec<Nudge>, StoreError> {
        Ok(self.nudges.read().await.clone())
    }

    async fn find_by_id(&self, id: NudgeId) -> Result<Option<Nudge>, StoreError> {
        let nudges = self.nudges.read().await;
        Ok(nudges.iter().find(|n| n.id == id).cloned())
    }

    async fn replace(
        &self,
        id: NudgeId,
        draft: &NudgeDraft,
    ) -> Result<Option<Nudge>, StoreError> {
        let mut nudges = self.nudges.write().await;
        match nudges.iter_mut().find(|n| n.id == id) {
            Some(existing) => {
                *existing = materialize(id, draft, existing.created_at);
                Ok(Some(existing.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: NudgeId) -> Result<bool, StoreError> {
        let mut nudges = self.nudges.write().await;
        let before = nudges.len();
        nudges.retain(|n| n.id != id);
        Ok(nudges.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str) -> NudgeDraft {
        NudgeDraft {
            title: title.into(),
            cover_image: "/uploads/x.png".into(),
            ..NudgeDraft::default()
        }
    }

    #[tokio::test]
    async fn insert_then_find_returns_record() {
        let store = MemoryNudgeStore::new();
        let id = store.insert(&draft("Sale")).await.unwrap();

        let found = store.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.title, "Sale");
    }

    #[tokio::test]
    async fn list_preserves_insertion_order() {
        let store = MemoryNudgeStore::new();
        store.insert(&draft("first")).await.unwrap();
        store.insert(&draft("second")).await.unwrap();

        let all = store.list().await.unwrap();
        let titles: Vec<_> = all.iter().map(|n| n.title.as_str()).collect();
        assert_eq!(titles, ["first", "second"]);
    }

    #[tokio::test]
    async fn replace_overwrites_all_fields_and_keeps_created_at() {
        let store = MemoryNudgeStore::new();
        let id = store.insert(&draft("before")).await.unwrap();
        let original = store.find_by_id(id).await.unwrap().unwrap();

        let replacement = NudgeDraft {
            title: "after".into(),
            tag: "promo".into(),
            ..NudgeDraft::default()
        };
        let updated = store.replace(id, &replacement).await.unwrap().unwrap();

        assert_eq!(updated.title, "after");
        assert_eq!(updated.tag, "promo");
        // Omitted fields are replaced, not merged.
        assert_eq!(updated.cover_image, "");
        assert_eq!(updated.created_at, original.created_at);
    }

    #[tokio::test]
    async fn replace_missing_id_returns_none() {
        let store = MemoryNudgeStore::new();
        let missing = store.replace(Uuid::now_v7(), &draft("x")).await.unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent_in_effect() {
        let store = MemoryNudgeStore::new();
        let id = store.insert(&draft("gone")).await.unwrap();

        assert!(store.delete(id).await.unwrap());
        assert!(!store.delete(id).await.unwrap());
        assert!(store.find_by_id(id).await.unwrap().is_none());
    }
}
