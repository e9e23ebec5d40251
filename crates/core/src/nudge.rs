//! The nudge entity and its full-replacement draft form.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::schedule::Schedule;
use crate::types::{NudgeId, Timestamp};

/// A persisted nudge, in its wire shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Nudge {
    pub id: NudgeId,
    pub tag: String,
    pub title: String,
    pub cover_image: String,
    pub schedule: Schedule,
    pub description: String,
    pub icon: String,
    pub invitation_text: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// The client-controlled field set of a nudge.
///
/// Used both for creation (assembled from the multipart form, with
/// `cover_image` set to the stored upload location) and for update,
/// where the body replaces every field: omitted text fields become
/// empty and omitted schedule parts become absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NudgeDraft {
    #[serde(default)]
    pub tag: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub cover_image: String,
    #[serde(default)]
    pub schedule: Schedule,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub invitation_text: String,
}

impl NudgeDraft {
    /// Validate the draft before it reaches storage.
    ///
    /// `title` is the only field with a presence requirement; everything
    /// else is free text or already type-checked by the schedule parser.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation(
                "Field 'title' must not be empty".into(),
            ));
        }
        Ok(())
    }
}
