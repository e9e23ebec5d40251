/// Nudge identifiers are UUIDs, generated server-side (v7) so they sort
/// by creation time.
pub type NudgeId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
