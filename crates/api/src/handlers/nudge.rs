//! Handlers for the `/nudges` resource.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::Json;
use nudge_core::error::CoreError;
use nudge_core::nudge::{Nudge, NudgeDraft};
use nudge_core::schedule::{parse_date, parse_time};
use nudge_core::types::NudgeId;

use crate::error::{AppError, AppResult};
use crate::extract::AppJson;
use crate::state::AppState;

/// Multipart field carrying the cover image binary.
const COVER_IMAGE_FIELD: &str = "coverImage";

/// Parse a path parameter as a nudge id.
///
/// A value that is not a UUID is a client error, not an internal one.
fn parse_nudge_id(raw: &str) -> Result<NudgeId, AppError> {
    raw.parse::<NudgeId>().map_err(|_| {
        AppError::Core(CoreError::Validation(format!("Invalid nudge id '{raw}'")))
    })
}

/// The multipart form of the create endpoint, collected into one pass
/// over the stream: the file field plus the flat string fields.
#[derive(Debug, Default)]
struct NudgeForm {
    file: Option<(String, Vec<u8>)>,
    tag: Option<String>,
    title: Option<String>,
    date: Option<String>,
    start_time: Option<String>,
    end_time: Option<String>,
    description: Option<String>,
    icon: Option<String>,
    invitation_text: Option<String>,
}

impl NudgeForm {
    async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?
        {
            let name = field.name().unwrap_or("").to_string();
            if name == COVER_IMAGE_FIELD {
                let filename = field.file_name().unwrap_or("upload").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                form.file = Some((filename, data.to_vec()));
                continue;
            }

            let text = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            match name.as_str() {
                "tag" => form.tag = Some(text),
                "title" => form.title = Some(text),
                "date" => form.date = Some(text),
                "startTime" => form.start_time = Some(text),
                "endTime" => form.end_time = Some(text),
                "description" => form.description = Some(text),
                "icon" => form.icon = Some(text),
                "invitationText" => form.invitation_text = Some(text),
                _ => {} // ignore unknown fields
            }
        }

        Ok(form)
    }

    /// Turn the string fields into a validated draft.
    ///
    /// Empty schedule strings count as absent; anything else must parse.
    /// `cover_image` is filled in by the caller once the upload is stored.
    fn into_draft(self) -> Result<NudgeDraft, CoreError> {
        let mut draft = NudgeDraft {
            tag: self.tag.unwrap_or_default(),
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            icon: self.icon.unwrap_or_default(),
            invitation_text: self.invitation_text.unwrap_or_default(),
            ..NudgeDraft::default()
        };

        if let Some(date) = self.date.filter(|s| !s.is_empty()) {
            draft.schedule.date = Some(parse_date("date", &date)?);
        }
        if let Some(start) = self.start_time.filter(|s| !s.is_empty()) {
            draft.schedule.time.start = Some(parse_time("startTime", &start)?);
        }
        if let Some(end) = self.end_time.filter(|s| !s.is_empty()) {
            draft.schedule.time.end = Some(parse_time("endTime", &end)?);
        }

        draft.validate()?;
        Ok(draft)
    }
}

/// POST /api/v3/app/nudges
///
/// Accepts a multipart form with a required `coverImage` file field and
/// the nudge fields as flat strings. The image is stored first; only a
/// successful upload reaches the insert, so a failed upload leaves no
/// orphan record.
pub async fn create(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    let mut form = NudgeForm::read(multipart).await?;

    let (filename, data) = form.file.take().ok_or(AppError::Core(
        CoreError::Validation("No file uploaded".into()),
    ))?;

    let mut draft = form.into_draft().map_err(AppError::Core)?;
    draft.cover_image = state.objects.put(&filename, &data).await?;

    let id = state.nudges.insert(&draft).await?;
    tracing::info!(%id, title = %draft.title, "Created nudge");

    Ok((StatusCode::CREATED, Json(serde_json::json!({ "id": id }))))
}

/// GET /api/v3/app/nudges
///
/// Every nudge, in insertion order. No filtering, no pagination.
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Nudge>>> {
    let nudges = state.nudges.list().await?;
    Ok(Json(nudges))
}

/// GET /api/v3/app/nudges/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<Nudge>> {
    let id = parse_nudge_id(&raw_id)?;
    let nudge = state
        .nudges
        .find_by_id(id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Nudge", id }))?;
    Ok(Json(nudge))
}

/// PUT /api/v3/app/nudges/{id}
///
/// Full-object replace: every client-controlled field is overwritten
/// from the body; omitted fields fall back to their defaults. The
/// response carries the persisted post-update record, not an echo of
/// the request body.
pub async fn update(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    AppJson(draft): AppJson<NudgeDraft>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_nudge_id(&raw_id)?;
    draft.validate().map_err(AppError::Core)?;

    let nudge = state
        .nudges
        .replace(id, &draft)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Nudge", id }))?;

    tracing::info!(%id, "Updated nudge");
    Ok(Json(serde_json::json!({
        "message": "Nudge updated",
        "nudge": nudge,
    })))
}

/// DELETE /api/v3/app/nudges/{id}
///
/// Single atomic delete with no existence pre-check; a second delete of
/// the same id reports 404.
pub async fn delete(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> AppResult<Json<serde_json::Value>> {
    let id = parse_nudge_id(&raw_id)?;
    let removed = state.nudges.delete(id).await?;

    if !removed {
        return Err(AppError::Core(CoreError::NotFound { entity: "Nudge", id }));
    }

    tracing::info!(%id, "Deleted nudge");
    Ok(Json(serde_json::json!({ "message": "Nudge deleted" })))
}
