//! Handlers for the `/invitees` resource.
//!
//! Invitees are created under their owning event
//! (`/events/{event_id}/invitees`) and addressed flat
//! (`/invitees/{id}`) afterwards.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use festivo_core::channels::{validate_channel_value, ChannelKind};
use festivo_core::error::CoreError;
use festivo_core::rsvp::validate_rsvp_status;
use festivo_core::types::DbId;
use festivo_db::models::invitee::{CreateInvitee, Invitee, UpdateInvitee};
use festivo_db::repositories::{EventRepo, InviteeRepo};

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Validate the channel-preference fields shared by create and update.
fn validate_channel_prefs(
    preferred_channel: Option<&str>,
    notification_channels: Option<&serde_json::Value>,
) -> Result<(), CoreError> {
    if let Some(name) = preferred_channel {
        if ChannelKind::parse(name).is_none() {
            return Err(CoreError::Validation(format!(
                "Unknown preferred channel '{name}'"
            )));
        }
    }
    if let Some(value) = notification_channels {
        validate_channel_value(value)?;
    }
    Ok(())
}

/// POST /api/v1/events/{event_id}/invitees
pub async fn create(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
    Json(input): Json<CreateInvitee>,
) -> AppResult<(StatusCode, Json<Invitee>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Invitee name must not be empty".to_string(),
        )));
    }
    validate_channel_prefs(
        input.preferred_channel.as_deref(),
        input.notification_channels.as_ref(),
    )
    .map_err(AppError::Core)?;

    // Surface a clean 404 for a missing event instead of an FK error.
    EventRepo::find_by_id(&state.pool, event_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Event",
            id: event_id,
        }))?;

    let invitee = InviteeRepo::create(&state.pool, event_id, &input).await?;
    Ok((StatusCode::CREATED, Json(invitee)))
}

/// GET /api/v1/events/{event_id}/invitees
pub async fn list_by_event(
    State(state): State<AppState>,
    Path(event_id): Path<DbId>,
) -> AppResult<Json<Vec<Invitee>>> {
    let invitees = InviteeRepo::list_by_event(&state.pool, event_id).await?;
    Ok(Json(invitees))
}

/// GET /api/v1/invitees/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Invitee>> {
    let invitee = InviteeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invitee",
            id,
        }))?;
    Ok(Json(invitee))
}

/// PUT /api/v1/invitees/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInvitee>,
) -> AppResult<Json<Invitee>> {
    if let Some(status) = input.rsvp_status.as_deref() {
        validate_rsvp_status(status).map_err(AppError::Core)?;
    }
    validate_channel_prefs(
        input.preferred_channel.as_deref(),
        input.notification_channels.as_ref(),
    )
    .map_err(AppError::Core)?;

    let invitee = InviteeRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Invitee",
            id,
        }))?;
    Ok(Json(invitee))
}

/// DELETE /api/v1/invitees/{id}
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = InviteeRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound {
            entity: "Invitee",
            id,
        }))
    }
}
