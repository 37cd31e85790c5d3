//! Handlers for the `/users` resource.
//!
//! Authentication and session issuance live outside this service; the
//! signup collaborator creates accounts through `create` and then calls
//! the resolve-links endpoint.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use festivo_core::channels::validate_channel_names;
use festivo_core::error::CoreError;
use festivo_core::types::DbId;
use festivo_db::models::user::{CreateUser, UpdateNotificationPreferences, User};
use festivo_db::repositories::UserRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/users
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateUser>,
) -> AppResult<(StatusCode, Json<User>)> {
    if input.name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "User name must not be empty".to_string(),
        )));
    }
    let user = UserRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// GET /api/v1/users/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<User>> {
    let user = UserRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;
    Ok(Json(user))
}

/// PUT /api/v1/users/{id}/notification-preferences
///
/// Update the channels a user wants notifications on and their WhatsApp
/// charge acceptance. Omitted fields are left unchanged; `channels: []`
/// explicitly clears the list.
pub async fn update_notification_preferences(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateNotificationPreferences>,
) -> AppResult<Json<User>> {
    if let Some(channels) = &input.channels {
        validate_channel_names(channels).map_err(AppError::Core)?;
    }

    let channels_value = input.channels.map(|c| serde_json::json!(c));
    let user = UserRepo::update_notification_preferences(
        &state.pool,
        id,
        channels_value.as_ref(),
        input.whatsapp_charges_accepted,
    )
    .await?
    .ok_or(AppError::Core(CoreError::NotFound { entity: "User", id }))?;

    Ok(Json(user))
}
