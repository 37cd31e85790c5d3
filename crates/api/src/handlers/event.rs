//! Handlers for the `/events` resource.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use festivo_core::error::CoreError;
use festivo_core::types::DbId;
use festivo_db::models::event::{CreateEvent, Event, UpdateEvent};
use festivo_db::repositories::EventRepo;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/v1/events
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateEvent>,
) -> AppResult<(StatusCode, Json<Event>)> {
    if input.title.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Event title must not be empty".to_string(),
        )));
    }
    let event = EventRepo::create(&state.pool, &input).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

/// GET /api/v1/events
pub async fn list(State(state): State<AppState>) -> AppResult<Json<Vec<Event>>> {
    let events = EventRepo::list(&state.pool).await?;
    Ok(Json(events))
}

/// GET /api/v1/events/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(event))
}

/// PUT /api/v1/events/{id}
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateEvent>,
) -> AppResult<Json<Event>> {
    let event = EventRepo::update(&state.pool, id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Event", id }))?;
    Ok(Json(event))
}

/// DELETE /api/v1/events/{id}
///
/// Cascades to the event's invitees.
pub async fn delete(State(state): State<AppState>, Path(id): Path<DbId>) -> AppResult<StatusCode> {
    let deleted = EventRepo::delete(&state.pool, id).await?;
    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::Core(CoreError::NotFound { entity: "Event", id }))
    }
}
