//! Rooms and the seats inside them.
//!
//! Seat listings go through the Redis cache; every write here drops the
//! room's cached listings once the store has committed.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::SeatingError;
use crate::middleware::AuthUser;
use crate::models::{CreateSeat, RoomId, RoomPatch, SeatStatus};
use crate::services::GridSpec;
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/rooms/{id}",
            get(get_room).patch(update_room).delete(delete_room),
        )
        .route("/rooms/{id}/seats", get(list_seats).post(create_seat))
        .route("/rooms/{id}/seats/grid", post(create_seat_grid))
        .route("/rooms/{id}/occupancy", get(room_occupancy))
}

#[derive(Debug, Deserialize)]
struct SeatsQuery {
    status: Option<SeatStatus>,
}

async fn get_room(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<RoomId>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.layout.get_room(user.user_id, room_id).await?))
}

async fn update_room(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<RoomId>,
    Json(req): Json<RoomPatch>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    Ok(Json(state.layout.update_room(user.user_id, room_id, req).await?))
}

async fn delete_room(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<RoomId>,
) -> Result<impl IntoResponse, SeatingError> {
    state.layout.delete_room(user.user_id, room_id).await?;
    state.cache.invalidate_room_seats(room_id).await;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/rooms/{id}/seats?status=available
async fn list_seats(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<RoomId>,
    Query(params): Query<SeatsQuery>,
) -> Result<impl IntoResponse, SeatingError> {
    // ownership is checked on every request, cached or not
    state.layout.get_room(user.user_id, room_id).await?;

    if let Some(seats) = state.cache.get_room_seats(room_id, params.status).await {
        return Ok(Json(seats));
    }

    let seats = state
        .layout
        .list_seats(user.user_id, room_id, params.status)
        .await?;
    state
        .cache
        .cache_room_seats(room_id, params.status, &seats)
        .await;
    Ok(Json(seats))
}

async fn create_seat(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<RoomId>,
    Json(req): Json<CreateSeat>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    let seat = state.layout.create_seat(user.user_id, room_id, req).await?;
    state.cache.invalidate_room_seats(room_id).await;
    Ok((StatusCode::CREATED, Json(seat)))
}

/// POST /api/rooms/{id}/seats/grid
///
/// All-or-nothing: a clash with an existing seat rejects the whole grid.
async fn create_seat_grid(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<RoomId>,
    Json(spec): Json<GridSpec>,
) -> Result<impl IntoResponse, SeatingError> {
    let seats = state
        .layout
        .create_seat_grid(user.user_id, room_id, spec)
        .await?;
    if !seats.is_empty() {
        state.cache.invalidate_room_seats(room_id).await;
    }
    Ok((StatusCode::CREATED, Json(seats)))
}

async fn room_occupancy(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(room_id): Path<RoomId>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.layout.room_occupancy(user.user_id, room_id).await?))
}
