use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use std::sync::Arc;
use validator::Validate;

use crate::error::SeatingError;
use crate::middleware::AuthUser;
use crate::models::{SeatId, SeatPatch};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route(
        "/seats/{id}",
        get(get_seat).patch(update_seat).delete(delete_seat),
    )
}

async fn get_seat(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(seat_id): Path<SeatId>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.layout.get_seat(user.user_id, seat_id).await?))
}

async fn update_seat(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(seat_id): Path<SeatId>,
    Json(req): Json<SeatPatch>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    let seat = state.layout.update_seat(user.user_id, seat_id, req).await?;
    state.cache.invalidate_room_seats(seat.room_id).await;
    Ok(Json(seat))
}

/// DELETE /api/seats/{id}
///
/// Occupied seats are refused; unassign the guest first.
async fn delete_seat(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(seat_id): Path<SeatId>,
) -> Result<impl IntoResponse, SeatingError> {
    let seat = state.layout.delete_seat(user.user_id, seat_id).await?;
    state.cache.invalidate_room_seats(seat.room_id).await;
    Ok(StatusCode::NO_CONTENT)
}
