//! Event seating: guest assignments and the seating chart.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, patch},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use validator::Validate;

use crate::error::SeatingError;
use crate::middleware::AuthUser;
use crate::models::{AssignmentId, AssignmentPatch, EventId, GuestId, SeatId};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/events/{id}/assignments",
            get(list_assignments).post(assign_guest),
        )
        .route(
            "/events/{id}/assignments/{assignment_id}",
            patch(update_assignment),
        )
        .route(
            "/events/{id}/seats/{seat_id}/assignment",
            delete(unassign_seat),
        )
        .route(
            "/events/{id}/guests/{guest_id}/assignment",
            get(guest_assignment),
        )
        .route("/events/{id}/chart", get(seating_chart))
}

#[derive(Debug, Deserialize, Validate)]
struct AssignGuestRequest {
    guest_id: GuestId,
    seat_id: SeatId,
    #[validate(length(max = 1000))]
    notes: Option<String>,
}

// Assignment writes flip a seat's status, so its room's cached listings go stale.
async fn invalidate_seat_room(state: &AppState, seat_id: SeatId) {
    match state.store.find_seat(seat_id).await {
        Ok(Some(seat)) => state.cache.invalidate_room_seats(seat.room_id).await,
        Ok(None) => {}
        Err(e) => tracing::warn!("could not resolve room of seat {}: {:?}", seat_id, e),
    }
}

/// POST /api/events/{id}/assignments
async fn assign_guest(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<EventId>,
    Json(req): Json<AssignGuestRequest>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    let assignment = state
        .engine
        .assign_guest_to_seat(event_id, req.guest_id, req.seat_id, user.user_id, req.notes)
        .await?;
    invalidate_seat_room(&state, assignment.seat_id).await;
    Ok((StatusCode::CREATED, Json(assignment)))
}

async fn list_assignments(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.engine.list_assignments(event_id, user.user_id).await?))
}

/// PATCH /api/events/{id}/assignments/{assignment_id}
///
/// Moving a guest frees the old seat and occupies the new one in one step.
async fn update_assignment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((event_id, assignment_id)): Path<(EventId, AssignmentId)>,
    Json(req): Json<AssignmentPatch>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    let previous_seat = state
        .store
        .find_assignment(assignment_id)
        .await?
        .map(|a| a.seat_id);

    let assignment = state
        .engine
        .update_seating_assignment(event_id, assignment_id, user.user_id, req)
        .await?;

    if let Some(old) = previous_seat.filter(|s| *s != assignment.seat_id) {
        invalidate_seat_room(&state, old).await;
        invalidate_seat_room(&state, assignment.seat_id).await;
    }
    Ok(Json(assignment))
}

async fn unassign_seat(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((event_id, seat_id)): Path<(EventId, SeatId)>,
) -> Result<impl IntoResponse, SeatingError> {
    let removed = state
        .engine
        .unassign_guest_from_seat(event_id, seat_id, user.user_id)
        .await?;
    invalidate_seat_room(&state, seat_id).await;
    Ok(Json(removed))
}

async fn guest_assignment(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path((event_id, guest_id)): Path<(EventId, GuestId)>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(
        state
            .engine
            .guest_assignment(event_id, guest_id, user.user_id)
            .await?,
    ))
}

/// GET /api/events/{id}/chart
async fn seating_chart(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(event_id): Path<EventId>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.charts.seating_chart(event_id, user.user_id).await?))
}
