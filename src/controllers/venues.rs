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
use crate::models::{CreateRoom, CreateVenue, VenueId, VenuePatch};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/venues", get(list_own_venues).post(create_venue))
        .route("/venues/public", get(list_public_venues))
        .route(
            "/venues/{id}",
            get(get_venue).patch(update_venue).delete(delete_venue),
        )
        .route("/venues/{id}/rooms", get(list_rooms).post(create_room))
}

/// POST /api/venues
async fn create_venue(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Json(req): Json<CreateVenue>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    let venue = state.layout.create_venue(user.user_id, req).await?;
    Ok((StatusCode::CREATED, Json(venue)))
}

/// GET /api/venues
async fn list_own_venues(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.layout.list_owned_venues(user.user_id).await?))
}

/// GET /api/venues/public
async fn list_public_venues(
    State(state): State<Arc<AppState>>,
    _user: AuthUser,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.layout.list_public_venues().await?))
}

async fn get_venue(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(venue_id): Path<VenueId>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.layout.get_venue(user.user_id, venue_id).await?))
}

async fn update_venue(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(venue_id): Path<VenueId>,
    Json(req): Json<VenuePatch>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    Ok(Json(state.layout.update_venue(user.user_id, venue_id, req).await?))
}

async fn delete_venue(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(venue_id): Path<VenueId>,
) -> Result<impl IntoResponse, SeatingError> {
    state.layout.delete_venue(user.user_id, venue_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/venues/{id}/rooms
async fn create_room(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(venue_id): Path<VenueId>,
    Json(req): Json<CreateRoom>,
) -> Result<impl IntoResponse, SeatingError> {
    req.validate()?;
    let room = state.layout.create_room(user.user_id, venue_id, req).await?;
    Ok((StatusCode::CREATED, Json(room)))
}

async fn list_rooms(
    State(state): State<Arc<AppState>>,
    user: AuthUser,
    Path(venue_id): Path<VenueId>,
) -> Result<impl IntoResponse, SeatingError> {
    Ok(Json(state.layout.list_rooms(user.user_id, venue_id).await?))
}
