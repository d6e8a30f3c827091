//! Typed failures of the seating engine and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::{EventId, GuestId, RoomId, SeatId, SeatStatus, VenueId};

pub type Result<T> = std::result::Result<T, SeatingError>;

/// Coarse classification the HTTP boundary maps to status codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Conflict,
    AccessDenied,
    InvalidState,
    Validation,
    Internal,
}

#[derive(Error, Debug)]
pub enum SeatingError {
    #[error("venue {0} not found")]
    VenueNotFound(VenueId),

    #[error("room {0} not found")]
    RoomNotFound(RoomId),

    #[error("seat {0} not found")]
    SeatNotFound(SeatId),

    #[error("guest {guest_id} is not part of event {event_id}")]
    GuestNotFound { event_id: EventId, guest_id: GuestId },

    #[error("seating assignment not found")]
    AssignmentNotFound,

    #[error("a room named '{name}' already exists in venue {venue_id}")]
    NameConflict { venue_id: VenueId, name: String },

    #[error("seat {row}{number} already exists in room {room_id}")]
    SeatConflict {
        room_id: RoomId,
        row: String,
        number: String,
    },

    #[error("seat {seat_id} is already occupied")]
    SeatOccupied { seat_id: SeatId },

    #[error("guest {guest_id} already has a seat for event {event_id}")]
    GuestAlreadyAssigned { event_id: EventId, guest_id: GuestId },

    #[error("access denied")]
    AccessDenied,

    #[error("access to event {0} denied")]
    EventAccessDenied(EventId),

    #[error("{0} still has child records")]
    HasChildren(&'static str),

    #[error("seat {seat_id} has an occupant and cannot be deleted")]
    SeatInUse { seat_id: SeatId },

    #[error("seat status cannot be changed from {from:?} to {to:?} outside of an assignment")]
    StatusTransition { from: SeatStatus, to: SeatStatus },

    #[error("invalid request: {0}")]
    Validation(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl SeatingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            SeatingError::VenueNotFound(_)
            | SeatingError::RoomNotFound(_)
            | SeatingError::SeatNotFound(_)
            | SeatingError::GuestNotFound { .. }
            | SeatingError::AssignmentNotFound => ErrorKind::NotFound,
            SeatingError::NameConflict { .. }
            | SeatingError::SeatConflict { .. }
            | SeatingError::SeatOccupied { .. }
            | SeatingError::GuestAlreadyAssigned { .. } => ErrorKind::Conflict,
            SeatingError::AccessDenied | SeatingError::EventAccessDenied(_) => {
                ErrorKind::AccessDenied
            }
            SeatingError::HasChildren(_)
            | SeatingError::SeatInUse { .. }
            | SeatingError::StatusTransition { .. } => ErrorKind::InvalidState,
            SeatingError::Validation(_) => ErrorKind::Validation,
            SeatingError::Database(_) => ErrorKind::Internal,
        }
    }

    /// Stable machine-readable code for clients.
    pub fn code(&self) -> &'static str {
        match self {
            SeatingError::VenueNotFound(_) => "VENUE_NOT_FOUND",
            SeatingError::RoomNotFound(_) => "ROOM_NOT_FOUND",
            SeatingError::SeatNotFound(_) => "SEAT_NOT_FOUND",
            SeatingError::GuestNotFound { .. } => "GUEST_NOT_FOUND",
            SeatingError::AssignmentNotFound => "ASSIGNMENT_NOT_FOUND",
            SeatingError::NameConflict { .. } => "NAME_CONFLICT",
            SeatingError::SeatConflict { .. } => "SEAT_CONFLICT",
            SeatingError::SeatOccupied { .. } => "SEAT_OCCUPIED",
            SeatingError::GuestAlreadyAssigned { .. } => "GUEST_ALREADY_ASSIGNED",
            SeatingError::AccessDenied => "ACCESS_DENIED",
            SeatingError::EventAccessDenied(_) => "EVENT_ACCESS_DENIED",
            SeatingError::HasChildren(_) => "HAS_CHILDREN",
            SeatingError::SeatInUse { .. } => "SEAT_OCCUPIED",
            SeatingError::StatusTransition { .. } => "INVALID_STATUS_TRANSITION",
            SeatingError::Validation(_) => "VALIDATION_ERROR",
            SeatingError::Database(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::AccessDenied => StatusCode::FORBIDDEN,
            ErrorKind::InvalidState => StatusCode::BAD_REQUEST,
            ErrorKind::Validation => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<validator::ValidationErrors> for SeatingError {
    fn from(errors: validator::ValidationErrors) -> Self {
        SeatingError::Validation(errors.to_string())
    }
}

#[derive(Serialize)]
struct ApiError {
    success: bool,
    code: &'static str,
    message: String,
}

impl IntoResponse for SeatingError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            SeatingError::Database(e) => {
                tracing::error!(error = ?e, "storage failure");
                "internal storage error".to_string()
            }
            other => other.to_string(),
        };

        let body = ApiError {
            success: false,
            code: self.code(),
            message,
        };
        (status, Json(body)).into_response()
    }
}
