use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{AssignmentId, EventId, GuestId, RoomId, SeatId, UserId, VenueId};

/// Binding of one guest to one seat for one event.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct SeatingAssignment {
    pub id: AssignmentId,
    pub event_id: EventId,
    pub guest_id: GuestId,
    pub seat_id: SeatId,
    pub assigned_by: UserId,
    pub assigned_at: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewAssignment {
    pub event_id: EventId,
    pub guest_id: GuestId,
    pub seat_id: SeatId,
    pub assigned_by: UserId,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct AssignmentPatch {
    pub seat_id: Option<SeatId>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
}

/// Assignment joined with its seat, room and venue for chart rendering.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct AssignmentDetail {
    pub id: AssignmentId,
    pub event_id: EventId,
    pub guest_id: GuestId,
    pub seat_id: SeatId,
    pub assigned_by: UserId,
    pub assigned_at: DateTime<Utc>,
    pub notes: Option<String>,
    pub seat_row: String,
    pub seat_number: String,
    pub room_id: RoomId,
    pub room_name: String,
    pub venue_id: VenueId,
    pub venue_name: String,
}
