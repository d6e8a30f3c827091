use serde::{Deserialize, Serialize};

use super::{AssignmentDetail, EventId, RoomId, VenueId};

/// Derived, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SeatingChart {
    pub event_id: EventId,
    pub venue_id: Option<VenueId>,
    pub venue_name: Option<String>,
    pub room_id: Option<RoomId>,
    pub room_name: Option<String>,
    pub assignments: Vec<AssignmentDetail>,
    pub total_seats: i64,
    pub assigned_seats: i64,
    pub available_seats: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoomOccupancy {
    pub room_id: RoomId,
    pub total: i64,
    pub available: i64,
    pub occupied: i64,
    pub reserved: i64,
    pub blocked: i64,
    pub maintenance: i64,
}
