use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{EventId, GuestId, RoomId, SeatId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "seat_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeatStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
    Blocked,
    Maintenance,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "seat_category", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SeatCategory {
    #[default]
    Standard,
    Vip,
    Accessible,
    Premium,
    Economy,
    Standing,
}

/// A seat within a room. `status == Occupied` holds exactly when `guest_id` is set.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Seat {
    pub id: SeatId,
    pub room_id: RoomId,
    pub event_id: Option<EventId>,
    pub row: String,
    #[sqlx(rename = "seat_column")]
    pub column: Option<String>,
    pub number: String,
    pub category: SeatCategory,
    pub status: SeatStatus,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
    pub guest_id: Option<GuestId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Seat {
    pub fn is_occupied(&self) -> bool {
        self.guest_id.is_some()
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.row, self.number)
    }
}

/// A seat ready to be inserted; produced from a request or by the grid generator.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSeat {
    pub room_id: RoomId,
    pub event_id: Option<EventId>,
    pub row: String,
    pub column: Option<String>,
    pub number: String,
    pub category: SeatCategory,
    pub status: SeatStatus,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

fn unit() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSeat {
    pub event_id: Option<EventId>,
    #[validate(length(min = 1, max = 10))]
    pub row: String,
    #[validate(length(min = 1, max = 10))]
    pub column: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub number: String,
    #[serde(default)]
    pub category: SeatCategory,
    pub status: Option<SeatStatus>,
    #[serde(default)]
    pub x: f64,
    #[serde(default)]
    pub y: f64,
    #[validate(range(min = 0.0))]
    #[serde(default = "unit")]
    pub width: f64,
    #[validate(range(min = 0.0))]
    #[serde(default = "unit")]
    pub height: f64,
    #[serde(default)]
    pub rotation: f64,
}

impl CreateSeat {
    pub fn into_new_seat(self, room_id: RoomId) -> NewSeat {
        NewSeat {
            room_id,
            event_id: self.event_id,
            row: self.row,
            column: self.column,
            number: self.number,
            category: self.category,
            status: self.status.unwrap_or_default(),
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
        }
    }
}

/// Field-masked seat update. Occupancy is not part of it.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct SeatPatch {
    #[validate(length(min = 1, max = 10))]
    pub row: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub column: Option<String>,
    #[validate(length(min = 1, max = 10))]
    pub number: Option<String>,
    pub category: Option<SeatCategory>,
    pub status: Option<SeatStatus>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    #[validate(range(min = 0.0))]
    pub width: Option<f64>,
    #[validate(range(min = 0.0))]
    pub height: Option<f64>,
    pub rotation: Option<f64>,
}

impl SeatPatch {
    pub fn moves_coordinate(&self, seat: &Seat) -> bool {
        self.row.as_deref().is_some_and(|r| r != seat.row)
            || self.number.as_deref().is_some_and(|n| n != seat.number)
    }
}

impl Seat {
    pub fn apply(&mut self, patch: &SeatPatch) {
        if let Some(row) = &patch.row {
            self.row = row.clone();
        }
        if let Some(column) = &patch.column {
            self.column = Some(column.clone());
        }
        if let Some(number) = &patch.number {
            self.number = number.clone();
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(x) = patch.x {
            self.x = x;
        }
        if let Some(y) = patch.y {
            self.y = y;
        }
        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(rotation) = patch.rotation {
            self.rotation = rotation;
        }
    }
}
