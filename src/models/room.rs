use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::{RoomId, VenueId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "room_type", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoomType {
    #[default]
    General,
    Ballroom,
    Conference,
    Theater,
    Banquet,
    Outdoor,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize, PartialEq)]
pub struct Room {
    pub id: RoomId,
    pub venue_id: VenueId,
    pub name: String,
    pub capacity: i32,
    pub floor: Option<i32>,
    pub room_type: RoomType,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateRoom {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub capacity: i32,
    pub floor: Option<i32>,
    #[serde(default)]
    pub room_type: RoomType,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct RoomPatch {
    #[validate(length(min = 1, max = 200))]
    pub name: Option<String>,
    #[validate(range(min = 0))]
    pub capacity: Option<i32>,
    pub floor: Option<i32>,
    pub room_type: Option<RoomType>,
    pub description: Option<String>,
}

impl Room {
    pub fn apply(&mut self, patch: &RoomPatch) {
        if let Some(name) = &patch.name {
            self.name = name.clone();
        }
        if let Some(capacity) = patch.capacity {
            self.capacity = capacity;
        }
        if let Some(floor) = patch.floor {
            self.floor = Some(floor);
        }
        if let Some(room_type) = patch.room_type {
            self.room_type = room_type;
        }
        if let Some(description) = &patch.description {
            self.description = Some(description.clone());
        }
    }
}
