use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::{EventId, GuestId, UserId};

/// The slice of an event this engine needs: who owns it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub owner_id: UserId,
}

#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Guest {
    pub id: GuestId,
    pub event_id: EventId,
    pub name: String,
}
