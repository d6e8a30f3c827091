//! Owner-chain authorization shared by every service.
//!
//! Each check re-fetches the record it authorizes, so callers always act on
//! current ownership rather than on something cached earlier in the request.

use std::sync::Arc;

use crate::error::{Result, SeatingError};
use crate::models::{EventId, Room, RoomId, Seat, SeatId, UserId, Venue, VenueId};
use crate::store::{EventDirectory, SeatingStore};

#[derive(Clone)]
pub struct Authorizer {
    store: Arc<dyn SeatingStore>,
    directory: Arc<dyn EventDirectory>,
}

impl Authorizer {
    pub fn new(store: Arc<dyn SeatingStore>, directory: Arc<dyn EventDirectory>) -> Self {
        Self { store, directory }
    }

    /// The venue, if `actor` owns it.
    pub async fn venue(&self, actor: UserId, venue_id: VenueId) -> Result<Venue> {
        let venue = self
            .store
            .find_venue(venue_id)
            .await?
            .ok_or(SeatingError::VenueNotFound(venue_id))?;
        if venue.owner_id != actor {
            tracing::warn!("user {} denied access to venue {}", actor, venue_id);
            return Err(SeatingError::AccessDenied);
        }
        Ok(venue)
    }

    /// The venue, if it is public or owned by `actor`.
    pub async fn readable_venue(&self, actor: UserId, venue_id: VenueId) -> Result<Venue> {
        let venue = self
            .store
            .find_venue(venue_id)
            .await?
            .ok_or(SeatingError::VenueNotFound(venue_id))?;
        if !venue.is_public && venue.owner_id != actor {
            return Err(SeatingError::AccessDenied);
        }
        Ok(venue)
    }

    pub async fn room(&self, actor: UserId, room_id: RoomId) -> Result<Room> {
        let room = self
            .store
            .find_room(room_id)
            .await?
            .ok_or(SeatingError::RoomNotFound(room_id))?;
        self.venue(actor, room.venue_id).await?;
        Ok(room)
    }

    pub async fn seat(&self, actor: UserId, seat_id: SeatId) -> Result<Seat> {
        let seat = self
            .store
            .find_seat(seat_id)
            .await?
            .ok_or(SeatingError::SeatNotFound(seat_id))?;
        self.room(actor, seat.room_id).await?;
        Ok(seat)
    }

    /// Unknown events are reported as denied so their existence does not leak.
    pub async fn event(&self, actor: UserId, event_id: EventId) -> Result<()> {
        match self.directory.event_owner(event_id).await? {
            Some(owner) if owner == actor => Ok(()),
            _ => {
                tracing::warn!("user {} denied access to event {}", actor, event_id);
                Err(SeatingError::EventAccessDenied(event_id))
            }
        }
    }
}
