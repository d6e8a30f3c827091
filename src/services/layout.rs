//! Venue, room and seat management.

use std::sync::Arc;

use tracing::{info, warn};
use validator::Validate;

use super::access::Authorizer;
use super::grid::{generate_grid, GridSpec, MAX_GRID_SEATS};
use crate::error::{Result, SeatingError};
use crate::models::{
    CreateRoom, CreateSeat, CreateVenue, NewSeat, Room, RoomId, RoomOccupancy, RoomPatch, Seat,
    SeatId, SeatPatch, SeatStatus, UserId, Venue, VenueId, VenuePatch,
};
use crate::store::SeatingStore;

#[derive(Clone)]
pub struct LayoutService {
    store: Arc<dyn SeatingStore>,
    auth: Authorizer,
}

impl LayoutService {
    pub fn new(store: Arc<dyn SeatingStore>, auth: Authorizer) -> Self {
        Self { store, auth }
    }

    /* ---------- VENUES ---------- */

    pub async fn create_venue(&self, actor: UserId, venue: CreateVenue) -> Result<Venue> {
        let venue = self.store.insert_venue(actor, &venue).await?;
        info!("venue {} '{}' created by user {}", venue.id, venue.name, actor);
        Ok(venue)
    }

    pub async fn get_venue(&self, actor: UserId, venue_id: VenueId) -> Result<Venue> {
        self.auth.readable_venue(actor, venue_id).await
    }

    pub async fn list_owned_venues(&self, actor: UserId) -> Result<Vec<Venue>> {
        self.store.venues_by_owner(actor).await
    }

    pub async fn list_public_venues(&self) -> Result<Vec<Venue>> {
        self.store.public_venues().await
    }

    pub async fn update_venue(
        &self,
        actor: UserId,
        venue_id: VenueId,
        patch: VenuePatch,
    ) -> Result<Venue> {
        self.auth.venue(actor, venue_id).await?;
        self.store.update_venue(venue_id, &patch).await
    }

    /// Not cascading: every room must be deleted first.
    pub async fn delete_venue(&self, actor: UserId, venue_id: VenueId) -> Result<()> {
        self.auth.venue(actor, venue_id).await?;
        if self.store.count_rooms(venue_id).await? > 0 {
            return Err(SeatingError::HasChildren("venue"));
        }
        self.store.delete_venue(venue_id).await?;
        info!("venue {} deleted by user {}", venue_id, actor);
        Ok(())
    }

    /* ---------- ROOMS ---------- */

    pub async fn create_room(
        &self,
        actor: UserId,
        venue_id: VenueId,
        room: CreateRoom,
    ) -> Result<Room> {
        self.auth.venue(actor, venue_id).await?;
        if self.store.room_name_taken(venue_id, &room.name, None).await? {
            return Err(SeatingError::NameConflict {
                venue_id,
                name: room.name,
            });
        }
        let room = self.store.insert_room(venue_id, &room).await?;
        info!("room {} '{}' created in venue {}", room.id, room.name, venue_id);
        Ok(room)
    }

    pub async fn get_room(&self, actor: UserId, room_id: RoomId) -> Result<Room> {
        self.auth.room(actor, room_id).await
    }

    pub async fn list_rooms(&self, actor: UserId, venue_id: VenueId) -> Result<Vec<Room>> {
        self.auth.readable_venue(actor, venue_id).await?;
        self.store.rooms_in_venue(venue_id).await
    }

    pub async fn update_room(&self, actor: UserId, room_id: RoomId, patch: RoomPatch) -> Result<Room> {
        let room = self.auth.room(actor, room_id).await?;
        if let Some(name) = patch.name.as_deref().filter(|n| *n != room.name) {
            if self.store.room_name_taken(room.venue_id, name, Some(room_id)).await? {
                return Err(SeatingError::NameConflict {
                    venue_id: room.venue_id,
                    name: name.to_string(),
                });
            }
        }
        self.store.update_room(room_id, &patch).await
    }

    /// Not cascading: every seat must be deleted first.
    pub async fn delete_room(&self, actor: UserId, room_id: RoomId) -> Result<()> {
        self.auth.room(actor, room_id).await?;
        if self.store.count_seats(room_id).await? > 0 {
            return Err(SeatingError::HasChildren("room"));
        }
        self.store.delete_room(room_id).await?;
        info!("room {} deleted by user {}", room_id, actor);
        Ok(())
    }

    /* ---------- SEATS ---------- */

    pub async fn create_seat(&self, actor: UserId, room_id: RoomId, seat: CreateSeat) -> Result<Seat> {
        self.auth.room(actor, room_id).await?;
        if let Some(event_id) = seat.event_id {
            self.auth.event(actor, event_id).await?;
        }
        if seat.status == Some(SeatStatus::Occupied) {
            return Err(SeatingError::StatusTransition {
                from: SeatStatus::Available,
                to: SeatStatus::Occupied,
            });
        }

        let seat = seat.into_new_seat(room_id);
        self.ensure_free_coordinates(room_id, std::slice::from_ref(&seat)).await?;

        let mut created = self.store.insert_seats(std::slice::from_ref(&seat)).await?;
        created
            .pop()
            .ok_or_else(|| SeatingError::Validation("seat was not created".to_string()))
    }

    /// Generates and commits a whole grid; nothing is written if any seat clashes.
    pub async fn create_seat_grid(
        &self,
        actor: UserId,
        room_id: RoomId,
        spec: GridSpec,
    ) -> Result<Vec<Seat>> {
        spec.validate()?;
        if spec.seat_count() > MAX_GRID_SEATS {
            return Err(SeatingError::Validation(format!(
                "grid of {} seats exceeds the limit of {}",
                spec.seat_count(),
                MAX_GRID_SEATS
            )));
        }
        self.auth.room(actor, room_id).await?;
        if let Some(event_id) = spec.event_id {
            self.auth.event(actor, event_id).await?;
        }

        let batch = generate_grid(room_id, &spec);
        if batch.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_free_coordinates(room_id, &batch).await?;
        let seats = self.store.insert_seats(&batch).await?;
        info!(
            "grid {}{}..{}{} ({} seats) created in room {}",
            spec.start_row,
            spec.start_number,
            spec.end_row,
            spec.end_number,
            seats.len(),
            room_id
        );
        Ok(seats)
    }

    pub async fn get_seat(&self, actor: UserId, seat_id: SeatId) -> Result<Seat> {
        self.auth.seat(actor, seat_id).await
    }

    pub async fn list_seats(
        &self,
        actor: UserId,
        room_id: RoomId,
        status: Option<SeatStatus>,
    ) -> Result<Vec<Seat>> {
        self.auth.room(actor, room_id).await?;
        self.store.seats_in_room(room_id, status).await
    }

    pub async fn update_seat(&self, actor: UserId, seat_id: SeatId, patch: SeatPatch) -> Result<Seat> {
        let seat = self.auth.seat(actor, seat_id).await?;

        // occupancy only changes through the assignment engine
        if let Some(status) = patch.status {
            if status != seat.status
                && (seat.is_occupied() || status == SeatStatus::Occupied)
            {
                return Err(SeatingError::StatusTransition {
                    from: seat.status,
                    to: status,
                });
            }
        }

        if patch.moves_coordinate(&seat) {
            let row = patch.row.clone().unwrap_or_else(|| seat.row.clone());
            let number = patch.number.clone().unwrap_or_else(|| seat.number.clone());
            let taken = self
                .store
                .existing_coordinates(seat.room_id, &[(row.clone(), number.clone())])
                .await?;
            if !taken.is_empty() {
                warn!("seat {} cannot move to {}{}: taken", seat_id, row, number);
                return Err(SeatingError::SeatConflict {
                    room_id: seat.room_id,
                    row,
                    number,
                });
            }
        }

        self.store.update_seat(seat_id, &patch).await
    }

    pub async fn delete_seat(&self, actor: UserId, seat_id: SeatId) -> Result<Seat> {
        let seat = self.auth.seat(actor, seat_id).await?;
        if seat.is_occupied() {
            return Err(SeatingError::SeatInUse { seat_id });
        }
        self.store.delete_seat(seat_id).await?;
        Ok(seat)
    }

    pub async fn room_occupancy(&self, actor: UserId, room_id: RoomId) -> Result<RoomOccupancy> {
        self.auth.room(actor, room_id).await?;
        self.store.room_occupancy(room_id).await
    }

    async fn ensure_free_coordinates(&self, room_id: RoomId, seats: &[NewSeat]) -> Result<()> {
        let coordinates: Vec<(String, String)> = seats
            .iter()
            .map(|s| (s.row.clone(), s.number.clone()))
            .collect();
        let taken = self.store.existing_coordinates(room_id, &coordinates).await?;
        if let Some((row, number)) = taken.into_iter().next() {
            warn!("seat {}{} already exists in room {}", row, number, room_id);
            return Err(SeatingError::SeatConflict { room_id, row, number });
        }
        Ok(())
    }
}
