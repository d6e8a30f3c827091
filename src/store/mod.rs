//! Persistence seam of the seating engine.
//!
//! `SeatingStore` owns venues, rooms, seats and assignments. Every method that
//! touches more than one row is a single transaction in the backend. Backends
//! enforce the uniqueness rules themselves (unique indexes in Postgres, one
//! lock in memory) in addition to the checks in `services`.
//!
//! `EventDirectory` is the collaborator that knows who owns an event and which
//! guests belong to it.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::{
    AssignmentDetail, AssignmentId, CreateRoom, CreateVenue, EventId, GuestId, NewAssignment,
    NewSeat, Room, RoomId, RoomOccupancy, RoomPatch, Seat, SeatId, SeatPatch, SeatStatus,
    SeatingAssignment, UserId, Venue, VenueId, VenuePatch,
};

pub use memory::MemoryStore;
pub use postgres::{PgEventDirectory, PgSeatingStore};

#[async_trait]
pub trait SeatingStore: Send + Sync {
    // --- venues ---
    async fn insert_venue(&self, owner_id: UserId, venue: &CreateVenue) -> Result<Venue>;
    async fn find_venue(&self, id: VenueId) -> Result<Option<Venue>>;
    async fn venues_by_owner(&self, owner_id: UserId) -> Result<Vec<Venue>>;
    async fn public_venues(&self) -> Result<Vec<Venue>>;
    async fn update_venue(&self, id: VenueId, patch: &VenuePatch) -> Result<Venue>;
    /// Fails with `HasChildren` while any room references the venue.
    async fn delete_venue(&self, id: VenueId) -> Result<()>;

    // --- rooms ---
    async fn insert_room(&self, venue_id: VenueId, room: &CreateRoom) -> Result<Room>;
    async fn find_room(&self, id: RoomId) -> Result<Option<Room>>;
    async fn rooms_in_venue(&self, venue_id: VenueId) -> Result<Vec<Room>>;
    async fn room_name_taken(
        &self,
        venue_id: VenueId,
        name: &str,
        except: Option<RoomId>,
    ) -> Result<bool>;
    async fn count_rooms(&self, venue_id: VenueId) -> Result<i64>;
    async fn update_room(&self, id: RoomId, patch: &RoomPatch) -> Result<Room>;
    /// Fails with `HasChildren` while any seat references the room.
    async fn delete_room(&self, id: RoomId) -> Result<()>;

    // --- seats ---
    /// All-or-nothing: either every seat is created or none is.
    async fn insert_seats(&self, seats: &[NewSeat]) -> Result<Vec<Seat>>;
    async fn find_seat(&self, id: SeatId) -> Result<Option<Seat>>;
    async fn seats_in_room(&self, room_id: RoomId, status: Option<SeatStatus>) -> Result<Vec<Seat>>;
    /// Returns the subset of `(row, number)` pairs already present in the room.
    async fn existing_coordinates(
        &self,
        room_id: RoomId,
        coordinates: &[(String, String)],
    ) -> Result<Vec<(String, String)>>;
    async fn count_seats(&self, room_id: RoomId) -> Result<i64>;
    async fn room_occupancy(&self, room_id: RoomId) -> Result<RoomOccupancy>;
    async fn update_seat(&self, id: SeatId, patch: &SeatPatch) -> Result<Seat>;
    /// Fails with `SeatInUse` while the seat has an occupant.
    async fn delete_seat(&self, id: SeatId) -> Result<()>;

    // --- assignments ---
    async fn find_assignment(&self, id: AssignmentId) -> Result<Option<SeatingAssignment>>;
    async fn assignment_for_seat(
        &self,
        event_id: EventId,
        seat_id: SeatId,
    ) -> Result<Option<SeatingAssignment>>;
    async fn assignment_for_guest(
        &self,
        event_id: EventId,
        guest_id: GuestId,
    ) -> Result<Option<SeatingAssignment>>;
    /// Ordered by assignment id.
    async fn assignments_for_event(&self, event_id: EventId) -> Result<Vec<AssignmentDetail>>;
    /// Inserts the assignment and marks the seat occupied in one transaction.
    async fn create_assignment(&self, assignment: &NewAssignment) -> Result<SeatingAssignment>;
    /// Deletes the assignment and releases its seat in one transaction.
    async fn delete_assignment(&self, id: AssignmentId) -> Result<SeatingAssignment>;
    /// Re-points the assignment (releasing the old seat, occupying the new one)
    /// and/or replaces its notes, in one transaction.
    async fn move_assignment(
        &self,
        id: AssignmentId,
        new_seat_id: Option<SeatId>,
        notes: Option<&str>,
    ) -> Result<SeatingAssignment>;
}

#[async_trait]
pub trait EventDirectory: Send + Sync {
    /// `None` when the event does not exist.
    async fn event_owner(&self, event_id: EventId) -> Result<Option<UserId>>;
    async fn guest_in_event(&self, guest_id: GuestId, event_id: EventId) -> Result<bool>;
}
