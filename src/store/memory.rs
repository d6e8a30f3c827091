//! In-process backend with the same constraint semantics as Postgres.
//!
//! Each trait call takes the single lock for its whole duration, so a
//! multi-row write is applied completely or not at all.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Utc;

use super::{EventDirectory, SeatingStore};
use crate::error::{Result, SeatingError};
use crate::models::{
    AssignmentDetail, AssignmentId, CreateRoom, CreateVenue, Event, EventId, Guest, GuestId,
    NewAssignment, NewSeat, Room, RoomId, RoomOccupancy, RoomPatch, Seat, SeatId, SeatPatch,
    SeatStatus, SeatingAssignment, UserId, Venue, VenueId, VenuePatch,
};

#[derive(Default)]
struct Inner {
    next_id: i64,
    events: BTreeMap<EventId, Event>,
    guests: BTreeMap<GuestId, Guest>,
    venues: BTreeMap<VenueId, Venue>,
    rooms: BTreeMap<RoomId, Room>,
    seats: BTreeMap<SeatId, Seat>,
    assignments: BTreeMap<AssignmentId, SeatingAssignment>,
}

impl Inner {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn coordinate_taken(&self, room_id: RoomId, row: &str, number: &str, except: Option<SeatId>) -> bool {
        self.seats.values().any(|s| {
            s.room_id == room_id && s.row == row && s.number == number && Some(s.id) != except
        })
    }

    fn seat_mut(&mut self, id: SeatId) -> Result<&mut Seat> {
        self.seats.get_mut(&id).ok_or(SeatingError::SeatNotFound(id))
    }

    fn occupy(&mut self, seat_id: SeatId, guest_id: GuestId) -> Result<()> {
        let seat = self.seat_mut(seat_id)?;
        seat.status = SeatStatus::Occupied;
        seat.guest_id = Some(guest_id);
        seat.updated_at = Utc::now();
        Ok(())
    }

    fn release(&mut self, seat_id: SeatId, guest_id: GuestId) {
        if let Some(seat) = self.seats.get_mut(&seat_id) {
            if seat.guest_id == Some(guest_id) {
                seat.status = SeatStatus::Available;
                seat.guest_id = None;
                seat.updated_at = Utc::now();
            }
        }
    }
}

/// Backend used by tests and embedded setups; also acts as its own `EventDirectory`.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Registers an event owned by `owner_id`.
    pub fn add_event(&self, owner_id: UserId, title: &str) -> EventId {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.events.insert(
            id,
            Event {
                id,
                title: title.to_string(),
                owner_id,
            },
        );
        id
    }

    pub fn add_guest(&self, event_id: EventId, name: &str) -> GuestId {
        let mut inner = self.lock();
        let id = inner.next_id();
        inner.guests.insert(
            id,
            Guest {
                id,
                event_id,
                name: name.to_string(),
            },
        );
        id
    }

    pub fn assignment_count(&self) -> usize {
        self.lock().assignments.len()
    }
}

#[async_trait]
impl SeatingStore for MemoryStore {
    async fn insert_venue(&self, owner_id: UserId, venue: &CreateVenue) -> Result<Venue> {
        let mut inner = self.lock();
        let id = inner.next_id();
        let now = Utc::now();
        let venue = Venue {
            id,
            name: venue.name.clone(),
            address: venue.address.clone(),
            city: venue.city.clone(),
            state: venue.state.clone(),
            postal_code: venue.postal_code.clone(),
            country: venue.country.clone(),
            description: venue.description.clone(),
            owner_id,
            is_public: venue.is_public,
            created_at: now,
            updated_at: now,
        };
        inner.venues.insert(id, venue.clone());
        Ok(venue)
    }

    async fn find_venue(&self, id: VenueId) -> Result<Option<Venue>> {
        Ok(self.lock().venues.get(&id).cloned())
    }

    async fn venues_by_owner(&self, owner_id: UserId) -> Result<Vec<Venue>> {
        let mut venues: Vec<Venue> = self
            .lock()
            .venues
            .values()
            .filter(|v| v.owner_id == owner_id)
            .cloned()
            .collect();
        venues.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(venues)
    }

    async fn public_venues(&self) -> Result<Vec<Venue>> {
        let mut venues: Vec<Venue> = self
            .lock()
            .venues
            .values()
            .filter(|v| v.is_public)
            .cloned()
            .collect();
        venues.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(venues)
    }

    async fn update_venue(&self, id: VenueId, patch: &VenuePatch) -> Result<Venue> {
        let mut inner = self.lock();
        let venue = inner.venues.get_mut(&id).ok_or(SeatingError::VenueNotFound(id))?;
        venue.apply(patch);
        venue.updated_at = Utc::now();
        Ok(venue.clone())
    }

    async fn delete_venue(&self, id: VenueId) -> Result<()> {
        let mut inner = self.lock();
        if !inner.venues.contains_key(&id) {
            return Err(SeatingError::VenueNotFound(id));
        }
        if inner.rooms.values().any(|r| r.venue_id == id) {
            return Err(SeatingError::HasChildren("venue"));
        }
        inner.venues.remove(&id);
        Ok(())
    }

    async fn insert_room(&self, venue_id: VenueId, room: &CreateRoom) -> Result<Room> {
        let mut inner = self.lock();
        if !inner.venues.contains_key(&venue_id) {
            return Err(SeatingError::VenueNotFound(venue_id));
        }
        if inner
            .rooms
            .values()
            .any(|r| r.venue_id == venue_id && r.name == room.name)
        {
            return Err(SeatingError::NameConflict {
                venue_id,
                name: room.name.clone(),
            });
        }
        let id = inner.next_id();
        let now = Utc::now();
        let room = Room {
            id,
            venue_id,
            name: room.name.clone(),
            capacity: room.capacity,
            floor: room.floor,
            room_type: room.room_type,
            description: room.description.clone(),
            created_at: now,
            updated_at: now,
        };
        inner.rooms.insert(id, room.clone());
        Ok(room)
    }

    async fn find_room(&self, id: RoomId) -> Result<Option<Room>> {
        Ok(self.lock().rooms.get(&id).cloned())
    }

    async fn rooms_in_venue(&self, venue_id: VenueId) -> Result<Vec<Room>> {
        let mut rooms: Vec<Room> = self
            .lock()
            .rooms
            .values()
            .filter(|r| r.venue_id == venue_id)
            .cloned()
            .collect();
        rooms.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(rooms)
    }

    async fn room_name_taken(
        &self,
        venue_id: VenueId,
        name: &str,
        except: Option<RoomId>,
    ) -> Result<bool> {
        Ok(self
            .lock()
            .rooms
            .values()
            .any(|r| r.venue_id == venue_id && r.name == name && Some(r.id) != except))
    }

    async fn count_rooms(&self, venue_id: VenueId) -> Result<i64> {
        Ok(self
            .lock()
            .rooms
            .values()
            .filter(|r| r.venue_id == venue_id)
            .count() as i64)
    }

    async fn update_room(&self, id: RoomId, patch: &RoomPatch) -> Result<Room> {
        let mut inner = self.lock();
        let venue_id = inner
            .rooms
            .get(&id)
            .ok_or(SeatingError::RoomNotFound(id))?
            .venue_id;
        if let Some(name) = &patch.name {
            if inner
                .rooms
                .values()
                .any(|r| r.venue_id == venue_id && &r.name == name && r.id != id)
            {
                return Err(SeatingError::NameConflict {
                    venue_id,
                    name: name.clone(),
                });
            }
        }
        let room = inner.rooms.get_mut(&id).ok_or(SeatingError::RoomNotFound(id))?;
        room.apply(patch);
        room.updated_at = Utc::now();
        Ok(room.clone())
    }

    async fn delete_room(&self, id: RoomId) -> Result<()> {
        let mut inner = self.lock();
        if !inner.rooms.contains_key(&id) {
            return Err(SeatingError::RoomNotFound(id));
        }
        if inner.seats.values().any(|s| s.room_id == id) {
            return Err(SeatingError::HasChildren("room"));
        }
        inner.rooms.remove(&id);
        Ok(())
    }

    async fn insert_seats(&self, seats: &[NewSeat]) -> Result<Vec<Seat>> {
        let mut inner = self.lock();

        // validate the whole batch before writing anything
        for (i, seat) in seats.iter().enumerate() {
            if !inner.rooms.contains_key(&seat.room_id) {
                return Err(SeatingError::RoomNotFound(seat.room_id));
            }
            let duplicate_in_batch = seats[..i].iter().any(|s| {
                s.room_id == seat.room_id && s.row == seat.row && s.number == seat.number
            });
            if duplicate_in_batch || inner.coordinate_taken(seat.room_id, &seat.row, &seat.number, None) {
                return Err(SeatingError::SeatConflict {
                    room_id: seat.room_id,
                    row: seat.row.clone(),
                    number: seat.number.clone(),
                });
            }
            if seat.status == SeatStatus::Occupied {
                return Err(SeatingError::StatusTransition {
                    from: SeatStatus::Available,
                    to: SeatStatus::Occupied,
                });
            }
        }

        let now = Utc::now();
        let mut created = Vec::with_capacity(seats.len());
        for seat in seats {
            let id = inner.next_id();
            let seat = Seat {
                id,
                room_id: seat.room_id,
                event_id: seat.event_id,
                row: seat.row.clone(),
                column: seat.column.clone(),
                number: seat.number.clone(),
                category: seat.category,
                status: seat.status,
                x: seat.x,
                y: seat.y,
                width: seat.width,
                height: seat.height,
                rotation: seat.rotation,
                guest_id: None,
                created_at: now,
                updated_at: now,
            };
            inner.seats.insert(id, seat.clone());
            created.push(seat);
        }
        Ok(created)
    }

    async fn find_seat(&self, id: SeatId) -> Result<Option<Seat>> {
        Ok(self.lock().seats.get(&id).cloned())
    }

    async fn seats_in_room(&self, room_id: RoomId, status: Option<SeatStatus>) -> Result<Vec<Seat>> {
        let mut seats: Vec<Seat> = self
            .lock()
            .seats
            .values()
            .filter(|s| s.room_id == room_id && status.map_or(true, |st| s.status == st))
            .cloned()
            .collect();
        seats.sort_by(|a, b| {
            a.row
                .cmp(&b.row)
                .then_with(|| a.number.cmp(&b.number))
                .then(a.id.cmp(&b.id))
        });
        Ok(seats)
    }

    async fn existing_coordinates(
        &self,
        room_id: RoomId,
        coordinates: &[(String, String)],
    ) -> Result<Vec<(String, String)>> {
        let inner = self.lock();
        let mut found: Vec<(String, String)> = coordinates
            .iter()
            .filter(|(row, number)| inner.coordinate_taken(room_id, row, number, None))
            .cloned()
            .collect();
        found.sort();
        found.dedup();
        Ok(found)
    }

    async fn count_seats(&self, room_id: RoomId) -> Result<i64> {
        Ok(self
            .lock()
            .seats
            .values()
            .filter(|s| s.room_id == room_id)
            .count() as i64)
    }

    async fn room_occupancy(&self, room_id: RoomId) -> Result<RoomOccupancy> {
        let inner = self.lock();
        let mut occupancy = RoomOccupancy {
            room_id,
            ..RoomOccupancy::default()
        };
        for seat in inner.seats.values().filter(|s| s.room_id == room_id) {
            occupancy.total += 1;
            match seat.status {
                SeatStatus::Available => occupancy.available += 1,
                SeatStatus::Occupied => occupancy.occupied += 1,
                SeatStatus::Reserved => occupancy.reserved += 1,
                SeatStatus::Blocked => occupancy.blocked += 1,
                SeatStatus::Maintenance => occupancy.maintenance += 1,
            }
        }
        Ok(occupancy)
    }

    async fn update_seat(&self, id: SeatId, patch: &SeatPatch) -> Result<Seat> {
        let mut inner = self.lock();
        let current = inner.seats.get(&id).cloned().ok_or(SeatingError::SeatNotFound(id))?;

        let row = patch.row.clone().unwrap_or_else(|| current.row.clone());
        let number = patch.number.clone().unwrap_or_else(|| current.number.clone());
        if inner.coordinate_taken(current.room_id, &row, &number, Some(id)) {
            return Err(SeatingError::SeatConflict {
                room_id: current.room_id,
                row,
                number,
            });
        }

        // same rule as the seats_occupancy_check constraint
        let mut updated = current.clone();
        updated.apply(patch);
        if (updated.status == SeatStatus::Occupied) != updated.guest_id.is_some() {
            return Err(SeatingError::StatusTransition {
                from: current.status,
                to: updated.status,
            });
        }

        updated.updated_at = Utc::now();
        inner.seats.insert(id, updated.clone());
        Ok(updated)
    }

    async fn delete_seat(&self, id: SeatId) -> Result<()> {
        let mut inner = self.lock();
        let seat = inner.seats.get(&id).ok_or(SeatingError::SeatNotFound(id))?;
        if seat.is_occupied() || inner.assignments.values().any(|a| a.seat_id == id) {
            return Err(SeatingError::SeatInUse { seat_id: id });
        }
        inner.seats.remove(&id);
        Ok(())
    }

    async fn find_assignment(&self, id: AssignmentId) -> Result<Option<SeatingAssignment>> {
        Ok(self.lock().assignments.get(&id).cloned())
    }

    async fn assignment_for_seat(
        &self,
        event_id: EventId,
        seat_id: SeatId,
    ) -> Result<Option<SeatingAssignment>> {
        Ok(self
            .lock()
            .assignments
            .values()
            .find(|a| a.event_id == event_id && a.seat_id == seat_id)
            .cloned())
    }

    async fn assignment_for_guest(
        &self,
        event_id: EventId,
        guest_id: GuestId,
    ) -> Result<Option<SeatingAssignment>> {
        Ok(self
            .lock()
            .assignments
            .values()
            .find(|a| a.event_id == event_id && a.guest_id == guest_id)
            .cloned())
    }

    async fn assignments_for_event(&self, event_id: EventId) -> Result<Vec<AssignmentDetail>> {
        let inner = self.lock();
        let mut details = Vec::new();
        for a in inner.assignments.values().filter(|a| a.event_id == event_id) {
            let Some(seat) = inner.seats.get(&a.seat_id) else { continue };
            let Some(room) = inner.rooms.get(&seat.room_id) else { continue };
            let Some(venue) = inner.venues.get(&room.venue_id) else { continue };
            details.push(AssignmentDetail {
                id: a.id,
                event_id: a.event_id,
                guest_id: a.guest_id,
                seat_id: a.seat_id,
                assigned_by: a.assigned_by,
                assigned_at: a.assigned_at,
                notes: a.notes.clone(),
                seat_row: seat.row.clone(),
                seat_number: seat.number.clone(),
                room_id: room.id,
                room_name: room.name.clone(),
                venue_id: venue.id,
                venue_name: venue.name.clone(),
            });
        }
        // BTreeMap iteration already yields ascending ids
        Ok(details)
    }

    async fn create_assignment(&self, new: &NewAssignment) -> Result<SeatingAssignment> {
        let mut inner = self.lock();

        let seat = inner
            .seats
            .get(&new.seat_id)
            .ok_or(SeatingError::SeatNotFound(new.seat_id))?;
        if seat.is_occupied()
            || inner
                .assignments
                .values()
                .any(|a| a.event_id == new.event_id && a.seat_id == new.seat_id)
        {
            return Err(SeatingError::SeatOccupied { seat_id: new.seat_id });
        }
        if inner
            .assignments
            .values()
            .any(|a| a.event_id == new.event_id && a.guest_id == new.guest_id)
        {
            return Err(SeatingError::GuestAlreadyAssigned {
                event_id: new.event_id,
                guest_id: new.guest_id,
            });
        }

        let id = inner.next_id();
        let assignment = SeatingAssignment {
            id,
            event_id: new.event_id,
            guest_id: new.guest_id,
            seat_id: new.seat_id,
            assigned_by: new.assigned_by,
            assigned_at: Utc::now(),
            notes: new.notes.clone(),
        };
        inner.occupy(new.seat_id, new.guest_id)?;
        inner.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }

    async fn delete_assignment(&self, id: AssignmentId) -> Result<SeatingAssignment> {
        let mut inner = self.lock();
        let assignment = inner
            .assignments
            .remove(&id)
            .ok_or(SeatingError::AssignmentNotFound)?;
        inner.release(assignment.seat_id, assignment.guest_id);
        Ok(assignment)
    }

    async fn move_assignment(
        &self,
        id: AssignmentId,
        new_seat_id: Option<SeatId>,
        notes: Option<&str>,
    ) -> Result<SeatingAssignment> {
        let mut inner = self.lock();
        let mut assignment = inner
            .assignments
            .get(&id)
            .cloned()
            .ok_or(SeatingError::AssignmentNotFound)?;

        if let Some(target) = new_seat_id.filter(|s| *s != assignment.seat_id) {
            let seat = inner.seats.get(&target).ok_or(SeatingError::SeatNotFound(target))?;
            if seat.is_occupied()
                || inner
                    .assignments
                    .values()
                    .any(|a| a.event_id == assignment.event_id && a.seat_id == target)
            {
                return Err(SeatingError::SeatOccupied { seat_id: target });
            }
            inner.release(assignment.seat_id, assignment.guest_id);
            inner.occupy(target, assignment.guest_id)?;
            assignment.seat_id = target;
        }
        if let Some(notes) = notes {
            assignment.notes = Some(notes.to_string());
        }

        inner.assignments.insert(id, assignment.clone());
        Ok(assignment)
    }
}

#[async_trait]
impl EventDirectory for MemoryStore {
    async fn event_owner(&self, event_id: EventId) -> Result<Option<UserId>> {
        Ok(self.lock().events.get(&event_id).map(|e| e.owner_id))
    }

    async fn guest_in_event(&self, guest_id: GuestId, event_id: EventId) -> Result<bool> {
        Ok(self
            .lock()
            .guests
            .get(&guest_id)
            .is_some_and(|g| g.event_id == event_id))
    }
}
