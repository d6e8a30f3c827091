use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::{debug, info};

use super::{EventDirectory, SeatingStore};
use crate::error::{Result, SeatingError};
use crate::models::{
    AssignmentDetail, AssignmentId, CreateRoom, CreateVenue, EventId, GuestId, NewAssignment,
    NewSeat, Room, RoomId, RoomOccupancy, RoomPatch, Seat, SeatId, SeatPatch, SeatStatus,
    SeatingAssignment, UserId, Venue, VenueId, VenuePatch,
};

// Postgres caps a statement at 65535 bind parameters; a seat row binds 12.
const SEAT_INSERT_CHUNK: usize = 2000;

/* ---------- constraint mapping ---------- */

fn violated_constraint(err: &sqlx::Error) -> Option<&str> {
    match err {
        sqlx::Error::Database(db) => db.constraint(),
        _ => None,
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.is_foreign_key_violation(),
        _ => false,
    }
}

#[derive(Clone)]
pub struct PgSeatingStore {
    pool: PgPool,
}

impl PgSeatingStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn first_conflict(&self, seats: &[NewSeat]) -> SeatingError {
        let Some(first) = seats.first() else {
            return SeatingError::Validation("empty seat batch".to_string());
        };
        let coordinates: Vec<(String, String)> = seats
            .iter()
            .map(|s| (s.row.clone(), s.number.clone()))
            .collect();
        let clash = self
            .existing_coordinates(first.room_id, &coordinates)
            .await
            .ok()
            .and_then(|found| found.into_iter().next());
        let (row, number) = clash.unwrap_or_else(|| (first.row.clone(), first.number.clone()));
        SeatingError::SeatConflict {
            room_id: first.room_id,
            row,
            number,
        }
    }
}

#[async_trait]
impl SeatingStore for PgSeatingStore {
    /* ---------- VENUES ---------- */

    async fn insert_venue(&self, owner_id: UserId, venue: &CreateVenue) -> Result<Venue> {
        let venue = sqlx::query_as::<_, Venue>(
            r#"
            INSERT INTO venues (name, address, city, state, postal_code, country, description, owner_id, is_public)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.address)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.postal_code)
        .bind(&venue.country)
        .bind(&venue.description)
        .bind(owner_id)
        .bind(venue.is_public)
        .fetch_one(&self.pool)
        .await?;
        Ok(venue)
    }

    async fn find_venue(&self, id: VenueId) -> Result<Option<Venue>> {
        let venue = sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(venue)
    }

    async fn venues_by_owner(&self, owner_id: UserId) -> Result<Vec<Venue>> {
        let venues = sqlx::query_as::<_, Venue>(
            "SELECT * FROM venues WHERE owner_id = $1 ORDER BY name, id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(venues)
    }

    async fn public_venues(&self) -> Result<Vec<Venue>> {
        let venues = sqlx::query_as::<_, Venue>(
            "SELECT * FROM venues WHERE is_public ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(venues)
    }

    async fn update_venue(&self, id: VenueId, patch: &VenuePatch) -> Result<Venue> {
        sqlx::query_as::<_, Venue>(
            r#"
            UPDATE venues
            SET name = COALESCE($2, name),
                address = COALESCE($3, address),
                city = COALESCE($4, city),
                state = COALESCE($5, state),
                postal_code = COALESCE($6, postal_code),
                country = COALESCE($7, country),
                description = COALESCE($8, description),
                is_public = COALESCE($9, is_public),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(&patch.address)
        .bind(&patch.city)
        .bind(&patch.state)
        .bind(&patch.postal_code)
        .bind(&patch.country)
        .bind(&patch.description)
        .bind(patch.is_public)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(SeatingError::VenueNotFound(id))
    }

    async fn delete_venue(&self, id: VenueId) -> Result<()> {
        let result = sqlx::query("DELETE FROM venues WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    SeatingError::HasChildren("venue")
                } else {
                    e.into()
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(SeatingError::VenueNotFound(id));
        }
        Ok(())
    }

    /* ---------- ROOMS ---------- */

    async fn insert_room(&self, venue_id: VenueId, room: &CreateRoom) -> Result<Room> {
        sqlx::query_as::<_, Room>(
            r#"
            INSERT INTO rooms (venue_id, name, capacity, floor, room_type, description)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(venue_id)
        .bind(&room.name)
        .bind(room.capacity)
        .bind(room.floor)
        .bind(room.room_type)
        .bind(&room.description)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("rooms_venue_name_key") => SeatingError::NameConflict {
                venue_id,
                name: room.name.clone(),
            },
            _ if is_foreign_key_violation(&e) => SeatingError::VenueNotFound(venue_id),
            _ => e.into(),
        })
    }

    async fn find_room(&self, id: RoomId) -> Result<Option<Room>> {
        let room = sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(room)
    }

    async fn rooms_in_venue(&self, venue_id: VenueId) -> Result<Vec<Room>> {
        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE venue_id = $1 ORDER BY name, id",
        )
        .bind(venue_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rooms)
    }

    async fn room_name_taken(
        &self,
        venue_id: VenueId,
        name: &str,
        except: Option<RoomId>,
    ) -> Result<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS(
              SELECT 1 FROM rooms
              WHERE venue_id = $1 AND name = $2 AND ($3::BIGINT IS NULL OR id <> $3)
            )
            "#,
        )
        .bind(venue_id)
        .bind(name)
        .bind(except)
        .fetch_one(&self.pool)
        .await?;
        Ok(taken)
    }

    async fn count_rooms(&self, venue_id: VenueId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM rooms WHERE venue_id = $1")
            .bind(venue_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn update_room(&self, id: RoomId, patch: &RoomPatch) -> Result<Room> {
        let venue_id = self
            .find_room(id)
            .await?
            .ok_or(SeatingError::RoomNotFound(id))?
            .venue_id;

        sqlx::query_as::<_, Room>(
            r#"
            UPDATE rooms
            SET name = COALESCE($2, name),
                capacity = COALESCE($3, capacity),
                floor = COALESCE($4, floor),
                room_type = COALESCE($5, room_type),
                description = COALESCE($6, description),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.name)
        .bind(patch.capacity)
        .bind(patch.floor)
        .bind(patch.room_type)
        .bind(&patch.description)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("rooms_venue_name_key") => SeatingError::NameConflict {
                venue_id,
                name: patch.name.clone().unwrap_or_default(),
            },
            _ => e.into(),
        })?
        .ok_or(SeatingError::RoomNotFound(id))
    }

    async fn delete_room(&self, id: RoomId) -> Result<()> {
        let result = sqlx::query("DELETE FROM rooms WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    SeatingError::HasChildren("room")
                } else {
                    e.into()
                }
            })?;
        if result.rows_affected() == 0 {
            return Err(SeatingError::RoomNotFound(id));
        }
        Ok(())
    }

    /* ---------- SEATS ---------- */

    async fn insert_seats(&self, seats: &[NewSeat]) -> Result<Vec<Seat>> {
        if seats.is_empty() {
            return Ok(Vec::new());
        }

        let mut tx = self.pool.begin().await?;
        let mut created = Vec::with_capacity(seats.len());

        for chunk in seats.chunks(SEAT_INSERT_CHUNK) {
            let mut qb = QueryBuilder::<Postgres>::new(
                "INSERT INTO seats (room_id, event_id, row, seat_column, number, category, status, x, y, width, height, rotation) ",
            );
            qb.push_values(chunk, |mut b, seat| {
                b.push_bind(seat.room_id)
                    .push_bind(seat.event_id)
                    .push_bind(&seat.row)
                    .push_bind(&seat.column)
                    .push_bind(&seat.number)
                    .push_bind(seat.category)
                    .push_bind(seat.status)
                    .push_bind(seat.x)
                    .push_bind(seat.y)
                    .push_bind(seat.width)
                    .push_bind(seat.height)
                    .push_bind(seat.rotation);
            });
            qb.push(" RETURNING *");

            match qb.build_query_as::<Seat>().fetch_all(&mut *tx).await {
                Ok(rows) => created.extend(rows),
                Err(e) if violated_constraint(&e) == Some("seats_room_row_number_key") => {
                    // roll back before looking up which coordinate collided
                    tx.rollback().await?;
                    return Err(self.first_conflict(seats).await);
                }
                Err(e) if is_foreign_key_violation(&e) => {
                    tx.rollback().await?;
                    return Err(SeatingError::RoomNotFound(seats[0].room_id));
                }
                Err(e) => return Err(e.into()),
            }
        }

        tx.commit().await?;
        debug!("inserted {} seats into room {}", created.len(), seats[0].room_id);
        Ok(created)
    }

    async fn find_seat(&self, id: SeatId) -> Result<Option<Seat>> {
        let seat = sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(seat)
    }

    async fn seats_in_room(&self, room_id: RoomId, status: Option<SeatStatus>) -> Result<Vec<Seat>> {
        let seats = sqlx::query_as::<_, Seat>(
            r#"
            SELECT * FROM seats
            WHERE room_id = $1 AND ($2::seat_status IS NULL OR status = $2)
            ORDER BY row, number, id
            "#,
        )
        .bind(room_id)
        .bind(status)
        .fetch_all(&self.pool)
        .await?;
        Ok(seats)
    }

    async fn existing_coordinates(
        &self,
        room_id: RoomId,
        coordinates: &[(String, String)],
    ) -> Result<Vec<(String, String)>> {
        if coordinates.is_empty() {
            return Ok(Vec::new());
        }
        let (rows, numbers): (Vec<String>, Vec<String>) = coordinates.iter().cloned().unzip();
        let found = sqlx::query_as::<_, (String, String)>(
            r#"
            SELECT row, number FROM seats
            WHERE room_id = $1
              AND (row, number) IN (SELECT * FROM UNNEST($2::TEXT[], $3::TEXT[]))
            ORDER BY row, number
            "#,
        )
        .bind(room_id)
        .bind(rows)
        .bind(numbers)
        .fetch_all(&self.pool)
        .await?;
        Ok(found)
    }

    async fn count_seats(&self, room_id: RoomId) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM seats WHERE room_id = $1")
            .bind(room_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    async fn room_occupancy(&self, room_id: RoomId) -> Result<RoomOccupancy> {
        let (total, available, occupied, reserved, blocked, maintenance) =
            sqlx::query_as::<_, (i64, i64, i64, i64, i64, i64)>(
                r#"
                SELECT
                    COUNT(*),
                    COUNT(*) FILTER (WHERE status = 'available'),
                    COUNT(*) FILTER (WHERE status = 'occupied'),
                    COUNT(*) FILTER (WHERE status = 'reserved'),
                    COUNT(*) FILTER (WHERE status = 'blocked'),
                    COUNT(*) FILTER (WHERE status = 'maintenance')
                FROM seats
                WHERE room_id = $1
                "#,
            )
            .bind(room_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(RoomOccupancy {
            room_id,
            total,
            available,
            occupied,
            reserved,
            blocked,
            maintenance,
        })
    }

    async fn update_seat(&self, id: SeatId, patch: &SeatPatch) -> Result<Seat> {
        let mut tx = self.pool.begin().await?;

        let current = sqlx::query_as::<_, Seat>("SELECT * FROM seats WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(SeatingError::SeatNotFound(id))?;

        let updated = sqlx::query_as::<_, Seat>(
            r#"
            UPDATE seats
            SET row = COALESCE($2, row),
                seat_column = COALESCE($3, seat_column),
                number = COALESCE($4, number),
                category = COALESCE($5, category),
                status = COALESCE($6, status),
                x = COALESCE($7, x),
                y = COALESCE($8, y),
                width = COALESCE($9, width),
                height = COALESCE($10, height),
                rotation = COALESCE($11, rotation),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&patch.row)
        .bind(&patch.column)
        .bind(&patch.number)
        .bind(patch.category)
        .bind(patch.status)
        .bind(patch.x)
        .bind(patch.y)
        .bind(patch.width)
        .bind(patch.height)
        .bind(patch.rotation)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("seats_room_row_number_key") => SeatingError::SeatConflict {
                room_id: current.room_id,
                row: patch.row.clone().unwrap_or_else(|| current.row.clone()),
                number: patch.number.clone().unwrap_or_else(|| current.number.clone()),
            },
            Some("seats_occupancy_check") => SeatingError::StatusTransition {
                from: current.status,
                to: patch.status.unwrap_or(current.status),
            },
            _ => e.into(),
        })?;

        tx.commit().await?;
        Ok(updated)
    }

    async fn delete_seat(&self, id: SeatId) -> Result<()> {
        let result = sqlx::query("DELETE FROM seats WHERE id = $1 AND guest_id IS NULL")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if is_foreign_key_violation(&e) {
                    SeatingError::SeatInUse { seat_id: id }
                } else {
                    e.into()
                }
            })?;

        if result.rows_affected() == 0 {
            return match self.find_seat(id).await? {
                Some(_) => Err(SeatingError::SeatInUse { seat_id: id }),
                None => Err(SeatingError::SeatNotFound(id)),
            };
        }
        Ok(())
    }

    /* ---------- ASSIGNMENTS ---------- */

    async fn find_assignment(&self, id: AssignmentId) -> Result<Option<SeatingAssignment>> {
        let assignment = sqlx::query_as::<_, SeatingAssignment>(
            "SELECT * FROM seating_assignments WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assignment)
    }

    async fn assignment_for_seat(
        &self,
        event_id: EventId,
        seat_id: SeatId,
    ) -> Result<Option<SeatingAssignment>> {
        let assignment = sqlx::query_as::<_, SeatingAssignment>(
            "SELECT * FROM seating_assignments WHERE event_id = $1 AND seat_id = $2",
        )
        .bind(event_id)
        .bind(seat_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assignment)
    }

    async fn assignment_for_guest(
        &self,
        event_id: EventId,
        guest_id: GuestId,
    ) -> Result<Option<SeatingAssignment>> {
        let assignment = sqlx::query_as::<_, SeatingAssignment>(
            "SELECT * FROM seating_assignments WHERE event_id = $1 AND guest_id = $2",
        )
        .bind(event_id)
        .bind(guest_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(assignment)
    }

    async fn assignments_for_event(&self, event_id: EventId) -> Result<Vec<AssignmentDetail>> {
        let rows = sqlx::query_as::<_, AssignmentDetail>(
            r#"
            SELECT a.id, a.event_id, a.guest_id, a.seat_id, a.assigned_by, a.assigned_at, a.notes,
                   s.row AS seat_row, s.number AS seat_number,
                   r.id AS room_id, r.name AS room_name,
                   v.id AS venue_id, v.name AS venue_name
            FROM seating_assignments a
            JOIN seats s ON s.id = a.seat_id
            JOIN rooms r ON r.id = s.room_id
            JOIN venues v ON v.id = r.venue_id
            WHERE a.event_id = $1
            ORDER BY a.id
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    async fn create_assignment(&self, new: &NewAssignment) -> Result<SeatingAssignment> {
        let mut tx = self.pool.begin().await?;

        // 1) lock the seat row so concurrent assigners serialize on it
        let occupant = sqlx::query_scalar::<_, Option<GuestId>>(
            "SELECT guest_id FROM seats WHERE id = $1 FOR UPDATE",
        )
        .bind(new.seat_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(SeatingError::SeatNotFound(new.seat_id))?;

        if occupant.is_some() {
            return Err(SeatingError::SeatOccupied { seat_id: new.seat_id });
        }

        // 2) the assignment row; unique indexes back up the engine's existence checks
        let assignment = sqlx::query_as::<_, SeatingAssignment>(
            r#"
            INSERT INTO seating_assignments (event_id, guest_id, seat_id, assigned_by, notes)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new.event_id)
        .bind(new.guest_id)
        .bind(new.seat_id)
        .bind(new.assigned_by)
        .bind(&new.notes)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match violated_constraint(&e) {
            Some("seating_assignments_event_seat_key") => {
                SeatingError::SeatOccupied { seat_id: new.seat_id }
            }
            Some("seating_assignments_event_guest_key") => SeatingError::GuestAlreadyAssigned {
                event_id: new.event_id,
                guest_id: new.guest_id,
            },
            _ => e.into(),
        })?;

        // 3) the seat projection
        sqlx::query(
            "UPDATE seats SET status = 'occupied', guest_id = $1, updated_at = NOW() WHERE id = $2",
        )
        .bind(new.guest_id)
        .bind(new.seat_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(
            "guest {} seated at seat {} for event {}",
            new.guest_id, new.seat_id, new.event_id
        );
        Ok(assignment)
    }

    async fn delete_assignment(&self, id: AssignmentId) -> Result<SeatingAssignment> {
        let mut tx = self.pool.begin().await?;

        let assignment = sqlx::query_as::<_, SeatingAssignment>(
            "DELETE FROM seating_assignments WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(SeatingError::AssignmentNotFound)?;

        sqlx::query(
            r#"
            UPDATE seats
            SET status = 'available', guest_id = NULL, updated_at = NOW()
            WHERE id = $1 AND guest_id = $2
            "#,
        )
        .bind(assignment.seat_id)
        .bind(assignment.guest_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        info!(
            "seat {} released from guest {} for event {}",
            assignment.seat_id, assignment.guest_id, assignment.event_id
        );
        Ok(assignment)
    }

    async fn move_assignment(
        &self,
        id: AssignmentId,
        new_seat_id: Option<SeatId>,
        notes: Option<&str>,
    ) -> Result<SeatingAssignment> {
        let mut tx = self.pool.begin().await?;

        let mut assignment = sqlx::query_as::<_, SeatingAssignment>(
            "SELECT * FROM seating_assignments WHERE id = $1 FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(SeatingError::AssignmentNotFound)?;

        if let Some(target) = new_seat_id.filter(|s| *s != assignment.seat_id) {
            let occupant = sqlx::query_scalar::<_, Option<GuestId>>(
                "SELECT guest_id FROM seats WHERE id = $1 FOR UPDATE",
            )
            .bind(target)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(SeatingError::SeatNotFound(target))?;

            if occupant.is_some() {
                return Err(SeatingError::SeatOccupied { seat_id: target });
            }

            let previous_seat = assignment.seat_id;
            assignment = sqlx::query_as::<_, SeatingAssignment>(
                "UPDATE seating_assignments SET seat_id = $2 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(target)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| match violated_constraint(&e) {
                Some("seating_assignments_event_seat_key") => {
                    SeatingError::SeatOccupied { seat_id: target }
                }
                _ => e.into(),
            })?;

            sqlx::query(
                r#"
                UPDATE seats
                SET status = 'available', guest_id = NULL, updated_at = NOW()
                WHERE id = $1 AND guest_id = $2
                "#,
            )
            .bind(previous_seat)
            .bind(assignment.guest_id)
            .execute(&mut *tx)
            .await?;

            sqlx::query(
                "UPDATE seats SET status = 'occupied', guest_id = $1, updated_at = NOW() WHERE id = $2",
            )
            .bind(assignment.guest_id)
            .bind(target)
            .execute(&mut *tx)
            .await?;

            info!(
                "guest {} moved from seat {} to seat {} for event {}",
                assignment.guest_id, previous_seat, target, assignment.event_id
            );
        }

        if let Some(notes) = notes {
            assignment = sqlx::query_as::<_, SeatingAssignment>(
                "UPDATE seating_assignments SET notes = $2 WHERE id = $1 RETURNING *",
            )
            .bind(id)
            .bind(notes)
            .fetch_one(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(assignment)
    }
}

/// Reads ownership and guest membership from the collaborator-owned tables.
#[derive(Clone)]
pub struct PgEventDirectory {
    pool: PgPool,
}

impl PgEventDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventDirectory for PgEventDirectory {
    async fn event_owner(&self, event_id: EventId) -> Result<Option<UserId>> {
        let owner = sqlx::query_scalar::<_, UserId>("SELECT owner_id FROM events WHERE id = $1")
            .bind(event_id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    async fn guest_in_event(&self, guest_id: GuestId, event_id: EventId) -> Result<bool> {
        let member = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM guests WHERE id = $1 AND event_id = $2)",
        )
        .bind(guest_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(member)
    }
}
