//! Guest-to-seat assignment for an event.
//!
//! The assignment row is the source of truth; the seat's `status`/`guest_id`
//! pair is a projection the store rewrites in the same transaction. Checks run
//! in a fixed order so each failure surfaces as its own error:
//! event ownership, guest membership, seat existence and venue ownership,
//! seat scope, seat free, guest free.
//!
//! The actor must own both the event and the venue holding the seat. A seat
//! created for a specific event only takes guests of that event.

use std::sync::Arc;

use tracing::{info, warn};

use super::access::Authorizer;
use crate::error::{Result, SeatingError};
use crate::models::{
    AssignmentDetail, AssignmentId, AssignmentPatch, EventId, GuestId, NewAssignment, Seat,
    SeatId, SeatingAssignment, UserId,
};
use crate::store::{EventDirectory, SeatingStore};

fn ensure_seat_in_event(seat: &Seat, event_id: EventId) -> Result<()> {
    match seat.event_id {
        Some(scope) if scope != event_id => {
            warn!("seat {} belongs to event {}, not {}", seat.id, scope, event_id);
            Err(SeatingError::Validation(format!(
                "seat {} is reserved for another event",
                seat.id
            )))
        }
        _ => Ok(()),
    }
}

#[derive(Clone)]
pub struct AssignmentEngine {
    store: Arc<dyn SeatingStore>,
    directory: Arc<dyn EventDirectory>,
    auth: Authorizer,
}

impl AssignmentEngine {
    pub fn new(
        store: Arc<dyn SeatingStore>,
        directory: Arc<dyn EventDirectory>,
        auth: Authorizer,
    ) -> Self {
        Self {
            store,
            directory,
            auth,
        }
    }

    pub async fn assign_guest_to_seat(
        &self,
        event_id: EventId,
        guest_id: GuestId,
        seat_id: SeatId,
        actor: UserId,
        notes: Option<String>,
    ) -> Result<SeatingAssignment> {
        self.auth.event(actor, event_id).await?;

        if !self.directory.guest_in_event(guest_id, event_id).await? {
            return Err(SeatingError::GuestNotFound { event_id, guest_id });
        }

        let seat = self.auth.seat(actor, seat_id).await?;
        ensure_seat_in_event(&seat, event_id)?;

        if self.store.assignment_for_seat(event_id, seat_id).await?.is_some() {
            warn!("seat {} already assigned for event {}", seat_id, event_id);
            return Err(SeatingError::SeatOccupied { seat_id });
        }

        if self.store.assignment_for_guest(event_id, guest_id).await?.is_some() {
            warn!("guest {} already seated for event {}", guest_id, event_id);
            return Err(SeatingError::GuestAlreadyAssigned { event_id, guest_id });
        }

        let assignment = self
            .store
            .create_assignment(&NewAssignment {
                event_id,
                guest_id,
                seat_id,
                assigned_by: actor,
                notes,
            })
            .await?;

        info!(
            "assignment {} created: guest {} -> seat {} (event {})",
            assignment.id, guest_id, seat_id, event_id
        );
        Ok(assignment)
    }

    /// Removes the live assignment on `seat_id` and frees the seat.
    pub async fn unassign_guest_from_seat(
        &self,
        event_id: EventId,
        seat_id: SeatId,
        actor: UserId,
    ) -> Result<SeatingAssignment> {
        self.auth.event(actor, event_id).await?;

        let assignment = self
            .store
            .assignment_for_seat(event_id, seat_id)
            .await?
            .ok_or(SeatingError::AssignmentNotFound)?;

        let removed = self.store.delete_assignment(assignment.id).await?;
        info!(
            "assignment {} removed: seat {} released (event {})",
            removed.id, seat_id, event_id
        );
        Ok(removed)
    }

    /// Moves the guest to another seat and/or edits the notes, atomically.
    pub async fn update_seating_assignment(
        &self,
        event_id: EventId,
        assignment_id: AssignmentId,
        actor: UserId,
        patch: AssignmentPatch,
    ) -> Result<SeatingAssignment> {
        self.auth.event(actor, event_id).await?;

        let assignment = self
            .store
            .find_assignment(assignment_id)
            .await?
            .filter(|a| a.event_id == event_id)
            .ok_or(SeatingError::AssignmentNotFound)?;

        let new_seat = patch.seat_id.filter(|s| *s != assignment.seat_id);
        if let Some(target) = new_seat {
            let seat = self.auth.seat(actor, target).await?;
            ensure_seat_in_event(&seat, event_id)?;
            if self.store.assignment_for_seat(event_id, target).await?.is_some() {
                warn!("seat {} already assigned for event {}", target, event_id);
                return Err(SeatingError::SeatOccupied { seat_id: target });
            }
        }

        let updated = self
            .store
            .move_assignment(assignment_id, new_seat, patch.notes.as_deref())
            .await?;

        if let Some(target) = new_seat {
            info!(
                "assignment {} moved from seat {} to seat {} (event {})",
                assignment_id, assignment.seat_id, target, event_id
            );
        }
        Ok(updated)
    }

    pub async fn list_assignments(
        &self,
        event_id: EventId,
        actor: UserId,
    ) -> Result<Vec<AssignmentDetail>> {
        self.auth.event(actor, event_id).await?;
        self.store.assignments_for_event(event_id).await
    }

    pub async fn guest_assignment(
        &self,
        event_id: EventId,
        guest_id: GuestId,
        actor: UserId,
    ) -> Result<SeatingAssignment> {
        self.auth.event(actor, event_id).await?;
        self.store
            .assignment_for_guest(event_id, guest_id)
            .await?
            .ok_or(SeatingError::AssignmentNotFound)
    }
}
