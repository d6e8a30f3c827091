mod common;

use std::collections::HashMap;

use common::{grid, new_room, new_venue, Harness, OWNER, STRANGER};
use proptest::prelude::*;
use venue_seating::error::{ErrorKind, SeatingError};
use venue_seating::models::{AssignmentPatch, EventId, RoomId, SeatStatus};
use venue_seating::store::SeatingStore;

/// Every occupied seat is backed by exactly one assignment for its guest, and
/// every assignment points at a seat occupied by that guest.
async fn assert_occupancy_consistent(h: &Harness, room_id: RoomId, event_id: EventId) {
    let seats = h.store.seats_in_room(room_id, None).await.unwrap();
    let assignments = h.store.assignments_for_event(event_id).await.unwrap();
    let by_seat: HashMap<_, _> = assignments.iter().map(|a| (a.seat_id, a.guest_id)).collect();
    assert_eq!(by_seat.len(), assignments.len(), "seat assigned twice");

    for seat in &seats {
        match by_seat.get(&seat.id) {
            Some(guest) => {
                assert_eq!(seat.status, SeatStatus::Occupied);
                assert_eq!(seat.guest_id, Some(*guest));
            }
            None => {
                assert_ne!(seat.status, SeatStatus::Occupied);
                assert_eq!(seat.guest_id, None);
            }
        }
    }
}

#[tokio::test]
async fn assign_then_unassign_restores_availability() {
    let h = Harness::new();
    let (room, seats) = h.seated_room('A', 4).await;
    let event = h.event();
    let guest = h.guest(event);
    // keeps the chart anchored to the room while the other seat cycles
    let neighbour = h.guest(event);
    h.engine
        .assign_guest_to_seat(event, neighbour, seats[3].id, OWNER, None)
        .await
        .unwrap();
    let before = h.charts.seating_chart(event, OWNER).await.unwrap().available_seats;
    assert_eq!(before, 3);

    let assignment = h
        .engine
        .assign_guest_to_seat(event, guest, seats[0].id, OWNER, Some("aisle".into()))
        .await
        .unwrap();
    assert_eq!(assignment.assigned_by, OWNER);
    let seat = h.store.find_seat(seats[0].id).await.unwrap().unwrap();
    assert_eq!(seat.status, SeatStatus::Occupied);
    assert_eq!(seat.guest_id, Some(guest));
    assert_eq!(h.charts.seating_chart(event, OWNER).await.unwrap().available_seats, 2);

    let removed = h
        .engine
        .unassign_guest_from_seat(event, seats[0].id, OWNER)
        .await
        .unwrap();
    assert_eq!(removed.id, assignment.id);
    let seat = h.store.find_seat(seats[0].id).await.unwrap().unwrap();
    assert_eq!(seat.status, SeatStatus::Available);
    assert_eq!(seat.guest_id, None);
    assert!(h.store.find_assignment(assignment.id).await.unwrap().is_none());
    let after = h.charts.seating_chart(event, OWNER).await.unwrap().available_seats;
    assert_eq!(after, before);
    assert_occupancy_consistent(&h, room.id, event).await;
}

#[tokio::test]
async fn event_owner_cannot_seat_guests_in_someone_elses_venue() {
    let h = Harness::new();
    let (room, seats) = h.seated_room('A', 2).await;
    let event = h.store.add_event(STRANGER, "Crasher party");
    let guest = h.guest(event);

    let err = h
        .engine
        .assign_guest_to_seat(event, guest, seats[0].id, STRANGER, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::AccessDenied));
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
    assert_eq!(h.store.assignment_count(), 0);

    // the venue owner keeps full control of the untouched seat
    h.layout.delete_seat(OWNER, seats[0].id).await.unwrap();
    assert_occupancy_consistent(&h, room.id, event).await;
}

#[tokio::test]
async fn moving_into_someone_elses_venue_is_denied() {
    let h = Harness::new();
    let (_, owner_seats) = h.seated_room('A', 1).await;

    let venue = h.layout.create_venue(STRANGER, new_venue()).await.unwrap();
    let room = h
        .layout
        .create_room(STRANGER, venue.id, new_room("Loft"))
        .await
        .unwrap();
    let seats = h
        .layout
        .create_seat_grid(STRANGER, room.id, grid('A', 'A', 1, 1))
        .await
        .unwrap();
    let event = h.store.add_event(STRANGER, "Loft launch");
    let guest = h.guest(event);
    let assignment = h
        .engine
        .assign_guest_to_seat(event, guest, seats[0].id, STRANGER, None)
        .await
        .unwrap();

    let err = h
        .engine
        .update_seating_assignment(
            event,
            assignment.id,
            STRANGER,
            AssignmentPatch {
                seat_id: Some(owner_seats[0].id),
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::AccessDenied));
    let target = h.store.find_seat(owner_seats[0].id).await.unwrap().unwrap();
    assert_eq!(target.status, SeatStatus::Available);
    assert_eq!(
        h.store.find_assignment(assignment.id).await.unwrap().unwrap().seat_id,
        seats[0].id
    );
}

#[tokio::test]
async fn event_scoped_seat_refuses_other_events() {
    let h = Harness::new();
    let venue = h.venue().await;
    let room = h.room(&venue, "Gallery").await;
    let gala = h.event();
    let brunch = h.event();

    let mut spec = grid('A', 'A', 1, 2);
    spec.event_id = Some(gala);
    let scoped = h.layout.create_seat_grid(OWNER, room.id, spec).await.unwrap();
    let open = h
        .layout
        .create_seat_grid(OWNER, room.id, grid('B', 'B', 1, 1))
        .await
        .unwrap();

    let guest = h.guest(brunch);
    let err = h
        .engine
        .assign_guest_to_seat(brunch, guest, scoped[0].id, OWNER, None)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(h.store.assignment_count(), 0);

    // unscoped seats serve any event, scoped ones serve their own
    let assignment = h
        .engine
        .assign_guest_to_seat(brunch, guest, open[0].id, OWNER, None)
        .await
        .unwrap();
    let err = h
        .engine
        .update_seating_assignment(
            brunch,
            assignment.id,
            OWNER,
            AssignmentPatch {
                seat_id: Some(scoped[1].id),
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    let gala_guest = h.guest(gala);
    h.engine
        .assign_guest_to_seat(gala, gala_guest, scoped[0].id, OWNER, None)
        .await
        .unwrap();
    let untouched = h.store.find_seat(scoped[1].id).await.unwrap().unwrap();
    assert_eq!(untouched.status, SeatStatus::Available);
    let moved = h.store.find_assignment(assignment.id).await.unwrap().unwrap();
    assert_eq!(moved.seat_id, open[0].id);
}

#[tokio::test]
async fn guest_can_hold_only_one_seat_per_event() {
    let h = Harness::new();
    let (_, seats) = h.seated_room('A', 2).await;
    let event = h.event();
    let guest = h.guest(event);

    h.engine
        .assign_guest_to_seat(event, guest, seats[0].id, OWNER, None)
        .await
        .unwrap();
    let err = h
        .engine
        .assign_guest_to_seat(event, guest, seats[1].id, OWNER, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::GuestAlreadyAssigned { .. }));
    assert_eq!(h.store.assignment_count(), 1);
}

#[tokio::test]
async fn occupied_seat_rejects_second_guest_without_side_effects() {
    let h = Harness::new();
    let (_, seats) = h.seated_room('A', 1).await;
    let event = h.event();
    let first = h.guest(event);
    let second = h.guest(event);

    h.engine
        .assign_guest_to_seat(event, first, seats[0].id, OWNER, None)
        .await
        .unwrap();
    for _ in 0..2 {
        let err = h
            .engine
            .assign_guest_to_seat(event, second, seats[0].id, OWNER, None)
            .await
            .unwrap_err();
        assert!(matches!(err, SeatingError::SeatOccupied { .. }));
        assert_eq!(err.kind(), ErrorKind::Conflict);
    }

    let seat = h.store.find_seat(seats[0].id).await.unwrap().unwrap();
    assert_eq!(seat.guest_id, Some(first));
    assert_eq!(h.store.assignment_count(), 1);
}

#[tokio::test]
async fn checks_fail_in_order() {
    let h = Harness::new();
    let (_, seats) = h.seated_room('A', 1).await;
    let event = h.event();
    let guest = h.guest(event);
    let outsider = h.guest(h.event());

    let err = h
        .engine
        .assign_guest_to_seat(event, guest, seats[0].id, STRANGER, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::EventAccessDenied(e) if e == event));

    let err = h
        .engine
        .assign_guest_to_seat(9_999, guest, seats[0].id, OWNER, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::EventAccessDenied(_)));

    let err = h
        .engine
        .assign_guest_to_seat(event, outsider, seats[0].id, OWNER, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::GuestNotFound { .. }));

    let err = h
        .engine
        .assign_guest_to_seat(event, guest, 9_999, OWNER, None)
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::SeatNotFound(9_999)));
    assert_eq!(h.store.assignment_count(), 0);
}

#[tokio::test]
async fn unassigning_an_empty_seat_is_not_found() {
    let h = Harness::new();
    let (_, seats) = h.seated_room('A', 1).await;
    let event = h.event();

    let err = h
        .engine
        .unassign_guest_from_seat(event, seats[0].id, OWNER)
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::AssignmentNotFound));
    assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[tokio::test]
async fn moving_a_guest_swaps_seat_states() {
    let h = Harness::new();
    let (room, seats) = h.seated_room('A', 3).await;
    let event = h.event();
    let guest = h.guest(event);
    let other = h.guest(event);

    let assignment = h
        .engine
        .assign_guest_to_seat(event, guest, seats[0].id, OWNER, None)
        .await
        .unwrap();
    h.engine
        .assign_guest_to_seat(event, other, seats[2].id, OWNER, None)
        .await
        .unwrap();

    let moved = h
        .engine
        .update_seating_assignment(
            event,
            assignment.id,
            OWNER,
            AssignmentPatch {
                seat_id: Some(seats[1].id),
                notes: Some("near the stage".into()),
            },
        )
        .await
        .unwrap();
    assert_eq!(moved.seat_id, seats[1].id);
    assert_eq!(moved.notes.as_deref(), Some("near the stage"));

    let old = h.store.find_seat(seats[0].id).await.unwrap().unwrap();
    assert_eq!(old.status, SeatStatus::Available);

    let err = h
        .engine
        .update_seating_assignment(
            event,
            assignment.id,
            OWNER,
            AssignmentPatch {
                seat_id: Some(seats[2].id),
                notes: None,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::SeatOccupied { .. }));
    assert_occupancy_consistent(&h, room.id, event).await;

    let found = h.engine.guest_assignment(event, guest, OWNER).await.unwrap();
    assert_eq!(found.seat_id, seats[1].id);
}

#[tokio::test]
async fn occupied_seat_cannot_be_deleted() {
    let h = Harness::new();
    let (_, seats) = h.seated_room('A', 1).await;
    let event = h.event();
    let guest = h.guest(event);
    h.engine
        .assign_guest_to_seat(event, guest, seats[0].id, OWNER, None)
        .await
        .unwrap();

    let err = h.layout.delete_seat(OWNER, seats[0].id).await.unwrap_err();
    assert!(matches!(err, SeatingError::SeatInUse { .. }));
    assert_eq!(err.code(), "SEAT_OCCUPIED");
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    h.engine
        .unassign_guest_from_seat(event, seats[0].id, OWNER)
        .await
        .unwrap();
    h.layout.delete_seat(OWNER, seats[0].id).await.unwrap();
}

#[derive(Debug, Clone)]
enum Op {
    Assign { guest: usize, seat: usize },
    Unassign { seat: usize },
    Move { guest: usize, seat: usize },
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..4usize, 0..6usize).prop_map(|(guest, seat)| Op::Assign { guest, seat }),
        (0..6usize).prop_map(|seat| Op::Unassign { seat }),
        (0..4usize, 0..6usize).prop_map(|(guest, seat)| Op::Move { guest, seat }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn occupancy_tracks_assignments(ops in prop::collection::vec(op(), 1..30)) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let h = Harness::new();
            let (room, seats) = h.seated_room('B', 3).await;
            let event = h.event();
            let guests: Vec<i64> = (0..4).map(|_| h.guest(event)).collect();

            for op in ops {
                // rejected operations are expected; only the invariant matters
                match op {
                    Op::Assign { guest, seat } => {
                        let _ = h
                            .engine
                            .assign_guest_to_seat(event, guests[guest], seats[seat].id, OWNER, None)
                            .await;
                    }
                    Op::Unassign { seat } => {
                        let _ = h.engine.unassign_guest_from_seat(event, seats[seat].id, OWNER).await;
                    }
                    Op::Move { guest, seat } => {
                        if let Ok(current) = h.engine.guest_assignment(event, guests[guest], OWNER).await {
                            let _ = h
                                .engine
                                .update_seating_assignment(
                                    event,
                                    current.id,
                                    OWNER,
                                    AssignmentPatch { seat_id: Some(seats[seat].id), notes: None },
                                )
                                .await;
                        }
                    }
                }
                assert_occupancy_consistent(&h, room.id, event).await;
            }
        });
    }
}
