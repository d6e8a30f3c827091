mod common;

use common::{grid, new_room, Harness, OWNER, STRANGER};
use venue_seating::error::{ErrorKind, SeatingError};
use venue_seating::models::{CreateSeat, RoomPatch, SeatPatch, SeatStatus};
use venue_seating::store::SeatingStore;

fn single_seat(row: &str, number: &str) -> CreateSeat {
    CreateSeat {
        event_id: None,
        row: row.to_string(),
        column: None,
        number: number.to_string(),
        category: Default::default(),
        status: None,
        x: 0.0,
        y: 0.0,
        width: 1.0,
        height: 1.0,
        rotation: 0.0,
    }
}

#[tokio::test]
async fn venue_with_room_cannot_be_deleted_until_room_is_gone() {
    let h = Harness::new();
    let venue = h.venue().await;
    let room = h.room(&venue, "Terrace").await;

    let err = h.layout.delete_venue(OWNER, venue.id).await.unwrap_err();
    assert!(matches!(err, SeatingError::HasChildren("venue")));
    assert_eq!(err.kind(), ErrorKind::InvalidState);

    h.layout.delete_room(OWNER, room.id).await.unwrap();
    h.layout.delete_venue(OWNER, venue.id).await.unwrap();
    assert!(h.store.find_venue(venue.id).await.unwrap().is_none());
}

#[tokio::test]
async fn room_with_seats_cannot_be_deleted() {
    let h = Harness::new();
    let (room, _) = h.seated_room('A', 2).await;

    let err = h.layout.delete_room(OWNER, room.id).await.unwrap_err();
    assert!(matches!(err, SeatingError::HasChildren("room")));
}

#[tokio::test]
async fn room_names_are_unique_per_venue() {
    let h = Harness::new();
    let venue = h.venue().await;
    h.room(&venue, "Main Hall").await;

    let err = h
        .layout
        .create_room(OWNER, venue.id, new_room("Main Hall"))
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::NameConflict { .. }));
    assert_eq!(err.kind(), ErrorKind::Conflict);

    // same name in another venue is fine
    let other = h.venue().await;
    h.room(&other, "Main Hall").await;

    // renaming onto a sibling's name conflicts too
    let side = h.room(&venue, "Side Hall").await;
    let err = h
        .layout
        .update_room(
            OWNER,
            side.id,
            RoomPatch {
                name: Some("Main Hall".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::NameConflict { .. }));
}

#[tokio::test]
async fn duplicate_seat_coordinate_is_rejected() {
    let h = Harness::new();
    let (room, _) = h.seated_room('A', 3).await;

    let err = h
        .layout
        .create_seat(OWNER, room.id, single_seat("A", "2"))
        .await
        .unwrap_err();
    match err {
        SeatingError::SeatConflict { row, number, .. } => {
            assert_eq!((row.as_str(), number.as_str()), ("A", "2"));
        }
        other => panic!("expected SeatConflict, got {:?}", other),
    }

    let seat = h
        .layout
        .create_seat(OWNER, room.id, single_seat("B", "1"))
        .await
        .unwrap();
    assert_eq!(seat.status, SeatStatus::Available);
}

#[tokio::test]
async fn overlapping_grid_writes_nothing() {
    let h = Harness::new();
    let venue = h.venue().await;
    let room = h.room(&venue, "Atrium").await;
    h.layout
        .create_seat(OWNER, room.id, single_seat("B", "3"))
        .await
        .unwrap();

    let err = h
        .layout
        .create_seat_grid(OWNER, room.id, grid('A', 'C', 1, 5))
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::SeatConflict { .. }));
    assert_eq!(h.store.count_seats(room.id).await.unwrap(), 1);
}

#[tokio::test]
async fn inverted_grid_creates_no_seats() {
    let h = Harness::new();
    let venue = h.venue().await;
    let room = h.room(&venue, "Atrium").await;

    let seats = h
        .layout
        .create_seat_grid(OWNER, room.id, grid('C', 'A', 1, 5))
        .await
        .unwrap();
    assert!(seats.is_empty());
    let seats = h
        .layout
        .create_seat_grid(OWNER, room.id, grid('A', 'C', 5, 1))
        .await
        .unwrap();
    assert!(seats.is_empty());
    assert_eq!(h.store.count_seats(room.id).await.unwrap(), 0);
}

#[tokio::test]
async fn oversized_grid_is_a_validation_error() {
    let h = Harness::new();
    let venue = h.venue().await;
    let room = h.room(&venue, "Arena").await;

    let err = h
        .layout
        .create_seat_grid(OWNER, room.id, grid('A', 'Z', 1, 1000))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[tokio::test]
async fn grid_is_laid_out_row_major() {
    let h = Harness::new();
    let (_, seats) = h.seated_room('B', 2).await;

    let labels: Vec<String> = seats.iter().map(|s| s.label()).collect();
    assert_eq!(labels, ["A1", "A2", "B1", "B2"]);
    assert!(seats.iter().all(|s| s.status == SeatStatus::Available));
    assert_eq!((seats[2].x, seats[2].y), (0.0, 1.0));
}

#[tokio::test]
async fn strangers_cannot_touch_a_venue() {
    let h = Harness::new();
    let (room, seats) = h.seated_room('A', 1).await;

    let err = h.layout.get_room(STRANGER, room.id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
    let err = h.layout.delete_seat(STRANGER, seats[0].id).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
    let err = h
        .layout
        .create_seat_grid(STRANGER, room.id, grid('X', 'X', 1, 1))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AccessDenied);
}

#[tokio::test]
async fn missing_records_are_not_found() {
    let h = Harness::new();
    assert!(matches!(
        h.layout.get_venue(OWNER, 999).await,
        Err(SeatingError::VenueNotFound(999))
    ));
    assert!(matches!(
        h.layout.get_room(OWNER, 999).await,
        Err(SeatingError::RoomNotFound(999))
    ));
    assert!(matches!(
        h.layout.get_seat(OWNER, 999).await,
        Err(SeatingError::SeatNotFound(999))
    ));
}

#[tokio::test]
async fn seat_status_is_editable_except_occupancy() {
    let h = Harness::new();
    let (_, seats) = h.seated_room('A', 1).await;
    let seat = &seats[0];

    let blocked = h
        .layout
        .update_seat(
            OWNER,
            seat.id,
            SeatPatch {
                status: Some(SeatStatus::Blocked),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(blocked.status, SeatStatus::Blocked);

    let err = h
        .layout
        .update_seat(
            OWNER,
            seat.id,
            SeatPatch {
                status: Some(SeatStatus::Occupied),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, SeatingError::StatusTransition { .. }));
}

#[tokio::test]
async fn status_filter_and_occupancy_counts() {
    let h = Harness::new();
    let (room, seats) = h.seated_room('B', 3).await;
    h.layout
        .update_seat(
            OWNER,
            seats[0].id,
            SeatPatch {
                status: Some(SeatStatus::Maintenance),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let event = h.event();
    let guest = h.guest(event);
    h.engine
        .assign_guest_to_seat(event, guest, seats[1].id, OWNER, None)
        .await
        .unwrap();

    let occupied = h
        .layout
        .list_seats(OWNER, room.id, Some(SeatStatus::Occupied))
        .await
        .unwrap();
    assert_eq!(occupied.len(), 1);
    assert_eq!(occupied[0].id, seats[1].id);

    let stats = h.layout.room_occupancy(OWNER, room.id).await.unwrap();
    assert_eq!(stats.total, 6);
    assert_eq!(stats.occupied, 1);
    assert_eq!(stats.maintenance, 1);
    assert_eq!(stats.available, 4);
}
