#![allow(dead_code)]

use std::sync::Arc;

use fake::faker::address::en::{CityName, CountryName, PostCode, StateName, StreetName};
use fake::faker::company::en::CompanyName;
use fake::Fake;

use venue_seating::models::{
    CreateRoom, CreateVenue, EventId, Room, RoomType, Seat, UserId, Venue,
};
use venue_seating::services::{
    AssignmentEngine, Authorizer, ChartAggregator, GridSpec, LayoutService,
};
use venue_seating::store::{EventDirectory, MemoryStore, SeatingStore};

pub const OWNER: UserId = 1;
pub const STRANGER: UserId = 2;

pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub layout: LayoutService,
    pub engine: AssignmentEngine,
    pub charts: ChartAggregator,
}

impl Harness {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let seating: Arc<dyn SeatingStore> = store.clone();
        let directory: Arc<dyn EventDirectory> = store.clone();
        let auth = Authorizer::new(seating.clone(), directory.clone());

        Self {
            layout: LayoutService::new(seating.clone(), auth.clone()),
            engine: AssignmentEngine::new(seating.clone(), directory, auth.clone()),
            charts: ChartAggregator::new(seating, auth),
            store,
        }
    }

    pub async fn venue(&self) -> Venue {
        self.layout
            .create_venue(OWNER, new_venue())
            .await
            .expect("venue")
    }

    pub async fn room(&self, venue: &Venue, name: &str) -> Room {
        self.layout
            .create_room(OWNER, venue.id, new_room(name))
            .await
            .expect("room")
    }

    /// A venue with one room holding a `rows` x `numbers` grid.
    pub async fn seated_room(&self, rows: char, numbers: i32) -> (Room, Vec<Seat>) {
        let venue = self.venue().await;
        let room = self.room(&venue, "Main Hall").await;
        let seats = self
            .layout
            .create_seat_grid(OWNER, room.id, grid('A', rows, 1, numbers))
            .await
            .expect("grid");
        (room, seats)
    }

    pub fn event(&self) -> EventId {
        let title: String = CompanyName().fake();
        self.store.add_event(OWNER, &format!("{} gala", title))
    }

    pub fn guest(&self, event_id: EventId) -> i64 {
        let name: String = fake::faker::name::en::Name().fake();
        self.store.add_guest(event_id, &name)
    }
}

pub fn new_venue() -> CreateVenue {
    CreateVenue {
        name: CompanyName().fake(),
        address: StreetName().fake(),
        city: CityName().fake(),
        state: StateName().fake(),
        postal_code: PostCode().fake(),
        country: CountryName().fake(),
        description: None,
        is_public: false,
    }
}

pub fn new_room(name: &str) -> CreateRoom {
    CreateRoom {
        name: name.to_string(),
        capacity: 100,
        floor: Some(1),
        room_type: RoomType::Ballroom,
        description: None,
    }
}

pub fn grid(start_row: char, end_row: char, start_number: i32, end_number: i32) -> GridSpec {
    GridSpec {
        start_row,
        end_row,
        start_number,
        end_number,
        category: Default::default(),
        start_x: 0.0,
        start_y: 0.0,
        spacing_x: 1.0,
        spacing_y: 1.0,
        event_id: None,
    }
}
