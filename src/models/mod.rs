pub mod assignment;
pub mod chart;
pub mod event;
pub mod room;
pub mod seat;
pub mod user;
pub mod venue;

pub use assignment::{AssignmentDetail, AssignmentPatch, NewAssignment, SeatingAssignment};
pub use chart::{RoomOccupancy, SeatingChart};
pub use event::{Event, Guest};
pub use room::{CreateRoom, Room, RoomPatch, RoomType};
pub use seat::{CreateSeat, NewSeat, Seat, SeatCategory, SeatPatch, SeatStatus};
pub use user::User;
pub use venue::{CreateVenue, Venue, VenuePatch};

pub type UserId = i64;
pub type VenueId = i64;
pub type RoomId = i64;
pub type SeatId = i64;
pub type EventId = i64;
pub type GuestId = i64;
pub type AssignmentId = i64;
