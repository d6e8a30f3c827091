//! Cached per-room seat listings.
//!
//! A listing read from the store just before a write commits can be cached
//! after that write's invalidation ran. Such a stale entry lives until its TTL
//! expires. Status-filtered listings flip with every assignment, so their TTL
//! is capped at `FILTERED_SEAT_TTL_SECS`.

use redis::AsyncCommands;
use tracing::{debug, warn};

use crate::cache::CacheService;
use crate::models::{RoomId, Seat, SeatStatus};

const STATUS_FILTERS: [Option<SeatStatus>; 6] = [
    None,
    Some(SeatStatus::Available),
    Some(SeatStatus::Occupied),
    Some(SeatStatus::Reserved),
    Some(SeatStatus::Blocked),
    Some(SeatStatus::Maintenance),
];

/// Upper bound on the lifetime of a `?status=` listing.
pub const FILTERED_SEAT_TTL_SECS: u64 = 15;

/// TTL for a listing; filtered listings never outlive `FILTERED_SEAT_TTL_SECS`.
pub fn listing_ttl(base_ttl_secs: u64, status: Option<SeatStatus>) -> u64 {
    match status {
        None => base_ttl_secs,
        Some(_) => base_ttl_secs.min(FILTERED_SEAT_TTL_SECS),
    }
}

pub fn room_seats_key(room_id: RoomId, status: Option<SeatStatus>) -> String {
    let filter = match status {
        None => "all",
        Some(SeatStatus::Available) => "available",
        Some(SeatStatus::Occupied) => "occupied",
        Some(SeatStatus::Reserved) => "reserved",
        Some(SeatStatus::Blocked) => "blocked",
        Some(SeatStatus::Maintenance) => "maintenance",
    };
    format!("seats:room:{}:{}", room_id, filter)
}

impl CacheService {
    pub async fn get_room_seats(&self, room_id: RoomId, status: Option<SeatStatus>) -> Option<Vec<Seat>> {
        let mut conn = self.redis.conn.clone();
        let data: Option<String> = match conn.get(room_seats_key(room_id, status)).await {
            Ok(data) => data,
            Err(e) => {
                warn!("seat cache read failed for room {}: {:?}", room_id, e);
                return None;
            }
        };
        data.and_then(|json| serde_json::from_str(&json).ok())
    }

    pub async fn cache_room_seats(&self, room_id: RoomId, status: Option<SeatStatus>, seats: &[Seat]) {
        let Ok(data) = serde_json::to_string(seats) else { return };
        let mut conn = self.redis.conn.clone();
        let result: Result<(), _> = conn
            .set_ex(
                room_seats_key(room_id, status),
                data,
                listing_ttl(self.seat_ttl_secs, status),
            )
            .await;
        if let Err(e) = result {
            warn!("seat cache write failed for room {}: {:?}", room_id, e);
        }
    }

    /// Drops every cached listing of the room, whatever its status filter.
    pub async fn invalidate_room_seats(&self, room_id: RoomId) {
        let mut conn = self.redis.conn.clone();
        let mut pipe = redis::pipe();
        for status in STATUS_FILTERS {
            pipe.del(room_seats_key(room_id, status));
        }
        let result: Result<(), _> = pipe.query_async(&mut conn).await;
        match result {
            Ok(()) => debug!("invalidated seat cache for room {}", room_id),
            Err(e) => warn!("seat cache invalidation failed for room {}: {:?}", room_id, e),
        }
    }
}
