use crate::redis_client::RedisClient;

pub mod seats;

/// Read-through cache in front of per-room seat listings.
///
/// Redis being unavailable only costs a database round trip: every method
/// swallows (and logs) cache errors.
#[derive(Clone)]
pub struct CacheService {
    redis: RedisClient,
    seat_ttl_secs: u64,
}

impl CacheService {
    pub fn new(redis: RedisClient, seat_ttl_secs: u64) -> Self {
        Self {
            redis,
            seat_ttl_secs,
        }
    }
}
