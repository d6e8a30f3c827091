use redis::{aio::MultiplexedConnection, Client};
use tracing::info;

use crate::config::RedisConfig;

/// Shared multiplexed connection; clones are cheap handles onto one socket.
#[derive(Clone)]
pub struct RedisClient {
    pub conn: MultiplexedConnection,
}

impl RedisClient {
    pub async fn connect(config: &RedisConfig) -> redis::RedisResult<Self> {
        let client = Client::open(config.url.as_str())?;
        let mut conn = client.get_multiplexed_tokio_connection().await?;
        let pong: String = redis::cmd("PING").query_async(&mut conn).await?;
        info!("Redis answered {}", pong);
        Ok(RedisClient { conn })
    }
}
