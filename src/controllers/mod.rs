pub mod rooms;
pub mod seating;
pub mod seats;
pub mod venues;

use axum::Router;
use std::sync::Arc;

pub fn routes() -> Router<Arc<crate::AppState>> {
    Router::new()
        .merge(venues::routes())
        .merge(rooms::routes())
        .merge(seats::routes())
        .merge(seating::routes())
}
