//! Seating chart aggregation.
//!
//! The venue and room of a chart come from the first assignment of the event
//! (lowest assignment id); an event's seats are expected to live in one room.
//! An event without assignments yields an empty chart with no venue or room.

use std::sync::Arc;

use tracing::warn;

use super::access::Authorizer;
use crate::error::Result;
use crate::models::{EventId, SeatingChart, UserId};
use crate::store::SeatingStore;

#[derive(Clone)]
pub struct ChartAggregator {
    store: Arc<dyn SeatingStore>,
    auth: Authorizer,
}

impl ChartAggregator {
    pub fn new(store: Arc<dyn SeatingStore>, auth: Authorizer) -> Self {
        Self { store, auth }
    }

    pub async fn seating_chart(&self, event_id: EventId, actor: UserId) -> Result<SeatingChart> {
        self.auth.event(actor, event_id).await?;

        let assignments = self.store.assignments_for_event(event_id).await?;
        let Some(first) = assignments.first() else {
            return Ok(SeatingChart {
                event_id,
                venue_id: None,
                venue_name: None,
                room_id: None,
                room_name: None,
                assignments,
                total_seats: 0,
                assigned_seats: 0,
                available_seats: 0,
            });
        };

        let (venue_id, venue_name) = (first.venue_id, first.venue_name.clone());
        let (room_id, room_name) = (first.room_id, first.room_name.clone());

        let total_seats = self.store.count_seats(room_id).await?;
        let assigned_seats = assignments.len() as i64;
        if assignments.iter().any(|a| a.room_id != room_id) {
            warn!(
                "event {} has assignments outside room {}; chart counts only that room",
                event_id,
                room_id
            );
        }

        Ok(SeatingChart {
            event_id,
            venue_id: Some(venue_id),
            venue_name: Some(venue_name),
            room_id: Some(room_id),
            room_name: Some(room_name),
            assignments,
            total_seats,
            assigned_seats,
            available_seats: (total_seats - assigned_seats).max(0),
        })
    }
}
