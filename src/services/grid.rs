//! Seat grid generation.
//!
//! Expands a rectangular row/number range into a batch of `NewSeat`s without
//! touching storage. The batch is ordered row-major and cannot contain a
//! duplicate `(row, number)` pair because neither range repeats.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::models::{EventId, NewSeat, RoomId, SeatCategory, SeatStatus};

/// Upper bound on seats produced by a single request.
pub const MAX_GRID_SEATS: usize = 10_000;

fn printable_label(label: &char) -> Result<(), ValidationError> {
    if label.is_ascii_graphic() {
        Ok(())
    } else {
        Err(ValidationError::new("row_label_not_printable"))
    }
}

fn default_spacing() -> f64 {
    1.0
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GridSpec {
    #[validate(custom(function = "printable_label"))]
    pub start_row: char,
    #[validate(custom(function = "printable_label"))]
    pub end_row: char,
    pub start_number: i32,
    pub end_number: i32,
    #[serde(default)]
    pub category: SeatCategory,
    #[serde(default)]
    pub start_x: f64,
    #[serde(default)]
    pub start_y: f64,
    #[serde(default = "default_spacing")]
    pub spacing_x: f64,
    #[serde(default = "default_spacing")]
    pub spacing_y: f64,
    pub event_id: Option<EventId>,
}

impl GridSpec {
    /// Row labels in order; empty when the range is inverted.
    pub fn row_labels(&self) -> Vec<char> {
        (self.start_row..=self.end_row).collect()
    }

    pub fn seat_count(&self) -> usize {
        let rows = self.row_labels().len();
        let numbers = if self.end_number < self.start_number {
            0
        } else {
            (i64::from(self.end_number) - i64::from(self.start_number) + 1) as usize
        };
        rows * numbers
    }
}

/// Builds the seats of `spec` for `room_id`, row by row.
pub fn generate_grid(room_id: RoomId, spec: &GridSpec) -> Vec<NewSeat> {
    let mut seats = Vec::with_capacity(spec.seat_count());

    for (row_index, label) in spec.row_labels().into_iter().enumerate() {
        let y = spec.start_y + spec.spacing_y * row_index as f64;
        for (column_index, number) in (spec.start_number..=spec.end_number).enumerate() {
            seats.push(NewSeat {
                room_id,
                event_id: spec.event_id,
                row: label.to_string(),
                column: None,
                number: number.to_string(),
                category: spec.category,
                status: SeatStatus::Available,
                x: spec.start_x + spec.spacing_x * column_index as f64,
                y,
                width: 1.0,
                height: 1.0,
                rotation: 0.0,
            });
        }
    }

    seats
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn spec(start_row: char, end_row: char, start_number: i32, end_number: i32) -> GridSpec {
        GridSpec {
            start_row,
            end_row,
            start_number,
            end_number,
            category: SeatCategory::Standard,
            start_x: 0.0,
            start_y: 0.0,
            spacing_x: 1.2,
            spacing_y: 1.2,
            event_id: None,
        }
    }

    #[test]
    fn two_by_two_grid_layout() {
        let seats = generate_grid(7, &spec('A', 'B', 1, 2));
        let laid_out: Vec<(String, String, f64, f64)> = seats
            .iter()
            .map(|s| (s.row.clone(), s.number.clone(), s.x, s.y))
            .collect();

        assert_eq!(
            laid_out,
            vec![
                ("A".to_string(), "1".to_string(), 0.0, 0.0),
                ("A".to_string(), "2".to_string(), 1.2, 0.0),
                ("B".to_string(), "1".to_string(), 0.0, 1.2),
                ("B".to_string(), "2".to_string(), 1.2, 1.2),
            ]
        );
        assert!(seats.iter().all(|s| s.status == SeatStatus::Available
            && s.width == 1.0
            && s.height == 1.0
            && s.rotation == 0.0
            && s.room_id == 7));
    }

    #[test]
    fn x_cursor_resets_per_row_and_starts_at_origin() {
        let mut grid = spec('C', 'D', 5, 7);
        grid.start_x = 10.0;
        grid.start_y = -2.0;
        grid.spacing_x = 2.0;
        grid.spacing_y = 3.0;

        let seats = generate_grid(1, &grid);
        assert_eq!(seats[0].x, 10.0);
        assert_eq!(seats[2].x, 14.0);
        assert_eq!(seats[3].x, 10.0);
        assert_eq!(seats[3].y, 1.0);
        assert_eq!(seats[3].number, "5");
    }

    #[test]
    fn inverted_row_range_yields_empty_batch() {
        assert!(generate_grid(1, &spec('D', 'A', 1, 10)).is_empty());
        assert_eq!(spec('D', 'A', 1, 10).seat_count(), 0);
    }

    #[test]
    fn inverted_number_range_yields_empty_batch() {
        assert!(generate_grid(1, &spec('A', 'C', 10, 1)).is_empty());
    }

    #[test]
    fn single_seat_grid() {
        let seats = generate_grid(1, &spec('Q', 'Q', 3, 3));
        assert_eq!(seats.len(), 1);
        assert_eq!((seats[0].row.as_str(), seats[0].number.as_str()), ("Q", "3"));
    }

    #[test]
    fn non_printable_row_label_is_rejected() {
        let grid = spec('\n', 'B', 1, 2);
        assert!(grid.validate().is_err());
        assert!(spec('A', 'Z', 1, 2).validate().is_ok());
    }

    proptest! {
        #[test]
        fn grid_size_and_uniqueness(
            start in b'A'..=b'Z',
            rows in 0u8..8,
            start_number in -5i32..50,
            numbers in 0i32..30,
        ) {
            let end = start.saturating_add(rows).min(b'Z');
            let grid = spec(start as char, end as char, start_number, start_number + numbers - 1);

            let seats = generate_grid(3, &grid);
            let expected = (end - start + 1) as usize * numbers.max(0) as usize;
            prop_assert_eq!(seats.len(), expected);
            prop_assert_eq!(grid.seat_count(), expected);

            let unique: HashSet<(String, String)> =
                seats.iter().map(|s| (s.row.clone(), s.number.clone())).collect();
            prop_assert_eq!(unique.len(), seats.len());
        }
    }
}
