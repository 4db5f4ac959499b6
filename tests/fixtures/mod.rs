// Test fixtures - reusable test data
// Provides consistent test data across all test files

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use rust_calendar_layout::{Event, Resource, ResourceSet};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// April 2015, the month the resource demo data lives in
    pub fn april(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2015, 4, day).unwrap()
    }

    pub fn at(day: u32, hour: u32, minute: u32) -> NaiveDateTime {
        april(day).and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample resources for testing
pub mod resources {
    use super::*;

    /// Rooms A, B and C
    pub fn rooms() -> ResourceSet {
        ResourceSet::new([
            Resource::new("a", "Room A"),
            Resource::new("b", "Room B"),
            Resource::new("c", "Room C"),
        ])
    }
}

/// Sample events for testing
pub mod events {
    use super::dates::at;
    use super::*;

    pub fn timed(id: i64, title: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::new(id, title, start, end).unwrap()
    }

    pub fn booked(id: i64, title: &str, room: &str, start: NaiveDateTime, end: NaiveDateTime) -> Event {
        Event::builder()
            .id(id)
            .title(title)
            .start(start)
            .end(end)
            .resource(room)
            .build()
            .unwrap()
    }

    /// Room bookings over April 3rd to 5th, three identical slots on the 4th
    pub fn room_bookings() -> Vec<Event> {
        vec![
            booked(1, "Rencontre", "a", at(3, 5, 30), at(3, 10, 30)),
            booked(2, "Another Meeting", "b", at(5, 2, 30), at(5, 4, 30)),
            booked(3, "A", "a", at(4, 5, 30), at(4, 10, 30)),
            booked(4, "B", "b", at(4, 5, 30), at(4, 10, 30)),
            booked(5, "C", "c", at(4, 5, 30), at(4, 10, 30)),
        ]
    }

    /// Three-day all-day conference starting April 3rd
    pub fn conference() -> Event {
        Event::builder()
            .id(10)
            .title("All Day Conference")
            .start(at(3, 0, 0))
            .end(at(6, 0, 0))
            .all_day(true)
            .build()
            .unwrap()
    }

    /// Overnight event running from the evening of the 3rd into the 4th
    pub fn night_shift() -> Event {
        timed(11, "Night Shift", at(3, 22, 0), at(4, 6, 0))
    }
}
