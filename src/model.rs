// Data shapes persisted in the two JSON stores.
// Field names match the on-disk layout so existing `users.json` and
// `movies.json` files keep loading.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Username -> user record.
pub type UserRegistry = BTreeMap<String, User>;

/// Movie id -> movie record.
pub type MovieRegistry = BTreeMap<String, Movie>;

/// One ticket bought by a user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Booking {
    pub movie_id: String,
    pub seat: String,
}

/// A registered user and the tickets they have booked, oldest first.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct User {
    pub movies_watched: Vec<Booking>,
}

/// A movie with its declared seat map and the seats already sold.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Movie {
    pub total_seats: Vec<String>,
    pub seats_taken: Vec<String>,
}

impl Movie {
    /// New movie with nothing booked yet.
    pub fn new(total_seats: Vec<String>) -> Self {
        Movie {
            total_seats,
            seats_taken: Vec::new(),
        }
    }

    pub fn is_taken(&self, seat: &str) -> bool {
        self.seats_taken.iter().any(|s| s == seat)
    }

    pub fn has_seat(&self, seat: &str) -> bool {
        self.total_seats.iter().any(|s| s == seat)
    }

    /// Declared seats that are still free, in seat-map order.
    pub fn available_seats(&self) -> Vec<String> {
        self.total_seats
            .iter()
            .filter(|seat| !self.is_taken(seat))
            .cloned()
            .collect()
    }
}

/// Listing row for one movie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieAvailability {
    pub movie_id: String,
    pub available: Vec<String>,
}

impl fmt::Display for MovieAvailability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Movie ID: {}, Available Seats: [{}]",
            self.movie_id,
            self.available.join(", ")
        )
    }
}
