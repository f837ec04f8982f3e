// Booking service: the operations behind the menu.
// Every operation reloads the stores it touches, validates, and only then
// writes. A rejected operation never writes, so the files stay unchanged.

use crate::error::{BookingError, StoreError};
use crate::model::{Booking, Movie, MovieAvailability, MovieRegistry, User, UserRegistry};
use crate::store::JsonStore;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::info;

pub const DEFAULT_USERS_FILE: &str = "users.json";
pub const DEFAULT_MOVIES_FILE: &str = "movies.json";

/// Locations of the two store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorePaths {
    pub users: PathBuf,
    pub movies: PathBuf,
}

impl Default for StorePaths {
    fn default() -> Self {
        StorePaths {
            users: PathBuf::from(DEFAULT_USERS_FILE),
            movies: PathBuf::from(DEFAULT_MOVIES_FILE),
        }
    }
}

impl StorePaths {
    /// Read `TICKETING_USERS_FILE` / `TICKETING_MOVIES_FILE`, falling back
    /// to `users.json` / `movies.json` in the working directory.
    pub fn from_env() -> Self {
        let users = std::env::var("TICKETING_USERS_FILE")
            .unwrap_or_else(|_| DEFAULT_USERS_FILE.into());
        let movies = std::env::var("TICKETING_MOVIES_FILE")
            .unwrap_or_else(|_| DEFAULT_MOVIES_FILE.into());
        StorePaths {
            users: users.into(),
            movies: movies.into(),
        }
    }
}

/// Front desk of the cinema: owns both stores and implements the
/// register / login / book / list / add-movie operations.
#[derive(Debug, Clone)]
pub struct TicketOffice {
    users: JsonStore<UserRegistry>,
    movies: JsonStore<MovieRegistry>,
}

impl TicketOffice {
    /// Open both stores, creating them as empty objects on first run.
    pub fn open(paths: StorePaths) -> Result<Self, StoreError> {
        let office = TicketOffice {
            users: JsonStore::new(paths.users),
            movies: JsonStore::new(paths.movies),
        };
        office.users.ensure_exists()?;
        office.movies.ensure_exists()?;
        Ok(office)
    }

    /// Same as `open`, with paths taken from the environment.
    pub fn from_env() -> Result<Self, StoreError> {
        Self::open(StorePaths::from_env())
    }

    /// Add a user with no bookings.
    pub fn register(&self, username: &str) -> Result<(), BookingError> {
        let mut users = self.users.load()?;
        if users.contains_key(username) {
            info!(username, "registration rejected: duplicate user");
            return Err(BookingError::DuplicateUser);
        }
        users.insert(username.to_string(), User::default());
        self.users.save(&users)?;
        info!(username, "user registered");
        Ok(())
    }

    /// Name lookup only; returns the username to act as the session.
    pub fn login(&self, username: &str) -> Result<String, BookingError> {
        let users = self.users.load()?;
        if !users.contains_key(username) {
            info!(username, "login rejected: unknown user");
            return Err(BookingError::UserNotFound);
        }
        info!(username, "user logged in");
        Ok(username.to_string())
    }

    /// Sell `seat` of `movie_id` to `username`.
    pub fn book(
        &self,
        username: &str,
        movie_id: &str,
        seat: &str,
    ) -> Result<Booking, BookingError> {
        let mut users = self.users.load()?;
        let mut movies = self.movies.load()?;

        let (Some(movie), Some(user)) = (movies.get_mut(movie_id), users.get_mut(username)) else {
            info!(username, movie_id, "booking rejected: movie or user missing");
            return Err(BookingError::NotFoundOrUnregistered);
        };
        if movie.is_taken(seat) {
            info!(username, movie_id, seat, "booking rejected: seat taken");
            return Err(BookingError::SeatAlreadyBooked);
        }
        if !movie.has_seat(seat) {
            info!(username, movie_id, seat, "booking rejected: no such seat");
            return Err(BookingError::UnknownSeat {
                seat: seat.to_string(),
            });
        }

        let booking = Booking {
            movie_id: movie_id.to_string(),
            seat: seat.to_string(),
        };
        movie.seats_taken.push(seat.to_string());
        user.movies_watched.push(booking.clone());

        self.movies.save(&movies)?;
        self.users.save(&users)?;
        info!(username, movie_id, seat, "ticket booked");
        Ok(booking)
    }

    /// Free seats of every movie, ordered by movie id.
    pub fn available_movies(&self) -> Result<Vec<MovieAvailability>, BookingError> {
        let movies = self.movies.load()?;
        Ok(movies
            .iter()
            .map(|(movie_id, movie)| MovieAvailability {
                movie_id: movie_id.clone(),
                available: movie.available_seats(),
            })
            .collect())
    }

    /// Create a movie from a comma separated seat list such as `A1,A2,A3`.
    pub fn add_movie(&self, movie_id: &str, seats_csv: &str) -> Result<(), BookingError> {
        let mut movies = self.movies.load()?;
        if movies.contains_key(movie_id) {
            info!(movie_id, "add movie rejected: duplicate id");
            return Err(BookingError::DuplicateMovie);
        }
        let total_seats = parse_seat_list(seats_csv)?;
        let count = total_seats.len();
        movies.insert(movie_id.to_string(), Movie::new(total_seats));
        self.movies.save(&movies)?;
        info!(movie_id, seats = count, "movie added");
        Ok(())
    }
}

/// Split a comma separated seat list. Labels are kept exactly as typed,
/// the same way booking compares them. Blank or repeated labels are
/// rejected.
pub fn parse_seat_list(input: &str) -> Result<Vec<String>, BookingError> {
    let mut seen = HashSet::new();
    let mut seats = Vec::new();
    for (idx, label) in input.split(',').enumerate() {
        if label.trim().is_empty() {
            return Err(BookingError::InvalidSeatList {
                reason: format!("seat #{} is empty", idx + 1),
            });
        }
        if !seen.insert(label) {
            return Err(BookingError::InvalidSeatList {
                reason: format!("seat {label} is listed twice"),
            });
        }
        seats.push(label.to_string());
    }
    Ok(seats)
}
