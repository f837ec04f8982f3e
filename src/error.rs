// Error types for the stores, the booking operations and the menu input.

use std::path::PathBuf;
use thiserror::Error;

/// Failure reading or writing one of the JSON store files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing file does not exist.
    #[error("store file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The backing file exists but is not a valid store object.
    #[error("store file {} is not valid JSON", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Any other filesystem failure (permissions, disk full, ...).
    #[error("I/O error on store file {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Reasons a booking operation is rejected.
///
/// Every variant except `Store` is a user-facing rejection: the operation
/// aborted and neither store was written.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error("Username already exists.")]
    DuplicateUser,

    #[error("User not found.")]
    UserNotFound,

    /// Movie id or username unknown; deliberately not told apart.
    #[error("Movie not found or user not registered.")]
    NotFoundOrUnregistered,

    #[error("Seat already booked.")]
    SeatAlreadyBooked,

    /// Seat label is not part of the movie's seat map.
    #[error("Seat {seat} does not exist for this movie.")]
    UnknownSeat { seat: String },

    #[error("Movie already exists.")]
    DuplicateMovie,

    /// Seat list for a new movie has an empty or repeated label.
    #[error("Invalid seat list: {reason}")]
    InvalidSeatList { reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl BookingError {
    /// True for rejections the menu reports and recovers from.
    pub fn is_rejection(&self) -> bool {
        !matches!(self, BookingError::Store(_))
    }
}

/// The operator's input ended before "0" was chosen.
#[derive(Debug, Error)]
#[error("input closed")]
pub struct InputClosed;
