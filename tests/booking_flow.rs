use std::fs;

use tempfile::TempDir;
use ticketing_cli::booking::{StorePaths, TicketOffice};
use ticketing_cli::error::BookingError;
use ticketing_cli::model::{Booking, MovieRegistry, UserRegistry};

fn open(dir: &TempDir) -> TicketOffice {
    TicketOffice::open(StorePaths {
        users: dir.path().join("users.json"),
        movies: dir.path().join("movies.json"),
    })
    .unwrap()
}

fn read_movies(dir: &TempDir) -> MovieRegistry {
    serde_json::from_str(&fs::read_to_string(dir.path().join("movies.json")).unwrap()).unwrap()
}

fn read_users(dir: &TempDir) -> UserRegistry {
    serde_json::from_str(&fs::read_to_string(dir.path().join("users.json")).unwrap()).unwrap()
}

#[test]
fn add_movie_sign_up_book_and_list() {
    let dir = TempDir::new().unwrap();
    let office = open(&dir);

    office.add_movie("M1", "A1,A2,A3").unwrap();
    let movies = read_movies(&dir);
    assert_eq!(movies["M1"].total_seats, vec!["A1", "A2", "A3"]);
    assert!(movies["M1"].seats_taken.is_empty());

    office.register("alice").unwrap();
    let session = office.login("alice").unwrap();
    assert_eq!(session, "alice");

    let booking = office.book(&session, "M1", "A1").unwrap();
    assert_eq!(
        booking,
        Booking {
            movie_id: "M1".into(),
            seat: "A1".into()
        }
    );
    assert_eq!(read_movies(&dir)["M1"].seats_taken, vec!["A1"]);
    assert_eq!(read_users(&dir)["alice"].movies_watched, vec![booking]);

    let users_before = fs::read(dir.path().join("users.json")).unwrap();
    let movies_before = fs::read(dir.path().join("movies.json")).unwrap();
    assert!(matches!(
        office.book(&session, "M1", "A1"),
        Err(BookingError::SeatAlreadyBooked)
    ));
    assert_eq!(fs::read(dir.path().join("users.json")).unwrap(), users_before);
    assert_eq!(fs::read(dir.path().join("movies.json")).unwrap(), movies_before);

    let listing: Vec<String> = office
        .available_movies()
        .unwrap()
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(listing, vec!["Movie ID: M1, Available Seats: [A2, A3]"]);
}

#[test]
fn state_survives_reopening() {
    let dir = TempDir::new().unwrap();
    {
        let office = open(&dir);
        office.add_movie("M1", "A1,A2").unwrap();
        office.add_movie("M2", "B1").unwrap();
        office.register("bob").unwrap();
        office.book("bob", "M2", "B1").unwrap();
    }

    let office = open(&dir);
    assert_eq!(office.login("bob").unwrap(), "bob");
    let listing = office.available_movies().unwrap();
    assert_eq!(listing.len(), 2);
    assert_eq!(listing[0].movie_id, "M1");
    assert_eq!(listing[0].available, vec!["A1", "A2"]);
    assert_eq!(listing[1].movie_id, "M2");
    assert!(listing[1].available.is_empty());
}

#[test]
fn login_of_unknown_user_fails() {
    let dir = TempDir::new().unwrap();
    let office = open(&dir);
    assert!(matches!(office.login("nobody"), Err(BookingError::UserNotFound)));
}
