//! SQLite store for song metadata.
//!
//! Songs are keyed by `(book, number)` and carry a title and detail lines.
//! Filling the store from online sources is done elsewhere; this crate only
//! reads songs and saves the ones entered by hand.

pub mod store;

pub use store::{SongStore, DEFAULT_DB_PATH};
