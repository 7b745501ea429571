//! Small habit tracker: check in up to three times a day, collect points, climb through named
//! level tiers and keep a one-note-per-day journal. Everything is stored in a single JSON file
//! in the user's data directory.
//!

pub mod cli;
pub mod progress;
pub mod session;
pub mod utils;
