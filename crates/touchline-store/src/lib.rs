//! Touchline Store: SQLite persistence for teams, players, matches and events.

pub mod schema;
pub mod sqlite;
pub mod types;

pub use sqlite::SqliteStore;
pub use types::*;
