//! Touchline Core: shared errors, configuration and the roster capability.

pub mod config;
pub mod error;
pub mod roster;

pub use config::{DataPaths, TouchlineConfig};
pub use error::{Error, Result};
pub use roster::{RosterEntry, RosterSource};
