//! Shared application state.

use touchline_core::TouchlineConfig;
use touchline_parse::CommandParser;
use touchline_store::SqliteStore;

/// Shared application state accessible from all route handlers.
pub struct AppState {
    pub config: TouchlineConfig,
    pub store: SqliteStore,
    pub parser: CommandParser,
}

impl AppState {
    pub fn new(config: TouchlineConfig, store: SqliteStore, parser: CommandParser) -> Self {
        Self {
            config,
            store,
            parser,
        }
    }
}
