//! SQLite-backed store for rosters, matches and events.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use rusqlite::{params, Connection, OptionalExtension};
use tracing::{debug, info};

use crate::schema::SCHEMA_SQL;
use crate::types::*;
use touchline_core::{Error, Result, RosterEntry, RosterSource};

/// SQLite store holding the single connection behind a mutex.
pub struct SqliteStore {
    conn: Mutex<Connection>,
    db_path: PathBuf,
}

fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

fn require_name(kind: &str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(Error::Validation(format!("{} name must not be empty", kind)));
    }
    Ok(())
}

impl SqliteStore {
    /// Open or create the SQLite store.
    ///
    /// `db_dir` is the directory (e.g., `data/db/`). The file will be `db_dir/touchline.db`.
    pub fn open(db_dir: impl AsRef<Path>) -> Result<Self> {
        let db_dir = db_dir.as_ref();
        std::fs::create_dir_all(db_dir)?;
        let db_path = db_dir.join("touchline.db");

        let conn = Self::create_connection(&db_path)?;
        conn.execute_batch(SCHEMA_SQL)
            .map_err(|e| Error::Database(format!("Schema init failed: {}", e)))?;

        let store = Self {
            conn: Mutex::new(conn),
            db_path,
        };

        let stats = store.get_stats()?;
        info!(
            "SqliteStore initialized: {} teams, {} players, {} matches, {} events, path={}",
            stats.teams,
            stats.players,
            stats.matches,
            stats.events,
            store.db_path.display()
        );

        Ok(store)
    }

    fn create_connection(db_path: &Path) -> Result<Connection> {
        let conn = Connection::open(db_path).map_err(|e| Error::Database(e.to_string()))?;
        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        Ok(conn)
    }

    // ---------------------------------------------------------------
    // Clubs
    // ---------------------------------------------------------------

    pub fn add_club(&self, name: &str) -> Result<i64> {
        require_name("Club", name)?;
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached("INSERT INTO clubs (name, created_at) VALUES (?1, ?2)")
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![name.trim(), now_millis()])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    pub fn get_club(&self, club_id: i64) -> Result<Option<Club>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM clubs WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![club_id], |row| Ok(Self::row_to_club(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    pub fn list_clubs(&self) -> Result<Vec<Club>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM clubs ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| Ok(Self::row_to_club(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    // ---------------------------------------------------------------
    // Teams and players
    // ---------------------------------------------------------------

    /// Insert a team, optionally under an existing club. Returns the new team ID.
    pub fn add_team(&self, club_id: Option<i64>, name: &str, age_group: Option<&str>) -> Result<i64> {
        require_name("Team", name)?;
        if let Some(club_id) = club_id {
            if self.get_club(club_id)?.is_none() {
                return Err(Error::NotFound(format!("club {}", club_id)));
            }
        }
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO teams (club_id, name, age_group, created_at) VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![club_id, name.trim(), age_group, now_millis()])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    pub fn list_teams(&self) -> Result<Vec<Team>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM teams ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| Ok(Self::row_to_team(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    pub fn get_team(&self, team_id: i64) -> Result<Option<Team>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM teams WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![team_id], |row| Ok(Self::row_to_team(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Insert a player on an existing team. Returns the new player ID.
    pub fn add_player(&self, team_id: i64, name: &str, position: Option<&str>) -> Result<i64> {
        require_name("Player", name)?;
        if self.get_team(team_id)?.is_none() {
            return Err(Error::NotFound(format!("team {}", team_id)));
        }
        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO players (team_id, name, position, created_at) VALUES (?1, ?2, ?3, ?4)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![team_id, name.trim(), position, now_millis()])
            .map_err(|e| Error::Database(e.to_string()))?;
        debug!("Added player {} ({}) to team {}", id, name, team_id);
        Ok(id)
    }

    pub fn get_player(&self, player_id: i64) -> Result<Option<Player>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM players WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![player_id], |row| Ok(Self::row_to_player(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// All players across teams, in id order.
    pub fn list_players(&self) -> Result<Vec<Player>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM players ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| Ok(Self::row_to_player(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Roster of a team in ascending id order. Unknown teams have an empty roster.
    pub fn get_team_roster(&self, team_id: i64) -> Result<Vec<RosterEntry>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT id, name, position FROM players WHERE team_id = ?1 ORDER BY id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![team_id], |row| {
                Ok(RosterEntry {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    position: row.get(2)?,
                })
            })
            .map_err(|e| Error::Database(e.to_string()))?;
        rows.collect::<rusqlite::Result<Vec<_>>>()
            .map_err(|e| Error::Database(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Matches
    // ---------------------------------------------------------------

    /// Insert a match for an existing team. Returns the new match ID.
    pub fn add_match(&self, new: &NewMatch) -> Result<i64> {
        require_name("Opponent", &new.opponent_name)?;
        if let Some(kickoff) = &new.kickoff_at {
            chrono::DateTime::parse_from_rfc3339(kickoff)
                .map_err(|e| Error::Validation(format!("kickoff_at '{}': {}", kickoff, e)))?;
        }
        if self.get_team(new.team_id)?.is_none() {
            return Err(Error::NotFound(format!("team {}", new.team_id)));
        }

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO matches (team_id, opponent_name, kickoff_at, competition, venue, created_at) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                new.team_id,
                new.opponent_name.trim(),
                new.kickoff_at,
                new.competition,
                new.venue,
                now_millis(),
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(id)
    }

    pub fn get_match(&self, match_id: i64) -> Result<Option<Match>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM matches WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![match_id], |row| Ok(Self::row_to_match(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    // ---------------------------------------------------------------
    // Events
    // ---------------------------------------------------------------

    /// Insert an event. Returns the new event ID.
    ///
    /// Does not check that the player belongs to the match team; callers do.
    pub fn add_event(&self, new: &NewEvent) -> Result<i64> {
        if new.event_type.trim().is_empty() {
            return Err(Error::Validation("event_type must not be empty".into()));
        }
        if self.get_match(new.match_id)?.is_none() {
            return Err(Error::NotFound(format!("match {}", new.match_id)));
        }
        let meta_json = new
            .metadata
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let team_context = new.team_context.as_deref().unwrap_or("us");

        let conn = self.conn.lock();
        let id = conn
            .prepare_cached(
                "INSERT INTO events (match_id, minute, event_type, team_context, player_id, \
                 raw_text, metadata_json, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            )
            .map_err(|e| Error::Database(e.to_string()))?
            .insert(params![
                new.match_id,
                new.minute,
                new.event_type,
                team_context,
                new.player_id,
                new.raw_text,
                meta_json,
                now_millis(),
            ])
            .map_err(|e| Error::Database(e.to_string()))?;
        debug!("Stored {} event {} for match {}", new.event_type, id, new.match_id);
        Ok(id)
    }

    pub fn get_event(&self, event_id: i64) -> Result<Option<Event>> {
        let conn = self.conn.lock();
        let row = conn
            .prepare_cached("SELECT * FROM events WHERE id = ?1")
            .map_err(|e| Error::Database(e.to_string()))?
            .query_row(params![event_id], |row| Ok(Self::row_to_event(row)))
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(row)
    }

    /// Events of a match ordered by minute, then insertion order.
    /// Events without a minute sort first.
    pub fn list_events_for_match(&self, match_id: i64) -> Result<Vec<Event>> {
        let conn = self.conn.lock();
        let mut stmt = conn
            .prepare_cached("SELECT * FROM events WHERE match_id = ?1 ORDER BY minute, id")
            .map_err(|e| Error::Database(e.to_string()))?;
        let rows = stmt
            .query_map(params![match_id], |row| Ok(Self::row_to_event(row)))
            .map_err(|e| Error::Database(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    /// Count a player's events by type, optionally within one match.
    pub fn player_event_counts(
        &self,
        player_id: i64,
        match_id: Option<i64>,
    ) -> Result<BTreeMap<String, i64>> {
        let conn = self.conn.lock();
        let mut counts = BTreeMap::new();
        let mut collect = |row: &rusqlite::Row<'_>| -> rusqlite::Result<()> {
            counts.insert(row.get::<_, String>(0)?, row.get::<_, i64>(1)?);
            Ok(())
        };

        match match_id {
            Some(mid) => {
                let mut stmt = conn
                    .prepare_cached(
                        "SELECT event_type, COUNT(*) FROM events \
                         WHERE player_id = ?1 AND match_id = ?2 GROUP BY event_type",
                    )
                    .map_err(|e| Error::Database(e.to_string()))?;
                let mut rows = stmt
                    .query(params![player_id, mid])
                    .map_err(|e| Error::Database(e.to_string()))?;
                while let Some(row) = rows.next().map_err(|e| Error::Database(e.to_string()))? {
                    collect(row).map_err(|e| Error::Database(e.to_string()))?;
                }
            }
            None => {
                let mut stmt = conn
                    .prepare_cached(
                        "SELECT event_type, COUNT(*) FROM events \
                         WHERE player_id = ?1 GROUP BY event_type",
                    )
                    .map_err(|e| Error::Database(e.to_string()))?;
                let mut rows = stmt
                    .query(params![player_id])
                    .map_err(|e| Error::Database(e.to_string()))?;
                while let Some(row) = rows.next().map_err(|e| Error::Database(e.to_string()))? {
                    collect(row).map_err(|e| Error::Database(e.to_string()))?;
                }
            }
        }

        Ok(counts)
    }

    // ---------------------------------------------------------------
    // Demo data
    // ---------------------------------------------------------------

    /// Insert the demo club, team, three players and a match.
    pub fn seed_demo_data(&self) -> Result<DemoSeed> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(|e| Error::Database(e.to_string()))?;
        let seeded = Self::insert_demo(&tx).map_err(|e| Error::Database(e.to_string()))?;
        tx.commit().map_err(|e| Error::Database(e.to_string()))?;
        info!("Seeded demo data: team {}, match {}", seeded.team_id, seeded.match_id);
        Ok(seeded)
    }

    /// Delete every row (children first), then insert the demo data.
    /// Both steps share one transaction.
    pub fn reset_demo_data(&self) -> Result<DemoSeed> {
        let mut conn = self.conn.lock();
        let tx = conn.transaction().map_err(|e| Error::Database(e.to_string()))?;
        tx.execute_batch(
            "DELETE FROM events;
             DELETE FROM matches;
             DELETE FROM players;
             DELETE FROM teams;
             DELETE FROM clubs;",
        )
        .map_err(|e| Error::Database(e.to_string()))?;
        let seeded = Self::insert_demo(&tx).map_err(|e| Error::Database(e.to_string()))?;
        tx.commit().map_err(|e| Error::Database(e.to_string()))?;
        info!("Reset store to demo data: team {}, match {}", seeded.team_id, seeded.match_id);
        Ok(seeded)
    }

    fn insert_demo(conn: &Connection) -> rusqlite::Result<DemoSeed> {
        let now = now_millis();
        conn.execute(
            "INSERT INTO clubs (name, created_at) VALUES (?1, ?2)",
            params!["Winchester FC", now],
        )?;
        let club_id = conn.last_insert_rowid();

        conn.execute(
            "INSERT INTO teams (club_id, name, age_group, created_at) VALUES (?1, ?2, ?3, ?4)",
            params![club_id, "U9 Reds", "U9", now],
        )?;
        let team_id = conn.last_insert_rowid();

        let mut player_ids = Vec::new();
        for (name, position) in [("Winston", "Striker"), ("Tommy", "Keeper"), ("Logan", "Defence")] {
            conn.execute(
                "INSERT INTO players (team_id, name, position, created_at) VALUES (?1, ?2, ?3, ?4)",
                params![team_id, name, position, now],
            )?;
            player_ids.push(conn.last_insert_rowid());
        }

        conn.execute(
            "INSERT INTO matches (team_id, opponent_name, kickoff_at, competition, venue, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![team_id, "Stoneham FC", "2025-10-04T10:00:00Z", "League", "Home Ground", now],
        )?;
        let match_id = conn.last_insert_rowid();

        Ok(DemoSeed {
            club_id,
            team_id,
            match_id,
            player_ids,
        })
    }

    // ---------------------------------------------------------------
    // Stats
    // ---------------------------------------------------------------

    fn count_rows(&self, table: &str) -> Result<i64> {
        let conn = self.conn.lock();
        conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))
            .map_err(|e| Error::Database(e.to_string()))
    }

    pub fn get_stats(&self) -> Result<StoreStats> {
        let db_size = std::fs::metadata(&self.db_path).map(|m| m.len()).unwrap_or(0);
        Ok(StoreStats {
            clubs: self.count_rows("clubs")?,
            teams: self.count_rows("teams")?,
            players: self.count_rows("players")?,
            matches: self.count_rows("matches")?,
            events: self.count_rows("events")?,
            db_path: self.db_path.to_string_lossy().to_string(),
            db_size_mb: db_size as f64 / (1024.0 * 1024.0),
        })
    }

    // ---------------------------------------------------------------
    // Row Mapping Helpers
    // ---------------------------------------------------------------

    fn row_to_club(row: &rusqlite::Row<'_>) -> Club {
        Club {
            id: row.get("id").unwrap_or(0),
            name: row.get("name").unwrap_or_default(),
            created_at: row.get("created_at").unwrap_or(0),
        }
    }

    fn row_to_team(row: &rusqlite::Row<'_>) -> Team {
        Team {
            id: row.get("id").unwrap_or(0),
            club_id: row.get("club_id").ok().flatten(),
            name: row.get("name").unwrap_or_default(),
            age_group: row.get("age_group").ok().flatten(),
            created_at: row.get("created_at").unwrap_or(0),
        }
    }

    fn row_to_player(row: &rusqlite::Row<'_>) -> Player {
        Player {
            id: row.get("id").unwrap_or(0),
            team_id: row.get("team_id").unwrap_or(0),
            name: row.get("name").unwrap_or_default(),
            position: row.get("position").ok().flatten(),
            created_at: row.get("created_at").unwrap_or(0),
        }
    }

    fn row_to_match(row: &rusqlite::Row<'_>) -> Match {
        Match {
            id: row.get("id").unwrap_or(0),
            team_id: row.get("team_id").unwrap_or(0),
            opponent_name: row.get("opponent_name").unwrap_or_default(),
            kickoff_at: row.get("kickoff_at").ok().flatten(),
            competition: row.get("competition").ok().flatten(),
            venue: row.get("venue").ok().flatten(),
            created_at: row.get("created_at").unwrap_or(0),
        }
    }

    fn row_to_event(row: &rusqlite::Row<'_>) -> Event {
        Event {
            id: row.get("id").unwrap_or(0),
            match_id: row.get("match_id").unwrap_or(0),
            minute: row.get("minute").ok().flatten(),
            event_type: row.get("event_type").unwrap_or_default(),
            team_context: row.get("team_context").unwrap_or_else(|_| "us".to_string()),
            player_id: row.get("player_id").ok().flatten(),
            raw_text: row.get("raw_text").ok().flatten(),
            metadata: row
                .get::<_, Option<String>>("metadata_json")
                .ok()
                .flatten()
                .and_then(|s| serde_json::from_str(&s).ok()),
            created_at: row.get("created_at").unwrap_or(0),
        }
    }
}

impl RosterSource for SqliteStore {
    fn team_roster(&self, team_id: i64) -> Result<Vec<RosterEntry>> {
        self.get_team_roster(team_id)
            .map_err(|e| Error::RosterFetch(e.to_string()))
    }
}
