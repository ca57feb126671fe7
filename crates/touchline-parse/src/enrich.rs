//! Roster enrichment and the `parse_and_enrich` entry point.

use tracing::{debug, warn};

use touchline_core::{Result, RosterEntry, RosterSource};

use crate::parser::CommandParser;
use crate::types::{EnrichedParsedEvent, ParsedEvent, TeamContext};

/// Attach id and position of the roster entry whose name equals
/// `player_name` exactly. A missing entry leaves both fields empty.
pub fn enrich(parsed: ParsedEvent, roster: &[RosterEntry]) -> EnrichedParsedEvent {
    let entry = parsed
        .player_name
        .as_deref()
        .and_then(|name| roster.iter().find(|p| p.name == name));

    EnrichedParsedEvent {
        player_id: entry.map(|p| p.id),
        player_position: entry.and_then(|p| p.position.clone()),
        parsed,
    }
}

impl CommandParser {
    /// Fetch the team roster once, parse against it and enrich the result.
    pub fn parse_and_enrich<R, O>(
        &self,
        raw_text: &str,
        roster_source: &R,
        team_id: i64,
        opponent_names: &[O],
    ) -> Result<EnrichedParsedEvent>
    where
        R: RosterSource + ?Sized,
        O: AsRef<str>,
    {
        self.parse_and_enrich_in_context(
            raw_text,
            roster_source,
            team_id,
            opponent_names,
            TeamContext::Us,
        )
    }

    /// Like [`parse_and_enrich`](Self::parse_and_enrich), but opponent-context
    /// lines skip the roster fetch: no roster applies to the other side.
    pub fn parse_and_enrich_in_context<R, O>(
        &self,
        raw_text: &str,
        roster_source: &R,
        team_id: i64,
        opponent_names: &[O],
        context: TeamContext,
    ) -> Result<EnrichedParsedEvent>
    where
        R: RosterSource + ?Sized,
        O: AsRef<str>,
    {
        let roster = match context {
            TeamContext::Us => roster_source.team_roster(team_id)?,
            TeamContext::Opponent => Vec::new(),
        };
        debug!("Parsing against {} roster entries for team {}", roster.len(), team_id);

        let names: Vec<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        let parsed = self.parse(raw_text, &names, opponent_names);
        let enriched = enrich(parsed, &roster);

        if let (Some(name), None) = (&enriched.player_name, enriched.player_id) {
            warn!("Resolved player '{}' missing from roster of team {}", name, team_id);
        }

        Ok(enriched)
    }
}

/// Parse and enrich with the default configuration.
pub fn parse_and_enrich<R, O>(
    raw_text: &str,
    roster_source: &R,
    team_id: i64,
    opponent_names: &[O],
) -> Result<EnrichedParsedEvent>
where
    R: RosterSource + ?Sized,
    O: AsRef<str>,
{
    CommandParser::shared_default().parse_and_enrich(raw_text, roster_source, team_id, opponent_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use touchline_core::Error;

    use crate::types::EventType;

    const NO_OPPONENTS: &[&str] = &[];

    fn squad() -> Vec<RosterEntry> {
        vec![
            RosterEntry::new(1, "Tommy", Some("Keeper")),
            RosterEntry::new(3, "Winston", Some("Striker")),
            RosterEntry::new(5, "Logan", None),
        ]
    }

    fn parsed_for(player: Option<&str>) -> ParsedEvent {
        ParsedEvent {
            event_type: EventType::Goal,
            minute: None,
            player_name: player.map(str::to_string),
            player_name_raw: player.map(str::to_string),
            opponent: None,
            raw_text: "Goal".into(),
        }
    }

    #[test]
    fn test_enrich_copies_id_and_position() {
        let roster = vec![
            RosterEntry::new(1, "Tommy", None),
            RosterEntry::new(3, "Winston", Some("Striker")),
        ];
        let enriched = enrich(parsed_for(Some("Winston")), &roster);
        assert_eq!(enriched.player_id, Some(3));
        assert_eq!(enriched.player_position.as_deref(), Some("Striker"));
        assert_eq!(enriched.player_name.as_deref(), Some("Winston"));
    }

    #[test]
    fn test_enrich_without_position() {
        let enriched = enrich(parsed_for(Some("Logan")), &squad());
        assert_eq!(enriched.player_id, Some(5));
        assert_eq!(enriched.player_position, None);
    }

    #[test]
    fn test_enrich_divergence_leaves_none() {
        let enriched = enrich(parsed_for(Some("winston")), &squad());
        assert_eq!(enriched.player_id, None);
        assert_eq!(enriched.player_position, None);
        assert_eq!(enriched.player_name.as_deref(), Some("winston"));
    }

    #[test]
    fn test_enrich_no_player() {
        let enriched = enrich(parsed_for(None), &squad());
        assert_eq!(enriched.player_id, None);
    }

    #[test]
    fn test_parse_and_enrich() {
        let source = |team_id: i64| -> Result<Vec<RosterEntry>> {
            assert_eq!(team_id, 9);
            Ok(squad())
        };
        let event = parse_and_enrich("Goal Winston minute 12", &source, 9, NO_OPPONENTS).unwrap();
        assert_eq!(event.event_type, EventType::Goal);
        assert_eq!(event.minute, Some(12));
        assert_eq!(event.player_id, Some(3));
        assert_eq!(event.player_position.as_deref(), Some("Striker"));
    }

    #[test]
    fn test_single_roster_fetch() {
        let calls = Cell::new(0);
        let source = |_: i64| -> Result<Vec<RosterEntry>> {
            calls.set(calls.get() + 1);
            Ok(squad())
        };
        parse_and_enrich("Pass Tommy to Logan", &source, 1, NO_OPPONENTS).unwrap();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_fetch_failure_propagates() {
        let source = |_: i64| -> Result<Vec<RosterEntry>> {
            Err(Error::RosterFetch("store offline".into()))
        };
        let result = parse_and_enrich("Goal Winston", &source, 1, NO_OPPONENTS);
        assert!(matches!(result, Err(Error::RosterFetch(_))));
    }

    #[test]
    fn test_opponent_context_skips_fetch() {
        let source = |_: i64| -> Result<Vec<RosterEntry>> {
            panic!("roster must not be fetched for opponent events")
        };
        let event = CommandParser::default()
            .parse_and_enrich_in_context(
                "Goal Winston vs Stoneham",
                &source,
                1,
                &["Stoneham FC"],
                TeamContext::Opponent,
            )
            .unwrap();
        assert_eq!(event.event_type, EventType::Goal);
        assert_eq!(event.player_name, None);
        assert_eq!(event.player_id, None);
        assert_eq!(event.opponent.as_deref(), Some("Stoneham FC"));
    }

    #[test]
    fn test_dyn_roster_source() {
        let source = |_: i64| -> Result<Vec<RosterEntry>> { Ok(squad()) };
        let dyn_source: &dyn RosterSource = &source;
        let event = parse_and_enrich("Great save Tommy", dyn_source, 1, NO_OPPONENTS).unwrap();
        assert_eq!(event.player_id, Some(1));
        assert_eq!(event.player_position.as_deref(), Some("Keeper"));
    }
}
