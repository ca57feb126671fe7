//! Touchline: match commentary to structured football events.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

mod routes;
mod state;

use state::AppState;
use touchline_parse::{CommandParser, ParserConfig};

fn resolve_data_dir() -> PathBuf {
    std::env::var("TOUCHLINE_DATA_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("data"))
}

fn print_usage() {
    println!("Touchline: football commentary parser");
    println!();
    println!("Usage: touchline [command]");
    println!();
    println!("Commands:");
    println!("  (none)                                     Start the server");
    println!("  parse <team-id> <text...> [--opponent N]   Parse one line against a stored roster");
    println!("  help                                       Show this help message");
}

/// `touchline parse <team-id> <text...> [--opponent NAME]...`
fn run_parse(args: &[String]) -> anyhow::Result<()> {
    let Some((team_arg, rest)) = args.split_first() else {
        anyhow::bail!("Usage: touchline parse <team-id> <text...> [--opponent NAME]");
    };
    let team_id: i64 = team_arg
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid team id: {}", team_arg))?;

    let mut words = Vec::new();
    let mut opponents = Vec::new();
    let mut iter = rest.iter();
    while let Some(arg) = iter.next() {
        if arg == "--opponent" {
            match iter.next() {
                Some(name) => opponents.push(name.clone()),
                None => anyhow::bail!("--opponent needs a name"),
            }
        } else {
            words.push(arg.as_str());
        }
    }
    if words.is_empty() {
        anyhow::bail!("Nothing to parse");
    }

    let config = touchline_core::TouchlineConfig::from_env(resolve_data_dir())?;
    let store = touchline_store::SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;
    let parser = CommandParser::new(&ParserConfig::load(&config.data_paths.parser_config_file));

    let parsed = parser.parse_and_enrich(&words.join(" "), &store, team_id, &opponents[..])?;
    println!("{}", serde_json::to_string_pretty(&parsed)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() > 1 {
        match args[1].as_str() {
            "parse" => {
                if let Err(e) = run_parse(&args[2..]) {
                    eprintln!("{}", e);
                    std::process::exit(1);
                }
                return Ok(());
            }
            "--help" | "-h" | "help" => {
                print_usage();
                return Ok(());
            }
            _ => {
                eprintln!("Unknown command: {}. Use 'touchline help' for usage.", args[1]);
                std::process::exit(1);
            }
        }
    }

    let data_dir = resolve_data_dir();
    info!("Data directory: {}", data_dir.display());

    let config = touchline_core::TouchlineConfig::from_env(&data_dir)?;
    let port = config.port;

    let store = touchline_store::SqliteStore::open(&config.data_paths.db)
        .map_err(|e| anyhow::anyhow!("Failed to open store: {}", e))?;

    let parser_config = ParserConfig::load(&config.data_paths.parser_config_file);
    info!(
        "Parser ready: {} intents, threshold {}",
        parser_config.intents.len(),
        parser_config.match_threshold
    );
    let parser = CommandParser::new(&parser_config);

    let state = Arc::new(AppState::new(config, store, parser));
    let app = routes::build_router(state);

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Touchline server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
