//! Headless fragment router.
//!
//! Loads a router configuration, starts the router against an in-memory
//! document, then replays a list of navigation sources, printing what each
//! one rendered.
//!
//! ```text
//! fragment-router --config router.toml "#/about/42" "#/missing" "#/home"
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use serde::Serialize;

use fragment_router::config::load_config;
use fragment_router::fragment::{BehaviorRegistry, StatusBehavior, StatusLine};
use fragment_router::observability::logging;
use fragment_router::{Document, MemoryDocument, NavigationEvent, NavigationOutcome, Router};

#[derive(Parser)]
#[command(name = "fragment-router")]
#[command(about = "Replay navigations through the fragment router", long_about = None)]
struct Cli {
    /// Router configuration file (TOML).
    #[arg(short, long, default_value = "router.toml")]
    config: PathBuf,

    /// Navigation source at page load.
    #[arg(long, default_value = "")]
    start: String,

    /// Print one JSON object per navigation.
    #[arg(long)]
    json: bool,

    /// Navigation sources to visit after start, in order.
    sources: Vec<String>,
}

#[derive(Serialize)]
struct Visit<'a> {
    source: &'a str,
    outcome: &'static str,
    route: Option<String>,
    from_cache: Option<bool>,
    status: Option<String>,
    markup_bytes: usize,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli.config)?;
    logging::init(&config.observability);

    tracing::info!(
        config = ?cli.config,
        routes = config.routes.len(),
        mode = ?config.navigation.mode,
        "fragment-router starting"
    );

    let status = StatusLine::new();
    let mut behaviors = BehaviorRegistry::new();
    for route in config.routes.values() {
        behaviors.register_module(
            route.fragment.as_str(),
            Arc::new(StatusBehavior::new(route.fragment.clone(), status.clone())),
        );
    }

    let document = Arc::new(MemoryDocument::new(cli.start.clone()));
    let router = Router::from_config(&config, document.clone(), behaviors)?;

    let outcome = router.handle(NavigationEvent::Ready).await;
    let start = document.location();
    report(&cli, &start, &outcome, &status, &document)?;

    for source in &cli.sources {
        document.set_location(source);
        let outcome = router.handle(NavigationEvent::HistoryChanged).await;
        report(&cli, source, &outcome, &status, &document)?;
    }

    tracing::info!(cached = router.cache().len(), "Replay complete");
    Ok(())
}

fn report(
    cli: &Cli,
    source: &str,
    outcome: &NavigationOutcome,
    status: &StatusLine,
    document: &MemoryDocument,
) -> Result<(), serde_json::Error> {
    let visit = Visit {
        source,
        outcome: match outcome {
            NavigationOutcome::Applied { .. } => "applied",
            NavigationOutcome::FellBack { .. } => "fell_back",
            NavigationOutcome::Failed { .. } => "failed",
            NavigationOutcome::Skipped => "skipped",
        },
        route: outcome.route().map(|r| r.to_string()),
        from_cache: outcome.from_cache(),
        status: status.get(),
        markup_bytes: document.view().map(|v| v.len()).unwrap_or(0),
    };

    if cli.json {
        println!("{}", serde_json::to_string(&visit)?);
    } else {
        println!(
            "{:<20} {:<10} route={:<12} cache={:<5} {}",
            visit.source,
            visit.outcome,
            visit.route.as_deref().unwrap_or("-"),
            visit.from_cache.map(|c| c.to_string()).unwrap_or_else(|| "-".into()),
            visit.status.as_deref().unwrap_or(""),
        );
    }
    Ok(())
}
