//! Explorer binary entry point

use std::time::Duration;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

use explorer::{
    Explorer, ExplorerConfig, ExplorerResult, SessionSnapshot,
    cli::{self, ReplCommand},
    services::RealScoringService,
};
use shared::{QueryKind, logging, session_info};

#[derive(Parser, Debug)]
#[command(name = "explorer")]
#[command(about = "Interactive explorer for an n-gram language-model service")]
struct Args {
    /// Base URL of the scoring service (overrides LM_SERVICE_URL)
    #[arg(long)]
    service_url: Option<String>,

    /// Quiet interval before a typed query is sent, in milliseconds
    #[arg(long)]
    debounce_ms: Option<u64>,

    /// Per-request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Number of successful queries kept in history
    #[arg(long)]
    history: Option<usize>,

    /// Suggestions kept per smoothing variant
    #[arg(long)]
    top_k: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn into_config(self) -> ExplorerResult<ExplorerConfig> {
        let mut config = ExplorerConfig::from_env()?;

        if let Some(url) = self.service_url {
            config = config.with_service_url(url);
        }
        if let Some(ms) = self.debounce_ms {
            config = config.with_debounce(Duration::from_millis(ms));
        }
        if let Some(ms) = self.timeout_ms {
            config = config.with_request_timeout(Duration::from_millis(ms));
        }
        if let Some(capacity) = self.history {
            config = config.with_history_capacity(capacity);
        }
        if let Some(top_k) = self.top_k {
            config = config.with_top_k(top_k);
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> ExplorerResult<()> {
    dotenvy::dotenv().ok();

    let args = Args::parse();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = args.into_config()?;
    let service = RealScoringService::new(&config)?;
    let (explorer, handle) = Explorer::new(service, &config);
    let session_id = handle.session_id().clone();
    logging::log_startup(&session_id, &format!("scoring service at {}", config.service_url));

    let explorer_task = tokio::spawn(explorer.run());

    // Print every published change of the autocomplete slot as it arrives;
    // submitted queries are printed by the REPL once they settle
    let mut live = handle.subscribe();
    let printer = tokio::spawn(async move {
        let mut last_printed = None;
        while live.changed().await.is_ok() {
            let snapshot = live.borrow_and_update().clone();
            let slot = snapshot.slot(QueryKind::Autocomplete);
            if slot.is_loading() {
                continue;
            }
            let shown = (slot.current_query.clone(), slot.result.clone(), slot.error.clone());
            if shown.0.is_some() && last_printed.as_ref() != Some(&shown) {
                print!("{}", cli::render_kind(&snapshot, QueryKind::Autocomplete));
                last_printed = Some(shown);
            }
        }
    });

    println!("session {} -> {}", session_id.short(), config.service_url);
    println!("{}", cli::HELP);
    session_info!(session_id, "Connected to {}", config.service_url);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut settled = handle.subscribe();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = signal::ctrl_c() => None,
        };
        let Some(line) = line else { break };
        let Some(command) = ReplCommand::parse(&line) else { continue };

        match command {
            ReplCommand::Type { kind, text } => handle.input(kind, text)?,
            ReplCommand::Submit { kind, text } if text.trim().is_empty() => handle.clear(kind)?,
            ReplCommand::Submit { kind, text } => {
                let previous = last_sequence(&settled.borrow_and_update(), kind);
                handle.submit(kind, text)?;
                // Wait until this submission settles, then show it
                let wait = settled.wait_for(|snapshot| {
                    !snapshot.is_loading(kind) && last_sequence(snapshot, kind) > previous
                });
                if tokio::time::timeout(config.request_timeout * 2, wait).await.is_ok() {
                    print!("{}", cli::render_kind(&handle.snapshot(), kind));
                }
            }
            ReplCommand::Clear { kind } => handle.clear(kind)?,
            ReplCommand::History => print!("{}", cli::render_history(&handle.snapshot())),
            ReplCommand::Show => print!("{}", cli::render_snapshot(&handle.snapshot())),
            ReplCommand::Help => println!("{}", cli::HELP),
            ReplCommand::Quit => break,
            ReplCommand::Unknown { input } => println!("unknown command: {} (try help)", input),
        }
    }

    handle.shutdown()?;
    match explorer_task.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => logging::log_error(&session_id, "explorer loop", &e),
        Err(e) => logging::log_error(&session_id, "explorer task", &e),
    }
    printer.abort();

    logging::log_shutdown(&session_id, "user quit");
    Ok(())
}

fn last_sequence(snapshot: &SessionSnapshot, kind: QueryKind) -> u64 {
    snapshot
        .slot(kind)
        .current_query
        .as_ref()
        .map_or(0, |query| query.sequence())
}
