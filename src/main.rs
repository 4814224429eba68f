mod draw;
mod state;

use crate::state::app_settings::{AppSettings, BASE_URL_VAR, LOG_VAR, SNAPSHOT_VAR, TIMEOUT_VAR};
use log::{debug, info};
use nba_api::Scoreboard;
use tracing_subscriber::EnvFilter;

/// Used when stdout isn't a terminal.
const FALLBACK_WIDTH: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
enum CliAction {
    Show(OutputFormat),
    Help,
    Version,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let format = match parse_cli_args(std::env::args().skip(1)) {
        Ok(CliAction::Show(format)) => format,
        Ok(CliAction::Help) => {
            println!("{}", usage_text());
            return Ok(());
        }
        Ok(CliAction::Version) => {
            println!("nbatui {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        Err(arg) => {
            eprintln!("Unknown argument: {arg}\n\n{}", usage_text());
            std::process::exit(2);
        }
    };

    better_panic::install();

    let settings = AppSettings::load();
    setup_logging(&settings)?;
    debug!("settings: {settings:?}");

    let scoreboard = settings.api_client().fetch_scoreboard().await?;
    info!("{} games on the scoreboard", scoreboard.rows.len());

    print_scoreboard(&scoreboard, format)
}

fn parse_cli_args(args: impl Iterator<Item = String>) -> Result<CliAction, String> {
    let mut action = CliAction::Show(OutputFormat::Table);
    for arg in args {
        match arg.as_str() {
            "-h" | "--help" => return Ok(CliAction::Help),
            "-V" | "--version" => return Ok(CliAction::Version),
            "--json" => action = CliAction::Show(OutputFormat::Json),
            _ => return Err(arg),
        }
    }
    Ok(action)
}

fn usage_text() -> String {
    format!(
        "nbatui - today's NBA scoreboard

Usage:
  nbatui
  nbatui --json
  nbatui --help
  nbatui --version

Environment:
  {SNAPSHOT_VAR}   Path to a local scoreboard JSON snapshot
  {BASE_URL_VAR}    Base URL of the live-data CDN (default https://cdn.nba.com)
  {TIMEOUT_VAR}      Request timeout in seconds (default 30)
  {LOG_VAR}              Log filter when RUST_LOG is unset (default warn)"
    )
}

/// Logs go to stderr so stdout only carries the scoreboard.
fn setup_logging(settings: &AppSettings) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn print_scoreboard(scoreboard: &Scoreboard, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            let width = crossterm::terminal::size()
                .map(|(cols, _)| cols)
                .unwrap_or(FALLBACK_WIDTH);
            print!("{}", draw::render_scoreboard(scoreboard, width));
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&scoreboard.rows)?);
        }
    }
    Ok(())
}
