use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use pomtrack::cli::args::{expand_slip_alias, Cli, Commands};
use pomtrack::cli::commands;
use pomtrack::config::{Config, Paths};
use pomtrack::core::Clock;
use pomtrack::features::focus::SessionTracker;

/// Environment variable holding the tracing filter.
const LOG_ENV: &str = "POMTRACK_LOG";

fn main() {
    init_tracing();

    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run() -> Result<()> {
    let cli = Cli::parse_from(expand_slip_alias(std::env::args_os())?);
    let format = cli.output;
    let paths = Paths::new()?;

    let open = || -> Result<SessionTracker> {
        let config = Config::load(&paths).context("loading config")?;
        commands::open_tracker(&paths, &config).context("loading session record")
    };

    let output = match cli.command {
        Commands::Init { force } => commands::init(&paths, &Clock::System, force, format)?,
        Commands::Start { slip } => commands::start(&mut open()?, slip, format)?,
        Commands::Poll => commands::poll(&mut open()?, format)?,
        Commands::Done => commands::done(&mut open()?, format)?,
        Commands::Abort => commands::abort(&mut open()?, format)?,
        Commands::Reset => commands::reset(&mut open()?, format)?,
        Commands::Progress => commands::progress(&mut open()?, format)?,
        Commands::Log { show: true } => commands::show_log(&paths.last_log, format)?,
        Commands::Log { show: false } => {
            commands::log(&mut open()?, &paths.last_log, format).context("writing session log")?
        }
        Commands::Count => commands::count(&open()?, format)?,
        Commands::Announce => commands::announce(&mut open()?, format)?,
        Commands::Status => commands::status(&open()?, format)?,
        Commands::Completions { shell, install } => commands::completions(&shell, install)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}
