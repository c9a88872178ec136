//! memrank - interactive process list ranked by resident memory

use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use memrank::core::commands::CommandLoop;
use memrank::core::config::MonitorConfig;
use memrank::platform;

#[derive(Parser)]
#[command(name = "memrank")]
#[command(version, about = "Interactive process list ranked by resident memory", long_about = None)]
struct Cli {
    /// TOML configuration file (default: <config dir>/memrank/config.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(cli_verbosity: u8, configured: &str) -> Level {
    match cli_verbosity {
        0 => configured.parse().unwrap_or(Level::WARN),
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = MonitorConfig::resolve(cli.config.as_deref())?;

    // Diagnostics go to stderr so they never interleave with the table
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(cli.verbose, &config.log_level))
        .with_target(false)
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Starting memrank on {}", platform::platform_name());

    if let Err(e) = platform::prepare_console() {
        warn!("Console setup failed, output may be garbled: {}", e);
    }

    let source = platform::create_source(&config);
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut command_loop = CommandLoop::new(&source, stdin.lock(), stdout.lock(), &config);

    command_loop.run()?;
    info!("Exiting");
    Ok(())
}
