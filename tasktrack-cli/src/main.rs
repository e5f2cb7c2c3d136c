use std::path::PathBuf;

use clap::Parser;
use tasktrack_workspace::{LogFormat, TaskError, TaskManager, TrackerConfig};

mod render;
mod shell;

use shell::Shell;

#[derive(Parser, Debug)]
#[command(name = "tasktrack", version)]
#[command(about = "tasktrack - single-session task tracker backed by flat text files")]
struct Cli {
    /// Directory holding user.txt, tasks.txt and the overview reports
    #[arg(long)]
    data_dir: Option<PathBuf>,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log output format (pretty, json)
    #[arg(long)]
    log_format: Option<LogFormat>,
    /// Replace backing files through a temporary file and rename
    #[arg(long)]
    atomic_writes: bool,
}

fn resolve_config(cli: &Cli) -> Result<TrackerConfig, TaskError> {
    let mut config = match &cli.config {
        Some(path) => TrackerConfig::load_from_file(path)?,
        None => TrackerConfig::default(),
    };

    config.apply_env_overrides()?;

    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    if cli.atomic_writes {
        config.atomic_writes = true;
    }

    Ok(config)
}

fn init_tracing(format: LogFormat) {
    // Quiet by default so log lines do not interleave with the menu.
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr);

    let _ = match format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Pretty => builder.try_init(),
    };
}

fn main() {
    let cli = Cli::parse();

    let config = match resolve_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    init_tracing(config.log_format);

    let mut manager = match TaskManager::open(config) {
        Ok(manager) => manager,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load task tracker data");
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    };

    let stdin = std::io::stdin();
    let mut shell = Shell::new(stdin.lock(), std::io::stdout());
    if let Err(e) = shell.run(&mut manager) {
        tracing::error!(error = %e, "Session ended with an error");
        std::process::exit(1);
    }
}
