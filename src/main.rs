//! Binary entrypoint for the SwiftFood CLI.
//!
//! Commands:
//! - `start [--data-dir <path>]` - run the interactive game shell
//! - `init` - create a starter `config.toml` and the save store directory
//! - `status` - print a JSON summary of the store and configuration
//!
//! See the library crate docs for module-level details: `swiftfood::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;

use swiftfood::config::Config;
use swiftfood::game::SaveStore;
use swiftfood::shell::GameShell;

#[derive(Parser)]
#[command(name = "swiftfood")]
#[command(about = "A cooking-themed progression mini-game for the terminal")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the interactive game shell
    Start {
        /// Override the configured save data directory
        #[arg(short, long)]
        data_dir: Option<String>,
    },
    /// Initialize a new game configuration
    Init,
    /// Show save store status and configuration summary
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (except for Init which writes
    // the default file later).
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    match cli.command {
        Commands::Start { data_dir } => {
            let mut config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            // CLI overrides config; fallback to the configured directory.
            if let Some(dir) = data_dir {
                config.storage.data_dir = dir;
            }
            info!("Starting SwiftFood v{}", env!("CARGO_PKG_VERSION"));

            let mut shell = GameShell::new(config)?;
            shell.run().await?;
        }
        Commands::Init => {
            info!("Initializing new SwiftFood configuration");
            let config = Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);

            let _ = SaveStore::open(&config.storage.data_dir)?;
            info!("Save store initialized at {}", config.storage.data_dir);
        }
        Commands::Status => {
            let config = match pre_config {
                Some(config) => config,
                None => Config::load(&cli.config).await?,
            };
            let store = SaveStore::open(&config.storage.data_dir)?;
            let players = store.list_save_names()?;
            let payload = serde_json::json!({
                "game": config.game.name,
                "data_dir": config.storage.data_dir,
                "snapshots": players.len(),
                "players": players,
                "autosave_interval_secs": config.game.autosave_interval_secs,
            });
            println!("{}", payload);
        }
    }

    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // Base level from CLI verbosity overrides config
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|cfg| cfg.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config.as_ref().and_then(|cfg| cfg.logging.file.clone());
    if let Some(file) = log_file {
        if let Ok(f) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&file)
        {
            let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));

            // If stdout is a terminal, echo records to the console as well as
            // the file; when redirected, write to the file only.
            let is_tty = atty::is(atty::Stream::Stdout);

            builder.format(move |fmt, record| {
                let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
                let line = format!("{} [{}] {}", ts, record.level(), record.args());

                if let Ok(mut guard) = write_mutex.lock() {
                    let _ = writeln!(guard, "{}", line);
                }

                if is_tty {
                    writeln!(fmt, "{}", line)
                } else {
                    Ok(())
                }
            });
        } else {
            builder.format(|fmt, record| {
                writeln!(
                    fmt,
                    "{} [{}] {}",
                    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                    record.level(),
                    record.args()
                )
            });
        }
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
