//! Result watcher CLI
//!
//! Loads the watch target from the environment (or a `.env` file), then polls.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use result_watcher::{
    config::{self, Environment},
    error::Result,
    models::Settings,
    pipeline::{self, SleepPolicy},
    utils,
};

/// result-watcher - emails you when your result is published
#[derive(Parser, Debug)]
#[command(
    name = "result-watcher",
    version,
    about = "Polls a result listing and emails when the watched program code appears"
)]
struct Cli {
    /// Path to the settings file
    #[arg(short, long, default_value = "monitor.toml", global = true)]
    config: PathBuf,

    /// Path to a dotenv file (default: .env in the working directory, if any)
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll forever
    Run {
        /// Also serve the liveness endpoint; polling moves to a background task
        #[cfg(feature = "server")]
        #[arg(long)]
        serve: bool,
    },

    /// Poll once and print the outcome
    Check,

    /// Validate settings and environment
    Validate,

    /// Show the interval the schedule would pick right now
    Schedule,
}

/// Initialize logging based on verbosity flag and settings.
fn init_logging(verbose: bool, settings: &Settings) {
    let level = if verbose {
        "debug"
    } else {
        settings.logging.level.as_str()
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .init();
}

/// Exit status for errors found before the first poll.
const EXIT_CONFIG: u8 = 2;

/// Main entry point for the CLI application.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    // Settings are needed for the log level, so load them before logging is up
    // and report problems once it is.
    let settings = config::load_settings(&cli.config);
    init_logging(
        cli.verbose,
        settings.as_ref().unwrap_or(&Settings::default()),
    );

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_startup() => {
            log::error!("Configuration error: {}", e);
            ExitCode::from(EXIT_CONFIG)
        }
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, settings: Result<Settings>) -> Result<()> {
    let settings = settings?;

    config::load_dotenv(cli.env_file.as_deref())?;

    match cli.command {
        #[cfg(feature = "server")]
        Command::Run { serve } => {
            let environment = load_environment()?;
            let monitor = pipeline::build_monitor(&settings, &environment)?;
            if serve {
                pipeline::run_watch_with_server(monitor, &settings.server.bind).await?;
            } else {
                pipeline::run_watch(monitor).await?;
            }
        }

        #[cfg(not(feature = "server"))]
        Command::Run {} => {
            let environment = load_environment()?;
            let monitor = pipeline::build_monitor(&settings, &environment)?;
            pipeline::run_watch(monitor).await?;
        }

        Command::Check => {
            let environment = load_environment()?;
            let monitor = pipeline::build_monitor(&settings, &environment)?;
            let outcome = pipeline::run_check(&monitor).await;
            println!("{outcome}");
        }

        Command::Validate => {
            log::info!("Validating configuration...");
            let environment = load_environment()?;
            pipeline::build_monitor(&settings, &environment)?;
            log::info!("✓ Settings OK ({})", cli.config.display());
            log::info!(
                "✓ Environment OK (watching {} for {})",
                environment.target.url,
                environment.target.code
            );
        }

        Command::Schedule => {
            let policy = SleepPolicy::from_config(&settings.schedule)?;
            let interval = policy.next_interval_now();
            match policy.reference() {
                Some(reference) => println!(
                    "Reference time: {}",
                    utils::now_in(reference).format("%Y-%m-%d %H:%M:%S %:z")
                ),
                None => println!("Fixed schedule"),
            }
            println!(
                "Next interval: {}s ({} minutes)",
                interval.as_secs(),
                interval.as_secs() / 60
            );
        }
    }

    Ok(())
}

fn load_environment() -> Result<Environment> {
    Environment::from_env().inspect_err(|_| {
        log::error!("Set USER_EMAIL, PASSWORD, EMAIL, CODE and URL, or provide a .env file.");
    })
}
