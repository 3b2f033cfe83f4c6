pub mod commands;

use clap::{Parser, Subcommand};
use menubot_core::config::{AppConfig, LoadOptions, LogFormat};
use std::process::ExitCode;
use tracing::Level;

#[derive(Debug, Parser)]
#[command(
    name = "menubot",
    about = "Menubot operator CLI",
    long_about = "Operate the menubot ordering core: migrations, demo catalogue, config inspection and local conversation turns.",
    after_help = "Examples:\n  menubot seed\n  menubot reply --from 27820000001 \"update order 9:12, 7: 1x3\"\n  menubot price --from 27820000001"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the demo catalogue under the configured catalogue id")]
    Seed,
    #[command(
        about = "Inspect effective configuration values with source attribution and redaction"
    )]
    Config,
    #[command(about = "Run one conversation turn as if `message` arrived from `--from`")]
    Reply {
        #[arg(long, help = "Sender cell number")]
        from: String,
        #[arg(help = "Message body")]
        message: String,
    },
    #[command(about = "Price the sender's current order without starting a checkout")]
    Price {
        #[arg(long, help = "Sender cell number")]
        from: String,
    },
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    if let Ok(config) = AppConfig::load(LoadOptions::default()) {
        init_logging(&config);
    }

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Reply { from, message } => commands::reply::run(&from, &message),
        Command::Price { from } => commands::price::run(&from),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Logs go to stderr so stdout stays a single JSON payload.
pub fn init_logging(config: &AppConfig) {
    let log_level = config.logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(std::io::stderr);

    // try_init: a subscriber may already be installed by an embedding binary
    let _ = match config.logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
