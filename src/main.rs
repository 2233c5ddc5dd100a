//! Demo program: registers two loggers, configures them from the command
//! line (optionally over a TOML file) and logs one message per level.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use startup_logging::config::load_options;
use startup_logging::{Logger, LoggerRegistry, LoggingOptions};

#[derive(Parser)]
#[command(name = "startup-logging")]
#[command(about = "Configure registered loggers from command-line flags", long_about = None)]
struct Cli {
    /// TOML file with logging options; flags given here take precedence.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(flatten)]
    logging: LoggingOptions,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let options = match &cli.config {
        Some(path) => load_options(path)?.merge(cli.logging),
        None => cli.logging,
    };

    let app = Logger::get("demo.app");
    let worker = Logger::get("demo.worker");

    // Without all_loggers, plain tracing events keep going to the usual fmt output.
    if !options.all_loggers {
        tracing_subscriber::registry()
            .with(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "warn".into()),
            )
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    let context = startup_logging::init(&options, LoggerRegistry::global())?;
    context.install_global()?;

    for logger in [&app, &worker] {
        logger.debug("debug message");
        logger.info("info message");
        logger.warning("warning message");
        logger.error("error message");
    }
    tracing::warn!(configured = context.configured_loggers().len(), "Plain tracing event");

    Ok(())
}
