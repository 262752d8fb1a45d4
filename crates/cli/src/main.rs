//! SignOff CLI - Main entry point

use clap::{Parser, Subcommand};
use signoff_cli::{commands, AppConfig, AppContext};
use signoff_core::{BusinessDate, SignOffForm};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "signoff")]
#[command(about = "Two-level report sign-off", long_about = None)]
struct Cli {
    /// JSON config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Data directory path (overrides config and SIGNOFF_DATA_DIR)
    #[arg(short, long)]
    data: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign off a report dataset
    Sign {
        /// FIRST or SECOND
        level: String,
        /// Report ID
        report: String,
        /// Dataset ID
        #[arg(long)]
        dataset: String,
        /// Data source ID
        #[arg(long)]
        source: String,
        /// Business date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
        /// Acting identity
        #[arg(long, env = "SIGNOFF_USER")]
        user: String,
    },

    /// Show sign-off state for a report and business date
    Status {
        /// Report ID
        report: String,
        /// Business date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List recorded sign-offs for a report
    History {
        /// Report ID
        report: String,
    },

    /// List reports and their reviewers
    Reports,

    /// Authorize an identity to sign off a report
    Grant {
        /// Report ID
        report: String,
        /// Reviewer identity
        identity: String,
        /// Display name for the report
        #[arg(long)]
        name: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = AppConfig::resolve(cli.config.as_deref(), cli.data)?;

    match cli.command {
        Commands::Sign {
            level,
            report,
            dataset,
            source,
            date,
            user,
        } => {
            let ctx = AppContext::new(config)?;
            let form = SignOffForm {
                level,
                business_date: date.unwrap_or_else(|| BusinessDate::today().to_string()),
                report_id: report,
                dataset_id: dataset,
                data_source_id: source,
            };
            commands::sign(&ctx, form, &user)?;
        }

        Commands::Status { report, date } => {
            let ctx = AppContext::new(config)?;
            let business_date = match date {
                Some(d) => d.parse()?,
                None => BusinessDate::today(),
            };
            commands::status(&ctx, &report, business_date)?;
        }

        Commands::History { report } => {
            let ctx = AppContext::new(config)?;
            commands::history(&ctx, &report)?;
        }

        Commands::Reports => {
            let ctx = AppContext::new(config)?;
            commands::reports(&ctx)?;
        }

        Commands::Grant {
            report,
            identity,
            name,
        } => {
            commands::grant(&config, &report, &identity, name.as_deref())?;
        }
    }

    Ok(())
}
