use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::utils::AgentArgs;

#[derive(Parser)]
#[command(name = "rhetor")]
#[command(about = "Rhetor - structured debate practice with an AI sparring partner", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run an interactive sparring session
    Practice {
        /// Catalog topic id (defaults to a pick matched to your level)
        #[arg(long)]
        topic: Option<String>,
        /// Debate format id (see `rhetor formats`)
        #[arg(long, default_value = "oxford")]
        format: String,
        /// The side you argue: "for" or "against"
        #[arg(long, default_value = "for")]
        side: String,
        /// Cap suggested topics at this difficulty (1-5)
        #[arg(long)]
        max_difficulty: Option<u8>,
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// List the debate topic catalog
    Topics {
        /// Only topics at or below this difficulty (1-5)
        #[arg(long)]
        max_difficulty: Option<u8>,
        /// Only topics in this category
        #[arg(long)]
        category: Option<String>,
    },
    /// List the debate format presets
    Formats,
    /// Practice spotting logical fallacies
    Drill {
        /// Cap exercises at this difficulty (1-5)
        #[arg(long)]
        max_difficulty: Option<u8>,
        #[command(flatten)]
        agent: AgentArgs,
    },
    /// Show your practice record
    Progress,
    /// Test the inference endpoint connection
    Check {
        /// Model id to test instead of the configured default
        #[arg(long)]
        model: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Practice {
            topic,
            format,
            side,
            max_difficulty,
            agent,
        } => commands::practice::run(topic, format, side, max_difficulty, agent).await?,
        Commands::Topics {
            max_difficulty,
            category,
        } => commands::topics::run(max_difficulty, category),
        Commands::Formats => commands::formats::run(),
        Commands::Drill {
            max_difficulty,
            agent,
        } => commands::drill::run(max_difficulty, agent).await?,
        Commands::Progress => commands::progress::run().await?,
        Commands::Check { model } => commands::check::run(model).await?,
    }

    Ok(())
}
