//! Shared wiring helpers for the CLI commands.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Args;
use colored::Colorize;

use rhetor_core::catalog::Side;
use rhetor_core::config::Settings;
use rhetor_core::selector::{SeededSelector, SelectionStrategy};
use rhetor_infrastructure::paths::RhetorPaths;
use rhetor_infrastructure::storage::SettingsStorage;
use rhetor_infrastructure::{DirArchiveRepository, FileProgressRepository};
use rhetor_interaction::{HfInferenceAgent, ScriptedAgent, SparringAgent};

/// Flags shared by the commands that talk to the sparring agent.
#[derive(Args)]
pub struct AgentArgs {
    /// Run without the hosted inference endpoint
    #[arg(long)]
    pub offline: bool,
    /// Seed for deterministic persona and reply selection
    #[arg(long)]
    pub seed: Option<u64>,
    /// Hosted model id override (see `rhetor check`)
    #[arg(long)]
    pub model: Option<String>,
}

/// Loads settings from the platform config file, warning instead of failing.
pub fn load_settings() -> Settings {
    let storage = match SettingsStorage::default_location() {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!(
                "{}",
                format!("Could not locate the config directory ({e}); using defaults.").yellow()
            );
            return Settings::default();
        }
    };
    match storage.load_or_default() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!(
                "{}",
                format!("Could not read settings ({e}); using defaults.").yellow()
            );
            Settings::default()
        }
    }
}

/// Builds the selection strategy, seeded when requested.
pub fn build_selector(seed: Option<u64>) -> Arc<dyn SelectionStrategy> {
    match seed {
        Some(seed) => Arc::new(SeededSelector::from_seed(seed)),
        None => Arc::new(SeededSelector::from_entropy()),
    }
}

/// Builds the sparring agent from flags, settings, and stored credentials.
///
/// Without credentials the scripted offline agent is used instead, after
/// materializing the secret template so the user knows where a token goes.
pub fn build_agent(
    args: &AgentArgs,
    settings: &Settings,
    selector: &Arc<dyn SelectionStrategy>,
) -> Arc<dyn SparringAgent> {
    if args.offline {
        return Arc::new(ScriptedAgent::new(Arc::clone(selector)));
    }

    match HfInferenceAgent::try_from_env() {
        Ok(agent) => {
            let model = args.model.as_deref().or(settings.default_model.as_deref());
            let agent = match model {
                Some(model) => agent.with_model(model),
                None => agent,
            };
            Arc::new(agent)
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!("No inference credentials ({e}); running offline.").yellow()
            );
            if let Ok(path) = RhetorPaths::ensure_secret_file() {
                eprintln!(
                    "{}",
                    format!(
                        "Add your Hugging Face token to {} to enable hosted replies.",
                        path.display()
                    )
                    .bright_black()
                );
            }
            Arc::new(ScriptedAgent::new(Arc::clone(selector)))
        }
    }
}

/// Opens the progress record store at its platform location.
pub fn open_progress_repository() -> Result<FileProgressRepository> {
    FileProgressRepository::default_location().context("could not locate the progress file")
}

/// Opens the session archive at its platform location.
pub async fn open_archive_repository() -> Result<DirArchiveRepository> {
    DirArchiveRepository::default_location()
        .await
        .context("could not open the session archive")
}

/// Parses a debate side argument.
pub fn parse_side(raw: &str) -> Result<Side> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "for" | "affirmative" | "pro" => Ok(Side::For),
        "against" | "negative" | "con" => Ok(Side::Against),
        other => bail!("unknown side '{other}' (use \"for\" or \"against\")"),
    }
}

/// Formats seconds as m:ss for the stage clock.
pub fn clock(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
