//! Inference endpoint connection test.

use anyhow::Result;
use colored::Colorize;

use rhetor_infrastructure::paths::RhetorPaths;
use rhetor_interaction::{AVAILABLE_MODELS, DEFAULT_MODEL, HfInferenceAgent};

use super::utils;

pub async fn run(model: Option<String>) -> Result<()> {
    println!("{}", "=== Inference Check ===".bright_magenta().bold());

    match HfInferenceAgent::try_from_env() {
        Ok(agent) => {
            let settings = utils::load_settings();
            let agent = match model.or(settings.default_model) {
                Some(model) => agent.with_model(model),
                None => agent,
            };
            println!("Model: {}", agent.model().bold());
            println!("Contacting the endpoint...");
            match agent.ping().await {
                Ok(()) => println!("{}", "Connection OK.".bright_green().bold()),
                Err(e) => {
                    println!("{}", format!("Connection failed: {e}").red());
                    if let Some(wait) = e.retry_after() {
                        println!(
                            "{}",
                            format!(
                                "The model is still warming up; try again in about {}s.",
                                wait.as_secs()
                            )
                            .yellow()
                        );
                    }
                }
            }
        }
        Err(e) => {
            println!("{}", format!("Not configured: {e}").yellow());
            if let Ok(path) = RhetorPaths::ensure_secret_file() {
                println!(
                    "{}",
                    format!("Put your Hugging Face token in {}.", path.display()).bright_black()
                );
            }
        }
    }

    println!();
    println!("{}", "Available models:".bold());
    for info in &AVAILABLE_MODELS {
        let marker = if info.id == DEFAULT_MODEL {
            " (default)"
        } else {
            ""
        };
        println!("  {}{}", info.id.bold(), marker);
        println!("    {} - {}", info.label, info.notes);
    }

    Ok(())
}
