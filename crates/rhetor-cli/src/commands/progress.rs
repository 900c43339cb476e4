//! Practice record display command.

use anyhow::{Context, Result};
use colored::Colorize;

use rhetor_core::progress::{ProgressRepository, UserProgress};
use rhetor_core::session::SessionArchiveRepository;

use super::utils;

pub async fn run() -> Result<()> {
    let progress_repository = utils::open_progress_repository()?;
    let progress = progress_repository
        .load()
        .await
        .context("could not read the progress file")?;

    match progress {
        None => {
            println!(
                "{}",
                "No practice recorded yet. Try `rhetor practice` or `rhetor drill`.".yellow()
            );
        }
        Some(progress) => print_record(&progress),
    }

    match utils::open_archive_repository().await {
        Ok(archive) => {
            let sessions = archive.list_all().await.unwrap_or_default();
            if !sessions.is_empty() {
                println!("{}", "Recent sessions:".bold());
                for session in sessions.iter().take(5) {
                    let status = if session.is_complete() {
                        "complete".green()
                    } else {
                        "unfinished".yellow()
                    };
                    println!(
                        "  {}  {}  {} entries  {}",
                        session.updated_at.get(..10).unwrap_or(&session.updated_at),
                        session.format_name,
                        session.transcript.len(),
                        status
                    );
                    println!("    {}", session.topic.bright_black());
                }
            }
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!("Could not open the session archive: {e}").yellow()
            );
        }
    }

    Ok(())
}

fn print_record(progress: &UserProgress) {
    println!("{}", "=== Your Record ===".bright_magenta().bold());
    println!("Skill level: {:.1}/5.0", progress.skill_level);
    println!(
        "Debates: {}   Drills: {}",
        progress.total_debate_count, progress.total_practice_count
    );
    println!(
        "Last score: {:.0}%",
        progress.last_performance_score * 100.0
    );

    if !progress.fallacy_accuracy.is_empty() {
        println!("{}", "Identification accuracy:".bold());
        let mut entries: Vec<(&String, &f32)> = progress.fallacy_accuracy.iter().collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (kind, accuracy) in entries {
            let line = format!("  {kind:<22} {:>3.0}%", accuracy * 100.0);
            if *accuracy < 0.5 {
                println!("{}", line.yellow());
            } else {
                println!("{line}");
            }
        }
    }

    if !progress.common_mistakes.is_empty() {
        println!(
            "{} {}",
            "Keep an eye on:".bold(),
            progress.common_mistakes.join(", ")
        );
    }
    println!();
}
