//! Fallacy-identification drill command.

use std::sync::Arc;

use anyhow::Result;
use colored::Colorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use rhetor_application::DrillUseCase;
use rhetor_core::catalog::{FallacyExample, get_default_fallacies};
use rhetor_core::selector::SelectionStrategy;
use rhetor_interaction::COACH_MAYA;

use super::utils::{self, AgentArgs};

pub async fn run(max_difficulty: Option<u8>, agent_args: AgentArgs) -> Result<()> {
    let settings = utils::load_settings();
    let selector = utils::build_selector(agent_args.seed);
    let agent = utils::build_agent(&agent_args, &settings, &selector);
    let progress_repository = Arc::new(utils::open_progress_repository()?);
    let usecase = DrillUseCase::new(agent, progress_repository, Arc::clone(&selector));

    println!("{}", "=== Fallacy Drill ===".bright_magenta().bold());
    println!(
        "{}",
        "Name the fallacy in each argument. Answer with a number or a name; 'quit' exits."
            .bright_black()
    );
    println!();

    let mut rl = DefaultEditor::new()?;

    loop {
        let exercise = usecase.next_exercise(max_difficulty).await?;
        let options = answer_options(selector.as_ref(), &exercise);

        println!(
            "{}",
            format!("Difficulty {}/5", exercise.difficulty).bright_black()
        );
        println!("{}", exercise.argument.bold());
        for (i, option) in options.iter().enumerate() {
            println!("  {}. {}", i + 1, option);
        }

        let answer = match rl.readline("Your call > ") {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        let answer = answer.trim();
        if answer.is_empty() {
            continue;
        }
        if answer.eq_ignore_ascii_case("quit") || answer.eq_ignore_ascii_case("exit") {
            break;
        }
        let _ = rl.add_history_entry(answer);

        // A number picks from the printed options; anything else is taken as
        // the fallacy name itself.
        let answer = match answer.parse::<usize>() {
            Ok(n) if (1..=options.len()).contains(&n) => options[n - 1].clone(),
            _ => answer.to_string(),
        };

        let report = usecase.grade(&exercise, &answer).await;
        if report.correct {
            println!("{}", "Correct!".bright_green().bold());
        } else {
            println!(
                "{}",
                format!("Not quite - this one is {}.", exercise.kind).red()
            );
        }
        if let Some(passage) = exercise
            .span
            .and_then(|span| exercise.argument.get(span.start..span.end))
        {
            println!("{} {}", "Key passage:".bold(), passage.red());
        }
        println!("{}", exercise.explanation.bright_black());
        println!(
            "{}",
            format!("[Coach {}] {}", COACH_MAYA.name, report.feedback).yellow()
        );
        if report.used_fallback {
            println!(
                "{}",
                "(offline feedback - the endpoint was unavailable)".bright_black()
            );
        }
        println!(
            "{}",
            format!(
                "Skill level {:.1}/5.0 | {} drills done",
                report.progress.skill_level, report.progress.total_practice_count
            )
            .bright_cyan()
        );
        println!();
    }

    println!(
        "{}",
        "Good session. See `rhetor progress` for your record.".bright_green()
    );
    Ok(())
}

/// Builds a four-way multiple choice: the right answer plus three decoy
/// kinds drawn from the catalog.
fn answer_options(selector: &dyn SelectionStrategy, exercise: &FallacyExample) -> Vec<String> {
    let mut kinds: Vec<String> = get_default_fallacies()
        .into_iter()
        .map(|e| e.kind)
        .filter(|kind| kind != &exercise.kind)
        .collect();
    kinds.sort();
    kinds.dedup();

    let mut options = Vec::with_capacity(4);
    while options.len() < 3 && !kinds.is_empty() {
        let index = selector.pick_index(kinds.len());
        options.push(kinds.swap_remove(index));
    }
    let slot = selector.pick_index(options.len() + 1);
    options.insert(slot, exercise.kind.clone());
    options
}
