//! Interactive sparring session command.
//!
//! A rustyline REPL drives one practice session. A background interval task
//! ticks the stage clock once per second, submissions resolve on a spawned
//! task so the prompt stays responsive, and resolved turns come back over a
//! channel tagged with the session id.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, Result};
use colored::Colorize;
use rustyline::Editor;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tokio::sync::{Mutex, mpsc, oneshot};

use rhetor_application::{PracticeRun, PracticeUseCase, TurnOutcome};
use rhetor_core::catalog::{DebateTopic, find_format, get_default_topics};
use rhetor_interaction::COACH_MAYA;

use super::utils::{self, AgentArgs};

/// One resolved turn, tagged so replies for a replaced session are dropped.
struct TurnEvent {
    session_id: String,
    outcome: TurnOutcome,
}

/// CLI helper for rustyline that provides completion, highlighting, and
/// hints for the session slash commands.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/pause".to_string(),
                "/quit".to_string(),
                "/skip".to_string(),
                "/start".to_string(),
                "/status".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

pub async fn run(
    topic: Option<String>,
    format_id: String,
    side: String,
    max_difficulty: Option<u8>,
    agent_args: AgentArgs,
) -> Result<()> {
    // ===== Backend wiring =====
    let settings = utils::load_settings();
    let selector = utils::build_selector(agent_args.seed);
    let agent = utils::build_agent(&agent_args, &settings, &selector);
    let agent_label = agent.describe().to_string();
    let progress_repository = Arc::new(utils::open_progress_repository()?);
    let archive_repository = Arc::new(utils::open_archive_repository().await?);
    let usecase = Arc::new(PracticeUseCase::new(
        agent,
        progress_repository,
        archive_repository,
        Arc::clone(&selector),
        settings,
    ));

    let user_side = utils::parse_side(&side)?;
    let format = find_format(&format_id)
        .with_context(|| format!("unknown format '{format_id}' (see `rhetor formats`)"))?;
    let topic = resolve_topic(&usecase, topic, max_difficulty).await?;

    let mut run = usecase.start_session(&topic, user_side, &format)?;
    run.session.start_timer();
    let session_id = run.session.id.clone();
    let persona_name = run.persona.name;
    let opening = run.opening_announcement();

    println!("{}", "=== Rhetor Sparring ===".bright_magenta().bold());
    println!("{} {}", "Motion:".bold(), topic.description);
    println!(
        "{} {} - {}",
        "You argue:".bold(),
        user_side,
        topic.position_for(user_side)
    );
    println!(
        "{} {} ({})",
        "Format:".bold(),
        format.name,
        format.duration_label
    );
    println!("{} {}", "Opponent:".bold(), agent_label);
    println!(
        "{}",
        "Slash commands: /start /pause /skip /status /quit. Anything else is your argument."
            .bright_black()
    );
    println!();
    println!("{}", format!("[{persona_name}]").bright_magenta());
    println!("{}", opening.bright_blue());
    println!();
    print_stage(&run);

    let run = Arc::new(Mutex::new(run));

    // ===== Background tasks =====
    // Ticker: one tick per second until shutdown.
    let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
    let ticker_run = Arc::clone(&run);
    let ticker = tokio::spawn(async move {
        let mut shutdown_rx = shutdown_rx;
        let mut interval = tokio::time::interval(Duration::from_secs(1));
        // The first tick completes immediately; consume it so the clock
        // starts moving one second from now.
        interval.tick().await;
        loop {
            tokio::select! {
                _ = interval.tick() => {
                    ticker_run.lock().await.session.tick();
                }
                _ = &mut shutdown_rx => break,
            }
        }
    });

    // Turn handler: prints resolved turns as they arrive.
    let (event_tx, mut event_rx) = mpsc::channel::<TurnEvent>(8);
    let handler_session_id = session_id.clone();
    let handler_run = Arc::clone(&run);
    let handler = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            if event.session_id != handler_session_id {
                // A resolution for a session that is no longer live.
                continue;
            }
            print_outcome(persona_name, &event.outcome);
            if event.outcome.final_score.is_none() {
                let mut run = handler_run.lock().await;
                resume_clock(&mut run);
                print_stage(&run);
            }
        }
    });

    // ===== Main REPL loop =====
    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    loop {
        {
            let run = run.lock().await;
            if run.session.is_complete() {
                break;
            }
        }

        let readline = rl.readline(">> ");
        match readline {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                let mut session_over = false;
                match trimmed {
                    "/quit" | "quit" | "exit" => {
                        close_early(&usecase, &run).await;
                        session_over = true;
                    }
                    "/start" => {
                        run.lock().await.session.start_timer();
                        println!("{}", "Clock running.".bright_black());
                    }
                    "/pause" => {
                        run.lock().await.session.pause_timer();
                        println!("{}", "Clock paused.".bright_black());
                    }
                    "/status" => {
                        print_status(&*run.lock().await);
                    }
                    "/skip" => {
                        let mut run = run.lock().await;
                        match usecase.advance_stage(&mut run).await {
                            Ok(Some(score)) => {
                                print_final_score(score);
                                session_over = true;
                            }
                            Ok(None) => {
                                resume_clock(&mut run);
                                print_stage(&run);
                            }
                            Err(e) => {
                                println!("{}", format!("Cannot skip: {e}").yellow());
                            }
                        }
                    }
                    other if other.starts_with('/') => {
                        println!("{}", "Unknown command".bright_black());
                    }
                    _ => {
                        println!("{}", format!("> {trimmed}").green());
                        println!(
                            "{}",
                            format!("({persona_name} is thinking...)").bright_black()
                        );

                        let tx = event_tx.clone();
                        let submit_usecase = Arc::clone(&usecase);
                        let submit_run = Arc::clone(&run);
                        let submit_id = session_id.clone();
                        let argument = trimmed.to_string();
                        tokio::spawn(async move {
                            let mut run = submit_run.lock().await;
                            match submit_usecase.submit_user_turn(&mut run, &argument).await {
                                Ok(outcome) => {
                                    drop(run);
                                    let _ = tx
                                        .send(TurnEvent {
                                            session_id: submit_id,
                                            outcome,
                                        })
                                        .await;
                                }
                                Err(e) => {
                                    drop(run);
                                    println!("{}", format!("Rejected: {e}").yellow());
                                }
                            }
                        });
                    }
                }
                if session_over {
                    break;
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!(
                    "{}",
                    "CTRL-C detected. Type '/quit' to end the session.".yellow()
                );
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                close_early(&usecase, &run).await;
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {err:?}").red());
                break;
            }
        }
    }

    // Stop the background tasks and wait for them to drain.
    let _ = shutdown_tx.send(());
    drop(event_tx);
    let _ = ticker.await;
    let _ = handler.await;

    Ok(())
}

/// Looks up the requested topic, or asks the use case for a suggestion.
async fn resolve_topic(
    usecase: &PracticeUseCase,
    requested: Option<String>,
    max_difficulty: Option<u8>,
) -> Result<DebateTopic> {
    match requested {
        Some(id) => get_default_topics()
            .into_iter()
            .find(|t| t.id == id)
            .with_context(|| format!("unknown topic '{id}' (see `rhetor topics`)")),
        None => usecase
            .suggest_topic(max_difficulty)
            .await
            .context("could not pick a topic"),
    }
}

/// Ends an unfinished session, keeping whatever was argued so far.
async fn close_early(usecase: &PracticeUseCase, run: &Arc<Mutex<PracticeRun>>) {
    let mut run = run.lock().await;
    if run.session.is_complete() || run.session.transcript.is_empty() {
        println!("{}", "Goodbye!".bright_green());
        return;
    }
    match usecase.abandon_session(&mut run).await {
        Ok(score) => {
            println!(
                "{}",
                format!("Session ended early. Score so far: {score}/100").yellow()
            );
        }
        Err(e) => {
            println!("{}", format!("Could not close the session: {e}").yellow());
        }
    }
}

/// Restarts the countdown when the session sits on a user stage.
fn resume_clock(run: &mut PracticeRun) {
    if run.session.is_user_turn() {
        run.session.start_timer();
    }
}

fn print_stage(run: &PracticeRun) {
    if run.session.is_complete() {
        return;
    }
    let stage = run.session.current_stage();
    let floor = if run.session.is_user_turn() {
        "your floor"
    } else {
        "opponent's floor"
    };
    println!(
        "{}",
        format!(
            "Stage {}/{}: {} ({}, {} on the clock)",
            run.session.current_stage_index + 1,
            run.session.stage_count(),
            stage.name,
            floor,
            utils::clock(run.session.remaining_secs),
        )
        .bright_cyan()
    );
    println!("{}", stage.prompt.bright_black());
    if !run.session.is_user_turn() {
        println!(
            "{}",
            "This stage belongs to the opponent; /skip moves past it.".bright_black()
        );
    }
}

fn print_status(run: &PracticeRun) {
    let session = &run.session;
    if session.is_complete() {
        println!("{}", "Session complete.".bright_green());
        return;
    }
    let stage = session.current_stage();
    println!("{}", format!("Motion: {}", session.topic).bright_cyan());
    println!(
        "Stage {}/{}: {}",
        session.current_stage_index + 1,
        session.stage_count(),
        stage.name
    );
    println!(
        "Clock: {} remaining ({})",
        utils::clock(session.remaining_secs),
        if session.timer_running {
            "running"
        } else {
            "paused"
        }
    );
    println!("Transcript: {} entries", session.transcript.len());
}

fn print_outcome(persona_name: &str, outcome: &TurnOutcome) {
    println!();
    println!("{}", format!("[{persona_name}]").bright_magenta());
    for line in outcome.reply.lines() {
        println!("{}", line.bright_blue());
    }
    if outcome.used_fallback {
        println!(
            "{}",
            "(offline reply - the endpoint was unavailable)".bright_black()
        );
    }
    if let Some(kind) = outcome.injected_fallacy {
        println!(
            "{}",
            format!("Fallacy alert: that reply leans on {kind}. Can you spot it?").red()
        );
    }
    if let Some(note) = &outcome.coaching {
        println!(
            "{}",
            format!("[Coach {} - {}] {}", COACH_MAYA.name, note.mood, note.tip).yellow()
        );
    }
    match outcome.final_score {
        Some(score) => {
            print_final_score(score);
            println!("{}", "Press Enter to exit.".bright_black());
        }
        None => println!(),
    }
}

fn print_final_score(score: u8) {
    println!();
    println!(
        "{}",
        format!("Session complete! Score: {score}/100")
            .bright_green()
            .bold()
    );
    println!(
        "{}",
        "The transcript is archived; see `rhetor progress`.".bright_black()
    );
}
