//! Topic catalog listing command.

use colored::Colorize;

use rhetor_core::catalog::get_default_topics;

pub fn run(max_difficulty: Option<u8>, category: Option<String>) {
    let mut topics = get_default_topics();
    if let Some(cap) = max_difficulty {
        topics.retain(|t| t.difficulty <= cap);
    }
    if let Some(category) = category {
        let needle = category.to_ascii_lowercase();
        topics.retain(|t| t.category.to_ascii_lowercase() == needle);
    }

    if topics.is_empty() {
        println!("{}", "No topics match those filters.".yellow());
        return;
    }

    for topic in topics {
        println!(
            "{} {}",
            topic.title.bold(),
            format!(
                "[{} | difficulty {}/5 | {}]",
                topic.category, topic.difficulty, topic.id
            )
            .bright_black()
        );
        println!("  {}", topic.description);
        println!("  {} {}", "for:".green(), topic.for_position);
        println!("  {} {}", "against:".red(), topic.against_position);
        println!();
    }
}
