//! Debate format listing command.

use colored::Colorize;

use rhetor_core::catalog::get_default_formats;

pub fn run() {
    for format in get_default_formats() {
        println!(
            "{} {}",
            format.name.bold(),
            format!(
                "[{} | {} | {} | {}]",
                format.id, format.tier, format.participants, format.duration_label
            )
            .bright_black()
        );
        println!("  {}", format.description);
        for (i, stage) in format.structure.iter().enumerate() {
            println!("    {}. {}", i + 1, stage);
        }
        println!();
    }
}
