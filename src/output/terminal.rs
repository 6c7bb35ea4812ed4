// Colored terminal output for fetched texts and word frequency tables.

use colored::Colorize;

use crate::text::FrequencyTable;

/// Display fetched texts with a short preview of each.
pub fn display_texts(title: &str, texts: &[String]) {
    println!(
        "\n{}",
        format!("=== {} ({}) ===", title, texts.len()).bold()
    );
    if texts.is_empty() {
        println!("  {}", "(none)".dimmed());
        return;
    }
    for (i, text) in texts.iter().enumerate() {
        let preview = super::truncate_chars(&text.replace('\n', " "), 100);
        println!("  {:>3}. {}", i + 1, preview.dimmed());
    }
}

/// Display a frequency table as a ranked list with proportional bars.
pub fn display_word_table(table: &FrequencyTable, total_distinct: usize) {
    if table.is_empty() {
        println!("No words to show. Fetch some posts or messages first.");
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Word Scores ({} of {} distinct words) ===",
            table.len(),
            total_distinct
        )
        .bold()
    );
    println!();
    println!(
        "  {:>4}  {:<24} {:>8}",
        "#".dimmed(),
        "Word".dimmed(),
        "Score".dimmed()
    );
    println!("  {}", "-".repeat(60).dimmed());

    let bar_width: usize = 20;
    let max = table.max_score();

    for (i, entry) in table.iter().enumerate() {
        let filled = if max > 0.0 {
            ((entry.score / max) * bar_width as f64).round() as usize
        } else {
            0
        };
        let bar = "=".repeat(filled);
        let colored_bar = if entry.score >= max * 0.66 {
            bar.bright_green()
        } else if entry.score >= max * 0.33 {
            bar.bright_yellow()
        } else {
            bar.bright_blue()
        };

        println!(
            "  {:>4}. {:<24} {:>8.2}  {}",
            i + 1,
            entry.word.bold(),
            entry.score,
            colored_bar
        );
    }
    println!();
}
