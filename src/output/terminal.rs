// Colored terminal output for uniqueness and similarity results.

use colored::Colorize;

use crate::corpus::fields;
use crate::pipeline::dedup::UniqueResult;
use crate::pipeline::similar::SimilarResult;
use crate::store::StoreKind;

/// Display the unique articles of a uniqueness run.
pub fn display_unique(result: &UniqueResult) {
    if result.is_empty() {
        println!("No unique articles — every reference article has a close match.");
        return;
    }

    println!(
        "\n{}",
        format!("=== Unique Articles ({}) ===", result.len()).bold()
    );
    println!();

    println!(
        "  {:>4}  {:<60} {:>10}",
        "#".dimmed(),
        "Title".dimmed(),
        "Uniqueness".dimmed(),
    );
    println!("  {}", "-".repeat(78).dimmed());

    for (i, unique) in result.records.iter().enumerate() {
        let title = super::truncate_chars(unique.record.title(), 57);
        println!(
            "  {:>4}. {:<60} {}",
            i + 1,
            title,
            colorize_uniqueness(unique.uniqueness_score),
        );
        if let Some(link) = unique.record.get(fields::CANONICAL_LINK) {
            if !link.is_empty() {
                println!("        {}", link.dimmed());
            }
        }
    }
    println!();
}

/// Display the matches of a similarity search.
pub fn display_similar(result: &SimilarResult) {
    if result.is_empty() {
        println!("No existing articles are similar to \"{}\".", result.topic);
        return;
    }

    println!(
        "\n{}",
        format!(
            "=== Articles similar to \"{}\" ({}) ===",
            result.topic,
            result.len()
        )
        .bold()
    );
    println!();

    for (i, m) in result.matches.iter().enumerate() {
        println!(
            "  {:>4}. {:<60} {}",
            i + 1,
            super::truncate_chars(&m.similar_title, 57),
            format!("{:.3}", m.similarity).bright_red(),
        );
        if let Some(meta) = m.record.get(fields::META_DESCRIPTION) {
            if !meta.is_empty() {
                println!("        {}", super::truncate_chars(meta, 100).dimmed());
            }
        }
    }
    println!();
}

/// Display what a prune removed, per folder.
pub fn display_pruned(removed: &[(StoreKind, Vec<String>)]) {
    let total: usize = removed.iter().map(|(_, names)| names.len()).sum();
    if total == 0 {
        println!("Nothing to delete.");
        return;
    }
    for (kind, names) in removed {
        for name in names {
            println!("  {} {}/{}", "Deleted:".yellow(), kind, name);
        }
    }
    println!("\n{}", format!("{total} files deleted.").bold());
}

/// Greener the more unique an article is.
fn colorize_uniqueness(score: f64) -> colored::ColoredString {
    let text = format!("{score:.3}");
    if score >= 0.9 {
        text.bright_green().bold()
    } else if score >= 0.7 {
        text.green()
    } else {
        text.yellow()
    }
}
