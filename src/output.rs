//! Terminal rendering helpers. Presentation only; nothing here mutates
//! client or registry state.

use crate::api::schema::{Relevance, SourceSnippet};
use crate::registry::{ConnectionState, FileEntry, RegistrySnapshot};
use console::style;
use regex::Regex;

pub fn print_answer(answer: &str, sources: &[SourceSnippet], question: &str) {
    println!("{}", style("Answer:").bold());
    println!("{answer}");
    if sources.is_empty() {
        return;
    }
    println!();
    println!("{}", style("Source snippets:").bold());
    for src in sources {
        let score = format!("Score: {:.2}", src.score);
        let score = match src.relevance() {
            Relevance::High => style(score).green(),
            Relevance::Medium => style(score).yellow(),
            Relevance::Low => style(score).red(),
        };
        println!("  {} [{}]", style(&src.source).italic(), score);
        println!("    {}", highlight_keywords(&src.snippet, question));
    }
}

pub fn print_files(files: &[FileEntry]) {
    if files.is_empty() {
        println!("no files uploaded");
        return;
    }
    for entry in files {
        println!("  {:<40} {}", entry.name, style(entry.kind().label()).dim());
    }
}

pub fn print_snapshot(snapshot: &RegistrySnapshot) {
    let state = match snapshot.connection {
        ConnectionState::Connecting => style("connecting").yellow(),
        ConnectionState::Open => style("live").green(),
        ConnectionState::Closed => style("closed").dim(),
        ConnectionState::Failed => style("disconnected").red(),
    };
    if !snapshot.loaded {
        println!("[{state}] loading files...");
        return;
    }
    println!("[{state}] {} file(s)", snapshot.files.len());
    print_files(&snapshot.files);
}

/// Cosmetic: emphasize question keywords inside a snippet. Trailing
/// punctuation is stripped from each keyword before matching.
pub fn highlight_keywords(text: &str, question: &str) -> String {
    let keywords: Vec<String> = question
        .split_whitespace()
        .map(|word| word.trim_matches(|c: char| c.is_ascii_punctuation()))
        .filter(|word| !word.is_empty())
        .map(regex::escape)
        .collect();
    if keywords.is_empty() {
        return text.to_string();
    }
    let pattern = format!(r"(?i)\b({})\b", keywords.join("|"));
    match Regex::new(&pattern) {
        Ok(re) => re
            .replace_all(text, |caps: &regex::Captures| {
                style(&caps[0]).bold().underlined().to_string()
            })
            .into_owned(),
        Err(_) => text.to_string(),
    }
}
