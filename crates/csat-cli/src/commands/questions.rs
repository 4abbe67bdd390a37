//! Print the questionnaire

use crate::console::CliConsole;
use anyhow::{Context, Result};
use colored::*;
use csat_core::{Catalog, Question};

pub fn execute(json: bool) -> Result<()> {
    let catalog = Catalog::standard();

    if json {
        let rendered = serde_json::to_string_pretty(catalog.all())
            .context("Failed to serialize questions")?;
        println!("{rendered}");
        return Ok(());
    }

    let console = CliConsole::new(false);
    console.print_header("Customer Satisfaction Survey");
    for question in catalog.all() {
        print_question(&console, question);
    }
    Ok(())
}

fn print_question(console: &CliConsole, question: &Question) {
    console.line("");
    console.line(&format!(
        "{} {}",
        format!("{}.", question.id).bold(),
        question.text
    ));
    console.line(&format!("   {}", format!("[{}]", question.kind).dimmed()));

    if let Some((low, high)) = &question.labels {
        console.line(&format!(
            "   {} .. {}   ({} .. {})",
            question.options.first().map(String::as_str).unwrap_or_default(),
            question.options.last().map(String::as_str).unwrap_or_default(),
            low,
            high
        ));
        return;
    }
    for option in &question.options {
        console.line(&format!("   • {option}"));
    }
}
