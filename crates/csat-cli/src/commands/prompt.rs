//! Terminal prompts for answering and editing questions

use anyhow::Result;
use colored::*;
use csat_core::{AnswerValue, FieldEdit, Question, QuestionType};
use dialoguer::{Input, MultiSelect, Password, Select, theme::ColorfulTheme};

const SKIP: &str = "(skip)";

pub fn password(prompt: &str) -> Result<String> {
    Ok(Password::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .interact()?)
}

pub fn password_with_confirmation() -> Result<(String, String)> {
    let password = self::password("Password")?;
    let confirm = self::password("Confirm password")?;
    Ok((password, confirm))
}

/// Heading line for a question, e.g. `3. Which of the following...`
pub fn heading(question: &Question) -> String {
    format!("{}. {}", question.id, question.text)
}

fn rating_hint(question: &Question) -> Option<String> {
    let (low, high) = question.labels.as_ref()?;
    let first = question.options.first()?;
    let last = question.options.last()?;
    Some(format!("{} = {}, {} = {}", first, low, last, high).dimmed().to_string())
}

/// Ask a question for the first time. `None` when the user skips it.
pub fn ask(question: &Question) -> Result<Option<AnswerValue>> {
    let theme = ColorfulTheme::default();
    println!();
    println!("{}", heading(question).cyan().bold());
    if let Some(hint) = rating_hint(question) {
        println!("{}", hint);
    }

    match question.kind {
        QuestionType::Rating | QuestionType::Single => {
            let mut items: Vec<&str> = question.options.iter().map(String::as_str).collect();
            items.push(SKIP);
            let choice = Select::with_theme(&theme)
                .items(&items)
                .default(0)
                .interact()?;
            Ok(question
                .options
                .get(choice)
                .map(|option| AnswerValue::Single(option.clone())))
        }
        QuestionType::Multiple => {
            let chosen = MultiSelect::with_theme(&theme)
                .with_prompt("Select all that apply (space to toggle, enter to confirm)")
                .items(&question.options)
                .interact()?;
            if chosen.is_empty() {
                return Ok(None);
            }
            Ok(Some(AnswerValue::List(
                chosen.into_iter().map(|i| question.options[i].clone()).collect(),
            )))
        }
        QuestionType::Text => {
            let text: String = Input::with_theme(&theme)
                .with_prompt("Your answer")
                .allow_empty(true)
                .interact_text()?;
            if text.trim().is_empty() {
                return Ok(None);
            }
            Ok(Some(AnswerValue::Single(text)))
        }
    }
}

/// Ask how to change an existing answer, as a sequence of edits
pub fn edits_for(question: &Question, current: Option<&AnswerValue>) -> Result<Vec<FieldEdit>> {
    let selected = |option: &str| current.is_some_and(|value| value.contains(option));
    let theme = ColorfulTheme::default();
    println!("{}", heading(question).cyan().bold());

    match question.kind {
        QuestionType::Rating | QuestionType::Single => {
            let default = question
                .options
                .iter()
                .position(|o| selected(o.as_str()))
                .unwrap_or(0);
            let choice = Select::with_theme(&theme)
                .items(&question.options)
                .default(default)
                .interact()?;
            Ok(vec![FieldEdit::Choose(question.options[choice].clone())])
        }
        QuestionType::Multiple => {
            let checked: Vec<bool> = question.options.iter().map(|o| selected(o.as_str())).collect();
            let chosen = MultiSelect::with_theme(&theme)
                .items(&question.options)
                .defaults(&checked)
                .interact()?;
            Ok(question
                .options
                .iter()
                .enumerate()
                .filter(|(i, _)| checked[*i] != chosen.contains(i))
                .map(|(_, option)| FieldEdit::Toggle(option.clone()))
                .collect())
        }
        QuestionType::Text => {
            let initial = current
                .and_then(|value| value.as_slice().first().cloned())
                .unwrap_or_default();
            let text: String = Input::with_theme(&theme)
                .with_prompt("Your answer")
                .with_initial_text(initial)
                .allow_empty(true)
                .interact_text()?;
            Ok(vec![FieldEdit::Text(text)])
        }
    }
}
