//! Review and edit a submitted survey

use super::prompt;
use crate::args::LoginArgs;
use crate::console::CliConsole;
use anyhow::{Result, anyhow};
use colored::*;
use csat_core::{Catalog, CsatConfig, Reconciler, ResponseEditor, UserId};
use dialoguer::{Select, theme::ColorfulTheme};

const NO_RESPONSES: &str = "No survey responses found. Please submit a survey first.";

pub async fn execute(config: &CsatConfig, login: &LoginArgs) -> Result<()> {
    let console = CliConsole::new(false);
    let reconciler = Reconciler::new(super::connect(config)?);
    let user = super::login(&console, &reconciler, login).await?;

    let mut editor = ResponseEditor::new();
    let spinner = console.spinner("Loading responses...");
    let loaded = editor.load(&reconciler, Some(&user)).await;
    spinner.finish_and_clear();

    if let Err(e) = loaded {
        tracing::debug!(error = %e, "loading responses failed");
        let message = editor.last_error().unwrap_or(NO_RESPONSES).to_string();
        return Err(anyhow!(message));
    }
    if !editor.has_submission() {
        console.warn(NO_RESPONSES);
        return Ok(());
    }

    let theme = ColorfulTheme::default();
    loop {
        print_entries(&console, &editor, "Your Survey Responses");

        let action = Select::with_theme(&theme)
            .items(&["Edit responses", "Exit"])
            .default(0)
            .interact()?;
        if action != 0 {
            return Ok(());
        }

        editor.begin_edit()?;
        edit_session(&console, &reconciler, &user, &mut editor).await?;
    }
}

/// Run one editing session until the changes are saved or cancelled
async fn edit_session(
    console: &CliConsole,
    reconciler: &Reconciler,
    user: &UserId,
    editor: &mut ResponseEditor,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    let catalog = Catalog::standard();

    while editor.is_editing() {
        print_entries(console, editor, "Editing Responses");

        let mut items: Vec<String> = catalog.all().iter().map(prompt::heading).collect();
        items.push("Save changes".green().to_string());
        items.push("Cancel".red().to_string());

        let choice = Select::with_theme(&theme)
            .with_prompt("Choose a question to change")
            .items(&items)
            .default(0)
            .interact()?;

        match catalog.all().get(choice) {
            Some(question) => {
                let current = editor
                    .working_copy()
                    .and_then(|working| working.get(question.id))
                    .map(|answer| &answer.value);
                for edit in prompt::edits_for(question, current)? {
                    if let Err(e) = editor.apply_edit(question, edit) {
                        console.error(&e.user_message());
                    }
                }
            }
            None if choice == catalog.len() => {
                let spinner = console.spinner("Saving changes...");
                let saved = editor.save(reconciler, Some(user)).await;
                spinner.finish_and_clear();
                match saved {
                    Ok(()) => console.success("Changes saved"),
                    Err(e) => {
                        tracing::debug!(error = %e, "saving changes failed");
                        console.error(editor.last_error().unwrap_or("Failed to save changes"));
                    }
                }
            }
            None => {
                editor.cancel()?;
                console.warn("Changes discarded");
            }
        }
    }
    Ok(())
}

fn print_entries(console: &CliConsole, editor: &ResponseEditor, title: &str) {
    console.print_header(title);
    for (question, value) in editor.entries(Catalog::standard()) {
        console.line(&prompt::heading(question).bold().to_string());
        console.line(&format!("   {}", value.display().cyan()));
    }
}
