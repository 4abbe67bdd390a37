//! Answer the questionnaire and submit it

use super::prompt;
use crate::args::LoginArgs;
use crate::console::CliConsole;
use anyhow::Result;
use colored::*;
use csat_core::{AnswerStore, Catalog, CsatConfig, Reconciler, SurveyError, UserId};
use dialoguer::{Confirm, theme::ColorfulTheme};

const SUBMIT_FAILED: &str = "An error occurred while submitting the survey. Please try again.";

pub async fn execute(config: &CsatConfig, login: &LoginArgs) -> Result<()> {
    let console = CliConsole::new(false);
    let reconciler = Reconciler::new(super::connect(config)?);
    let user = super::login(&console, &reconciler, login).await?;

    console.print_header("Customer Satisfaction Survey");

    let mut store = AnswerStore::new(Catalog::standard());
    let progress = console.progress_bar();
    for question in store.catalog().all() {
        if let Some(value) = progress.suspend(|| prompt::ask(question))? {
            store.set_answer(question.id, value);
        }
        progress.set_position(u64::from(store.percent()));
    }
    progress.finish();

    if !store.is_complete() {
        let skipped: Vec<String> = store.unanswered().iter().map(u32::to_string).collect();
        console.warn(&format!("Unanswered questions: {}", skipped.join(", ")));
    }

    submit_with_retry(&console, &reconciler, &user, &store).await
}

/// Submit the composed answers, offering to retry transient failures.
///
/// The answers stay in the store between attempts.
async fn submit_with_retry(
    console: &CliConsole,
    reconciler: &Reconciler,
    user: &UserId,
    store: &AnswerStore<'_>,
) -> Result<()> {
    let theme = ColorfulTheme::default();
    if !Confirm::with_theme(&theme)
        .with_prompt("Submit your answers?")
        .default(true)
        .interact()?
    {
        console.warn("Survey not submitted");
        return Ok(());
    }

    loop {
        let spinner = console.spinner("Submitting survey...");
        let result = reconciler.submit(Some(user), store.answers()).await;
        spinner.finish_and_clear();

        match result {
            Ok(_) => {
                console.line(&format!("\n{}", "Thank You!".bold()));
                console.success("Your responses have been successfully recorded");
                return Ok(());
            }
            Err(e @ SurveyError::DuplicateSubmission) => return Err(e.into()),
            Err(e) => {
                tracing::debug!(error = %e, "submission failed");
                console.error(&submit_failure_message(&e));
                let retry = Confirm::with_theme(&theme)
                    .with_prompt("Try again?")
                    .default(true)
                    .interact()?;
                if !retry {
                    return Err(e.into());
                }
            }
        }
    }
}

/// Message shown when a submit attempt fails and may be retried
fn submit_failure_message(error: &SurveyError) -> String {
    match error {
        SurveyError::Transport { .. } | SurveyError::SubmissionFailed { .. } => {
            SUBMIT_FAILED.to_string()
        }
        other => other.user_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_failure_uses_submission_message() {
        let err = SurveyError::transport_with_url("connection refused", "http://localhost:3001");
        assert_eq!(submit_failure_message(&err), SUBMIT_FAILED);
        assert_eq!(
            submit_failure_message(&SurveyError::submission_failed("boom")),
            SUBMIT_FAILED
        );
    }

    #[test]
    fn test_other_failures_keep_their_message() {
        assert_eq!(
            submit_failure_message(&SurveyError::RequestInFlight),
            SurveyError::RequestInFlight.user_message()
        );
    }
}
