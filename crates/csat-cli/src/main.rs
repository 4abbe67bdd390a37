//! csat command-line survey client
//!
//! Takes the customer satisfaction survey from the terminal: log in, answer
//! the questionnaire, submit, and later review or edit the stored answers.
//!
//! ```bash
//! csat register --email me@example.com
//! csat take --email me@example.com
//! csat view --email me@example.com
//! ```

mod args;
mod commands;
mod console;
mod logging;
mod router;

use args::Cli;
use clap::Parser;
use crate::console::CliConsole;
use csat_core::SurveyError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let console = CliConsole::new(cli.verbose);

    if let Err(err) = router::route(cli).await {
        match err.downcast_ref::<SurveyError>() {
            Some(survey_err) => {
                tracing::debug!("{}", survey_err);
                console.error(&survey_err.user_facing().format_display());
            }
            None => console.error(&format!("{:#}", err)),
        }
        std::process::exit(1);
    }
}
