//! Command implementations

pub mod config;
pub mod prompt;
pub mod questions;
pub mod register;
pub mod take;
pub mod view;

use crate::args::LoginArgs;
use crate::console::CliConsole;
use anyhow::Result;
use csat_core::{Credentials, CsatConfig, HttpBackend, Reconciler, SurveyBackend, UserId, account};
use std::sync::Arc;

/// Build the HTTP backend described by the configuration
pub(crate) fn connect(config: &CsatConfig) -> Result<Arc<dyn SurveyBackend>> {
    Ok(Arc::new(HttpBackend::new(&config.backend)?))
}

/// Log in with the given arguments, prompting for the password if needed
pub(crate) async fn login(
    console: &CliConsole,
    reconciler: &Reconciler,
    args: &LoginArgs,
) -> Result<UserId> {
    let password = match &args.password {
        Some(password) => password.clone(),
        None => prompt::password("Password")?,
    };
    let credentials = Credentials::new(args.email.trim(), password);

    let spinner = console.spinner("Logging in...");
    let result = account::login(reconciler.backend(), &credentials).await;
    spinner.finish_and_clear();

    let user = result?;
    console.success(&format!("Logged in as {}", user));
    Ok(user)
}
