//! Account registration

use super::prompt;
use crate::args::LoginArgs;
use crate::console::CliConsole;
use anyhow::Result;
use csat_core::{Credentials, CsatConfig, Registration, account};

pub async fn execute(config: &CsatConfig, login: &LoginArgs) -> Result<()> {
    let console = CliConsole::new(false);
    console.print_header("Create Account");

    let backend = super::connect(config)?;
    let registration = match &login.password {
        Some(password) => registration_from(&login.email, password.clone(), None),
        None => {
            let (password, confirm) = prompt::password_with_confirmation()?;
            registration_from(&login.email, password, Some(confirm))
        }
    };

    let spinner = console.spinner("Creating account...");
    let result = account::register(backend.as_ref(), &registration).await;
    spinner.finish_and_clear();
    result?;

    console.success("Registration successful! Please log in.");
    Ok(())
}

/// A password given up front (flag or `CSAT_PASSWORD`) confirms itself
fn registration_from(email: &str, password: String, confirm: Option<String>) -> Registration {
    let confirm = confirm.unwrap_or_else(|| password.clone());
    Registration::new(Credentials::new(email.trim(), password), confirm)
}
