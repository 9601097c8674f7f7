//! Login / Register / Exit.

use rental_core::Session;

use super::prompt;
use crate::service::{LoginOutcome, RentalService};

/// Loops until someone logs in (or registers) or chooses Exit.
///
/// Returns `None` on Exit.
pub async fn run(service: &RentalService) -> dialoguer::Result<Option<Session>> {
    loop {
        let choice = prompt::menu(
            "Welcome to Car Rental System",
            &["Login", "Register", "Exit"],
        )?;

        let session = match choice {
            1 => login(service).await?,
            2 => register(service).await?,
            _ => return Ok(None),
        };

        if let Some(session) = session {
            return Ok(Some(session));
        }
    }
}

async fn login(service: &RentalService) -> dialoguer::Result<Option<Session>> {
    let username = prompt::text("Enter username to login")?;
    let password = prompt::password("Enter password")?;

    match service.login(&username, &password).await {
        Ok(LoginOutcome::Authenticated(session)) => {
            prompt::success(format!(
                "Logged in as '{}' ({})",
                session.username, session.role
            ));
            Ok(Some(session))
        }
        Ok(LoginOutcome::Rejected) => {
            prompt::notice("Invalid username or password. Please try again or register.");
            Ok(None)
        }
        Ok(LoginOutcome::MalformedCredential) => {
            prompt::notice("❌ Invalid password format in database. Re-register the user.");
            Ok(None)
        }
        Err(e) => {
            prompt::failure(&e);
            Ok(None)
        }
    }
}

/// Registers a new account and logs it straight in.
async fn register(service: &RentalService) -> dialoguer::Result<Option<Session>> {
    let username = prompt::text("Enter new username to register")?;
    let email = prompt::text("Enter your email address")?;
    let password = prompt::new_password()?;

    let role_input = prompt::text("Enter role (admin/customer)")?;
    let (role, defaulted) = prompt::role_or_customer(&role_input);
    if defaulted {
        prompt::notice("Invalid role. Defaulting to 'customer'.");
    }

    match service.register(&username, &password, role, &email).await {
        Ok(user) => {
            prompt::success(format!(
                "User '{}' registered as {}.",
                user.username, user.role
            ));
            Ok(Some(Session::new(user.username, user.role)))
        }
        Err(e) => {
            prompt::failure(&e);
            Ok(None)
        }
    }
}
