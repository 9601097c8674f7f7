//! Prompt and print helpers shared by the menus.
//!
//! Every prompt goes through `dialoguer`, which re-asks on unparsable
//! input, so menu code only ever sees well-typed values.

use std::fmt::Display;
use std::str::FromStr;

use console::style;
use dialoguer::{Confirm, Input, Password};

use rental_core::{validation, Decision, Money, Role, MIN_PASSWORD_LEN};

use crate::error::AppError;

/// Prints a numbered menu and returns the chosen entry, 1-based.
pub fn menu(title: &str, entries: &[&str]) -> dialoguer::Result<usize> {
    println!();
    println!("{}", style(format!("=== {} ===", title)).cyan().bold());
    for (i, entry) in entries.iter().enumerate() {
        println!("{}. {}", i + 1, entry);
    }

    let count = entries.len();
    Input::<usize>::new()
        .with_prompt("Select option")
        .validate_with(move |choice: &usize| -> Result<(), String> {
            if (1..=count).contains(choice) {
                Ok(())
            } else {
                Err(format!("Please enter a number from 1 to {}", count))
            }
        })
        .interact_text()
}

/// Reads a non-empty line of text, trimmed.
pub fn text(prompt: &str) -> dialoguer::Result<String> {
    let value = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("A value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Reads a value of any parseable type (ids, years, day counts).
pub fn number<T>(prompt: &str) -> dialoguer::Result<T>
where
    T: Clone + ToString + FromStr,
    <T as FromStr>::Err: ToString,
{
    Input::<T>::new().with_prompt(prompt).interact_text()
}

/// Reads a dollar amount such as `45.99` or `$1,250`.
pub fn money(prompt: &str) -> dialoguer::Result<Money> {
    let raw = Input::<String>::new()
        .with_prompt(prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            Money::parse(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;

    // Validated above
    Ok(Money::parse(&raw).unwrap_or_default())
}

/// Yes/no question.
pub fn confirm(prompt: &str, default: bool) -> dialoguer::Result<bool> {
    Confirm::new().with_prompt(prompt).default(default).interact()
}

/// Reads a password without echo.
pub fn password(prompt: &str) -> dialoguer::Result<String> {
    Password::new().with_prompt(prompt).interact()
}

/// Reads a new password twice, enforcing the minimum length.
pub fn new_password() -> dialoguer::Result<String> {
    Password::new()
        .with_prompt("Enter password")
        .with_confirmation("Confirm password", "Passwords do not match. Try again.")
        .validate_with(|input: &String| -> Result<(), String> {
            validation::validate_password(input).map_err(|_| {
                format!(
                    "Password must be at least {} characters long.",
                    MIN_PASSWORD_LEN
                )
            })
        })
        .interact()
}

/// Maps free-text role input to a role. Anything unrecognised is a
/// customer; the flag reports whether that fallback was used.
pub fn role_or_customer(input: &str) -> (Role, bool) {
    match input.parse::<Role>() {
        Ok(role) => (role, false),
        Err(_) => (Role::Customer, true),
    }
}

/// `a`/`approve` or `r`/`reject`, case-insensitive.
pub fn parse_decision(input: &str) -> Option<Decision> {
    match input.trim().to_ascii_lowercase().as_str() {
        "a" | "approve" => Some(Decision::Approve),
        "r" | "reject" => Some(Decision::Reject),
        _ => None,
    }
}

// =============================================================================
// Output
// =============================================================================

pub fn success(message: impl Display) {
    println!("{}", style(format!("✅ {}", message)).green());
}

pub fn notice(message: impl Display) {
    println!("{}", style(message).yellow());
}

pub fn failure(err: &AppError) {
    println!("{}", style(format!("❌ {}", err)).red());
}

pub fn heading(title: impl Display) {
    println!();
    println!("{}", style(title).bold());
}
