//! # Email Notifications
//!
//! Fire-and-forget customer emails.
//!
//! ```text
//! RentalService ──► dyn Notifier ──┬──► SmtpNotifier   (lettre, implicit TLS :465)
//!                                  └──► DryRunNotifier (prints, sends nothing)
//! ```
//!
//! `send` reports success as a bool and never returns an error: a mail
//! failure is logged and the booking or approval that triggered it stands.

use async_trait::async_trait;
use console::style;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::config::EmailConfig;

/// Something that can deliver a plain-text email.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Sends one message. Returns `true` when it was handed off.
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool;
}

/// Picks the notifier described by `config`.
pub fn from_config(config: &EmailConfig) -> Box<dyn Notifier> {
    if config.dry_run {
        info!("Email dry run enabled; no mail will be delivered");
        Box::new(DryRunNotifier)
    } else {
        Box::new(SmtpNotifier::new(config.clone()))
    }
}

// =============================================================================
// SMTP
// =============================================================================

/// Delivers mail through an SMTP relay.
pub struct SmtpNotifier {
    config: EmailConfig,
}

impl SmtpNotifier {
    pub fn new(config: EmailConfig) -> Self {
        SmtpNotifier { config }
    }

    async fn deliver(
        &self,
        user: &str,
        pass: &str,
        to: &str,
        subject: &str,
        body: &str,
    ) -> Result<(), String> {
        let from = user
            .parse::<Mailbox>()
            .map_err(|e| format!("invalid sender address '{}': {}", user, e))?;
        let recipient = to
            .parse::<Mailbox>()
            .map_err(|e| format!("invalid recipient address '{}': {}", to, e))?;

        let message = Message::builder()
            .from(from)
            .to(recipient)
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body.to_string())
            .map_err(|e| e.to_string())?;

        // relay() wraps the connection in TLS from the first byte on port 465
        let mailer = AsyncSmtpTransport::<Tokio1Executor>::relay(&self.config.smtp_host)
            .map_err(|e| e.to_string())?
            .credentials(Credentials::new(user.to_string(), pass.to_string()))
            .build();

        mailer.send(message).await.map_err(|e| e.to_string())?;
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        let (Some(user), Some(pass)) = (self.config.user.as_deref(), self.config.pass.as_deref())
        else {
            warn!("Email credentials not configured (EMAIL_USER / EMAIL_PASS); skipping email");
            return false;
        };

        match self.deliver(user, pass, to, subject, body).await {
            Ok(()) => {
                info!(to, subject, "Email sent");
                true
            }
            Err(e) => {
                warn!(to, subject, error = %e, "Email sending failed");
                false
            }
        }
    }
}

// =============================================================================
// Dry Run
// =============================================================================

/// Prints what would have been sent.
pub struct DryRunNotifier;

#[async_trait]
impl Notifier for DryRunNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
        info!(to, subject, "Dry run email");
        println!(
            "{} Email to {} with subject '{}' would be sent here.",
            style("📧 [DRY RUN]").cyan(),
            to,
            subject
        );
        for line in body.lines() {
            println!("   {}", style(line).dim());
        }
        true
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use std::sync::{Arc, Mutex};

    /// One captured message.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct SentEmail {
        pub to: String,
        pub subject: String,
        pub body: String,
    }

    /// Records messages instead of sending them.
    #[derive(Clone, Default)]
    pub struct RecordingNotifier {
        sent: Arc<Mutex<Vec<SentEmail>>>,
        /// Value returned from `send`
        pub fail: bool,
    }

    impl RecordingNotifier {
        pub fn failing() -> Self {
            RecordingNotifier {
                fail: true,
                ..Default::default()
            }
        }

        pub fn sent(&self) -> Vec<SentEmail> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Notifier for RecordingNotifier {
        async fn send(&self, to: &str, subject: &str, body: &str) -> bool {
            self.sent.lock().unwrap().push(SentEmail {
                to: to.to_string(),
                subject: subject.to_string(),
                body: body.to_string(),
            });
            !self.fail
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email_config(dry_run: bool) -> EmailConfig {
        EmailConfig {
            dry_run,
            smtp_host: "smtp.invalid".to_string(),
            user: None,
            pass: None,
        }
    }

    #[tokio::test]
    async fn test_dry_run_always_succeeds() {
        let notifier = from_config(&email_config(true));
        assert!(notifier.send("a@example.com", "Hi", "Body").await);
    }

    #[tokio::test]
    async fn test_smtp_without_credentials_returns_false() {
        let notifier = from_config(&email_config(false));
        assert!(!notifier.send("a@example.com", "Hi", "Body").await);
    }

    #[tokio::test]
    async fn test_smtp_with_bad_sender_returns_false() {
        let notifier = SmtpNotifier::new(EmailConfig {
            user: Some("not an address".to_string()),
            pass: Some("pw".to_string()),
            ..email_config(false)
        });
        assert!(!notifier.send("a@example.com", "Hi", "Body").await);
    }
}
