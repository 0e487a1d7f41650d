//! Mail Module
//!
//! Outbound notification email to the business address. Three backends:
//! SMTP for production, console for development (logs instead of sending),
//! and in-memory for tests.
//!
//! Notifications are best-effort everywhere: the caller persists its data
//! first and logs a send failure without surfacing it to the client.

pub mod templates;

use std::sync::{Arc, Mutex};

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use thiserror::Error;

use crate::core::config::MailConfig;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("Invalid address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("Failed to build message: {0}")]
    Build(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),
}

/// A rendered notification, as captured by the memory backend
#[derive(Debug, Clone)]
pub struct OutboundMail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

enum Transport {
    Smtp(Box<AsyncSmtpTransport<Tokio1Executor>>),
    Console,
    Memory(Arc<Mutex<Vec<OutboundMail>>>),
}

/// Notification mail client, constructed once at startup and shared
/// through the server state.
pub struct Mailer {
    transport: Transport,
    from: String,
    admin_address: String,
}

impl Mailer {
    /// Build from config: SMTP when credentials are configured, console
    /// backend otherwise.
    pub fn from_config(config: &MailConfig) -> Result<Self, MailError> {
        let transport = match (&config.smtp_username, &config.smtp_password) {
            (Some(username), Some(password)) => {
                let smtp = AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
                    .credentials(Credentials::new(username.clone(), password.clone()))
                    .build();
                Transport::Smtp(Box::new(smtp))
            }
            _ => {
                tracing::warn!(
                    "SMTP credentials not configured, notification emails will only be logged"
                );
                Transport::Console
            }
        };

        Ok(Self {
            transport,
            from: config.from_address.clone(),
            admin_address: config.admin_address.clone(),
        })
    }

    /// In-memory backend for tests; the returned handle observes every send
    pub fn memory(admin_address: &str) -> (Self, Arc<Mutex<Vec<OutboundMail>>>) {
        let outbox = Arc::new(Mutex::new(Vec::new()));
        let mailer = Self {
            transport: Transport::Memory(outbox.clone()),
            from: "noreply@localhost".to_string(),
            admin_address: admin_address.to_string(),
        };
        (mailer, outbox)
    }

    /// Send an HTML notification to the configured business address
    pub async fn notify_admin(&self, subject: &str, html: String) -> Result<(), MailError> {
        match &self.transport {
            Transport::Smtp(smtp) => {
                let message = Message::builder()
                    .from(self.from.parse()?)
                    .to(self.admin_address.parse()?)
                    .subject(subject)
                    .header(ContentType::TEXT_HTML)
                    .body(html)?;
                smtp.send(message).await?;
                tracing::info!(to = %self.admin_address, subject, "Notification email sent");
                Ok(())
            }
            Transport::Console => {
                tracing::info!(to = %self.admin_address, subject, "Notification email (console backend):\n{html}");
                Ok(())
            }
            Transport::Memory(outbox) => {
                let mut outbox = outbox.lock().expect("mail outbox lock");
                outbox.push(OutboundMail {
                    to: self.admin_address.clone(),
                    subject: subject.to_string(),
                    html,
                });
                Ok(())
            }
        }
    }
}
