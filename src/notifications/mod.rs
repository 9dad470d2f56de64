//! Administrator notifications for contact messages and inquiries.
//!
//! Delivery goes through a [`Mailer`]. [`HttpMailer`] posts to a mail relay;
//! [`LogMailer`] only writes the message to the log and is used when no relay
//! is configured. The dispatcher reports delivery as a plain `bool` and never
//! lets a transport failure reach the caller.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{error, info, instrument};

use crate::config::NotificationConfig;
use crate::entities::contact_us;
use crate::models::{format_price, ContactFields, InquiryRecord};

/// Notification delivery errors
#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("Mail transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("Mail relay rejected message with status {status}: {body}")]
    Rejected { status: u16, body: String },
    #[error("Mailer misconfigured: {0}")]
    Configuration(String),
}

/// Plain-text email
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub body: String,
}

#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError>;
}

/// Delivers messages by POSTing them as JSON to a mail relay
#[derive(Clone)]
pub struct HttpMailer {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, NotificationError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
        })
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    #[instrument(skip(self, message), fields(subject = %message.subject))]
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(message)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(NotificationError::Rejected {
            status: status.as_u16(),
            body,
        })
    }
}

/// Writes messages to the log instead of sending them
#[derive(Debug, Clone, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        info!(
            to = %message.to.join(", "),
            from = %message.from,
            subject = %message.subject,
            "\n{}",
            message.body
        );
        Ok(())
    }
}

/// Builds the mailer the configuration asks for
pub fn mailer_from_config(config: &NotificationConfig) -> Result<Arc<dyn Mailer>, NotificationError> {
    match (&config.relay_url, &config.relay_api_key) {
        (Some(url), Some(key)) => Ok(Arc::new(HttpMailer::new(
            url.clone(),
            key.clone(),
            config.timeout(),
        )?)),
        (Some(_), None) => Err(NotificationError::Configuration(
            "relay_url is set without relay_api_key".to_string(),
        )),
        (None, _) => Ok(Arc::new(LogMailer)),
    }
}

/// Renders submissions and sends them to the administrator
#[derive(Clone)]
pub struct NotificationDispatcher {
    mailer: Arc<dyn Mailer>,
    admin_email: String,
    from_email: String,
}

impl NotificationDispatcher {
    pub fn new(
        mailer: Arc<dyn Mailer>,
        admin_email: impl Into<String>,
        from_email: impl Into<String>,
    ) -> Self {
        Self {
            mailer,
            admin_email: admin_email.into(),
            from_email: from_email.into(),
        }
    }

    pub fn from_config(config: &NotificationConfig) -> Result<Self, NotificationError> {
        Ok(Self::new(
            mailer_from_config(config)?,
            config.admin_email.clone(),
            config.from_email.clone(),
        ))
    }

    pub fn render_contact(&self, contact: &contact_us::Model) -> EmailMessage {
        let mut body = String::from("You have received a new contact form submission.\n\n");
        write_contact_block(&mut body, &contact.contact_fields(), contact.created_at);

        self.message(
            format!("New Contact Form Submission: {}", contact.subject),
            body,
        )
    }

    pub fn render_inquiry(&self, record: &InquiryRecord) -> EmailMessage {
        let inquiry = &record.inquiry;
        let mut body = String::from("You have received a new product inquiry.\n\n");
        write_contact_block(&mut body, &inquiry.contact_fields(), inquiry.created_at);

        body.push_str("\nProducts:\n");
        if record.lines.is_empty() {
            body.push_str("(none)\n");
        }
        for line in &record.lines {
            let _ = writeln!(
                body,
                "- {} | Style: {} | Price: {}",
                line.product.name,
                line.product.style_number,
                format_price(line.product.price)
            );
        }

        self.message(format!("New Product Inquiry: {}", inquiry.subject), body)
    }

    /// Sends the contact notification; `false` means it was not delivered.
    #[instrument(skip(self, contact), fields(contact_id = %contact.id))]
    pub async fn notify_contact(&self, contact: &contact_us::Model) -> bool {
        let message = self.render_contact(contact);
        match self.mailer.send(&message).await {
            Ok(()) => {
                info!("Contact form email sent successfully for {}", contact.email);
                true
            }
            Err(e) => {
                error!("Failed to send contact form email for {}: {}", contact, e);
                false
            }
        }
    }

    /// Sends the inquiry notification; `false` means it was not delivered.
    #[instrument(skip(self, record), fields(inquiry_id = %record.inquiry.id))]
    pub async fn notify_inquiry(&self, record: &InquiryRecord) -> bool {
        let message = self.render_inquiry(record);
        match self.mailer.send(&message).await {
            Ok(()) => {
                info!(
                    "Inquiry email sent successfully for {}",
                    record.inquiry.email
                );
                true
            }
            Err(e) => {
                error!(
                    "Failed to send inquiry email for {}: {}",
                    record.inquiry, e
                );
                false
            }
        }
    }

    fn message(&self, subject: String, body: String) -> EmailMessage {
        EmailMessage {
            from: self.from_email.clone(),
            to: vec![self.admin_email.clone()],
            subject,
            body,
        }
    }
}

fn write_contact_block(
    body: &mut String,
    fields: &ContactFields,
    created_at: chrono::DateTime<chrono::Utc>,
) {
    let _ = writeln!(body, "Name: {}", fields.name);
    let _ = writeln!(body, "Email: {}", fields.email);
    let _ = writeln!(body, "Subject: {}", fields.subject);
    let _ = writeln!(
        body,
        "Submitted: {}",
        created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    let _ = writeln!(body, "\nMessage:\n{}", fields.message);
}
