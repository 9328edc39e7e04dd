//! E-mail provider

use crate::config::SmtpConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// A plain-text e-mail ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMail {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Sends e-mail; returns the provider message id
#[async_trait]
pub trait MailProvider: Send + Sync {
    async fn send(&self, mail: &OutboundMail) -> Result<String>;
}

/// SMTP provider
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Build the transport. `secure` selects implicit TLS, otherwise STARTTLS.
    pub fn new(config: &SmtpConfig) -> Result<Self> {
        let builder = if config.secure {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.host)
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)
        }
        .map_err(|e| Error::Config(format!("Invalid SMTP host '{}': {}", config.host, e)))?;

        let transport = builder
            .port(config.port)
            .credentials(Credentials::new(
                config.username.clone(),
                config.password.clone(),
            ))
            .build();

        tracing::info!(
            host = %config.host,
            port = config.port,
            secure = config.secure,
            "SMTP mailer configured"
        );

        Ok(Self { transport })
    }
}

/// `Message-ID` for a mail sent from `from`
fn message_id_for(from: &str) -> String {
    let domain = from
        .rsplit_once('@')
        .map(|(_, domain)| domain.trim_end_matches('>'))
        .unwrap_or("localhost");
    format!("<{}@{}>", uuid::Uuid::new_v4(), domain)
}

/// Assemble the MIME message
fn build_message(mail: &OutboundMail, message_id: &str) -> Result<Message> {
    let from: Mailbox = mail
        .from
        .parse()
        .map_err(|e| Error::Config(format!("Invalid sender address '{}': {}", mail.from, e)))?;
    let to: Mailbox = mail
        .to
        .parse()
        .map_err(|_| Error::InvalidInput("Parâmetros inválidos.".to_string()))?;

    Message::builder()
        .from(from)
        .to(to)
        .subject(mail.subject.clone())
        .message_id(Some(message_id.to_string()))
        .header(ContentType::TEXT_PLAIN)
        .body(mail.body.clone())
        .map_err(|e| Error::DeliveryFailed(format!("Erro ao montar e-mail: {}", e)))
}

#[async_trait]
impl MailProvider for SmtpMailer {
    async fn send(&self, mail: &OutboundMail) -> Result<String> {
        let message_id = message_id_for(&mail.from);
        let message = build_message(mail, &message_id)?;

        self.transport
            .send(message)
            .await
            .map_err(|e| Error::DeliveryFailed(format!("Erro ao enviar e-mail: {}", e)))?;

        Ok(message_id)
    }
}
