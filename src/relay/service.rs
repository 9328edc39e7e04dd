//! Relay service
//!
//! Validates a delivery request, runs it through the tone gate, and hands it
//! to the configured provider. Message bodies are never logged.

use super::alias::random_alias;
use super::mailer::{MailProvider, OutboundMail, SmtpMailer};
use super::sms::{OutboundSms, SmsProvider, TwilioSms};
use crate::config::{EmailConfig, ToqueConfig};
use crate::error::{Error, Result};
use crate::tone::assert_respectful;
use std::sync::Arc;

/// Returned when `to` or `message` is missing or blank
pub const INVALID_PARAMS: &str = "Parâmetros inválidos.";

pub const EMAIL_NOT_CONFIGURED: &str = "Servidor de e-mail não configurado.";
pub const SMS_NOT_CONFIGURED: &str = "Servidor de SMS não configurado.";

/// Anonymous e-mail and SMS relay
pub struct RelayService {
    mailer: Option<Arc<dyn MailProvider>>,
    sms: Option<Arc<dyn SmsProvider>>,
    email: EmailConfig,
}

impl RelayService {
    /// Relay with no providers; every send fails as not configured
    pub fn new(email: EmailConfig) -> Self {
        Self {
            mailer: None,
            sms: None,
            email,
        }
    }

    pub fn with_mailer(mut self, mailer: Arc<dyn MailProvider>) -> Self {
        self.mailer = Some(mailer);
        self
    }

    pub fn with_sms(mut self, sms: Arc<dyn SmsProvider>) -> Self {
        self.sms = Some(sms);
        self
    }

    /// Wire up whichever providers the configuration fully describes
    pub fn from_config(config: &ToqueConfig) -> Result<Self> {
        let mut service = Self::new(config.email.clone());

        match config.smtp.as_ref().filter(|smtp| smtp.is_complete()) {
            Some(smtp) => service = service.with_mailer(Arc::new(SmtpMailer::new(smtp)?)),
            None => tracing::warn!("SMTP not configured, e-mail relay disabled"),
        }

        match config.twilio.as_ref().filter(|twilio| twilio.is_complete()) {
            Some(twilio) => service = service.with_sms(Arc::new(TwilioSms::new(twilio.clone()))),
            None => tracing::warn!("Twilio not configured, SMS relay disabled"),
        }

        Ok(service)
    }

    pub fn email_enabled(&self) -> bool {
        self.mailer.is_some()
    }

    pub fn sms_enabled(&self) -> bool {
        self.sms.is_some()
    }

    /// Relay an e-mail; returns the provider message id
    pub async fn send_email(&self, to: &str, message: &str) -> Result<String> {
        let (to, message) = require_fields(to, message)?;
        assert_respectful(message)?;

        let mailer = self
            .mailer
            .as_ref()
            .ok_or_else(|| Error::NotConfigured(EMAIL_NOT_CONFIGURED.to_string()))?;

        let from = self
            .email
            .from
            .clone()
            .unwrap_or_else(|| random_alias(&self.email.domain));

        let mail = OutboundMail {
            from,
            to: to.to_string(),
            subject: self.email.subject.clone(),
            body: message.to_string(),
        };

        let id = mailer.send(&mail).await.map_err(|e| {
            tracing::error!("E-mail relay failed: {}", e);
            e
        })?;
        tracing::info!(id = %id, "E-mail relayed");
        Ok(id)
    }

    /// Relay an SMS; returns the provider message sid
    pub async fn send_sms(&self, to: &str, message: &str) -> Result<String> {
        let (to, message) = require_fields(to, message)?;
        assert_respectful(message)?;

        let provider = self
            .sms
            .as_ref()
            .ok_or_else(|| Error::NotConfigured(SMS_NOT_CONFIGURED.to_string()))?;

        let sms = OutboundSms {
            from: provider.sender().to_string(),
            to: to.to_string(),
            body: message.to_string(),
        };

        let sid = provider.send(&sms).await.map_err(|e| {
            tracing::error!("SMS relay failed: {}", e);
            e
        })?;
        tracing::info!(sid = %sid, "SMS relayed");
        Ok(sid)
    }
}

/// Trimmed `to` and the message as submitted; both must be non-blank
fn require_fields<'a>(to: &'a str, message: &'a str) -> Result<(&'a str, &'a str)> {
    let to = to.trim();
    if to.is_empty() || message.trim().is_empty() {
        return Err(Error::InvalidInput(INVALID_PARAMS.to_string()));
    }
    Ok((to, message))
}
