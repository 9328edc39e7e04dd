//! SMS provider

use crate::config::TwilioConfig;
use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::Deserialize;

/// Default detail when the provider gives none
const SMS_FAILED: &str = "Erro ao enviar SMS.";

/// A text message ready for dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundSms {
    pub from: String,
    pub to: String,
    pub body: String,
}

/// Sends SMS; returns the provider message sid
#[async_trait]
pub trait SmsProvider: Send + Sync {
    /// Configured sender number
    fn sender(&self) -> &str;

    async fn send(&self, sms: &OutboundSms) -> Result<String>;
}

/// Twilio Messages API
pub struct TwilioSms {
    config: TwilioConfig,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct TwilioResponse {
    sid: Option<String>,
    message: Option<String>,
}

impl TwilioSms {
    pub fn new(config: TwilioConfig) -> Self {
        tracing::info!(from = %config.from, "Twilio SMS provider configured");
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    fn messages_url(&self) -> String {
        format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.api_base.trim_end_matches('/'),
            self.config.account_sid
        )
    }
}

#[async_trait]
impl SmsProvider for TwilioSms {
    fn sender(&self) -> &str {
        &self.config.from
    }

    async fn send(&self, sms: &OutboundSms) -> Result<String> {
        let response = self
            .client
            .post(self.messages_url())
            .basic_auth(&self.config.account_sid, Some(&self.config.auth_token))
            .form(&[
                ("From", sms.from.as_str()),
                ("To", sms.to.as_str()),
                ("Body", sms.body.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::DeliveryFailed(format!("{} {}", SMS_FAILED, e)))?;

        let status = response.status();
        let body: TwilioResponse = response
            .json()
            .await
            .map_err(|e| Error::DeliveryFailed(format!("{} {}", SMS_FAILED, e)))?;

        if !status.is_success() {
            return Err(Error::DeliveryFailed(
                body.message.unwrap_or_else(|| SMS_FAILED.to_string()),
            ));
        }

        body.sid
            .ok_or_else(|| Error::DeliveryFailed(SMS_FAILED.to_string()))
    }
}
