//! HTTP client for the relay service

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
struct DeliveryRequest<'a> {
    to: &'a str,
    message: &'a str,
}

/// Posts messages to a running relay
#[derive(Debug, Clone)]
pub struct RelayClient {
    client: reqwest::Client,
    base_url: String,
}

impl RelayClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Relay an e-mail; returns the provider message id.
    pub async fn send_email(&self, to: &str, message: &str) -> Result<String> {
        self.post("/api/send/email", "id", to, message).await
    }

    /// Relay an SMS; returns the provider sid.
    pub async fn send_sms(&self, to: &str, message: &str) -> Result<String> {
        self.post("/api/send/sms", "sid", to, message).await
    }

    /// Liveness probe
    pub async fn health(&self) -> Result<bool> {
        let response = self
            .client
            .get(format!("{}/api/health", self.base_url))
            .send()
            .await?;
        if !response.status().is_success() {
            return Ok(false);
        }
        let body: Value = response.json().await?;
        Ok(body["ok"].as_bool().unwrap_or(false))
    }

    async fn post(&self, path: &str, id_field: &str, to: &str, message: &str) -> Result<String> {
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .json(&DeliveryRequest { to, message })
            .send()
            .await?;

        let status = response.status().as_u16();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if (200..300).contains(&status) {
            return body[id_field]
                .as_str()
                .map(str::to_string)
                .ok_or_else(|| {
                    Error::DeliveryFailed(format!("Relay response missing '{}'", id_field))
                });
        }

        let reason = body["error"]
            .as_str()
            .unwrap_or("Erro ao enviar mensagem.")
            .to_string();
        Err(error_for_status(status, reason))
    }
}

/// Map a relay status code back onto the error taxonomy
fn error_for_status(status: u16, reason: String) -> Error {
    match status {
        400 => Error::InvalidInput(reason),
        422 => Error::ContentRejected(reason),
        501 => Error::NotConfigured(reason),
        _ => Error::DeliveryFailed(reason),
    }
}
