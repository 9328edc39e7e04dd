//! Toque configuration management
//!
//! Configuration is read once at startup: an optional TOML file first, then
//! the environment variables the relay has always honoured (`SMTP_HOST`,
//! `TWILIO_ACCOUNT_SID`, `EMAIL_DOMAIN`, ...). The result is shared
//! read-only for the lifetime of the process.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main Toque configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ToqueConfig {
    /// Relay HTTP server
    #[serde(default)]
    pub server: ServerConfig,

    /// SMTP provider for relayed e-mail (absent = e-mail relay disabled)
    #[serde(default)]
    pub smtp: Option<SmtpConfig>,

    /// Twilio provider for relayed SMS (absent = SMS relay disabled)
    #[serde(default)]
    pub twilio: Option<TwilioConfig>,

    /// Outbound e-mail identity
    #[serde(default)]
    pub email: EmailConfig,

    /// Share link settings
    #[serde(default)]
    pub share: ShareConfig,
}

/// Relay server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host to bind to
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// Allowed CORS origins (empty = any)
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8787,
            cors_origins: Vec::new(),
        }
    }
}

/// SMTP provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: String,

    /// Implicit TLS (port 465 style) instead of STARTTLS
    #[serde(default)]
    pub secure: bool,
}

impl SmtpConfig {
    /// All credentials present
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }
}

/// Twilio SMS provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TwilioConfig {
    pub account_sid: String,
    pub auth_token: String,

    /// Sender number
    pub from: String,

    /// REST API base URL
    #[serde(default = "default_twilio_api_base")]
    pub api_base: String,
}

impl TwilioConfig {
    /// All credentials present
    pub fn is_complete(&self) -> bool {
        !self.account_sid.is_empty() && !self.auth_token.is_empty() && !self.from.is_empty()
    }
}

fn default_twilio_api_base() -> String {
    "https://api.twilio.com".to_string()
}

/// Outbound e-mail identity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Domain for generated sender aliases
    pub domain: String,

    /// Fixed sender address; when unset every send gets a fresh alias
    pub from: Option<String>,

    /// Subject line of relayed e-mail
    pub subject: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            domain: "example.com".to_string(),
            from: None,
            subject: "Toque Anônimo".to_string(),
        }
    }
}

/// Share link configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareConfig {
    /// Origin prepended to share links
    pub origin: String,
}

impl Default for ShareConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:5173".to_string(),
        }
    }
}

impl ToqueConfig {
    /// Load from an optional TOML file, then overlay the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse a TOML configuration file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Overlay values from an environment lookup.
    ///
    /// A provider is only set when every required variable is present and
    /// non-empty; a partial set leaves the file value untouched.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = var("PORT") {
            self.server.port = parse_port("PORT", &port)?;
        }

        if let (Some(host), Some(port), Some(username), Some(password)) = (
            var("SMTP_HOST"),
            var("SMTP_PORT"),
            var("SMTP_USER"),
            var("SMTP_PASS"),
        ) {
            self.smtp = Some(SmtpConfig {
                host,
                port: parse_port("SMTP_PORT", &port)?,
                username,
                password,
                secure: var("SMTP_SECURE")
                    .map(|v| v.eq_ignore_ascii_case("true"))
                    .unwrap_or(false),
            });
        }

        if let (Some(account_sid), Some(auth_token), Some(from)) = (
            var("TWILIO_ACCOUNT_SID"),
            var("TWILIO_AUTH_TOKEN"),
            var("TWILIO_FROM"),
        ) {
            let api_base = self
                .twilio
                .as_ref()
                .map(|t| t.api_base.clone())
                .unwrap_or_else(default_twilio_api_base);
            self.twilio = Some(TwilioConfig {
                account_sid,
                auth_token,
                from,
                api_base,
            });
        }

        if let Some(domain) = var("EMAIL_DOMAIN") {
            self.email.domain = domain;
        }
        if let Some(from) = var("EMAIL_FROM") {
            self.email.from = Some(from);
        }
        if let Some(origin) = var("TOQUE_ORIGIN") {
            self.share.origin = origin;
        }

        Ok(())
    }

    /// Copy with credentials masked, for display
    pub fn masked(&self) -> Self {
        let mut config = self.clone();
        if let Some(smtp) = config.smtp.as_mut() {
            smtp.password = mask_secret(&smtp.password);
        }
        if let Some(twilio) = config.twilio.as_mut() {
            twilio.auth_token = mask_secret(&twilio.auth_token);
        }
        config
    }
}

fn parse_port(key: &str, value: &str) -> Result<u16> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} is not a valid port: {}", key, value)))
}

/// Keep the last four characters of a secret
fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{}", tail)
}
