//! Delivery orchestration
//!
//! Each channel takes the already-rewritten message, builds the share link
//! and walks its own fallback chain:
//!
//! | Channel      | Primary                      | Fallback                     |
//! |--------------|------------------------------|------------------------------|
//! | Copy link    | clipboard                    | manual copy                  |
//! | Copy text    | clipboard                    | manual copy                  |
//! | WhatsApp     | deep link, new context       | clipboard copy of the text   |
//! | E-mail       | `mailto:` launch             | clipboard copy of the body   |
//! | SMS          | native share sheet           | `sms:` launch (mobile), clipboard |
//! | Relay e-mail | POST to relay                | none, error is reported      |
//! | Relay SMS    | POST to relay                | none, error is reported      |
//!
//! No action fails hard; outcomes are reported as a [`DeliveryReport`]
//! whose label is shown transiently in the UI.

use super::client::RelayClient;
use super::destination::{normalize_phone_for_sms, normalize_phone_for_whatsapp, validate_email};
use super::links::{
    email_body, is_mobile, mailto_url, sms_body, sms_url, whatsapp_text, whatsapp_url, SHARE_TITLE,
};
use super::platform::{Platform, SharePayload, ShareOutcome};
use super::prompt::{run_prompt, InputKind, PromptRequest};
use crate::codec::build_share_link;
use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Delivery channels offered by the composer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Channel {
    CopyLink,
    CopyText,
    #[serde(rename = "whatsapp")]
    WhatsApp,
    Email,
    Sms,
    RelayEmail,
    RelaySms,
}

impl Channel {
    pub const ALL: [Channel; 7] = [
        Channel::CopyText,
        Channel::CopyLink,
        Channel::WhatsApp,
        Channel::Email,
        Channel::Sms,
        Channel::RelayEmail,
        Channel::RelaySms,
    ];

    /// Resting button text
    pub fn idle_label(&self) -> &'static str {
        match self {
            Channel::CopyLink => "Copiar link anônimo",
            Channel::CopyText => "Copiar texto",
            Channel::WhatsApp => "Enviar via WhatsApp",
            Channel::Email => "Enviar por E-mail",
            Channel::Sms => "Enviar por SMS",
            Channel::RelayEmail => "Enviar e-mail pelo servidor",
            Channel::RelaySms => "Enviar SMS pelo servidor",
        }
    }

    fn is_relay(&self) -> bool {
        matches!(self, Channel::RelayEmail | Channel::RelaySms)
    }

    /// Stable name, as used on the command line
    pub fn name(&self) -> &'static str {
        match self {
            Channel::CopyLink => "copy-link",
            Channel::CopyText => "copy-text",
            Channel::WhatsApp => "whatsapp",
            Channel::Email => "email",
            Channel::Sms => "sms",
            Channel::RelayEmail => "relay-email",
            Channel::RelaySms => "relay-sms",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Channel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Channel::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::InvalidInput(format!("Unknown channel: {}", s)))
    }
}

/// How a delivery action ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Value is on the clipboard
    Copied,
    /// Clipboard failed, value was presented for manual copy
    ManualCopy,
    /// User dismissed the destination prompt
    Cancelled,
    /// Native share sheet completed
    Shared { copied: bool },
    /// Deep link handed to the platform
    Launched { copied: bool },
    /// Relay accepted the message
    Relayed { id: String },
    /// Relay refused or failed
    Failed { reason: String },
}

/// Outcome of one delivery action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryReport {
    pub channel: Channel,
    pub status: DeliveryStatus,
}

impl DeliveryReport {
    fn new(channel: Channel, status: DeliveryStatus) -> Self {
        Self { channel, status }
    }

    /// Transient UI text for this outcome
    pub fn label(&self) -> String {
        use DeliveryStatus::*;

        let label = match (self.channel, &self.status) {
            (channel, Cancelled) => channel.idle_label(),
            (_, Relayed { .. }) => "Mensagem enviada!",
            (_, Failed { reason }) => return reason.clone(),
            (Channel::CopyLink, Copied) => "Link copiado!",
            (Channel::CopyText, Copied) => "Texto copiado!",
            (Channel::CopyLink | Channel::CopyText, _) => "Não foi possível copiar",
            (Channel::WhatsApp, Launched { copied: true }) => "Abrimos WhatsApp (texto copiado)",
            (Channel::WhatsApp, _) => "Abrimos WhatsApp — copie e cole",
            (Channel::Email, Launched { copied: true }) => "Abrimos e-mail (conteúdo copiado)",
            (Channel::Email, _) => "Abrimos e-mail — copie e cole",
            (Channel::Sms, Shared { copied: true } | Launched { copied: true }) => {
                "Abrimos seu SMS (conteúdo copiado)"
            }
            (Channel::Sms, Copied) => "Copiamos o texto (use seu app de SMS)",
            (Channel::Sms, _) => "Se não abrir, copie e cole o texto",
            (Channel::RelayEmail | Channel::RelaySms, _) => "Canal indisponível no momento.",
        };
        label.to_string()
    }
}

/// Runs delivery actions against a platform
pub struct Orchestrator {
    platform: Arc<dyn Platform>,
    relay: Option<RelayClient>,
}

impl Orchestrator {
    pub fn new(platform: Arc<dyn Platform>) -> Self {
        Self {
            platform,
            relay: None,
        }
    }

    /// Enable the relay-backed channels
    pub fn with_relay(mut self, relay: RelayClient) -> Self {
        self.relay = Some(relay);
        self
    }

    pub fn is_mobile(&self) -> bool {
        is_mobile(self.platform.user_agent())
    }

    /// Channels to show. SMS needs a mobile agent; relay channels need a relay.
    pub fn visible_channels(&self) -> Vec<Channel> {
        let mobile = self.is_mobile();
        Channel::ALL
            .into_iter()
            .filter(|c| *c != Channel::Sms || mobile)
            .filter(|c| !c.is_relay() || self.relay.is_some())
            .collect()
    }

    /// Anonymous share link for a message
    pub fn share_link(&self, message: &str) -> String {
        build_share_link(self.platform.origin(), message)
    }

    /// Run the action for `channel`.
    pub async fn deliver(&self, channel: Channel, message: &str) -> DeliveryReport {
        tracing::debug!(channel = %channel, message_len = message.len(), "Delivering message");
        match channel {
            Channel::CopyLink => self.copy_link(message).await,
            Channel::CopyText => self.copy_text(message).await,
            Channel::WhatsApp => self.send_whatsapp(message).await,
            Channel::Email => self.send_email(message).await,
            Channel::Sms => self.send_sms(message).await,
            Channel::RelayEmail => self.relay_email(message).await,
            Channel::RelaySms => self.relay_sms(message).await,
        }
    }

    pub async fn copy_link(&self, message: &str) -> DeliveryReport {
        let link = self.share_link(message);
        let status = self.copy_or_present(&link).await;
        DeliveryReport::new(Channel::CopyLink, status)
    }

    pub async fn copy_text(&self, message: &str) -> DeliveryReport {
        let status = self.copy_or_present(message).await;
        DeliveryReport::new(Channel::CopyText, status)
    }

    pub async fn send_whatsapp(&self, message: &str) -> DeliveryReport {
        let request = PromptRequest::new(
            "Enviar via WhatsApp",
            "Número do destinatário (inclua DDI, ex.: +55...)",
        )
        .placeholder("+5511999999999")
        .kind(InputKind::Tel)
        .validate(normalize_phone_for_whatsapp);

        let Some(phone) = run_prompt(self.platform.as_ref(), request).await else {
            return DeliveryReport::new(Channel::WhatsApp, DeliveryStatus::Cancelled);
        };

        let text = whatsapp_text(&self.share_link(message));
        let url = whatsapp_url(self.is_mobile(), &phone, &text);
        if let Err(e) = self.platform.open_in_new_context(&url) {
            tracing::debug!("WhatsApp deep link not opened: {}", e);
        }
        let copied = self.try_copy(&text).await;

        DeliveryReport::new(Channel::WhatsApp, DeliveryStatus::Launched { copied })
    }

    pub async fn send_email(&self, message: &str) -> DeliveryReport {
        let request = PromptRequest::new("Enviar por E-mail", "E-mail do destinatário")
            .placeholder("exemplo@dominio.com")
            .kind(InputKind::Email)
            .validate(validate_email);

        let Some(email) = run_prompt(self.platform.as_ref(), request).await else {
            return DeliveryReport::new(Channel::Email, DeliveryStatus::Cancelled);
        };

        let body = email_body(&self.share_link(message));
        let url = mailto_url(&email, SHARE_TITLE, &body);
        if let Err(e) = self.platform.launch_external(&url) {
            tracing::debug!("mailto handler not launched: {}", e);
        }
        let copied = self.try_copy(&body).await;

        DeliveryReport::new(Channel::Email, DeliveryStatus::Launched { copied })
    }

    pub async fn send_sms(&self, message: &str) -> DeliveryReport {
        let link = self.share_link(message);
        let body = sms_body(&link);
        let payload = SharePayload {
            title: SHARE_TITLE.to_string(),
            text: body.clone(),
            url: link,
        };

        let shared = self.platform.share(&payload).await == ShareOutcome::Shared;
        // On mobile the sms: handoff counts as attempted even if the launch errors.
        let mobile = !shared && self.is_mobile();
        if mobile {
            if let Err(e) = self.platform.launch_external(&sms_url(&body)) {
                tracing::debug!("sms handler not launched: {}", e);
            }
        }
        let copied = self.try_copy(&body).await;

        let status = if shared {
            DeliveryStatus::Shared { copied }
        } else if mobile {
            if !copied {
                self.platform.show_manual_copy(&body);
            }
            DeliveryStatus::Launched { copied }
        } else if copied {
            DeliveryStatus::Copied
        } else {
            self.platform.show_manual_copy(&body);
            DeliveryStatus::ManualCopy
        };
        DeliveryReport::new(Channel::Sms, status)
    }

    pub async fn relay_email(&self, message: &str) -> DeliveryReport {
        let request = PromptRequest::new("Enviar por E-mail", "E-mail do destinatário")
            .placeholder("exemplo@dominio.com")
            .kind(InputKind::Email)
            .validate(validate_email);
        self.relay(Channel::RelayEmail, request, message).await
    }

    pub async fn relay_sms(&self, message: &str) -> DeliveryReport {
        let request = PromptRequest::new(
            "Enviar por SMS",
            "Número do destinatário (inclua DDI, ex.: +55...)",
        )
        .placeholder("+5511999999999")
        .kind(InputKind::Tel)
        .validate(normalize_phone_for_sms);
        self.relay(Channel::RelaySms, request, message).await
    }

    async fn relay(&self, channel: Channel, request: PromptRequest, message: &str) -> DeliveryReport {
        let Some(relay) = self.relay.as_ref() else {
            return DeliveryReport::new(
                channel,
                DeliveryStatus::Failed {
                    reason: "Canal indisponível no momento.".to_string(),
                },
            );
        };

        let Some(to) = run_prompt(self.platform.as_ref(), request).await else {
            return DeliveryReport::new(channel, DeliveryStatus::Cancelled);
        };

        let result = match channel {
            Channel::RelaySms => relay.send_sms(&to, message).await,
            _ => relay.send_email(&to, message).await,
        };

        let status = match result {
            Ok(id) => {
                tracing::info!(channel = %channel, id = %id, "Message relayed");
                DeliveryStatus::Relayed { id }
            }
            Err(Error::NotConfigured(_)) => DeliveryStatus::Failed {
                reason: "Canal indisponível no momento.".to_string(),
            },
            Err(e) => {
                tracing::warn!(channel = %channel, "Relay failed: {}", e);
                DeliveryStatus::Failed {
                    reason: e.to_string(),
                }
            }
        };
        DeliveryReport::new(channel, status)
    }

    async fn try_copy(&self, value: &str) -> bool {
        match self.platform.write_clipboard(value).await {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("Clipboard write failed: {}", e);
                false
            }
        }
    }

    async fn copy_or_present(&self, value: &str) -> DeliveryStatus {
        if self.try_copy(value).await {
            DeliveryStatus::Copied
        } else {
            self.platform.show_manual_copy(value);
            DeliveryStatus::ManualCopy
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::get_message_from_url;
    use crate::delivery::prompt::{PromptEvent, PromptKey, PromptSession};
    use crate::error::Result;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    const IPHONE_UA: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_0 like Mac OS X) Mobile/15E148";
    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Chrome/120.0";

    /// Records every capability call; scripted prompt answers
    struct MockPlatform {
        user_agent: String,
        clipboard_ok: bool,
        launch_ok: bool,
        share_outcome: ShareOutcome,
        prompt_events: Mutex<VecDeque<PromptEvent>>,
        clipboard: Mutex<Vec<String>>,
        launched: Mutex<Vec<String>>,
        opened: Mutex<Vec<String>>,
        manual: Mutex<Vec<String>>,
        prompt_errors: Mutex<Vec<String>>,
    }

    impl MockPlatform {
        fn new(user_agent: &str) -> Self {
            Self {
                user_agent: user_agent.to_string(),
                clipboard_ok: true,
                launch_ok: true,
                share_outcome: ShareOutcome::Unavailable,
                prompt_events: Mutex::new(VecDeque::new()),
                clipboard: Mutex::new(Vec::new()),
                launched: Mutex::new(Vec::new()),
                opened: Mutex::new(Vec::new()),
                manual: Mutex::new(Vec::new()),
                prompt_errors: Mutex::new(Vec::new()),
            }
        }

        fn clipboard_denied(mut self) -> Self {
            self.clipboard_ok = false;
            self
        }

        fn launch_denied(mut self) -> Self {
            self.launch_ok = false;
            self
        }

        fn with_share(mut self, outcome: ShareOutcome) -> Self {
            self.share_outcome = outcome;
            self
        }

        fn answers(self, events: Vec<PromptEvent>) -> Self {
            *self.prompt_events.lock().unwrap() = events.into();
            self
        }
    }

    #[async_trait]
    impl Platform for MockPlatform {
        fn origin(&self) -> &str {
            "https://toque.app"
        }

        fn user_agent(&self) -> &str {
            &self.user_agent
        }

        async fn write_clipboard(&self, text: &str) -> Result<()> {
            if !self.clipboard_ok {
                return Err(Error::Platform("clipboard permission denied".into()));
            }
            self.clipboard.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn share(&self, _payload: &SharePayload) -> ShareOutcome {
            self.share_outcome
        }

        fn launch_external(&self, uri: &str) -> Result<()> {
            if !self.launch_ok {
                return Err(Error::Platform("no handler for scheme".into()));
            }
            self.launched.lock().unwrap().push(uri.to_string());
            Ok(())
        }

        fn open_in_new_context(&self, url: &str) -> Result<()> {
            self.opened.lock().unwrap().push(url.to_string());
            Ok(())
        }

        async fn prompt_event(&self, session: &PromptSession) -> PromptEvent {
            if let Some(error) = session.error() {
                self.prompt_errors.lock().unwrap().push(error.to_string());
            }
            self.prompt_events
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(PromptEvent::Dismissed)
        }

        fn show_manual_copy(&self, value: &str) {
            self.manual.lock().unwrap().push(value.to_string());
        }
    }

    fn orchestrator(platform: MockPlatform) -> (Orchestrator, Arc<MockPlatform>) {
        let platform = Arc::new(platform);
        (Orchestrator::new(platform.clone()), platform)
    }

    #[tokio::test]
    async fn test_copy_link_round_trips_message() {
        let (orch, platform) = orchestrator(MockPlatform::new(DESKTOP_UA));
        let report = orch.copy_link("Obrigado pelo carinho 💛").await;

        assert_eq!(report.status, DeliveryStatus::Copied);
        assert_eq!(report.label(), "Link copiado!");
        let copied = platform.clipboard.lock().unwrap()[0].clone();
        assert!(copied.starts_with("https://toque.app/?m="));
        assert_eq!(
            get_message_from_url(&copied).as_deref(),
            Some("Obrigado pelo carinho 💛")
        );
    }

    #[tokio::test]
    async fn test_copy_falls_back_to_manual() {
        let (orch, platform) = orchestrator(MockPlatform::new(DESKTOP_UA).clipboard_denied());
        let report = orch.copy_text("oi").await;

        assert_eq!(report.status, DeliveryStatus::ManualCopy);
        assert_eq!(report.label(), "Não foi possível copiar");
        assert_eq!(*platform.manual.lock().unwrap(), vec!["oi".to_string()]);
    }

    #[tokio::test]
    async fn test_whatsapp_desktop_flow() {
        let platform = MockPlatform::new(DESKTOP_UA).answers(vec![
            PromptEvent::Input("abc".into()),
            PromptEvent::Key(PromptKey::Enter),
            PromptEvent::Submit("11999999999".into()),
        ]);
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_whatsapp("um toque").await;

        assert_eq!(report.status, DeliveryStatus::Launched { copied: true });
        assert_eq!(report.label(), "Abrimos WhatsApp (texto copiado)");

        let opened = platform.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("https://web.whatsapp.com/send?phone=5511999999999&text="));

        // the first confirm failed validation inline
        assert_eq!(
            *platform.prompt_errors.lock().unwrap(),
            vec!["Informe um número.".to_string()]
        );

        let clipboard = platform.clipboard.lock().unwrap();
        assert!(clipboard[0].starts_with("💬 Toque Anônimo:\nhttps://toque.app/?m="));
    }

    #[tokio::test]
    async fn test_whatsapp_mobile_uses_app_endpoint() {
        let platform = MockPlatform::new(IPHONE_UA)
            .clipboard_denied()
            .answers(vec![PromptEvent::Submit("+5511999999999".into())]);
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_whatsapp("um toque").await;

        assert_eq!(report.status, DeliveryStatus::Launched { copied: false });
        assert_eq!(report.label(), "Abrimos WhatsApp — copie e cole");
        assert!(platform.opened.lock().unwrap()[0].starts_with("https://api.whatsapp.com/send?"));
    }

    #[tokio::test]
    async fn test_whatsapp_cancelled() {
        let platform =
            MockPlatform::new(DESKTOP_UA).answers(vec![PromptEvent::Key(PromptKey::Escape)]);
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_whatsapp("um toque").await;

        assert_eq!(report.status, DeliveryStatus::Cancelled);
        assert_eq!(report.label(), "Enviar via WhatsApp");
        assert!(platform.opened.lock().unwrap().is_empty());
        assert!(platform.clipboard.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_email_sends_link_not_message() {
        let platform =
            MockPlatform::new(DESKTOP_UA).answers(vec![PromptEvent::Submit("a@b.com".into())]);
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_email("segredo do remetente").await;

        assert_eq!(report.label(), "Abrimos e-mail (conteúdo copiado)");
        let launched = platform.launched.lock().unwrap();
        assert!(launched[0].starts_with("mailto:a%40b.com?subject=Toque%20An%C3%B4nimo&body="));
        assert!(!launched[0].contains("segredo"));

        let body = platform.clipboard.lock().unwrap()[0].clone();
        assert!(body.starts_with("Alguém que se importa quer te dar um toque:"));
        assert!(!body.contains("segredo"));
    }

    #[tokio::test]
    async fn test_email_invalid_then_dismissed() {
        let platform =
            MockPlatform::new(DESKTOP_UA).answers(vec![PromptEvent::Submit("a@b".into())]);
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_email("oi").await;

        assert_eq!(report.status, DeliveryStatus::Cancelled);
        assert_eq!(
            *platform.prompt_errors.lock().unwrap(),
            vec!["Informe um e-mail válido.".to_string()]
        );
        assert!(platform.launched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sms_share_sheet_first() {
        let platform = MockPlatform::new(IPHONE_UA).with_share(ShareOutcome::Shared);
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_sms("oi").await;

        assert_eq!(report.status, DeliveryStatus::Shared { copied: true });
        assert_eq!(report.label(), "Abrimos seu SMS (conteúdo copiado)");
        assert!(platform.launched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sms_cancelled_share_falls_back_to_uri_on_mobile() {
        let platform = MockPlatform::new(IPHONE_UA).with_share(ShareOutcome::Cancelled);
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_sms("oi").await;

        assert_eq!(report.status, DeliveryStatus::Launched { copied: true });
        let launched = platform.launched.lock().unwrap();
        assert!(launched[0].starts_with("sms:?&body=Toque%20An%C3%B4nimo%3A%20"));
    }

    #[tokio::test]
    async fn test_sms_mobile_launch_error_still_reports_opened() {
        let platform = MockPlatform::new(IPHONE_UA).launch_denied();
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_sms("oi").await;

        assert_eq!(report.status, DeliveryStatus::Launched { copied: true });
        assert_eq!(report.label(), "Abrimos seu SMS (conteúdo copiado)");
        assert!(platform.launched.lock().unwrap().is_empty());
        assert!(platform.manual.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sms_mobile_without_clipboard_presents_manual_copy() {
        let platform = MockPlatform::new(IPHONE_UA).clipboard_denied();
        let (orch, platform) = orchestrator(platform);
        let report = orch.send_sms("oi").await;

        assert_eq!(report.status, DeliveryStatus::Launched { copied: false });
        assert_eq!(report.label(), "Se não abrir, copie e cole o texto");
        assert_eq!(platform.manual.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_sms_desktop_only_copies() {
        let (orch, platform) = orchestrator(MockPlatform::new(DESKTOP_UA));
        let report = orch.send_sms("oi").await;

        assert_eq!(report.status, DeliveryStatus::Copied);
        assert_eq!(report.label(), "Copiamos o texto (use seu app de SMS)");
        assert!(platform.launched.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sms_everything_fails() {
        let (orch, platform) = orchestrator(MockPlatform::new(DESKTOP_UA).clipboard_denied());
        let report = orch.send_sms("oi").await;

        assert_eq!(report.status, DeliveryStatus::ManualCopy);
        assert_eq!(report.label(), "Se não abrir, copie e cole o texto");
        assert_eq!(platform.manual.lock().unwrap().len(), 1);
    }

    #[test]
    fn test_visible_channels() {
        let (desktop, _) = orchestrator(MockPlatform::new(DESKTOP_UA));
        let channels = desktop.visible_channels();
        assert!(!channels.contains(&Channel::Sms));
        assert!(!channels.contains(&Channel::RelayEmail));
        assert!(channels.contains(&Channel::WhatsApp));

        let (mobile, _) = orchestrator(MockPlatform::new(IPHONE_UA));
        let mobile = mobile.with_relay(RelayClient::new("http://localhost:8787"));
        let channels = mobile.visible_channels();
        assert!(channels.contains(&Channel::Sms));
        assert!(channels.contains(&Channel::RelaySms));
    }

    #[tokio::test]
    async fn test_relay_without_client_reports_unavailable() {
        let (orch, _) = orchestrator(MockPlatform::new(DESKTOP_UA));
        let report = orch.relay_email("oi").await;
        assert_eq!(report.label(), "Canal indisponível no momento.");
    }

    /// Records relayed sends so tests can inspect the destination
    #[derive(Default)]
    struct RecordingProviders {
        mail_to: Mutex<Vec<String>>,
        sms_to: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl crate::relay::MailProvider for RecordingProviders {
        async fn send(&self, mail: &crate::relay::OutboundMail) -> Result<String> {
            self.mail_to.lock().unwrap().push(mail.to.clone());
            Ok("<relayed-1@toque.app>".to_string())
        }
    }

    #[async_trait]
    impl crate::relay::SmsProvider for RecordingProviders {
        fn sender(&self) -> &str {
            "+15550000000"
        }

        async fn send(&self, sms: &crate::relay::OutboundSms) -> Result<String> {
            self.sms_to.lock().unwrap().push(sms.to.clone());
            Ok("SM42".to_string())
        }
    }

    /// Serve a relay on an ephemeral port; returns a client for it
    async fn spawn_relay(service: crate::relay::RelayService) -> RelayClient {
        let state = crate::relay::RelayState {
            service: Arc::new(service),
        };
        let app = crate::api::build_app(state, &[]);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        RelayClient::new(format!("http://{}", addr))
    }

    fn relay_service(providers: &Arc<RecordingProviders>) -> crate::relay::RelayService {
        crate::relay::RelayService::new(crate::config::EmailConfig::default())
            .with_mailer(providers.clone())
            .with_sms(providers.clone())
    }

    #[tokio::test]
    async fn test_relay_email_sent() {
        let providers = Arc::new(RecordingProviders::default());
        let client = spawn_relay(relay_service(&providers)).await;
        let platform =
            MockPlatform::new(DESKTOP_UA).answers(vec![PromptEvent::Submit("a@b.com".into())]);
        let (orch, _) = orchestrator(platform);
        let orch = orch.with_relay(client);

        let report = orch.relay_email("Obrigado pelo seu trabalho").await;
        assert_eq!(
            report.status,
            DeliveryStatus::Relayed {
                id: "<relayed-1@toque.app>".to_string()
            }
        );
        assert_eq!(report.label(), "Mensagem enviada!");
        assert_eq!(*providers.mail_to.lock().unwrap(), vec!["a@b.com".to_string()]);
    }

    #[tokio::test]
    async fn test_relay_sms_sends_plus_prefixed_number() {
        let providers = Arc::new(RecordingProviders::default());
        let client = spawn_relay(relay_service(&providers)).await;
        let platform = MockPlatform::new(IPHONE_UA)
            .answers(vec![PromptEvent::Submit("+55 (11) 99999-9999".into())]);
        let (orch, _) = orchestrator(platform);
        let orch = orch.with_relay(client);

        let report = orch.relay_sms("Obrigado pelo seu trabalho").await;
        assert_eq!(report.status, DeliveryStatus::Relayed { id: "SM42".to_string() });
        assert_eq!(report.label(), "Mensagem enviada!");
        assert_eq!(
            *providers.sms_to.lock().unwrap(),
            vec!["+5511999999999".to_string()]
        );
    }

    #[tokio::test]
    async fn test_relay_not_configured_shows_generic_label() {
        let service =
            crate::relay::RelayService::new(crate::config::EmailConfig::default());
        let client = spawn_relay(service).await;
        let platform =
            MockPlatform::new(DESKTOP_UA).answers(vec![PromptEvent::Submit("a@b.com".into())]);
        let (orch, _) = orchestrator(platform);
        let orch = orch.with_relay(client);

        let report = orch.relay_email("Obrigado pelo seu trabalho").await;
        assert_eq!(
            report.status,
            DeliveryStatus::Failed {
                reason: "Canal indisponível no momento.".to_string()
            }
        );
        assert_eq!(report.label(), "Canal indisponível no momento.");
    }

    #[tokio::test]
    async fn test_relay_rejected_shows_server_reason() {
        let providers = Arc::new(RecordingProviders::default());
        let client = spawn_relay(relay_service(&providers)).await;
        let platform =
            MockPlatform::new(DESKTOP_UA).answers(vec![PromptEvent::Submit("a@b.com".into())]);
        let (orch, _) = orchestrator(platform);
        let orch = orch.with_relay(client);

        let report = orch
            .relay_email("seu burro idiota, você é horrível e ridículo!!!")
            .await;
        assert_eq!(report.label(), crate::tone::REJECTION_MESSAGE);
        assert!(matches!(report.status, DeliveryStatus::Failed { .. }));
        assert!(providers.mail_to.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_relay_prompt_cancelled() {
        let providers = Arc::new(RecordingProviders::default());
        let client = spawn_relay(relay_service(&providers)).await;
        let platform =
            MockPlatform::new(DESKTOP_UA).answers(vec![PromptEvent::Key(PromptKey::Escape)]);
        let (orch, _) = orchestrator(platform);
        let orch = orch.with_relay(client);

        let report = orch.relay_sms("oi").await;
        assert_eq!(report.status, DeliveryStatus::Cancelled);
        assert!(providers.sms_to.lock().unwrap().is_empty());
    }

    #[test]
    fn test_channel_names_parse() {
        for channel in Channel::ALL {
            assert_eq!(channel.name().parse::<Channel>().unwrap(), channel);
        }
        assert_eq!("WhatsApp".parse::<Channel>().unwrap(), Channel::WhatsApp);
        assert!("fax".parse::<Channel>().is_err());
        assert_eq!(
            serde_json::to_value(Channel::WhatsApp).unwrap(),
            serde_json::json!("whatsapp")
        );
    }

    #[tokio::test]
    async fn test_deliver_dispatches() {
        let (orch, _) = orchestrator(MockPlatform::new(DESKTOP_UA));
        let report = orch.deliver(Channel::CopyText, "oi").await;
        assert_eq!(report.channel, Channel::CopyText);
        assert_eq!(report.label(), "Texto copiado!");
    }
}
