//! Deep-link construction
//!
//! Builds the `mailto:`, `sms:` and WhatsApp URLs handed to the platform,
//! plus the fixed texts that accompany a share link on each channel.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use regex::Regex;
use std::sync::OnceLock;

/// Characters escaped by `encodeURIComponent`: everything except
/// `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

pub const WHATSAPP_MOBILE_BASE: &str = "https://api.whatsapp.com/send";
pub const WHATSAPP_WEB_BASE: &str = "https://web.whatsapp.com/send";

/// Title used for e-mail subjects and the share sheet
pub const SHARE_TITLE: &str = "Toque Anônimo";

/// Percent-encode a URI component.
pub fn encode_component(value: &str) -> String {
    utf8_percent_encode(value, URI_COMPONENT).to_string()
}

fn mobile_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)Android|iPhone|iPad|iPod|IEMobile|Opera Mini|Mobile").ok())
        .as_ref()
}

/// Whether a user agent belongs to a phone or tablet.
pub fn is_mobile(user_agent: &str) -> bool {
    mobile_pattern().is_some_and(|re| re.is_match(user_agent))
}

/// Text sent over WhatsApp
pub fn whatsapp_text(link: &str) -> String {
    format!("💬 {}:\n{}", SHARE_TITLE, link)
}

/// WhatsApp deep link; mobile agents use the app endpoint, others WhatsApp Web.
pub fn whatsapp_url(mobile: bool, phone: &str, text: &str) -> String {
    let base = if mobile {
        WHATSAPP_MOBILE_BASE
    } else {
        WHATSAPP_WEB_BASE
    };
    format!(
        "{}?phone={}&text={}",
        base,
        encode_component(phone),
        encode_component(text)
    )
}

/// E-mail body; carries the link only, never the message itself.
pub fn email_body(link: &str) -> String {
    format!(
        "Alguém que se importa quer te dar um toque:\n\n{}\n\n(Abra o link para ler a mensagem.)",
        link
    )
}

pub fn mailto_url(to: &str, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        encode_component(to),
        encode_component(subject),
        encode_component(body)
    )
}

/// Text sent over SMS
pub fn sms_body(link: &str) -> String {
    format!("{}: {}", SHARE_TITLE, link)
}

/// `sms:` URI with no recipient, so the messaging app asks for one.
pub fn sms_url(body: &str) -> String {
    format!("sms:?&body={}", encode_component(body))
}
