//! Message codec and share links
//!
//! A share link carries the whole message in its `m` query parameter, so
//! nothing is stored server-side and the sender never appears in it:
//!
//! ```text
//! <origin>/?m=<base64url(utf8(message))>
//! ```

use crate::error::{Error, Result};
use base64::alphabet;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;
use base64::Engine;
use url::{ParseError, Url};

/// Query parameter holding the share token
pub const MESSAGE_PARAM: &str = "m";

/// Resolves relative links such as `?m=...` or `/?m=...`
const RELATIVE_BASE: &str = "http://localhost/";

/// Token engine: URL-safe alphabet, no padding on encode, either on decode.
const TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Standard alphabet, accepted on decode for links minted with plain base64.
const LEGACY_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

/// Encode a message into a URL-safe share token.
pub fn encode(text: &str) -> String {
    TOKEN_ENGINE.encode(text.as_bytes())
}

/// Decode a share token back into the message text.
///
/// Fails with [`Error::Decode`] on a bad alphabet, bad padding, or bytes
/// that are not UTF-8.
pub fn decode(token: &str) -> Result<String> {
    let bytes = TOKEN_ENGINE
        .decode(token)
        .or_else(|_| LEGACY_ENGINE.decode(token))
        .map_err(|e| Error::Decode(format!("invalid share token: {}", e)))?;

    String::from_utf8(bytes)
        .map_err(|e| Error::Decode(format!("share token is not UTF-8: {}", e)))
}

/// Build `<origin>/?m=<token>` for a message.
pub fn build_share_link(origin: &str, text: &str) -> String {
    format!(
        "{}/?{}={}",
        origin.trim_end_matches('/'),
        MESSAGE_PARAM,
        encode(text)
    )
}

/// Extract the message from a share link.
///
/// Accepts absolute links as well as a bare query (`?m=...`) or a
/// root-relative path. Returns `None` when the URL does not parse, has no
/// (or an empty) `m` parameter, or carries a token that does not decode.
pub fn get_message_from_url(url: &str) -> Option<String> {
    let parsed = match Url::parse(url) {
        Ok(parsed) => parsed,
        Err(ParseError::RelativeUrlWithoutBase) => Url::parse(RELATIVE_BASE)
            .and_then(|base| base.join(url))
            .ok()?,
        Err(_) => return None,
    };
    let token = parsed
        .query_pairs()
        .find(|(key, _)| key == MESSAGE_PARAM)
        .map(|(_, value)| value.into_owned())?;

    if token.is_empty() {
        return None;
    }

    match decode(&token) {
        Ok(text) => Some(text),
        Err(e) => {
            tracing::debug!("Ignoring undecodable share token: {}", e);
            None
        }
    }
}

/// Which view a URL opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// No valid message in the URL
    Compose,
    /// A decoded message to display
    View(String),
}

/// Route a URL to the compose or view screen.
pub fn route(url: &str) -> Route {
    match get_message_from_url(url) {
        Some(message) => Route::View(message),
        None => Route::Compose,
    }
}
