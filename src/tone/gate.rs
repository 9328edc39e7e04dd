//! Relay-time tone gate

use super::analyzer::{analyze, ToneReport};
use crate::error::{Error, Result};

/// Messages scoring below this are refused by the relay.
///
/// Looser than [`super::RESPECTFUL_THRESHOLD`]: the composer nudges anything
/// below 75, the relay only blocks below 50.
pub const GATE_THRESHOLD: u8 = 50;

/// Message returned to the sender when the gate refuses a message
pub const REJECTION_MESSAGE: &str =
    "Mensagem considerada agressiva. Ajuste o tom e tente novamente.";

/// Analyze `text` and fail with [`Error::ContentRejected`] when its score is
/// below [`GATE_THRESHOLD`].
///
/// Empty text passes the gate; callers validate presence separately.
pub fn assert_respectful(text: &str) -> Result<ToneReport> {
    let report = analyze(text);
    if report.score < GATE_THRESHOLD {
        tracing::warn!(
            score = report.score,
            issue_count = report.issues.len(),
            "Message refused by tone gate"
        );
        return Err(Error::ContentRejected(REJECTION_MESSAGE.to_string()));
    }
    Ok(report)
}
