//! Client platform capabilities
//!
//! The orchestrator never touches a browser or OS directly. Everything that
//! suspends or leaves the page goes through [`Platform`].

use super::prompt::{PromptEvent, PromptSession};
use crate::error::Result;
use async_trait::async_trait;

/// Payload for the native share sheet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: String,
}

/// Result of offering the native share sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// User picked a target
    Shared,
    /// Sheet shown, user backed out
    Cancelled,
    /// No share capability on this platform
    Unavailable,
}

/// Capabilities of the surface hosting the composer
#[async_trait]
pub trait Platform: Send + Sync {
    /// Origin share links are built against
    fn origin(&self) -> &str;

    /// User agent used for device detection
    fn user_agent(&self) -> &str;

    /// Write text to the system clipboard
    async fn write_clipboard(&self, text: &str) -> Result<()>;

    /// Offer the native share sheet
    async fn share(&self, payload: &SharePayload) -> ShareOutcome;

    /// Hand a custom-scheme URI (`mailto:`, `sms:`) to the OS without
    /// leaving the current page
    fn launch_external(&self, uri: &str) -> Result<()>;

    /// Open a URL in a new browsing context
    fn open_in_new_context(&self, url: &str) -> Result<()>;

    /// Render the prompt state and wait for the next user event
    async fn prompt_event(&self, session: &PromptSession) -> PromptEvent;

    /// Present a value for manual copy after the clipboard failed
    fn show_manual_copy(&self, value: &str);
}
