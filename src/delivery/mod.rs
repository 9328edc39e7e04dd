//! Delivery orchestration
//!
//! Client-side logic that takes the composed message to its recipient:
//! - [`Composer`]: the working buffer and the text each action sends
//! - [`Orchestrator`]: per-channel flows and their fallback chains
//! - [`Platform`]: clipboard, share sheet, protocol launch and prompts
//! - [`RelayClient`]: relay-backed e-mail and SMS sends

mod client;
mod composer;
mod destination;
mod links;
mod orchestrator;
mod platform;
mod prompt;
mod terminal;

pub use client::RelayClient;
pub use composer::{Composer, PREVIEW_PLACEHOLDER};
pub use destination::{
    is_valid_email, normalize_phone_for_sms, normalize_phone_for_whatsapp, validate_email,
    Validation, EMAIL_INVALID, PHONE_INVALID, PHONE_MISSING,
};
pub use links::{encode_component, is_mobile};
pub use orchestrator::{Channel, DeliveryReport, DeliveryStatus, Orchestrator};
pub use platform::{Platform, SharePayload, ShareOutcome};
pub use prompt::{
    run_prompt, InputKind, PromptEvent, PromptKey, PromptRequest, PromptSession, PromptStep,
    Validator,
};
pub use terminal::TerminalPlatform;
