//! Toque Anônimo - anonymous, tone-filtered message links
//!
//! A sender composes a short message, gets tone feedback, and delivers it
//! through a link that carries the message but never the sender.
//!
//! ## Architecture
//!
//! ```text
//! composer text ──► tone::analyze (advisory, continuous)
//!        │
//!        ▼ send action
//! codec::build_share_link ──► delivery::Orchestrator
//!                                │
//!          ┌─────────────────────┼──────────────────────────┐
//!          ▼                     ▼                          ▼
//!   clipboard / share     WhatsApp, mailto:, sms:     RelayClient ──HTTP──► relay
//!                                                                            │
//!                                            tone gate ◄─────────────────────┤
//!                                                                            ▼
//!                                                                   SMTP / Twilio
//! ```
//!
//! ## Modules
//!
//! - [`tone`]: tone analyzer, relay gate and positivity rewrite
//! - [`codec`]: share tokens, share links, compose/view routing
//! - [`delivery`]: channel flows, prompts, platform capabilities
//! - [`relay`]: anonymous e-mail and SMS relay service
//! - [`api`]: HTTP application and server bootstrap
//! - [`config`]: configuration management

pub mod api;
pub mod codec;
pub mod config;
pub mod delivery;
pub mod error;
pub mod relay;
pub mod tone;

pub use config::ToqueConfig;
pub use error::{Error, Result};
