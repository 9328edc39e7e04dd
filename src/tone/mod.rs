//! Tone filtering
//!
//! One shared implementation of the content policy:
//! - [`analyze`] scores a message (composer preview and relay gate)
//! - [`assert_respectful`] refuses messages below the gate threshold
//! - [`rewrite`] softens phrasing before delivery

mod analyzer;
mod gate;
mod rewrite;

pub use analyzer::{
    analyze, ToneQuality, ToneReport, EXCLAMATION_PENALTY, RESPECTFUL_THRESHOLD, TERM_PENALTY,
};
pub use gate::{assert_respectful, GATE_THRESHOLD, REJECTION_MESSAGE};
pub use rewrite::rewrite;
