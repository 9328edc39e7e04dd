//! Composer working buffer

use crate::tone::{analyze, rewrite, ToneReport};

/// Shown in the preview while the buffer is empty
pub const PREVIEW_PLACEHOLDER: &str = "Sua mensagem aparecerá aqui...";

/// The message being written
#[derive(Debug, Clone)]
pub struct Composer {
    text: String,
    positive_mode: bool,
}

impl Default for Composer {
    fn default() -> Self {
        Self::new("")
    }
}

impl Composer {
    /// New buffer with positive mode on
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            positive_mode: true,
        }
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_positive_mode(&mut self, enabled: bool) {
        self.positive_mode = enabled;
    }

    pub fn positive_mode(&self) -> bool {
        self.positive_mode
    }

    /// The text every delivery action sends: trimmed, then rewritten when
    /// positive mode is on.
    pub fn current_message(&self) -> String {
        let trimmed = self.text.trim();
        if self.positive_mode {
            rewrite(trimmed)
        } else {
            trimmed.to_string()
        }
    }

    /// Advisory analysis of what would be sent
    pub fn analysis(&self) -> ToneReport {
        analyze(&self.current_message())
    }

    pub fn preview(&self) -> String {
        let message = self.current_message();
        if message.is_empty() {
            PREVIEW_PLACEHOLDER.to_string()
        } else {
            message
        }
    }
}
