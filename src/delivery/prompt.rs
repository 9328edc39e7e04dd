//! Modal destination prompt
//!
//! A prompt asks for one value, validates it inline and resolves to
//! `Some(value)` or `None` when the user cancels. [`PromptSession`] holds the
//! state; the platform renders it and feeds back [`PromptEvent`]s.

use super::destination::Validation;
use super::platform::Platform;

/// Validator run on confirm
pub type Validator = fn(&str) -> Validation;

/// Input control hint for the rendering surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    Tel,
    Email,
}

/// What to ask for
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub title: String,
    pub label: String,
    pub placeholder: String,
    pub initial_value: String,
    pub kind: InputKind,
    pub ok_text: String,
    pub validate: Option<Validator>,
}

impl PromptRequest {
    pub fn new(title: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            label: label.into(),
            placeholder: String::new(),
            initial_value: String::new(),
            kind: InputKind::Text,
            ok_text: "Enviar".to_string(),
            validate: None,
        }
    }

    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn kind(mut self, kind: InputKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn validate(mut self, validator: Validator) -> Self {
        self.validate = Some(validator);
        self
    }
}

/// Keys the prompt reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKey {
    Enter,
    Escape,
    Other,
}

/// User interaction with an open prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    /// Input text changed
    Input(String),
    /// Key pressed inside the input
    Key(PromptKey),
    /// OK button
    Confirm,
    /// Cancel button
    Cancel,
    /// Replace the input and confirm in one step (line-oriented surfaces)
    Submit(String),
    /// Surface went away without an answer
    Dismissed,
}

/// Whether the prompt is still open
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptStep {
    Pending,
    Resolved(Option<String>),
}

/// State of one open prompt
#[derive(Debug, Clone)]
pub struct PromptSession {
    request: PromptRequest,
    value: String,
    error: Option<String>,
}

impl PromptSession {
    pub fn new(request: PromptRequest) -> Self {
        let value = request.initial_value.clone();
        Self {
            request,
            value,
            error: None,
        }
    }

    pub fn request(&self) -> &PromptRequest {
        &self.request
    }

    /// Current input text
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Inline validation error from the last confirm attempt
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Apply one event. Enter and OK confirm, Escape and Cancel resolve to `None`.
    pub fn handle(&mut self, event: PromptEvent) -> PromptStep {
        match event {
            PromptEvent::Input(value) => {
                self.value = value;
                PromptStep::Pending
            }
            PromptEvent::Key(PromptKey::Enter) | PromptEvent::Confirm => self.confirm(),
            PromptEvent::Key(PromptKey::Escape) | PromptEvent::Cancel | PromptEvent::Dismissed => {
                PromptStep::Resolved(None)
            }
            PromptEvent::Key(PromptKey::Other) => PromptStep::Pending,
            PromptEvent::Submit(value) => {
                self.value = value;
                self.confirm()
            }
        }
    }

    fn confirm(&mut self) -> PromptStep {
        match self.request.validate {
            Some(validate) => match validate(&self.value) {
                Ok(value) => {
                    self.error = None;
                    PromptStep::Resolved(Some(value))
                }
                Err(message) => {
                    self.error = Some(message);
                    PromptStep::Pending
                }
            },
            None => PromptStep::Resolved(Some(self.value.clone())),
        }
    }
}

/// Run a prompt on `platform` until it resolves.
pub async fn run_prompt(platform: &dyn Platform, request: PromptRequest) -> Option<String> {
    let mut session = PromptSession::new(request);
    loop {
        let event = platform.prompt_event(&session).await;
        if let PromptStep::Resolved(value) = session.handle(event) {
            return value;
        }
    }
}
