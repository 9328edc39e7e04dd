//! Terminal platform
//!
//! Runs delivery actions from the command line. There is no clipboard or
//! share sheet, so those report unavailable and the orchestrator falls back
//! to printing values for manual copy. Prompts read one line from stdin; an
//! empty line or end of input cancels.

use super::platform::{Platform, SharePayload, ShareOutcome};
use super::prompt::{PromptEvent, PromptKey, PromptSession};
use crate::error::{Error, Result};
use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader, Stdin};
use tokio::sync::Mutex;

/// Platform backed by stdin/stdout
pub struct TerminalPlatform {
    origin: String,
    user_agent: String,
    stdin: Mutex<BufReader<Stdin>>,
}

impl TerminalPlatform {
    pub fn new(origin: impl Into<String>, user_agent: impl Into<String>) -> Self {
        Self {
            origin: origin.into(),
            user_agent: user_agent.into(),
            stdin: Mutex::new(BufReader::new(tokio::io::stdin())),
        }
    }
}

#[async_trait]
impl Platform for TerminalPlatform {
    fn origin(&self) -> &str {
        &self.origin
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }

    async fn write_clipboard(&self, _text: &str) -> Result<()> {
        Err(Error::Platform("no clipboard on a terminal".to_string()))
    }

    async fn share(&self, _payload: &SharePayload) -> ShareOutcome {
        ShareOutcome::Unavailable
    }

    fn launch_external(&self, uri: &str) -> Result<()> {
        println!("Abra no seu dispositivo: {}", uri);
        Ok(())
    }

    fn open_in_new_context(&self, url: &str) -> Result<()> {
        println!("Abra no navegador: {}", url);
        Ok(())
    }

    async fn prompt_event(&self, session: &PromptSession) -> PromptEvent {
        let request = session.request();
        match session.error() {
            Some(error) => println!("  {}", error),
            None => {
                println!("{}", request.title);
                println!("{}", request.label);
            }
        }
        if request.placeholder.is_empty() {
            println!("> ");
        } else {
            println!("> (ex.: {})", request.placeholder);
        }

        let mut line = String::new();
        let mut stdin = self.stdin.lock().await;
        match stdin.read_line(&mut line).await {
            Ok(0) => PromptEvent::Dismissed,
            Ok(_) => {
                let value = line.trim_end_matches(['\r', '\n']);
                if value.trim().is_empty() {
                    PromptEvent::Key(PromptKey::Escape)
                } else {
                    PromptEvent::Submit(value.to_string())
                }
            }
            Err(e) => {
                tracing::warn!("Failed to read prompt input: {}", e);
                PromptEvent::Dismissed
            }
        }
    }

    fn show_manual_copy(&self, value: &str) {
        println!("Não foi possível copiar. Copie manualmente:");
        println!("{}", value);
    }
}
