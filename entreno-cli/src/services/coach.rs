//! AI coach conversation and routine generation.
//!
//! A [`CoachSession`] moves between three modes: chatting, choosing
//! generation options, and previewing a proposed routine. A routine offered
//! during the chat is captured so that "generate" can skip straight to the
//! preview.

use serde_json::Value;
use std::time::Duration;

use crate::api::{ApiClient, ApiError};
use crate::models::{ChatMessage, ChatReply, GenerateOptions, GeneratedRoutine};

pub const GREETING: &str = "¡Hola! Soy tu coach digital. ¿Quieres que analice tu progreso o prefieres que diseñemos una nueva rutina desde cero?";
pub const APOLOGY: &str = "Lo siento, hubo un error al conectar con mis circuitos neuronales.";
pub const SUCCESS_BANNER: &str = "Rutina diseñada con éxito, está disponible en tu rutina semanal";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachMode {
    Chat,
    Generate,
    Preview,
}

pub fn activation_message(routine_name: &str) -> String {
    format!(
        "🎯 ¡Rutina \"{}\" activada! Ya puedes verla en tu rutina semanal.",
        routine_name
    )
}

#[derive(Debug, Clone)]
pub struct CoachSession {
    mode: CoachMode,
    messages: Vec<ChatMessage>,
    routine: Option<GeneratedRoutine>,
    options: GenerateOptions,
    loading: bool,
    banner: Option<String>,
    saved: bool,
}

impl Default for CoachSession {
    fn default() -> Self {
        Self::new()
    }
}

impl CoachSession {
    pub fn new() -> Self {
        Self {
            mode: CoachMode::Chat,
            messages: vec![ChatMessage::assistant(GREETING)],
            routine: None,
            options: GenerateOptions::default(),
            loading: false,
            banner: None,
            saved: false,
        }
    }

    pub fn mode(&self) -> CoachMode {
        self.mode
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn routine(&self) -> Option<&GeneratedRoutine> {
        self.routine.as_ref()
    }

    pub fn options_mut(&mut self) -> &mut GenerateOptions {
        &mut self.options
    }

    pub fn banner(&self) -> Option<&str> {
        self.banner.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Send a chat message. Blank input, or a request already in flight, is
    /// ignored and returns `false`. Failures are turned into an apology in
    /// the transcript.
    pub async fn send(&mut self, api: &ApiClient, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() || self.loading {
            return false;
        }

        self.messages.push(ChatMessage::user(text));
        self.routine = None;
        self.loading = true;

        let body = serde_json::json!({ "messages": self.messages });
        let result: Result<ChatReply, ApiError> = api.post("/api/ai/chat", &body).await;
        self.loading = false;

        match result {
            Ok(reply) => {
                let (message, routine) = reply.into_message();
                if let Some(routine) = routine {
                    tracing::debug!("Captured routine {} from chat", routine.name);
                    self.routine = Some(routine);
                    self.saved = false;
                }
                self.messages.push(message);
            }
            Err(e) => {
                tracing::warn!("Coach chat failed: {}", e);
                self.messages.push(ChatMessage::assistant(APOLOGY));
            }
        }
        true
    }

    /// Enter generation: straight to preview if the chat already proposed a routine
    pub fn open_generator(&mut self) {
        self.mode = if self.routine.is_some() {
            CoachMode::Preview
        } else {
            CoachMode::Generate
        };
    }

    /// Produce a routine for preview, reusing one captured from the chat
    pub async fn generate(&mut self, api: &ApiClient) -> Result<&GeneratedRoutine, ApiError> {
        if self.routine.is_none() {
            self.loading = true;
            let result: Result<GeneratedRoutine, ApiError> =
                api.post("/api/ai/generar-rutina", &self.options).await;
            self.loading = false;

            self.routine = Some(result?);
            self.saved = false;
        }

        self.mode = CoachMode::Preview;
        self.routine
            .as_ref()
            .ok_or_else(|| ApiError::Decode("missing routine".to_string()))
    }

    /// Save the previewed routine. Only the first call posts; later calls
    /// are no-ops until the session is reset.
    pub async fn accept(&mut self, api: &ApiClient) -> Result<(), ApiError> {
        if self.saved || self.loading {
            return Ok(());
        }
        let Some(routine) = &self.routine else {
            return Ok(());
        };

        self.loading = true;
        let result: Result<Option<Value>, ApiError> = api.post("/api/rutinas", routine).await;
        self.loading = false;
        result?;

        tracing::info!("Saved coach routine {}", routine.name);
        self.saved = true;
        self.banner = Some(SUCCESS_BANNER.to_string());
        Ok(())
    }

    /// After `delay`, clear the saved routine, return to chat and announce it
    pub async fn complete_activation(&mut self, delay: Duration) {
        if !self.saved {
            return;
        }
        tokio::time::sleep(delay).await;

        if let Some(routine) = self.routine.take() {
            self.messages
                .push(ChatMessage::assistant(activation_message(&routine.name)));
        }
        self.banner = None;
        self.saved = false;
        self.mode = CoachMode::Chat;
    }

    /// Drop the proposal and go back to the chat
    pub fn discard(&mut self) {
        self.routine = None;
        self.saved = false;
        self.banner = None;
        self.mode = CoachMode::Chat;
    }

    /// Leave the options screen without generating
    pub fn back_to_chat(&mut self) {
        self.mode = CoachMode::Chat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_greets() {
        let session = CoachSession::new();
        assert_eq!(session.mode(), CoachMode::Chat);
        assert_eq!(session.messages(), &[ChatMessage::assistant(GREETING)]);
        assert!(session.routine().is_none());
    }

    #[test]
    fn test_generator_without_capture_asks_for_options() {
        let mut session = CoachSession::new();
        session.open_generator();
        assert_eq!(session.mode(), CoachMode::Generate);

        session.back_to_chat();
        assert_eq!(session.mode(), CoachMode::Chat);
    }

    #[test]
    fn test_activation_message() {
        assert_eq!(
            activation_message("Full Body"),
            "🎯 ¡Rutina \"Full Body\" activada! Ya puedes verla en tu rutina semanal."
        );
    }

    #[test]
    fn test_default_options() {
        let session = CoachSession::new();
        assert_eq!(session.options, GenerateOptions::default());
        assert_eq!(session.options.days, 3);
        assert_eq!(session.options.goal, "Hipertrofia");
    }
}
