use serde::{Deserialize, Serialize};

use super::{null_as_default, GeneratedRoutine};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.role == "user"
    }
}

/// Response of `/api/ai/chat`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub routine: Option<GeneratedRoutine>,
}

impl ChatReply {
    pub fn into_message(self) -> (ChatMessage, Option<GeneratedRoutine>) {
        let message = ChatMessage {
            role: self.role.unwrap_or_else(|| "assistant".to_string()),
            content: self.content.unwrap_or_default(),
        };
        (message, self.routine)
    }
}

/// Body of `/api/ai/generar-rutina`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateOptions {
    pub goal: String,
    pub level: String,
    pub days: u8,
    pub equipment: String,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            goal: "Hipertrofia".to_string(),
            level: "Intermedio".to_string(),
            days: 3,
            equipment: "Gimnasio completo".to_string(),
        }
    }
}

/// Response of `/api/ai/adjust`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProgressAnalysis {
    #[serde(default)]
    pub suggestion: Option<String>,
    #[serde(default)]
    pub analysis: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub changes: Vec<SuggestedChange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SuggestedChange {
    pub exercise: String,
    #[serde(default)]
    pub reason: Option<String>,
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}
