// src/models/assistant.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

// Corpo do POST /api/assistant/chat
#[derive(Debug, Deserialize, Validate)]
pub struct ChatPayload {
    #[validate(
        length(min = 1, message = "Envie pelo menos uma mensagem."),
        custom(function = "validate_conversation")
    )]
    pub messages: Vec<ChatMessage>,
}

// O prompt de sistema é montado pelo servidor; o cliente não pode injetar outro.
fn validate_conversation(messages: &[ChatMessage]) -> Result<(), ValidationError> {
    if messages.iter().any(|m| m.role == ChatRole::System) {
        let mut err = ValidationError::new("system_role");
        err.message = Some("Mensagens de sistema não são permitidas.".into());
        return Err(err);
    }
    if messages.iter().any(|m| m.content.trim().is_empty()) {
        let mut err = ValidationError::new("empty_content");
        err.message = Some("A mensagem não pode estar vazia.".into());
        return Err(err);
    }
    Ok(())
}

// Corpo enviado ao gateway de IA
#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
}
