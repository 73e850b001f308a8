//! Variation/Remix chat session: an append-only message log.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::settings::GenerationSettings;
use crate::types::{new_id, EntityId, Timestamp};

// ---------------------------------------------------------------------------
// Generation mode
// ---------------------------------------------------------------------------

/// How a chat prompt is applied to the reference image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenerationMode {
    /// Keep the same character, change outfits and expressions.
    #[default]
    Variation,
    /// Freely modify the image with text instructions.
    Remix,
}

impl GenerationMode {
    pub fn label(self) -> &'static str {
        match self {
            GenerationMode::Variation => "Variation",
            GenerationMode::Remix => "Remix",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            GenerationMode::Variation => "e.g. change to school uniform, smiling face",
            GenerationMode::Remix => "e.g. add a sword, waving hand, change background to classroom",
        }
    }

    pub fn button_text(self) -> &'static str {
        match self {
            GenerationMode::Variation => "Generate Variation",
            GenerationMode::Remix => "Apply Edit",
        }
    }
}

// ---------------------------------------------------------------------------
// Messages
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    User,
    System,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: EntityId,
    pub kind: MessageKind,
    pub content: String,
    /// Reference image the user attached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Images returned by a generation.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<GenerationMode>,
    pub timestamp: Timestamp,
}

/// Validate a prompt before it is sent. Returns the trimmed prompt.
pub fn validate_prompt(prompt: &str) -> Result<&str, CoreError> {
    let trimmed = prompt.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation("prompt must not be empty".to_string()));
    }
    Ok(trimmed)
}

// ---------------------------------------------------------------------------
// ChatLog
// ---------------------------------------------------------------------------

/// One chat session. Messages are appended, never edited.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ChatLog {
    messages: Vec<ChatMessage>,
}

impl ChatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&ChatMessage> {
        self.messages.last()
    }

    /// Most recent image in the session: the latest generated result, or
    /// failing that the latest attached reference.
    pub fn current_image(&self) -> Option<&str> {
        self.messages.iter().rev().find_map(|m| {
            m.images
                .first()
                .map(String::as_str)
                .or(m.image.as_deref())
        })
    }

    /// Append a user prompt. Blank prompts are rejected.
    pub fn push_user(
        &mut self,
        prompt: &str,
        mode: GenerationMode,
        image: Option<String>,
    ) -> Result<&ChatMessage, CoreError> {
        let content = validate_prompt(prompt)?.to_string();
        Ok(self.push(ChatMessage {
            id: new_id(),
            kind: MessageKind::User,
            content,
            image,
            images: Vec::new(),
            mode: Some(mode),
            timestamp: chrono::Utc::now(),
        }))
    }

    /// Append a system reply, typically carrying generated images.
    pub fn push_system(&mut self, content: impl Into<String>, images: Vec<String>) -> &ChatMessage {
        self.push(ChatMessage {
            id: new_id(),
            kind: MessageKind::System,
            content: content.into(),
            image: None,
            images,
            mode: None,
            timestamp: chrono::Utc::now(),
        })
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        // Just pushed, so the log is non-empty.
        &self.messages[self.messages.len() - 1]
    }
}

// ---------------------------------------------------------------------------
// VariationSession
// ---------------------------------------------------------------------------

/// Page-level state for the Variation page: the chat log plus the settings
/// panel next to it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct VariationSession {
    pub log: ChatLog,
    pub settings: GenerationSettings,
}

impl VariationSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the settings after range validation. Invalid settings leave
    /// the current ones in place.
    pub fn update_settings(&mut self, settings: GenerationSettings) -> Result<(), CoreError> {
        settings.validate_settings()?;
        self.settings = settings;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn blank_prompt_is_validation_error() {
        let mut log = ChatLog::new();
        assert_matches!(
            log.push_user("   ", GenerationMode::Variation, None),
            Err(CoreError::Validation(_))
        );
        assert!(log.is_empty());
    }

    #[test]
    fn user_prompt_is_trimmed_and_tagged_with_mode() {
        let mut log = ChatLog::new();
        let msg = log
            .push_user("  add cat ears ", GenerationMode::Remix, None)
            .unwrap()
            .clone();
        assert_eq!(msg.content, "add cat ears");
        assert_eq!(msg.kind, MessageKind::User);
        assert_eq!(msg.mode, Some(GenerationMode::Remix));
    }

    #[test]
    fn log_is_append_only_in_order() {
        let mut log = ChatLog::new();
        log.push_user("first", GenerationMode::Variation, Some("/ref.png".into()))
            .unwrap();
        log.push_system("Here you go", vec!["/out/1.png".into(), "/out/2.png".into()]);

        assert_eq!(log.len(), 2);
        assert_eq!(log.messages()[0].kind, MessageKind::User);
        assert_eq!(log.messages()[1].images.len(), 2);
        assert_eq!(log.current_image(), Some("/out/1.png"));
    }

    #[test]
    fn current_image_falls_back_to_reference() {
        let mut log = ChatLog::new();
        assert_eq!(log.current_image(), None);
        log.push_user("hi", GenerationMode::Variation, Some("/ref.png".into()))
            .unwrap();
        assert_eq!(log.current_image(), Some("/ref.png"));
    }

    #[test]
    fn mode_copy_matches_ui() {
        assert_eq!(GenerationMode::Remix.button_text(), "Apply Edit");
        assert!(GenerationMode::Variation.placeholder().contains("school uniform"));
    }

    #[test]
    fn invalid_settings_are_not_applied() {
        let mut session = VariationSession::new();
        let mut bad = GenerationSettings::default();
        bad.quantity = 9;
        assert_matches!(session.update_settings(bad), Err(CoreError::Validation(_)));
        assert_eq!(session.settings, GenerationSettings::default());

        let good = GenerationSettings {
            quantity: 2,
            ..GenerationSettings::default()
        };
        session.update_settings(good.clone()).unwrap();
        assert_eq!(session.settings, good);
    }
}
