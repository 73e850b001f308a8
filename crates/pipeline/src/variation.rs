//! Variation/Remix chat runner.

use std::sync::Arc;

use chrono::Utc;
use kokoro_core::chat::{ChatMessage, GenerationMode, VariationSession};
use kokoro_core::error::CoreError;
use kokoro_core::history::HistoryRecord;
use kokoro_core::notice::Notice;
use kokoro_core::types::new_id;
use kokoro_events::{EventBus, StudioEvent};
use tokio::sync::RwLock;

use crate::generator::ImageGenerator;
use crate::history::HistoryStore;
use crate::request::GenerationRequest;

/// Event published when a chat prompt produced images.
pub const VARIATION_GENERATED_EVENT: &str = "variation.generated";

/// Sends chat prompts to the generator and appends the reply.
///
/// The session lock is held only while the log is touched, never across the
/// generator call, so the page stays readable while a request is in flight.
pub struct VariationRunner {
    generator: Arc<dyn ImageGenerator>,
    history: Arc<dyn HistoryStore>,
    session: Arc<RwLock<VariationSession>>,
    event_bus: Arc<EventBus>,
}

impl VariationRunner {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        history: Arc<dyn HistoryStore>,
        session: Arc<RwLock<VariationSession>>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            generator,
            history,
            session,
            event_bus,
        }
    }

    /// Append the user prompt, generate, then append the system reply.
    ///
    /// Without an attached image the latest image in the session is used as
    /// the reference. A blank prompt fails before anything is appended; a
    /// generator failure leaves the user message in place and publishes an
    /// error notice.
    pub async fn submit(
        &self,
        prompt: &str,
        mode: GenerationMode,
        image: Option<String>,
    ) -> Result<ChatMessage, CoreError> {
        let (request, reference) = {
            let mut session = self.session.write().await;
            let reference = image
                .clone()
                .or_else(|| session.log.current_image().map(str::to_string));
            let content = session.log.push_user(prompt, mode, image)?.content.clone();
            let request = GenerationRequest::new(content, session.settings.clone())
                .with_reference(reference.clone())
                .with_mode(mode);
            (request, reference)
        };

        let output = match self.generator.generate(&request).await {
            Ok(output) => output,
            Err(err) => {
                let err = err.into_core();
                tracing::error!(mode = ?mode, error = %err, "Variation generation failed");
                self.event_bus.publish(StudioEvent::notice(&Notice::from(&err)));
                return Err(err);
            }
        };

        let result_image = output.first().unwrap_or_default().to_string();
        let count = output.images.len();
        let reply = self
            .session
            .write()
            .await
            .log
            .push_system(
                format!("Generated {count} {} result(s)", mode.label().to_lowercase()),
                output.images,
            )
            .clone();

        self.history
            .record(HistoryRecord {
                id: new_id(),
                prompt: request.prompt.clone(),
                original_image: reference.unwrap_or_default(),
                result_image,
                timestamp: Utc::now(),
                mode,
            })
            .await?;

        tracing::info!(mode = ?mode, count, "Variation generated");
        self.event_bus.publish(
            StudioEvent::new(VARIATION_GENERATED_EVENT)
                .with_source("chat_message", reply.id.clone())
                .with_payload(serde_json::json!({
                    "mode": mode,
                    "images": count,
                })),
        );
        Ok(reply)
    }

    /// Edit a history record's prompt and run it again against the
    /// record's original image and mode. Returns the edited record and the
    /// new reply.
    pub async fn regenerate_from_history(
        &self,
        record_id: &str,
        prompt: &str,
    ) -> Result<(HistoryRecord, ChatMessage), CoreError> {
        let record = self.history.edit_prompt(record_id, prompt).await?;
        let reference = Some(record.original_image.clone()).filter(|url| !url.is_empty());
        let reply = self.submit(&record.prompt, record.mode, reference).await?;
        Ok((record, reply))
    }
}
