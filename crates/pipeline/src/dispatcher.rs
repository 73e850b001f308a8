//! Per-frame generation dispatcher.
//!
//! Every queued frame gets its own tokio task, and each frame id holds at
//! most one in-flight slot: a frame that is already generating is not
//! dispatched again. When a request finishes, the frame is looked up by id
//! so a frame dragged to another cut still receives its image; if the frame
//! was deleted in the meantime the result is dropped and a notice is
//! published instead.

use std::collections::HashSet;
use std::sync::Arc;

use kokoro_core::error::CoreError;
use kokoro_core::notice::Notice;
use kokoro_core::settings::GenerationSettings;
use kokoro_core::storyboard::{FrameRef, Storyboard};
use kokoro_core::types::EntityId;
use kokoro_events::{EventBus, StudioEvent};
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

use crate::generator::ImageGenerator;
use crate::request::GenerationRequest;

/// Event published when a frame receives its image.
pub const FRAME_GENERATED_EVENT: &str = "storyboard.frame_generated";

/// Frame ids with a request in flight.
///
/// Lock order: the storyboard lock is always taken first.
type ActiveFrames = Arc<Mutex<HashSet<EntityId>>>;

/// Fans storyboard frame requests out to an [`ImageGenerator`].
pub struct GenerationDispatcher {
    generator: Arc<dyn ImageGenerator>,
    storyboard: Arc<RwLock<Storyboard>>,
    event_bus: Arc<EventBus>,
    active: ActiveFrames,
    cancel: CancellationToken,
    tracker: TaskTracker,
}

impl GenerationDispatcher {
    pub fn new(
        generator: Arc<dyn ImageGenerator>,
        storyboard: Arc<RwLock<Storyboard>>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            generator,
            storyboard,
            event_bus,
            active: Arc::new(Mutex::new(HashSet::new())),
            cancel: CancellationToken::new(),
            tracker: TaskTracker::new(),
        }
    }

    /// Spawn one generation task per frame. Frames are expected to be
    /// flagged `is_generating` already (see [`Storyboard::apply`]).
    ///
    /// Each frame is rendered as a single image. Returns the number of
    /// tasks spawned; frames that no longer exist are skipped with a notice
    /// and frames already in flight are skipped silently.
    pub async fn dispatch(&self, frames: Vec<FrameRef>, settings: &GenerationSettings) -> usize {
        if self.cancel.is_cancelled() {
            tracing::warn!(count = frames.len(), "Dispatcher is shut down, dropping requests");
            return 0;
        }

        let settings = GenerationSettings {
            quantity: 1,
            ..settings.clone()
        };

        let mut requests = Vec::with_capacity(frames.len());
        {
            let board = self.storyboard.read().await;
            let mut active = self.active.lock().await;
            for frame in frames {
                if active.contains(&frame.frame_id) {
                    tracing::debug!(frame_id = %frame.frame_id, "Frame already generating, skipped");
                    continue;
                }
                match board.frame_prompt(&frame.cut_id, &frame.frame_id) {
                    Ok(prompt) => {
                        active.insert(frame.frame_id.clone());
                        requests.push((frame, GenerationRequest::new(prompt, settings.clone())));
                    }
                    Err(err) => self.publish_notice(&err),
                }
            }
        }

        let spawned = requests.len();
        for (frame, request) in requests {
            let task = FrameTask {
                frame_id: frame.frame_id,
                request,
                generator: Arc::clone(&self.generator),
                storyboard: Arc::clone(&self.storyboard),
                active: Arc::clone(&self.active),
                event_bus: Arc::clone(&self.event_bus),
                cancel: self.cancel.clone(),
            };
            self.tracker.spawn(task.run());
        }

        tracing::info!(count = spawned, "Dispatched frame generation");
        spawned
    }

    /// Number of generation tasks still running.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every task spawned so far has finished.
    pub async fn wait_idle(&self) {
        self.tracker.close();
        self.tracker.wait().await;
        self.tracker.reopen();
    }

    /// Cancel outstanding requests and wait for their tasks to exit.
    pub async fn shutdown(&self) {
        tracing::info!(in_flight = self.tracker.len(), "Generation dispatcher shutting down");
        self.cancel.cancel();
        self.tracker.close();
        self.tracker.wait().await;
    }

    fn publish_notice(&self, err: &CoreError) {
        tracing::warn!(error = %err, "Frame generation skipped");
        self.event_bus.publish(StudioEvent::notice(&Notice::from(err)));
    }
}

// ---------------------------------------------------------------------------
// Per-frame task
// ---------------------------------------------------------------------------

struct FrameTask {
    frame_id: EntityId,
    request: GenerationRequest,
    generator: Arc<dyn ImageGenerator>,
    storyboard: Arc<RwLock<Storyboard>>,
    active: ActiveFrames,
    event_bus: Arc<EventBus>,
    cancel: CancellationToken,
}

impl FrameTask {
    async fn run(self) {
        let frame_id = &self.frame_id;

        let result = tokio::select! {
            _ = self.cancel.cancelled() => {
                // Leave no frame stuck in the generating state.
                let _ = self.settle(None).await;
                tracing::debug!(%frame_id, "Frame generation cancelled");
                return;
            }
            result = self.generator.generate(&self.request) => result,
        };

        let generated = match result {
            Ok(output) => output
                .first()
                .map(str::to_string)
                .ok_or_else(|| CoreError::Generation("generator returned no images".into())),
            Err(err) => Err(err.into_core()),
        };

        match generated {
            Ok(url) => match self.settle(Some(&url)).await {
                Ok(cut_id) => {
                    tracing::info!(%cut_id, %frame_id, "Frame generated");
                    self.event_bus.publish(
                        StudioEvent::new(FRAME_GENERATED_EVENT)
                            .with_source("frame", frame_id.clone())
                            .with_payload(serde_json::json!({
                                "cut_id": cut_id,
                                "image_url": url,
                            })),
                    );
                }
                Err(err) => {
                    tracing::warn!(%frame_id, "Frame removed before generation finished");
                    self.event_bus.publish(StudioEvent::notice(&Notice::from(&err)));
                }
            },
            Err(err) => {
                tracing::error!(%frame_id, error = %err, "Frame generation failed");
                if self.settle(None).await.is_err() {
                    tracing::debug!(%frame_id, "Failed frame was already removed");
                }
                self.event_bus.publish(StudioEvent::notice(&Notice::from(&err)));
            }
        }
    }

    /// Release the frame's in-flight slot and write the outcome to the frame
    /// wherever it lives now: the image on success, a cleared flag otherwise.
    /// Both happen under the storyboard lock. Returns the frame's current cut.
    async fn settle(&self, image_url: Option<&str>) -> Result<EntityId, CoreError> {
        let mut board = self.storyboard.write().await;
        self.active.lock().await.remove(&self.frame_id);

        let at = board.locate_frame(&self.frame_id)?;
        match image_url {
            Some(url) => board.resolve_generation(&at.cut_id, &at.frame_id, url)?,
            None => board.fail_generation(&at.cut_id, &at.frame_id)?,
        }
        Ok(at.cut_id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
