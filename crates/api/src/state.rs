use std::sync::Arc;
use std::time::Duration;

use kokoro_core::chat::VariationSession;
use kokoro_core::storyboard::Storyboard;
use kokoro_events::{ActivityLog, EventBus};
use kokoro_pipeline::{
    GenerationDispatcher, HistoryStore, HttpImageGenerator, ImageGenerator, InMemoryHistoryStore,
    MockImageGenerator, MockTagExtractor, TagExtractor, VariationRunner,
};
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable: every field is behind an `Arc`. Each page owns exactly
/// one state container; the generation settings live in the variation
/// session and are shared with the storyboard.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Image Set page: cuts, frames, selection and tags.
    pub storyboard: Arc<RwLock<Storyboard>>,
    /// Variation page: chat log and generation settings.
    pub variation: Arc<RwLock<VariationSession>>,
    pub history: Arc<dyn HistoryStore>,
    pub tag_extractor: Arc<dyn TagExtractor>,
    pub dispatcher: Arc<GenerationDispatcher>,
    pub variation_runner: Arc<VariationRunner>,
    /// Centralized event bus for studio events and notices.
    pub event_bus: Arc<EventBus>,
    pub activity: ActivityLog,
}

impl AppState {
    /// Wire every page container and collaborator around `generator`.
    pub fn new(config: ServerConfig, generator: Arc<dyn ImageGenerator>) -> Self {
        let (storyboard, history) = if config.seed_demo_data {
            (Storyboard::demo(), InMemoryHistoryStore::with_demo_records())
        } else {
            (Storyboard::new(), InMemoryHistoryStore::new())
        };

        let storyboard = Arc::new(RwLock::new(storyboard));
        let variation = Arc::new(RwLock::new(VariationSession::new()));
        let history: Arc<dyn HistoryStore> = Arc::new(history);
        let event_bus = Arc::new(EventBus::default());

        let dispatcher = Arc::new(GenerationDispatcher::new(
            Arc::clone(&generator),
            Arc::clone(&storyboard),
            Arc::clone(&event_bus),
        ));
        let variation_runner = Arc::new(VariationRunner::new(
            generator,
            Arc::clone(&history),
            Arc::clone(&variation),
            Arc::clone(&event_bus),
        ));

        Self {
            config: Arc::new(config),
            storyboard,
            variation,
            history,
            tag_extractor: Arc::new(MockTagExtractor::default()),
            dispatcher,
            variation_runner,
            event_bus,
            activity: ActivityLog::default(),
        }
    }

    /// Start the activity log subscriber.
    pub fn spawn_activity_log(&self) -> JoinHandle<()> {
        tokio::spawn(self.activity.clone().run(self.event_bus.subscribe()))
    }
}

/// Pick the generator from configuration: HTTP when a backend URL is set,
/// otherwise the mock with the configured delay.
pub fn build_generator(config: &ServerConfig) -> Arc<dyn ImageGenerator> {
    match &config.generation_backend_url {
        Some(url) => {
            tracing::info!(backend = %url, "Using HTTP generation backend");
            Arc::new(HttpImageGenerator::new(url.clone()))
        }
        None => {
            tracing::info!(delay_ms = config.generation_delay_ms, "Using mock generator");
            Arc::new(MockImageGenerator::new(Duration::from_millis(
                config.generation_delay_ms,
            )))
        }
    }
}
