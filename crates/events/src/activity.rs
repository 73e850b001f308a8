//! Recent-activity window.
//!
//! [`ActivityLog`] subscribes to the [`EventBus`](crate::bus::EventBus),
//! traces every received [`StudioEvent`] and keeps the newest ones in a
//! bounded in-memory buffer. Nothing outlives the process.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::{broadcast, RwLock};

use crate::bus::StudioEvent;

/// Default number of events retained.
pub const DEFAULT_RETAINED: usize = 200;

#[derive(Clone)]
pub struct ActivityLog {
    events: Arc<RwLock<VecDeque<StudioEvent>>>,
    capacity: usize,
}

impl ActivityLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            events: Arc::new(RwLock::new(VecDeque::with_capacity(capacity))),
            capacity: capacity.max(1),
        }
    }

    /// Run the subscriber loop until the bus is dropped.
    pub async fn run(self, mut receiver: broadcast::Receiver<StudioEvent>) {
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::debug!(
                        event_type = %event.event_type,
                        entity_type = ?event.source_entity_type,
                        entity_id = ?event.source_entity_id,
                        "Studio event",
                    );
                    self.record(event).await;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity log lagged, some events were dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!("Event bus closed, activity log shutting down");
                    break;
                }
            }
        }
    }

    pub async fn record(&self, event: StudioEvent) {
        let mut events = self.events.write().await;
        if events.len() == self.capacity {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Most recent events, newest first, at most `limit`.
    pub async fn recent(&self, limit: usize) -> Vec<StudioEvent> {
        self.events
            .read()
            .await
            .iter()
            .rev()
            .take(limit)
            .cloned()
            .collect()
    }
}

impl Default for ActivityLog {
    fn default() -> Self {
        Self::new(DEFAULT_RETAINED)
    }
}
