//! KokoroLab studio event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`StudioEvent`]: the event envelope published on every state change,
//!   generation result and notice.
//! - [`ActivityLog`]: background subscriber that traces every event and
//!   keeps a bounded window of recent activity in memory.

pub mod activity;
pub mod bus;

pub use activity::ActivityLog;
pub use bus::{EventBus, StudioEvent};
