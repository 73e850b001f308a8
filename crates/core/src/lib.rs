//! KokoroLab studio domain core.
//!
//! Page-level state containers and the rules that drive them:
//!
//! - [`storyboard`]: the `Cut -> Frame` image-set editor (selection, tags,
//!   batch toolbar, generation flags) and its reducer.
//! - [`tags`]: tag dedup, removal, reordering and suggestions.
//! - [`chat`]: the append-only Variation/Remix chat log.
//! - [`settings`]: generation knobs with range validation.
//! - [`fast_start`]: story-to-storyboard bootstrap.
//! - [`history`], [`notice`], [`pages`], [`prompts`]: supporting records.

pub mod chat;
pub mod error;
pub mod fast_start;
pub mod history;
pub mod notice;
pub mod pages;
pub mod prompts;
pub mod settings;
pub mod storyboard;
pub mod tags;
pub mod types;
