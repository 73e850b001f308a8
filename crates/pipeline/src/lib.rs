//! Generation collaborators and the request pipeline.
//!
//! The studio never talks to a model directly. It goes through three
//! swappable collaborators:
//!
//! - [`ImageGenerator`]: prompt + tags + settings in, image URLs out.
//! - [`TagExtractor`]: suggested tags from a prompt or an image.
//! - [`HistoryStore`]: completed generations, listable and editable.
//!
//! [`GenerationDispatcher`] fans storyboard frame requests out to the
//! generator and writes each result back to exactly the frame it was
//! requested for. [`VariationRunner`] does the same for chat prompts.

pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod history;
pub mod request;
pub mod tagging;
pub mod variation;

pub use dispatcher::GenerationDispatcher;
pub use error::PipelineError;
pub use generator::{HttpImageGenerator, ImageGenerator, MockImageGenerator};
pub use history::{HistoryStore, InMemoryHistoryStore};
pub use request::{GenerationOutput, GenerationRequest};
pub use tagging::{MockTagExtractor, TagExtractor};
pub use variation::VariationRunner;
