//! Cut and frame records owned by a [`Storyboard`](super::Storyboard).

use serde::{Deserialize, Serialize};

use crate::types::{new_frame_id, EntityId};

/// A single generatable image slot with its descriptive tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub id: EntityId,
    /// Ordered; uniqueness is enforced by the tag operations, not the type.
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub is_generated: bool,
    /// Only meaningful inside the owning cut's frame list.
    #[serde(default)]
    pub is_selected: bool,
    /// A generation request for this frame is in flight.
    #[serde(default)]
    pub is_generating: bool,
}

impl Frame {
    /// A blank frame: no tags, no image, not generated, not selected.
    pub fn blank(id: impl Into<EntityId>) -> Self {
        Self {
            id: id.into(),
            tags: Vec::new(),
            image_url: None,
            is_generated: false,
            is_selected: false,
            is_generating: false,
        }
    }

    /// A blank frame with an id scoped under `cut_id`.
    pub fn new_in(cut_id: &str) -> Self {
        Self::blank(new_frame_id(cut_id))
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.tags = crate::tags::normalize_tags(tags);
        self
    }

    pub fn generated(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self.is_generated = true;
        self
    }
}

/// A named scene grouping an ordered list of frames it owns exclusively.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cut {
    pub id: EntityId,
    pub title: String,
    /// Scene description used as the base generation prompt.
    pub prompt: String,
    pub frames: Vec<Frame>,
}

impl Cut {
    pub fn new(id: impl Into<EntityId>, title: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            prompt: prompt.into(),
            frames: Vec::new(),
        }
    }

    pub fn with_frames(mut self, frames: Vec<Frame>) -> Self {
        self.frames = frames;
        self
    }

    pub fn frame(&self, frame_id: &str) -> Option<&Frame> {
        self.frames.iter().find(|f| f.id == frame_id)
    }

    pub(crate) fn frame_mut(&mut self, frame_id: &str) -> Option<&mut Frame> {
        self.frames.iter_mut().find(|f| f.id == frame_id)
    }

    pub(crate) fn frame_index(&self, frame_id: &str) -> Option<usize> {
        self.frames.iter().position(|f| f.id == frame_id)
    }
}

/// Editable text fields of a cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CutField {
    Title,
    Prompt,
}

/// Address of a frame: its owning cut plus its own id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FrameRef {
    pub cut_id: EntityId,
    pub frame_id: EntityId,
}

impl FrameRef {
    pub fn new(cut_id: impl Into<EntityId>, frame_id: impl Into<EntityId>) -> Self {
        Self {
            cut_id: cut_id.into(),
            frame_id: frame_id.into(),
        }
    }
}

/// Header counters: "N of M frames generated", plus the selection size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub generated: usize,
    pub total: usize,
    pub selected: usize,
}

impl Progress {
    /// The batch toolbar is shown iff at least one frame is selected.
    pub fn toolbar_visible(&self) -> bool {
        self.selected > 0
    }
}
