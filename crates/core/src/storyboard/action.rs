//! Reducer-style transitions for the storyboard.
//!
//! Each UI gesture on the editor maps to one [`StoryboardAction`]; the
//! container applies it and reports what changed via [`StoryboardOutcome`].

use serde::{Deserialize, Serialize};

use super::{CutField, FrameRef, Storyboard};
use crate::error::CoreError;
use crate::types::EntityId;

/// A single storyboard transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoryboardAction {
    AddCut,
    /// Edit the title, the scene prompt, or both in one step.
    EditCut {
        cut_id: EntityId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        prompt: Option<String>,
    },
    DeleteCut {
        cut_id: EntityId,
    },
    AddFrame {
        cut_id: EntityId,
    },
    DeleteFrame {
        cut_id: EntityId,
        frame_id: EntityId,
    },
    MoveFrame {
        cut_id: EntityId,
        frame_id: EntityId,
        target_cut_id: EntityId,
        index: usize,
    },
    ToggleSelection {
        cut_id: EntityId,
        frame_id: EntityId,
        selected: bool,
    },
    ClearSelection,
    SetTags {
        cut_id: EntityId,
        frame_id: EntityId,
        tags: Vec<String>,
    },
    AddTag {
        cut_id: EntityId,
        frame_id: EntityId,
        tag: String,
    },
    RemoveTag {
        cut_id: EntityId,
        frame_id: EntityId,
        tag: String,
    },
    MoveTag {
        cut_id: EntityId,
        frame_id: EntityId,
        from: usize,
        to: usize,
    },
    BatchAddTag {
        tag: String,
    },
    BatchReplaceTag {
        from: String,
        to: String,
    },
    BatchDelete,
    BatchRetry,
    GenerateFrame {
        cut_id: EntityId,
        frame_id: EntityId,
    },
    GenerateAll,
}

impl StoryboardAction {
    /// Dot-separated event name used when the action is published.
    pub fn event_name(&self) -> &'static str {
        match self {
            Self::AddCut => "storyboard.cut_added",
            Self::EditCut { .. } => "storyboard.cut_edited",
            Self::DeleteCut { .. } => "storyboard.cut_deleted",
            Self::AddFrame { .. } => "storyboard.frame_added",
            Self::DeleteFrame { .. } => "storyboard.frame_deleted",
            Self::MoveFrame { .. } => "storyboard.frame_moved",
            Self::ToggleSelection { .. } => "storyboard.selection_toggled",
            Self::ClearSelection => "storyboard.selection_cleared",
            Self::SetTags { .. }
            | Self::AddTag { .. }
            | Self::RemoveTag { .. }
            | Self::MoveTag { .. } => "storyboard.tags_changed",
            Self::BatchAddTag { .. } | Self::BatchReplaceTag { .. } => "storyboard.batch_tags_changed",
            Self::BatchDelete => "storyboard.batch_deleted",
            Self::BatchRetry => "storyboard.batch_retry",
            Self::GenerateFrame { .. } | Self::GenerateAll => "storyboard.generation_requested",
        }
    }
}

/// What an applied action changed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StoryboardOutcome {
    /// Valid action that left the board as it was (e.g. a duplicate tag).
    Unchanged,
    Changed,
    CutAdded { cut_id: EntityId },
    FrameAdded { frame: FrameRef },
    /// Frames removed from the board, directly or by cascade.
    FramesRemoved { frames: Vec<FrameRef> },
    /// Frames flagged as generating; the caller must dispatch them.
    GenerationQueued { frames: Vec<FrameRef> },
}

impl StoryboardOutcome {
    fn from_changed(changed: bool) -> Self {
        if changed {
            Self::Changed
        } else {
            Self::Unchanged
        }
    }
}

impl Storyboard {
    /// Apply one action. On error the board is unchanged.
    pub fn apply(&mut self, action: StoryboardAction) -> Result<StoryboardOutcome, CoreError> {
        use StoryboardAction as A;

        let outcome = match action {
            A::AddCut => StoryboardOutcome::CutAdded {
                cut_id: self.add_cut(),
            },
            A::EditCut {
                cut_id,
                title,
                prompt,
            } => {
                self.cut(&cut_id)?;
                let edits = [(CutField::Title, title), (CutField::Prompt, prompt)];
                let mut changed = false;
                for (field, value) in edits {
                    if let Some(value) = value {
                        self.edit_cut(&cut_id, field, &value)?;
                        changed = true;
                    }
                }
                StoryboardOutcome::from_changed(changed)
            }
            A::DeleteCut { cut_id } => {
                let cut = self.delete_cut(&cut_id)?;
                StoryboardOutcome::FramesRemoved {
                    frames: cut
                        .frames
                        .iter()
                        .map(|f| FrameRef::new(cut.id.clone(), f.id.clone()))
                        .collect(),
                }
            }
            A::AddFrame { cut_id } => {
                let frame_id = self.add_frame(&cut_id)?;
                StoryboardOutcome::FrameAdded {
                    frame: FrameRef::new(cut_id, frame_id),
                }
            }
            A::DeleteFrame { cut_id, frame_id } => {
                self.delete_frame(&cut_id, &frame_id)?;
                StoryboardOutcome::FramesRemoved {
                    frames: vec![FrameRef::new(cut_id, frame_id)],
                }
            }
            A::MoveFrame {
                cut_id,
                frame_id,
                target_cut_id,
                index,
            } => {
                self.move_frame(&cut_id, &frame_id, &target_cut_id, index)?;
                StoryboardOutcome::Changed
            }
            A::ToggleSelection {
                cut_id,
                frame_id,
                selected,
            } => {
                let was = self.frame(&cut_id, &frame_id)?.is_selected;
                self.toggle_frame_selection(&cut_id, &frame_id, selected)?;
                StoryboardOutcome::from_changed(was != selected)
            }
            A::ClearSelection => StoryboardOutcome::from_changed(self.clear_selection() > 0),
            A::SetTags {
                cut_id,
                frame_id,
                tags,
            } => {
                self.set_frame_tags(&cut_id, &frame_id, &tags)?;
                StoryboardOutcome::Changed
            }
            A::AddTag {
                cut_id,
                frame_id,
                tag,
            } => StoryboardOutcome::from_changed(self.add_frame_tag(&cut_id, &frame_id, &tag)?),
            A::RemoveTag {
                cut_id,
                frame_id,
                tag,
            } => StoryboardOutcome::from_changed(self.remove_frame_tag(&cut_id, &frame_id, &tag)?),
            A::MoveTag {
                cut_id,
                frame_id,
                from,
                to,
            } => StoryboardOutcome::from_changed(self.move_frame_tag(&cut_id, &frame_id, from, to)?),
            A::BatchAddTag { tag } => StoryboardOutcome::from_changed(self.batch_add_tag(&tag) > 0),
            A::BatchReplaceTag { from, to } => {
                StoryboardOutcome::from_changed(self.batch_replace_tag(&from, &to) > 0)
            }
            A::BatchDelete => StoryboardOutcome::FramesRemoved {
                frames: self.batch_delete(),
            },
            A::BatchRetry => StoryboardOutcome::GenerationQueued {
                frames: self.batch_retry(),
            },
            A::GenerateFrame { cut_id, frame_id } => {
                if self.mark_generating(&cut_id, &frame_id)? {
                    StoryboardOutcome::GenerationQueued {
                        frames: vec![FrameRef::new(cut_id, frame_id)],
                    }
                } else {
                    StoryboardOutcome::Unchanged
                }
            }
            A::GenerateAll => StoryboardOutcome::GenerationQueued {
                frames: self.mark_all_ungenerated(),
            },
        };

        tracing::debug!(?outcome, "Storyboard action applied");
        Ok(outcome)
    }
}
