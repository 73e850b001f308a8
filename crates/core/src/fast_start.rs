//! Fast Start: turn a one-line story into a ready-to-generate storyboard.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::storyboard::{Cut, Frame, Storyboard};
use crate::types::new_id;

pub const MIN_CUTS: u32 = 1;
pub const MAX_CUTS: u32 = 12;
pub const MIN_FRAMES: u32 = 4;
pub const MAX_FRAMES: u32 = 16;

/// Tag applied to every frame when the long-shot switch is on.
pub const LONG_SHOT_TAG: &str = "wide shot";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct FastStartRequest {
    pub story: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference_image: Option<String>,
    #[serde(default)]
    pub long_shot: bool,
    #[validate(range(min = 1, max = 12))]
    #[serde(default = "default_cut_count")]
    pub cut_count: u32,
    /// Frames per cut. The slider moves in steps of two.
    #[validate(range(min = 4, max = 16))]
    #[serde(default = "default_frame_count")]
    pub frame_count: u32,
}

fn default_cut_count() -> u32 {
    4
}

fn default_frame_count() -> u32 {
    8
}

impl FastStartRequest {
    pub fn new(story: impl Into<String>) -> Self {
        Self {
            story: story.into(),
            reference_image: None,
            long_shot: false,
            cut_count: default_cut_count(),
            frame_count: default_frame_count(),
        }
    }

    pub fn validate_request(&self) -> Result<(), CoreError> {
        if self.story.trim().is_empty() {
            return Err(CoreError::Validation(
                "Please enter a story description".to_string(),
            ));
        }
        self.validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        if self.frame_count % 2 != 0 {
            return Err(CoreError::Validation(format!(
                "frame_count must be even, got {}",
                self.frame_count
            )));
        }
        Ok(())
    }

    /// Slider semantics: clamp both counts into range and snap the frame
    /// count down to an even value.
    pub fn clamped(&self) -> Self {
        let frame_count = self.frame_count.clamp(MIN_FRAMES, MAX_FRAMES);
        Self {
            cut_count: self.cut_count.clamp(MIN_CUTS, MAX_CUTS),
            frame_count: frame_count - frame_count % 2,
            ..self.clone()
        }
    }

    /// Build a storyboard of `cut_count` cuts with `frame_count` blank frames
    /// each, all sharing the story as their scene prompt.
    pub fn build_storyboard(&self) -> Result<Storyboard, CoreError> {
        self.validate_request()?;

        let story = self.story.trim();
        let mut board = Storyboard::new();
        for n in 1..=self.cut_count {
            let cut_id = new_id();
            let frames = (0..self.frame_count)
                .map(|_| {
                    let frame = Frame::new_in(&cut_id);
                    if self.long_shot {
                        frame.with_tags([LONG_SHOT_TAG])
                    } else {
                        frame
                    }
                })
                .collect();
            board.push_cut(Cut::new(cut_id.clone(), format!("Cut {n}"), story).with_frames(frames));
        }

        tracing::debug!(
            cuts = self.cut_count,
            frames_per_cut = self.frame_count,
            long_shot = self.long_shot,
            "Fast start storyboard built",
        );
        Ok(board)
    }
}
