//! Storyboard ("Image Set") page state: a nested `Cut -> Frame` collection
//! with selection, tag editing, drag reordering and generation flags.
//!
//! Every id-addressed operation fails with [`CoreError::NotFound`] when the
//! id does not resolve, and leaves the storyboard untouched in that case.
//! Selection is never stored on its own: it is always rebuilt by filtering
//! frames on `is_selected`, so deleting a cut or frame cannot leave a
//! dangling selected id behind.

pub mod action;
pub mod model;

pub use action::{StoryboardAction, StoryboardOutcome};
pub use model::{Cut, CutField, Frame, FrameRef, Progress};

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tags;
use crate::types::{new_id, EntityId};

/// Number of blank frames a freshly added cut starts with.
pub const FRAMES_PER_NEW_CUT: usize = 2;

/// Page-level state container for the storyboard editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Storyboard {
    cuts: Vec<Cut>,
}

impl Storyboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cuts(cuts: Vec<Cut>) -> Self {
        Self { cuts }
    }

    /// The two-scene school storyboard the editor opens with.
    pub fn demo() -> Self {
        let opening = Cut::new("1", "Opening Scene", "Character introduction in school courtyard")
            .with_frames(vec![
                Frame::blank("1-1").with_tags(["school uniform", "smiling", "long hair"]),
                Frame::blank("1-2")
                    .with_tags(["school uniform", "walking", "backpack"])
                    .generated("/placeholder.svg"),
                Frame::blank("1-3").with_tags(["close-up", "surprised", "big eyes"]),
                Frame::blank("1-4").with_tags(["school uniform", "waving", "happy"]),
            ]);
        let classroom = Cut::new("2", "Classroom Scene", "Character sitting at desk, taking notes")
            .with_frames(vec![
                Frame::blank("2-1").with_tags(["classroom", "sitting", "studying"]),
                Frame::blank("2-2").with_tags(["notebook", "writing", "concentrated"]),
                Frame::blank("2-3")
                    .with_tags(["teacher", "blackboard", "listening"])
                    .generated("/placeholder.svg"),
                Frame::blank("2-4").with_tags(["lunch break", "friends", "talking"]),
            ]);
        Self::with_cuts(vec![opening, classroom])
    }

    // -----------------------------------------------------------------------
    // Lookup
    // -----------------------------------------------------------------------

    pub fn cuts(&self) -> &[Cut] {
        &self.cuts
    }

    pub fn into_cuts(self) -> Vec<Cut> {
        self.cuts
    }

    pub fn cut(&self, cut_id: &str) -> Result<&Cut, CoreError> {
        self.cuts
            .iter()
            .find(|c| c.id == cut_id)
            .ok_or_else(|| CoreError::not_found("Cut", cut_id))
    }

    pub fn frame(&self, cut_id: &str, frame_id: &str) -> Result<&Frame, CoreError> {
        self.cut(cut_id)?
            .frame(frame_id)
            .ok_or_else(|| CoreError::not_found("Frame", frame_id))
    }

    /// Current address of a frame. Frame ids are unique across the board,
    /// so a frame dragged to another cut is still found.
    pub fn locate_frame(&self, frame_id: &str) -> Result<FrameRef, CoreError> {
        self.cuts
            .iter()
            .find_map(|c| {
                c.frame(frame_id)
                    .map(|f| FrameRef::new(c.id.clone(), f.id.clone()))
            })
            .ok_or_else(|| CoreError::not_found("Frame", frame_id))
    }

    fn cut_mut(&mut self, cut_id: &str) -> Result<&mut Cut, CoreError> {
        self.cuts
            .iter_mut()
            .find(|c| c.id == cut_id)
            .ok_or_else(|| CoreError::not_found("Cut", cut_id))
    }

    fn frame_mut(&mut self, cut_id: &str, frame_id: &str) -> Result<&mut Frame, CoreError> {
        self.cut_mut(cut_id)?
            .frame_mut(frame_id)
            .ok_or_else(|| CoreError::not_found("Frame", frame_id))
    }

    fn frames_mut(&mut self) -> impl Iterator<Item = &mut Frame> {
        self.cuts.iter_mut().flat_map(|c| c.frames.iter_mut())
    }

    fn frames(&self) -> impl Iterator<Item = &Frame> {
        self.cuts.iter().flat_map(|c| c.frames.iter())
    }

    // -----------------------------------------------------------------------
    // Selection
    // -----------------------------------------------------------------------

    /// Set `is_selected` on exactly the addressed frame.
    pub fn toggle_frame_selection(
        &mut self,
        cut_id: &str,
        frame_id: &str,
        selected: bool,
    ) -> Result<(), CoreError> {
        self.frame_mut(cut_id, frame_id)?.is_selected = selected;
        Ok(())
    }

    pub fn count_selected(&self) -> usize {
        self.frames().filter(|f| f.is_selected).count()
    }

    /// Deselect every frame. Returns how many were selected.
    pub fn clear_selection(&mut self) -> usize {
        let mut cleared = 0;
        for frame in self.frames_mut().filter(|f| f.is_selected) {
            frame.is_selected = false;
            cleared += 1;
        }
        cleared
    }

    /// Addresses of all selected frames, in board order.
    pub fn selected_frame_ids(&self) -> Vec<FrameRef> {
        self.cuts
            .iter()
            .flat_map(|c| {
                c.frames
                    .iter()
                    .filter(|f| f.is_selected)
                    .map(move |f| FrameRef::new(c.id.clone(), f.id.clone()))
            })
            .collect()
    }

    pub fn progress(&self) -> Progress {
        Progress {
            generated: self.frames().filter(|f| f.is_generated).count(),
            total: self.frames().count(),
            selected: self.count_selected(),
        }
    }

    // -----------------------------------------------------------------------
    // Cuts
    // -----------------------------------------------------------------------

    /// Append a cut titled `Scene N` with two blank frames. Returns its id.
    pub fn add_cut(&mut self) -> EntityId {
        let id = new_id();
        let title = format!("Scene {}", self.cuts.len() + 1);
        let frames = (0..FRAMES_PER_NEW_CUT).map(|_| Frame::new_in(&id)).collect();
        self.cuts.push(Cut::new(id.clone(), title, "").with_frames(frames));
        id
    }

    /// Append a fully formed cut (seed data, fast start).
    pub fn push_cut(&mut self, cut: Cut) {
        self.cuts.push(cut);
    }

    pub fn edit_cut(&mut self, cut_id: &str, field: CutField, value: &str) -> Result<(), CoreError> {
        let cut = self.cut_mut(cut_id)?;
        match field {
            CutField::Title => cut.title = value.to_string(),
            CutField::Prompt => cut.prompt = value.to_string(),
        }
        Ok(())
    }

    /// Remove a cut together with all of its frames.
    pub fn delete_cut(&mut self, cut_id: &str) -> Result<Cut, CoreError> {
        let index = self
            .cuts
            .iter()
            .position(|c| c.id == cut_id)
            .ok_or_else(|| CoreError::not_found("Cut", cut_id))?;
        Ok(self.cuts.remove(index))
    }

    // -----------------------------------------------------------------------
    // Frames
    // -----------------------------------------------------------------------

    /// Append a blank frame to the addressed cut. Returns the new frame id.
    pub fn add_frame(&mut self, cut_id: &str) -> Result<EntityId, CoreError> {
        let cut = self.cut_mut(cut_id)?;
        let frame = Frame::new_in(cut_id);
        let id = frame.id.clone();
        cut.frames.push(frame);
        Ok(id)
    }

    pub fn delete_frame(&mut self, cut_id: &str, frame_id: &str) -> Result<Frame, CoreError> {
        let cut = self.cut_mut(cut_id)?;
        let index = cut
            .frame_index(frame_id)
            .ok_or_else(|| CoreError::not_found("Frame", frame_id))?;
        Ok(cut.frames.remove(index))
    }

    /// Drag a frame to `index` within `target_cut_id` (which may be its own cut).
    ///
    /// The index is clamped to the target's frame count after removal.
    pub fn move_frame(
        &mut self,
        cut_id: &str,
        frame_id: &str,
        target_cut_id: &str,
        index: usize,
    ) -> Result<(), CoreError> {
        // Resolve both ends before mutating anything.
        self.frame(cut_id, frame_id)?;
        self.cut(target_cut_id)?;

        let frame = self.delete_frame(cut_id, frame_id)?;
        let target = self.cut_mut(target_cut_id)?;
        let index = index.min(target.frames.len());
        target.frames.insert(index, frame);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Tags
    // -----------------------------------------------------------------------

    /// Replace a frame's tags, deduplicating under the [`tags::add_tag`] rules.
    pub fn set_frame_tags(
        &mut self,
        cut_id: &str,
        frame_id: &str,
        new_tags: &[String],
    ) -> Result<(), CoreError> {
        self.frame_mut(cut_id, frame_id)?.tags = tags::normalize_tags(new_tags);
        Ok(())
    }

    pub fn add_frame_tag(&mut self, cut_id: &str, frame_id: &str, tag: &str) -> Result<bool, CoreError> {
        Ok(tags::add_tag(&mut self.frame_mut(cut_id, frame_id)?.tags, tag))
    }

    pub fn remove_frame_tag(
        &mut self,
        cut_id: &str,
        frame_id: &str,
        tag: &str,
    ) -> Result<bool, CoreError> {
        Ok(tags::remove_tag(&mut self.frame_mut(cut_id, frame_id)?.tags, tag))
    }

    pub fn move_frame_tag(
        &mut self,
        cut_id: &str,
        frame_id: &str,
        from: usize,
        to: usize,
    ) -> Result<bool, CoreError> {
        Ok(tags::move_tag(&mut self.frame_mut(cut_id, frame_id)?.tags, from, to))
    }

    // -----------------------------------------------------------------------
    // Batch toolbar
    // -----------------------------------------------------------------------

    /// Add `tag` to every selected frame. Returns how many frames changed.
    pub fn batch_add_tag(&mut self, tag: &str) -> usize {
        self.frames_mut()
            .filter(|f| f.is_selected)
            .map(|f| tags::add_tag(&mut f.tags, tag))
            .filter(|changed| *changed)
            .count()
    }

    /// Replace `from` with `to` on every selected frame. Returns how many changed.
    pub fn batch_replace_tag(&mut self, from: &str, to: &str) -> usize {
        self.frames_mut()
            .filter(|f| f.is_selected)
            .map(|f| tags::replace_tag(&mut f.tags, from, to))
            .filter(|changed| *changed)
            .count()
    }

    /// Delete every selected frame. Returns the removed addresses.
    pub fn batch_delete(&mut self) -> Vec<FrameRef> {
        let removed = self.selected_frame_ids();
        for cut in &mut self.cuts {
            cut.frames.retain(|f| !f.is_selected);
        }
        removed
    }

    /// Queue every selected frame for regeneration. Frames with a request
    /// already in flight are left out. Returns the queued addresses.
    pub fn batch_retry(&mut self) -> Vec<FrameRef> {
        let mut queued = Vec::new();
        for cut in &mut self.cuts {
            for frame in cut.frames.iter_mut().filter(|f| f.is_selected && !f.is_generating) {
                frame.is_generating = true;
                queued.push(FrameRef::new(cut.id.clone(), frame.id.clone()));
            }
        }
        queued
    }

    // -----------------------------------------------------------------------
    // Generation flags
    // -----------------------------------------------------------------------

    /// Mark a frame as having a generation request in flight.
    ///
    /// Returns `false` when one is already in flight; at most one request
    /// per frame is ever queued.
    pub fn mark_generating(&mut self, cut_id: &str, frame_id: &str) -> Result<bool, CoreError> {
        let frame = self.frame_mut(cut_id, frame_id)?;
        if frame.is_generating {
            return Ok(false);
        }
        frame.is_generating = true;
        Ok(true)
    }

    /// Mark every not-yet-generated, idle frame as in flight ("Generate All").
    pub fn mark_all_ungenerated(&mut self) -> Vec<FrameRef> {
        let mut queued = Vec::new();
        for cut in &mut self.cuts {
            for frame in cut.frames.iter_mut().filter(|f| !f.is_generated && !f.is_generating) {
                frame.is_generating = true;
                queued.push(FrameRef::new(cut.id.clone(), frame.id.clone()));
            }
        }
        queued
    }

    /// Mark the first frame of every cut as in flight, one key image per
    /// scene.
    pub fn queue_key_frames(&mut self) -> Vec<FrameRef> {
        let mut queued = Vec::new();
        for cut in &mut self.cuts {
            if let Some(frame) = cut.frames.first_mut() {
                frame.is_generating = true;
                queued.push(FrameRef::new(cut.id.clone(), frame.id.clone()));
            }
        }
        queued
    }

    /// Store a generated image on exactly the addressed frame.
    pub fn resolve_generation(
        &mut self,
        cut_id: &str,
        frame_id: &str,
        image_url: &str,
    ) -> Result<(), CoreError> {
        let frame = self.frame_mut(cut_id, frame_id)?;
        frame.image_url = Some(image_url.to_string());
        frame.is_generated = true;
        frame.is_generating = false;
        Ok(())
    }

    /// Clear the in-flight flag after a failed request; the previous image stays.
    pub fn fail_generation(&mut self, cut_id: &str, frame_id: &str) -> Result<(), CoreError> {
        self.frame_mut(cut_id, frame_id)?.is_generating = false;
        Ok(())
    }

    /// Drop a frame's image so it reads as ungenerated again.
    pub fn reset_generation(&mut self, cut_id: &str, frame_id: &str) -> Result<(), CoreError> {
        let frame = self.frame_mut(cut_id, frame_id)?;
        frame.image_url = None;
        frame.is_generated = false;
        frame.is_generating = false;
        Ok(())
    }

    /// Prompt for a frame: its cut's scene prompt plus the frame tags.
    pub fn frame_prompt(&self, cut_id: &str, frame_id: &str) -> Result<String, CoreError> {
        let cut = self.cut(cut_id)?;
        let frame = cut
            .frame(frame_id)
            .ok_or_else(|| CoreError::not_found("Frame", frame_id))?;
        let mut parts: Vec<&str> = Vec::with_capacity(frame.tags.len() + 1);
        if !cut.prompt.trim().is_empty() {
            parts.push(cut.prompt.trim());
        }
        parts.extend(frame.tags.iter().map(String::as_str));
        Ok(parts.join(", "))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn two_frame_board() -> Storyboard {
        Storyboard::with_cuts(vec![Cut::new("1", "Opening", "")
            .with_frames(vec![Frame::blank("1-1"), Frame::blank("1-2")])])
    }

    // -- selection -----------------------------------------------------------

    #[test]
    fn select_two_then_clear() {
        let mut board = two_frame_board();

        board.toggle_frame_selection("1", "1-1", true).unwrap();
        assert_eq!(board.count_selected(), 1);

        board.toggle_frame_selection("1", "1-2", true).unwrap();
        assert_eq!(board.count_selected(), 2);

        assert_eq!(board.clear_selection(), 2);
        assert_eq!(board.count_selected(), 0);
    }

    #[test]
    fn select_then_deselect_restores_original() {
        let original = Storyboard::demo();
        let mut board = original.clone();

        board.toggle_frame_selection("2", "2-3", true).unwrap();
        assert_ne!(board, original);
        board.toggle_frame_selection("2", "2-3", false).unwrap();

        assert_eq!(board, original);
    }

    #[test]
    fn clear_selection_always_zeroes_count() {
        let mut board = Storyboard::demo();
        for cut in board.clone().cuts() {
            for frame in &cut.frames {
                board.toggle_frame_selection(&cut.id, &frame.id, true).unwrap();
            }
        }
        assert_eq!(board.count_selected(), 8);
        board.clear_selection();
        assert_eq!(board.count_selected(), 0);
        assert!(board.selected_frame_ids().is_empty());
    }

    #[test]
    fn selecting_unknown_frame_is_not_found_and_unchanged() {
        let mut board = two_frame_board();
        let before = board.clone();

        assert_matches!(
            board.toggle_frame_selection("1", "9-9", true),
            Err(CoreError::NotFound { entity: "Frame", .. })
        );
        assert_matches!(
            board.toggle_frame_selection("9", "1-1", true),
            Err(CoreError::NotFound { entity: "Cut", .. })
        );
        assert_eq!(board, before);
    }

    #[test]
    fn selection_addresses_only_owning_cut() {
        // Same frame id under two cuts: only the addressed one flips.
        let mut board = Storyboard::with_cuts(vec![
            Cut::new("a", "A", "").with_frames(vec![Frame::blank("x")]),
            Cut::new("b", "B", "").with_frames(vec![Frame::blank("x")]),
        ]);
        board.toggle_frame_selection("b", "x", true).unwrap();
        assert_eq!(board.selected_frame_ids(), vec![FrameRef::new("b", "x")]);
    }

    #[test]
    fn progress_counts_generated_frames() {
        let mut board = Storyboard::demo();
        board.toggle_frame_selection("1", "1-1", true).unwrap();
        let progress = board.progress();
        assert_eq!(progress.generated, 2);
        assert_eq!(progress.total, 8);
        assert_eq!(progress.selected, 1);
        assert!(progress.toolbar_visible());
    }

    // -- cuts ----------------------------------------------------------------

    #[test]
    fn delete_cut_drops_its_selected_frames() {
        let mut board = Storyboard::demo();
        board.toggle_frame_selection("1", "1-1", true).unwrap();
        board.toggle_frame_selection("1", "1-3", true).unwrap();
        board.toggle_frame_selection("2", "2-2", true).unwrap();

        let removed = board.delete_cut("1").unwrap();
        assert_eq!(removed.frames.len(), 4);
        assert_eq!(board.count_selected(), 1);
        assert!(board.frame("1", "1-1").is_err());
    }

    #[test]
    fn delete_unknown_cut_is_not_found() {
        let mut board = Storyboard::demo();
        assert_matches!(board.delete_cut("nope"), Err(CoreError::NotFound { .. }));
        assert_eq!(board.cuts().len(), 2);
    }

    #[test]
    fn add_cut_numbers_scene_and_seeds_two_frames() {
        let mut board = Storyboard::demo();
        let id = board.add_cut();
        let cut = board.cut(&id).unwrap();
        assert_eq!(cut.title, "Scene 3");
        assert_eq!(cut.frames.len(), FRAMES_PER_NEW_CUT);
        assert!(cut.frames.iter().all(|f| f.tags.is_empty() && !f.is_generated));
        assert_ne!(cut.frames[0].id, cut.frames[1].id);
    }

    #[test]
    fn edit_cut_fields() {
        let mut board = Storyboard::demo();
        board.edit_cut("1", CutField::Title, "Prologue").unwrap();
        board.edit_cut("1", CutField::Prompt, "Rainy morning").unwrap();
        let cut = board.cut("1").unwrap();
        assert_eq!(cut.title, "Prologue");
        assert_eq!(cut.prompt, "Rainy morning");
    }

    // -- frames --------------------------------------------------------------

    #[test]
    fn add_frame_appends_blank_frame() {
        let mut board = two_frame_board();
        let id = board.add_frame("1").unwrap();

        let cut = board.cut("1").unwrap();
        assert_eq!(cut.frames.len(), 3);
        let frame = cut.frames.last().unwrap();
        assert_eq!(frame.id, id);
        assert!(!frame.is_generated);
        assert!(frame.tags.is_empty());
        assert!(id.starts_with("1-"));
    }

    #[test]
    fn add_frame_ids_are_unique() {
        let mut board = two_frame_board();
        let a = board.add_frame("1").unwrap();
        let b = board.add_frame("1").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn add_frame_to_unknown_cut_fails() {
        let mut board = two_frame_board();
        assert_matches!(board.add_frame("7"), Err(CoreError::NotFound { entity: "Cut", .. }));
    }

    #[test]
    fn move_frame_across_cuts() {
        let mut board = Storyboard::demo();
        board.move_frame("1", "1-2", "2", 0).unwrap();
        assert_eq!(board.cut("1").unwrap().frames.len(), 3);
        assert_eq!(board.cut("2").unwrap().frames[0].id, "1-2");
    }

    #[test]
    fn move_frame_within_cut_clamps_index() {
        let mut board = Storyboard::demo();
        board.move_frame("1", "1-1", "1", 99).unwrap();
        let ids: Vec<_> = board.cut("1").unwrap().frames.iter().map(|f| f.id.as_str()).collect();
        assert_eq!(ids, ["1-2", "1-3", "1-4", "1-1"]);
    }

    #[test]
    fn move_frame_to_unknown_cut_keeps_frame() {
        let mut board = Storyboard::demo();
        let before = board.clone();
        assert!(board.move_frame("1", "1-1", "zz", 0).is_err());
        assert_eq!(board, before);
    }

    // -- tags ----------------------------------------------------------------

    #[test]
    fn frame_tag_edits() {
        let mut board = two_frame_board();
        board
            .set_frame_tags("1", "1-1", &["a".into(), "b".into(), "a".into()])
            .unwrap();
        assert!(!board.add_frame_tag("1", "1-1", "a").unwrap());
        assert!(board.add_frame_tag("1", "1-1", "c").unwrap());
        assert!(board.remove_frame_tag("1", "1-1", "b").unwrap());
        assert_eq!(board.frame("1", "1-1").unwrap().tags, vec!["a", "c"]);

        assert!(board.move_frame_tag("1", "1-1", 1, 0).unwrap());
        assert_eq!(board.frame("1", "1-1").unwrap().tags, vec!["c", "a"]);
    }

    // -- batch ---------------------------------------------------------------

    #[test]
    fn batch_operations_touch_only_selection() {
        let mut board = Storyboard::demo();
        board.toggle_frame_selection("1", "1-1", true).unwrap();
        board.toggle_frame_selection("2", "2-1", true).unwrap();

        assert_eq!(board.batch_add_tag("night"), 2);
        assert_eq!(board.batch_add_tag("night"), 0);
        assert!(!board.frame("1", "1-2").unwrap().tags.contains(&"night".to_string()));

        assert_eq!(board.batch_replace_tag("sitting", "standing"), 1);
        assert_eq!(
            board.frame("2", "2-1").unwrap().tags,
            vec!["classroom", "standing", "studying", "night"]
        );

        let retried = board.batch_retry();
        assert_eq!(retried.len(), 2);
        assert!(board.frame("1", "1-1").unwrap().is_generating);

        let removed = board.batch_delete();
        assert_eq!(removed, vec![FrameRef::new("1", "1-1"), FrameRef::new("2", "2-1")]);
        assert_eq!(board.progress().total, 6);
        assert_eq!(board.count_selected(), 0);
    }

    // -- generation ----------------------------------------------------------

    #[test]
    fn resolve_generation_updates_only_addressed_frame() {
        let mut board = Storyboard::demo();
        board.mark_generating("1", "1-1").unwrap();
        board.mark_generating("1", "1-3").unwrap();

        board.resolve_generation("1", "1-3", "/img/3.png").unwrap();

        let done = board.frame("1", "1-3").unwrap();
        assert!(done.is_generated);
        assert!(!done.is_generating);
        assert_eq!(done.image_url.as_deref(), Some("/img/3.png"));

        let pending = board.frame("1", "1-1").unwrap();
        assert!(pending.is_generating);
        assert!(!pending.is_generated);
    }

    #[test]
    fn mark_generating_refuses_a_second_request() {
        let mut board = Storyboard::demo();
        assert!(board.mark_generating("1", "1-1").unwrap());
        assert!(!board.mark_generating("1", "1-1").unwrap());

        board.fail_generation("1", "1-1").unwrap();
        assert!(board.mark_generating("1", "1-1").unwrap());
    }

    #[test]
    fn retry_and_generate_all_skip_frames_in_flight() {
        let mut board = Storyboard::demo();
        board.toggle_frame_selection("1", "1-1", true).unwrap();
        board.toggle_frame_selection("1", "1-3", true).unwrap();
        board.mark_generating("1", "1-1").unwrap();

        assert_eq!(board.batch_retry(), vec![FrameRef::new("1", "1-3")]);
        assert!(board.batch_retry().is_empty());

        let queued = board.mark_all_ungenerated();
        assert_eq!(queued.len(), 4);
        assert!(!queued.contains(&FrameRef::new("1", "1-1")));
    }

    #[test]
    fn locate_frame_follows_drag_across_cuts() {
        let mut board = Storyboard::demo();
        assert_eq!(board.locate_frame("1-1").unwrap(), FrameRef::new("1", "1-1"));

        board.move_frame("1", "1-1", "2", 0).unwrap();
        assert_eq!(board.locate_frame("1-1").unwrap(), FrameRef::new("2", "1-1"));
        assert_matches!(board.locate_frame("nope"), Err(CoreError::NotFound { .. }));
    }

    #[test]
    fn mark_all_ungenerated_skips_generated_frames() {
        let mut board = Storyboard::demo();
        let queued = board.mark_all_ungenerated();
        assert_eq!(queued.len(), 6);
        assert!(!queued.contains(&FrameRef::new("1", "1-2")));
    }

    #[test]
    fn queue_key_frames_takes_first_frame_per_cut() {
        let mut board = Storyboard::demo();
        board.push_cut(Cut::new("3", "Empty", ""));
        let queued = board.queue_key_frames();
        assert_eq!(queued, vec![FrameRef::new("1", "1-1"), FrameRef::new("2", "2-1")]);
        assert!(board.frame("2", "2-1").unwrap().is_generating);
        assert!(!board.frame("2", "2-2").unwrap().is_generating);
    }

    #[test]
    fn reset_and_fail_generation() {
        let mut board = Storyboard::demo();
        board.reset_generation("1", "1-2").unwrap();
        assert!(board.frame("1", "1-2").unwrap().image_url.is_none());

        board.mark_generating("1", "1-2").unwrap();
        board.fail_generation("1", "1-2").unwrap();
        assert!(!board.frame("1", "1-2").unwrap().is_generating);
    }

    #[test]
    fn frame_prompt_joins_scene_and_tags() {
        let board = Storyboard::demo();
        assert_eq!(
            board.frame_prompt("1", "1-1").unwrap(),
            "Character introduction in school courtyard, school uniform, smiling, long hair"
        );
    }
}
