//! Frame tag rules: dedup on insert, exact-match removal, drag reordering
//! and autocomplete suggestions.
//!
//! Tag identity is exact string equality after trimming the input.
//! Matching is case-sensitive: `"Smiling"` and `"smiling"` are two tags.

// ---------------------------------------------------------------------------
// Vocabulary
// ---------------------------------------------------------------------------

/// Suggestions offered by the per-frame tag input.
pub const FRAME_TAG_SUGGESTIONS: &[&str] = &[
    "school uniform",
    "cat ears",
    "smiling",
    "waving",
    "classroom",
    "outdoor",
    "sunset",
    "glasses",
    "long hair",
    "short hair",
    "blue eyes",
    "green eyes",
    "magical",
    "fantasy",
    "modern",
    "traditional",
    "sitting",
    "standing",
];

/// The browsable tag cloud shown next to the prompt.
pub const TAG_CLOUD: &[&str] = &[
    "cat ears",
    "school uniform",
    "glasses",
    "long hair",
    "short hair",
    "smiling",
    "serious",
    "angry",
    "surprised",
    "shy",
    "kimono",
    "casual clothes",
    "formal wear",
    "hoodie",
    "dress",
    "red eyes",
    "blue eyes",
    "green eyes",
    "purple eyes",
    "blonde hair",
    "black hair",
    "brown hair",
    "silver hair",
    "pink hair",
    "outdoor",
    "classroom",
    "bedroom",
    "cafe",
    "library",
    "sitting",
    "standing",
    "running",
    "waving",
    "pointing",
];

/// Shot framing tags offered on storyboard frames.
pub const SHOT_TAGS: &[&str] = &["wide shot", "close-up", "portrait", "full body", "indoor"];

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// Append `new_tag` (trimmed) unless it is blank or already present.
///
/// Returns `true` when the list changed.
pub fn add_tag(tags: &mut Vec<String>, new_tag: &str) -> bool {
    let trimmed = new_tag.trim();
    if trimmed.is_empty() || tags.iter().any(|t| t == trimmed) {
        return false;
    }
    tags.push(trimmed.to_string());
    true
}

/// Remove every exact match of `tag`. Returns `true` when the list changed.
pub fn remove_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let before = tags.len();
    tags.retain(|t| t != tag);
    tags.len() != before
}

/// Remove the last tag (backspace on an empty input). Returns the removed tag.
pub fn remove_last_tag(tags: &mut Vec<String>) -> Option<String> {
    tags.pop()
}

/// Add `tag` if absent, remove it if present. Returns `true` if it is now applied.
pub fn toggle_tag(tags: &mut Vec<String>, tag: &str) -> bool {
    let trimmed = tag.trim();
    if tags.iter().any(|t| t == trimmed) {
        remove_tag(tags, trimmed);
        false
    } else {
        add_tag(tags, trimmed)
    }
}

/// Replace every occurrence of `from` with `to`, keeping the position of the
/// first occurrence and dropping any resulting duplicate.
///
/// Returns `true` when the list changed.
pub fn replace_tag(tags: &mut Vec<String>, from: &str, to: &str) -> bool {
    let to = to.trim();
    let Some(pos) = tags.iter().position(|t| t == from) else {
        return false;
    };
    if to.is_empty() {
        return remove_tag(tags, from);
    }
    if from == to {
        return false;
    }

    let already_present = tags.iter().any(|t| t == to);
    tags.retain(|t| t != from);
    if !already_present {
        let pos = pos.min(tags.len());
        tags.insert(pos, to.to_string());
    }
    true
}

/// Move the tag at `from` to index `to` (clamped to the list end).
///
/// Returns `false` if `from` is out of range.
pub fn move_tag(tags: &mut Vec<String>, from: usize, to: usize) -> bool {
    if from >= tags.len() {
        return false;
    }
    let tag = tags.remove(from);
    let to = to.min(tags.len());
    tags.insert(to, tag);
    true
}

/// Build a deduplicated tag list from arbitrary input, applying [`add_tag`]
/// rules to each entry in order.
pub fn normalize_tags<I, S>(input: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags = Vec::new();
    for tag in input {
        add_tag(&mut tags, tag.as_ref());
    }
    tags
}

// ---------------------------------------------------------------------------
// Suggestions
// ---------------------------------------------------------------------------

/// Autocomplete: vocabulary entries containing `query` (case-insensitive)
/// that are not already applied.
///
/// An empty query returns nothing, matching the input's closed dropdown.
pub fn filter_suggestions(query: &str, existing: &[String], vocabulary: &[&str]) -> Vec<String> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }
    vocabulary
        .iter()
        .filter(|s| s.to_lowercase().contains(&query))
        .filter(|s| !existing.iter().any(|t| t == *s))
        .map(|s| s.to_string())
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
