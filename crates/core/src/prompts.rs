//! Story prompts behind the dice button.

use rand::seq::IndexedRandom;

pub const STORY_PROMPTS: &[&str] = &[
    "A mysterious girl with silver hair walking through a glowing forest",
    "Two friends sharing secrets under cherry blossom trees",
    "A dramatic confrontation on a rooftop at sunset",
    "A magical creature awakening in an ancient library",
    "Friends having a picnic in a flower field",
    "A lone warrior standing against a storm",
    "Children discovering a hidden portal",
    "A romantic dance under starlight",
];

/// Pick one of [`STORY_PROMPTS`] at random.
pub fn random_story_prompt() -> &'static str {
    STORY_PROMPTS
        .choose(&mut rand::rng())
        .copied()
        .unwrap_or(STORY_PROMPTS[0])
}
