//! Page-to-path mapping for the studio frontend.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    Home,
    Variation,
    ImageSet,
    FastStart,
    StoryFlow,
}

impl Page {
    pub const ALL: [Page; 5] = [
        Page::Home,
        Page::Variation,
        Page::ImageSet,
        Page::FastStart,
        Page::StoryFlow,
    ];

    pub fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::Variation => "/variation",
            Page::ImageSet => "/image-set",
            Page::FastStart => "/fast-start",
            Page::StoryFlow => "/story-flow",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Page::Home => "KokoroLab",
            Page::Variation => "Variation",
            Page::ImageSet => "Image Set Generation",
            Page::FastStart => "Fast Start",
            Page::StoryFlow => "Story Flow",
        }
    }

    /// Resolve a path, ignoring a trailing slash. Unknown paths give `None`.
    pub fn from_path(path: &str) -> Option<Page> {
        let path = match path.trim_end_matches('/') {
            "" => "/",
            p => p,
        };
        Page::ALL.into_iter().find(|p| p.path() == path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_page_resolves_from_its_path() {
        for page in Page::ALL {
            assert_eq!(Page::from_path(page.path()), Some(page));
        }
    }

    #[test]
    fn trailing_slash_and_unknown_paths() {
        assert_eq!(Page::from_path("/image-set/"), Some(Page::ImageSet));
        assert_eq!(Page::from_path(""), Some(Page::Home));
        assert_eq!(Page::from_path("/pricing"), None);
    }
}
