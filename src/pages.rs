//! Page switching for the preview window.
//!
//! Press `J` to toggle between the storyboard and the journal.
//!
//! # Pages
//!
//! - [`Page::Storyboard`]: LCD inside its bezel, LED, power button, step title and explanation
//! - [`Page::Journal`]: frame metrics and the transition journal

#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    /// Device mockup and step chrome.
    #[default]
    Storyboard,

    /// Frame metrics and the transition journal.
    Journal,
}

impl Page {
    #[inline]
    pub const fn toggle(self) -> Self {
        match self {
            Self::Storyboard => Self::Journal,
            Self::Journal => Self::Storyboard,
        }
    }

    /// The LCD is only on screen (and only ticks visibly) on the storyboard.
    #[inline]
    pub const fn shows_lcd(self) -> bool { matches!(self, Self::Storyboard) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_default() {
        assert_eq!(Page::default(), Page::Storyboard);
    }

    #[test]
    fn test_page_toggle() {
        assert_eq!(Page::Storyboard.toggle(), Page::Journal);
        assert_eq!(Page::Journal.toggle(), Page::Storyboard);
        assert!(Page::Storyboard.shows_lcd());
        assert!(!Page::Journal.shows_lcd());
    }
}
