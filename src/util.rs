use crate::consts;
use crate::difficulty::Difficulty;
use crate::leaderboard::Leaderboards;
use crate::storage::ScoreStore;
use enum_map::Enum;
use ratatui::layout::{Flex, Layout, Rect, Size};
use std::rc::Rc;

/// State shared by all screens of the application and carried from screen to
/// screen
#[derive(Clone, Debug)]
pub(crate) struct Globals {
    /// The difficulty that new games are started at
    pub(crate) difficulty: Difficulty,

    /// Recorded scores, kept in sync with `store`
    pub(crate) scores: Leaderboards,

    /// Where scores are persisted between runs
    pub(crate) store: Rc<dyn ScoreStore>,
}

#[cfg(test)]
impl Default for Globals {
    fn default() -> Globals {
        Globals {
            difficulty: Difficulty::default(),
            scores: Leaderboards::default(),
            store: Rc::new(crate::storage::MemoryStore::default()),
        }
    }
}

/// Navigation over the variants of an [`Enum`] type in declaration order
pub(crate) trait EnumExt: Enum {
    /// Returns the variant after `self`, if any
    fn next(self) -> Option<Self> {
        let i = self.into_usize().checked_add(1)?;
        (i < Self::LENGTH).then(|| Self::from_usize(i))
    }

    /// Returns the variant before `self`, if any
    fn prev(self) -> Option<Self> {
        Some(Self::from_usize(self.into_usize().checked_sub(1)?))
    }

    /// Returns an iterator over all variants
    fn iter() -> impl Iterator<Item = Self> {
        (0..Self::LENGTH).map(Self::from_usize)
    }
}

impl<T: Enum> EnumExt for T {}

pub(crate) fn get_display_area(buffer_area: Rect) -> Rect {
    let [display] = Layout::horizontal([consts::DISPLAY_SIZE.width])
        .flex(Flex::Center)
        .areas(buffer_area);
    let [display] = Layout::vertical([consts::DISPLAY_SIZE.height])
        .flex(Flex::Center)
        .areas(display);
    display
}

/// Returns a rectangle of (at most) the given size centered in `area`
pub(crate) fn center_rect(area: Rect, size: Size) -> Rect {
    let [centered] = Layout::horizontal([size.width])
        .flex(Flex::Center)
        .areas(area);
    let [centered] = Layout::vertical([size.height])
        .flex(Flex::Center)
        .areas(centered);
    centered
}

/// Format a whole-second duration as zero-padded minutes & seconds
pub(crate) fn format_mmss(seconds: u64) -> String {
    let minutes = seconds / 60;
    let secs = seconds % 60;
    format!("{minutes:02}:{secs:02}")
}
