use super::Crash;
use crate::command::Command;
use crate::consts;
use crate::util::{format_mmss, EnumExt};
use crossterm::event::Event;
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{
        block::{Block, Padding},
        Clear, Widget,
    },
};

/// A widget for displaying the end-of-game pop-up
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct GameOver {
    /// The currently-selected item in the game-over menu
    selection: OverOpt,

    /// What the snake ran into
    pub(super) cause: Crash,

    /// Final score
    pub(super) score: u32,

    /// Whole seconds the snake was moving for
    pub(super) seconds: u64,

    /// Whether `score` beat the previous all-time best
    pub(super) new_best: bool,

    /// Whether recording the score to disk failed
    pub(super) save_failed: bool,
}

impl GameOver {
    /// The width that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) const WIDTH: u16 = 30;

    pub(super) fn new(
        cause: Crash,
        score: u32,
        seconds: u64,
        new_best: bool,
        save_failed: bool,
    ) -> GameOver {
        GameOver {
            selection: OverOpt::default(),
            cause,
            score,
            seconds,
            new_best,
            save_failed,
        }
    }

    /// The height that should be used for the `Rect` passed to
    /// `GameOver::render()`
    pub(super) fn height(&self) -> u16 {
        if self.save_failed {
            11
        } else {
            10
        }
    }

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<OverOpt> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::R | Command::N => return Some(OverOpt::Again),
            Command::M | Command::Esc => return Some(OverOpt::Menu),
            Command::Q | Command::Quit => return Some(OverOpt::Quit),
            Command::Enter => return Some(self.selection),
            Command::Up => {
                if let Some(opt) = self.selection.prev() {
                    self.selection = opt;
                }
            }
            Command::Down => {
                if let Some(opt) = self.selection.next() {
                    self.selection = opt;
                }
            }
            _ => (),
        }
        None
    }

    fn cause_text(&self) -> &'static str {
        match self.cause {
            Crash::Wall => "You ran into the wall!",
            Crash::Body => "You bit yourself!",
            Crash::Bomb => "A bomb went off!",
        }
    }
}

/// The choices in the game-over menu
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(super) enum OverOpt {
    /// Start another game at the same difficulty
    #[default]
    Again,

    /// Return to the main menu
    Menu,

    /// Quit the application
    Quit,
}

impl OverOpt {
    fn to_line(self, selected: bool) -> Line<'static> {
        let mut line = Line::default();
        if selected {
            line.push_span("» ");
        } else {
            line.push_span("  ");
        }
        match self {
            OverOpt::Again => {
                line.push_span("Play Again (");
                line.push_span(Span::styled("r", consts::KEY_STYLE));
                line.push_span(")");
            }
            OverOpt::Menu => {
                line.push_span("Main Menu (");
                line.push_span(Span::styled("m", consts::KEY_STYLE));
                line.push_span(")");
            }
            OverOpt::Quit => {
                line.push_span("Quit (");
                line.push_span(Span::styled("q", consts::KEY_STYLE));
                line.push_span(")");
            }
        }
        if selected {
            line = line.style(consts::MENU_SELECTION_STYLE);
        }
        line
    }
}

impl Widget for GameOver {
    /*
     * ┌──────── GAME OVER ─────────┐
     * │ A bomb went off!           │
     * │                            │
     * │ Score: 120  ★ new best!    │
     * │ Time: 01:23                │
     * │                            │
     * │ » Play Again (r)           │
     * │   Main Menu (m)            │
     * │   Quit (q)                 │
     * └────────────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" GAME OVER ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let mut score_line = Line::from(format!("Score: {}", self.score));
        if self.new_best {
            score_line.push_span("  ");
            score_line.push_span(Span::styled("★ new best!", consts::KEY_STYLE));
        }
        let mut lines = vec![
            Line::from(self.cause_text()),
            Line::default(),
            score_line,
            Line::from(format!("Time: {}", format_mmss(self.seconds))),
        ];
        if self.save_failed {
            lines.push(Line::styled("(scores not saved)", consts::HINT_STYLE));
        }
        lines.push(Line::default());
        for opt in OverOpt::iter() {
            lines.push(opt.to_line(self.selection == opt));
        }
        for (line, row) in lines.iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn render_wall_crash() {
        let over = GameOver::new(Crash::Wall, 120, 83, false, false);
        let area = Rect::new(0, 0, GameOver::WIDTH, over.height());
        let mut buffer = Buffer::empty(area);
        over.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌──────── GAME OVER ─────────┐",
            "│ You ran into the wall!     │",
            "│                            │",
            "│ Score: 120                 │",
            "│ Time: 01:23                │",
            "│                            │",
            "│ » Play Again (r)           │",
            "│   Main Menu (m)            │",
            "│   Quit (q)                 │",
            "└────────────────────────────┘",
        ]);
        expected.set_style(Rect::new(2, 6, 26, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(16, 6, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(15, 7, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(10, 8, 1, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn render_new_best_with_save_failure() {
        let over = GameOver::new(Crash::Bomb, 345, 61, true, true);
        let area = Rect::new(0, 0, GameOver::WIDTH, over.height());
        let mut buffer = Buffer::empty(area);
        over.render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            "┌──────── GAME OVER ─────────┐",
            "│ A bomb went off!           │",
            "│                            │",
            "│ Score: 345  ★ new best!    │",
            "│ Time: 01:01                │",
            "│ (scores not saved)         │",
            "│                            │",
            "│ » Play Again (r)           │",
            "│   Main Menu (m)            │",
            "│   Quit (q)                 │",
            "└────────────────────────────┘",
        ]);
        expected.set_style(Rect::new(14, 3, 11, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(2, 5, 26, 1), consts::HINT_STYLE);
        expected.set_style(Rect::new(2, 7, 26, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(16, 7, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(15, 8, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(10, 9, 1, 1), consts::KEY_STYLE);
        assert_eq!(buffer, expected);
    }

    #[test]
    fn menu_choice_keys() {
        use crossterm::event::KeyCode;
        let mut over = GameOver::new(Crash::Body, 0, 0, false, false);
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Char('r').into())),
            Some(OverOpt::Again)
        );
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Char('m').into())),
            Some(OverOpt::Menu)
        );
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Char('q').into())),
            Some(OverOpt::Quit)
        );
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Enter.into())),
            Some(OverOpt::Again)
        );
    }

    #[test]
    fn menu_navigation() {
        use crossterm::event::KeyCode;
        let mut over = GameOver::new(Crash::Body, 0, 0, false, false);
        let down = Event::Key(KeyCode::Down.into());
        assert_eq!(over.handle_event(down.clone()), None);
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Enter.into())),
            Some(OverOpt::Menu)
        );
        assert_eq!(over.handle_event(down.clone()), None);
        assert_eq!(over.handle_event(down), None);
        assert_eq!(
            over.handle_event(Event::Key(KeyCode::Enter.into())),
            Some(OverOpt::Quit)
        );
    }
}
