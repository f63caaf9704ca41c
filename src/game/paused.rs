use crate::command::Command;
use crate::consts;
use crate::util::EnumExt;
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

/// Pop-up menu shown while a session is paused
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(super) struct Paused {
    selection: PauseOpt,
}

impl Paused {
    /// Size of the `Rect` to pass to `Paused::render()`
    pub(super) const WIDTH: u16 = 24;
    pub(super) const HEIGHT: u16 = 8;

    /// Handle an input event.  Returns `Some` if the user made a choice.
    pub(super) fn handle_event(&mut self, event: Event) -> Option<PauseOpt> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Esc | Command::Space | Command::P => return Some(PauseOpt::Resume),
            Command::R | Command::N => return Some(PauseOpt::Restart),
            Command::M => return Some(PauseOpt::MainMenu),
            Command::Q | Command::Quit => return Some(PauseOpt::Quit),
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
}

/// The choices in the pause menu, in display order
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
pub(super) enum PauseOpt {
    #[default]
    Resume,
    Restart,
    MainMenu,
    Quit,
}

impl PauseOpt {
    fn label(self) -> (&'static str, &'static str) {
        match self {
            PauseOpt::Resume => ("Resume", "esc"),
            PauseOpt::Restart => ("Restart", "r"),
            PauseOpt::MainMenu => ("Main Menu", "m"),
            PauseOpt::Quit => ("Quit", "q"),
        }
    }
}

impl Widget for Paused {
    /*
     * ┌─────── PAUSED ───────┐
     * │ The clock is stopped │
     * │                      │
     * │ » Resume (esc)       │
     * │   Restart (r)        │
     * │   Main Menu (m)      │
     * │   Quit (q)           │
     * └──────────────────────┘
     */

    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let block = Block::bordered()
            .title(" PAUSED ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1))
            .style(Style::reset());
        let inner = block.inner(area);
        block.render(area, buf);
        let mut lines = vec![
            Line::from(Span::styled("The clock is stopped", consts::HINT_STYLE)).centered(),
            Line::default(),
        ];
        for opt in PauseOpt::iter() {
            let selected = self.selection == opt;
            let (name, key) = opt.label();
            let mut line = Line::from_iter([
                Span::raw(if selected { "» " } else { "  " }),
                Span::raw(name),
                Span::raw(" ("),
                Span::styled(key, consts::KEY_STYLE),
                Span::raw(")"),
            ]);
            if selected {
                line = line.style(consts::MENU_SELECTION_STYLE);
            }
            lines.push(line);
        }
        for (line, row) in lines.iter().zip(inner.rows()) {
            line.render(row, buf);
        }
    }
}
