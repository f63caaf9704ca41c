use crate::command::Command;
use crate::util::center_rect;
use crossterm::event::Event;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Flex, Layout, Rect, Size},
    text::{Line, Text},
    widgets::{
        block::{Block, Padding},
        Clear, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget, Widget,
    },
};
use std::borrow::Cow;

/// A pop-up for reporting a non-fatal startup problem, such as an unreadable
/// configuration file.  The full error chain is shown, with scrolling if it
/// is too long to fit.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Notice {
    lines: Vec<String>,
    scroll_offset: usize,
    max_scroll: usize,
}

impl Notice {
    const MAX_LINES: u16 = 16;
    const TEXT_WIDTH: u16 = 48;
    const WIDTH: u16 = Self::TEXT_WIDTH + 4;

    pub(crate) fn handle_event(&mut self, event: Event) -> Option<NoticeOutcome> {
        let cmd = Command::from_key_event(event.as_key_press_event()?)?;
        match (cmd, self.scrolling()) {
            (Command::Enter | Command::Esc | Command::Space, _) => {
                return Some(NoticeOutcome::Dismissed)
            }
            (Command::Quit | Command::Q, _) => return Some(NoticeOutcome::Quit),
            (Command::Up, true) => {
                if self.scroll_offset > 0 {
                    self.scroll_offset -= 1;
                }
            }
            (Command::Down, true) => {
                if self.scroll_offset < self.max_scroll.saturating_sub(1) {
                    self.scroll_offset += 1;
                }
            }
            _ => (),
        }
        None
    }

    fn scrolling(&self) -> bool {
        self.lines.len() > usize::from(Self::MAX_LINES)
    }

    fn from_error_messages(msgs: Vec<String>) -> Self {
        if msgs.is_empty() {
            return Notice {
                lines: vec![String::from("Something went wrong, but the error was lost.")],
                scroll_offset: 0,
                max_scroll: 0,
            };
        }
        let mut lines = Vec::new();
        let opts = textwrap::Options::new(usize::from(Notice::TEXT_WIDTH)).break_words(true);
        lines.extend(
            textwrap::wrap(msgs[0].as_str(), opts)
                .into_iter()
                .map(Cow::into_owned),
        );
        if msgs.len() > 1 {
            lines.push(String::new());
            lines.push(String::from("Caused by:"));
            if msgs.len() > 2 {
                for (i, m) in msgs.into_iter().skip(1).enumerate() {
                    let init_indent = format!("{i:>5}: ");
                    let opts = textwrap::Options::new(usize::from(Notice::TEXT_WIDTH))
                        .break_words(true)
                        .initial_indent(&init_indent)
                        .subsequent_indent("       ");
                    lines.extend(textwrap::wrap(&m, opts).into_iter().map(Cow::into_owned));
                }
            } else {
                let opts = textwrap::Options::new(usize::from(Notice::TEXT_WIDTH))
                    .break_words(true)
                    .initial_indent("    ")
                    .subsequent_indent("    ");
                lines.extend(
                    textwrap::wrap(msgs[1].as_str(), opts)
                        .into_iter()
                        .map(Cow::into_owned),
                );
            }
        }
        let max_scroll = lines
            .len()
            .saturating_sub(usize::from(Notice::MAX_LINES) - 1);
        Notice {
            lines,
            scroll_offset: 0,
            max_scroll,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum NoticeOutcome {
    Dismissed,
    Quit,
}

impl<E: std::error::Error> From<E> for Notice {
    fn from(e: E) -> Notice {
        let mut msgs = vec![e.to_string()];
        let mut source = e.source();
        while let Some(src) = source {
            msgs.push(src.to_string());
            source = src.source();
        }
        Notice::from_error_messages(msgs)
    }
}

impl Widget for &Notice {
    // The pop-up centers itself, so `area` should be the entire display
    // area, not a pre-sized region.
    fn render(self, area: Rect, buf: &mut Buffer) {
        let height = u16::try_from(self.lines.len())
            .unwrap_or(u16::MAX)
            .min(Notice::MAX_LINES)
            .saturating_add(4);
        let block_area = center_rect(
            area,
            Size {
                width: Notice::WIDTH.saturating_add(u16::from(self.scrolling()) * 2),
                height,
            },
        );
        let block = Block::bordered()
            .title(" WARNING ")
            .title_alignment(Alignment::Center)
            .padding(Padding::horizontal(1));
        let [text_area, ok_area] = Layout::vertical([Constraint::Fill(1), Constraint::Length(1)])
            .flex(Flex::Start)
            .spacing(1)
            .areas(block.inner(block_area));
        Clear.render(block_area, buf);
        block.render(block_area, buf);
        if self.scrolling() {
            let [text_area, scrollbar_area] =
                Layout::horizontal([Constraint::Fill(1), Constraint::Length(1)])
                    .flex(Flex::Start)
                    .spacing(1)
                    .areas(text_area);
            Text::from_iter(
                self.lines
                    .iter()
                    .skip(self.scroll_offset)
                    .take(usize::from(Notice::MAX_LINES))
                    .map(String::as_str),
            )
            .render(text_area, buf);
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .track_symbol(Some(ratatui::symbols::shade::MEDIUM));
            let mut scroll_state =
                ScrollbarState::new(self.max_scroll).position(self.scroll_offset);
            scrollbar.render(scrollbar_area, buf, &mut scroll_state);
        } else {
            Text::from_iter(self.lines.iter().map(String::as_str)).render(text_area, buf);
        }

        Line::from("[OK]").centered().render(ok_area, buf);
    }
}
