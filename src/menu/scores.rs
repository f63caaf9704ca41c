use super::MainMenu;
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::difficulty::Difficulty;
use crate::game::Game;
use crate::util::{format_mmss, get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{
        block::{Block, Padding},
        Widget,
    },
    Frame,
};

/// The state of the high-scores screen: one leaderboard at a time, with the
/// arrow keys flipping between difficulties
#[derive(Clone, Debug)]
pub(crate) struct ScoresScreen {
    /// The difficulty whose board is currently shown
    tab: Difficulty,

    globals: Globals,
}

impl ScoresScreen {
    /// Width of the rows of the score table
    const TABLE_WIDTH: u16 = 30;

    /// Outer width of the bordered score table
    const BOARD_WIDTH: u16 = Self::TABLE_WIDTH + 4;

    pub(crate) fn new(globals: Globals) -> ScoresScreen {
        ScoresScreen {
            tab: globals.difficulty,
            globals,
        }
    }

    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    pub(crate) fn process_input(&mut self) -> std::io::Result<Option<Screen>> {
        Ok(self.handle_event(read()?))
    }

    fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match Command::from_key_event(event.as_key_press_event()?)? {
            Command::Quit | Command::Q => return Some(Screen::Quit),
            Command::Esc | Command::M | Command::Enter => {
                return Some(Screen::Main(MainMenu::new(self.globals.clone())))
            }
            Command::N => return Some(Screen::Game(Game::new(self.globals.clone()))),
            Command::Left => {
                if let Some(difficulty) = self.tab.prev() {
                    self.tab = difficulty;
                }
            }
            Command::Right => {
                if let Some(difficulty) = self.tab.next() {
                    self.tab = difficulty;
                }
            }
            _ => (),
        }
        None
    }
}

impl Widget for &ScoresScreen {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [title_area, selector_area, board_area, best_area, hint_area] =
            Layout::vertical([1, 1, 13, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        Line::from(Span::styled("HIGH SCORES", consts::TITLE_STYLE))
            .centered()
            .render(title_area, buf);

        let tab = self.tab;
        Line::from(format!(
            "{left} {tab:^width$} {right}",
            left = if tab.prev().is_some() { '◀' } else { '◁' },
            right = if tab.next().is_some() { '▶' } else { '▷' },
            width = usize::from(Difficulty::DISPLAY_WIDTH),
        ))
        .centered()
        .render(selector_area, buf);

        let [board_area] = Layout::horizontal([ScoresScreen::BOARD_WIDTH])
            .flex(Flex::Center)
            .areas(board_area);
        let block = Block::bordered().padding(Padding::horizontal(1));
        let inner = block.inner(board_area);
        block.render(board_area, buf);
        let mut lines = vec![Line::from(Span::styled(
            format!("{:>4}  {:>5}  {:>5}  {:<10}", "#", "Score", "Time", "Date"),
            consts::HINT_STYLE,
        ))];
        let records = self.globals.scores.records(tab);
        if records.is_empty() {
            lines.push(
                Line::from(Span::styled("(no games recorded)", consts::HINT_STYLE)).centered(),
            );
        } else {
            for (i, record) in records.iter().enumerate() {
                let rank = format!("{}.", i + 1);
                lines.push(Line::from(format!(
                    "{rank:>4}  {score:>5}  {time}  {date}",
                    score = record.score,
                    time = format_mmss(record.seconds),
                    date = record.date,
                )));
            }
        }
        Text::from_iter(lines).render(inner, buf);

        Line::from(format!(
            "All-time best: {}",
            self.globals.scores.high_score()
        ))
        .centered()
        .render(best_area, buf);

        Line::from_iter([
            Span::raw("Back: "),
            Span::styled("esc", consts::KEY_STYLE),
            Span::raw("   New game: "),
            Span::styled("n", consts::KEY_STYLE),
        ])
        .centered()
        .render(hint_area, buf);
    }
}
