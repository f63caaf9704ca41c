mod scores;
mod widgets;
pub(crate) use self::scores::ScoresScreen;
use self::widgets::{Instructions, Logo};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::difficulty::Difficulty;
use crate::game::Game;
use crate::notice::{Notice, NoticeOutcome};
use crate::util::{get_display_area, EnumExt, Globals};
use crossterm::event::{read, Event};
use enum_map::Enum;
use ratatui::{
    buffer::Buffer,
    layout::{Flex, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Widget,
    Frame,
};
use std::collections::VecDeque;

#[derive(Clone, Debug)]
pub(crate) struct MainMenu {
    selection: MenuItem,

    /// Startup problems still waiting to be shown.  The front notice is
    /// displayed over the menu and swallows all input until dismissed.
    notices: VecDeque<Notice>,

    globals: Globals,
}

impl MainMenu {
    pub(crate) fn new(globals: Globals) -> MainMenu {
        MainMenu::with_notices(globals, VecDeque::new())
    }

    pub(crate) fn with_notices(globals: Globals, notices: VecDeque<Notice>) -> MainMenu {
        MainMenu {
            selection: MenuItem::default(),
            notices,
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
        if let Some(notice) = self.notices.front_mut() {
            match notice.handle_event(event) {
                Some(NoticeOutcome::Dismissed) => {
                    self.notices.pop_front();
                }
                Some(NoticeOutcome::Quit) => return Some(Screen::Quit),
                None => (),
            }
            return None;
        }
        match (
            self.selection,
            Command::from_key_event(event.as_key_press_event()?)?,
        ) {
            (_, Command::Quit) => return Some(Screen::Quit),
            (MenuItem::NewGame, Command::Enter) | (_, Command::N) => {
                return Some(Screen::Game(Game::new(self.globals.clone())))
            }
            (MenuItem::Difficulty, Command::Left) => {
                if let Some(difficulty) = self.globals.difficulty.prev() {
                    self.globals.difficulty = difficulty;
                }
            }
            (MenuItem::Difficulty, Command::Right) => {
                if let Some(difficulty) = self.globals.difficulty.next() {
                    self.globals.difficulty = difficulty;
                }
            }
            (MenuItem::Scores, Command::Enter) => {
                return Some(Screen::Scores(ScoresScreen::new(self.globals.clone())))
            }
            (MenuItem::Quit, Command::Enter) | (_, Command::Q) => return Some(Screen::Quit),
            (_, Command::Up) => {
                if let Some(item) = self.selection.prev() {
                    self.selection = item;
                }
            }
            (_, Command::Down) => {
                if let Some(item) = self.selection.next() {
                    self.selection = item;
                }
            }
            _ => (),
        }
        None
    }

    fn item_style(&self, item: MenuItem) -> Style {
        if self.selection == item {
            consts::MENU_SELECTION_STYLE
        } else {
            Style::new()
        }
    }
}

/// The selectable items of the main menu, in display order
#[derive(Clone, Copy, Debug, Default, Enum, Eq, PartialEq)]
enum MenuItem {
    #[default]
    NewGame,
    Difficulty,
    Scores,
    Quit,
}

impl Widget for &MainMenu {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [logo_area, instructions_area, new_game_area, difficulty_area, scores_area, quit_area] =
            Layout::vertical([Logo::HEIGHT, Instructions::HEIGHT, 1, 2, 1, 1])
                .flex(Flex::Start)
                .spacing(1)
                .areas(display);

        let [logo_area] = Layout::horizontal([Logo::WIDTH])
            .flex(Flex::Center)
            .areas(logo_area);
        Logo.render(logo_area, buf);

        let [instructions_area] = Layout::horizontal([Instructions::WIDTH])
            .flex(Flex::Center)
            .areas(instructions_area);
        Instructions.render(instructions_area, buf);

        let ngstyle = self.item_style(MenuItem::NewGame);
        Line::from_iter([
            Span::styled("[New Game (", ngstyle),
            Span::styled("n", consts::KEY_STYLE.patch(ngstyle)),
            Span::styled(")]", ngstyle),
        ])
        .centered()
        .render(new_game_area, buf);

        let [selector_area, summary_area] = Layout::vertical([1, 1]).areas(difficulty_area);
        let difficulty = self.globals.difficulty;
        Line::from(Span::styled(
            format!(
                "Difficulty  {left} {difficulty:^width$} {right}",
                left = if difficulty.prev().is_some() { '◀' } else { '◁' },
                right = if difficulty.next().is_some() { '▶' } else { '▷' },
                width = usize::from(Difficulty::DISPLAY_WIDTH),
            ),
            self.item_style(MenuItem::Difficulty),
        ))
        .centered()
        .render(selector_area, buf);
        Line::from(Span::styled(difficulty.summary(), consts::HINT_STYLE))
            .centered()
            .render(summary_area, buf);

        Line::from(Span::styled(
            "[High Scores]",
            self.item_style(MenuItem::Scores),
        ))
        .centered()
        .render(scores_area, buf);

        let qstyle = self.item_style(MenuItem::Quit);
        Line::from_iter([
            Span::styled("[Quit (", qstyle),
            Span::styled("q", consts::KEY_STYLE.patch(qstyle)),
            Span::styled(")]", qstyle),
        ])
        .centered()
        .render(quit_area, buf);

        if let Some(notice) = self.notices.front() {
            notice.render(display, buf);
        }
    }
}
