use crate::consts;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::Widget,
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Logo;

impl Logo {
    const BOOM_WIDTH: u16 = 29;
    const SNAKE_WIDTH: u16 = 28;
    const SNAKE_BODY_LENGTH: u16 = 12;
    const DIAGRAM_GUTTER: u16 = 2;
    const TEXT_HEIGHT: u16 = 5;
    pub(super) const HEIGHT: u16 = Self::TEXT_HEIGHT + 2;
    pub(super) const WIDTH: u16 = Self::BOOM_WIDTH + Self::SNAKE_WIDTH;

    #[rustfmt::skip]
    const BOOM: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____                        ",
         "| __ )  ___   ___  _ __ ___  ",
        r"|  _ \ / _ \ / _ \| '_ ` _ \ ",
         "| |_) | (_) | (_) | | | | | |",
        r"|____/ \___/ \___/|_| |_| |_|",
    ];

    #[rustfmt::skip]
    const SNAKE: [&'static str; Self::TEXT_HEIGHT as usize] = [
         " ____              _        ",
         "/ ___| _ __   __ _| | _____ ",
        r"\___ \| '_ \ / _` | |/ / _ \",
         " ___) | | | | (_| |   <  __/",
        r"|____/|_| |_|\__,_|_|\_\___|",
    ];
}

impl Widget for Logo {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let [area] = Layout::horizontal([Self::WIDTH])
            .flex(Flex::Start)
            .areas(area);
        let [words_area, diagram_area] = Layout::vertical([Self::TEXT_HEIGHT, 1])
            .flex(Flex::Start)
            .spacing(1)
            .areas(area);
        let [boom_area, snake_area] = Layout::horizontal([Self::BOOM_WIDTH, Self::SNAKE_WIDTH])
            .flex(Flex::Start)
            .areas(words_area);
        Text::from_iter(Self::BOOM)
            .style(consts::BOMB_WARNING_STYLE)
            .render(boom_area, buf);
        Text::from_iter(Self::SNAKE)
            .style(consts::SNAKE_STYLE)
            .render(snake_area, buf);
        let [body_area, head_area, _, food_area, _, bomb_area] = Layout::horizontal([
            Constraint::Length(Self::SNAKE_BODY_LENGTH),
            Constraint::Length(1),
            Constraint::Length(Self::DIAGRAM_GUTTER),
            Constraint::Length(1),
            Constraint::Length(Self::DIAGRAM_GUTTER),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(diagram_area);
        for p in body_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_BODY_SYMBOL);
                cell.set_style(consts::SNAKE_STYLE);
            }
        }
        for p in head_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::SNAKE_HEAD_EAST_SYMBOL);
                cell.set_style(consts::SNAKE_STYLE);
            }
        }
        for p in food_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::FOOD_SYMBOL);
                cell.set_style(consts::FOOD_STYLE);
            }
        }
        for p in bomb_area.positions() {
            if let Some(cell) = buf.cell_mut(p) {
                cell.set_char(consts::BOMB_SYMBOL);
                cell.set_style(consts::BOMB_STYLE);
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Instructions;

impl Instructions {
    pub(super) const HEIGHT: u16 = 6;
    pub(super) const WIDTH: u16 = 20;
}

impl Widget for Instructions {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let text = Text::from_iter([
            Line::from("Move the snake with:"),
            Line::from_iter([
                Span::raw("       "),
                Span::styled("←", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↓", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("↑", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("→", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::raw("   or: "),
                Span::styled("h", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("j", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("k", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("l", consts::KEY_STYLE),
            ]),
            Line::from_iter([
                Span::raw("   or: "),
                Span::styled("a", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("s", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("w", consts::KEY_STYLE),
                Span::raw(" "),
                Span::styled("d", consts::KEY_STYLE),
            ]),
            Line::from("Eat the food, but"),
            Line::from("don't hit the bombs!"),
        ]);
        debug_assert_eq!(
            text.height(),
            usize::from(Self::HEIGHT),
            "Instructions::HEIGHT is wrong"
        );
        debug_assert_eq!(
            text.width(),
            usize::from(Self::WIDTH),
            "Instructions::WIDTH is wrong"
        );
        text.render(area, buf);
    }
}
