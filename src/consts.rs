//! Assorted constants & hard-coded configuration
use ratatui::{
    layout::{Position, Rect, Size},
    style::{Color, Modifier, Style},
};
use std::time::Duration;

/// Width & height of the playing field, in cells
pub(crate) const GRID_CELLS: u16 = 20;

/// The playing field as a rectangle in cell coordinates
pub(crate) const BOARD: Rect = Rect {
    x: 0,
    y: 0,
    width: GRID_CELLS,
    height: GRID_CELLS,
};

/// The snake's cells at the start of a game, head first, facing east
pub(crate) const INITIAL_SNAKE: [Position; 3] = [
    Position { x: 10, y: 10 },
    Position { x: 9, y: 10 },
    Position { x: 8, y: 10 },
];

/// No amount of eating makes the snake move faster than this
pub(crate) const TICK_FLOOR: Duration = Duration::from_millis(50);

/// Period of the warning blink of a bomb about to go off, measured on the
/// session clock
pub(crate) const BLINK_PERIOD: Duration = Duration::from_millis(200);

/// A new bomb must be at least this many cells from the snake's head along
/// both axes.
pub(crate) const BOMB_HEAD_CLEARANCE: u16 = 3;

/// Minimum stick deflection treated as a direction on a game controller
pub(crate) const GAMEPAD_AXIS_THRESHOLD: f32 = 0.5;

/// Draw everything inside a rectangle of this size in the center of the
/// terminal window.
///
/// Cf. [`crate::util::get_display_area()`]
pub(crate) const DISPLAY_SIZE: Size = Size {
    width: 80,
    height: 24,
};

/// Glyph for the snake's head when it is moving north/up
pub(crate) const SNAKE_HEAD_NORTH_SYMBOL: char = '^';

/// Glyph for the snake's head when it is moving south/down
pub(crate) const SNAKE_HEAD_SOUTH_SYMBOL: char = 'v';

/// Glyph for the snake's head when it is moving east/right
pub(crate) const SNAKE_HEAD_EAST_SYMBOL: char = '>';

/// Glyph for the snake's head when it is moving west/left
pub(crate) const SNAKE_HEAD_WEST_SYMBOL: char = '<';

/// Glyph for the parts of the snake's body
pub(crate) const SNAKE_BODY_SYMBOL: char = '⚬';

/// Glyph for the food
pub(crate) const FOOD_SYMBOL: char = '●';

/// Glyph for bombs
pub(crate) const BOMB_SYMBOL: char = '◉';

/// Glyph for the snake's head when it's collided with something
pub(crate) const COLLISION_SYMBOL: char = '×';

/// Style for the snake's head and body
pub(crate) const SNAKE_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);

/// Style for the food
pub(crate) const FOOD_STYLE: Style = Style::new().fg(Color::LightRed);

/// Style for bombs with plenty of fuse left
pub(crate) const BOMB_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for bombs in their warning phase
pub(crate) const BOMB_WARNING_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::BOLD);

/// Style for [`COLLISION_SYMBOL`]
pub(crate) const COLLISION_STYLE: Style = Style::new()
    .fg(Color::LightRed)
    .add_modifier(Modifier::REVERSED);

/// Style for key codes shown in the interface
pub(crate) const KEY_STYLE: Style = Style::new().fg(Color::Yellow);

/// Style for the score bar at the top of the game screen
pub(crate) const SCORE_BAR_STYLE: Style = Style::new().add_modifier(Modifier::REVERSED);

/// Style for screen titles
pub(crate) const TITLE_STYLE: Style = Style::new().add_modifier(Modifier::BOLD);

/// Style for the currently-selected menu item
pub(crate) const MENU_SELECTION_STYLE: Style = Style::new().add_modifier(Modifier::UNDERLINED);

/// Style for secondary text like hints & difficulty blurbs
pub(crate) const HINT_STYLE: Style = Style::new().add_modifier(Modifier::DIM);
