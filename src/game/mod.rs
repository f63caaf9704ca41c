mod bombs;
mod clock;
mod direction;
mod over;
mod paused;
mod snake;
use self::bombs::{BombField, BombState};
use self::clock::GameClock;
use self::direction::Direction;
use self::over::{GameOver, OverOpt};
use self::paused::{PauseOpt, Paused};
use self::snake::{Snake, Step};
use crate::app::Screen;
use crate::command::Command;
use crate::consts;
use crate::difficulty::Profile;
use crate::leaderboard::ScoreRecord;
use crate::menu::MainMenu;
use crate::util::{center_rect, format_mmss, get_display_area, Globals};
use chrono::Local;
use crossterm::event::{poll, read, Event};
use rand::{seq::IteratorRandom, Rng};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Margin, Position, Rect, Size},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Widget},
    Frame,
};
use std::collections::HashSet;
use std::io;
use std::time::{Duration, Instant};

/// The state of the gameplay screen: one run of the snake on the board, from
/// the starting position to the game-over menu
#[derive(Clone, Debug)]
pub(crate) struct Game<R = rand::rngs::ThreadRng> {
    /// Source of randomness for food & bomb placement
    rng: R,

    /// The parameters of the current difficulty
    profile: Profile,

    /// The player's score so far
    score: u32,

    snake: Snake,

    /// The cell holding the food
    food: Position,

    bombs: BombField,

    /// Session clock that bomb fuses and the elapsed-time display run on
    clock: GameClock,

    /// Clock reading at the first accepted directional input, if any
    moving_since: Option<Duration>,

    phase: Phase,

    /// Application-wide state
    globals: Globals,

    /// The time at which the next tick should occur, if known
    next_tick: Option<Instant>,
}

impl Game<rand::rngs::ThreadRng> {
    pub(crate) fn new(globals: Globals) -> Self {
        Game::new_with_rng(globals, rand::rng())
    }
}

impl<R: Rng> Game<R> {
    pub(crate) fn new_with_rng(globals: Globals, mut rng: R) -> Game<R> {
        let profile = globals.difficulty.profile();
        let snake = Snake::new(profile.initial_interval);
        let head = snake.head();
        let mut occupied = snake.cells().collect::<HashSet<_>>();
        let food = consts::BOARD
            .positions()
            .filter(|pos| !occupied.contains(pos))
            .choose(&mut rng)
            .expect("a fresh board should have free cells");
        occupied.insert(food);
        let bombs = BombField::seed(&mut rng, &profile, head, &occupied, Duration::ZERO);
        Game {
            rng,
            profile,
            score: 0,
            snake,
            food,
            bombs,
            clock: GameClock::start(),
            moving_since: None,
            phase: Phase::Running,
            globals,
            next_tick: None,
        }
    }

    /// Wait for & process the next event or tick, whichever comes first.
    /// Returns `Some` if the app should switch to a new screen.
    pub(crate) fn process_input(&mut self) -> io::Result<Option<Screen>> {
        if self.running() {
            if self.next_tick.is_none() {
                self.next_tick = Some(Instant::now() + self.snake.interval);
            }
            let when = self.next_tick.expect("next_tick should be Some");
            let wait = when.saturating_duration_since(Instant::now());
            if wait.is_zero() || !poll(wait)? {
                self.advance();
                self.next_tick = None;
                Ok(None)
            } else {
                Ok(self.handle_event(read()?))
            }
        } else {
            Ok(self.handle_event(read()?))
        }
    }

    /// Advance the game by one tick: refresh the bomb field, move the snake,
    /// and resolve whatever the snake moved onto.
    fn advance(&mut self) {
        if !self.running() {
            return;
        }
        let now = self.clock.now();
        // Fuses burn even while the snake is waiting for its first move.
        self.sweep_bombs(now);
        match self.snake.advance(self.food, self.profile.growth) {
            Step::Waiting => return,
            Step::HitWall => {
                self.finish(Crash::Wall);
                return;
            }
            Step::HitSelf => {
                self.finish(Crash::Body);
                return;
            }
            Step::Ate => {
                self.score += self.profile.food_points;
                self.snake.speed_up(self.profile.speed_step);
                self.place_food();
            }
            Step::Moved => (),
        }
        // The move commits first; bombs kill on the cell the head landed on.
        if self.bombs.contains(self.snake.head()) {
            self.finish(Crash::Bomb);
        }
    }

    /// Expire & replace bombs as of the clock reading `now`
    fn sweep_bombs(&mut self, now: Duration) {
        let head = self.snake.head();
        let mut occupied = self.snake.cells().collect::<HashSet<_>>();
        occupied.insert(self.food);
        self.bombs
            .sweep(&mut self.rng, &self.profile, head, &occupied, now);
    }

    /// Move the food to a random cell not covered by the snake or a bomb.
    /// On a board with no free cell, the food stays where it is.
    fn place_food(&mut self) {
        let mut occupied = self.snake.cells().collect::<HashSet<_>>();
        occupied.extend(self.bombs.iter().map(|bomb| bomb.pos));
        let choice = consts::BOARD
            .positions()
            .filter(|pos| !occupied.contains(pos))
            .choose(&mut self.rng);
        if let Some(pos) = choice {
            self.food = pos;
        }
    }
}

impl<R> Game<R> {
    pub(crate) fn draw(&self, frame: &mut Frame<'_>) {
        frame.render_widget(self, frame.area());
    }

    /// Handle an input event.  Returns `Some` if the app should switch to a
    /// new screen.
    pub(crate) fn handle_event(&mut self, event: Event) -> Option<Screen> {
        match self.phase {
            Phase::Running => {
                if event == Event::FocusLost {
                    self.pause();
                    return None;
                }
                return self.apply_command(Command::from_key_event(event.as_key_press_event()?)?);
            }
            Phase::Paused(ref mut paused) => match paused.handle_event(event)? {
                PauseOpt::Resume => self.resume(),
                PauseOpt::Restart => return Some(Screen::Game(Game::new(self.globals.clone()))),
                PauseOpt::MainMenu => {
                    return Some(Screen::Main(MainMenu::new(self.globals.clone())))
                }
                PauseOpt::Quit => return Some(Screen::Quit),
            },
            Phase::Over(ref mut over) => match over.handle_event(event)? {
                OverOpt::Again => return Some(Screen::Game(Game::new(self.globals.clone()))),
                OverOpt::Menu => return Some(Screen::Main(MainMenu::new(self.globals.clone()))),
                OverOpt::Quit => return Some(Screen::Quit),
            },
        }
        None
    }

    /// Apply a single running-phase command, whether it came from the
    /// keyboard or a gamepad.  Returns `Some` if the app should switch to a
    /// new screen.
    pub(crate) fn apply_command(&mut self, command: Command) -> Option<Screen> {
        match command {
            Command::Quit => return Some(Screen::Quit),
            Command::Up => self.steer(Direction::North),
            Command::Down => self.steer(Direction::South),
            Command::Left => self.steer(Direction::West),
            Command::Right => self.steer(Direction::East),
            Command::Esc | Command::Space | Command::P => self.pause(),
            Command::R => return Some(Screen::Game(Game::new(self.globals.clone()))),
            _ => (),
        }
        None
    }

    fn running(&self) -> bool {
        self.phase == Phase::Running
    }

    /// Point the snake in `direction` at the next tick and start the match
    /// timer if this is the first directional input
    fn steer(&mut self, direction: Direction) {
        if self.moving_since.is_none() {
            self.moving_since = Some(self.clock.now());
        }
        self.snake.steer(direction);
    }

    fn pause(&mut self) {
        self.clock.pause();
        self.next_tick = None;
        self.phase = Phase::Paused(Paused::default());
    }

    fn resume(&mut self) {
        self.clock.resume();
        self.phase = Phase::Running;
    }

    /// Whole seconds played so far, counted from the first directional input
    fn elapsed_seconds(&self) -> u64 {
        match self.moving_since {
            Some(start) => self.clock.now().saturating_sub(start).as_secs(),
            None => 0,
        }
    }

    /// End the run: freeze the clock, submit the score to the leaderboards,
    /// and bring up the game-over menu
    fn finish(&mut self, cause: Crash) {
        self.clock.pause();
        self.next_tick = None;
        let seconds = self.elapsed_seconds();
        let new_best = self.score > self.globals.scores.high_score();
        let record = ScoreRecord {
            score: self.score,
            seconds,
            date: Local::now().date_naive(),
        };
        let save_failed = self
            .globals
            .scores
            .record(self.globals.difficulty, record, &*self.globals.store)
            .is_err();
        self.phase = Phase::Over(GameOver::new(
            cause,
            self.score,
            seconds,
            new_best,
            save_failed,
        ));
    }

    /// Draw the playing field and everything on it into `area`
    fn draw_board(&self, area: Rect, buf: &mut Buffer) {
        let mut canvas = Canvas { area, buf };
        for pos in self.snake.cells() {
            canvas.draw_cell(pos, consts::SNAKE_BODY_SYMBOL, consts::SNAKE_STYLE);
        }
        canvas.draw_cell(self.food, consts::FOOD_SYMBOL, consts::FOOD_STYLE);
        let now = self.clock.now();
        for bomb in self.bombs.iter() {
            if bomb.visible(now, &self.profile) {
                let style = match bomb.state(now, &self.profile) {
                    BombState::Warning => consts::BOMB_WARNING_STYLE,
                    BombState::Active | BombState::Expired => consts::BOMB_STYLE,
                };
                canvas.draw_cell(bomb.pos, consts::BOMB_SYMBOL, style);
            }
        }
        // The head goes last so that, when the run is over, the collision
        // marker overwrites whatever was hit.
        let (symbol, style) = if matches!(self.phase, Phase::Over(_)) {
            (consts::COLLISION_SYMBOL, consts::COLLISION_STYLE)
        } else {
            (self.snake.head_symbol(), consts::SNAKE_STYLE)
        };
        canvas.draw_cell(self.snake.head(), symbol, style);
    }
}

impl<R> Widget for &Game<R> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let display = get_display_area(area);
        let [score_area, board_area, msg_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(display);

        let score = self.score;
        let high = self.globals.scores.high_score();
        let time = format_mmss(self.elapsed_seconds());
        Line::styled(
            format!(" Score: {score}   High Score: {high}   Time: {time}"),
            consts::SCORE_BAR_STYLE,
        )
        .render(score_area, buf);

        let block_area = center_rect(
            board_area,
            Size {
                width: consts::GRID_CELLS + 2,
                height: consts::GRID_CELLS + 2,
            },
        );
        Block::bordered().render(block_area, buf);
        self.draw_board(block_area.inner(Margin::new(1, 1)), buf);

        match self.phase {
            Phase::Running if !self.snake.moving => {
                Line::from_iter([
                    Span::raw(" Press "),
                    Span::styled("←↓↑→", consts::KEY_STYLE),
                    Span::raw(" or "),
                    Span::styled("wasd", consts::KEY_STYLE),
                    Span::raw(" to start"),
                ])
                .render(msg_area, buf);
            }
            Phase::Running => {
                Line::from_iter([Span::raw(" Pause: "), Span::styled("p", consts::KEY_STYLE)])
                    .render(msg_area, buf);
            }
            Phase::Paused(paused) => {
                let pause_area = center_rect(display, Size::new(Paused::WIDTH, Paused::HEIGHT));
                paused.render(pause_area, buf);
            }
            Phase::Over(over) => {
                let over_area = center_rect(display, Size::new(GameOver::WIDTH, over.height()));
                over.render(over_area, buf);
            }
        }
    }
}

/// Which part of the play/pause/game-over cycle the screen is in
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Phase {
    Running,
    Paused(Paused),
    Over(GameOver),
}

/// What ended the run
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Crash {
    Wall,
    Body,
    Bomb,
}

/// A facility for drawing individual cells of the playing field
struct Canvas<'a> {
    /// The region of the buffer in which the field is drawn
    area: Rect,
    buf: &'a mut Buffer,
}

impl Canvas<'_> {
    fn draw_cell(&mut self, pos: Position, symbol: char, style: Style) {
        let Some(x) = self.area.x.checked_add(pos.x) else {
            return;
        };
        let Some(y) = self.area.y.checked_add(pos.y) else {
            return;
        };
        if let Some(cell) = self.buf.cell_mut((x, y)) {
            cell.set_char(symbol);
            cell.set_style(Style::reset().patch(style));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::bombs::Bomb;
    use super::*;
    use crate::difficulty::Difficulty;
    use crate::gamepad::{Gamepad, GamepadSnapshot};
    use crossterm::event::KeyCode;
    use rand::SeedableRng;
    use rand_chacha::ChaCha12Rng;
    use std::collections::VecDeque;
    use std::thread::sleep;

    const RNG_SEED: u64 = 0x0123456789ABCDEF;

    /// A fresh easy-mode game with the food and the bomb parked at known
    /// cells so that rendering & movement are deterministic
    fn test_game() -> Game<ChaCha12Rng> {
        let mut game = Game::new_with_rng(Globals::default(), ChaCha12Rng::seed_from_u64(RNG_SEED));
        game.food = Position::new(15, 5);
        game.bombs = BombField {
            bombs: vec![Bomb {
                pos: Position::new(4, 15),
                armed_at: Duration::ZERO,
            }],
        };
        game
    }

    fn positions(cells: &[(u16, u16)]) -> VecDeque<Position> {
        cells.iter().map(|&(x, y)| Position::new(x, y)).collect()
    }

    #[test]
    fn render_new_game() {
        let game = test_game();
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&game).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 0   High Score: 0   Time: 00:00                                         ",
            "                             ┌────────────────────┐                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │               ●    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │        ⚬⚬>         │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │    ◉               │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             └────────────────────┘                             ",
            " Press ←↓↑→ or wasd to start                                                    ",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(45, 7, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(38, 12, 3, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(34, 17, 1, 1), consts::BOMB_STYLE);
        expected.set_style(Rect::new(7, 23, 4, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(15, 23, 4, 1), consts::KEY_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_paused() {
        let mut game = test_game();
        assert!(game.handle_event(Event::Key(KeyCode::Esc.into())).is_none());
        assert!(matches!(game.phase, Phase::Paused(_)));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&game).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 0   High Score: 0   Time: 00:00                                         ",
            "                             ┌────────────────────┐                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │               ●    │                             ",
            "                            ┌─────── PAUSED ───────┐                            ",
            "                            │ The clock is stopped │                            ",
            "                            │                      │                            ",
            "                            │ » Resume (esc)       │                            ",
            "                            │   Restart (r)        │                            ",
            "                            │   Main Menu (m)      │                            ",
            "                            │   Quit (q)           │                            ",
            "                            └──────────────────────┘                            ",
            "                             │                    │                             ",
            "                             │    ◉               │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             └────────────────────┘                             ",
            "                                                                                ",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(45, 7, 1, 1), consts::FOOD_STYLE);
        expected.set_style(Rect::new(30, 9, 20, 1), consts::HINT_STYLE);
        expected.set_style(Rect::new(30, 11, 20, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(40, 11, 3, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(41, 12, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(43, 13, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(38, 14, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(34, 17, 1, 1), consts::BOMB_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn render_game_over() {
        let mut game = test_game();
        game.snake.body = positions(&[(19, 1), (18, 1), (17, 1)]);
        game.score = 30;
        game.phase = Phase::Over(GameOver::new(Crash::Wall, 30, 0, false, false));
        let area = Rect::new(0, 0, 80, 24);
        let mut buffer = Buffer::empty(area);
        (&game).render(area, &mut buffer);
        let mut expected = Buffer::with_lines([
            " Score: 30   High Score: 0   Time: 00:00                                        ",
            "                             ┌────────────────────┐                             ",
            "                             │                    │                             ",
            "                             │                 ⚬⚬×│                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                         ┌──────── GAME OVER ─────────┐                         ",
            "                         │ You ran into the wall!     │                         ",
            "                         │                            │                         ",
            "                         │ Score: 30                  │                         ",
            "                         │ Time: 00:00                │                         ",
            "                         │                            │                         ",
            "                         │ » Play Again (r)           │                         ",
            "                         │   Main Menu (m)            │                         ",
            "                         │   Quit (q)                 │                         ",
            "                         └────────────────────────────┘                         ",
            "                             │    ◉               │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             │                    │                             ",
            "                             └────────────────────┘                             ",
            "                                                                                ",
        ]);
        expected.set_style(Rect::new(0, 0, 80, 1), consts::SCORE_BAR_STYLE);
        expected.set_style(Rect::new(47, 3, 2, 1), consts::SNAKE_STYLE);
        expected.set_style(Rect::new(49, 3, 1, 1), consts::COLLISION_STYLE);
        expected.set_style(Rect::new(27, 13, 26, 1), consts::MENU_SELECTION_STYLE);
        expected.set_style(Rect::new(41, 13, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(40, 14, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(35, 15, 1, 1), consts::KEY_STYLE);
        expected.set_style(Rect::new(34, 17, 1, 1), consts::BOMB_STYLE);
        pretty_assertions::assert_eq!(buffer, expected);
    }

    #[test]
    fn waiting_snake_holds_still() {
        let mut game = test_game();
        game.advance();
        game.advance();
        assert_eq!(game.snake.body, positions(&[(10, 10), (9, 10), (8, 10)]));
        assert!(game.running());
        assert_eq!(game.moving_since, None);
    }

    #[test]
    fn bombs_restock_while_snake_waits() {
        let mut game = test_game();
        game.bombs = BombField::default();
        game.advance();
        assert_eq!(game.bombs.bombs.len(), 1);
        assert_eq!(game.snake.body, positions(&[(10, 10), (9, 10), (8, 10)]));
    }

    #[test]
    fn eating_scores_grows_and_speeds_up() {
        let mut game = test_game();
        game.food = Position::new(11, 10);
        assert!(game
            .handle_event(Event::Key(KeyCode::Right.into()))
            .is_none());
        assert!(game.moving_since.is_some());
        game.advance();
        assert_eq!(
            game.snake.body,
            positions(&[(11, 10), (10, 10), (9, 10), (8, 10)]),
        );
        assert_eq!(game.score, 10);
        assert_eq!(game.snake.interval, Duration::from_millis(196));
        assert!(game.running());
        let relocated = game.food;
        assert_ne!(relocated, Position::new(11, 10));
        assert!(!game.snake.cells().any(|pos| pos == relocated));
        assert!(!game.bombs.contains(relocated));
    }

    #[test]
    fn wall_crash_ends_the_run_and_records_the_score() {
        let mut game = test_game();
        game.snake.body = positions(&[(19, 10), (18, 10), (17, 10)]);
        game.steer(Direction::East);
        game.advance();
        match game.phase {
            Phase::Over(over) => {
                assert_eq!(over.cause, Crash::Wall);
                assert!(!over.new_best);
                assert!(!over.save_failed);
            }
            ref phase => panic!("expected the game to be over, got {phase:?}"),
        }
        let records = game.globals.scores.records(Difficulty::Easy);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].score, 0);
    }

    #[test]
    fn bomb_is_fatal_on_arrival() {
        let mut game = test_game();
        game.bombs = BombField {
            bombs: vec![Bomb {
                pos: Position::new(11, 10),
                armed_at: Duration::ZERO,
            }],
        };
        assert!(game
            .handle_event(Event::Key(KeyCode::Right.into()))
            .is_none());
        game.advance();
        assert_eq!(game.snake.head(), Position::new(11, 10));
        match game.phase {
            Phase::Over(over) => assert_eq!(over.cause, Crash::Bomb),
            ref phase => panic!("expected the game to be over, got {phase:?}"),
        }
    }

    #[test]
    fn self_collision_ends_the_run() {
        let mut game = test_game();
        game.snake.body = positions(&[(4, 5), (4, 6), (5, 6), (5, 5)]);
        game.snake.heading = Direction::East;
        game.snake.pending = Direction::East;
        game.snake.moving = true;
        game.advance();
        match game.phase {
            Phase::Over(over) => assert_eq!(over.cause, Crash::Body),
            ref phase => panic!("expected the game to be over, got {phase:?}"),
        }
    }

    #[test]
    fn focus_lost_pauses() {
        let mut game = test_game();
        assert!(game.handle_event(Event::FocusLost).is_none());
        assert!(matches!(game.phase, Phase::Paused(_)));
    }

    #[test]
    fn space_toggles_pause() {
        let mut game = test_game();
        assert!(game
            .handle_event(Event::Key(KeyCode::Char(' ').into()))
            .is_none());
        assert!(matches!(game.phase, Phase::Paused(_)));
        assert!(game
            .handle_event(Event::Key(KeyCode::Char(' ').into()))
            .is_none());
        assert!(game.running());
    }

    #[test]
    fn pause_menu_restart_starts_fresh() {
        let mut game = test_game();
        game.score = 30;
        game.pause();
        match game.handle_event(Event::Key(KeyCode::Char('r').into())) {
            Some(Screen::Game(fresh)) => {
                assert_eq!(fresh.score, 0);
                assert!(fresh.running());
            }
            other => panic!("expected a fresh game, got {other:?}"),
        }
    }

    #[test]
    fn pause_menu_returns_to_the_main_menu() {
        let mut game = test_game();
        game.pause();
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Char('m').into())),
            Some(Screen::Main(_))
        ));
    }

    #[test]
    fn pause_menu_can_quit() {
        let mut game = test_game();
        game.pause();
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Char('q').into())),
            Some(Screen::Quit)
        ));
    }

    #[test]
    fn gamepad_stick_steers_the_snake() {
        let mut game = test_game();
        let mut pad = Gamepad::default();
        let snapshot = GamepadSnapshot {
            axes: [0.0, -1.0],
            ..GamepadSnapshot::default()
        };
        for command in pad.poll(snapshot) {
            assert!(game.apply_command(command).is_none());
        }
        assert!(game.moving_since.is_some());
        game.advance();
        assert_eq!(game.snake.head(), Position::new(10, 9));
    }

    #[test]
    fn restart_while_running_starts_fresh() {
        let mut game = test_game();
        game.score = 30;
        match game.handle_event(Event::Key(KeyCode::Char('r').into())) {
            Some(Screen::Game(fresh)) => {
                assert_eq!(fresh.score, 0);
                assert!(fresh.running());
            }
            other => panic!("expected a fresh game, got {other:?}"),
        }
    }

    #[test]
    fn pausing_freezes_the_clock() {
        let mut game = test_game();
        game.pause();
        let frozen = game.clock.now();
        sleep(Duration::from_millis(5));
        assert_eq!(game.clock.now(), frozen);
        game.resume();
        assert!(game.running());
    }

    #[test]
    fn restart_carries_the_recorded_scores_along() {
        let mut game = test_game();
        game.snake.body = positions(&[(19, 10), (18, 10), (17, 10)]);
        game.steer(Direction::East);
        game.advance();
        match game.handle_event(Event::Key(KeyCode::Char('r').into())) {
            Some(Screen::Game(next)) => {
                assert_eq!(next.globals.scores.records(Difficulty::Easy).len(), 1);
                assert!(next.running());
            }
            other => panic!("expected a fresh game, got {other:?}"),
        }
    }

    #[test]
    fn game_over_menu_returns_to_main() {
        let mut game = test_game();
        game.phase = Phase::Over(GameOver::new(Crash::Bomb, 0, 0, false, false));
        assert!(matches!(
            game.handle_event(Event::Key(KeyCode::Char('m').into())),
            Some(Screen::Main(_)),
        ));
    }

    #[test]
    fn beating_the_high_score_sets_the_flag() {
        let mut game = test_game();
        game.score = 25;
        game.snake.body = positions(&[(19, 10), (18, 10), (17, 10)]);
        game.steer(Direction::East);
        game.advance();
        match game.phase {
            Phase::Over(over) => assert!(over.new_best),
            ref phase => panic!("expected the game to be over, got {phase:?}"),
        }
        assert_eq!(game.globals.scores.high_score(), 25);
        assert_eq!(game.globals.scores.records(Difficulty::Easy)[0].score, 25);
    }

    #[test]
    fn score_is_recorded_exactly_once() {
        let mut game = test_game();
        game.snake.body = positions(&[(19, 10), (18, 10), (17, 10)]);
        game.steer(Direction::East);
        game.advance();
        game.advance();
        game.advance();
        assert_eq!(game.globals.scores.records(Difficulty::Easy).len(), 1);
    }
}
