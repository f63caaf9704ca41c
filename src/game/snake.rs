use super::direction::Direction;
use crate::consts;
use ratatui::layout::Position;
use std::collections::VecDeque;
use std::time::Duration;

/// Snake state.
///
/// All positions are cells of the playing field.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(super) struct Snake {
    /// The positions of all of the cells of the snake, head first.  Growing
    /// duplicates the tail cell, so the back of the queue may transiently
    /// hold the same position more than once.
    pub(super) body: VecDeque<Position>,

    /// The direction in which the snake is currently travelling
    pub(super) heading: Direction,

    /// The direction to travel in at the next tick
    pub(super) pending: Direction,

    /// Time between movements; shrinks as food is eaten
    pub(super) interval: Duration,

    /// Whether the player has steered yet.  The snake stays put until the
    /// first directional input.
    pub(super) moving: bool,
}

/// What happened when the snake was advanced by one tick
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Step {
    /// The snake has not started moving yet
    Waiting,
    /// The snake moved into a free cell
    Moved,
    /// The snake moved onto the food and grew
    Ate,
    /// The snake tried to leave the board
    HitWall,
    /// The snake ran into its own body
    HitSelf,
}

impl Snake {
    pub(super) fn new(interval: Duration) -> Snake {
        Snake {
            body: consts::INITIAL_SNAKE.into_iter().collect(),
            heading: Direction::East,
            pending: Direction::East,
            interval,
            moving: false,
        }
    }

    /// Return the position of the snake's head
    pub(super) fn head(&self) -> Position {
        self.body
            .front()
            .copied()
            .expect("snake body should never be empty")
    }

    /// Return the positions of the cells of the snake, head first
    pub(super) fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        self.body.iter().copied()
    }

    /// Return the glyph to use for drawing the snake's head
    pub(super) fn head_symbol(&self) -> char {
        match self.heading {
            Direction::North => consts::SNAKE_HEAD_NORTH_SYMBOL,
            Direction::South => consts::SNAKE_HEAD_SOUTH_SYMBOL,
            Direction::East => consts::SNAKE_HEAD_EAST_SYMBOL,
            Direction::West => consts::SNAKE_HEAD_WEST_SYMBOL,
        }
    }

    /// Request a change of direction, to take effect at the next tick.
    ///
    /// Any directional input releases the snake from its starting position,
    /// even one that is then discarded for being a reversal.
    pub(super) fn steer(&mut self, direction: Direction) {
        self.moving = true;
        if direction != self.heading.reverse() {
            self.pending = direction;
        }
    }

    /// Move the snake forwards one cell.  `food` is the cell currently
    /// holding the food, and `growth` is the number of cells the snake
    /// gains by eating it.
    pub(super) fn advance(&mut self, food: Position, growth: usize) -> Step {
        if !self.moving {
            return Step::Waiting;
        }
        self.heading = self.pending;
        let Some(head) = self.heading.step(self.head()) else {
            return Step::HitWall;
        };
        // The old tail cell is still part of the body here: moving into the
        // cell the tail is about to vacate is fatal.
        if self.body.contains(&head) {
            return Step::HitSelf;
        }
        self.body.push_front(head);
        if head == food {
            let tail = *self.body.back().expect("snake body should never be empty");
            for _ in 1..growth {
                self.body.push_back(tail);
            }
            Step::Ate
        } else {
            let _ = self.body.pop_back();
            Step::Moved
        }
    }

    /// Shorten the time between movements in response to eating a food
    pub(super) fn speed_up(&mut self, step: Duration) {
        self.interval = self.interval.saturating_sub(step).max(consts::TICK_FLOOR);
    }
}
