use crate::consts;
use ratatui::layout::Position;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Returns the cell one step this way from `pos`, or `None` if that
    /// step would leave the board
    pub(super) fn step(self, pos: Position) -> Option<Position> {
        let Position { mut x, mut y } = pos;
        match self {
            Direction::North => {
                y = y.checked_sub(1)?;
            }
            Direction::East => {
                x = increment_in_bounds(x)?;
            }
            Direction::South => {
                y = increment_in_bounds(y)?;
            }
            Direction::West => {
                x = x.checked_sub(1)?;
            }
        }
        Some(Position { x, y })
    }

    pub(super) fn reverse(self) -> Direction {
        match self {
            Direction::North => Direction::South,
            Direction::East => Direction::West,
            Direction::South => Direction::North,
            Direction::West => Direction::East,
        }
    }
}

fn increment_in_bounds(x: u16) -> Option<u16> {
    x.checked_add(1).filter(|&xx| xx < consts::GRID_CELLS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Direction::North, Position::new(2, 7), Some(Position::new(2, 6)))]
    #[case(Direction::South, Position::new(2, 7), Some(Position::new(2, 8)))]
    #[case(Direction::East, Position::new(2, 7), Some(Position::new(3, 7)))]
    #[case(Direction::West, Position::new(2, 7), Some(Position::new(1, 7)))]
    #[case(Direction::North, Position::new(2, 0), None)]
    #[case(Direction::South, Position::new(2, 19), None)]
    #[case(Direction::East, Position::new(19, 7), None)]
    #[case(Direction::West, Position::new(0, 7), None)]
    #[case(Direction::South, Position::new(2, 18), Some(Position::new(2, 19)))]
    #[case(Direction::East, Position::new(18, 7), Some(Position::new(19, 7)))]
    fn test_direction_step(
        #[case] d: Direction,
        #[case] pos: Position,
        #[case] r: Option<Position>,
    ) {
        assert_eq!(d.step(pos), r);
    }

    #[rstest]
    #[case(Direction::North, Direction::South)]
    #[case(Direction::East, Direction::West)]
    #[case(Direction::South, Direction::North)]
    #[case(Direction::West, Direction::East)]
    fn test_reverse(#[case] d: Direction, #[case] r: Direction) {
        assert_eq!(d.reverse(), r);
    }
}
