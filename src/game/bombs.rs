use crate::consts;
use crate::difficulty::Profile;
use rand::{seq::IteratorRandom, Rng};
use ratatui::layout::Position;
use std::collections::HashSet;
use std::time::Duration;

/// A bomb on the playing field
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct Bomb {
    pub(super) pos: Position,

    /// Session-clock time at which the bomb was placed
    pub(super) armed_at: Duration,
}

/// Where a bomb is in its lifecycle.
///
/// The state is derived from the session clock on demand rather than stored,
/// so a paused game cannot let a bomb's fuse run down.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum BombState {
    /// Quietly ticking away
    Active,
    /// About to go off; drawn blinking
    Warning,
    /// Fuse ran out; due to be swept off the board
    Expired,
}

impl Bomb {
    pub(super) fn state(&self, now: Duration, profile: &Profile) -> BombState {
        let age = now.saturating_sub(self.armed_at);
        if age >= profile.bomb_lifetime {
            BombState::Expired
        } else if age >= profile.bomb_lifetime.saturating_sub(profile.warning_lead) {
            BombState::Warning
        } else {
            BombState::Active
        }
    }

    /// Whether the bomb should be drawn this frame.  While warning, the
    /// bomb disappears every other blink period.
    pub(super) fn visible(&self, now: Duration, profile: &Profile) -> bool {
        match self.state(now, profile) {
            BombState::Active => true,
            BombState::Expired => false,
            BombState::Warning => {
                let warned_at =
                    self.armed_at + profile.bomb_lifetime.saturating_sub(profile.warning_lead);
                let blinking_for = now.saturating_sub(warned_at);
                (blinking_for.as_millis() / consts::BLINK_PERIOD.as_millis()) % 2 == 0
            }
        }
    }
}

/// All of the bombs currently on the playing field
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub(super) struct BombField {
    pub(super) bombs: Vec<Bomb>,
}

impl BombField {
    /// Place a difficulty's full complement of bombs on an otherwise
    /// bombless board
    pub(super) fn seed<R: Rng>(
        rng: &mut R,
        profile: &Profile,
        head: Position,
        occupied: &HashSet<Position>,
        now: Duration,
    ) -> BombField {
        let mut field = BombField::default();
        for _ in 0..profile.bombs {
            field.place(rng, head, occupied, now);
        }
        field
    }

    /// Remove bombs whose fuses have run out and place replacements,
    /// restoring the full complement whenever a legal cell exists
    pub(super) fn sweep<R: Rng>(
        &mut self,
        rng: &mut R,
        profile: &Profile,
        head: Position,
        occupied: &HashSet<Position>,
        now: Duration,
    ) {
        self.bombs
            .retain(|bomb| bomb.state(now, profile) != BombState::Expired);
        while self.bombs.len() < profile.bombs {
            let before = self.bombs.len();
            self.place(rng, head, occupied, now);
            if self.bombs.len() == before {
                // No cell is currently legal; try again next sweep
                break;
            }
        }
    }

    /// Place one bomb on a free cell a respectful distance from the snake's
    /// head.  Does nothing if no such cell exists.
    fn place<R: Rng>(
        &mut self,
        rng: &mut R,
        head: Position,
        occupied: &HashSet<Position>,
        now: Duration,
    ) {
        let choice = consts::BOARD
            .positions()
            .filter(|&pos| {
                !occupied.contains(&pos) && !self.contains(pos) && clear_of_head(pos, head)
            })
            .choose(rng);
        if let Some(pos) = choice {
            self.bombs.push(Bomb { pos, armed_at: now });
        }
    }

    pub(super) fn contains(&self, pos: Position) -> bool {
        self.bombs.iter().any(|bomb| bomb.pos == pos)
    }

    pub(super) fn iter(&self) -> impl Iterator<Item = &Bomb> {
        self.bombs.iter()
    }
}

/// A cell is far enough from the snake's head to take a new bomb only if it
/// is at least [`consts::BOMB_HEAD_CLEARANCE`] cells away on both axes.
fn clear_of_head(pos: Position, head: Position) -> bool {
    pos.x.abs_diff(head.x) >= consts::BOMB_HEAD_CLEARANCE
        && pos.y.abs_diff(head.y) >= consts::BOMB_HEAD_CLEARANCE
}
