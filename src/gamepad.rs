//! Input from a standard-mapping gamepad.
//!
//! The host polls the device (roughly every 50 ms) and feeds the readings
//! in as [`GamepadSnapshot`]s; nothing in this binary talks to a
//! controller, so on its own the module is dead code.
#![allow(dead_code)]

use crate::command::Command;
use crate::consts;

/// The number of buttons tracked on a standard-mapping pad
pub(crate) const BUTTON_COUNT: usize = 16;

// Standard-mapping button indices
const BUTTON_SELECT: usize = 8;
const BUTTON_START: usize = 9;
const BUTTON_DPAD_UP: usize = 12;
const BUTTON_DPAD_DOWN: usize = 13;
const BUTTON_DPAD_LEFT: usize = 14;
const BUTTON_DPAD_RIGHT: usize = 15;

/// One sample of a pad's controls: the left stick plus the buttons.
///
/// Axes are x then y, with right & down positive, matching the standard
/// gamepad mapping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct GamepadSnapshot {
    pub(crate) axes: [f32; 2],
    pub(crate) buttons: [bool; BUTTON_COUNT],
}

/// Translates pad snapshots into the same [`Command`]s the keyboard
/// produces, so the screens never need to know where input came from.
///
/// Directions repeat for as long as they are held; Start & Select fire once
/// per press.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub(crate) struct Gamepad {
    /// Button states from the previous poll
    held: [bool; BUTTON_COUNT],
}

impl Gamepad {
    /// Turn one snapshot into the commands it calls for
    pub(crate) fn poll(&mut self, snapshot: GamepadSnapshot) -> Vec<Command> {
        let mut commands = Vec::new();
        let [x, y] = snapshot.axes;
        if x.abs() > consts::GAMEPAD_AXIS_THRESHOLD || y.abs() > consts::GAMEPAD_AXIS_THRESHOLD {
            // On a diagonal the stronger axis wins; y wins a perfect tie.
            if x.abs() > y.abs() {
                commands.push(if x > 0.0 { Command::Right } else { Command::Left });
            } else {
                commands.push(if y > 0.0 { Command::Down } else { Command::Up });
            }
        }
        for (index, command) in [
            (BUTTON_DPAD_UP, Command::Up),
            (BUTTON_DPAD_DOWN, Command::Down),
            (BUTTON_DPAD_LEFT, Command::Left),
            (BUTTON_DPAD_RIGHT, Command::Right),
        ] {
            if snapshot.buttons[index] {
                commands.push(command);
            }
        }
        if self.newly_pressed(snapshot, BUTTON_START) {
            commands.push(Command::P);
        }
        if self.newly_pressed(snapshot, BUTTON_SELECT) {
            commands.push(Command::R);
        }
        self.held = snapshot.buttons;
        commands
    }

    fn newly_pressed(&self, snapshot: GamepadSnapshot, index: usize) -> bool {
        snapshot.buttons[index] && !self.held[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn stick(x: f32, y: f32) -> GamepadSnapshot {
        GamepadSnapshot {
            axes: [x, y],
            ..GamepadSnapshot::default()
        }
    }

    fn pressed(index: usize) -> GamepadSnapshot {
        let mut snapshot = GamepadSnapshot::default();
        snapshot.buttons[index] = true;
        snapshot
    }

    #[rstest]
    #[case(1.0, 0.0, Command::Right)]
    #[case(-1.0, 0.0, Command::Left)]
    #[case(0.0, 1.0, Command::Down)]
    #[case(0.0, -1.0, Command::Up)]
    #[case(0.6, -0.3, Command::Right)]
    #[case(-0.2, 0.9, Command::Down)]
    #[case(-0.7, -0.6, Command::Left)]
    fn stick_directions(#[case] x: f32, #[case] y: f32, #[case] command: Command) {
        let mut pad = Gamepad::default();
        assert_eq!(pad.poll(stick(x, y)), [command]);
    }

    #[rstest]
    #[case(0.0, 0.0)]
    #[case(0.3, -0.4)]
    #[case(-0.5, 0.5)]
    fn dead_zone_is_ignored(#[case] x: f32, #[case] y: f32) {
        let mut pad = Gamepad::default();
        assert_eq!(pad.poll(stick(x, y)), []);
    }

    #[test]
    fn perfect_diagonal_prefers_vertical() {
        let mut pad = Gamepad::default();
        assert_eq!(pad.poll(stick(0.8, 0.8)), [Command::Down]);
        assert_eq!(pad.poll(stick(-0.8, -0.8)), [Command::Up]);
    }

    #[rstest]
    #[case(BUTTON_DPAD_UP, Command::Up)]
    #[case(BUTTON_DPAD_DOWN, Command::Down)]
    #[case(BUTTON_DPAD_LEFT, Command::Left)]
    #[case(BUTTON_DPAD_RIGHT, Command::Right)]
    fn dpad_repeats_while_held(#[case] index: usize, #[case] command: Command) {
        let mut pad = Gamepad::default();
        assert_eq!(pad.poll(pressed(index)), [command]);
        assert_eq!(pad.poll(pressed(index)), [command]);
    }

    #[test]
    fn start_fires_once_per_press() {
        let mut pad = Gamepad::default();
        assert_eq!(pad.poll(pressed(BUTTON_START)), [Command::P]);
        assert_eq!(pad.poll(pressed(BUTTON_START)), []);
        assert_eq!(pad.poll(GamepadSnapshot::default()), []);
        assert_eq!(pad.poll(pressed(BUTTON_START)), [Command::P]);
    }

    #[test]
    fn select_restarts_once_per_press() {
        let mut pad = Gamepad::default();
        assert_eq!(pad.poll(pressed(BUTTON_SELECT)), [Command::R]);
        assert_eq!(pad.poll(pressed(BUTTON_SELECT)), []);
    }

    #[test]
    fn stick_and_dpad_can_stack() {
        let mut pad = Gamepad::default();
        let mut snapshot = stick(1.0, 0.0);
        snapshot.buttons[BUTTON_DPAD_UP] = true;
        assert_eq!(pad.poll(snapshot), [Command::Right, Command::Up]);
    }
}
