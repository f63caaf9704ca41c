use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A keypress (or gamepad input) reduced to its meaning for the interface
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Command {
    Quit,
    Up,
    Down,
    Left,
    Right,
    Enter,
    Space,
    Esc,
    P,
    Q,
    R,
    M,
    N,
}

impl Command {
    pub(crate) fn from_key_event(ev: KeyEvent) -> Option<Command> {
        match (ev.modifiers, ev.code) {
            (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(Command::Quit),
            (KeyModifiers::NONE, KeyCode::Char('w' | 'k') | KeyCode::Up) => Some(Command::Up),
            (KeyModifiers::NONE, KeyCode::Char('s' | 'j') | KeyCode::Down) => Some(Command::Down),
            (KeyModifiers::NONE, KeyCode::Char('a' | 'h') | KeyCode::Left) => Some(Command::Left),
            (KeyModifiers::NONE, KeyCode::Char('d' | 'l') | KeyCode::Right) => Some(Command::Right),
            (_, KeyCode::Enter) => Some(Command::Enter),
            (KeyModifiers::NONE, KeyCode::Char(' ')) => Some(Command::Space),
            (_, KeyCode::Esc) => Some(Command::Esc),
            (KeyModifiers::NONE, KeyCode::Char('p')) => Some(Command::P),
            (KeyModifiers::NONE, KeyCode::Char('q')) => Some(Command::Q),
            (KeyModifiers::NONE, KeyCode::Char('r')) => Some(Command::R),
            (KeyModifiers::NONE, KeyCode::Char('m')) => Some(Command::M),
            (KeyModifiers::NONE, KeyCode::Char('n')) => Some(Command::N),
            _ => None,
        }
    }
}
