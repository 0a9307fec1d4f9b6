use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::game::Speed;
use crate::snake::Heading::{self, *};

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Heading),
    Start,
    Pause,
    Resume,
    SetSpeed(Speed),
    Quit,
}

/// Maps a key press onto a game command. Keys without a binding yield `None`.
pub fn command_for(ev: &KeyEvent) -> Option<Command> {
    if is_ctrl_c(ev) {
        return Some(Command::Quit);
    }

    let command = match ev.code {
        KeyCode::Char('w') | KeyCode::Up => Command::Steer(Up),
        KeyCode::Char('a') | KeyCode::Left => Command::Steer(Left),
        KeyCode::Char('s') | KeyCode::Down => Command::Steer(Down),
        KeyCode::Char('d') | KeyCode::Right => Command::Steer(Right),
        KeyCode::Enter | KeyCode::Char('n') => Command::Start,
        KeyCode::Char('p') => Command::Pause,
        KeyCode::Char('r') => Command::Resume,
        KeyCode::Char('1') => Command::SetSpeed(Speed::Slow),
        KeyCode::Char('2') => Command::SetSpeed(Speed::Medium),
        KeyCode::Char('3') => Command::SetSpeed(Speed::Fast),
        KeyCode::Char('q') | KeyCode::Esc => Command::Quit,
        _ => return None,
    };

    Some(command)
}

fn is_ctrl_c(ev: &KeyEvent) -> bool {
    matches!(ev, KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL })
}
