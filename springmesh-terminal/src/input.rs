/// Translation of terminal events into camera and app commands
use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseEvent, MouseEventKind,
};

/// Something the user asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Zoom(i32),
    Yaw(i32),
    Roll(i32),
    Pitch(i32),
    TogglePause,
    Quit,
}

/// Map a terminal event to a command.
///
/// A click zooms in, a shift-click zooms out. Left/Right turn the yaw and
/// Up/Down turn the roll in opposite directions.
pub fn map_event(event: &Event) -> Option<Command> {
    match event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(_),
            modifiers,
            ..
        }) => {
            if modifiers.contains(KeyModifiers::SHIFT) {
                Some(Command::Zoom(-1))
            } else {
                Some(Command::Zoom(1))
            }
        }
        Event::Key(KeyEvent { code, kind, .. }) if *kind != KeyEventKind::Release => match code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Command::Quit),
            KeyCode::Char(' ') => Some(Command::TogglePause),
            KeyCode::Char('+') | KeyCode::Char('=') => Some(Command::Zoom(1)),
            KeyCode::Char('-') => Some(Command::Zoom(-1)),
            KeyCode::Left => Some(Command::Yaw(-1)),
            KeyCode::Right => Some(Command::Yaw(1)),
            KeyCode::Up => Some(Command::Roll(1)),
            KeyCode::Down => Some(Command::Roll(-1)),
            KeyCode::Char('w') => Some(Command::Pitch(1)),
            KeyCode::Char('s') => Some(Command::Pitch(-1)),
            _ => None,
        },
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::MouseButton;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn click(modifiers: KeyModifiers) -> Event {
        Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 10,
            row: 4,
            modifiers,
        })
    }

    #[test]
    fn test_click_zooms() {
        assert_eq!(map_event(&click(KeyModifiers::NONE)), Some(Command::Zoom(1)));
        assert_eq!(map_event(&click(KeyModifiers::SHIFT)), Some(Command::Zoom(-1)));
    }

    #[test]
    fn test_arrows() {
        assert_eq!(map_event(&key(KeyCode::Left)), Some(Command::Yaw(-1)));
        assert_eq!(map_event(&key(KeyCode::Right)), Some(Command::Yaw(1)));
        assert_eq!(map_event(&key(KeyCode::Up)), Some(Command::Roll(1)));
        assert_eq!(map_event(&key(KeyCode::Down)), Some(Command::Roll(-1)));
    }

    #[test]
    fn test_ignored_events() {
        assert_eq!(map_event(&key(KeyCode::Char('x'))), None);
        assert_eq!(map_event(&Event::Resize(80, 24)), None);

        let release = Event::Key(KeyEvent::new_with_kind(
            KeyCode::Char('q'),
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
        assert_eq!(map_event(&release), None);
    }
}
