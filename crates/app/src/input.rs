use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use memtrack_core::Message;
use tokio::sync::mpsc;
use tracing::error;

/// Map a key press to an application message.
pub fn map_key(key: KeyEvent) -> Option<Message> {
    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            Some(Message::Shutdown)
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => Some(Message::TogglePause),
        KeyCode::Char('t') => Some(Message::ToggleTheme),
        KeyCode::Char('s') => Some(Message::ExportGraph),
        KeyCode::Char('q') | KeyCode::Esc => Some(Message::Shutdown),
        _ => None,
    }
}

/// Read terminal key events on a dedicated thread and forward them as
/// [`Message`]s. `crossterm::event::read` blocks, so this stays off the runtime.
pub fn spawn_key_reader(tx: mpsc::Sender<Message>) {
    std::thread::spawn(move || loop {
        match event::read() {
            Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                let Some(msg) = map_key(key) else { continue };
                let quit = matches!(msg, Message::Shutdown);
                if tx.blocking_send(msg).is_err() || quit {
                    break;
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Keyboard input failed: {e}");
                let _ = tx.blocking_send(Message::Shutdown);
                break;
            }
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn maps_action_keys() {
        assert!(matches!(map_key(key(KeyCode::Char('p'))), Some(Message::TogglePause)));
        assert!(matches!(map_key(key(KeyCode::Char(' '))), Some(Message::TogglePause)));
        assert!(matches!(map_key(key(KeyCode::Char('t'))), Some(Message::ToggleTheme)));
        assert!(matches!(map_key(key(KeyCode::Char('s'))), Some(Message::ExportGraph)));
        assert!(matches!(map_key(key(KeyCode::Esc)), Some(Message::Shutdown)));
    }

    #[test]
    fn ctrl_c_quits_but_plain_c_does_not() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(map_key(ctrl_c), Some(Message::Shutdown)));
        assert!(map_key(key(KeyCode::Char('c'))).is_none());
    }
}
