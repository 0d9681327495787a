use crate::dispatcher::AppEvent;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use labeler_core::keymap::Key;
use std::thread;
use tokio::sync::mpsc::UnboundedSender;
use tracing::warn;

pub fn translate(event: KeyEvent) -> Option<AppEvent> {
    if event.kind != KeyEventKind::Press {
        return None;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) && event.code == KeyCode::Char('c') {
        return Some(AppEvent::Interrupt);
    }
    if event
        .modifiers
        .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT)
    {
        return None;
    }
    let key = match event.code {
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Enter => Key::Enter,
        KeyCode::Esc => Key::Esc,
        KeyCode::Backspace => Key::Backspace,
        KeyCode::Tab => Key::Tab,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        _ => return None,
    };
    Some(AppEvent::Key(key))
}

/// Forwards terminal events from a blocking reader thread until the
/// receiving side goes away.
pub fn spawn_reader(tx: UnboundedSender<AppEvent>) -> thread::JoinHandle<()> {
    thread::spawn(move || loop {
        let forwarded = match event::read() {
            Ok(Event::Key(key)) => match translate(key) {
                Some(ev) => tx.send(ev),
                None => Ok(()),
            },
            Ok(Event::Resize(..)) => tx.send(AppEvent::Redraw),
            Ok(_) => Ok(()),
            Err(e) => {
                warn!(error = %e, "terminal read failed");
                let _ = tx.send(AppEvent::Interrupt);
                break;
            }
        };
        if forwarded.is_err() {
            break;
        }
    })
}
