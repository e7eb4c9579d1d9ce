//! Terminal key input for displayless development: arrows jog the
//! selection, space is the button, q quits.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event as TermEvent, KeyCode, KeyEventKind, KeyModifiers};

use super::Event;

pub fn spawn(tx: Sender<Event>) {
    thread::spawn(move || {
        loop {
            match event::poll(Duration::from_millis(200)) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    log::warn!("terminal input failed: {e}");
                    return;
                }
            }
            let Ok(TermEvent::Key(key)) = event::read() else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            let event = match key.code {
                KeyCode::Left => Event::Rotate(-1),
                KeyCode::Right => Event::Rotate(1),
                KeyCode::Char(' ') => Event::Button,
                KeyCode::Char('q') | KeyCode::Esc => Event::Quit,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Event::Quit,
                _ => continue,
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    });
}
