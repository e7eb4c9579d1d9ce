//! The display boundary. Real kiosks draw the cover and a state icon on
//! a screen; that collaborator sits behind [`Screen`], and the default
//! implementation just narrates to the console.

use std::io::stdout;
use std::path::Path;

use crossterm::{
    cursor::MoveTo,
    execute,
    style::Print,
    terminal::{Clear, ClearType},
};

use crate::app::PlayState;

/// Everything the display needs after a state change.
pub struct ScreenView<'a> {
    pub cover: &'a Path,
    pub state: PlayState,
    /// 1-based track counter; 0 when nothing is playing.
    pub tracknum: u32,
}

pub trait Screen {
    fn render(&mut self, view: &ScreenView<'_>);
}

/// Console stand-in for the real display: one log line per redraw, or a
/// cleared screen in fullscreen mode.
pub struct ConsoleScreen {
    fullscreen: bool,
}

impl ConsoleScreen {
    pub fn new(fullscreen: bool) -> Self {
        Self { fullscreen }
    }
}

impl Screen for ConsoleScreen {
    fn render(&mut self, view: &ScreenView<'_>) {
        let line = match view.state {
            PlayState::Asleep => "asleep".to_string(),
            PlayState::Idle => format!("[idle] {}", view.cover.display()),
            PlayState::Playing => {
                format!("[playing #{}] {}", view.tracknum, view.cover.display())
            }
            PlayState::Paused => format!("[paused #{}] {}", view.tracknum, view.cover.display()),
        };
        if self.fullscreen {
            let _ = execute!(stdout(), Clear(ClearType::All), MoveTo(0, 0), Print(&line));
        } else {
            log::info!("{line}");
        }
    }
}

/// Headless screen for tests and displayless deployments.
#[derive(Default)]
pub struct NullScreen;

impl Screen for NullScreen {
    fn render(&mut self, _view: &ScreenView<'_>) {}
}
