//! Thread wiring. Input backends and the status poller each run on
//! their own thread and feed one channel; a single event loop owns the
//! controller and drains it.

mod event_loop;
mod hardware;
mod keys;
mod poll;

use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};

use crate::app::App;
use crate::config::{InputBackend, Settings};
use crate::input::SysfsPins;
use crate::library::{Catalog, scan};
use crate::player::{PlayerLink, StatusPoller, start_server};
use crate::render::ConsoleScreen;

use hardware::PowerSwitch;

/// Everything the event loop reacts to, from any producer thread.
#[derive(Debug)]
pub enum Event {
    /// Signed knob rotation, positive is clockwise.
    Rotate(i32),
    /// A debounced button press.
    Button,
    /// A fresh status poll result.
    Status(crate::player::PlayerStatus),
    /// Poll cycle passed with nothing playing.
    IdleTick,
    Quit,
}

/// Bring the whole thing up and run until quit or channel teardown.
pub fn run(root: PathBuf, fullscreen: bool) -> Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    settings.validate().map_err(|e| anyhow!("invalid configuration: {e}"))?;

    let mut catalog = Catalog::open(&root)?;
    let added = scan(
        &root,
        &mut catalog,
        &settings.library,
        settings.ranking.recent_window_secs(),
    );
    log::info!(
        "library has {} album(s), {added} new this scan",
        catalog.albums.len()
    );
    if catalog.albums.is_empty() {
        log::warn!("no albums found under {}", root.display());
    }

    if settings.player.start_server {
        start_server(&settings.player.program);
    }
    let player = PlayerLink::spawn(&settings.player.program);
    let screen = ConsoleScreen::new(fullscreen);
    let mut app = App::new(root, catalog, player, Box::new(screen), &settings);

    let (tx, rx) = mpsc::channel();
    poll::spawn(
        app.poll_handle(),
        StatusPoller::new(&settings.player.program),
        Duration::from_millis(settings.timing.poll_interval_ms),
        tx.clone(),
    );

    match settings.input.backend {
        InputBackend::Keys => {
            keys::spawn(tx);
            enable_raw_mode().context("failed to enable raw terminal mode")?;
            event_loop::run(&mut app, &rx, None::<PowerSwitch<SysfsPins>>, &settings);
            disable_raw_mode().context("failed to restore terminal mode")?;
        }
        InputBackend::Gpio => {
            hardware::spawn(SysfsPins::new(), settings.input.clone(), tx)
                .context("failed to set up input pins")?;
            let power = PowerSwitch::new(SysfsPins::new(), &settings.input.power_pins)
                .context("failed to set up power pins")?;
            event_loop::run(&mut app, &rx, Some(power), &settings);
        }
    }
    Ok(())
}
