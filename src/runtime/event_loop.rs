//! The single consumer of the event channel. Owns the controller for
//! its whole life; no other thread ever touches it.

use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crate::app::{App, PlayState};
use crate::config::Settings;
use crate::input::Pins;

use super::Event;
use super::hardware::PowerSwitch;

const TICK: Duration = Duration::from_millis(250);

/// Drain events until quit or until every producer is gone. The power
/// switch, when present, follows the sleep/wake transitions.
pub fn run<P: Pins>(
    app: &mut App,
    rx: &Receiver<Event>,
    mut power: Option<PowerSwitch<P>>,
    settings: &Settings,
) {
    let sleep_timeout = Duration::from_secs(settings.timing.sleep_timeout_secs);

    loop {
        match rx.recv_timeout(TICK) {
            Ok(Event::Quit) => return,
            Ok(event) if app.state == PlayState::Asleep => {
                // Any manual input wakes the kiosk and is consumed by
                // the waking itself.
                if matches!(event, Event::Rotate(_) | Event::Button) {
                    if let Some(power) = power.as_mut() {
                        if let Err(e) = power.set(true) {
                            log::warn!("failed to power up: {e:#}");
                        }
                    }
                    app.wake();
                }
            }
            Ok(Event::Rotate(delta)) => app.jog(delta),
            Ok(Event::Button) => app.button(),
            Ok(Event::Status(status)) => app.on_status(status, Instant::now()),
            Ok(Event::IdleTick) => {
                if app.rescan_due(Instant::now()) {
                    app.rescan(&settings.library);
                }
            }
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return,
        }

        if let Some(power) = power.as_mut() {
            if app.state == PlayState::Idle && app.idle_since().elapsed() > sleep_timeout {
                if let Err(e) = power.set(false) {
                    log::warn!("failed to power down: {e:#}");
                }
                app.sleep();
            }
        }
    }
}
