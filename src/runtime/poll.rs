//! The status poll thread. Queries the player only while the
//! controller reports playback; otherwise it just marks the passage of
//! idle time so the event loop can schedule rescans.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use crate::app::PollHandle;
use crate::player::StatusPoller;

use super::Event;

pub fn spawn(view: PollHandle, poller: StatusPoller, interval: Duration, tx: Sender<Event>) {
    thread::spawn(move || {
        loop {
            thread::sleep(interval);
            let playing = view.lock().map(|v| v.playing).unwrap_or(false);
            let event = if playing {
                match poller.query() {
                    Ok(status) => Event::Status(status),
                    Err(e) => {
                        // Transient failure: skip this cycle, poll again.
                        log::warn!("status poll failed: {e:#}");
                        continue;
                    }
                }
            } else {
                Event::IdleTick
            };
            if tx.send(event).is_err() {
                return;
            }
        }
    });
}
