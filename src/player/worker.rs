use std::process::Command;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;

use super::command::PlayerCmd;

/// Producer handle for the single-consumer command queue.
///
/// Every command sent through a link reaches the player binary in
/// submission order; the worker runs them one at a time. Enqueueing
/// never blocks on execution, and no result flows back: a stuck or
/// erroring player surfaces through the next status poll instead.
#[derive(Clone)]
pub struct PlayerLink {
    tx: Sender<PlayerCmd>,
}

impl PlayerLink {
    /// A link plus the receiving end of its queue, with no worker
    /// attached. Used by [`PlayerLink::spawn`] and by tests asserting on
    /// emitted commands.
    pub fn pair() -> (Self, Receiver<PlayerCmd>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx }, rx)
    }

    /// Spawn the worker thread draining the queue against `program`.
    pub fn spawn(program: &str) -> Self {
        let (link, rx) = Self::pair();
        let program = program.to_string();
        thread::spawn(move || {
            while let Ok(cmd) = rx.recv() {
                run_command(&program, &cmd);
            }
        });
        link
    }

    /// Enqueue a command, fire and forget.
    pub fn send(&self, cmd: PlayerCmd) {
        if self.tx.send(cmd).is_err() {
            log::warn!("player worker is gone, dropping command");
        }
    }
}

fn run_command(program: &str, cmd: &PlayerCmd) {
    log::debug!("{program}: {cmd:?}");
    match Command::new(program).args(cmd.to_args()).status() {
        Ok(status) if status.success() => {}
        Ok(status) => log::warn!("{program} exited with {status} for {cmd:?}"),
        Err(e) => log::warn!("failed to run {program}: {e}"),
    }
}

/// Start the player's background server once at startup. Failure is
/// logged and otherwise ignored; an already-running server is fine.
pub fn start_server(program: &str) {
    if let Err(e) = Command::new(program).arg("--server").status() {
        log::warn!("failed to start {program} server: {e}");
    }
}
