//! The external player boundary: a command queue drained by one worker
//! thread, and the status poller that reads playback state back.

mod command;
mod status;
mod worker;

pub use command::PlayerCmd;
pub use status::{PlayerStatus, StatusPoller, parse_status};
pub use worker::{PlayerLink, start_server};
