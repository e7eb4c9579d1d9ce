//! Application module: the playback controller state machine.
//!
//! The `App` model owns the catalog and the current playback session,
//! and turns knob/button events and status polls into player commands.

mod model;

pub use model::*;
