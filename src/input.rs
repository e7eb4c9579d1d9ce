//! Manual input: the digital pin boundary and the debouncers that turn
//! raw samples into clean rotation and button events.

mod debounce;
mod pins;

pub use debounce::{ButtonDebouncer, RotaryDecoder};
pub use pins::{Pins, SysfsPins, read_code};

#[cfg(test)]
mod mock;
#[cfg(test)]
pub use mock::MockPins;
