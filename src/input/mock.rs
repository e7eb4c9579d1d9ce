//! In-memory pin fake for tests. Clones share one recording, so a test
//! can keep a handle while a driver owns another.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use super::Pins;

#[derive(Default)]
struct MockState {
    levels: HashMap<u8, bool>,
    inputs: Vec<u8>,
    outputs: Vec<u8>,
    writes: Vec<(u8, bool)>,
}

#[derive(Clone, Default)]
pub struct MockPins {
    state: Arc<Mutex<MockState>>,
}

impl MockPins {
    pub fn set_level(&self, pin: u8, level: bool) {
        self.state.lock().unwrap().levels.insert(pin, level);
    }

    /// Pins configured as inputs, in setup order.
    pub fn inputs(&self) -> Vec<u8> {
        self.state.lock().unwrap().inputs.clone()
    }

    /// Pins configured as outputs, in setup order.
    pub fn outputs(&self) -> Vec<u8> {
        self.state.lock().unwrap().outputs.clone()
    }

    /// Every `(pin, level)` write, in order.
    pub fn writes(&self) -> Vec<(u8, bool)> {
        self.state.lock().unwrap().writes.clone()
    }
}

impl Pins for MockPins {
    fn setup_input(&mut self, pin: u8) -> Result<()> {
        self.state.lock().unwrap().inputs.push(pin);
        Ok(())
    }

    fn setup_output(&mut self, pin: u8) -> Result<()> {
        self.state.lock().unwrap().outputs.push(pin);
        Ok(())
    }

    fn read(&mut self, pin: u8) -> Result<bool> {
        Ok(*self.state.lock().unwrap().levels.get(&pin).unwrap_or(&false))
    }

    fn write(&mut self, pin: u8, level: bool) -> Result<()> {
        self.state.lock().unwrap().writes.push((pin, level));
        Ok(())
    }
}
