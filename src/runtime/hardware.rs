//! The pin sampling thread and the auxiliary power switch.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;

use crate::config::InputSettings;
use crate::input::{ButtonDebouncer, Pins, RotaryDecoder, read_code};

use super::Event;

/// Output pins driving auxiliary hardware (display backlight,
/// amplifier). All pins switch together.
pub struct PowerSwitch<P: Pins> {
    pins: P,
    outputs: Vec<u8>,
}

impl<P: Pins> PowerSwitch<P> {
    /// Configure the pins and power everything up.
    pub fn new(mut pins: P, outputs: &[u8]) -> Result<Self> {
        for &pin in outputs {
            pins.setup_output(pin)?;
        }
        let mut switch = Self {
            pins,
            outputs: outputs.to_vec(),
        };
        switch.set(true)?;
        Ok(switch)
    }

    pub fn set(&mut self, on: bool) -> Result<()> {
        for &pin in &self.outputs {
            self.pins.write(pin, on)?;
        }
        Ok(())
    }
}

/// Configure the input pins and start the sampling thread: the rotary
/// code and the button level are read every sample interval and turned
/// into events by the decoders.
pub fn spawn<P>(mut pins: P, cfg: InputSettings, tx: Sender<Event>) -> Result<()>
where
    P: Pins + Send + 'static,
{
    for &pin in &cfg.rotary_pins {
        pins.setup_input(pin)?;
    }
    pins.setup_input(cfg.button_pin)?;

    thread::spawn(move || {
        let mut decoder = RotaryDecoder::new(cfg.rotary_pins.len() as u32);
        let mut button = ButtonDebouncer::new(Duration::from_millis(cfg.debounce_ms));
        loop {
            thread::sleep(Duration::from_millis(cfg.sample_interval_ms));

            match read_code(&mut pins, &cfg.rotary_pins) {
                Ok(code) => {
                    let delta = decoder.update(code);
                    if delta != 0 && tx.send(Event::Rotate(delta)).is_err() {
                        return;
                    }
                }
                Err(e) => log::debug!("rotary read failed: {e:#}"),
            }

            match pins.read(cfg.button_pin) {
                Ok(level) => {
                    if button.update(level, Instant::now()) && tx.send(Event::Button).is_err() {
                        return;
                    }
                }
                Err(e) => log::debug!("button read failed: {e:#}"),
            }
        }
    });
    Ok(())
}
