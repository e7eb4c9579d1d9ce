use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

/// Digital pin I/O boundary. The controller only ever needs per-pin
/// setup, reads and writes; the electrical details live behind this
/// trait so tests can substitute a mock.
pub trait Pins {
    /// Export the pin and configure it as an input.
    fn setup_input(&mut self, pin: u8) -> Result<()>;
    /// Export the pin and configure it as an output.
    fn setup_output(&mut self, pin: u8) -> Result<()>;
    fn read(&mut self, pin: u8) -> Result<bool>;
    fn write(&mut self, pin: u8, level: bool) -> Result<()>;
}

/// Pin driver over the kernel's `/sys/class/gpio` interface.
#[derive(Clone)]
pub struct SysfsPins {
    base: PathBuf,
}

impl SysfsPins {
    pub fn new() -> Self {
        Self {
            base: PathBuf::from("/sys/class/gpio"),
        }
    }

    fn export(&self, pin: u8) -> Result<()> {
        if self.base.join(format!("gpio{pin}")).exists() {
            return Ok(());
        }
        fs::write(self.base.join("export"), pin.to_string())
            .with_context(|| format!("failed to export gpio pin {pin}"))
    }

    fn set_direction(&self, pin: u8, direction: &str) -> Result<()> {
        fs::write(self.base.join(format!("gpio{pin}/direction")), direction)
            .with_context(|| format!("failed to set gpio pin {pin} direction to {direction}"))
    }

    fn value_path(&self, pin: u8) -> PathBuf {
        self.base.join(format!("gpio{pin}/value"))
    }
}

impl Default for SysfsPins {
    fn default() -> Self {
        Self::new()
    }
}

impl Pins for SysfsPins {
    fn setup_input(&mut self, pin: u8) -> Result<()> {
        self.export(pin)?;
        self.set_direction(pin, "in")
    }

    fn setup_output(&mut self, pin: u8) -> Result<()> {
        self.export(pin)?;
        self.set_direction(pin, "out")
    }

    fn read(&mut self, pin: u8) -> Result<bool> {
        let value = fs::read_to_string(self.value_path(pin))
            .with_context(|| format!("failed to read gpio pin {pin}"))?;
        Ok(value.trim() == "1")
    }

    fn write(&mut self, pin: u8, level: bool) -> Result<()> {
        fs::write(self.value_path(pin), if level { "1" } else { "0" })
            .with_context(|| format!("failed to write gpio pin {pin}"))
    }
}

/// Assemble the rotary position code from the rotary pins, pin `i`
/// contributing bit `i`.
pub fn read_code(pins: &mut dyn Pins, rotary: &[u8]) -> Result<u8> {
    let mut code = 0u8;
    for (i, &pin) in rotary.iter().enumerate() {
        if pins.read(pin)? {
            code |= 1 << i;
        }
    }
    Ok(code)
}
