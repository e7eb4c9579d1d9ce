use std::time::{Duration, Instant};

/// Decodes a multi-bit cyclic position code into signed rotation steps.
///
/// The knob publishes an n-bit code in a space of `2^n` positions. Each
/// sample is compared against the previous one and the minimal-magnitude
/// signed distance wins; an exact tie goes right.
pub struct RotaryDecoder {
    steps: i32,
    prev: Option<u8>,
}

impl RotaryDecoder {
    pub fn new(bits: u32) -> Self {
        Self {
            steps: 1i32 << bits,
            prev: None,
        }
    }

    /// Feed one sample; returns the signed rotation since the last one.
    /// The very first sample only establishes position.
    pub fn update(&mut self, code: u8) -> i32 {
        let prev = match self.prev.replace(code) {
            Some(p) => i32::from(p),
            None => return 0,
        };
        let code = i32::from(code);
        if code == prev {
            return 0;
        }
        let forward = (code - prev).rem_euclid(self.steps);
        let backward = (prev - code).rem_euclid(self.steps);
        if backward < forward { -backward } else { forward }
    }
}

/// Edge-triggered button with a minimum interval between reported
/// presses. A held button never repeats.
pub struct ButtonDebouncer {
    window: Duration,
    was_high: bool,
    last_press: Option<Instant>,
}

impl ButtonDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            was_high: false,
            last_press: None,
        }
    }

    /// Feed one sample; true exactly when a debounced press fires.
    pub fn update(&mut self, level: bool, now: Instant) -> bool {
        let rising = level && !self.was_high;
        self.was_high = level;
        if !rising {
            return false;
        }
        if let Some(last) = self.last_press {
            if now.duration_since(last) < self.window {
                return false;
            }
        }
        self.last_press = Some(now);
        true
    }
}
