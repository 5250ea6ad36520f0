//! MY9221 LED bar (Grove LED Bar v2).
//!
//! Two-wire shift protocol: a 16-bit command word, then one 16-bit word per
//! channel, MSB first. The clock line toggles once per bit (both edges
//! latch). Four pulses on the data line with the clock idle latch the frame.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;

use crate::config::{BAR_LEVEL_MAX, BAR_LEVEL_MIN, BAR_SEGMENTS};
use crate::traits::BarGraph;

/// 8-bit grayscale, internal oscillator.
const CMD_MODE: u16 = 0x0000;

/// The chip has 12 channels; the bar wires up the first ten.
const CHANNELS: usize = 12;

/// Brightness steps per segment.
const STEPS: f32 = 8.0;

const FULL: u16 = 0x00FF;

pub struct LedBar<C, P, D> {
    clock: C,
    data: P,
    delay: D,
    clock_high: bool,
}

impl<C: OutputPin, P: OutputPin, D: DelayNs> LedBar<C, P, D> {
    pub fn new(clock: C, data: P, delay: D) -> Self {
        let mut bar = Self {
            clock,
            data,
            delay,
            clock_high: false,
        };
        let _ = bar.clock.set_low();
        let _ = bar.data.set_low();
        bar
    }

    fn send_word(&mut self, word: u16) {
        for bit in (0..16).rev() {
            let _ = if (word >> bit) & 1 == 1 {
                self.data.set_high()
            } else {
                self.data.set_low()
            };

            self.clock_high = !self.clock_high;
            let _ = if self.clock_high {
                self.clock.set_high()
            } else {
                self.clock.set_low()
            };
        }
    }

    fn latch(&mut self) {
        let _ = self.data.set_low();
        self.delay.delay_us(10);
        for _ in 0..4 {
            let _ = self.data.set_high();
            let _ = self.data.set_low();
        }
    }

    /// Write raw brightness for each segment.
    pub fn set_segments(&mut self, segments: &[u16; BAR_SEGMENTS]) {
        self.send_word(CMD_MODE);
        for &segment in segments {
            self.send_word(segment);
        }
        for _ in BAR_SEGMENTS..CHANNELS {
            self.send_word(0);
        }
        self.latch();
    }

    pub fn release(self) -> (C, P, D) {
        (self.clock, self.data, self.delay)
    }
}

impl<C: OutputPin, P: OutputPin, D: DelayNs> BarGraph for LedBar<C, P, D> {
    fn set_level(&mut self, level: f32) {
        let segments = segment_levels(level);
        self.set_segments(&segments);
    }
}

/// Per-segment brightness for a 0..=10 level. Out-of-range levels saturate;
/// a fractional segment lights at a proportional brightness step.
pub fn segment_levels(level: f32) -> [u16; BAR_SEGMENTS] {
    let mut remaining = if level.is_nan() {
        0.0
    } else {
        level.clamp(BAR_LEVEL_MIN, BAR_LEVEL_MAX) * STEPS
    };

    let mut segments = [0u16; BAR_SEGMENTS];
    for segment in segments.iter_mut() {
        *segment = if remaining > STEPS {
            FULL
        } else if remaining > 0.0 {
            (1u16 << (remaining as u16)) - 1
        } else {
            0
        };
        remaining -= STEPS;
    }
    segments
}
