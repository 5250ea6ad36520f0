//! Recording doubles for host tests.

use core::convert::Infallible;
use std::collections::VecDeque;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType as PinErrorType, OutputPin};
use embedded_hal::i2c::{self, ErrorKind, ErrorType as I2cErrorType, I2c, Operation};

use crate::traits::{BarGraph, EnvironmentSensor, LightSensor, TextDisplay};

#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    Cursor(u8, u8),
    Print(String),
    Backlight(u8, u8, u8),
}

/// 16×2 character grid that also logs every call.
pub struct MockDisplay {
    grid: [[u8; 16]; 2],
    col: usize,
    row: usize,
    ops: Vec<Op>,
    pub init_calls: usize,
    /// Completed renders.
    pub updates: usize,
}

impl MockDisplay {
    pub fn new() -> Self {
        Self {
            grid: [[b' '; 16]; 2],
            col: 0,
            row: 0,
            ops: Vec::new(),
            init_calls: 0,
            updates: 0,
        }
    }

    pub fn line(&self, row: usize) -> String {
        String::from_utf8_lossy(&self.grid[row]).into_owned()
    }

    pub fn grid(&self) -> [[u8; 16]; 2] {
        self.grid
    }

    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<Op> {
        core::mem::take(&mut self.ops)
    }
}

impl TextDisplay for MockDisplay {
    fn init(&mut self) -> Result<(), &'static str> {
        self.init_calls += 1;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = usize::from(col);
        self.row = usize::from(row);
        self.ops.push(Op::Cursor(col, row));
    }

    fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            if self.col < 16 && self.row < 2 {
                self.grid[self.row][self.col] = byte;
            }
            self.col += 1;
        }
        self.ops.push(Op::Print(text.into()));
    }

    fn set_backlight(&mut self, r: u8, g: u8, b: u8) {
        self.ops.push(Op::Backlight(r, g, b));
    }

    fn update(&mut self) {
        self.updates += 1;
    }
}

#[derive(Default)]
pub struct MockBar {
    pub levels: Vec<f32>,
}

impl BarGraph for MockBar {
    fn set_level(&mut self, level: f32) {
        self.levels.push(level);
    }
}

/// Environmental sensor with fixed readings.
#[derive(Default)]
pub struct MockEnvironment {
    pub fail_init: bool,
    pub celsius: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub temperature_reads: usize,
}

impl EnvironmentSensor for MockEnvironment {
    fn init(&mut self) -> Result<(), &'static str> {
        if self.fail_init {
            Err("no bme")
        } else {
            Ok(())
        }
    }

    fn read_temperature(&mut self) -> f32 {
        self.temperature_reads += 1;
        self.celsius
    }

    fn read_humidity(&mut self) -> f32 {
        self.humidity
    }

    fn read_pressure(&mut self) -> f32 {
        self.pressure
    }
}

/// Light sensor that fails `failures` init attempts before succeeding.
#[derive(Default)]
pub struct MockLight {
    pub failures: usize,
    pub init_attempts: usize,
    pub uv_raw: u16,
    pub visible: u16,
    pub infrared: u16,
}

impl LightSensor for MockLight {
    fn init(&mut self) -> Result<(), &'static str> {
        self.init_attempts += 1;
        if self.init_attempts <= self.failures {
            Err("no si1145")
        } else {
            Ok(())
        }
    }

    fn read_uv_raw(&mut self) -> u16 {
        self.uv_raw
    }

    fn read_visible(&mut self) -> u16 {
        self.visible
    }

    fn read_infrared(&mut self) -> u16 {
        self.infrared
    }
}

#[derive(Default)]
pub struct MockDelay {
    pub total_ns: u64,
}

impl MockDelay {
    pub fn total_ms(&self) -> u64 {
        self.total_ns / 1_000_000
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns += u64::from(ns);
    }
}

/// I2C bus that records writes and answers reads from a queue.
#[derive(Default)]
pub struct MockI2c {
    pub writes: Vec<(u8, Vec<u8>)>,
    pub reads: VecDeque<Vec<u8>>,
    pub fail: bool,
}

impl MockI2c {
    pub fn with_reads(reads: &[&[u8]]) -> Self {
        Self {
            reads: reads.iter().map(|r| r.to_vec()).collect(),
            ..Self::default()
        }
    }

    /// Writes sent to `address`, in order.
    pub fn writes_to(&self, address: u8) -> Vec<Vec<u8>> {
        self.writes
            .iter()
            .filter(|(a, _)| *a == address)
            .map(|(_, w)| w.clone())
            .collect()
    }
}

#[derive(Debug)]
pub struct MockI2cError;

impl i2c::Error for MockI2cError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

impl I2cErrorType for MockI2c {
    type Error = MockI2cError;
}

impl I2c for MockI2c {
    fn transaction(
        &mut self,
        address: u8,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        if self.fail {
            return Err(MockI2cError);
        }
        for op in operations {
            match op {
                Operation::Write(bytes) => self.writes.push((address, bytes.to_vec())),
                Operation::Read(buf) => {
                    let data = self.reads.pop_front().unwrap_or_default();
                    for (i, b) in buf.iter_mut().enumerate() {
                        *b = data.get(i).copied().unwrap_or(0);
                    }
                }
            }
        }
        Ok(())
    }
}

/// Output pin that logs every level it is driven to.
#[derive(Default)]
pub struct MockPin {
    pub levels: Vec<bool>,
}

impl PinErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.levels.push(true);
        Ok(())
    }
}
