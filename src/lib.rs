//! Weather station firmware library.
//!
//! Everything except `hardware` is plain `embedded-hal` code and builds on
//! the host, so `cargo test` exercises the screen state machine, gesture
//! detection, rendering and device drivers without a board. The ESP32-S3
//! bring-up and the binaries need the `embedded` feature.

#![cfg_attr(not(test), no_std)]

pub mod config;
pub mod display;
pub mod environment;
pub mod input;
pub mod led_bar;
pub mod logic;
pub mod model;
pub mod render;
pub mod screen;
pub mod sensors;
pub mod si1145;
pub mod traits;

#[cfg(feature = "embedded")]
pub mod hardware;

#[cfg(test)]
mod mock;
