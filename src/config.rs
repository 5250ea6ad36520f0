//! Station-wide constants.
//!
//! Pin assignments, bus addresses, timings and screen layout live here so
//! they can be tuned in one place.

// Timing

/// Main loop pacing (ms).
pub const LOOP_INTERVAL_MS: u64 = 50;

/// Delay between attempts to bring up the sunlight sensor (ms).
pub const LIGHT_SENSOR_RETRY_MS: u32 = 1_000;

/// Button contact bounce window (ms).
pub const DEBOUNCE_MS: u64 = 50;

/// Idle time after a release before a lone click is reported (ms).
pub const CLICK_MS: u64 = 400;

/// Hold time before a press becomes a long press (ms).
pub const LONG_PRESS_MS: u64 = 800;

/// Auto-advance cadence while the button stays held (ms).
pub const LONG_PRESS_REPEAT_MS: u64 = 750;

// Bar graph

/// Temperature (°F) shown as an empty bar.
pub const BAR_TEMP_MIN_F: f32 = 55.0;

/// Temperature (°F) shown as a full bar.
pub const BAR_TEMP_MAX_F: f32 = 85.0;

pub const BAR_LEVEL_MIN: f32 = 0.0;
pub const BAR_LEVEL_MAX: f32 = 10.0;

/// Number of lit segments on the bar.
pub const BAR_SEGMENTS: usize = 10;

// Display

pub const DISPLAY_COLUMNS: u8 = 16;
pub const DISPLAY_ROWS: u8 = 2;

/// Backlight colour, set once at startup.
pub const BACKLIGHT_RGB: (u8, u8, u8) = (0, 96, 255);

// I2C
//
// All devices share one bus:
//
//   SDA          → GPIO8
//   SCL          → GPIO9
//   Button       → GPIO12 (active-low, internal pull-up)
//   LED bar CLK  → GPIO4
//   LED bar DATA → GPIO5

pub const I2C_FREQ_KHZ: u32 = 100;

pub const SI1145_ADDRESS: u8 = 0x60;
pub const BME280_ADDRESS: u8 = 0x76;
pub const LCD_ADDRESS: u8 = 0x3E;
pub const LCD_RGB_ADDRESS: u8 = 0x62;
pub const OLED_ADDRESS: u8 = 0x3C;
