//! Hardware abstraction traits

/// Temperature, humidity and pressure sensor
pub trait EnvironmentSensor {
    /// Initialize the sensor
    fn init(&mut self) -> Result<(), &'static str>;

    /// Take a measurement and return its temperature in Celsius
    fn read_temperature(&mut self) -> f32;

    /// Relative humidity in percent, from the latest measurement
    fn read_humidity(&mut self) -> f32;

    /// Pressure in Pascal, from the latest measurement
    fn read_pressure(&mut self) -> f32;
}

/// UV / visible / infrared light sensor
pub trait LightSensor {
    /// Initialize the sensor
    fn init(&mut self) -> Result<(), &'static str>;

    /// Raw UV reading, 100 × UV index
    fn read_uv_raw(&mut self) -> u16;

    fn read_visible(&mut self) -> u16;

    fn read_infrared(&mut self) -> u16;
}

/// Character display addressed by (column, row)
pub trait TextDisplay {
    /// Initialize the display
    fn init(&mut self) -> Result<(), &'static str>;

    /// Move the write position
    fn set_cursor(&mut self, col: u8, row: u8);

    /// Write text at the current position, advancing it
    fn print(&mut self, text: &str);

    /// Set the backlight colour (no-op on displays without one)
    fn set_backlight(&mut self, r: u8, g: u8, b: u8);

    /// Push buffered writes to the panel
    fn update(&mut self) {}
}

/// Segmented level indicator
pub trait BarGraph {
    /// Show `level` on a 0..=10 scale. The device decides how out-of-range
    /// levels look.
    fn set_level(&mut self, level: f32);
}

/// Source of button gestures, polled once per loop iteration
pub trait GestureInput {
    fn poll(&mut self, now_ms: u64) -> Option<crate::screen::Gesture>;
}
