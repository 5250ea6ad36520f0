// Model of the data read in this app

/// One of the six measured quantities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    Temperature,
    Humidity,
    Pressure,
    UvIndex,
    Visible,
    Infrared,
}

/// Something that can produce a value for every quantity.
pub trait Readings {
    fn value(&mut self, quantity: Quantity) -> f32;
}

/// The six readings at one point in time.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SensorSnapshot {
    pub temperature_f: f32,
    pub humidity: f32,
    pub pressure: f32,
    pub uv_index: f32,
    pub visible: f32,
    pub infrared: f32,
}

impl Readings for SensorSnapshot {
    fn value(&mut self, quantity: Quantity) -> f32 {
        match quantity {
            Quantity::Temperature => self.temperature_f,
            Quantity::Humidity => self.humidity,
            Quantity::Pressure => self.pressure,
            Quantity::UvIndex => self.uv_index,
            Quantity::Visible => self.visible,
            Quantity::Infrared => self.infrared,
        }
    }
}

pub fn celsius_to_fahrenheit(celsius: f32) -> f32 {
    celsius * 1.8 + 32.0
}

/// The SI1145 reports UV index scaled by 100.
pub fn uv_index_from_raw(raw: u16) -> f32 {
    raw as f32 / 100.0
}
