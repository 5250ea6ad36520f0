//! Sensor gateway: the environmental sensor plus the sunlight sensor,
//! exposing readings in display units.

use embedded_hal::delay::DelayNs;

use crate::config::LIGHT_SENSOR_RETRY_MS;
use crate::model::{Quantity, Readings, celsius_to_fahrenheit, uv_index_from_raw};
use crate::traits::{EnvironmentSensor, LightSensor};

pub struct SensorGateway<E, L> {
    environment: E,
    light: L,
}

impl<E: EnvironmentSensor, L: LightSensor> SensorGateway<E, L> {
    pub fn new(environment: E, light: L) -> Self {
        Self { environment, light }
    }

    /// Bring up both sensors.
    ///
    /// Blocks until the sunlight sensor answers, retrying forever. A failed
    /// environmental sensor is only reported; its reads will be garbage.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        while self.light.init().is_err() {
            log::error!("Sunlight Error");
            delay.delay_ms(LIGHT_SENSOR_RETRY_MS);
        }

        if self.environment.init().is_err() {
            log::error!("BME Error");
        }
    }

    pub fn read_temperature_f(&mut self) -> f32 {
        celsius_to_fahrenheit(self.environment.read_temperature())
    }

    pub fn read_humidity(&mut self) -> f32 {
        self.environment.read_humidity()
    }

    pub fn read_pressure(&mut self) -> f32 {
        self.environment.read_pressure()
    }

    pub fn read_uv_index(&mut self) -> f32 {
        uv_index_from_raw(self.light.read_uv_raw())
    }

    pub fn read_visible(&mut self) -> f32 {
        f32::from(self.light.read_visible())
    }

    pub fn read_infrared(&mut self) -> f32 {
        f32::from(self.light.read_infrared())
    }

    /// Readings that use `temperature_f` for temperature and read
    /// everything else on demand.
    pub fn with_cached_temperature(&mut self, temperature_f: f32) -> CachedTemperature<'_, E, L> {
        CachedTemperature {
            sensors: self,
            temperature_f,
        }
    }

    pub fn environment(&self) -> &E {
        &self.environment
    }

    pub fn release(self) -> (E, L) {
        (self.environment, self.light)
    }
}

pub struct CachedTemperature<'a, E, L> {
    sensors: &'a mut SensorGateway<E, L>,
    temperature_f: f32,
}

impl<E: EnvironmentSensor, L: LightSensor> Readings for CachedTemperature<'_, E, L> {
    fn value(&mut self, quantity: Quantity) -> f32 {
        match quantity {
            Quantity::Temperature => self.temperature_f,
            Quantity::Humidity => self.sensors.read_humidity(),
            Quantity::Pressure => self.sensors.read_pressure(),
            Quantity::UvIndex => self.sensors.read_uv_index(),
            Quantity::Visible => self.sensors.read_visible(),
            Quantity::Infrared => self.sensors.read_infrared(),
        }
    }
}
