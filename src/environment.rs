//! BME280 temperature / humidity / pressure sensor.

use bme280::i2c::BME280;
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::traits::EnvironmentSensor;

/// One forced-mode conversion of all three channels.
#[derive(Debug, Clone, Copy)]
struct Sample {
    temperature: f32,
    humidity: f32,
    pressure: f32,
}

impl Sample {
    const FAILED: Sample = Sample {
        temperature: f32::NAN,
        humidity: f32::NAN,
        pressure: f32::NAN,
    };
}

/// Forced-mode BME280 on the primary address (0x76).
///
/// A conversion blocks for about 40 ms, so only `read_temperature` starts
/// one. Humidity and pressure come from the latest conversion, which the
/// main loop refreshes once per iteration. A failed conversion reads as NaN.
pub struct Bme280Sensor<I, D> {
    bme: BME280<I>,
    delay: D,
    latest: Option<Sample>,
}

impl<I: I2c, D: DelayNs> Bme280Sensor<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            bme: BME280::new_primary(i2c),
            delay,
            latest: None,
        }
    }

    fn sample(&mut self) -> Sample {
        let sample = self
            .bme
            .measure(&mut self.delay)
            .map(|m| Sample {
                temperature: m.temperature,
                humidity: m.humidity,
                pressure: m.pressure,
            })
            .unwrap_or(Sample::FAILED);
        self.latest = Some(sample);
        sample
    }

    fn latest(&mut self) -> Sample {
        match self.latest {
            Some(sample) => sample,
            None => self.sample(),
        }
    }
}

impl<I: I2c, D: DelayNs> EnvironmentSensor for Bme280Sensor<I, D> {
    fn init(&mut self) -> Result<(), &'static str> {
        self.bme
            .init(&mut self.delay)
            .map_err(|_| "BME280 init failed")?;
        log::debug!("[BME280] Initialized");
        Ok(())
    }

    fn read_temperature(&mut self) -> f32 {
        self.sample().temperature
    }

    fn read_humidity(&mut self) -> f32 {
        self.latest().humidity
    }

    fn read_pressure(&mut self) -> f32 {
        self.latest().pressure
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{MockDelay, MockI2c};

    fn dead_bus() -> MockI2c {
        MockI2c {
            fail: true,
            ..MockI2c::default()
        }
    }

    #[test]
    fn missing_sensor_fails_init() {
        let mut sensor = Bme280Sensor::new(dead_bus(), MockDelay::default());
        assert_eq!(sensor.init(), Err("BME280 init failed"));
    }

    #[test]
    fn missing_sensor_reads_nan() {
        let mut sensor = Bme280Sensor::new(dead_bus(), MockDelay::default());
        assert!(sensor.read_temperature().is_nan());
        assert!(sensor.read_humidity().is_nan());
        assert!(sensor.read_pressure().is_nan());
    }

    #[test]
    fn one_conversion_serves_all_three_channels() {
        let mut delay = MockDelay::default();
        let mut sensor = Bme280Sensor::new(MockI2c::default(), &mut delay);
        sensor.read_temperature();
        sensor.read_humidity();
        sensor.read_pressure();
        drop(sensor);
        assert_eq!(delay.total_ms(), 40);
    }

    #[test]
    fn each_temperature_read_starts_a_new_conversion() {
        let mut delay = MockDelay::default();
        let mut sensor = Bme280Sensor::new(MockI2c::default(), &mut delay);
        sensor.read_temperature();
        sensor.read_humidity();
        sensor.read_temperature();
        sensor.read_pressure();
        drop(sensor);
        assert_eq!(delay.total_ms(), 80);
    }

    #[test]
    fn humidity_before_any_temperature_read_converts_once() {
        let mut delay = MockDelay::default();
        let mut sensor = Bme280Sensor::new(MockI2c::default(), &mut delay);
        assert!(sensor.read_humidity().is_nan());
        assert!(sensor.read_pressure().is_nan());
        drop(sensor);
        assert_eq!(delay.total_ms(), 40);
    }
}
