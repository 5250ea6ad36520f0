use esp_hal::gpio::AnyPin;
use esp_hal::{
    delay::Delay,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    i2c::master::{Config as I2cConfig, I2c},
    peripherals::I2C0,
    time::Rate,
};

use crate::config::I2C_FREQ_KHZ;
use crate::led_bar::LedBar;

pub type StationI2c<'a> = I2c<'a, esp_hal::Blocking>;

pub type StationLedBar<'a> = LedBar<Output<'a>, Output<'a>, Delay>;

/// Board resources used by the station: one I2C bus shared by every
/// sensor and the display, the push-button, and the LED bar's two wires.
pub struct StationHardware<'a> {
    pub i2c: StationI2c<'a>,
    pub button: Input<'a>,
    pub led_bar: StationLedBar<'a>,
}

impl<'a> StationHardware<'a> {
    pub fn new<SDA, SCL, BTN, CLK, DAT>(
        i2c_periph: I2C0<'a>,
        sda: SDA,
        scl: SCL,
        button_gpio: BTN,
        bar_clock_gpio: CLK,
        bar_data_gpio: DAT,
    ) -> Result<Self, &'static str>
    where
        SDA: Into<AnyPin<'a>>,
        SCL: Into<AnyPin<'a>>,
        BTN: Into<AnyPin<'a>>,
        CLK: Into<AnyPin<'a>>,
        DAT: Into<AnyPin<'a>>,
    {
        let i2c = station_i2c(i2c_periph, sda, scl)?;

        let button = Input::new(
            button_gpio.into(),
            InputConfig::default().with_pull(Pull::Up),
        );

        let clock = Output::new(bar_clock_gpio.into(), Level::Low, OutputConfig::default());
        let data = Output::new(bar_data_gpio.into(), Level::Low, OutputConfig::default());
        let led_bar = LedBar::new(clock, data, Delay::new());

        Ok(Self {
            i2c,
            button,
            led_bar,
        })
    }
}

/// Configure the shared I2C bus.
pub fn station_i2c<'a, SDA, SCL>(
    i2c_periph: I2C0<'a>,
    sda: SDA,
    scl: SCL,
) -> Result<StationI2c<'a>, &'static str>
where
    SDA: Into<AnyPin<'a>>,
    SCL: Into<AnyPin<'a>>,
{
    let i2c = I2c::new(
        i2c_periph,
        I2cConfig::default().with_frequency(Rate::from_khz(I2C_FREQ_KHZ)),
    )
    .map_err(|_| "Invalid I2C configuration")?
    .with_sda(sda.into())
    .with_scl(scl.into());

    Ok(i2c)
}

/// Probe every 7-bit address and report the ones that ACK.
pub fn scan(i2c: &mut StationI2c<'_>, mut found: impl FnMut(u8)) {
    for address in 0x03..0x78 {
        if i2c.write(address, &[]).is_ok() {
            found(address);
        }
    }
}
