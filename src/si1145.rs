//! SI1145 UV / visible / IR light sensor (Grove Sunlight sensor).

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;

use crate::config::SI1145_ADDRESS;
use crate::traits::LightSensor;

const PART_ID: u8 = 0x45;

// Registers
const REG_PART_ID: u8 = 0x00;
const REG_INT_CFG: u8 = 0x03;
const REG_IRQ_ENABLE: u8 = 0x04;
const REG_IRQ_MODE1: u8 = 0x05;
const REG_IRQ_MODE2: u8 = 0x06;
const REG_HW_KEY: u8 = 0x07;
const REG_MEAS_RATE0: u8 = 0x08;
const REG_MEAS_RATE1: u8 = 0x09;
const REG_UCOEF0: u8 = 0x13;
const REG_PARAM_WR: u8 = 0x17;
const REG_COMMAND: u8 = 0x18;
const REG_IRQ_STATUS: u8 = 0x21;
const REG_VIS_DATA0: u8 = 0x22;
const REG_IR_DATA0: u8 = 0x24;
const REG_UV_INDEX0: u8 = 0x2C;
const REG_PARAM_RD: u8 = 0x2E;

// Commands
const CMD_RESET: u8 = 0x01;
const CMD_ALS_AUTO: u8 = 0x0E;
const CMD_PARAM_SET: u8 = 0xA0;

// Parameter RAM
const PARAM_CHLIST: u8 = 0x01;
const PARAM_ALS_VIS_ADC_COUNTER: u8 = 0x10;
const PARAM_ALS_VIS_ADC_GAIN: u8 = 0x11;
const PARAM_ALS_VIS_ADC_MISC: u8 = 0x12;
const PARAM_ALS_IR_ADC_COUNTER: u8 = 0x1D;
const PARAM_ALS_IR_ADC_GAIN: u8 = 0x1E;
const PARAM_ALS_IR_ADC_MISC: u8 = 0x1F;
const PARAM_ALS_IR_ADC_MUX: u8 = 0x0E;

const CHLIST_EN_UV: u8 = 0x80;
const CHLIST_EN_ALS_IR: u8 = 0x20;
const CHLIST_EN_ALS_VIS: u8 = 0x10;

const HW_KEY: u8 = 0x17;
const ADC_COUNTER_511_CLK: u8 = 0x70;
const ADC_MUX_SMALL_IR: u8 = 0x00;
const ADC_MISC_HIGH_RANGE: u8 = 0x20;

/// UV coefficients for the bare (uncovered) sensor.
const UV_COEFFICIENTS: [u8; 4] = [0x29, 0x89, 0x02, 0x00];

pub struct Si1145<I, D> {
    i2c: I,
    delay: D,
    address: u8,
}

impl<I: I2c, D: DelayNs> Si1145<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self {
            i2c,
            delay,
            address: SI1145_ADDRESS,
        }
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), &'static str> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|_| "SI1145 write failed")
    }

    fn read_register(&mut self, register: u8) -> Result<u8, &'static str> {
        let mut value = [0u8; 1];
        self.i2c
            .write_read(self.address, &[register], &mut value)
            .map_err(|_| "SI1145 read failed")?;
        Ok(value[0])
    }

    fn read_u16(&mut self, register: u8) -> Result<u16, &'static str> {
        let mut buf = [0u8; 2];
        self.i2c
            .write_read(self.address, &[register], &mut buf)
            .map_err(|_| "SI1145 read failed")?;
        Ok(u16::from_le_bytes(buf))
    }

    /// Write a parameter RAM location; returns the read-back value.
    fn set_param(&mut self, param: u8, value: u8) -> Result<u8, &'static str> {
        self.write_register(REG_PARAM_WR, value)?;
        self.write_register(REG_COMMAND, CMD_PARAM_SET | param)?;
        self.read_register(REG_PARAM_RD)
    }

    pub fn read_part_id(&mut self) -> Result<u8, &'static str> {
        self.read_register(REG_PART_ID)
    }

    fn reset(&mut self) -> Result<(), &'static str> {
        self.write_register(REG_MEAS_RATE0, 0)?;
        self.write_register(REG_MEAS_RATE1, 0)?;
        self.write_register(REG_IRQ_ENABLE, 0)?;
        self.write_register(REG_IRQ_MODE1, 0)?;
        self.write_register(REG_IRQ_MODE2, 0)?;
        self.write_register(REG_INT_CFG, 0)?;
        self.write_register(REG_IRQ_STATUS, 0xFF)?;

        self.write_register(REG_COMMAND, CMD_RESET)?;
        self.delay.delay_ms(10);
        self.write_register(REG_HW_KEY, HW_KEY)?;
        self.delay.delay_ms(10);
        Ok(())
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c, D: DelayNs> LightSensor for Si1145<I, D> {
    fn init(&mut self) -> Result<(), &'static str> {
        if self.read_part_id()? != PART_ID {
            return Err("SI1145 not found");
        }

        self.reset()?;

        for (i, coefficient) in UV_COEFFICIENTS.iter().enumerate() {
            self.write_register(REG_UCOEF0 + i as u8, *coefficient)?;
        }

        self.set_param(PARAM_CHLIST, CHLIST_EN_UV | CHLIST_EN_ALS_IR | CHLIST_EN_ALS_VIS)?;

        self.set_param(PARAM_ALS_IR_ADC_MUX, ADC_MUX_SMALL_IR)?;
        self.set_param(PARAM_ALS_IR_ADC_GAIN, 0)?;
        self.set_param(PARAM_ALS_IR_ADC_COUNTER, ADC_COUNTER_511_CLK)?;
        self.set_param(PARAM_ALS_IR_ADC_MISC, ADC_MISC_HIGH_RANGE)?;

        self.set_param(PARAM_ALS_VIS_ADC_GAIN, 0)?;
        self.set_param(PARAM_ALS_VIS_ADC_COUNTER, ADC_COUNTER_511_CLK)?;
        self.set_param(PARAM_ALS_VIS_ADC_MISC, ADC_MISC_HIGH_RANGE)?;

        // Measure every 255 × 31.25 µs and keep running.
        self.write_register(REG_MEAS_RATE0, 0xFF)?;
        self.write_register(REG_COMMAND, CMD_ALS_AUTO)?;

        log::debug!("[SI1145] Initialized");
        Ok(())
    }

    fn read_uv_raw(&mut self) -> u16 {
        self.read_u16(REG_UV_INDEX0).unwrap_or(0)
    }

    fn read_visible(&mut self) -> u16 {
        self.read_u16(REG_VIS_DATA0).unwrap_or(0)
    }

    fn read_infrared(&mut self) -> u16 {
        self.read_u16(REG_IR_DATA0).unwrap_or(0)
    }
}
