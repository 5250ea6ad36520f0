//! Display gateway plus the two supported character displays: the Grove
//! RGB backlight LCD and a 16×2 text grid drawn on an SSD1306 OLED.

use embedded_graphics::{
    mono_font::{MonoTextStyle, ascii::FONT_6X10},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};
use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use ssd1306::{I2CDisplayInterface, Ssd1306, mode::BufferedGraphicsMode, prelude::*};

use crate::config::{BACKLIGHT_RGB, DISPLAY_COLUMNS, DISPLAY_ROWS, LCD_ADDRESS, LCD_RGB_ADDRESS};
use crate::traits::{BarGraph, TextDisplay};

#[derive(Debug, Clone, Copy)]
pub enum DisplayType {
    RgbLcd,
    Ssd1306,
}

/// Text display and bar graph behind one handle.
pub struct DisplayGateway<T, B> {
    text: T,
    graph: B,
}

impl<T: TextDisplay, B: BarGraph> DisplayGateway<T, B> {
    pub fn new(text: T, graph: B) -> Self {
        Self { text, graph }
    }

    /// Initialize the text display and set the fixed backlight colour.
    pub fn init(&mut self) {
        if let Err(e) = self.text.init() {
            log::debug!("[DISPLAY] init failed: {}", e);
        }
        let (r, g, b) = BACKLIGHT_RGB;
        self.text.set_backlight(r, g, b);
    }

    pub fn set_graph_level(&mut self, level: f32) {
        self.graph.set_level(level);
    }

    pub fn text_mut(&mut self) -> &mut T {
        &mut self.text
    }

    pub fn text(&self) -> &T {
        &self.text
    }

    pub fn graph(&self) -> &B {
        &self.graph
    }
}

// HD44780-compatible controller behind the JHD1313 I2C bridge.
const LCD_COMMAND: u8 = 0x80;
const LCD_DATA: u8 = 0x40;

const LCD_CLEAR: u8 = 0x01;
const LCD_ENTRY_MODE: u8 = 0x04;
const LCD_ENTRY_LEFT: u8 = 0x02;
const LCD_DISPLAY_CONTROL: u8 = 0x08;
const LCD_DISPLAY_ON: u8 = 0x04;
const LCD_FUNCTION_SET: u8 = 0x20;
const LCD_TWO_LINE: u8 = 0x08;
const LCD_SET_DDRAM: u8 = 0x80;
const LCD_ROW_OFFSET: [u8; 2] = [0x00, 0x40];

// PCA9633 backlight driver
const RGB_MODE1: u8 = 0x00;
const RGB_MODE2: u8 = 0x01;
const RGB_BLUE: u8 = 0x02;
const RGB_GREEN: u8 = 0x03;
const RGB_RED: u8 = 0x04;
const RGB_OUTPUT: u8 = 0x08;

/// Grove 16×2 LCD with RGB backlight.
pub struct RgbLcd<I, D> {
    i2c: I,
    delay: D,
}

impl<I: I2c, D: DelayNs> RgbLcd<I, D> {
    pub fn new(i2c: I, delay: D) -> Self {
        Self { i2c, delay }
    }

    fn command(&mut self, cmd: u8) -> Result<(), &'static str> {
        self.i2c
            .write(LCD_ADDRESS, &[LCD_COMMAND, cmd])
            .map_err(|_| "LCD write failed")
    }

    fn data(&mut self, byte: u8) -> Result<(), &'static str> {
        self.i2c
            .write(LCD_ADDRESS, &[LCD_DATA, byte])
            .map_err(|_| "LCD write failed")
    }

    fn backlight_register(&mut self, register: u8, value: u8) -> Result<(), &'static str> {
        self.i2c
            .write(LCD_RGB_ADDRESS, &[register, value])
            .map_err(|_| "backlight write failed")
    }

    pub fn clear(&mut self) -> Result<(), &'static str> {
        self.command(LCD_CLEAR)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    pub fn release(self) -> I {
        self.i2c
    }
}

impl<I: I2c, D: DelayNs> TextDisplay for RgbLcd<I, D> {
    fn init(&mut self) -> Result<(), &'static str> {
        // Power-on settle time
        self.delay.delay_ms(50);

        let function = LCD_FUNCTION_SET | LCD_TWO_LINE;
        for wait_us in [4_500, 150, 0] {
            self.command(function)?;
            self.delay.delay_us(wait_us);
        }
        self.command(function)?;

        self.command(LCD_DISPLAY_CONTROL | LCD_DISPLAY_ON)?;
        self.clear()?;
        self.command(LCD_ENTRY_MODE | LCD_ENTRY_LEFT)?;

        self.backlight_register(RGB_MODE1, 0x00)?;
        self.backlight_register(RGB_OUTPUT, 0xFF)?;
        self.backlight_register(RGB_MODE2, 0x20)?;

        log::debug!("[LCD] Initialized");
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        let offset = LCD_ROW_OFFSET[usize::from(row.min(DISPLAY_ROWS - 1))];
        let _ = self.command(LCD_SET_DDRAM | (offset + col.min(DISPLAY_COLUMNS - 1)));
    }

    fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            let _ = self.data(byte);
        }
    }

    fn set_backlight(&mut self, r: u8, g: u8, b: u8) {
        let _ = self.backlight_register(RGB_RED, r);
        let _ = self.backlight_register(RGB_GREEN, g);
        let _ = self.backlight_register(RGB_BLUE, b);
    }
}

const COLUMNS: usize = DISPLAY_COLUMNS as usize;
const ROWS: usize = DISPLAY_ROWS as usize;
const OLED_ROW_HEIGHT: i32 = 16;

type OledDriver<I> =
    Ssd1306<I2CInterface<I>, DisplaySize128x32, BufferedGraphicsMode<DisplaySize128x32>>;

/// 16×2 character grid drawn on a 128×32 SSD1306.
///
/// Prints land in a character buffer; `update` redraws and flushes only when
/// the buffer changed since the last flush.
pub struct OledText<I> {
    display: OledDriver<I>,
    cells: [[u8; COLUMNS]; ROWS],
    col: usize,
    row: usize,
    dirty: bool,
}

impl<I: I2c> OledText<I> {
    pub fn new(i2c: I) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306::new(interface, DisplaySize128x32, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self {
            display,
            cells: [[b' '; COLUMNS]; ROWS],
            col: 0,
            row: 0,
            dirty: true,
        }
    }

    fn redraw(&mut self) -> Result<(), &'static str> {
        self.display.clear_buffer();

        let style = MonoTextStyle::new(&FONT_6X10, BinaryColor::On);
        for (row, cells) in self.cells.iter().enumerate() {
            let text = core::str::from_utf8(cells).unwrap_or("");
            Text::with_baseline(
                text,
                Point::new(0, row as i32 * OLED_ROW_HEIGHT),
                style,
                Baseline::Top,
            )
            .draw(&mut self.display)
            .map_err(|_| "Failed to draw text")?;
        }

        self.display.flush().map_err(|_| "Failed to flush display")
    }
}

impl<I: I2c> TextDisplay for OledText<I> {
    fn init(&mut self) -> Result<(), &'static str> {
        self.display.init().map_err(|_| "OLED not responding")?;
        self.redraw()?;
        self.dirty = false;
        Ok(())
    }

    fn set_cursor(&mut self, col: u8, row: u8) {
        self.col = usize::from(col);
        self.row = usize::from(row);
    }

    fn print(&mut self, text: &str) {
        for byte in text.bytes() {
            if self.col < COLUMNS && self.row < ROWS {
                let byte = if byte.is_ascii() { byte } else { b'?' };
                if self.cells[self.row][self.col] != byte {
                    self.cells[self.row][self.col] = byte;
                    self.dirty = true;
                }
            }
            self.col += 1;
        }
    }

    fn set_backlight(&mut self, _r: u8, _g: u8, _b: u8) {}

    fn update(&mut self) {
        if self.dirty && self.redraw().is_ok() {
            self.dirty = false;
        }
    }
}
