//! Scan the station I2C bus and check that every expected device answers.
//!
//! Following pins are used:
//! - SDA => GPIO8
//! - SCL => GPIO9

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Timer};
use esp_backtrace as _;
use esp_hal::timer::timg::TimerGroup;

use skystat::{
    config::{BME280_ADDRESS, LCD_ADDRESS, LCD_RGB_ADDRESS, OLED_ADDRESS, SI1145_ADDRESS},
    hardware::{scan, station_i2c},
};

esp_bootloader_esp_idf::esp_app_desc!();

const EXPECTED: [(u8, &str); 5] = [
    (SI1145_ADDRESS, "SI1145 sunlight sensor"),
    (BME280_ADDRESS, "BME280"),
    (LCD_ADDRESS, "LCD text controller"),
    (LCD_RGB_ADDRESS, "LCD backlight"),
    (OLED_ADDRESS, "SSD1306 OLED (optional)"),
];

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let mut i2c = match station_i2c(peripherals.I2C0, peripherals.GPIO8, peripherals.GPIO9) {
        Ok(i2c) => i2c,
        Err(e) => {
            esp_println::println!("[ERROR] {}", e);
            loop {
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    };

    esp_println::println!("I2C scan start");
    let mut present = heapless::Vec::<u8, 16>::new();
    scan(&mut i2c, |address| {
        esp_println::println!("Found device at address 0x{:02X}", address);
        let _ = present.push(address);
    });
    esp_println::println!("I2C scan done");

    for (address, name) in EXPECTED {
        let status = if present.contains(&address) { "ok" } else { "MISSING" };
        esp_println::println!("  0x{:02X} {:<24} {}", address, name, status);
    }

    loop {
        Timer::after(Duration::from_millis(100)).await;
    }
}
