#![no_std]
#![no_main]

use core::cell::RefCell;

use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Ticker, Timer};
use embedded_hal_bus::i2c::RefCellDevice;
use esp_backtrace as _;
use esp_hal::{delay::Delay, timer::timg::TimerGroup};

use skystat::{
    config::LOOP_INTERVAL_MS,
    display::{DisplayGateway, DisplayType, OledText, RgbLcd},
    environment::Bme280Sensor,
    hardware::StationHardware,
    input::Button,
    logic::Station,
    sensors::SensorGateway,
    si1145::Si1145,
    traits::{BarGraph, EnvironmentSensor, GestureInput, LightSensor, TextDisplay},
};

// Choose your display type here
// DisplayType::RgbLcd  - Grove 16x2 LCD, 0x3E (text) + 0x62 (backlight)
// DisplayType::Ssd1306 - 128x32 OLED at 0x3C, drawn as a 16x2 text grid
const DISPLAY_TYPE: DisplayType = DisplayType::RgbLcd;

esp_bootloader_esp_idf::esp_app_desc!();

/// Run the main loop forever.
async fn run<E, L, T, B, G>(mut station: Station<E, L, T, B, G>)
where
    E: EnvironmentSensor,
    L: LightSensor,
    T: TextDisplay,
    B: BarGraph,
    G: GestureInput,
{
    let mut delay = Delay::new();
    station.init(&mut delay);
    esp_println::println!("[STATION] Running");

    // Deadline pacing: sensor and display time is absorbed into the period.
    let mut ticker = Ticker::every(Duration::from_millis(LOOP_INTERVAL_MS));
    loop {
        station.tick(Instant::now().as_millis());
        ticker.next().await;
    }
}

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    esp_println::logger::init_logger_from_env();
    let peripherals = esp_hal::init(esp_hal::Config::default());

    esp_println::println!("=== Skystat ===");

    // Initialize RTOS timer for embassy
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let hw = match StationHardware::new(
        peripherals.I2C0,
        peripherals.GPIO8,
        peripherals.GPIO9,
        peripherals.GPIO12,
        peripherals.GPIO4,
        peripherals.GPIO5,
    ) {
        Ok(hw) => hw,
        Err(e) => {
            esp_println::println!("[ERROR] Hardware setup failed: {}", e);
            loop {
                Timer::after(Duration::from_secs(1)).await;
            }
        }
    };

    let bus = RefCell::new(hw.i2c);
    let sensors = SensorGateway::new(
        Bme280Sensor::new(RefCellDevice::new(&bus), Delay::new()),
        Si1145::new(RefCellDevice::new(&bus), Delay::new()),
    );
    let button = Button::new(hw.button);

    match DISPLAY_TYPE {
        DisplayType::RgbLcd => {
            let lcd = RgbLcd::new(RefCellDevice::new(&bus), Delay::new());
            let display = DisplayGateway::new(lcd, hw.led_bar);
            run(Station::new(sensors, display, button)).await
        }
        DisplayType::Ssd1306 => {
            let oled = OledText::new(RefCellDevice::new(&bus));
            let display = DisplayGateway::new(oled, hw.led_bar);
            run(Station::new(sensors, display, button)).await
        }
    }
}
