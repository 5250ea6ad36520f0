//! Print every gesture the station button produces.
//!
//! Button on GPIO12, active-low with internal pull-up.

#![no_std]
#![no_main]

use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use esp_backtrace as _;
use esp_hal::{
    gpio::{Input, InputConfig, Pull},
    timer::timg::TimerGroup,
};

use skystat::{config::LOOP_INTERVAL_MS, input::Button, screen::Screen};

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(_spawner: Spawner) {
    let peripherals = esp_hal::init(esp_hal::Config::default());
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    let config = InputConfig::default().with_pull(Pull::Up);
    let mut button = Button::new(Input::new(peripherals.GPIO12, config));
    let mut screen = Screen::default();

    esp_println::println!("Watching for gestures...");

    loop {
        if let Some(gesture) = button.poll(Instant::now().as_millis()) {
            screen = screen.on_gesture(gesture);
            esp_println::println!("{:?} -> {:?}", gesture, screen);
        }

        Timer::after(Duration::from_millis(LOOP_INTERVAL_MS)).await;
    }
}
