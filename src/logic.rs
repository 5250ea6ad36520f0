//! Business logic layer (hardware-independent)
//!
//! `Station` owns the current screen and the per-iteration temperature cache
//! and runs one main-loop iteration per `tick`:
//!
//! 1. refresh the cached temperature
//! 2. poll the button and apply at most one gesture
//! 3. render the current screen
//! 4. drive the bar graph from the cached temperature
//!
//! Pacing between ticks is the caller's job.

use embedded_hal::delay::DelayNs;

use crate::config::{BAR_LEVEL_MAX, BAR_LEVEL_MIN, BAR_TEMP_MAX_F, BAR_TEMP_MIN_F};
use crate::display::DisplayGateway;
use crate::render::render;
use crate::screen::{Gesture, Screen};
use crate::sensors::SensorGateway;
use crate::traits::{BarGraph, EnvironmentSensor, GestureInput, LightSensor, TextDisplay};

/// Real-valued linear interpolation of `value` from one range onto another.
/// Values outside the input range extrapolate.
pub fn map_range(value: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
}

/// Bar graph level for a temperature in °F. Not clamped.
pub fn temperature_to_level(temperature_f: f32) -> f32 {
    map_range(
        temperature_f,
        BAR_TEMP_MIN_F,
        BAR_TEMP_MAX_F,
        BAR_LEVEL_MIN,
        BAR_LEVEL_MAX,
    )
}

pub struct Station<E, L, T, B, G> {
    sensors: SensorGateway<E, L>,
    display: DisplayGateway<T, B>,
    input: G,
    screen: Screen,
    temperature_f: f32,
}

impl<E, L, T, B, G> Station<E, L, T, B, G>
where
    E: EnvironmentSensor,
    L: LightSensor,
    T: TextDisplay,
    B: BarGraph,
    G: GestureInput,
{
    pub fn new(sensors: SensorGateway<E, L>, display: DisplayGateway<T, B>, input: G) -> Self {
        Self {
            sensors,
            display,
            input,
            screen: Screen::default(),
            temperature_f: 0.0,
        }
    }

    /// Bring up the display, then the sensors. Blocks until the sunlight
    /// sensor answers.
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) {
        self.display.init();
        self.sensors.init(delay);
    }

    /// One main-loop iteration. Returns the gesture applied, if any.
    pub fn tick(&mut self, now_ms: u64) -> Option<Gesture> {
        self.temperature_f = self.sensors.read_temperature_f();

        let gesture = self.input.poll(now_ms);
        if let Some(gesture) = gesture {
            self.apply(gesture);
        }

        self.render();
        self.display
            .set_graph_level(temperature_to_level(self.temperature_f));

        gesture
    }

    /// Move to the screen `gesture` selects.
    pub fn apply(&mut self, gesture: Gesture) {
        let next = self.screen.on_gesture(gesture);
        if next != self.screen {
            log::debug!("[SCREEN] {:?} -> {:?} ({:?})", self.screen, next, gesture);
        }
        self.screen = next;
    }

    /// Draw the current screen using the cached temperature.
    pub fn render(&mut self) {
        let mut readings = self.sensors.with_cached_temperature(self.temperature_f);
        render(self.screen, &mut readings, self.display.text_mut());
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn temperature_f(&self) -> f32 {
        self.temperature_f
    }

    pub fn display(&self) -> &DisplayGateway<T, B> {
        &self.display
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crate::environment::Bme280Sensor;
    use crate::mock::{MockBar, MockDelay, MockDisplay, MockEnvironment, MockI2c, MockLight};

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn bar_graph_mapping() {
        assert!(close(temperature_to_level(55.0), 0.0));
        assert!(close(temperature_to_level(85.0), 10.0));
        assert!(close(temperature_to_level(70.0), 5.0));
    }

    #[test]
    fn bar_graph_mapping_extrapolates() {
        assert!(close(temperature_to_level(100.0), 15.0));
        assert!(close(temperature_to_level(40.0), -5.0));
    }

    #[test]
    fn map_range_is_real_valued() {
        assert!(close(map_range(1.0, 0.0, 3.0, 0.0, 1.0), 1.0 / 3.0));
        assert!(close(map_range(5.0, 0.0, 10.0, 100.0, 200.0), 150.0));
    }

    /// Replays one scripted gesture per tick.
    struct Script(Vec<Option<Gesture>>);

    impl GestureInput for Script {
        fn poll(&mut self, _now_ms: u64) -> Option<Gesture> {
            if self.0.is_empty() {
                None
            } else {
                self.0.remove(0)
            }
        }
    }

    type TestStation = Station<MockEnvironment, MockLight, MockDisplay, MockBar, Script>;

    fn station(script: Vec<Option<Gesture>>) -> TestStation {
        let sensors = SensorGateway::new(
            MockEnvironment {
                celsius: 21.0,
                humidity: 50.0,
                pressure: 101_000.0,
                ..Default::default()
            },
            MockLight {
                uv_raw: 120,
                visible: 280,
                infrared: 900,
                ..Default::default()
            },
        );
        let display = DisplayGateway::new(MockDisplay::new(), MockBar::default());
        Station::new(sensors, display, Script(script))
    }

    #[test]
    fn starts_on_temperature_humidity() {
        assert_eq!(station(vec![]).screen(), Screen::TemperatureHumidity);
    }

    #[test]
    fn tick_refreshes_temperature_and_bar() {
        let mut station = station(vec![]);
        station.tick(0);
        // 21 °C = 69.8 °F
        assert!(close(station.temperature_f(), 69.8));
        let levels = &station.display().graph().levels;
        assert_eq!(levels.len(), 1);
        assert!(close(levels[0], temperature_to_level(69.8)));
    }

    #[test]
    fn tick_renders_even_without_gesture() {
        let mut station = station(vec![None, None]);
        station.tick(0);
        station.tick(50);
        assert_eq!(station.display().text().updates, 2);
        assert_eq!(station.display().text().line(0), "Temp = 69.8   F ");
    }

    #[test]
    fn gesture_is_rendered_in_the_same_tick() {
        let mut station = station(vec![Some(Gesture::SingleClick)]);
        assert_eq!(station.tick(0), Some(Gesture::SingleClick));
        assert_eq!(station.screen(), Screen::UvPressure);
        assert_eq!(station.display().text().line(0), "UV Index = 1.20 ");
        assert_eq!(station.display().text().line(1), "Press = 101000Pa");
    }

    #[test]
    fn held_button_auto_advances() {
        let mut station = station(vec![
            Some(Gesture::LongPressStart),
            Some(Gesture::LongPressRepeat),
            Some(Gesture::LongPressRepeat),
            Some(Gesture::LongPressStop),
        ]);
        let mut screens = Vec::new();
        for t in 0..4 {
            station.tick(t * 750);
            screens.push(station.screen());
        }
        assert_eq!(
            screens,
            vec![
                Screen::TemperatureHumidity,
                Screen::UvPressure,
                Screen::VisibleInfrared,
                Screen::TemperatureHumidity,
            ]
        );
    }

    #[test]
    fn init_sets_backlight_and_waits_for_light_sensor() {
        let mut station = station(vec![]);
        station.sensors = SensorGateway::new(
            MockEnvironment {
                fail_init: true,
                ..Default::default()
            },
            MockLight {
                failures: 2,
                ..Default::default()
            },
        );
        let mut delay = MockDelay::default();
        station.init(&mut delay);
        assert_eq!(station.display().text().init_calls, 1);
        assert_eq!(delay.total_ms(), 2_000);
    }

    #[test]
    fn temperature_is_read_once_per_tick_on_every_screen() {
        let mut station = station(vec![
            None,
            Some(Gesture::SingleClick),
            Some(Gesture::SingleClick),
        ]);
        for (t, screen) in Screen::ALL.into_iter().enumerate() {
            let before = station.sensors.environment().temperature_reads;
            station.tick(t as u64 * 50);
            assert_eq!(station.screen(), screen);
            assert_eq!(station.sensors.environment().temperature_reads - before, 1);
        }
    }

    #[test]
    fn tick_takes_at_most_one_bme280_conversion() {
        let mut delay = MockDelay::default();
        let sensors = SensorGateway::new(
            Bme280Sensor::new(MockI2c::default(), &mut delay),
            MockLight::default(),
        );
        let display = DisplayGateway::new(MockDisplay::new(), MockBar::default());
        // The click moves to the screen that shows pressure.
        let mut station = Station::new(sensors, display, Script(vec![Some(Gesture::SingleClick)]));
        station.tick(0);
        assert_eq!(station.screen(), Screen::UvPressure);
        station.tick(50);
        drop(station);
        assert_eq!(delay.total_ms(), 2 * 40);
    }

    type Events = Rc<RefCell<Vec<&'static str>>>;

    struct RecordingEnvironment(Events);

    impl EnvironmentSensor for RecordingEnvironment {
        fn init(&mut self) -> Result<(), &'static str> {
            Ok(())
        }

        fn read_temperature(&mut self) -> f32 {
            self.0.borrow_mut().push("temperature");
            20.0
        }

        fn read_humidity(&mut self) -> f32 {
            self.0.borrow_mut().push("humidity");
            50.0
        }

        fn read_pressure(&mut self) -> f32 {
            self.0.borrow_mut().push("pressure");
            100_000.0
        }
    }

    struct RecordingInput(Events);

    impl GestureInput for RecordingInput {
        fn poll(&mut self, _now_ms: u64) -> Option<Gesture> {
            self.0.borrow_mut().push("poll");
            None
        }
    }

    struct RecordingDisplay(Events);

    impl TextDisplay for RecordingDisplay {
        fn init(&mut self) -> Result<(), &'static str> {
            Ok(())
        }

        fn set_cursor(&mut self, _col: u8, _row: u8) {}

        fn print(&mut self, _text: &str) {}

        fn set_backlight(&mut self, _r: u8, _g: u8, _b: u8) {}

        fn update(&mut self) {
            self.0.borrow_mut().push("update");
        }
    }

    struct RecordingBar(Events);

    impl BarGraph for RecordingBar {
        fn set_level(&mut self, _level: f32) {
            self.0.borrow_mut().push("bar");
        }
    }

    #[test]
    fn tick_runs_refresh_poll_render_bar_in_order() {
        let events = Events::default();
        let mut station = Station::new(
            SensorGateway::new(RecordingEnvironment(events.clone()), MockLight::default()),
            DisplayGateway::new(
                RecordingDisplay(events.clone()),
                RecordingBar(events.clone()),
            ),
            RecordingInput(events.clone()),
        );

        station.tick(0);
        assert_eq!(
            *events.borrow(),
            vec!["temperature", "poll", "humidity", "update", "bar"]
        );
    }
}
