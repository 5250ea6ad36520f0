//! Screen state machine.
//!
//! Three screens cycle on a click or a held-button repeat; every other
//! gesture returns to the temperature/humidity screen.

use crate::model::Quantity;

/// Display layouts the station can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    TemperatureHumidity,
    UvPressure,
    VisibleInfrared,
}

/// Classified button interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    SingleClick,
    DoubleClick,
    LongPressStart,
    LongPressRepeat,
    LongPressStop,
}

impl Gesture {
    pub const ALL: [Gesture; 5] = [
        Gesture::SingleClick,
        Gesture::DoubleClick,
        Gesture::LongPressStart,
        Gesture::LongPressRepeat,
        Gesture::LongPressStop,
    ];
}

impl Screen {
    pub const ALL: [Screen; 3] = [
        Screen::TemperatureHumidity,
        Screen::UvPressure,
        Screen::VisibleInfrared,
    ];

    /// Next screen in cyclic order.
    pub fn next(self) -> Screen {
        match self {
            Screen::TemperatureHumidity => Screen::UvPressure,
            Screen::UvPressure => Screen::VisibleInfrared,
            Screen::VisibleInfrared => Screen::TemperatureHumidity,
        }
    }

    /// Apply a gesture.
    pub fn on_gesture(self, gesture: Gesture) -> Screen {
        match gesture {
            Gesture::SingleClick | Gesture::LongPressRepeat => self.next(),
            Gesture::DoubleClick | Gesture::LongPressStart | Gesture::LongPressStop => {
                Screen::TemperatureHumidity
            }
        }
    }

    /// Quantities drawn on the (top, bottom) lines.
    pub fn quantities(self) -> (Quantity, Quantity) {
        match self {
            Screen::TemperatureHumidity => (Quantity::Temperature, Quantity::Humidity),
            Screen::UvPressure => (Quantity::UvIndex, Quantity::Pressure),
            Screen::VisibleInfrared => (Quantity::Visible, Quantity::Infrared),
        }
    }
}
