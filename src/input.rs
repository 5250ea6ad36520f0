//! Push-button gesture detection.
//!
//! The button is sampled once per main-loop iteration. `GestureDetector`
//! turns the sampled level plus a millisecond timestamp into click,
//! double-click and long-press gestures, debouncing raw edges on the way.
//! It never blocks: the held-button repeat cadence comes from timestamps.

use embedded_hal::digital::InputPin;

use crate::config::{CLICK_MS, DEBOUNCE_MS, LONG_PRESS_MS, LONG_PRESS_REPEAT_MS};
use crate::screen::Gesture;
use crate::traits::GestureInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Idle,
    /// Pressed, not yet long enough for a long press.
    Down { since: u64 },
    /// Released, inside the bounce window.
    Up { since: u64, pressed_at: u64 },
    /// Released, waiting to see whether another click follows.
    Counting { released_at: u64 },
    /// Long press in progress.
    Held { last_repeat: u64 },
    /// Released after a long press, inside the bounce window.
    Releasing { since: u64, last_repeat: u64 },
}

/// Time-driven gesture classifier. Emits at most one gesture per update.
#[derive(Debug)]
pub struct GestureDetector {
    state: State,
    clicks: u8,
}

impl Default for GestureDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl GestureDetector {
    pub const fn new() -> Self {
        Self {
            state: State::Idle,
            clicks: 0,
        }
    }

    /// Feed one raw sample of the button level.
    pub fn update(&mut self, pressed: bool, now_ms: u64) -> Option<Gesture> {
        match self.state {
            State::Idle => {
                if pressed {
                    self.clicks = 0;
                    self.state = State::Down { since: now_ms };
                }
                None
            }
            State::Down { since } => {
                let held = now_ms.saturating_sub(since);
                if !pressed {
                    if held < DEBOUNCE_MS {
                        // Too short to count as a press.
                        self.state = if self.clicks == 0 {
                            State::Idle
                        } else {
                            State::Counting { released_at: now_ms }
                        };
                    } else {
                        self.clicks = self.clicks.saturating_add(1);
                        self.state = State::Up {
                            since: now_ms,
                            pressed_at: since,
                        };
                    }
                    None
                } else if held >= LONG_PRESS_MS {
                    self.clicks = 0;
                    self.state = State::Held { last_repeat: now_ms };
                    Some(Gesture::LongPressStart)
                } else {
                    None
                }
            }
            State::Up { since, pressed_at } => {
                let released = now_ms.saturating_sub(since);
                if pressed && released < DEBOUNCE_MS {
                    self.clicks = self.clicks.saturating_sub(1);
                    self.state = State::Down { since: pressed_at };
                    None
                } else if released >= DEBOUNCE_MS {
                    if self.clicks >= 2 {
                        self.clicks = 0;
                        self.state = State::Idle;
                        Some(Gesture::DoubleClick)
                    } else {
                        self.state = State::Counting { released_at: since };
                        None
                    }
                } else {
                    None
                }
            }
            State::Counting { released_at } => {
                if pressed {
                    self.state = State::Down { since: now_ms };
                    None
                } else if now_ms.saturating_sub(released_at) >= CLICK_MS {
                    self.clicks = 0;
                    self.state = State::Idle;
                    Some(Gesture::SingleClick)
                } else {
                    None
                }
            }
            State::Held { last_repeat } => {
                if !pressed {
                    self.state = State::Releasing {
                        since: now_ms,
                        last_repeat,
                    };
                    None
                } else if now_ms.saturating_sub(last_repeat) >= LONG_PRESS_REPEAT_MS {
                    self.state = State::Held { last_repeat: now_ms };
                    Some(Gesture::LongPressRepeat)
                } else {
                    None
                }
            }
            State::Releasing { since, last_repeat } => {
                let released = now_ms.saturating_sub(since);
                if pressed && released < DEBOUNCE_MS {
                    self.state = State::Held { last_repeat };
                    None
                } else if released >= DEBOUNCE_MS {
                    self.state = State::Idle;
                    Some(Gesture::LongPressStop)
                } else {
                    None
                }
            }
        }
    }
}

/// Active-low push-button with gesture detection.
pub struct Button<P> {
    pin: P,
    detector: GestureDetector,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P) -> Self {
        Self {
            pin,
            detector: GestureDetector::new(),
        }
    }

    pub fn is_pressed(&mut self) -> bool {
        self.pin.is_low().unwrap_or(false)
    }

    /// Sample the pin and classify. Must be called every loop iteration.
    pub fn poll(&mut self, now_ms: u64) -> Option<Gesture> {
        let pressed = self.is_pressed();
        self.detector.update(pressed, now_ms)
    }
}

impl<P: InputPin> GestureInput for Button<P> {
    fn poll(&mut self, now_ms: u64) -> Option<Gesture> {
        Button::poll(self, now_ms)
    }
}
