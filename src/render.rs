//! Render cycle: draws the two measurements of the current screen.
//!
//! Each field has a fixed layout. The label starts at column 0, the value at
//! a per-field column and the unit at a later fixed column. A value too wide
//! for its slot keeps its digits and the unit is left off.

use core::fmt::Write;

use heapless::String;

use crate::config::DISPLAY_COLUMNS;
use crate::model::{Quantity, Readings};
use crate::screen::Screen;
use crate::traits::TextDisplay;

const BLANK_LINE: &str = "                ";

/// Logical display row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayLine {
    Top,
    Bottom,
}

impl DisplayLine {
    pub fn row(self) -> u8 {
        match self {
            DisplayLine::Top => 0,
            DisplayLine::Bottom => 1,
        }
    }
}

/// Where a quantity's pieces go on its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub label: &'static str,
    pub value_col: u8,
    /// Unit text and its column.
    pub unit: Option<(&'static str, u8)>,
    pub decimals: usize,
}

impl FieldLayout {
    pub fn of(quantity: Quantity) -> Self {
        match quantity {
            // "Temp = -12.3  F "
            Quantity::Temperature => FieldLayout {
                label: "Temp = ",
                value_col: 7,
                unit: Some(("F", 14)),
                decimals: 1,
            },
            // "Humidity = 45  %"
            Quantity::Humidity => FieldLayout {
                label: "Humidity = ",
                value_col: 11,
                unit: Some(("%", 15)),
                decimals: 0,
            },
            // "UV Index = 3.45 "
            Quantity::UvIndex => FieldLayout {
                label: "UV Index = ",
                value_col: 11,
                unit: None,
                decimals: 2,
            },
            // "Press = 101325Pa"
            Quantity::Pressure => FieldLayout {
                label: "Press = ",
                value_col: 8,
                unit: Some(("Pa", 14)),
                decimals: 0,
            },
            // "Visible = 9999lm"
            Quantity::Visible => FieldLayout {
                label: "Visible = ",
                value_col: 10,
                unit: Some(("lm", 14)),
                decimals: 0,
            },
            // "IR = 123456789lm"
            Quantity::Infrared => FieldLayout {
                label: "IR = ",
                value_col: 5,
                unit: Some(("lm", 14)),
                decimals: 0,
            },
        }
    }
}

/// Draw both lines of `screen`.
pub fn render<D: TextDisplay, R: Readings>(screen: Screen, readings: &mut R, display: &mut D) {
    let (top, bottom) = screen.quantities();

    let value = readings.value(top);
    draw_field(display, DisplayLine::Top, top, value);

    let value = readings.value(bottom);
    draw_field(display, DisplayLine::Bottom, bottom, value);

    display.update();
}

/// Blank a full line.
pub fn clear_line<D: TextDisplay>(display: &mut D, line: DisplayLine) {
    display.set_cursor(0, line.row());
    display.print(BLANK_LINE);
}

/// Clear `line` and draw one labelled measurement on it.
pub fn draw_field<D: TextDisplay>(
    display: &mut D,
    line: DisplayLine,
    quantity: Quantity,
    value: f32,
) {
    let layout = FieldLayout::of(quantity);
    let row = line.row();

    clear_line(display, line);

    display.set_cursor(0, row);
    display.print(layout.label);

    let text = format_value(value, layout.decimals);
    let room = usize::from(DISPLAY_COLUMNS.saturating_sub(layout.value_col));
    display.set_cursor(layout.value_col, row);
    display.print(&text[..text.len().min(room)]);

    if let Some((unit, unit_col)) = layout.unit {
        if usize::from(layout.value_col) + text.len() <= usize::from(unit_col) {
            display.set_cursor(unit_col, row);
            display.print(unit);
        }
    }
}

fn format_value(value: f32, decimals: usize) -> String<48> {
    let mut text = String::new();
    let _ = write!(text, "{:.*}", decimals, value);
    text
}
