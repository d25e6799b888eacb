//! Input controller
//!
//! Debounces the three physical buttons and turns raw active-low levels
//! into discrete input events.

use heapless::Vec;

use super::button::DebouncedButton;

/// Discrete events emitted by the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InputEvent {
    /// Joystick button: toggle drawing mode
    ToggleDrawing,
    /// Step the palette selection forward
    NextColor,
    /// Step the palette selection backward
    PrevColor,
}

/// Raw logic levels of the three buttons, one sample per tick
///
/// All buttons are wired active-low: `false` (logic 0) means pressed.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonLevels {
    pub draw: bool,
    pub next: bool,
    pub prev: bool,
}

/// Debounce windows per logical button
///
/// The draw toggle is deliberately slower than the color steppers: a
/// toggle that re-fires while the thumb is still on the stick button is
/// far more disruptive than a color step.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTimings {
    pub toggle_window_ms: u32,
    pub color_window_ms: u32,
}

impl Default for ButtonTimings {
    fn default() -> Self {
        Self {
            toggle_window_ms: 500,
            color_window_ms: 50,
        }
    }
}

/// Tracks the three buttons with independent debounce state
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InputController {
    draw: DebouncedButton,
    next: DebouncedButton,
    prev: DebouncedButton,
}

impl InputController {
    /// Create a controller with the given per-button windows
    pub const fn new(timings: ButtonTimings) -> Self {
        Self {
            draw: DebouncedButton::new(timings.toggle_window_ms),
            next: DebouncedButton::new(timings.color_window_ms),
            prev: DebouncedButton::new(timings.color_window_ms),
        }
    }

    /// Poll all three buttons, collecting the events that fired this tick
    pub fn poll(&mut self, levels: ButtonLevels, now_ms: u32) -> Vec<InputEvent, 3> {
        let mut events = Vec::new();

        // Active-low: a low level is a press
        if self.draw.poll(!levels.draw, now_ms).is_some() {
            let _ = events.push(InputEvent::ToggleDrawing);
        }
        if self.next.poll(!levels.next, now_ms).is_some() {
            let _ = events.push(InputEvent::NextColor);
        }
        if self.prev.poll(!levels.prev, now_ms).is_some() {
            let _ = events.push(InputEvent::PrevColor);
        }

        events
    }
}
