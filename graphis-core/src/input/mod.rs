//! Input handling
//!
//! Converts raw joystick samples and button levels into stable
//! directional intents and discrete events.

pub mod axis;
pub mod button;
pub mod controller;

pub use axis::{AxisState, AxisThresholds, ADC_MAX};
pub use button::{DebouncedButton, Edge};
pub use controller::{ButtonLevels, ButtonTimings, InputController, InputEvent};
