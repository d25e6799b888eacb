//! Board-agnostic core logic for the Graphis sketchpad firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Display abstraction trait
//! - Per-axis hysteresis classifier for the analog joystick
//! - Cursor integration (boundary clamping, taskbar exclusion)
//! - Debounced button handling and input events
//! - Color palette and selection state
//! - Per-tick paint engine and render dispatch

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod config;
pub mod cursor;
pub mod engine;
pub mod input;
pub mod palette;
pub mod render;
pub mod traits;
