//! Hardware drivers for the Graphis sketchpad
//!
//! Driver implementations against `embedded-hal` traits, kept separate
//! from the board-agnostic core logic.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
