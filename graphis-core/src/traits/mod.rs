//! Hardware abstraction traits
//!
//! Implemented by the driver crates; the core only ever talks to these.

pub mod display;

pub use display::{DisplayDriver, DisplayExt};
