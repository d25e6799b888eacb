//! Display drivers

pub mod ili9341;

pub use ili9341::{Error, Ili9341};
