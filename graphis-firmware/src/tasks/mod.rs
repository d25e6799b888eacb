//! Embassy async tasks
//!
//! The tick task produces timestamps; the paint task owns every piece of
//! mutable engine and display state (single-writer discipline).

pub mod paint;
pub mod tick;

pub use paint::paint_task;
pub use tick::tick_task;
