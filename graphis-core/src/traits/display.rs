//! Display driver trait for the sketchpad TFT
//!
//! Abstracts the pixel-level primitives of a 16-bit color panel. The
//! render dispatcher is written against this trait so the whole draw
//! path is testable on the host with a recording mock.

use crate::palette::Rgb565;

/// Trait for pixel-level display access
///
/// Coordinates are pixels with the origin at the top-left corner.
/// Rectangle corners are inclusive. Implementations clip out-of-bounds
/// requests rather than reporting them as errors.
pub trait DisplayDriver {
    /// Error type for display communication
    type Error;

    /// Fill the entire screen with one color
    fn clear(&mut self, color: Rgb565) -> Result<(), Self::Error>;

    /// Paint a single pixel
    fn draw_point(&mut self, x: u16, y: u16, color: Rgb565) -> Result<(), Self::Error>;

    /// Fill the rectangle spanned by two inclusive corners
    fn fill_rect(&mut self, x1: u16, y1: u16, x2: u16, y2: u16, color: Rgb565)
        -> Result<(), Self::Error>;
}

/// Helper trait for drawing derived shapes
pub trait DisplayExt: DisplayDriver {
    /// Draw a one-pixel-thick rectangle outline
    fn draw_rect(
        &mut self,
        x1: u16,
        y1: u16,
        x2: u16,
        y2: u16,
        color: Rgb565,
    ) -> Result<(), Self::Error> {
        // Four edge strips; corners overlap, which is harmless
        self.fill_rect(x1, y1, x2, y1, color)?;
        self.fill_rect(x1, y2, x2, y2, color)?;
        self.fill_rect(x1, y1, x1, y2, color)?;
        self.fill_rect(x2, y1, x2, y2, color)?;
        Ok(())
    }
}

// Blanket implementation for all DisplayDriver types
impl<T: DisplayDriver> DisplayExt for T {}
