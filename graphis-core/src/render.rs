//! Render dispatcher
//!
//! Turns the engine's per-tick [`Frame`] into the minimal set of draw
//! calls: the taskbar strip is repainted only when the frame marks it
//! dirty, and cursor motion is handled as erase-old-then-paint-new
//! against the previous rendered position.

use crate::config::Rect;
use crate::cursor::CursorPosition;
use crate::engine::Frame;
use crate::palette::{colors, Palette, Rgb565};
use crate::traits::{DisplayDriver, DisplayExt};

/// Taskbar strip geometry
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TaskbarLayout {
    /// Strip bounds on screen
    pub bounds: Rect,
    /// Horizontal cell pitch per swatch; the painted box is two pixels
    /// narrower, leaving a gap between swatches
    pub swatch_width: u16,
    /// Painted swatch height
    pub swatch_height: u16,
    /// First swatch offset from the strip's left edge
    pub inset_x: u16,
    /// Swatch offset from the strip's top edge
    pub inset_y: u16,
}

impl Default for TaskbarLayout {
    fn default() -> Self {
        Self {
            bounds: Rect::new(40, 0, 200, 20),
            swatch_width: 12,
            swatch_height: 15,
            inset_x: 5,
            inset_y: 2,
        }
    }
}

impl TaskbarLayout {
    /// Left edge of swatch cell `i`
    fn cell_x(&self, i: u8) -> u16 {
        self.bounds.x1 + self.inset_x + i as u16 * self.swatch_width
    }
}

/// Colors and layout the dispatcher paints with
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RenderConfig {
    pub taskbar: TaskbarLayout,
    /// Canvas background; what pointer-mode erases to
    pub background: Rgb565,
    /// Cursor color while not drawing
    pub pointer: Rgb565,
    /// Taskbar strip fill
    pub strip: Rgb565,
    /// Selection highlight outline
    pub selector: Rgb565,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            taskbar: TaskbarLayout::default(),
            background: colors::BLACK,
            pointer: colors::WHITE,
            strip: colors::TAN,
            selector: colors::SELECTOR,
        }
    }
}

/// Issues draw/erase calls for each frame
///
/// Owns the previously rendered cursor position; it is updated only
/// after a frame has been painted, so a failed render leaves the erase
/// target intact for the next attempt.
pub struct Renderer {
    cfg: RenderConfig,
    palette: Palette,
    prev: Option<CursorPosition>,
}

impl Renderer {
    pub fn new(cfg: RenderConfig, palette: Palette) -> Self {
        Self {
            cfg,
            palette,
            prev: None,
        }
    }

    /// Paint one frame
    pub fn render<D: DisplayDriver>(&mut self, display: &mut D, frame: &Frame) -> Result<(), D::Error> {
        if frame.taskbar_dirty {
            self.draw_taskbar(display, frame.selection)?;
        }

        let moved = self.prev.is_some_and(|p| p != frame.cursor);

        if frame.drawing {
            // Drawing persists: the trail pixel keeps the active color,
            // and the previous pixel is repainted so a mode toggle
            // mid-move leaves no pointer-colored residue
            if moved {
                if let Some(p) = self.prev {
                    display.draw_point(p.x, p.y, frame.active_color)?;
                }
            }
            display.draw_point(frame.cursor.x, frame.cursor.y, frame.active_color)?;
        } else {
            if moved {
                if let Some(p) = self.prev {
                    display.draw_point(p.x, p.y, self.cfg.background)?;
                }
            }
            display.draw_point(frame.cursor.x, frame.cursor.y, self.cfg.pointer)?;
        }

        self.prev = Some(frame.cursor);
        Ok(())
    }

    /// Repaint the strip, all swatches, and the selection highlight
    fn draw_taskbar<D: DisplayDriver>(&self, display: &mut D, selected: u8) -> Result<(), D::Error> {
        let t = &self.cfg.taskbar;
        let b = &t.bounds;

        display.fill_rect(b.x1, b.y1, b.x2, b.y2, self.cfg.strip)?;

        let y1 = b.y1 + t.inset_y;
        let y2 = y1 + t.swatch_height;
        for i in 0..self.palette.len() {
            let x1 = t.cell_x(i);
            display.fill_rect(x1, y1, x1 + t.swatch_width - 2, y2, self.palette.color(i))?;
        }

        // Double outline so the highlight reads at a glance
        let sel_x = t.cell_x(selected);
        display.draw_rect(
            sel_x.saturating_sub(2),
            y1.saturating_sub(2),
            sel_x + t.swatch_width,
            y2 + 2,
            self.cfg.selector,
        )?;
        display.draw_rect(
            sel_x.saturating_sub(1),
            y1.saturating_sub(1),
            sel_x + t.swatch_width - 1,
            y2 + 1,
            self.cfg.selector,
        )?;

        Ok(())
    }
}
