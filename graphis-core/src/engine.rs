//! Per-tick paint engine
//!
//! Owns every piece of engine state: both axis classifiers' memory, the
//! cursor, the drawing flag, the debounced buttons, and the palette
//! selection. The control loop calls [`PaintEngine::tick`] once per
//! scheduler period; the returned [`Frame`] is everything the render
//! dispatcher needs. Phases within a tick run in a fixed order: classify
//! both axes, integrate the cursor, poll buttons, apply events.

use crate::cursor::{CursorConfig, CursorPosition};
use crate::input::{
    AxisState, AxisThresholds, ButtonLevels, ButtonTimings, InputController, InputEvent,
};
use crate::palette::{Palette, Rgb565, Selection};

/// Engine configuration, assembled once at start-up
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EngineConfig {
    /// Hysteresis thresholds, shared by both axes
    pub thresholds: AxisThresholds,
    /// Movement, clamping and taskbar exclusion
    pub cursor: CursorConfig,
    /// Per-button debounce windows
    pub buttons: ButtonTimings,
    /// Palette index selected at power-on
    pub initial_selection: u8,
    /// Whether the pad powers on in drawing mode
    pub start_in_drawing_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            thresholds: AxisThresholds::default(),
            cursor: CursorConfig::default(),
            buttons: ButtonTimings::default(),
            initial_selection: 2,
            start_in_drawing_mode: false,
        }
    }
}

/// One tick's worth of raw inputs
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInput {
    /// 12-bit horizontal axis sample
    pub x_sample: u16,
    /// 12-bit vertical axis sample
    pub y_sample: u16,
    /// Raw button logic levels (active-low)
    pub levels: ButtonLevels,
    /// Tick timestamp in milliseconds
    pub now_ms: u32,
}

/// Engine output for one tick, consumed by the render dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    /// Committed cursor position
    pub cursor: CursorPosition,
    /// Drawing mode active this tick
    pub drawing: bool,
    /// Color drawn with while in drawing mode
    pub active_color: Rgb565,
    /// Selected palette index
    pub selection: u8,
    /// The taskbar must be repainted (first frame or selection change)
    pub taskbar_dirty: bool,
}

/// The input-to-cursor state engine
pub struct PaintEngine {
    cfg: EngineConfig,
    palette: Palette,
    x_state: AxisState,
    y_state: AxisState,
    cursor: CursorPosition,
    drawing: bool,
    controller: InputController,
    selection: Selection,
    first_frame: bool,
}

impl PaintEngine {
    /// Create an engine with the cursor centered and defaults applied
    pub fn new(cfg: EngineConfig, palette: Palette) -> Self {
        Self {
            cfg,
            palette,
            x_state: AxisState::Neutral,
            y_state: AxisState::Neutral,
            cursor: cfg.cursor.center(),
            drawing: cfg.start_in_drawing_mode,
            controller: InputController::new(cfg.buttons),
            selection: Selection::new(cfg.initial_selection, palette.len()),
            first_frame: true,
        }
    }

    /// Current cursor position
    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// Whether drawing mode is active
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Currently selected palette index
    pub fn selection(&self) -> u8 {
        self.selection.index()
    }

    /// Run one tick of the engine
    pub fn tick(&mut self, input: TickInput) -> Frame {
        self.x_state = self.cfg.thresholds.classify(input.x_sample, self.x_state);
        self.y_state = self.cfg.thresholds.classify(input.y_sample, self.y_state);

        self.cursor = self.cfg.cursor.step(self.x_state, self.y_state, self.cursor);

        // The first frame paints the taskbar unconditionally
        let mut taskbar_dirty = self.first_frame;
        self.first_frame = false;

        for event in self.controller.poll(input.levels, input.now_ms) {
            match event {
                InputEvent::ToggleDrawing => self.drawing = !self.drawing,
                InputEvent::NextColor => {
                    self.selection.next();
                    taskbar_dirty = true;
                }
                InputEvent::PrevColor => {
                    self.selection.prev();
                    taskbar_dirty = true;
                }
            }
        }

        Frame {
            cursor: self.cursor,
            drawing: self.drawing,
            active_color: self.palette.color(self.selection.index()),
            selection: self.selection.index(),
            taskbar_dirty,
        }
    }
}
