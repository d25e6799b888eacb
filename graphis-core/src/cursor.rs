//! Cursor integration
//!
//! Combines the two per-axis directions into a bounded position update.
//! Two independent guards apply in order: a saturating clamp against the
//! display edges, then rejection of any candidate inside the reserved
//! taskbar rectangle.

use crate::config::{DisplayGeometry, Rect};
use crate::input::AxisState;

/// Cursor position in pixels, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorPosition {
    pub x: u16,
    pub y: u16,
}

impl CursorPosition {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Cursor movement configuration
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CursorConfig {
    /// Display dimensions the cursor is clamped into
    pub geometry: DisplayGeometry,
    /// Pixels moved per tick on a deflected axis
    pub step_px: u16,
    /// Vertical convention: with `invert_y` set, a Positive y deflection
    /// (stick pushed away) moves the cursor up the portrait screen,
    /// i.e. decreases pixel y. Fixed for the whole run.
    pub invert_y: bool,
    /// Reserved region the cursor may never enter
    pub taskbar: Rect,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            geometry: DisplayGeometry::default(),
            step_px: 1,
            invert_y: true,
            taskbar: Rect::new(40, 0, 200, 20),
        }
    }
}

impl CursorConfig {
    /// Center of the display, the cursor's start position
    pub fn center(&self) -> CursorPosition {
        CursorPosition::new(self.geometry.width / 2, self.geometry.height / 2)
    }

    /// Integrate one tick of axis directions into a new position
    ///
    /// Pure: returns the candidate (or, if the candidate falls inside the
    /// taskbar, the unchanged previous position); the caller commits it.
    pub fn step(&self, x_dir: AxisState, y_dir: AxisState, pos: CursorPosition) -> CursorPosition {
        let step = self.step_px as i32;
        let dx = x_dir.sign() * step;
        let dy = if self.invert_y {
            -y_dir.sign() * step
        } else {
            y_dir.sign() * step
        };

        let candidate = CursorPosition::new(
            clamp_axis(pos.x, dx, self.geometry.width),
            clamp_axis(pos.y, dy, self.geometry.height),
        );

        if self.taskbar.contains(candidate.x, candidate.y) {
            // Reject the move: the taskbar is a control surface, not canvas
            pos
        } else {
            candidate
        }
    }
}

/// Saturating move of one coordinate within [0, dim-1]
fn clamp_axis(v: u16, delta: i32, dim: u16) -> u16 {
    (v as i32 + delta).clamp(0, dim as i32 - 1) as u16
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn cfg() -> CursorConfig {
        CursorConfig::default()
    }

    #[test]
    fn neutral_holds_position() {
        let pos = CursorPosition::new(120, 160);
        assert_eq!(cfg().step(AxisState::Neutral, AxisState::Neutral, pos), pos);
    }

    #[test]
    fn fifty_positive_x_ticks_move_fifty_pixels() {
        let c = cfg();
        let mut pos = CursorPosition::new(120, 160);
        for _ in 0..50 {
            pos = c.step(AxisState::Positive, AxisState::Neutral, pos);
        }
        assert_eq!(pos, CursorPosition::new(170, 160));
    }

    #[test]
    fn positive_y_moves_up_with_inverted_convention() {
        let c = cfg();
        let pos = c.step(
            AxisState::Neutral,
            AxisState::Positive,
            CursorPosition::new(120, 160),
        );
        assert_eq!(pos, CursorPosition::new(120, 159));

        let plain = CursorConfig {
            invert_y: false,
            ..c
        };
        let pos = plain.step(
            AxisState::Neutral,
            AxisState::Positive,
            CursorPosition::new(120, 160),
        );
        assert_eq!(pos, CursorPosition::new(120, 161));
    }

    #[test]
    fn clamp_saturates_at_all_borders() {
        let c = cfg();
        let right = c.step(
            AxisState::Positive,
            AxisState::Neutral,
            CursorPosition::new(239, 160),
        );
        assert_eq!(right.x, 239);

        let left = c.step(
            AxisState::Negative,
            AxisState::Neutral,
            CursorPosition::new(0, 160),
        );
        assert_eq!(left.x, 0);

        let bottom = c.step(
            AxisState::Neutral,
            AxisState::Negative,
            CursorPosition::new(120, 319),
        );
        assert_eq!(bottom.y, 319);

        let top = c.step(
            AxisState::Neutral,
            AxisState::Positive,
            CursorPosition::new(220, 0),
        );
        assert_eq!(top.y, 0);
    }

    #[test]
    fn candidate_inside_taskbar_is_rejected() {
        let c = cfg();
        // One step up from just below the taskbar's bottom edge
        let pos = CursorPosition::new(120, 21);
        assert_eq!(c.step(AxisState::Neutral, AxisState::Positive, pos), pos);
        // One step right from just left of the taskbar
        let pos = CursorPosition::new(39, 10);
        assert_eq!(c.step(AxisState::Positive, AxisState::Neutral, pos), pos);
    }

    #[test]
    fn movement_alongside_taskbar_is_allowed() {
        let c = cfg();
        // Skimming along the row below the taskbar
        let pos = c.step(
            AxisState::Positive,
            AxisState::Neutral,
            CursorPosition::new(100, 21),
        );
        assert_eq!(pos, CursorPosition::new(101, 21));
        // Above-left corner region outside the reserved rect
        let pos = c.step(
            AxisState::Negative,
            AxisState::Neutral,
            CursorPosition::new(39, 10),
        );
        assert_eq!(pos, CursorPosition::new(38, 10));
    }

    fn dir_strategy() -> impl Strategy<Value = AxisState> {
        prop::sample::select(&[
            AxisState::Negative,
            AxisState::Neutral,
            AxisState::Positive,
        ])
    }

    proptest! {
        #[test]
        fn position_stays_in_bounds_and_off_taskbar(
            steps in prop::collection::vec((dir_strategy(), dir_strategy()), 1..400),
        ) {
            let c = cfg();
            let mut pos = c.center();
            for (x_dir, y_dir) in steps {
                pos = c.step(x_dir, y_dir, pos);
                prop_assert!(pos.x < c.geometry.width);
                prop_assert!(pos.y < c.geometry.height);
                prop_assert!(!c.taskbar.contains(pos.x, pos.y));
            }
        }
    }
}
