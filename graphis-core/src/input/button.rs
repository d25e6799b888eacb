//! Debounced button state machine
//!
//! Each physical button gets its own small machine: an edge fires on the
//! released-to-pressed transition, after which the button is latched
//! until it is observed released again. A per-button dwell window keeps
//! mechanical contact bounce from producing a second edge right after
//! the first.

/// A press edge emitted by [`DebouncedButton::poll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    Pressed,
}

/// Per-button debounce state
///
/// `poll` is fed one sampled level per tick together with the tick
/// timestamp; the window check makes the machine independent of the
/// scheduler's tick rate.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DebouncedButton {
    window_ms: u32,
    latched: bool,
    last_edge_ms: Option<u32>,
}

impl DebouncedButton {
    /// Create a button with the given minimum dwell between edges
    pub const fn new(window_ms: u32) -> Self {
        Self {
            window_ms,
            latched: false,
            last_edge_ms: None,
        }
    }

    /// Feed one sampled state, returning a press edge if one fired
    ///
    /// `pressed` is the logical state (the caller resolves the active-low
    /// wiring). No two edges fire closer together than the configured
    /// window; a press observed inside the window is swallowed but still
    /// latches, so the window expiring mid-hold cannot fire a late edge.
    pub fn poll(&mut self, pressed: bool, now_ms: u32) -> Option<Edge> {
        if !pressed {
            self.latched = false;
            return None;
        }

        if self.latched {
            return None;
        }
        self.latched = true;

        if let Some(t) = self.last_edge_ms {
            // wrapping_sub keeps the comparison correct across the u32
            // millisecond counter rolling over
            if now_ms.wrapping_sub(t) < self.window_ms {
                return None;
            }
        }

        self.last_edge_ms = Some(now_ms);
        Some(Edge::Pressed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_press_fires_immediately() {
        let mut b = DebouncedButton::new(50);
        assert_eq!(b.poll(true, 0), Some(Edge::Pressed));
    }

    #[test]
    fn held_button_fires_exactly_once() {
        let mut b = DebouncedButton::new(50);
        assert_eq!(b.poll(true, 0), Some(Edge::Pressed));
        for t in (10..1000).step_by(10) {
            assert_eq!(b.poll(true, t), None);
        }
    }

    #[test]
    fn release_rearms_the_button() {
        let mut b = DebouncedButton::new(50);
        assert_eq!(b.poll(true, 0), Some(Edge::Pressed));
        assert_eq!(b.poll(false, 100), None);
        assert_eq!(b.poll(true, 200), Some(Edge::Pressed));
    }

    #[test]
    fn bounce_inside_window_is_swallowed() {
        let mut b = DebouncedButton::new(50);
        assert_eq!(b.poll(true, 0), Some(Edge::Pressed));
        // Contact bounce: released and pressed again within the window
        assert_eq!(b.poll(false, 10), None);
        assert_eq!(b.poll(true, 20), None);
        // Still held once the window has passed: no late edge either
        assert_eq!(b.poll(true, 80), None);
    }

    #[test]
    fn edges_never_closer_than_window() {
        let mut b = DebouncedButton::new(50);
        let mut edges = std::vec::Vec::new();
        // Rapid press/release pairs every 10 ms
        for t in (0..500u32).step_by(10) {
            let pressed = (t / 10) % 2 == 0;
            if b.poll(pressed, t).is_some() {
                edges.push(t);
            }
        }
        assert!(!edges.is_empty());
        for pair in edges.windows(2) {
            assert!(pair[1] - pair[0] >= 50);
        }
    }

    #[test]
    fn timestamp_wraparound_does_not_suppress() {
        let mut b = DebouncedButton::new(50);
        assert_eq!(b.poll(true, u32::MAX - 10), Some(Edge::Pressed));
        assert_eq!(b.poll(false, u32::MAX - 5), None);
        // 55 ms later with the counter wrapped
        assert_eq!(b.poll(true, 44), Some(Edge::Pressed));
    }
}
