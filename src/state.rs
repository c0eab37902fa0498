use crate::grid::Viewport;

/// Monotonic frame counter driving the animation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    frame: u64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances to the next frame and returns it
    pub fn tick(&mut self) -> u64 {
        self.frame = self.frame.saturating_add(1);
        self.frame
    }
}

/// Application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Frame counter, never reset during a run
    pub clock: FrameClock,
    /// Current canvas size in pixels
    pub viewport: Viewport,
    /// Enable debug mode
    pub debug: bool,
    /// Animation paused
    pub paused: bool,
    /// Set once the user asked to quit
    pub quit: bool,
    /// Frames drawn so far
    pub drawn: u64,
}

impl AppState {
    pub fn new(viewport: Viewport) -> Self {
        AppState {
            clock: FrameClock::new(),
            viewport,
            debug: false,
            paused: false,
            quit: false,
            drawn: 0,
        }
    }

    /// Whether `limit` frames have already been drawn
    pub fn frame_limit_reached(&self, limit: Option<u64>) -> bool {
        limit.is_some_and(|limit| self.drawn >= limit)
    }

    /// Moves the clock forward unless paused
    pub fn advance(&mut self) {
        if !self.paused {
            self.clock.tick();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero_and_counts_up() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(), 0);
        assert_eq!(clock.tick(), 1);
        assert_eq!(clock.tick(), 2);
        assert_eq!(clock.frame(), 2);
    }

    #[test]
    fn pausing_holds_the_frame() {
        let mut state = AppState::new(Viewport::new(10, 10));
        state.advance();
        state.paused = true;
        state.advance();
        state.advance();
        assert_eq!(state.clock.frame(), 1);

        state.paused = false;
        state.advance();
        assert_eq!(state.clock.frame(), 2);
    }

    #[test]
    fn zero_frame_limit_stops_before_drawing() {
        let state = AppState::new(Viewport::new(10, 10));
        assert!(state.frame_limit_reached(Some(0)));
        assert!(!state.frame_limit_reached(None));
    }

    #[test]
    fn frame_limit_counts_drawn_frames() {
        let mut state = AppState::new(Viewport::new(10, 10));
        state.drawn = 2;
        assert!(!state.frame_limit_reached(Some(3)));
        state.drawn = 3;
        assert!(state.frame_limit_reached(Some(3)));
    }
}
