//! Frame timing
//!
//! Turns the timestamps handed to a per-frame callback into tick durations.

/// Converts absolute frame timestamps (ms) into per-tick durations
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Longest frame fed to the simulation; a backgrounded tab would
    /// otherwise resume with one enormous scroll step
    pub const MAX_FRAME_MS: f32 = 100.0;

    pub fn new() -> Self {
        Self::default()
    }

    /// Duration since the previous frame. The first frame, and any frame
    /// whose timestamp goes backwards, counts as zero.
    pub fn frame(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms.is_finite() && now_ms >= last => (now_ms - last) as f32,
            _ => 0.0,
        };
        if now_ms.is_finite() {
            self.last_ms = Some(now_ms);
        }
        dt.min(Self::MAX_FRAME_MS)
    }

    /// Forget the previous timestamp, e.g. after a pause or tab switch
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_frame_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.frame(1_000.0), 0.0);
        assert_eq!(clock.frame(1_016.0), 16.0);
        assert_eq!(clock.frame(1_049.0), 33.0);
    }

    #[test]
    fn test_long_and_backward_frames() {
        let mut clock = FrameClock::new();
        clock.frame(0.0);
        assert_eq!(clock.frame(5_000.0), FrameClock::MAX_FRAME_MS);
        assert_eq!(clock.frame(4_000.0), 0.0);
        assert_eq!(clock.frame(4_016.0), 16.0);
        assert_eq!(clock.frame(f64::NAN), 0.0);
        assert_eq!(clock.frame(4_032.0), 16.0);
    }

    #[test]
    fn test_reset() {
        let mut clock = FrameClock::new();
        clock.frame(100.0);
        clock.reset();
        assert_eq!(clock.frame(900.0), 0.0);
    }
}
