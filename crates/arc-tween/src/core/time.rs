/// Where the host timeline is inside the active segment.
/// Converts clip-local time into the normalized progress the evaluators take.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SegmentTime {
    /// Seconds since the segment started.
    pub local_time: f32,
    /// Total segment length in seconds.
    pub duration: f32,
}

impl SegmentTime {
    pub fn new(local_time: f32, duration: f32) -> Self {
        Self {
            local_time,
            duration,
        }
    }

    /// Normalized progress [0, 1]. A zero-length segment is already complete.
    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.local_time / self.duration).clamp(0.0, 1.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_fraction_of_duration() {
        let time = SegmentTime::new(0.5, 2.0);
        assert!((time.progress() - 0.25).abs() < 1e-6);
    }

    #[test]
    fn progress_clamps() {
        assert_eq!(SegmentTime::new(-1.0, 2.0).progress(), 0.0);
        assert_eq!(SegmentTime::new(3.0, 2.0).progress(), 1.0);
    }

    #[test]
    fn zero_duration_is_complete() {
        assert_eq!(SegmentTime::new(0.0, 0.0).progress(), 1.0);
        assert_eq!(SegmentTime::new(0.0, -2.0).progress(), 1.0);
    }
}
