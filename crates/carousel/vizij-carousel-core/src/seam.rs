//! Seam avoidance for the triple-buffered track.
//!
//! The host renders three contiguous copies of the item set (prepend,
//! original, append). Copy `c` sits at `(c - 1) * period` from the original,
//! so at position 0 the middle copy is at rest. The working position is kept
//! away from the buffer edges by adding or subtracting whole periods, which
//! leaves the rendered layout unchanged.

use log::trace;

pub const COPIES: usize = 3;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SeamManager {
    period: f32,
    guard: f32,
}

impl SeamManager {
    /// `guard` is a fraction of one period, in (0, 0.5).
    pub fn new(period: f32, guard: f32) -> Self {
        Self {
            period: period.max(0.0),
            guard: guard.clamp(f32::EPSILON, 0.49),
        }
    }

    #[inline]
    pub fn period(&self) -> f32 {
        self.period
    }

    /// Offset of copy `copy` relative to the original layout.
    #[inline]
    pub fn copy_offset(&self, copy: usize) -> f32 {
        (copy as f32 - 1.0) * self.period
    }

    /// Canonical band spanned by the three copies, centered on the middle one.
    pub fn band(&self) -> (f32, f32) {
        (-1.5 * self.period, 1.5 * self.period)
    }

    /// Positions at or beyond these limits are re-centered.
    pub fn limits(&self) -> (f32, f32) {
        let reach = self.period * (1.0 - self.guard);
        (-reach, reach)
    }

    /// Whole-period shift to add to `position`, or 0 when it is inside the limits.
    pub fn recenter(&self, position: f32) -> f32 {
        if self.period <= 0.0 || !position.is_finite() {
            return 0.0;
        }
        let (lo, hi) = self.limits();
        if position > lo && position < hi {
            return 0.0;
        }
        let copies = (position / self.period).round();
        let shift = -copies * self.period;
        trace!("carousel: seam re-center {position:.1} by {shift:.1}");
        shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_limits_is_untouched() {
        let seam = SeamManager::new(400.0, 0.25);
        assert_eq!(seam.recenter(0.0), 0.0);
        assert_eq!(seam.recenter(299.0), 0.0);
        assert_eq!(seam.recenter(-299.0), 0.0);
    }

    #[test]
    fn guard_band_shifts_by_whole_periods() {
        let seam = SeamManager::new(400.0, 0.25);
        assert_eq!(seam.recenter(300.0), -400.0);
        assert_eq!(seam.recenter(-350.0), 400.0);
        assert_eq!(seam.recenter(1250.0), -1200.0);
    }

    #[test]
    fn zero_period_never_shifts() {
        let seam = SeamManager::new(0.0, 0.25);
        assert_eq!(seam.recenter(1e6), 0.0);
    }
}
