//! Modular arithmetic for wraparound and the per-item loop timeline.
//!
//! The timeline maps one scalar "virtual time" to every item's offset at once:
//! each item travels toward the track start at `pixels_per_second`, and on
//! passing one extent beyond the start it reappears one period later and
//! returns to its rest offset. Driving the timeline with
//! `virtual_time = -position / pixels_per_second` reproduces continuous
//! wraparound with no per-item special cases at render time.

use crate::layout::Track;

/// Shift `value` by an integer multiple of `max - min` into `[min, max)`.
///
/// A degenerate (empty, inverted or non-finite) range returns `value`
/// unmodified, as does a non-finite `value`.
#[inline]
pub fn wrap(value: f32, min: f32, max: f32) -> f32 {
    let range = max - min;
    if !(range > 0.0) || !range.is_finite() || !value.is_finite() {
        return value;
    }
    if value >= min && value < max {
        return value;
    }
    let shifted = (value - min).rem_euclid(range) + min;
    // rem_euclid can round up to exactly `range`
    if shifted >= max || shifted < min {
        min
    } else {
        shifted
    }
}

/// Euclidean index wrap for `len > 0`.
#[inline]
pub fn wrap_index(index: isize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    index.rem_euclid(len as isize) as usize
}

/// Precomputed motion for one item.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemSegment {
    /// Virtual time at which this item sits at the track start.
    pub start_time: f32,
    /// Time until the item's far edge crosses the track start (the loop point).
    pub time_to_loop: f32,
    /// Time from the loop point back to the rest offset.
    pub time_to_return: f32,
    distance_to_loop: f32,
}

/// Per-item loop timeline for one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoopTimeline {
    segments: Vec<ItemSegment>,
    total_extent: f32,
    pixels_per_second: f32,
}

impl LoopTimeline {
    pub fn build(track: &Track, pixels_per_second: f32) -> Self {
        let total_extent = track.total_extent();
        let start = track.start();
        let pps = if pixels_per_second > 0.0 {
            pixels_per_second
        } else {
            0.0
        };
        let per_px = if pps > 0.0 { 1.0 / pps } else { 0.0 };

        let segments = track
            .items()
            .iter()
            .map(|item| {
                let distance_to_start = item.base_offset - start;
                let distance_to_loop = distance_to_start + item.base_extent;
                ItemSegment {
                    start_time: distance_to_start * per_px,
                    time_to_loop: distance_to_loop * per_px,
                    time_to_return: (total_extent - distance_to_loop).max(0.0) * per_px,
                    distance_to_loop,
                }
            })
            .collect();

        Self {
            segments,
            total_extent,
            pixels_per_second: pps,
        }
    }

    #[inline]
    pub fn segments(&self) -> &[ItemSegment] {
        &self.segments
    }

    #[inline]
    pub fn total_extent(&self) -> f32 {
        self.total_extent
    }

    #[inline]
    pub fn pixels_per_second(&self) -> f32 {
        self.pixels_per_second
    }

    /// Length of one full loop in virtual time.
    #[inline]
    pub fn duration(&self) -> f32 {
        if self.pixels_per_second > 0.0 {
            self.total_extent / self.pixels_per_second
        } else {
            0.0
        }
    }

    /// Pixel-to-timeline mapping.
    #[inline]
    pub fn virtual_time(&self, position: f32) -> f32 {
        if self.pixels_per_second > 0.0 {
            -position / self.pixels_per_second
        } else {
            0.0
        }
    }

    /// Position that puts the timeline at `time`.
    #[inline]
    pub fn position_for_time(&self, time: f32) -> f32 {
        -time * self.pixels_per_second
    }

    /// Wrap virtual time into `[0, duration)`.
    #[inline]
    pub fn wrap_time(&self, time: f32) -> f32 {
        wrap(time, 0.0, self.duration())
    }

    /// Offset of item `index` from its rest position at virtual `time`.
    /// Always lies in `(-time_to_loop, time_to_return]` (scaled to pixels) and is
    /// congruent to `-time * pixels_per_second` modulo the period.
    pub fn offset_at(&self, index: usize, time: f32) -> f32 {
        let Some(seg) = self.segments.get(index) else {
            return 0.0;
        };
        let duration = self.duration();
        if duration <= 0.0 {
            return 0.0;
        }
        let travelled = self.wrap_time(time) * self.pixels_per_second;
        if travelled < seg.distance_to_loop {
            -travelled
        } else {
            self.total_extent - travelled
        }
    }

    /// Offset of item `index` for a running position.
    #[inline]
    pub fn offset_for_position(&self, index: usize, position: f32) -> f32 {
        self.offset_at(index, self.virtual_time(position))
    }
}
