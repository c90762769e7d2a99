//! Output contracts from the core engine.
//!
//! Outputs carry only the transforms that changed this frame, keyed by render
//! slot, and a separate list of semantic events. Adapters apply the changes to
//! the host and forward events.

use serde::{Deserialize, Serialize};

use crate::config::Axis;

/// Target transform for one rendered slot.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ItemTransform {
    /// Translation along the engine axis, relative to the measured layout.
    pub offset: f32,
    pub scale: f32,
    pub opacity: f32,
    /// Degrees about the axis perpendicular to the track (rotateX for a
    /// vertical track, rotateY for a horizontal one).
    pub rotation: f32,
    /// Translation toward/away from the viewer.
    pub depth: f32,
}

impl ItemTransform {
    pub const IDENTITY: ItemTransform = ItemTransform {
        offset: 0.0,
        scale: 1.0,
        opacity: 1.0,
        rotation: 0.0,
        depth: 0.0,
    };

    /// `[x, y]` translation for `axis`.
    #[inline]
    pub fn translation(&self, axis: Axis) -> [f32; 2] {
        match axis {
            Axis::Horizontal => [self.offset, 0.0],
            Axis::Vertical => [0.0, self.offset],
        }
    }

    pub fn approx_eq(&self, other: &ItemTransform, eps: f32) -> bool {
        (self.offset - other.offset).abs() <= eps
            && (self.scale - other.scale).abs() <= eps
            && (self.opacity - other.opacity).abs() <= eps
            && (self.rotation - other.rotation).abs() <= eps
            && (self.depth - other.depth).abs() <= eps
    }
}

impl Default for ItemTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One changed slot this frame. `item` is the host collection index; `slot`
/// differs from it only for the triple-buffered track (`copy * len + item`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub slot: usize,
    pub item: usize,
    pub transform: ItemTransform,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CursorHint {
    Grab,
    Grabbing,
}

/// Discrete signals emitted while stepping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum CarouselEvent {
    Rebuilt {
        items: usize,
        period: f32,
    },
    HeroChanged {
        previous: Option<usize>,
        current: usize,
    },
    DragStarted,
    DragEnded,
    ThrowStarted {
        velocity: f32,
    },
    ThrowSettled {
        position: f32,
    },
    SnapStarted {
        target: f32,
    },
    SnapCompleted {
        position: f32,
    },
    /// The engine needs frame ticks from now on.
    ClockRequested,
    /// The engine is idle; the frame clock may be released.
    ClockReleased,
    CursorHint(CursorHint),
}

/// Receiver for per-slot transforms.
pub trait RenderSink {
    fn apply(&mut self, slot: usize, transform: &ItemTransform);
}

impl<F> RenderSink for F
where
    F: FnMut(usize, &ItemTransform),
{
    fn apply(&mut self, slot: usize, transform: &ItemTransform) {
        self(slot, transform)
    }
}

/// Outputs returned by the engine's frame-producing calls.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub changes: Vec<Change>,
    #[serde(default)]
    pub events: Vec<CarouselEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.changes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_change(&mut self, change: Change) {
        self.changes.push(change);
    }

    #[inline]
    pub fn push_event(&mut self, event: CarouselEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty() && self.events.is_empty()
    }

    /// Feed every change to `sink`, in slot order of emission.
    pub fn apply_to(&self, sink: &mut dyn RenderSink) {
        for change in &self.changes {
            sink.apply(change.slot, &change.transform);
        }
    }

    /// Latest change for `slot`, if any was emitted this frame.
    pub fn change_for(&self, slot: usize) -> Option<&Change> {
        self.changes.iter().rev().find(|c| c.slot == slot)
    }
}
