//! Per-frame scratch buffers owned by the engine.
//!
//! Everything here is cleared and refilled each render or snap query, so a
//! steady drag reuses the same allocations frame after frame.

use crate::shape::{repack_into, ItemShape, Span};

/// One rendered slot for the current frame, before shaping.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Slot {
    pub slot: usize,
    pub item: usize,
    /// Translation from the measured rest offset.
    pub offset: f32,
    /// Rendered start edge (rest offset + translation).
    pub start: f32,
    pub extent: f32,
}

impl Slot {
    #[inline]
    pub fn center(&self) -> f32 {
        self.start + self.extent * 0.5
    }
}

#[derive(Debug, Default)]
pub(crate) struct Scratch {
    pub slots: Vec<Slot>,
    /// Signed slot-center distances to the focus, or raw centers for snap queries.
    pub distances: Vec<f32>,
    pub shapes: Vec<ItemShape>,
    /// Per-slot repack displacement, indexed like `slots`.
    pub deltas: Vec<f32>,
    order: Vec<usize>,
    spans: Vec<Span>,
    packed: Vec<f32>,
}

impl Scratch {
    pub fn clear(&mut self) {
        self.slots.clear();
        self.distances.clear();
        self.shapes.clear();
        self.deltas.clear();
    }

    /// Fill `distances` with slot centers.
    pub fn collect_centers(&mut self) {
        self.distances.clear();
        self.distances.extend(self.slots.iter().map(Slot::center));
    }

    /// Fill `deltas` with the displacement that restores measured gaps
    /// around the scaled `hero` slot.
    pub fn repack_deltas(&mut self, hero: usize) {
        let n = self.slots.len();
        self.order.clear();
        self.order.extend(0..n);
        let slots = &self.slots;
        self.order
            .sort_by(|&a, &b| slots[a].start.total_cmp(&slots[b].start));

        self.spans.clear();
        for &i in &self.order {
            self.spans.push(Span {
                start: slots[i].start,
                extent: slots[i].extent,
                scale: self.shapes.get(i).map_or(1.0, |s| s.scale),
            });
        }
        let anchor = self.order.iter().position(|&i| i == hero).unwrap_or(0);
        repack_into(&self.spans, anchor, &mut self.packed);

        self.deltas.clear();
        self.deltas.resize(n, 0.0);
        for (rank, &i) in self.order.iter().enumerate() {
            self.deltas[i] = self.packed[rank];
        }
    }
}
