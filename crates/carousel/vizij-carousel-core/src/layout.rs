//! LayoutCache: one immutable measurement pass over the track.
//!
//! Rebuilt wholesale whenever geometry is invalidated; never patched in place.

use log::warn;

use crate::config::FocusAnchor;
use crate::geometry::{ContainerBounds, GeometryProvider};

/// One measured item. `index` is the item's position in the host collection.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Item {
    pub index: usize,
    pub base_offset: f32,
    pub base_extent: f32,
}

impl Item {
    #[inline]
    pub fn base_center(&self) -> f32 {
        self.base_offset + self.base_extent * 0.5
    }

    #[inline]
    pub fn base_end(&self) -> f32 {
        self.base_offset + self.base_extent
    }
}

/// Items in visual order plus the loop period they span.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Track {
    items: Vec<Item>,
    gap: f32,
    total_extent: f32,
}

impl Track {
    /// Period = last end - first start + trailing gap, i.e. the sum of all
    /// extents and all inter-item gaps including the one that closes the loop.
    pub fn new(items: Vec<Item>, gap: f32) -> Self {
        let total_extent = match (items.first(), items.last()) {
            (Some(first), Some(last)) => (last.base_end() - first.base_offset + gap).max(0.0),
            _ => 0.0,
        };
        Self {
            items,
            gap,
            total_extent,
        }
    }

    #[inline]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn gap(&self) -> f32 {
        self.gap
    }

    #[inline]
    pub fn total_extent(&self) -> f32 {
        self.total_extent
    }

    /// Offset of the first item, the origin of the loop timeline.
    #[inline]
    pub fn start(&self) -> f32 {
        self.items.first().map(|i| i.base_offset).unwrap_or(0.0)
    }
}

/// Snapshot of one layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutCache {
    track: Track,
    container: ContainerBounds,
    focus: f32,
    source_count: usize,
}

impl LayoutCache {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Measure every item with transforms reset to identity. Items reporting
    /// non-finite or negative geometry are dropped from the pass; a pass with no
    /// usable items yields an empty cache.
    pub fn measure(provider: &mut dyn GeometryProvider, anchor: FocusAnchor) -> Self {
        provider.reset_transforms();

        let count = provider.item_count();
        let mut items = Vec::with_capacity(count);
        for index in 0..count {
            let rect = provider.measure(index);
            if !rect.offset.is_finite() || !rect.extent.is_finite() || rect.extent < 0.0 {
                warn!(
                    "carousel: dropping item {index} with unusable geometry (offset {}, extent {})",
                    rect.offset, rect.extent
                );
                continue;
            }
            items.push(Item {
                index,
                base_offset: rect.offset,
                base_extent: rect.extent,
            });
        }

        let mut container = provider.measure_container();
        if !container.inner_start.is_finite() || !container.inner_end.is_finite() {
            warn!("carousel: container bounds are not finite; using an empty container");
            container = ContainerBounds::default();
        }

        let gap = provider.gap();
        let gap = if gap.is_finite() && gap >= 0.0 { gap } else { 0.0 };

        let focus = match anchor {
            FocusAnchor::ContainerCenter => container.center(),
            FocusAnchor::Marker => provider
                .focus_marker()
                .filter(|m| m.is_finite())
                .unwrap_or_else(|| container.center()),
            FocusAnchor::Fixed { coord } => coord,
        };

        Self {
            track: Track::new(items, gap),
            container,
            focus,
            source_count: count,
        }
    }

    #[inline]
    pub fn track(&self) -> &Track {
        &self.track
    }

    #[inline]
    pub fn container(&self) -> ContainerBounds {
        self.container
    }

    /// Focus coordinate resolved for this pass.
    #[inline]
    pub fn focus(&self) -> f32 {
        self.focus
    }

    /// Item count reported by the provider, including dropped items.
    #[inline]
    pub fn source_count(&self) -> usize {
        self.source_count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{GeometrySnapshot, ItemRect};

    struct Counting {
        inner: GeometrySnapshot,
        resets: usize,
    }

    impl GeometryProvider for Counting {
        fn item_count(&self) -> usize {
            self.inner.item_count()
        }
        fn reset_transforms(&mut self) {
            self.resets += 1;
        }
        fn measure(&mut self, index: usize) -> ItemRect {
            assert!(self.resets > 0, "measured before transforms were reset");
            self.inner.measure(index)
        }
        fn measure_container(&mut self) -> ContainerBounds {
            self.inner.measure_container()
        }
        fn gap(&self) -> f32 {
            self.inner.gap
        }
    }

    #[test]
    fn total_extent_includes_closing_gap() {
        let bounds = ContainerBounds {
            inner_start: 0.0,
            inner_end: 800.0,
        };
        let mut geo = Counting {
            inner: GeometrySnapshot::uniform(4, 100.0, 20.0, 0.0, bounds),
            resets: 0,
        };
        let cache = LayoutCache::measure(&mut geo, FocusAnchor::ContainerCenter);
        assert_eq!(geo.resets, 1);
        assert_eq!(cache.track().len(), 4);
        assert_eq!(cache.track().total_extent(), 4.0 * 100.0 + 4.0 * 20.0);
        assert_eq!(cache.focus(), 400.0);
    }

    #[test]
    fn unusable_items_are_dropped() {
        let mut geo = GeometrySnapshot {
            items: vec![
                ItemRect {
                    offset: 0.0,
                    extent: 50.0,
                },
                ItemRect {
                    offset: f32::NAN,
                    extent: 50.0,
                },
                ItemRect {
                    offset: 100.0,
                    extent: 50.0,
                },
            ],
            ..Default::default()
        };
        let cache = LayoutCache::measure(&mut geo, FocusAnchor::ContainerCenter);
        let kept: Vec<usize> = cache.track().items().iter().map(|i| i.index).collect();
        assert_eq!(kept, vec![0, 2]);
    }

    #[test]
    fn marker_falls_back_to_container_center() {
        let bounds = ContainerBounds {
            inner_start: 100.0,
            inner_end: 300.0,
        };
        let mut geo = GeometrySnapshot::uniform(3, 50.0, 0.0, 0.0, bounds);
        let cache = LayoutCache::measure(&mut geo, FocusAnchor::Marker);
        assert_eq!(cache.focus(), 200.0);

        geo.marker = Some(120.0);
        let cache = LayoutCache::measure(&mut geo, FocusAnchor::Marker);
        assert_eq!(cache.focus(), 120.0);
    }
}
