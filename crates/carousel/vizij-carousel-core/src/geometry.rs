//! Geometry provider contract and a plain snapshot implementation.
//!
//! Hosts report item and container geometry in the track's local coordinate
//! space, along the engine axis, in device pixels.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;

/// Position and size of one item along the axis, with transforms at identity.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemRect {
    pub offset: f32,
    pub extent: f32,
}

/// Inner box of the container (padding excluded).
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerBounds {
    pub inner_start: f32,
    pub inner_end: f32,
}

impl ContainerBounds {
    #[inline]
    pub fn length(&self) -> f32 {
        (self.inner_end - self.inner_start).max(0.0)
    }

    #[inline]
    pub fn center(&self) -> f32 {
        self.inner_start + self.length() * 0.5
    }
}

/// Synchronous source of layout measurements.
pub trait GeometryProvider {
    fn item_count(&self) -> usize;

    /// Put every item back to an identity transform before sampling so
    /// measurements are not distorted by the previous frame's output.
    fn reset_transforms(&mut self) {}

    fn measure(&mut self, index: usize) -> ItemRect;

    fn measure_container(&mut self) -> ContainerBounds;

    /// Gap between consecutive items; also closes the loop after the last item.
    fn gap(&self) -> f32 {
        0.0
    }

    /// Center of a focus marker element, when the host has one.
    fn focus_marker(&mut self) -> Option<f32> {
        None
    }
}

/// Serializable geometry captured by a host in one pass.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometrySnapshot {
    pub items: Vec<ItemRect>,
    pub container: ContainerBounds,
    #[serde(default)]
    pub gap: f32,
    #[serde(default)]
    pub marker: Option<f32>,
}

impl GeometrySnapshot {
    /// `count` items of equal `extent`, laid out from `start` with `gap` between them.
    pub fn uniform(
        count: usize,
        extent: f32,
        gap: f32,
        start: f32,
        container: ContainerBounds,
    ) -> Self {
        let items = (0..count)
            .map(|i| ItemRect {
                offset: start + i as f32 * (extent + gap),
                extent,
            })
            .collect();
        Self {
            items,
            container,
            gap,
            marker: None,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, CarouselError> {
        let snap: GeometrySnapshot = serde_json::from_str(json)
            .map_err(|e| CarouselError::geometry(format!("parse error: {e}")))?;
        snap.validate()?;
        Ok(snap)
    }

    /// Reject snapshots with non-finite numbers or negative extents.
    pub fn validate(&self) -> Result<(), CarouselError> {
        if !self.container.inner_start.is_finite() || !self.container.inner_end.is_finite() {
            return Err(CarouselError::geometry("container bounds must be finite"));
        }
        if !self.gap.is_finite() || self.gap < 0.0 {
            return Err(CarouselError::geometry("gap must be finite and >= 0"));
        }
        for (i, r) in self.items.iter().enumerate() {
            if !r.offset.is_finite() || !r.extent.is_finite() || r.extent < 0.0 {
                return Err(CarouselError::geometry(format!(
                    "item {i} must have a finite offset and a finite extent >= 0"
                )));
            }
        }
        Ok(())
    }
}

impl GeometryProvider for GeometrySnapshot {
    fn item_count(&self) -> usize {
        self.items.len()
    }

    fn measure(&mut self, index: usize) -> ItemRect {
        self.items.get(index).copied().unwrap_or_default()
    }

    fn measure_container(&mut self) -> ContainerBounds {
        self.container
    }

    fn gap(&self) -> f32 {
        self.gap
    }

    fn focus_marker(&mut self) -> Option<f32> {
        self.marker
    }
}
