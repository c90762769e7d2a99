//! Easing selection for snap tweens.

pub mod functions;

use serde::{Deserialize, Serialize};

/// Decelerating curves available to the snap controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    QuadOut,
    CubicOut,
    #[default]
    ExpoOut,
    Smoothstep,
    /// CSS-style control points (x1, y1, x2, y2).
    CubicBezier { x1: f32, y1: f32, x2: f32, y2: f32 },
}

impl Easing {
    /// Map progress in [0,1] to eased progress in [0,1].
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match *self {
            Easing::Linear => t,
            Easing::QuadOut => functions::quad_out(t),
            Easing::CubicOut => functions::cubic_out(t),
            Easing::ExpoOut => functions::expo_out(t),
            Easing::Smoothstep => functions::smoothstep(t),
            Easing::CubicBezier { x1, y1, x2, y2 } => functions::bezier_ease_t(t, x1, y1, x2, y2),
        }
    }
}
