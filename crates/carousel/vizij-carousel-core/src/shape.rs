//! Distance-from-focus shaping, hero selection and repacking.
//!
//! Model:
//! - t = clamp(|distance| / max_distance, 0, 1), then smoothstep, then t^exponent.
//! - Each channel is a linear blend from its focused extreme (t = 0) to its
//!   edge extreme (t = 1).
//! - The hero (closest slot) is lifted to `max_scale + hero_boost`; every other
//!   slot is capped strictly below `max_scale` / `max_opacity`.
//! - Cylindrical presentation maps signed distance onto ±arc degrees; rotation
//!   and depth follow the angle and fading only starts past an onset angle.

use crate::config::{ShapeConfig, ShapeStrategy};
use crate::interp::functions::{falloff, lerp_f32};

/// Visual channels for one slot before the offset is applied.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ItemShape {
    pub scale: f32,
    pub opacity: f32,
    /// Degrees about the axis perpendicular to the track.
    pub rotation: f32,
    pub depth: f32,
}

impl ItemShape {
    pub const NEUTRAL: ItemShape = ItemShape {
        scale: 1.0,
        opacity: 1.0,
        rotation: 0.0,
        depth: 0.0,
    };
}

/// `|distance| / max_distance` clamped to [0,1]. A zero `max_distance` makes the
/// mapping a step: exactly-focused slots get 0, everything else 1.
#[inline]
pub fn normalized_distance(distance: f32, max_distance: f32) -> f32 {
    let d = distance.abs();
    if max_distance <= 0.0 {
        return if d == 0.0 { 0.0 } else { 1.0 };
    }
    (d / max_distance).clamp(0.0, 1.0)
}

/// Tracks the hero slot across frames.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct FocusState {
    hero: Option<usize>,
}

impl FocusState {
    #[inline]
    pub fn hero(&self) -> Option<usize> {
        self.hero
    }

    pub fn reset(&mut self) {
        self.hero = None;
    }

    /// Pick the slot with the smallest |distance|. The previous hero is kept
    /// unless some slot is strictly closer. Returns the hero, or `None` when
    /// there are no slots.
    pub fn update(&mut self, distances: &[f32]) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, d) in distances.iter().enumerate() {
            let d = d.abs();
            if !d.is_finite() {
                continue;
            }
            match best {
                Some((_, bd)) if d >= bd => {}
                _ => best = Some((i, d)),
            }
        }
        let Some((best_idx, best_dist)) = best else {
            self.hero = None;
            return None;
        };
        let kept = self
            .hero
            .filter(|&h| h < distances.len() && distances[h].abs() <= best_dist);
        let hero = kept.unwrap_or(best_idx);
        self.hero = Some(hero);
        Some(hero)
    }
}

/// Shaping strategy bound to one layout pass.
#[derive(Clone, Debug)]
pub struct ShapeFunction {
    cfg: ShapeConfig,
    max_distance: f32,
}

impl ShapeFunction {
    /// `container_length` feeds the default `max_distance` (half the container).
    pub fn new(cfg: &ShapeConfig, container_length: f32) -> Self {
        let max_distance = cfg
            .max_distance
            .unwrap_or(container_length * 0.5)
            .max(0.0);
        Self {
            cfg: cfg.clone(),
            max_distance,
        }
    }

    #[inline]
    pub fn max_distance(&self) -> f32 {
        self.max_distance
    }

    #[inline]
    pub fn config(&self) -> &ShapeConfig {
        &self.cfg
    }

    fn blend(&self, t: f32) -> (f32, f32) {
        (
            lerp_f32(self.cfg.max_scale, self.cfg.min_scale, t),
            lerp_f32(self.cfg.max_opacity, self.cfg.min_opacity, t),
        )
    }

    /// Raw channels for a signed distance (slot center minus focus), before
    /// hero enforcement.
    pub fn shape(&self, distance: f32) -> ItemShape {
        match self.cfg.strategy {
            ShapeStrategy::Flat => {
                let t = falloff(
                    normalized_distance(distance, self.max_distance),
                    self.cfg.falloff_exponent,
                );
                let (scale, opacity) = self.blend(t);
                ItemShape {
                    scale,
                    opacity,
                    rotation: 0.0,
                    depth: 0.0,
                }
            }
            ShapeStrategy::Binary => {
                let (scale, opacity) = self.blend(1.0);
                ItemShape {
                    scale,
                    opacity,
                    rotation: 0.0,
                    depth: 0.0,
                }
            }
            ShapeStrategy::Cylindrical {
                arc_degrees,
                radius,
                fade_onset_degrees,
            } => {
                let u = normalized_distance(distance, self.max_distance);
                let angle = u * arc_degrees * distance.signum();
                let abs_angle = angle.abs();
                let fade = if abs_angle <= fade_onset_degrees {
                    0.0
                } else {
                    let span = arc_degrees - fade_onset_degrees;
                    let v = if span > 0.0 {
                        (abs_angle - fade_onset_degrees) / span
                    } else {
                        1.0
                    };
                    falloff(v, self.cfg.falloff_exponent)
                };
                let (scale, opacity) = self.blend(fade);
                ItemShape {
                    scale,
                    opacity,
                    rotation: -angle,
                    depth: radius * (angle.to_radians().cos() - 1.0),
                }
            }
        }
    }

    /// Shape every slot, select the hero and enforce its uniqueness.
    /// `distances` are signed (center minus focus). Writes into `out`.
    pub fn shape_slots(
        &self,
        distances: &[f32],
        focus: &mut FocusState,
        out: &mut Vec<ItemShape>,
    ) -> Option<usize> {
        out.clear();
        out.extend(distances.iter().map(|&d| self.shape(d)));
        let hero = focus.update(distances)?;

        let scale_ceiling = self.cfg.non_hero_scale_ceiling();
        let opacity_ceiling = self.cfg.non_hero_opacity_ceiling();
        for (i, s) in out.iter_mut().enumerate() {
            if i == hero {
                s.scale = self.cfg.hero_scale();
                s.opacity = self.cfg.max_opacity;
            } else {
                s.scale = s.scale.min(scale_ceiling);
                s.opacity = s.opacity.min(opacity_ceiling).max(0.0);
            }
        }
        Some(hero)
    }
}

/// A rendered slot span in visual order, before scaling.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Span {
    pub start: f32,
    pub extent: f32,
    pub scale: f32,
}

impl Span {
    #[inline]
    fn center(&self) -> f32 {
        self.start + self.extent * 0.5
    }

    #[inline]
    fn end(&self) -> f32 {
        self.start + self.extent
    }

    #[inline]
    fn scaled_half(&self) -> f32 {
        self.extent * self.scale * 0.5
    }
}

/// Re-lay scaled spans so the gaps between neighbouring edges stay the gaps
/// measured before scaling. The `anchor` span keeps its center. Returns, per
/// span, the displacement from its original center to its repacked center.
///
/// `spans` must be sorted by `start`.
pub fn repack(spans: &[Span], anchor: usize) -> Vec<f32> {
    let mut deltas = Vec::with_capacity(spans.len());
    repack_into(spans, anchor, &mut deltas);
    deltas
}

/// [`repack`] into a caller-owned buffer.
pub fn repack_into(spans: &[Span], anchor: usize, out: &mut Vec<f32>) {
    let n = spans.len();
    out.clear();
    out.resize(n, 0.0);
    if anchor >= n {
        return;
    }

    // `out` holds repacked centers until the final pass
    out[anchor] = spans[anchor].center();

    // rightward (or downward)
    let mut edge = out[anchor] + spans[anchor].scaled_half();
    for i in anchor + 1..n {
        let gap = spans[i].start - spans[i - 1].end();
        let half = spans[i].scaled_half();
        out[i] = edge + gap + half;
        edge = out[i] + half;
    }

    // leftward (or upward)
    let mut edge = out[anchor] - spans[anchor].scaled_half();
    for i in (0..anchor).rev() {
        let gap = spans[i + 1].start - spans[i].end();
        let half = spans[i].scaled_half();
        out[i] = edge - gap - half;
        edge = out[i] - half;
    }

    for (d, span) in out.iter_mut().zip(spans) {
        *d -= span.center();
    }
}
