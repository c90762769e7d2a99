//! Core configuration for vizij-carousel-core.
//!
//! Every field carries a serde default so hosts can pass partial JSON objects.

use serde::{Deserialize, Serialize};

use crate::error::CarouselError;
use crate::interp::Easing;

/// Axis the track runs along. Offsets in emitted transforms are along this axis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    Horizontal,
    Vertical,
}

/// How the running position relates to the rendered layout.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum WrapStrategy {
    /// No wrapping; position is clamped so the list can be scrolled end to end.
    /// Items are shifted back by `lead_items` first-item extents.
    Bounded {
        #[serde(default)]
        lead_items: f32,
    },
    /// Infinite loop driven through the per-item motion timeline.
    Modular,
    /// Three concatenated copies of the track; the working position is
    /// re-centered by exact copy extents before it reaches a buffer edge.
    TripleBuffer {
        /// Fraction of one copy's extent kept as a guard band at either edge.
        #[serde(default = "default_guard")]
        guard: f32,
    },
}

fn default_guard() -> f32 {
    0.25
}

impl Default for WrapStrategy {
    fn default() -> Self {
        WrapStrategy::Modular
    }
}

impl WrapStrategy {
    pub fn wraps(&self) -> bool {
        !matches!(self, WrapStrategy::Bounded { .. })
    }
}

/// Presentation of the distance-from-focus falloff.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ShapeStrategy {
    /// Scale and opacity fall off with distance in a flat plane.
    Flat,
    /// Items ride an arc: rotation and depth follow an angle within
    /// `±arc_degrees`; fading starts past `fade_onset_degrees`.
    Cylindrical {
        #[serde(default = "default_arc")]
        arc_degrees: f32,
        #[serde(default = "default_radius")]
        radius: f32,
        #[serde(default = "default_onset")]
        fade_onset_degrees: f32,
    },
    /// Hero at the focused extremes, everything else at the edge extremes.
    Binary,
}

fn default_arc() -> f32 {
    75.0
}

fn default_radius() -> f32 {
    300.0
}

fn default_onset() -> f32 {
    20.0
}

impl Default for ShapeStrategy {
    fn default() -> Self {
        ShapeStrategy::Flat
    }
}

/// Channel extremes and falloff parameters shared by all shape strategies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeConfig {
    pub strategy: ShapeStrategy,
    pub max_scale: f32,
    pub min_scale: f32,
    pub max_opacity: f32,
    pub min_opacity: f32,
    /// Distance at which the edge extremes are reached. `None` uses half the
    /// container length.
    pub max_distance: Option<f32>,
    pub falloff_exponent: f32,
    /// Added to `max_scale` for the hero.
    pub hero_boost: f32,
    /// Non-hero scale/opacity are capped this far below the focused extremes.
    pub hero_margin: f32,
    /// Re-lay items with their original gaps after scaling.
    pub repack: bool,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            strategy: ShapeStrategy::Flat,
            max_scale: 1.0,
            min_scale: 0.8,
            max_opacity: 1.0,
            min_opacity: 0.4,
            max_distance: None,
            falloff_exponent: 1.5,
            hero_boost: 0.05,
            hero_margin: 0.01,
            repack: true,
        }
    }
}

impl ShapeConfig {
    /// Scale is not a focus channel: every item renders at `max_scale` and the
    /// hero stands out by opacity alone.
    #[inline]
    pub fn fixed_scale(&self) -> bool {
        self.max_scale == self.min_scale && self.hero_boost == 0.0
    }

    /// Highest scale any non-hero item may take.
    #[inline]
    pub fn non_hero_scale_ceiling(&self) -> f32 {
        if self.fixed_scale() {
            return self.max_scale;
        }
        self.max_scale - self.hero_margin
    }

    #[inline]
    pub fn non_hero_opacity_ceiling(&self) -> f32 {
        self.max_opacity - self.hero_margin
    }

    #[inline]
    pub fn hero_scale(&self) -> f32 {
        self.max_scale + self.hero_boost
    }
}

/// Where the focus coordinate comes from on each layout pass.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FocusAnchor {
    /// Center of the container's inner box.
    #[default]
    ContainerCenter,
    /// Center of a marker element reported by the geometry provider,
    /// falling back to the container center when none is reported.
    Marker,
    /// A fixed coordinate in track space.
    Fixed { coord: f32 },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Release speed (px/s) above which the track is thrown.
    pub throw_threshold: f32,
    /// Exponential velocity decay rate (1/s) while thrown.
    pub inertia_resistance: f32,
    /// Fraction of pointer travel discarded while dragging, in [0,1).
    pub drag_resistance: f32,
    /// Throws settle once speed drops below this (px/s).
    pub settle_velocity: f32,
    /// Hard cap on throw duration.
    pub max_throw_ms: f32,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            throw_threshold: 50.0,
            inertia_resistance: 14.0,
            drag_resistance: 0.0,
            settle_velocity: 5.0,
            max_throw_ms: 2500.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapConfig {
    pub enabled: bool,
    pub duration_ms: f32,
    pub easing: Easing,
    /// Snap (without animation) to the nearest item after every rebuild.
    pub on_rebuild: bool,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            duration_ms: 350.0,
            easing: Easing::ExpoOut,
            on_rebuild: true,
        }
    }
}

/// Configuration for one carousel engine.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub axis: Axis,
    pub wrap: WrapStrategy,
    pub shape: ShapeConfig,
    pub focus: FocusAnchor,
    pub drag: DragConfig,
    pub snap: SnapConfig,
    /// Timeline speed; virtual time advances one unit per `speed * 100` px.
    pub timeline_speed: f32,
    /// Frames to wait after a rebuild request before measuring.
    pub settle_frames: u32,
    /// Measure once more on the frame after the settled rebuild.
    pub settle_confirm: bool,
    /// Idle drift in px/s for the wrapping strategies (0 disables).
    pub autoplay_speed: f32,
    /// Round emitted offsets to whole pixels.
    pub pixel_snap: bool,
    /// Releasing below the throw threshold ends the drag state at once
    /// instead of after the follow-up snap completes.
    pub release_without_throw_ends_immediately: bool,
    /// Transforms closer than this to the last emitted value are not re-emitted.
    pub change_epsilon: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            axis: Axis::Horizontal,
            wrap: WrapStrategy::Modular,
            shape: ShapeConfig::default(),
            focus: FocusAnchor::ContainerCenter,
            drag: DragConfig::default(),
            snap: SnapConfig::default(),
            timeline_speed: 1.0,
            settle_frames: 2,
            settle_confirm: true,
            autoplay_speed: 0.0,
            pixel_snap: false,
            release_without_throw_ends_immediately: true,
            change_epsilon: 1e-4,
        }
    }
}

fn check(ok: bool, reason: &str) -> Result<(), CarouselError> {
    if ok {
        Ok(())
    } else {
        Err(CarouselError::config(reason))
    }
}

impl Config {
    /// Horizontal infinite services strip: loop timeline, light scale falloff,
    /// 350 ms expo-out snap.
    pub fn services_carousel() -> Self {
        Self {
            shape: ShapeConfig {
                min_scale: 0.9,
                min_opacity: 0.6,
                hero_boost: 0.04,
                ..ShapeConfig::default()
            },
            drag: DragConfig {
                drag_resistance: 0.08,
                ..DragConfig::default()
            },
            ..Self::default()
        }
    }

    /// Vertical bounded client list: one-item lead bias, binary 1.0 / 0.4
    /// emphasis against a marker, no snapping.
    pub fn clients_wheel() -> Self {
        Self {
            axis: Axis::Vertical,
            wrap: WrapStrategy::Bounded { lead_items: 1.0 },
            shape: ShapeConfig {
                strategy: ShapeStrategy::Binary,
                max_scale: 1.0,
                min_scale: 1.0,
                max_opacity: 1.0,
                min_opacity: 0.4,
                hero_boost: 0.0,
                hero_margin: 0.001,
                repack: false,
                ..ShapeConfig::default()
            },
            focus: FocusAnchor::Marker,
            drag: DragConfig {
                drag_resistance: 0.08,
                ..DragConfig::default()
            },
            snap: SnapConfig {
                enabled: false,
                on_rebuild: false,
                ..SnapConfig::default()
            },
            ..Self::default()
        }
    }

    /// Vertical cylinder over a triple-buffered track.
    pub fn cylinder() -> Self {
        Self {
            axis: Axis::Vertical,
            wrap: WrapStrategy::TripleBuffer { guard: 0.25 },
            shape: ShapeConfig {
                strategy: ShapeStrategy::Cylindrical {
                    arc_degrees: default_arc(),
                    radius: default_radius(),
                    fade_onset_degrees: default_onset(),
                },
                min_scale: 0.7,
                min_opacity: 0.0,
                repack: false,
                ..ShapeConfig::default()
            },
            ..Self::default()
        }
    }

    /// Parse a (possibly partial) JSON config and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, CarouselError> {
        let cfg: Config =
            serde_json::from_str(json).map_err(|e| CarouselError::ConfigParse(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Pixels of travel per unit of virtual time.
    #[inline]
    pub fn pixels_per_second(&self) -> f32 {
        self.timeline_speed * 100.0
    }

    /// Check ranges and cross-field consistency.
    pub fn validate(&self) -> Result<(), CarouselError> {
        check(
            self.timeline_speed.is_finite() && self.timeline_speed > 0.0,
            "timeline_speed must be finite and > 0",
        )?;
        check(
            self.autoplay_speed.is_finite(),
            "autoplay_speed must be finite",
        )?;
        check(
            self.change_epsilon.is_finite() && self.change_epsilon >= 0.0,
            "change_epsilon must be finite and >= 0",
        )?;

        match self.wrap {
            WrapStrategy::Bounded { lead_items } => check(
                lead_items.is_finite() && lead_items >= 0.0,
                "bounded lead_items must be finite and >= 0",
            )?,
            WrapStrategy::Modular => {}
            WrapStrategy::TripleBuffer { guard } => check(
                guard > 0.0 && guard < 0.5,
                "triple buffer guard must be in (0, 0.5)",
            )?,
        }

        let s = &self.shape;
        let all_finite = [
            s.max_scale,
            s.min_scale,
            s.max_opacity,
            s.min_opacity,
            s.falloff_exponent,
            s.hero_boost,
            s.hero_margin,
        ]
        .iter()
        .all(|v| v.is_finite());
        check(all_finite, "shape values must be finite")?;
        check(
            s.min_scale >= 0.0 && s.max_scale >= s.min_scale,
            "shape scale range must satisfy 0 <= min_scale <= max_scale",
        )?;
        check(
            (0.0..=1.0).contains(&s.min_opacity)
                && (0.0..=1.0).contains(&s.max_opacity)
                && s.max_opacity >= s.min_opacity,
            "shape opacity range must satisfy 0 <= min_opacity <= max_opacity <= 1",
        )?;
        check(s.falloff_exponent > 0.0, "falloff_exponent must be > 0")?;
        check(s.hero_boost >= 0.0, "hero_boost must be >= 0")?;
        check(
            s.hero_margin > 0.0,
            "hero_margin must be > 0 so the hero strictly dominates",
        )?;
        if let Some(d) = s.max_distance {
            check(d.is_finite() && d >= 0.0, "max_distance must be finite and >= 0")?;
        }
        if let ShapeStrategy::Cylindrical {
            arc_degrees,
            radius,
            fade_onset_degrees,
        } = s.strategy
        {
            check(
                arc_degrees > 0.0 && arc_degrees < 180.0,
                "cylinder arc_degrees must be in (0, 180)",
            )?;
            check(
                radius.is_finite() && radius >= 0.0,
                "cylinder radius must be finite and >= 0",
            )?;
            check(
                fade_onset_degrees >= 0.0 && fade_onset_degrees < arc_degrees,
                "cylinder fade_onset_degrees must be in [0, arc_degrees)",
            )?;
        }

        let d = &self.drag;
        check(
            d.throw_threshold.is_finite() && d.throw_threshold >= 0.0,
            "throw_threshold must be finite and >= 0",
        )?;
        check(
            d.inertia_resistance.is_finite() && d.inertia_resistance > 0.0,
            "inertia_resistance must be finite and > 0",
        )?;
        check(
            (0.0..1.0).contains(&d.drag_resistance),
            "drag_resistance must be in [0, 1)",
        )?;
        check(
            d.settle_velocity.is_finite() && d.settle_velocity > 0.0,
            "settle_velocity must be finite and > 0",
        )?;
        check(
            d.max_throw_ms.is_finite() && d.max_throw_ms > 0.0,
            "max_throw_ms must be finite and > 0",
        )?;

        check(
            self.snap.duration_ms.is_finite() && self.snap.duration_ms >= 0.0,
            "snap duration_ms must be finite and >= 0",
        )?;
        Ok(())
    }
}
