//! Snap controller: eased tween of the running position onto a focus target.

use crate::drag::Session;
use crate::interp::functions::lerp_f32;
use crate::interp::Easing;

#[derive(Copy, Clone, Debug, PartialEq)]
struct SnapTween {
    from: f32,
    to: f32,
    elapsed_ms: f32,
    duration_ms: f32,
    easing: Easing,
}

/// Result of one snap frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapStep {
    pub position: f32,
    pub done: bool,
}

/// Slot nearest the focus and the position that centers it there.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SnapTarget {
    pub slot: usize,
    pub delta: f32,
    pub target: f32,
}

/// Find the center nearest `focus` (first wins on ties) and the position that
/// moves exactly that center onto the focus.
pub fn nearest_target(centers: &[f32], focus: f32, position: f32) -> Option<SnapTarget> {
    let mut best: Option<(usize, f32)> = None;
    for (i, c) in centers.iter().enumerate() {
        let d = (c - focus).abs();
        if !d.is_finite() {
            continue;
        }
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    let (slot, _) = best?;
    let delta = focus - centers[slot];
    Some(SnapTarget {
        slot,
        delta,
        target: position + delta,
    })
}

#[derive(Clone, Debug, Default)]
pub struct SnapController {
    tween: Option<SnapTween>,
}

impl SnapController {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn is_active(&self) -> bool {
        self.tween.is_some()
    }

    /// Target of the running tween.
    #[inline]
    pub fn target(&self) -> Option<f32> {
        self.tween.map(|t| t.to)
    }

    /// Jump (`animate == false` or zero duration) or start a tween toward
    /// `target`. Returns whether a tween is now running.
    pub fn snap_to(
        &mut self,
        session: &mut Session,
        target: f32,
        animate: bool,
        duration_ms: f32,
        easing: Easing,
    ) -> bool {
        if !animate || duration_ms <= 0.0 || session.position == target {
            self.tween = None;
            session.position = target;
            return false;
        }
        self.tween = Some(SnapTween {
            from: session.position,
            to: target,
            elapsed_ms: 0.0,
            duration_ms,
            easing,
        });
        true
    }

    /// Advance by `dt_ms`. The final frame lands exactly on the target.
    pub fn tick(&mut self, dt_ms: f32, session: &mut Session) -> Option<SnapStep> {
        let tween = self.tween.as_mut()?;
        tween.elapsed_ms += dt_ms.max(0.0);
        let step = if tween.elapsed_ms >= tween.duration_ms {
            SnapStep {
                position: tween.to,
                done: true,
            }
        } else {
            let u = tween.easing.apply(tween.elapsed_ms / tween.duration_ms);
            SnapStep {
                position: lerp_f32(tween.from, tween.to, u),
                done: false,
            }
        };
        if step.done {
            self.tween = None;
        }
        session.position = step.position;
        Some(step)
    }

    /// Move the tween endpoints by an exact period shift.
    pub fn shift(&mut self, delta: f32) {
        if let Some(t) = self.tween.as_mut() {
            t.from += delta;
            t.to += delta;
        }
    }

    pub fn cancel(&mut self) -> bool {
        self.tween.take().is_some()
    }
}
