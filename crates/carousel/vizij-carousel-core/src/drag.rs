//! Drag session state machine.
//!
//! Idle → Pressed → Dragging → (Thrown → Idle | Released → Idle | Idle).
//! The session only ever computes positions; the engine owns constraints
//! (clamping, re-centering) and rendering.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::DragConfig;

/// Running scroll state shared by the drag session and the snap controller.
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Virtual running offset (unbounded for the wrapping strategies).
    pub position: f32,
    /// Signed px/s; non-zero only while thrown.
    pub velocity: f32,
    pub dragging: bool,
    pub throwing: bool,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragPhase {
    #[default]
    Idle,
    /// Pointer down, no movement yet.
    Pressed,
    Dragging,
    /// Released with speed; inertia is running.
    Thrown,
    /// Released without speed; waiting for the follow-up snap before ending.
    Released,
}

impl DragPhase {
    #[inline]
    pub fn is_active(&self) -> bool {
        !matches!(self, Self::Idle)
    }
}

/// What a release turned into.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ReleaseOutcome {
    /// Inertia started.
    Thrown,
    /// Drag state ended on release.
    Ended,
    /// Held in `Released` until the caller finishes it.
    Held,
}

/// One inertia step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum InertiaStep {
    Moving(f32),
    /// Final position; the session is back to Idle.
    Settled(f32),
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct Inertia {
    origin: f32,
    velocity: f32,
    elapsed_ms: f32,
}

#[derive(Clone, Debug, Default)]
pub struct DragSession {
    cfg: DragConfig,
    phase: DragPhase,
    anchor_pointer: f32,
    anchor_position: f32,
    inertia: Option<Inertia>,
}

impl DragSession {
    pub fn new(cfg: &DragConfig) -> Self {
        Self {
            cfg: cfg.clone(),
            ..Self::default()
        }
    }

    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// Record the anchor pointer and current position. Any running throw is
    /// discarded.
    pub fn press(&mut self, pointer: f32, session: &mut Session) {
        self.phase = DragPhase::Pressed;
        self.anchor_pointer = pointer;
        self.anchor_position = session.position;
        self.inertia = None;
        session.dragging = true;
        session.throwing = false;
        session.velocity = 0.0;
    }

    /// New position for a pointer move, or `None` when not pressed.
    pub fn drag_to(&mut self, pointer: f32, session: &mut Session) -> Option<f32> {
        match self.phase {
            DragPhase::Pressed | DragPhase::Dragging => {}
            _ => return None,
        }
        self.phase = DragPhase::Dragging;
        let travel = (pointer - self.anchor_pointer) * (1.0 - self.cfg.drag_resistance);
        let position = self.anchor_position + travel;
        session.position = position;
        Some(position)
    }

    /// End the press. Returns `None` if no press was in progress.
    pub fn release(
        &mut self,
        velocity: f32,
        session: &mut Session,
        ends_immediately: bool,
    ) -> Option<ReleaseOutcome> {
        match self.phase {
            DragPhase::Pressed | DragPhase::Dragging => {}
            _ => return None,
        }
        if velocity.is_finite() && velocity.abs() > self.cfg.throw_threshold {
            debug!("carousel: thrown at {velocity:.1} px/s");
            self.phase = DragPhase::Thrown;
            self.inertia = Some(Inertia {
                origin: session.position,
                velocity,
                elapsed_ms: 0.0,
            });
            session.throwing = true;
            session.velocity = velocity;
            return Some(ReleaseOutcome::Thrown);
        }
        session.velocity = 0.0;
        if ends_immediately {
            self.phase = DragPhase::Idle;
            session.dragging = false;
            Some(ReleaseOutcome::Ended)
        } else {
            self.phase = DragPhase::Released;
            Some(ReleaseOutcome::Held)
        }
    }

    /// Advance inertia by `dt_ms`. Velocity decays as `v0·e^(-k·t)`, so the
    /// position approaches `origin + v0 / k`.
    pub fn step(&mut self, dt_ms: f32, session: &mut Session) -> Option<InertiaStep> {
        if self.phase != DragPhase::Thrown {
            return None;
        }
        let inertia = self.inertia.as_mut()?;
        inertia.elapsed_ms += dt_ms.max(0.0);

        let k = self.cfg.inertia_resistance;
        let t = inertia.elapsed_ms / 1000.0;
        let decay = (-k * t).exp();
        let position = inertia.origin + inertia.velocity / k * (1.0 - decay);
        let velocity = inertia.velocity * decay;

        session.position = position;
        session.velocity = velocity;

        if velocity.abs() < self.cfg.settle_velocity || inertia.elapsed_ms >= self.cfg.max_throw_ms
        {
            debug!("carousel: throw settled at {position:.1}");
            self.inertia = None;
            self.phase = DragPhase::Idle;
            session.velocity = 0.0;
            session.throwing = false;
            session.dragging = false;
            Some(InertiaStep::Settled(position))
        } else {
            Some(InertiaStep::Moving(position))
        }
    }

    /// Close a held release.
    pub fn finish(&mut self, session: &mut Session) -> bool {
        if self.phase != DragPhase::Released {
            return false;
        }
        self.phase = DragPhase::Idle;
        session.dragging = false;
        true
    }

    /// Move every stored position by an exact period shift.
    pub fn shift(&mut self, delta: f32) {
        self.anchor_position += delta;
        if let Some(inertia) = self.inertia.as_mut() {
            inertia.origin += delta;
        }
    }

    /// Drop back to Idle without any follow-up.
    pub fn cancel(&mut self, session: &mut Session) {
        self.phase = DragPhase::Idle;
        self.inertia = None;
        session.dragging = false;
        session.throwing = false;
        session.velocity = 0.0;
    }
}
