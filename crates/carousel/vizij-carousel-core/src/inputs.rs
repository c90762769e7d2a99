//! Input contracts for the core engine.
//!
//! Adapters (web/native) translate their pointer library's callbacks into
//! `PointerEvent`s and pass them, with any commands, into `Engine::update()`.

use serde::{Deserialize, Serialize};

/// One sample from the pointer/drag source, along the engine axis.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PointerEvent {
    Press { pos: f32 },
    Move { pos: f32 },
    /// Signed release speed in px/s.
    Release { velocity: f32 },
}

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    SnapToFocus {
        #[serde(default = "yes")]
        animate: bool,
    },
    SnapToIndex {
        index: usize,
        #[serde(default = "yes")]
        animate: bool,
    },
    Next,
    Previous,
    RequestRebuild,
    AssetsReady,
    ResetSession,
}

fn yes() -> bool {
    true
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Inputs {
    /// Commands applied before pointer events.
    #[serde(default)]
    pub commands: Vec<Command>,
    /// Pointer events applied in order before the frame advances.
    #[serde(default)]
    pub pointer: Vec<PointerEvent>,
}
