//! Vizij Carousel Core (host-agnostic)
//!
//! Infinite-loop drag and inertia carousel. The engine measures host geometry
//! through a `GeometryProvider`, keeps a running scroll position, and emits
//! per-slot transforms (offset, scale, opacity, rotation, depth) through
//! `Outputs`. Adapters own the frame clock, pointer capture and the DOM (or
//! whatever the host renders into).

pub mod config;
pub mod drag;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod inputs;
pub mod interp;
pub mod layout;
pub mod loop_math;
pub mod outputs;
mod scratch;
pub mod seam;
pub mod settle;
pub mod shape;
pub mod snap;

// Re-exports for consumers (adapters)
pub use config::{
    Axis, Config, DragConfig, FocusAnchor, ShapeConfig, ShapeStrategy, SnapConfig, WrapStrategy,
};
pub use drag::{DragPhase, DragSession, InertiaStep, ReleaseOutcome, Session};
pub use engine::Engine;
pub use error::CarouselError;
pub use geometry::{ContainerBounds, GeometryProvider, GeometrySnapshot, ItemRect};
pub use inputs::{Command, Inputs, PointerEvent};
pub use interp::Easing;
pub use layout::{Item, LayoutCache, Track};
pub use loop_math::{wrap, wrap_index, ItemSegment, LoopTimeline};
pub use outputs::{CarouselEvent, Change, CursorHint, ItemTransform, Outputs, RenderSink};
pub use seam::SeamManager;
pub use settle::SettleScheduler;
pub use shape::{repack, repack_into, FocusState, ItemShape, ShapeFunction, Span};
pub use snap::{nearest_target, SnapController, SnapStep, SnapTarget};
