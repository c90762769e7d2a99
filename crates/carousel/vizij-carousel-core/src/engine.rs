//! Engine: composition root tying layout, loop math, shaping, seam, drag and snap.
//!
//! Methods:
//! - new / try_new, rebuild (measure now), request_rebuild / resize / notify_assets_ready (settled)
//! - on_press / on_move / on_release (pointer source), tick (frame clock), update (inputs → tick)
//! - render, snap_to / snap_to_focus / snap_to_index / next / previous
//! - reset_session, destroy
//!
//! Every public call clears and refills one `Outputs` buffer: at most one
//! change per slot, then clock edge events.

use log::{debug, trace, warn};

use crate::config::{Config, WrapStrategy};
use crate::drag::{DragPhase, DragSession, InertiaStep, ReleaseOutcome, Session};
use crate::error::CarouselError;
use crate::geometry::GeometryProvider;
use crate::inputs::{Command, Inputs, PointerEvent};
use crate::layout::LayoutCache;
use crate::loop_math::{wrap, wrap_index, LoopTimeline};
use crate::outputs::{CarouselEvent, Change, CursorHint, ItemTransform, Outputs};
use crate::scratch::{Scratch, Slot};
use crate::seam::{SeamManager, COPIES};
use crate::settle::SettleScheduler;
use crate::shape::{FocusState, ItemShape, ShapeFunction};
use crate::snap::{nearest_target, SnapController};

pub struct Engine {
    cfg: Config,
    layout: LayoutCache,
    timeline: LoopTimeline,
    seam: SeamManager,
    shape: ShapeFunction,
    session: Session,
    drag: DragSession,
    snap: SnapController,
    focus: FocusState,
    hero_item: Option<usize>,
    settle: SettleScheduler,
    /// Last transform emitted per slot; `None` until first emitted.
    applied: Vec<Option<ItemTransform>>,
    clock_active: bool,
    destroyed: bool,
    outputs: Outputs,
    scratch: Scratch,
}

impl Engine {
    /// Create an engine with no layout. Call `rebuild` (or `request_rebuild`
    /// and tick) once the host has laid out its items.
    pub fn new(cfg: Config) -> Self {
        let guard = match cfg.wrap {
            WrapStrategy::TripleBuffer { guard } => guard,
            _ => 0.25,
        };
        Self {
            drag: DragSession::new(&cfg.drag),
            settle: SettleScheduler::new(cfg.settle_frames, cfg.settle_confirm),
            shape: ShapeFunction::new(&cfg.shape, 0.0),
            seam: SeamManager::new(0.0, guard),
            cfg,
            layout: LayoutCache::empty(),
            timeline: LoopTimeline::default(),
            session: Session::default(),
            snap: SnapController::new(),
            focus: FocusState::default(),
            hero_item: None,
            applied: Vec::new(),
            clock_active: false,
            destroyed: false,
            outputs: Outputs::default(),
            scratch: Scratch::default(),
        }
    }

    /// Validating constructor.
    pub fn try_new(cfg: Config) -> Result<Self, CarouselError> {
        cfg.validate()?;
        Ok(Self::new(cfg))
    }

    // ---- accessors ----

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    #[inline]
    pub fn position(&self) -> f32 {
        self.session.position
    }

    /// Position mapped into the canonical band. Renders identically to
    /// `position()` under every strategy.
    pub fn normalized_position(&self) -> f32 {
        match (self.cfg.wrap, self.wrap_range()) {
            (WrapStrategy::Bounded { .. }, _) | (_, None) => self.session.position,
            (_, Some((lo, hi))) => wrap(self.session.position, lo, hi),
        }
    }

    #[inline]
    pub fn phase(&self) -> DragPhase {
        self.drag.phase()
    }

    #[inline]
    pub fn is_snapping(&self) -> bool {
        self.snap.is_active()
    }

    pub fn layout(&self) -> &LayoutCache {
        &self.layout
    }

    pub fn timeline(&self) -> &LoopTimeline {
        &self.timeline
    }

    /// Host index of the item currently holding focus.
    #[inline]
    pub fn hero_index(&self) -> Option<usize> {
        self.hero_item
    }

    /// Number of render slots the host must provide.
    pub fn slot_count(&self) -> usize {
        self.layout.source_count() * self.copies()
    }

    #[inline]
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Outputs from the most recent call.
    pub fn outputs(&self) -> &Outputs {
        &self.outputs
    }

    /// Canonical band for the active strategy: the clamp range when bounded,
    /// `[-E/2, E/2)` when modular, the three-copy band when triple-buffered.
    /// `None` before the first layout.
    pub fn wrap_range(&self) -> Option<(f32, f32)> {
        if self.layout.is_empty() {
            return None;
        }
        let period = self.layout.track().total_extent();
        match self.cfg.wrap {
            WrapStrategy::Bounded { .. } => self.bounded_range(),
            WrapStrategy::Modular => Some((-0.5 * period, 0.5 * period)),
            WrapStrategy::TripleBuffer { .. } => Some(self.seam.band()),
        }
    }

    /// Whether the host should keep delivering frame ticks.
    pub fn wants_frames(&self) -> bool {
        !self.destroyed
            && (self.settle.is_pending()
                || self.drag.phase() == DragPhase::Thrown
                || self.snap.is_active()
                || self.autoplay_active())
    }

    // ---- public entry points ----

    /// Measure now and re-render.
    pub fn rebuild(&mut self, geometry: &mut dyn GeometryProvider) -> &Outputs {
        self.outputs.clear();
        self.rebuild_inner(geometry);
        self.render_inner();
        self.finish_frame()
    }

    /// Schedule a settled rebuild; repeated requests coalesce into one.
    pub fn request_rebuild(&mut self) -> &Outputs {
        self.outputs.clear();
        self.arm_settle();
        self.finish_frame()
    }

    pub fn resize(&mut self) -> &Outputs {
        self.request_rebuild()
    }

    /// Fonts/images finished loading; measurements may have moved.
    pub fn notify_assets_ready(&mut self) -> &Outputs {
        self.request_rebuild()
    }

    /// Re-evaluate every slot and emit what changed.
    pub fn render(&mut self) -> &Outputs {
        self.outputs.clear();
        self.render_inner();
        self.finish_frame()
    }

    pub fn on_press(&mut self, pointer: f32) -> &Outputs {
        self.outputs.clear();
        self.press_inner(pointer);
        self.render_inner();
        self.finish_frame()
    }

    pub fn on_move(&mut self, pointer: f32) -> &Outputs {
        self.outputs.clear();
        self.move_inner(pointer);
        self.render_inner();
        self.finish_frame()
    }

    /// `velocity` is the signed release speed in px/s.
    pub fn on_release(&mut self, velocity: f32) -> &Outputs {
        self.outputs.clear();
        self.release_inner(velocity);
        self.render_inner();
        self.finish_frame()
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> &Outputs {
        self.outputs.clear();
        self.pointer_inner(event);
        self.render_inner();
        self.finish_frame()
    }

    /// Advance one frame by `dt_ms`. `geometry` is only read when a settled
    /// rebuild fires on this frame.
    pub fn tick(&mut self, dt_ms: f32, geometry: &mut dyn GeometryProvider) -> &Outputs {
        self.outputs.clear();
        self.tick_inner(dt_ms, geometry);
        self.render_inner();
        self.finish_frame()
    }

    /// Apply commands, then pointer events, then advance the frame.
    pub fn update(
        &mut self,
        dt_ms: f32,
        inputs: Inputs,
        geometry: &mut dyn GeometryProvider,
    ) -> &Outputs {
        self.outputs.clear();
        for cmd in inputs.commands {
            self.command_inner(cmd);
        }
        for event in inputs.pointer {
            self.pointer_inner(event);
        }
        self.tick_inner(dt_ms, geometry);
        self.render_inner();
        self.finish_frame()
    }

    /// Move to an explicit running position. Ignored while a pointer owns the
    /// position.
    pub fn snap_to(&mut self, target: f32, animate: bool) -> &Outputs {
        self.outputs.clear();
        if target.is_finite() && self.can_snap() {
            self.start_snap(target, animate);
        }
        self.render_inner();
        self.finish_frame()
    }

    /// Center the item nearest the focus.
    pub fn snap_to_focus(&mut self, animate: bool) -> &Outputs {
        self.outputs.clear();
        if self.can_snap() {
            self.snap_to_focus_inner(animate);
        }
        self.render_inner();
        self.finish_frame()
    }

    /// Bring host item `index` to the focus along the shortest path.
    pub fn snap_to_index(&mut self, index: usize, animate: bool) -> &Outputs {
        self.outputs.clear();
        if self.can_snap() {
            self.snap_to_index_inner(index, animate);
        }
        self.render_inner();
        self.finish_frame()
    }

    pub fn next(&mut self) -> &Outputs {
        self.outputs.clear();
        self.step_hero(1);
        self.render_inner();
        self.finish_frame()
    }

    pub fn previous(&mut self) -> &Outputs {
        self.outputs.clear();
        self.step_hero(-1);
        self.render_inner();
        self.finish_frame()
    }

    /// Drop drag/snap state and return to position 0.
    pub fn reset_session(&mut self) -> &Outputs {
        self.outputs.clear();
        self.reset_inner();
        self.render_inner();
        self.finish_frame()
    }

    /// Cancel every pending tween, throw and settle. Later calls are no-ops.
    pub fn destroy(&mut self) -> &Outputs {
        self.outputs.clear();
        if self.destroyed {
            return &self.outputs;
        }
        self.snap.cancel();
        self.drag.cancel(&mut self.session);
        self.settle.cancel();
        self.layout = LayoutCache::empty();
        self.timeline = LoopTimeline::default();
        self.applied.clear();
        self.scratch.clear();
        self.focus.reset();
        self.hero_item = None;
        self.destroyed = true;
        debug!("carousel: destroyed");
        self.finish_frame()
    }

    // ---- internals ----

    fn copies(&self) -> usize {
        match self.cfg.wrap {
            WrapStrategy::TripleBuffer { .. } => COPIES,
            _ => 1,
        }
    }

    /// Leading offset for the bounded strategy: `lead_items` first-item extents.
    fn lead(&self) -> f32 {
        match self.cfg.wrap {
            WrapStrategy::Bounded { lead_items } => {
                let first = self
                    .layout
                    .track()
                    .items()
                    .first()
                    .map(|i| i.base_extent)
                    .unwrap_or(0.0);
                lead_items * first
            }
            _ => 0.0,
        }
    }

    /// `[-(scrollable + lead), 0]`; zero width when the content fits.
    fn bounded_range(&self) -> Option<(f32, f32)> {
        if !matches!(self.cfg.wrap, WrapStrategy::Bounded { .. }) || self.layout.is_empty() {
            return None;
        }
        let track = self.layout.track();
        let content = (track.total_extent() - track.gap()).max(0.0);
        let scrollable = (content - self.layout.container().length()).max(0.0);
        let min = if scrollable > 0.0 {
            -(scrollable + self.lead())
        } else {
            0.0
        };
        Some((min, 0.0))
    }

    fn can_snap(&self) -> bool {
        !self.destroyed
            && matches!(self.drag.phase(), DragPhase::Idle | DragPhase::Released)
    }

    fn autoplay_active(&self) -> bool {
        self.cfg.autoplay_speed != 0.0
            && self.cfg.wrap.wraps()
            && !self.layout.is_empty()
            && self.layout.track().total_extent() > 0.0
            && self.drag.phase() == DragPhase::Idle
            && !self.snap.is_active()
    }

    fn arm_settle(&mut self) {
        if self.destroyed {
            return;
        }
        trace!("carousel: rebuild requested");
        self.settle.arm();
    }

    fn finish_frame(&mut self) -> &Outputs {
        let wants = self.wants_frames();
        if wants != self.clock_active {
            self.clock_active = wants;
            self.outputs.push_event(if wants {
                CarouselEvent::ClockRequested
            } else {
                CarouselEvent::ClockReleased
            });
        }
        &self.outputs
    }

    /// Shift every stored position (session, drag anchor, snap tween) together.
    fn shift_all(&mut self, delta: f32) {
        self.session.position += delta;
        self.drag.shift(delta);
        self.snap.shift(delta);
    }

    /// Write a position and apply the strategy's constraint to it.
    fn set_position(&mut self, position: f32) {
        if !position.is_finite() {
            warn!("carousel: ignoring non-finite position {position}");
            return;
        }
        self.session.position = position;
        match self.cfg.wrap {
            WrapStrategy::Bounded { .. } => {
                if let Some((lo, hi)) = self.bounded_range() {
                    self.session.position = position.clamp(lo, hi);
                }
            }
            WrapStrategy::Modular => {}
            WrapStrategy::TripleBuffer { .. } => {
                let shift = self.seam.recenter(position);
                if shift != 0.0 {
                    self.shift_all(shift);
                }
            }
        }
    }

    /// Bring a modular position back into its band. Layout is unchanged.
    fn normalize(&mut self) {
        if self.cfg.wrap != WrapStrategy::Modular {
            return;
        }
        let Some((lo, hi)) = self.wrap_range() else {
            return;
        };
        let p = self.session.position;
        let wrapped = wrap(p, lo, hi);
        if wrapped != p {
            trace!("carousel: normalized {p:.1} to {wrapped:.1}");
            self.shift_all(wrapped - p);
        }
    }

    fn rebuild_inner(&mut self, geometry: &mut dyn GeometryProvider) {
        if self.destroyed {
            return;
        }
        let previous_len = self.layout.track().len();
        self.layout = LayoutCache::measure(geometry, self.cfg.focus);

        let track = self.layout.track();
        let period = track.total_extent();
        let items = track.len();
        self.timeline = LoopTimeline::build(track, self.cfg.pixels_per_second());
        let guard = match self.cfg.wrap {
            WrapStrategy::TripleBuffer { guard } => guard,
            _ => 0.25,
        };
        self.seam = SeamManager::new(period, guard);
        self.shape = ShapeFunction::new(&self.cfg.shape, self.layout.container().length());

        // Transforms were reset for measuring; everything must be re-emitted.
        let slot_total = self.slot_count();
        self.applied.clear();
        self.applied.resize(slot_total, None);

        if items != previous_len {
            self.focus.reset();
        }

        self.outputs
            .push_event(CarouselEvent::Rebuilt { items, period });

        if self.layout.is_empty() {
            debug!("carousel: rebuild found no items; engine idle");
            self.snap.cancel();
            self.drag.cancel(&mut self.session);
            return;
        }
        if period <= 0.0 {
            warn!("carousel: degenerate geometry (period {period}); rendering neutral offsets");
        }
        debug!("carousel: rebuilt {items} items, period {period:.1}");

        let p = self.session.position;
        self.set_position(p);
        if self.drag.phase() == DragPhase::Idle && !self.snap.is_active() {
            self.normalize();
            if self.cfg.snap.enabled && self.cfg.snap.on_rebuild {
                self.snap_to_focus_inner(false);
            }
        }
    }

    fn compute_slots(&mut self) {
        self.scratch.slots.clear();
        if self.layout.is_empty() {
            return;
        }
        let position = self.session.position;
        let lead = self.lead();
        let source_count = self.layout.source_count();
        let items = self.layout.track().items();

        match self.cfg.wrap {
            WrapStrategy::Bounded { .. } => {
                let offset = position - lead;
                for item in items {
                    self.scratch.slots.push(Slot {
                        slot: item.index,
                        item: item.index,
                        offset,
                        start: item.base_offset + offset,
                        extent: item.base_extent,
                    });
                }
            }
            WrapStrategy::Modular => {
                for (k, item) in items.iter().enumerate() {
                    let offset = self.timeline.offset_for_position(k, position);
                    self.scratch.slots.push(Slot {
                        slot: item.index,
                        item: item.index,
                        offset,
                        start: item.base_offset + offset,
                        extent: item.base_extent,
                    });
                }
            }
            WrapStrategy::TripleBuffer { .. } => {
                for copy in 0..COPIES {
                    let offset = self.seam.copy_offset(copy) + position;
                    for item in items {
                        self.scratch.slots.push(Slot {
                            slot: copy * source_count + item.index,
                            item: item.index,
                            offset,
                            start: item.base_offset + offset,
                            extent: item.base_extent,
                        });
                    }
                }
            }
        }
    }

    fn render_inner(&mut self) {
        if self.destroyed || self.layout.is_empty() {
            return;
        }
        self.compute_slots();

        let focus = self.layout.focus();
        let scratch = &mut self.scratch;
        scratch.distances.clear();
        scratch
            .distances
            .extend(scratch.slots.iter().map(|s| s.center() - focus));
        let hero = self
            .shape
            .shape_slots(&scratch.distances, &mut self.focus, &mut scratch.shapes);

        if let Some(h) = hero {
            let item = self.scratch.slots[h].item;
            if self.hero_item != Some(item) {
                debug!("carousel: hero {:?} -> {item}", self.hero_item);
                self.outputs.push_event(CarouselEvent::HeroChanged {
                    previous: self.hero_item,
                    current: item,
                });
                self.hero_item = Some(item);
            }
        }

        self.scratch.deltas.clear();
        if let Some(h) = hero.filter(|_| self.cfg.shape.repack) {
            self.scratch.repack_deltas(h);
        }

        let eps = self.cfg.change_epsilon;
        let scratch = &self.scratch;
        for (i, slot) in scratch.slots.iter().enumerate() {
            let shape = scratch
                .shapes
                .get(i)
                .copied()
                .unwrap_or(ItemShape::NEUTRAL);
            let mut offset = slot.offset + scratch.deltas.get(i).copied().unwrap_or(0.0);
            if self.cfg.pixel_snap {
                offset = offset.round();
            }
            let transform = ItemTransform {
                offset,
                scale: shape.scale,
                opacity: shape.opacity,
                rotation: shape.rotation,
                depth: shape.depth,
            };
            let Some(entry) = self.applied.get_mut(slot.slot) else {
                continue;
            };
            let changed = match entry {
                Some(prev) => !prev.approx_eq(&transform, eps),
                None => true,
            };
            if changed {
                *entry = Some(transform);
                self.outputs.push_change(Change {
                    slot: slot.slot,
                    item: slot.item,
                    transform,
                });
            }
        }
    }

    fn snap_to_focus_inner(&mut self, animate: bool) {
        if self.destroyed || self.layout.is_empty() {
            return;
        }
        self.compute_slots();
        self.scratch.collect_centers();
        let Some(t) = nearest_target(
            &self.scratch.distances,
            self.layout.focus(),
            self.session.position,
        ) else {
            return;
        };
        self.start_snap(t.target, animate);
    }

    fn snap_to_index_inner(&mut self, index: usize, animate: bool) {
        if self.destroyed || self.layout.is_empty() {
            return;
        }
        self.compute_slots();
        let focus = self.layout.focus();
        let best = self
            .scratch
            .slots
            .iter()
            .filter(|s| s.item == index)
            .map(|s| focus - s.center())
            .min_by(|a, b| a.abs().total_cmp(&b.abs()));
        let Some(mut delta) = best else {
            debug!("carousel: snap_to_index({index}) has no such item");
            return;
        };
        let period = self.layout.track().total_extent();
        if self.cfg.wrap == WrapStrategy::Modular && period > 0.0 {
            delta = wrap(delta, -0.5 * period, 0.5 * period);
        }
        self.start_snap(self.session.position + delta, animate);
    }

    fn step_hero(&mut self, direction: isize) {
        if !self.can_snap() || self.layout.is_empty() {
            return;
        }
        let items = self.layout.track().items();
        let current = self
            .hero_item
            .and_then(|h| items.iter().position(|i| i.index == h))
            .unwrap_or(0);
        let len = items.len();
        let next = current as isize + direction;
        let k = if self.cfg.wrap.wraps() {
            wrap_index(next, len)
        } else {
            next.clamp(0, len as isize - 1) as usize
        };
        let index = items[k].index;
        self.snap_to_index_inner(index, true);
    }

    /// Hand a target to the snap controller. Bounded targets are clamped first.
    fn start_snap(&mut self, target: f32, animate: bool) {
        let target = match self.bounded_range() {
            Some((lo, hi)) => target.clamp(lo, hi),
            None => target,
        };
        let animating = self.snap.snap_to(
            &mut self.session,
            target,
            animate,
            self.cfg.snap.duration_ms,
            self.cfg.snap.easing,
        );
        if animating {
            debug!("carousel: snapping {:.1} -> {target:.1}", self.session.position);
            self.outputs
                .push_event(CarouselEvent::SnapStarted { target });
        } else {
            let p = self.session.position;
            self.set_position(p);
            self.after_snap();
        }
    }

    /// A snap reached its target: close a held release.
    fn after_snap(&mut self) {
        if self.drag.finish(&mut self.session) {
            self.outputs.push_event(CarouselEvent::DragEnded);
        }
    }

    fn settle_to_focus(&mut self) {
        if self.cfg.snap.enabled {
            self.snap_to_focus_inner(true);
        } else if self.drag.finish(&mut self.session) {
            self.outputs.push_event(CarouselEvent::DragEnded);
        }
    }

    fn press_inner(&mut self, pointer: f32) {
        if self.destroyed || self.layout.is_empty() || !pointer.is_finite() {
            return;
        }
        if let Some((lo, hi)) = self.bounded_range() {
            if hi - lo <= 0.0 {
                trace!("carousel: content fits the container; drag disabled");
                return;
            }
        }
        if self.snap.cancel() {
            trace!("carousel: snap interrupted by press");
        }
        let was_active = self.drag.phase().is_active();
        self.normalize();
        self.drag.press(pointer, &mut self.session);
        if !was_active {
            self.outputs.push_event(CarouselEvent::DragStarted);
        }
        self.outputs
            .push_event(CarouselEvent::CursorHint(CursorHint::Grabbing));
    }

    fn move_inner(&mut self, pointer: f32) {
        if self.destroyed || !pointer.is_finite() {
            return;
        }
        if let Some(p) = self.drag.drag_to(pointer, &mut self.session) {
            self.set_position(p);
        }
    }

    fn release_inner(&mut self, velocity: f32) {
        if self.destroyed {
            return;
        }
        let velocity = if velocity.is_finite() { velocity } else { 0.0 };
        let ends = self.cfg.release_without_throw_ends_immediately || !self.cfg.snap.enabled;
        let Some(outcome) = self.drag.release(velocity, &mut self.session, ends) else {
            return;
        };
        self.outputs
            .push_event(CarouselEvent::CursorHint(CursorHint::Grab));
        match outcome {
            ReleaseOutcome::Thrown => {
                self.outputs
                    .push_event(CarouselEvent::ThrowStarted { velocity });
            }
            ReleaseOutcome::Ended => {
                self.outputs.push_event(CarouselEvent::DragEnded);
                self.settle_to_focus();
            }
            ReleaseOutcome::Held => self.settle_to_focus(),
        }
    }

    fn pointer_inner(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::Press { pos } => self.press_inner(pos),
            PointerEvent::Move { pos } => self.move_inner(pos),
            PointerEvent::Release { velocity } => self.release_inner(velocity),
        }
    }

    fn command_inner(&mut self, cmd: Command) {
        match cmd {
            Command::SnapToFocus { animate } => {
                if self.can_snap() {
                    self.snap_to_focus_inner(animate);
                }
            }
            Command::SnapToIndex { index, animate } => {
                if self.can_snap() {
                    self.snap_to_index_inner(index, animate);
                }
            }
            Command::Next => self.step_hero(1),
            Command::Previous => self.step_hero(-1),
            Command::RequestRebuild | Command::AssetsReady => self.arm_settle(),
            Command::ResetSession => self.reset_inner(),
        }
    }

    fn reset_inner(&mut self) {
        if self.destroyed {
            return;
        }
        self.snap.cancel();
        if self.drag.phase().is_active() {
            self.outputs.push_event(CarouselEvent::DragEnded);
        }
        self.drag.cancel(&mut self.session);
        self.session = Session::default();
        self.set_position(0.0);
    }

    fn tick_inner(&mut self, dt_ms: f32, geometry: &mut dyn GeometryProvider) {
        if self.destroyed {
            return;
        }
        let dt_ms = if dt_ms.is_finite() { dt_ms.max(0.0) } else { 0.0 };

        if self.settle.on_frame() {
            self.rebuild_inner(geometry);
        }
        if self.layout.is_empty() {
            return;
        }

        if let Some(step) = self.drag.step(dt_ms, &mut self.session) {
            match step {
                InertiaStep::Moving(p) => self.set_position(p),
                InertiaStep::Settled(p) => {
                    self.set_position(p);
                    self.outputs.push_event(CarouselEvent::ThrowSettled {
                        position: self.session.position,
                    });
                    self.outputs.push_event(CarouselEvent::DragEnded);
                    if self.cfg.snap.enabled {
                        self.snap_to_focus_inner(true);
                    }
                }
            }
        } else if let Some(step) = self.snap.tick(dt_ms, &mut self.session) {
            self.set_position(step.position);
            if step.done {
                debug!("carousel: snap completed at {:.1}", self.session.position);
                self.outputs.push_event(CarouselEvent::SnapCompleted {
                    position: self.session.position,
                });
                self.after_snap();
            }
        } else if self.autoplay_active() {
            let p = self.session.position + self.cfg.autoplay_speed * dt_ms / 1000.0;
            self.set_position(p);
            self.normalize();
        }
    }
}
