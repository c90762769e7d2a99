use std::collections::HashMap;

use vizij_carousel_core::{
    CarouselEvent, Config, ContainerBounds, Engine, GeometrySnapshot, ItemTransform, Outputs,
    WrapStrategy,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!(
        (a - b).abs() <= eps,
        "approx failed: left={a} right={b} eps={eps}"
    );
}

fn bounds(start: f32, end: f32) -> ContainerBounds {
    ContainerBounds {
        inner_start: start,
        inner_end: end,
    }
}

fn transform(out: &Outputs, slot: usize) -> ItemTransform {
    out.change_for(slot)
        .unwrap_or_else(|| panic!("no change emitted for slot {slot}"))
        .transform
}

/// Five items of extent 100 centered in a 1000 px container: item 2 sits on
/// the focus at rest.
#[test]
fn centered_item_becomes_hero_on_first_layout() {
    let mut engine = Engine::new(Config::default());
    let mut geo = GeometrySnapshot::uniform(5, 100.0, 0.0, 250.0, bounds(0.0, 1000.0));
    let out = engine.rebuild(&mut geo).clone();

    assert_eq!(engine.hero_index(), Some(2));
    assert!(out.events.contains(&CarouselEvent::Rebuilt {
        items: 5,
        period: 500.0
    }));
    assert!(out.events.contains(&CarouselEvent::HeroChanged {
        previous: None,
        current: 2
    }));
    assert_eq!(out.changes.len(), 5);

    let cfg = engine.config().shape.clone();
    let hero = transform(&out, 2);
    assert!(hero.scale >= cfg.max_scale);
    approx(hero.scale, cfg.hero_scale(), 1e-6);
    approx(hero.offset, 0.0, 1e-4);
    for slot in [0, 1, 3, 4] {
        let t = transform(&out, slot);
        assert!(t.scale < hero.scale, "slot {slot} rivals the hero");
        assert!(t.opacity < hero.opacity);
    }
    // symmetric neighbours mirror each other
    approx(transform(&out, 1).offset, -transform(&out, 3).offset, 1e-3);
    approx(transform(&out, 1).scale, transform(&out, 3).scale, 1e-6);
}

/// Bounded track of 5 × 100 in a 300 px container: range is [-200, 0].
#[test]
fn bounded_drag_moves_items_and_clamps() {
    let mut cfg = Config::default();
    cfg.wrap = WrapStrategy::Bounded { lead_items: 0.0 };
    cfg.shape.repack = false;
    let mut engine = Engine::new(cfg);
    let mut geo = GeometrySnapshot::uniform(5, 100.0, 0.0, 0.0, bounds(0.0, 300.0));
    engine.rebuild(&mut geo);
    assert_eq!(engine.wrap_range(), Some((-200.0, 0.0)));

    engine.on_press(0.0);
    let out = engine.on_move(-150.0).clone();
    approx(engine.position(), -150.0, 1e-5);
    approx(transform(&out, 0).offset, -150.0, 1e-5);

    engine.on_move(-400.0);
    approx(engine.position(), -200.0, 1e-5);
    engine.on_move(90.0);
    approx(engine.position(), 0.0, 1e-5);
}

#[test]
fn bounded_lead_items_bias_the_range() {
    let mut cfg = Config::default();
    cfg.wrap = WrapStrategy::Bounded { lead_items: 1.0 };
    let mut engine = Engine::new(cfg);
    let mut geo = GeometrySnapshot::uniform(5, 100.0, 0.0, 0.0, bounds(0.0, 300.0));
    engine.rebuild(&mut geo);
    assert_eq!(engine.wrap_range(), Some((-300.0, 0.0)));
}

#[test]
fn content_that_fits_disables_bounded_drag() {
    let mut cfg = Config::default();
    cfg.wrap = WrapStrategy::Bounded { lead_items: 0.0 };
    let mut engine = Engine::new(cfg);
    let mut geo = GeometrySnapshot::uniform(2, 100.0, 0.0, 0.0, bounds(0.0, 600.0));
    engine.rebuild(&mut geo);
    assert_eq!(engine.wrap_range(), Some((0.0, 0.0)));

    let out = engine.on_press(0.0);
    assert!(out.events.is_empty());
    engine.on_move(-80.0);
    assert_eq!(engine.position(), 0.0);
}

#[test]
fn modular_drag_offsets_are_congruent_to_position() {
    let mut cfg = Config::default();
    cfg.shape.repack = false;
    let mut engine = Engine::new(cfg);
    let mut geo = GeometrySnapshot::uniform(5, 100.0, 0.0, 0.0, bounds(0.0, 300.0));
    engine.rebuild(&mut geo);

    engine.on_press(0.0);
    let out = engine.on_move(-150.0).clone();
    approx(engine.position(), -150.0, 1e-5);
    // item 0 wrapped to the far end: -150 + one period
    approx(transform(&out, 0).offset, 350.0, 1e-3);
    approx(transform(&out, 2).offset, -150.0, 1e-3);
}

#[test]
fn empty_geometry_renders_nothing() {
    let mut engine = Engine::new(Config::default());
    let mut geo = GeometrySnapshot {
        container: bounds(0.0, 600.0),
        ..GeometrySnapshot::default()
    };
    let out = engine.rebuild(&mut geo).clone();
    assert!(out.changes.is_empty());
    assert_eq!(
        out.events,
        vec![CarouselEvent::Rebuilt {
            items: 0,
            period: 0.0
        }]
    );

    let mut calls = 0;
    let mut sink = |_slot: usize, _t: &ItemTransform| calls += 1;
    out.apply_to(&mut sink);
    assert!(engine.on_press(10.0).is_empty());
    assert!(engine.tick(16.0, &mut geo).changes.is_empty());
    assert_eq!(calls, 0);
}

/// Many resize notifications in a row collapse into one settled measurement
/// and one confirmation pass.
#[test]
fn resize_storm_converges_to_one_settled_rebuild() {
    let mut engine = Engine::new(Config::default());
    let mut geo = GeometrySnapshot::uniform(5, 100.0, 0.0, 250.0, bounds(0.0, 1000.0));
    engine.rebuild(&mut geo);

    let mut events = Vec::new();
    for _ in 0..12 {
        events.extend(engine.resize().events.iter().cloned());
        events.extend(engine.tick(16.0, &mut geo).events.iter().cloned());
    }
    let rebuilds = |evs: &[CarouselEvent]| {
        evs.iter()
            .filter(|e| matches!(e, CarouselEvent::Rebuilt { .. }))
            .count()
    };
    assert_eq!(rebuilds(&events), 0);
    assert!(engine.wants_frames());

    let mut settled = Vec::new();
    for _ in 0..6 {
        settled.extend(engine.tick(16.0, &mut geo).events.iter().cloned());
    }
    assert_eq!(rebuilds(&settled), 2);
    assert!(!engine.wants_frames());
    assert_eq!(engine.hero_index(), Some(2));

    events.extend(settled);
    let requested = events
        .iter()
        .filter(|e| **e == CarouselEvent::ClockRequested)
        .count();
    let released = events
        .iter()
        .filter(|e| **e == CarouselEvent::ClockReleased)
        .count();
    assert_eq!((requested, released), (1, 1));
}

#[test]
fn resized_geometry_is_remeasured_after_settle() {
    let mut engine = Engine::new(Config::default());
    let mut geo = GeometrySnapshot::uniform(5, 100.0, 0.0, 250.0, bounds(0.0, 1000.0));
    engine.rebuild(&mut geo);

    let mut wider = GeometrySnapshot::uniform(5, 160.0, 0.0, 100.0, bounds(0.0, 1000.0));
    engine.notify_assets_ready();
    for _ in 0..4 {
        engine.tick(16.0, &mut wider);
    }
    approx(engine.layout().track().total_extent(), 800.0, 1e-4);
    assert_eq!(engine.slot_count(), 5);
}

#[test]
fn render_is_idempotent_once_applied() {
    let mut engine = Engine::new(Config::default());
    let mut geo = GeometrySnapshot::uniform(5, 100.0, 0.0, 250.0, bounds(0.0, 1000.0));
    engine.rebuild(&mut geo);
    assert!(engine.render().is_empty());
}

#[test]
fn sink_receives_latest_transform_per_slot() {
    let mut engine = Engine::new(Config::default());
    let mut geo = GeometrySnapshot::uniform(4, 100.0, 10.0, 0.0, bounds(0.0, 440.0));
    let mut applied: HashMap<usize, ItemTransform> = HashMap::new();
    {
        let mut sink = |slot: usize, t: &ItemTransform| {
            applied.insert(slot, *t);
        };
        engine.rebuild(&mut geo).apply_to(&mut sink);
        engine.on_press(0.0).apply_to(&mut sink);
        engine.on_move(-30.0).apply_to(&mut sink);
    }
    assert_eq!(applied.len(), 4);
    let hero = engine.hero_index().expect("hero");
    let hero_t = applied[&hero];
    for (slot, t) in &applied {
        if *slot != hero {
            assert!(t.scale < hero_t.scale);
        }
    }
}

#[test]
fn try_new_rejects_invalid_config() {
    let mut cfg = Config::default();
    cfg.wrap = WrapStrategy::TripleBuffer { guard: 0.5 };
    assert!(Engine::try_new(cfg).is_err());

    let mut cfg = Config::default();
    cfg.shape.hero_margin = 0.0;
    assert!(Engine::try_new(cfg).is_err());
}
