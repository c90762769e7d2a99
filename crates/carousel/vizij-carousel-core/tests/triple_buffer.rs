use std::collections::HashMap;

use vizij_carousel_core::{
    Config, ContainerBounds, Engine, GeometrySnapshot, ItemTransform, WrapStrategy,
};

fn approx(a: f32, b: f32, eps: f32) {
    assert!(
        (a - b).abs() <= eps,
        "approx failed: left={a} right={b} eps={eps}"
    );
}

fn cfg() -> Config {
    let mut cfg = Config::default();
    cfg.wrap = WrapStrategy::TripleBuffer { guard: 0.25 };
    cfg.shape.repack = false;
    // focus sits exactly between two items; keep the rest position at 0
    cfg.snap.on_rebuild = false;
    cfg
}

/// Four 100 px items, no gap: one copy spans 400 px.
fn geo() -> GeometrySnapshot {
    GeometrySnapshot::uniform(
        4,
        100.0,
        0.0,
        0.0,
        ContainerBounds {
            inner_start: 0.0,
            inner_end: 400.0,
        },
    )
}

/// Drive a pointer sequence and record the latest transform per slot.
fn drive(moves: &[f32]) -> (Engine, HashMap<usize, ItemTransform>) {
    let mut engine = Engine::new(cfg());
    let mut g = geo();
    let mut applied = HashMap::new();
    {
        let mut sink = |slot: usize, t: &ItemTransform| {
            applied.insert(slot, *t);
        };
        engine.rebuild(&mut g).apply_to(&mut sink);
        engine.on_press(0.0).apply_to(&mut sink);
        for &m in moves {
            engine.on_move(m).apply_to(&mut sink);
        }
    }
    (engine, applied)
}

#[test]
fn three_copies_are_rendered() {
    let (engine, applied) = drive(&[]);
    assert_eq!(engine.slot_count(), 12);
    assert_eq!(applied.len(), 12);
    assert_eq!(engine.wrap_range(), Some((-600.0, 600.0)));
    approx(applied[&0].offset, -400.0, 1e-4);
    approx(applied[&4].offset, 0.0, 1e-4);
    approx(applied[&8].offset, 400.0, 1e-4);
}

/// it should re-center by a whole copy without changing what is rendered
#[test]
fn recentering_is_invisible() {
    let (dragged, across) = drive(&[290.0, 310.0]);
    approx(dragged.position(), -90.0, 1e-4);

    let (direct, straight) = drive(&[-90.0]);
    approx(direct.position(), -90.0, 1e-4);

    for slot in 0..12 {
        let a = across[&slot];
        let b = straight[&slot];
        assert!(a.approx_eq(&b, 1e-3), "slot {slot}: {a:?} vs {b:?}");
    }
    assert_eq!(dragged.hero_index(), direct.hero_index());
}

#[test]
fn long_drag_stays_inside_the_guard_band() {
    let mut engine = Engine::new(cfg());
    let mut g = geo();
    engine.rebuild(&mut g);
    engine.on_press(0.0);
    let mut pointer = 0.0;
    for _ in 0..200 {
        pointer += 47.0;
        engine.on_move(pointer);
        let p = engine.position();
        assert!(p.abs() < 300.0, "position {p} escaped the guard band");
        // visually equivalent to the raw pointer travel
        let r = (p - pointer).rem_euclid(400.0);
        assert!(r < 1e-2 || 400.0 - r < 1e-2, "drifted: {p} vs {pointer}");
    }
}

#[test]
fn throw_across_many_copies_settles_on_an_item() {
    let mut engine = Engine::new(cfg());
    let mut g = geo();
    engine.rebuild(&mut g);
    engine.on_press(0.0);
    engine.on_move(5.0);
    engine.on_release(9000.0);
    for _ in 0..2000 {
        engine.tick(16.0, &mut g);
        assert!(engine.position().abs() < 300.0 + 1e-3);
        if !engine.wants_frames() {
            break;
        }
    }
    assert!(!engine.wants_frames());
    let p = engine.position();
    // focus 200, item centers at 50 + 100k: centered positions are 50 mod 100
    let r = (p - 50.0).rem_euclid(100.0);
    assert!(r < 1e-2 || 100.0 - r < 1e-2, "settled off-item at {p}");
}
