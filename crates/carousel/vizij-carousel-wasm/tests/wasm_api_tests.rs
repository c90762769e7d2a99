#![cfg(target_arch = "wasm32")]
use serde_wasm_bindgen as swb;
use vizij_carousel_core::{ContainerBounds, GeometrySnapshot, Outputs};
use vizij_carousel_wasm::{abi_version, VizijCarousel};
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

use serde::Serialize;
use serde_json::json;

fn js(v: serde_json::Value) -> JsValue {
    v.serialize(&swb::Serializer::json_compatible()).unwrap()
}

fn strip_snapshot() -> JsValue {
    let snap = GeometrySnapshot::uniform(
        5,
        100.0,
        0.0,
        250.0,
        ContainerBounds {
            inner_start: 0.0,
            inner_end: 1000.0,
        },
    );
    swb::to_value(&snap).unwrap()
}

fn outputs(v: JsValue) -> Outputs {
    swb::from_value(v).expect("outputs deserialize")
}

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn abi_is_1() {
    assert_eq!(abi_version(), 1);
}

#[wasm_bindgen_test]
fn construct_with_defaults_and_partial_config() {
    assert!(VizijCarousel::new(JsValue::UNDEFINED).is_ok());
    let cfg = js(json!({ "snap": { "duration_ms": 200.0 } }));
    assert!(VizijCarousel::new(cfg).is_ok());
    assert!(VizijCarousel::from_preset("clients").is_ok());
    assert!(VizijCarousel::from_preset("nope").is_err());
}

#[wasm_bindgen_test]
fn invalid_config_is_rejected() {
    let cfg = js(json!({ "wrap": { "kind": "triple_buffer", "guard": 0.5 } }));
    assert!(VizijCarousel::new(cfg).is_err());
}

#[wasm_bindgen_test]
fn rebuild_emits_every_slot() {
    let mut c = VizijCarousel::new(JsValue::NULL).unwrap();
    let out = outputs(c.rebuild(strip_snapshot()).unwrap());
    assert_eq!(out.changes.len(), 5);
    assert_eq!(c.slot_count(), 5);
    assert_eq!(c.hero_index(), 2);
}

#[wasm_bindgen_test]
fn drag_release_and_tick_until_idle() {
    let mut c = VizijCarousel::new(JsValue::NULL).unwrap();
    c.rebuild(strip_snapshot()).unwrap();
    c.press(0.0).unwrap();
    let moved = outputs(c.drag_move(-60.0).unwrap());
    assert!(!moved.changes.is_empty());
    c.release(-800.0).unwrap();
    assert!(c.wants_frames());

    for _ in 0..2000 {
        c.tick(16.0, JsValue::UNDEFINED).unwrap();
        if !c.wants_frames() {
            break;
        }
    }
    assert!(!c.wants_frames());
    let p = c.position();
    assert!((p - (p / 100.0).round() * 100.0).abs() < 1e-3);
}

#[wasm_bindgen_test]
fn flush_to_calls_the_sink_per_change() {
    let mut c = VizijCarousel::new(JsValue::NULL).unwrap();
    c.rebuild(strip_snapshot()).unwrap();
    let seen = js_sys::Array::new();
    let sink = js_sys::Function::new_with_args("slot, t", "this.push(slot);").bind(&seen);
    c.flush_to(sink);
    assert_eq!(seen.length(), 5);
}

#[wasm_bindgen_test]
fn update_accepts_commands_and_pointer() {
    let mut c = VizijCarousel::new(JsValue::NULL).unwrap();
    c.rebuild(strip_snapshot()).unwrap();
    let inputs = js(json!({
        "commands": [{ "type": "snap_to_index", "index": 4, "animate": false }],
        "pointer": []
    }));
    c.update(16.0, inputs).unwrap();
    assert_eq!(c.hero_index(), 4);
}

#[wasm_bindgen_test]
fn destroy_is_idempotent() {
    let mut c = VizijCarousel::new(JsValue::NULL).unwrap();
    c.rebuild(strip_snapshot()).unwrap();
    c.destroy().unwrap();
    let out = outputs(c.destroy().unwrap());
    assert!(out.is_empty());
    assert!(!c.wants_frames());
    let out = outputs(c.press(0.0).unwrap());
    assert!(out.is_empty());
}
