use js_sys::Function;
use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_carousel_core::{
    Config, Engine, GeometrySnapshot, Inputs, ItemTransform, Outputs, RenderSink,
};

/// Browser-facing carousel. Geometry arrives as `GeometrySnapshot` objects;
/// the last snapshot is kept so `tick` can run a settled rebuild without one.
#[wasm_bindgen]
pub struct VizijCarousel {
    core: Engine,
    geometry: GeometrySnapshot,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

fn to_js(out: &Outputs) -> Result<JsValue, JsError> {
    swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
}

fn parse_snapshot(snapshot: JsValue) -> Result<GeometrySnapshot, JsError> {
    let snap: GeometrySnapshot = swb::from_value(snapshot)
        .map_err(|e| JsError::new(&format!("geometry error: {e}")))?;
    snap.validate()
        .map_err(|e| JsError::new(&format!("geometry error: {e}")))?;
    Ok(snap)
}

/// Forwards each changed slot to `sink(slot, transform)`.
struct JsSink {
    f: Function,
}

impl RenderSink for JsSink {
    fn apply(&mut self, slot: usize, transform: &ItemTransform) {
        let Ok(t) = swb::to_value(transform) else {
            return;
        };
        // A throwing sink must not poison the engine; the error surfaces in JS.
        let _ = self
            .f
            .call2(&JsValue::UNDEFINED, &JsValue::from(slot as u32), &t);
    }
}

#[wasm_bindgen]
impl VizijCarousel {
    /// Create a carousel. Pass a JSON config object (partial is fine) or
    /// undefined/null for defaults.
    /// Example:
    ///   new VizijCarousel({ wrap: { kind: "modular" }, snap: { duration_ms: 350 } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijCarousel, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
            Config::default()
        } else {
            swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
        };
        let core = Engine::try_new(cfg).map_err(|e| JsError::new(&e.to_string()))?;

        Ok(VizijCarousel {
            core,
            geometry: GeometrySnapshot::default(),
        })
    }

    /// Construct from one of the built-in presets: "services", "clients" or "cylinder".
    #[wasm_bindgen(js_name = fromPreset)]
    pub fn from_preset(name: &str) -> Result<VizijCarousel, JsError> {
        #[cfg(feature = "console_error_panic_hook")]
        console_error_panic_hook::set_once();

        let cfg = match name {
            "services" => Config::services_carousel(),
            "clients" => Config::clients_wheel(),
            "cylinder" => Config::cylinder(),
            other => return Err(JsError::new(&format!("unknown preset '{other}'"))),
        };
        Ok(VizijCarousel {
            core: Engine::new(cfg),
            geometry: GeometrySnapshot::default(),
        })
    }

    /// Measure `snapshot` now. Returns Outputs.
    #[wasm_bindgen]
    pub fn rebuild(&mut self, snapshot: JsValue) -> Result<JsValue, JsError> {
        self.geometry = parse_snapshot(snapshot)?;
        to_js(self.core.rebuild(&mut self.geometry))
    }

    /// Schedule a settled rebuild (resize, layout change).
    #[wasm_bindgen]
    pub fn request_rebuild(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.request_rebuild())
    }

    /// Fonts/images finished loading.
    #[wasm_bindgen]
    pub fn notify_assets_ready(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.notify_assets_ready())
    }

    #[wasm_bindgen]
    pub fn press(&mut self, pos: f32) -> Result<JsValue, JsError> {
        to_js(self.core.on_press(pos))
    }

    #[wasm_bindgen]
    pub fn drag_move(&mut self, pos: f32) -> Result<JsValue, JsError> {
        to_js(self.core.on_move(pos))
    }

    /// `velocity` is the signed release speed in px/s.
    #[wasm_bindgen]
    pub fn release(&mut self, velocity: f32) -> Result<JsValue, JsError> {
        to_js(self.core.on_release(velocity))
    }

    /// Advance one frame by `dt_ms`. An optional snapshot replaces the stored
    /// geometry before a settled rebuild would read it.
    #[wasm_bindgen]
    pub fn tick(&mut self, dt_ms: f32, snapshot: JsValue) -> Result<JsValue, JsError> {
        if !jsvalue_is_undefined_or_null(&snapshot) {
            self.geometry = parse_snapshot(snapshot)?;
        }
        to_js(self.core.tick(dt_ms, &mut self.geometry))
    }

    /// Apply inputs JSON (`{ commands, pointer }`) and advance by `dt_ms`.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f32, inputs_json: JsValue) -> Result<JsValue, JsError> {
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        to_js(self.core.update(dt_ms, inputs, &mut self.geometry))
    }

    #[wasm_bindgen]
    pub fn render(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.render())
    }

    /// Feed the changes of the most recent call to `sink(slot, transform)`.
    #[wasm_bindgen]
    pub fn flush_to(&self, sink: Function) {
        let mut js_sink = JsSink { f: sink };
        self.core.outputs().apply_to(&mut js_sink);
    }

    #[wasm_bindgen]
    pub fn snap_to_index(&mut self, index: u32, animate: bool) -> Result<JsValue, JsError> {
        to_js(self.core.snap_to_index(index as usize, animate))
    }

    #[wasm_bindgen]
    pub fn snap_to_focus(&mut self, animate: bool) -> Result<JsValue, JsError> {
        to_js(self.core.snap_to_focus(animate))
    }

    #[wasm_bindgen]
    pub fn next(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.next())
    }

    #[wasm_bindgen]
    pub fn previous(&mut self) -> Result<JsValue, JsError> {
        to_js(self.core.previous())
    }

    #[wasm_bindgen]
    pub fn wants_frames(&self) -> bool {
        self.core.wants_frames()
    }

    #[wasm_bindgen]
    pub fn slot_count(&self) -> u32 {
        self.core.slot_count() as u32
    }

    /// Host index of the focused item, or -1.
    #[wasm_bindgen]
    pub fn hero_index(&self) -> i32 {
        self.core.hero_index().map_or(-1, |h| h as i32)
    }

    #[wasm_bindgen]
    pub fn position(&self) -> f32 {
        self.core.position()
    }

    /// Cancel every tween, throw and pending rebuild. Later calls are no-ops.
    #[wasm_bindgen]
    pub fn destroy(&mut self) -> Result<JsValue, JsError> {
        self.geometry = GeometrySnapshot::default();
        to_js(self.core.destroy())
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
