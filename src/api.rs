use crate::error;
use crate::interop::{new_obj, set_kv, to_js};
use crate::surface::{ControlHandle, DrawHandle, JsDrawSurface, MapHandle, SurfaceListeners};
use crate::Studio;
use studio::algorithms::merge::MergeOp;
use studio::config::StudioConfig;
use studio::model::FeatureCollection;
use studio::session::FeatureId;
use studio::surface::{ReconcileOutcome, SurfaceEvent};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen]
pub fn encode_feature_id(solution: u32, position: u32) -> String {
    FeatureId::encode(solution as usize, position as usize).to_string()
}

#[wasm_bindgen]
pub fn decode_feature_id_res(id: &str) -> JsValue {
    match FeatureId::from(id).decode() {
        Ok(position) => error::ok(JsValue::from_f64(position as f64)),
        Err(e) => error::from_studio(&e),
    }
}

fn outcome_value<T: serde::Serialize>(v: &T) -> JsValue {
    match to_js(v) {
        Ok(v) => error::ok(v),
        Err(e) => error::err("serialize", e.to_string(), None),
    }
}

fn reconcile_value(outcome: ReconcileOutcome) -> JsValue {
    outcome_value(&outcome)
}

#[wasm_bindgen]
impl Studio {
    /// `config` is a camelCase `StudioConfig` object; `undefined` uses defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<Studio, JsValue> {
        if config.is_undefined() || config.is_null() {
            return Ok(Studio::rs_new(StudioConfig::default()));
        }
        serde_wasm_bindgen::from_value::<StudioConfig>(config)
            .map(Studio::rs_new)
            .map_err(|e| error::invalid_arg("config", e))
    }

    pub fn map_options(&self) -> JsValue {
        let inner = self.inner();
        let config = inner.config();
        let o = new_obj();
        set_kv(&o, "center", &to_js(&config.map.center).unwrap_or(JsValue::NULL));
        set_kv(&o, "zoom", &JsValue::from_f64(config.map.zoom));
        set_kv(&o, "style", &JsValue::from_str(&config.map.style));
        if let Some(token) = config.access_token.as_deref() {
            set_kv(&o, "accessToken", &JsValue::from_str(token));
        }
        o.into()
    }

    pub fn has_credential(&self) -> bool {
        self.inner().config().has_credential()
    }
    pub fn set_access_token(&self, token: String) -> JsValue {
        let outcome = self.inner_mut().set_access_token(token);
        self.settle();
        reconcile_value(outcome)
    }

    /// `collections` is an array of feature collections, one per solution.
    pub fn load_solutions_res(&self, collections: JsValue) -> JsValue {
        let parsed = match serde_wasm_bindgen::from_value::<Vec<FeatureCollection>>(collections) {
            Ok(v) => v,
            Err(e) => return error::invalid_arg("collections", e),
        };
        let solutions = match studio::json::solutions_from_collections(parsed) {
            Ok(v) => v,
            Err(e) => return error::from_studio(&e),
        };
        let res = self.inner_mut().load_solutions(solutions);
        self.settle();
        match res {
            Ok(outcome) => reconcile_value(outcome),
            Err(e) => error::from_studio(&e),
        }
    }

    /// Attach the map, draw plugin and control container. A previously bound
    /// surface loses its listeners first.
    pub fn bind_surface(
        &mut self,
        map: MapHandle,
        draw: DrawHandle,
        control: ControlHandle,
    ) -> JsValue {
        self.listeners = None;
        let surface = JsDrawSurface::new(map.clone(), draw, control);
        let outcome = self.inner_mut().attach_surface(surface);
        self.listeners = Some(SurfaceListeners::bind(&map, &self.pump));
        self.settle();
        reconcile_value(outcome)
    }

    pub fn unbind_surface(&mut self) -> bool {
        self.listeners = None;
        self.inner_mut().detach_surface().is_some()
    }

    pub fn select_solution_res(&self, index: u32) -> JsValue {
        let res = self.inner_mut().select_solution(index as usize);
        self.settle();
        match res {
            Ok(outcome) => reconcile_value(outcome),
            Err(e) => error::from_studio(&e),
        }
    }

    /// Feed one tagged event (`{"event": "create", "features": [...]}`).
    pub fn dispatch_res(&self, event: JsValue) -> JsValue {
        let event = match serde_wasm_bindgen::from_value::<SurfaceEvent>(event) {
            Ok(v) => v,
            Err(e) => return error::invalid_arg("event", e),
        };
        self.dispatch_event(event)
    }

    pub fn click_control_res(&self, id: &str) -> JsValue {
        self.dispatch_event(SurfaceEvent::ControlClick { id: id.to_string() })
    }

    pub fn merge_selected_res(&self, op: &str) -> JsValue {
        let op = match op {
            "union" => MergeOp::Union,
            "intersect" => MergeOp::Intersect,
            other => return error::unknown_op(other),
        };
        let res = self.inner_mut().merge_selected(op);
        self.settle();
        match res {
            Ok(outcome) => outcome_value(&outcome),
            Err(e) => error::from_studio(&e),
        }
    }

    /// Active solution as a feature collection.
    pub fn active_polygons(&self) -> JsValue {
        let collection = studio::json::active_collection(self.inner().session());
        to_js(&collection).unwrap_or(JsValue::NULL)
    }
    /// Every solution, overlays applied.
    pub fn snapshot(&self) -> JsValue {
        let collections = studio::json::snapshot(self.inner().session());
        to_js(&collections).unwrap_or(JsValue::NULL)
    }

    /// Every solution as pretty-printed JSON, for download or inspection.
    pub fn snapshot_json_res(&self) -> JsValue {
        let collections = studio::json::snapshot(self.inner().session());
        match serde_json::to_string_pretty(&collections) {
            Ok(text) => error::ok(JsValue::from_str(&text)),
            Err(e) => error::err("serialize", e.to_string(), None),
        }
    }

    pub fn active_solution(&self) -> u32 {
        self.inner().session().active() as u32
    }
    pub fn solution_count(&self) -> u32 {
        self.inner().session().solution_count() as u32
    }
    pub fn is_dirty(&self, index: u32) -> bool {
        self.inner().session().is_dirty(index as usize)
    }
    pub fn revision(&self) -> u64 {
        self.inner().session().revision()
    }

    pub fn selection_count(&self) -> u32 {
        self.inner().stats().count as u32
    }
    pub fn selection_area(&self) -> f64 {
        self.inner().stats().area
    }
    pub fn selection_summary(&self) -> String {
        self.inner().stats().to_string()
    }
    pub fn can_merge(&self) -> bool {
        self.inner().selection().can_merge()
    }
}

impl Studio {
    // `null` value: the event was queued behind a running dispatch.
    fn dispatch_event(&self, event: SurfaceEvent) -> JsValue {
        match self.pump.push(event).pop() {
            Some(Ok(outcome)) => outcome_value(&outcome),
            Some(Err(e)) => error::from_studio(&e),
            None => error::ok(JsValue::NULL),
        }
    }
}
