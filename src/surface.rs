//! Browser side of the drawing surface: the map, its draw plugin and the
//! custom control container, driven through [`DrawSurface`].
//!
//! Listeners are registered once per bound surface and only forward events
//! to the shared [`EventPump`]. They are removed from the map when the
//! [`SurfaceListeners`] holding them is dropped.

use crate::interop::{get, to_js};
use serde::Serialize;
use std::rc::Rc;
use studio::model::Feature;
use studio::session::FeatureId;
use studio::surface::{ButtonColor, ControlButton, DrawSurface, EventPump, SurfaceEvent};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

#[wasm_bindgen]
extern "C" {
    /// A mapbox-gl `Map`.
    #[derive(Clone, Debug)]
    pub type MapHandle;
    #[wasm_bindgen(method, js_name = isStyleLoaded)]
    fn is_style_loaded(this: &MapHandle) -> bool;
    #[wasm_bindgen(method)]
    fn on(this: &MapHandle, event: &str, listener: &js_sys::Function);
    #[wasm_bindgen(method)]
    fn off(this: &MapHandle, event: &str, listener: &js_sys::Function);

    /// A mapbox-gl-draw instance added to the map.
    #[derive(Clone, Debug)]
    pub type DrawHandle;
    #[wasm_bindgen(method)]
    fn add(this: &DrawHandle, feature: &JsValue) -> JsValue;
    #[wasm_bindgen(method, js_name = delete)]
    fn delete_ids(this: &DrawHandle, ids: &JsValue) -> JsValue;
    #[wasm_bindgen(method, js_name = deleteAll)]
    fn delete_all(this: &DrawHandle) -> JsValue;

    /// Control container; clicks on its buttons call `Studio.click_control_res`.
    #[derive(Clone, Debug)]
    pub type ControlHandle;
    #[wasm_bindgen(method, js_name = addButton)]
    fn add_button(this: &ControlHandle, button: &JsValue);
    #[wasm_bindgen(method, js_name = removeButton)]
    fn remove_button(this: &ControlHandle, id: &str);
}

// Shape the control container renders from.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ButtonDef<'a> {
    id: &'a str,
    title: &'a str,
    icon_class_name: &'a str,
    color: ButtonColor,
    disabled: bool,
}

pub struct JsDrawSurface {
    map: MapHandle,
    draw: DrawHandle,
    control: ControlHandle,
}

impl JsDrawSurface {
    pub fn new(map: MapHandle, draw: DrawHandle, control: ControlHandle) -> Self {
        JsDrawSurface { map, draw, control }
    }

    pub fn map(&self) -> &MapHandle {
        &self.map
    }
}

fn warn(what: &str, e: impl std::fmt::Display) {
    console::warn_1(&JsValue::from_str(&format!("studio: {what}: {e}")));
}

impl DrawSurface for JsDrawSurface {
    fn is_style_loaded(&self) -> bool {
        self.map.is_style_loaded()
    }

    fn add_control(&mut self, button: &ControlButton) {
        let def = ButtonDef {
            id: &button.id,
            title: &button.title,
            icon_class_name: &button.icon_class,
            color: button.color,
            disabled: !button.enabled,
        };
        match to_js(&def) {
            Ok(v) => self.control.add_button(&v),
            Err(e) => warn("control not rendered", e),
        }
    }

    fn remove_control(&mut self, id: &str) {
        self.control.remove_button(id);
    }

    fn add_feature(&mut self, feature: &Feature) {
        match to_js(feature) {
            Ok(v) => {
                self.draw.add(&v);
            }
            Err(e) => warn("feature not drawn", e),
        }
    }

    fn remove_feature(&mut self, id: &FeatureId) {
        let ids = js_sys::Array::of1(&JsValue::from_str(id.as_str()));
        self.draw.delete_ids(&ids);
    }

    fn clear_all_features(&mut self) {
        self.draw.delete_all();
    }
}

const EVENTS: [&str; 5] =
    ["load", "draw.selectionchange", "draw.create", "draw.update", "draw.delete"];

/// Translate a map event payload into a [`SurfaceEvent`].
pub fn event_from_js(name: &str, payload: &JsValue) -> Result<SurfaceEvent, String> {
    let features = || -> Result<Vec<Feature>, String> {
        let raw = get(payload, "features")
            .ok_or_else(|| format!("{name} payload has no features"))?;
        serde_wasm_bindgen::from_value(raw).map_err(|e| format!("{name} features: {e}"))
    };
    Ok(match name {
        "load" => SurfaceEvent::Load,
        "draw.selectionchange" => SurfaceEvent::SelectionChange { features: features()? },
        "draw.create" => SurfaceEvent::Create { features: features()? },
        "draw.update" => SurfaceEvent::Update { features: features()? },
        "draw.delete" => SurfaceEvent::Delete { features: features()? },
        other => return Err(format!("unsupported surface event {other:?}")),
    })
}

pub struct SurfaceListeners {
    map: MapHandle,
    bound: Vec<(&'static str, Closure<dyn FnMut(JsValue)>)>,
}

impl SurfaceListeners {
    pub fn bind(map: &MapHandle, pump: &Rc<EventPump<JsDrawSurface>>) -> Self {
        let bound = EVENTS
            .iter()
            .map(|&name| {
                let pump = Rc::clone(pump);
                let listener = Closure::<dyn FnMut(JsValue)>::new(move |payload: JsValue| {
                    let event = match event_from_js(name, &payload) {
                        Ok(event) => event,
                        Err(msg) => return warn("event dropped", msg),
                    };
                    for outcome in pump.push(event) {
                        if let Err(e) = outcome {
                            let msg = format!("studio: {} ({})", e, e.code());
                            console::error_1(&JsValue::from_str(&msg));
                        }
                    }
                });
                map.on(name, listener.as_ref().unchecked_ref());
                (name, listener)
            })
            .collect();
        SurfaceListeners { map: map.clone(), bound }
    }
}

impl Drop for SurfaceListeners {
    fn drop(&mut self) {
        for (name, listener) in &self.bound {
            self.map.off(name, listener.as_ref().unchecked_ref());
        }
    }
}
