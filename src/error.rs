use crate::interop::{new_obj, set_kv};
use studio::error::StudioError;
use wasm_bindgen::prelude::*;

pub fn ok(v: JsValue) -> JsValue {
    let o = new_obj();
    set_kv(&o, "ok", &JsValue::from_bool(true));
    set_kv(&o, "value", &v);
    o.into()
}

pub fn err(code: &'static str, message: impl Into<String>, data: Option<JsValue>) -> JsValue {
    let root = new_obj();
    set_kv(&root, "ok", &JsValue::from_bool(false));
    let e = new_obj();
    set_kv(&e, "code", &JsValue::from_str(code));
    set_kv(&e, "message", &JsValue::from_str(&message.into()));
    if let Some(d) = data { set_kv(&e, "data", &d); }
    set_kv(&root, "error", &e.into());
    root.into()
}

pub fn from_studio(e: &StudioError) -> JsValue {
    let d = new_obj();
    match e {
        StudioError::MissingFeatureId { slot } => {
            set_kv(&d, "slot", &JsValue::from_f64(*slot as f64))
        }
        StudioError::MalformedFeatureId { id } => set_kv(&d, "id", &JsValue::from_str(id)),
        StudioError::SolutionOutOfRange { index, count } => {
            set_kv(&d, "index", &JsValue::from_f64(*index as f64));
            set_kv(&d, "count", &JsValue::from_f64(*count as f64));
        }
        StudioError::NonPolygonal { solution, position } => {
            set_kv(&d, "solution", &JsValue::from_f64(*solution as f64));
            set_kv(&d, "position", &JsValue::from_f64(*position as f64));
        }
        StudioError::UnknownControl { id } => set_kv(&d, "id", &JsValue::from_str(id)),
        _ => return err(e.code(), e.to_string(), None),
    }
    err(e.code(), e.to_string(), Some(d.into()))
}

#[inline]
pub fn invalid_arg(param: &str, reason: impl std::fmt::Display) -> JsValue {
    let d = new_obj(); set_kv(&d, "param", &JsValue::from_str(param));
    err("invalid_argument", format!("parameter '{}' is invalid: {}", param, reason), Some(d.into()))
}

#[inline]
pub fn unknown_op(got: &str) -> JsValue {
    let d = new_obj(); set_kv(&d, "got", &JsValue::from_str(got));
    err("unknown_op", "op must be 'union' or 'intersect'", Some(d.into()))
}
