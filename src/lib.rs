use std::cell::{Ref, RefCell, RefMut};
use std::rc::Rc;
use studio::config::StudioConfig;
use studio::surface::EventPump;
use wasm_bindgen::prelude::*;

mod api;
mod error;
mod interop;
pub mod surface;

pub use api::{decode_feature_id_res, encode_feature_id, set_panic_hook};
use surface::{JsDrawSurface, SurfaceListeners};

type Core = studio::Studio<JsDrawSurface>;

#[wasm_bindgen]
pub struct Studio {
    pub(crate) pump: Rc<EventPump<JsDrawSurface>>,
    pub(crate) listeners: Option<SurfaceListeners>,
}

impl Studio {
    pub fn rs_new(config: StudioConfig) -> Studio {
        let core = Rc::new(RefCell::new(Core::new(config)));
        Studio { pump: Rc::new(EventPump::new(core)), listeners: None }
    }

    pub(crate) fn inner(&self) -> Ref<'_, Core> {
        self.pump.studio().borrow()
    }

    pub(crate) fn inner_mut(&self) -> RefMut<'_, Core> {
        self.pump.studio().borrow_mut()
    }

    // Surface events fired while a method held the studio were queued.
    pub(crate) fn settle(&self) {
        for outcome in self.pump.flush() {
            if let Err(e) = outcome {
                let msg = format!("studio: {} ({})", e, e.code());
                web_sys::console::error_1(&JsValue::from_str(&msg));
            }
        }
    }
}
