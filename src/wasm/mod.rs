use std::cell::RefCell;

use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::{RippleOptions, TriggerOptions};

pub mod dom;
pub mod fade;
pub mod logging;
pub mod page;
pub mod render;

use page::RipplePage;
use render::{attach, Binding};

thread_local! {
    static PAGE: RefCell<Option<RipplePage>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    logging::init();

    let window = web_sys::window().ok_or("no window")?;
    let document = window.document().ok_or("no document")?;

    let page = RipplePage::mount(document)?;
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

/// Binds any opted-in elements added since the page was mounted.
#[wasm_bindgen(js_name = initAsciiShift)]
pub fn init_ascii_shift() -> Result<u32, JsValue> {
    PAGE.with(|slot| match slot.borrow().as_ref() {
        Some(page) => Ok(page.scan()? as u32),
        None => Err("ripple page is not mounted".into()),
    })
}

/// Ripples a page-bound element. Resolves to false when it is not bound.
#[wasm_bindgen(js_name = triggerAsciiWave)]
pub fn trigger_ascii_wave(element: &Element, options: JsValue) -> Result<bool, JsValue> {
    let options: TriggerOptions = from_js(options)?;
    PAGE.with(|slot| match slot.borrow().as_ref() {
        Some(page) => Ok(page.trigger(element, options)?),
        None => Ok(false),
    })
}

/// A ripple animator bound to one element, for callers managing their own.
#[wasm_bindgen]
pub struct AsciiShift {
    binding: Binding,
}

#[wasm_bindgen]
impl AsciiShift {
    #[wasm_bindgen(constructor)]
    pub fn new(element: Element, options: JsValue) -> Result<AsciiShift, JsValue> {
        let options: RippleOptions = from_js(options)?;
        let binding = attach(element, options.validate()?)?;
        Ok(AsciiShift { binding })
    }

    #[wasm_bindgen(js_name = updateText)]
    pub fn update_text(&self, text: String) -> Result<(), JsValue> {
        Ok(self.binding.update_text(text)?)
    }

    #[wasm_bindgen(js_name = resetToOriginal)]
    pub fn reset_to_original(&self) -> Result<(), JsValue> {
        Ok(self.binding.reset_to_original()?)
    }

    #[wasm_bindgen(js_name = triggerWave)]
    pub fn trigger_wave(&self, options: JsValue) -> Result<(), JsValue> {
        let options: TriggerOptions = from_js(options)?;
        Ok(self.binding.trigger_wave(options)?)
    }

    #[wasm_bindgen(getter, js_name = isAnimating)]
    pub fn is_animating(&self) -> bool {
        self.binding.is_animating()
    }

    pub fn destroy(&mut self) {
        self.binding.destroy();
    }
}

/// Missing or null arguments fall back to the defaults.
fn from_js<T: DeserializeOwned + Default>(value: JsValue) -> Result<T, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(T::default());
    }
    Ok(serde_wasm_bindgen::from_value(value)?)
}
