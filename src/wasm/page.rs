use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

use super::dom::js_error;
use super::fade::FadeInObserver;
use super::render::{attach, Binding};
use crate::config::{RippleOptions, TriggerOptions};
use crate::error::{Result, RippleError};
use crate::registry::Registry;

/// Elements that opt into the ripple: hover-only, or also rippled on fade-in.
pub const RIPPLE_SELECTOR: &str = ".ascii-on-hover, .ascii-on-fade";

/// Owns every binding on a page together with the fade-in observer.
pub struct RipplePage {
    document: Document,
    bindings: Rc<RefCell<Registry<Element, Binding>>>,
    fade: Option<FadeInObserver>,
}

impl RipplePage {
    pub fn mount(document: Document) -> Result<Self> {
        let mut page = Self {
            document,
            bindings: Rc::new(RefCell::new(Registry::new())),
            fade: None,
        };
        let bound = page.scan()?;
        page.fade = Some(FadeInObserver::observe(&page.document, Rc::downgrade(&page.bindings))?);
        tracing::info!(bound, "ripple page mounted");
        Ok(page)
    }

    /// Binds every opted-in element not bound yet. Returns how many were added.
    pub fn scan(&self) -> Result<usize> {
        let nodes = self.document.query_selector_all(RIPPLE_SELECTOR).map_err(js_error)?;
        let mut bindings = self
            .bindings
            .try_borrow_mut()
            .map_err(|_| RippleError::Host("bindings are busy".into()))?;

        let mut bound = 0;
        for i in 0..nodes.length() {
            let Some(element) = nodes.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
                continue;
            };
            let text = element.text_content().unwrap_or_default();
            let result = bindings.bind_with(element, &text, |el| {
                attach(el.clone(), RippleOptions::page().validate()?)
            });
            match result {
                Ok(true) => bound += 1,
                Ok(false) => {}
                Err(err) => tracing::warn!(error = %err, "element left unbound"),
            }
        }
        Ok(bound)
    }

    /// Triggers a wave on a bound element. Returns false when it is not bound.
    pub fn trigger(&self, element: &Element, options: TriggerOptions) -> Result<bool> {
        let bindings = self
            .bindings
            .try_borrow()
            .map_err(|_| RippleError::Host("bindings are busy".into()))?;
        match bindings.get(element) {
            Some(binding) => binding.trigger_wave(options).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.try_borrow().map(|b| b.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Disconnects the observer and tears down every binding.
    pub fn destroy(&mut self) {
        if let Some(fade) = self.fade.take() {
            fade.disconnect();
        }
        if let Ok(mut bindings) = self.bindings.try_borrow_mut() {
            for (_, mut binding) in bindings.drain() {
                binding.destroy();
            }
        }
    }
}

impl Drop for RipplePage {
    fn drop(&mut self) {
        self.destroy();
    }
}
