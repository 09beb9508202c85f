use std::cell::RefCell;
use std::rc::Weak;

use wasm_bindgen::{closure::Closure, JsCast};
use web_sys::{Document, Element, IntersectionObserver, IntersectionObserverEntry};

use super::dom::js_error;
use super::render::Binding;
use crate::config::FADE_IN_TRIGGER;
use crate::error::Result;
use crate::registry::Registry;

pub const FADE_SELECTOR: &str = ".fade-in";

/// Descendants of a revealed section that get a wave.
pub const FADE_TARGET_SELECTOR: &str = ".ascii-on-fade";

pub const VISIBLE_CLASS: &str = "is-visible";

type Bindings = Weak<RefCell<Registry<Element, Binding>>>;

/// Reveals `.fade-in` sections once they scroll into view and ripples the
/// bound text inside them.
pub struct FadeInObserver {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(js_sys::Array, IntersectionObserver)>,
}

impl FadeInObserver {
    pub fn observe(document: &Document, bindings: Bindings) -> Result<Self> {
        let callback = Closure::wrap(Box::new(move |entries: js_sys::Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else { continue };
                if entry.is_intersecting() {
                    reveal(&entry.target(), &observer, &bindings);
                }
            }
        }) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref()).map_err(js_error)?;

        let sections = document.query_selector_all(FADE_SELECTOR).map_err(js_error)?;
        let mut observed = 0;
        for i in 0..sections.length() {
            if let Some(section) = sections.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
                observer.observe(&section);
                observed += 1;
            }
        }
        tracing::debug!(observed, "fade-in observer ready");

        Ok(Self { observer, _callback: callback })
    }

    pub fn disconnect(&self) {
        self.observer.disconnect();
    }
}

impl Drop for FadeInObserver {
    fn drop(&mut self) {
        self.disconnect();
    }
}

fn reveal(section: &Element, observer: &IntersectionObserver, bindings: &Bindings) {
    if let Err(err) = section.class_list().add_1(VISIBLE_CLASS) {
        tracing::warn!(error = %js_error(err), "failed to mark section visible");
    }
    observer.unobserve(section);

    let Some(bindings) = bindings.upgrade() else { return };
    let Ok(bindings) = bindings.try_borrow() else { return };
    let Ok(targets) = section.query_selector_all(FADE_TARGET_SELECTOR) else { return };

    for i in 0..targets.length() {
        let Some(target) = targets.item(i).and_then(|n| n.dyn_into::<Element>().ok()) else {
            continue;
        };
        if let Some(binding) = bindings.get(&target) {
            if let Err(err) = binding.trigger_wave(FADE_IN_TRIGGER) {
                tracing::warn!(error = %err, "fade-in wave failed");
            }
        }
    }
}
