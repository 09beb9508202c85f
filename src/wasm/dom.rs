use wasm_bindgen::JsValue;
use web_sys::Element;

use crate::error::RippleError;
use crate::host::{LayoutRect, Surface};

/// Class present on an element while its text is scrambled.
pub const ANIMATING_CLASS: &str = "as";

/// Bound element, read and written through `textContent`.
pub struct DomSurface {
    element: Element,
}

impl DomSurface {
    pub fn new(element: Element) -> Self {
        Self { element }
    }
}

impl Surface for DomSurface {
    fn text(&self) -> String {
        self.element.text_content().unwrap_or_default()
    }

    fn set_text(&self, text: &str) {
        self.element.set_text_content(Some(text));
    }

    fn set_animating(&self, animating: bool) {
        let classes = self.element.class_list();
        let result = if animating {
            classes.add_1(ANIMATING_CLASS)
        } else {
            classes.remove_1(ANIMATING_CLASS)
        };
        if let Err(err) = result {
            tracing::warn!(error = %js_error(err), "failed to toggle animating class");
        }
    }

    fn layout_rect(&self) -> Option<LayoutRect> {
        let rect = self.element.get_bounding_client_rect();
        Some(LayoutRect { left: rect.left(), width: rect.width() })
    }
}

pub(crate) fn js_error(value: JsValue) -> RippleError {
    RippleError::Host(value.as_string().unwrap_or_else(|| format!("{value:?}")))
}

impl From<RippleError> for JsValue {
    fn from(err: RippleError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
