#![cfg(target_arch = "wasm32")]

use ascii_ripple::wasm::dom::ANIMATING_CLASS;
use ascii_ripple::wasm::page::RipplePage;
use ascii_ripple::wasm::render::attach;
use ascii_ripple::{RippleError, RippleOptions, TriggerOptions};
use wasm_bindgen_test::*;
use web_sys::Element;

wasm_bindgen_test_configure!(run_in_browser);

fn span(text: &str, class: &str) -> Element {
    let document = web_sys::window().unwrap().document().unwrap();
    let el = document.create_element("span").unwrap();
    el.set_text_content(Some(text));
    el.set_class_name(class);
    document.body().unwrap().append_child(&el).unwrap();
    el
}

async fn sleep(ms: i32) {
    let promise = js_sys::Promise::new(&mut |resolve, _| {
        web_sys::window()
            .unwrap()
            .set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms)
            .unwrap();
    });
    wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

#[wasm_bindgen_test]
fn trigger_marks_element_and_destroy_restores() {
    let el = span("hover me", "");
    let mut binding = attach(el.clone(), RippleOptions::default().validate().unwrap()).unwrap();

    binding.trigger_wave(TriggerOptions::default()).unwrap();
    assert!(binding.is_animating());
    assert!(el.class_list().contains(ANIMATING_CLASS));

    binding.destroy();
    binding.destroy();
    assert!(!el.class_list().contains(ANIMATING_CLASS));
    assert_eq!(el.text_content().as_deref(), Some("hover me"));
}

#[wasm_bindgen_test]
fn blank_element_is_not_bound() {
    let el = span("   ", "");
    let err = attach(el, RippleOptions::default().validate().unwrap()).err();
    assert_eq!(err.map(|e| e.to_string()), Some(RippleError::BlankText.to_string()));
}

#[wasm_bindgen_test(async)]
async fn animation_settles_back_to_original() {
    let el = span("settle down", "");
    let options = RippleOptions { duration_ms: 200.0, ..RippleOptions::default() };
    let binding = attach(el.clone(), options.validate().unwrap()).unwrap();

    binding.trigger_wave(TriggerOptions { repeat: 2, interval: 50.0, ..Default::default() }).unwrap();
    sleep(600).await;

    assert!(!binding.is_animating());
    assert!(!el.class_list().contains(ANIMATING_CLASS));
    assert_eq!(el.text_content().as_deref(), Some("settle down"));
}

#[wasm_bindgen_test]
fn page_binds_opted_in_elements() {
    let hover = span("page level", "ascii-on-hover");
    let plain = span("not opted in", "");
    let document = web_sys::window().unwrap().document().unwrap();

    let mut page = RipplePage::mount(document).unwrap();
    assert!(!page.is_empty());
    assert_eq!(page.scan().unwrap(), 0);

    assert!(page.trigger(&hover, TriggerOptions::default()).unwrap());
    assert!(!page.trigger(&plain, TriggerOptions::default()).unwrap());
    assert!(hover.class_list().contains(ANIMATING_CLASS));

    page.destroy();
    assert_eq!(hover.text_content().as_deref(), Some("page level"));
    assert!(!hover.class_list().contains(ANIMATING_CLASS));
}
