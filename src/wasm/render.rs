use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{AddEventListenerOptions, Element, Event, MouseEvent, Performance, Window};

use super::dom::{js_error, DomSurface};
use crate::animator::RippleAnimator;
use crate::config::{RippleConfig, TriggerOptions};
use crate::error::{Result, RippleError};
use crate::host::{FrameHandle, Scheduler, Surface, TimerHandle};

pub type DomAnimator = RippleAnimator<DomSurface, BrowserScheduler>;

/// `requestAnimationFrame` and `setTimeout` for one animator.
///
/// Both callbacks hold a `Weak` back to the animator that owns this
/// scheduler, so the animator can be dropped while a callback is queued.
pub struct BrowserScheduler {
    window: Window,
    performance: Performance,
    on_frame: Closure<dyn FnMut(f64)>,
    on_timer: Closure<dyn FnMut(JsValue)>,
}

impl BrowserScheduler {
    fn new(window: Window, performance: Performance, animator: Weak<RefCell<DomAnimator>>) -> Self {
        let on_frame = {
            let animator = animator.clone();
            Closure::wrap(Box::new(move |_timestamp: f64| {
                with_animator(&animator, "frame", |a| a.on_frame());
            }) as Box<dyn FnMut(f64)>)
        };
        // The token rides along as the timeout's extra argument.
        let on_timer = Closure::wrap(Box::new(move |token: JsValue| {
            let Some(token) = token.as_f64() else { return };
            with_animator(&animator, "trigger", |a| a.on_timer(token as u32));
        }) as Box<dyn FnMut(JsValue)>);

        Self { window, performance, on_frame, on_timer }
    }
}

impl Scheduler for BrowserScheduler {
    fn now(&self) -> f64 {
        self.performance.now()
    }

    fn request_frame(&self) -> Result<FrameHandle> {
        self.window
            .request_animation_frame(self.on_frame.as_ref().unchecked_ref())
            .map(FrameHandle)
            .map_err(js_error)
    }

    fn cancel_frame(&self, handle: FrameHandle) {
        if let Err(err) = self.window.cancel_animation_frame(handle.0) {
            tracing::warn!(error = %js_error(err), "cancelAnimationFrame failed");
        }
    }

    fn set_timeout(&self, delay_ms: f64, token: u32) -> Result<TimerHandle> {
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_1(
                self.on_timer.as_ref().unchecked_ref(),
                delay_ms.round() as i32,
                &JsValue::from(token),
            )
            .map(TimerHandle)
            .map_err(js_error)
    }

    fn clear_timeout(&self, handle: TimerHandle) {
        self.window.clear_timeout_with_handle(handle.0);
    }
}

fn with_animator<F>(animator: &Weak<RefCell<DomAnimator>>, source: &str, f: F)
where
    F: FnOnce(&mut DomAnimator) -> Result<()>,
{
    let Some(shared) = animator.upgrade() else { return };
    let Ok(mut animator) = shared.try_borrow_mut() else {
        tracing::warn!(source, "animator busy, dropping callback");
        return;
    };
    if let Err(err) = f(&mut animator) {
        tracing::warn!(source, error = %err, "ripple callback failed");
    }
}

/// Pointer Events when the browser has them, mouse events otherwise.
struct EventNames {
    enter: &'static str,
    moved: &'static str,
    leave: &'static str,
}

impl EventNames {
    fn detect(window: &Window) -> Self {
        let pointer = js_sys::Reflect::has(window, &JsValue::from_str("PointerEvent")).unwrap_or(false);
        if pointer {
            Self { enter: "pointerenter", moved: "pointermove", leave: "pointerleave" }
        } else {
            Self { enter: "mouseenter", moved: "mousemove", leave: "mouseleave" }
        }
    }
}

struct Listener {
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

/// An animator wired to its element. Detaches on [`Binding::destroy`] or drop.
pub struct Binding {
    animator: Rc<RefCell<DomAnimator>>,
    element: Element,
    window: Window,
    listeners: Vec<Listener>,
    resize: Option<Closure<dyn FnMut()>>,
}

/// Binds a ripple animator to `element` and starts listening for the pointer.
pub fn attach(element: Element, config: RippleConfig) -> Result<Binding> {
    let window = web_sys::window().ok_or_else(|| RippleError::Host("no window".into()))?;
    let performance = window
        .performance()
        .ok_or_else(|| RippleError::Host("no performance clock".into()))?;

    let surface = DomSurface::new(element.clone());
    if surface.text().trim().is_empty() {
        return Err(RippleError::BlankText);
    }

    let animator = Rc::new_cyclic(|weak| {
        let scheduler = BrowserScheduler::new(window.clone(), performance, weak.clone());
        RefCell::new(RippleAnimator::bind(surface, scheduler, config))
    });
    let weak = Rc::downgrade(&animator);

    let names = EventNames::detect(&window);
    let pending = [
        (names.enter, false, pointer_listener(&weak, names.enter, |a, x| a.pointer_enter(x))),
        (names.moved, true, pointer_listener(&weak, names.moved, |a, x| a.pointer_move(x))),
        (
            names.leave,
            false,
            pointer_listener(&weak, names.leave, |a, _| {
                a.pointer_leave();
                Ok(())
            }),
        ),
    ];

    // Registered listeners go into the binding as they are added, so an
    // error part way through still detaches the earlier ones on drop.
    let mut binding = Binding {
        animator,
        element: element.clone(),
        window: window.clone(),
        listeners: Vec::with_capacity(pending.len()),
        resize: None,
    };

    let passive = AddEventListenerOptions::new();
    passive.set_passive(true);
    for (event, is_passive, callback) in pending {
        let function = callback.as_ref().unchecked_ref();
        let added = if is_passive {
            element.add_event_listener_with_callback_and_add_event_listener_options(event, function, &passive)
        } else {
            element.add_event_listener_with_callback(event, function)
        };
        added.map_err(js_error)?;
        binding.listeners.push(Listener { event, callback });
    }

    // If layout changes while hovering, refresh the rect.
    let resize = Closure::wrap(Box::new(move || {
        with_animator(&weak, "resize", |a| {
            a.resize();
            Ok(())
        });
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback_and_add_event_listener_options(
            "resize",
            resize.as_ref().unchecked_ref(),
            &passive,
        )
        .map_err(js_error)?;
    binding.resize = Some(resize);

    tracing::debug!(listeners = binding.listeners.len(), "ripple attached");
    Ok(binding)
}

fn pointer_listener(
    animator: &Weak<RefCell<DomAnimator>>,
    source: &'static str,
    handle: fn(&mut DomAnimator, f64) -> Result<()>,
) -> Closure<dyn FnMut(Event)> {
    let animator = animator.clone();
    Closure::wrap(Box::new(move |event: Event| {
        let Some(mouse) = event.dyn_ref::<MouseEvent>() else { return };
        let x = f64::from(mouse.client_x());
        with_animator(&animator, source, |a| handle(a, x));
    }) as Box<dyn FnMut(Event)>)
}

impl Binding {
    pub fn is_animating(&self) -> bool {
        self.animator.try_borrow().map(|a| a.is_animating()).unwrap_or(true)
    }

    pub fn trigger_wave(&self, options: TriggerOptions) -> Result<()> {
        self.with_mut(|a| a.trigger_wave(options))
    }

    pub fn update_text(&self, text: String) -> Result<()> {
        self.with_mut(|a| {
            a.update_text(text);
            Ok(())
        })
    }

    pub fn reset_to_original(&self) -> Result<()> {
        self.with_mut(|a| {
            a.reset_to_original();
            Ok(())
        })
    }

    /// Cancels pending work, restores the text, removes every listener.
    pub fn destroy(&mut self) {
        if let Err(err) = self.with_mut(|a| {
            a.destroy();
            Ok(())
        }) {
            tracing::warn!(error = %err, "ripple teardown skipped");
        }

        for listener in self.listeners.drain(..) {
            let callback = listener.callback.as_ref().unchecked_ref();
            if let Err(err) = self.element.remove_event_listener_with_callback(listener.event, callback) {
                tracing::warn!(event = listener.event, error = %js_error(err), "listener removal failed");
            }
        }
        if let Some(resize) = self.resize.take() {
            let callback = resize.as_ref().unchecked_ref();
            if let Err(err) = self.window.remove_event_listener_with_callback("resize", callback) {
                tracing::warn!(error = %js_error(err), "resize listener removal failed");
            }
        }
    }

    fn with_mut<T>(&self, f: impl FnOnce(&mut DomAnimator) -> Result<T>) -> Result<T> {
        let mut animator = self
            .animator
            .try_borrow_mut()
            .map_err(|_| RippleError::Host("animator is busy".into()))?;
        f(&mut animator)
    }
}

impl Drop for Binding {
    fn drop(&mut self) {
        self.destroy();
    }
}
