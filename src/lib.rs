//! Hover-driven ASCII ripple text animation for the browser.
//!
//! Hovering a bound element spawns waves that scramble the characters near
//! the pointer through a glyph palette before settling back on the original
//! text. The animation core is platform independent; the `wasm` module binds
//! it to DOM elements, `requestAnimationFrame` and timers.

pub mod animator;
pub mod config;
pub mod error;
pub mod host;
pub mod registry;
pub mod text;
pub mod wave;

pub use animator::RippleAnimator;
pub use config::{RippleConfig, RippleOptions, TriggerOptions, FADE_IN_TRIGGER};
pub use error::{Result, RippleError};
pub use host::{LayoutRect, Scheduler, Surface};
pub use registry::Registry;
pub use text::{TextBuffer, TextUnit};

// Only compile wasm-specific code when targeting wasm32.
#[cfg(target_arch = "wasm32")]
pub mod wasm;
