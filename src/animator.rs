//! Per-element ripple state machine.
//!
//! The animator never blocks and never owns a loop. It asks its [`Scheduler`]
//! for one frame at a time while waves are alive and stops asking once the
//! last wave expires. Teardown cancels the stored frame handle and
//! every pending delayed trigger, so nothing can fire into a destroyed
//! instance.

use crate::config::{RippleConfig, TriggerOptions};
use crate::error::{Result, RippleError};
use crate::host::{FrameHandle, LayoutRect, Scheduler, Surface, TimerHandle};
use crate::text::{is_whitespace_unit, TextBuffer};
use crate::wave::{cursor_index, trigger_index, Wave, WaveEffect};

/// Minimum time between layout rect samples while hovering.
pub const RECT_SAMPLE_INTERVAL_MS: f64 = 250.0;

/// A delayed repeat wave scheduled by [`RippleAnimator::trigger_wave`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingTrigger {
    pub token: u32,
    pub handle: TimerHandle,
    pub origin: usize,
}

pub struct RippleAnimator<S, H> {
    surface: S,
    scheduler: H,
    config: RippleConfig,
    buffer: TextBuffer,
    waves: Vec<Wave>,
    animating: bool,
    hovering: bool,
    cursor: usize,
    cached_rect: Option<LayoutRect>,
    last_rect_sample: Option<f64>,
    frame: Option<FrameHandle>,
    pending: Vec<PendingTrigger>,
    next_token: u32,
    destroyed: bool,
}

impl<S: Surface, H: Scheduler> RippleAnimator<S, H> {
    /// Captures the surface's current text, refusing blank text.
    pub fn new(surface: S, scheduler: H, config: RippleConfig) -> Result<Self> {
        let animator = Self::bind(surface, scheduler, config);
        if animator.buffer.is_blank() {
            return Err(RippleError::BlankText);
        }
        Ok(animator)
    }

    /// Like [`RippleAnimator::new`] but accepts any text, blank included.
    pub fn bind(surface: S, scheduler: H, config: RippleConfig) -> Self {
        let buffer = TextBuffer::new(surface.text(), config.unit);
        Self {
            surface,
            scheduler,
            config,
            buffer,
            waves: Vec::new(),
            animating: false,
            hovering: false,
            cursor: 0,
            cached_rect: None,
            last_rect_sample: None,
            frame: None,
            pending: Vec::new(),
            next_token: 0,
            destroyed: false,
        }
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    pub fn cursor_index(&self) -> usize {
        self.cursor
    }

    pub fn waves(&self) -> &[Wave] {
        &self.waves
    }

    pub fn pending_triggers(&self) -> &[PendingTrigger] {
        &self.pending
    }

    /// The original (unscrambled) text.
    pub fn text(&self) -> &str {
        self.buffer.as_str()
    }

    pub fn config(&self) -> &RippleConfig {
        &self.config
    }

    pub fn pointer_enter(&mut self, client_x: f64) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        self.hovering = true;
        let now = self.scheduler.now();
        self.sample_rect(now, true);
        self.update_cursor(client_x);
        self.start_wave(self.cursor, now)
    }

    pub fn pointer_move(&mut self, client_x: f64) -> Result<()> {
        if self.destroyed || !self.hovering {
            return Ok(());
        }
        let now = self.scheduler.now();
        self.sample_rect(now, false);

        let prev = self.cursor;
        self.update_cursor(client_x);
        if self.cursor != prev {
            self.start_wave(self.cursor, now)?;
        }
        Ok(())
    }

    pub fn pointer_leave(&mut self) {
        self.hovering = false;
        self.cached_rect = None;
    }

    /// Layout may have shifted; resample right away if the pointer is over us.
    pub fn resize(&mut self) {
        if self.destroyed || !self.hovering {
            return;
        }
        let now = self.scheduler.now();
        self.sample_rect(now, true);
    }

    /// Starts one wave now and schedules `repeat - 1` more at the same origin.
    pub fn trigger_wave(&mut self, options: TriggerOptions) -> Result<()> {
        if self.destroyed {
            return Ok(());
        }
        let options = options.normalized();
        let origin = trigger_index(options.at, self.buffer.len());
        self.cursor = origin;

        let now = self.scheduler.now();
        self.start_wave(origin, now)?;

        for i in 1..options.repeat {
            let token = self.next_token;
            self.next_token = self.next_token.wrapping_add(1);
            let handle = self.scheduler.set_timeout(f64::from(i) * options.interval, token)?;
            self.pending.push(PendingTrigger { token, handle, origin });
        }
        Ok(())
    }

    /// Delivery of a timeout scheduled by [`RippleAnimator::trigger_wave`].
    pub fn on_timer(&mut self, token: u32) -> Result<()> {
        let Some(pos) = self.pending.iter().position(|p| p.token == token) else {
            return Ok(());
        };
        let trigger = self.pending.swap_remove(pos);
        if self.destroyed {
            return Ok(());
        }
        let now = self.scheduler.now();
        let origin = trigger.origin.min(self.buffer.len().saturating_sub(1));
        self.start_wave(origin, now)
    }

    /// Delivery of a frame requested from the scheduler.
    pub fn on_frame(&mut self) -> Result<()> {
        self.frame = None;
        if self.destroyed || !self.animating {
            return Ok(());
        }
        let now = self.scheduler.now();
        self.render(now)
    }

    /// Replaces the text. Waves in flight were computed against the old
    /// text, so they are dropped and the new text is shown immediately.
    pub fn update_text(&mut self, text: impl Into<String>) {
        if self.destroyed {
            return;
        }
        self.buffer = TextBuffer::new(text, self.config.unit);
        self.cursor = self.cursor.min(self.buffer.len().saturating_sub(1));
        if self.animating {
            self.waves.clear();
            self.cancel_frame();
            self.stop();
        } else {
            self.surface.set_text(self.buffer.as_str());
        }
    }

    pub fn reset_to_original(&mut self) {
        self.waves.clear();
        self.cancel_frame();
        self.stop();
    }

    /// Stops everything and restores the original text. Idempotent.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        self.reset_to_original();
        for trigger in self.pending.drain(..) {
            self.scheduler.clear_timeout(trigger.handle);
        }
        self.hovering = false;
        self.cached_rect = None;
        self.destroyed = true;
        tracing::debug!("ripple animator destroyed");
    }

    /// The text as it should look at `now` given the current waves.
    pub fn scrambled_text(&self, now: f64) -> String {
        let len = self.buffer.len();
        let mut out = String::with_capacity(self.buffer.as_str().len());

        for (i, unit) in self.buffer.units().enumerate() {
            if self.config.preserve_spaces && is_whitespace_unit(unit) {
                out.push_str(unit);
                continue;
            }

            let mut glyph = None;
            for wave in &self.waves {
                if let WaveEffect::Scramble(k) = wave.effect_at(i, len, now, &self.config) {
                    glyph = self.config.palette.get(k).copied();
                }
            }

            match glyph {
                Some(ch) => out.push(ch),
                None => out.push_str(unit),
            }
        }
        out
    }

    fn start_wave(&mut self, origin: usize, now: f64) -> Result<()> {
        self.waves.push(Wave::new(origin, now));
        tracing::debug!(origin, active = self.waves.len(), "wave started");
        if !self.animating {
            if let Err(err) = self.start() {
                self.waves.clear();
                return Err(err);
            }
        }
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        let handle = self.scheduler.request_frame()?;
        self.frame = Some(handle);
        self.animating = true;
        self.surface.set_animating(true);
        Ok(())
    }

    fn render(&mut self, now: f64) -> Result<()> {
        let duration = self.config.duration_ms;
        self.waves.retain(|w| !w.is_expired(now, duration));

        if self.waves.is_empty() {
            self.stop();
            tracing::debug!("ripple settled");
            return Ok(());
        }

        let text = self.scrambled_text(now);
        self.surface.set_text(&text);
        match self.scheduler.request_frame() {
            Ok(handle) => {
                self.frame = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.waves.clear();
                self.stop();
                Err(err)
            }
        }
    }

    fn stop(&mut self) {
        self.surface.set_text(self.buffer.as_str());
        self.surface.set_animating(false);
        self.animating = false;
    }

    fn cancel_frame(&mut self) {
        if let Some(handle) = self.frame.take() {
            self.scheduler.cancel_frame(handle);
        }
    }

    fn sample_rect(&mut self, now: f64, force: bool) {
        let fresh = self
            .last_rect_sample
            .is_some_and(|at| now - at < RECT_SAMPLE_INTERVAL_MS);
        if !force && fresh {
            return;
        }
        self.cached_rect = self.surface.layout_rect();
        self.last_rect_sample = Some(now);
    }

    fn update_cursor(&mut self, client_x: f64) {
        if let Some(idx) = cursor_index(client_x, self.cached_rect, self.buffer.len()) {
            self.cursor = idx;
        }
    }
}
