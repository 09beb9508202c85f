//! Wave geometry: how far a wave reaches and what it does to one position.

use crate::config::RippleConfig;
use crate::host::LayoutRect;

/// Width of the leading band (in positions) where glyphs are substituted.
pub const WAVE_INTENSITY_THRESHOLD: f64 = 2.0;

/// Phase shift between neighbouring positions, in palette steps.
pub const CHAR_CYCLE_MULTIPLIER: usize = 9;

/// Time a position holds one glyph before advancing to the next.
pub const ANIM_FRAME_STEP_MS: f64 = 90.0;

/// Overshoot past the far edge so edge positions get a clean pass.
pub const WAVE_EDGE_BUFFER: f64 = 2.0;

/// A timed impulse spreading outward from one position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wave {
    pub origin: usize,
    pub started_at: f64,
}

/// What a single wave does to a single position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveEffect {
    /// Not reached yet, or the wave has expired.
    Outside,
    /// Inside the wave but behind (or exactly on) the substitution band.
    Passed,
    /// Inside the leading band; holds the palette index to show.
    Scramble(usize),
}

impl Wave {
    pub fn new(origin: usize, started_at: f64) -> Self {
        Self { origin, started_at }
    }

    pub fn age(&self, now: f64) -> f64 {
        (now - self.started_at).max(0.0)
    }

    pub fn is_expired(&self, now: f64, duration_ms: f64) -> bool {
        self.age(now) >= duration_ms
    }

    /// Distance from the origin to the farther end of a text of `len` positions.
    pub fn max_distance(&self, len: usize) -> usize {
        self.origin.max(len.saturating_sub(self.origin + 1))
    }

    /// Current reach in positions. Grows linearly and stops growing at `duration_ms`.
    pub fn radius(&self, now: f64, len: usize, duration_ms: f64, spread: f64) -> f64 {
        let progress = (self.age(now) / duration_ms).min(1.0);
        progress * (self.max_distance(len) as f64 + WAVE_EDGE_BUFFER) / spread
    }

    pub fn effect_at(&self, index: usize, len: usize, now: f64, config: &RippleConfig) -> WaveEffect {
        if self.is_expired(now, config.duration_ms) {
            return WaveEffect::Outside;
        }

        let distance = index.abs_diff(self.origin);
        let radius = self.radius(now, len, config.duration_ms, config.spread);
        if distance as f64 > radius {
            return WaveEffect::Outside;
        }

        let intensity = (radius - distance as f64).max(0.0);
        if intensity > 0.0 && intensity <= WAVE_INTENSITY_THRESHOLD {
            WaveEffect::Scramble(glyph_index(distance, self.age(now), config.palette.len()))
        } else {
            WaveEffect::Passed
        }
    }
}

/// Palette index for a position `distance` away from its wave's origin, `age_ms` into the wave.
pub fn glyph_index(distance: usize, age_ms: f64, palette_len: usize) -> usize {
    let step = (age_ms / ANIM_FRAME_STEP_MS).floor() as usize;
    (distance * CHAR_CYCLE_MULTIPLIER + step) % palette_len.max(1)
}

/// Maps a pointer x coordinate to a position.
///
/// Returns `None` when the rect is missing or has no width, so callers keep
/// their previous index.
pub fn cursor_index(client_x: f64, rect: Option<LayoutRect>, len: usize) -> Option<usize> {
    let rect = rect?;
    if rect.width <= 0.0 || !rect.width.is_finite() {
        return None;
    }
    let x = client_x - rect.left;
    let raw = (x / rect.width * len as f64).round();
    Some(clamp_index(raw, len))
}

/// Maps a fraction of the text (0 = first, 1 = last position) to a position.
pub fn trigger_index(at: f64, len: usize) -> usize {
    clamp_index((at * len.saturating_sub(1) as f64).round(), len)
}

fn clamp_index(raw: f64, len: usize) -> usize {
    let last = len.saturating_sub(1);
    if raw.is_nan() {
        return 0;
    }
    raw.clamp(0.0, last as f64) as usize
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(duration_ms: f64, spread: f64, palette_len: usize) -> RippleConfig {
        RippleConfig {
            duration_ms,
            spread,
            palette: "0123456789abcdefghij".chars().take(palette_len).collect(),
            ..RippleConfig::default()
        }
    }

    #[test]
    fn glyph_index_cycles_with_age_and_distance() {
        assert_eq!(glyph_index(0, 90.0, 10), 1);
        assert_eq!(glyph_index(0, 89.9, 10), 0);
        assert_eq!(glyph_index(1, 0.0, 10), 9);
        assert_eq!(glyph_index(2, 180.0, 10), 0);
    }

    #[test]
    fn expired_wave_touches_nothing() {
        let cfg = config(700.0, 1.0, 10);
        let wave = Wave::new(2, 1_000.0);
        for i in 0..5 {
            assert_eq!(wave.effect_at(i, 5, 1_700.0, &cfg), WaveEffect::Outside);
            assert_eq!(wave.effect_at(i, 5, 2_500.0, &cfg), WaveEffect::Outside);
        }
    }

    #[test]
    fn final_radius_covers_the_buffer() {
        for (len, origin) in [(5, 2), (10, 0), (10, 9), (1, 0), (37, 11)] {
            let wave = Wave::new(origin, 0.0);
            for spread in [1.0, 0.7, 0.4] {
                let radius = wave.radius(700.0, len, 700.0, spread);
                assert!(radius >= wave.max_distance(len) as f64);
                for i in 0..len {
                    assert!(i.abs_diff(origin) as f64 <= radius);
                }
            }
        }
    }

    #[test]
    fn leading_band_substitutes_and_interior_passes() {
        let cfg = config(700.0, 1.0, 20);
        let wave = Wave::new(0, 0.0);
        // progress 0.5, max distance 4: radius = 0.5 * 6 = 3
        assert_eq!(wave.radius(350.0, 5, 700.0, 1.0), 3.0);
        assert_eq!(wave.effect_at(0, 5, 350.0, &cfg), WaveEffect::Passed);
        assert_eq!(wave.effect_at(1, 5, 350.0, &cfg), WaveEffect::Scramble((9 + 3) % 20));
        assert_eq!(wave.effect_at(2, 5, 350.0, &cfg), WaveEffect::Scramble((18 + 3) % 20));
        assert_eq!(wave.effect_at(3, 5, 350.0, &cfg), WaveEffect::Passed);
        assert_eq!(wave.effect_at(4, 5, 350.0, &cfg), WaveEffect::Outside);
    }

    #[test]
    fn fresh_wave_only_marks_its_origin() {
        let cfg = config(700.0, 0.4, 10);
        let wave = Wave::new(3, 50.0);
        assert_eq!(wave.effect_at(3, 8, 50.0, &cfg), WaveEffect::Passed);
        assert_eq!(wave.effect_at(2, 8, 50.0, &cfg), WaveEffect::Outside);
        assert_eq!(wave.effect_at(4, 8, 50.0, &cfg), WaveEffect::Outside);
    }

    #[test]
    fn smaller_spread_reaches_further() {
        let wave = Wave::new(0, 0.0);
        assert!(wave.radius(100.0, 20, 700.0, 0.4) > wave.radius(100.0, 20, 700.0, 1.0));
    }

    #[test]
    fn cursor_index_maps_and_guards() {
        let rect = Some(LayoutRect { left: 100.0, width: 200.0 });
        assert_eq!(cursor_index(100.0, rect, 10), Some(0));
        assert_eq!(cursor_index(200.0, rect, 10), Some(5));
        assert_eq!(cursor_index(300.0, rect, 10), Some(9));
        assert_eq!(cursor_index(-50.0, rect, 10), Some(0));
        assert_eq!(cursor_index(150.0, None, 10), None);
        assert_eq!(cursor_index(150.0, Some(LayoutRect { left: 0.0, width: 0.0 }), 10), None);
        assert_eq!(cursor_index(150.0, rect, 0), Some(0));
    }

    #[test]
    fn trigger_index_rounds_half_up() {
        assert_eq!(trigger_index(0.5, 10), 5);
        assert_eq!(trigger_index(0.0, 10), 0);
        assert_eq!(trigger_index(1.0, 10), 9);
        assert_eq!(trigger_index(0.5, 0), 0);
        assert_eq!(trigger_index(0.5, 1), 0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn cursor_index_stays_in_bounds(
                x in -10_000.0f64..10_000.0,
                left in -500.0f64..500.0,
                width in 0.01f64..4_000.0,
                len in 1usize..400,
            ) {
                let idx = cursor_index(x, Some(LayoutRect { left, width }), len).unwrap();
                prop_assert!(idx < len);
            }

            #[test]
            fn trigger_index_stays_in_bounds(at in -2.0f64..3.0, len in 1usize..400) {
                prop_assert!(trigger_index(at, len) < len);
            }
        }
    }
}
