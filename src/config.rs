//! Animator and trigger options.
//!
//! Both option structs deserialize from partial JavaScript objects (or JSON),
//! filling every missing field with its default.

use serde::{Deserialize, Serialize};

use crate::error::{Result, RippleError};
use crate::text::TextUnit;

/// Glyphs cycled through while a wave passes.
pub const DEFAULT_PALETTE: &str = "_.,·-+:=*\"\"||[]/!?&#23456789|";

pub const DEFAULT_DURATION_MS: f64 = 700.0;

pub const DEFAULT_SPREAD: f64 = 0.4;

/// Smallest accepted `spread`; anything lower is clamped up to it.
pub const MIN_SPREAD: f64 = 0.01;

/// Options accepted when binding an animator to an element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RippleOptions {
    /// Lifetime of a single wave.
    pub duration_ms: f64,
    /// Ordered substitution palette.
    pub chars: String,
    /// Never substitute whitespace positions.
    pub preserve_spaces: bool,
    /// Inverse growth rate of a wave's radius.
    pub spread: f64,
    pub unit: TextUnit,
}

impl Default for RippleOptions {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            chars: DEFAULT_PALETTE.to_string(),
            preserve_spaces: true,
            spread: DEFAULT_SPREAD,
            unit: TextUnit::CodePoint,
        }
    }
}

impl RippleOptions {
    /// Options used for every element bound by the page scan.
    pub fn page() -> Self {
        Self { duration_ms: 700.0, spread: 1.0, ..Self::default() }
    }

    pub fn validate(self) -> Result<RippleConfig> {
        if !self.duration_ms.is_finite() || self.duration_ms <= 0.0 {
            return Err(RippleError::InvalidOption {
                name: "durationMs",
                reason: format!("expected a positive number, got {}", self.duration_ms),
            });
        }

        let palette: Vec<char> = self.chars.chars().collect();
        if palette.is_empty() {
            return Err(RippleError::EmptyPalette);
        }

        let spread = if self.spread.is_finite() && self.spread >= MIN_SPREAD {
            self.spread
        } else {
            tracing::warn!(spread = self.spread, clamped = MIN_SPREAD, "spread out of range");
            MIN_SPREAD
        };

        Ok(RippleConfig {
            duration_ms: self.duration_ms,
            palette,
            preserve_spaces: self.preserve_spaces,
            spread,
            unit: self.unit,
        })
    }
}

/// Validated options, as used by the animator.
#[derive(Debug, Clone, PartialEq)]
pub struct RippleConfig {
    pub duration_ms: f64,
    pub palette: Vec<char>,
    pub preserve_spaces: bool,
    pub spread: f64,
    pub unit: TextUnit,
}

impl Default for RippleConfig {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_DURATION_MS,
            palette: DEFAULT_PALETTE.chars().collect(),
            preserve_spaces: true,
            spread: DEFAULT_SPREAD,
            unit: TextUnit::CodePoint,
        }
    }
}

/// Arguments of an explicit wave trigger.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerOptions {
    /// Origin as a fraction of the text length.
    pub at: f64,
    /// Total number of waves, the first one immediate.
    pub repeat: u32,
    /// Delay between consecutive waves, in ms.
    pub interval: f64,
}

impl Default for TriggerOptions {
    fn default() -> Self {
        Self { at: 0.5, repeat: 1, interval: 80.0 }
    }
}

/// Trigger fired on `.ascii-on-fade` elements when their section scrolls into view.
pub const FADE_IN_TRIGGER: TriggerOptions = TriggerOptions { at: 0.5, repeat: 5, interval: 100.0 };

impl TriggerOptions {
    /// Clamps every field into its usable range.
    pub fn normalized(self) -> Self {
        let at = if self.at.is_finite() { self.at.clamp(0.0, 1.0) } else { 0.5 };
        let interval = if self.interval.is_finite() { self.interval.max(0.0) } else { 0.0 };
        Self { at, repeat: self.repeat.max(1), interval }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = RippleOptions::default();
        assert_eq!(opts.duration_ms, 700.0);
        assert!(opts.preserve_spaces);
        assert_eq!(opts.spread, 0.4);
        assert!(opts.chars.starts_with("_.,·"));
    }

    #[test]
    fn partial_json_fills_defaults() {
        let opts: RippleOptions =
            serde_json::from_str(r#"{"durationMs": 900, "spread": 1, "unit": "grapheme"}"#).unwrap();
        assert_eq!(opts.duration_ms, 900.0);
        assert_eq!(opts.spread, 1.0);
        assert_eq!(opts.unit, TextUnit::Grapheme);
        assert_eq!(opts.chars, DEFAULT_PALETTE);

        let trigger: TriggerOptions = serde_json::from_str(r#"{"repeat": 5}"#).unwrap();
        assert_eq!(trigger, TriggerOptions { at: 0.5, repeat: 5, interval: 80.0 });
    }

    #[test]
    fn validate_rejects_bad_duration_and_palette() {
        let bad = RippleOptions { duration_ms: 0.0, ..Default::default() };
        assert!(matches!(bad.validate(), Err(RippleError::InvalidOption { name: "durationMs", .. })));

        let nan = RippleOptions { duration_ms: f64::NAN, ..Default::default() };
        assert!(nan.validate().is_err());

        let empty = RippleOptions { chars: String::new(), ..Default::default() };
        assert_eq!(empty.validate(), Err(RippleError::EmptyPalette));
    }

    #[test]
    fn validate_clamps_spread() {
        for spread in [0.0, -3.0, f64::INFINITY, f64::NAN] {
            let cfg = RippleOptions { spread, ..Default::default() }.validate().unwrap();
            assert_eq!(cfg.spread, MIN_SPREAD);
        }
        let cfg = RippleOptions::page().validate().unwrap();
        assert_eq!(cfg.spread, 1.0);
        assert_eq!(cfg.palette.len(), DEFAULT_PALETTE.chars().count());
    }

    #[test]
    fn trigger_normalization() {
        let t = TriggerOptions { at: 1.7, repeat: 0, interval: -5.0 }.normalized();
        assert_eq!(t, TriggerOptions { at: 1.0, repeat: 1, interval: 0.0 });
        assert_eq!(FADE_IN_TRIGGER.normalized(), FADE_IN_TRIGGER);
    }
}
