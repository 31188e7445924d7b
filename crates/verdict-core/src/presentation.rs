//! Display mapping for canonical scores.
//!
//! Numeric scores render on a red-to-green gradient over the 0-5 rubric
//! scale. The gradient clamps for color only; labels and exports always
//! carry the true value.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{CanonicalScore, Verdict};

/// Top of the rubric scale.
pub const MAX_RUBRIC_SCORE: f64 = 5.0;

/// Hue at the top of the scale (green). Zero is red.
pub const MAX_HUE: f64 = 120.0;

pub const GRADIENT_SATURATION: u8 = 70;
pub const GRADIENT_LIGHTNESS: u8 = 45;

/// Abstract classification of a score for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Bucket {
    NotApplicable,
    Pass,
    Fail,
    Gradient,
}

impl Bucket {
    pub fn as_str(&self) -> &'static str {
        match self {
            Bucket::NotApplicable => "not-applicable",
            Bucket::Pass => "pass",
            Bucket::Fail => "fail",
            Bucket::Gradient => "gradient",
        }
    }
}

/// An HSL color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HslColor {
    /// Degrees, 0 (red) to 120 (green)
    pub hue: f64,
    pub saturation: u8,
    pub lightness: u8,
}

/// CSS notation, hue to one decimal place.
impl fmt::Display for HslColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hue = (self.hue * 10.0).round() / 10.0;
        write!(f, "hsl({}, {}%, {}%)", hue, self.saturation, self.lightness)
    }
}

/// How a score should be shown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Presentation {
    pub bucket: Bucket,
    pub label: String,
    pub color: Option<HslColor>,
}

/// Map a canonical score to its display form.
pub fn present_score(score: &CanonicalScore) -> Presentation {
    match score {
        CanonicalScore::Unknown => Presentation {
            bucket: Bucket::NotApplicable,
            label: "N/A".to_string(),
            color: None,
        },
        CanonicalScore::Verdict(Verdict::Pass) => Presentation {
            bucket: Bucket::Pass,
            label: "✓ PASS".to_string(),
            color: None,
        },
        CanonicalScore::Verdict(Verdict::Fail) => Presentation {
            bucket: Bucket::Fail,
            label: "✗ FAIL".to_string(),
            color: None,
        },
        CanonicalScore::Numeric(v) => Presentation {
            bucket: Bucket::Gradient,
            label: one_decimal(*v),
            color: Some(gradient_color(*v)),
        },
    }
}

/// Format to one decimal place, rounding half-way cases away from zero.
///
/// `{:.1}` alone rounds exact ties to even, so 2.25 would show as "2.2".
pub fn one_decimal(value: f64) -> String {
    let scaled = (value * 10.0).round();
    if scaled.is_finite() {
        format!("{:.1}", scaled / 10.0)
    } else {
        format!("{:.1}", value)
    }
}

/// Gradient color for a numeric score, clamped to the rubric scale.
pub fn gradient_color(value: f64) -> HslColor {
    let clamped = value.clamp(0.0, MAX_RUBRIC_SCORE);
    HslColor {
        hue: clamped / MAX_RUBRIC_SCORE * MAX_HUE,
        saturation: GRADIENT_SATURATION,
        lightness: GRADIENT_LIGHTNESS,
    }
}
