//! Quality-margin validation.

use riser_common::QualityMargin;
use serde::{Deserialize, Serialize};

use crate::error::CalcError;

/// First margin whose type matches exactly (case-sensitive).
///
/// Duplicate entries for a type are never consulted beyond the first.
pub fn find_margin<'a>(signal_type: &str, margins: &'a [QualityMargin]) -> Option<&'a QualityMargin> {
    margins.iter().find(|m| m.signal_type == signal_type)
}

/// Inclusive band check against the margin for `signal_type`.
pub fn is_valid(
    signal_level: f64,
    signal_type: &str,
    margins: &[QualityMargin],
) -> Result<bool, CalcError> {
    let margin = find_margin(signal_type, margins)
        .ok_or_else(|| CalcError::UnknownSignalType(signal_type.to_string()))?;
    Ok(classify(signal_level, margin) == MarginCheck::Within)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarginCheck {
    Below,
    Within,
    Above,
}

pub fn classify(signal_level: f64, margin: &QualityMargin) -> MarginCheck {
    if signal_level < margin.min_level {
        MarginCheck::Below
    } else if signal_level > margin.max_level {
        MarginCheck::Above
    } else {
        MarginCheck::Within
    }
}

/// Distance in dB from the band, 0 inside it.
pub fn margin_deviation(signal_level: f64, margin: &QualityMargin) -> f64 {
    match classify(signal_level, margin) {
        MarginCheck::Below => margin.min_level - signal_level,
        MarginCheck::Above => signal_level - margin.max_level,
        MarginCheck::Within => 0.0,
    }
}
