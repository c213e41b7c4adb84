//! Quality margins: the acceptable level band per signal type.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityMargin {
    /// Matched exactly and case-sensitively (e.g. `"TV"`).
    pub signal_type: String,
    pub min_level: f64,
    pub max_level: f64,
}

impl QualityMargin {
    pub fn new(signal_type: impl Into<String>, min_level: f64, max_level: f64) -> Self {
        Self {
            signal_type: signal_type.into(),
            min_level,
            max_level,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct MarginFileInput {
    margins: Vec<QualityMargin>,
}

/// Load a `[[margins]]` TOML document.
///
/// Entries keep their file order; duplicates are not merged since lookups
/// take the first match.
pub fn margins_from_toml_str(input: &str) -> Result<Vec<QualityMargin>, String> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    let parsed: MarginFileInput =
        toml::from_str(input).map_err(|e| format!("Invalid margins TOML: {}", e))?;
    for m in &parsed.margins {
        if !m.min_level.is_finite() || !m.max_level.is_finite() {
            return Err(format!("margin '{}' has non-finite bounds", m.signal_type));
        }
        if m.min_level > m.max_level {
            return Err(format!(
                "margin '{}' has min_level {} above max_level {}",
                m.signal_type, m.min_level, m.max_level
            ));
        }
    }
    Ok(parsed.margins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_margins_keeps_order() {
        let toml = r#"
            [[margins]]
            signal_type = "TV"
            min_level = 47.0
            max_level = 70.0

            [[margins]]
            signal_type = "FM"
            min_level = 40.0
            max_level = 70.0

            [[margins]]
            signal_type = "TV"
            min_level = 0.0
            max_level = 1.0
        "#;
        let margins = margins_from_toml_str(toml).unwrap();
        assert_eq!(margins.len(), 3);
        assert_eq!(margins[0], QualityMargin::new("TV", 47.0, 70.0));
        assert_eq!(margins[1].signal_type, "FM");
    }

    #[test]
    fn inverted_band_is_rejected() {
        let toml = r#"
            [[margins]]
            signal_type = "TV"
            min_level = 80.0
            max_level = 70.0
        "#;
        assert!(margins_from_toml_str(toml).is_err());
    }

    #[test]
    fn empty_document_has_no_margins() {
        assert!(margins_from_toml_str("").unwrap().is_empty());
    }
}
