use serde::{Deserialize, Serialize};

use crate::ids;

pub const CONFIG_VERSION: u32 = 1;

pub const DEFAULT_HEAD_END_LEVEL: f64 = 90.0;
pub const DEFAULT_CABLE_LENGTH_PER_FLOOR_M: f64 = 20.0;
pub const DEFAULT_SIGNAL_TYPE: &str = "TV";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildingFileInput {
    pub version: u32,
    pub building: BuildingConfigInput,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct BuildingConfigInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub floors: Option<u32>,
    pub head_end_level: Option<f64>,
    pub cable_length_per_floor_m: Option<f64>,
    pub signal_type: Option<String>,
}

/// A building's distribution configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub id: String,
    pub name: String,
    pub floors: u32,
    /// Level injected at the head-end, in dBμV.
    pub head_end_level: f64,
    /// Riser cable run between consecutive floors, in metres.
    pub cable_length_per_floor_m: f64,
    pub signal_type: String,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            id: ids::building_id(),
            name: String::from("building"),
            floors: 1,
            head_end_level: DEFAULT_HEAD_END_LEVEL,
            cable_length_per_floor_m: DEFAULT_CABLE_LENGTH_PER_FLOOR_M,
            signal_type: DEFAULT_SIGNAL_TYPE.to_string(),
        }
    }
}

impl BuildingConfigInput {
    pub fn resolve(self) -> Result<BuildingConfig, String> {
        let defaults = BuildingConfig::default();

        let floors = self.floors.unwrap_or(defaults.floors);
        if floors == 0 {
            return Err("floors must be at least 1".to_string());
        }

        let head_end_level = self.head_end_level.unwrap_or(defaults.head_end_level);
        if !head_end_level.is_finite() {
            return Err(format!("head_end_level must be finite, got {}", head_end_level));
        }

        let cable_length = self
            .cable_length_per_floor_m
            .unwrap_or(defaults.cable_length_per_floor_m);
        if !cable_length.is_finite() || cable_length < 0.0 {
            return Err(format!(
                "cable_length_per_floor_m must be a non-negative number, got {}",
                cable_length
            ));
        }

        let signal_type = non_blank(self.signal_type).unwrap_or(defaults.signal_type);
        let name = non_blank(self.name).unwrap_or(defaults.name);
        let id = non_blank(self.id).unwrap_or(defaults.id);

        Ok(BuildingConfig {
            id,
            name,
            floors,
            head_end_level,
            cable_length_per_floor_m: cable_length,
            signal_type,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

impl BuildingConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, String> {
        if input.trim().is_empty() {
            return Ok(BuildingConfig::default());
        }
        let parsed: BuildingFileInput =
            toml::from_str(input).map_err(|e| format!("Invalid building TOML: {}", e))?;
        let version = if parsed.version == 0 {
            CONFIG_VERSION
        } else {
            parsed.version
        };
        if version != CONFIG_VERSION {
            return Err(format!("Unsupported config version {}", version));
        }
        parsed.building.resolve()
    }
}
