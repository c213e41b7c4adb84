//! Per-floor optimizer.
//!
//! Walks floors 1..=N in order, carrying the level from one floor into the
//! next. Each floor's parts come from the configured
//! [`SelectionStrategy`](crate::selection::SelectionStrategy); with the
//! default greedy strategy the result is not guaranteed to respect the
//! quality margin, it is only reported against it.

use riser_common::building::{DEFAULT_CABLE_LENGTH_PER_FLOOR_M, DEFAULT_SIGNAL_TYPE};
use riser_common::{BuildingConfig, Category, ComponentCatalog, QualityMargin};
use serde::{Deserialize, Serialize};

use crate::error::CalcError;
use crate::evaluator;
use crate::quality;
use crate::selection::{FloorContext, Selection, SelectionStrategy, StrategyKind};
use crate::snr;

/// Only the riser cable is mandatory by default; every other category is
/// installed when the catalogue offers it and contributes 0 dB otherwise.
pub const DEFAULT_REQUIRED: [Category; 1] = [Category::Cable];

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OptimizerConfigInput {
    pub cable_length_m: Option<f64>,
    pub signal_type: Option<String>,
    pub required: Option<Vec<Category>>,
    pub strategy: Option<StrategyKind>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Riser cable run fed into each floor, in metres.
    pub cable_length_m: f64,
    /// Signal type whose margin each floor is reported against.
    pub signal_type: String,
    /// Categories that must have at least one candidate.
    pub required: Vec<Category>,
    pub strategy: StrategyKind,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            cable_length_m: DEFAULT_CABLE_LENGTH_PER_FLOOR_M,
            signal_type: DEFAULT_SIGNAL_TYPE.to_string(),
            required: DEFAULT_REQUIRED.to_vec(),
            strategy: StrategyKind::default(),
        }
    }
}

impl OptimizerConfigInput {
    pub fn resolve(self) -> Result<OptimizerConfig, String> {
        let defaults = OptimizerConfig::default();
        let cable_length_m = self.cable_length_m.unwrap_or(defaults.cable_length_m);
        if !cable_length_m.is_finite() || cable_length_m < 0.0 {
            return Err(format!(
                "cable_length_m must be a non-negative number, got {}",
                cable_length_m
            ));
        }
        let signal_type = self
            .signal_type
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.signal_type);

        let mut required = Vec::new();
        for cat in self.required.unwrap_or(defaults.required) {
            if !required.contains(&cat) {
                required.push(cat);
            }
        }

        Ok(OptimizerConfig {
            cable_length_m,
            signal_type,
            required,
            strategy: self.strategy.unwrap_or(defaults.strategy),
        })
    }
}

impl OptimizerConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, String> {
        if input.trim().is_empty() {
            return Ok(OptimizerConfig::default());
        }
        let parsed: OptimizerConfigInput =
            toml::from_str(input).map_err(|e| format!("Invalid optimizer TOML: {}", e))?;
        parsed.resolve()
    }
}

impl From<&BuildingConfig> for OptimizerConfig {
    fn from(building: &BuildingConfig) -> Self {
        Self {
            cable_length_m: building.cable_length_per_floor_m,
            signal_type: building.signal_type.clone(),
            ..OptimizerConfig::default()
        }
    }
}

/// Outcome for one floor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FloorResult {
    /// 1-based floor number.
    pub floor: u32,
    /// Level entering the floor (previous floor's output, or head-end).
    pub input_level: f64,
    pub chosen: Selection,
    pub output_level: f64,
    /// Level at a user outlet, when a tap was selected.
    pub outlet_level: Option<f64>,
    /// See [`snr::compute_snr`] for the caveats on this figure.
    pub snr: f64,
    pub cost: f64,
    /// `None` when no margin exists for the configured signal type.
    pub pass: Option<bool>,
}

#[derive(Debug)]
pub struct Optimizer {
    config: OptimizerConfig,
    strategy: Box<dyn SelectionStrategy>,
}

impl Default for Optimizer {
    fn default() -> Self {
        Self::new(OptimizerConfig::default())
    }
}

impl Optimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        let strategy = config.strategy.build();
        Self { config, strategy }
    }

    pub fn with_strategy(mut self, strategy: Box<dyn SelectionStrategy>) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    pub fn strategy_name(&self) -> &'static str {
        self.strategy.name()
    }

    /// Equip floors 1..=`floor_count`.
    ///
    /// Fails with [`CalcError::NoComponentsAvailable`] as soon as a required
    /// category is empty; no partial results are returned. A floor count of
    /// zero yields an empty result.
    pub fn run(
        &self,
        catalog: &ComponentCatalog,
        margins: &[QualityMargin],
        head_end_level: f64,
        floor_count: u32,
    ) -> Result<Vec<FloorResult>, CalcError> {
        let margin = quality::find_margin(&self.config.signal_type, margins);
        if margin.is_none() && floor_count > 0 {
            tracing::warn!(
                signal_type = %self.config.signal_type,
                "no quality margin for signal type, floors will not be validated"
            );
        }

        let mut results = Vec::with_capacity(floor_count as usize);
        let mut current = head_end_level;

        for floor in 1..=floor_count {
            self.ensure_available(catalog, floor)?;

            let ctx = FloorContext {
                floor,
                floor_count,
                input_level: current,
                cable_length_m: self.config.cable_length_m,
                margin,
                required: &self.config.required,
            };
            let chosen = self.strategy.select(&ctx, catalog);
            let output_level =
                chosen.evaluate(current, self.config.cable_length_m, ctx.is_last_floor());
            let pass = margin.map(|m| quality::classify(output_level, m) == quality::MarginCheck::Within);

            tracing::debug!(
                floor,
                input_level = current,
                output_level,
                cost = chosen.cost(),
                ?pass,
                "floor evaluated"
            );

            results.push(FloorResult {
                floor,
                input_level: current,
                outlet_level: chosen
                    .tap
                    .as_ref()
                    .map(|t| evaluator::outlet_level(output_level, t)),
                snr: snr::compute_snr(output_level, chosen.amplifier.as_ref()),
                cost: chosen.cost(),
                output_level,
                pass,
                chosen,
            });
            current = output_level;
        }

        Ok(results)
    }

    fn ensure_available(&self, catalog: &ComponentCatalog, floor: u32) -> Result<(), CalcError> {
        for category in &self.config.required {
            if catalog.count(*category) == 0 {
                return Err(CalcError::NoComponentsAvailable {
                    floor,
                    category: *category,
                });
            }
        }
        Ok(())
    }
}

/// Greedy optimization with the default configuration.
pub fn optimize(
    catalog: &ComponentCatalog,
    margins: &[QualityMargin],
    head_end_level: f64,
    floor_count: u32,
) -> Result<Vec<FloorResult>, CalcError> {
    Optimizer::default().run(catalog, margins, head_end_level, floor_count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use riser_common::{Amplifier, Cable, Distributor, Splitter, Tap};

    fn full_catalog() -> ComponentCatalog {
        ComponentCatalog {
            cables: vec![
                Cable {
                    id: "c-exp".into(),
                    model: "RG-11".into(),
                    cost: 2.0,
                    max_length_m: 200.0,
                    attenuation_per_100m: Some(10.0),
                },
                Cable {
                    id: "c-cheap".into(),
                    model: "RG-6".into(),
                    cost: 1.0,
                    max_length_m: 100.0,
                    attenuation_per_100m: Some(20.0),
                },
            ],
            splitters: vec![Splitter {
                id: "s".into(),
                model: "DER-2".into(),
                cost: 5.0,
                insertion_loss: 4.0,
                branch_loss: 1.0,
                directivity: 20.0,
                decoupling: 15.0,
            }],
            distributors: vec![Distributor {
                id: "d".into(),
                model: "DIS-4".into(),
                cost: 8.0,
                num_outputs: 4,
                distribution_loss: 7.0,
                decoupling: 20.0,
            }],
            amplifiers: vec![Amplifier {
                id: "a".into(),
                model: "AMP-10".into(),
                cost: 50.0,
                attenuation: 1.0,
                gain: 10.0,
                noise_figure: 6.0,
            }],
            taps: vec![Tap {
                id: "t".into(),
                model: "T-10".into(),
                cost: 2.0,
                attenuation: 10.0,
                decoupling: 14.0,
            }],
        }
    }

    #[test]
    fn floors_chain_through_selected_parts() {
        let margins = vec![QualityMargin::new("TV", 70.0, 95.0)];
        let results = optimize(&full_catalog(), &margins, 90.0, 2).unwrap();
        assert_eq!(results.len(), 2);

        // floor 1: 90 - 4 (cable) - 1 (branch) - 7 + 10 - 1 = 87
        let f1 = &results[0];
        assert_eq!(f1.floor, 1);
        assert!((f1.input_level - 90.0).abs() < 1e-9);
        assert!((f1.output_level - 87.0).abs() < 1e-9);
        assert_eq!(f1.chosen.cable.as_ref().map(|c| c.id.as_str()), Some("c-cheap"));
        assert!((f1.cost - 66.0).abs() < 1e-9);
        assert_eq!(f1.pass, Some(true));
        assert_eq!(f1.outlet_level, Some(77.0));
        assert!((f1.snr - (87.0 - 6.0 + 174.0)).abs() < 1e-9);

        // floor 2 (last): 87 - 4 - 4 (insertion) - 7 + 10 - 1 = 81
        let f2 = &results[1];
        assert!((f2.input_level - 87.0).abs() < 1e-9);
        assert!((f2.output_level - 81.0).abs() < 1e-9);
        assert_eq!(f2.pass, Some(true));
    }

    #[test]
    fn missing_required_category_aborts() {
        let mut catalog = full_catalog();
        catalog.cables.clear();
        let err = optimize(&catalog, &[], 90.0, 4).unwrap_err();
        assert_eq!(
            err,
            CalcError::NoComponentsAvailable {
                floor: 1,
                category: Category::Cable
            }
        );

        let mut catalog = full_catalog();
        catalog.distributors.clear();
        let config = OptimizerConfig {
            required: vec![Category::Cable, Category::Distributor],
            ..OptimizerConfig::default()
        };
        let err = Optimizer::new(config).run(&catalog, &[], 90.0, 4).unwrap_err();
        assert_eq!(
            err,
            CalcError::NoComponentsAvailable {
                floor: 1,
                category: Category::Distributor
            }
        );
    }

    #[test]
    fn default_config_only_needs_cables() {
        let mut catalog = full_catalog();
        catalog.splitters.clear();
        catalog.distributors.clear();
        catalog.amplifiers.clear();
        let results = optimize(&catalog, &[], 90.0, 2).unwrap();
        // 90 - 4 (cable), then 86 - 4
        assert!((results[0].output_level - 86.0).abs() < 1e-9);
        assert!((results[1].output_level - 82.0).abs() < 1e-9);
        assert!(results[0].chosen.splitter.is_none());
    }

    #[test]
    fn optional_empty_category_contributes_nothing() {
        let mut catalog = full_catalog();
        catalog.amplifiers.clear();
        catalog.taps.clear();
        let config = OptimizerConfig {
            required: vec![Category::Cable, Category::Splitter, Category::Distributor],
            ..OptimizerConfig::default()
        };
        let results = Optimizer::new(config).run(&catalog, &[], 90.0, 1).unwrap();
        // single floor is the last: 90 - 4 - 4 - 7
        assert!((results[0].output_level - 75.0).abs() < 1e-9);
        assert!(results[0].chosen.amplifier.is_none());
        assert!(results[0].outlet_level.is_none());
        assert_eq!(results[0].snr, results[0].output_level);
    }

    #[test]
    fn no_margin_leaves_floors_unchecked() {
        let results = optimize(&full_catalog(), &[], 90.0, 3).unwrap();
        assert!(results.iter().all(|r| r.pass.is_none()));
    }

    #[test]
    fn zero_floors_is_empty() {
        assert!(optimize(&full_catalog(), &[], 90.0, 0).unwrap().is_empty());
    }

    #[test]
    fn config_from_toml() {
        let toml = r#"
            cable_length_m = 3.5
            signal_type = "FM"
            required = ["cable", "amplifier", "cable"]
            strategy = "margin-aware"
        "#;
        let cfg = OptimizerConfig::from_toml_str(toml).unwrap();
        assert!((cfg.cable_length_m - 3.5).abs() < 1e-9);
        assert_eq!(cfg.signal_type, "FM");
        assert_eq!(cfg.required, vec![Category::Cable, Category::Amplifier]);
        assert_eq!(cfg.strategy, StrategyKind::MarginAware);
        assert_eq!(Optimizer::new(cfg).strategy_name(), "margin-aware");
    }

    #[test]
    fn config_defaults() {
        let cfg = OptimizerConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, OptimizerConfig::default());
        assert_eq!(cfg.required, DEFAULT_REQUIRED.to_vec());
        assert!(OptimizerConfig::from_toml_str("cable_length_m = -2.0").is_err());
    }

    #[test]
    fn config_from_building() {
        let building = BuildingConfig {
            cable_length_per_floor_m: 4.0,
            signal_type: "FM".into(),
            ..BuildingConfig::default()
        };
        let cfg = OptimizerConfig::from(&building);
        assert!((cfg.cable_length_m - 4.0).abs() < 1e-9);
        assert_eq!(cfg.signal_type, "FM");
        assert_eq!(cfg.strategy, StrategyKind::Cheapest);
    }
}
