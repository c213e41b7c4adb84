//! Simulation runs and their reports.

use chrono::{DateTime, Utc};
use riser_calc::{CalcError, FloorResult, Optimizer, OptimizerConfig, SelectionStrategy, StrategyKind};
use riser_common::{ids, BuildingConfig, ComponentCatalog, QualityMargin};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error(transparent)]
    Calc(#[from] CalcError),
    #[error("invalid input: {0}")]
    Input(String),
    #[error("report serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Aggregate figures over all floors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub total_cost: f64,
    pub min_level: f64,
    pub max_level: f64,
    /// Floors whose output is outside the margin.
    pub failing_floors: Vec<u32>,
    /// Floors not checked because no margin matched the signal type.
    pub unchecked_floors: Vec<u32>,
}

impl Summary {
    pub fn from_floors(floors: &[FloorResult]) -> Self {
        let mut min_level = f64::INFINITY;
        let mut max_level = f64::NEG_INFINITY;
        let mut total_cost = 0.0;
        let mut failing_floors = Vec::new();
        let mut unchecked_floors = Vec::new();

        for f in floors {
            total_cost += f.cost;
            min_level = min_level.min(f.output_level);
            max_level = max_level.max(f.output_level);
            match f.pass {
                Some(false) => failing_floors.push(f.floor),
                None => unchecked_floors.push(f.floor),
                Some(true) => {}
            }
        }

        if floors.is_empty() {
            min_level = 0.0;
            max_level = 0.0;
        }

        Self {
            total_cost,
            min_level,
            max_level,
            failing_floors,
            unchecked_floors,
        }
    }

    pub fn all_pass(&self) -> bool {
        self.failing_floors.is_empty() && self.unchecked_floors.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationReport {
    pub id: String,
    pub building: BuildingConfig,
    pub strategy: String,
    /// Cable run per floor the optimizer actually used, in metres.
    pub cable_length_m: f64,
    pub created_at: DateTime<Utc>,
    pub floors: Vec<FloorResult>,
    pub summary: Summary,
}

impl SimulationReport {
    pub fn to_json_pretty(&self) -> Result<String, SimulationError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json_str(input: &str) -> Result<Self, SimulationError> {
        Ok(serde_json::from_str(input)?)
    }
}

/// One simulation over a caller-owned snapshot of catalogue and margins.
#[derive(Debug)]
pub struct Simulation<'a> {
    building: &'a BuildingConfig,
    catalog: &'a ComponentCatalog,
    margins: &'a [QualityMargin],
    optimizer: Optimizer,
}

impl<'a> Simulation<'a> {
    pub fn new(
        building: &'a BuildingConfig,
        catalog: &'a ComponentCatalog,
        margins: &'a [QualityMargin],
    ) -> Self {
        Self {
            building,
            catalog,
            margins,
            optimizer: Optimizer::new(OptimizerConfig::from(building)),
        }
    }

    /// Replace the building-derived optimizer entirely.
    pub fn with_optimizer(mut self, optimizer: Optimizer) -> Self {
        self.optimizer = optimizer;
        self
    }

    pub fn with_strategy_kind(self, kind: StrategyKind) -> Self {
        self.with_strategy(kind.build())
    }

    pub fn with_strategy(mut self, strategy: Box<dyn SelectionStrategy>) -> Self {
        self.optimizer = self.optimizer.with_strategy(strategy);
        self
    }

    pub fn run(&self) -> Result<SimulationReport, SimulationError> {
        let b = self.building;
        if b.floors == 0 {
            return Err(SimulationError::Input("building has no floors".into()));
        }
        if !b.head_end_level.is_finite() {
            return Err(SimulationError::Input(format!(
                "head-end level {} is not a number",
                b.head_end_level
            )));
        }

        tracing::info!(
            building = %b.name,
            floors = b.floors,
            head_end_level = b.head_end_level,
            strategy = self.optimizer.strategy_name(),
            catalogue_size = self.catalog.len(),
            "simulation starting"
        );

        let floors = self
            .optimizer
            .run(self.catalog, self.margins, b.head_end_level, b.floors)?;
        let summary = Summary::from_floors(&floors);

        tracing::info!(
            total_cost = summary.total_cost,
            min_level = summary.min_level,
            failing = summary.failing_floors.len(),
            "simulation finished"
        );

        Ok(SimulationReport {
            id: ids::simulation_id(),
            building: b.clone(),
            strategy: self.optimizer.strategy_name().to_string(),
            cable_length_m: self.optimizer.config().cable_length_m,
            created_at: Utc::now(),
            floors,
            summary,
        })
    }
}
