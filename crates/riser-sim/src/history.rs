//! In-memory simulation history.
//!
//! Reports are kept in insertion order. With a capacity set, recording a
//! new report evicts the oldest one. The store is a plain owned value;
//! callers sharing it across threads wrap it themselves.

use std::collections::VecDeque;

use crate::report::SimulationReport;

#[derive(Debug, Default)]
pub struct History {
    reports: VecDeque<SimulationReport>,
    capacity: Option<usize>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            reports: VecDeque::with_capacity(capacity),
            capacity: Some(capacity.max(1)),
        }
    }

    /// Store a report and return its ID.
    pub fn record(&mut self, report: SimulationReport) -> String {
        if let Some(cap) = self.capacity {
            while self.reports.len() >= cap {
                if let Some(evicted) = self.reports.pop_front() {
                    tracing::debug!(id = %evicted.id, "evicted simulation from history");
                }
            }
        }
        let id = report.id.clone();
        self.reports.push_back(report);
        id
    }

    pub fn get(&self, id: &str) -> Option<&SimulationReport> {
        self.reports.iter().find(|r| r.id == id)
    }

    pub fn latest(&self) -> Option<&SimulationReport> {
        self.reports.back()
    }

    /// Newest first.
    pub fn list(&self) -> impl Iterator<Item = &SimulationReport> + '_ {
        self.reports.iter().rev()
    }

    /// Reports for one building, newest first.
    pub fn for_building<'a>(
        &'a self,
        building_id: &'a str,
    ) -> impl Iterator<Item = &'a SimulationReport> + 'a {
        self.list().filter(move |r| r.building.id == building_id)
    }

    pub fn remove(&mut self, id: &str) -> Option<SimulationReport> {
        let idx = self.reports.iter().position(|r| r.id == id)?;
        self.reports.remove(idx)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        let all: Vec<&SimulationReport> = self.reports.iter().collect();
        serde_json::to_string_pretty(&all)
    }
}
