//! Simulation toolkit for building risers.
//!
//! Runs the optimizer for a building against a catalogue snapshot, wraps
//! the result in a timestamped report, keeps a history of past runs,
//! renders text schematics, and generates deterministic synthetic
//! catalogues for benchmarks and load tests.

pub mod history;
pub mod report;
pub mod scenario;
pub mod schematic;

pub use history::History;
pub use report::{Simulation, SimulationError, SimulationReport, Summary};
pub use schematic::{render_schematic, render_trace};
