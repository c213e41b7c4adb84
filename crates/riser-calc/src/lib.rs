//! # riser-calc
//!
//! Signal-level core for building distribution risers. Everything here is
//! a pure, synchronous computation over caller-owned snapshots of the
//! component catalogue and quality margins.
//!
//! ## Crate structure
//!
//! - [`evaluator`] — Signal chain evaluation (cable, splitter, distributor, amplifier)
//! - [`snr`] — SNR estimate at an amplifier output
//! - [`quality`] — Quality-margin lookup and validation
//! - [`selection`] — Per-floor part selection strategies
//! - [`optimizer`] — Floor-by-floor optimizer
//! - [`error`] — Error kinds surfaced to callers

pub mod error;
pub mod evaluator;
pub mod optimizer;
pub mod quality;
pub mod selection;
pub mod snr;

pub use error::CalcError;
pub use evaluator::{evaluate, DEFAULT_CABLE_ATTENUATION_PER_100M};
pub use optimizer::{optimize, FloorResult, Optimizer, OptimizerConfig};
pub use quality::is_valid;
pub use selection::{CheapestFirst, MarginAware, Selection, SelectionStrategy, StrategyKind};
pub use snr::compute_snr;
