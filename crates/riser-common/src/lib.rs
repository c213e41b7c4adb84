//! Shared types for the Riser calculator.
//!
//! This crate contains:
//! - **Components** — the five RF part categories and their tagged union
//! - **Catalogue** — ordered per-category part lists, TOML/JSON loading
//! - **Margins** — per-signal-type acceptable level bands
//! - **Building** — floor count, head-end level and riser geometry
//! - **ID generation** — prefixed UUIDv7 helpers (`cmp_`, `bld_`, `sim_`)

pub mod building;
pub mod catalog;
pub mod components;
pub mod ids;
pub mod margins;

pub use building::BuildingConfig;
pub use catalog::ComponentCatalog;
pub use components::{Amplifier, Cable, Category, Component, Distributor, Part, Splitter, Tap};
pub use margins::QualityMargin;
