//! Identifiers for catalogue rows, buildings and simulation runs.
//!
//! Catalogue files may omit `id`; the loader back-fills those rows with a
//! `cmp_` identifier so that every part a floor selects can be traced back to
//! one row. Buildings get `bld_` when their file has none, and every report
//! gets a fresh `sim_`. The suffix is a UUIDv7, so run IDs of one process
//! sort in the order the runs were made, which the history store relies on
//! when listing.

use uuid::Uuid;

pub const COMPONENT_PREFIX: &str = "cmp";
pub const BUILDING_PREFIX: &str = "bld";
pub const SIMULATION_PREFIX: &str = "sim";

fn mint(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::now_v7().as_simple())
}

/// ID for a catalogue row loaded without one.
pub fn component_id() -> String {
    mint(COMPONENT_PREFIX)
}

pub fn building_id() -> String {
    mint(BUILDING_PREFIX)
}

/// ID for one simulation report.
pub fn simulation_id() -> String {
    mint(SIMULATION_PREFIX)
}
