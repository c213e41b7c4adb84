//! Signal-to-noise estimate at an amplifier output.
//!
//! The formula subtracts a thermal noise floor expressed in dBm/Hz from a
//! level expressed in dBμV without any unit conversion or bandwidth term.
//! It is kept as-is for compatibility with existing simulation records, but
//! the result is not a dimensionally correct SNR and should not be compared
//! against datasheet SNR figures.

use riser_common::Amplifier;

/// Thermal noise floor at room temperature, dBm/Hz.
pub const THERMAL_NOISE_FLOOR_DBM_HZ: f64 = -174.0;

/// Without an amplifier the level is returned unchanged (no noise figure
/// to account for).
pub fn compute_snr(signal_level: f64, amplifier: Option<&Amplifier>) -> f64 {
    match amplifier {
        Some(amp) => signal_level - amp.noise_figure - THERMAL_NOISE_FLOOR_DBM_HZ,
        None => signal_level,
    }
}
