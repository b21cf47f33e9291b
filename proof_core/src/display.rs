//! # Display Formatting
//!
//! Rounding rules and advisories for presenting engine results. The formulas
//! report raw floats; this module owns the one-decimal/zero-decimal display
//! conventions and the implausible-water-temperature warnings, so every front
//! end formats the same way.

use serde::{Deserialize, Serialize};

/// Water temperature below this is flagged as needing ice water
const VERY_COLD_C: f64 = 0.0;

/// Water temperature above this is flagged as suspicious
const VERY_WARM_C: f64 = 60.0;

/// Advisory attached to an implausible water temperature result.
///
/// The engine itself never rejects such results (spilling out of range is a
/// display concern, not a calculation error).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterAdvisory {
    /// Result below 0 °C
    VeryCold,
    /// Result above 60 °C
    VeryWarm,
}

impl WaterAdvisory {
    /// Human-readable warning text
    pub fn message(self) -> &'static str {
        match self {
            WaterAdvisory::VeryCold => "Very cold water - use ice/chilled water to hit DDT.",
            WaterAdvisory::VeryWarm => "Very warm water - recheck inputs/friction.",
        }
    }
}

/// Check a water temperature for implausible values.
pub fn water_advisory(water_temp_c: f64) -> Option<WaterAdvisory> {
    if water_temp_c < VERY_COLD_C {
        Some(WaterAdvisory::VeryCold)
    } else if water_temp_c > VERY_WARM_C {
        Some(WaterAdvisory::VeryWarm)
    } else {
        None
    }
}

/// Format a water temperature for display: one decimal, unit label.
pub fn format_water_temp(water_temp_c: f64) -> String {
    format!("{:.1} °C", water_temp_c)
}

/// Format a duration for display: one decimal, hours label.
pub fn format_hours(hours: f64) -> String {
    format!("{:.1} h", hours)
}

/// Format an inoculation percent for display: one decimal.
pub fn format_inoculation(percent: f64) -> String {
    format!("{:.1}", percent)
}

/// Format a hydration percent for display: whole number.
pub fn format_hydration(percent: f64) -> String {
    format!("{:.0}", percent)
}
