//! # Baking Formulas
//!
//! This module contains the three calculator formulas. Each one follows the
//! pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! All three functions are deterministic and stateless: no I/O, no shared
//! state, identical inputs produce identical outputs. Tunable model
//! coefficients travel inside the input records rather than being read from
//! ambient configuration, which keeps the formulas reentrant and trivially
//! testable.
//!
//! ## Available Formulas
//!
//! - [`water`] - Water temperature to hit a desired dough temperature (DDT)
//! - [`starter`] - Starter peak time estimate from build ratio and temperature
//! - [`bulk`] - Bulk fermentation duration estimate

pub mod bulk;
pub mod starter;
pub mod water;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use bulk::{BulkCoefficients, BulkInput, BulkResult, HydrationBand};
pub use starter::{StarterCoefficients, StarterInput, StarterResult};
pub use water::{MixerMethod, WaterInput, WaterResult};

/// Flour type used in the starter and bulk formulas.
///
/// Whole-grain flour ferments faster, so both formulas apply a
/// duration-shortening factor for `Whole` (the exact factor differs per
/// formula).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlourType {
    /// White/bread flour (baseline)
    White,
    /// Whole-grain flour
    Whole,
}

impl Default for FlourType {
    fn default() -> Self {
        FlourType::White
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flour_type_serialization() {
        let json = serde_json::to_string(&FlourType::Whole).unwrap();
        assert_eq!(json, "\"whole\"");

        let roundtrip: FlourType = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip, FlourType::Whole);
    }
}
