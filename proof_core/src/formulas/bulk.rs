//! # Bulk-Fermentation Hours Formula
//!
//! Estimates the duration of bulk fermentation from the starter percentage
//! (baker's percent of flour weight), dough temperature, flour type, hydration
//! band, and salt percentage.
//!
//! Same model family as the starter formula: a power law on the starter
//! fraction scaled by a Q10 temperature law and tiered corrections, but with a
//! fixed 26 °C reference temperature (the starter formula's reference is
//! configurable; the bulk baseline is not).
//!
//! ```text
//! hours = c * (starter%/100)^(-beta) * Q10^((26 - T)/10) * flour * hydration * salt
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::formulas::FlourType;

/// Fixed reference dough temperature for the bulk model, in °C.
pub const BULK_REFERENCE_TEMP_C: f64 = 26.0;

/// Floor applied to the starter percentage before the power law.
const MIN_STARTER_PERCENT: f64 = 1.0;

/// Hydration band for the bulk formula.
///
/// A coarse three-way split rather than a numeric hydration input: the bulk
/// correction is too rough to warrant more precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HydrationBand {
    /// Stiff dough (retards fermentation, factor 1.10)
    Stiff,
    /// Standard hydration (baseline)
    Standard,
    /// High hydration (speeds fermentation, factor 0.90)
    High,
}

impl Default for HydrationBand {
    fn default() -> Self {
        HydrationBand::Standard
    }
}

/// Tunable coefficients for the bulk model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkCoefficients {
    /// Base duration scale (hours at 100% starter and 26 °C)
    pub c: f64,

    /// Power-law exponent on the starter fraction
    pub beta: f64,

    /// Q10 temperature coefficient
    pub q10: f64,
}

impl Default for BulkCoefficients {
    fn default() -> Self {
        BulkCoefficients {
            c: 3.5,
            beta: 0.35,
            q10: 2.0,
        }
    }
}

/// Input parameters for the bulk fermentation formula.
///
/// ## JSON Example
///
/// ```json
/// {
///   "starter_percent": 20.0,
///   "dough_temp_c": 24.0,
///   "flour_type": "white",
///   "hydration_band": "standard",
///   "salt_percent": 2.0,
///   "coefficients": { "c": 3.5, "beta": 0.35, "q10": 2.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkInput {
    /// Starter amount as a baker's percent of flour weight
    pub starter_percent: f64,

    /// Dough temperature in °C
    pub dough_temp_c: f64,

    /// Flour type (whole-grain ferments faster)
    pub flour_type: FlourType,

    /// Hydration band
    pub hydration_band: HydrationBand,

    /// Salt as a baker's percent of flour weight
    pub salt_percent: f64,

    /// Tunable model coefficients
    pub coefficients: BulkCoefficients,
}

impl Default for BulkInput {
    fn default() -> Self {
        BulkInput {
            starter_percent: 20.0,
            dough_temp_c: 24.0,
            flour_type: FlourType::White,
            hydration_band: HydrationBand::Standard,
            salt_percent: 2.0,
            coefficients: BulkCoefficients::default(),
        }
    }
}

/// Result of the bulk fermentation formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BulkResult {
    /// Estimated bulk fermentation duration in hours
    pub bulk_hours: f64,
}

/// Calculate the bulk fermentation duration.
///
/// The starter percentage is floored at 1.0 before the power law so a zero or
/// negative entry cannot blow up the exponentiation. Total over finite inputs;
/// never returns an error.
pub fn calculate(input: &BulkInput) -> CalcResult<BulkResult> {
    let flour_factor = match input.flour_type {
        FlourType::White => 1.0,
        FlourType::Whole => 0.9,
    };

    let hydration_factor = match input.hydration_band {
        HydrationBand::Stiff => 1.10,
        HydrationBand::Standard => 1.00,
        HydrationBand::High => 0.90,
    };

    // Higher salt retards fermentation.
    let salt_factor = if input.salt_percent >= 3.0 {
        1.10
    } else if input.salt_percent >= 2.3 {
        1.05
    } else {
        1.00
    };

    let sp = input.starter_percent.max(MIN_STARTER_PERCENT);

    let co = &input.coefficients;
    let temp_factor = co
        .q10
        .powf((BULK_REFERENCE_TEMP_C - input.dough_temp_c) / 10.0);

    let bulk_hours = co.c
        * (sp / 100.0).powf(-co.beta)
        * temp_factor
        * flour_factor
        * hydration_factor
        * salt_factor;

    Ok(BulkResult { bulk_hours })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical_dough() -> BulkInput {
        BulkInput {
            starter_percent: 20.0,
            dough_temp_c: 26.0,
            flour_type: FlourType::White,
            hydration_band: HydrationBand::Standard,
            salt_percent: 2.0,
            coefficients: BulkCoefficients::default(),
        }
    }

    #[test]
    fn test_typical_dough() {
        let result = calculate(&typical_dough()).unwrap();
        // At 26 °C reference, all factors 1.0: hours = 3.5 * 0.2^(-0.35)
        let expected = 3.5 * 0.2_f64.powf(-0.35);
        assert!((result.bulk_hours - expected).abs() < 1e-12);
    }

    #[test]
    fn test_starter_percent_floor() {
        let mut input = typical_dough();
        input.starter_percent = 0.0;
        let zero = calculate(&input).unwrap();
        assert!(zero.bulk_hours.is_finite());

        input.starter_percent = 1.0;
        let one = calculate(&input).unwrap();
        assert_eq!(zero.bulk_hours, one.bulk_hours);

        // Negative entries hit the same floor
        input.starter_percent = -5.0;
        let negative = calculate(&input).unwrap();
        assert_eq!(negative.bulk_hours, one.bulk_hours);
    }

    #[test]
    fn test_salt_tiers() {
        let baseline = calculate(&typical_dough()).unwrap();

        let mut salty = typical_dough();
        salty.salt_percent = 2.5;
        let medium = calculate(&salty).unwrap();
        assert!((medium.bulk_hours / baseline.bulk_hours - 1.05).abs() < 1e-12);

        salty.salt_percent = 3.0;
        let high = calculate(&salty).unwrap();
        assert!((high.bulk_hours / baseline.bulk_hours - 1.10).abs() < 1e-12);
    }

    #[test]
    fn test_hydration_bands() {
        let baseline = calculate(&typical_dough()).unwrap();

        let mut input = typical_dough();
        input.hydration_band = HydrationBand::Stiff;
        let stiff = calculate(&input).unwrap();
        assert!((stiff.bulk_hours / baseline.bulk_hours - 1.10).abs() < 1e-12);

        input.hydration_band = HydrationBand::High;
        let high = calculate(&input).unwrap();
        assert!((high.bulk_hours / baseline.bulk_hours - 0.90).abs() < 1e-12);
    }

    #[test]
    fn test_whole_flour_ferments_faster() {
        let white = calculate(&typical_dough()).unwrap();

        let mut input = typical_dough();
        input.flour_type = FlourType::Whole;
        let whole = calculate(&input).unwrap();

        assert!((whole.bulk_hours / white.bulk_hours - 0.9).abs() < 1e-12);
    }

    #[test]
    fn test_warmer_dough_ferments_faster() {
        // Strictly decreasing duration as temperature rises (Q10 > 1)
        let mut input = typical_dough();
        let mut previous = f64::INFINITY;
        for temp in [18.0, 21.0, 24.0, 27.0, 30.0] {
            input.dough_temp_c = temp;
            let hours = calculate(&input).unwrap().bulk_hours;
            assert!(hours < previous, "expected {} < {} at {} °C", hours, previous, temp);
            previous = hours;
        }
    }

    #[test]
    fn test_idempotence() {
        let input = typical_dough();
        let a = calculate(&input).unwrap();
        let b = calculate(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialization() {
        let input = typical_dough();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: BulkInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
