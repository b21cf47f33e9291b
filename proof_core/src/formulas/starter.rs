//! # Starter Peak-Hours Formula
//!
//! Estimates the hours until a starter build peaks, from the build ratio
//! (seed : flour : water), culture temperature, and flour type.
//!
//! The model is an empirical power law on the inoculation fraction scaled by a
//! Q10 temperature law and tiered flour/hydration corrections:
//!
//! ```text
//! hours = k * inoculation^(-alpha) * Q10^((Tref - T)/10) * flour * hydration
//! ```
//!
//! ## Example
//!
//! ```rust
//! use proof_core::formulas::starter::{calculate, StarterCoefficients, StarterInput};
//! use proof_core::formulas::FlourType;
//!
//! let input = StarterInput {
//!     seed_g: 20.0,
//!     flour_g: 100.0,
//!     water_g: 100.0,
//!     culture_temp_c: 26.0,
//!     flour_type: FlourType::White,
//!     coefficients: StarterCoefficients::default(),
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert!(result.peak_hours > 0.0);
//! assert!((result.inoculation_percent - 9.1).abs() < 0.1);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;
use crate::formulas::FlourType;

/// Inoculation fraction assumed when no build mass is entered at all.
const DEFAULT_INOCULATION: f64 = 0.2;

/// Hydration percent assumed when the flour mass is zero.
const DEFAULT_HYDRATION_PERCENT: f64 = 100.0;

/// Tunable coefficients for the starter model.
///
/// All four are user-adjustable settings, persisted across sessions. The
/// formula does not validate them; physically meaningful results require
/// `k`, `alpha` and `q10` to be positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarterCoefficients {
    /// Base duration scale (hours at 100% inoculation and reference temp)
    pub k: f64,

    /// Power-law exponent on the inoculation fraction
    pub alpha: f64,

    /// Q10 temperature coefficient (duration multiplier per 10 °C below reference)
    pub q10: f64,

    /// Reference culture temperature in °C
    pub reference_temp_c: f64,
}

impl Default for StarterCoefficients {
    fn default() -> Self {
        StarterCoefficients {
            k: 3.0,
            alpha: 0.4,
            q10: 2.0,
            reference_temp_c: 26.0,
        }
    }
}

/// Input parameters for the starter peak-time formula.
///
/// Masses are in consistent units (grams in practice); only their ratios
/// matter.
///
/// ## JSON Example
///
/// ```json
/// {
///   "seed_g": 20.0,
///   "flour_g": 100.0,
///   "water_g": 100.0,
///   "culture_temp_c": 26.0,
///   "flour_type": "white",
///   "coefficients": { "k": 3.0, "alpha": 0.4, "q10": 2.0, "reference_temp_c": 26.0 }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarterInput {
    /// Seed (ripe starter) mass
    pub seed_g: f64,

    /// Fresh flour mass
    pub flour_g: f64,

    /// Water mass
    pub water_g: f64,

    /// Culture temperature in °C
    pub culture_temp_c: f64,

    /// Flour type (whole-grain peaks faster)
    pub flour_type: FlourType,

    /// Tunable model coefficients
    pub coefficients: StarterCoefficients,
}

impl Default for StarterInput {
    fn default() -> Self {
        StarterInput {
            seed_g: 20.0,
            flour_g: 100.0,
            water_g: 100.0,
            culture_temp_c: 24.0,
            flour_type: FlourType::White,
            coefficients: StarterCoefficients::default(),
        }
    }
}

impl StarterInput {
    /// Inoculation fraction: seed mass over total build mass, falling back to
    /// 0.2 when no mass is entered, clamped to [0.01, 0.5] before use in the
    /// power law.
    pub fn inoculation_fraction(&self) -> f64 {
        let total = self.seed_g + self.flour_g + self.water_g;
        let raw = if total > 0.0 {
            self.seed_g / total
        } else {
            DEFAULT_INOCULATION
        };
        raw.clamp(0.01, 0.5)
    }

    /// Hydration percent: water over flour, defaulting to 100 when the flour
    /// mass is zero.
    pub fn hydration_percent(&self) -> f64 {
        if self.flour_g > 0.0 {
            (self.water_g / self.flour_g) * 100.0
        } else {
            DEFAULT_HYDRATION_PERCENT
        }
    }
}

/// Results from the starter peak-time formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarterResult {
    /// Estimated hours until the build peaks
    pub peak_hours: f64,

    /// Inoculation percent (clamped fraction * 100), for display
    pub inoculation_percent: f64,

    /// Hydration percent, for display
    pub hydration_percent: f64,
}

/// Calculate the starter peak time.
///
/// Total over finite inputs; never returns an error. Zero-mass and zero-flour
/// inputs fall back to defaults instead of dividing by zero.
pub fn calculate(input: &StarterInput) -> CalcResult<StarterResult> {
    let inoculation = input.inoculation_fraction();
    let hydration = input.hydration_percent();

    let flour_factor = match input.flour_type {
        FlourType::White => 1.0,
        FlourType::Whole => 0.85,
    };

    // Stiffer builds ferment slower; tiered empirical correction.
    let hydration_factor = if hydration >= 90.0 {
        1.00
    } else if hydration >= 70.0 {
        1.07
    } else {
        1.15
    };

    let co = &input.coefficients;
    let temp_factor = co
        .q10
        .powf((co.reference_temp_c - input.culture_temp_c) / 10.0);

    let peak_hours =
        co.k * inoculation.powf(-co.alpha) * temp_factor * flour_factor * hydration_factor;

    Ok(StarterResult {
        peak_hours,
        inoculation_percent: inoculation * 100.0,
        hydration_percent: hydration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn typical_build() -> StarterInput {
        StarterInput {
            seed_g: 20.0,
            flour_g: 100.0,
            water_g: 100.0,
            culture_temp_c: 26.0,
            flour_type: FlourType::White,
            coefficients: StarterCoefficients::default(),
        }
    }

    #[test]
    fn test_typical_build() {
        let result = calculate(&typical_build()).unwrap();

        // inoc = 20/220 = 0.0909..., hydration = 100
        assert!((result.inoculation_percent - 9.0909).abs() < 0.01);
        assert_eq!(result.hydration_percent, 100.0);

        // At reference temp, white flour, >=90% hydration:
        // hours = 3.0 * 0.090909^(-0.4)
        let expected = 3.0 * (20.0 / 220.0_f64).powf(-0.4);
        assert!((result.peak_hours - expected).abs() < 1e-12);
    }

    #[test]
    fn test_zero_mass_fallbacks() {
        let mut input = typical_build();
        input.seed_g = 0.0;
        input.flour_g = 0.0;
        input.water_g = 0.0;

        let result = calculate(&input).unwrap();
        // Fraction falls back to 0.2, hydration to 100
        assert_eq!(result.inoculation_percent, 20.0);
        assert_eq!(result.hydration_percent, 100.0);
    }

    #[test]
    fn test_inoculation_clamp_upper() {
        // Pure seed drives the raw fraction to 1.0; clamped to 0.5
        let mut input = typical_build();
        input.seed_g = 100.0;
        input.flour_g = 0.0;
        input.water_g = 0.0;

        assert_eq!(input.inoculation_fraction(), 0.5);
        let result = calculate(&input).unwrap();
        assert_eq!(result.inoculation_percent, 50.0);
    }

    #[test]
    fn test_inoculation_clamp_lower() {
        // A trace of seed in a huge build; clamped to 0.01
        let mut input = typical_build();
        input.seed_g = 0.1;
        input.flour_g = 1000.0;
        input.water_g = 1000.0;

        assert_eq!(input.inoculation_fraction(), 0.01);
        let result = calculate(&input).unwrap();
        assert_eq!(result.inoculation_percent, 1.0);
    }

    #[test]
    fn test_whole_flour_peaks_faster() {
        let white = calculate(&typical_build()).unwrap();

        let mut input = typical_build();
        input.flour_type = FlourType::Whole;
        let whole = calculate(&input).unwrap();

        assert!((whole.peak_hours / white.peak_hours - 0.85).abs() < 1e-12);
    }

    #[test]
    fn test_hydration_tiers() {
        // Changing the water mass also shifts the inoculation fraction, so
        // compare against the full analytic expectation rather than a ratio
        // of the >=90 baseline.
        let co = StarterCoefficients::default();

        // 60% hydration: stiff tier, factor 1.15; inoc = 20/180
        let mut stiff = typical_build();
        stiff.water_g = 60.0;
        let stiff_result = calculate(&stiff).unwrap();
        assert_eq!(stiff_result.hydration_percent, 60.0);
        let expected = co.k * (20.0 / 180.0_f64).powf(-co.alpha) * 1.15;
        assert!((stiff_result.peak_hours - expected).abs() < 1e-12);

        // 75% hydration: middle tier, factor 1.07; inoc = 20/195
        let mut medium = typical_build();
        medium.water_g = 75.0;
        let medium_result = calculate(&medium).unwrap();
        assert_eq!(medium_result.hydration_percent, 75.0);
        let expected = co.k * (20.0 / 195.0_f64).powf(-co.alpha) * 1.07;
        assert!((medium_result.peak_hours - expected).abs() < 1e-12);
    }

    #[test]
    fn test_q10_scaling() {
        // 10 degrees below reference doubles the duration at Q10 = 2
        let at_ref = calculate(&typical_build()).unwrap();

        let mut cold = typical_build();
        cold.culture_temp_c = 16.0;
        let cold_result = calculate(&cold).unwrap();

        assert!((cold_result.peak_hours / at_ref.peak_hours - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_idempotence() {
        let input = typical_build();
        let a = calculate(&input).unwrap();
        let b = calculate(&input).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_serialization() {
        let input = typical_build();
        let json = serde_json::to_string_pretty(&input).unwrap();
        let roundtrip: StarterInput = serde_json::from_str(&json).unwrap();
        assert_eq!(input, roundtrip);
    }
}
