//! # Water Temperature Formula
//!
//! Back-solves the water temperature needed to hit a desired dough temperature
//! (DDT) using the classic baker's DDT formula: the DDT budget is the target
//! temperature counted once per component that touches dough temperature
//! (room, flour, optional preferment, mixer friction), and water makes up
//! whatever the other components do not supply.
//!
//! ## Example
//!
//! ```rust
//! use proof_core::formulas::water::{calculate, MixerMethod, WaterInput};
//!
//! let input = WaterInput {
//!     desired_dough_temp_c: 27.0,
//!     room_temp_c: 22.0,
//!     flour_temp_c: 22.0,
//!     preferment_enabled: false,
//!     preferment_temp_c: 0.0,
//!     mixer: MixerMethod::Hand,
//!     custom_friction_c: None,
//! };
//!
//! let result = calculate(&input).unwrap();
//! assert_eq!(result.water_temp_c, 36.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::CalcResult;

/// Mixing method, which determines the friction factor: the empirical
/// temperature rise caused by mechanical mixing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MixerMethod {
    /// Hand mixing (baseline, 1.0 °C)
    Hand,
    /// Planetary/stand mixer (9.0 °C)
    Planetary,
    /// Spiral mixer (11.0 °C)
    Spiral,
    /// User-supplied friction factor
    Custom,
}

impl Default for MixerMethod {
    fn default() -> Self {
        MixerMethod::Hand
    }
}

impl MixerMethod {
    /// Resolve the friction factor in °C.
    ///
    /// The fixed table values are empirical baker's conventions and must not
    /// be altered. For `Custom`, an absent value resolves to 0.0 (callers
    /// coerce non-numeric input to `None` before building the record).
    pub fn friction_c(self, custom_friction_c: Option<f64>) -> f64 {
        match self {
            MixerMethod::Hand => 1.0,
            MixerMethod::Planetary => 9.0,
            MixerMethod::Spiral => 11.0,
            MixerMethod::Custom => custom_friction_c.unwrap_or(0.0),
        }
    }
}

/// Input parameters for the water temperature formula.
///
/// ## JSON Example
///
/// ```json
/// {
///   "desired_dough_temp_c": 25.0,
///   "room_temp_c": 21.0,
///   "flour_temp_c": 21.0,
///   "preferment_enabled": true,
///   "preferment_temp_c": 21.0,
///   "mixer": "spiral",
///   "custom_friction_c": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WaterInput {
    /// Desired dough temperature (DDT) in °C
    pub desired_dough_temp_c: f64,

    /// Room/ambient temperature in °C
    pub room_temp_c: f64,

    /// Flour temperature in °C
    pub flour_temp_c: f64,

    /// Whether a preferment (poolish, biga, levain) is mixed into the dough
    pub preferment_enabled: bool,

    /// Preferment temperature in °C (ignored unless enabled)
    pub preferment_temp_c: f64,

    /// Mixing method (determines friction factor)
    pub mixer: MixerMethod,

    /// Friction factor in °C when `mixer` is `Custom`; `None` resolves to 0.0
    pub custom_friction_c: Option<f64>,
}

impl Default for WaterInput {
    fn default() -> Self {
        WaterInput {
            desired_dough_temp_c: 25.0,
            room_temp_c: 21.0,
            flour_temp_c: 21.0,
            preferment_enabled: false,
            preferment_temp_c: 21.0,
            mixer: MixerMethod::Hand,
            custom_friction_c: None,
        }
    }
}

/// Result of the water temperature formula.
///
/// The value may be negative or unrealistically high; warning about
/// implausible temperatures is the presentation layer's job (see
/// [`crate::display::water_advisory`]).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaterResult {
    /// Required water temperature in °C
    pub water_temp_c: f64,
}

/// Calculate the required water temperature.
///
/// The DDT is multiplied by the number of temperature-contributing dough
/// components plus the dough itself: 3 without a preferment, 4 with one. The
/// sum of the known component temperatures (room, flour, preferment when
/// enabled, friction) is subtracted from that budget.
///
/// Total over finite inputs; never returns an error.
pub fn calculate(input: &WaterInput) -> CalcResult<WaterResult> {
    let friction = input.mixer.friction_c(input.custom_friction_c);
    let n = if input.preferment_enabled { 4.0 } else { 3.0 };

    let preferment = if input.preferment_enabled {
        input.preferment_temp_c
    } else {
        0.0
    };
    let sum = input.room_temp_c + input.flour_temp_c + preferment + friction;

    Ok(WaterResult {
        water_temp_c: input.desired_dough_temp_c * n - sum,
    })
}
