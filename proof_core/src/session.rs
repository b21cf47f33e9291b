//! # Session Data Structures
//!
//! The `Session` struct is the root container for everything that survives
//! between runs: the last-used inputs of each calculator and the tunable model
//! coefficients. Sessions serialize to `.sdc` (sourdough calculator) files as
//! human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Session
//! ├── meta: SessionMetadata (version, timestamps)
//! ├── settings: Settings (six tunable coefficients)
//! ├── water: WaterInput (last-used water calculator values)
//! ├── starter: StarterValues (last-used starter build values)
//! └── bulk: BulkValues (last-used bulk dough values)
//! ```
//!
//! Coefficients live only in `settings`; the per-calculator value records
//! deliberately exclude them. Front ends assemble full engine inputs by
//! combining a value record with `settings.starter_coefficients()` or
//! `settings.bulk_coefficients()`, so there is a single source of truth for
//! the tunables.
//!
//! ## Example
//!
//! ```rust
//! use proof_core::session::Session;
//!
//! let mut session = Session::new();
//! session.settings.q10 = 2.2;
//! session.touch();
//!
//! let json = serde_json::to_string_pretty(&session).unwrap();
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::formulas::{
    BulkCoefficients, BulkInput, FlourType, HydrationBand, StarterCoefficients, StarterInput,
    WaterInput,
};

/// Current schema version for .sdc files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root persisted container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Session metadata (version, timestamps)
    pub meta: SessionMetadata,

    /// Tunable model coefficients
    #[serde(default)]
    pub settings: Settings,

    /// Last-used water calculator inputs
    #[serde(default)]
    pub water: WaterInput,

    /// Last-used starter build values
    #[serde(default)]
    pub starter: StarterValues,

    /// Last-used bulk dough values
    #[serde(default)]
    pub bulk: BulkValues,
}

impl Session {
    /// Create a fresh session with stock coefficients and default inputs.
    pub fn new() -> Self {
        let now = Utc::now();
        Session {
            meta: SessionMetadata {
                version: SCHEMA_VERSION.to_string(),
                created: now,
                modified: now,
            },
            settings: Settings::default(),
            water: WaterInput::default(),
            starter: StarterValues::default(),
            bulk: BulkValues::default(),
        }
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }
}

impl Default for Session {
    fn default() -> Self {
        Session::new()
    }
}

/// Session metadata stored in the file header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// When the session was created
    pub created: DateTime<Utc>,

    /// When the session was last modified
    pub modified: DateTime<Utc>,
}

/// The six tunable model coefficients.
///
/// Field names match the persisted setting keys: `st_*` feed the starter
/// formula, `b_*` feed the bulk formula, and `q10` is shared by both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Starter base duration scale k
    pub st_k: f64,

    /// Starter power-law exponent alpha
    pub st_a: f64,

    /// Q10 temperature coefficient (shared by starter and bulk)
    pub q10: f64,

    /// Starter reference temperature in °C
    pub st_tref: f64,

    /// Bulk base duration scale c
    pub b_c: f64,

    /// Bulk power-law exponent beta
    pub b_b: f64,
}

impl Default for Settings {
    fn default() -> Self {
        let st = StarterCoefficients::default();
        let b = BulkCoefficients::default();
        Settings {
            st_k: st.k,
            st_a: st.alpha,
            q10: st.q10,
            st_tref: st.reference_temp_c,
            b_c: b.c,
            b_b: b.beta,
        }
    }
}

impl Settings {
    /// Assemble the starter formula's coefficient bundle.
    pub fn starter_coefficients(&self) -> StarterCoefficients {
        StarterCoefficients {
            k: self.st_k,
            alpha: self.st_a,
            q10: self.q10,
            reference_temp_c: self.st_tref,
        }
    }

    /// Assemble the bulk formula's coefficient bundle.
    pub fn bulk_coefficients(&self) -> BulkCoefficients {
        BulkCoefficients {
            c: self.b_c,
            beta: self.b_b,
            q10: self.q10,
        }
    }
}

/// Last-used starter build values (coefficients excluded, see module docs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StarterValues {
    /// Seed (ripe starter) mass in grams
    pub seed_g: f64,

    /// Fresh flour mass in grams
    pub flour_g: f64,

    /// Water mass in grams
    pub water_g: f64,

    /// Culture temperature in °C
    pub culture_temp_c: f64,

    /// Flour type
    pub flour_type: FlourType,
}

impl Default for StarterValues {
    fn default() -> Self {
        let input = StarterInput::default();
        StarterValues {
            seed_g: input.seed_g,
            flour_g: input.flour_g,
            water_g: input.water_g,
            culture_temp_c: input.culture_temp_c,
            flour_type: input.flour_type,
        }
    }
}

impl StarterValues {
    /// Build a full engine input by attaching coefficients from settings.
    pub fn to_input(&self, coefficients: StarterCoefficients) -> StarterInput {
        StarterInput {
            seed_g: self.seed_g,
            flour_g: self.flour_g,
            water_g: self.water_g,
            culture_temp_c: self.culture_temp_c,
            flour_type: self.flour_type,
            coefficients,
        }
    }
}

/// Last-used bulk dough values (coefficients excluded, see module docs).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BulkValues {
    /// Starter amount as a baker's percent of flour weight
    pub starter_percent: f64,

    /// Dough temperature in °C
    pub dough_temp_c: f64,

    /// Flour type
    pub flour_type: FlourType,

    /// Hydration band
    pub hydration_band: HydrationBand,

    /// Salt as a baker's percent of flour weight
    pub salt_percent: f64,
}

impl Default for BulkValues {
    fn default() -> Self {
        let input = BulkInput::default();
        BulkValues {
            starter_percent: input.starter_percent,
            dough_temp_c: input.dough_temp_c,
            flour_type: input.flour_type,
            hydration_band: input.hydration_band,
            salt_percent: input.salt_percent,
        }
    }
}

impl BulkValues {
    /// Build a full engine input by attaching coefficients from settings.
    pub fn to_input(&self, coefficients: BulkCoefficients) -> BulkInput {
        BulkInput {
            starter_percent: self.starter_percent,
            dough_temp_c: self.dough_temp_c,
            flour_type: self.flour_type,
            hydration_band: self.hydration_band,
            salt_percent: self.salt_percent,
            coefficients,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::{bulk, starter};

    #[test]
    fn test_session_creation() {
        let session = Session::new();
        assert_eq!(session.meta.version, SCHEMA_VERSION);
        assert_eq!(session.settings, Settings::default());
    }

    #[test]
    fn test_session_serialization_roundtrip() {
        let mut session = Session::new();
        session.settings.st_k = 2.8;
        session.water.desired_dough_temp_c = 27.0;
        session.bulk.salt_percent = 2.5;

        let json = serde_json::to_string_pretty(&session).unwrap();
        let roundtrip: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(session, roundtrip);
    }

    #[test]
    fn test_settings_feed_formulas() {
        let mut settings = Settings::default();
        settings.q10 = 2.5;
        settings.st_tref = 25.0;
        settings.b_b = 0.4;

        let st = settings.starter_coefficients();
        assert_eq!(st.q10, 2.5);
        assert_eq!(st.reference_temp_c, 25.0);

        let b = settings.bulk_coefficients();
        assert_eq!(b.q10, 2.5);
        assert_eq!(b.beta, 0.4);
    }

    #[test]
    fn test_values_to_input() {
        let session = Session::new();

        let starter_input = session
            .starter
            .to_input(session.settings.starter_coefficients());
        assert!(starter::calculate(&starter_input).is_ok());

        let bulk_input = session.bulk.to_input(session.settings.bulk_coefficients());
        assert!(bulk::calculate(&bulk_input).is_ok());
    }

    #[test]
    fn test_partial_file_loads_with_defaults() {
        // A session file from an older build missing whole sections
        let json = format!(
            "{{\"meta\":{{\"version\":\"{}\",\"created\":\"2026-01-01T00:00:00Z\",\"modified\":\"2026-01-01T00:00:00Z\"}}}}",
            SCHEMA_VERSION
        );
        let session: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(session.settings, Settings::default());
        assert_eq!(session.bulk, BulkValues::default());
    }

    #[test]
    fn test_touch_updates_modified() {
        let mut session = Session::new();
        let before = session.meta.modified;
        std::thread::sleep(std::time::Duration::from_millis(2));
        session.touch();
        assert!(session.meta.modified > before);
    }
}
