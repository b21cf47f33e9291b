//! # proof_core - Sourdough Baking Calculation Engine
//!
//! `proof_core` is the computational heart of Proofcalc, providing the three
//! sourdough baking formulas (water temperature for a desired dough
//! temperature, starter peak time, bulk fermentation duration) together with
//! persistent session handling. All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure formula functions that take input and return results
//! - **Explicit coefficients**: Tunable model coefficients travel inside each
//!   input record instead of being read from ambient configuration
//! - **JSON-First**: All types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//!
//! ## Quick Start
//!
//! ```rust
//! use proof_core::formulas::water::{calculate, WaterInput};
//!
//! let input = WaterInput::default();
//! let result = calculate(&input).unwrap();
//! println!("water: {:.1} °C", result.water_temp_c);
//! ```
//!
//! ## Modules
//!
//! - [`formulas`] - The three calculator formulas (water, starter, bulk)
//! - [`display`] - Rounding rules and advisories for presenting results
//! - [`session`] - Persisted session container (inputs + coefficient settings)
//! - [`file_io`] - File operations with atomic saves and locking
//! - [`errors`] - Structured error types

pub mod display;
pub mod errors;
pub mod file_io;
pub mod formulas;
pub mod session;

// Re-export commonly used types at crate root for convenience
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_session, save_session, SessionLock};
pub use session::{Session, Settings};
