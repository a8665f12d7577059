//! Domain layer: business rules and the ports they depend on.
//!
//! Everything here is transport agnostic. Services orchestrate store ports
//! and the injected clock; the arithmetic rules (one-rep-max, leveling,
//! deload staleness) live in their own pure modules.

pub mod error;
pub mod game;
pub mod leveling;
pub mod members;
pub mod nutrition;
pub mod one_rep_max;
pub mod ports;
pub mod training;
pub mod workouts;

pub use error::{Error, ErrorCode, TRACE_ID_HEADER};
