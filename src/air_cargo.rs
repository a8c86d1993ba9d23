//! The air cargo logistics domain: cargos are loaded onto planes, flown
//! between airports and unloaded.
pub mod grounding;
pub mod problem;
pub mod scenarios;

pub use problem::AirCargoProblem;
pub use scenarios::{air_cargo_p1, air_cargo_p2, air_cargo_p3};
