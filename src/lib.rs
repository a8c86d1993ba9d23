pub mod strips;
pub mod air_cargo;
pub mod config;

pub use air_cargo::AirCargoProblem;
pub use strips::{Action, Error, Heuristic, Literal, Problem, State, Term};
