//! Domain independent STRIPS machinery: literals, the fixed atom universe,
//! ground actions and the contract a search driver consumes.
pub mod action;
pub mod error;
pub mod expression;
pub mod heuristic;
pub mod problem;
pub mod state;

mod utils;

pub use action::Action;
pub use error::{Error, Result};
pub use expression::{Literal, Term};
pub use heuristic::{Heuristic, HeuristicCache, LevelSum, ProblemId, DEFAULT_CACHE_CAPACITY};
pub use problem::Problem;
pub use state::{AtomUniverse, FluentState, State};
