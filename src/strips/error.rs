use thiserror::Error;

use super::expression::{Literal, Term};

/// Everything here is a programmer error surfaced at construction or call time;
/// none of it is a runtime condition worth retrying.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("{literal} references undeclared term {term}")]
    UnknownTerm { literal: Literal, term: Term },
    #[error("{literal} is not an At/In fluent of arity 2")]
    UnknownPredicate { literal: Literal },
    #[error("{literal} is listed more than once in the initial state")]
    DuplicateAtom { literal: Literal },
    #[error("{literal} used by {owner} is not an atom of the initial state")]
    OutsideUniverse { owner: String, literal: Literal },
    #[error("{action} is not applicable: {literal} must be {expected}")]
    PreconditionViolated {
        action: String,
        literal: Literal,
        expected: bool,
    },
    #[error("state has {found} atoms but the problem's universe has {expected}")]
    StateMismatch { expected: usize, found: usize },
    #[error("unknown action {0}")]
    UnknownAction(String),
    #[error("no planning graph is attached to compute the level-sum estimate")]
    NoPlanningGraph,
    #[error("col:{col} {message}")]
    Syntax { col: usize, message: String },
}

pub type Result<T> = std::result::Result<T, Error>;
