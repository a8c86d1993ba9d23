use std::fmt;

use super::expression::{Literal, Term};
use super::state::{AtomUniverse, State};
use super::utils::build_call_string;

/// A ground action. Immutable once grounded.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Action {
    pub name: String,
    pub args: Vec<Term>,
    pub precondition_pos: Vec<Literal>,
    pub precondition_neg: Vec<Literal>,
    pub effect_add: Vec<Literal>,
    pub effect_remove: Vec<Literal>,
}

impl Action {
    /// Action with positive preconditions only, the only kind air cargo needs.
    pub fn new(name: &str, args: Vec<Term>, precondition_pos: Vec<Literal>, effect_add: Vec<Literal>, effect_remove: Vec<Literal>) -> Action {
        Action {
            name: name.to_string(),
            args,
            precondition_pos,
            precondition_neg: Vec::new(),
            effect_add,
            effect_remove,
        }
    }

    pub fn with_negative_preconditions(mut self, precondition_neg: Vec<Literal>) -> Action {
        self.precondition_neg = precondition_neg;
        self
    }

    /// First precondition that does not hold in `state`, with the truth value it needed.
    pub fn unmet_precondition<'a>(&'a self, state: &State, universe: &AtomUniverse) -> Option<(&'a Literal, bool)> {
        let pos = self.precondition_pos.iter().find(|l| !universe.holds(state, l)).map(|l| (l, true));
        pos.or_else(|| self.precondition_neg.iter().find(|l| universe.holds(state, l)).map(|l| (l, false)))
    }

    /// Every literal the action reads or writes.
    pub fn literals(&self) -> impl Iterator<Item = &Literal> {
        self.precondition_pos
            .iter()
            .chain(&self.precondition_neg)
            .chain(&self.effect_add)
            .chain(&self.effect_remove)
    }

    pub fn is_applicable(&self, state: &State, universe: &AtomUniverse) -> bool {
        self.unmet_precondition(state, universe).is_none()
    }

    /// Successor of `state`: removals first, then additions, so a literal both
    /// added and removed ends up true. Preconditions are not checked here, and
    /// every effect must already be in `universe` (see [`AtomUniverse::require`]).
    pub(crate) fn apply(&self, state: &State, universe: &AtomUniverse) -> State {
        let mut next = state.clone();
        for idx in self.effect_remove.iter().filter_map(|l| universe.index_of(l)) {
            next.set(idx, false);
        }
        for idx in self.effect_add.iter().filter_map(|l| universe.index_of(l)) {
            next.set(idx, true);
        }
        next
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", build_call_string(&self.name, &self.args))
    }
}
