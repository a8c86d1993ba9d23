use tracing::warn;

use super::action::Action;
use super::error::{Error, Result};
use super::expression::Literal;
use super::state::{AtomUniverse, State};

/// What an external search driver consumes. Implementors supply the frozen
/// universe, initial state, goal and ground actions; the transition and goal
/// operations are derived from those and are pure. All of them reject a state
/// that was not built over this universe with [`Error::StateMismatch`].
pub trait Problem {
    fn universe(&self) -> &AtomUniverse;
    fn initial_state(&self) -> &State;
    fn goal(&self) -> &[Literal];
    fn ground_actions(&self) -> &[Action];

    /// Applicable ground actions, in grounding order.
    fn actions(&self, state: &State) -> Result<Vec<&Action>> {
        let universe = self.universe();
        universe.check(state)?;
        Ok(self.ground_actions().iter().filter(|a| a.is_applicable(state, universe)).collect())
    }

    /// Successor of `state` under `action`. An action whose preconditions do
    /// not hold is a caller bug and is reported rather than applied.
    fn result(&self, state: &State, action: &Action) -> Result<State> {
        let universe = self.universe();
        universe.check(state)?;
        if let Some((literal, expected)) = action.unmet_precondition(state, universe) {
            warn!(action = %action, precondition = %literal, expected, "refusing out-of-contract transition");
            return Err(Error::PreconditionViolated {
                action: action.to_string(),
                literal: literal.clone(),
                expected,
            });
        }
        Ok(action.apply(state, universe))
    }

    /// Every goal literal is true in `state`. Goal literals outside the universe never hold.
    fn goal_test(&self, state: &State) -> Result<bool> {
        Ok(self.unmet_goals(state)? == 0)
    }

    /// Goal literals not yet true in `state`.
    fn unmet_goals(&self, state: &State) -> Result<usize> {
        let universe = self.universe();
        universe.check(state)?;
        Ok(self.goal().iter().filter(|g| !universe.holds(state, g)).count())
    }
}
