use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tracing::debug;

use super::grounding::{self, AT, FLY, IN, LOAD, UNLOAD};
use crate::strips::{
    Action, AtomUniverse, Error, FluentState, Heuristic, HeuristicCache, LevelSum, Literal, Problem, ProblemId, Result, State, Term,
};

/// Air cargo logistics instance: the grounded action set and frozen atom
/// universe for one set of cargos, planes and airports.
pub struct AirCargoProblem {
    id: ProblemId,
    cargos: Vec<Term>,
    planes: Vec<Term>,
    airports: Vec<Term>,
    universe: AtomUniverse,
    initial_state: State,
    goal: Vec<Literal>,
    actions: Vec<Action>,
    action_mapping: HashMap<String, usize>,
    cache: Arc<HeuristicCache>,
    planning_graph: Option<Box<dyn LevelSum>>,
}

impl std::fmt::Debug for AirCargoProblem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "AirCargoProblem({}):", self.id)?;
        writeln!(f, "Cargos: {:?}", self.cargos)?;
        writeln!(f, "Planes: {:?}", self.planes)?;
        writeln!(f, "Airports: {:?}", self.airports)?;
        writeln!(f, "Atoms: {}", self.universe.len())?;
        writeln!(f, "Initial state: {}", self.initial_state)?;
        writeln!(f, "Goal: {:?}", self.goal)?;
        writeln!(f, "Ground actions: {}", self.actions.len())?;
        writeln!(f, "Planning graph attached: {}", self.planning_graph.is_some())?;
        write!(f, "{:?}", self.cache)
    }
}

impl AirCargoProblem {
    /// Validates every literal against the declared terms, freezes the atom
    /// universe from the initial partition and grounds all actions. Every atom a
    /// ground action or the goal mentions must be listed in `initial`, either
    /// as true or as false.
    pub fn new(cargos: Vec<Term>, planes: Vec<Term>, airports: Vec<Term>, initial: FluentState, goal: Vec<Literal>) -> Result<Self> {
        let declared: HashSet<&Term> = cargos.iter().chain(&planes).chain(&airports).collect();
        for literal in initial.pos.iter().chain(&initial.neg).chain(&goal) {
            Self::validate(&declared, literal)?;
        }
        let universe = AtomUniverse::build(&initial.pos, &initial.neg)?;
        let initial_state = universe.encode(&initial);
        let actions = grounding::ground_actions(&cargos, &planes, &airports);
        // a partial initial partition would let effects fall outside the state
        for action in &actions {
            universe.require(action, action.literals())?;
        }
        universe.require(&"goal", &goal)?;
        let action_mapping = actions.iter().enumerate().map(|(idx, a)| (a.to_string(), idx)).collect();
        let id = ProblemId::next();
        debug!(
            problem = %id,
            atoms = universe.len(),
            actions = actions.len(),
            cargos = cargos.len(),
            planes = planes.len(),
            airports = airports.len(),
            "grounded air cargo problem"
        );
        Ok(Self {
            id,
            cargos,
            planes,
            airports,
            universe,
            initial_state,
            goal,
            actions,
            action_mapping,
            cache: Arc::new(HeuristicCache::default()),
            planning_graph: None,
        })
    }

    fn validate(declared: &HashSet<&Term>, literal: &Literal) -> Result<()> {
        if !matches!(literal.predicate.as_str(), AT | IN) || literal.arity() != 2 {
            return Err(Error::UnknownPredicate { literal: literal.clone() });
        }
        match literal.args.iter().find(|t| !declared.contains(t)) {
            Some(term) => Err(Error::UnknownTerm { literal: literal.clone(), term: term.clone() }),
            None => Ok(()),
        }
    }

    /// Memoizes heuristics in `cache` instead of a private one. Safe to share
    /// between problems: entries are keyed by problem identity.
    pub fn with_cache(mut self, cache: Arc<HeuristicCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Attaches the external planning graph used by [`Self::h_pg_levelsum`].
    pub fn with_planning_graph<G: LevelSum + 'static>(mut self, graph: G) -> Self {
        self.planning_graph = Some(Box::new(graph));
        self
    }

    pub fn id(&self) -> ProblemId {
        self.id
    }

    pub fn cargos(&self) -> &[Term] {
        &self.cargos
    }

    pub fn planes(&self) -> &[Term] {
        &self.planes
    }

    pub fn airports(&self) -> &[Term] {
        &self.airports
    }

    pub fn cache(&self) -> &Arc<HeuristicCache> {
        &self.cache
    }

    /// Looks a ground action up by its display name, e.g. `Load(C1, P1, SFO)`.
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.action_mapping.get(name).map(|idx| &self.actions[*idx])
    }

    /// Number of ground actions per schema: (load, unload, fly).
    pub fn schema_counts(&self) -> (usize, usize, usize) {
        let count = |schema: &str| self.actions.iter().filter(|a| a.name == schema).count();
        (count(LOAD), count(UNLOAD), count(FLY))
    }

    pub fn h_constant(&self, _state: &State) -> usize {
        1
    }

    /// Count of goal literals false in `state`: every unmet goal is assumed to
    /// take exactly one action.
    pub fn h_ignore_preconditions(&self, state: &State) -> Result<usize> {
        self.cache
            .get_or_try_insert_with(self.id, Heuristic::IgnorePreconditions, state, || self.unmet_goals(state))
    }

    /// Level-sum estimate from the attached planning graph. Not admissible.
    pub fn h_pg_levelsum(&self, state: &State) -> Result<usize> {
        let graph = self.planning_graph.as_ref().ok_or(Error::NoPlanningGraph)?;
        self.universe.check(state)?;
        self.cache
            .get_or_try_insert_with(self.id, Heuristic::LevelSum, state, || Ok(graph.level_sum(self, state)))
    }

    pub fn estimate(&self, heuristic: Heuristic, state: &State) -> Result<usize> {
        match heuristic {
            Heuristic::Constant => Ok(self.h_constant(state)),
            Heuristic::IgnorePreconditions => self.h_ignore_preconditions(state),
            Heuristic::LevelSum => self.h_pg_levelsum(state),
        }
    }

    /// Applies the named actions in order from the initial state and returns
    /// every intermediate state. Names may be written with any spacing,
    /// `Fly(P1,SFO,JFK)` and `Fly(P1, SFO, JFK)` name the same action.
    pub fn replay<S: AsRef<str>>(&self, plan: &[S]) -> Result<Vec<State>> {
        let mut states = Vec::with_capacity(plan.len());
        let mut state = self.initial_state.clone();
        for name in plan {
            let name = name.as_ref();
            let canonical = name.parse::<Literal>().map(|l| l.to_string()).unwrap_or_else(|_| name.to_owned());
            let action = self.action(&canonical).ok_or_else(|| Error::UnknownAction(name.to_owned()))?;
            state = self.result(&state, action)?;
            states.push(state.clone());
        }
        Ok(states)
    }
}

impl Problem for AirCargoProblem {
    fn universe(&self) -> &AtomUniverse {
        &self.universe
    }

    fn initial_state(&self) -> &State {
        &self.initial_state
    }

    fn goal(&self) -> &[Literal] {
        &self.goal
    }

    fn ground_actions(&self) -> &[Action] {
        &self.actions
    }
}
