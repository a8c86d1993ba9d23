use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use cached::{Cached, SizedCache};
use tracing::trace;

use super::problem::Problem;
use super::state::State;

pub const DEFAULT_CACHE_CAPACITY: usize = 8192;

/// Remaining-cost estimators a search driver can order its frontier by.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Heuristic {
    /// Always 1.
    Constant,
    /// Number of goal literals not yet true.
    IgnorePreconditions,
    /// Planning graph level-sum, computed by an attached [`LevelSum`].
    LevelSum,
}

impl Heuristic {
    pub const ALL: [Heuristic; 3] = [Heuristic::Constant, Heuristic::IgnorePreconditions, Heuristic::LevelSum];
}

impl fmt::Display for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Heuristic::Constant => write!(f, "h_1"),
            Heuristic::IgnorePreconditions => write!(f, "h_ignore_preconditions"),
            Heuristic::LevelSum => write!(f, "h_pg_levelsum"),
        }
    }
}

impl FromStr for Heuristic {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Heuristic::ALL
            .iter()
            .copied()
            .find(|h| h.to_string() == s)
            .ok_or_else(|| format!("unknown heuristic {}", s))
    }
}

/// External planning graph component. Returns the sum, over goal literals, of the
/// first level at which each becomes reachable under mutex propagation.
pub trait LevelSum: Send + Sync {
    fn level_sum(&self, problem: &dyn Problem, state: &State) -> usize;
}

impl<F> LevelSum for F
where
    F: Fn(&dyn Problem, &State) -> usize + Send + Sync,
{
    fn level_sum(&self, problem: &dyn Problem, state: &State) -> usize {
        self(problem, state)
    }
}

/// Identity of a problem instance, unique for the life of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProblemId(u64);

impl ProblemId {
    pub fn next() -> ProblemId {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        ProblemId(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

type CacheKey = (ProblemId, Heuristic, State);

/// Bounded least-recently-used memo of heuristic values. Keys carry the problem
/// identity, so one cache may be shared by any number of problems and threads.
pub struct HeuristicCache {
    entries: Mutex<SizedCache<CacheKey, usize>>,
}

impl HeuristicCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: Mutex::new(SizedCache::with_size(capacity.max(1))),
        }
    }

    // Entries are plain values, a panic elsewhere cannot leave one half-written.
    fn lock(&self) -> MutexGuard<'_, SizedCache<CacheKey, usize>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, problem: ProblemId, heuristic: Heuristic, state: &State) -> Option<usize> {
        let key = (problem, heuristic, state.clone());
        let value = self.lock().cache_get(&key).copied();
        trace!(problem = %problem, heuristic = %heuristic, hit = value.is_some(), "heuristic cache lookup");
        value
    }

    pub fn insert(&self, problem: ProblemId, heuristic: Heuristic, state: &State, value: usize) {
        self.lock().cache_set((problem, heuristic, state.clone()), value);
    }

    /// Looks the value up, computing and storing it on a miss. The lock is not
    /// held while `compute` runs.
    pub fn get_or_try_insert_with<E, F>(&self, problem: ProblemId, heuristic: Heuristic, state: &State, compute: F) -> Result<usize, E>
    where
        F: FnOnce() -> Result<usize, E>,
    {
        if let Some(value) = self.get(problem, heuristic, state) {
            return Ok(value);
        }
        let value = compute()?;
        self.insert(problem, heuristic, state, value);
        Ok(value)
    }

    pub fn len(&self) -> usize {
        self.lock().cache_size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.lock().cache_capacity().unwrap_or(0)
    }

    pub fn clear(&self) {
        self.lock().cache_clear()
    }
}

impl Default for HeuristicCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }
}

impl fmt::Debug for HeuristicCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "HeuristicCache({}/{})", self.len(), self.capacity())
    }
}
