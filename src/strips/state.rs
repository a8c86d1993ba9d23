use std::collections::{HashMap, HashSet};
use std::fmt;

use super::error::{Error, Result};
use super::expression::Literal;

/// Positive and negative fluents, the literal-level view of a [`State`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FluentState {
    pub pos: Vec<Literal>,
    pub neg: Vec<Literal>,
}

impl FluentState {
    pub fn new(pos: Vec<Literal>, neg: Vec<Literal>) -> Self {
        Self { pos, neg }
    }
}

/// Truth value of every atom of an [`AtomUniverse`], by universe index.
/// Meaningless without the universe that produced it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State(Vec<bool>);

impl State {
    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Out of range indices read as false.
    #[inline]
    pub fn get(&self, idx: usize) -> bool {
        self.0.get(idx).copied().unwrap_or(false)
    }

    #[inline]
    pub(crate) fn set(&mut self, idx: usize, value: bool) {
        self.0[idx] = value
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn count_true(&self) -> usize {
        self.0.iter().filter(|b| **b).count()
    }
}

impl std::ops::Index<usize> for State {
    type Output = bool;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

/// Renders the state as a `T`/`F` string, one character per atom.
impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{}", if *b { 'T' } else { 'F' }))
    }
}

/// The ordered atom index space of a problem. Fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct AtomUniverse {
    atoms: Vec<Literal>,
    mapping: HashMap<Literal, usize>,
}

impl AtomUniverse {
    /// Concatenates the initially true and initially false literals, in order.
    /// An atom listed twice would own two indices, so it is rejected.
    pub fn build(initial_true: &[Literal], initial_false: &[Literal]) -> Result<Self> {
        let atoms: Vec<Literal> = initial_true.iter().chain(initial_false).cloned().collect();
        let mut mapping = HashMap::with_capacity(atoms.len());
        for (idx, atom) in atoms.iter().enumerate() {
            if mapping.insert(atom.clone(), idx).is_some() {
                return Err(Error::DuplicateAtom { literal: atom.clone() });
            }
        }
        Ok(Self { atoms, mapping })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    pub fn atoms(&self) -> &[Literal] {
        &self.atoms
    }

    #[inline]
    pub fn index_of(&self, literal: &Literal) -> Option<usize> {
        self.mapping.get(literal).copied()
    }

    pub fn contains(&self, literal: &Literal) -> bool {
        self.mapping.contains_key(literal)
    }

    /// Closed world: atoms outside the universe never hold.
    #[inline]
    pub fn holds(&self, state: &State, literal: &Literal) -> bool {
        self.index_of(literal).map_or(false, |idx| state.get(idx))
    }

    /// An atom is true iff it is in `fluents.pos`; `fluents.neg` is not consulted.
    /// Literals outside the universe are dropped.
    pub fn encode(&self, fluents: &FluentState) -> State {
        let pos: HashSet<&Literal> = fluents.pos.iter().collect();
        State(self.atoms.iter().map(|atom| pos.contains(atom)).collect())
    }

    /// Partitions the universe by truth value; every atom lands in exactly one list.
    pub fn decode(&self, state: &State) -> FluentState {
        let mut fluents = FluentState::default();
        for (idx, atom) in self.atoms.iter().enumerate() {
            if state.get(idx) {
                fluents.pos.push(atom.clone());
            } else {
                fluents.neg.push(atom.clone());
            }
        }
        fluents
    }

    /// Fails on the first of `literals` that has no index, naming `owner` in the error.
    pub fn require<'a, I>(&self, owner: &dyn fmt::Display, literals: I) -> Result<()>
    where
        I: IntoIterator<Item = &'a Literal>,
    {
        match literals.into_iter().find(|l| !self.contains(l)) {
            Some(literal) => Err(Error::OutsideUniverse { owner: owner.to_string(), literal: literal.clone() }),
            None => Ok(()),
        }
    }

    pub(crate) fn check(&self, state: &State) -> Result<()> {
        if state.len() == self.len() {
            Ok(())
        } else {
            Err(Error::StateMismatch { expected: self.len(), found: state.len() })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AtomUniverse, FluentState};
    use crate::lit;
    use crate::strips::error::Error;

    fn universe() -> AtomUniverse {
        AtomUniverse::build(
            &[lit!(At(C1, SFO)), lit!(At(P1, SFO))],
            &[lit!(At(C1, JFK)), lit!(In(C1, P1)), lit!(At(P1, JFK))],
        )
        .unwrap()
    }

    #[test]
    fn test_build_preserves_order() {
        let universe = universe();
        assert_eq!(universe.len(), 5);
        assert_eq!(universe.index_of(&lit!(At(C1, SFO))), Some(0));
        assert_eq!(universe.index_of(&lit!(In(C1, P1))), Some(3));
        assert_eq!(universe.index_of(&lit!(In(C1, P2))), None);
    }

    #[test]
    fn test_duplicate_atom() {
        let universe = AtomUniverse::build(&[lit!(At(C1, SFO))], &[lit!(At(C1, SFO))]);
        assert_eq!(universe, Err(Error::DuplicateAtom { literal: lit!(At(C1, SFO)) }));
    }

    #[test]
    fn test_encode_is_closed_world() {
        let universe = universe();
        // At(P1, SFO) appears in neither list, In(C9, P1) is not an atom at all
        let fluents = FluentState::new(vec![lit!(In(C1, P1)), lit!(In(C9, P1))], vec![lit!(At(C1, SFO))]);
        let state = universe.encode(&fluents);
        assert_eq!(state.to_string(), "FFFTF");
        assert!(universe.holds(&state, &lit!(In(C1, P1))));
        assert!(!universe.holds(&state, &lit!(In(C9, P1))));
    }

    #[test]
    fn test_decode_partitions_universe() {
        let universe = universe();
        let fluents = FluentState::new(vec![lit!(At(P1, JFK)), lit!(At(C1, JFK)), lit!(At(C7, ORD))], vec![]);
        let decoded = universe.decode(&universe.encode(&fluents));
        assert_eq!(decoded.pos, vec![lit!(At(C1, JFK)), lit!(At(P1, JFK))]);
        assert_eq!(decoded.neg, vec![lit!(At(C1, SFO)), lit!(At(P1, SFO)), lit!(In(C1, P1))]);
        assert_eq!(decoded.pos.len() + decoded.neg.len(), universe.len());
    }

    #[test]
    fn test_round_trip_keeps_true_atoms_in_universe() {
        let universe = universe();
        let all = universe.atoms().to_vec();
        let partitions = vec![
            (vec![], vec![]),
            (all.clone(), vec![]),
            (vec![], all.clone()),
            // listed on both sides: only the true list counts
            (vec![lit!(In(C1, P1)), lit!(At(P1, SFO))], vec![lit!(In(C1, P1)), lit!(At(C1, SFO))]),
            (vec![lit!(At(P1, JFK)), lit!(In(C2, P1)), lit!(At(C1, SFO))], vec![lit!(At(C9, ORD))]),
            (all.iter().rev().cloned().collect(), all.clone()),
        ];
        for (t, f) in partitions {
            let decoded = universe.decode(&universe.encode(&FluentState::new(t.clone(), f)));
            let expected_pos: Vec<_> = all.iter().filter(|a| t.contains(a)).cloned().collect();
            let expected_neg: Vec<_> = all.iter().filter(|a| !t.contains(a)).cloned().collect();
            assert_eq!(decoded.pos, expected_pos, "true list {:?}", t);
            assert_eq!(decoded.neg, expected_neg, "true list {:?}", t);
        }
    }

    #[test]
    fn test_require() {
        let universe = universe();
        assert_eq!(universe.require(&"goal", &[lit!(At(C1, JFK)), lit!(In(C1, P1))]), Ok(()));
        assert_eq!(
            universe.require(&"goal", &[lit!(At(C1, JFK)), lit!(In(C1, P2))]),
            Err(Error::OutsideUniverse { owner: "goal".to_owned(), literal: lit!(In(C1, P2)) })
        );
    }

    #[test]
    fn test_states_compare_by_value() {
        let universe = universe();
        let a = universe.encode(&FluentState::new(vec![lit!(At(C1, SFO))], vec![]));
        let b = universe.encode(&FluentState::new(vec![lit!(At(C1, SFO))], vec![lit!(At(P1, SFO))]));
        assert_eq!(a, b);
        assert_eq!(a.count_true(), 1);
        assert!(a[0]);
        assert!(!a.get(42));
    }
}
