//! Exhaustive grounding of the Load, Unload and Fly schemas.
//!
//! Grounding is a syntactic cross product, independent of any state: actions
//! whose preconditions can never hold are still produced and simply never pass
//! the applicability check.
use crate::strips::{Action, Literal, Term};

pub const LOAD: &str = "Load";
pub const UNLOAD: &str = "Unload";
pub const FLY: &str = "Fly";

pub const AT: &str = "At";
pub const IN: &str = "In";

pub fn at(thing: &Term, airport: &Term) -> Literal {
    Literal::new(AT, vec![thing.clone(), airport.clone()])
}

pub fn inside(cargo: &Term, plane: &Term) -> Literal {
    Literal::new(IN, vec![cargo.clone(), plane.clone()])
}

/// `Load(c, p, a)`: `At(c, a) ∧ At(p, a)` ⇒ `In(c, p) ∧ ¬At(c, a)`
pub fn load_actions(cargos: &[Term], planes: &[Term], airports: &[Term]) -> Vec<Action> {
    let mut loads = Vec::with_capacity(cargos.len() * planes.len() * airports.len());
    for c in cargos {
        for p in planes {
            for a in airports {
                loads.push(Action::new(
                    LOAD,
                    vec![c.clone(), p.clone(), a.clone()],
                    vec![at(c, a), at(p, a)],
                    vec![inside(c, p)],
                    vec![at(c, a)],
                ));
            }
        }
    }
    loads
}

/// `Unload(c, p, a)`: `In(c, p) ∧ At(p, a)` ⇒ `At(c, a) ∧ ¬In(c, p)`
pub fn unload_actions(cargos: &[Term], planes: &[Term], airports: &[Term]) -> Vec<Action> {
    let mut unloads = Vec::with_capacity(cargos.len() * planes.len() * airports.len());
    for c in cargos {
        for p in planes {
            for a in airports {
                unloads.push(Action::new(
                    UNLOAD,
                    vec![c.clone(), p.clone(), a.clone()],
                    vec![inside(c, p), at(p, a)],
                    vec![at(c, a)],
                    vec![inside(c, p)],
                ));
            }
        }
    }
    unloads
}

/// `Fly(p, from, to)` for `from ≠ to`: `At(p, from)` ⇒ `At(p, to) ∧ ¬At(p, from)`
pub fn fly_actions(planes: &[Term], airports: &[Term]) -> Vec<Action> {
    let routes = airports.len() * airports.len().saturating_sub(1);
    let mut flys = Vec::with_capacity(planes.len() * routes);
    for from in airports {
        for to in airports.iter().filter(|to| *to != from) {
            for p in planes {
                flys.push(Action::new(
                    FLY,
                    vec![p.clone(), from.clone(), to.clone()],
                    vec![at(p, from)],
                    vec![at(p, to)],
                    vec![at(p, from)],
                ));
            }
        }
    }
    flys
}

/// All ground actions: loads, then unloads, then flights.
pub fn ground_actions(cargos: &[Term], planes: &[Term], airports: &[Term]) -> Vec<Action> {
    let mut actions = load_actions(cargos, planes, airports);
    actions.extend(unload_actions(cargos, planes, airports));
    actions.extend(fly_actions(planes, airports));
    actions
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit;

    fn terms(names: &[&str]) -> Vec<Term> {
        names.iter().map(|n| Term::from(*n)).collect()
    }

    #[test]
    fn test_counts() {
        for (c, p, a) in [(1, 1, 1), (2, 2, 2), (3, 3, 3), (4, 2, 4), (0, 2, 3)].iter().copied() {
            let cargos: Vec<Term> = (0..c).map(|i| Term::from(format!("C{}", i))).collect();
            let planes: Vec<Term> = (0..p).map(|i| Term::from(format!("P{}", i))).collect();
            let airports: Vec<Term> = (0..a).map(|i| Term::from(format!("A{}", i))).collect();
            let actions = ground_actions(&cargos, &planes, &airports);
            assert_eq!(actions.iter().filter(|x| x.name == LOAD).count(), c * p * a);
            assert_eq!(actions.iter().filter(|x| x.name == UNLOAD).count(), c * p * a);
            assert_eq!(actions.iter().filter(|x| x.name == FLY).count(), p * a * (a - 1));
        }
    }

    #[test]
    fn test_load_schema() {
        let loads = load_actions(&terms(&["C1"]), &terms(&["P1"]), &terms(&["SFO"]));
        assert_eq!(loads.len(), 1);
        let load = &loads[0];
        assert_eq!(load.to_string(), "Load(C1, P1, SFO)");
        assert_eq!(load.precondition_pos, vec![lit!(At(C1, SFO)), lit!(At(P1, SFO))]);
        assert!(load.precondition_neg.is_empty());
        assert_eq!(load.effect_add, vec![lit!(In(C1, P1))]);
        assert_eq!(load.effect_remove, vec![lit!(At(C1, SFO))]);
    }

    #[test]
    fn test_unload_schema() {
        let unloads = unload_actions(&terms(&["C2"]), &terms(&["P2"]), &terms(&["JFK"]));
        let unload = &unloads[0];
        assert_eq!(unload.to_string(), "Unload(C2, P2, JFK)");
        assert_eq!(unload.precondition_pos, vec![lit!(In(C2, P2)), lit!(At(P2, JFK))]);
        assert_eq!(unload.effect_add, vec![lit!(At(C2, JFK))]);
        assert_eq!(unload.effect_remove, vec![lit!(In(C2, P2))]);
    }

    #[test]
    fn test_fly_skips_same_airport() {
        let flys = fly_actions(&terms(&["P1"]), &terms(&["JFK", "SFO", "ATL"]));
        let names: Vec<String> = flys.iter().map(|f| f.to_string()).collect();
        assert_eq!(
            names,
            vec!["Fly(P1, JFK, SFO)", "Fly(P1, JFK, ATL)", "Fly(P1, SFO, JFK)", "Fly(P1, SFO, ATL)", "Fly(P1, ATL, JFK)", "Fly(P1, ATL, SFO)"]
        );
        assert_eq!(flys[0].precondition_pos, vec![lit!(At(P1, JFK))]);
        assert_eq!(flys[0].effect_add, vec![lit!(At(P1, SFO))]);
        assert_eq!(flys[0].effect_remove, vec![lit!(At(P1, JFK))]);
    }

    #[test]
    fn test_grounding_order() {
        let actions = ground_actions(&terms(&["C1"]), &terms(&["P1"]), &terms(&["JFK", "SFO"]));
        let names: Vec<&str> = actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec![LOAD, LOAD, UNLOAD, UNLOAD, FLY, FLY]);
    }
}
