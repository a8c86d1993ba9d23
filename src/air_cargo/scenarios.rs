//! The example instances: p1 (2 cargos, 2 planes, 2 airports), p2 (3, 3, 3)
//! and p3 (4 cargos, 2 planes, 4 airports).
use super::problem::AirCargoProblem;
use crate::lit;
use crate::strips::{FluentState, Result, Term};

fn terms(names: &[&str]) -> Vec<Term> {
    names.iter().map(|n| Term::from(*n)).collect()
}

pub const NAMES: [&str; 3] = ["p1", "p2", "p3"];

/// Scenario by name, `None` when the name is unknown.
pub fn by_name(name: &str) -> Option<Result<AirCargoProblem>> {
    match name {
        "p1" => Some(air_cargo_p1()),
        "p2" => Some(air_cargo_p2()),
        "p3" => Some(air_cargo_p3()),
        _ => None,
    }
}

pub fn air_cargo_p1() -> Result<AirCargoProblem> {
    let pos = vec![lit!(At(C1, SFO)), lit!(At(C2, JFK)), lit!(At(P1, SFO)), lit!(At(P2, JFK))];
    let neg = vec![
        lit!(At(C2, SFO)),
        lit!(In(C2, P1)),
        lit!(In(C2, P2)),
        lit!(At(C1, JFK)),
        lit!(In(C1, P1)),
        lit!(In(C1, P2)),
        lit!(At(P1, JFK)),
        lit!(At(P2, SFO)),
    ];
    let goal = vec![lit!(At(C1, JFK)), lit!(At(C2, SFO))];
    AirCargoProblem::new(terms(&["C1", "C2"]), terms(&["P1", "P2"]), terms(&["JFK", "SFO"]), FluentState::new(pos, neg), goal)
}

pub fn air_cargo_p2() -> Result<AirCargoProblem> {
    let pos = vec![
        lit!(At(C1, SFO)),
        lit!(At(C2, JFK)),
        lit!(At(C3, ATL)),
        lit!(At(P1, SFO)),
        lit!(At(P2, JFK)),
        lit!(At(P3, ATL)),
    ];
    let neg = vec![
        lit!(At(C1, JFK)),
        lit!(At(C1, ATL)),
        lit!(In(C1, P1)),
        lit!(In(C1, P2)),
        lit!(In(C1, P3)),
        lit!(At(C2, SFO)),
        lit!(At(C2, ATL)),
        lit!(In(C2, P1)),
        lit!(In(C2, P2)),
        lit!(In(C2, P3)),
        lit!(At(C3, SFO)),
        lit!(At(C3, JFK)),
        lit!(In(C3, P1)),
        lit!(In(C3, P2)),
        lit!(In(C3, P3)),
        lit!(At(P1, JFK)),
        lit!(At(P1, ATL)),
        lit!(At(P2, SFO)),
        lit!(At(P2, ATL)),
        lit!(At(P3, SFO)),
        lit!(At(P3, JFK)),
    ];
    let goal = vec![lit!(At(C1, JFK)), lit!(At(C2, SFO)), lit!(At(C3, SFO))];
    AirCargoProblem::new(
        terms(&["C1", "C2", "C3"]),
        terms(&["P1", "P2", "P3"]),
        terms(&["JFK", "SFO", "ATL"]),
        FluentState::new(pos, neg),
        goal,
    )
}

pub fn air_cargo_p3() -> Result<AirCargoProblem> {
    let pos = vec![
        lit!(At(C1, SFO)),
        lit!(At(C2, JFK)),
        lit!(At(C3, ATL)),
        lit!(At(C4, ORD)),
        lit!(At(P1, SFO)),
        lit!(At(P2, JFK)),
    ];
    let neg = vec![
        lit!(At(C1, JFK)),
        lit!(At(C1, ATL)),
        lit!(At(C1, ORD)),
        lit!(In(C1, P1)),
        lit!(In(C1, P2)),
        lit!(At(C2, SFO)),
        lit!(At(C2, ATL)),
        lit!(At(C2, ORD)),
        lit!(In(C2, P1)),
        lit!(In(C2, P2)),
        lit!(At(C3, SFO)),
        lit!(At(C3, JFK)),
        lit!(At(C3, ORD)),
        lit!(In(C3, P1)),
        lit!(In(C3, P2)),
        lit!(At(C4, SFO)),
        lit!(At(C4, JFK)),
        lit!(At(C4, ATL)),
        lit!(In(C4, P1)),
        lit!(In(C4, P2)),
        lit!(At(P1, JFK)),
        lit!(At(P1, ATL)),
        lit!(At(P1, ORD)),
        lit!(At(P2, SFO)),
        lit!(At(P2, ATL)),
        lit!(At(P2, ORD)),
    ];
    let goal = vec![lit!(At(C1, JFK)), lit!(At(C3, JFK)), lit!(At(C2, SFO)), lit!(At(C4, SFO))];
    AirCargoProblem::new(
        terms(&["C1", "C2", "C3", "C4"]),
        terms(&["P1", "P2"]),
        terms(&["JFK", "SFO", "ATL", "ORD"]),
        FluentState::new(pos, neg),
        goal,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lit;
    use crate::strips::{Problem, State};

    const P1_PLAN: [&str; 6] = [
        "Load(C1, P1, SFO)",
        "Fly(P1, SFO, JFK)",
        "Unload(C1, P1, JFK)",
        "Load(C2, P2, JFK)",
        "Fly(P2, JFK, SFO)",
        "Unload(C2, P2, SFO)",
    ];

    #[test]
    fn test_all_scenarios_build() {
        for name in NAMES.iter() {
            assert!(matches!(by_name(name), Some(Ok(_))), "{}", name);
        }
        assert!(by_name("p4").is_none());
    }

    #[test]
    fn test_sizes() {
        let p1 = air_cargo_p1().unwrap();
        assert_eq!(p1.universe().len(), 12);
        assert_eq!(p1.schema_counts(), (8, 8, 4));
        let p2 = air_cargo_p2().unwrap();
        assert_eq!(p2.universe().len(), 27);
        assert_eq!(p2.schema_counts(), (27, 27, 18));
        let p3 = air_cargo_p3().unwrap();
        assert_eq!(p3.universe().len(), 32);
        assert_eq!(p3.schema_counts(), (32, 32, 24));
    }

    #[test]
    fn test_p1_initial_state() {
        let p1 = air_cargo_p1().unwrap();
        let initial = p1.initial_state();
        assert_eq!(initial.to_string(), "TTTTFFFFFFFF");
        assert_eq!(p1.goal_test(initial), Ok(false));
        assert_eq!(p1.h_ignore_preconditions(initial), Ok(2));
        let applicable: Vec<String> = p1.actions(initial).unwrap().iter().map(|a| a.to_string()).collect();
        assert_eq!(applicable, vec!["Load(C1, P1, SFO)", "Load(C2, P2, JFK)", "Fly(P2, JFK, SFO)", "Fly(P1, SFO, JFK)"]);
    }

    #[test]
    fn test_p1_plan_reaches_goal() {
        let p1 = air_cargo_p1().unwrap();
        let states = p1.replay(&P1_PLAN).unwrap();
        let last = states.last().unwrap();
        assert_eq!(p1.goal_test(last), Ok(true));
        assert_eq!(p1.h_ignore_preconditions(last), Ok(0));
        let fluents = p1.universe().decode(last);
        assert_eq!(fluents.neg.len(), 8);
        assert_eq!(fluents.pos, vec![lit!(At(C2, SFO)), lit!(At(C1, JFK)), lit!(At(P1, JFK)), lit!(At(P2, SFO))]);
    }

    #[test]
    fn test_p1_plan_step_by_step() {
        let p1 = air_cargo_p1().unwrap();
        let mut state = p1.initial_state().clone();
        for name in P1_PLAN.iter() {
            let action = p1.action(name).unwrap();
            assert!(p1.actions(&state).unwrap().contains(&action), "{} should be applicable", name);
            state = p1.result(&state, action).unwrap();
            assert!(p1.h_ignore_preconditions(&state).unwrap() <= 2);
        }
        assert_eq!(p1.goal_test(&state), Ok(true));
    }

    #[test]
    fn test_applicable_sets_match_definition() {
        for problem in [air_cargo_p1(), air_cargo_p2(), air_cargo_p3()].iter().map(|p| p.as_ref().unwrap()) {
            let mut frontier: Vec<State> = vec![problem.initial_state().clone()];
            // two levels of expansion exercise loaded planes and flown planes
            for _ in 0..2 {
                let mut next = Vec::new();
                for state in &frontier {
                    let applicable = problem.actions(state).unwrap();
                    for action in problem.ground_actions() {
                        assert_eq!(applicable.contains(&action), action.is_applicable(state, problem.universe()));
                    }
                    for action in applicable {
                        next.push(problem.result(state, action).unwrap());
                    }
                }
                frontier = next;
            }
        }
    }

    #[test]
    fn test_ignore_preconditions_counts_unmet_goals() {
        let p3 = air_cargo_p3().unwrap();
        let initial = p3.initial_state();
        assert_eq!(p3.h_ignore_preconditions(initial), Ok(4));
        let states = p3.replay(&["Load(C1, P1, SFO)", "Fly(P1, SFO, JFK)", "Unload(C1, P1, JFK)"]).unwrap();
        assert_eq!(p3.h_ignore_preconditions(&states[2]), Ok(3));
        let p2 = air_cargo_p2().unwrap();
        assert_eq!(p2.h_ignore_preconditions(p2.initial_state()), Ok(3));
    }
}
