use std::error::Error;
use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use air_cargo::air_cargo::scenarios;
use air_cargo::config;
use air_cargo::{AirCargoProblem, Heuristic, Problem, Term};

#[derive(Parser, Debug)]
#[command(author, version, about = "Air cargo STRIPS problem inspector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the grounded problem and the estimates for its initial state
    Describe {
        /// p1, p2, p3 or the path to a TOML scenario
        scenario: String,
    },
    /// Apply ground actions in order, starting from the initial state
    Replay {
        /// p1, p2, p3 or the path to a TOML scenario
        scenario: String,
        /// Ground action names, e.g. "Load(C1, P1, SFO)"
        #[arg(required = true)]
        actions: Vec<String>,
    },
}

fn load(scenario: &str) -> Result<AirCargoProblem, Box<dyn Error>> {
    match scenarios::by_name(scenario) {
        Some(problem) => Ok(problem?),
        None => Ok(config::load_problem(Path::new(scenario))?),
    }
}

fn join<T: ToString>(items: &[T], separator: &str) -> String {
    items.iter().map(|i| i.to_string()).collect::<Vec<_>>().join(separator)
}

fn describe(problem: &AirCargoProblem) -> Result<(), Box<dyn Error>> {
    let initial = problem.initial_state();
    let (loads, unloads, flys) = problem.schema_counts();
    println!("Cargos: {}", join::<Term>(problem.cargos(), ", "));
    println!("Planes: {}", join::<Term>(problem.planes(), ", "));
    println!("Airports: {}", join::<Term>(problem.airports(), ", "));
    println!("Atoms: {}", problem.universe().len());
    println!("Ground actions: {} load, {} unload, {} fly", loads, unloads, flys);
    println!("Initial state: {}", initial);
    println!("Goal: {}", join(problem.goal(), " & "));
    println!("Applicable in the initial state:");
    for action in problem.actions(initial)? {
        println!("\t{}", action);
    }
    for heuristic in [Heuristic::Constant, Heuristic::IgnorePreconditions].iter() {
        println!("{} = {}", heuristic, problem.estimate(*heuristic, initial)?);
    }
    Ok(())
}

fn replay(problem: &AirCargoProblem, plan: &[String]) -> Result<(), Box<dyn Error>> {
    let states = problem.replay(plan)?;
    println!("0. {:<24}{}\th={}", "", problem.initial_state(), problem.h_ignore_preconditions(problem.initial_state())?);
    for (step, (name, state)) in plan.iter().zip(&states).enumerate() {
        println!("{}. {:<24}{}\th={}", step + 1, name, state, problem.h_ignore_preconditions(state)?);
    }
    let reached = match states.last() {
        Some(last) => problem.goal_test(last)?,
        None => false,
    };
    println!("{}", if reached { "Goal reached." } else { "Goal not reached." });
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Command::Describe { scenario } => load(scenario).and_then(|problem| describe(&problem)),
        Command::Replay { scenario, actions } => load(scenario).and_then(|problem| replay(&problem, actions)),
    };
    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
