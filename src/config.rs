use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

use crate::air_cargo::AirCargoProblem;
use crate::strips::{self, FluentState, Literal, Term};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario {path}: {source}")]
    Io { source: io::Error, path: PathBuf },
    #[error("failed to parse scenario {path}: {source}")]
    Parse { source: toml::de::Error, path: PathBuf },
    #[error("invalid scenario {path}: {source}")]
    Problem { source: strips::Error, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// An air cargo instance as written in a TOML file. Literals use the
/// `At(C1, SFO)` syntax.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScenarioConfig {
    pub cargos: Vec<Term>,
    pub planes: Vec<Term>,
    pub airports: Vec<Term>,
    pub init: InitSection,
    pub goal: Vec<Literal>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InitSection {
    pub pos: Vec<Literal>,
    #[serde(default)]
    pub neg: Vec<Literal>,
}

impl ScenarioConfig {
    pub fn parse(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io { source, path: path.to_path_buf() })?;
        Self::parse(&text).map_err(|source| ConfigError::Parse { source, path: path.to_path_buf() })
    }

    pub fn into_problem(self) -> strips::Result<AirCargoProblem> {
        let initial = FluentState::new(self.init.pos, self.init.neg);
        AirCargoProblem::new(self.cargos, self.planes, self.airports, initial, self.goal)
    }
}

/// Reads, parses and grounds the scenario at `path`.
pub fn load_problem<P: AsRef<Path>>(path: P) -> Result<AirCargoProblem> {
    let path = path.as_ref();
    let problem = ScenarioConfig::from_file(path)?
        .into_problem()
        .map_err(|source| ConfigError::Problem { source, path: path.to_path_buf() })?;
    debug!(path = %path.display(), problem = %problem.id(), "loaded scenario");
    Ok(problem)
}
