//! Scripted replays of interaction timelines against a [`page::Page`].
//!
//! A scenario is a TOML file declaring a small document and a list of
//! timestamped steps. Replaying it yields a trace of pushes, rejections and
//! cancellations, plus any failed expectations.

mod error;
mod model;
mod run;
mod text;

pub use error::ScenarioError;
pub use model::{Action, ConfigOverrides, ElementDecl, Scenario, Step};
pub use run::{Failure, Outcome, TraceEvent};

use std::path::Path;

pub fn parse(text: &str) -> Result<Scenario, ScenarioError> {
    Ok(toml::from_str(text)?)
}

pub fn load_file(path: impl AsRef<Path>) -> Result<Scenario, ScenarioError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| ScenarioError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut scenario = parse(&text)?;
    if scenario.name.is_none() {
        scenario.name = path.file_stem().map(|stem| stem.to_string_lossy().into_owned());
    }
    Ok(scenario)
}
