//! Windowless runs for scripted play and smoke testing.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use grid_snake_system_input::RawInput;
use serde::Deserialize;

use crate::session::{Session, SessionSummary};

/// Inputs replayed at fixed tick offsets.
///
/// ```toml
/// [[step]]
/// tick = 3
/// input = { key = "w" }
///
/// [[step]]
/// tick = 9
/// input = "reset"
/// ```
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct InputScript {
    #[serde(default, rename = "step")]
    steps: Vec<ScriptedInput>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ScriptedInput {
    /// Zero-based index of the frame the input is delivered in.
    tick: u64,
    input: RawInput,
}

impl InputScript {
    fn read(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read input script {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse input script {}", path.display()))
    }

    fn inputs_for(&self, tick: u64) -> Vec<RawInput> {
        self.steps
            .iter()
            .filter(|step| step.tick == tick)
            .map(|step| step.input)
            .collect()
    }
}

/// Runs `ticks` frames of exactly one tick interval each.
pub(crate) fn run(
    mut session: Session,
    ticks: u64,
    script: Option<&Path>,
) -> Result<SessionSummary> {
    let script = match script {
        Some(path) => InputScript::read(path)?,
        None => InputScript::default(),
    };
    tracing::info!(ticks, scripted = script.steps.len(), "headless run started");

    let interval = session.tick_interval();
    for tick in 0..ticks {
        let inputs = script.inputs_for(tick);
        let _ = session.step(interval, &inputs);
    }

    Ok(session.summary())
}
