//! Host-side collaborators: the file-backed record, a simulated runtime and a
//! stdout broadcaster.

use std::path::PathBuf;
use tempo_config::{SpeedState, load_state_file, save_state_file};
use tempo_traits::{BoxError, Notifier, SpeedStore, TimeDilation};

/// Speed record stored as TOML at a fixed path.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl SpeedStore for FileStore {
    fn load(&mut self) -> Result<Option<SpeedState>, BoxError> {
        Ok(load_state_file(&self.path)?)
    }

    fn save(&mut self, state: &SpeedState) -> Result<(), BoxError> {
        save_state_file(&self.path, state)?;
        tracing::debug!(path = %self.path.display(), "speed record saved");
        Ok(())
    }
}

/// Stand-in for the simulation host. Records the last applied dilation.
///
/// Set `TEMPO_SIM_APPLY_FAIL=1` to make every apply fail.
#[derive(Debug)]
pub struct SimulatedRuntime {
    reject: bool,
    dilation: f32,
}

impl SimulatedRuntime {
    pub fn from_env() -> Self {
        let reject = std::env::var("TEMPO_SIM_APPLY_FAIL")
            .map(|v| !v.is_empty() && v != "0")
            .unwrap_or(false);
        Self {
            reject,
            dilation: tempo_core::NORMAL_SPEED,
        }
    }
}

impl TimeDilation for SimulatedRuntime {
    fn apply(&mut self, multiplier: f32) -> Result<(), BoxError> {
        let command = format!("time dilation {multiplier:?}");
        if self.reject {
            tracing::debug!(%command, "simulated runtime rejecting command");
            return Err(format!("simulated runtime rejected '{command}'").into());
        }
        tracing::info!(%command, previous = self.dilation, "dispatching to runtime");
        self.dilation = multiplier;
        Ok(())
    }
}

/// Broadcasts go to stdout, one line each.
#[derive(Debug, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn broadcast(&mut self, text: &str) {
        println!("[broadcast] {text}");
    }
}
