//! In-memory collaborators for tests and embedding without a host.

use tempo_config::SpeedState;
use tempo_traits::{BoxError, Notifier, SpeedStore, TimeDilation};

/// Keeps the last saved record in memory and counts saves.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    pub record: Option<SpeedState>,
    pub saves: usize,
    /// When set, every `save` fails (the attempt is still counted).
    pub fail_saves: bool,
    /// When set, `load` fails with this message.
    pub load_error: Option<String>,
}

impl MemoryStore {
    pub fn with_record(record: SpeedState) -> Self {
        Self {
            record: Some(record),
            ..Self::default()
        }
    }
}

impl SpeedStore for MemoryStore {
    fn load(&mut self) -> Result<Option<SpeedState>, BoxError> {
        if let Some(msg) = &self.load_error {
            return Err(msg.clone().into());
        }
        Ok(self.record)
    }

    fn save(&mut self, state: &SpeedState) -> Result<(), BoxError> {
        self.saves += 1;
        if self.fail_saves {
            return Err(Box::new(std::io::Error::other("disk full")));
        }
        self.record = Some(*state);
        Ok(())
    }
}

/// Records every multiplier it is asked to apply; can be told to reject them.
#[derive(Debug, Default, Clone)]
pub struct RecordingRuntime {
    pub applied: Vec<f32>,
    pub reject: bool,
}

impl TimeDilation for RecordingRuntime {
    fn apply(&mut self, multiplier: f32) -> Result<(), BoxError> {
        if self.reject {
            return Err("world is not accepting time dilation".into());
        }
        self.applied.push(multiplier);
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct RecordingNotifier {
    pub messages: Vec<String>,
}

impl Notifier for RecordingNotifier {
    fn broadcast(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
