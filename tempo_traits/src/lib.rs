//! Collaborator seams for the speed controller.
//!
//! The controller never touches files, the simulation or users directly; it
//! drives these traits instead. Errors cross the boundary boxed so that any
//! host can plug in its own error types.

use tempo_config::SpeedState;

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Durable storage for the speed record.
pub trait SpeedStore {
    /// `Ok(None)` when nothing was persisted yet.
    fn load(&mut self) -> Result<Option<SpeedState>, BoxError>;
    fn save(&mut self, state: &SpeedState) -> Result<(), BoxError>;
}

/// The host runtime that actually dilates simulation time.
///
/// Returning `Ok(())` is the only acknowledgement; any error means the
/// multiplier was not applied.
pub trait TimeDilation {
    fn apply(&mut self, multiplier: f32) -> Result<(), BoxError>;
}

/// Fire-and-forget broadcast to everyone connected to the simulation.
pub trait Notifier {
    fn broadcast(&mut self, text: &str);
}

impl<T: SpeedStore + ?Sized> SpeedStore for Box<T> {
    fn load(&mut self) -> Result<Option<SpeedState>, BoxError> {
        (**self).load()
    }
    fn save(&mut self, state: &SpeedState) -> Result<(), BoxError> {
        (**self).save(state)
    }
}

impl<T: TimeDilation + ?Sized> TimeDilation for Box<T> {
    fn apply(&mut self, multiplier: f32) -> Result<(), BoxError> {
        (**self).apply(multiplier)
    }
}

impl<T: Notifier + ?Sized> Notifier for Box<T> {
    fn broadcast(&mut self, text: &str) {
        (**self).broadcast(text);
    }
}
