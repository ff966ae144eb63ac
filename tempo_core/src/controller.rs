//! The speed state machine.
//!
//! `SpeedController` owns the one `SpeedState` of the process together with
//! its collaborators. Every mutation follows the same order:
//! validate -> mutate -> persist -> apply -> notify. Validation failures exit
//! before anything changes. Persist failures are reported and ignored. Apply
//! failures are reported to the caller but the new value stays in memory and
//! in storage; nothing is rolled back.

use tempo_config::{DEFAULT_TOGGLE_SPEED, NORMAL_SPEED, SpeedState};
use tempo_traits::{Notifier, SpeedStore, TimeDilation};

use crate::error::{Result, SpeedError, map_apply_error, map_persist_error};
use crate::format::{APPLY_FAILED_NOTICE, PERSIST_FAILED_NOTICE, speed_change_notice};
use crate::validator::{SpeedBounds, round_speed, speeds_equal};

pub struct SpeedController<P, R, N> {
    state: SpeedState,
    store: P,
    runtime: R,
    notifier: N,
}

impl<P, R, N> core::fmt::Debug for SpeedController<P, R, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SpeedController")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<P, R, N> SpeedController<P, R, N>
where
    P: SpeedStore,
    R: TimeDilation,
    N: Notifier,
{
    /// Load the record from `store` (defaults when nothing was saved yet),
    /// repair it and persist any corrections.
    pub fn load(mut store: P, runtime: R, notifier: N) -> Result<Self> {
        let loaded = store
            .load()
            .map_err(|e| SpeedError::Load(e.to_string()))?;
        if loaded.is_none() {
            tracing::info!("no speed record found, using defaults");
        }
        Ok(Self::new(
            loaded.unwrap_or_default(),
            store,
            runtime,
            notifier,
        ))
    }

    /// Take ownership of an already loaded record. The record is repaired
    /// exactly like in `load`.
    pub fn new(state: SpeedState, store: P, runtime: R, notifier: N) -> Self {
        let mut this = Self {
            state,
            store,
            runtime,
            notifier,
        };
        this.repair_loaded();
        this
    }

    fn repair_loaded(&mut self) {
        let fixes = self.state.repair();
        if fixes.is_empty() {
            return;
        }
        for fix in &fixes {
            tracing::warn!(field = fix.key(), "{fix}");
        }
        tracing::info!(corrections = fixes.len(), "speed record was corrected, saving changes");
        self.persist();
    }

    /// Apply the persisted speed once at startup.
    pub fn start(&mut self) -> Result<()> {
        tracing::info!(
            version = crate::VERSION,
            initial_speed = self.state.current_speed,
            "tempo enabled"
        );
        self.apply(self.state.current_speed)
    }

    /// Set an absolute multiplier.
    ///
    /// Any speed other than normal also becomes the new toggle target.
    pub fn set_speed(&mut self, target: f32) -> Result<()> {
        let bounds = self.bounds();
        if !bounds.is_valid(target) {
            tracing::warn!(speed = target, "attempted to set invalid speed");
            return Err(SpeedError::InvalidSpeed(bounds.validation_error(target)));
        }

        self.state.current_speed = target;
        if !speeds_equal(target, NORMAL_SPEED) {
            self.state.toggle_target_speed = target;
        }
        self.persist();

        // State stays at `target` even if this fails.
        self.apply(target)?;

        self.notifier
            .broadcast(&speed_change_notice(target, "set to"));
        Ok(())
    }

    /// Move the speed by `delta`, clamped to the bounds and rounded to two
    /// decimals. Returns the new speed.
    pub fn adjust_speed(&mut self, delta: f32) -> Result<f32> {
        let current = self.state.current_speed;
        let target = round_speed(self.bounds().clamp(current + delta));

        if let Err(e) = self.set_speed(target) {
            tracing::error!(
                delta,
                from = current,
                to = target,
                error = %e,
                "failed to adjust speed"
            );
            return Err(SpeedError::AdjustFailed {
                from: current,
                to: target,
                reason: e.to_string(),
            });
        }
        Ok(target)
    }

    /// Switch between normal speed and the toggle target. Returns the new speed.
    ///
    /// The target always comes from the repaired record, so it is not
    /// validated again. Apply failures are logged and broadcast only.
    pub fn toggle_speed(&mut self) -> f32 {
        let current = self.state.current_speed;
        let target = if speeds_equal(current, NORMAL_SPEED) {
            let mut t = self.state.toggle_target_speed;
            // No custom speed chosen yet
            if speeds_equal(t, NORMAL_SPEED) {
                t = DEFAULT_TOGGLE_SPEED;
                self.state.toggle_target_speed = t;
            }
            t
        } else {
            NORMAL_SPEED
        };

        self.state.current_speed = target;
        self.persist();
        if self.apply(target).is_err() {
            tracing::warn!(speed = target, "toggle persisted but not applied");
        }

        self.notifier
            .broadcast(&speed_change_notice(target, "toggled to"));
        target
    }

    pub fn reset_speed(&mut self) -> Result<()> {
        self.set_speed(NORMAL_SPEED)
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.state) {
            let err = map_persist_error(&*e);
            tracing::error!(error = %err, "failed to save speed record");
            self.notifier.broadcast(PERSIST_FAILED_NOTICE);
        }
    }

    fn apply(&mut self, speed: f32) -> Result<()> {
        tracing::debug!(speed, "executing time dilation");
        match self.runtime.apply(speed) {
            Ok(()) => {
                tracing::debug!(speed, "applied speed");
                Ok(())
            }
            Err(e) => {
                let err = map_apply_error(speed, &*e);
                tracing::error!(error = %err, "failed to apply speed multiplier");
                self.notifier.broadcast(APPLY_FAILED_NOTICE);
                Err(err)
            }
        }
    }
}

impl<P, R, N> SpeedController<P, R, N> {
    /// Read-only snapshot for display.
    pub fn current_state(&self) -> SpeedState {
        self.state
    }

    pub fn bounds(&self) -> SpeedBounds {
        SpeedBounds::from(&self.state)
    }

    pub fn store(&self) -> &P {
        &self.store
    }

    pub fn runtime(&self) -> &R {
        &self.runtime
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
