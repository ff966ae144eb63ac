//! `From` implementations bridging `tempo_config` types to `tempo_core` types.

use tempo_config::SpeedState;

use crate::validator::SpeedBounds;

impl From<&SpeedState> for SpeedBounds {
    fn from(s: &SpeedState) -> Self {
        Self {
            min: s.min_speed,
            max: s.max_speed,
        }
    }
}
