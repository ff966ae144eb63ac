#![no_main]
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &str| {
    // Parsing may fail, but it must not panic; anything that parses must
    // come out of repair satisfying every record invariant.
    if let Ok(mut state) = toml::from_str::<tempo_config::SpeedState>(data) {
        state.repair();
        assert!(state.min_speed > 0.0 && state.min_speed < state.max_speed);
        assert!(state.max_speed <= tempo_config::ABSOLUTE_MAX_SPEED);
        for v in [state.current_speed, state.toggle_target_speed] {
            assert!(v >= state.min_speed && v <= state.max_speed);
        }
        assert!(state.repair().is_empty());
    }
});
