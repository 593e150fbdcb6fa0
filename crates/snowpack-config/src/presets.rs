//! Arena presets bundled with the crate.

use snowpack_core::config::SnowpackConfig;

use crate::loader::{load_validated, ConfigError};

const ARENA: &str = include_str!("../../../data/presets/arena.ron");
const SPRING_THAW: &str = include_str!("../../../data/presets/spring_thaw.ron");
const POLAR_NIGHT: &str = include_str!("../../../data/presets/polar_night.ron");

/// Names accepted by `load_preset`.
pub const PRESET_NAMES: [&str; 3] = ["arena", "spring_thaw", "polar_night"];

/// RON source of a bundled preset.
pub fn preset_source(name: &str) -> Option<&'static str> {
    match name {
        "arena" => Some(ARENA),
        "spring_thaw" => Some(SPRING_THAW),
        "polar_night" => Some(POLAR_NIGHT),
        _ => None,
    }
}

/// Load and validate a bundled preset. Returns `None` for unknown names.
pub fn load_preset(name: &str) -> Option<Result<SnowpackConfig, ConfigError>> {
    preset_source(name).map(load_validated)
}
