pub mod loader;
pub mod presets;
pub mod validator;

pub use loader::{config_to_string, load_config_from_str, load_validated, ConfigError, LoadError};
pub use presets::{load_preset, PRESET_NAMES};
pub use validator::{validate_config, ValidationError};
