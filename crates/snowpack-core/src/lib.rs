pub mod config;
pub mod constants;
pub mod error;
pub mod math;
pub mod types;

pub use config::{ActorProfile, ContactConfig, EffectConfig, FieldConfig, SnowpackConfig, ThermalConfig};
pub use error::SnowpackError;
pub use types::{ActorId, CellCoord, PaintMode, SprayKind};
