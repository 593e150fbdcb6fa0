//! Runtime configuration, deserialized from RON by `snowpack-config`.
//! Every field has a documented default in `constants`, so partial
//! documents are valid.

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::types::PaintMode;

/// Complete configuration for one arena.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SnowpackConfig {
    pub field: FieldConfig,
    pub thermal: ThermalConfig,
    pub contact: ContactConfig,
    pub effects: EffectConfig,
    pub paint_mode: PaintMode,
}

/// Grid geometry and recovery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldConfig {
    /// Cells per side. The grid is always square.
    pub resolution: u32,
    /// Physical extent (X, Y) the grid covers, centered on the origin.
    pub world_size: [f32; 2],
    /// Displacement at height 0.0, forwarded to the shader.
    pub max_displacement: f32,
    /// Height regained per second by compressed cells.
    pub recovery_rate: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
            world_size: DEFAULT_WORLD_SIZE,
            max_displacement: DEFAULT_MAX_DISPLACEMENT,
            recovery_rate: DEFAULT_RECOVERY_RATE,
        }
    }
}

/// Day cycle, weather and melt/refreeze tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThermalConfig {
    /// Hour of day at construction.
    pub start_hour: f32,
    /// Ambient temperature at construction (deg C).
    pub ambient_temperature: f32,
    /// Whether it is raining at construction.
    pub raining: bool,
    /// Game seconds per simulated second.
    pub time_scale: f32,
    /// Temperature added by full sun (deg C).
    pub solar_heating_max: f32,
    pub melt_threshold: f32,
    pub refreeze_threshold: f32,
    pub melt_rate_per_degree: f32,
    pub sun_melt_multiplier: f32,
    pub refreeze_rate: f32,
    pub rain_melt_rate: f32,
    /// Wetness at or above which refreezing cells count as ice.
    pub ice_wetness_threshold: f32,
    /// Cells at or below this height no longer melt.
    pub height_epsilon: f32,
    /// Widens the dormant band on both thresholds (deg C).
    /// 0.0 disables hysteresis.
    pub dead_band: f32,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            start_hour: DEFAULT_START_HOUR,
            ambient_temperature: DEFAULT_AMBIENT_TEMP_C,
            raining: false,
            time_scale: DEFAULT_TIME_SCALE,
            solar_heating_max: DEFAULT_SOLAR_HEATING_MAX_C,
            melt_threshold: DEFAULT_MELT_THRESHOLD_C,
            refreeze_threshold: DEFAULT_REFREEZE_THRESHOLD_C,
            melt_rate_per_degree: DEFAULT_MELT_RATE_PER_DEGREE,
            sun_melt_multiplier: DEFAULT_SUN_MELT_MULTIPLIER,
            refreeze_rate: DEFAULT_REFREEZE_RATE,
            rain_melt_rate: DEFAULT_RAIN_MELT_RATE,
            ice_wetness_threshold: DEFAULT_ICE_WETNESS_THRESHOLD,
            height_epsilon: DEFAULT_HEIGHT_EPSILON,
            dead_band: 0.0,
        }
    }
}

/// Contact sampling thresholds shared by all actors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub min_movement: f32,
    pub speed_normalization: f32,
    pub ground_contact_height: f32,
    pub reference_weight: f32,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            min_movement: DEFAULT_MIN_MOVEMENT,
            speed_normalization: DEFAULT_SPEED_NORMALIZATION,
            ground_contact_height: DEFAULT_GROUND_CONTACT_HEIGHT,
            reference_weight: DEFAULT_REFERENCE_WEIGHT,
        }
    }
}

/// Per-actor contact parameters, supplied at registration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorProfile {
    /// Radius of each wheel's contact patch (world units).
    pub contact_radius: f32,
    /// Strength before speed and weight scaling.
    pub baseline_strength: f32,
    /// Actor weight (kg).
    pub weight: f32,
}

impl Default for ActorProfile {
    fn default() -> Self {
        Self {
            contact_radius: DEFAULT_CONTACT_RADIUS,
            baseline_strength: DEFAULT_BASELINE_STRENGTH,
            weight: DEFAULT_REFERENCE_WEIGHT,
        }
    }
}

/// Spray and grip tuning for the effect model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EffectConfig {
    pub spray_speed_threshold: f32,
    pub spray_normalization_range: f32,
    pub ice_grip: f32,
    pub loose_snow_grip_loss: f32,
}

impl Default for EffectConfig {
    fn default() -> Self {
        Self {
            spray_speed_threshold: DEFAULT_SPRAY_SPEED_THRESHOLD,
            spray_normalization_range: DEFAULT_SPRAY_NORMALIZATION_RANGE,
            ice_grip: DEFAULT_ICE_GRIP,
            loose_snow_grip_loss: DEFAULT_LOOSE_SNOW_GRIP_LOSS,
        }
    }
}
