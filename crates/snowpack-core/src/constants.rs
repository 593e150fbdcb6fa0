//! Single source of truth for default tuning values.
//! Config structs read their defaults from here and the displacement
//! shader receives the same numbers through `SurfaceUniforms`.

/// Height of undisturbed snow.
pub const FULL_HEIGHT: f32 = 1.0;

/// Height of fully compacted ground.
pub const BARE_HEIGHT: f32 = 0.0;

/// Largest accepted grid side length (cells).
pub const MAX_RESOLUTION: u32 = 4096;

/// Default grid side length (cells).
pub const DEFAULT_RESOLUTION: u32 = 256;

/// Default physical extent of the arena (world units, X by Y).
pub const DEFAULT_WORLD_SIZE: [f32; 2] = [200.0, 200.0];

/// Displacement in world units applied by the shader at height 0.0.
pub const DEFAULT_MAX_DISPLACEMENT: f32 = 0.3;

/// Height regained per second by compressed cells (wind and fresh snowfall).
pub const DEFAULT_RECOVERY_RATE: f32 = 0.005;

/// Game seconds elapsed per simulated second.
pub const DEFAULT_TIME_SCALE: f32 = 60.0;

/// Hour of day a fresh simulation starts at.
pub const DEFAULT_START_HOUR: f32 = 9.0;

/// Hours in a day; time of day wraps here.
pub const HOURS_PER_DAY: f32 = 24.0;

/// Sunrise, solar noon and sunset (hours).
pub const SUNRISE_HOUR: f32 = 6.0;
pub const SOLAR_NOON_HOUR: f32 = 12.0;
pub const SUNSET_HOUR: f32 = 18.0;

/// Ambient temperature of a fresh simulation (deg C).
pub const DEFAULT_AMBIENT_TEMP_C: f32 = -5.0;

/// Extra temperature contributed by full sun (deg C).
pub const DEFAULT_SOLAR_HEATING_MAX_C: f32 = 5.0;

/// Effective temperature above which snow melts (deg C).
pub const DEFAULT_MELT_THRESHOLD_C: f32 = 0.0;

/// Effective temperature below which meltwater refreezes (deg C).
/// Must stay below the melt threshold.
pub const DEFAULT_REFREEZE_THRESHOLD_C: f32 = -2.0;

/// Height lost per second per degree above the melt threshold.
pub const DEFAULT_MELT_RATE_PER_DEGREE: f32 = 0.002;

/// Melt multiplier gained at full sun: factor = 1 + solar * multiplier.
pub const DEFAULT_SUN_MELT_MULTIPLIER: f32 = 1.0;

/// Wetness lost per second per degree below the refreeze threshold.
pub const DEFAULT_REFREEZE_RATE: f32 = 0.01;

/// Height lost per second while raining, independent of temperature.
pub const DEFAULT_RAIN_MELT_RATE: f32 = 0.01;

/// Wetness gained per unit of height melted by rain.
pub const RAIN_WETNESS_GAIN: f32 = 2.0;

/// Wetness at or above which a refreezing cell is an ice candidate.
pub const DEFAULT_ICE_WETNESS_THRESHOLD: f32 = 0.3;

/// Cells at or below this height are treated as bare and no longer melt.
pub const DEFAULT_HEIGHT_EPSILON: f32 = 1.0e-4;

/// Minimum distance (world units) a contact must travel to paint a track
/// segment instead of a single dimple.
pub const DEFAULT_MIN_MOVEMENT: f32 = 0.1;

/// Speed (world units per second) at which track strength saturates.
pub const DEFAULT_SPEED_NORMALIZATION: f32 = 20.0;

/// Contacts whose world Z is above this are airborne.
pub const DEFAULT_GROUND_CONTACT_HEIGHT: f32 = 0.5;

/// Actor weight at which the weight factor is 1.0 (kg).
pub const DEFAULT_REFERENCE_WEIGHT: f32 = 1500.0;

/// Bounds of the weight factor applied to contact strength.
pub const MIN_WEIGHT_FACTOR: f32 = 0.25;
pub const MAX_WEIGHT_FACTOR: f32 = 2.0;

/// Default wheel contact radius (world units).
pub const DEFAULT_CONTACT_RADIUS: f32 = 0.4;

/// Default contact strength before speed and weight scaling.
pub const DEFAULT_BASELINE_STRENGTH: f32 = 0.35;

/// Speed below which contacts throw no spray.
pub const DEFAULT_SPRAY_SPEED_THRESHOLD: f32 = 2.0;

/// Speed range over which spray ramps from 0 to full.
pub const DEFAULT_SPRAY_NORMALIZATION_RANGE: f32 = 15.0;

/// Grip multiplier on fully wet ice.
pub const DEFAULT_ICE_GRIP: f32 = 0.35;

/// Grip lost in deep loose snow (fraction).
pub const DEFAULT_LOOSE_SNOW_GRIP_LOSS: f32 = 0.25;
