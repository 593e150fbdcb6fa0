use snowpack_core::config::SnowpackConfig;
use snowpack_core::constants::{HOURS_PER_DAY, MAX_RESOLUTION};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("field.resolution {value} outside 1..={max}")]
    ResolutionOutOfRange { value: u32, max: u32 },
    #[error("field.world_size {value:?} must be finite and positive")]
    InvalidWorldSize { value: [f32; 2] },
    #[error("{name} = {value} must be finite and non-negative")]
    Negative { name: &'static str, value: f32 },
    #[error("{name} = {value} must be finite and positive")]
    NonPositive { name: &'static str, value: f32 },
    #[error("{name} = {value} must lie in [0, 1]")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("thermal.start_hour {value} must lie in [0, 24)")]
    StartHourOutOfRange { value: f32 },
    #[error("thermal.refreeze_threshold {refreeze} must be below melt_threshold {melt}")]
    ThresholdOrder { refreeze: f32, melt: f32 },
    #[error("thermal.{name} = {value} must be finite")]
    NonFinite { name: &'static str, value: f32 },
}

/// Validate a config, collecting every violation rather than stopping at
/// the first.
pub fn validate_config(config: &SnowpackConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let field = &config.field;
    if field.resolution == 0 || field.resolution > MAX_RESOLUTION {
        errors.push(ValidationError::ResolutionOutOfRange {
            value: field.resolution,
            max: MAX_RESOLUTION,
        });
    }
    if field.world_size.iter().any(|v| !v.is_finite() || *v <= 0.0) {
        errors.push(ValidationError::InvalidWorldSize {
            value: field.world_size,
        });
    }

    let thermal = &config.thermal;
    let contact = &config.contact;
    let effects = &config.effects;

    let non_negative = [
        ("field.max_displacement", field.max_displacement),
        ("field.recovery_rate", field.recovery_rate),
        ("thermal.time_scale", thermal.time_scale),
        ("thermal.solar_heating_max", thermal.solar_heating_max),
        ("thermal.melt_rate_per_degree", thermal.melt_rate_per_degree),
        ("thermal.sun_melt_multiplier", thermal.sun_melt_multiplier),
        ("thermal.refreeze_rate", thermal.refreeze_rate),
        ("thermal.rain_melt_rate", thermal.rain_melt_rate),
        ("thermal.dead_band", thermal.dead_band),
        ("contact.min_movement", contact.min_movement),
        ("contact.ground_contact_height", contact.ground_contact_height),
        ("effects.spray_speed_threshold", effects.spray_speed_threshold),
    ];
    for (name, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            errors.push(ValidationError::Negative { name, value });
        }
    }

    let positive = [
        ("contact.speed_normalization", contact.speed_normalization),
        ("contact.reference_weight", contact.reference_weight),
        ("effects.spray_normalization_range", effects.spray_normalization_range),
    ];
    for (name, value) in positive {
        if !value.is_finite() || value <= 0.0 {
            errors.push(ValidationError::NonPositive { name, value });
        }
    }

    let unit = [
        ("thermal.ice_wetness_threshold", thermal.ice_wetness_threshold),
        ("thermal.height_epsilon", thermal.height_epsilon),
        ("effects.ice_grip", effects.ice_grip),
        ("effects.loose_snow_grip_loss", effects.loose_snow_grip_loss),
    ];
    for (name, value) in unit {
        if !(0.0..=1.0).contains(&value) {
            errors.push(ValidationError::OutOfUnitRange { name, value });
        }
    }

    for (name, value) in [
        ("ambient_temperature", thermal.ambient_temperature),
        ("melt_threshold", thermal.melt_threshold),
        ("refreeze_threshold", thermal.refreeze_threshold),
    ] {
        if !value.is_finite() {
            errors.push(ValidationError::NonFinite { name, value });
        }
    }

    if !(0.0..HOURS_PER_DAY).contains(&thermal.start_hour) {
        errors.push(ValidationError::StartHourOutOfRange {
            value: thermal.start_hour,
        });
    }

    // Refreeze must sit strictly below melt or the two passes overlap
    if thermal.refreeze_threshold >= thermal.melt_threshold {
        errors.push(ValidationError::ThresholdOrder {
            refreeze: thermal.refreeze_threshold,
            melt: thermal.melt_threshold,
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
