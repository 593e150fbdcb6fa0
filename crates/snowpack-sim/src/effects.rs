//! Spray intensity, spray style and grip derived from the field.
//!
//! Stateless: every value is a pure function of speed and the surface under
//! the contact, so hosts can call it for any position at any time.

use glam::Vec2;
use snowpack_core::config::EffectConfig;
use snowpack_core::math::{non_negative, unit_clamp};
use snowpack_core::types::SprayKind;
use snowpack_field::DeformationField;

/// Spray style for a given wetness. Wetness at or above the ice threshold
/// reads as ice.
pub fn classify(local_wetness: f32, ice_threshold: f32) -> SprayKind {
    if local_wetness >= ice_threshold {
        SprayKind::Ice
    } else {
        SprayKind::Snow
    }
}

/// Everything a host needs to drive particles and tire friction at one
/// contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectSample {
    /// Spray intensity in [0, 1].
    pub intensity: f32,
    pub kind: SprayKind,
    /// Friction multiplier in (0, 1].
    pub grip: f32,
}

#[derive(Debug, Clone)]
pub struct EffectIntensityModel {
    config: EffectConfig,
    ice_wetness_threshold: f32,
}

impl EffectIntensityModel {
    pub fn new(config: EffectConfig, ice_wetness_threshold: f32) -> Self {
        Self {
            config,
            ice_wetness_threshold,
        }
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn ice_wetness_threshold(&self) -> f32 {
        self.ice_wetness_threshold
    }

    /// Spray for a contact moving at `speed` over snow compressed by
    /// `local_compression` (0 = undisturbed, 1 = bare ground).
    ///
    /// Zero below `speed_threshold`, ramping to full over the normalization
    /// range. Deep snow throws the most spray; packed tracks throw none.
    pub fn spray_intensity(&self, speed: f32, local_compression: f32, speed_threshold: f32) -> f32 {
        let speed = non_negative(speed);
        if speed <= speed_threshold {
            return 0.0;
        }
        let ramp = ((speed - speed_threshold) / self.config.spray_normalization_range).min(1.0);
        let depth = 1.0 - unit_clamp(local_compression, 1.0);
        unit_clamp(ramp * depth, 0.0)
    }

    /// Loose, deep snow costs some grip; standing meltwater frozen into ice
    /// costs much more, scaled by how wet the cell is.
    pub fn grip(&self, height: f32, wetness: f32) -> f32 {
        let height = unit_clamp(height, 1.0);
        let wetness = unit_clamp(wetness, 0.0);
        let loose = 1.0 - height * self.config.loose_snow_grip_loss;
        let icy = match classify(wetness, self.ice_wetness_threshold) {
            SprayKind::Ice => 1.0 - (1.0 - self.config.ice_grip) * wetness,
            SprayKind::Snow => 1.0,
        };
        loose * icy
    }

    /// Sample spray and grip for a contact at `pos` moving at `speed`.
    pub fn sample(&self, field: &DeformationField, pos: Vec2, speed: f32) -> EffectSample {
        let height = field.query_height(pos);
        let wetness = field.query_wetness(pos);
        EffectSample {
            intensity: self.spray_intensity(speed, 1.0 - height, self.config.spray_speed_threshold),
            kind: classify(wetness, self.ice_wetness_threshold),
            grip: self.grip(height, wetness),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowpack_core::config::FieldConfig;
    use snowpack_field::PaintTarget;

    fn model() -> EffectIntensityModel {
        EffectIntensityModel::new(EffectConfig::default(), 0.3)
    }

    #[test]
    fn test_classify_threshold() {
        assert_eq!(classify(0.0, 0.3), SprayKind::Snow);
        assert_eq!(classify(0.29, 0.3), SprayKind::Snow);
        assert_eq!(classify(0.3, 0.3), SprayKind::Ice);
        assert_eq!(classify(1.0, 0.3), SprayKind::Ice);
    }

    #[test]
    fn test_spray_zero_below_threshold() {
        let m = model();
        assert_eq!(m.spray_intensity(0.0, 0.0, 2.0), 0.0);
        assert_eq!(m.spray_intensity(1.9, 0.0, 2.0), 0.0);
        assert_eq!(m.spray_intensity(f32::NAN, 0.0, 2.0), 0.0);
        assert_eq!(m.spray_intensity(-10.0, 0.0, 2.0), 0.0);
    }

    #[test]
    fn test_spray_ramps_with_speed() {
        let m = model();
        let slow = m.spray_intensity(5.0, 0.0, 2.0);
        let fast = m.spray_intensity(12.0, 0.0, 2.0);
        assert!((slow - 0.2).abs() < 1e-6);
        assert!(fast > slow);
        assert_eq!(m.spray_intensity(100.0, 0.0, 2.0), 1.0);
    }

    #[test]
    fn test_packed_snow_sprays_less() {
        let m = model();
        let fresh = m.spray_intensity(30.0, 0.0, 2.0);
        let packed = m.spray_intensity(30.0, 0.75, 2.0);
        assert_eq!(fresh, 1.0);
        assert!((packed - 0.25).abs() < 1e-6);
        assert_eq!(m.spray_intensity(30.0, 1.0, 2.0), 0.0);
        assert_eq!(m.spray_intensity(30.0, 5.0, 2.0), 0.0);
    }

    #[test]
    fn test_grip_ranges() {
        let m = model();
        // Bare dry ground grips fully
        assert_eq!(m.grip(0.0, 0.0), 1.0);
        // Fresh powder loses the loose-snow share
        assert!((m.grip(1.0, 0.0) - 0.75).abs() < 1e-6);
        // Soaked ice on bare ground drops to the ice grip
        assert!((m.grip(0.0, 1.0) - 0.35).abs() < 1e-6);
        // Damp but below ice threshold only loses the loose-snow share
        assert!((m.grip(0.0, 0.2) - 1.0).abs() < 1e-6);
    }

    proptest::proptest! {
        #[test]
        fn effect_values_stay_in_range(
            speed in -50.0f32..200.0,
            height in -1.0f32..2.0,
            wetness in -1.0f32..2.0,
        ) {
            let m = model();
            let intensity = m.spray_intensity(speed, 1.0 - height, 2.0);
            proptest::prop_assert!((0.0..=1.0).contains(&intensity));
            let grip = m.grip(height, wetness);
            proptest::prop_assert!(grip > 0.0 && grip <= 1.0, "grip {grip}");
        }
    }

    #[test]
    fn test_sample_reads_field() {
        let mut field = DeformationField::new(&FieldConfig {
            resolution: 32,
            world_size: [32.0, 32.0],
            ..FieldConfig::default()
        })
        .expect("valid field");
        let m = model();
        let pos = Vec2::new(0.5, 0.5);

        let fresh = m.sample(&field, pos, 17.0);
        assert_eq!(fresh.kind, SprayKind::Snow);
        assert!((fresh.intensity - 1.0).abs() < 1e-6);

        field.paint_circle(pos, 2.0, 1.0);
        let packed = m.sample(&field, pos, 17.0);
        assert!(packed.intensity < 1e-6);
        assert_eq!(packed.grip, 1.0);

        field.melt_circle(Vec2::new(-8.5, -8.5), 2.0, 0.8);
        let icy = m.sample(&field, Vec2::new(-8.5, -8.5), 17.0);
        assert_eq!(icy.kind, SprayKind::Ice);
        assert!(icy.grip < fresh.grip);
    }
}
