//! Day cycle and weather driving melt and refreeze.
//!
//! The melt/refreeze branch is re-derived from the effective temperature on
//! every call; there is no stored mode that could drift out of sync. An
//! optional dead band widens the dormant zone around both thresholds.

use glam::Vec2;
use snowpack_core::config::ThermalConfig;
use snowpack_core::constants::RAIN_WETNESS_GAIN;
use snowpack_core::math::{non_negative, solar_intensity, step_seconds, wrap_hours};
use snowpack_field::DeformationField;

/// Which thermal pass applies this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThermalMode {
    Melt,
    Refreeze,
    Dormant,
}

/// Observable weather state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalState {
    /// Ambient air temperature (deg C).
    pub ambient_temperature: f32,
    /// Hours in [0, 24).
    pub time_of_day: f32,
    /// Derived from `time_of_day`, in [0, 1].
    pub solar_intensity: f32,
    pub raining: bool,
}

/// What one thermal step did to the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThermalReport {
    pub mode: ThermalMode,
    pub effective_temperature: f32,
    /// Height removed by temperature-driven melt.
    pub melted: f32,
    /// Height removed by rain.
    pub rain_melted: f32,
    /// Wetness removed by refreezing.
    pub refrozen: f32,
    /// Cells still wet enough to read as ice after refreezing.
    pub ice_candidates: u32,
}

impl ThermalReport {
    fn idle(mode: ThermalMode, effective_temperature: f32) -> Self {
        Self {
            mode,
            effective_temperature,
            melted: 0.0,
            rain_melted: 0.0,
            refrozen: 0.0,
            ice_candidates: 0,
        }
    }
}

pub struct ThermalModel {
    config: ThermalConfig,
    state: ThermalState,
}

impl ThermalModel {
    pub fn new(config: ThermalConfig) -> Self {
        let hour = wrap_hours(config.start_hour);
        let state = ThermalState {
            ambient_temperature: config.ambient_temperature,
            time_of_day: hour,
            solar_intensity: solar_intensity(hour),
            raining: config.raining,
        };
        Self { config, state }
    }

    pub fn config(&self) -> &ThermalConfig {
        &self.config
    }

    pub fn state(&self) -> ThermalState {
        self.state
    }

    pub fn set_ambient_temperature(&mut self, celsius: f32) {
        self.state.ambient_temperature = celsius;
    }

    pub fn set_raining(&mut self, raining: bool) {
        if raining != self.state.raining {
            log::info!("Rain {}", if raining { "started" } else { "stopped" });
        }
        self.state.raining = raining;
    }

    pub fn set_time_of_day(&mut self, hours: f32) {
        self.state.time_of_day = wrap_hours(hours);
        self.state.solar_intensity = solar_intensity(self.state.time_of_day);
    }

    /// Advance the clock by `dt` simulated seconds, scaled by the time scale.
    /// The clock only moves forward; bad steps leave it where it is.
    pub fn advance(&mut self, dt: f32) {
        let dt = step_seconds(dt);
        if dt == 0.0 {
            return;
        }
        let game_seconds = dt * self.config.time_scale;
        self.set_time_of_day(self.state.time_of_day + game_seconds / 3600.0);
    }

    pub fn solar_intensity(&self) -> f32 {
        self.state.solar_intensity
    }

    /// Ambient temperature plus solar heating.
    pub fn effective_temperature(&self) -> f32 {
        self.state.ambient_temperature + self.state.solar_intensity * self.config.solar_heating_max
    }

    pub fn mode(&self) -> ThermalMode {
        let t = self.effective_temperature();
        let band = non_negative(self.config.dead_band);
        if t > self.config.melt_threshold + band {
            ThermalMode::Melt
        } else if t < self.config.refreeze_threshold - band {
            ThermalMode::Refreeze
        } else {
            ThermalMode::Dormant
        }
    }

    /// Melt when warm, refreeze meltwater when cold, nothing in between.
    pub fn apply_melt_or_freeze(&self, field: &mut DeformationField, dt: f32) -> ThermalReport {
        let dt = non_negative(dt);
        let t = self.effective_temperature();
        let mode = self.mode();
        let mut report = ThermalReport::idle(mode, t);
        if dt == 0.0 {
            return report;
        }
        match mode {
            ThermalMode::Melt => {
                let sun_factor = 1.0 + self.state.solar_intensity * self.config.sun_melt_multiplier;
                let amount = self.config.melt_rate_per_degree
                    * (t - self.config.melt_threshold)
                    * sun_factor
                    * dt;
                report.melted = field.melt_all(amount, 1.0, self.config.height_epsilon);
            }
            ThermalMode::Refreeze => {
                let amount = self.config.refreeze_rate * (self.config.refreeze_threshold - t) * dt;
                let outcome = field.refreeze_all(amount, self.config.ice_wetness_threshold);
                report.refrozen = outcome.refrozen;
                report.ice_candidates = outcome.ice_candidates;
            }
            ThermalMode::Dormant => {}
        }
        report
    }

    /// Rain melts at a fixed rate regardless of temperature and leaves
    /// standing water: wetness gains twice the melted height.
    pub fn apply_rain_melt(&self, field: &mut DeformationField, dt: f32) -> f32 {
        if !self.state.raining {
            return 0.0;
        }
        let amount = self.config.rain_melt_rate * non_negative(dt);
        field.melt_all(amount, RAIN_WETNESS_GAIN, self.config.height_epsilon)
    }

    /// One-shot melt around an external heat event (explosion, fire).
    pub fn force_melt_area(
        &self,
        field: &mut DeformationField,
        pos: Vec2,
        radius: f32,
        amount: f32,
    ) -> f32 {
        let melted = field.melt_circle(pos, radius, amount);
        log::debug!("Forced melt at {pos} r={radius}: {melted:.3} height melted");
        melted
    }

    /// Whether the surface at `pos` reads as ice: refreezing conditions
    /// and enough meltwater. Derived each call, never stored.
    pub fn is_ice_candidate(&self, field: &DeformationField, pos: Vec2) -> bool {
        self.mode() == ThermalMode::Refreeze
            && field.query_wetness(pos) >= self.config.ice_wetness_threshold
    }

    /// Advance the clock, then run the temperature and rain passes.
    pub fn step(&mut self, field: &mut DeformationField, dt: f32) -> ThermalReport {
        let dt = step_seconds(dt);
        self.advance(dt);
        let mut report = self.apply_melt_or_freeze(field, dt);
        report.rain_melted = self.apply_rain_melt(field, dt);
        report
    }
}
