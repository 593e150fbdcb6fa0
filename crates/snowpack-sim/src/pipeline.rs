use glam::{Affine3A, Vec2, Vec3};
use snowpack_config::validate_config;
use snowpack_core::config::{ActorProfile, SnowpackConfig};
use snowpack_core::error::SnowpackError;
use snowpack_core::math::step_seconds;
use snowpack_core::types::{ActorId, PaintMode};
use snowpack_field::{DeformationField, DeltaBuffer, DirtyRect, FieldStats};

use crate::contact::{ContactTracker, ContactUpdate};
use crate::effects::{EffectIntensityModel, EffectSample};
use crate::thermal::{ThermalMode, ThermalModel, ThermalReport};
use crate::uniforms::SurfaceUniforms;

/// One actor's pose for this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActorUpdate {
    pub actor: ActorId,
    pub transform: Affine3A,
    pub velocity: Vec3,
}

/// Spray and grip under one grounded contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEffect {
    pub actor: ActorId,
    /// Index into the actor's registered contact offsets.
    pub contact: usize,
    pub position: Vec3,
    pub sample: EffectSample,
}

/// Summary of one simulation tick.
#[derive(Debug, Clone, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub thermal: ThermalReport,
    /// Whether compressed snow recovered this tick.
    pub recovered: bool,
    /// Per-actor paint results, in registration order.
    pub contacts: Vec<(ActorId, ContactUpdate)>,
    pub effects: Vec<ContactEffect>,
}

/// Single public struct owning the snow simulation: the shared field, the
/// weather driving it, and the actors pressing into it.
pub struct SnowSimulation {
    config: SnowpackConfig,
    field: DeformationField,
    thermal: ThermalModel,
    contacts: ContactTracker,
    effects: EffectIntensityModel,
    /// Scratch buffers for deferred painting, reused across ticks.
    scratch: Vec<DeltaBuffer>,
    tick_count: u64,
}

impl SnowSimulation {
    /// Build a simulation from a config. Every validation failure is
    /// reported in the returned error.
    pub fn new(config: SnowpackConfig) -> Result<Self, SnowpackError> {
        if let Err(errors) = validate_config(&config) {
            let message = errors
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("; ");
            return Err(SnowpackError::InvalidConfig(message));
        }
        let field = DeformationField::new(&config.field)?;
        let thermal = ThermalModel::new(config.thermal.clone());
        let contacts = ContactTracker::new(config.contact.clone());
        let effects =
            EffectIntensityModel::new(config.effects.clone(), config.thermal.ice_wetness_threshold);
        log::info!(
            "Snow simulation ready: {}x{} cells, {:?} painting, {:.1}h",
            field.resolution(),
            field.resolution(),
            config.paint_mode,
            thermal.state().time_of_day
        );
        Ok(Self {
            config,
            field,
            thermal,
            contacts,
            effects,
            scratch: Vec::new(),
            tick_count: 0,
        })
    }

    /// Advance the simulation by `dt` seconds.
    ///
    /// Order: thermal step, recovery, contact painting in registration
    /// order, effect sampling. Updates naming an unregistered actor fail the
    /// tick before anything is mutated. A NaN, infinite or negative `dt`
    /// counts as zero.
    pub fn tick(&mut self, dt: f32, updates: &[ActorUpdate]) -> Result<TickReport, SnowpackError> {
        let mut ordered = Vec::with_capacity(updates.len());
        for update in updates {
            let index = self
                .contacts
                .registration_index(update.actor)
                .ok_or(SnowpackError::UnknownActor(update.actor))?;
            ordered.push((index, update));
        }
        ordered.sort_by_key(|(index, _)| *index);

        let dt = step_seconds(dt);
        let thermal = self.thermal.step(&mut self.field, dt);
        let recovered = thermal.mode != ThermalMode::Melt && !self.thermal.state().raining;
        if recovered {
            self.field.recover(dt, self.config.field.recovery_rate);
        }

        let contacts = match self.config.paint_mode {
            PaintMode::Direct => self.paint_direct(&ordered, dt)?,
            PaintMode::Deferred => self.paint_deferred(&ordered, dt)?,
        };

        let mut effects = Vec::new();
        for (_, update) in &ordered {
            self.sample_effects(update, &mut effects);
        }

        self.tick_count += 1;
        log::debug!(
            "Tick {}: {:?}, {} actors, {} effect samples",
            self.tick_count,
            thermal.mode,
            contacts.len(),
            effects.len()
        );
        Ok(TickReport {
            tick: self.tick_count,
            thermal,
            recovered,
            contacts,
            effects,
        })
    }

    fn paint_direct(
        &mut self,
        ordered: &[(usize, &ActorUpdate)],
        dt: f32,
    ) -> Result<Vec<(ActorId, ContactUpdate)>, SnowpackError> {
        let mut results = Vec::with_capacity(ordered.len());
        for (_, update) in ordered {
            let result = self.contacts.update(
                update.actor,
                &update.transform,
                update.velocity,
                dt,
                &mut self.field,
            )?;
            results.push((update.actor, result));
        }
        Ok(results)
    }

    /// Each actor paints its own buffer; buffers merge by min height, so the
    /// result matches direct painting regardless of merge order.
    fn paint_deferred(
        &mut self,
        ordered: &[(usize, &ActorUpdate)],
        dt: f32,
    ) -> Result<Vec<(ActorId, ContactUpdate)>, SnowpackError> {
        while self.scratch.len() < ordered.len() {
            self.scratch.push(DeltaBuffer::for_field(&self.field));
        }
        let mut results = Vec::with_capacity(ordered.len());
        for ((_, update), buffer) in ordered.iter().zip(self.scratch.iter_mut()) {
            buffer.clear();
            let result = self.contacts.update(
                update.actor,
                &update.transform,
                update.velocity,
                dt,
                buffer,
            )?;
            results.push((update.actor, result));
        }
        for buffer in &self.scratch[..ordered.len()] {
            self.field.merge(buffer);
        }
        // Each buffer is a full grid; keep no more than one per live actor.
        self.scratch.truncate(self.contacts.actor_count());
        log::debug!("Merged {} deferred paint buffers", ordered.len());
        Ok(results)
    }

    fn sample_effects(&self, update: &ActorUpdate, out: &mut Vec<ContactEffect>) {
        let Some(contacts) = self.contacts.contacts(update.actor) else {
            return;
        };
        let speed = update.velocity.length();
        for (index, contact) in contacts.iter().enumerate() {
            let Some(position) = contact.position else {
                continue;
            };
            if !contact.grounded {
                continue;
            }
            out.push(ContactEffect {
                actor: update.actor,
                contact: index,
                position,
                sample: self.effects.sample(&self.field, position.truncate(), speed),
            });
        }
    }

    /// Sample and paint one actor immediately, outside the tick loop.
    pub fn update_actor(
        &mut self,
        actor: ActorId,
        transform: &Affine3A,
        velocity: Vec3,
        dt: f32,
    ) -> Result<ContactUpdate, SnowpackError> {
        self.contacts
            .update(actor, transform, velocity, dt, &mut self.field)
    }

    pub fn register_actor(&mut self, id: ActorId, offsets: &[Vec3], profile: ActorProfile) {
        self.contacts.register_actor(id, offsets, profile);
    }

    pub fn unregister_actor(&mut self, id: ActorId) -> bool {
        let removed = self.contacts.unregister_actor(id);
        self.scratch.truncate(self.contacts.actor_count());
        removed
    }

    pub fn set_ambient_temperature(&mut self, celsius: f32) {
        self.thermal.set_ambient_temperature(celsius);
    }

    pub fn set_raining(&mut self, raining: bool) {
        self.thermal.set_raining(raining);
    }

    pub fn set_time_of_day(&mut self, hours: f32) {
        self.thermal.set_time_of_day(hours);
    }

    pub fn force_melt_area(&mut self, pos: Vec2, radius: f32, amount: f32) -> f32 {
        self.thermal.force_melt_area(&mut self.field, pos, radius, amount)
    }

    /// Restore undisturbed snow and the configured weather. Registered
    /// actors stay registered but lose their contact history, so the first
    /// tick afterwards paints dimples instead of tracks from old poses.
    pub fn reset(&mut self) {
        self.field.reset();
        self.thermal = ThermalModel::new(self.config.thermal.clone());
        self.contacts.clear_history();
        self.scratch.clear();
        self.tick_count = 0;
        log::info!("Snow simulation reset");
    }

    pub fn query_height_at(&self, pos: Vec2) -> f32 {
        self.field.query_height(pos)
    }

    pub fn query_wetness_at(&self, pos: Vec2) -> f32 {
        self.field.query_wetness(pos)
    }

    pub fn is_ice_candidate(&self, pos: Vec2) -> bool {
        self.thermal.is_ice_candidate(&self.field, pos)
    }

    /// Vertical offset of the surface at `pos`.
    pub fn displacement_at(&self, pos: Vec2) -> f32 {
        (1.0 - self.field.query_height(pos)) * self.config.field.max_displacement
    }

    /// Row-major heights as raw bytes for a single-channel float texture.
    pub fn height_texture(&self) -> &[u8] {
        self.field.height_bytes()
    }

    pub fn wetness_texture(&self) -> &[u8] {
        self.field.wetness_bytes()
    }

    /// Cells changed since the last call, for partial texture uploads.
    pub fn take_dirty_region(&mut self) -> Option<DirtyRect> {
        self.field.take_dirty_region()
    }

    pub fn surface_uniforms(&self) -> SurfaceUniforms {
        SurfaceUniforms::capture(&self.field, &self.thermal, self.config.field.max_displacement)
    }

    pub fn effect_sample(&self, pos: Vec2, speed: f32) -> EffectSample {
        self.effects.sample(&self.field, pos, speed)
    }

    pub fn stats(&self) -> FieldStats {
        self.field.stats()
    }

    pub fn field(&self) -> &DeformationField {
        &self.field
    }

    pub fn thermal(&self) -> &ThermalModel {
        &self.thermal
    }

    pub fn contacts(&self) -> &ContactTracker {
        &self.contacts
    }

    pub fn config(&self) -> &SnowpackConfig {
        &self.config
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snowpack_core::config::FieldConfig;

    fn deferred() -> SnowSimulation {
        SnowSimulation::new(SnowpackConfig {
            field: FieldConfig {
                resolution: 32,
                world_size: [32.0, 32.0],
                ..FieldConfig::default()
            },
            paint_mode: PaintMode::Deferred,
            ..SnowpackConfig::default()
        })
        .expect("valid config")
    }

    fn at(actor: u64, x: f32) -> ActorUpdate {
        ActorUpdate {
            actor: ActorId(actor),
            transform: Affine3A::from_translation(Vec3::new(x, 0.0, 0.0)),
            velocity: Vec3::ZERO,
        }
    }

    #[test]
    fn test_scratch_shrinks_with_actor_count() {
        let mut sim = deferred();
        for id in 1..=3 {
            sim.register_actor(ActorId(id), &[Vec3::ZERO], ActorProfile::default());
        }
        sim.tick(0.1, &[at(1, -8.0), at(2, 0.0), at(3, 8.0)]).expect("tick");
        assert_eq!(sim.scratch.len(), 3);

        assert!(sim.unregister_actor(ActorId(2)));
        assert!(sim.unregister_actor(ActorId(3)));
        assert_eq!(sim.scratch.len(), 1);

        // Repeated updates for one actor do not leave extra buffers behind
        sim.tick(0.1, &[at(1, -8.0), at(1, -6.0)]).expect("tick");
        assert_eq!(sim.scratch.len(), 1);
    }

    #[test]
    fn test_nan_tick_keeps_clock() {
        let mut sim = deferred();
        sim.set_time_of_day(12.0);
        let report = sim.tick(f32::NAN, &[]).expect("tick");
        assert_eq!(sim.thermal().state().time_of_day, 12.0);
        assert_eq!(report.thermal.melted, 0.0);
        sim.tick(-5.0, &[]).expect("tick");
        assert_eq!(sim.thermal().state().time_of_day, 12.0);
    }
}
