//! Per-actor contact points and the paint calls they produce.
//!
//! The tracker only observes actors: hosts pass transforms and velocities
//! in, and the tracker remembers where each contact point was last sampled
//! so consecutive samples can be joined into continuous tracks.

use glam::{Affine3A, Vec2, Vec3};
use snowpack_core::config::{ActorProfile, ContactConfig};
use snowpack_core::constants::{MAX_WEIGHT_FACTOR, MIN_WEIGHT_FACTOR};
use snowpack_core::error::SnowpackError;
use snowpack_core::math::non_negative;
use snowpack_core::types::ActorId;
use snowpack_field::PaintTarget;

/// One wheel or foot of an actor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactPoint {
    /// Offset in the actor's local frame.
    pub offset: Vec3,
    /// World position at the latest sample.
    pub position: Option<Vec3>,
    /// World position at the sample before that.
    pub previous: Option<Vec3>,
    pub grounded: bool,
    previous_grounded: bool,
}

impl ContactPoint {
    fn new(offset: Vec3) -> Self {
        Self {
            offset,
            position: None,
            previous: None,
            grounded: false,
            previous_grounded: false,
        }
    }

    /// Shift the latest sample into `previous` and record a new one.
    fn record(&mut self, position: Vec3, grounded: bool) {
        self.previous = self.position;
        self.previous_grounded = self.grounded;
        self.position = Some(position);
        self.grounded = grounded;
    }
}

#[derive(Debug, Clone)]
struct TrackedActor {
    id: ActorId,
    profile: ActorProfile,
    contacts: Vec<ContactPoint>,
}

/// Paint calls issued by one actor update.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContactUpdate {
    /// Contacts that painted a track segment from their previous sample.
    pub lines: u32,
    /// Contacts that painted a single dimple.
    pub dimples: u32,
    /// Contacts above the ground threshold this sample.
    pub airborne: u32,
    /// Strength used for every paint call of this update.
    pub strength: f32,
}

/// Registry of actors and their contact points, kept in registration order
/// so painting order is stable across runs.
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    config: ContactConfig,
    actors: Vec<TrackedActor>,
}

impl ContactTracker {
    pub fn new(config: ContactConfig) -> Self {
        Self {
            config,
            actors: Vec::new(),
        }
    }

    pub fn config(&self) -> &ContactConfig {
        &self.config
    }

    /// Register an actor with contact offsets in its local frame.
    /// Re-registering an id replaces its contacts but keeps its slot.
    pub fn register_actor(&mut self, id: ActorId, offsets: &[Vec3], profile: ActorProfile) {
        let contacts = offsets.iter().copied().map(ContactPoint::new).collect();
        if let Some(actor) = self.actors.iter_mut().find(|a| a.id == id) {
            log::warn!("{id} registered twice; replacing its contacts");
            actor.profile = profile;
            actor.contacts = contacts;
            return;
        }
        log::debug!("Registered {id} with {} contacts", offsets.len());
        self.actors.push(TrackedActor {
            id,
            profile,
            contacts,
        });
    }

    /// Drop an actor and its contact history. Returns false if unknown.
    pub fn unregister_actor(&mut self, id: ActorId) -> bool {
        let Some(index) = self.registration_index(id) else {
            return false;
        };
        self.actors.remove(index);
        log::debug!("Unregistered {id}");
        true
    }

    /// Forget every sampled position so the next update starts with fresh
    /// dimples. Registrations and profiles are kept.
    pub fn clear_history(&mut self) {
        for contact in self.actors.iter_mut().flat_map(|a| a.contacts.iter_mut()) {
            *contact = ContactPoint::new(contact.offset);
        }
    }

    pub fn is_registered(&self, id: ActorId) -> bool {
        self.registration_index(id).is_some()
    }

    pub fn registration_index(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|a| a.id == id)
    }

    pub fn actor_count(&self) -> usize {
        self.actors.len()
    }

    /// Registered ids in registration order.
    pub fn actor_ids(&self) -> impl Iterator<Item = ActorId> + '_ {
        self.actors.iter().map(|a| a.id)
    }

    pub fn profile(&self, id: ActorId) -> Option<ActorProfile> {
        self.actor(id).map(|a| a.profile)
    }

    pub fn contacts(&self, id: ActorId) -> Option<&[ContactPoint]> {
        self.actor(id).map(|a| a.contacts.as_slice())
    }

    /// Latest world position of every sampled contact of an actor.
    pub fn contact_positions(&self, id: ActorId) -> Option<Vec<Vec3>> {
        self.actor(id)
            .map(|a| a.contacts.iter().filter_map(|c| c.position).collect())
    }

    /// Paint strength for an actor profile moving at `speed`: half the
    /// baseline when stationary, the full baseline at normalization speed.
    pub fn paint_strength(&self, profile: &ActorProfile, speed: f32) -> f32 {
        let weight_factor = (non_negative(profile.weight) / self.config.reference_weight)
            .clamp(MIN_WEIGHT_FACTOR, MAX_WEIGHT_FACTOR);
        let speed_factor = (non_negative(speed) / self.config.speed_normalization).min(1.0);
        non_negative(profile.baseline_strength) * weight_factor * (0.5 + 0.5 * speed_factor)
    }

    /// Sample an actor's contacts at `transform` and paint them into
    /// `target`.
    ///
    /// A grounded contact that moved more than the minimum distance since a
    /// grounded previous sample paints a line of width twice its radius;
    /// otherwise it paints a dimple. Airborne contacts only record their
    /// position. With `dt <= 0` every contact records its position and
    /// nothing is painted.
    pub fn update<T: PaintTarget + ?Sized>(
        &mut self,
        id: ActorId,
        transform: &Affine3A,
        velocity: Vec3,
        dt: f32,
        target: &mut T,
    ) -> Result<ContactUpdate, SnowpackError> {
        let index = self
            .registration_index(id)
            .ok_or(SnowpackError::UnknownActor(id))?;
        let strength = {
            let actor = &self.actors[index];
            self.paint_strength(&actor.profile, velocity.length())
        };
        let ground_height = self.config.ground_contact_height;
        let min_movement = self.config.min_movement;
        let actor = &mut self.actors[index];
        let radius = actor.profile.contact_radius;
        let paints = dt > 0.0;

        let mut update = ContactUpdate {
            strength,
            ..ContactUpdate::default()
        };
        for contact in &mut actor.contacts {
            let world = transform.transform_point3(contact.offset);
            let grounded = world.z <= ground_height;
            contact.record(world, grounded);
            if !grounded {
                update.airborne += 1;
                continue;
            }
            if !paints {
                continue;
            }
            let here = flatten(world);
            match contact.previous {
                Some(prev)
                    if contact.previous_grounded
                        && flatten(prev).distance(here) > min_movement =>
                {
                    log::trace!("{id}: track {} -> {here} s={strength:.3}", flatten(prev));
                    target.paint_line(flatten(prev), here, radius * 2.0, strength);
                    update.lines += 1;
                }
                _ => {
                    log::trace!("{id}: dimple at {here} s={strength:.3}");
                    target.paint_circle(here, radius, strength);
                    update.dimples += 1;
                }
            }
        }
        Ok(update)
    }

    fn actor(&self, id: ActorId) -> Option<&TrackedActor> {
        self.actors.iter().find(|a| a.id == id)
    }
}

/// Project onto the ground plane.
fn flatten(world: Vec3) -> Vec2 {
    world.truncate()
}
