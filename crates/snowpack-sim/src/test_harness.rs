/// End-to-end scenarios over the full simulation: thermal passes against a
/// pre-painted field, continuous tracks from the tracker, and the tick
/// pipeline in both painting modes.

#[cfg(test)]
mod tests {
    use glam::{Affine3A, Vec2, Vec3};
    use snowpack_core::config::{
        ActorProfile, FieldConfig, SnowpackConfig, ThermalConfig,
    };
    use snowpack_core::error::SnowpackError;
    use snowpack_core::types::{ActorId, CellCoord, PaintMode, SprayKind};
    use snowpack_field::DeformationField;

    use crate::contact::ContactTracker;
    use crate::pipeline::{ActorUpdate, SnowSimulation};
    use crate::thermal::{ThermalMode, ThermalModel};

    fn config(mode: PaintMode) -> SnowpackConfig {
        SnowpackConfig {
            field: FieldConfig {
                resolution: 64,
                world_size: [32.0, 32.0],
                ..FieldConfig::default()
            },
            thermal: ThermalConfig {
                start_hour: 0.0,
                ambient_temperature: -1.0,
                ..ThermalConfig::default()
            },
            paint_mode: mode,
            ..SnowpackConfig::default()
        }
    }

    fn quad_offsets() -> Vec<Vec3> {
        vec![
            Vec3::new(-1.0, 1.5, 0.0),
            Vec3::new(1.0, 1.5, 0.0),
            Vec3::new(-1.0, -1.5, 0.0),
            Vec3::new(1.0, -1.5, 0.0),
        ]
    }

    fn at(actor: u64, x: f32, y: f32, speed: f32) -> ActorUpdate {
        ActorUpdate {
            actor: ActorId(actor),
            transform: Affine3A::from_translation(Vec3::new(x, y, 0.0)),
            velocity: Vec3::new(speed, 0.0, 0.0),
        }
    }

    #[test]
    fn test_melt_scenario_moves_height_into_wetness() {
        let mut field = DeformationField::new(&FieldConfig {
            resolution: 16,
            world_size: [16.0, 16.0],
            ..FieldConfig::default()
        })
        .expect("valid field");
        field.melt_all(0.5, 0.0, 1e-4);
        let before_h = field.heights().to_vec();
        let before_w = field.wetness().to_vec();

        let mut thermal = ThermalModel::new(ThermalConfig {
            start_hour: 0.0,
            ambient_temperature: 10.0,
            ..ThermalConfig::default()
        });
        let report = thermal.step(&mut field, 10.0);
        assert_eq!(report.mode, ThermalMode::Melt);
        assert_eq!(thermal.solar_intensity(), 0.0);

        for i in 0..before_h.len() {
            let dh = field.heights()[i] - before_h[i];
            let dw = field.wetness()[i] - before_w[i];
            assert!(dh < 0.0);
            assert!((dh + dw).abs() < 1e-5, "cell {i}: dh={dh} dw={dw}");
            assert!((field.heights()[i] - 0.3).abs() < 1e-5);
        }
    }

    #[test]
    fn test_moving_contact_leaves_connected_track() {
        let mut field = DeformationField::new(&FieldConfig {
            resolution: 128,
            world_size: [32.0, 32.0],
            ..FieldConfig::default()
        })
        .expect("valid field");
        let mut tracker = ContactTracker::default();
        let profile = ActorProfile {
            contact_radius: 0.1,
            ..ActorProfile::default()
        };
        tracker.register_actor(ActorId(1), &[Vec3::ZERO], profile);

        let velocity = Vec3::new(10.0, 0.0, 0.0);
        let start = Affine3A::IDENTITY;
        let end = Affine3A::from_translation(Vec3::new(1.0, 0.0, 0.0));
        tracker
            .update(ActorId(1), &start, velocity, 0.1, &mut field)
            .expect("registered");
        let update = tracker
            .update(ActorId(1), &end, velocity, 0.1, &mut field)
            .expect("registered");
        assert_eq!(update.lines, 1);

        // x = 0 lands in column 64 and x = 1 in column 68 of row 64
        for col in 64..=68 {
            let h = field.height(CellCoord::new(64, col));
            assert!(h < 1.0, "gap in track at column {col}");
        }
        assert_eq!(field.height(CellCoord::new(64, 70)), 1.0);
    }

    #[test]
    fn test_unknown_actor_fails_before_mutation() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        sim.register_actor(ActorId(1), &quad_offsets(), ActorProfile::default());
        let hour = sim.thermal().state().time_of_day;

        let result = sim.tick(1.0, &[at(1, 0.0, 0.0, 5.0), at(99, 0.0, 0.0, 5.0)]);
        assert_eq!(result, Err(SnowpackError::UnknownActor(ActorId(99))));
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.thermal().state().time_of_day, hour);
        assert_eq!(sim.take_dirty_region(), None);
        assert_eq!(sim.contacts().contact_positions(ActorId(1)), Some(vec![]));
    }

    #[test]
    fn test_deferred_matches_direct() {
        let mut direct = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        let mut deferred = SnowSimulation::new(config(PaintMode::Deferred)).expect("valid config");
        for sim in [&mut direct, &mut deferred] {
            sim.register_actor(ActorId(1), &quad_offsets(), ActorProfile::default());
            sim.register_actor(ActorId(2), &[Vec3::new(0.5, 1.5, 0.0)], ActorProfile::default());
        }
        for step in 0..6 {
            let x = step as f32 * 0.5;
            let updates = [at(2, x, 0.2, 5.0), at(1, x, 0.0, 5.0)];
            let a = direct.tick(0.1, &updates).expect("tick");
            let b = deferred.tick(0.1, &updates).expect("tick");
            assert_eq!(a, b);
        }
        assert_eq!(direct.field().heights(), deferred.field().heights());
        assert!(direct.stats().compressed_cells > 0);
    }

    #[test]
    fn test_tick_paints_in_registration_order() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        for id in [7, 3, 5] {
            sim.register_actor(ActorId(id), &[Vec3::ZERO], ActorProfile::default());
        }
        let report = sim
            .tick(0.1, &[at(5, 4.0, 0.0, 1.0), at(3, 0.0, 0.0, 1.0), at(7, -4.0, 0.0, 1.0)])
            .expect("tick");
        let order: Vec<_> = report.contacts.iter().map(|(id, _)| *id).collect();
        assert_eq!(order, vec![ActorId(7), ActorId(3), ActorId(5)]);
        assert_eq!(report.tick, 1);
    }

    #[test]
    fn test_recovery_follows_weather() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        sim.register_actor(ActorId(1), &[Vec3::ZERO], ActorProfile::default());
        sim.tick(0.1, &[at(1, 0.0, 0.0, 0.0)]).expect("tick");
        let pressed = sim.query_height_at(Vec2::ZERO);
        assert!(pressed < 1.0);

        let report = sim.tick(1.0, &[]).expect("tick");
        assert!(report.recovered);
        let recovered = sim.query_height_at(Vec2::ZERO);
        assert!((recovered - (pressed + 0.005)).abs() < 1e-5);

        sim.set_raining(true);
        let report = sim.tick(1.0, &[]).expect("tick");
        assert!(!report.recovered);
        assert!(sim.query_height_at(Vec2::ZERO) < recovered);

        sim.set_raining(false);
        sim.set_ambient_temperature(10.0);
        let report = sim.tick(1.0, &[]).expect("tick");
        assert_eq!(report.thermal.mode, ThermalMode::Melt);
        assert!(!report.recovered);
    }

    #[test]
    fn test_effects_only_for_grounded_contacts() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        let offsets = [Vec3::new(-1.0, 0.0, 0.0), Vec3::new(1.0, 0.0, 2.0)];
        sim.register_actor(ActorId(1), &offsets, ActorProfile::default());
        let report = sim.tick(0.1, &[at(1, 0.0, 0.0, 12.0)]).expect("tick");
        assert_eq!(report.effects.len(), 1);
        let effect = &report.effects[0];
        assert_eq!(effect.contact, 0);
        assert_eq!(effect.sample.kind, SprayKind::Snow);
        // The contact pressed the snow under itself, so spray is reduced
        assert!(effect.sample.intensity < sim.effect_sample(Vec2::new(10.0, 10.0), 12.0).intensity);
    }

    #[test]
    fn test_ice_candidate_after_forced_melt_and_freeze() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        let spot = Vec2::new(4.25, 4.25);
        assert!(sim.force_melt_area(spot, 2.0, 0.6) > 0.0);
        assert!(!sim.is_ice_candidate(spot));
        sim.set_ambient_temperature(-15.0);
        assert!(sim.is_ice_candidate(spot));
        assert!(!sim.is_ice_candidate(Vec2::new(-10.0, -10.0)));
    }

    #[test]
    fn test_displacement_and_textures() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        assert_eq!(sim.displacement_at(Vec2::ZERO), 0.0);
        sim.force_melt_area(Vec2::new(0.25, 0.25), 1.0, 1.0);
        let expected = sim.config().field.max_displacement;
        assert!((sim.displacement_at(Vec2::new(0.25, 0.25)) - expected).abs() < 1e-6);
        assert_eq!(sim.height_texture().len(), 64 * 64 * 4);
        assert_eq!(sim.wetness_texture().len(), 64 * 64 * 4);
        assert!(sim.take_dirty_region().is_some());
        assert!(sim.take_dirty_region().is_none());
        assert_eq!(sim.surface_uniforms().resolution, 64);
    }

    #[test]
    fn test_reset_keeps_actors() {
        let mut sim = SnowSimulation::new(config(PaintMode::Deferred)).expect("valid config");
        sim.register_actor(ActorId(1), &quad_offsets(), ActorProfile::default());
        sim.tick(0.1, &[at(1, 0.0, 0.0, 5.0)]).expect("tick");
        sim.set_time_of_day(15.0);
        assert!(sim.stats().compressed_cells > 0);

        sim.reset();
        assert_eq!(sim.stats().compressed_cells, 0);
        assert_eq!(sim.tick_count(), 0);
        assert_eq!(sim.thermal().state().time_of_day, 0.0);
        assert!(sim.contacts().is_registered(ActorId(1)));
        assert!(sim.unregister_actor(ActorId(1)));
    }

    #[test]
    fn test_reset_does_not_bridge_old_and_new_poses() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        sim.register_actor(ActorId(1), &[Vec3::ZERO], ActorProfile::default());
        sim.tick(0.1, &[at(1, -12.0, 0.0, 5.0)]).expect("tick");
        sim.reset();

        let report = sim.tick(0.1, &[at(1, 12.0, 0.0, 5.0)]).expect("tick");
        let (_, update) = report.contacts[0];
        assert_eq!(update.lines, 0);
        assert_eq!(update.dimples, 1);
        for x in [-6.0, 0.0, 6.0] {
            assert_eq!(sim.query_height_at(Vec2::new(x, 0.0)), 1.0, "x {x}");
        }
        assert!(sim.query_height_at(Vec2::new(12.0, 0.0)) < 1.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut bad = config(PaintMode::Direct);
        bad.field.resolution = 0;
        bad.thermal.refreeze_threshold = 5.0;
        match SnowSimulation::new(bad) {
            Err(SnowpackError::InvalidConfig(message)) => {
                assert!(message.contains("resolution"));
                assert!(message.contains("refreeze_threshold"));
            }
            Err(other) => panic!("expected InvalidConfig, got {other}"),
            Ok(_) => panic!("expected InvalidConfig"),
        }
    }

    #[test]
    fn test_update_actor_paints_immediately() {
        let mut sim = SnowSimulation::new(config(PaintMode::Direct)).expect("valid config");
        sim.register_actor(ActorId(4), &[Vec3::ZERO], ActorProfile::default());
        let update = sim
            .update_actor(ActorId(4), &Affine3A::IDENTITY, Vec3::ZERO, 0.1)
            .expect("registered");
        assert_eq!(update.dimples, 1);
        assert!(sim.query_height_at(Vec2::ZERO) < 1.0);
        assert!(sim
            .update_actor(ActorId(5), &Affine3A::IDENTITY, Vec3::ZERO, 0.1)
            .is_err());
    }
}
