use std::time::Instant;

use snowpack_core::config::{ActorProfile, SnowpackConfig};
use snowpack_core::error::SnowpackError;
use snowpack_core::types::ActorId;
use snowpack_sim::{ActorUpdate, SnowSimulation};

use crate::scenes::{actor_pose, wheel_offsets, SceneConfig};

/// Timing data for a single benchmark run.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TimingSeries {
    pub mean_ms: f64,
    pub median_ms: f64,
    pub p95_ms: f64,
    pub p99_ms: f64,
    pub min_ms: f64,
    pub max_ms: f64,
}

/// Result of a single scene benchmark.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct BenchmarkResult {
    pub scene_name: String,
    pub resolution: u32,
    pub actor_count: u32,
    pub tick_count: u32,
    /// Mean field height after the run, as a sanity check on the workload.
    pub final_mean_height: f32,
    pub timings: TimingSeries,
}

/// Runs full simulation ticks on the CPU.
pub struct BenchmarkRunner {
    base: SnowpackConfig,
    tick_count: u32,
    dt: f32,
}

impl BenchmarkRunner {
    /// `base` supplies weather and tuning; each scene overrides resolution
    /// and paint mode.
    pub fn new(base: SnowpackConfig, tick_count: u32) -> Self {
        Self {
            base,
            tick_count,
            dt: 1.0 / 60.0,
        }
    }

    /// Run a single benchmark scene and return timing results.
    pub fn run_scene(&self, scene: &SceneConfig) -> Result<BenchmarkResult, SnowpackError> {
        log::info!(
            "Running scene '{}' ({}x{} cells, {} actors)...",
            scene.name,
            scene.resolution,
            scene.resolution,
            scene.actor_count
        );

        let mut config = self.base.clone();
        config.field.resolution = scene.resolution;
        config.paint_mode = scene.paint_mode;
        let extent = config.field.world_size[0].min(config.field.world_size[1]);
        let mut sim = SnowSimulation::new(config)?;

        let offsets = wheel_offsets();
        for actor in 0..scene.actor_count {
            sim.register_actor(ActorId(actor as u64), &offsets, ActorProfile::default());
        }

        let mut frame_times = Vec::with_capacity(self.tick_count as usize);
        let mut updates = Vec::with_capacity(scene.actor_count as usize);

        for tick in 0..self.tick_count {
            updates.clear();
            updates.extend((0..scene.actor_count).map(|actor| {
                let (transform, velocity) = actor_pose(actor, tick, extent, self.dt);
                ActorUpdate {
                    actor: ActorId(actor as u64),
                    transform,
                    velocity,
                }
            }));

            let frame_start = Instant::now();
            sim.tick(self.dt, &updates)?;
            // Hosts drain the dirty region every frame for texture uploads
            let _ = sim.take_dirty_region();
            let elapsed = frame_start.elapsed().as_secs_f64() * 1000.0;
            frame_times.push(elapsed);
        }

        let timings = compute_timings(&frame_times);
        let final_mean_height = sim.stats().mean_height;
        log::info!(
            "  Done: mean={:.2}ms, p95={:.2}ms, p99={:.2}ms, mean height {:.3}",
            timings.mean_ms,
            timings.p95_ms,
            timings.p99_ms,
            final_mean_height
        );

        Ok(BenchmarkResult {
            scene_name: scene.name.to_string(),
            resolution: scene.resolution,
            actor_count: scene.actor_count,
            tick_count: self.tick_count,
            final_mean_height,
            timings,
        })
    }
}

/// Compute timing statistics from a list of frame times in milliseconds.
fn compute_timings(times: &[f64]) -> TimingSeries {
    if times.is_empty() {
        return TimingSeries {
            mean_ms: 0.0,
            median_ms: 0.0,
            p95_ms: 0.0,
            p99_ms: 0.0,
            min_ms: 0.0,
            max_ms: 0.0,
        };
    }

    let mut sorted = times.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let n = sorted.len();
    let mean = sorted.iter().sum::<f64>() / n as f64;
    let median = if n % 2 == 0 {
        (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
    } else {
        sorted[n / 2]
    };
    let p95_idx = ((n as f64) * 0.95).ceil() as usize;
    let p99_idx = ((n as f64) * 0.99).ceil() as usize;

    TimingSeries {
        mean_ms: mean,
        median_ms: median,
        p95_ms: sorted[p95_idx.min(n - 1)],
        p99_ms: sorted[p99_idx.min(n - 1)],
        min_ms: sorted[0],
        max_ms: sorted[n - 1],
    }
}
