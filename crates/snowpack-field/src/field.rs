use glam::Vec2;
use snowpack_core::config::FieldConfig;
use snowpack_core::constants::{BARE_HEIGHT, FULL_HEIGHT};
use snowpack_core::error::SnowpackError;
use snowpack_core::math::{linear_falloff, non_negative};
use snowpack_core::types::CellCoord;

use crate::delta::DeltaBuffer;
use crate::dirty::{self, DirtyRect};
use crate::geometry::GridGeometry;
use crate::paint::PaintTarget;

/// Persistent snow surface: a square grid of heights (1.0 = undisturbed,
/// 0.0 = compacted to bare ground) and a parallel grid of meltwater
/// wetness. Every cell of both grids stays in [0, 1].
#[derive(Debug, Clone)]
pub struct DeformationField {
    geometry: GridGeometry,
    heights: Vec<f32>,
    wetness: Vec<f32>,
    dirty: Option<DirtyRect>,
}

/// Result of a refreeze pass.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RefreezeOutcome {
    /// Total wetness removed across the grid.
    pub refrozen: f32,
    /// Cells whose wetness is still at or above the ice threshold.
    pub ice_candidates: u32,
}

/// Aggregate field statistics for debug overlays and tests.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldStats {
    pub mean_height: f32,
    pub min_height: f32,
    /// Cells below full height.
    pub compressed_cells: u32,
    pub mean_wetness: f32,
    /// Cells with any wetness.
    pub wet_cells: u32,
}

impl DeformationField {
    /// Build a field of undisturbed, dry snow.
    pub fn new(config: &FieldConfig) -> Result<Self, SnowpackError> {
        let geometry = GridGeometry::new(config)?;
        let cells = geometry.cell_count();
        log::debug!(
            "Deformation field {}x{} over {:?} world units",
            geometry.resolution(),
            geometry.resolution(),
            config.world_size
        );
        Ok(Self {
            geometry,
            heights: vec![FULL_HEIGHT; cells],
            wetness: vec![0.0; cells],
            dirty: None,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.geometry.resolution()
    }

    pub fn world_size(&self) -> Vec2 {
        self.geometry.world_size()
    }

    pub fn world_to_cell(&self, pos: Vec2) -> CellCoord {
        self.geometry.world_to_cell(pos)
    }

    pub fn cell_to_world(&self, cell: CellCoord) -> Vec2 {
        self.geometry.cell_to_world(cell)
    }

    pub fn contains(&self, pos: Vec2) -> bool {
        self.geometry.contains(pos)
    }

    #[inline]
    pub fn height(&self, cell: CellCoord) -> f32 {
        self.heights[cell.index(self.resolution())]
    }

    #[inline]
    pub fn wetness_at_cell(&self, cell: CellCoord) -> f32 {
        self.wetness[cell.index(self.resolution())]
    }

    /// Height at a world position; undisturbed (1.0) outside the bounds.
    pub fn query_height(&self, pos: Vec2) -> f32 {
        if !self.contains(pos) {
            return FULL_HEIGHT;
        }
        self.height(self.world_to_cell(pos))
    }

    /// Wetness at a world position; dry (0.0) outside the bounds.
    pub fn query_wetness(&self, pos: Vec2) -> f32 {
        if !self.contains(pos) {
            return 0.0;
        }
        self.wetness_at_cell(self.world_to_cell(pos))
    }

    /// Raise every compressed cell by `rate * dt`, capped at full height.
    /// Cells already at full height are skipped.
    pub fn recover(&mut self, dt: f32, rate: f32) {
        let amount = non_negative(dt) * non_negative(rate);
        if amount == 0.0 {
            return;
        }
        let mut touched = None;
        for (i, h) in self.heights.iter_mut().enumerate() {
            if *h >= FULL_HEIGHT {
                continue;
            }
            *h = (*h + amount).min(FULL_HEIGHT);
            dirty::mark(&mut touched, self.geometry.cell_at(i));
        }
        if let Some(rect) = touched {
            dirty::mark_rect(&mut self.dirty, rect);
        }
    }

    /// Melt `amount` of height from every cell above `epsilon`, moving
    /// `melted * wetness_gain` into wetness. Returns total height melted.
    pub fn melt_all(&mut self, amount: f32, wetness_gain: f32, epsilon: f32) -> f32 {
        let amount = non_negative(amount);
        if amount == 0.0 {
            return 0.0;
        }
        let gain = non_negative(wetness_gain);
        let mut total = 0.0;
        let mut touched = None;
        for (i, (h, w)) in self.heights.iter_mut().zip(self.wetness.iter_mut()).enumerate() {
            if *h <= epsilon {
                continue;
            }
            let melted = amount.min(*h);
            *h = (*h - melted).max(BARE_HEIGHT);
            *w = (*w + melted * gain).min(1.0);
            total += melted;
            dirty::mark(&mut touched, self.geometry.cell_at(i));
        }
        if let Some(rect) = touched {
            dirty::mark_rect(&mut self.dirty, rect);
        }
        total
    }

    /// Remove `amount` of wetness from every wet cell, counting cells that
    /// remain at or above `ice_threshold`.
    pub fn refreeze_all(&mut self, amount: f32, ice_threshold: f32) -> RefreezeOutcome {
        let amount = non_negative(amount);
        let mut outcome = RefreezeOutcome::default();
        let mut touched = None;
        for (i, w) in self.wetness.iter_mut().enumerate() {
            if *w <= 0.0 {
                continue;
            }
            let frozen = amount.min(*w);
            if frozen > 0.0 {
                *w -= frozen;
                outcome.refrozen += frozen;
                dirty::mark(&mut touched, self.geometry.cell_at(i));
            }
            if *w >= ice_threshold {
                outcome.ice_candidates += 1;
            }
        }
        if let Some(rect) = touched {
            dirty::mark_rect(&mut self.dirty, rect);
        }
        outcome
    }

    /// One-shot melt with linear falloff (explosions, fire). Melted height
    /// becomes wetness. Returns total height melted.
    pub fn melt_circle(&mut self, center: Vec2, radius: f32, amount: f32) -> f32 {
        let amount = non_negative(amount);
        if amount == 0.0 {
            return 0.0;
        }
        let n = self.resolution();
        let geometry = self.geometry;
        let mut total = 0.0;
        geometry.for_each_cell_in_circle(center, radius, |cell, d| {
            let idx = cell.index(n);
            let melted = (amount * linear_falloff(d)).min(self.heights[idx]);
            if melted <= 0.0 {
                return;
            }
            self.heights[idx] = (self.heights[idx] - melted).max(BARE_HEIGHT);
            self.wetness[idx] = (self.wetness[idx] + melted).min(1.0);
            total += melted;
            dirty::mark(&mut self.dirty, cell);
        });
        total
    }

    /// Fold a scratch buffer into the field: per cell, the lower height wins.
    /// Order-independent, so buffers painted in parallel merge identically.
    /// A buffer built for a different grid is ignored; returns whether the
    /// buffer was merged.
    pub fn merge(&mut self, delta: &DeltaBuffer) -> bool {
        if delta.geometry() != &self.geometry {
            log::warn!(
                "Ignoring paint buffer for a {}x{} grid; field is {}x{}",
                delta.geometry().resolution(),
                delta.geometry().resolution(),
                self.resolution(),
                self.resolution()
            );
            return false;
        }
        let Some(rect) = delta.touched() else {
            return true;
        };
        let n = self.resolution();
        for cell in rect.cells() {
            let idx = cell.index(n);
            let target = delta.height(cell);
            if target < self.heights[idx] {
                self.heights[idx] = target.max(BARE_HEIGHT);
                dirty::mark(&mut self.dirty, cell);
            }
        }
        true
    }

    /// Back to undisturbed, dry snow.
    pub fn reset(&mut self) {
        self.heights.fill(FULL_HEIGHT);
        self.wetness.fill(0.0);
        self.dirty = Some(DirtyRect::full(self.resolution()));
        log::debug!("Deformation field reset");
    }

    /// Height texture, row-major.
    pub fn heights(&self) -> &[f32] {
        &self.heights
    }

    /// Wetness texture, row-major.
    pub fn wetness(&self) -> &[f32] {
        &self.wetness
    }

    /// Height texture as raw bytes for a GPU upload.
    pub fn height_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.heights)
    }

    /// Wetness texture as raw bytes for a GPU upload.
    pub fn wetness_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.wetness)
    }

    /// Copy of the heights inside `rect`, row-major.
    pub fn height_region(&self, rect: &DirtyRect) -> Vec<f32> {
        self.copy_region(&self.heights, rect)
    }

    /// Copy of the wetness values inside `rect`, row-major.
    pub fn wetness_region(&self, rect: &DirtyRect) -> Vec<f32> {
        self.copy_region(&self.wetness, rect)
    }

    /// Rects are normalized and clipped to the grid first; a rect entirely
    /// off the grid yields nothing.
    fn copy_region(&self, grid: &[f32], rect: &DirtyRect) -> Vec<f32> {
        let n = self.resolution();
        let Some(rect) = rect.clamped(n) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(rect.cell_count());
        for row in rect.min.row..=rect.max.row {
            let start = CellCoord::new(row, rect.min.col).index(n);
            let end = CellCoord::new(row, rect.max.col).index(n);
            out.extend_from_slice(&grid[start..=end]);
        }
        out
    }

    /// Cells touched since the last `take_dirty_region`.
    pub fn dirty_region(&self) -> Option<DirtyRect> {
        self.dirty
    }

    /// Return and clear the touched region.
    pub fn take_dirty_region(&mut self) -> Option<DirtyRect> {
        self.dirty.take()
    }

    pub fn stats(&self) -> FieldStats {
        let count = self.heights.len() as f32;
        let mut stats = FieldStats {
            min_height: FULL_HEIGHT,
            ..FieldStats::default()
        };
        let mut height_sum = 0.0f64;
        let mut wet_sum = 0.0f64;
        for (&h, &w) in self.heights.iter().zip(&self.wetness) {
            height_sum += h as f64;
            wet_sum += w as f64;
            stats.min_height = stats.min_height.min(h);
            if h < FULL_HEIGHT {
                stats.compressed_cells += 1;
            }
            if w > 0.0 {
                stats.wet_cells += 1;
            }
        }
        stats.mean_height = (height_sum / count as f64) as f32;
        stats.mean_wetness = (wet_sum / count as f64) as f32;
        stats
    }
}

impl PaintTarget for DeformationField {
    fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    fn stamp(&mut self, cell: CellCoord, target_height: f32) {
        let idx = cell.index(self.resolution());
        let target = target_height.max(BARE_HEIGHT);
        if target < self.heights[idx] {
            self.heights[idx] = target;
            dirty::mark(&mut self.dirty, cell);
        }
    }
}
