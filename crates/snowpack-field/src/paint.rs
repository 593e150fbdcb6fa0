use glam::Vec2;
use snowpack_core::math::{non_negative, quadratic_falloff};
use snowpack_core::types::CellCoord;

use crate::geometry::GridGeometry;
use crate::raster::{clip_segment, line_cells};

/// Anything contact painting can write into: the live field, or a scratch
/// buffer that is merged into the field later.
///
/// Painting is a target-depth stamp. Each cell is lowered to
/// `1 - strength * falloff` unless it is already lower, so painting never
/// raises height and repeating a paint with the same or weaker strength
/// changes nothing.
pub trait PaintTarget {
    fn geometry(&self) -> &GridGeometry;

    /// Lower one cell to `target_height` if it is currently above it.
    fn stamp(&mut self, cell: CellCoord, target_height: f32);

    /// Compress every cell within `radius` of `center` with a quadratic
    /// falloff. Non-positive radius or strength is a no-op.
    fn paint_circle(&mut self, center: Vec2, radius: f32, strength: f32) {
        let strength = non_negative(strength);
        if strength == 0.0 {
            return;
        }
        let geometry = *self.geometry();
        geometry.for_each_cell_in_circle(center, radius, |cell, d| {
            let falloff = quadratic_falloff(d);
            if falloff > 0.0 {
                self.stamp(cell, 1.0 - strength * falloff);
            }
        });
    }

    /// Paint a continuous track of width `width` from `start` to `end` by
    /// stamping a circle at every rasterized cell along the segment.
    fn paint_line(&mut self, start: Vec2, end: Vec2, width: f32, strength: f32) {
        let radius = non_negative(width) * 0.5;
        if radius == 0.0 || non_negative(strength) == 0.0 {
            return;
        }
        let geometry = *self.geometry();
        // Cells farther than one brush radius outside the grid cannot reach it
        let reach = Vec2::splat(
            radius
                .max(geometry.min_brush_radius())
                .min(geometry.world_size().max_element()),
        );
        let half = geometry.world_size() * 0.5;
        let Some((a, b)) = clip_segment(start, end, -half - reach, half + reach) else {
            return;
        };
        let from = geometry.world_to_cell_unclamped(a);
        let to = geometry.world_to_cell_unclamped(b);
        for cell in line_cells(from, to) {
            self.paint_circle(geometry.grid_point_to_world(cell), radius, strength);
        }
    }
}
