use glam::{IVec2, Vec2};
use snowpack_core::config::FieldConfig;
use snowpack_core::constants::MAX_RESOLUTION;
use snowpack_core::error::SnowpackError;
use snowpack_core::types::CellCoord;

/// Mapping between world space (XY plane, centered on the origin) and a
/// square grid of cells. Shared by the field and its scratch buffers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    resolution: u32,
    world_size: Vec2,
    cell_size: Vec2,
}

impl GridGeometry {
    /// Validate the config and build the mapping.
    pub fn new(config: &FieldConfig) -> Result<Self, SnowpackError> {
        let resolution = config.resolution;
        if resolution == 0 {
            return Err(SnowpackError::InvalidConfig(
                "field resolution must be positive".to_string(),
            ));
        }
        if resolution > MAX_RESOLUTION {
            return Err(SnowpackError::InvalidConfig(format!(
                "field resolution {resolution} exceeds max {MAX_RESOLUTION}"
            )));
        }
        let world_size = Vec2::from(config.world_size);
        if !world_size.is_finite() || world_size.min_element() <= 0.0 {
            return Err(SnowpackError::InvalidConfig(format!(
                "field world size {:?} must be finite and positive",
                config.world_size
            )));
        }
        Ok(Self {
            resolution,
            world_size,
            cell_size: world_size / resolution as f32,
        })
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn world_size(&self) -> Vec2 {
        self.world_size
    }

    pub fn cell_size(&self) -> Vec2 {
        self.cell_size
    }

    pub fn cell_count(&self) -> usize {
        self.resolution as usize * self.resolution as usize
    }

    fn half_size(&self) -> Vec2 {
        self.world_size * 0.5
    }

    /// Whether a world position lies inside the covered rectangle.
    pub fn contains(&self, pos: Vec2) -> bool {
        let half = self.half_size();
        pos.x.abs() <= half.x && pos.y.abs() <= half.y
    }

    /// Continuous cell-space coordinate (x = column, y = row).
    fn to_cell_space(&self, pos: Vec2) -> Vec2 {
        (pos + self.half_size()) / self.cell_size
    }

    /// Map a world position to its cell, clamping to the grid edge.
    pub fn world_to_cell(&self, pos: Vec2) -> CellCoord {
        let cell = self.to_cell_space(pos);
        CellCoord::new(
            clamp_index(cell.y, self.resolution),
            clamp_index(cell.x, self.resolution),
        )
    }

    /// Unclamped integer cell (x = column, y = row). May lie off the grid.
    pub fn world_to_cell_unclamped(&self, pos: Vec2) -> IVec2 {
        self.to_cell_space(pos).floor().as_ivec2()
    }

    /// World position of a cell center.
    pub fn cell_to_world(&self, cell: CellCoord) -> Vec2 {
        self.grid_point_to_world(IVec2::new(cell.col as i32, cell.row as i32))
    }

    /// World position of an integer cell center, on or off the grid.
    pub fn grid_point_to_world(&self, cell: IVec2) -> Vec2 {
        (cell.as_vec2() + Vec2::splat(0.5)) * self.cell_size - self.half_size()
    }

    /// Smallest brush radius; keeps every stamp inside its own cell.
    pub fn min_brush_radius(&self) -> f32 {
        self.cell_size.max_element()
    }

    /// Visit every cell whose center lies strictly inside the circle,
    /// passing the distance normalized to [0, 1).
    ///
    /// Non-positive or non-finite radii visit nothing. Positive radii
    /// below one cell width are widened to one cell width.
    pub fn for_each_cell_in_circle(
        &self,
        center: Vec2,
        radius: f32,
        mut visit: impl FnMut(CellCoord, f32),
    ) {
        if !center.is_finite() || !radius.is_finite() || radius <= 0.0 {
            return;
        }
        let radius = radius.max(self.min_brush_radius());
        let n = self.resolution as f32;
        let lo = self.to_cell_space(center - Vec2::splat(radius)).floor();
        let hi = self.to_cell_space(center + Vec2::splat(radius)).floor();
        if hi.x < 0.0 || hi.y < 0.0 || lo.x >= n || lo.y >= n {
            return;
        }
        let col0 = clamp_index(lo.x, self.resolution);
        let col1 = clamp_index(hi.x, self.resolution);
        let row0 = clamp_index(lo.y, self.resolution);
        let row1 = clamp_index(hi.y, self.resolution);

        let r2 = radius * radius;
        for row in row0..=row1 {
            for col in col0..=col1 {
                let cell = CellCoord::new(row, col);
                let dist2 = self.cell_to_world(cell).distance_squared(center);
                if dist2 >= r2 {
                    continue;
                }
                visit(cell, dist2.sqrt() / radius);
            }
        }
    }

    /// Cell for a flat row-major index.
    #[inline]
    pub fn cell_at(&self, index: usize) -> CellCoord {
        let n = self.resolution as usize;
        CellCoord::new((index / n) as u32, (index % n) as u32)
    }
}

fn clamp_index(value: f32, resolution: u32) -> u32 {
    let max = resolution - 1;
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= max as f32 {
        max
    } else {
        value as u32
    }
}
