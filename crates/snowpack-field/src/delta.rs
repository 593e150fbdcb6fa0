use snowpack_core::constants::{BARE_HEIGHT, FULL_HEIGHT};
use snowpack_core::types::CellCoord;

use crate::dirty::{self, DirtyRect};
use crate::field::DeformationField;
use crate::geometry::GridGeometry;
use crate::paint::PaintTarget;

/// Scratch copy of the field geometry that records the lowest target height
/// painted into each cell. One buffer per actor lets contacts paint
/// independently; `DeformationField::merge` folds them back in any order.
#[derive(Debug, Clone)]
pub struct DeltaBuffer {
    geometry: GridGeometry,
    heights: Vec<f32>,
    touched: Option<DirtyRect>,
}

impl DeltaBuffer {
    /// Empty buffer with the same geometry as `field`.
    pub fn for_field(field: &DeformationField) -> Self {
        Self::with_geometry(*field.geometry())
    }

    pub fn with_geometry(geometry: GridGeometry) -> Self {
        Self {
            heights: vec![FULL_HEIGHT; geometry.cell_count()],
            geometry,
            touched: None,
        }
    }

    #[inline]
    pub fn height(&self, cell: CellCoord) -> f32 {
        self.heights[cell.index(self.geometry.resolution())]
    }

    /// Bounding rectangle of painted cells.
    pub fn touched(&self) -> Option<DirtyRect> {
        self.touched
    }

    pub fn is_empty(&self) -> bool {
        self.touched.is_none()
    }

    /// Combine another buffer into this one (per-cell minimum).
    pub fn absorb(&mut self, other: &DeltaBuffer) {
        let Some(rect) = other.touched else {
            return;
        };
        for cell in rect.cells() {
            self.stamp(cell, other.height(cell));
        }
    }

    /// Forget all painting, keeping the allocation for the next tick.
    pub fn clear(&mut self) {
        if let Some(rect) = self.touched.take() {
            let n = self.geometry.resolution();
            for cell in rect.cells() {
                self.heights[cell.index(n)] = FULL_HEIGHT;
            }
        }
    }
}

impl PaintTarget for DeltaBuffer {
    fn geometry(&self) -> &GridGeometry {
        &self.geometry
    }

    fn stamp(&mut self, cell: CellCoord, target_height: f32) {
        let idx = cell.index(self.geometry.resolution());
        let target = target_height.max(BARE_HEIGHT);
        if target < self.heights[idx] {
            self.heights[idx] = target;
            dirty::mark(&mut self.touched, cell);
        }
    }
}
