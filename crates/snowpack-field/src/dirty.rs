use snowpack_core::types::CellCoord;

/// Inclusive bounding rectangle of cells modified since the last upload.
/// Hosts use it to push only a sub-region of the height texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirtyRect {
    pub min: CellCoord,
    pub max: CellCoord,
}

impl DirtyRect {
    pub fn single(cell: CellCoord) -> Self {
        Self {
            min: cell,
            max: cell,
        }
    }

    /// Rectangle covering a whole grid of side `resolution`.
    pub fn full(resolution: u32) -> Self {
        let last = resolution.saturating_sub(1);
        Self {
            min: CellCoord::new(0, 0),
            max: CellCoord::new(last, last),
        }
    }

    /// Grow to include `cell`.
    pub fn include(&mut self, cell: CellCoord) {
        self.min.row = self.min.row.min(cell.row);
        self.min.col = self.min.col.min(cell.col);
        self.max.row = self.max.row.max(cell.row);
        self.max.col = self.max.col.max(cell.col);
    }

    pub fn union(mut self, other: DirtyRect) -> Self {
        self.include(other.min);
        self.include(other.max);
        self
    }

    /// Same rectangle with `min <= max` on both axes. Rects built through
    /// `single` and `include` are already normalized; hand-built ones may
    /// have their corners swapped.
    pub fn normalized(&self) -> Self {
        Self {
            min: CellCoord::new(self.min.row.min(self.max.row), self.min.col.min(self.max.col)),
            max: CellCoord::new(self.min.row.max(self.max.row), self.min.col.max(self.max.col)),
        }
    }

    /// Normalized and clipped to a grid of side `resolution`. `None` if no
    /// cell of the rect lies on the grid.
    pub fn clamped(&self, resolution: u32) -> Option<Self> {
        let rect = self.normalized();
        if resolution == 0 || rect.min.row >= resolution || rect.min.col >= resolution {
            return None;
        }
        let last = resolution - 1;
        Some(Self {
            min: rect.min,
            max: CellCoord::new(rect.max.row.min(last), rect.max.col.min(last)),
        })
    }

    pub fn contains(&self, cell: CellCoord) -> bool {
        let rect = self.normalized();
        (rect.min.row..=rect.max.row).contains(&cell.row)
            && (rect.min.col..=rect.max.col).contains(&cell.col)
    }

    /// Columns spanned.
    pub fn width(&self) -> u32 {
        self.max.col.abs_diff(self.min.col) + 1
    }

    /// Rows spanned.
    pub fn height(&self) -> u32 {
        self.max.row.abs_diff(self.min.row) + 1
    }

    pub fn cell_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Iterate every cell, row by row.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> {
        let rect = self.normalized();
        (rect.min.row..=rect.max.row)
            .flat_map(move |row| (rect.min.col..=rect.max.col).map(move |col| CellCoord::new(row, col)))
    }
}

/// Grow an optional rectangle to include `cell`.
pub(crate) fn mark(dirty: &mut Option<DirtyRect>, cell: CellCoord) {
    match dirty {
        Some(rect) => rect.include(cell),
        None => *dirty = Some(DirtyRect::single(cell)),
    }
}

/// Merge an optional rectangle into another.
pub(crate) fn mark_rect(dirty: &mut Option<DirtyRect>, rect: DirtyRect) {
    *dirty = Some(match dirty.take() {
        Some(existing) => existing.union(rect),
        None => rect,
    });
}
