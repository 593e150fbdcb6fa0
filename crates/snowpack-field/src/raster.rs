//! Integer line rasterization and segment clipping for track painting.

use glam::{IVec2, Vec2};

/// Bresenham walk over every cell between two endpoints, inclusive.
/// Works in all octants; consecutive cells are 8-connected.
#[derive(Debug, Clone)]
pub struct LineCells {
    current: IVec2,
    end: IVec2,
    dx: i32,
    dy: i32,
    step: IVec2,
    err: i32,
    done: bool,
}

pub fn line_cells(start: IVec2, end: IVec2) -> LineCells {
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    LineCells {
        current: start,
        end,
        dx,
        dy,
        step: IVec2::new(
            if start.x < end.x { 1 } else { -1 },
            if start.y < end.y { 1 } else { -1 },
        ),
        err: dx + dy,
        done: false,
    }
}

impl Iterator for LineCells {
    type Item = IVec2;

    fn next(&mut self) -> Option<IVec2> {
        if self.done {
            return None;
        }
        let cell = self.current;
        if cell == self.end {
            self.done = true;
            return Some(cell);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.current.x += self.step.x;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.current.y += self.step.y;
        }
        Some(cell)
    }
}

/// Clip a segment to an axis-aligned rectangle (Liang-Barsky).
/// Returns `None` when the segment misses the rectangle entirely.
pub fn clip_segment(start: Vec2, end: Vec2, min: Vec2, max: Vec2) -> Option<(Vec2, Vec2)> {
    if !start.is_finite() || !end.is_finite() {
        return None;
    }
    let delta = end - start;
    let mut t0 = 0.0f32;
    let mut t1 = 1.0f32;

    let edges = [
        (-delta.x, start.x - min.x),
        (delta.x, max.x - start.x),
        (-delta.y, start.y - min.y),
        (delta.y, max.y - start.y),
    ];
    for (p, q) in edges {
        if p == 0.0 {
            // Parallel to this edge
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            t0 = t0.max(t);
        } else {
            if t < t0 {
                return None;
            }
            t1 = t1.min(t);
        }
    }
    Some((start + delta * t0, start + delta * t1))
}
