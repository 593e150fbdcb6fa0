//! Persistent snow deformation field.
//!
//! A single shared 2D grid records compression across the arena, so
//! deformation detail scales with grid resolution and contact count rather
//! than with mesh density or the number of vehicles.

pub mod delta;
pub mod dirty;
pub mod field;
pub mod geometry;
pub mod paint;
pub mod raster;

pub use delta::DeltaBuffer;
pub use dirty::DirtyRect;
pub use field::{DeformationField, FieldStats, RefreezeOutcome};
pub use geometry::GridGeometry;
pub use paint::PaintTarget;
