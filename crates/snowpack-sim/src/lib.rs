//! Snow simulation built on the shared deformation field: weather-driven
//! melt and refreeze, actor contact painting, and spray/grip effects.

pub mod contact;
pub mod effects;
pub mod pipeline;
pub mod thermal;
pub mod uniforms;

#[cfg(test)]
mod test_harness;

pub use contact::{ContactPoint, ContactTracker, ContactUpdate};
pub use effects::{classify, EffectIntensityModel, EffectSample};
pub use pipeline::{ActorUpdate, ContactEffect, SnowSimulation, TickReport};
pub use thermal::{ThermalMode, ThermalModel, ThermalReport, ThermalState};
pub use uniforms::SurfaceUniforms;
