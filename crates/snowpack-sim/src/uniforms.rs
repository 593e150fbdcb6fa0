use snowpack_field::DeformationField;

use crate::thermal::ThermalModel;

/// Per-frame surface parameters for a renderer's displacement and material
/// shaders. Heights and wetness themselves are uploaded as textures.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceUniforms {
    /// World extent of the field (X, Y).
    pub world_size: [f32; 2],
    /// Cells per side.
    pub resolution: u32,
    /// Vertical offset at height 0.0; height 1.0 displaces nothing.
    pub max_displacement: f32,
    pub solar_intensity: f32,
    pub effective_temperature: f32,
    /// 1 while raining, 0 otherwise.
    pub raining: u32,
    pub ice_wetness_threshold: f32,
}

impl SurfaceUniforms {
    pub fn capture(field: &DeformationField, thermal: &ThermalModel, max_displacement: f32) -> Self {
        let state = thermal.state();
        Self {
            world_size: field.world_size().to_array(),
            resolution: field.resolution(),
            max_displacement,
            solar_intensity: state.solar_intensity,
            effective_temperature: thermal.effective_temperature(),
            raining: u32::from(state.raining),
            ice_wetness_threshold: thermal.config().ice_wetness_threshold,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(self)
    }
}
