use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

use crate::geometry::PointSet;
use crate::visuals::PointMaterial;

pub const POINTS_SHADER: &str = include_str!("points.wgsl");

/// Quad corners drawn per point.
pub const VERTICES_PER_POINT: u32 = 6;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct PointVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl PointVertex {
    pub const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<PointVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRIBUTES,
        }
    }

    /// Interleave a point set's positions and colors. Sets without colors get
    /// white, which the shader ignores unless the material asks for vertex colors.
    pub fn from_point_set(points: &PointSet) -> Vec<PointVertex> {
        let white = [1.0; 3];
        match points.colors() {
            Some(colors) => points
                .positions()
                .iter()
                .zip(colors)
                .map(|(p, c)| PointVertex {
                    position: p.to_array(),
                    color: c.to_array(),
                })
                .collect(),
            None => points
                .positions()
                .iter()
                .map(|p| PointVertex {
                    position: p.to_array(),
                    color: white,
                })
                .collect(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct FrameUniforms {
    pub view_proj: [[f32; 4]; 4],
    pub viewport: [f32; 2],
    pub fog_density: f32,
    pub _pad: f32,
    pub fog_color: [f32; 4],
}

impl FrameUniforms {
    pub fn new(view_proj: Mat4, viewport: (u32, u32), fog_density: f32, fog_color: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            viewport: [viewport.0.max(1) as f32, viewport.1.max(1) as f32],
            fog_density,
            _pad: 0.0,
            fog_color: fog_color.extend(1.0).to_array(),
        }
    }
}

#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct ObjectUniforms {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub size: f32,
    pub size_attenuation: u32,
    pub vertex_colors: u32,
    pub _pad: f32,
}

impl ObjectUniforms {
    pub fn new(model: Mat4, material: &PointMaterial) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: material.color.to_linear().extend(material.opacity).to_array(),
            size: material.size,
            size_attenuation: material.size_attenuation as u32,
            vertex_colors: material.vertex_colors as u32,
            _pad: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates WGSL code using naga.
    fn validate_wgsl(code: &str) -> Result<(), String> {
        let module = naga::front::wgsl::parse_str(code)
            .map_err(|e| format!("WGSL parse error: {:?}", e))?;

        let mut validator = naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::all(),
        );
        validator
            .validate(&module)
            .map_err(|e| format!("WGSL validation error: {:?}", e))?;

        Ok(())
    }

    #[test]
    fn test_points_shader_validates() {
        validate_wgsl(POINTS_SHADER).unwrap();
    }

    #[test]
    fn test_uniform_sizes_match_wgsl() {
        // mat4 + vec2 + f32 + f32 + vec4
        assert_eq!(std::mem::size_of::<FrameUniforms>(), 96);
        // mat4 + vec4 + f32 + u32 + u32 + f32
        assert_eq!(std::mem::size_of::<ObjectUniforms>(), 96);
        assert_eq!(std::mem::size_of::<PointVertex>(), 24);
    }

    #[test]
    fn test_vertices_default_to_white() {
        let set = PointSet::new(vec![Vec3::X, Vec3::Y]);
        let vertices = PointVertex::from_point_set(&set);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices[1].position, [0.0, 1.0, 0.0]);
        assert!(vertices.iter().all(|v| v.color == [1.0; 3]));
    }

    #[test]
    fn test_vertices_carry_colors() {
        let set = PointSet::with_colors(vec![Vec3::Z], vec![Vec3::new(0.8, 0.8, 0.9)]);
        let vertices = PointVertex::from_point_set(&set);
        assert_eq!(vertices[0].color, [0.8, 0.8, 0.9]);
    }

    #[test]
    fn test_object_uniforms_pack_material() {
        let material = PointMaterial::new(0.003, 0.7);
        let uniforms = ObjectUniforms::new(Mat4::IDENTITY, &material);
        assert_eq!(uniforms.color[3], 0.7);
        assert_eq!(uniforms.size, 0.003);
        assert_eq!(uniforms.size_attenuation, 1);
        assert_eq!(uniforms.vertex_colors, 0);
    }
}
