use crate::texture::TextureUnit;

/// Shading program compiled into the binary
pub const DEFAULT_SOURCE: &str = include_str!("shaders/spacetime.wgsl");

/// Full-screen shading program plus the bind group layouts it expects.
///
/// Group 0 holds the scene uniform block (binding 0) and the sampler
/// (binding 1). Group 1 holds one texture per unit at binding N.
/// When compilation or pipeline validation fails, the program is kept
/// without a pipeline and the frame is left cleared.
pub struct ShaderProgram {
    pipeline: Option<wgpu::RenderPipeline>,
    texture_layout: wgpu::BindGroupLayout,
    scene_layout: wgpu::BindGroupLayout,
}

impl ShaderProgram {
    pub fn new(
        device: &wgpu::Device,
        source: &str,
        surface_format: wgpu::TextureFormat,
        texture_unit: TextureUnit,
    ) -> Self {
        let scene_layout = Self::create_scene_layout(device);
        let texture_layout = Self::create_texture_layout(device, texture_unit);

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = Self::create_pipeline(
            device,
            source,
            surface_format,
            &scene_layout,
            &texture_layout,
        );
        let pipeline = match pollster::block_on(device.pop_error_scope()) {
            None => {
                log::info!("Shader program linked");
                Some(pipeline)
            }
            Some(e) => {
                log::error!("shader compilation failed: {}", e);
                None
            }
        };

        Self {
            pipeline,
            texture_layout,
            scene_layout,
        }
    }

    pub fn pipeline(&self) -> Option<&wgpu::RenderPipeline> {
        self.pipeline.as_ref()
    }

    pub fn is_usable(&self) -> bool {
        self.pipeline.is_some()
    }

    pub fn scene_layout(&self) -> &wgpu::BindGroupLayout {
        &self.scene_layout
    }

    pub fn texture_layout(&self) -> &wgpu::BindGroupLayout {
        &self.texture_layout
    }

    fn create_scene_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
            label: Some("scene_bind_group_layout"),
        })
    }

    fn create_texture_layout(device: &wgpu::Device, unit: TextureUnit) -> wgpu::BindGroupLayout {
        device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: unit.index(),
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Texture {
                    sample_type: wgpu::TextureSampleType::Float { filterable: true },
                    view_dimension: wgpu::TextureViewDimension::D2,
                    multisampled: false,
                },
                count: None,
            }],
            label: Some("texture_bind_group_layout"),
        })
    }

    fn create_pipeline(
        device: &wgpu::Device,
        source: &str,
        surface_format: wgpu::TextureFormat,
        scene_layout: &wgpu::BindGroupLayout,
        texture_layout: &wgpu::BindGroupLayout,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Spacetime Shader"),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Spacetime Pipeline Layout"),
            bind_group_layouts: &[scene_layout, texture_layout],
            push_constant_ranges: &[],
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Spacetime Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_program_validates() {
        let module = naga::front::wgsl::parse_str(DEFAULT_SOURCE).expect("WGSL parses");
        naga::valid::Validator::new(
            naga::valid::ValidationFlags::all(),
            naga::valid::Capabilities::default(),
        )
        .validate(&module)
        .expect("WGSL validates");
    }

    #[test]
    fn embedded_program_declares_contract() {
        for field in [
            "camera_origin",
            "camera_forward",
            "camera_right",
            "camera_up",
            "camera_velocity",
            "window_width",
            "window_height",
            "textures",
        ] {
            assert!(DEFAULT_SOURCE.contains(field), "missing {}", field);
        }
        assert!(DEFAULT_SOURCE.contains("@group(1) @binding(2) var texture2"));
    }
}
