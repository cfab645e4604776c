mod camera;

use std::sync::Arc;

use glam::Vec3;
use wgpu::util::DeviceExt;
use winit::window::Window;

pub use camera::{Camera, OrbitControls, Projection, RenderTarget, Viewport};

use crate::animation::SceneState;
use crate::error::GpuError;
use crate::scene::Scene;
use crate::shader::{FrameUniforms, ObjectUniforms, PointVertex, POINTS_SHADER, VERTICES_PER_POINT};

const MSAA_SAMPLES: u32 = 4;

/// GPU resources for one scene object.
struct PointBatch {
    /// Index into `Scene::objects`.
    object_index: usize,
    vertex_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    num_points: u32,
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    batches: Vec<PointBatch>,
    sample_count: u32,
    msaa_view: Option<wgpu::TextureView>,
    clear_color: wgpu::Color,
    fog_color: Vec3,
    fog_density: f32,
}

impl Renderer {
    /// Acquire a GPU for `window` and upload every point set in `scene`.
    pub async fn new(
        window: Arc<Window>,
        scene: &Scene,
        target: RenderTarget,
        antialias: bool,
    ) -> Result<Self, GpuError> {
        let (width, height) = target.physical_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window)?;

        let adapter = match instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
        {
            Some(adapter) => adapter,
            None => {
                tracing::warn!("No hardware GPU adapter found, trying software fallback");
                instance
                    .request_adapter(&wgpu::RequestAdapterOptions {
                        power_preference: wgpu::PowerPreference::LowPower,
                        compatible_surface: Some(&surface),
                        force_fallback_adapter: true,
                    })
                    .await
                    .ok_or(GpuError::NoAdapter)?
            }
        };

        let info = adapter.get_info();
        tracing::info!(
            "GPU adapter: {} ({:?}, {:?})",
            info.name,
            info.device_type,
            info.backend
        );

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("starsphere device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::UnsupportedSurface)?;
        tracing::info!("Surface format: {format:?}");

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::AutoVsync,
            desired_maximum_frame_latency: 2,
            alpha_mode: wgpu::CompositeAlphaMode::Auto,
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let sample_count = if antialias
            && adapter
                .get_texture_format_features(format)
                .flags
                .sample_count_supported(MSAA_SAMPLES)
        {
            MSAA_SAMPLES
        } else {
            if antialias {
                tracing::warn!("{MSAA_SAMPLES}x MSAA unsupported for {format:?}, antialiasing off");
            }
            1
        };
        let msaa_view = create_msaa_view(&device, &config, sample_count);

        let fog_color = scene.background.to_linear();
        let frame_uniforms = FrameUniforms::new(
            glam::Mat4::IDENTITY,
            (width, height),
            scene.fog_density,
            fog_color,
        );
        let frame_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&frame_uniforms),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let frame_layout = uniform_layout(&device, "Frame Bind Group Layout");
        let object_layout = uniform_layout(&device, "Object Bind Group Layout");

        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame Bind Group"),
            layout: &frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        let state = SceneState::new();
        let mut batches = Vec::with_capacity(scene.objects.len());
        for (object_index, object) in scene.objects.iter().enumerate() {
            if object.points.is_empty() {
                continue;
            }
            let label = object.kind.label();
            let vertices = PointVertex::from_point_set(&object.points);
            let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} points")),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

            let uniforms = ObjectUniforms::new(object.model_matrix(&state), &object.material);
            let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{label} uniforms")),
                contents: bytemuck::bytes_of(&uniforms),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
            let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{label} bind group")),
                layout: &object_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniform_buffer.as_entire_binding(),
                }],
            });

            batches.push(PointBatch {
                object_index,
                vertex_buffer,
                uniform_buffer,
                bind_group,
                num_points: vertices.len() as u32,
            });
        }

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Points Shader"),
            source: wgpu::ShaderSource::Wgsl(POINTS_SHADER.into()),
        });
        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Points Pipeline Layout"),
            bind_group_layouts: &[&frame_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let pipeline =
            create_points_pipeline(&device, &pipeline_layout, &shader, format, sample_count);

        let clear = scene.background.to_linear();
        tracing::info!(
            "Uploaded {} point sets ({} points), {}x{} @ {}x MSAA",
            batches.len(),
            scene.total_points(),
            width,
            height,
            sample_count
        );

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            frame_buffer,
            frame_bind_group,
            batches,
            sample_count,
            msaa_view,
            clear_color: wgpu::Color {
                r: clear.x as f64,
                g: clear.y as f64,
                b: clear.z as f64,
                a: 1.0,
            },
            fog_color,
            fog_density: scene.fog_density,
        })
    }

    /// Match the drawing buffer to a new render target.
    pub fn resize(&mut self, target: RenderTarget) {
        let (width, height) = target.physical_size();
        if width == self.config.width && height == self.config.height {
            return;
        }
        tracing::debug!(
            "Resizing surface to {}x{} (pixel ratio {})",
            width,
            height,
            target.pixel_ratio
        );
        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reconfigure the surface at its current size, e.g. after it was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.msaa_view = create_msaa_view(&self.device, &self.config, self.sample_count);
    }

    fn update_uniforms(&self, scene: &Scene, state: &SceneState, camera: &Camera) {
        let frame = FrameUniforms::new(
            camera.view_proj(),
            (self.config.width, self.config.height),
            self.fog_density,
            self.fog_color,
        );
        self.queue
            .write_buffer(&self.frame_buffer, 0, bytemuck::bytes_of(&frame));

        for batch in &self.batches {
            let object = &scene.objects[batch.object_index];
            let uniforms = ObjectUniforms::new(object.model_matrix(state), &object.material);
            self.queue
                .write_buffer(&batch.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
        }
    }

    /// Draw one frame.
    pub fn render(
        &mut self,
        scene: &Scene,
        state: &SceneState,
        camera: &Camera,
    ) -> Result<(), wgpu::SurfaceError> {
        self.update_uniforms(scene, state, camera);

        let output = self.surface.get_current_texture()?;
        let surface_view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let (view, resolve_target, store) = match &self.msaa_view {
            Some(msaa) => (msaa, Some(&surface_view), wgpu::StoreOp::Discard),
            None => (&surface_view, None, wgpu::StoreOp::Store),
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Points Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.frame_bind_group, &[]);

            for batch in &self.batches {
                render_pass.set_bind_group(1, &batch.bind_group, &[]);
                render_pass.set_vertex_buffer(0, batch.vertex_buffer.slice(..));
                render_pass.draw(0..VERTICES_PER_POINT, 0..batch.num_points);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}

/// A single uniform buffer at binding 0, visible to both shader stages.
fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(label),
        entries: &[wgpu::BindGroupLayoutEntry {
            binding: 0,
            visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Uniform,
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }],
    })
}

/// Transparent points: alpha blended, no depth writes, no depth test.
fn create_points_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    sample_count: u32,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Points Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[PointVertex::layout()],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::ALPHA_BLENDING),
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
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

fn create_msaa_view(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    sample_count: u32,
) -> Option<wgpu::TextureView> {
    if sample_count <= 1 {
        return None;
    }
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("MSAA Color Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: config.format,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    Some(texture.create_view(&wgpu::TextureViewDescriptor::default()))
}
