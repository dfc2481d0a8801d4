use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Context, Result};
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::PerspectiveCamera;
use crate::config::ViewerConfig;
use crate::math::srgb_to_linear_rgb;
use crate::overlay::OverlayFrame;
use crate::scene::{ObjectId, Scene, VisualObject};
use crate::traits::{SceneRenderer, WindowDimensions};
use crate::types::{GlobalsUniform, MeshVertex, ObjectUniform};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Instanced quad corners per point
const POINT_QUAD_VERTICES: u32 = 6;

const MESH_ATTRIBUTES: [wgpu::VertexAttribute; 2] =
    wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];
const POINT_POSITION_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![0 => Float32x3];
const POINT_COLOR_ATTRIBUTES: [wgpu::VertexAttribute; 1] =
    wgpu::vertex_attr_array![1 => Float32x3];

enum GpuGeometry {
    Mesh {
        vertex_buffer: wgpu::Buffer,
        vertex_count: u32,
        index_buffer: Option<(wgpu::Buffer, u32)>,
    },
    Points {
        position_buffer: wgpu::Buffer,
        color_buffer: wgpu::Buffer,
        color_version: u64,
        count: u32,
    },
}

/// GPU resources of one scene object, alive while the object is attached
struct GpuObject {
    uniform_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    geometry: GpuGeometry,
}

pub struct Renderer {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    size: WindowDimensions,
    sample_count: u32,
    clear_color: wgpu::Color,
    ambient: f32,
    depth_view: wgpu::TextureView,
    msaa_view: Option<wgpu::TextureView>,
    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,
    object_layout: wgpu::BindGroupLayout,
    mesh_pipeline: wgpu::RenderPipeline,
    points_pipeline: wgpu::RenderPipeline,
    objects: HashMap<ObjectId, GpuObject>,
    egui_renderer: egui_wgpu::Renderer,
    overlay: Option<OverlayFrame>,
}

impl Renderer {
    pub async fn new(window: Arc<Window>, config: &ViewerConfig) -> Result<Self> {
        let size = WindowDimensions::from(window.inner_size());

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create window surface")?;
        let adapter = Self::request_adapter(&instance, &surface).await?;
        let (device, queue) = Self::request_device(&adapter).await?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size)?;
        surface.configure(&device, &surface_config);

        let sample_count = config.msaa_samples.max(1);
        let depth_view = create_depth_texture(&device, &surface_config, sample_count);
        let msaa_view = create_msaa_texture(&device, &surface_config, sample_count);

        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Globals Buffer"),
            size: std::mem::size_of::<GlobalsUniform>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let globals_layout = uniform_layout(&device, "globals_bind_group_layout");
        let object_layout = uniform_layout(&device, "object_bind_group_layout");

        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &globals_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
            label: Some("globals_bind_group"),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Scene Pipeline Layout"),
            bind_group_layouts: &[&globals_layout, &object_layout],
            push_constant_ranges: &[],
        });

        let mesh_pipeline = Self::create_mesh_pipeline(
            &device,
            &pipeline_layout,
            surface_config.format,
            sample_count,
        );
        let points_pipeline = Self::create_points_pipeline(
            &device,
            &pipeline_layout,
            surface_config.format,
            sample_count,
        );

        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        // clear values are written to the sRGB surface as linear
        let [r, g, b] = srgb_to_linear_rgb(config.clear_color);

        log::info!(
            "Renderer initialized: {}x{} {:?}, {}x MSAA",
            size.width,
            size.height,
            surface_config.format,
            sample_count
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            size,
            sample_count,
            clear_color: wgpu::Color {
                r: r as f64,
                g: g as f64,
                b: b as f64,
                a: 1.0,
            },
            ambient: config.light.ambient,
            depth_view,
            msaa_view,
            globals_buffer,
            globals_bind_group,
            object_layout,
            mesh_pipeline,
            points_pipeline,
            objects: HashMap::new(),
            egui_renderer,
            overlay: None,
        })
    }

    async fn request_adapter(
        instance: &wgpu::Instance,
        surface: &wgpu::Surface<'_>,
    ) -> Result<wgpu::Adapter> {
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(surface),
                force_fallback_adapter: false,
            })
            .await
            .context("Failed to find appropriate adapter")?;
        log::info!("Using adapter: {}", adapter.get_info().name);
        Ok(adapter)
    }

    async fn request_device(adapter: &wgpu::Adapter) -> Result<(wgpu::Device, wgpu::Queue)> {
        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .context("Failed to create device")
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: WindowDimensions,
    ) -> Result<wgpu::SurfaceConfiguration> {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .context("Surface reports no supported formats")?;

        Ok(wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        })
    }

    fn create_mesh_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Mesh Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("mesh.wgsl").into()),
        });

        let buffers = [wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<MeshVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &MESH_ATTRIBUTES,
        }];

        create_scene_pipeline(
            device,
            "Mesh Pipeline",
            layout,
            &shader,
            &buffers,
            format,
            sample_count,
            Some(wgpu::Face::Back),
        )
    }

    fn create_points_pipeline(
        device: &wgpu::Device,
        layout: &wgpu::PipelineLayout,
        format: wgpu::TextureFormat,
        sample_count: u32,
    ) -> wgpu::RenderPipeline {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Points Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("points.wgsl").into()),
        });

        let stride = std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress;
        let buffers = [
            wgpu::VertexBufferLayout {
                array_stride: stride,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POINT_POSITION_ATTRIBUTES,
            },
            wgpu::VertexBufferLayout {
                array_stride: stride,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &POINT_COLOR_ATTRIBUTES,
            },
        ];

        create_scene_pipeline(
            device,
            "Points Pipeline",
            layout,
            &shader,
            &buffers,
            format,
            sample_count,
            None,
        )
    }

    /// Hands the next overlay frame to the renderer; drawn on the next `render`.
    /// Texture updates of a frame that was never drawn carry over.
    pub fn submit_overlay(&mut self, mut frame: OverlayFrame) {
        if let Some(pending) = self.overlay.take() {
            frame.absorb(pending);
        }
        self.overlay = Some(frame);
    }

    fn write_globals(&self, scene: &Scene, camera: &PerspectiveCamera) {
        let (light_direction, light_color, light_intensity) = scene
            .lights()
            .next()
            .map(|light| (light.direction().to_array(), light.color, light.intensity))
            .unwrap_or(([0.0, 1.0, 0.0], [1.0; 3], 0.0));

        let globals = GlobalsUniform {
            view: camera.view_matrix().to_cols_array_2d(),
            projection: camera.projection_matrix().to_cols_array_2d(),
            light_direction,
            light_intensity,
            light_color,
            ambient: self.ambient,
        };
        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::cast_slice(&[globals]));
    }

    /// Brings the GPU cache in line with the scene: drops detached objects,
    /// uploads new ones, refreshes transforms and dirty color buffers.
    fn sync_objects(&mut self, scene: &Scene) {
        self.objects.retain(|id, _| {
            let keep = scene.contains(*id);
            if !keep {
                log::debug!("Releasing GPU resources for {:?}", id);
            }
            keep
        });

        for (id, object) in scene.objects() {
            if !self.objects.contains_key(&id) {
                let gpu_object = self.upload_object(object);
                log::debug!("Uploaded GPU resources for {:?}", id);
                self.objects.insert(id, gpu_object);
            }

            let Some(gpu_object) = self.objects.get_mut(&id) else {
                continue;
            };

            let uniform = object_uniform(object);
            self.queue
                .write_buffer(&gpu_object.uniform_buffer, 0, bytemuck::cast_slice(&[uniform]));

            if let (
                VisualObject::Points(points),
                GpuGeometry::Points {
                    color_buffer,
                    color_version,
                    ..
                },
            ) = (object, &mut gpu_object.geometry)
            {
                let colors = &points.geometry.colors;
                if colors.version() != *color_version {
                    self.queue
                        .write_buffer(color_buffer, 0, bytemuck::cast_slice(colors.as_slice()));
                    *color_version = colors.version();
                }
            }
        }
    }

    fn upload_object(&self, object: &VisualObject) -> GpuObject {
        let uniform_buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Object Uniform Buffer"),
            contents: bytemuck::cast_slice(&[object_uniform(object)]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group = self.device.create_bind_group(&wgpu::BindGroupDescriptor {
            layout: &self.object_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
            label: Some("object_bind_group"),
        });

        let geometry = match object {
            VisualObject::Mesh(mesh) => {
                let vertices = mesh.geometry.vertices();
                let vertex_buffer =
                    self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Mesh Vertex Buffer"),
                        contents: bytemuck::cast_slice(&vertices),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                let index_buffer = mesh.geometry.indices().map(|indices| {
                    let buffer = self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Mesh Index Buffer"),
                        contents: bytemuck::cast_slice(indices),
                        usage: wgpu::BufferUsages::INDEX,
                    });
                    (buffer, indices.len() as u32)
                });
                GpuGeometry::Mesh {
                    vertex_buffer,
                    vertex_count: vertices.len() as u32,
                    index_buffer,
                }
            }
            VisualObject::Points(points) => {
                let position_buffer =
                    self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Point Position Buffer"),
                        contents: bytemuck::cast_slice(points.geometry.positions()),
                        usage: wgpu::BufferUsages::VERTEX,
                    });
                let color_buffer =
                    self.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                        label: Some("Point Color Buffer"),
                        contents: bytemuck::cast_slice(points.geometry.colors.as_slice()),
                        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
                    });
                GpuGeometry::Points {
                    position_buffer,
                    color_buffer,
                    color_version: points.geometry.colors.version(),
                    count: points.geometry.len() as u32,
                }
            }
        };

        GpuObject {
            uniform_buffer,
            bind_group,
            geometry,
        }
    }

    fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.surface_config);
        self.depth_view = create_depth_texture(&self.device, &self.surface_config, self.sample_count);
        self.msaa_view = create_msaa_texture(&self.device, &self.surface_config, self.sample_count);
    }

    fn draw_scene(&self, encoder: &mut wgpu::CommandEncoder, view: &wgpu::TextureView) {
        let (target, resolve_target) = match &self.msaa_view {
            Some(msaa_view) => (msaa_view, Some(view)),
            None => (view, None),
        };

        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(self.clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth_view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Discard,
                }),
                stencil_ops: None,
            }),
            occlusion_query_set: None,
            timestamp_writes: None,
        });

        render_pass.set_bind_group(0, &self.globals_bind_group, &[]);

        for gpu_object in self.objects.values() {
            render_pass.set_bind_group(1, &gpu_object.bind_group, &[]);
            match &gpu_object.geometry {
                GpuGeometry::Mesh {
                    vertex_buffer,
                    vertex_count,
                    index_buffer,
                } => {
                    if *vertex_count == 0 {
                        continue;
                    }
                    render_pass.set_pipeline(&self.mesh_pipeline);
                    render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                    match index_buffer {
                        Some((buffer, index_count)) => {
                            render_pass.set_index_buffer(buffer.slice(..), wgpu::IndexFormat::Uint32);
                            render_pass.draw_indexed(0..*index_count, 0, 0..1);
                        }
                        None => render_pass.draw(0..*vertex_count, 0..1),
                    }
                }
                GpuGeometry::Points {
                    position_buffer,
                    color_buffer,
                    count,
                    ..
                } => {
                    if *count == 0 {
                        continue;
                    }
                    render_pass.set_pipeline(&self.points_pipeline);
                    render_pass.set_vertex_buffer(0, position_buffer.slice(..));
                    render_pass.set_vertex_buffer(1, color_buffer.slice(..));
                    render_pass.draw(0..POINT_QUAD_VERTICES, 0..*count);
                }
            }
        }
    }

    fn draw_overlay(
        &mut self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) -> Vec<wgpu::CommandBuffer> {
        let Some(frame) = self.overlay.take() else {
            return Vec::new();
        };

        for (id, image_delta) in &frame.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: frame.pixels_per_point,
        };

        let command_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            encoder,
            &frame.primitives,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &frame.primitives, &screen_descriptor);
        }

        for id in &frame.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        command_buffers
    }
}

impl SceneRenderer for Renderer {
    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<()> {
        if self.size.is_empty() {
            return Ok(());
        }

        self.write_globals(scene, camera);
        self.sync_objects(scene);

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.reconfigure();
                return Ok(());
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                anyhow::bail!("Surface out of memory");
            }
            Err(e) => {
                log::warn!("Skipping frame: {}", e);
                return Ok(());
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Encoder"),
            });

        self.draw_scene(&mut encoder, &view);
        let overlay_commands = self.draw_overlay(&mut encoder, &view);

        self.queue
            .submit(overlay_commands.into_iter().chain(std::iter::once(encoder.finish())));
        output.present();

        Ok(())
    }

    fn resize(&mut self, dimensions: WindowDimensions) {
        if dimensions.is_empty() {
            return;
        }
        self.size = dimensions;
        self.surface_config.width = dimensions.width;
        self.surface_config.height = dimensions.height;
        self.reconfigure();
    }

    fn dimensions(&self) -> WindowDimensions {
        self.size
    }
}

fn object_uniform(object: &VisualObject) -> ObjectUniform {
    let (color, point_size) = match object {
        VisualObject::Mesh(mesh) => (mesh.material.color, 0.0),
        VisualObject::Points(points) => ([1.0; 3], points.material.size),
    };
    ObjectUniform {
        model: object.transform().matrix().to_cols_array_2d(),
        color,
        point_size,
    }
}

fn uniform_layout(device: &wgpu::Device, label: &str) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
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
        label: Some(label),
    })
}

#[allow(clippy::too_many_arguments)]
fn create_scene_pipeline(
    device: &wgpu::Device,
    label: &str,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    buffers: &[wgpu::VertexBufferLayout],
    format: wgpu::TextureFormat,
    sample_count: u32,
    cull_mode: Option<wgpu::Face>,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some(label),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers,
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(wgpu::BlendState::REPLACE),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            strip_index_format: None,
            front_face: wgpu::FrontFace::Ccw,
            cull_mode,
            polygon_mode: wgpu::PolygonMode::Fill,
            unclipped_depth: false,
            conservative: false,
        },
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: true,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState {
            count: sample_count,
            mask: !0,
            alpha_to_coverage_enabled: false,
        },
        multiview: None,
        cache: None,
    })
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    sample_count: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Multisampled color target, resolved into the surface texture
fn create_msaa_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
    sample_count: u32,
) -> Option<wgpu::TextureView> {
    if sample_count <= 1 {
        return None;
    }
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("MSAA Texture"),
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
