//! WebGPU state and render passes for the reef scene.
//!
//! Static geometry (floor grid, merged coral mesh, sand maps) is uploaded
//! once at init; per-frame data is one uniform write plus small sprite
//! instance buffers.

use glam::{Mat4, Vec3};
use reef_core::constants::BACKGROUND_COLOR;
use reef_core::floor::{FloorGrid, PixelMap};
use reef_core::lighting::{RAY_COUNT, RAY_HEIGHT};
use web_sys as web;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Globals {
    pub view_proj: [[f32; 4]; 4],
    pub camera_pos: [f32; 4],
    pub camera_right: [f32; 4],
    pub camera_up: [f32; 4],
    pub sun_dir: [f32; 4],
    pub sun_color: [f32; 4],
    pub ambient_color: [f32; 4],
    pub fog_color: [f32; 4],
    pub fog_range: [f32; 4],
    pub time: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FloorVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SpriteInstance {
    pub center: [f32; 3],
    pub scale: f32,
    pub color: [f32; 3],
    pub opacity: f32,
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct RayInstance {
    pub center: [f32; 3],
    pub width: f32,
}

/// Static geometry handed to the GPU at init.
pub struct SceneGeometry {
    pub floor: FloorGrid,
    pub coral_vertices: Vec<SceneVertex>,
    pub coral_indices: Vec<u32>,
    pub sand_color: PixelMap,
    pub sand_normal: PixelMap,
    pub sand_roughness: PixelMap,
}

/// Per-frame render input.
pub struct FrameInput<'f> {
    pub globals: Globals,
    /// Ground-effect bubbles and dust plus ambient bubbles; alpha blended.
    pub alpha_sprites: &'f [SpriteInstance],
    /// Drift particles; additive.
    pub additive_sprites: &'f [SpriteInstance],
    pub rays: &'f [RayInstance],
}

// Instance buffer capacities. Ground effects: 5 sections x (2 bubbles + 5
// dust) plus 30 ambient bubbles.
const ALPHA_SPRITE_CAP: usize = 5 * 7 + 30;
const ADDITIVE_SPRITE_CAP: usize = 120;

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

pub struct GpuState<'a> {
    surface: wgpu::Surface<'a>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,

    depth_view: wgpu::TextureView,

    globals_buffer: wgpu::Buffer,
    globals_bind_group: wgpu::BindGroup,

    floor_pipeline: wgpu::RenderPipeline,
    floor_vbuf: wgpu::Buffer,
    floor_ibuf: wgpu::Buffer,
    floor_index_count: u32,
    sand_bind_group: wgpu::BindGroup,

    coral_pipeline: wgpu::RenderPipeline,
    coral_vbuf: wgpu::Buffer,
    coral_ibuf: wgpu::Buffer,
    coral_index_count: u32,

    sprite_alpha_pipeline: wgpu::RenderPipeline,
    sprite_additive_pipeline: wgpu::RenderPipeline,
    quad_vbuf: wgpu::Buffer,
    quad_ibuf: wgpu::Buffer,
    alpha_instances: wgpu::Buffer,
    additive_instances: wgpu::Buffer,

    ray_pipeline: wgpu::RenderPipeline,
    ray_vbuf: wgpu::Buffer,
    ray_ibuf: wgpu::Buffer,
    ray_instances: wgpu::Buffer,

    width: u32,
    height: u32,
    clear_color: wgpu::Color,
}

fn create_depth_view(device: &wgpu::Device, width: u32, height: u32) -> wgpu::TextureView {
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("depth"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

fn upload_pixel_map(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    map: &PixelMap,
    label: &str,
    srgb: bool,
) -> wgpu::TextureView {
    let format = if srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };
    let size = wgpu::Extent3d {
        width: map.size,
        height: map.size,
        depth_or_array_layers: 1,
    };
    let tex = device.create_texture(&wgpu::TextureDescriptor {
        label: Some(label),
        size,
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        &map.data,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(map.size * 4),
            rows_per_image: Some(map.size),
        },
        size,
    );
    tex.create_view(&wgpu::TextureViewDescriptor::default())
}

impl<'a> GpuState<'a> {
    pub async fn new(
        canvas: &'a web::HtmlCanvasElement,
        scene: &SceneGeometry,
    ) -> anyhow::Result<Self> {
        let width = canvas.width();
        let height = canvas.height();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("No WebGPU adapter"))?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::Performance,
                    label: None,
                },
                None,
            )
            .await
            .map_err(|e| anyhow::anyhow!(format!("request_device error: {:?}", e)))?;
        let caps = surface.get_capabilities(&adapter);
        let format = caps
            .formats
            .iter()
            .copied()
            .find(|f| {
                matches!(
                    f,
                    wgpu::TextureFormat::Bgra8UnormSrgb | wgpu::TextureFormat::Rgba8UnormSrgb
                )
            })
            .unwrap_or(caps.formats[0]);
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_view = create_depth_view(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("reef_shader"),
            source: wgpu::ShaderSource::Wgsl(reef_core::REEF_WGSL.into()),
        });

        // group 0: globals, shared by every pipeline
        let globals_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("globals_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });
        let globals_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("globals"),
            size: std::mem::size_of::<Globals>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let globals_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("globals_bg"),
            layout: &globals_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        // group 1: baked sand maps
        let tex_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                multisampled: false,
                view_dimension: wgpu::TextureViewDimension::D2,
                sample_type: wgpu::TextureSampleType::Float { filterable: true },
            },
            count: None,
        };
        let sand_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("sand_bgl"),
            entries: &[
                tex_entry(0),
                tex_entry(1),
                tex_entry(2),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });
        let sand_sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("sand_sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::Repeat,
            address_mode_w: wgpu::AddressMode::Repeat,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let color_view = upload_pixel_map(&device, &queue, &scene.sand_color, "sand_color", true);
        let normal_view =
            upload_pixel_map(&device, &queue, &scene.sand_normal, "sand_normal", false);
        let rough_view = upload_pixel_map(
            &device,
            &queue,
            &scene.sand_roughness,
            "sand_roughness",
            false,
        );
        let sand_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("sand_bg"),
            layout: &sand_bgl,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&color_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&normal_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&rough_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::Sampler(&sand_sampler),
                },
            ],
        });

        // vertex layouts
        let floor_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<FloorVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
        };
        let coral_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SceneVertex>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x3],
        };
        let quad_layout = wgpu::VertexBufferLayout {
            array_stride: 8,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &wgpu::vertex_attr_array![0 => Float32x2],
        };
        let sprite_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<SpriteInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![
                1 => Float32x3, 2 => Float32, 3 => Float32x3, 4 => Float32
            ],
        };
        let ray_instance_layout = wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<RayInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &wgpu::vertex_attr_array![2 => Float32x3, 3 => Float32],
        };

        let additive_blend = wgpu::BlendState {
            color: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::SrcAlpha,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
            alpha: wgpu::BlendComponent {
                src_factor: wgpu::BlendFactor::One,
                dst_factor: wgpu::BlendFactor::One,
                operation: wgpu::BlendOperation::Add,
            },
        };

        let make_pipeline = |label: &str,
                             vs: &str,
                             fs: &str,
                             buffers: &[wgpu::VertexBufferLayout],
                             bgls: &[&wgpu::BindGroupLayout],
                             blend: Option<wgpu::BlendState>,
                             depth_write: bool| {
            let pl = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some(&format!("{label}_pl")),
                bind_group_layouts: bgls,
                push_constant_ranges: &[],
            });
            device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(&pl),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some(vs),
                    buffers,
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                },
                primitive: wgpu::PrimitiveState::default(),
                depth_stencil: Some(wgpu::DepthStencilState {
                    format: DEPTH_FORMAT,
                    depth_write_enabled: depth_write,
                    depth_compare: wgpu::CompareFunction::Less,
                    stencil: wgpu::StencilState::default(),
                    bias: wgpu::DepthBiasState::default(),
                }),
                multisample: wgpu::MultisampleState::default(),
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some(fs),
                    targets: &[Some(wgpu::ColorTargetState {
                        format,
                        blend,
                        write_mask: wgpu::ColorWrites::ALL,
                    })],
                    compilation_options: wgpu::PipelineCompilationOptions::default(),
                }),
                cache: None,
                multiview: None,
            })
        };

        let floor_pipeline = make_pipeline(
            "floor_pipeline",
            "floor_vs",
            "floor_fs",
            &[floor_layout],
            &[&globals_bgl, &sand_bgl],
            None,
            true,
        );
        let coral_pipeline = make_pipeline(
            "coral_pipeline",
            "coral_vs",
            "coral_fs",
            &[coral_layout],
            &[&globals_bgl],
            None,
            true,
        );
        let sprite_alpha_pipeline = make_pipeline(
            "sprite_alpha_pipeline",
            "sprite_vs",
            "sprite_fs",
            &[quad_layout.clone(), sprite_instance_layout.clone()],
            &[&globals_bgl],
            Some(wgpu::BlendState::ALPHA_BLENDING),
            false,
        );
        let sprite_additive_pipeline = make_pipeline(
            "sprite_additive_pipeline",
            "sprite_vs",
            "sprite_fs",
            &[quad_layout, sprite_instance_layout],
            &[&globals_bgl],
            Some(additive_blend),
            false,
        );
        let ray_pipeline = make_pipeline(
            "ray_pipeline",
            "ray_vs",
            "ray_fs",
            &[
                wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<FloorVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2],
                },
                ray_instance_layout,
            ],
            &[&globals_bgl],
            Some(additive_blend),
            false,
        );

        // static geometry uploads
        let floor_verts: Vec<FloorVertex> = scene
            .floor
            .positions
            .iter()
            .zip(&scene.floor.uvs)
            .map(|(p, uv)| FloorVertex {
                position: p.to_array(),
                uv: uv.to_array(),
            })
            .collect();
        let floor_vbuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_vbuf"),
            contents: bytemuck::cast_slice(&floor_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let floor_ibuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("floor_ibuf"),
            contents: bytemuck::cast_slice(&scene.floor.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let coral_vbuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("coral_vbuf"),
            contents: bytemuck::cast_slice(&scene.coral_vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let coral_ibuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("coral_ibuf"),
            contents: bytemuck::cast_slice(&scene.coral_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let quad_corners: [[f32; 2]; 4] = [[-0.5, -0.5], [0.5, -0.5], [0.5, 0.5], [-0.5, 0.5]];
        let quad_indices: [u16; 6] = [0, 1, 2, 0, 2, 3];
        let quad_vbuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_vbuf"),
            contents: bytemuck::cast_slice(&quad_corners),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let quad_ibuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad_ibuf"),
            contents: bytemuck::cast_slice(&quad_indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        let alpha_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("alpha_sprite_instances"),
            size: (ALPHA_SPRITE_CAP * std::mem::size_of::<SpriteInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let additive_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("additive_sprite_instances"),
            size: (ADDITIVE_SPRITE_CAP * std::mem::size_of::<SpriteInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let h = RAY_HEIGHT / 2.0;
        let ray_verts: [FloorVertex; 4] = [
            FloorVertex { position: [-0.5, -h, 0.0], uv: [0.0, 0.0] },
            FloorVertex { position: [0.5, -h, 0.0], uv: [1.0, 0.0] },
            FloorVertex { position: [0.5, h, 0.0], uv: [1.0, 1.0] },
            FloorVertex { position: [-0.5, h, 0.0], uv: [0.0, 1.0] },
        ];
        let ray_vbuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ray_vbuf"),
            contents: bytemuck::cast_slice(&ray_verts),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let ray_ibuf = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("ray_ibuf"),
            contents: bytemuck::cast_slice(&quad_indices),
            usage: wgpu::BufferUsages::INDEX,
        });
        let ray_instances = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("ray_instances"),
            size: (RAY_COUNT * std::mem::size_of::<RayInstance>()) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let [r, g, b] = BACKGROUND_COLOR;
        let clear_color = wgpu::Color {
            r: r as f64,
            g: g as f64,
            b: b as f64,
            a: 1.0,
        };

        Ok(Self {
            surface,
            device,
            queue,
            config,
            depth_view,
            globals_buffer,
            globals_bind_group,
            floor_pipeline,
            floor_vbuf,
            floor_ibuf,
            floor_index_count: scene.floor.indices.len() as u32,
            sand_bind_group,
            coral_pipeline,
            coral_vbuf,
            coral_ibuf,
            coral_index_count: scene.coral_indices.len() as u32,
            sprite_alpha_pipeline,
            sprite_additive_pipeline,
            quad_vbuf,
            quad_ibuf,
            alpha_instances,
            additive_instances,
            ray_pipeline,
            ray_vbuf,
            ray_ibuf,
            ray_instances,
            width,
            height,
            clear_color,
        })
    }

    pub fn resize_if_needed(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        if width != self.width || height != self.height {
            self.width = width;
            self.height = height;
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_view = create_depth_view(&self.device, width, height);
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }

    pub fn render(&mut self, input: &FrameInput) -> Result<(), wgpu::SurfaceError> {
        let frame = self.surface.get_current_texture()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue
            .write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&input.globals));
        let alpha_count = input.alpha_sprites.len().min(ALPHA_SPRITE_CAP);
        let additive_count = input.additive_sprites.len().min(ADDITIVE_SPRITE_CAP);
        let ray_count = input.rays.len().min(RAY_COUNT);
        if alpha_count > 0 {
            self.queue.write_buffer(
                &self.alpha_instances,
                0,
                bytemuck::cast_slice(&input.alpha_sprites[..alpha_count]),
            );
        }
        if additive_count > 0 {
            self.queue.write_buffer(
                &self.additive_instances,
                0,
                bytemuck::cast_slice(&input.additive_sprites[..additive_count]),
            );
        }
        if ray_count > 0 {
            self.queue.write_buffer(
                &self.ray_instances,
                0,
                bytemuck::cast_slice(&input.rays[..ray_count]),
            );
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("encoder"),
            });
        {
            let mut rpass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("scene_pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            rpass.set_pipeline(&self.floor_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_bind_group(1, &self.sand_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.floor_vbuf.slice(..));
            rpass.set_index_buffer(self.floor_ibuf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.floor_index_count, 0, 0..1);

            rpass.set_pipeline(&self.coral_pipeline);
            rpass.set_bind_group(0, &self.globals_bind_group, &[]);
            rpass.set_vertex_buffer(0, self.coral_vbuf.slice(..));
            rpass.set_index_buffer(self.coral_ibuf.slice(..), wgpu::IndexFormat::Uint32);
            rpass.draw_indexed(0..self.coral_index_count, 0, 0..1);

            // translucent layers after the opaque scene
            if ray_count > 0 {
                rpass.set_pipeline(&self.ray_pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.ray_vbuf.slice(..));
                rpass.set_vertex_buffer(1, self.ray_instances.slice(..));
                rpass.set_index_buffer(self.ray_ibuf.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..6, 0, 0..ray_count as u32);
            }
            if alpha_count > 0 {
                rpass.set_pipeline(&self.sprite_alpha_pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vbuf.slice(..));
                rpass.set_vertex_buffer(1, self.alpha_instances.slice(..));
                rpass.set_index_buffer(self.quad_ibuf.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..6, 0, 0..alpha_count as u32);
            }
            if additive_count > 0 {
                rpass.set_pipeline(&self.sprite_additive_pipeline);
                rpass.set_bind_group(0, &self.globals_bind_group, &[]);
                rpass.set_vertex_buffer(0, self.quad_vbuf.slice(..));
                rpass.set_vertex_buffer(1, self.additive_instances.slice(..));
                rpass.set_index_buffer(self.quad_ibuf.slice(..), wgpu::IndexFormat::Uint16);
                rpass.draw_indexed(0..6, 0, 0..additive_count as u32);
            }
        }

        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

/// Build the frame globals from the camera and timing state. The lighting
/// rig follows the camera, so the sun direction and the accent fill sway a
/// little from frame to frame.
pub fn build_globals(view: Mat4, proj: Mat4, eye: Vec3, time: f32) -> Globals {
    use reef_core::constants::{FOG_COLOR, FOG_FAR, FOG_NEAR};
    use reef_core::lighting::{self, ACCENT_BASE_INTENSITY, AMBIENT_INTENSITY, SUN_INTENSITY};

    let inv_view = view.inverse();
    let right = inv_view.x_axis.truncate().normalize();
    let up = inv_view.y_axis.truncate().normalize();
    let rig = lighting::lighting_state(time, eye.z);
    let sun = rig.sun_direction();
    // accent sway modulates the ambient fill around its resting level
    let fill = rig.accent_intensity / ACCENT_BASE_INTENSITY;
    let [sr, sg, sb] = lighting::SUN_COLOR;
    let [ar, ag, ab] = lighting::AMBIENT_COLOR;
    let [fr, fg, fb] = FOG_COLOR;

    Globals {
        view_proj: (proj * view).to_cols_array_2d(),
        camera_pos: [eye.x, eye.y, eye.z, 1.0],
        camera_right: [right.x, right.y, right.z, 0.0],
        camera_up: [up.x, up.y, up.z, 0.0],
        sun_dir: [sun.x, sun.y, sun.z, 0.0],
        // halved: the unshadowed fragment shading overshoots at full intensity
        sun_color: [sr, sg, sb, SUN_INTENSITY * 0.5],
        ambient_color: [ar * fill, ag * fill, ab * fill, AMBIENT_INTENSITY],
        fog_color: [fr, fg, fb, 0.0],
        fog_range: [FOG_NEAR, FOG_FAR, 0.0, 0.0],
        time: [time, 0.0, 0.0, 0.0],
    }
}
