use crate::constants::*;
use crate::texture::DecodedImage;
use fnv::FnvHashMap;
use glam::{EulerRot, Mat4, Vec3};
use globe_core::{
    Gallery, Palette, Theme, BACKGROUND_OPACITY, BACKGROUND_SPHERE_RATIO, INNER_OPACITY,
    INNER_SPHERE_RATIO, SHELL_OPACITY,
};
use std::num::NonZeroU64;
use web_sys as web;

mod helpers;
pub mod meshes;
mod targets;
use helpers::{GpuMesh, PipelineKind};
use targets::RenderTargets;

static GLOBE_WGSL: &str = include_str!("../shaders/globe.wgsl");

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct FrameUniforms {
    view_proj: [[f32; 4]; 4],
    eye: [f32; 4],
    ambient: [f32; 4],
    sun: [f32; 4],
    accent: [f32; 4],
    accent_a: [f32; 4],
    accent_b: [f32; 4],
}

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct DrawUniforms {
    model: [[f32; 4]; 4],
    color: [f32; 4],
    params: [f32; 4],
}

impl DrawUniforms {
    fn new(model: Mat4, rgb: [f32; 3], opacity: f32, lit: bool, textured: bool) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            color: [rgb[0], rgb[1], rgb[2], opacity],
            params: [lit as u32 as f32, textured as u32 as f32, 0.0, 0.0],
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Pass {
    Items,
    Backside,
    Glow,
    Shell,
}

struct DrawCmd {
    pass: Pass,
    uniforms: DrawUniforms,
    // Item whose texture is bound; `None` binds the white texel.
    texture: Option<usize>,
}

pub struct GpuState {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    targets: RenderTargets,

    frame_buffer: wgpu::Buffer,
    frame_bind_group: wgpu::BindGroup,
    draw_bgl: wgpu::BindGroupLayout,
    draw_buffer: wgpu::Buffer,
    draw_bind_group: wgpu::BindGroup,
    draw_capacity: usize,
    draw_staging: Vec<u8>,

    texture_bgl: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    white_bind_group: wgpu::BindGroup,
    item_textures: FnvHashMap<usize, wgpu::BindGroup>,

    item_pipeline: wgpu::RenderPipeline,
    backside_pipeline: wgpu::RenderPipeline,
    glow_pipeline: wgpu::RenderPipeline,
    line_pipeline: wgpu::RenderPipeline,

    sphere: GpuMesh,
    shell: GpuMesh,
    quad: GpuMesh,

    palette: Palette,
    width: u32,
    height: u32,
}

impl GpuState {
    pub async fn new(canvas: &web::HtmlCanvasElement, theme: Theme) -> anyhow::Result<Self> {
        let width = canvas.width().max(1);
        let height = canvas.height().max(1);

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
                    // Default limits; older WebGPU impls reject unknown fields.
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
            .or_else(|| caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("surface reports no formats"))?;
        // The page shows through the canvas where nothing is drawn.
        let alpha_mode = if caps
            .alpha_modes
            .contains(&wgpu::CompositeAlphaMode::PreMultiplied)
        {
            wgpu::CompositeAlphaMode::PreMultiplied
        } else {
            caps.alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto)
        };
        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width,
            height,
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);
        let targets = RenderTargets::new(&device, width, height);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("globe_shader"),
            source: wgpu::ShaderSource::Wgsl(GLOBE_WGSL.into()),
        });

        // group 0: per-frame camera and lights
        let frame_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("frame_bgl"),
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
        let frame_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("frame_uniforms"),
            size: std::mem::size_of::<FrameUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let frame_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("frame_bg"),
            layout: &frame_bgl,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: frame_buffer.as_entire_binding(),
            }],
        });

        // group 1: per-draw transform and colour, addressed by dynamic offset
        let draw_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("draw_bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: true,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64),
                },
                count: None,
            }],
        });
        let (draw_buffer, draw_bind_group) =
            create_draw_buffer(&device, &draw_bgl, INITIAL_DRAW_SLOTS);

        // group 2: item texture
        let texture_bgl = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texture_bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        multisampled: false,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
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
        });
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("linear_sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });
        let white_bind_group = create_texture_bind_group(
            &device,
            &queue,
            &texture_bgl,
            &sampler,
            "white_tex",
            1,
            1,
            &[255, 255, 255, 255],
        );

        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("globe_pl"),
            bind_group_layouts: &[&frame_bgl, &draw_bgl, &texture_bgl],
            push_constant_ranges: &[],
        });
        let blend = Some(wgpu::BlendState::PREMULTIPLIED_ALPHA_BLENDING);
        let pipeline = |kind| helpers::make_scene_pipeline(&device, &layout, &shader, format, kind);
        let item_pipeline = pipeline(PipelineKind {
            label: "item_pipeline",
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth_write: true,
            blend: None,
        });
        let backside_pipeline = pipeline(PipelineKind {
            label: "backside_pipeline",
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: Some(wgpu::Face::Front),
            depth_write: false,
            blend,
        });
        let glow_pipeline = pipeline(PipelineKind {
            label: "glow_pipeline",
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            depth_write: false,
            blend,
        });
        let line_pipeline = pipeline(PipelineKind {
            label: "line_pipeline",
            topology: wgpu::PrimitiveTopology::LineList,
            cull_mode: None,
            depth_write: false,
            blend,
        });

        let sphere = GpuMesh::upload(
            &device,
            "sphere_mesh",
            &meshes::uv_sphere(1.0, SPHERE_SEGMENTS, SPHERE_RINGS),
        );
        let shell = GpuMesh::upload(
            &device,
            "shell_mesh",
            &meshes::sphere_wireframe(1.0, SHELL_SEGMENTS, SHELL_RINGS),
        );
        let quad = GpuMesh::upload(&device, "quad_mesh", &meshes::unit_quad());

        log::info!(
            "[gpu] ready {}x{} format={:?} alpha={:?}",
            width,
            height,
            format,
            alpha_mode
        );
        Ok(Self {
            surface,
            device,
            queue,
            config,
            targets,
            frame_buffer,
            frame_bind_group,
            draw_bgl,
            draw_buffer,
            draw_bind_group,
            draw_capacity: INITIAL_DRAW_SLOTS,
            draw_staging: Vec::new(),
            texture_bgl,
            sampler,
            white_bind_group,
            item_textures: FnvHashMap::default(),
            item_pipeline,
            backside_pipeline,
            glow_pipeline,
            line_pipeline,
            sphere,
            shell,
            quad,
            palette: theme.palette(),
            width,
            height,
        })
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    /// Upload the pixels of item `index`. Replaces any earlier texture.
    pub fn upload_item_texture(&mut self, index: usize, image: &DecodedImage) {
        let bind_group = create_texture_bind_group(
            &self.device,
            &self.queue,
            &self.texture_bgl,
            &self.sampler,
            "item_tex",
            image.width,
            image.height,
            &image.rgba,
        );
        self.item_textures.insert(index, bind_group);
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
            self.targets.recreate(&self.device, width, height);
        }
    }

    pub fn render<S>(&mut self, gallery: &Gallery<S>) -> Result<(), wgpu::SurfaceError> {
        let frame = match self.surface.get_current_texture() {
            Ok(f) => f,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e),
        };
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.frame_buffer,
            0,
            bytemuck::bytes_of(&self.frame_uniforms(gallery)),
        );
        let draws = self.collect_draws(gallery);
        self.write_draws(&draws);

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
                        load: wgpu::LoadOp::Clear(wgpu::Color::TRANSPARENT),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.targets.depth_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            rpass.set_bind_group(0, &self.frame_bind_group, &[]);
            let mut current = None;
            for (slot, cmd) in draws.iter().enumerate() {
                if current != Some(cmd.pass) {
                    rpass.set_pipeline(match cmd.pass {
                        Pass::Items => &self.item_pipeline,
                        Pass::Backside => &self.backside_pipeline,
                        Pass::Glow => &self.glow_pipeline,
                        Pass::Shell => &self.line_pipeline,
                    });
                    current = Some(cmd.pass);
                }
                let offset = (slot as u64 * UNIFORM_ALIGN) as u32;
                rpass.set_bind_group(1, &self.draw_bind_group, &[offset]);
                let texture = cmd
                    .texture
                    .and_then(|i| self.item_textures.get(&i))
                    .unwrap_or(&self.white_bind_group);
                rpass.set_bind_group(2, texture, &[]);
                match cmd.pass {
                    Pass::Items | Pass::Glow => self.quad.draw(&mut rpass),
                    Pass::Backside => self.sphere.draw(&mut rpass),
                    Pass::Shell => self.shell.draw(&mut rpass),
                }
            }
        }
        self.queue.submit(Some(encoder.finish()));
        frame.present();
        Ok(())
    }
}

impl GpuState {
    fn frame_uniforms<S>(&self, gallery: &Gallery<S>) -> FrameUniforms {
        let camera = gallery.camera();
        let sun_dir = Vec3::from_array(SUN_POSITION).normalize();
        let accent = self.palette.accent;
        FrameUniforms {
            view_proj: camera.view_projection().to_cols_array_2d(),
            eye: camera.eye.extend(1.0).to_array(),
            ambient: [AMBIENT_INTENSITY, AMBIENT_INTENSITY, AMBIENT_INTENSITY, 1.0],
            sun: sun_dir.extend(SUN_INTENSITY).to_array(),
            accent: [accent[0], accent[1], accent[2], ACCENT_LIGHT_INTENSITY],
            accent_a: Vec3::from_array(ACCENT_LIGHT_A)
                .extend(ACCENT_LIGHT_RANGE)
                .to_array(),
            accent_b: Vec3::from_array(ACCENT_LIGHT_B)
                .extend(ACCENT_LIGHT_RANGE)
                .to_array(),
        }
    }

    /// Draw list in submission order: opaque images first, then the
    /// transparent layers back to front.
    fn collect_draws<S>(&self, gallery: &Gallery<S>) -> Vec<DrawCmd> {
        let radius = gallery.config().sphere_radius;
        let rotation = gallery.rotation();
        let palette = &self.palette;
        let mut draws = Vec::with_capacity(gallery.len() * 2 + 3);

        for (i, item) in gallery.items().iter().enumerate() {
            let Some(mesh) = item.mesh.as_ref().filter(|m| item.visible && m.visible) else {
                continue;
            };
            if !self.item_textures.contains_key(&i) {
                continue;
            }
            draws.push(DrawCmd {
                pass: Pass::Items,
                uniforms: DrawUniforms::new(
                    mesh.model_matrix(rotation.globe),
                    [1.0, 1.0, 1.0],
                    1.0,
                    false,
                    true,
                ),
                texture: Some(i),
            });
        }

        let shell_model = |angles: glam::Vec2, scale: f32| {
            Mat4::from_euler(EulerRot::XYZ, angles.x, angles.y, 0.0)
                * Mat4::from_scale(Vec3::splat(scale))
        };
        draws.push(DrawCmd {
            pass: Pass::Backside,
            uniforms: DrawUniforms::new(
                shell_model(rotation.background, radius * BACKGROUND_SPHERE_RATIO),
                palette.background,
                BACKGROUND_OPACITY,
                false,
                false,
            ),
            texture: None,
        });
        draws.push(DrawCmd {
            pass: Pass::Backside,
            uniforms: DrawUniforms::new(
                shell_model(rotation.inner, radius * INNER_SPHERE_RATIO),
                palette.inner,
                INNER_OPACITY,
                false,
                false,
            ),
            texture: None,
        });

        for item in gallery.items() {
            let Some(mesh) = item.mesh.as_ref() else {
                continue;
            };
            if !(item.visible && mesh.visible) || mesh.glow_opacity <= 0.0 {
                continue;
            }
            draws.push(DrawCmd {
                pass: Pass::Glow,
                uniforms: DrawUniforms::new(
                    mesh.glow_matrix(rotation.globe),
                    palette.accent,
                    mesh.glow_opacity,
                    false,
                    false,
                ),
                texture: None,
            });
        }

        draws.push(DrawCmd {
            pass: Pass::Shell,
            uniforms: DrawUniforms::new(
                Mat4::from_rotation_y(rotation.globe) * Mat4::from_scale(Vec3::splat(radius)),
                palette.shell,
                SHELL_OPACITY,
                true,
                false,
            ),
            texture: None,
        });
        draws
    }

    fn write_draws(&mut self, draws: &[DrawCmd]) {
        if draws.len() > self.draw_capacity {
            let capacity = draws.len().next_power_of_two();
            let (buffer, bind_group) = create_draw_buffer(&self.device, &self.draw_bgl, capacity);
            self.draw_buffer.destroy();
            self.draw_buffer = buffer;
            self.draw_bind_group = bind_group;
            self.draw_capacity = capacity;
            log::debug!("[gpu] draw slots grown to {}", capacity);
        }
        let stride = UNIFORM_ALIGN as usize;
        self.draw_staging.clear();
        self.draw_staging.resize(draws.len() * stride, 0);
        for (slot, cmd) in draws.iter().enumerate() {
            let bytes = bytemuck::bytes_of(&cmd.uniforms);
            self.draw_staging[slot * stride..slot * stride + bytes.len()].copy_from_slice(bytes);
        }
        if !self.draw_staging.is_empty() {
            self.queue
                .write_buffer(&self.draw_buffer, 0, &self.draw_staging);
        }
    }
}

fn create_draw_buffer(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    slots: usize,
) -> (wgpu::Buffer, wgpu::BindGroup) {
    let buffer = device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("draw_uniforms"),
        size: slots as u64 * UNIFORM_ALIGN,
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    });
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("draw_bg"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: wgpu::BindingResource::Buffer(wgpu::BufferBinding {
                buffer: &buffer,
                offset: 0,
                size: NonZeroU64::new(std::mem::size_of::<DrawUniforms>() as u64),
            }),
        }],
    });
    (buffer, bind_group)
}

#[allow(clippy::too_many_arguments)]
fn create_texture_bind_group(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    label: &str,
    width: u32,
    height: u32,
    rgba: &[u8],
) -> wgpu::BindGroup {
    let (tex, view) = helpers::create_texture(
        device,
        label,
        width,
        height,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
    );
    queue.write_texture(
        wgpu::TexelCopyTextureInfo {
            texture: &tex,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        rgba,
        wgpu::TexelCopyBufferLayout {
            offset: 0,
            bytes_per_row: Some(4 * width),
            rows_per_image: Some(height),
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some(label),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    })
}
