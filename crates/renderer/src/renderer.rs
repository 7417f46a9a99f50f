//! Main renderer managing wgpu state and rendering.

use crate::{
    camera::OrbitCamera,
    mesh::{Mesh, MeshGeometry},
    pipeline::{create_render_pipeline, create_scene_bind_group_layout},
    texture::Texture,
    vertex::InstanceData,
};
use anyhow::Result;
use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};
use std::sync::Arc;
use wgpu::util::DeviceExt;
use winit::window::Window;

/// Instance buffer capacity allocated up front; grows on demand.
const INITIAL_INSTANCE_CAPACITY: u64 = 1024;

/// Index of an uploaded mesh. [`MeshHandle::NONE`] is the sentinel for "nothing to draw"
/// and is skipped silently, as are handles the renderer never issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u32);

impl MeshHandle {
    pub const NONE: MeshHandle = MeshHandle(u32::MAX);

    pub fn is_none(&self) -> bool {
        *self == Self::NONE
    }
}

impl Default for MeshHandle {
    fn default() -> Self {
        Self::NONE
    }
}

/// All instances of one mesh drawn this frame.
#[derive(Debug, Clone)]
pub struct DrawBatch {
    pub mesh: MeshHandle,
    pub instances: Vec<InstanceData>,
}

impl DrawBatch {
    pub fn new(mesh: MeshHandle) -> Self {
        Self {
            mesh,
            instances: Vec::new(),
        }
    }

    pub fn push(&mut self, model: Mat4, color: Vec3, emissive: f32) {
        self.instances.push(InstanceData::new(model, color, emissive));
    }
}

/// Scene-wide lighting for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Direction the sunlight travels (from the sun toward the ground).
    pub sun_direction: Vec3,
    pub sun_color: Vec3,
    pub ambient: Vec3,
    /// Clear color behind all geometry.
    pub sky_color: Vec3,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            sun_direction: Vec3::new(-0.3, -1.0, -0.2).normalize(),
            sun_color: Vec3::ONE,
            ambient: Vec3::splat(0.25),
            sky_color: Vec3::new(0.45, 0.65, 0.9),
        }
    }
}

/// Scene uniform (must match `Scene` in the WGSL shader).
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct SceneUniform {
    pub view_proj: [[f32; 4]; 4],
    pub camera_position: [f32; 4],
    pub sun_direction: [f32; 4],
    pub sun_color: [f32; 4],
    pub ambient: [f32; 4],
}

impl SceneUniform {
    pub fn new(camera: &OrbitCamera, lighting: &Lighting) -> Self {
        let eye = camera.position();
        let sun = lighting
            .sun_direction
            .try_normalize()
            .unwrap_or(Vec3::NEG_Y);
        Self {
            view_proj: camera.view_projection_matrix().to_cols_array_2d(),
            camera_position: eye.extend(1.0).to_array(),
            sun_direction: sun.extend(0.0).to_array(),
            sun_color: lighting.sun_color.extend(1.0).to_array(),
            ambient: lighting.ambient.extend(1.0).to_array(),
        }
    }
}

pub struct Renderer {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_pipeline: wgpu::RenderPipeline,
    scene_buffer: wgpu::Buffer,
    scene_bind_group: wgpu::BindGroup,
    depth_texture: Texture,
    instance_buffer: wgpu::Buffer,
    instance_capacity: u64,
    meshes: Vec<Mesh>,
}

impl Renderer {
    /// Create a new renderer for the given window.
    pub async fn new(window: Arc<Window>, vsync: bool) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        // Create surface
        let surface = instance.create_surface(window.clone())?;

        // Request adapter
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or_else(|| anyhow::anyhow!("Failed to find suitable GPU adapter"))?;

        log::info!("Using GPU: {:?}", adapter.get_info().name);

        // Request device
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Main Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        // Configure surface
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .copied()
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow::anyhow!("Surface reports no supported formats"))?;

        let present_mode = if vsync {
            wgpu::PresentMode::AutoVsync
        } else {
            wgpu::PresentMode::AutoNoVsync
        };

        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let scene_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Scene Buffer"),
            contents: bytemuck::cast_slice(&[SceneUniform::new(
                &OrbitCamera::default(),
                &Lighting::default(),
            )]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let scene_layout = create_scene_bind_group_layout(&device);
        let scene_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Scene Bind Group"),
            layout: &scene_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: scene_buffer.as_entire_binding(),
            }],
        });

        let render_pipeline = create_render_pipeline(&device, config.format, &scene_layout);
        let depth_texture =
            Texture::create_depth_texture(&device, config.width, config.height, "Depth Texture");
        let instance_buffer = create_instance_buffer(&device, INITIAL_INSTANCE_CAPACITY);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_pipeline,
            scene_buffer,
            scene_bind_group,
            depth_texture,
            instance_buffer,
            instance_capacity: INITIAL_INSTANCE_CAPACITY,
            meshes: Vec::new(),
        })
    }

    /// Upload geometry and return its handle. Empty geometry yields [`MeshHandle::NONE`].
    pub fn upload_mesh(&mut self, geometry: &MeshGeometry) -> MeshHandle {
        if geometry.is_empty() {
            return MeshHandle::NONE;
        }
        self.meshes.push(Mesh::new(&self.device, geometry));
        MeshHandle((self.meshes.len() - 1) as u32)
    }

    /// Handle window resize.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.config.width = width;
            self.config.height = height;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture =
                Texture::create_depth_texture(&self.device, width, height, "Depth Texture");
        }
    }

    /// Get surface dimensions.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.config.width, self.config.height)
    }

    /// Draw one frame: clear to the sky color, draw every batch, present.
    pub fn draw_frame(
        &mut self,
        camera: &OrbitCamera,
        lighting: &Lighting,
        batches: &[DrawBatch],
    ) -> Result<()> {
        let output = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::debug!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        self.queue.write_buffer(
            &self.scene_buffer,
            0,
            bytemuck::cast_slice(&[SceneUniform::new(camera, lighting)]),
        );

        // Pack every drawable batch's instances into one buffer; remember each batch's range.
        let mut ranges = Vec::with_capacity(batches.len());
        let mut packed: Vec<InstanceData> = Vec::new();
        for batch in batches {
            let Some(mesh_index) = self.mesh_index(batch.mesh) else {
                continue;
            };
            if batch.instances.is_empty() {
                continue;
            }
            let start = packed.len() as u32;
            packed.extend_from_slice(&batch.instances);
            ranges.push((mesh_index, start..packed.len() as u32));
        }
        self.ensure_instance_capacity(packed.len() as u64);
        if !packed.is_empty() {
            self.queue
                .write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(&packed));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });
        {
            let sky = lighting.sky_color;
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: sky.x as f64,
                            g: sky.y as f64,
                            b: sky.z as f64,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.scene_bind_group, &[]);
            render_pass.set_vertex_buffer(1, self.instance_buffer.slice(..));
            for (mesh_index, range) in ranges {
                let mesh = &self.meshes[mesh_index];
                render_pass.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
                render_pass.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
                render_pass.draw_indexed(0..mesh.num_indices, 0, range);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn mesh_index(&self, handle: MeshHandle) -> Option<usize> {
        if handle.is_none() {
            return None;
        }
        let index = handle.0 as usize;
        (index < self.meshes.len()).then_some(index)
    }

    fn ensure_instance_capacity(&mut self, needed: u64) {
        if needed <= self.instance_capacity {
            return;
        }
        let capacity = needed.next_power_of_two();
        log::debug!("Growing instance buffer to {} instances", capacity);
        self.instance_buffer = create_instance_buffer(&self.device, capacity);
        self.instance_capacity = capacity;
    }
}

fn create_instance_buffer(device: &wgpu::Device, capacity: u64) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Instance Buffer"),
        size: capacity * std::mem::size_of::<InstanceData>() as u64,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_uniform_matches_shader_layout() {
        assert_eq!(std::mem::size_of::<SceneUniform>(), 128);
    }

    #[test]
    fn scene_uniform_normalizes_sun() {
        let lighting = Lighting {
            sun_direction: Vec3::new(0.0, -10.0, 0.0),
            ..Default::default()
        };
        let u = SceneUniform::new(&OrbitCamera::default(), &lighting);
        assert_eq!(u.sun_direction, [0.0, -1.0, 0.0, 0.0]);
        let degenerate = Lighting {
            sun_direction: Vec3::ZERO,
            ..Default::default()
        };
        let u = SceneUniform::new(&OrbitCamera::default(), &degenerate);
        assert_eq!(u.sun_direction, [0.0, -1.0, 0.0, 0.0]);
    }

    #[test]
    fn default_handle_is_sentinel() {
        assert!(MeshHandle::default().is_none());
        assert!(!MeshHandle(0).is_none());
    }
}
