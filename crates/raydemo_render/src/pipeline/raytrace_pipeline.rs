//! Full-screen raytracing pipeline
//!
//! Draws a single oversized triangle with no vertex buffers; the vertex
//! shader derives the corners from `vertex_index` and the fragment shader
//! traces the scene stored in three read-only storage buffers.
//!
//! Bindings (group 0):
//! - 0: `FrameUniforms` (uniform)
//! - 1: spheres (storage, read-only)
//! - 2: triangles (storage, read-only)
//! - 3: cubes (storage, read-only)

use std::marker::PhantomData;

use bytemuck::Pod;
use wgpu::util::DeviceExt;

use super::types::{FrameUniforms, GpuCube, GpuSphere, GpuTriangle};
use crate::renderable::RenderableScene;
use crate::shader::{compile_module, ShaderError, ShaderSources, FRAGMENT_ENTRY_POINT, VERTEX_ENTRY_POINT};

/// Vertices drawn per frame (one triangle covering the screen)
pub const FULL_SCREEN_VERTEX_COUNT: u32 = 3;

/// Byte size of a storage buffer holding `len` elements.
///
/// Never zero: an empty array still gets room for one element so the
/// binding stays valid, and the shader relies on the counts instead.
pub fn storage_buffer_size(element_size: usize, len: usize) -> u64 {
    (element_size * len.max(1)) as u64
}

/// Capacity a storage buffer must be reallocated to before holding `len`
/// elements, or `None` when the current capacity is enough.
pub fn grown_capacity(capacity: usize, len: usize) -> Option<usize> {
    (len > capacity).then(|| len.next_power_of_two())
}

/// A growable read-only storage buffer of `T`
struct StorageArray<T> {
    buffer: wgpu::Buffer,
    capacity: usize,
    label: &'static str,
    _marker: PhantomData<T>,
}

impl<T: Pod> StorageArray<T> {
    fn new(device: &wgpu::Device, label: &'static str, capacity: usize) -> Self {
        Self {
            buffer: Self::create_buffer(device, label, capacity),
            capacity: capacity.max(1),
            label,
            _marker: PhantomData,
        }
    }

    fn create_buffer(device: &wgpu::Device, label: &'static str, capacity: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some(label),
            size: storage_buffer_size(std::mem::size_of::<T>(), capacity),
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Write `data`, growing the buffer first if needed.
    ///
    /// Returns true when the buffer was reallocated (bind groups must be rebuilt).
    fn write(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, data: &[T]) -> bool {
        let grown = grown_capacity(self.capacity, data.len());
        if let Some(capacity) = grown {
            self.capacity = capacity;
            self.buffer = Self::create_buffer(device, self.label, capacity);
            log::debug!("Grew {} to {} elements", self.label, capacity);
        }
        if !data.is_empty() {
            queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(data));
        }
        grown.is_some()
    }
}

/// Render pipeline tracing the scene per pixel
pub struct RaytracePipeline {
    /// The render pipeline
    pipeline: wgpu::RenderPipeline,
    /// Bind group layout for uniforms + scene arrays
    bind_group_layout: wgpu::BindGroupLayout,
    /// Uniform buffer
    uniform_buffer: wgpu::Buffer,
    spheres: StorageArray<GpuSphere>,
    triangles: StorageArray<GpuTriangle>,
    cubes: StorageArray<GpuCube>,
    /// Bind group (recreated when a storage buffer grows)
    bind_group: wgpu::BindGroup,
}

impl RaytracePipeline {
    /// Create the pipeline from a vertex + fragment shader pair
    pub fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        sources: &ShaderSources,
    ) -> Result<Self, ShaderError> {
        let vertex_module = compile_module(device, &sources.vertex_label, &sources.vertex)?;
        let fragment_module = compile_module(device, &sources.fragment_label, &sources.fragment)?;

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Raytrace Bind Group Layout"),
            entries: &[
                // Frame uniforms
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX | wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                Self::storage_entry(1),
                Self::storage_entry(2),
                Self::storage_entry(3),
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Raytrace Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Raytrace Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &vertex_module,
                entry_point: Some(VERTEX_ENTRY_POINT),
                buffers: &[],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &fragment_module,
                entry_point: Some(FRAGMENT_ENTRY_POINT),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                unclipped_depth: false,
                polygon_mode: wgpu::PolygonMode::Fill,
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
        });
        if let Some(error) = pollster::block_on(device.pop_error_scope()) {
            return Err(ShaderError::Link(error.to_string()));
        }

        let uniform_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Frame Uniform Buffer"),
            contents: bytemuck::bytes_of(&FrameUniforms::default()),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let spheres = StorageArray::new(device, "Sphere Buffer", 1);
        let triangles = StorageArray::new(device, "Triangle Buffer", 1);
        let cubes = StorageArray::new(device, "Cube Buffer", 1);

        let bind_group = Self::create_bind_group(
            device,
            &bind_group_layout,
            &uniform_buffer,
            &spheres.buffer,
            &triangles.buffer,
            &cubes.buffer,
        );

        log::info!("Raytrace pipeline created");

        Ok(Self {
            pipeline,
            bind_group_layout,
            uniform_buffer,
            spheres,
            triangles,
            cubes,
            bind_group,
        })
    }

    fn storage_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
        wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        }
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        uniforms: &wgpu::Buffer,
        spheres: &wgpu::Buffer,
        triangles: &wgpu::Buffer,
        cubes: &wgpu::Buffer,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Raytrace Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: uniforms.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: spheres.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: triangles.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: cubes.as_entire_binding(),
                },
            ],
        })
    }

    /// Upload the three primitive arrays
    ///
    /// Called every frame with the same host arrays; storage buffers are only
    /// reallocated when an array outgrows them.
    pub fn upload_scene(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, scene: &RenderableScene) {
        let grew_spheres = self.spheres.write(device, queue, &scene.spheres);
        let grew_triangles = self.triangles.write(device, queue, &scene.triangles);
        let grew_cubes = self.cubes.write(device, queue, &scene.cubes);

        if grew_spheres || grew_triangles || grew_cubes {
            self.bind_group = Self::create_bind_group(
                device,
                &self.bind_group_layout,
                &self.uniform_buffer,
                &self.spheres.buffer,
                &self.triangles.buffer,
                &self.cubes.buffer,
            );
        }
    }

    /// Update uniforms
    pub fn update_uniforms(&self, queue: &wgpu::Queue, uniforms: &FrameUniforms) {
        queue.write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(uniforms));
    }

    /// Record the full-screen draw
    pub fn render(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
        clear_color: wgpu::Color,
    ) {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Raytrace Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, &self.bind_group, &[]);
        render_pass.draw(0..FULL_SCREEN_VERTEX_COUNT, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: GPU tests require a wgpu device which isn't available in unit tests

    #[test]
    fn test_storage_size_never_zero() {
        assert_eq!(storage_buffer_size(std::mem::size_of::<GpuSphere>(), 0), 32);
        assert_eq!(storage_buffer_size(std::mem::size_of::<GpuTriangle>(), 0), 64);
    }

    #[test]
    fn test_storage_size_scales_with_len() {
        assert_eq!(storage_buffer_size(std::mem::size_of::<GpuCube>(), 10), 320);
    }

    #[test]
    fn test_storage_size_is_copy_aligned() {
        for len in 0..8 {
            for size in [
                std::mem::size_of::<GpuSphere>(),
                std::mem::size_of::<GpuTriangle>(),
                std::mem::size_of::<GpuCube>(),
            ] {
                assert_eq!(storage_buffer_size(size, len) % wgpu::COPY_BUFFER_ALIGNMENT, 0);
            }
        }
    }

    #[test]
    fn test_no_growth_within_capacity() {
        assert_eq!(grown_capacity(1, 0), None);
        assert_eq!(grown_capacity(1, 1), None);
        assert_eq!(grown_capacity(16, 9), None);
        assert_eq!(grown_capacity(16, 16), None);
    }

    #[test]
    fn test_growth_rounds_up_to_power_of_two() {
        assert_eq!(grown_capacity(1, 2), Some(2));
        assert_eq!(grown_capacity(1, 5), Some(8));
        assert_eq!(grown_capacity(8, 9), Some(16));
        assert_eq!(grown_capacity(16, 64), Some(64));
    }

    #[test]
    fn test_repeated_uploads_grow_once() {
        let mut capacity = 1;
        let mut reallocations = 0;
        for len in [5, 3, 8, 8, 0, 6] {
            if let Some(grown) = grown_capacity(capacity, len) {
                capacity = grown;
                reallocations += 1;
            }
            assert!(capacity >= len);
        }
        assert_eq!(capacity, 8);
        assert_eq!(reallocations, 1);
    }
}
