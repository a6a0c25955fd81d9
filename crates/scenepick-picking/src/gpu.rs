use std::sync::mpsc;

use bytemuck::{Pod, Zeroable};
use scenepick_geometry::Point2;
use tracing::debug;
use wgpu::util::DeviceExt;

use crate::target::{PickTarget, PixelBuffer};
use crate::{PickingError, Result};

const FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8Unorm;

#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
struct PickVertex {
    position: [f32; 2],
    color: [u8; 4],
}

/// Pick target backed by a wgpu texture.
///
/// Triangles are batched on the CPU and drawn in one render pass when the
/// target is read back; the readback maps a staging buffer and blocks on the
/// device until the copy completes.
pub struct WgpuTarget {
    device: wgpu::Device,
    queue: wgpu::Queue,
    pipeline: wgpu::RenderPipeline,
    texture: wgpu::Texture,
    staging: wgpu::Buffer,
    width: u32,
    height: u32,
    clear: [u8; 4],
    vertices: Vec<PickVertex>,
}

impl WgpuTarget {
    pub fn new(device: wgpu::Device, queue: wgpu::Queue, width: u32, height: u32) -> Result<Self> {
        ensure_size(width, height)?;
        let pipeline = create_pipeline(&device);
        let texture = create_texture(&device, width, height);
        let staging = create_staging(&device, width, height);
        Ok(Self {
            device,
            queue,
            pipeline,
            texture,
            staging,
            width,
            height,
            clear: [0, 0, 0, 0xFF],
            vertices: Vec::new(),
        })
    }

    /// Opens a device on the default adapter without a surface.
    pub fn headless(width: u32, height: u32) -> Result<Self> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::LowPower,
            force_fallback_adapter: false,
            compatible_surface: None,
        }))
        .map_err(|err| PickingError::Readback(format!("no adapter: {err}")))?;
        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default()))
                .map_err(|err| PickingError::Readback(format!("no device: {err}")))?;
        debug!(adapter = ?adapter.get_info().name, "headless pick device opened");
        Self::new(device, queue, width, height)
    }

    fn to_ndc(&self, p: Point2) -> [f32; 2] {
        [
            p.x / self.width as f32 * 2.0 - 1.0,
            1.0 - p.y / self.height as f32 * 2.0,
        ]
    }
}

impl PickTarget for WgpuTarget {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<()> {
        ensure_size(width, height)?;
        if (width, height) != (self.width, self.height) {
            self.texture = create_texture(&self.device, width, height);
            self.staging = create_staging(&self.device, width, height);
            self.width = width;
            self.height = height;
        }
        self.vertices.clear();
        Ok(())
    }

    fn begin(&mut self, clear: [u8; 4]) -> Result<()> {
        self.clear = clear;
        self.vertices.clear();
        Ok(())
    }

    fn fill_triangle(&mut self, points: [Point2; 3], color: [u8; 4]) {
        for p in points {
            let position = self.to_ndc(p);
            self.vertices.push(PickVertex { position, color });
        }
    }

    fn read_back(&mut self) -> Result<PixelBuffer> {
        let view = self
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("pick pass encoder"),
            });

        let vertex_buffer = (!self.vertices.is_empty()).then(|| {
            self.device
                .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some("pick vertices"),
                    contents: bytemuck::cast_slice(&self.vertices),
                    usage: wgpu::BufferUsages::VERTEX,
                })
        });

        {
            let [r, g, b, a] = self.clear.map(|c| f64::from(c) / 255.0);
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("pick pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color { r, g, b, a }),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Some(buffer) = &vertex_buffer {
                pass.set_pipeline(&self.pipeline);
                pass.set_vertex_buffer(0, buffer.slice(..));
                pass.draw(0..self.vertices.len() as u32, 0..1);
            }
        }

        let padded_row = padded_row_bytes(self.width);
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &self.staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded_row),
                    rows_per_image: Some(self.height),
                },
            },
            wgpu::Extent3d {
                width: self.width,
                height: self.height,
                depth_or_array_layers: 1,
            },
        );
        self.queue.submit(std::iter::once(encoder.finish()));

        let slice = self.staging.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.device
            .poll(wgpu::PollType::wait_indefinitely())
            .map_err(|err| PickingError::Readback(err.to_string()))?;
        receiver
            .recv()
            .map_err(|err| PickingError::Readback(err.to_string()))?
            .map_err(|err| PickingError::Readback(err.to_string()))?;

        let row_bytes = self.width as usize * 4;
        let mut data = Vec::with_capacity(row_bytes * self.height as usize);
        {
            let mapped = slice.get_mapped_range();
            for row in mapped.chunks(padded_row as usize).take(self.height as usize) {
                data.extend_from_slice(&row[..row_bytes]);
            }
        }
        self.staging.unmap();
        self.vertices.clear();
        Ok(PixelBuffer::new(self.width, self.height, data))
    }
}

fn ensure_size(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(PickingError::EmptyViewport { width, height });
    }
    Ok(())
}

fn padded_row_bytes(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * 4).div_ceil(align) * align
}

fn create_texture(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Texture {
    device.create_texture(&wgpu::TextureDescriptor {
        label: Some("pick target"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
        view_formats: &[],
    })
}

fn create_staging(device: &wgpu::Device, width: u32, height: u32) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("pick staging"),
        size: u64::from(padded_row_bytes(width)) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    })
}

fn create_pipeline(device: &wgpu::Device) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("pick shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("pick.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("pick pipeline layout"),
        bind_group_layouts: &[],
        push_constant_ranges: &[],
    });
    let attributes = wgpu::vertex_attr_array![0 => Float32x2, 1 => Unorm8x4];
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("pick pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: Some("vs_main"),
            compilation_options: Default::default(),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<PickVertex>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Vertex,
                attributes: &attributes,
            }],
        },
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            cull_mode: None,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: Some("fs_main"),
            compilation_options: Default::default(),
            targets: &[Some(wgpu::ColorTargetState {
                format: FORMAT,
                blend: None,
                write_mask: wgpu::ColorWrites::ALL,
            })],
        }),
        multiview: None,
        cache: None,
    })
}
