use bytemuck::{Pod, Zeroable};
use canvas_life::{Grid, ViewScale};
use std::num::NonZeroU64;
use wgpu::util::DeviceExt;

// Uniforms specific to rendering
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Pod, Zeroable)]
pub struct RenderParams {
    pub cols: u32,
    pub rows: u32,
    pub block_size: u32,
    pub border_width: u32, // 4 x u32 = 16 bytes, already aligned
}

impl RenderParams {
    pub fn new(grid: &Grid, view: &ViewScale) -> Self {
        Self {
            cols: grid.cols(),
            rows: grid.rows(),
            block_size: view.block_size(),
            border_width: view.border_width(),
        }
    }
}

/// One u32 per cell, row-major, as read by the fragment shader
pub fn grid_to_cells(grid: &Grid) -> Vec<u32> {
    let mut cells: Vec<u32> = grid.cells().iter().map(|&alive| u32::from(alive)).collect();
    // Storage bindings cannot be empty
    if cells.is_empty() {
        cells.push(0);
    }
    cells
}

pub fn create_grid_buffer(device: &wgpu::Device, grid: &Grid) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Grid Buffer"),
        contents: bytemuck::cast_slice(&grid_to_cells(grid)),
        usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn create_render_param_buffer(device: &wgpu::Device, params: &RenderParams) -> wgpu::Buffer {
    device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
        label: Some("Render Parameters"),
        contents: bytemuck::bytes_of(params),
        usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
    })
}

pub fn create_render_bind_group_layout(device: &wgpu::Device) -> wgpu::BindGroupLayout {
    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Render Bind Group Layout"),
        entries: &[
            // RenderParams Uniform (Binding 0)
            wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(std::mem::size_of::<RenderParams>() as u64),
                },
                count: None,
            },
            // Grid State Buffer (Binding 1)
            wgpu::BindGroupLayoutEntry {
                binding: 1,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Storage { read_only: true },
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            },
        ],
    })
}

pub fn create_render_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    render_param_buffer: &wgpu::Buffer,
    grid_buffer: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Render Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry { binding: 0, resource: render_param_buffer.as_entire_binding() },
            wgpu::BindGroupEntry { binding: 1, resource: grid_buffer.as_entire_binding() },
        ],
    })
}

pub fn create_render_pipeline(
    device: &wgpu::Device,
    bind_group_layout: &wgpu::BindGroupLayout,
    format: wgpu::TextureFormat,
) -> wgpu::RenderPipeline {
    let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
        label: Some("Render Shader"),
        source: wgpu::ShaderSource::Wgsl(include_str!("../render.wgsl").into()),
    });
    let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
        label: Some("Render Pipeline Layout"),
        bind_group_layouts: &[bind_group_layout],
        push_constant_ranges: &[],
    });
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Render Pipeline"),
        layout: Some(&layout),
        vertex: wgpu::VertexState {
            module: &shader,
            entry_point: "vs_main",
            buffers: &[],
        },
        fragment: Some(wgpu::FragmentState {
            module: &shader,
            entry_point: "fs_main",
            targets: &[Some(format.into())],
        }),
        primitive: wgpu::PrimitiveState {
            topology: wgpu::PrimitiveTopology::TriangleList,
            ..Default::default()
        },
        depth_stencil: None,
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_follow_grid_and_view() {
        let grid = Grid::new(12, 7);
        let params = RenderParams::new(&grid, &ViewScale::new(2.0));
        assert_eq!(params, RenderParams { cols: 12, rows: 7, block_size: 40, border_width: 2 });
        assert_eq!(std::mem::size_of::<RenderParams>(), 16);
    }

    #[test]
    fn cells_upload_row_major() {
        let mut grid = Grid::new(3, 2);
        grid.set(2, 0, true);
        grid.set(0, 1, true);
        assert_eq!(grid_to_cells(&grid), vec![0, 0, 1, 1, 0, 0]);
        assert_eq!(grid_to_cells(&Grid::new(0, 0)), vec![0]);
    }
}
