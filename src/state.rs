use crate::render::{
    create_grid_buffer, create_render_bind_group, create_render_bind_group_layout,
    create_render_param_buffer, create_render_pipeline, grid_to_cells, RenderParams,
};
use anyhow::{anyhow, Context as _};
use canvas_life::export;
use canvas_life::view::WheelAccumulator;
use canvas_life::{Config, Simulation};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::SystemTime;
use winit::{
    dpi::{PhysicalPosition, PhysicalSize},
    window::Window,
};

// GUI Imports
use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiWgpuRenderer;
use egui_winit::State as EguiWinitState;

/// Smallest window the canvas is allowed to shrink to when zooming out
const MIN_WINDOW_SIZE: PhysicalSize<u32> = PhysicalSize::new(480, 360);

pub struct State {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    pub size: PhysicalSize<u32>,
    pub window: Arc<Window>,

    // Dimensions the current grid buffer was allocated for
    pub uploaded_dims: (u32, u32),
    pub grid_buffer: wgpu::Buffer,
    pub render_param_buffer: wgpu::Buffer,
    pub render_pipeline: wgpu::RenderPipeline,
    pub render_bind_group_layout: wgpu::BindGroupLayout,
    pub render_bind_group: wgpu::BindGroup,

    pub sim: Simulation,
    pub rng: StdRng,
    pub export_dir: PathBuf,
    pub status: Option<String>,
    pub cursor_pos: Option<PhysicalPosition<f64>>,
    pub wheel: WheelAccumulator,

    // GUI state
    pub egui_ctx: EguiContext,
    pub egui_winit_state: EguiWinitState,
    pub egui_renderer: EguiWgpuRenderer,
    pub menu_open: bool,
}

impl State {
    pub async fn new(window: Arc<Window>, app_config: &Config) -> anyhow::Result<Self> {
        let size = window.inner_size();

        log::info!("Initializing wgpu...");

        let instance = wgpu::Instance::default();
        let surface = instance
            .create_surface(window.clone())
            .context("Failed to create surface")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                force_fallback_adapter: false,
                compatible_surface: Some(&surface),
            })
            .await
            .ok_or_else(|| anyhow!("Failed to find an appropriate adapter"))?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: None,
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("Failed to create device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow!("Surface reports no texture formats"))?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: surface_caps.present_modes[0],
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        // Simulation sized to the window unless the command line says otherwise
        let (cols, rows) = app_config.grid_size(size.width, size.height);
        let mut sim = app_config.build_simulation(cols, rows);
        if let Some(path) = &app_config.load {
            let layout = export::load_layout_file(path)
                .with_context(|| format!("Failed to load grid from {}", path.display()))?;
            sim.import_layout(&layout);
        }
        let rng = match app_config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        log::info!("Grid {}x{}, block size {} px", cols, rows, sim.view().block_size());

        // Create Render Resources
        let grid_buffer = create_grid_buffer(&device, sim.grid());
        let render_param_buffer =
            create_render_param_buffer(&device, &RenderParams::new(sim.grid(), sim.view()));
        let render_bind_group_layout = create_render_bind_group_layout(&device);
        let render_pipeline = create_render_pipeline(&device, &render_bind_group_layout, config.format);
        let render_bind_group = create_render_bind_group(
            &device, &render_bind_group_layout, &render_param_buffer, &grid_buffer,
        );

        log::info!("Initializing egui...");
        let egui_ctx = EguiContext::default();
        let egui_winit_state = EguiWinitState::new(egui_ctx.clone(), egui_ctx.viewport_id(), &window, None, None);
        let egui_renderer = EguiWgpuRenderer::new(&device, config.format, None, 1);
        log::info!("egui initialized.");

        log::info!("wgpu initialized successfully.");

        let mut state = Self {
            surface,
            device,
            queue,
            config,
            size,
            window,
            uploaded_dims: (cols, rows),
            grid_buffer,
            render_param_buffer,
            render_pipeline,
            render_bind_group_layout,
            render_bind_group,
            sim,
            rng,
            export_dir: app_config.export_dir.clone(),
            status: None,
            cursor_pos: None,
            wheel: WheelAccumulator::default(),
            egui_ctx,
            egui_winit_state,
            egui_renderer,
            menu_open: true,
        };
        state.fit_window_to_canvas();
        Ok(state)
    }

    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.size = new_size;
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
            log::info!("Reconfigured surface to: {}x{}", new_size.width, new_size.height);
        } else {
            log::warn!("Ignoring resize to zero dimensions: {}x{}", new_size.width, new_size.height);
        }
    }

    /// Ask the window to match the canvas after a rescale. The window never
    /// shrinks below a usable size; the rest is painted as background.
    pub fn fit_window_to_canvas(&mut self) {
        let (width, height) = self.sim.canvas_size();
        let target = PhysicalSize::new(
            width.max(MIN_WINDOW_SIZE.width),
            height.max(MIN_WINDOW_SIZE.height),
        );
        if let Some(actual) = self.window.request_inner_size(target) {
            self.resize(actual);
        }
    }

    /// Reallocate the grid so it fills the current window.
    pub fn fit_grid_to_window(&mut self) {
        let (cols, rows) = self.sim.view().fit_grid(self.size.width, self.size.height);
        self.sim.resize(cols, rows);
    }

    pub fn randomize(&mut self) {
        self.sim.randomize(&mut self.rng);
    }

    /// Export the grid; the outcome is logged and shown in the menu.
    pub fn save(&mut self) {
        let result = export::save_grid(self.sim.grid(), &self.export_dir, SystemTime::now());
        if let Err(err) = &result {
            log::error!("Export failed: {}", err);
        }
        self.status = Some(export::save_status(&result));
    }

    /// Push the grid to the GPU if the simulation changed since the last frame.
    fn sync_grid(&mut self) {
        if !self.sim.take_dirty() {
            return;
        }
        let grid = self.sim.grid();
        let dims = (grid.cols(), grid.rows());
        if dims != self.uploaded_dims {
            self.grid_buffer = create_grid_buffer(&self.device, grid);
            self.render_bind_group = create_render_bind_group(
                &self.device, &self.render_bind_group_layout, &self.render_param_buffer, &self.grid_buffer,
            );
            self.uploaded_dims = dims;
        } else {
            self.queue.write_buffer(&self.grid_buffer, 0, bytemuck::cast_slice(&grid_to_cells(grid)));
        }
        self.queue.write_buffer(
            &self.render_param_buffer,
            0,
            bytemuck::bytes_of(&RenderParams::new(grid, self.sim.view())),
        );
    }

    /// Upload pending changes & render the grid. Returns the surface texture for egui to draw on.
    pub fn update_and_render(&mut self) -> Result<wgpu::SurfaceTexture, wgpu::SurfaceError> {
        self.sync_grid();

        // --- Get Surface Texture (early exit on error) ---
        let output_frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost) => {
                log::warn!("Surface lost, recreating...");
                self.resize(self.size); // Reconfigure the surface
                return Err(wgpu::SurfaceError::Lost);
            }
            Err(e) => {
                log::error!("Failed to acquire next swap chain texture: {:?}", e);
                return Err(e);
            }
        };

        // --- Render Pass ---
        let output_view = output_frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut render_encoder = self.device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor { label: Some("Render Encoder") });
        {
            let mut render_pass = render_encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &output_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            render_pass.set_pipeline(&self.render_pipeline);
            render_pass.set_bind_group(0, &self.render_bind_group, &[]);
            render_pass.draw(0..3, 0..1); // Draw full-screen triangle
        }
        self.queue.submit(Some(render_encoder.finish()));
        // output_frame.present(); // DON'T present here, egui will do it later

        Ok(output_frame)
    }
}
