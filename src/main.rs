// Declare the windowed shell modules in the binary crate root
pub mod input;
pub mod render;
pub mod state;
pub mod ui;

// Use types/functions from the declared modules
use crate::state::State;
use canvas_life::Config;

use clap::Parser;
use std::sync::Arc;
use std::time::Instant;
use winit::{
    event::{Event, MouseScrollDelta, WindowEvent},
    event_loop::{ControlFlow, EventLoop},
    window::Window,
};

// Initial window size before the grid is fitted
const WINDOW_WIDTH: f64 = 1024.0;
const WINDOW_HEIGHT: f64 = 768.0;

async fn run(event_loop: EventLoop<()>, window: Arc<Window>, config: Config) -> anyhow::Result<()> {
    let mut state = State::new(window, &config).await?;

    event_loop.run(move |event, window_target| {
        match event {
            Event::WindowEvent { window_id, ref event }
                if window_id == state.window.id() =>
            {
                // Pass window-specific events to egui_winit FIRST
                let response = state.egui_winit_state.on_window_event(&state.window, event);

                if response.repaint {
                    state.window.request_redraw();
                }

                // If egui consumed the event, skip further processing for this event
                // unless it was a Resize event, which the canvas needs to handle regardless.
                let consumed_by_egui = response.consumed
                    && !matches!(event, WindowEvent::Resized(_) | WindowEvent::RedrawRequested);

                if consumed_by_egui {
                    return;
                }

                match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        state.resize(*new_size);
                        state.window.request_redraw();
                    }
                    WindowEvent::MouseInput { state: element_state, button, .. } => {
                        input::handle_mouse_input(&mut state, *button, *element_state);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        input::handle_cursor_move(&mut state, *position);
                    }
                    WindowEvent::CursorLeft { .. } => {
                        input::handle_cursor_left(&mut state);
                    }
                    WindowEvent::KeyboardInput { event: key_event, .. } => {
                        input::handle_key(&mut state, key_event);
                    }
                    WindowEvent::MouseWheel { delta, .. } => {
                        // winit reports scrolling up as positive; the canvas zooms
                        // out on positive deltas, so flip the sign.
                        match delta {
                            MouseScrollDelta::LineDelta(_, y) => {
                                if *y != 0.0 {
                                    input::handle_zoom(&mut state, -*y);
                                }
                            }
                            MouseScrollDelta::PixelDelta(pos) => {
                                // Trackpads report many small pixel deltas; zoom
                                // once per accumulated notch.
                                for notch in state.wheel.push_pixels(-pos.y) {
                                    input::handle_zoom(&mut state, notch);
                                }
                            }
                        }
                    }
                    WindowEvent::RedrawRequested => {
                        render_frame(&mut state);
                    }
                    _ => (),
                }
            }
            Event::AboutToWait => {
                if state.sim.tick(Instant::now()) {
                    state.window.request_redraw();
                }
                // Sleep until the next generation is due, or until input arrives
                match state.sim.next_tick_due() {
                    Some(due) => window_target.set_control_flow(ControlFlow::WaitUntil(due)),
                    None => window_target.set_control_flow(ControlFlow::Wait),
                }
            }
            _ => (),
        }
    })?;

    Ok(())
}

/// Draw the grid, then the egui menu on top, and present.
fn render_frame(state: &mut State) {
    let output_frame = match state.update_and_render() {
        Ok(frame) => frame,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::OutOfMemory) => {
            // resize() was called internally if Lost.
            log::warn!("Skipping frame due to surface error.");
            state.window.request_redraw();
            return;
        }
        Err(err @ (wgpu::SurfaceError::Timeout | wgpu::SurfaceError::Outdated)) => {
            log::warn!("Skipping frame due to surface {:?}", err);
            state.window.request_redraw();
            return;
        }
    };

    // --- Egui Frame and UI Definition ---
    let output_view = output_frame.texture.create_view(&wgpu::TextureViewDescriptor::default());

    let raw_input = state.egui_winit_state.take_egui_input(&state.window);
    state.egui_ctx.begin_frame(raw_input);
    let commands = ui::draw_menu(
        &state.egui_ctx,
        &state.sim,
        state.menu_open,
        state.status.as_deref(),
    );
    let full_output = state.egui_ctx.end_frame();

    let paint_jobs = state.egui_ctx.tessellate(full_output.shapes, state.window.scale_factor() as f32);
    let screen_descriptor = egui_wgpu::ScreenDescriptor {
        size_in_pixels: [state.config.width, state.config.height],
        pixels_per_point: state.window.scale_factor() as f32,
    };

    // Upload egui data to GPU
    let mut encoder = state.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
        label: Some("egui Encoder"),
    });
    for (id, image_delta) in &full_output.textures_delta.set {
        state.egui_renderer.update_texture(&state.device, &state.queue, *id, image_delta);
    }
    let _tdelta = state.egui_renderer.update_buffers(
        &state.device,
        &state.queue,
        &mut encoder,
        &paint_jobs,
        &screen_descriptor,
    );
    state.egui_winit_state.handle_platform_output(&state.window, full_output.platform_output);

    // Render egui
    {
        let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("egui Render Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &output_view, // Render egui ON TOP of the grid
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        state.egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
    }

    for id in &full_output.textures_delta.free {
        state.egui_renderer.free_texture(id);
    }

    state.queue.submit(Some(encoder.finish()));
    output_frame.present();

    // Button clicks mutate the simulation after the frame is submitted
    for command in commands {
        input::apply_command(state, command);
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let config = Config::parse();
    config.validate()?;
    log::info!("Settings: {}", config.to_json()?);

    let event_loop = EventLoop::new()?;

    let initial_size = winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT);

    let window = Arc::new(winit::window::WindowBuilder::new()
        .with_title("Life Canvas")
        .with_inner_size(initial_size)
        .build(&event_loop)?);

    pollster::block_on(run(event_loop, window, config))
}
