use crate::state::State;
use canvas_life::Command;
use std::time::Instant;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, KeyEvent, MouseButton},
    keyboard::{Key, NamedKey},
};

/// Wheel input. `delta` follows browser `deltaY`: positive zooms out.
pub fn handle_zoom(state: &mut State, delta: f32) {
    if state.sim.rescale(delta).is_some() {
        state.fit_window_to_canvas();
        state.window.request_redraw();
    }
}

pub fn handle_mouse_input(state: &mut State, button: MouseButton, element_state: ElementState) {
    if button != MouseButton::Left || element_state != ElementState::Pressed {
        return;
    }
    match state.cursor_pos {
        Some(pos) => {
            state.sim.toggle_at(pos.x, pos.y);
            state.window.request_redraw();
        }
        None => log::warn!("Click without a known cursor position, ignoring"),
    }
}

pub fn handle_cursor_move(state: &mut State, position: PhysicalPosition<f64>) {
    state.cursor_pos = Some(position);
}

pub fn handle_cursor_left(state: &mut State) {
    state.cursor_pos = None;
}

pub fn handle_key(state: &mut State, event: &KeyEvent) {
    if event.state != ElementState::Pressed || event.repeat {
        return;
    }
    let command = match &event.logical_key {
        Key::Named(NamedKey::Space) => Some(Command::ToggleRun),
        Key::Named(NamedKey::ArrowRight) => Some(Command::Step),
        Key::Named(NamedKey::Escape) => Some(Command::Stop),
        Key::Named(NamedKey::Tab) => Some(Command::ToggleMenu),
        Key::Character(text) => Command::for_key(text.as_str()),
        _ => None,
    };
    if let Some(command) = command {
        apply_command(state, command);
    }
}

/// Execute one user command against the simulation and request a redraw.
pub fn apply_command(state: &mut State, command: Command) {
    log::debug!("Command: {:?}", command);
    let now = Instant::now();
    match command {
        Command::Clear => state.sim.clear(),
        Command::Randomize => state.randomize(),
        Command::Step => state.sim.step(),
        Command::Run => state.sim.run(now),
        Command::Stop => state.sim.stop(),
        Command::ToggleRun => {
            if state.sim.is_running() {
                state.sim.stop();
            } else {
                state.sim.run(now);
            }
        }
        Command::Save => state.save(),
        Command::LoadPreset(pattern) => state.sim.load_pattern(pattern, now),
        Command::FitToWindow => state.fit_grid_to_window(),
        Command::ToggleMenu => state.menu_open = !state.menu_open,
    }
    state.window.request_redraw();
}
