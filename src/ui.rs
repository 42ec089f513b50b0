use canvas_life::{Command, Pattern, Simulation};

/// Draw the menu button and, when open, the side panel. Returns the commands
/// the user clicked this frame.
pub fn draw_menu(
    ctx: &egui::Context,
    sim: &Simulation,
    menu_open: bool,
    status: Option<&str>,
) -> Vec<Command> {
    let mut commands = Vec::new();

    // Use an Area for the menu button, positioned top-right so it stays off the grid origin
    egui::Area::new(egui::Id::new("menu_button_area"))
        .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-5.0, 5.0))
        .show(ctx, |ui| {
            if ui.button("☰").clicked() {
                commands.push(Command::ToggleMenu);
            }
        });

    if !menu_open {
        return commands;
    }

    // Define a frame with a semi-transparent background
    let panel_frame = egui::Frame {
        fill: egui::Color32::from_rgba_unmultiplied(25, 25, 25, 200),
        ..egui::Frame::side_top_panel(&ctx.style())
    };

    egui::SidePanel::right("side_panel")
        .frame(panel_frame)
        .resizable(true)
        .default_width(200.0)
        .show(ctx, |ui| {
            ui.heading("Life Canvas");
            ui.separator();

            ui.horizontal_wrapped(|ui| {
                if ui.button("clear").clicked() {
                    commands.push(Command::Clear);
                }
                if ui.button("random").clicked() {
                    commands.push(Command::Randomize);
                }
                if ui.button("single step").clicked() {
                    commands.push(Command::Step);
                }
            });
            ui.horizontal_wrapped(|ui| {
                if sim.is_running() {
                    if ui.button("stop").clicked() {
                        commands.push(Command::Stop);
                    }
                } else if ui.button("infinite").clicked() {
                    commands.push(Command::Run);
                }
                if ui.button("save").clicked() {
                    commands.push(Command::Save);
                }
                if ui.button("fit to window").clicked() {
                    commands.push(Command::FitToWindow);
                }
            });

            ui.separator();
            egui::ComboBox::from_label("examples")
                .selected_text("load…")
                .show_ui(ui, |ui| {
                    for pattern in Pattern::ALL {
                        if ui.selectable_label(false, pattern.name()).clicked() {
                            commands.push(Command::LoadPreset(pattern));
                        }
                    }
                });

            ui.separator();
            ui.label(format!("Step: {}", sim.steps()));
            ui.label(if sim.is_running() { "Running" } else { "Idle" });
            ui.label(format!("Scale: {:.2}", sim.view().scale()));
            ui.label(format!("Block size: {} px", sim.view().block_size()));
            ui.label(format!("Grid: {}x{}", sim.grid().cols(), sim.grid().rows()));
            ui.label(format!("Live Cells: {}", sim.grid().live_count()));

            if let Some(status) = status {
                ui.separator();
                ui.label(status);
            }
        });

    commands
}
