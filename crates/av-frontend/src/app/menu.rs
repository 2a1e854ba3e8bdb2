//! Menu bar rendering

use av_renderer::MissPolicy;

use crate::state::{AppAction, SharedAppState};

/// File dialog filter for topology files
const TOPOLOGY_FILTER: (&str, &[&str]) = ("Topology", &["ron"]);

/// Render the menu bar and return any triggered action
pub fn render_menu_bar(ctx: &egui::Context, app_state: &SharedAppState) -> Option<MenuAction> {
    let mut menu_action = None;

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                #[cfg(not(target_arch = "wasm32"))]
                {
                    if ui.button("Open Topology...").clicked() {
                        if let Some(path) = rfd::FileDialog::new()
                            .add_filter(TOPOLOGY_FILTER.0, TOPOLOGY_FILTER.1)
                            .pick_file()
                        {
                            app_state.lock().queue_action(AppAction::LoadTopology(path));
                        }
                        ui.close_menu();
                    }
                }
                #[cfg(target_arch = "wasm32")]
                {
                    if ui.button("Open Topology...").clicked() {
                        let app_state = app_state.clone();
                        wasm_bindgen_futures::spawn_local(async move {
                            if let Some(file) = rfd::AsyncFileDialog::new()
                                .add_filter(TOPOLOGY_FILTER.0, TOPOLOGY_FILTER.1)
                                .pick_file()
                                .await
                            {
                                let name = file.file_name();
                                let data = file.read().await;
                                app_state
                                    .lock()
                                    .queue_action(AppAction::LoadTopologyBytes { name, data });
                            }
                        });
                        ui.close_menu();
                    }
                }
                if ui.button("Built-in Diagram").clicked() {
                    app_state.lock().queue_action(AppAction::LoadBuiltin);
                    ui.close_menu();
                }
                ui.separator();
                if ui.button("Reset Camera").clicked() {
                    app_state.lock().queue_action(AppAction::ResetCamera);
                    ui.close_menu();
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
            });

            ui.menu_button("View", |ui| {
                let mut state = app_state.lock();
                let view = &mut state.view;
                ui.checkbox(&mut view.show_grid, "Grid");
                ui.checkbox(&mut view.show_rings, "Layer Rings");
                ui.checkbox(&mut view.show_legend, "Legend");
                ui.checkbox(&mut view.show_labels, "Labels");
                ui.checkbox(&mut view.show_particles, "Flow Particles");
                ui.separator();

                let mut clear_on_miss =
                    state.session.miss_policy() == MissPolicy::ClearSelection;
                if ui
                    .checkbox(&mut clear_on_miss, "Clear Selection on Miss")
                    .changed()
                {
                    let policy = if clear_on_miss {
                        MissPolicy::ClearSelection
                    } else {
                        MissPolicy::KeepSelection
                    };
                    state.queue_action(AppAction::SetMissPolicy(policy));
                }
                ui.separator();
                if ui.button("Toggle Component List").clicked() {
                    menu_action = Some(MenuAction::ToggleComponentList);
                    ui.close_menu();
                }
            });
        });
    });

    menu_action
}

/// Actions triggered by the menu
pub enum MenuAction {
    ToggleComponentList,
}
