//! Main application module

mod menu;

use crate::actions::dispatch_action;
use crate::config::AppConfig;
use crate::panels::{ComponentListPanel, Panel, ViewportPanel};
use crate::state::{AppAction, SharedAppState, create_shared_state};
use crate::theme::apply_theme;

pub use menu::{MenuAction, render_menu_bar};

/// Main application
pub struct ArchVizApp {
    app_state: SharedAppState,
    viewport: ViewportPanel,
    component_list: ComponentListPanel,
    show_component_list: bool,
}

impl ArchVizApp {
    /// Create a new app
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        apply_theme(&cc.egui_ctx);
        Self::with_config(AppConfig::startup())
    }

    /// Create the app from an explicit configuration
    pub fn with_config(config: AppConfig) -> Self {
        let app_state = create_shared_state(&config);
        if let Some(path) = config.topology {
            app_state.lock().queue_action(AppAction::LoadTopology(path));
        }

        Self {
            app_state,
            viewport: ViewportPanel::new(),
            component_list: ComponentListPanel::new(),
            show_component_list: true,
        }
    }

    /// Shared state, for hosts that drive the app programmatically
    pub fn app_state(&self) -> &SharedAppState {
        &self.app_state
    }

    /// Process pending actions
    fn process_actions(&mut self) {
        let actions = self.app_state.lock().take_pending_actions();
        for action in actions {
            dispatch_action(action, &self.app_state);
        }
    }
}

impl eframe::App for ArchVizApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Process pending actions
        self.process_actions();

        // Menu bar
        if let Some(menu_action) = render_menu_bar(ctx, &self.app_state) {
            match menu_action {
                MenuAction::ToggleComponentList => {
                    self.show_component_list = !self.show_component_list;
                }
            }
        }

        if self.show_component_list {
            egui::SidePanel::left("component_list")
                .resizable(true)
                .default_width(240.0)
                .show(ctx, |ui| self.component_list.ui(ui, &self.app_state));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::none())
            .show(ctx, |ui| self.viewport.ui(ui, &self.app_state));
    }
}
