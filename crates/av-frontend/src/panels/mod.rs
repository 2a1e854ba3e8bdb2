//! UI panels

mod component_list;
mod viewport;

pub use component_list::ComponentListPanel;
pub use viewport::ViewportPanel;

use crate::state::SharedAppState;

/// Panel trait for the application's UI regions
pub trait Panel {
    /// Panel name for headings
    fn name(&self) -> &str;

    /// Draw the panel UI
    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState);
}
