//! Component list panel
//!
//! Components grouped by layer. Clicking a row selects the component, the
//! same as clicking its box in the viewport.

use av_core::{ComponentKind, Topology, TopologySource};

use crate::panels::Panel;
use crate::state::{AppAction, SharedAppState};
use crate::theme::palette;

/// Side panel listing every component
#[derive(Default)]
pub struct ComponentListPanel {
    filter: String,
}

impl ComponentListPanel {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Incoming and outgoing connection counts of a component
fn connection_counts(topology: &Topology, name: &str) -> (usize, usize) {
    let incoming = topology.connections.iter().filter(|c| c.to == name).count();
    let outgoing = topology.connections.iter().filter(|c| c.from == name).count();
    (incoming, outgoing)
}

fn kind_swatch(ui: &mut egui::Ui, kind: ComponentKind) {
    let (rect, _) = ui.allocate_exact_size(egui::vec2(10.0, 10.0), egui::Sense::hover());
    ui.painter()
        .rect_filled(rect, 2.0, palette::rgba(kind.legend_color(), 1.0));
}

impl Panel for ComponentListPanel {
    fn name(&self) -> &str {
        "Components"
    }

    fn ui(&mut self, ui: &mut egui::Ui, app_state: &SharedAppState) {
        ui.heading(self.name());
        ui.horizontal(|ui| {
            ui.label("Filter:");
            ui.text_edit_singleline(&mut self.filter);
        });
        ui.separator();

        let filter = self.filter.to_lowercase();
        let mut actions = Vec::new();
        {
            let state = app_state.lock();
            let selected = state.session.selected();

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() - 160.0)
                .show(ui, |ui| {
                    for kind in ComponentKind::ALL {
                        let components: Vec<_> = state
                            .topology
                            .components_of_kind(kind)
                            .filter(|c| {
                                filter.is_empty() || c.name.to_lowercase().contains(&filter)
                            })
                            .collect();
                        if components.is_empty() {
                            continue;
                        }

                        ui.horizontal(|ui| {
                            kind_swatch(ui, kind);
                            ui.strong(kind.layer_label());
                        });
                        ui.indent(kind.as_str(), |ui| {
                            for component in components {
                                let is_selected = selected == Some(component.name.as_str());
                                if ui.selectable_label(is_selected, &component.name).clicked() {
                                    actions
                                        .push(AppAction::SelectComponent(component.name.clone()));
                                }
                            }
                        });
                    }
                });

            ui.separator();
            match selected.and_then(|name| state.topology.component(name)) {
                Some(component) => {
                    let (incoming, outgoing) = connection_counts(&state.topology, &component.name);
                    ui.strong(&component.name);
                    ui.label(format!("Layer: {}", component.kind));
                    ui.label(format!(
                        "Position: ({:.1}, {:.1}, {:.1})",
                        component.position[0], component.position[1], component.position[2]
                    ));
                    ui.label(format!("Connections: {} in, {} out", incoming, outgoing));
                    if ui.button("Clear Selection").clicked() {
                        actions.push(AppAction::ClearSelection);
                    }
                }
                None => {
                    ui.colored_label(palette::TEXT_SECONDARY, "Nothing selected");
                }
            }

            if let Some(error) = &state.last_error {
                ui.separator();
                ui.colored_label(palette::ERROR, error);
            }
        }

        let mut state = app_state.lock();
        for action in actions {
            state.queue_action(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connection_counts() {
        let topology = Topology::builtin();
        assert_eq!(connection_counts(&topology, "Transaction Service"), (1, 5));
        assert_eq!(connection_counts(&topology, "HSM"), (1, 0));
        assert_eq!(connection_counts(&topology, "Mainframe"), (0, 0));
    }
}
