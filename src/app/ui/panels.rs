use std::path::Path;

use eframe::egui::{self, Align, Context, Layout, Vec2};
use tracing::{info, warn};

use crate::family::{FamilySnapshot, SearchState};

use super::super::graph::GestureInput;
use super::super::viewport::ViewportController;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) const MAX_DEPTH_LIMIT: u32 = 6;

    pub(in crate::app) fn new(
        snapshot: FamilySnapshot,
        snapshot_revision: u64,
        requested_root: Option<&str>,
        max_depth: u32,
    ) -> Self {
        let root_id = match requested_root {
            Some(id) if snapshot.index.contains(id) => id.to_owned(),
            Some(id) => {
                warn!(
                    requested = id,
                    fallback = %snapshot.default_root_id,
                    "requested root is not in the family"
                );
                snapshot.default_root_id.clone()
            }
            None => snapshot.default_root_id.clone(),
        };

        Self {
            snapshot,
            snapshot_revision,
            root_id,
            max_depth: max_depth.clamp(1, Self::MAX_DEPTH_LIMIT),
            search_query: String::new(),
            search: SearchState::default(),
            root_filter: String::new(),
            viewport: ViewportController::new(),
            gesture_input: GestureInput::default(),
            canvas_size: Vec2::ZERO,
            tree_cache: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        family_path: &Path,
        reload_requested: &mut bool,
        is_loading: bool,
    ) {
        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("kinfolk");
                    ui.separator();
                    ui.label(format!("file: {}", family_path.display()));
                    ui.label(format!("members: {}", self.snapshot.index.member_count()));
                    let linked = self.snapshot.index.relationship_count();
                    let skipped = self.snapshot.relationships.len().saturating_sub(linked);
                    if skipped > 0 {
                        ui.label(format!("relationships: {linked} ({skipped} skipped)"))
                            .on_hover_text("Duplicate, dangling or unrecognised relationships.");
                    } else {
                        ui.label(format!("relationships: {linked}"));
                    }
                    let reload_button =
                        ui.add_enabled(!is_loading, egui::Button::new("Reload family"));
                    if reload_button.clicked() {
                        *reload_requested = true;
                    }
                    if ui.button("Reset view").clicked() {
                        self.viewport.reset();
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let view = self.viewport.state();
                        let pan = view.pan_offset();
                        ui.label(format!(
                            "zoom {}%  pan {:.0}, {:.0}",
                            view.zoom_level(),
                            pan.x,
                            pan.y
                        ));
                        if let Some(root) = self.snapshot.index.member(&self.root_id) {
                            ui.label(format!("root: {}", root.full_name()));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(300.0)
            .show(ctx, |ui| self.draw_controls(ui));

        egui::SidePanel::right("details")
            .resizable(true)
            .default_width(320.0)
            .show(ctx, |ui| self.draw_details(ui));

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                if is_loading {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Reloading family tree...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                } else {
                    self.draw_tree(ui);
                }
            });
    }

    /// Re-roots the tree on `id`, recentres the canvas and selects it.
    pub(in crate::app) fn set_root(&mut self, id: String) {
        if id == self.root_id || !self.snapshot.index.contains(&id) {
            return;
        }

        info!(root = %id, "changing root member");
        self.viewport.pan_by(-self.viewport.pan_offset());
        self.viewport.select(Some(id.clone()));
        self.root_id = id;
    }
}
