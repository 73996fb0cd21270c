use eframe::egui::{self, Color32, RichText, Ui};

use crate::family::rank_members;

use super::super::ViewModel;
use super::super::viewport::{MAX_ZOOM, MIN_ZOOM};

const ROOT_PICKER_ROWS: usize = 12;

impl ViewModel {
    pub(in crate::app) fn draw_controls(&mut self, ui: &mut Ui) {
        ui.heading("Tree Controls");
        ui.separator();
        ui.add_space(4.0);

        ui.label("Search (first or last name)")
            .on_hover_text("Highlight matching members without changing the tree.");
        ui.text_edit_singleline(&mut self.search_query)
            .on_hover_text("Matches are highlighted, everyone else is dimmed.");
        self.search
            .update(&self.search_query, &self.snapshot.members, self.snapshot_revision);
        if self.search.is_active() {
            let match_count = self.search.matching_ids().len();
            if match_count == 0 {
                ui.label(RichText::new("No matches").color(Color32::from_rgb(241, 146, 94)));
            } else {
                ui.label(format!(
                    "{match_count} matching \"{}\"",
                    self.search.query().trim()
                ));
            }
        }

        ui.separator();

        ui.add(
            egui::Slider::new(&mut self.max_depth, 1..=Self::MAX_DEPTH_LIMIT)
                .text("Generations below root")
                .clamping(egui::SliderClamping::Always),
        )
        .on_hover_text("Descendants past this depth are marked but not drawn.");

        ui.separator();

        let mut zoom_level = self.viewport.zoom_level();
        if ui
            .add(
                egui::Slider::new(&mut zoom_level, MIN_ZOOM..=MAX_ZOOM)
                    .suffix("%")
                    .text("Zoom"),
            )
            .changed()
        {
            self.viewport.set_zoom(zoom_level);
        }

        ui.horizontal(|ui| {
            if ui.button("Zoom out").clicked() {
                self.viewport.zoom_out();
            }
            if ui.button("Zoom in").clicked() {
                self.viewport.zoom_in();
            }
            if ui.button("Fit").clicked() {
                self.fit_tree();
            }
            if ui
                .button("Reset")
                .on_hover_text("Back to 100%, centred, nothing selected.")
                .clicked()
            {
                self.viewport.reset();
            }
        });
        ui.small("Drag to pan, scroll or pinch to zoom. Double-click a card to make it the root.");

        ui.separator();

        egui::CollapsingHeader::new("Change root")
            .default_open(true)
            .show(ui, |ui| {
                ui.text_edit_singleline(&mut self.root_filter)
                    .on_hover_text("Fuzzy search over full names.");

                let mut next_root = None;
                egui::ScrollArea::vertical()
                    .id_salt("root_picker_scroll")
                    .max_height(280.0)
                    .auto_shrink([false, true])
                    .show(ui, |ui| {
                        let candidates = rank_members(
                            &self.root_filter,
                            self.snapshot.index.members(),
                            ROOT_PICKER_ROWS,
                        );
                        if candidates.is_empty() {
                            ui.label("Nobody matches.");
                        }
                        for member in candidates {
                            let is_root = member.id == self.root_id;
                            if ui
                                .selectable_label(is_root, member.full_name())
                                .on_hover_text(member.id.as_str())
                                .clicked()
                            {
                                next_root = Some(member.id.clone());
                            }
                        }
                    });

                if let Some(id) = next_root {
                    self.set_root(id);
                }
            });
    }
}
