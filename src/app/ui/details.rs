use eframe::egui::{self, RichText, Ui};

use crate::family::{Member, ParentRole, RelationshipIndex, RelationshipType};
use crate::util::lifespan;

use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn draw_details(&mut self, ui: &mut Ui) {
        ui.heading("Member Details");
        ui.add_space(6.0);

        let Some(selected_id) = self.viewport.selected().map(str::to_owned) else {
            ui.label("Click a card to see its relationships.");
            return;
        };

        let Some(member) = self.snapshot.index.member(&selected_id) else {
            ui.label("Selected member is no longer in the family.");
            return;
        };

        ui.label(RichText::new(member.full_name()).strong());
        ui.small(member.id.as_str());
        let drawn = self
            .tree_cache
            .as_ref()
            .and_then(|cache| cache.tree.as_ref())
            .is_some_and(|tree| tree.find(&selected_id).is_some());
        if !drawn {
            ui.small("Not drawn in the current tree.");
        }
        ui.add_space(6.0);

        ui.label(format!("Gender: {}", member.gender.label()));
        if let Some(lifespan) = lifespan(member) {
            ui.label(format!("Lifespan: {lifespan}"));
        }
        ui.label(if member.is_living { "Living" } else { "Deceased" });
        if let Some(photo) = &member.photo_url {
            ui.small(format!("Photo: {photo}"));
        }

        let mut next_selection = None;
        let mut next_root = None;

        if selected_id != self.root_id && ui.button("Make root").clicked() {
            next_root = Some(selected_id.clone());
        }

        ui.separator();
        ui.label(RichText::new("Immediate family").strong());
        let family = immediate_family(&self.snapshot.index, &selected_id);
        if family.is_empty() {
            ui.label("Nobody linked yet.");
        }
        for (label, relative) in family {
            if ui
                .link(format!("{label}: {}", relative.full_name()))
                .on_hover_text(relative.id.as_str())
                .clicked()
            {
                next_selection = Some(relative.id.clone());
            }
        }

        ui.separator();
        ui.label(RichText::new("Recorded relationships").strong());

        let relationships = self.snapshot.index.relationships_of(&selected_id);
        if relationships.is_empty() {
            ui.label("No recorded relationships.");
        } else {
            egui::ScrollArea::vertical()
                .id_salt("relationships_scroll")
                .max_height(320.0)
                .auto_shrink([false, true])
                .show(ui, |ui| {
                    for relationship in relationships {
                        let Some(other_id) = relationship.other_end(&selected_id) else {
                            continue;
                        };
                        let Some(other) = self.snapshot.index.member(other_id) else {
                            continue;
                        };

                        // The label names the other member's role for the selected one.
                        let label = format!(
                            "{}: {}",
                            relationship.display_label(other_id, other.gender),
                            other.full_name()
                        );
                        if ui.link(label).on_hover_text(other_id).clicked() {
                            next_selection = Some(other_id.to_owned());
                        }
                    }
                });
        }

        if let Some(id) = next_root {
            self.set_root(id);
        } else if let Some(id) = next_selection {
            self.viewport.select(Some(id));
        }
    }
}

/// Parents by role, then spouse, children, siblings and extended kin.
fn immediate_family<'a>(
    index: &'a RelationshipIndex,
    member_id: &str,
) -> Vec<(&'static str, &'a Member)> {
    let mut rows = Vec::new();

    for role in [ParentRole::Father, ParentRole::Mother, ParentRole::Parent] {
        for parent in index.parents_with_role(member_id, role) {
            rows.push((role.label(), parent));
        }
    }
    if let Some(spouse) = index.spouse(member_id) {
        rows.push((RelationshipType::Spouse.label_for(spouse.gender), spouse));
    }
    for child in index.children(member_id) {
        rows.push((RelationshipType::Child.label_for(child.gender), child));
    }
    for sibling in index.siblings(member_id) {
        rows.push((RelationshipType::Sibling.label_for(sibling.gender), sibling));
    }
    for (kind, relative) in index.extended(member_id) {
        rows.push((kind.label_for(relative.gender), relative));
    }

    rows
}
