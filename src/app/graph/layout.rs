use eframe::egui::{Pos2, Rect, Vec2, pos2, vec2};

use crate::family::{Member, NodeRole, ParentRole, TreeNode};

use super::lines::{
    LineSegment, child_anchor, compute_lines, member_anchor, parent_anchor, spouse_anchor,
};

pub const CARD_SIZE: Vec2 = vec2(176.0, 68.0);
const CARD_SLOT: f32 = 200.0;
const ROW_GAP: f32 = 150.0;

pub struct PlacedCard {
    pub member: Member,
    pub role: NodeRole,
    pub depth: i32,
    pub center: Vec2,
    pub has_more_children: bool,
}

impl PlacedCard {
    pub fn world_rect(&self) -> Rect {
        Rect::from_center_size(self.center.to_pos2(), CARD_SIZE)
    }
}

/// World-space box around one member whose connectors are expressed in
/// percent of its size.
pub struct FamilyFrame {
    pub rect: Rect,
    pub lines: Vec<LineSegment>,
}

impl FamilyFrame {
    pub fn to_world(&self, relative: Pos2) -> Vec2 {
        vec2(
            self.rect.left() + relative.x / 100.0 * self.rect.width(),
            self.rect.top() + relative.y / 100.0 * self.rect.height(),
        )
    }
}

pub struct TreeLayout {
    pub cards: Vec<PlacedCard>,
    pub frames: Vec<FamilyFrame>,
    pub bounds: Rect,
}

/// Width of a node's own frame. Children sit at evenly spaced slots, so the
/// frame grows until neighbouring subtrees cannot overlap.
fn frame_width(node: &TreeNode) -> f32 {
    let child_count = node.children.len();
    let widest_child = node
        .children
        .iter()
        .map(allocation_width)
        .fold(0.0_f32, f32::max);

    let children_width = match child_count {
        0 => 0.0,
        1 => widest_child,
        count => (count + 1) as f32 * widest_child,
    };
    let parents_width = match node.parents.len() {
        0 | 1 => CARD_SLOT,
        count => (count + 1) as f32 * CARD_SLOT,
    };
    let spouse_width = if node.spouse.is_some() {
        2.0 * CARD_SLOT
    } else {
        0.0
    };

    CARD_SLOT
        .max(children_width)
        .max(parents_width)
        .max(spouse_width)
}

/// Horizontal room a subtree needs when centred on its member.
fn allocation_width(node: &TreeNode) -> f32 {
    let spouse_overhang = if node.spouse.is_some() {
        CARD_SLOT
    } else {
        0.0
    };
    frame_width(node) + spouse_overhang
}

/// Places the root at the world origin, parents one row up and descendants
/// one row down per generation.
pub fn layout_tree(root: &TreeNode) -> TreeLayout {
    let mut layout = TreeLayout {
        cards: Vec::new(),
        frames: Vec::new(),
        bounds: Rect::NOTHING,
    };

    place(root, Vec2::ZERO, &mut layout);

    for card in &layout.cards {
        layout.bounds = layout.bounds.union(card.world_rect());
    }

    layout
}

fn push_card(layout: &mut TreeLayout, node: &TreeNode, center: Vec2) {
    layout.cards.push(PlacedCard {
        member: node.member.clone(),
        role: node.role,
        depth: node.depth,
        center,
        has_more_children: node.has_more_children,
    });
}

fn place(node: &TreeNode, center: Vec2, layout: &mut TreeLayout) {
    let frame = FamilyFrame {
        rect: Rect::from_center_size(
            pos2(center.x, center.y),
            vec2(frame_width(node), 2.0 * ROW_GAP),
        ),
        lines: compute_lines(node),
    };

    push_card(layout, node, frame.to_world(member_anchor()));

    // Fathers on the left, mothers next, then parents of unrecorded gender.
    let parents = [ParentRole::Father, ParentRole::Mother, ParentRole::Parent]
        .into_iter()
        .flat_map(|role| node.parents_with_role(role))
        .collect::<Vec<_>>();
    let parent_count = parents.len();
    for (index, parent) in parents.into_iter().enumerate() {
        push_card(layout, parent, frame.to_world(parent_anchor(index, parent_count)));
    }

    if let Some(spouse) = &node.spouse {
        push_card(layout, spouse, frame.to_world(spouse_anchor()));
    }

    let child_count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        place(child, frame.to_world(child_anchor(index, child_count)), layout);
    }

    if !frame.lines.is_empty() {
        layout.frames.push(frame);
    }
}
