use eframe::egui::{Pos2, pos2};

use crate::family::TreeNode;

/// Rows of a family frame, in percent of its height.
pub const PARENT_ROW_Y: f32 = 0.0;
pub const MEMBER_ROW_Y: f32 = 50.0;
pub const CHILD_BAR_Y: f32 = 75.0;
pub const CHILD_ROW_Y: f32 = 100.0;

pub const MEMBER_X: f32 = 50.0;
pub const SPOUSE_X: f32 = 100.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineKind {
    ParentBar,
    ParentDrop,
    SpouseLink,
    ChildStem,
    ChildBar,
    ChildDrop,
}

/// A connector in frame-relative percent coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    pub kind: LineKind,
    pub from: Pos2,
    pub to: Pos2,
}

impl LineSegment {
    fn new(kind: LineKind, from: Pos2, to: Pos2) -> Self {
        Self { kind, from, to }
    }
}

/// X of the `index`-th of `count` evenly spaced slots.
pub fn slot_x(index: usize, count: usize) -> f32 {
    if count <= 1 {
        return MEMBER_X;
    }
    let spacing = 100.0 / (count + 1) as f32;
    (index + 1) as f32 * spacing
}

pub fn parent_anchor(index: usize, count: usize) -> Pos2 {
    pos2(slot_x(index, count), PARENT_ROW_Y)
}

pub fn child_anchor(index: usize, count: usize) -> Pos2 {
    pos2(slot_x(index, count), CHILD_ROW_Y)
}

pub fn member_anchor() -> Pos2 {
    pos2(MEMBER_X, MEMBER_ROW_Y)
}

pub fn spouse_anchor() -> Pos2 {
    pos2(SPOUSE_X, MEMBER_ROW_Y)
}

/// Connectors for one node's family frame: parents first, then the spouse,
/// then children.
///
/// A single child hangs straight below the member. Two or more children get
/// a stem, one bar and a drop per child at `(i + 1) * 100 / (n + 1)`.
pub fn compute_lines(node: &TreeNode) -> Vec<LineSegment> {
    let mut lines = Vec::new();
    let member = member_anchor();

    let parent_count = node.parents.len();
    if parent_count > 0 {
        if parent_count >= 2 {
            lines.push(LineSegment::new(
                LineKind::ParentBar,
                parent_anchor(0, parent_count),
                parent_anchor(parent_count - 1, parent_count),
            ));
        }
        lines.push(LineSegment::new(
            LineKind::ParentDrop,
            pos2(MEMBER_X, PARENT_ROW_Y),
            member,
        ));
    }

    if node.spouse.is_some() {
        lines.push(LineSegment::new(LineKind::SpouseLink, member, spouse_anchor()));
    }

    match node.children.len() {
        0 => {}
        1 => lines.push(LineSegment::new(
            LineKind::ChildDrop,
            member,
            child_anchor(0, 1),
        )),
        count => {
            lines.push(LineSegment::new(
                LineKind::ChildStem,
                member,
                pos2(MEMBER_X, CHILD_BAR_Y),
            ));
            lines.push(LineSegment::new(
                LineKind::ChildBar,
                pos2(slot_x(0, count), CHILD_BAR_Y),
                pos2(slot_x(count - 1, count), CHILD_BAR_Y),
            ));
            for index in 0..count {
                let anchor = child_anchor(index, count);
                lines.push(LineSegment::new(
                    LineKind::ChildDrop,
                    pos2(anchor.x, CHILD_BAR_Y),
                    anchor,
                ));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::{Gender, Member, NodeRole, ParentRole};

    fn node(id: &str, role: NodeRole) -> TreeNode {
        TreeNode {
            member: Member {
                id: id.to_owned(),
                first_name: id.to_owned(),
                last_name: String::new(),
                gender: Gender::Unspecified,
                is_living: true,
                photo_url: None,
                birth_date: None,
                death_date: None,
            },
            role,
            parents: Vec::new(),
            children: Vec::new(),
            spouse: None,
            depth: 0,
            has_more_children: false,
        }
    }

    fn with_children(count: usize) -> TreeNode {
        let mut root = node("root", NodeRole::Root);
        root.children = (0..count)
            .map(|index| node(&format!("c{index}"), NodeRole::Child))
            .collect();
        root
    }

    fn count(lines: &[LineSegment], kind: LineKind) -> usize {
        lines.iter().filter(|line| line.kind == kind).count()
    }

    #[test]
    fn two_children_get_a_bar_and_two_drops() {
        let lines = compute_lines(&with_children(2));

        assert_eq!(count(&lines, LineKind::ChildBar), 1);
        assert_eq!(count(&lines, LineKind::ChildDrop), 2);

        let drops = lines
            .iter()
            .filter(|line| line.kind == LineKind::ChildDrop)
            .map(|line| line.to.x)
            .collect::<Vec<_>>();
        let spacing = 100.0 / 3.0;
        assert!((drops[0] - spacing).abs() < 1e-4);
        assert!((drops[1] - 2.0 * spacing).abs() < 1e-4);
    }

    #[test]
    fn single_child_is_one_straight_line() {
        let lines = compute_lines(&with_children(1));

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::ChildDrop);
        assert_eq!(lines[0].from.x, lines[0].to.x);
        assert_eq!(count(&lines, LineKind::ChildBar), 0);
    }

    #[test]
    fn no_children_means_no_child_lines() {
        let lines = compute_lines(&with_children(0));

        assert!(lines.is_empty());
    }

    #[test]
    fn bar_spans_first_to_last_drop() {
        let lines = compute_lines(&with_children(4));
        let bar = lines
            .iter()
            .find(|line| line.kind == LineKind::ChildBar)
            .unwrap();

        assert!((bar.from.x - 20.0).abs() < 1e-4);
        assert!((bar.to.x - 80.0).abs() < 1e-4);
        assert_eq!(bar.from.y, bar.to.y);
        assert_eq!(count(&lines, LineKind::ChildStem), 1);
    }

    #[test]
    fn two_parents_are_joined_before_the_drop() {
        let mut root = node("root", NodeRole::Root);
        root.parents = vec![
            node("dad", NodeRole::Parent(ParentRole::Father)),
            node("mum", NodeRole::Parent(ParentRole::Mother)),
        ];

        let lines = compute_lines(&root);

        assert_eq!(lines[0].kind, LineKind::ParentBar);
        assert_eq!(lines[1].kind, LineKind::ParentDrop);
        assert_eq!(lines[1].to, member_anchor());
        assert_eq!(lines[0].from.y, lines[0].to.y);
    }

    #[test]
    fn one_parent_has_only_the_drop() {
        let mut root = node("root", NodeRole::Root);
        root.parents = vec![node("mum", NodeRole::Parent(ParentRole::Mother))];

        let lines = compute_lines(&root);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::ParentDrop);
    }

    #[test]
    fn spouse_gets_a_horizontal_link() {
        let mut root = node("root", NodeRole::Root);
        root.spouse = Some(Box::new(node("partner", NodeRole::Spouse)));

        let lines = compute_lines(&root);

        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].kind, LineKind::SpouseLink);
        assert_eq!(lines[0].from.y, lines[0].to.y);
        assert_eq!(lines[0].to, spouse_anchor());
    }
}
