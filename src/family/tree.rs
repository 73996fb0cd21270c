use std::collections::HashSet;

use super::index::{ParentRole, RelationshipIndex};
use super::model::Member;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
    Root,
    Parent(ParentRole),
    Spouse,
    Child,
}

impl NodeRole {
    pub fn label(self) -> &'static str {
        match self {
            Self::Root => "Root",
            Self::Parent(role) => role.label(),
            Self::Spouse => "Spouse",
            Self::Child => "Child",
        }
    }
}

/// One member placed in the rooted hierarchy.
///
/// `depth` is the generation offset from the root: parents sit at -1, the
/// root and its spouse at 0, children at 1 and so on.
#[derive(Clone, Debug, PartialEq)]
pub struct TreeNode {
    pub member: Member,
    pub role: NodeRole,
    pub parents: Vec<TreeNode>,
    pub children: Vec<TreeNode>,
    pub spouse: Option<Box<TreeNode>>,
    pub depth: i32,
    /// Set on nodes cut off by the depth limit that have children in the index.
    pub has_more_children: bool,
}

impl TreeNode {
    fn leaf(member: &Member, role: NodeRole, depth: i32) -> Self {
        Self {
            member: member.clone(),
            role,
            parents: Vec::new(),
            children: Vec::new(),
            spouse: None,
            depth,
            has_more_children: false,
        }
    }

    pub fn id(&self) -> &str {
        &self.member.id
    }

    pub fn parents_with_role(&self, role: ParentRole) -> Vec<&TreeNode> {
        self.parents
            .iter()
            .filter(|parent| parent.role == NodeRole::Parent(role))
            .collect()
    }

    /// Every node of the tree, parents first, then the node, its spouse and
    /// its descendants depth-first.
    pub fn nodes(&self) -> Vec<&TreeNode> {
        let mut nodes = Vec::new();
        nodes.extend(self.parents.iter());
        self.collect_descendants(&mut nodes);
        nodes
    }

    fn collect_descendants<'a>(&'a self, nodes: &mut Vec<&'a TreeNode>) {
        nodes.push(self);
        if let Some(spouse) = &self.spouse {
            nodes.push(spouse);
        }
        for child in &self.children {
            child.collect_descendants(nodes);
        }
    }

    pub fn find(&self, id: &str) -> Option<&TreeNode> {
        self.nodes().into_iter().find(|node| node.id() == id)
    }
}

/// Grows the hierarchy around `root_id`.
///
/// The root's parents are always attached one generation up. Children (with
/// their spouses) are expanded while the generation is below `max_depth`. A
/// member already on the path from the root is never expanded again, so
/// cyclic input terminates.
pub fn build_tree(root_id: &str, index: &RelationshipIndex, max_depth: u32) -> Option<TreeNode> {
    let root = index.member(root_id)?;

    let mut path = HashSet::new();
    let mut node = expand(index, root, NodeRole::Root, 0, max_depth, &mut path);

    node.parents = index
        .parents(root_id)
        .into_iter()
        .map(|parent| {
            let role = ParentRole::from_gender(parent.gender);
            TreeNode::leaf(parent, NodeRole::Parent(role), -1)
        })
        .collect();

    Some(node)
}

fn expand<'a>(
    index: &'a RelationshipIndex,
    member: &'a Member,
    role: NodeRole,
    level: u32,
    max_depth: u32,
    path: &mut HashSet<&'a str>,
) -> TreeNode {
    let depth = level as i32;
    path.insert(member.id.as_str());

    let spouse = index
        .spouse(&member.id)
        .filter(|spouse| !path.contains(spouse.id.as_str()))
        .map(|spouse| Box::new(TreeNode::leaf(spouse, NodeRole::Spouse, depth)));

    let candidates = index
        .children(&member.id)
        .into_iter()
        .filter(|child| !path.contains(child.id.as_str()))
        .collect::<Vec<_>>();

    let (children, has_more_children) = if level < max_depth {
        let children = candidates
            .into_iter()
            .map(|child| expand(index, child, NodeRole::Child, level + 1, max_depth, path))
            .collect();
        (children, false)
    } else {
        (Vec::new(), !candidates.is_empty())
    };

    path.remove(member.id.as_str());

    TreeNode {
        member: member.clone(),
        role,
        parents: Vec::new(),
        children,
        spouse,
        depth,
        has_more_children,
    }
}
