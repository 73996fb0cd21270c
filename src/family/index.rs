use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::model::{Gender, Member, Relationship, RelationshipType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ParentRole {
    Father,
    Mother,
    Parent,
}

impl ParentRole {
    pub fn from_gender(gender: Gender) -> Self {
        match gender {
            Gender::Male => Self::Father,
            Gender::Female => Self::Mother,
            Gender::Other | Gender::Unspecified => Self::Parent,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Father => "Father",
            Self::Mother => "Mother",
            Self::Parent => "Parent",
        }
    }
}

/// An extended-kin edge seen from one member. `kind` is the role of the
/// linked member relative to the member owning the link.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct ExtendedLink {
    kind: RelationshipType,
    member: usize,
}

#[derive(Clone, Debug, Default)]
struct MemberLinks {
    parents: Vec<usize>,
    children: Vec<usize>,
    spouse: Option<usize>,
    siblings: Vec<usize>,
    extended: Vec<ExtendedLink>,
    relationships: Vec<usize>,
}

fn push_unique(slot: &mut Vec<usize>, value: usize) {
    if !slot.contains(&value) {
        slot.push(value);
    }
}

/// Lookup structure over one members/relationships snapshot.
#[derive(Clone, Debug, Default)]
pub struct RelationshipIndex {
    members: Vec<Member>,
    index_by_id: HashMap<String, usize>,
    links: Vec<MemberLinks>,
    relationships: Vec<Relationship>,
}

impl RelationshipIndex {
    pub fn build(members: &[Member], relationships: &[Relationship]) -> Self {
        let mut index = Self {
            members: Vec::with_capacity(members.len()),
            index_by_id: HashMap::with_capacity(members.len()),
            links: Vec::with_capacity(members.len()),
            relationships: Vec::new(),
        };

        for member in members {
            if index.index_by_id.contains_key(&member.id) {
                continue;
            }
            index
                .index_by_id
                .insert(member.id.clone(), index.members.len());
            index.members.push(member.clone());
            index.links.push(MemberLinks::default());
        }

        let mut seen = HashSet::new();
        for relationship in relationships {
            let (Some(&from), Some(&to)) = (
                index.index_by_id.get(&relationship.from_id),
                index.index_by_id.get(&relationship.to_id),
            ) else {
                debug!(
                    relationship = %relationship.id,
                    "skipping relationship with unknown member"
                );
                continue;
            };

            if from == to {
                debug!(relationship = %relationship.id, "skipping self-referential relationship");
                continue;
            }

            if !seen.insert((from, to, relationship.relationship_type)) {
                continue;
            }

            index.record(from, to, relationship);
        }

        index
    }

    fn record(&mut self, from: usize, to: usize, relationship: &Relationship) {
        let kind = relationship.relationship_type;
        match kind {
            RelationshipType::Parent => {
                push_unique(&mut self.links[from].children, to);
                push_unique(&mut self.links[to].parents, from);
            }
            RelationshipType::Child => {
                push_unique(&mut self.links[to].children, from);
                push_unique(&mut self.links[from].parents, to);
            }
            RelationshipType::Spouse => {
                self.links[from].spouse = Some(to);
                self.links[to].spouse = Some(from);
            }
            RelationshipType::Sibling => {
                push_unique(&mut self.links[from].siblings, to);
                push_unique(&mut self.links[to].siblings, from);
            }
            RelationshipType::Unknown => return,
            extended => {
                self.links[from].extended.push(ExtendedLink {
                    kind: extended.inverse(),
                    member: to,
                });
                self.links[to].extended.push(ExtendedLink {
                    kind: extended,
                    member: from,
                });
            }
        }

        let relationship_index = self.relationships.len();
        self.relationships.push(relationship.clone());
        self.links[from].relationships.push(relationship_index);
        self.links[to].relationships.push(relationship_index);
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    pub fn relationship_count(&self) -> usize {
        self.relationships.len()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index_by_id.contains_key(id)
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.index_by_id.get(id).map(|&index| &self.members[index])
    }

    fn links(&self, id: &str) -> Option<&MemberLinks> {
        self.index_by_id.get(id).map(|&index| &self.links[index])
    }

    fn resolve(&self, indices: &[usize]) -> Vec<&Member> {
        indices.iter().map(|&index| &self.members[index]).collect()
    }

    pub fn parents(&self, id: &str) -> Vec<&Member> {
        self.links(id)
            .map(|links| self.resolve(&links.parents))
            .unwrap_or_default()
    }

    pub fn children(&self, id: &str) -> Vec<&Member> {
        self.links(id)
            .map(|links| self.resolve(&links.children))
            .unwrap_or_default()
    }

    pub fn spouse(&self, id: &str) -> Option<&Member> {
        self.links(id)
            .and_then(|links| links.spouse)
            .map(|index| &self.members[index])
    }

    pub fn siblings(&self, id: &str) -> Vec<&Member> {
        self.links(id)
            .map(|links| self.resolve(&links.siblings))
            .unwrap_or_default()
    }

    pub fn extended(&self, id: &str) -> Vec<(RelationshipType, &Member)> {
        self.links(id)
            .map(|links| {
                links
                    .extended
                    .iter()
                    .map(|link| (link.kind, &self.members[link.member]))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Parents of `id` that fill the given role. Several members may share
    /// one role when their genders match.
    pub fn parents_with_role(&self, id: &str, role: ParentRole) -> Vec<&Member> {
        self.parents(id)
            .into_iter()
            .filter(|parent| ParentRole::from_gender(parent.gender) == role)
            .collect()
    }

    /// Accepted relationship records touching `id`, in indexing order.
    pub fn relationships_of(&self, id: &str) -> Vec<&Relationship> {
        self.links(id)
            .map(|links| {
                links
                    .relationships
                    .iter()
                    .map(|&index| &self.relationships[index])
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn member(id: &str, first: &str, gender: Gender) -> Member {
        Member {
            id: id.to_owned(),
            first_name: first.to_owned(),
            last_name: "Doe".to_owned(),
            gender,
            is_living: true,
            photo_url: None,
            birth_date: None,
            death_date: None,
        }
    }

    pub(crate) fn edge(id: &str, from: &str, to: &str, kind: RelationshipType) -> Relationship {
        Relationship {
            id: id.to_owned(),
            from_id: from.to_owned(),
            to_id: to.to_owned(),
            relationship_type: kind,
            specific_label: None,
        }
    }

    fn ids(members: Vec<&Member>) -> Vec<&str> {
        members.into_iter().map(|member| member.id.as_str()).collect()
    }

    fn family() -> Vec<Member> {
        vec![
            member("a", "Ann", Gender::Female),
            member("b", "Bob", Gender::Male),
            member("c", "Cat", Gender::Female),
            member("d", "Dan", Gender::Male),
        ]
    }

    #[test]
    fn parent_edge_is_recorded_from_both_ends() {
        let index = RelationshipIndex::build(
            &family(),
            &[edge("r1", "b", "a", RelationshipType::Parent)],
        );

        assert_eq!(ids(index.parents("a")), ["b"]);
        assert_eq!(ids(index.children("b")), ["a"]);
        assert!(index.children("a").is_empty());
    }

    #[test]
    fn child_edge_is_the_inverse_of_parent() {
        let index = RelationshipIndex::build(
            &family(),
            &[edge("r1", "a", "b", RelationshipType::Child)],
        );

        assert_eq!(ids(index.parents("a")), ["b"]);
        assert_eq!(ids(index.children("b")), ["a"]);
    }

    #[test]
    fn spouse_and_sibling_are_symmetric() {
        let index = RelationshipIndex::build(
            &family(),
            &[
                edge("r1", "b", "c", RelationshipType::Spouse),
                edge("r2", "a", "d", RelationshipType::Sibling),
            ],
        );

        assert_eq!(index.spouse("b").map(|m| m.id.as_str()), Some("c"));
        assert_eq!(index.spouse("c").map(|m| m.id.as_str()), Some("b"));
        assert_eq!(ids(index.siblings("a")), ["d"]);
        assert_eq!(ids(index.siblings("d")), ["a"]);
    }

    #[test]
    fn identical_triples_are_recorded_once() {
        let index = RelationshipIndex::build(
            &family(),
            &[
                edge("r1", "b", "a", RelationshipType::Parent),
                edge("r2", "b", "a", RelationshipType::Parent),
            ],
        );

        assert_eq!(ids(index.children("b")), ["a"]);
        assert_eq!(index.relationship_count(), 1);
    }

    #[test]
    fn different_types_for_one_pair_are_kept() {
        let index = RelationshipIndex::build(
            &family(),
            &[
                edge("r1", "a", "d", RelationshipType::Sibling),
                edge("r2", "a", "d", RelationshipType::Cousin),
            ],
        );

        assert_eq!(ids(index.siblings("a")), ["d"]);
        assert_eq!(index.extended("a").len(), 1);
        assert_eq!(index.relationships_of("d").len(), 2);
    }

    #[test]
    fn malformed_and_unknown_relationships_are_ignored() {
        let index = RelationshipIndex::build(
            &family(),
            &[
                edge("r1", "a", "a", RelationshipType::Parent),
                edge("r2", "a", "ghost", RelationshipType::Parent),
                edge("r3", "a", "b", RelationshipType::Unknown),
            ],
        );

        assert!(index.children("a").is_empty());
        assert!(index.parents("a").is_empty());
        assert!(index.extended("a").is_empty());
        assert!(index.spouse("a").is_none());
        assert!(index.children("ghost").is_empty());
        assert_eq!(index.relationship_count(), 0);
    }

    #[test]
    fn extended_kinds_record_the_role_of_the_other_member() {
        let index = RelationshipIndex::build(
            &family(),
            &[edge("r1", "b", "a", RelationshipType::Grandparent)],
        );

        let from_grandchild = index.extended("a");
        assert_eq!(from_grandchild.len(), 1);
        assert_eq!(from_grandchild[0].0, RelationshipType::Grandparent);
        assert_eq!(from_grandchild[0].1.id, "b");

        let from_grandparent = index.extended("b");
        assert_eq!(from_grandparent[0].0, RelationshipType::Grandchild);
    }

    #[test]
    fn same_gender_parents_share_a_role_without_dropping_either() {
        let members = vec![
            member("kid", "Kim", Gender::Other),
            member("m1", "Mia", Gender::Female),
            member("m2", "Meg", Gender::Female),
        ];
        let index = RelationshipIndex::build(
            &members,
            &[
                edge("r1", "m1", "kid", RelationshipType::Parent),
                edge("r2", "m2", "kid", RelationshipType::Parent),
            ],
        );

        assert_eq!(ids(index.parents_with_role("kid", ParentRole::Mother)), ["m1", "m2"]);
        assert!(index.parents_with_role("kid", ParentRole::Father).is_empty());
    }

    #[test]
    fn children_keep_insertion_order() {
        let index = RelationshipIndex::build(
            &family(),
            &[
                edge("r1", "a", "d", RelationshipType::Parent),
                edge("r2", "a", "b", RelationshipType::Parent),
                edge("r3", "a", "c", RelationshipType::Parent),
            ],
        );

        assert_eq!(ids(index.children("a")), ["d", "b", "c"]);
    }

    #[test]
    fn duplicate_member_ids_keep_the_first_record() {
        let mut members = family();
        members.push(member("a", "Impostor", Gender::Male));
        let index = RelationshipIndex::build(&members, &[]);

        assert_eq!(index.member_count(), 4);
        assert_eq!(index.member("a").map(|m| m.first_name.as_str()), Some("Ann"));
    }
}
