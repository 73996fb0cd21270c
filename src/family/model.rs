use serde::Deserialize;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl Gender {
    pub fn label(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
            Self::Other => "other",
            Self::Unspecified => "unspecified",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: Gender,
    #[serde(default = "default_is_living")]
    pub is_living: bool,
    #[serde(default, alias = "photo")]
    pub photo_url: Option<String>,
    #[serde(default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub death_date: Option<String>,
}

fn default_is_living() -> bool {
    true
}

impl Member {
    pub fn full_name(&self) -> String {
        match (self.first_name.trim(), self.last_name.trim()) {
            ("", "") => self.id.clone(),
            (first, "") => first.to_owned(),
            ("", last) => last.to_owned(),
            (first, last) => format!("{first} {last}"),
        }
    }
}

/// Kind of edge between two members.
///
/// `Parent` reads "from is the parent of to"; `Child` reads "from is the
/// child of to". Everything past `Sibling` is extended kin, kept for labels
/// but never used to grow the tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    Parent,
    Child,
    Spouse,
    Sibling,
    Grandparent,
    Grandchild,
    AuntUncle,
    NieceNephew,
    Cousin,
    InLaw,
    Godparent,
    Godchild,
    StepParent,
    StepChild,
    #[serde(other)]
    Unknown,
}

impl RelationshipType {
    /// The same edge read from the other endpoint.
    pub fn inverse(self) -> Self {
        match self {
            Self::Parent => Self::Child,
            Self::Child => Self::Parent,
            Self::Grandparent => Self::Grandchild,
            Self::Grandchild => Self::Grandparent,
            Self::AuntUncle => Self::NieceNephew,
            Self::NieceNephew => Self::AuntUncle,
            Self::Godparent => Self::Godchild,
            Self::Godchild => Self::Godparent,
            Self::StepParent => Self::StepChild,
            Self::StepChild => Self::StepParent,
            symmetric => symmetric,
        }
    }

    /// Display label for the member on the "from" side of an edge of this
    /// type, given that member's gender.
    pub fn label_for(self, gender: Gender) -> &'static str {
        use Gender::{Female, Male};

        match (self, gender) {
            (Self::Parent, Male) => "Father",
            (Self::Parent, Female) => "Mother",
            (Self::Parent, _) => "Parent",
            (Self::Child, Male) => "Son",
            (Self::Child, Female) => "Daughter",
            (Self::Child, _) => "Child",
            (Self::Spouse, Male) => "Husband",
            (Self::Spouse, Female) => "Wife",
            (Self::Spouse, _) => "Spouse",
            (Self::Sibling, Male) => "Brother",
            (Self::Sibling, Female) => "Sister",
            (Self::Sibling, _) => "Sibling",
            (Self::Grandparent, Male) => "Grandfather",
            (Self::Grandparent, Female) => "Grandmother",
            (Self::Grandparent, _) => "Grandparent",
            (Self::Grandchild, Male) => "Grandson",
            (Self::Grandchild, Female) => "Granddaughter",
            (Self::Grandchild, _) => "Grandchild",
            (Self::AuntUncle, Male) => "Uncle",
            (Self::AuntUncle, Female) => "Aunt",
            (Self::AuntUncle, _) => "Aunt/Uncle",
            (Self::NieceNephew, Male) => "Nephew",
            (Self::NieceNephew, Female) => "Niece",
            (Self::NieceNephew, _) => "Niece/Nephew",
            (Self::Cousin, _) => "Cousin",
            (Self::InLaw, _) => "In-law",
            (Self::Godparent, Male) => "Godfather",
            (Self::Godparent, Female) => "Godmother",
            (Self::Godparent, _) => "Godparent",
            (Self::Godchild, _) => "Godchild",
            (Self::StepParent, Male) => "Stepfather",
            (Self::StepParent, Female) => "Stepmother",
            (Self::StepParent, _) => "Step-parent",
            (Self::StepChild, Male) => "Stepson",
            (Self::StepChild, Female) => "Stepdaughter",
            (Self::StepChild, _) => "Stepchild",
            (Self::Unknown, _) => "Relative",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relationship {
    pub id: String,
    pub from_id: String,
    pub to_id: String,
    pub relationship_type: RelationshipType,
    #[serde(default)]
    pub specific_label: Option<String>,
}

impl Relationship {
    /// Label shown for `member_id` when looking at this edge. The free-text
    /// override names the "from" side only.
    pub fn display_label(&self, member_id: &str, gender: Gender) -> String {
        if member_id == self.from_id
            && let Some(label) = self
                .specific_label
                .as_deref()
                .map(str::trim)
                .filter(|label| !label.is_empty())
        {
            return label.to_owned();
        }

        let kind = if member_id == self.from_id {
            self.relationship_type
        } else {
            self.relationship_type.inverse()
        };
        kind.label_for(gender).to_owned()
    }

    pub fn other_end(&self, member_id: &str) -> Option<&str> {
        if member_id == self.from_id {
            Some(&self.to_id)
        } else if member_id == self.to_id {
            Some(&self.from_id)
        } else {
            None
        }
    }
}
