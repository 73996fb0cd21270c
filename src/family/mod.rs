mod index;
mod load;
mod model;
mod search;
mod tree;

pub use index::{ParentRole, RelationshipIndex};
pub use load::{FamilySnapshot, load_family_snapshot};
pub use model::{Gender, Member, RelationshipType};
pub use search::{SearchState, rank_members};
pub use tree::{NodeRole, TreeNode, build_tree};
