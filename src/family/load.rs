use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use tracing::{info, warn};

use super::index::RelationshipIndex;
use super::model::{Member, Relationship};

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSnapshot {
    #[serde(default)]
    root_member_id: Option<String>,
    #[serde(default)]
    members: Vec<Member>,
    #[serde(default)]
    relationships: Vec<Relationship>,
}

/// A loaded family: the raw records plus the index built over them.
#[derive(Clone, Debug)]
pub struct FamilySnapshot {
    pub default_root_id: String,
    pub members: Vec<Member>,
    pub relationships: Vec<Relationship>,
    pub index: RelationshipIndex,
}

pub fn load_family_snapshot(path: &Path) -> Result<FamilySnapshot> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read family file {}", path.display()))?;

    let snapshot = parse_family_snapshot(&raw, &path.display().to_string())
        .with_context(|| format!("failed to parse family file {}", path.display()))?;

    info!(
        path = %path.display(),
        members = snapshot.members.len(),
        relationships = snapshot.index.relationship_count(),
        "loaded family snapshot"
    );

    Ok(snapshot)
}

pub fn parse_family_snapshot(raw: &str, source: &str) -> Result<FamilySnapshot> {
    let parsed: RawSnapshot = serde_json::from_str(raw).context("invalid family JSON")?;

    let mut seen = HashSet::with_capacity(parsed.members.len());
    let mut members = Vec::with_capacity(parsed.members.len());
    for member in parsed.members {
        if member.id.trim().is_empty() {
            warn!("dropping member without an id");
            continue;
        }
        if !seen.insert(member.id.clone()) {
            warn!(member = %member.id, "dropping duplicate member id");
            continue;
        }
        members.push(member);
    }

    if members.is_empty() {
        return Err(anyhow!("family file {source} contains no members"));
    }

    let default_root_id = parsed
        .root_member_id
        .filter(|id| seen.contains(id))
        .or_else(|| members.first().map(|member| member.id.clone()))
        .ok_or_else(|| anyhow!("family members are unexpectedly empty"))?;

    let index = RelationshipIndex::build(&members, &parsed.relationships);

    Ok(FamilySnapshot {
        default_root_id,
        members,
        relationships: parsed.relationships,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::build_tree;

    const SAMPLE: &str = include_str!("../../data/sample_family.json");

    #[test]
    fn bundled_sample_loads_and_roots() {
        let snapshot = parse_family_snapshot(SAMPLE, "sample").unwrap();

        assert!(snapshot.index.contains(&snapshot.default_root_id));
        let tree = build_tree(&snapshot.default_root_id, &snapshot.index, 2).unwrap();
        assert_eq!(tree.id(), snapshot.default_root_id);
        assert_eq!(tree.parents.len(), 2);
        assert!(!tree.children.is_empty());
    }

    #[test]
    fn root_falls_back_to_first_member() {
        let snapshot = parse_family_snapshot(
            r#"{"rootMemberId":"ghost","members":[{"id":"a"},{"id":"b"}]}"#,
            "inline",
        )
        .unwrap();

        assert_eq!(snapshot.default_root_id, "a");
        assert!(snapshot.relationships.is_empty());
    }

    #[test]
    fn duplicate_and_blank_member_ids_are_dropped() {
        let snapshot = parse_family_snapshot(
            r#"{"members":[{"id":"a","firstName":"One"},{"id":"a","firstName":"Two"},{"id":" "}]}"#,
            "inline",
        )
        .unwrap();

        assert_eq!(snapshot.members.len(), 1);
        assert_eq!(snapshot.members[0].first_name, "One");
    }

    #[test]
    fn empty_member_list_is_an_error() {
        let error = parse_family_snapshot(r#"{"members":[]}"#, "inline").unwrap_err();

        assert!(error.to_string().contains("no members"));
    }

    #[test]
    fn invalid_json_reports_context() {
        let error = parse_family_snapshot("{not json", "inline").unwrap_err();

        assert!(error.to_string().contains("invalid family JSON"));
    }

    #[test]
    fn missing_file_reports_path() {
        let error = load_family_snapshot(Path::new("/definitely/not/here.json")).unwrap_err();

        assert!(format!("{error:#}").contains("/definitely/not/here.json"));
    }
}
