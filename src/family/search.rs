use std::collections::HashSet;

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::model::Member;

/// Ids of members whose first or last name contains `query`, ignoring case.
///
/// Names are matched separately, so a query spanning the space between first
/// and last name never matches. A blank query matches nothing; otherwise the
/// query is matched as typed, surrounding spaces included.
pub fn match_members(query: &str, members: &[Member]) -> HashSet<String> {
    if query.trim().is_empty() {
        return HashSet::new();
    }
    let query = query.to_lowercase();

    members
        .iter()
        .filter(|member| {
            member.first_name.to_lowercase().contains(&query)
                || member.last_name.to_lowercase().contains(&query)
        })
        .map(|member| member.id.clone())
        .collect()
}

/// The active search query and the ids it currently matches.
#[derive(Clone, Debug, Default)]
pub struct SearchState {
    query: String,
    revision: u64,
    matching_ids: HashSet<String>,
}

impl SearchState {
    /// Recomputes matches when the query or the member snapshot changed.
    pub fn update(&mut self, query: &str, members: &[Member], revision: u64) {
        if self.query == query && self.revision == revision {
            return;
        }

        self.query = query.to_owned();
        self.revision = revision;
        self.matching_ids = match_members(query, members);
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// A blank query leaves the overlay neutral rather than highlighting
    /// nothing.
    pub fn is_active(&self) -> bool {
        !self.query.trim().is_empty()
    }

    pub fn matching_ids(&self) -> &HashSet<String> {
        &self.matching_ids
    }

    pub fn is_match(&self, id: &str) -> bool {
        self.matching_ids.contains(id)
    }
}

fn fuzzy_match_score(matcher: &SkimMatcherV2, text: &str, query: &str) -> Option<i64> {
    matcher
        .fuzzy_match(text, query)
        .or_else(|| matcher.fuzzy_match(&text.to_lowercase(), &query.to_lowercase()))
}

/// Members ranked by fuzzy score against their full name, best first. Used
/// by the root picker; a blank query returns every member in input order.
pub fn rank_members<'a>(query: &str, members: &'a [Member], limit: usize) -> Vec<&'a Member> {
    let query = query.trim();
    if query.is_empty() {
        return members.iter().take(limit).collect();
    }

    let matcher = SkimMatcherV2::default();
    let mut ranked = members
        .iter()
        .filter_map(|member| {
            fuzzy_match_score(&matcher, &member.full_name(), query).map(|score| (score, member))
        })
        .collect::<Vec<_>>();

    ranked.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.id.cmp(&b.1.id)));
    ranked.truncate(limit);
    ranked.into_iter().map(|(_score, member)| member).collect()
}
