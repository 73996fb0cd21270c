use crate::family::SearchState;

/// How a card is styled against the active search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum Emphasis {
    Neutral,
    Highlighted,
    Dimmed,
}

/// A blank query leaves every card neutral; otherwise matches are
/// highlighted and everything else dimmed.
pub(in crate::app) fn emphasis_for(search: &SearchState, member_id: &str) -> Emphasis {
    if !search.is_active() {
        Emphasis::Neutral
    } else if search.is_match(member_id) {
        Emphasis::Highlighted
    } else {
        Emphasis::Dimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::family::Member;

    fn members() -> Vec<Member> {
        serde_json::from_str(
            r#"[
                {"id":"jane","firstName":"Jane","lastName":"Doe"},
                {"id":"john","firstName":"John","lastName":"Roe"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn blank_query_is_neutral() {
        let members = members();
        let mut search = SearchState::default();
        search.update("   ", &members, 1);

        assert_eq!(emphasis_for(&search, "jane"), Emphasis::Neutral);
        assert_eq!(emphasis_for(&search, "john"), Emphasis::Neutral);
    }

    #[test]
    fn matches_light_up_and_the_rest_dim() {
        let members = members();
        let mut search = SearchState::default();
        search.update("jane", &members, 1);

        assert_eq!(emphasis_for(&search, "jane"), Emphasis::Highlighted);
        assert_eq!(emphasis_for(&search, "john"), Emphasis::Dimmed);
    }

    #[test]
    fn no_matches_dims_everything() {
        let members = members();
        let mut search = SearchState::default();
        search.update("zz", &members, 1);

        assert_eq!(emphasis_for(&search, "jane"), Emphasis::Dimmed);
    }
}
