use crate::family::Member;

/// Leading four-digit year of an ISO-ish date such as `1931-04-02` or `1931`.
pub fn year_of(date: &str) -> Option<&str> {
    let year = date.trim().get(..4)?;
    year.chars().all(|c| c.is_ascii_digit()).then_some(year)
}

pub fn lifespan(member: &Member) -> Option<String> {
    let birth = member.birth_date.as_deref().and_then(year_of);
    let death = member.death_date.as_deref().and_then(year_of);

    match (birth, death) {
        (Some(birth), Some(death)) => Some(format!("{birth}–{death}")),
        (Some(birth), None) if member.is_living => Some(format!("b. {birth}")),
        (Some(birth), None) => Some(format!("{birth}–?")),
        (None, Some(death)) => Some(format!("d. {death}")),
        (None, None) if !member.is_living => Some("deceased".to_owned()),
        (None, None) => None,
    }
}

/// Cuts `text` to at most `max_chars` characters, ending with an ellipsis.
pub fn truncate_label(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_owned();
    }
    if max_chars == 0 {
        return String::new();
    }

    let mut truncated = text.chars().take(max_chars - 1).collect::<String>();
    truncated.push('…');
    truncated
}
