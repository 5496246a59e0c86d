use crate::core::speaker::{is_valid_name, normalize_name, Roster};
use crate::core::style::Style;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::HashSet;

pub const MIN_WORDS: usize = 500;
pub const MAX_WORDS: usize = 2500;

/// Field keys shared with the backend so that client-side and
/// server-reported errors render through the same mapping.
pub mod field {
    pub const SCRIPT_STYLE: &str = "script_style";
    pub const SPEAKERS: &str = "speakers";
    pub const SPEAKER_NAMES: &str = "speaker_names";
    pub const DESCRIPTION: &str = "description";
    pub const SERVER: &str = "server";
}

/// Everything that can go wrong with a create request, on either side
/// of the wire. All variants are recoverable by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    MissingStyle,
    /// No style means no allowed set at all; the message falls back to
    /// the generic one.
    InvalidSpeakerCount(Option<Style>),
    InvalidSpeakerName,
    DuplicateSpeakerName,
    InvalidRoleLayout(Style),
    TooShort(usize),
    TooLong(usize),
    ServerRejected(String),
    NetworkFailure,
}

impl ErrorKind {
    /// Which field the inline message belongs to.
    pub fn field_key(&self) -> &'static str {
        match self {
            ErrorKind::MissingStyle => field::SCRIPT_STYLE,
            ErrorKind::InvalidSpeakerCount(_) | ErrorKind::InvalidRoleLayout(_) => field::SPEAKERS,
            ErrorKind::InvalidSpeakerName | ErrorKind::DuplicateSpeakerName => field::SPEAKER_NAMES,
            ErrorKind::TooShort(_) | ErrorKind::TooLong(_) => field::DESCRIPTION,
            ErrorKind::ServerRejected(_) | ErrorKind::NetworkFailure => field::SERVER,
        }
    }

    pub fn message(&self) -> String {
        match self {
            ErrorKind::MissingStyle => "Please select a podcast style.".to_string(),
            ErrorKind::InvalidSpeakerCount(style) => match style {
                Some(style) => style.count_error(),
                None => "Choose 1, 2, or 3 speakers for this style.".to_string(),
            },
            ErrorKind::InvalidSpeakerName => {
                "Each speaker name must use letters and spaces only (no numbers or symbols)."
                    .to_string()
            }
            ErrorKind::DuplicateSpeakerName => {
                "Speaker names must be unique within the podcast.".to_string()
            }
            ErrorKind::InvalidRoleLayout(style) => style.layout_error(),
            ErrorKind::TooShort(count) => format!(
                "Your text must be at least {} words. Current length: {}.",
                MIN_WORDS, count
            ),
            ErrorKind::TooLong(count) => format!(
                "The text exceeds the {}-word limit. Current length: {}.",
                MAX_WORDS, count
            ),
            ErrorKind::ServerRejected(msg) => msg.clone(),
            ErrorKind::NetworkFailure => "Network error. Check backend is running.".to_string(),
        }
    }
}

/// Field name → inline message. Absence of a key means the field is
/// valid. At most one message is kept per field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub BTreeMap<String, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn add(&mut self, kind: &ErrorKind) {
        self.0.insert(kind.field_key().to_string(), kind.message());
    }

    /// Record a message only if the field has no message yet.
    fn add_if_clear(&mut self, kind: &ErrorKind) {
        let key = kind.field_key();
        if !self.0.contains_key(key) {
            self.0.insert(key.to_string(), kind.message());
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn clear_field(&mut self, field: &str) {
        self.0.remove(field);
    }

    /// Fold server-reported field errors into this mapping. The backend
    /// uses the same keys as the client-side checks, so the caller can
    /// render both identically.
    pub fn merge(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }
}

/// Gate for the style/speakers step. Pure function; order is
/// style → count → names-valid → names-unique → role-layout, one
/// message per field key.
pub fn validate_step1(
    style: Option<Style>,
    count: Option<usize>,
    roster: &Roster,
) -> ValidationErrors {
    let mut errs = ValidationErrors::new();

    if style.is_none() {
        errs.add(&ErrorKind::MissingStyle);
    }

    // With no style the allowed set is empty, so any count fails with
    // the generic message; every other check still runs.
    let count_ok = match (style, count) {
        (Some(style), Some(c)) if style.allowed_counts().contains(&c) => true,
        _ => {
            errs.add(&ErrorKind::InvalidSpeakerCount(style));
            false
        }
    };

    if roster
        .speakers()
        .iter()
        .any(|s| !is_valid_name(&s.name))
    {
        errs.add(&ErrorKind::InvalidSpeakerName);
    } else {
        let mut seen = HashSet::new();
        if roster
            .speakers()
            .iter()
            .any(|s| !seen.insert(normalize_name(&s.name)))
        {
            errs.add(&ErrorKind::DuplicateSpeakerName);
        }
    }

    // Role layout only makes sense once the count itself is valid; the
    // count error already occupies the speakers key otherwise.
    if let (true, Some(style)) = (count_ok && !roster.is_empty(), style) {
        let split = style
            .role_split(count.unwrap_or(0))
            .filter(|split| roster.hosts() == split.hosts && roster.guests() == split.guests);
        if split.is_none() {
            errs.add_if_clear(&ErrorKind::InvalidRoleLayout(style));
        }
    }

    errs
}

pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Gate for the text step: word count must lie in
/// [MIN_WORDS, MAX_WORDS] inclusive.
pub fn validate_description(text: &str) -> ValidationErrors {
    let mut errs = ValidationErrors::new();
    let words = count_words(text);
    if words < MIN_WORDS {
        errs.add(&ErrorKind::TooShort(words));
    } else if words > MAX_WORDS {
        errs.add(&ErrorKind::TooLong(words));
    }
    errs
}

/// Advisory sentence describing the expected role arrangement for the
/// current style and roster. Never a gate; stays consistent with the
/// rule table.
pub fn role_guidance(style: Style, roster: &Roster) -> String {
    if roster.is_empty() {
        return style.default_role_description().to_string();
    }
    let count = roster.len();
    let hosts = roster.hosts();
    let guests = roster.guests();

    match style {
        Style::Interview => {
            if count == 2 && hosts == 1 && guests == 1 {
                "The host interviews; the guest answers with insights and short stories."
                    .to_string()
            } else if count == 3 && hosts == 2 && guests == 1 {
                "Two hosts co-interview the guest, alternating questions and reactions."
                    .to_string()
            } else {
                "Interview supports either 2 speakers (1 host + 1 guest) or 3 speakers (2 hosts + 1 guest).".to_string()
            }
        }
        Style::Storytelling => {
            if count == 1 && hosts == 1 {
                "The host is the storyteller, carrying the narrative from start to finish."
                    .to_string()
            } else if count == 2 && hosts == 1 && guests == 1 {
                "The guest is the main storyteller; the host guides, reacts, and bridges scenes."
                    .to_string()
            } else if count == 3 && hosts == 1 && guests == 2 {
                "Both guests tell the story in parts; the host guides, reacts, and ties it together.".to_string()
            } else {
                style.default_role_description().to_string()
            }
        }
        Style::Educational => {
            if count == 1 && hosts == 1 {
                "The host teaches the topic with a clear, structured flow.".to_string()
            } else if hosts == 1 && guests >= 1 {
                "The host explains; guest(s) ask questions and add examples to reinforce learning.".to_string()
            } else {
                style.default_role_description().to_string()
            }
        }
        Style::Conversational => {
            if guests == 0 {
                "Co-hosts share opinions, react, and keep the pace natural and fun.".to_string()
            } else {
                "Conversational works best with co-hosts only; avoid guests here.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::speaker::{Role, Speaker};
    use crate::core::style::ALL_STYLES;

    fn speaker(name: &str, role: Role) -> Speaker {
        Speaker {
            name: name.to_string(),
            role,
            ..Default::default()
        }
    }

    fn roster_for(style: Style, count: usize) -> Roster {
        let names = ["Alex", "Sam", "Kim"];
        let split = style.role_split(count).unwrap();
        let mut speakers = Vec::new();
        for i in 0..count {
            let role = if i < split.hosts { Role::Host } else { Role::Guest };
            speakers.push(speaker(names[i], role));
        }
        Roster(speakers)
    }

    #[test]
    fn test_missing_style() {
        let errs = validate_step1(None, Some(2), &Roster::default());
        assert_eq!(
            errs.get(field::SCRIPT_STYLE),
            Some("Please select a podcast style.")
        );
        // No style means no allowed counts, so the generic count message
        // is reported alongside.
        assert_eq!(
            errs.get(field::SPEAKERS),
            Some("Choose 1, 2, or 3 speakers for this style.")
        );
    }

    #[test]
    fn test_missing_style_still_checks_names() {
        let roster = Roster(vec![
            speaker("Jo3", Role::Host),
            speaker("Sam", Role::Guest),
        ]);
        let errs = validate_step1(None, Some(2), &roster);
        assert!(errs.get(field::SCRIPT_STYLE).is_some());
        assert_eq!(
            errs.get(field::SPEAKER_NAMES),
            Some("Each speaker name must use letters and spaces only (no numbers or symbols).")
        );
    }

    #[test]
    fn test_disallowed_counts_rejected_for_every_style() {
        for style in ALL_STYLES {
            for count in 0..=4 {
                if style.allowed_counts().contains(&count) {
                    continue;
                }
                let errs = validate_step1(Some(style), Some(count), &Roster::default());
                assert_eq!(
                    errs.get(field::SPEAKERS),
                    Some(style.count_error().as_str()),
                    "{} count={}",
                    style,
                    count
                );
            }
        }
        let errs = validate_step1(Some(Style::Interview), None, &Roster::default());
        assert!(errs.get(field::SPEAKERS).is_some());
    }

    #[test]
    fn test_canonical_split_passes_everything_else_fails() {
        for style in ALL_STYLES {
            for &count in style.allowed_counts() {
                let good = roster_for(style, count);
                let errs = validate_step1(Some(style), Some(count), &good);
                assert!(errs.is_empty(), "{} count={}: {:?}", style, count, errs);

                // Flip each role in turn; every variation must fail.
                for i in 0..count {
                    let mut bad = good.clone();
                    bad.0[i].role = match bad.0[i].role {
                        Role::Host => Role::Guest,
                        Role::Guest => Role::Host,
                    };
                    let errs = validate_step1(Some(style), Some(count), &bad);
                    assert_eq!(
                        errs.get(field::SPEAKERS),
                        Some(style.layout_error().as_str()),
                        "{} count={} flipped={}",
                        style,
                        count,
                        i
                    );
                }
            }
        }
    }

    #[test]
    fn test_invalid_name_beats_uniqueness() {
        let roster = Roster(vec![
            speaker("Jo3", Role::Host),
            speaker("Jo3", Role::Guest),
        ]);
        let errs = validate_step1(Some(Style::Interview), Some(2), &roster);
        assert_eq!(
            errs.get(field::SPEAKER_NAMES),
            Some("Each speaker name must use letters and spaces only (no numbers or symbols).")
        );
    }

    #[test]
    fn test_duplicate_names_normalized() {
        // Extra interior spaces are fine per-name; normalization makes
        // them collide.
        let roster = Roster(vec![
            speaker("Jo  Ann", Role::Host),
            speaker("jo ann", Role::Guest),
        ]);
        let errs = validate_step1(Some(Style::Interview), Some(2), &roster);
        assert_eq!(
            errs.get(field::SPEAKER_NAMES),
            Some("Speaker names must be unique within the podcast.")
        );

        let roster = Roster(vec![
            speaker("Jo Ann", Role::Host),
            speaker("JO ANN", Role::Guest),
        ]);
        let errs = validate_step1(Some(Style::Interview), Some(2), &roster);
        assert_eq!(
            errs.get(field::SPEAKER_NAMES),
            Some("Speaker names must be unique within the podcast.")
        );
    }

    #[test]
    fn test_conversational_guest_fails_layout() {
        let roster = Roster(vec![
            speaker("Alex", Role::Host),
            speaker("Sam", Role::Guest),
        ]);
        let errs = validate_step1(Some(Style::Conversational), Some(2), &roster);
        assert_eq!(
            errs.get(field::SPEAKERS),
            Some("Conversational requires only co-hosts: 2 hosts or 3 hosts (no guests).")
        );
    }

    #[test]
    fn test_count_error_not_overwritten_by_layout() {
        let roster = Roster(vec![speaker("Alex", Role::Host)]);
        let errs = validate_step1(Some(Style::Interview), Some(1), &roster);
        assert_eq!(
            errs.get(field::SPEAKERS),
            Some(Style::Interview.count_error().as_str())
        );
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_description_bounds() {
        let errs = validate_description(&words(499));
        assert_eq!(
            errs.get(field::DESCRIPTION),
            Some("Your text must be at least 500 words. Current length: 499.")
        );
        assert!(validate_description(&words(500)).is_empty());
        assert!(validate_description(&words(2500)).is_empty());
        let errs = validate_description(&words(2501));
        assert_eq!(
            errs.get(field::DESCRIPTION),
            Some("The text exceeds the 2500-word limit. Current length: 2501.")
        );
    }

    #[test]
    fn test_count_words() {
        assert_eq!(count_words("  one  two\nthree "), 3);
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   "), 0);
    }

    #[test]
    fn test_role_guidance_empty_roster_defaults() {
        for style in ALL_STYLES {
            assert_eq!(
                role_guidance(style, &Roster::default()),
                style.default_role_description()
            );
        }
    }

    #[test]
    fn test_role_guidance_tracks_table() {
        let roster = roster_for(Style::Interview, 3);
        assert_eq!(
            role_guidance(Style::Interview, &roster),
            "Two hosts co-interview the guest, alternating questions and reactions."
        );
        let roster = roster_for(Style::Conversational, 2);
        assert_eq!(
            role_guidance(Style::Conversational, &roster),
            "Co-hosts share opinions, react, and keep the pace natural and fun."
        );
        let bad = Roster(vec![
            speaker("Alex", Role::Host),
            speaker("Sam", Role::Guest),
        ]);
        assert_eq!(
            role_guidance(Style::Conversational, &bad),
            "Conversational works best with co-hosts only; avoid guests here."
        );
    }

    #[test]
    fn test_merge_keeps_server_keys_uniform() {
        let mut errs = validate_description(&words(100));
        let mut server = ValidationErrors::new();
        server
            .0
            .insert(field::DESCRIPTION.to_string(), "Server said no.".to_string());
        errs.merge(server);
        assert_eq!(errs.get(field::DESCRIPTION), Some("Server said no."));
    }
}
