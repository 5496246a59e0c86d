use crate::core::style::Style;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Gender {
    #[default]
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[default]
    Host,
    Guest,
}

/// One configured speaker. Identity is positional within the roster;
/// names are compared via `normalize_name` for uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Speaker {
    pub name: String,
    pub gender: Gender,
    pub role: Role,
    #[serde(rename = "voiceId", skip_serializing_if = "Option::is_none")]
    pub voice_id: Option<String>,
}

/// Ordered list of speakers for the current wizard session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster(pub Vec<Speaker>);

impl Roster {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn speakers(&self) -> &[Speaker] {
        &self.0
    }

    pub fn hosts(&self) -> usize {
        self.0.iter().filter(|s| s.role == Role::Host).count()
    }

    pub fn guests(&self) -> usize {
        self.0.iter().filter(|s| s.role == Role::Guest).count()
    }

    /// Resize to `count` entries, keeping previously entered values by
    /// index, then apply the default role layout for (style, count).
    /// A count outside the style's allowed set leaves the roster as-is.
    pub fn rebuild(&mut self, style: Style, count: usize) {
        let Some(split) = style.role_split(count) else {
            return;
        };
        self.0.resize_with(count, Speaker::default);
        for (i, speaker) in self.0.iter_mut().enumerate() {
            speaker.role = if i < split.hosts { Role::Host } else { Role::Guest };
        }
    }
}

/// Trim, collapse internal whitespace and lowercase. Used only for
/// duplicate detection, never for display or submission.
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Live input transform: drop anything that is not a letter or
/// whitespace, then collapse space runs. The result may still be
/// invalid (e.g. empty); `is_valid_name` is the gate.
pub fn sanitize_name(input: &str) -> String {
    let letters_and_spaces: String = input
        .chars()
        .filter(|c| c.is_alphabetic() || c.is_whitespace())
        .collect();

    let mut out = String::with_capacity(letters_and_spaces.len());
    let mut prev_space = false;
    for c in letters_and_spaces.chars() {
        if c.is_whitespace() {
            if !prev_space {
                out.push(' ');
            }
            prev_space = true;
        } else {
            out.push(c);
            prev_space = false;
        }
    }
    out
}

/// A name is valid when, after trimming, it consists of one or more
/// Unicode-letter runs separated by whitespace. Spacing width is not a
/// validity concern; normalization handles it for uniqueness.
pub fn is_valid_name(name: &str) -> bool {
    let trimmed = name.trim();
    !trimmed.is_empty()
        && trimmed
            .split_whitespace()
            .all(|run| run.chars().all(|c| c.is_alphabetic()))
}
