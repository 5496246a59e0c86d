use crate::core::speaker::{Gender, Roster};
use log::debug;
use serde::Deserialize;
use std::collections::HashMap;
use std::collections::HashSet;

/// One entry of the external voice catalog. The catalog is advisory:
/// the wizard works identically with an empty list.
#[derive(Debug, Clone, Deserialize)]
pub struct Voice {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub labels: HashMap<String, String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl Voice {
    /// Gender label as reported by the catalog, lowercased.
    pub fn gender_label(&self) -> Option<String> {
        self.labels.get("gender").map(|g| g.to_lowercase())
    }

    pub fn matches_gender(&self, gender: Gender) -> bool {
        let wanted = match gender {
            Gender::Male => "male",
            Gender::Female => "female",
        };
        self.gender_label().as_deref() == Some(wanted)
    }
}

/// The backend has returned both `{"voices": [...]}` and a bare array
/// over time; accept either. Anything else is an empty catalog.
pub fn parse_voices(value: &serde_json::Value) -> Vec<Voice> {
    let items = if let Some(arr) = value.as_array() {
        arr
    } else if let Some(arr) = value.get("voices").and_then(|v| v.as_array()) {
        arr
    } else {
        return Vec::new();
    };

    let voices: Vec<Voice> = items
        .iter()
        .filter_map(|item| serde_json::from_value(item.clone()).ok())
        .collect();
    debug!("voice catalog: {} entries", voices.len());
    voices
}

/// Group the catalog by gender label. Voices without a recognized label
/// are left out; callers fall back to the full list.
pub fn group_by_gender(voices: &[Voice]) -> HashMap<Gender, Vec<&Voice>> {
    let mut groups: HashMap<Gender, Vec<&Voice>> = HashMap::new();
    for voice in voices {
        for gender in [Gender::Male, Gender::Female] {
            if voice.matches_gender(gender) {
                groups.entry(gender).or_default().push(voice);
            }
        }
    }
    groups
}

/// Fill each speaker's empty voice slot with an unused voice matching
/// the speaker's gender, falling back to any unused voice, then to the
/// first voice. Explicit selections are never overwritten. An empty
/// catalog leaves the roster untouched.
pub fn auto_assign(roster: &mut Roster, voices: &[Voice]) {
    if voices.is_empty() {
        return;
    }
    let groups = group_by_gender(voices);
    let mut used: HashSet<String> = roster
        .speakers()
        .iter()
        .filter_map(|s| s.voice_id.clone())
        .collect();

    for speaker in roster.0.iter_mut() {
        if speaker.voice_id.is_some() {
            continue;
        }
        let pool: Vec<&Voice> = groups
            .get(&speaker.gender)
            .map(|g| g.iter().copied().filter(|v| !used.contains(&v.id)).collect())
            .unwrap_or_default();

        let pick = pool
            .first()
            .copied()
            .or_else(|| voices.iter().find(|v| !used.contains(&v.id)))
            .unwrap_or(&voices[0]);

        used.insert(pick.id.clone());
        speaker.voice_id = Some(pick.id.clone());
    }
}
