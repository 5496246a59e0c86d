use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Podcast format category. Determines which speaker counts are allowed
/// and how host/guest roles must be distributed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Style {
    Interview,
    Storytelling,
    Educational,
    Conversational,
}

pub const ALL_STYLES: [Style; 4] = [
    Style::Interview,
    Style::Storytelling,
    Style::Educational,
    Style::Conversational,
];

/// Required number of host-role and guest-role speakers for one
/// (style, count) combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleSplit {
    pub hosts: usize,
    pub guests: usize,
}

impl Style {
    pub fn as_str(&self) -> &'static str {
        match self {
            Style::Interview => "Interview",
            Style::Storytelling => "Storytelling",
            Style::Educational => "Educational",
            Style::Conversational => "Conversational",
        }
    }

    /// Speaker counts this style accepts.
    pub fn allowed_counts(&self) -> &'static [usize] {
        match self {
            Style::Interview => &[2, 3],
            Style::Storytelling => &[1, 2, 3],
            Style::Educational => &[1, 2, 3],
            Style::Conversational => &[2, 3],
        }
    }

    /// The single valid host/guest split for this style at the given
    /// speaker count, or `None` if the count itself is not allowed.
    pub fn role_split(&self, count: usize) -> Option<RoleSplit> {
        let split = |hosts, guests| Some(RoleSplit { hosts, guests });
        match (self, count) {
            (Style::Interview, 2) => split(1, 1),
            (Style::Interview, 3) => split(2, 1),
            (Style::Storytelling | Style::Educational, 1) => split(1, 0),
            (Style::Storytelling | Style::Educational, 2) => split(1, 1),
            (Style::Storytelling | Style::Educational, 3) => split(1, 2),
            (Style::Conversational, 2) => split(2, 0),
            (Style::Conversational, 3) => split(3, 0),
            _ => None,
        }
    }

    /// Error message shown when the selected speaker count is not in the
    /// allowed set.
    pub fn count_error(&self) -> String {
        match self {
            Style::Interview => {
                "Interview requires either 2 speakers (1 host + 1 guest) or 3 speakers (2 hosts + 1 guest).".to_string()
            }
            Style::Conversational => "Conversational uses 2 or 3 co-hosts (no guests).".to_string(),
            _ => "Choose 1, 2, or 3 speakers for this style.".to_string(),
        }
    }

    /// Error message shown when the roster roles do not match the
    /// required split.
    pub fn layout_error(&self) -> String {
        match self {
            Style::Interview => {
                "Interview requires: 2 speakers = 1 host + 1 guest, or 3 speakers = 2 hosts + 1 guest.".to_string()
            }
            Style::Storytelling | Style::Educational => format!(
                "{} requires: 1 speaker = 1 host; 2 speakers = 1 host + 1 guest; 3 speakers = 1 host + 2 guests.",
                self.as_str()
            ),
            Style::Conversational => {
                "Conversational requires only co-hosts: 2 hosts or 3 hosts (no guests).".to_string()
            }
        }
    }

    /// One-line summary of the valid setups, shown as a hint under the
    /// style selector.
    pub fn valid_setups(&self) -> &'static str {
        match self {
            Style::Interview => "Valid setups: 1 host → 1 guest, or 2 hosts → 1 guest.",
            Style::Storytelling | Style::Educational => {
                "Valid setups: 1 host solo, 1 host → 1 guest, or 1 host → 2 guests."
            }
            Style::Conversational => "Valid setups: Multiple hosts, no guests.",
        }
    }

    /// Default description of the role arrangement, used when no roster
    /// has been configured yet.
    pub fn default_role_description(&self) -> &'static str {
        match self {
            Style::Interview => "Host leads with questions; guest provides stories and insights.",
            Style::Storytelling => {
                "Guests are the storytellers; host guides, reacts, and frames transitions."
            }
            Style::Educational => {
                "Host teaches; guest(s) ask clarifying questions or add expert notes."
            }
            Style::Conversational => {
                "All participants are hosts; it's a balanced back-and-forth."
            }
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Style {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Interview" => Ok(Style::Interview),
            "Storytelling" => Ok(Style::Storytelling),
            "Educational" => Ok(Style::Educational),
            "Conversational" => Ok(Style::Conversational),
            other => Err(anyhow!("Unknown podcast style: {}", other)),
        }
    }
}
