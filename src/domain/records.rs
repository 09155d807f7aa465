use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::model::{GroupPartition, SizingMode};
use crate::utils::error::GroupError;

pub const DEFAULT_GROUP_COUNT: usize = 3;
pub const DEFAULT_GROUP_SIZE: usize = 4;
/// Upper bound on a requested group count or group size.
pub const MAX_GROUP_COUNT: usize = 1000;
pub const MAX_GROUP_SIZE: usize = 1000;

fn default_group_count() -> usize {
    DEFAULT_GROUP_COUNT
}

fn default_group_size() -> usize {
    DEFAULT_GROUP_SIZE
}

fn default_true() -> bool {
    true
}

/// Ids were millisecond timestamps in older data and uuids now.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Text(String),
        Number(u64),
    }

    Ok(match Id::deserialize(deserializer)? {
        Id::Text(s) => s,
        Id::Number(n) => n.to_string(),
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Blue,
    Emerald,
    Violet,
    Amber,
    Rose,
    Indigo,
}

impl Theme {
    pub const ALL: [Theme; 6] = [
        Theme::Blue,
        Theme::Emerald,
        Theme::Violet,
        Theme::Amber,
        Theme::Rose,
        Theme::Indigo,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Emerald => "emerald",
            Theme::Violet => "violet",
            Theme::Amber => "amber",
            Theme::Rose => "rose",
            Theme::Indigo => "indigo",
        }
    }

    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Theme::as_str).collect()
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Theme::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| GroupError::InvalidConfigValueError {
                field: "theme".to_string(),
                value: s.to_string(),
                reason: format!("Valid themes: {}", Theme::names().join(", ")),
            })
    }
}

/// One completed grouping session as kept in history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default, alias = "eventTitle")]
    pub title: String,
    #[serde(default)]
    pub groups: GroupPartition,
    #[serde(default, alias = "totalParticipants")]
    pub participant_count: usize,
    #[serde(default, alias = "groupingMethod")]
    pub mode: SizingMode,
    #[serde(default = "default_group_count", alias = "numberOfGroups")]
    pub group_count: usize,
    #[serde(default = "default_group_size", alias = "participantsPerGroup")]
    pub group_size: usize,
    #[serde(default)]
    pub theme: Theme,
    pub timestamp: DateTime<Utc>,
}

/// History record before the store assigns an id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHistoryEntry {
    pub title: String,
    pub groups: GroupPartition,
    pub participant_count: usize,
    pub mode: SizingMode,
    pub group_count: usize,
    pub group_size: usize,
    pub theme: Theme,
}

/// A named participant list the user can reload later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedList {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub name: String,
    #[serde(default, alias = "eventTitle")]
    pub title: String,
    #[serde(default, alias = "participantNames")]
    pub participant_text: String,
    #[serde(default)]
    pub count: usize,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewSavedList {
    pub name: Option<String>,
    pub title: String,
    pub participant_text: String,
}

/// Sizing choices from the most recent successful split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastUsedSettings {
    #[serde(default)]
    pub mode: SizingMode,
    #[serde(default = "default_group_count")]
    pub group_count: usize,
    #[serde(default = "default_group_size")]
    pub group_size: usize,
    #[serde(default = "default_true")]
    pub assign_leader: bool,
}

impl Default for LastUsedSettings {
    fn default() -> Self {
        Self {
            mode: SizingMode::ByGroupCount,
            group_count: DEFAULT_GROUP_COUNT,
            group_size: DEFAULT_GROUP_SIZE,
            assign_leader: true,
        }
    }
}
