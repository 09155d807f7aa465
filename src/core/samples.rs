use std::fmt;
use std::str::FromStr;

use crate::core::parser::append_names;
use crate::utils::error::GroupError;

/// Placeholder name styles for quickly filling the participant box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleKind {
    Class,
    Team,
    Conference,
    Sports,
    Other,
}

impl SampleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SampleKind::Class => "class",
            SampleKind::Team => "team",
            SampleKind::Conference => "conference",
            SampleKind::Sports => "sports",
            SampleKind::Other => "other",
        }
    }
}

impl fmt::Display for SampleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SampleKind {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "class" => Ok(SampleKind::Class),
            "team" => Ok(SampleKind::Team),
            "conference" => Ok(SampleKind::Conference),
            "sports" => Ok(SampleKind::Sports),
            "other" | "participant" => Ok(SampleKind::Other),
            other => Err(GroupError::InvalidConfigValueError {
                field: "kind".to_string(),
                value: other.to_string(),
                reason: "Expected class, team, conference, sports or other".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplePreset {
    pub name: &'static str,
    pub count: usize,
    pub kind: SampleKind,
    pub description: &'static str,
}

pub const SAMPLE_PRESETS: [SamplePreset; 6] = [
    SamplePreset {
        name: "Class Students",
        count: 25,
        kind: SampleKind::Class,
        description: "Perfect for classroom activities",
    },
    SamplePreset {
        name: "Team Members",
        count: 12,
        kind: SampleKind::Team,
        description: "Workshop or team building",
    },
    SamplePreset {
        name: "Conference",
        count: 30,
        kind: SampleKind::Conference,
        description: "Conference breakout sessions",
    },
    SamplePreset {
        name: "Sports Team",
        count: 15,
        kind: SampleKind::Sports,
        description: "Sports or game teams",
    },
    SamplePreset {
        name: "Book Club",
        count: 10,
        kind: SampleKind::Other,
        description: "Small group discussions",
    },
    SamplePreset {
        name: "Workshop",
        count: 20,
        kind: SampleKind::Other,
        description: "Creative workshop groups",
    },
];

pub fn generate_sample_names(kind: SampleKind, count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match kind {
            // Student A1..A10, B1..B10, ...
            SampleKind::Class => format!("Student {}{}", class_letter(i / 10), i % 10 + 1),
            SampleKind::Team => format!("Team Member {}", i + 1),
            SampleKind::Conference => format!("Attendee {}", i + 1),
            SampleKind::Sports => format!("Player {}", i + 1),
            SampleKind::Other => format!("Participant {}", i + 1),
        })
        .collect()
}

/// Adds a generated set below whatever is already in `existing`.
pub fn append_samples(existing: &str, kind: SampleKind, count: usize) -> String {
    append_names(existing.trim_end(), &generate_sample_names(kind, count))
}

fn class_letter(block: usize) -> char {
    char::from_u32('A' as u32 + block as u32).unwrap_or('?')
}
