use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::utils::error::GroupError;

/// Display suffix that marked a leader in the legacy string encoding.
pub const LEADER_SUFFIX: &str = " (L)";

/// Which of the two sizing fields the user controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SizingMode {
    #[default]
    #[serde(rename = "groups")]
    ByGroupCount,
    #[serde(rename = "participants")]
    ByGroupSize,
}

impl SizingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            SizingMode::ByGroupCount => "groups",
            SizingMode::ByGroupSize => "participants",
        }
    }
}

impl fmt::Display for SizingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SizingMode {
    type Err = GroupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "groups" | "count" | "group-count" | "by-group-count" => Ok(SizingMode::ByGroupCount),
            "participants" | "size" | "group-size" | "by-group-size" => {
                Ok(SizingMode::ByGroupSize)
            }
            other => Err(GroupError::InvalidConfigValueError {
                field: "mode".to_string(),
                value: other.to_string(),
                reason: "Expected 'groups' or 'participants'".to_string(),
            }),
        }
    }
}

/// One participant placed in a group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Member {
    pub name: String,
    pub is_leader: bool,
}

impl Member {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_leader: false,
        }
    }

    pub fn leader(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            is_leader: true,
        }
    }

    /// Name as shown to users, with the leader suffix when flagged.
    pub fn display_name(&self) -> String {
        if self.is_leader {
            format!("{}{}", self.name, LEADER_SUFFIX)
        } else {
            self.name.clone()
        }
    }

    pub fn to_legacy(&self) -> String {
        self.display_name()
    }

    pub fn from_legacy(value: &str) -> Self {
        match value.strip_suffix(LEADER_SUFFIX) {
            Some(name) => Self::leader(name),
            None => Self::new(value),
        }
    }

    pub fn role(&self) -> &'static str {
        if self.is_leader {
            "Leader"
        } else {
            "Member"
        }
    }
}

impl<'de> Deserialize<'de> for Member {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Older history blobs stored members as "Name (L)" strings.
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Legacy(String),
            Record {
                name: String,
                #[serde(default)]
                is_leader: bool,
            },
        }

        Ok(match Repr::deserialize(deserializer)? {
            Repr::Legacy(value) => Member::from_legacy(&value),
            Repr::Record { name, is_leader } => Member { name, is_leader },
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Group {
    members: Vec<Member>,
}

impl Group {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_members(members: Vec<Member>) -> Self {
        Self { members }
    }

    pub fn push(&mut self, member: Member) {
        self.members.push(member);
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn leader(&self) -> Option<&Member> {
        self.members.first().filter(|m| m.is_leader)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Member> {
        self.members.iter()
    }

    pub(crate) fn mark_first_as_leader(&mut self) {
        if let Some(first) = self.members.first_mut() {
            first.is_leader = true;
        }
    }
}

/// Ordered set of groups covering every participant exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupPartition {
    groups: Vec<Group>,
}

impl GroupPartition {
    pub fn new(groups: Vec<Group>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }

    pub fn participant_count(&self) -> usize {
        self.groups.iter().map(Group::len).sum()
    }

    /// Plain names in group order, without leader markers.
    pub fn member_names(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(Group::iter)
            .map(|m| m.name.clone())
            .collect()
    }

    pub fn sizes(&self) -> Vec<usize> {
        self.groups.iter().map(Group::len).collect()
    }

    pub fn leader_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(Group::iter)
            .filter(|m| m.is_leader)
            .count()
    }

    pub fn groups_with_leaders(&self) -> usize {
        self.groups.iter().filter(|g| g.leader().is_some()).count()
    }

    /// Copy of the partition with empty groups removed, for presentation.
    pub fn without_empty_groups(&self) -> GroupPartition {
        GroupPartition {
            groups: self.groups.iter().filter(|g| !g.is_empty()).cloned().collect(),
        }
    }

    pub fn to_legacy(&self) -> Vec<Vec<String>> {
        self.groups
            .iter()
            .map(|g| g.iter().map(Member::to_legacy).collect())
            .collect()
    }

    pub fn summary(&self) -> PartitionSummary {
        let total_groups = self.len();
        let total_participants = self.participant_count();
        let average_per_group = if total_groups == 0 {
            0
        } else {
            (total_participants as f64 / total_groups as f64).round() as usize
        };

        PartitionSummary {
            total_groups,
            total_participants,
            average_per_group,
            groups_with_leaders: self.groups_with_leaders(),
            leader_count: self.leader_count(),
        }
    }
}

impl<'a> IntoIterator for &'a GroupPartition {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartitionSummary {
    pub total_groups: usize,
    pub total_participants: usize,
    pub average_per_group: usize,
    pub groups_with_leaders: usize,
    pub leader_count: usize,
}

/// Reconciled sizing fields; both are at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sizing {
    pub group_count: usize,
    pub group_size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_legacy_round_trip() {
        let leader = Member::from_legacy("Alice (L)");
        assert_eq!(leader, Member::leader("Alice"));
        assert_eq!(leader.to_legacy(), "Alice (L)");

        let plain = Member::from_legacy("Bob");
        assert!(!plain.is_leader);
        assert_eq!(plain.to_legacy(), "Bob");
    }

    #[test]
    fn test_member_deserializes_both_shapes() {
        let members: Vec<Member> = serde_json::from_str(
            r#"["Carol (L)", "Dan", {"name": "Eve", "is_leader": true}, {"name": "Finn"}]"#,
        )
        .unwrap();

        assert_eq!(
            members,
            vec![
                Member::leader("Carol"),
                Member::new("Dan"),
                Member::leader("Eve"),
                Member::new("Finn"),
            ]
        );
    }

    #[test]
    fn test_partition_serializes_as_nested_arrays() {
        let partition = GroupPartition::new(vec![
            Group::from_members(vec![Member::leader("A"), Member::new("B")]),
            Group::new(),
        ]);
        let json = serde_json::to_value(&partition).unwrap();
        assert_eq!(
            json,
            serde_json::json!([
                [{"name": "A", "is_leader": true}, {"name": "B", "is_leader": false}],
                []
            ])
        );
    }

    #[test]
    fn test_summary_counts() {
        let partition = GroupPartition::new(vec![
            Group::from_members(vec![Member::leader("A"), Member::new("B"), Member::new("C")]),
            Group::from_members(vec![Member::leader("D"), Member::new("E")]),
            Group::new(),
        ]);

        let summary = partition.summary();
        assert_eq!(summary.total_groups, 3);
        assert_eq!(summary.total_participants, 5);
        assert_eq!(summary.average_per_group, 2);
        assert_eq!(summary.groups_with_leaders, 2);
        assert_eq!(summary.leader_count, 2);
        assert_eq!(partition.without_empty_groups().len(), 2);
    }

    #[test]
    fn test_summary_of_empty_partition() {
        let summary = GroupPartition::default().summary();
        assert_eq!(summary.total_groups, 0);
        assert_eq!(summary.average_per_group, 0);
    }

    #[test]
    fn test_sizing_mode_parsing() {
        assert_eq!("groups".parse::<SizingMode>().unwrap(), SizingMode::ByGroupCount);
        assert_eq!("size".parse::<SizingMode>().unwrap(), SizingMode::ByGroupSize);
        assert!("teams".parse::<SizingMode>().is_err());
        assert_eq!(
            serde_json::to_string(&SizingMode::ByGroupSize).unwrap(),
            "\"participants\""
        );
    }
}
