use crate::domain::model::{Group, GroupPartition, Member};

pub const DEFAULT_TITLE: &str = "Group Results";

fn member_lines(group: &Group) -> String {
    group
        .iter()
        .map(Member::display_name)
        .collect::<Vec<_>>()
        .join("\n")
}

/// Clipboard text: optional title, then one block per group.
pub fn to_plain_text(groups: &GroupPartition, title: &str) -> String {
    let mut text = String::new();
    if !title.trim().is_empty() {
        text.push_str(title);
        text.push_str("\n\n");
    }

    for (index, group) in groups.iter().enumerate() {
        text.push_str(&format!("Group {}:\n{}\n\n", index + 1, member_lines(group)));
    }
    text
}

/// Share text: always titled, groups separated by a blank line.
pub fn to_share_text(groups: &GroupPartition, title: &str) -> String {
    let title = if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    };

    let body = groups
        .iter()
        .enumerate()
        .map(|(index, group)| format!("Group {}:\n{}", index + 1, member_lines(group)))
        .collect::<Vec<_>>()
        .join("\n\n");

    format!("{}\n\n{}", title, body)
}
