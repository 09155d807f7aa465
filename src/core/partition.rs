use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::model::{Group, GroupPartition, Member, SizingMode};
use crate::domain::records::MAX_GROUP_COUNT;
use crate::utils::error::{GroupError, Result};

/// Number of groups a sizing directive resolves to for `participant_count` names.
///
/// An explicit group count above [`MAX_GROUP_COUNT`] is rejected.
pub fn resolve_group_count(participant_count: usize, mode: SizingMode, value: usize) -> Result<usize> {
    if value == 0 {
        return Err(GroupError::invalid_argument(format!(
            "{} must be at least 1",
            match mode {
                SizingMode::ByGroupCount => "group count",
                SizingMode::ByGroupSize => "group size",
            }
        )));
    }

    if mode == SizingMode::ByGroupCount && value > MAX_GROUP_COUNT {
        return Err(GroupError::invalid_argument(format!(
            "group count {} exceeds the limit of {}",
            value, MAX_GROUP_COUNT
        )));
    }

    Ok(match mode {
        SizingMode::ByGroupCount => value,
        SizingMode::ByGroupSize => participant_count.div_ceil(value),
    })
}

/// Shuffles `participants` and deals them round-robin into groups.
pub fn partition(
    participants: &[String],
    mode: SizingMode,
    value: usize,
    assign_leader: bool,
) -> Result<GroupPartition> {
    partition_with_rng(participants, mode, value, assign_leader, &mut rand::thread_rng())
}

/// Same as [`partition`] with a caller-supplied random source.
///
/// Group `i mod n` receives the i-th shuffled participant, so sizes differ by at
/// most one. When `assign_leader` is set the first member of each non-empty group
/// is flagged. Asking for more groups than participants leaves the surplus groups
/// empty.
pub fn partition_with_rng<R: Rng + ?Sized>(
    participants: &[String],
    mode: SizingMode,
    value: usize,
    assign_leader: bool,
    rng: &mut R,
) -> Result<GroupPartition> {
    if participants.is_empty() {
        return Err(GroupError::invalid_argument("no participants to group"));
    }

    let group_count = resolve_group_count(participants.len(), mode, value)?;

    let mut shuffled = participants.to_vec();
    shuffled.shuffle(rng);

    let mut groups = vec![Group::new(); group_count];
    for (index, name) in shuffled.into_iter().enumerate() {
        groups[index % group_count].push(Member::new(name));
    }

    if assign_leader {
        groups.iter_mut().for_each(Group::mark_first_as_leader);
    }

    tracing::debug!(
        participants = participants.len(),
        groups = group_count,
        mode = %mode,
        assign_leader,
        "Partitioned participants"
    );

    Ok(GroupPartition::new(groups))
}
