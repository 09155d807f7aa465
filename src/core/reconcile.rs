use crate::domain::model::{SizingMode, Sizing};
use crate::domain::records::{MAX_GROUP_COUNT, MAX_GROUP_SIZE};
use crate::utils::error::{GroupError, Result};

/// Recomputes the sizing field that `mode` does not control.
///
/// The authoritative field is clamped to `1..=MAX_GROUP_COUNT` or
/// `1..=MAX_GROUP_SIZE`. With no participants the derived field keeps its value
/// (a kept group count is clamped the same way). Fails only when both fields
/// are zero.
pub fn reconcile(
    participant_count: usize,
    mode: SizingMode,
    group_count: usize,
    group_size: usize,
) -> Result<Sizing> {
    if group_count == 0 && group_size == 0 {
        return Err(GroupError::invalid_argument(
            "group count and group size cannot both be zero",
        ));
    }

    let sizing = match mode {
        SizingMode::ByGroupCount => {
            let group_count = group_count.clamp(1, MAX_GROUP_COUNT);
            let group_size = if participant_count == 0 {
                group_size.max(1)
            } else {
                participant_count.div_ceil(group_count)
            };
            Sizing {
                group_count,
                group_size,
            }
        }
        SizingMode::ByGroupSize => {
            let group_size = group_size.clamp(1, MAX_GROUP_SIZE);
            let group_count = if participant_count == 0 {
                group_count.clamp(1, MAX_GROUP_COUNT)
            } else {
                participant_count.div_ceil(group_size)
            };
            Sizing {
                group_count,
                group_size,
            }
        }
    };

    Ok(sizing)
}
