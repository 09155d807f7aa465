use crate::domain::model::GroupPartition;
use crate::utils::error::{GroupError, Result};

/// `Group,Member,Role` with one row per member; names carry no leader suffix.
pub fn to_csv(groups: &GroupPartition) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Group", "Member", "Role"])?;

    for (index, group) in groups.iter().enumerate() {
        let label = format!("Group {}", index + 1);
        for member in group.iter() {
            writer.write_record([label.as_str(), member.name.as_str(), member.role()])?;
        }
    }

    let data = writer
        .into_inner()
        .map_err(|e| GroupError::IoError(e.into_error()))?;
    csv_text(data)
}

fn csv_text(data: Vec<u8>) -> Result<String> {
    String::from_utf8(data).map_err(|e| GroupError::ExportError {
        format: "csv".to_string(),
        message: e.to_string(),
    })
}
