use chrono::NaiveDate;
use std::io::Write;
use zip::write::{SimpleFileOptions, ZipWriter};

use super::{csv_export, html, text};
use crate::domain::model::GroupPartition;
use crate::utils::error::Result;

pub const BUNDLE_ENTRIES: [&str; 4] = ["groups.csv", "groups.txt", "groups.html", "groups.json"];

/// Zip archive holding every rendering of the partition.
pub fn to_bundle(groups: &GroupPartition, title: &str, generated_on: NaiveDate) -> Result<Vec<u8>> {
    let csv = csv_export::to_csv(groups)?;
    let plain = text::to_plain_text(groups, title);
    let page = html::to_print_html(groups, title, generated_on);
    let json = serde_json::to_string_pretty(groups)?;

    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, contents) in BUNDLE_ENTRIES.iter().zip([csv, plain, page, json]) {
        zip.start_file(*name, SimpleFileOptions::default())?;
        zip.write_all(contents.as_bytes())?;
    }

    let cursor = zip.finish()?;
    let data = cursor.into_inner();
    tracing::debug!("Built export bundle ({} bytes)", data.len());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Group, Member};
    use std::io::Read;

    #[test]
    fn test_bundle_contains_every_format() {
        let groups = GroupPartition::new(vec![Group::from_members(vec![
            Member::leader("Ann"),
            Member::new("Ben"),
        ])]);
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();

        let data = to_bundle(&groups, "Lab", date).unwrap();
        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 4);

        let mut csv = String::new();
        archive
            .by_name("groups.csv")
            .unwrap()
            .read_to_string(&mut csv)
            .unwrap();
        assert!(csv.starts_with("Group,Member,Role\n"));

        let mut json = String::new();
        archive
            .by_name("groups.json")
            .unwrap()
            .read_to_string(&mut json)
            .unwrap();
        let parsed: GroupPartition = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, groups);
    }
}
