use chrono::NaiveDate;
use group_randomizer::export::{self, ExportFormat};
use group_randomizer::{partition_with_rng, GroupingSession, SizingMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::Read;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 9, 1).unwrap()
}

fn sample_groups() -> group_randomizer::GroupPartition {
    let mut session = GroupingSession::new();
    session.set_participant_text("Ann\nBen\nCal\nDee\nEli\nFay\nGus");
    session.set_group_count(3);

    let mut rng = StdRng::seed_from_u64(123);
    session.create_groups(&mut rng).unwrap().unwrap()
}

#[test]
fn test_csv_has_one_row_per_member_and_one_leader_per_group() {
    let groups = sample_groups();
    let csv = export::to_csv(&groups).unwrap();

    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers, vec!["Group", "Member", "Role"]);

    let rows: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
    assert_eq!(rows.len(), 7);
    assert!(rows.iter().all(|r| !r[1].contains("(L)")));

    for index in 1..=3 {
        let label = format!("Group {}", index);
        let leaders = rows
            .iter()
            .filter(|r| r[0] == *label && &r[2] == "Leader")
            .count();
        assert_eq!(leaders, 1, "{}", label);
    }
}

#[test]
fn test_text_exports_show_leader_suffix() {
    let groups = sample_groups();

    let plain = export::to_plain_text(&groups, "Retreat");
    assert!(plain.starts_with("Retreat\n\nGroup 1:\n"));
    assert_eq!(plain.matches(" (L)").count(), 3);

    let share = export::to_share_text(&groups, "");
    assert!(share.starts_with("Group Results\n\n"));
    assert!(share.contains("\n\nGroup 3:\n"));
}

#[test]
fn test_every_format_renders() {
    let groups = sample_groups();
    for format in ExportFormat::ALL {
        let data = export::render(format, &groups, "All Formats", date()).unwrap();
        assert!(!data.is_empty(), "{} rendered nothing", format);
        if format.is_textual() {
            assert!(String::from_utf8(data).is_ok());
        }
    }
}

#[test]
fn test_bundle_written_to_disk() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let names: Vec<String> = (1..=5).map(|i| format!("Player {}", i)).collect();
    let mut rng = StdRng::seed_from_u64(5);
    let groups =
        partition_with_rng(&names, SizingMode::ByGroupSize, 2, true, &mut rng).unwrap();

    let path = temp_dir
        .path()
        .join(export::file_name("Pickup Game", ExportFormat::Bundle));
    let data = export::render(ExportFormat::Bundle, &groups, "Pickup Game", date()).unwrap();
    std::fs::write(&path, data).unwrap();
    assert!(path.ends_with("Pickup Game.zip"));

    let file = std::fs::File::open(&path).unwrap();
    let mut archive = zip::ZipArchive::new(file).unwrap();
    let mut html = String::new();
    archive
        .by_name("groups.html")
        .unwrap()
        .read_to_string(&mut html)
        .unwrap();
    assert!(html.contains("<title>Pickup Game</title>"));
    assert!(html.contains("Generated with Group Randomizer • 9/1/2024"));
}
