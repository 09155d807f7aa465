use chrono::NaiveDate;

use super::text::DEFAULT_TITLE;
use crate::domain::model::GroupPartition;

const STYLE: &str = "\
body { font-family: Arial, sans-serif; padding: 20px; color: #333; }
h1 { color: #2d3748; margin-bottom: 20px; }
.groups-container { display: grid; grid-template-columns: repeat(auto-fill, minmax(300px, 1fr)); gap: 20px; }
.group-card { border: 1px solid #e2e8f0; border-radius: 8px; padding: 20px; background: #fff; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
.group-header { border-bottom: 3px solid #4a90e2; padding-bottom: 10px; margin-bottom: 15px; }
.group-header h2 { margin: 0; color: #2d3748; }
.group-header p { margin: 5px 0 0 0; color: #718096; }
.group-card ul { margin: 0; padding-left: 20px; }
.group-card li { margin-bottom: 8px; }
.leader { color: #d69e2e; font-weight: bold; }
.member { color: #4a5568; }
.footer { margin-top: 20px; padding-top: 20px; border-top: 1px solid #e2e8f0; font-size: 12px; color: #718096; }
@media print {
  body { padding: 10px; }
  .group-card { break-inside: avoid; page-break-inside: avoid; }
}";

/// Standalone printable page with one card per group.
pub fn to_print_html(groups: &GroupPartition, title: &str, generated_on: NaiveDate) -> String {
    let title = html_escape::encode_text(if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    });

    let mut cards = String::new();
    for (index, group) in groups.iter().enumerate() {
        let count = group.len();
        cards.push_str(&format!(
            "      <div class=\"group-card\">\n        <div class=\"group-header\">\n          <h2>Group {}</h2>\n          <p>{} {}</p>\n        </div>\n        <ul>\n",
            index + 1,
            count,
            if count == 1 { "member" } else { "members" }
        ));
        for member in group.iter() {
            let class = if member.is_leader { "leader" } else { "member" };
            cards.push_str(&format!(
                "          <li class=\"{}\">{}</li>\n",
                class,
                html_escape::encode_text(&member.display_name())
            ));
        }
        cards.push_str("        </ul>\n      </div>\n");
    }

    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    <title>{title}</title>\n    <style>\n{style}\n    </style>\n  </head>\n  <body>\n    <h1>{title}</h1>\n    <div class=\"groups-container\">\n{cards}    </div>\n    <div class=\"footer\">Generated with Group Randomizer • {date}</div>\n  </body>\n</html>\n",
        title = title,
        style = STYLE,
        cards = cards,
        date = generated_on.format("%-m/%-d/%Y"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Group, Member};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
    }

    #[test]
    fn test_renders_cards_and_footer() {
        let groups = GroupPartition::new(vec![
            Group::from_members(vec![Member::leader("Ann"), Member::new("Ben")]),
            Group::from_members(vec![Member::new("Cal")]),
        ]);

        let html = to_print_html(&groups, "Lab Day", date());
        assert!(html.contains("<title>Lab Day</title>"));
        assert!(html.contains("<h2>Group 2</h2>"));
        assert!(html.contains("<p>2 members</p>"));
        assert!(html.contains("<p>1 member</p>"));
        assert!(html.contains("<li class=\"leader\">Ann (L)</li>"));
        assert!(html.contains("<li class=\"member\">Ben</li>"));
        assert!(html.contains("Generated with Group Randomizer • 3/9/2024"));
    }

    #[test]
    fn test_escapes_user_text() {
        let groups = GroupPartition::new(vec![Group::from_members(vec![Member::new(
            "<script>alert(1)</script>",
        )])]);

        let html = to_print_html(&groups, "Tom & Jerry", date());
        assert!(html.contains("<title>Tom &amp; Jerry</title>"));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn test_blank_title_uses_default() {
        let html = to_print_html(&GroupPartition::default(), "", date());
        assert!(html.contains("<h1>Group Results</h1>"));
    }
}
