//! Renderers over a finished partition. None of them mutate it.

pub mod bundle;
pub mod csv_export;
pub mod html;
pub mod text;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::model::GroupPartition;
use crate::utils::error::{GroupError, Result};

pub use bundle::to_bundle;
pub use csv_export::to_csv;
pub use html::to_print_html;
pub use text::{to_plain_text, to_share_text};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    #[default]
    Text,
    Share,
    Html,
    Json,
    Bundle,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 6] = [
        ExportFormat::Csv,
        ExportFormat::Text,
        ExportFormat::Share,
        ExportFormat::Html,
        ExportFormat::Json,
        ExportFormat::Bundle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Text => "text",
            ExportFormat::Share => "share",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
            ExportFormat::Bundle => "bundle",
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Text | ExportFormat::Share => "txt",
            ExportFormat::Html => "html",
            ExportFormat::Json => "json",
            ExportFormat::Bundle => "zip",
        }
    }

    /// Whether the rendering is text that can go straight to a terminal.
    pub fn is_textual(&self) -> bool {
        !matches!(self, ExportFormat::Bundle)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = GroupError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        ExportFormat::ALL
            .iter()
            .copied()
            .find(|f| f.as_str() == wanted)
            .ok_or_else(|| GroupError::InvalidConfigValueError {
                field: "format".to_string(),
                value: s.to_string(),
                reason: "Valid formats: csv, text, share, html, json, bundle".to_string(),
            })
    }
}

pub fn render(
    format: ExportFormat,
    groups: &GroupPartition,
    title: &str,
    generated_on: NaiveDate,
) -> Result<Vec<u8>> {
    let data = match format {
        ExportFormat::Csv => to_csv(groups)?.into_bytes(),
        ExportFormat::Text => to_plain_text(groups, title).into_bytes(),
        ExportFormat::Share => to_share_text(groups, title).into_bytes(),
        ExportFormat::Html => to_print_html(groups, title, generated_on).into_bytes(),
        ExportFormat::Json => serde_json::to_vec_pretty(groups)?,
        ExportFormat::Bundle => to_bundle(groups, title, generated_on)?,
    };
    Ok(data)
}

/// The title, made safe for a file name, or `groups` when blank.
pub fn default_file_stem(title: &str) -> String {
    let stem: String = title
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();

    if stem.trim_matches(['.', '_', ' ']).is_empty() {
        "groups".to_string()
    } else {
        stem
    }
}

pub fn file_name(title: &str, format: ExportFormat) -> String {
    format!("{}.{}", default_file_stem(title), format.extension())
}
