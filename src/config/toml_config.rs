use crate::core::ConfigProvider;
use crate::domain::model::SizingMode;
use crate::domain::records::{
    Theme, DEFAULT_GROUP_COUNT, DEFAULT_GROUP_SIZE, MAX_GROUP_COUNT, MAX_GROUP_SIZE,
};
use crate::export::ExportFormat;
use crate::store::HISTORY_LIMIT;
use crate::utils::error::{GroupError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_DATA_DIR: &str = "./.group-randomizer";
pub const DEFAULT_OUTPUT_PATH: &str = "./output";
const MAX_HISTORY_LIMIT: usize = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub defaults: DefaultsConfig,
    pub storage: StorageConfig,
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    pub mode: SizingMode,
    pub group_count: usize,
    pub group_size: usize,
    pub assign_leader: bool,
    pub theme: Theme,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            mode: SizingMode::ByGroupCount,
            group_count: DEFAULT_GROUP_COUNT,
            group_size: DEFAULT_GROUP_SIZE,
            assign_leader: true,
            theme: Theme::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub data_dir: String,
    pub history_limit: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            history_limit: HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub output_path: String,
    pub format: ExportFormat,
    pub drop_empty_groups: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            format: ExportFormat::default(),
            drop_empty_groups: false,
        }
    }
}

impl TomlConfig {
    /// Reads and parses a TOML settings file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GroupError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// Loads the file when it exists, otherwise built-in defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GroupError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the environment value; unknown variables stay as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GroupError::ConfigError {
            message: format!("Invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_range(
            "defaults.group_count",
            self.defaults.group_count,
            1,
            MAX_GROUP_COUNT,
        )?;
        validation::validate_range(
            "defaults.group_size",
            self.defaults.group_size,
            1,
            MAX_GROUP_SIZE,
        )?;

        validation::validate_path("storage.data_dir", &self.storage.data_dir)?;
        validation::validate_range(
            "storage.history_limit",
            self.storage.history_limit,
            1,
            MAX_HISTORY_LIMIT,
        )?;

        validation::validate_path("export.output_path", &self.export.output_path)?;

        Ok(())
    }

    pub fn data_dir(&self) -> &str {
        &self.storage.data_dir
    }

    pub fn output_path(&self) -> &str {
        &self.export.output_path
    }

    pub fn export_format(&self) -> ExportFormat {
        self.export.format
    }

    pub fn drop_empty_groups(&self) -> bool {
        self.export.drop_empty_groups
    }
}

impl ConfigProvider for TomlConfig {
    fn default_mode(&self) -> SizingMode {
        self.defaults.mode
    }

    fn default_group_count(&self) -> usize {
        self.defaults.group_count.clamp(1, MAX_GROUP_COUNT)
    }

    fn default_group_size(&self) -> usize {
        self.defaults.group_size.clamp(1, MAX_GROUP_SIZE)
    }

    fn assign_leader(&self) -> bool {
        self.defaults.assign_leader
    }

    fn default_theme(&self) -> Theme {
        self.defaults.theme
    }

    fn history_limit(&self) -> usize {
        self.storage.history_limit
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_full_config() {
        let toml_content = r#"
[defaults]
mode = "participants"
group_count = 6
group_size = 5
assign_leader = false
theme = "emerald"

[storage]
data_dir = "./state"
history_limit = 20

[export]
output_path = "./exports"
format = "csv"
drop_empty_groups = true
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        config.validate().unwrap();

        assert_eq!(config.default_mode(), SizingMode::ByGroupSize);
        assert_eq!(config.default_group_size(), 5);
        assert!(!config.assign_leader());
        assert_eq!(config.default_theme(), Theme::Emerald);
        assert_eq!(config.history_limit(), 20);
        assert_eq!(config.export_format(), ExportFormat::Csv);
        assert!(config.drop_empty_groups());
    }

    #[test]
    fn test_missing_sections_use_defaults() {
        let config = TomlConfig::from_toml_str("[defaults]\ngroup_count = 4\n").unwrap();
        config.validate().unwrap();

        assert_eq!(config.default_group_count(), 4);
        assert_eq!(config.default_group_size(), DEFAULT_GROUP_SIZE);
        assert_eq!(config.data_dir(), DEFAULT_DATA_DIR);
        assert_eq!(config.history_limit(), HISTORY_LIMIT);
        assert_eq!(config.export_format(), ExportFormat::Text);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("GROUP_RANDOMIZER_TEST_DIR", "/tmp/groups-test");

        let toml_content = r#"
[storage]
data_dir = "${GROUP_RANDOMIZER_TEST_DIR}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.data_dir(), "/tmp/groups-test");

        std::env::remove_var("GROUP_RANDOMIZER_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let invalid = [
            "[defaults]\ngroup_count = 0\n",
            "[defaults]\ngroup_count = 1001\n",
            "[defaults]\ngroup_count = 2305843009213693951\n",
            "[defaults]\ngroup_size = 0\n",
            "[defaults]\ngroup_size = 5000\n",
            "[storage]\nhistory_limit = 0\n",
            "[storage]\ndata_dir = \"\"\n",
        ];

        for content in invalid {
            let config = TomlConfig::from_toml_str(content).unwrap();
            assert!(config.validate().is_err(), "expected invalid: {}", content);
        }
    }

    #[test]
    fn test_unknown_enum_values_fail_to_parse() {
        for content in [
            "[defaults]\nmode = \"teams\"\n",
            "[defaults]\ntheme = \"pink\"\n",
            "[export]\nformat = \"pdf\"\n",
        ] {
            let err = TomlConfig::from_toml_str(content).unwrap_err();
            assert!(
                matches!(err, GroupError::ConfigValidationError { .. }),
                "expected parse failure: {}",
                content
            );
        }
    }

    #[test]
    fn test_provider_caps_unvalidated_counts() {
        let config =
            TomlConfig::from_toml_str("[defaults]\ngroup_count = 2305843009213693951\n").unwrap();
        assert_eq!(config.default_group_count(), MAX_GROUP_COUNT);
        assert_eq!(config.defaults.mode, SizingMode::ByGroupCount);
    }

    #[test]
    fn test_bad_toml_is_config_error() {
        let err = TomlConfig::from_toml_str("[defaults\n").unwrap_err();
        assert!(matches!(err, GroupError::ConfigValidationError { .. }));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[export]\noutput_path = \"./printouts\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "./printouts");
    }
}
