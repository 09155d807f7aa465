pub mod cli;
#[cfg(feature = "cli")]
pub mod command;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use command::{
    CliConfig, Command, HistoryCommand, ListsCommand, PrefsCommand, ReconcileArgs, SamplesArgs,
    SplitArgs,
};
pub use toml_config::TomlConfig;
