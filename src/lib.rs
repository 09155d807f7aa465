pub mod config;
pub mod core;
pub mod domain;
pub mod export;
pub mod store;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{cli::LocalStorage, TomlConfig};

pub use self::core::{
    engine::{GroupingEngine, GroupingOutcome},
    parse_participants, partition, partition_with_rng, reconcile,
    session::GroupingSession,
};
pub use domain::model::{Group, GroupPartition, Member, SizingMode, Sizing};
pub use store::{HistoryStore, MemoryStorage, PreferencesStore, SavedListStore};
pub use utils::error::{GroupError, Result};
