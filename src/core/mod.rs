pub mod engine;
pub mod parser;
pub mod partition;
pub mod reconcile;
pub mod samples;
pub mod session;

pub use crate::domain::model::{Group, GroupPartition, Member, SizingMode, Sizing};
pub use crate::domain::ports::{ConfigProvider, Storage};
pub use crate::utils::error::Result;

pub use parser::parse_participants;
pub use partition::{partition, partition_with_rng};
pub use reconcile::reconcile;
