pub mod analysis;
pub mod config;
pub mod consts;
pub mod error;
pub mod inference;
pub mod layout;
pub mod pipeline;
pub mod table;

// Re-export commonly used types
pub use config::{RebuildConfig, RebuildConfigBuilder};
pub use error::FerrtableError;
pub use pipeline::{TableEvidence, TableSystem, rebuild_batch};
pub use table::{MatchMap, match_cells, rebuild_table};
