pub mod matcher;
pub mod rebuild;

pub use matcher::{MatchMap, match_cells};
pub use rebuild::{rebuild_html, rebuild_table};
