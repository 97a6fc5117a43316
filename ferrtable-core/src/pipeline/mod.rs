pub mod crop;
pub mod evidence;
pub mod system;

pub use evidence::{EvidenceRegion, TableEvidence, rebuild_batch};
pub use system::TableSystem;
