pub mod algorithm;
pub mod canonical;
pub mod config;
pub mod error;
pub mod finite;
pub mod record;
pub mod test_utils;
pub mod utils;

// Re-export main items for convenience
pub use algorithm::HashAlgorithm;
pub use config::RecordConfig;
pub use error::{NodeError, Result};
pub use record::{HashableRecord, compare};
pub use utils::{hash, to_hex};
