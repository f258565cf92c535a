pub mod characterize;
pub mod class;
pub mod config;
pub mod encoding;
pub mod error;
pub mod growth;
pub mod miner;
pub mod occurrences;

#[cfg(test)]
mod tests;

pub use characterize::{ClassSummary, MiningResult};
pub use class::{ClassState, Element, EquivalenceClass};
pub use config::MinerConfig;
pub use encoding::{ParsedTree, Scope, Token, TreeCodec, TreeEncoding};
pub use error::{MineError, MineResult};
pub use miner::{mine, FrequentSubtreeFinder, TreeMiner};
pub use occurrences::{OccurrenceKind, OccurrenceList};
