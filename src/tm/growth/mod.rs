pub mod engine;
pub mod init;

pub use engine::{expand_class, grow_equivalence_classes, occurs_directly};
pub use init::{find_frequent_f1, find_frequent_f2, frequent_labels};
