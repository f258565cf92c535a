mod labeled;
mod list;
mod vector;

pub use labeled::{LabelRecord, LabelTrackingList};
pub use list::{OccurrenceKind, OccurrenceList};
pub use vector::{ScopeVectorList, VectorRecord};
