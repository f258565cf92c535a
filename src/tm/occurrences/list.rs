use std::collections::BTreeSet;

use super::labeled::LabelTrackingList;
use super::vector::ScopeVectorList;
use crate::tm::error::{MineError, MineResult};

/// Occurrence representation used for a whole mining run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccurrenceKind {
    /// Every embedding tracked with its prefix match.
    LabelTracking,
    /// Rightmost-path scopes only.
    ScopeVector,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OccurrenceList {
    LabelTracking(LabelTrackingList),
    ScopeVector(ScopeVectorList),
}

impl OccurrenceList {
    pub fn empty(kind: OccurrenceKind) -> Self {
        match kind {
            OccurrenceKind::LabelTracking => OccurrenceList::LabelTracking(LabelTrackingList::new()),
            OccurrenceKind::ScopeVector => OccurrenceList::ScopeVector(ScopeVectorList::new()),
        }
    }

    pub fn kind(&self) -> OccurrenceKind {
        match self {
            OccurrenceList::LabelTracking(_) => OccurrenceKind::LabelTracking,
            OccurrenceList::ScopeVector(_) => OccurrenceKind::ScopeVector,
        }
    }

    /// Number of records, repeats inside one tree included.
    pub fn len(&self) -> usize {
        match self {
            OccurrenceList::LabelTracking(list) => list.len(),
            OccurrenceList::ScopeVector(list) => list.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Distinct trees referenced, ascending.
    pub fn trees(&self) -> BTreeSet<usize> {
        match self {
            OccurrenceList::LabelTracking(list) => list.iter().map(|record| record.tree).collect(),
            OccurrenceList::ScopeVector(list) => list.iter().map(|record| record.tree).collect(),
        }
    }

    /// Number of distinct trees containing the pattern.
    pub fn support(&self) -> usize {
        self.trees().len()
    }

    pub fn retain_trees(&mut self, mut keep: impl FnMut(usize) -> bool) {
        match self {
            OccurrenceList::LabelTracking(list) => list.retain(|record| keep(record.tree)),
            OccurrenceList::ScopeVector(list) => list.retain(|record| keep(record.tree)),
        }
    }

    pub fn in_scope_join(&self, other: &OccurrenceList) -> MineResult<OccurrenceList> {
        match (self, other) {
            (OccurrenceList::LabelTracking(x), OccurrenceList::LabelTracking(y)) => {
                Ok(OccurrenceList::LabelTracking(x.in_scope_join(y)))
            }
            (OccurrenceList::ScopeVector(x), OccurrenceList::ScopeVector(y)) => {
                Ok(OccurrenceList::ScopeVector(x.in_scope_join(y)))
            }
            _ => Err(MineError::MixedOccurrenceKinds),
        }
    }

    /// `attach_depth` is the depth, on the class prefix's rightmost path, of
    /// the node the sibling attaches to. Label-tracking records carry the full
    /// prefix match and do not need it.
    pub fn out_scope_join(&self, other: &OccurrenceList, attach_depth: usize) -> MineResult<OccurrenceList> {
        match (self, other) {
            (OccurrenceList::LabelTracking(x), OccurrenceList::LabelTracking(y)) => {
                Ok(OccurrenceList::LabelTracking(x.out_scope_join(y)))
            }
            (OccurrenceList::ScopeVector(x), OccurrenceList::ScopeVector(y)) => {
                Ok(OccurrenceList::ScopeVector(x.out_scope_join(y, attach_depth)?))
            }
            _ => Err(MineError::MixedOccurrenceKinds),
        }
    }
}
