use std::collections::BTreeSet;

use crate::tm::encoding::Scope;

/// One embedding of a pattern: the host positions matched by the class prefix
/// plus the scope of the host node matched by the extension node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LabelRecord {
    pub tree: usize,
    pub scope: Scope,
    pub match_label: Vec<usize>,
}

impl LabelRecord {
    pub fn new(tree: usize, match_label: Vec<usize>, scope: Scope) -> Self {
        Self {
            tree,
            scope,
            match_label,
        }
    }

    fn first_of_tree(tree: usize) -> Self {
        Self::new(tree, Vec::new(), Scope::leaf(0))
    }

    /// Context for the next class: this record's prefix match extended by the
    /// host node it matched itself.
    fn extended_match(&self) -> Vec<usize> {
        let mut match_label = Vec::with_capacity(self.match_label.len() + 1);
        match_label.extend_from_slice(&self.match_label);
        match_label.push(self.scope.lower);
        match_label
    }
}

/// Occurrence list keeping every embedding, so repeated matches inside one
/// tree stay distinguishable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelTrackingList {
    records: BTreeSet<LabelRecord>,
}

impl LabelTrackingList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: LabelRecord) {
        self.records.insert(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LabelRecord> {
        self.records.iter()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&LabelRecord) -> bool) {
        self.records.retain(|record| keep(record));
    }

    fn same_tree<'a>(&'a self, tree: usize) -> impl Iterator<Item = &'a LabelRecord> + 'a {
        self.records
            .range(LabelRecord::first_of_tree(tree)..)
            .take_while(move |record| record.tree == tree)
    }

    /// Keeps `y` below `x`: same tree, same prefix match, `x` strictly
    /// contains `y`.
    pub fn in_scope_join(&self, other: &LabelTrackingList) -> LabelTrackingList {
        self.join_with(other, |x, y| x.scope.contains(&y.scope))
    }

    /// Keeps `y` as a later sibling branch: same tree, same prefix match, `x`
    /// ends before `y` starts.
    pub fn out_scope_join(&self, other: &LabelTrackingList) -> LabelTrackingList {
        self.join_with(other, |x, y| x.scope.is_strictly_less_than(&y.scope))
    }

    fn join_with<F>(&self, other: &LabelTrackingList, accept: F) -> LabelTrackingList
    where
        F: Fn(&LabelRecord, &LabelRecord) -> bool,
    {
        let mut joined = LabelTrackingList::new();

        for x in &self.records {
            for y in other.same_tree(x.tree) {
                if x.match_label == y.match_label && accept(x, y) {
                    joined.add(LabelRecord::new(x.tree, x.extended_match(), y.scope));
                }
            }
        }

        joined
    }
}
