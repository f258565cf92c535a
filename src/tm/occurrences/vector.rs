use std::collections::BTreeSet;

use crate::tm::encoding::Scope;
use crate::tm::error::{MineError, MineResult};

/// Scopes of the host nodes matched by the pattern's rightmost path, root
/// first. Embeddings sharing that path collapse into one record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VectorRecord {
    pub tree: usize,
    pub path: Vec<Scope>,
}

impl VectorRecord {
    pub fn new(tree: usize, path: Vec<Scope>) -> Self {
        debug_assert!(!path.is_empty());
        Self { tree, path }
    }

    fn first_of_tree(tree: usize) -> Self {
        Self {
            tree,
            path: Vec::new(),
        }
    }

    pub fn terminal(&self) -> Scope {
        self.path[self.path.len() - 1]
    }

    /// Path of the class prefix this record was built under.
    fn context(&self) -> &[Scope] {
        &self.path[..self.path.len() - 1]
    }
}

/// Occurrence list tracking only rightmost-path scopes; suited to distinct
/// (per tree) occurrence counting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScopeVectorList {
    records: BTreeSet<VectorRecord>,
}

impl ScopeVectorList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, record: VectorRecord) {
        self.records.insert(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VectorRecord> {
        self.records.iter()
    }

    pub fn retain(&mut self, mut keep: impl FnMut(&VectorRecord) -> bool) {
        self.records.retain(|record| keep(record));
    }

    fn same_tree<'a>(&'a self, tree: usize) -> impl Iterator<Item = &'a VectorRecord> + 'a {
        self.records
            .range(VectorRecord::first_of_tree(tree)..)
            .take_while(move |record| record.tree == tree)
    }

    /// Attaches `y` below `x`'s terminal node.
    ///
    /// Every enclosing `x` is joined, not only the nearest one. With repeated
    /// labels along a path (`A B B D`) the outer pairing is the context a
    /// later join needs to rebuild the direct chain.
    pub fn in_scope_join(&self, other: &ScopeVectorList) -> ScopeVectorList {
        let mut joined = ScopeVectorList::new();

        for x in &self.records {
            let sx = x.terminal();
            for y in other.same_tree(x.tree) {
                let sy = y.terminal();
                if x.context() == y.context() && sx.contains(&sy) {
                    let mut path = x.path.clone();
                    path.push(sy);
                    joined.add(VectorRecord::new(x.tree, path));
                }
            }
        }

        joined
    }

    /// Attaches `y` as a later child of the node at `attach_depth` on `x`'s
    /// rightmost path. `y` must start after the whole subtree hanging from
    /// that node on `x`'s path, which covers `x`'s terminal as well.
    pub fn out_scope_join(
        &self,
        other: &ScopeVectorList,
        attach_depth: usize,
    ) -> MineResult<ScopeVectorList> {
        let mut joined = ScopeVectorList::new();

        for x in &self.records {
            if x.path.len() < attach_depth + 2 {
                return Err(MineError::DetachedOccurrence {
                    depth: attach_depth,
                    path_len: x.path.len(),
                });
            }
            let anchor = &x.path[..=attach_depth];
            let below_anchor = x.path[attach_depth + 1];

            for y in other.same_tree(x.tree) {
                if y.path.len() != attach_depth + 2 {
                    return Err(MineError::DetachedOccurrence {
                        depth: attach_depth,
                        path_len: y.path.len(),
                    });
                }
                let sy = y.terminal();
                if y.context() == anchor && below_anchor.is_strictly_less_than(&sy) {
                    let mut path = anchor.to_vec();
                    path.push(sy);
                    joined.add(VectorRecord::new(x.tree, path));
                }
            }
        }

        Ok(joined)
    }
}
