use std::fmt;

/// Pre-order interval `[lower, upper]` spanned by a node's subtree.
///
/// `lower` is the node's own pre-order index and `upper` the index of the
/// rightmost node below it (or `lower` for a leaf). The derived order compares
/// `lower` first, then `upper`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Scope {
    pub lower: usize,
    pub upper: usize,
}

impl Scope {
    pub fn new(lower: usize, upper: usize) -> Self {
        debug_assert!(lower <= upper);
        Self { lower, upper }
    }

    pub fn leaf(position: usize) -> Self {
        Self::new(position, position)
    }

    /// Strict containment: equal scopes do not contain each other.
    pub fn contains(&self, other: &Scope) -> bool {
        self.lower <= other.lower && other.upper <= self.upper && self != other
    }

    /// Whether this scope ends before `other` starts.
    pub fn is_strictly_less_than(&self, other: &Scope) -> bool {
        self.upper < other.lower
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lower, self.upper)
    }
}
