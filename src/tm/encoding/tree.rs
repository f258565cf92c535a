use super::codec::{Token, TreeEncoding};
use super::scope::Scope;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    pub label: String,
    pub scope: Scope,
    pub parent: Option<usize>,
    pub children: Vec<usize>,
}

/// Arena form of a tree encoding; nodes are stored in pre-order, so a node's
/// index is its pre-order position and the lower bound of its scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedTree {
    pub nodes: Vec<TreeNode>,
}

impl TreeNode {
    fn new(label: String, position: usize, parent: Option<usize>) -> Self {
        Self {
            label,
            scope: Scope::leaf(position),
            parent,
            children: Vec::new(),
        }
    }
}

impl ParsedTree {
    pub fn from_encoding(encoding: &TreeEncoding) -> Self {
        let mut nodes: Vec<TreeNode> = Vec::with_capacity(encoding.tokens.len() / 2 + 1);
        let mut open: Vec<usize> = Vec::new();

        for token in &encoding.tokens {
            match token {
                Token::Label(label) => {
                    let index = nodes.len();
                    let parent = open.last().copied();
                    nodes.push(TreeNode::new(label.clone(), index, parent));
                    if let Some(parent) = parent {
                        nodes[parent].children.push(index);
                    }
                    open.push(index);
                }
                Token::Ascend => {
                    if let Some(closed) = open.pop() {
                        nodes[closed].scope.upper = nodes.len() - 1;
                    }
                }
            }
        }

        // Whatever is still open (the root at least) spans to the last node.
        let last = nodes.len().saturating_sub(1);
        for index in open {
            nodes[index].scope.upper = last;
        }

        Self { nodes }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn label(&self, node: usize) -> &str {
        &self.nodes[node].label
    }

    pub fn scope(&self, node: usize) -> Scope {
        self.nodes[node].scope
    }

    pub fn parent(&self, node: usize) -> Option<usize> {
        self.nodes[node].parent
    }

    pub fn children(&self, node: usize) -> &[usize] {
        &self.nodes[node].children
    }

    /// Pre-order positions of every node strictly below `node`.
    pub fn descendants(&self, node: usize) -> std::ops::RangeInclusive<usize> {
        let scope = self.scope(node);
        scope.lower + 1..=scope.upper
    }

    /// Scans the host nodes in pre-order for one that roots a direct match of
    /// `pattern`.
    pub fn contains_subtree(&self, pattern: &ParsedTree) -> bool {
        if pattern.is_empty() {
            return true;
        }
        (0..self.len()).any(|host| self.matches_at(host, pattern, 0))
    }

    /// Direct match of the pattern subtree rooted at `pattern_node` onto the
    /// host subtree rooted at `host_node`. Pattern children are matched to an
    /// ordered subsequence of the host children; greedy leftmost assignment is
    /// complete for ordered subsequences.
    fn matches_at(&self, host_node: usize, pattern: &ParsedTree, pattern_node: usize) -> bool {
        if self.label(host_node) != pattern.label(pattern_node) {
            return false;
        }

        let host_children = self.children(host_node);
        let mut next = 0;
        for &wanted in pattern.children(pattern_node) {
            match host_children[next..]
                .iter()
                .position(|&candidate| self.matches_at(candidate, pattern, wanted))
            {
                Some(offset) => next += offset + 1,
                None => return false,
            }
        }
        true
    }
}
