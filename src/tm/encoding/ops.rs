use std::fmt;

use super::codec::{Token, TreeCodec, TreeEncoding};
use super::tree::ParsedTree;
use crate::tm::error::{MineError, MineResult};

impl TreeEncoding {
    pub fn single(label: impl Into<String>) -> Self {
        Self {
            tokens: vec![Token::Label(label.into())],
        }
    }

    /// Root `label` with each of `children` appended, in order, as a subtree.
    pub fn add_children_to_node(label: impl Into<String>, children: &[TreeEncoding]) -> Self {
        let mut tokens = vec![Token::Label(label.into())];
        for child in children {
            tokens.extend(child.tokens.iter().cloned());
            tokens.push(Token::Ascend);
        }
        Self { tokens }
    }

    /// A single root-to-leaf path, first label at the root.
    pub fn branch<S: AsRef<str>>(labels: &[S]) -> Self {
        let mut tokens: Vec<Token> = labels
            .iter()
            .map(|label| Token::Label(label.as_ref().to_string()))
            .collect();
        tokens.extend(std::iter::repeat(Token::Ascend).take(labels.len().saturating_sub(1)));
        Self { tokens }
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn node_count(&self) -> usize {
        self.tokens
            .iter()
            .filter(|token| matches!(token, Token::Label(_)))
            .count()
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.tokens.iter().filter_map(|token| match token {
            Token::Label(label) => Some(label.as_str()),
            Token::Ascend => None,
        })
    }

    pub fn to_parsed(&self) -> ParsedTree {
        ParsedTree::from_encoding(self)
    }

    /// Token index of the node at pre-order `position`.
    fn token_index_of(&self, position: usize) -> MineResult<usize> {
        self.tokens
            .iter()
            .enumerate()
            .filter(|(_, token)| matches!(token, Token::Label(_)))
            .nth(position)
            .map(|(idx, _)| idx)
            .ok_or(MineError::InvalidPosition {
                position,
                nodes: self.node_count(),
            })
    }

    /// Token index of the ascend closing the node opened at `start`, or the
    /// encoding length when the node is the (implicitly closed) root.
    fn closing_index(&self, start: usize) -> usize {
        let mut depth = 0usize;
        for (idx, token) in self.tokens.iter().enumerate().skip(start + 1) {
            match token {
                Token::Label(_) => depth += 1,
                Token::Ascend if depth == 0 => return idx,
                Token::Ascend => depth -= 1,
            }
        }
        self.tokens.len()
    }

    /// New encoding with a leaf `label` appended as the last child of the node
    /// at pre-order index `attach`. On the empty encoding only position 0 is
    /// valid and yields the single-node tree.
    pub fn add_node(&self, label: impl Into<String>, attach: usize) -> MineResult<TreeEncoding> {
        if self.is_empty() {
            if attach != 0 {
                return Err(MineError::InvalidPosition {
                    position: attach,
                    nodes: 0,
                });
            }
            return Ok(Self::single(label));
        }

        let start = self.token_index_of(attach)?;
        let insert_at = self.closing_index(start);

        let mut tokens = Vec::with_capacity(self.tokens.len() + 2);
        tokens.extend_from_slice(&self.tokens[..insert_at]);
        tokens.push(Token::Label(label.into()));
        tokens.push(Token::Ascend);
        tokens.extend_from_slice(&self.tokens[insert_at..]);

        Ok(Self { tokens })
    }

    pub fn number_of_children(&self, position: usize) -> MineResult<usize> {
        let start = self.token_index_of(position)?;
        let mut depth = 0usize;
        let mut children = 0;

        for token in &self.tokens[start + 1..] {
            match token {
                Token::Label(_) => {
                    if depth == 0 {
                        children += 1;
                    }
                    depth += 1;
                }
                Token::Ascend if depth == 0 => break,
                Token::Ascend => depth -= 1,
            }
        }

        Ok(children)
    }

    /// Number of nodes strictly below the node at `position`.
    pub fn number_of_descendants(&self, position: usize) -> MineResult<usize> {
        let start = self.token_index_of(position)?;
        let end = self.closing_index(start);
        Ok(self.tokens[start + 1..end]
            .iter()
            .filter(|token| matches!(token, Token::Label(_)))
            .count())
    }

    /// Pre-order positions of the rightmost path, root first.
    pub fn rightmost_path(&self) -> Vec<usize> {
        if self.is_empty() {
            return Vec::new();
        }
        let parsed = self.to_parsed();
        let mut path = Vec::new();
        let mut current = Some(parsed.len() - 1);
        while let Some(node) = current {
            path.push(node);
            current = parsed.parent(node);
        }
        path.reverse();
        path
    }

    /// Whether `subtree` occurs directly in this tree.
    pub fn contains_subtree(&self, subtree: &TreeEncoding) -> bool {
        if self.is_empty() || subtree.is_empty() {
            return subtree.is_empty();
        }
        self.to_parsed().contains_subtree(&subtree.to_parsed())
    }
}

/// Renders with the default separator and ascend tokens.
impl fmt::Display for TreeEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&TreeCodec::default().render(self))
    }
}
