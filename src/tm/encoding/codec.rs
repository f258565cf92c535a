use super::tree::ParsedTree;
use crate::tm::error::{MineError, MineResult};

pub const DEFAULT_SEPARATOR: &str = " ";
pub const DEFAULT_ASCEND: &str = "-1";

/// One token of a pre-order tree encoding.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Token {
    Label(String),
    /// Closes the most recently opened node that is still open.
    Ascend,
}

/// Depth-first pre-order encoding of a rooted, ordered, labeled tree.
///
/// Every non-root node is closed by exactly one [`Token::Ascend`]; the root's
/// closing ascend is never stored. An empty encoding is the empty prefix of
/// the root equivalence class.
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TreeEncoding {
    pub(crate) tokens: Vec<Token>,
}

/// Token configuration used to read and write tree encodings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeCodec {
    separator: String,
    ascend: String,
}

impl Default for TreeCodec {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
            ascend: DEFAULT_ASCEND.to_string(),
        }
    }
}

impl TreeCodec {
    pub fn new(separator: impl Into<String>, ascend: impl Into<String>) -> MineResult<Self> {
        let separator = separator.into();
        let ascend = ascend.into();

        if separator.is_empty() {
            return Err(MineError::InvalidCodec("separator must not be empty".into()));
        }
        if ascend.is_empty() {
            return Err(MineError::InvalidCodec("ascend token must not be empty".into()));
        }
        if ascend.contains(separator.as_str()) {
            return Err(MineError::InvalidCodec(format!(
                "ascend token {:?} contains the separator {:?}",
                ascend, separator
            )));
        }

        Ok(Self { separator, ascend })
    }

    pub fn separator(&self) -> &str {
        &self.separator
    }

    pub fn ascend(&self) -> &str {
        &self.ascend
    }

    /// Parses and validates an encoding.
    ///
    /// A trailing ascend closing the root is accepted and dropped.
    pub fn parse(&self, input: &str) -> MineResult<TreeEncoding> {
        let mut tokens = Vec::new();
        let mut open = 0usize;
        let mut root_closed = false;

        for raw in input.split(self.separator.as_str()).filter(|t| !t.is_empty()) {
            if raw == self.ascend {
                if open == 0 {
                    return Err(MineError::malformed(input, "ascend token closes no open node"));
                }
                open -= 1;
                if open == 0 {
                    root_closed = true;
                } else {
                    tokens.push(Token::Ascend);
                }
            } else {
                if root_closed {
                    return Err(MineError::malformed(input, "label found after the root was closed"));
                }
                open += 1;
                tokens.push(Token::Label(raw.to_string()));
            }
        }

        if tokens.is_empty() {
            return Err(MineError::malformed(input, "encoding contains no nodes"));
        }
        if open > 1 {
            return Err(MineError::malformed(
                input,
                format!("{} non-root nodes are never closed", open - 1),
            ));
        }

        Ok(TreeEncoding { tokens })
    }

    pub fn parse_tree(&self, input: &str) -> MineResult<ParsedTree> {
        self.parse(input).map(|encoding| ParsedTree::from_encoding(&encoding))
    }

    pub fn render(&self, tree: &TreeEncoding) -> String {
        let mut out = String::new();
        for (idx, token) in tree.tokens.iter().enumerate() {
            if idx > 0 {
                out.push_str(&self.separator);
            }
            match token {
                Token::Label(label) => out.push_str(label),
                Token::Ascend => out.push_str(&self.ascend),
            }
        }
        out
    }

    /// Checks that a label can be written without breaking the encoding.
    pub fn validate_label(&self, label: &str) -> MineResult<()> {
        if label.is_empty() || label == self.ascend || label.contains(self.separator.as_str()) {
            return Err(MineError::malformed(label, "label collides with the codec tokens"));
        }
        Ok(())
    }

    /// String-level [`TreeEncoding::add_node`].
    pub fn add_node_to_tree(&self, tree: &str, label: &str, attach: usize) -> MineResult<String> {
        self.validate_label(label)?;
        let encoding = if tree.trim().is_empty() {
            TreeEncoding::default()
        } else {
            self.parse(tree)?
        };
        Ok(self.render(&encoding.add_node(label, attach)?))
    }

    pub fn find_number_of_children_of_node(&self, tree: &str, position: usize) -> MineResult<usize> {
        self.parse(tree)?.number_of_children(position)
    }

    /// Whether `subtree` occurs directly (parent-child preserving) in `tree`.
    pub fn contains_subtree(&self, tree: &str, subtree: &str) -> MineResult<bool> {
        let host = self.parse_tree(tree)?;
        let pattern = self.parse_tree(subtree)?;
        Ok(host.contains_subtree(&pattern))
    }
}
