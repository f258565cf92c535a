// Tree encoding module - token codec, scopes and host tree arena

mod codec;
mod ops;
mod scope;
mod tree;

pub use codec::{Token, TreeCodec, TreeEncoding, DEFAULT_ASCEND, DEFAULT_SEPARATOR};
pub use scope::Scope;
pub use tree::{ParsedTree, TreeNode};
