//! Resolution artifact: the parse tree after identifier resolution.

use crate::range::Range;

/// A resolved script, structurally parallel to the parse artifact.
pub type ResolvedScript = Vec<ResolvedNode>;

/// One resolved segment with its source range.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedNode {
    pub range: Range,
    pub value: ResolvedValue,
}

/// Resolution outcome for a single node.
///
/// Errors are embedded in the tree rather than aborting resolution, so a
/// caller sees every unresolvable identifier in one pass.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// Literal or resolved identifier bytecode.
    Bytecode(Vec<u8>),
    /// A node that could not be resolved; the message explains why.
    Error(String),
    /// A push whose contents resolved recursively.
    Push(ResolvedScript),
    /// An evaluation whose contents resolved recursively.
    Evaluation(ResolvedScript),
}

impl ResolvedNode {
    pub fn new(range: Range, value: ResolvedValue) -> Self {
        Self { range, value }
    }
}
