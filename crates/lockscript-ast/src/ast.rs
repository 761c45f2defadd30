//! Parse artifact: the syntax tree produced by `lockscript-parser`.

use crate::range::Range;

/// A parsed script: an ordered sequence of segments.
pub type Script = Vec<AstNode>;

/// One segment of a parsed script, with its source range.
#[derive(Debug, Clone, PartialEq)]
pub struct AstNode {
    pub range: Range,
    pub kind: AstNodeKind,
}

/// Segment kinds of the script template grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum AstNodeKind {
    /// A bare identifier: an opcode name, a variable, or another script's id.
    Identifier(String),
    /// A `0x`-prefixed hex literal, already decoded to bytes.
    HexLiteral(Vec<u8>),
    /// A decimal integer literal, encoded as a VM script number at resolution.
    IntegerLiteral(i64),
    /// A single- or double-quoted UTF-8 string literal.
    Utf8Literal(String),
    /// `< ... >`: the contained script's bytecode, wrapped in a data push.
    Push(Script),
    /// `$( ... )`: the contained script's bytecode, executed on the VM; the
    /// top stack item of the final state replaces the node.
    Evaluation(Script),
}

impl AstNode {
    pub fn new(range: Range, kind: AstNodeKind) -> Self {
        Self { range, kind }
    }
}
