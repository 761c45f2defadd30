// Allow unwrap in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]

//! Lexical analysis for script templates, using logos.
//!
//! The grammar surface is small: identifiers, hex/integer/string literals,
//! push delimiters `<` `>`, and evaluation delimiters `$(` `)`. Comments are
//! stripped during lexing (not tokens).
//!
//! # Examples
//!
//! ```
//! use lockscript_lexer::Token;
//! use logos::Logos;
//! let tokens: Vec<Result<Token, ()>> =
//!     Token::lexer("OP_DUP <0xab> $(1)").collect();
//! assert!(tokens.iter().all(Result::is_ok));
//! ```

use logos::Logos;

/// Script template token.
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")] // Skip whitespace
#[logos(skip r"//[^\n]*")] // Skip // comments
#[logos(skip r"/\*([^*]|\*[^/])*\*/")] // Skip /* */ comments
pub enum Token {
    /// Opening push delimiter `<`
    #[token("<")]
    OpenPush,

    /// Closing push delimiter `>`
    #[token(">")]
    ClosePush,

    /// Opening evaluation delimiter `$(`
    #[token("$(")]
    OpenEvaluation,

    /// Closing evaluation delimiter `)`
    #[token(")")]
    CloseEvaluation,

    /// Hex literal: `0x` followed by one or more byte pairs, decoded here.
    ///
    /// The regex requires whole byte pairs; an odd trailing digit is left in
    /// the stream and surfaces as a separate (usually unresolvable) token.
    #[regex(r"0x([0-9a-fA-F]{2})+", |lex| hex::decode(&lex.slice()[2..]).ok())]
    HexLiteral(Vec<u8>),

    /// Decimal integer literal, optionally negative.
    #[regex(r"-?[0-9]+", |lex| lex.slice().parse::<i64>().ok())]
    IntegerLiteral(i64),

    /// Single-quoted UTF-8 string literal (no escape sequences).
    #[regex(r"'[^']*'", |lex| strip_quotes(lex.slice()))]
    SingleQuoted(String),

    /// Double-quoted UTF-8 string literal (no escape sequences).
    #[regex(r#""[^"]*""#, |lex| strip_quotes(lex.slice()))]
    DoubleQuoted(String),

    /// Identifier: opcode name, variable, or script id. Dots allowed for
    /// namespaced template identifiers.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_.]*", |lex| lex.slice().to_string())]
    Identifier(String),
}

fn strip_quotes(slice: &str) -> String {
    slice[1..slice.len() - 1].to_string()
}
