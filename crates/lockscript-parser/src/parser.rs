//! Recursive descent over the token stream.

use crate::line_map::LineMap;
use crate::stream::TokenStream;
use lockscript_ast::{AstNode, AstNodeKind, Script};
use lockscript_lexer::Token;
use logos::Logos;

/// A failed parse: what was expected, and where.
///
/// `expected` is alphabetized and uses the sentinel string `end of input`
/// when the end of the script would have been acceptable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseFailure {
    pub expected: Vec<String>,
    pub line: u32,
    pub column: u32,
}

/// What encloses the script currently being parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Enclosure {
    /// Top level: end of input closes the script.
    Script,
    /// Inside `< ... >`.
    Push,
    /// Inside `$( ... )`.
    Evaluation,
}

impl Enclosure {
    /// Description of the one token that may end this scope.
    fn terminator(&self) -> &'static str {
        match self {
            Enclosure::Script => "end of input",
            Enclosure::Push => "'>'",
            Enclosure::Evaluation => "')'",
        }
    }
}

/// Descriptions of every token that can begin a segment.
const SEGMENT_STARTERS: &[&str] = &[
    "'$('",
    "'<'",
    "a double-quoted string",
    "a hex literal",
    "a single-quoted string",
    "an identifier",
    "an integer literal",
];

/// Parse template source text into the parse artifact.
///
/// On failure, reports the alphabetized expected-token descriptions and the
/// 1-based position of the offending token (or of end of input).
pub fn parse_script(source: &str) -> Result<Script, ParseFailure> {
    let tokens: Vec<_> = Token::lexer(source).spanned().collect();
    let line_map = LineMap::new(source);
    let mut stream = TokenStream::new(tokens, source.len());
    let script = parse_segments(&mut stream, &line_map, Enclosure::Script)?;
    debug_assert!(stream.at_end());
    Ok(script)
}

/// Parse segments until the enclosing terminator.
///
/// The terminator token itself is consumed by the caller for `Push` and
/// `Evaluation` scopes (it returns here without consuming), so the caller
/// can extend the node range over the closing delimiter.
fn parse_segments(
    stream: &mut TokenStream,
    line_map: &LineMap,
    enclosure: Enclosure,
) -> Result<Script, ParseFailure> {
    let mut script = Script::new();
    loop {
        let Some((result, span)) = stream.peek() else {
            if enclosure == Enclosure::Script {
                return Ok(script);
            }
            return Err(failure_at(stream, line_map, enclosure));
        };
        let span = span.clone();
        let token = match result {
            Ok(token) => token.clone(),
            Err(()) => return Err(failure_at(stream, line_map, enclosure)),
        };
        match token {
            Token::Identifier(name) => {
                stream.advance();
                script.push(AstNode::new(
                    line_map.range(&span),
                    AstNodeKind::Identifier(name),
                ));
            }
            Token::HexLiteral(bytes) => {
                stream.advance();
                script.push(AstNode::new(
                    line_map.range(&span),
                    AstNodeKind::HexLiteral(bytes),
                ));
            }
            Token::IntegerLiteral(value) => {
                stream.advance();
                script.push(AstNode::new(
                    line_map.range(&span),
                    AstNodeKind::IntegerLiteral(value),
                ));
            }
            Token::SingleQuoted(text) | Token::DoubleQuoted(text) => {
                stream.advance();
                script.push(AstNode::new(
                    line_map.range(&span),
                    AstNodeKind::Utf8Literal(text),
                ));
            }
            Token::OpenPush => {
                stream.advance();
                let inner = parse_segments(stream, line_map, Enclosure::Push)?;
                let close_span = stream.current_span();
                stream.advance(); // the `>` checked by the inner parse
                script.push(AstNode::new(
                    line_map.range(&(span.start..close_span.end)),
                    AstNodeKind::Push(inner),
                ));
            }
            Token::OpenEvaluation => {
                stream.advance();
                let inner = parse_segments(stream, line_map, Enclosure::Evaluation)?;
                let close_span = stream.current_span();
                stream.advance(); // the `)` checked by the inner parse
                script.push(AstNode::new(
                    line_map.range(&(span.start..close_span.end)),
                    AstNodeKind::Evaluation(inner),
                ));
            }
            Token::ClosePush if enclosure == Enclosure::Push => return Ok(script),
            Token::CloseEvaluation if enclosure == Enclosure::Evaluation => return Ok(script),
            Token::ClosePush | Token::CloseEvaluation => {
                return Err(failure_at(stream, line_map, enclosure));
            }
        }
    }
}

/// Build a [`ParseFailure`] at the stream's current position.
fn failure_at(stream: &TokenStream, line_map: &LineMap, enclosure: Enclosure) -> ParseFailure {
    let mut expected: Vec<String> = SEGMENT_STARTERS.iter().map(|s| s.to_string()).collect();
    expected.push(enclosure.terminator().to_string());
    expected.sort();
    let (line, column) = line_map.position(stream.current_span().start);
    ParseFailure {
        expected,
        line,
        column,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockscript_ast::Range;

    fn kinds(script: &Script) -> Vec<&AstNodeKind> {
        script.iter().map(|node| &node.kind).collect()
    }

    #[test]
    fn test_empty_script() {
        assert_eq!(parse_script("").unwrap(), Vec::new());
        assert_eq!(parse_script("  // just a comment\n").unwrap(), Vec::new());
    }

    #[test]
    fn test_flat_segments() {
        let script = parse_script("OP_DUP 0xab 42 'hi'").unwrap();
        assert_eq!(
            kinds(&script),
            vec![
                &AstNodeKind::Identifier("OP_DUP".to_string()),
                &AstNodeKind::HexLiteral(vec![0xab]),
                &AstNodeKind::IntegerLiteral(42),
                &AstNodeKind::Utf8Literal("hi".to_string()),
            ]
        );
    }

    #[test]
    fn test_segment_ranges() {
        let script = parse_script("OP_DUP\n0xab").unwrap();
        assert_eq!(script[0].range, Range::new(1, 1, 1, 7));
        assert_eq!(script[1].range, Range::new(2, 1, 2, 5));
    }

    #[test]
    fn test_nested_push_and_evaluation() {
        let script = parse_script("<$(<0x01> OP_SHA256)>").unwrap();
        assert_eq!(script.len(), 1);
        let AstNodeKind::Push(inner) = &script[0].kind else {
            panic!("expected push node");
        };
        assert_eq!(inner.len(), 1);
        let AstNodeKind::Evaluation(eval) = &inner[0].kind else {
            panic!("expected evaluation node");
        };
        assert_eq!(eval.len(), 2);
        // the push range covers both delimiters
        assert_eq!(script[0].range, Range::new(1, 1, 1, 22));
    }

    #[test]
    fn test_unmatched_close_fails_at_token() {
        let failure = parse_script("OP_DUP >").unwrap_err();
        assert_eq!((failure.line, failure.column), (1, 8));
        assert!(failure.expected.contains(&"end of input".to_string()));
        assert!(!failure.expected.contains(&"'>'".to_string()));
    }

    #[test]
    fn test_unterminated_push_fails_at_eof() {
        let failure = parse_script("<0x01").unwrap_err();
        assert_eq!((failure.line, failure.column), (1, 6));
        assert!(failure.expected.contains(&"'>'".to_string()));
        assert!(!failure.expected.contains(&"end of input".to_string()));
    }

    #[test]
    fn test_unterminated_evaluation_expects_paren() {
        let failure = parse_script("$(OP_1").unwrap_err();
        assert!(failure.expected.contains(&"')'".to_string()));
    }

    #[test]
    fn test_invalid_character_fails() {
        let failure = parse_script("OP_DUP @").unwrap_err();
        assert_eq!((failure.line, failure.column), (1, 8));
    }

    #[test]
    fn test_expected_list_is_alphabetized() {
        let failure = parse_script(")").unwrap_err();
        let mut sorted = failure.expected.clone();
        sorted.sort();
        assert_eq!(failure.expected, sorted);
    }
}
