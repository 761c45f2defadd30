//! Parser tests over realistic multi-line template sources.

use lockscript_ast::{AstNodeKind, Range};
use lockscript_parser::parse_script;

#[test]
fn test_p2pkh_locking_template() {
    let source = "OP_DUP OP_HASH160 <$(<key.public_key> OP_HASH160)> OP_EQUALVERIFY OP_CHECKSIG";
    let script = parse_script(source).unwrap();
    assert_eq!(script.len(), 5);
    assert!(matches!(script[0].kind, AstNodeKind::Identifier(_)));
    let AstNodeKind::Push(inner) = &script[2].kind else {
        panic!("expected push node");
    };
    assert!(matches!(inner[0].kind, AstNodeKind::Evaluation(_)));
}

#[test]
fn test_multi_line_source_with_comments() {
    let source = "\
// locking script
OP_DUP OP_HASH160 // stack setup
/* the commitment */
<0x00112233445566778899aabbccddeeff00112233>
OP_EQUALVERIFY OP_CHECKSIG
";
    let script = parse_script(source).unwrap();
    assert_eq!(script.len(), 5);
    // the push sits alone on line 4
    assert_eq!(script[2].range, Range::new(4, 1, 4, 45));
    assert_eq!(script[3].range.start_line, 5);
}

#[test]
fn test_mixed_literals() {
    let script = parse_script("500000000 -1 'label' \"label\" 0xffff").unwrap();
    assert_eq!(
        script.iter().map(|node| &node.kind).collect::<Vec<_>>(),
        vec![
            &AstNodeKind::IntegerLiteral(500_000_000),
            &AstNodeKind::IntegerLiteral(-1),
            &AstNodeKind::Utf8Literal("label".to_string()),
            &AstNodeKind::Utf8Literal("label".to_string()),
            &AstNodeKind::HexLiteral(vec![0xff, 0xff]),
        ]
    );
}

#[test]
fn test_deep_nesting_round_trips_ranges() {
    let script = parse_script("<<<0x01>>>").unwrap();
    assert_eq!(script.len(), 1);
    assert_eq!(script[0].range, Range::new(1, 1, 1, 11));
    let AstNodeKind::Push(level_one) = &script[0].kind else {
        panic!("expected push node");
    };
    assert_eq!(level_one[0].range, Range::new(1, 2, 1, 10));
}

#[test]
fn test_failure_position_on_later_line() {
    let failure = parse_script("OP_DUP\nOP_HASH160 )").unwrap_err();
    assert_eq!((failure.line, failure.column), (2, 12));
    assert!(failure.expected.contains(&"end of input".to_string()));
}

#[test]
fn test_unterminated_nested_scope() {
    let failure = parse_script("<$(OP_1>").unwrap_err();
    // the `>` is rejected inside the evaluation scope
    assert_eq!((failure.line, failure.column), (1, 8));
    assert!(failure.expected.contains(&"')'".to_string()));
    assert!(!failure.expected.contains(&"'>'".to_string()));
}
