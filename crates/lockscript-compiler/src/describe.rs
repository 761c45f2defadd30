//! Diagnostics formatting for failed parses.

/// The parser's sentinel for "the script may end here".
const END_OF_INPUT: &str = "end of input";
/// How the sentinel reads in the final sentence.
const END_OF_SCRIPT_PHRASE: &str = "the end of the script";

/// Turn an alphabetized list of expected-token descriptions into a single
/// sentence.
///
/// The end-of-input sentinel, when present, is removed and re-rendered as
/// "the end of the script" at the end of the list (the remainder stays
/// alphabetized). One item stands alone, two join with " or ", three or more
/// use the Oxford-comma form.
pub fn describe_expected(expected: &[String]) -> String {
    let mut items: Vec<&str> = expected
        .iter()
        .map(String::as_str)
        .filter(|item| *item != END_OF_INPUT)
        .collect();
    if items.len() != expected.len() {
        items.push(END_OF_SCRIPT_PHRASE);
    }
    let list = match items.as_slice() {
        [] => String::new(),
        [only] => (*only).to_string(),
        [first, second] => format!("{first} or {second}"),
        [rest @ .., last] => format!("{}, or {last}", rest.join(", ")),
    };
    format!("Encountered unexpected input while parsing script. Expected {list}.")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_empty_list() {
        let sentence = describe_expected(&[]);
        assert!(sentence.ends_with('.'));
    }

    #[test]
    fn test_single_item() {
        let sentence = describe_expected(&strings(&["'<'"]));
        assert_eq!(
            sentence,
            "Encountered unexpected input while parsing script. Expected '<'."
        );
        assert!(!sentence.contains(','));
        assert!(!sentence.contains(" or "));
    }

    #[test]
    fn test_two_items() {
        let sentence = describe_expected(&strings(&["'<'", "a number"]));
        assert_eq!(
            sentence,
            "Encountered unexpected input while parsing script. Expected '<' or a number."
        );
    }

    #[test]
    fn test_three_items_use_oxford_comma() {
        let sentence = describe_expected(&strings(&["'<'", "a number", "a string"]));
        assert_eq!(
            sentence,
            "Encountered unexpected input while parsing script. \
             Expected '<', a number, or a string."
        );
    }

    #[test]
    fn test_sentinel_moves_to_end() {
        let sentence = describe_expected(&strings(&["'<'", "a number", "end of input"]));
        assert_eq!(
            sentence,
            "Encountered unexpected input while parsing script. \
             Expected '<', a number, or the end of the script."
        );
        assert!(!sentence.contains("end of input"));
    }

    #[test]
    fn test_sentinel_alone() {
        let sentence = describe_expected(&strings(&["end of input"]));
        assert_eq!(
            sentence,
            "Encountered unexpected input while parsing script. \
             Expected the end of the script."
        );
    }

    #[test]
    fn test_sentinel_with_one_other() {
        let sentence = describe_expected(&strings(&["'>'", "end of input"]));
        assert_eq!(
            sentence,
            "Encountered unexpected input while parsing script. \
             Expected '>' or the end of the script."
        );
    }
}
