use super::plain_text;
use crate::{blocks::Cell, lexer::Token};

/// Builds a table cell from its inline tokens.
///
/// Only the literal text is kept; inline formatting other than the header
/// flag is not carried into cells. The destination rejects empty cells, so
/// a blank cell becomes a single space.
pub fn build_cell(tokens: &[Token], header: bool) -> Cell {
    let text = plain_text(tokens);
    let text = match text.trim() {
        "" => " ".to_string(),
        trimmed => trimmed.to_string(),
    };
    Cell { text, bold: header }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case::nothing(vec![])]
    #[case::whitespace(vec![Token::text("   \t ")])]
    fn blank_cells_become_a_single_space(#[case] tokens: Vec<Token>) {
        assert_eq!(build_cell(&tokens, false).text, " ");
    }

    #[test]
    fn text_is_trimmed_and_stripped() {
        let tokens = [
            Token::text("  a "),
            Token::Strong {
                tokens: vec![Token::text("b")],
                raw: "**b**".into(),
            },
            Token::text("  "),
        ];
        assert_eq!(
            build_cell(&tokens, false),
            Cell {
                text: "a b".into(),
                bold: false
            }
        );
    }

    #[test]
    fn header_flag_sets_bold() {
        assert!(build_cell(&[Token::text("h")], true).bold);
        assert!(!build_cell(&[Token::text("d")], false).bold);
    }
}
