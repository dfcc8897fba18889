use crate::lexer::Token;

/// Extracts the literal text of a token subtree with all markup stripped.
///
/// Text leaves contribute their content, tokens with children recurse into
/// them, and any other leaf contributes its `raw` source.
pub fn plain_text(tokens: &[Token]) -> String {
    let mut out = String::new();
    write_plain(&mut out, tokens);
    out
}

fn write_plain(out: &mut String, tokens: &[Token]) {
    for token in tokens {
        match token {
            Token::Text { text, .. } => out.push_str(text),
            Token::List(list) => {
                for item in &list.items {
                    write_plain(out, &item.tokens);
                }
            }
            Token::Table(table) => {
                for cell in table.header.iter().chain(table.rows.iter().flatten()) {
                    write_plain(out, &cell.tokens);
                }
            }
            _ => match token.children() {
                Some(children) => write_plain(out, children),
                None => out.push_str(token.raw()),
            },
        }
    }
}
