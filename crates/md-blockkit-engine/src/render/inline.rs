use crate::lexer::Token;

/// Delimiters of the destination markup dialect.
pub struct Markup;

impl Markup {
    pub const BOLD: char = '*';
    pub const ITALIC: char = '_';
    pub const STRIKE: char = '~';
    pub const CODE: char = '`';
    pub const LINK_OPEN: char = '<';
    pub const LINK_SEP: char = '|';
    pub const LINK_CLOSE: char = '>';
    pub const FENCE: &'static str = "```";
}

/// Renders an inline token sequence to markup.
///
/// An empty sequence renders to `""`. Kinds with no markup equivalent are
/// emitted as their `raw` source text, never dropped.
pub fn render_inline(tokens: &[Token]) -> String {
    let mut out = String::new();
    write_inline(&mut out, tokens);
    out
}

fn write_inline(out: &mut String, tokens: &[Token]) {
    for token in tokens {
        match token {
            Token::Text { text, .. } => out.push_str(text),
            Token::Link { href, tokens, .. } => {
                out.push(Markup::LINK_OPEN);
                out.push_str(href);
                out.push(Markup::LINK_SEP);
                write_inline(out, tokens);
                out.push(Markup::LINK_CLOSE);
            }
            Token::Image { href, text, .. } => {
                out.push(Markup::LINK_OPEN);
                out.push_str(href);
                out.push(Markup::LINK_SEP);
                out.push_str(text);
                out.push(Markup::LINK_CLOSE);
            }
            Token::Strong { tokens, .. } => wrap(out, Markup::BOLD, tokens),
            Token::Em { tokens, .. } => wrap(out, Markup::ITALIC, tokens),
            Token::Del { tokens, .. } => wrap(out, Markup::STRIKE, tokens),
            Token::Codespan { text, .. } => {
                out.push(Markup::CODE);
                out.push_str(text);
                out.push(Markup::CODE);
            }
            Token::Br { .. } => out.push('\n'),
            Token::Heading { .. }
            | Token::Paragraph { .. }
            | Token::List(_)
            | Token::Blockquote { .. }
            | Token::Code { .. }
            | Token::Hr { .. }
            | Token::Table(_)
            | Token::Space { .. }
            | Token::Html { .. }
            | Token::Other { .. } => out.push_str(token.raw()),
        }
    }
}

fn wrap(out: &mut String, delim: char, tokens: &[Token]) {
    out.push(delim);
    write_inline(out, tokens);
    out.push(delim);
}
