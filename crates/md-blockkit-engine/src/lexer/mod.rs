//! # Tokenizer Adapter
//!
//! Turns Markdown source into the [`Token`] tree the renderers consume.
//!
//! Tokenizing itself is delegated to `pulldown-cmark` with the GFM
//! extensions enabled (tables, strikethrough, task lists, footnotes).
//! Its flat, offset-annotated event stream is folded into an owned tree by
//! [`TokenBuilder`], which keeps the source substring of every node as `raw`.
//!
//! ## Modules
//!
//! - **`types`**: the `Token` sum type plus `List`, `ListItem`, `Table`, `TableCell`
//! - **`builder`**: `TokenBuilder`, the frame-stack state machine
//!
//! ## Event Mapping Notes
//!
//! - Soft and hard line breaks both become `Br`, so a single newline inside
//!   a paragraph survives as a newline in the rendered markup.
//! - Inline content sitting directly inside a list item (a tight list) is
//!   grouped into a block-level `Text` whose `tokens` hold the inline run.
//! - Blank-line gaps between top-level blocks become `Space` tokens.
//! - A backslash escape becomes an `Other` leaf whose `raw` is the escape as
//!   written (`\*`), so escaped punctuation never turns into markup.
//! - Inside a blockquote, `raw` of nested nodes has the quote markers of the
//!   enclosing quotes removed from its continuation lines.
//!
//! Lexing never fails; anything without a dedicated kind becomes `Other`.

pub mod builder;
pub mod types;

use pulldown_cmark::{Options, Parser};

pub use builder::TokenBuilder;
pub use types::{List, ListItem, Table, TableCell, Token};

/// Knobs for the tokenizer adapter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LexOptions {
    /// Emit a paragraph holding nothing but an image as a top-level
    /// `Image` token instead of a paragraph.
    pub image_blocks: bool,
}

fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_FOOTNOTES
}

/// Tokenizes `markdown` into its ordered top-level token sequence.
pub fn lex(markdown: &str, options: &LexOptions) -> Vec<Token> {
    let mut builder = TokenBuilder::new(markdown, *options);
    for (event, range) in Parser::new_ext(markdown, parser_options()).into_offset_iter() {
        builder.push(event, range);
    }
    builder.finish()
}
