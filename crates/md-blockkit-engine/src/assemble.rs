//! # Block Assembly
//!
//! Walks the top-level token sequence once and dispatches each token to its
//! output block. Output order follows source order; `space` tokens and
//! kinds with no block form emit nothing.
//!
//! | token        | block     |
//! |--------------|-----------|
//! | `heading`    | `header`  |
//! | `paragraph`  | `section` (skipped when blank) |
//! | `list`       | `section` |
//! | `blockquote` | `section`, every line prefixed with `> ` |
//! | `code`       | `section` holding a fenced block |
//! | `hr`         | `divider` |
//! | `image`      | `image`   |
//! | `table`      | `table`   |

use crate::{
    blocks::{Block, Cell, TextObject},
    lexer::{Table, TableCell, Token},
    render::{Markup, RenderOptions, build_cell, render_inline, render_list},
};

const QUOTE_PREFIX: &str = "> ";

/// Accumulates output blocks for one top-level token sequence.
pub struct BlockAssembler<'o> {
    options: &'o RenderOptions,
    out: Vec<Block>,
}

impl<'o> BlockAssembler<'o> {
    pub fn new(options: &'o RenderOptions) -> Self {
        Self {
            options,
            out: vec![],
        }
    }

    pub fn push(&mut self, token: &Token) {
        match token {
            Token::Heading { tokens, .. } => {
                let text = render_inline(tokens);
                if text.trim().is_empty() {
                    log::debug!("skipping heading with blank text");
                    return;
                }
                self.out.push(Block::Header {
                    text: TextObject::plain(text, self.options.header_emoji),
                });
            }
            Token::List(list) => {
                self.out
                    .push(Block::section(render_list(list, 0, self.options)));
            }
            Token::Paragraph { tokens, .. } => {
                let text = render_inline(tokens);
                if text.trim().is_empty() {
                    log::debug!("skipping blank paragraph");
                    return;
                }
                self.out.push(Block::section(text));
            }
            Token::Blockquote { tokens, .. } => {
                let text = self.quote(tokens);
                self.out.push(Block::section(text));
            }
            Token::Code { lang, text, .. } => {
                self.out
                    .push(Block::section(fenced(lang.as_deref(), text)));
            }
            Token::Hr { .. } => self.out.push(Block::Divider),
            Token::Image {
                href, title, text, ..
            } => self.out.push(Block::Image {
                image_url: href.clone(),
                alt_text: text.clone(),
                title: title
                    .as_deref()
                    .filter(|t| !t.is_empty())
                    .map(|t| TextObject::plain(t, self.options.header_emoji)),
            }),
            Token::Table(table) => self.out.push(Block::Table {
                rows: table_rows(table),
            }),
            Token::Space { .. } => {}
            Token::Text { .. }
            | Token::Link { .. }
            | Token::Strong { .. }
            | Token::Em { .. }
            | Token::Del { .. }
            | Token::Codespan { .. }
            | Token::Br { .. }
            | Token::Html { .. }
            | Token::Other { .. } => {
                log::debug!("no block for top-level {} token", token.kind());
            }
        }
    }

    pub fn finish(self) -> Vec<Block> {
        self.out
    }

    /// Renders a blockquote's children, one rule per kind, then prefixes
    /// every physical line with the quote marker.
    fn quote(&self, tokens: &[Token]) -> String {
        let body = tokens
            .iter()
            .map(|t| match t {
                Token::Heading { tokens, .. } => {
                    format!("{b}{}{b}", render_inline(tokens), b = Markup::BOLD)
                }
                Token::Paragraph { tokens, .. } => render_inline(tokens),
                Token::List(list) => render_list(list, 0, self.options),
                Token::Code { lang, text, .. } => fenced(lang.as_deref(), text),
                other => other.raw().to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n");

        body.split('\n')
            .map(|line| format!("{QUOTE_PREFIX}{line}"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Converts a top-level token sequence into blocks in a single pass.
pub fn assemble(tokens: &[Token], options: &RenderOptions) -> Vec<Block> {
    let mut assembler = BlockAssembler::new(options);
    for token in tokens {
        assembler.push(token);
    }
    assembler.finish()
}

fn fenced(lang: Option<&str>, text: &str) -> String {
    format!(
        "{fence}{}\n{text}\n{fence}",
        lang.unwrap_or_default(),
        fence = Markup::FENCE
    )
}

/// Header row first (bold), then data rows, in source order.
fn table_rows(table: &Table) -> Vec<Vec<Cell>> {
    let row = |cells: &[TableCell], header: bool| {
        cells
            .iter()
            .map(|c| build_cell(&c.tokens, header))
            .collect::<Vec<_>>()
    };
    std::iter::once(row(&table.header, true))
        .chain(table.rows.iter().map(|r| row(r, false)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::{List, ListItem};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn run(tokens: &[Token]) -> Vec<Block> {
        assemble(tokens, &RenderOptions::default())
    }

    fn para(tokens: Vec<Token>) -> Token {
        Token::Paragraph {
            tokens,
            raw: String::new(),
        }
    }

    fn heading(s: &str) -> Token {
        Token::Heading {
            depth: 1,
            tokens: vec![Token::text(s)],
            raw: format!("# {s}"),
        }
    }

    fn cell(s: &str) -> TableCell {
        TableCell {
            tokens: vec![Token::text(s)],
            raw: s.into(),
        }
    }

    fn bullet_list(items: &[&str]) -> Token {
        Token::List(List {
            ordered: false,
            start: 1,
            items: items
                .iter()
                .map(|s| ListItem {
                    task: None,
                    tokens: vec![Token::text(*s)],
                    raw: format!("- {s}"),
                })
                .collect(),
            raw: String::new(),
        })
    }

    #[test]
    fn heading_becomes_plain_text_header() {
        assert_eq!(
            run(&[heading("Title")]),
            vec![Block::Header {
                text: TextObject::plain("Title", true)
            }]
        );
    }

    #[test]
    fn header_emoji_follows_options() {
        let options = RenderOptions {
            header_emoji: false,
            ..RenderOptions::default()
        };
        let blocks = assemble(&[heading("T")], &options);
        assert_eq!(
            blocks,
            vec![Block::Header {
                text: TextObject::plain("T", false)
            }]
        );
    }

    #[rstest]
    #[case::empty(vec![])]
    #[case::spaces(vec![Token::text("   ")])]
    #[case::only_breaks(vec![Token::Br { raw: "\n".into() }, Token::text(" ")])]
    fn blank_paragraph_emits_nothing(#[case] tokens: Vec<Token>) {
        assert!(run(&[para(tokens)]).is_empty());
    }

    #[test]
    fn paragraph_becomes_markup_section() {
        let tokens = [para(vec![
            Token::text("Hello "),
            Token::Strong {
                tokens: vec![Token::text("world")],
                raw: "**world**".into(),
            },
        ])];
        assert_eq!(run(&tokens), vec![Block::section("Hello *world*")]);
    }

    #[test]
    fn list_becomes_section() {
        assert_eq!(
            run(&[bullet_list(&["a", "b"])]),
            vec![Block::section("• a\n• b")]
        );
    }

    #[test]
    fn code_is_fenced_with_lang() {
        let code = Token::Code {
            lang: Some("rust".into()),
            text: "let a = 1;\n\nlet b = 2;".into(),
            raw: String::new(),
        };
        assert_eq!(
            run(&[code]),
            vec![Block::section("```rust\nlet a = 1;\n\nlet b = 2;\n```")]
        );
    }

    #[test]
    fn code_without_lang_has_bare_fence() {
        let code = Token::Code {
            lang: None,
            text: "x".into(),
            raw: String::new(),
        };
        assert_eq!(run(&[code]), vec![Block::section("```\nx\n```")]);
    }

    #[test]
    fn hr_becomes_divider() {
        assert_eq!(run(&[Token::Hr { raw: "---".into() }]), vec![Block::Divider]);
    }

    #[test]
    fn image_title_is_optional() {
        let image = |title: Option<&str>| Token::Image {
            href: "https://x/cat.png".into(),
            title: title.map(str::to_string),
            text: "cat".into(),
            raw: String::new(),
        };
        let blocks = run(&[image(None), image(Some("")), image(Some("Kitty"))]);
        assert_eq!(
            blocks,
            vec![
                Block::Image {
                    image_url: "https://x/cat.png".into(),
                    alt_text: "cat".into(),
                    title: None,
                },
                Block::Image {
                    image_url: "https://x/cat.png".into(),
                    alt_text: "cat".into(),
                    title: None,
                },
                Block::Image {
                    image_url: "https://x/cat.png".into(),
                    alt_text: "cat".into(),
                    title: Some(TextObject::plain("Kitty", true)),
                },
            ]
        );
    }

    #[test]
    fn table_keeps_header_then_rows() {
        let table = Token::Table(Table {
            header: vec![cell("Name"), cell("Age")],
            rows: vec![vec![cell("Ann"), cell("")]],
            raw: String::new(),
        });
        let blocks = run(&[table]);
        let [Block::Table { rows }] = blocks.as_slice() else {
            panic!("expected one table block");
        };
        assert_eq!(
            rows,
            &vec![
                vec![
                    Cell {
                        text: "Name".into(),
                        bold: true
                    },
                    Cell {
                        text: "Age".into(),
                        bold: true
                    },
                ],
                vec![
                    Cell {
                        text: "Ann".into(),
                        bold: false
                    },
                    Cell {
                        text: " ".into(),
                        bold: false
                    },
                ],
            ]
        );
    }

    #[test]
    fn blockquote_prefixes_every_line() {
        let quote = Token::Blockquote {
            tokens: vec![
                heading("Note"),
                para(vec![
                    Token::text("one"),
                    Token::Br { raw: "\n".into() },
                    Token::text("two"),
                ]),
                bullet_list(&["x"]),
                Token::Code {
                    lang: None,
                    text: "c".into(),
                    raw: String::new(),
                },
                Token::Hr { raw: "***".into() },
            ],
            raw: String::new(),
        };
        assert_eq!(
            run(&[quote]),
            vec![Block::section(
                "> *Note*\n> one\n> two\n> • x\n> ```\n> c\n> ```\n> ***"
            )]
        );
    }

    #[test]
    fn space_and_stray_inline_tokens_emit_nothing() {
        let tokens = [
            Token::Space { raw: "\n\n".into() },
            Token::Html {
                raw: "<div></div>".into(),
            },
            Token::Other { raw: "[^1]: note".into() },
        ];
        assert!(run(&tokens).is_empty());
    }

    #[test]
    fn blank_heading_emits_nothing() {
        let empty = Token::Heading {
            depth: 2,
            tokens: vec![],
            raw: "##".into(),
        };
        assert!(run(&[empty]).is_empty());
    }

    #[test]
    fn order_is_preserved() {
        let blocks = run(&[
            heading("A"),
            Token::Space { raw: "\n".into() },
            para(vec![Token::text("b")]),
            Token::Hr { raw: "---".into() },
        ]);
        assert_eq!(
            blocks,
            vec![
                Block::Header {
                    text: TextObject::plain("A", true)
                },
                Block::section("b"),
                Block::Divider,
            ]
        );
    }

    #[test]
    fn identical_input_gives_identical_output() {
        let tokens = [heading("A"), bullet_list(&["x", "y"])];
        assert_eq!(run(&tokens), run(&tokens));
    }
}
