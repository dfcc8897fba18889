use std::ops::Range;

use pulldown_cmark::{CodeBlockKind, Event, Tag};

use super::{
    LexOptions,
    types::{List, ListItem, Table, TableCell, Token},
};
use crate::render::plain_text;

/// Per-container state held while the container is open.
#[derive(Debug)]
enum FrameKind {
    Paragraph,
    Heading(u8),
    Blockquote,
    Code { lang: Option<String>, text: String },
    HtmlBlock,
    List { ordered: bool, start: u64, items: Vec<ListItem> },
    Item { task: Option<bool> },
    Table { header: Vec<TableCell>, rows: Vec<Vec<TableCell>> },
    TableHead { cells: Vec<TableCell> },
    TableRow { cells: Vec<TableCell> },
    TableCell,
    Emphasis,
    Strong,
    Strikethrough,
    Link { href: String, title: Option<String> },
    Image { href: String, title: Option<String> },
    /// Containers with no dedicated token kind (footnote definitions,
    /// metadata blocks, definition lists, ...).
    Other,
}

impl FrameKind {
    fn holds_inline(&self) -> bool {
        matches!(
            self,
            FrameKind::Paragraph
                | FrameKind::Heading(_)
                | FrameKind::TableCell
                | FrameKind::Emphasis
                | FrameKind::Strong
                | FrameKind::Strikethrough
                | FrameKind::Link { .. }
                | FrameKind::Image { .. }
        )
    }
}

#[derive(Debug)]
struct Frame {
    kind: FrameKind,
    tokens: Vec<Token>,
}

/// Folds the offset-annotated event stream into a [`Token`] tree.
///
/// Containers are kept on an explicit stack; when a container closes its
/// token is built from the frame and handed to the parent frame, or to the
/// top-level output when the stack is empty.
pub struct TokenBuilder<'a> {
    source: &'a str,
    options: LexOptions,
    stack: Vec<Frame>,
    out: Vec<Token>,
    last_block_end: Option<usize>,
}

impl<'a> TokenBuilder<'a> {
    pub fn new(source: &'a str, options: LexOptions) -> Self {
        Self {
            source,
            options,
            stack: vec![],
            out: vec![],
            last_block_end: None,
        }
    }

    pub fn push(&mut self, event: Event<'a>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.open(tag),
            Event::End(_) => self.close(range),
            Event::Text(text) => self.push_text(&text, range),
            Event::Code(code) => {
                let raw = self.raw(range);
                self.push_inline(Token::Codespan {
                    text: code.to_string(),
                    raw,
                });
            }
            Event::SoftBreak | Event::HardBreak => {
                let raw = self.raw(range);
                self.push_inline(Token::Br { raw });
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                if !matches!(self.top_kind(), Some(FrameKind::HtmlBlock)) {
                    self.push_inline(Token::Html {
                        raw: html.to_string(),
                    });
                }
            }
            Event::Rule => {
                let raw = self.raw(range.clone());
                self.push_block(Token::Hr { raw }, range);
            }
            Event::TaskListMarker(checked) => {
                if let Some(Frame {
                    kind: FrameKind::Item { task },
                    ..
                }) = self.stack.last_mut()
                {
                    *task = Some(checked);
                }
            }
            _ => {
                let raw = self.raw(range);
                self.push_inline(Token::Other { raw });
            }
        }
    }

    pub fn finish(mut self) -> Vec<Token> {
        // Unbalanced input: close whatever is still open, innermost first.
        while !self.stack.is_empty() {
            let end = self.source.len();
            self.close(end..end);
        }
        self.out
    }

    /// Source substring for `range`, with the `>` markers of every open
    /// blockquote removed from its continuation lines.
    fn raw(&self, range: Range<usize>) -> String {
        let raw = self.source.get(range).unwrap_or_default();
        let depth = self
            .stack
            .iter()
            .filter(|f| matches!(f.kind, FrameKind::Blockquote))
            .count();
        if depth == 0 || !raw.contains('\n') {
            return raw.to_string();
        }
        let mut lines = raw.split('\n');
        let mut out = lines.next().unwrap_or_default().to_string();
        for line in lines {
            out.push('\n');
            out.push_str(strip_quote_markers(line, depth));
        }
        out
    }

    /// Whether the text starting at `start` is a backslash-escaped ASCII
    /// punctuation character.
    fn is_escaped(&self, start: usize) -> bool {
        let bytes = self.source.as_bytes();
        let Some(&ch) = bytes.get(start) else {
            return false;
        };
        if !ch.is_ascii_punctuation() {
            return false;
        }
        // `\|` inside a table is cell content, not an escape.
        if ch == b'|'
            && self
                .stack
                .iter()
                .any(|f| matches!(f.kind, FrameKind::TableCell))
        {
            return false;
        }
        let backslashes = bytes[..start]
            .iter()
            .rev()
            .take_while(|b| **b == b'\\')
            .count();
        backslashes % 2 == 1
    }

    fn top_kind(&self) -> Option<&FrameKind> {
        self.stack.last().map(|f| &f.kind)
    }

    fn open(&mut self, tag: Tag<'a>) {
        let kind = match tag {
            Tag::Paragraph => FrameKind::Paragraph,
            Tag::Heading { level, .. } => FrameKind::Heading(level as u8),
            Tag::BlockQuote(_) => FrameKind::Blockquote,
            Tag::CodeBlock(kind) => {
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => {
                        let info = info.trim();
                        (!info.is_empty()).then(|| info.to_string())
                    }
                    CodeBlockKind::Indented => None,
                };
                FrameKind::Code {
                    lang,
                    text: String::new(),
                }
            }
            Tag::HtmlBlock => FrameKind::HtmlBlock,
            Tag::List(first) => FrameKind::List {
                ordered: first.is_some(),
                start: first.unwrap_or(1),
                items: vec![],
            },
            Tag::Item => FrameKind::Item { task: None },
            Tag::Table(_) => FrameKind::Table {
                header: vec![],
                rows: vec![],
            },
            Tag::TableHead => FrameKind::TableHead { cells: vec![] },
            Tag::TableRow => FrameKind::TableRow { cells: vec![] },
            Tag::TableCell => FrameKind::TableCell,
            Tag::Emphasis => FrameKind::Emphasis,
            Tag::Strong => FrameKind::Strong,
            Tag::Strikethrough => FrameKind::Strikethrough,
            Tag::Link {
                dest_url, title, ..
            } => FrameKind::Link {
                href: dest_url.to_string(),
                title: non_empty(&title),
            },
            Tag::Image {
                dest_url, title, ..
            } => FrameKind::Image {
                href: dest_url.to_string(),
                title: non_empty(&title),
            },
            _ => FrameKind::Other,
        };
        log::trace!("open {kind:?} at depth {}", self.stack.len());
        self.stack.push(Frame {
            kind,
            tokens: vec![],
        });
    }

    fn close(&mut self, range: Range<usize>) {
        let Some(frame) = self.stack.pop() else {
            return;
        };
        let raw = self.raw(range.clone());
        let tokens = frame.tokens;

        match frame.kind {
            FrameKind::Paragraph => {
                let promote = self.options.image_blocks
                    && self.stack.is_empty()
                    && matches!(tokens.as_slice(), [Token::Image { .. }]);
                if promote {
                    let image = tokens.into_iter().next();
                    if let Some(image) = image {
                        self.push_block(image, range);
                    }
                } else {
                    self.push_block(Token::Paragraph { tokens, raw }, range);
                }
            }
            FrameKind::Heading(depth) => {
                self.push_block(Token::Heading { depth, tokens, raw }, range)
            }
            FrameKind::Blockquote => self.push_block(Token::Blockquote { tokens, raw }, range),
            FrameKind::Code { lang, mut text } => {
                if text.ends_with('\n') {
                    text.pop();
                }
                self.push_block(Token::Code { lang, text, raw }, range);
            }
            FrameKind::HtmlBlock => self.push_block(Token::Html { raw }, range),
            FrameKind::List {
                ordered,
                start,
                items,
            } => {
                let list = List {
                    ordered,
                    start,
                    items,
                    raw,
                };
                self.push_block(Token::List(list), range);
            }
            FrameKind::Item { task } => {
                let item = ListItem { task, tokens, raw };
                match self.stack.last_mut() {
                    Some(Frame {
                        kind: FrameKind::List { items, .. },
                        ..
                    }) => items.push(item),
                    _ => self.push_block(Token::Other { raw: item.raw }, range),
                }
            }
            FrameKind::Table { header, rows } => {
                let table = Table { header, rows, raw };
                self.push_block(Token::Table(table), range);
            }
            FrameKind::TableHead { cells } => match self.stack.last_mut() {
                Some(Frame {
                    kind: FrameKind::Table { header, .. },
                    ..
                }) => *header = cells,
                _ => self.push_block(Token::Other { raw }, range),
            },
            FrameKind::TableRow { cells } => match self.stack.last_mut() {
                Some(Frame {
                    kind: FrameKind::Table { rows, .. },
                    ..
                }) => rows.push(cells),
                _ => self.push_block(Token::Other { raw }, range),
            },
            FrameKind::TableCell => {
                let cell = TableCell { tokens, raw };
                match self.stack.last_mut() {
                    Some(Frame {
                        kind: FrameKind::TableHead { cells } | FrameKind::TableRow { cells },
                        ..
                    }) => cells.push(cell),
                    _ => self.push_block(Token::Other { raw: cell.raw }, range),
                }
            }
            FrameKind::Emphasis => self.push_inline(Token::Em { tokens, raw }),
            FrameKind::Strong => self.push_inline(Token::Strong { tokens, raw }),
            FrameKind::Strikethrough => self.push_inline(Token::Del { tokens, raw }),
            FrameKind::Link { href, title } => self.push_inline(Token::Link {
                href,
                title,
                tokens,
                raw,
            }),
            FrameKind::Image { href, title } => {
                let text = plain_text(&tokens);
                self.push_inline(Token::Image {
                    href,
                    title,
                    text,
                    raw,
                });
            }
            FrameKind::Other => {
                if self.top_kind().is_some_and(FrameKind::holds_inline) {
                    self.push_inline(Token::Other { raw });
                } else {
                    self.push_block(Token::Other { raw }, range);
                }
            }
        }
    }

    fn push_text(&mut self, text: &str, range: Range<usize>) {
        if let Some(Frame {
            kind: FrameKind::Code { text: code, .. },
            ..
        }) = self.stack.last_mut()
        {
            code.push_str(text);
            return;
        }
        // Escapes keep their source form and stay out of neighbouring text.
        let mut text = text;
        let mut range = range;
        if self.is_escaped(range.start)
            && let Some(rest) = text.get(1..)
            && text.as_bytes().first() == self.source.as_bytes().get(range.start)
        {
            let raw = self.raw(range.start - 1..range.start + 1);
            self.push_inline(Token::Other { raw });
            text = rest;
            range.start += 1;
            if text.is_empty() {
                return;
            }
        }
        let raw = self.raw(range);
        self.push_inline(Token::Text {
            text: text.to_string(),
            tokens: None,
            raw,
        });
    }

    /// Appends a block-level token to the open container, or to the
    /// top-level output with a `Space` token for any blank gap before it.
    fn push_block(&mut self, token: Token, range: Range<usize>) {
        let Some(frame) = self.stack.last_mut() else {
            if let Some(end) = self.last_block_end
                && let Some(gap) = self.source.get(end..range.start)
                && !gap.is_empty()
                && gap.trim().is_empty()
            {
                self.out.push(Token::Space {
                    raw: gap.to_string(),
                });
            }
            self.last_block_end = Some(range.end);
            self.out.push(token);
            return;
        };
        frame.tokens.push(token);
    }

    /// Appends an inline token to the open container.
    ///
    /// Inline content directly inside a list item (a tight list) is grouped
    /// into a block-level `Text` run, and adjacent text leaves are merged.
    fn push_inline(&mut self, token: Token) {
        let Some(frame) = self.stack.last_mut() else {
            self.out.push(token);
            return;
        };

        if matches!(frame.kind, FrameKind::Item { .. }) {
            if let Some(Token::Text {
                text,
                tokens: Some(run),
                raw,
            }) = frame.tokens.last_mut()
            {
                text.push_str(token.raw());
                raw.push_str(token.raw());
                append_inline(run, token);
            } else {
                let raw = token.raw().to_string();
                frame.tokens.push(Token::Text {
                    text: raw.clone(),
                    tokens: Some(vec![token]),
                    raw,
                });
            }
            return;
        }

        append_inline(&mut frame.tokens, token);
    }
}

fn append_inline(tokens: &mut Vec<Token>, token: Token) {
    if let (
        Some(Token::Text {
            text,
            tokens: None,
            raw,
        }),
        Token::Text {
            text: next_text,
            tokens: None,
            raw: next_raw,
        },
    ) = (tokens.last_mut(), &token)
    {
        text.push_str(next_text);
        raw.push_str(next_raw);
        return;
    }
    tokens.push(token);
}

/// Strips up to `depth` leading `>` markers (each with one optional space).
fn strip_quote_markers(mut line: &str, depth: usize) -> &str {
    for _ in 0..depth {
        let Some(rest) = line.trim_start_matches([' ', '\t']).strip_prefix('>') else {
            break;
        };
        line = rest.strip_prefix(' ').unwrap_or(rest);
    }
    line
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}
