use serde::{Deserialize, Serialize};

/// A node of the parsed Markdown tree.
///
/// Every variant keeps the source substring it was built from in `raw`,
/// which renderers fall back to for anything they do not understand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Token {
    /// Literal text. Inline text is a leaf; a text run directly inside a
    /// tight list item carries its inline children in `tokens`.
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        tokens: Option<Vec<Token>>,
        raw: String,
    },
    Link {
        href: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        tokens: Vec<Token>,
        raw: String,
    },
    /// An image. `text` is the alt text, already flattened.
    Image {
        href: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        text: String,
        raw: String,
    },
    Strong {
        tokens: Vec<Token>,
        raw: String,
    },
    Em {
        tokens: Vec<Token>,
        raw: String,
    },
    Del {
        tokens: Vec<Token>,
        raw: String,
    },
    Codespan {
        text: String,
        raw: String,
    },
    Br {
        raw: String,
    },
    Heading {
        depth: u8,
        tokens: Vec<Token>,
        raw: String,
    },
    Paragraph {
        tokens: Vec<Token>,
        raw: String,
    },
    List(List),
    Blockquote {
        tokens: Vec<Token>,
        raw: String,
    },
    Code {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        lang: Option<String>,
        text: String,
        raw: String,
    },
    Hr {
        raw: String,
    },
    Table(Table),
    /// Blank lines between top-level blocks.
    Space {
        raw: String,
    },
    /// Raw HTML, inline or block.
    Html {
        raw: String,
    },
    /// Anything the tokenizer produced that has no dedicated kind.
    Other {
        raw: String,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct List {
    pub ordered: bool,
    /// Number of the first item. Always 1 for unordered lists.
    pub start: u64,
    pub items: Vec<ListItem>,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListItem {
    /// Checkbox state for task-list items.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub task: Option<bool>,
    pub tokens: Vec<Token>,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub header: Vec<TableCell>,
    pub rows: Vec<Vec<TableCell>>,
    pub raw: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableCell {
    pub tokens: Vec<Token>,
    pub raw: String,
}

impl Token {
    /// Plain text leaf with `raw` equal to its content.
    pub fn text(s: impl Into<String>) -> Self {
        let text = s.into();
        Token::Text {
            raw: text.clone(),
            text,
            tokens: None,
        }
    }

    /// The original source substring this token was built from.
    pub fn raw(&self) -> &str {
        match self {
            Token::Text { raw, .. }
            | Token::Link { raw, .. }
            | Token::Image { raw, .. }
            | Token::Strong { raw, .. }
            | Token::Em { raw, .. }
            | Token::Del { raw, .. }
            | Token::Codespan { raw, .. }
            | Token::Br { raw }
            | Token::Heading { raw, .. }
            | Token::Paragraph { raw, .. }
            | Token::Blockquote { raw, .. }
            | Token::Code { raw, .. }
            | Token::Hr { raw }
            | Token::Space { raw }
            | Token::Html { raw }
            | Token::Other { raw } => raw,
            Token::List(list) => &list.raw,
            Token::Table(table) => &table.raw,
        }
    }

    /// The nested token sequence, for kinds that have one.
    ///
    /// Lists and tables expose their children through their own item and
    /// cell types instead.
    pub fn children(&self) -> Option<&[Token]> {
        match self {
            Token::Link { tokens, .. }
            | Token::Strong { tokens, .. }
            | Token::Em { tokens, .. }
            | Token::Del { tokens, .. }
            | Token::Heading { tokens, .. }
            | Token::Paragraph { tokens, .. }
            | Token::Blockquote { tokens, .. } => Some(tokens),
            Token::Text { tokens, .. } => tokens.as_deref(),
            Token::Image { .. }
            | Token::Codespan { .. }
            | Token::Br { .. }
            | Token::List(_)
            | Token::Code { .. }
            | Token::Hr { .. }
            | Token::Table(_)
            | Token::Space { .. }
            | Token::Html { .. }
            | Token::Other { .. } => None,
        }
    }

    /// Short kind name, used in log output.
    pub fn kind(&self) -> &'static str {
        match self {
            Token::Text { .. } => "text",
            Token::Link { .. } => "link",
            Token::Image { .. } => "image",
            Token::Strong { .. } => "strong",
            Token::Em { .. } => "em",
            Token::Del { .. } => "del",
            Token::Codespan { .. } => "codespan",
            Token::Br { .. } => "br",
            Token::Heading { .. } => "heading",
            Token::Paragraph { .. } => "paragraph",
            Token::List(_) => "list",
            Token::Blockquote { .. } => "blockquote",
            Token::Code { .. } => "code",
            Token::Hr { .. } => "hr",
            Token::Table(_) => "table",
            Token::Space { .. } => "space",
            Token::Html { .. } => "html",
            Token::Other { .. } => "other",
        }
    }
}
