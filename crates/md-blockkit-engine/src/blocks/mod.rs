//! # Output Blocks
//!
//! The structured message format handed to the chat platform. Everything
//! here is plain data that serializes straight to the destination's JSON
//! shape via serde.

pub mod cell;

use serde::{Deserialize, Serialize};

pub use cell::Cell;

/// One unit of the destination message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Header {
        text: TextObject,
    },
    Section {
        text: TextObject,
    },
    Image {
        image_url: String,
        alt_text: String,
        /// Absent from the JSON entirely when `None`.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<TextObject>,
    },
    Divider,
    Table {
        rows: Vec<Vec<Cell>>,
    },
}

impl Block {
    pub fn section(text: impl Into<String>) -> Self {
        Block::Section {
            text: TextObject::markup(text),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextStyle {
    PlainText,
    #[serde(rename = "mrkdwn")]
    Markup,
}

/// A text object: either literal text or text in the markup dialect.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextObject {
    #[serde(rename = "type")]
    pub style: TextStyle,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl TextObject {
    pub fn plain(text: impl Into<String>, emoji: bool) -> Self {
        Self {
            style: TextStyle::PlainText,
            text: text.into(),
            emoji: Some(emoji),
        }
    }

    pub fn markup(text: impl Into<String>) -> Self {
        Self {
            style: TextStyle::Markup,
            text: text.into(),
            emoji: None,
        }
    }
}

/// The top-level payload: `{"blocks": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub blocks: Vec<Block>,
}

impl Message {
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}

impl From<Vec<Block>> for Message {
    fn from(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }
}
