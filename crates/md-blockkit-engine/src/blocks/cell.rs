use serde::{Deserialize, Serialize};

/// A table cell: literal text plus a bold flag.
///
/// On the wire a cell is a rich-text object holding one section holding
/// one styled text element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "RichText", from = "RichText")]
pub struct Cell {
    pub text: String,
    pub bold: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RichText {
    RichText { elements: Vec<RichTextElement> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RichTextElement {
    RichTextSection { elements: Vec<RichTextLeaf> },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum RichTextLeaf {
    Text {
        text: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        style: Option<LeafStyle>,
    },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
struct LeafStyle {
    bold: bool,
}

impl From<Cell> for RichText {
    fn from(cell: Cell) -> Self {
        let leaf = RichTextLeaf::Text {
            text: cell.text,
            style: cell.bold.then_some(LeafStyle { bold: true }),
        };
        RichText::RichText {
            elements: vec![RichTextElement::RichTextSection {
                elements: vec![leaf],
            }],
        }
    }
}

impl From<RichText> for Cell {
    fn from(rich: RichText) -> Self {
        let RichText::RichText { elements } = rich;
        let leaf = elements.into_iter().find_map(|element| {
            let RichTextElement::RichTextSection { elements } = element;
            elements.into_iter().next()
        });
        match leaf {
            Some(RichTextLeaf::Text { text, style }) => Cell {
                text,
                bold: style.is_some_and(|s| s.bold),
            },
            None => Cell {
                text: " ".to_string(),
                bold: false,
            },
        }
    }
}
