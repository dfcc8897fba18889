use std::slice;

use super::{RenderOptions, render_inline};
use crate::lexer::{List, ListItem, Token};

const INDENT: &str = "  ";

/// Renders a list as newline-joined markup lines, one per item, with each
/// nested list indented one level deeper under the item that owns it.
///
/// Ordered items are numbered `start + index`; unordered items use the
/// configured bullet at every depth.
pub fn render_list(list: &List, depth: usize, options: &RenderOptions) -> String {
    let indent = INDENT.repeat(depth);
    list.items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let prefix = if list.ordered {
                format!("{}. ", list.start + index as u64)
            } else {
                options.bullet.clone()
            };
            let mut line = format!("{indent}{prefix}{}", item_text(item));
            if let Some(nested) = nested_list(item) {
                line.push('\n');
                line.push_str(&render_list(nested, depth + 1, options));
            }
            line
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The item's own line: every child that is not a nested list, rendered
/// inline and concatenated.
fn item_text(item: &ListItem) -> String {
    item.tokens
        .iter()
        .filter(|t| !matches!(t, Token::List(_)))
        .map(|t| match t.children() {
            Some(children) => render_inline(children),
            None => render_inline(slice::from_ref(t)),
        })
        .collect()
}

/// One nested list per item is supported; when an item holds several, the
/// last one is rendered.
fn nested_list(item: &ListItem) -> Option<&List> {
    let lists: Vec<&List> = item
        .tokens
        .iter()
        .filter_map(|t| match t {
            Token::List(list) => Some(list),
            _ => None,
        })
        .collect();
    if lists.len() > 1 {
        log::debug!("list item holds {} nested lists, rendering the last", lists.len());
    }
    lists.last().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(tokens: Vec<Token>) -> ListItem {
        ListItem {
            task: None,
            tokens,
            raw: String::new(),
        }
    }

    fn text_item(s: &str) -> ListItem {
        item(vec![Token::text(s)])
    }

    fn list(ordered: bool, start: u64, items: Vec<ListItem>) -> List {
        List {
            ordered,
            start,
            items,
            raw: String::new(),
        }
    }

    fn render(list: &List) -> String {
        render_list(list, 0, &RenderOptions::default())
    }

    #[test]
    fn ordered_list_numbers_from_start() {
        let l = list(true, 3, vec![text_item("a"), text_item("b")]);
        assert_eq!(render(&l), "3. a\n4. b");
    }

    #[test]
    fn unordered_list_uses_bullet() {
        let l = list(false, 1, vec![text_item("a"), text_item("b")]);
        assert_eq!(render(&l), "• a\n• b");
    }

    #[test]
    fn nested_list_is_indented_under_its_item() {
        let nested = list(false, 1, vec![text_item("child")]);
        let l = list(
            false,
            1,
            vec![
                item(vec![Token::text("parent"), Token::List(nested)]),
                text_item("sibling"),
            ],
        );
        let out = render(&l);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines, vec!["• parent", "  • child", "• sibling"]);

        let leading = |s: &str| s.len() - s.trim_start_matches(' ').len();
        assert_eq!(leading(lines[1]), leading(lines[0]) + 2);
    }

    #[test]
    fn nesting_depth_matches_source_depth() {
        let deepest = list(true, 1, vec![text_item("three")]);
        let middle = list(
            false,
            1,
            vec![item(vec![Token::text("two"), Token::List(deepest)])],
        );
        let l = list(
            false,
            1,
            vec![item(vec![Token::text("one"), Token::List(middle)])],
        );
        assert_eq!(render(&l), "• one\n  • two\n    1. three");
    }

    #[test]
    fn bullet_is_configurable() {
        let options = RenderOptions {
            bullet: "- ".into(),
            ..RenderOptions::default()
        };
        let l = list(false, 1, vec![text_item("a")]);
        assert_eq!(render_list(&l, 0, &options), "- a");
    }

    #[test]
    fn block_text_run_renders_its_inline_children() {
        let run = Token::Text {
            text: "a **b**".into(),
            tokens: Some(vec![
                Token::text("a "),
                Token::Strong {
                    tokens: vec![Token::text("b")],
                    raw: "**b**".into(),
                },
            ]),
            raw: "a **b**".into(),
        };
        let l = list(false, 1, vec![item(vec![run])]);
        assert_eq!(render(&l), "• a *b*");
    }

    #[test]
    fn loose_item_paragraphs_are_concatenated() {
        let para = |s: &str| Token::Paragraph {
            tokens: vec![Token::text(s)],
            raw: s.into(),
        };
        let l = list(true, 1, vec![item(vec![para("first"), para("second")])]);
        assert_eq!(render(&l), "1. firstsecond");
    }

    #[test]
    fn leaf_children_render_as_raw() {
        let code = Token::Code {
            lang: None,
            text: "x".into(),
            raw: "    x".into(),
        };
        let l = list(false, 1, vec![item(vec![Token::text("a"), code])]);
        assert_eq!(render(&l), "• a    x");
    }

    #[test]
    fn last_nested_list_wins() {
        let first = list(false, 1, vec![text_item("dropped")]);
        let second = list(false, 1, vec![text_item("kept")]);
        let l = list(
            false,
            1,
            vec![item(vec![
                Token::text("p"),
                Token::List(first),
                Token::List(second),
            ])],
        );
        assert_eq!(render(&l), "• p\n  • kept");
    }

    #[test]
    fn empty_list_renders_empty() {
        assert_eq!(render(&list(false, 1, vec![])), "");
    }
}
