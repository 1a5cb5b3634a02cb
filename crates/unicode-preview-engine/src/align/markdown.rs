use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use super::structural::NodeRecord;
use crate::text::Span;

fn tracked_kind(tag: &Tag) -> Option<&'static str> {
    match tag {
        Tag::Heading { .. } => Some("heading"),
        Tag::Paragraph => Some("paragraph"),
        Tag::BlockQuote { .. } => Some("blockquote"),
        Tag::List { .. } => Some("list"),
        Tag::Item => Some("listItem"),
        Tag::CodeBlock { .. } => Some("code"),
        Tag::HtmlBlock => Some("html"),
        Tag::Table { .. } => Some("table"),
        Tag::TableHead | Tag::TableRow => Some("tableRow"),
        _ => None,
    }
}

fn closes_tracked(tag: &TagEnd) -> bool {
    matches!(
        tag,
        TagEnd::Heading { .. }
            | TagEnd::Paragraph
            | TagEnd::BlockQuote { .. }
            | TagEnd::List { .. }
            | TagEnd::Item
            | TagEnd::CodeBlock
            | TagEnd::HtmlBlock
            | TagEnd::Table
            | TagEnd::TableHead
            | TagEnd::TableRow
    )
}

/// Byte offset to UTF-16 offset lookup for `text`, one entry per byte plus
/// one for the end.
fn utf16_offsets(text: &str) -> Vec<usize> {
    let mut table = vec![0; text.len() + 1];
    let mut units = 0;
    for (byte, ch) in text.char_indices() {
        table[byte..byte + ch.len_utf8()].fill(units);
        units += ch.len_utf16();
    }
    table[text.len()] = units;
    table
}

/// Collects block-level nodes of a Markdown document in pre-order.
///
/// The first record is always the `root` spanning the whole text. Spans are
/// UTF-16 offsets into `text`; each record's signature is built from the
/// plain text of everything nested inside the node.
pub fn markdown_nodes(text: &str) -> Vec<NodeRecord> {
    let offsets = utf16_offsets(text);
    let span = |range: std::ops::Range<usize>| Span::new(offsets[range.start], offsets[range.end]);

    let mut nodes: Vec<(&'static str, Span)> = vec![("root", span(0..text.len()))];
    let mut texts: Vec<String> = vec![String::new()];
    let mut open: Vec<usize> = vec![0];

    let append = |texts: &mut Vec<String>, open: &[usize], fragment: &str| {
        for &node in open {
            texts[node].push_str(fragment);
        }
    };

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_MATH;
    for (event, range) in Parser::new_ext(text, options).into_offset_iter() {
        match event {
            Event::Start(tag) => {
                // block and cell boundaries separate words
                if tracked_kind(&tag).is_some() || matches!(tag, Tag::TableCell) {
                    append(&mut texts, &open, " ");
                }
                if let Some(kind) = tracked_kind(&tag) {
                    nodes.push((kind, span(range)));
                    texts.push(String::new());
                    open.push(nodes.len() - 1);
                }
            }
            Event::End(tag) => {
                if closes_tracked(&tag) {
                    open.pop();
                }
            }
            Event::Text(fragment)
            | Event::Code(fragment)
            | Event::InlineMath(fragment)
            | Event::Html(fragment)
            | Event::InlineHtml(fragment) => append(&mut texts, &open, &fragment),
            Event::DisplayMath(fragment) => {
                nodes.push(("math", span(range)));
                texts.push(fragment.to_string());
                append(&mut texts, &open, &fragment);
            }
            Event::SoftBreak | Event::HardBreak => append(&mut texts, &open, " "),
            Event::Rule => {
                nodes.push(("thematicBreak", span(range)));
                texts.push(String::new());
            }
            _ => {}
        }
    }

    nodes
        .into_iter()
        .zip(texts)
        .map(|((kind, span), text)| NodeRecord::new(kind, &text, span))
        .collect()
}
