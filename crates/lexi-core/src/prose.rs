//! Splits lesson markdown into display blocks.

use markdown::mdast::Node;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    Paragraph,
    ListItem,
    Quote,
    Heading(u8),
    TableCell,
    Code,
}

impl BlockKind {
    /// Whether words in this block get interactive annotations
    pub fn is_annotated(&self) -> bool {
        matches!(
            self,
            BlockKind::Paragraph | BlockKind::ListItem | BlockKind::Quote
        )
    }
}

/// Plain text of one markdown block, inline markup removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProseBlock {
    pub kind: BlockKind,
    pub text: String,
}

/// Parse `source` into blocks in document order.
///
/// Source that fails to parse comes back as a single paragraph.
pub fn prose_blocks(source: &str) -> Vec<ProseBlock> {
    match markdown::to_mdast(source, &markdown::ParseOptions::gfm()) {
        Ok(root) => {
            let mut blocks = Vec::new();
            walk(&root, BlockKind::Paragraph, &mut blocks);
            blocks
        }
        Err(e) => {
            tracing::warn!("Failed to parse lesson markdown: {:?}", e);
            vec![ProseBlock {
                kind: BlockKind::Paragraph,
                text: source.to_string(),
            }]
        }
    }
}

fn walk(node: &Node, paragraph_kind: BlockKind, out: &mut Vec<ProseBlock>) {
    match node {
        Node::Paragraph(paragraph) => push(out, paragraph_kind, inline_text(&paragraph.children)),
        Node::Heading(heading) => push(
            out,
            BlockKind::Heading(heading.depth),
            inline_text(&heading.children),
        ),
        Node::TableCell(cell) => push(out, BlockKind::TableCell, inline_text(&cell.children)),
        Node::Code(code) => push(out, BlockKind::Code, code.value.clone()),
        Node::Blockquote(quote) => {
            for child in &quote.children {
                walk(child, BlockKind::Quote, out);
            }
        }
        Node::ListItem(item) => {
            for child in &item.children {
                walk(child, BlockKind::ListItem, out);
            }
        }
        other => {
            if let Some(children) = other.children() {
                for child in children {
                    walk(child, paragraph_kind, out);
                }
            }
        }
    }
}

fn inline_text(children: &[Node]) -> String {
    let mut text = String::new();
    for child in children {
        match child {
            Node::Text(t) => text.push_str(&t.value),
            Node::InlineCode(code) => text.push_str(&code.value),
            Node::Break(_) => text.push('\n'),
            other => {
                if let Some(grandchildren) = other.children() {
                    text.push_str(&inline_text(grandchildren));
                }
            }
        }
    }
    text
}

fn push(out: &mut Vec<ProseBlock>, kind: BlockKind, text: String) {
    if !text.trim().is_empty() {
        out.push(ProseBlock { kind, text });
    }
}
