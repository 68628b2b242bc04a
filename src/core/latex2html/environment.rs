//! Environment handling for the LaTeX subset
//!
//! This module handles `itemize`, `center`, and `justify`. Item splitting is
//! depth-aware by construction: the scanner already nested inner
//! environments and brace groups, so only `\item` markers at the top level
//! of the list body can split it.

use crate::data::constants::{CommandKind, COMMANDS};
use crate::utils::error::RenderWarning;

use super::context::RenderState;
use super::markup::{transform_blocks, walk, BlockBuilder};
use super::node::{Alignment, RenderNode};
use super::scanner::Span;

/// Convert one environment span, feeding the surrounding builder.
pub(crate) fn transform_environment(
    state: &mut RenderState,
    b: &mut BlockBuilder,
    name: &str,
    _options: Option<&str>,
    body: &[Span],
    pos: usize,
) {
    match name {
        // The body between \begin{document} and \end{document} is the
        // effective document; normally stripped before scanning, but kept
        // transparent here for inputs that reach the scanner whole.
        "document" => walk(state, b, body),

        "itemize" => {
            let list = build_list(state, body);
            b.push_block(list);
        }

        "center" => {
            let children = transform_blocks(state, body);
            b.push_block(RenderNode::Block {
                align: Alignment::Center,
                children,
            });
        }
        "justify" => {
            let children = transform_blocks(state, body);
            b.push_block(RenderNode::Block {
                align: Alignment::Justify,
                children,
            });
        }

        // Unknown environments: render the content, drop the wrapper.
        _ => {
            state.warn(RenderWarning::new(
                crate::utils::error::WarningKind::UnknownCommand,
                format!("unsupported environment '{}'", name),
                Some(pos),
            ));
            walk(state, b, body);
        }
    }
}

/// Build a List node from an itemize body. Items are split at top-level
/// `\item` markers only; content before the first marker is dropped.
fn build_list(state: &mut RenderState, body: &[Span]) -> RenderNode {
    let mut items = Vec::new();
    for chunk in split_items(body) {
        let blocks = transform_blocks(state, chunk);
        items.push(RenderNode::ListItem {
            children: unwrap_single_paragraph(blocks),
        });
    }
    RenderNode::List { items }
}

/// Split a list body at its top-level `\item` markers. Returns one chunk
/// per marker; an `\item` nested inside a brace group or inner environment
/// never splits the outer list.
pub(crate) fn split_items(body: &[Span]) -> Vec<&[Span]> {
    let mut chunks = Vec::new();
    let mut current_start: Option<usize> = None;
    for (i, span) in body.iter().enumerate() {
        if is_item_marker(span) {
            if let Some(start) = current_start {
                chunks.push(&body[start..i]);
            }
            current_start = Some(i + 1);
        }
    }
    if let Some(start) = current_start {
        chunks.push(&body[start..]);
    }
    chunks
}

fn is_item_marker(span: &Span) -> bool {
    matches!(
        span,
        Span::Command { name, .. }
            if COMMANDS.get(name.trim_end_matches('*')) == Some(&CommandKind::Item)
    )
}

/// A list item that rendered to a single paragraph keeps just the inline
/// content, so simple items serialize as `<li>text</li>`.
fn unwrap_single_paragraph(blocks: Vec<RenderNode>) -> Vec<RenderNode> {
    if blocks.len() == 1 {
        if let RenderNode::Paragraph { children } = &blocks[0] {
            return children.clone();
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::latex2html::context::RenderOptions;
    use crate::core::latex2html::scanner::{scan, ScanLimits};

    fn transform(src: &str) -> (Vec<RenderNode>, Vec<RenderWarning>) {
        let mut state = RenderState::new(RenderOptions::default());
        let (spans, scan_warnings) = scan(src, ScanLimits::default());
        state.warnings.extend(scan_warnings);
        let nodes = transform_blocks(&mut state, &spans);
        (nodes, state.warnings)
    }

    fn item_count(node: &RenderNode) -> usize {
        match node {
            RenderNode::List { items } => items.len(),
            _ => panic!("expected list, got {:?}", node),
        }
    }

    #[test]
    fn test_simple_list() {
        let (nodes, warnings) = transform(
            "\\begin{itemize}\n\\item First\n\\item Second\n\\item Third\n\\end{itemize}",
        );
        assert!(warnings.is_empty());
        assert_eq!(item_count(&nodes[0]), 3);
    }

    #[test]
    fn test_nested_list_does_not_split_outer() {
        let src = "\\begin{itemize}\n\
                   \\item Outer one \\begin{itemize}\\item inner a\\item inner b\\end{itemize}\n\
                   \\item Outer two\n\
                   \\end{itemize}";
        let (nodes, warnings) = transform(src);
        assert!(warnings.is_empty());
        assert_eq!(item_count(&nodes[0]), 2);
        // First outer item carries the nested list.
        match &nodes[0] {
            RenderNode::List { items } => match &items[0] {
                RenderNode::ListItem { children } => {
                    assert!(children
                        .iter()
                        .any(|n| matches!(n, RenderNode::List { items } if items.len() == 2)));
                }
                other => panic!("expected list item, got {:?}", other),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_item_inside_braces_does_not_split() {
        let src = "\\begin{itemize}\\item left {\\item hidden} right\\end{itemize}";
        let (nodes, _warnings) = transform(src);
        assert_eq!(item_count(&nodes[0]), 1);
    }

    #[test]
    fn test_list_options_are_ignored() {
        let (nodes, warnings) =
            transform("\\begin{itemize}[leftmargin=0.15in]\\item A\\end{itemize}");
        assert!(warnings.is_empty());
        assert_eq!(item_count(&nodes[0]), 1);
    }

    #[test]
    fn test_center_block() {
        let (nodes, warnings) = transform("\\begin{center}middle\\end{center}");
        assert!(warnings.is_empty());
        match &nodes[0] {
            RenderNode::Block { align, children } => {
                assert_eq!(*align, Alignment::Center);
                assert!(!children.is_empty());
            }
            other => panic!("expected block, got {:?}", other),
        }
    }

    #[test]
    fn test_justify_block() {
        let (nodes, _warnings) = transform("\\begin{justify}text body\\end{justify}");
        assert!(
            matches!(&nodes[0], RenderNode::Block { align: Alignment::Justify, .. }),
            "got {:?}",
            nodes[0]
        );
    }

    #[test]
    fn test_unknown_environment_keeps_content() {
        let (nodes, warnings) = transform("\\begin{flushleft}kept\\end{flushleft}");
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("flushleft"));
        assert_eq!(
            nodes,
            vec![RenderNode::Paragraph {
                children: vec![RenderNode::text("kept")]
            }]
        );
    }

    #[test]
    fn test_hfill_inside_item_becomes_flex_row() {
        let src = "\\begin{itemize}\\item Role \\hfill 2020\\end{itemize}";
        let (nodes, warnings) = transform(src);
        assert!(warnings.is_empty());
        match &nodes[0] {
            RenderNode::List { items } => match &items[0] {
                RenderNode::ListItem { children } => {
                    assert!(children
                        .iter()
                        .any(|n| matches!(n, RenderNode::FlexRow { .. })));
                }
                other => panic!("expected list item, got {:?}", other),
            },
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_item_is_kept() {
        let (nodes, _warnings) = transform("\\begin{itemize}\\item\\item b\\end{itemize}");
        assert_eq!(item_count(&nodes[0]), 2);
    }
}
