//! Span-to-node transformation for commands and inline content
//!
//! This module turns the scanner's span tree into [`RenderNode`]s. It owns
//! the line/paragraph assembly: `\\` ends a line, blank lines end a
//! paragraph, and a line containing `\hfill` becomes a [`RenderNode::FlexRow`]
//! with the trailing content pushed to the right edge. The same flex-row
//! rule applies everywhere an `\hfill` line can occur: plain text,
//! list items, and aligned blocks.

use crate::data::constants::{CommandKind, COMMANDS, MEDSKIP_PT};
use crate::utils::error::RenderWarning;

use super::context::RenderState;
use super::environment;
use super::node::RenderNode;
use super::scanner::Span;

/// Transform a span sequence into block-level nodes.
pub(crate) fn transform_blocks(state: &mut RenderState, spans: &[Span]) -> Vec<RenderNode> {
    let mut builder = BlockBuilder::new(state.options.collapse_breaks);
    walk(state, &mut builder, spans);
    builder.finish()
}

/// Accumulates inline nodes into lines, lines into paragraphs, and
/// paragraphs into the output block list.
pub(crate) struct BlockBuilder {
    blocks: Vec<RenderNode>,
    para: Vec<RenderNode>,
    line: Vec<RenderNode>,
    hfill_at: Option<usize>,
    collapse_breaks: bool,
}

impl BlockBuilder {
    pub(crate) fn new(collapse_breaks: bool) -> Self {
        Self {
            blocks: Vec::new(),
            para: Vec::new(),
            line: Vec::new(),
            hfill_at: None,
            collapse_breaks,
        }
    }

    fn push_inline(&mut self, node: RenderNode) {
        self.line.push(node);
    }

    fn has_hfill(&self) -> bool {
        self.hfill_at.is_some()
    }

    fn hfill(&mut self) {
        if self.hfill_at.is_none() {
            self.hfill_at = Some(self.line.len());
        }
    }

    /// Close the current line. A line with a pending `\hfill` becomes a
    /// FlexRow block; otherwise the line flows into the current paragraph,
    /// optionally followed by a visual break.
    fn end_line(&mut self, emit_break: bool) {
        if let Some(split) = self.hfill_at.take() {
            let right = self.line.split_off(split);
            let left = std::mem::take(&mut self.line);
            self.flush_para();
            self.blocks.push(RenderNode::FlexRow {
                left: trim_inline(left),
                right: trim_inline(right),
            });
            return;
        }
        let line = std::mem::take(&mut self.line);
        self.para.extend(line);
        if emit_break {
            let has_content = self.para.iter().any(|n| !is_ws_text(n));
            let last_is_break = matches!(
                self.para.iter().rev().find(|n| !is_ws_text(n)),
                Some(RenderNode::LineBreak)
            );
            if has_content && !(self.collapse_breaks && last_is_break) {
                self.para.push(RenderNode::LineBreak);
            }
        }
    }

    fn flush_para(&mut self) {
        let para = std::mem::take(&mut self.para);
        let mut para = trim_inline(para);
        while matches!(para.last(), Some(RenderNode::LineBreak)) {
            para.pop();
        }
        if para.iter().any(|n| !is_ws_text(n)) {
            self.blocks.push(RenderNode::Paragraph { children: para });
        }
    }

    fn end_paragraph(&mut self) {
        self.end_line(false);
        self.flush_para();
    }

    pub(crate) fn push_block(&mut self, node: RenderNode) {
        self.end_line(false);
        self.flush_para();
        self.blocks.push(node);
    }

    pub(crate) fn finish(mut self) -> Vec<RenderNode> {
        self.end_line(false);
        self.flush_para();
        self.blocks
    }
}

/// Walk a span sequence in block context, feeding the builder.
pub(crate) fn walk(state: &mut RenderState, b: &mut BlockBuilder, spans: &[Span]) {
    let mut i = 0;
    while i < spans.len() {
        match &spans[i] {
            Span::Text(t) => {
                // A source newline closes a pending `\hfill` line, matching
                // the bounded-line rule for flex rows.
                if b.has_hfill() {
                    if let Some(nl) = t.find('\n') {
                        let (left, rest) = t.split_at(nl);
                        if !left.is_empty() {
                            b.push_inline(RenderNode::text(left));
                        }
                        b.end_line(false);
                        if !rest.trim().is_empty() {
                            b.push_inline(RenderNode::text(rest));
                        }
                        i += 1;
                        continue;
                    }
                }
                b.push_inline(RenderNode::text(t.clone()));
            }
            Span::LineBreak => b.end_line(true),
            Span::ParagraphBreak => b.end_paragraph(),
            Span::Group(inner) => {
                if let Some(rest) = leading_size_marker(inner) {
                    let children = heading_children(trim_inline(inline_spans(state, rest)));
                    b.push_block(RenderNode::Heading { level: 1, children });
                } else {
                    walk(state, b, inner);
                }
            }
            Span::Command { name, args, pos } => {
                let consumed = handle_command(state, b, spans, i, name, args, *pos);
                if consumed > 0 {
                    i += consumed;
                    continue;
                }
            }
            Span::Environment {
                name,
                options,
                body,
                pos,
            } => environment::transform_environment(state, b, name, options.as_deref(), body, *pos),
        }
        i += 1;
    }
}

/// Handle one command span in block context. Returns the number of spans
/// consumed when the command swallowed following spans (the `\small` run),
/// or 0 when only the command itself was used.
fn handle_command(
    state: &mut RenderState,
    b: &mut BlockBuilder,
    spans: &[Span],
    at: usize,
    name: &str,
    args: &[Vec<Span>],
    pos: usize,
) -> usize {
    let base = name.trim_end_matches('*');
    let kind = match COMMANDS.get(base) {
        Some(kind) => *kind,
        None => {
            state.warn(RenderWarning::unknown_command(name, Some(pos)));
            if let Some(arg) = args.first() {
                for node in inline_spans(state, arg) {
                    b.push_inline(node);
                }
            }
            return 0;
        }
    };

    match kind {
        CommandKind::Section => match args.first() {
            Some(arg) => {
                let children = trim_inline(inline_spans(state, arg));
                b.push_block(RenderNode::Heading { level: 2, children });
            }
            None => state.warn(RenderWarning::malformed(
                format!("\\{} missing its title argument", name),
                Some(pos),
            )),
        },
        CommandKind::Bold => match args.first() {
            Some(arg) => {
                if let Some(rest) = leading_size_marker(arg) {
                    let children = heading_children(trim_inline(inline_spans(state, rest)));
                    b.push_block(RenderNode::Heading { level: 1, children });
                } else {
                    let children = inline_spans(state, arg);
                    b.push_inline(RenderNode::Bold { children });
                }
            }
            None => state.warn(RenderWarning::malformed(
                format!("\\{} missing its argument", name),
                Some(pos),
            )),
        },
        CommandKind::Italic => match args.first() {
            Some(arg) => {
                let children = inline_spans(state, arg);
                b.push_inline(RenderNode::Italic { children });
            }
            None => state.warn(RenderWarning::malformed(
                format!("\\{} missing its argument", name),
                Some(pos),
            )),
        },
        CommandKind::Link => {
            if args.len() < 2 {
                state.warn(RenderWarning::malformed(
                    "\\href expects a url and a text argument",
                    Some(pos),
                ));
                if let Some(arg) = args.first() {
                    for node in inline_spans(state, arg) {
                        b.push_inline(node);
                    }
                }
            } else {
                let href = spans_plain_text(&args[0]).trim().to_string();
                let children = inline_spans(state, &args[1]);
                b.push_inline(RenderNode::Link { href, children });
            }
        }
        CommandKind::SmallOn => {
            // Paired-delimiter construct: everything up to the matching
            // \normalsize at this level, or to the end of the scope.
            let start = at + 1;
            let mut j = start;
            while j < spans.len() && !is_small_off(&spans[j]) {
                j += 1;
            }
            let children = trim_inline(inline_spans(state, &spans[start..j]));
            b.push_inline(RenderNode::Small { children });
            return if j < spans.len() {
                j + 1 - at
            } else {
                j - at
            };
        }
        CommandKind::SmallOff => {}
        CommandKind::NameSize => {}
        CommandKind::Hfill => b.hfill(),
        CommandKind::Par => b.end_paragraph(),
        CommandKind::Vspace => {
            let points = parse_points(state, args, name, pos);
            b.push_block(RenderNode::Spacer { points });
        }
        CommandKind::Medskip => b.push_block(RenderNode::Spacer { points: MEDSKIP_PT }),
        CommandKind::Rule => b.push_block(RenderNode::HorizontalRule),
        CommandKind::Item => state.warn(RenderWarning::new(
            crate::utils::error::WarningKind::UnknownCommand,
            "\\item outside of an itemize environment",
            Some(pos),
        )),
        CommandKind::Noindent => {}
    }
    0
}

/// Transform spans in inline context (command arguments, list labels).
/// Block constructs degrade gracefully here: environments flatten to their
/// content, `\hfill` becomes a single space.
pub(crate) fn inline_spans(state: &mut RenderState, spans: &[Span]) -> Vec<RenderNode> {
    let mut out = Vec::new();
    let mut i = 0;
    while i < spans.len() {
        match &spans[i] {
            Span::Text(t) => out.push(RenderNode::text(t.clone())),
            Span::LineBreak | Span::ParagraphBreak => {
                if !matches!(out.last(), Some(RenderNode::LineBreak)) {
                    out.push(RenderNode::LineBreak);
                }
            }
            Span::Group(inner) => out.extend(inline_spans(state, inner)),
            Span::Environment { body, .. } => out.extend(inline_spans(state, body)),
            Span::Command { name, args, pos } => {
                let base = name.trim_end_matches('*');
                match COMMANDS.get(base).copied() {
                    None => {
                        state.warn(RenderWarning::unknown_command(name, Some(*pos)));
                        if let Some(arg) = args.first() {
                            out.extend(inline_spans(state, arg));
                        }
                    }
                    Some(CommandKind::Bold) => {
                        let arg = args.first().map(Vec::as_slice).unwrap_or(&[]);
                        let inner = leading_size_marker(arg).unwrap_or(arg);
                        out.push(RenderNode::Bold {
                            children: inline_spans(state, inner),
                        });
                    }
                    Some(CommandKind::Italic) => {
                        let arg = args.first().map(Vec::as_slice).unwrap_or(&[]);
                        out.push(RenderNode::Italic {
                            children: inline_spans(state, arg),
                        });
                    }
                    Some(CommandKind::Link) => {
                        if args.len() < 2 {
                            state.warn(RenderWarning::malformed(
                                "\\href expects a url and a text argument",
                                Some(*pos),
                            ));
                            if let Some(arg) = args.first() {
                                out.extend(inline_spans(state, arg));
                            }
                        } else {
                            out.push(RenderNode::Link {
                                href: spans_plain_text(&args[0]).trim().to_string(),
                                children: inline_spans(state, &args[1]),
                            });
                        }
                    }
                    Some(CommandKind::SmallOn) => {
                        let start = i + 1;
                        let mut j = start;
                        while j < spans.len() && !is_small_off(&spans[j]) {
                            j += 1;
                        }
                        out.push(RenderNode::Small {
                            children: trim_inline(inline_spans(state, &spans[start..j])),
                        });
                        i = if j < spans.len() { j + 1 } else { j };
                        continue;
                    }
                    Some(CommandKind::Section) => {
                        if let Some(arg) = args.first() {
                            out.extend(inline_spans(state, arg));
                        }
                    }
                    Some(CommandKind::Hfill) => out.push(RenderNode::text(" ")),
                    Some(CommandKind::Par) => {
                        if !matches!(out.last(), Some(RenderNode::LineBreak)) {
                            out.push(RenderNode::LineBreak);
                        }
                    }
                    Some(CommandKind::Vspace) => {
                        let points = parse_points(state, args, name, *pos);
                        out.push(RenderNode::Spacer { points });
                    }
                    Some(CommandKind::Medskip) => {
                        out.push(RenderNode::Spacer { points: MEDSKIP_PT })
                    }
                    Some(CommandKind::Rule) => out.push(RenderNode::HorizontalRule),
                    Some(CommandKind::SmallOff)
                    | Some(CommandKind::NameSize)
                    | Some(CommandKind::Item)
                    | Some(CommandKind::Noindent) => {}
                }
            }
        }
        i += 1;
    }
    out
}

/// Skip leading whitespace spans; if the first meaningful span is a size
/// marker (`\Huge` / `\LARGE`), return the spans following it.
fn leading_size_marker(spans: &[Span]) -> Option<&[Span]> {
    let mut i = 0;
    while i < spans.len() {
        match &spans[i] {
            Span::Text(t) if t.trim().is_empty() => i += 1,
            Span::Command { name, .. }
                if COMMANDS.get(name.trim_end_matches('*')) == Some(&CommandKind::NameSize) =>
            {
                return Some(&spans[i + 1..]);
            }
            _ => return None,
        }
    }
    None
}

/// A name heading whose remaining content is a single bold run sheds the
/// bold wrapper: the heading itself carries the weight.
fn heading_children(nodes: Vec<RenderNode>) -> Vec<RenderNode> {
    if nodes.len() == 1 {
        if let RenderNode::Bold { children } = &nodes[0] {
            return children.clone();
        }
    }
    nodes
}

fn is_small_off(span: &Span) -> bool {
    matches!(
        span,
        Span::Command { name, .. }
            if COMMANDS.get(name.trim_end_matches('*')) == Some(&CommandKind::SmallOff)
    )
}

fn is_ws_text(node: &RenderNode) -> bool {
    matches!(node, RenderNode::Text { text } if text.trim().is_empty())
}

/// Trim whitespace from the edges of an inline run: drop whitespace-only
/// text nodes and trim the first/last text node.
pub(crate) fn trim_inline(mut nodes: Vec<RenderNode>) -> Vec<RenderNode> {
    while matches!(nodes.first(), Some(n) if is_ws_text(n)) {
        nodes.remove(0);
    }
    while matches!(nodes.last(), Some(n) if is_ws_text(n)) {
        nodes.pop();
    }
    if let Some(RenderNode::Text { text }) = nodes.first_mut() {
        *text = text.trim_start().to_string();
    }
    if let Some(RenderNode::Text { text }) = nodes.last_mut() {
        *text = text.trim_end().to_string();
    }
    nodes
}

/// Collect the literal text of a span sequence (used for `\href` targets
/// and `\vspace` lengths).
pub(crate) fn spans_plain_text(spans: &[Span]) -> String {
    let mut out = String::new();
    collect_spans_text(spans, &mut out);
    out
}

fn collect_spans_text(spans: &[Span], out: &mut String) {
    for span in spans {
        match span {
            Span::Text(t) => out.push_str(t),
            Span::Group(inner) => collect_spans_text(inner, out),
            Span::Command { args, .. } => {
                for arg in args {
                    collect_spans_text(arg, out);
                }
            }
            Span::Environment { body, .. } => collect_spans_text(body, out),
            Span::LineBreak | Span::ParagraphBreak => out.push(' '),
        }
    }
}

/// Parse a `\vspace`-style length argument into points. Malformed lengths
/// degrade to a zero-height spacer with a warning.
fn parse_points(state: &mut RenderState, args: &[Vec<Span>], cmd: &str, pos: usize) -> f32 {
    let raw = match args.first() {
        Some(arg) => spans_plain_text(arg),
        None => {
            state.warn(RenderWarning::malformed(
                format!("\\{} missing its length argument", cmd),
                Some(pos),
            ));
            return 0.0;
        }
    };
    let trimmed = raw.trim();
    let number = trimmed.strip_suffix("pt").unwrap_or(trimmed).trim();
    match number.parse::<f32>() {
        Ok(v) => v,
        Err(_) => {
            state.warn(RenderWarning::malformed(
                format!("\\{} expects a pt length, got '{}'", cmd, trimmed),
                Some(pos),
            ));
            0.0
        }
    }
}
