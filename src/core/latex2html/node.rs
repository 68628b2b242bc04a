//! Render tree and HTML serialization
//!
//! The renderer produces a [`RenderNode`] tree first; turning that tree into
//! markup is a separate, narrow step. This keeps the parser testable without
//! a rendering environment and leaves room for other output targets.

use serde::Serialize;
use std::fmt::Write;

use crate::utils::error::RenderWarning;

/// Block alignment for `center` / `justify` environments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Center,
    Justify,
}

/// One structural unit of the rendered preview.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderNode {
    /// Shown when the document has no renderable content.
    Placeholder { text: String },
    /// Level 1 is the résumé name line, level 2 a section title.
    Heading { level: u8, children: Vec<RenderNode> },
    Paragraph { children: Vec<RenderNode> },
    Text { text: String },
    Bold { children: Vec<RenderNode> },
    Italic { children: Vec<RenderNode> },
    Small { children: Vec<RenderNode> },
    Link { href: String, children: Vec<RenderNode> },
    LineBreak,
    List { items: Vec<RenderNode> },
    ListItem { children: Vec<RenderNode> },
    HorizontalRule,
    /// Vertical space in points; negative values pull content up.
    Spacer { points: f32 },
    /// A line split at `\hfill`: left content flows, right content is
    /// pushed to the right edge.
    FlexRow {
        left: Vec<RenderNode>,
        right: Vec<RenderNode>,
    },
    Block {
        align: Alignment,
        children: Vec<RenderNode>,
    },
}

impl RenderNode {
    pub fn text(s: impl Into<String>) -> Self {
        RenderNode::Text { text: s.into() }
    }
}

/// The result of rendering one source document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderResult {
    pub nodes: Vec<RenderNode>,
    pub warnings: Vec<RenderWarning>,
}

impl RenderResult {
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// Serialize the node tree to an HTML fragment.
    pub fn to_html(&self) -> String {
        nodes_to_html(&self.nodes)
    }

    /// The visible text of the preview, with all markup dropped. Block
    /// boundaries become newlines.
    pub fn plain_text(&self) -> String {
        let mut out = String::new();
        for node in &self.nodes {
            collect_plain(node, &mut out);
        }
        // Collapse the boundary newlines we inserted ourselves.
        let mut cleaned = String::with_capacity(out.len());
        let mut blank = 0;
        for line in out.lines() {
            if line.trim().is_empty() {
                blank += 1;
                if blank > 1 {
                    continue;
                }
            } else {
                blank = 0;
            }
            cleaned.push_str(line.trim_end());
            cleaned.push('\n');
        }
        cleaned.trim().to_string()
    }
}

/// Serialize a node list to an HTML fragment.
pub fn nodes_to_html(nodes: &[RenderNode]) -> String {
    let mut out = String::new();
    for node in nodes {
        write_node(&mut out, node);
    }
    out
}

fn write_children(out: &mut String, children: &[RenderNode]) {
    for child in children {
        write_node(out, child);
    }
}

fn write_node(out: &mut String, node: &RenderNode) {
    match node {
        RenderNode::Placeholder { text } => {
            let _ = write!(
                out,
                "<p class=\"preview-placeholder\">{}</p>\n",
                escape_html(text)
            );
        }
        RenderNode::Heading { level, children } => {
            let (tag, class) = if *level <= 1 {
                ("h1", "resume-name")
            } else {
                ("h2", "resume-section-title")
            };
            let _ = write!(out, "<{} class=\"{}\">", tag, class);
            write_children(out, children);
            let _ = write!(out, "</{}>\n", tag);
        }
        RenderNode::Paragraph { children } => {
            out.push_str("<p class=\"resume-text\">");
            write_children(out, children);
            out.push_str("</p>\n");
        }
        RenderNode::Text { text } => out.push_str(&escape_html(text)),
        RenderNode::Bold { children } => {
            out.push_str("<strong>");
            write_children(out, children);
            out.push_str("</strong>");
        }
        RenderNode::Italic { children } => {
            out.push_str("<em>");
            write_children(out, children);
            out.push_str("</em>");
        }
        RenderNode::Small { children } => {
            out.push_str("<span class=\"small-text\">");
            write_children(out, children);
            out.push_str("</span>");
        }
        RenderNode::Link { href, children } => {
            let _ = write!(out, "<a href=\"{}\">", escape_html(href));
            write_children(out, children);
            out.push_str("</a>");
        }
        RenderNode::LineBreak => out.push_str("<br>"),
        RenderNode::List { items } => {
            out.push_str("<ul class=\"resume-list\">\n");
            write_children(out, items);
            out.push_str("</ul>\n");
        }
        RenderNode::ListItem { children } => {
            out.push_str("<li>");
            write_children(out, children);
            out.push_str("</li>\n");
        }
        RenderNode::HorizontalRule => out.push_str("<hr class=\"section-line\">\n"),
        RenderNode::Spacer { points } => {
            if *points < 0.0 {
                let _ = write!(
                    out,
                    "<div style=\"margin-top: {}pt; height: 0;\"></div>\n",
                    points
                );
            } else {
                let _ = write!(out, "<div style=\"height: {}pt;\"></div>\n", points);
            }
        }
        RenderNode::FlexRow { left, right } => {
            out.push_str(
                "<div class=\"flex-row\" style=\"display: flex; justify-content: space-between;\"><span>",
            );
            write_children(out, left);
            out.push_str("</span><span class=\"flex-right\">");
            write_children(out, right);
            out.push_str("</span></div>\n");
        }
        RenderNode::Block { align, children } => {
            let style = match align {
                Alignment::Center => "text-align: center;",
                Alignment::Justify => "text-align: justify; text-justify: inter-word;",
            };
            let _ = write!(out, "<div style=\"{}\">\n", style);
            write_children(out, children);
            out.push_str("</div>\n");
        }
    }
}

fn collect_plain(node: &RenderNode, out: &mut String) {
    match node {
        RenderNode::Placeholder { text } => {
            out.push_str(text);
            out.push('\n');
        }
        RenderNode::Text { text } => out.push_str(text),
        RenderNode::Heading { children, .. }
        | RenderNode::Paragraph { children }
        | RenderNode::Block { children, .. }
        | RenderNode::ListItem { children } => {
            for child in children {
                collect_plain(child, out);
            }
            out.push('\n');
        }
        RenderNode::Bold { children }
        | RenderNode::Italic { children }
        | RenderNode::Small { children }
        | RenderNode::Link { children, .. } => {
            for child in children {
                collect_plain(child, out);
            }
        }
        RenderNode::LineBreak => out.push('\n'),
        RenderNode::List { items } => {
            for item in items {
                collect_plain(item, out);
            }
        }
        RenderNode::FlexRow { left, right } => {
            for child in left {
                collect_plain(child, out);
            }
            out.push(' ');
            for child in right {
                collect_plain(child, out);
            }
            out.push('\n');
        }
        RenderNode::HorizontalRule | RenderNode::Spacer { .. } => {}
    }
}

/// Escape text for HTML element and attribute positions.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
