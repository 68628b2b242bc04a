//! Renderer state and document orchestration
//!
//! This module contains the main renderer struct, its options, and the
//! preprocessing that runs before structural parsing: comment stripping,
//! `\begin{document}` body extraction, and preamble removal.

use lazy_static::lazy_static;
use regex::Regex;

use crate::utils::error::RenderWarning;

use super::markup;
use super::node::{RenderNode, RenderResult};
use super::scanner::{self, ScanLimits};

/// Options for LaTeX to HTML rendering
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Text of the node emitted for empty or whitespace-only input
    pub placeholder_text: String,

    /// Collapse adjacent `\\` line breaks to a single visual break
    /// Default: true
    pub collapse_breaks: bool,

    /// Maximum nesting depth before content is kept as literal text
    pub max_depth: usize,

    /// Maximum scan steps before the renderer returns a partial tree
    pub max_steps: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            placeholder_text: "No content to preview".to_string(),
            collapse_breaks: true,
            max_depth: crate::data::constants::MAX_SCAN_DEPTH,
            max_steps: crate::data::constants::MAX_SCAN_STEPS,
        }
    }
}

impl RenderOptions {
    /// Create new options with defaults
    pub fn new() -> Self {
        Self::default()
    }
}

/// State accumulated while rendering a single document.
#[derive(Debug, Default)]
pub struct RenderState {
    pub options: RenderOptions,
    pub warnings: Vec<RenderWarning>,
}

impl RenderState {
    pub fn new(options: RenderOptions) -> Self {
        Self {
            options,
            warnings: Vec::new(),
        }
    }

    pub(crate) fn warn(&mut self, warning: RenderWarning) {
        self.warnings.push(warning);
    }
}

/// The LaTeX-subset renderer.
///
/// Rendering is a pure function of the input text: the same source always
/// yields an identical node tree, and `render_document` never panics.
pub struct LatexRenderer {
    pub(crate) state: RenderState,
}

impl LatexRenderer {
    /// Create a new renderer with default options
    pub fn new() -> Self {
        Self {
            state: RenderState::new(RenderOptions::default()),
        }
    }

    /// Create a new renderer with custom options
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            state: RenderState::new(options),
        }
    }

    /// Get a reference to the current options
    pub fn options(&self) -> &RenderOptions {
        &self.state.options
    }

    /// Render a LaTeX-subset document to a node tree.
    pub fn render_document(&mut self, input: &str) -> RenderResult {
        if input.trim().is_empty() {
            return RenderResult {
                nodes: vec![self.placeholder()],
                warnings: Vec::new(),
            };
        }

        let body = preprocess(input, &mut self.state);

        let limits = ScanLimits {
            max_depth: self.state.options.max_depth,
            max_steps: self.state.options.max_steps,
        };
        let (spans, mut scan_warnings) = scanner::scan(&body, limits);
        self.state.warnings.append(&mut scan_warnings);

        let nodes = markup::transform_blocks(&mut self.state, &spans);
        let nodes = if nodes.is_empty() {
            vec![self.placeholder()]
        } else {
            nodes
        };

        RenderResult {
            nodes,
            warnings: std::mem::take(&mut self.state.warnings),
        }
    }

    fn placeholder(&self) -> RenderNode {
        RenderNode::Placeholder {
            text: self.state.options.placeholder_text.clone(),
        }
    }
}

impl Default for LatexRenderer {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Preprocessing
// =============================================================================

lazy_static! {
    static ref PREAMBLE_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"\\documentclass(\[[^\]]*\])?\{[^{}]*\}").unwrap(),
        Regex::new(r"\\usepackage(\[[^\]]*\])?\{[^{}]*\}").unwrap(),
        Regex::new(r"\\(pagestyle|thispagestyle)\{[^{}]*\}").unwrap(),
        Regex::new(r"\\(setlength|addtolength)\{[^{}]*\}\{[^{}]*\}").unwrap(),
        Regex::new(r"\\linespread\{[^{}]*\}").unwrap(),
        Regex::new(r"\\setlist(\[[^\]]*\])?(\{[^{}]*\})?").unwrap(),
        Regex::new(r"\\pagenumbering\{[^{}]*\}").unwrap(),
        Regex::new(r"\\raggedright\b").unwrap(),
    ];
}

/// Run the full preprocessing pipeline: comments, document body extraction,
/// preamble stripping. Also used by the diagnostics pass so that warning
/// offsets refer to the same text the scanner walks.
pub(crate) fn preprocess(input: &str, state: &mut RenderState) -> String {
    let without_comments = strip_comments(input);
    let body = extract_document_body(&without_comments, state);
    strip_preamble(&body)
}

/// Strip `%` line comments. A `%` escaped as `\%` is kept; a line that is
/// only a comment is removed entirely.
pub(crate) fn strip_comments(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for line in input.lines() {
        match comment_start(line) {
            Some(0) => continue,
            Some(idx) => {
                let prefix = &line[..idx];
                if prefix.trim().is_empty() {
                    continue;
                }
                out.push_str(prefix);
                out.push('\n');
            }
            None => {
                out.push_str(line);
                out.push('\n');
            }
        }
    }
    out
}

/// Byte offset of the first unescaped `%` in a line, if any. A `%` is
/// escaped when preceded by an odd number of backslashes.
fn comment_start(line: &str) -> Option<usize> {
    let bytes = line.as_bytes();
    let mut backslashes = 0usize;
    for (i, &b) in bytes.iter().enumerate() {
        match b {
            b'\\' => backslashes += 1,
            b'%' => {
                if backslashes % 2 == 0 {
                    return Some(i);
                }
                backslashes = 0;
            }
            _ => backslashes = 0,
        }
    }
    None
}

/// Extract the content between `\begin{document}` and `\end{document}`.
/// Without the begin marker the whole input is the body; a missing end
/// marker absorbs the rest of the input and records a warning.
pub(crate) fn extract_document_body(input: &str, state: &mut RenderState) -> String {
    const BEGIN: &str = "\\begin{document}";
    const END: &str = "\\end{document}";
    match input.find(BEGIN) {
        Some(b) => {
            let start = b + BEGIN.len();
            match input[start..].find(END) {
                Some(e) => input[start..start + e].to_string(),
                None => {
                    state.warn(RenderWarning::unmatched(
                        "\\begin{document} is never closed",
                        Some(b),
                    ));
                    input[start..].to_string()
                }
            }
        }
        None => input.to_string(),
    }
}

/// Remove preamble commands that must never reach the structural parser.
pub(crate) fn strip_preamble(input: &str) -> String {
    let mut out = strip_macro_definitions(input);
    for re in PREAMBLE_PATTERNS.iter() {
        out = re.replace_all(&out, "").into_owned();
    }
    out
}

/// Remove `\newcommand` (and friends) definitions with brace matching, so
/// nested braces in the replacement body do not leave residue behind.
fn strip_macro_definitions(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < input.len() {
        let rest = &input[i..];
        let def = ["\\newcommand", "\\renewcommand", "\\providecommand"]
            .iter()
            .find(|p| rest.starts_with(**p));
        let Some(def) = def else {
            let c = rest.chars().next().unwrap();
            out.push(c);
            i += c.len_utf8();
            continue;
        };
        let mut j = i + def.len();
        // Command being defined: either {\name} or \name
        if input[j..].starts_with('{') {
            match scanner::find_matching_brace(input, j) {
                Some(close) => j = close + 1,
                None => {
                    i = j;
                    continue;
                }
            }
        } else if input[j..].starts_with('\\') {
            j += 1;
            j += input[j..]
                .find(|c: char| !c.is_ascii_alphabetic())
                .unwrap_or(input.len() - j);
        }
        // Optional argument-count and default-value brackets
        while input[j..].starts_with('[') {
            match input[j..].find(']') {
                Some(close) => j += close + 1,
                None => break,
            }
        }
        // Replacement body
        if input[j..].starts_with('{') {
            match scanner::find_matching_brace(input, j) {
                Some(close) => j = close + 1,
                None => j = input.len(),
            }
        }
        i = j;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_comments_keeps_escaped_percent() {
        let out = strip_comments("grew 40\\% YoY % internal note\nnext");
        assert_eq!(out, "grew 40\\% YoY \nnext\n");
    }

    #[test]
    fn test_strip_comments_drops_comment_only_lines() {
        let out = strip_comments("a\n% full line comment\nb");
        assert_eq!(out, "a\nb\n");
    }

    #[test]
    fn test_extract_body() {
        let mut state = RenderState::new(RenderOptions::default());
        let out = extract_document_body(
            "\\documentclass{article}\\begin{document}hello\\end{document}trailing",
            &mut state,
        );
        assert_eq!(out, "hello");
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_extract_body_unclosed_warns() {
        let mut state = RenderState::new(RenderOptions::default());
        let out = extract_document_body("\\begin{document}hello", &mut state);
        assert_eq!(out, "hello");
        assert_eq!(state.warnings.len(), 1);
    }

    #[test]
    fn test_strip_preamble_commands() {
        let out = strip_preamble(
            "\\documentclass[11pt]{article}\\usepackage[margin=0.75in]{geometry}\\pagestyle{empty}rest",
        );
        assert_eq!(out, "rest");
    }

    #[test]
    fn test_strip_newcommand_with_nested_braces() {
        let out = strip_macro_definitions(
            "\\newcommand{\\ressection}[1]{{\\large \\textbf{#1}}\\hrulefill}after",
        );
        assert_eq!(out, "after");
    }

    #[test]
    fn test_renderer_is_deterministic() {
        let src = "\\section*{Skills}\\textbf{Rust} \\hfill 2024 \\\\";
        let a = LatexRenderer::new().render_document(src);
        let b = LatexRenderer::new().render_document(src);
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_input_yields_placeholder() {
        let result = LatexRenderer::new().render_document("   \n  ");
        assert_eq!(result.nodes.len(), 1);
        assert!(matches!(&result.nodes[0], RenderNode::Placeholder { .. }));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_preamble_only_input_yields_placeholder() {
        let result = LatexRenderer::new().render_document("\\documentclass{article}");
        assert_eq!(result.nodes.len(), 1);
        assert!(matches!(&result.nodes[0], RenderNode::Placeholder { .. }));
    }
}
