//! Span scanner for the LaTeX subset
//!
//! A single left-to-right pass over the document body that produces a tree
//! of [`Span`]s. Command arguments and environment bodies are located by
//! depth-counting for the matching close delimiter, then scanned
//! recursively, so arbitrary nesting is handled in one pass instead of the
//! iterate-a-regex-to-fixed-point approach this module replaces.
//!
//! The scanner never fails. Unmatched delimiters absorb the rest of their
//! scope and are reported as warnings; nesting beyond the depth budget is
//! kept as literal text.

use crate::data::constants::{command_arity, COMMANDS, MAX_SCAN_DEPTH, MAX_SCAN_STEPS};
use crate::utils::error::RenderWarning;

/// An intermediate parsed unit. Spans form a tree owned by the scan result.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    /// A literal character run, with special-character replacements
    /// (`\%`, `--`, `$|$`, ...) already applied.
    Text(String),
    /// A command invocation with its brace-delimited arguments, each
    /// recursively scanned. `name` has no leading backslash; a trailing
    /// star is kept (`section*`).
    Command {
        name: String,
        args: Vec<Vec<Span>>,
        pos: usize,
    },
    /// A `\begin{name}[options]...\end{name}` block.
    Environment {
        name: String,
        options: Option<String>,
        body: Vec<Span>,
        pos: usize,
    },
    /// A `{...}` group.
    Group(Vec<Span>),
    /// `\\` or `\\[Npt]`.
    LineBreak,
    /// A blank line in the source.
    ParagraphBreak,
}

/// Budgets for a single scan.
#[derive(Debug, Clone, Copy)]
pub struct ScanLimits {
    pub max_depth: usize,
    pub max_steps: usize,
}

impl Default for ScanLimits {
    fn default() -> Self {
        Self {
            max_depth: MAX_SCAN_DEPTH,
            max_steps: MAX_SCAN_STEPS,
        }
    }
}

struct ScanCtx {
    warnings: Vec<RenderWarning>,
    limits: ScanLimits,
    steps: usize,
    budget_reported: bool,
}

impl ScanCtx {
    fn step(&mut self) -> bool {
        self.steps += 1;
        if self.steps > self.limits.max_steps {
            if !self.budget_reported {
                self.budget_reported = true;
                self.warnings.push(RenderWarning::malformed(
                    "scan budget exceeded; remaining input kept as literal text",
                    None,
                ));
            }
            return false;
        }
        true
    }
}

/// Scan a preprocessed document body into a span tree.
pub fn scan(src: &str, limits: ScanLimits) -> (Vec<Span>, Vec<RenderWarning>) {
    let mut ctx = ScanCtx {
        warnings: Vec::new(),
        limits,
        steps: 0,
        budget_reported: false,
    };
    let spans = scan_slice(&mut ctx, src, 0, 0);
    (spans, ctx.warnings)
}

fn scan_slice(ctx: &mut ScanCtx, src: &str, base: usize, depth: usize) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut text = String::new();
    let mut i = 0;

    macro_rules! flush_text {
        () => {
            if !text.is_empty() {
                spans.push(Span::Text(std::mem::take(&mut text)));
            }
        };
    }

    while i < src.len() {
        if !ctx.step() {
            text.push_str(&src[i..]);
            break;
        }
        let rest = &src[i..];
        let c = rest.chars().next().unwrap();
        match c {
            '\\' => {
                let after = &rest[1..];
                if after.starts_with('\\') {
                    // \\ or \\[Npt], with an optional trailing star
                    flush_text!();
                    i += 2;
                    if src[i..].starts_with('*') {
                        i += 1;
                    }
                    if src[i..].starts_with('[') {
                        if let Some(close) = src[i..].find(']') {
                            i += close + 1;
                        }
                    }
                    spans.push(Span::LineBreak);
                } else if after.chars().next().is_some_and(|n| n.is_ascii_alphabetic()) {
                    flush_text!();
                    let name_len = after
                        .find(|n: char| !n.is_ascii_alphabetic())
                        .unwrap_or(after.len());
                    let mut name = after[..name_len].to_string();
                    let cmd_pos = base + i;
                    i += 1 + name_len;
                    if src[i..].starts_with('*') {
                        name.push('*');
                        i += 1;
                    }
                    let stripped = name.trim_end_matches('*');
                    if stripped == "begin" {
                        i = scan_environment(ctx, src, base, depth, i, cmd_pos, &mut spans);
                    } else if stripped == "end" {
                        // \end without a matching \begin in this scope
                        ctx.warnings.push(RenderWarning::unmatched(
                            "\\end without a matching \\begin",
                            Some(cmd_pos),
                        ));
                        if let Some((_, after_arg)) = take_braced(src, i) {
                            i = after_arg;
                        }
                    } else {
                        let max_args = match COMMANDS.get(stripped) {
                            Some(kind) => command_arity(*kind),
                            // Unknown commands may carry one brace argument
                            // immediately following; its content is emitted
                            // as literal text downstream.
                            None => 1,
                        };
                        let mut args = Vec::new();
                        for _ in 0..max_args {
                            let arg_start = skip_inline_ws(src, i);
                            match take_braced(src, arg_start) {
                                Some((inner, after_arg)) => {
                                    args.push(scan_nested(
                                        ctx,
                                        inner,
                                        base + arg_start + 1,
                                        depth,
                                    ));
                                    i = after_arg;
                                }
                                None => {
                                    if src[arg_start..].starts_with('{') {
                                        // Opening brace with no close: the rest
                                        // of the scope is the argument.
                                        ctx.warnings.push(RenderWarning::unmatched(
                                            format!("unterminated argument of \\{}", name),
                                            Some(base + arg_start),
                                        ));
                                        let inner = &src[arg_start + 1..];
                                        args.push(scan_nested(
                                            ctx,
                                            inner,
                                            base + arg_start + 1,
                                            depth,
                                        ));
                                        i = src.len();
                                    }
                                    break;
                                }
                            }
                        }
                        spans.push(Span::Command {
                            name,
                            args,
                            pos: cmd_pos,
                        });
                    }
                } else {
                    // Control symbol: emit the escaped character literally.
                    match after.chars().next() {
                        Some(sym) => {
                            match sym {
                                ';' | '\n' | '\t' => text.push(' '),
                                _ => text.push(sym),
                            }
                            i += 1 + sym.len_utf8();
                        }
                        None => {
                            // Trailing lone backslash
                            i += 1;
                        }
                    }
                }
            }
            '{' => {
                flush_text!();
                match find_matching_brace(src, i) {
                    Some(close) => {
                        let inner = &src[i + 1..close];
                        spans.push(Span::Group(scan_nested(ctx, inner, base + i + 1, depth)));
                        i = close + 1;
                    }
                    None => {
                        ctx.warnings.push(RenderWarning::unmatched(
                            "opening brace is never closed",
                            Some(base + i),
                        ));
                        let inner = &src[i + 1..];
                        spans.push(Span::Group(scan_nested(ctx, inner, base + i + 1, depth)));
                        i = src.len();
                    }
                }
            }
            '}' => {
                flush_text!();
                ctx.warnings.push(RenderWarning::unmatched(
                    "unexpected closing brace",
                    Some(base + i),
                ));
                i += 1;
            }
            '$' => {
                if rest.starts_with("$|$") {
                    text.push('|');
                    i += 3;
                } else {
                    text.push('$');
                    i += 1;
                }
            }
            '-' => {
                if rest.starts_with("--") {
                    text.push('\u{2013}');
                    i += 2;
                } else {
                    text.push('-');
                    i += 1;
                }
            }
            '\n' => {
                // A run of whitespace containing a second newline is a
                // paragraph boundary; a single newline stays in the text run.
                let run_len = rest
                    .find(|n: char| !n.is_whitespace())
                    .unwrap_or(rest.len());
                let run = &rest[..run_len];
                if run.matches('\n').count() >= 2 {
                    flush_text!();
                    spans.push(Span::ParagraphBreak);
                } else {
                    text.push_str(run);
                }
                i += run_len;
            }
            _ => {
                text.push(c);
                i += c.len_utf8();
            }
        }
    }

    if !text.is_empty() {
        spans.push(Span::Text(text));
    }
    spans
}

/// Recurse into nested content, keeping it literal past the depth budget.
fn scan_nested(ctx: &mut ScanCtx, inner: &str, base: usize, depth: usize) -> Vec<Span> {
    if depth + 1 > ctx.limits.max_depth {
        ctx.warnings.push(RenderWarning::malformed(
            "nesting too deep; content kept as literal text",
            Some(base),
        ));
        if inner.is_empty() {
            return Vec::new();
        }
        return vec![Span::Text(inner.to_string())];
    }
    scan_slice(ctx, inner, base, depth + 1)
}

/// Scan `\begin{name}[options]...\end{name}` starting just after `\begin`.
/// Returns the position after the whole environment.
fn scan_environment(
    ctx: &mut ScanCtx,
    src: &str,
    base: usize,
    depth: usize,
    after_begin: usize,
    cmd_pos: usize,
    spans: &mut Vec<Span>,
) -> usize {
    let (env_name, mut i) = match take_braced(src, after_begin) {
        Some((name, after)) => (name.trim().to_string(), after),
        None => {
            ctx.warnings.push(RenderWarning::malformed(
                "\\begin without an environment name",
                Some(cmd_pos),
            ));
            return after_begin;
        }
    };

    let mut options = None;
    if src[i..].starts_with('[') {
        if let Some(close) = src[i..].find(']') {
            options = Some(src[i + 1..i + close].to_string());
            i += close + 1;
        }
    }

    match find_env_close(src, &env_name, i) {
        Some((body_end, after_end)) => {
            let body = &src[i..body_end];
            spans.push(Span::Environment {
                name: env_name,
                options,
                body: scan_nested(ctx, body, base + i, depth),
                pos: cmd_pos,
            });
            after_end
        }
        None => {
            ctx.warnings.push(RenderWarning::unmatched(
                format!("environment '{}' is never closed", env_name),
                Some(cmd_pos),
            ));
            let body = &src[i..];
            spans.push(Span::Environment {
                name: env_name,
                options,
                body: scan_nested(ctx, body, base + i, depth),
                pos: cmd_pos,
            });
            src.len()
        }
    }
}

/// If `src[from..]` starts with `{`, return the inner content and the
/// position just past the matching `}`.
fn take_braced(src: &str, from: usize) -> Option<(&str, usize)> {
    if !src[from..].starts_with('{') {
        return None;
    }
    let close = find_matching_brace(src, from)?;
    Some((&src[from + 1..close], close + 1))
}

fn skip_inline_ws(src: &str, from: usize) -> usize {
    let bytes = src.as_bytes();
    let mut i = from;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    i
}

/// Find the `}` matching the `{` at `open`, counting depth and skipping
/// backslash-escaped braces.
pub fn find_matching_brace(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    let mut escaped = false;
    let mut i = open;
    while i < bytes.len() {
        let b = bytes[i];
        if escaped {
            escaped = false;
        } else {
            match b {
                b'\\' => escaped = true,
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i += 1;
    }
    None
}

/// Find the `\end{name}` matching an already-consumed `\begin{name}`,
/// counting nested environments of the same name. Returns the body end and
/// the position just past the `\end{name}`.
pub fn find_env_close(src: &str, name: &str, from: usize) -> Option<(usize, usize)> {
    let begin_pat = format!("\\begin{{{}}}", name);
    let end_pat = format!("\\end{{{}}}", name);
    let mut depth = 1usize;
    let mut i = from;
    while i <= src.len() {
        let rest = &src[i..];
        let next_begin = rest.find(&begin_pat);
        let next_end = rest.find(&end_pat)?;
        match next_begin {
            Some(b) if b < next_end => {
                depth += 1;
                i += b + begin_pat.len();
            }
            _ => {
                depth -= 1;
                if depth == 0 {
                    return Some((i + next_end, i + next_end + end_pat.len()));
                }
                i += next_end + end_pat.len();
            }
        }
    }
    None
}
