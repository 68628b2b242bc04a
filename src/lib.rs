//! # texview
//!
//! LaTeX-subset résumé preview renderer: LaTeX in, HTML fragment out.
//!
//! ## Features
//!
//! - **Single Pass**: brace-depth-aware recursive descent, no regex
//!   fixed-point loops
//! - **Typed Output**: a structured render tree with a separate, narrow
//!   HTML serialization step
//! - **Never Fails**: malformed input degrades gracefully and is reported
//!   as warnings, never as a panic or a blank preview
//! - **Viewport State**: the zoom/pan state machine behind the preview
//!   surface, with clamped inputs throughout
//! - **WASM Support**: compiles to WebAssembly for browser usage
//!
//! ## Usage Examples
//!
//! ```rust
//! use texview::{render, render_to_html};
//!
//! // Full render with warnings
//! let result = render(r"\section*{Experience} \textbf{Engineer}");
//! assert!(result.warnings.is_empty());
//!
//! // Straight to an HTML fragment
//! let html = render_to_html(r"\textbf{bold} and \textit{italic}");
//! assert!(html.contains("<strong>bold</strong>"));
//! assert!(html.contains("<em>italic</em>"));
//! ```
//!
//! ## Viewport
//!
//! ```rust
//! use texview::ViewportState;
//!
//! let mut viewport = ViewportState::new();
//! viewport.set_zoom(10.0);
//! assert_eq!(viewport.zoom(), 3.0); // clamped
//! ```

/// Core modules: renderer and viewport
pub mod core;

/// Data layer - static tables and constants
pub mod data;

/// Feature modules - built-in templates
pub mod features;

/// Utility modules
pub mod utils;

/// WASM bindings (feature-gated)
#[cfg(feature = "wasm")]
pub mod wasm;

// Re-export the renderer API
pub use crate::core::latex2html::{
    render, render_to_html, render_with_options, Alignment, LatexRenderer, RenderNode,
    RenderOptions, RenderResult,
};

// Re-export the viewport
pub use crate::core::viewport::{InteractionMode, ViewportState};

// Re-export feature modules
pub use features::templates;

// Re-export utilities
pub use utils::diagnostics;
pub use utils::error::{PreviewError, PreviewResult, RenderWarning, WarningKind};

/// Quick heuristic: does this text look like LaTeX rather than plain text?
///
/// Used by editor surfaces to decide whether the preview pane is worth
/// updating; based on command patterns, not a real parse.
pub fn is_probably_latex(input: &str) -> bool {
    input.contains('\\')
        && (input.contains("\\documentclass")
            || input.contains("\\begin{document}")
            || input.contains("\\section")
            || input.contains("\\textbf")
            || input.contains("\\item")
            || input.contains("\\begin{"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_basic() {
        let result = render(r"\textbf{bold}");
        assert!(result.warnings.is_empty());
        assert!(result.to_html().contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_render_to_html_section() {
        let html = render_to_html(r"\section*{Skills}");
        assert!(html.contains("<h2"));
        assert!(html.contains("Skills"));
    }

    #[test]
    fn test_is_probably_latex() {
        assert!(is_probably_latex(r"\documentclass{article}"));
        assert!(is_probably_latex(r"\section*{Experience}"));
        assert!(is_probably_latex(r"\begin{itemize}\item x\end{itemize}"));
        assert!(!is_probably_latex("Just a plain paragraph."));
        assert!(!is_probably_latex("C:\\Users\\me"));
    }

    #[test]
    fn test_template_round_trip() {
        let template = templates::find("modern").unwrap();
        let result = render(template.source);
        assert!(!result.has_warnings());
        let html = result.to_html();
        assert!(html.contains("John Doe"));
        assert!(html.contains("resume-section-title"));
    }

    #[test]
    fn test_warnings_surface_through_public_api() {
        let result = render(r"\badcommand{x}");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::UnknownCommand);
    }
}
