//! LaTeX subset to HTML rendering
//!
//! This module converts the constrained LaTeX dialect used by the résumé
//! templates into a typed node tree, then serializes that tree to an HTML
//! fragment. It is the single implementation behind every preview surface:
//! the editor pane, template thumbnails, and the final preview all call
//! [`render`].
//!
//! # Module Structure
//!
//! - `scanner`: brace- and environment-depth-aware span scanner
//! - `markup`: command handling and line/paragraph assembly
//! - `environment`: `itemize` / `center` / `justify` handling
//! - `context`: renderer state, options, and preprocessing
//! - `node`: the render tree and its HTML serializer
//!
//! # Example
//!
//! ```rust
//! use texview::core::latex2html::{render, render_to_html};
//!
//! let result = render(r"\section*{Experience}");
//! assert!(result.warnings.is_empty());
//!
//! let html = render_to_html(r"\textbf{Hello}");
//! assert!(html.contains("<strong>Hello</strong>"));
//! ```

// Submodules
pub mod context;
pub mod environment;
pub mod markup;
pub mod node;
pub mod scanner;

// Re-export main types for convenience
pub use context::{LatexRenderer, RenderOptions};
pub use node::{Alignment, RenderNode, RenderResult};
pub use scanner::Span;

/// Render a LaTeX-subset document to a node tree.
///
/// This is a convenience function that creates a new renderer and processes
/// the input. It never panics; malformed input degrades gracefully and is
/// reported through [`RenderResult::warnings`].
pub fn render(input: &str) -> RenderResult {
    let mut renderer = LatexRenderer::new();
    renderer.render_document(input)
}

/// Render a LaTeX-subset document with custom options.
pub fn render_with_options(input: &str, options: RenderOptions) -> RenderResult {
    let mut renderer = LatexRenderer::with_options(options);
    renderer.render_document(input)
}

/// Render a LaTeX-subset document straight to an HTML fragment.
pub fn render_to_html(input: &str) -> String {
    render(input).to_html()
}

// =============================================================================
// Tests
// =============================================================================
