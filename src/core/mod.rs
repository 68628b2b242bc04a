//! Core modules
//!
//! This module contains the two collaborating components of the preview:
//! - `latex2html`: LaTeX subset to HTML renderer (pure, deterministic)
//! - `viewport`: zoom/pan state machine hosting the rendered output

pub mod latex2html;
pub mod viewport;

// Re-export main types and functions from latex2html
pub use latex2html::{
    render, render_to_html, render_with_options, Alignment, LatexRenderer, RenderNode,
    RenderOptions, RenderResult,
};

// Re-export the viewport state machine
pub use viewport::{InteractionMode, ViewportState};
