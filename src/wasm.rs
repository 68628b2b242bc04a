//! WASM bindings for texview
//!
//! This module provides JavaScript-accessible functions for rendering
//! LaTeX-subset sources to HTML in the browser.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use serde::Serialize;

/// Render result with additional metadata
#[cfg(feature = "wasm")]
#[derive(Serialize)]
pub struct RenderOutput {
    /// The rendered HTML fragment
    pub html: String,
    /// Whether rendering succeeded
    pub success: bool,
    /// Error message if rendering failed
    pub error: Option<String>,
    /// Warnings produced while rendering
    pub warnings: Vec<String>,
}

/// Template metadata for listing
#[cfg(feature = "wasm")]
#[derive(Serialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// Summary of LaTeX check results
#[cfg(feature = "wasm")]
#[derive(Serialize)]
pub struct CheckSummary {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub infos: Vec<String>,
    pub has_errors: bool,
}

/// Initialize panic hook for better error messages in browser console
#[cfg(feature = "wasm")]
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Render a LaTeX-subset source to an HTML fragment
///
/// # Arguments
/// * `input` - LaTeX source text
///
/// # Returns
/// HTML fragment string
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderToHtml")]
pub fn render_to_html_wasm(input: &str) -> String {
    crate::render_to_html(input)
}

/// Render with warnings and error reporting
///
/// Returns a `RenderOutput` object with html, success, error, and warnings.
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderWithWarnings")]
pub fn render_with_warnings_wasm(input: &str) -> JsValue {
    let result = match std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let rendered = crate::render(input);
        let warnings = rendered.warnings.iter().map(|w| w.to_string()).collect();
        (rendered.to_html(), warnings)
    })) {
        Ok((html, warnings)) => RenderOutput {
            html,
            success: true,
            error: None,
            warnings,
        },
        Err(e) => {
            let error_msg = if let Some(s) = e.downcast_ref::<&str>() {
                format!("Rendering failed: {}", s)
            } else if let Some(s) = e.downcast_ref::<String>() {
                format!("Rendering failed: {}", s)
            } else {
                "Rendering failed: unknown error (check browser console for details)".to_string()
            };
            RenderOutput {
                html: String::new(),
                success: false,
                error: Some(error_msg),
                warnings: vec![],
            }
        }
    };

    serde_wasm_bindgen::to_value(&result).unwrap()
}

/// Render to a structured node tree (JSON-shaped object)
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "renderNodes")]
pub fn render_nodes_wasm(input: &str) -> JsValue {
    let result = crate::render(input);
    serde_wasm_bindgen::to_value(&result).unwrap()
}

/// Check LaTeX source for potential preview issues
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "checkLatex")]
pub fn check_latex_wasm(input: &str) -> JsValue {
    use crate::diagnostics::DiagnosticLevel;

    let result = crate::diagnostics::check_latex(input);

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut infos = Vec::new();

    for d in &result.diagnostics {
        match d.level {
            DiagnosticLevel::Error => errors.push(d.message.clone()),
            DiagnosticLevel::Warning => warnings.push(d.message.clone()),
            DiagnosticLevel::Info => infos.push(d.message.clone()),
        }
    }

    let summary = CheckSummary {
        errors,
        warnings,
        infos,
        has_errors: result.has_errors(),
    };
    serde_wasm_bindgen::to_value(&summary).unwrap()
}

/// List built-in templates
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "listTemplates")]
pub fn list_templates_wasm() -> JsValue {
    let templates: Vec<TemplateInfo> = crate::templates::all()
        .iter()
        .map(|t| TemplateInfo {
            id: t.id.to_string(),
            name: t.name.to_string(),
            description: t.description.to_string(),
        })
        .collect();
    serde_wasm_bindgen::to_value(&templates).unwrap()
}

/// Get a built-in template source by id
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getTemplate")]
pub fn get_template_wasm(id: &str) -> Option<String> {
    crate::templates::find(id).map(|t| t.source.to_string())
}

/// Does the input look like LaTeX?
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "isProbablyLatex")]
pub fn is_probably_latex_wasm(input: &str) -> bool {
    crate::is_probably_latex(input)
}

/// Get version information
#[cfg(feature = "wasm")]
#[wasm_bindgen(js_name = "getVersion")]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
