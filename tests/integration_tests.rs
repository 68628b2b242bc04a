//! Integration tests for texview rendering and the preview viewport

use pretty_assertions::assert_eq;
use texview::{render, render_to_html, RenderNode, ViewportState};

fn count_nodes(nodes: &[RenderNode], pred: &dyn Fn(&RenderNode) -> bool) -> usize {
    let mut n = 0;
    for node in nodes {
        if pred(node) {
            n += 1;
        }
        match node {
            RenderNode::Heading { children, .. }
            | RenderNode::Paragraph { children }
            | RenderNode::Bold { children }
            | RenderNode::Italic { children }
            | RenderNode::Small { children }
            | RenderNode::Link { children, .. }
            | RenderNode::ListItem { children }
            | RenderNode::Block { children, .. } => n += count_nodes(children, pred),
            RenderNode::List { items } => n += count_nodes(items, pred),
            RenderNode::FlexRow { left, right } => {
                n += count_nodes(left, pred) + count_nodes(right, pred)
            }
            _ => {}
        }
    }
    n
}

// ============================================================================
// Renderer core properties
// ============================================================================

mod renderer {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_yields_single_placeholder() {
        let result = render("");
        assert_eq!(result.nodes.len(), 1);
        assert!(matches!(&result.nodes[0], RenderNode::Placeholder { .. }));
        assert_eq!(result.warnings.len(), 0);
    }

    #[test]
    fn test_brace_depth_correctness() {
        let result = render(r"\textbf{A \textit{B} C}");
        assert!(result.warnings.is_empty());
        assert_eq!(
            result.nodes,
            vec![RenderNode::Paragraph {
                children: vec![RenderNode::Bold {
                    children: vec![
                        RenderNode::Text {
                            text: "A ".to_string()
                        },
                        RenderNode::Italic {
                            children: vec![RenderNode::Text {
                                text: "B".to_string()
                            }]
                        },
                        RenderNode::Text {
                            text: " C".to_string()
                        },
                    ]
                }]
            }]
        );
    }

    #[test]
    fn test_unmatched_brace_recovery() {
        let result = render(r"\textbf{unterminated");
        assert_eq!(result.warnings.len(), 1);
        let bolds = count_nodes(&result.nodes, &|n| matches!(n, RenderNode::Bold { .. }));
        assert_eq!(bolds, 1);
        assert!(result.plain_text().contains("unterminated"));
    }

    #[test]
    fn test_stripping_idempotence() {
        let source = texview::templates::find("modern").unwrap().source;
        let plain = render(source).plain_text();
        for cmd in [
            "\\documentclass",
            "\\usepackage",
            "\\begin",
            "\\end",
            "\\section",
            "\\textbf",
            "\\textit",
            "\\small",
            "\\normalsize",
            "\\href",
            "\\hfill",
            "\\vspace",
            "\\medskip",
            "\\hrulefill",
            "\\item",
            "\\noindent",
            "\\Huge",
            "\\LARGE",
        ] {
            assert!(
                !plain.contains(cmd),
                "plain text still contains {}:\n{}",
                cmd,
                plain
            );
        }
        // Re-rendering the visible text must not invent structure either.
        let second = render(&plain);
        assert!(second.warnings.is_empty());
    }

    #[test]
    fn test_top_level_item_splitting() {
        let src = "\\begin{itemize}\n\
                   \\item First, with nesting \\begin{itemize}\\item inner one\\item inner two\\end{itemize}\n\
                   \\item Second\n\
                   \\item Third\n\
                   \\end{itemize}";
        let result = render(src);
        assert!(result.warnings.is_empty());
        match &result.nodes[0] {
            RenderNode::List { items } => assert_eq!(items.len(), 3),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_rendering_is_pure() {
        let src = texview::templates::find("minimal").unwrap().source;
        assert_eq!(render(src), render(src));
    }

    #[test]
    fn test_end_to_end_modern_professional_fixture() {
        // The shape named by the template contract: name heading, one
        // section, one list of three items.
        let src = r"\begin{document}
\begin{center}
    {\Huge\textbf{John Doe}}
\end{center}

\section*{Experience}
\begin{itemize}
    \item Led development of microservices architecture
    \item Reduced API response time by 40\%
    \item Mentored team of 5 junior developers
\end{itemize}
\end{document}";
        let result = render(src);
        assert_eq!(result.warnings.len(), 0);

        let level1 = count_nodes(&result.nodes, &|n| {
            matches!(n, RenderNode::Heading { level: 1, .. })
        });
        let level2 = count_nodes(&result.nodes, &|n| {
            matches!(n, RenderNode::Heading { level: 2, .. })
        });
        let lists = count_nodes(&result.nodes, &|n| matches!(n, RenderNode::List { .. }));
        assert_eq!(level1, 1);
        assert_eq!(level2, 1);
        assert_eq!(lists, 1);
        match result
            .nodes
            .iter()
            .find(|n| matches!(n, RenderNode::List { .. }))
        {
            Some(RenderNode::List { items }) => assert_eq!(items.len(), 3),
            _ => panic!("expected a top-level list"),
        }
    }
}

// ============================================================================
// HTML output
// ============================================================================

mod html {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_fragment_shape() {
        let html = render_to_html(
            "\\section*{Experience}\n\\textbf{Engineer} \\hfill 2022 \\\\\n\\textit{Corp}",
        );
        assert!(html.contains("<h2 class=\"resume-section-title\">Experience</h2>"));
        assert!(html.contains("display: flex"));
        assert!(html.contains("<em>Corp</em>"));
    }

    #[test]
    fn test_text_is_escaped() {
        let html = render_to_html("C++ & <script>alert(1)</script>");
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
        assert!(html.contains("&amp;"));
    }

    #[test]
    fn test_href_attribute_is_escaped() {
        let html = render_to_html(r#"\href{https://example.com/?q="x"}{link}"#);
        assert!(html.contains("&quot;x&quot;"));
        assert!(!html.contains("?q=\"x\""));
    }

    #[test]
    fn test_mailto_link() {
        let html = render_to_html(r"\href{mailto:john@email.com}{john@email.com}");
        assert!(html.contains("<a href=\"mailto:john@email.com\">john@email.com</a>"));
    }

    #[test]
    fn test_special_characters_render_literally() {
        let html = render_to_html(r"40\% $|$ 2019--2021 \(ok\)");
        assert!(html.contains("40% | 2019\u{2013}2021 (ok)"));
    }

    #[test]
    fn test_adjacent_breaks_collapse_to_one() {
        let html = render_to_html("line one \\\\ \\\\ \\\\ line two");
        assert_eq!(html.matches("<br>").count(), 1);
    }

    #[test]
    fn test_center_block_alignment() {
        let html = render_to_html("\\begin{center}middle\\end{center}");
        assert!(html.contains("text-align: center"));
        assert!(html.contains("middle"));
    }

    #[test]
    fn test_empty_input_placeholder_html() {
        let html = render_to_html("   ");
        assert_eq!(
            html,
            "<p class=\"preview-placeholder\">No content to preview</p>\n"
        );
    }

    #[test]
    fn test_templates_produce_full_documents() {
        for template in texview::templates::all() {
            let result = render(template.source);
            assert!(result.warnings.is_empty(), "template {}", template.id);
            let html = result.to_html();
            assert!(html.contains("<h1"), "template {}", template.id);
            assert!(html.contains("<ul"), "template {}", template.id);
            assert!(html.contains("display: flex"), "template {}", template.id);
        }
    }
}

// ============================================================================
// Warnings and degradation
// ============================================================================

mod warnings {
    use super::*;
    use pretty_assertions::assert_eq;
    use texview::WarningKind;

    #[test]
    fn test_unknown_command_warns_and_keeps_argument() {
        let result = render(r"\emph{still visible}");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::UnknownCommand);
        assert!(result.plain_text().contains("still visible"));
    }

    #[test]
    fn test_malformed_vspace_degrades_to_zero() {
        let result = render(r"\vspace{wide}");
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].kind, WarningKind::MalformedArgument);
        assert_eq!(result.nodes, vec![RenderNode::Spacer { points: 0.0 }]);
    }

    #[test]
    fn test_unclosed_environment_absorbs_rest() {
        let result = render("\\begin{itemize}\\item one\\item two");
        assert!(result
            .warnings
            .iter()
            .any(|w| w.kind == WarningKind::UnmatchedDelimiter));
        match &result.nodes[0] {
            RenderNode::List { items } => assert_eq!(items.len(), 2),
            other => panic!("expected list, got {:?}", other),
        }
    }

    #[test]
    fn test_worst_case_is_never_blank() {
        // Degraded output must still show something for non-empty input.
        let result = render("\\textbf{\\textit{\\href{x}{y} \\unknown{z}");
        assert!(result.has_warnings());
        assert!(!result.nodes.is_empty());
        assert!(!result.to_html().is_empty());
    }

    #[test]
    fn test_comment_stripping_respects_escapes() {
        let result = render("grew 40\\% YoY % internal note\n\\section*{Next}");
        assert!(result.warnings.is_empty());
        let plain = result.plain_text();
        assert!(plain.contains("grew 40% YoY"));
        assert!(!plain.contains("internal note"));
        assert!(plain.contains("Next"));
    }
}

// ============================================================================
// Viewport
// ============================================================================

mod viewport {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_set_zoom_clamps() {
        let mut vp = ViewportState::new();
        vp.set_zoom(10.0);
        assert_eq!(vp.zoom(), 3.0);
        vp.set_zoom(-1.0);
        assert_eq!(vp.zoom(), 0.3);
    }

    #[test]
    fn test_wheel_zoom_only_with_modifier() {
        let mut vp = ViewportState::new();
        assert!(!vp.on_wheel(-120.0, false));
        assert_eq!(vp.zoom(), 1.0);
        assert!(vp.on_wheel(-120.0, true));
        assert!(vp.zoom() > 1.0);
    }

    #[test]
    fn test_pan_uses_drag_gain() {
        let mut vp = ViewportState::new();
        vp.pointer_down(200.0, 200.0);
        vp.pointer_move(180.0, 190.0);
        assert_eq!(vp.scroll_offset(), (30.0, 15.0));
        vp.pointer_up();
        vp.pointer_move(0.0, 0.0);
        assert_eq!(vp.scroll_offset(), (30.0, 15.0));
    }

    #[test]
    fn test_fit_to_width_matches_page_metrics() {
        let mut vp = ViewportState::new();
        vp.fit_to_width(457.0);
        // (457 - 60) / 794 = 0.5
        assert!((vp.zoom() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zoom_persists_until_reset() {
        let mut vp = ViewportState::new();
        vp.zoom_in();
        vp.zoom_in();
        let zoomed = vp.zoom();
        // Loading a new document does not touch the viewport; only an
        // explicit reset does.
        vp.reset_zoom();
        assert!(zoomed > 1.0);
        assert_eq!(vp.zoom(), 1.0);
    }
}

// ============================================================================
// Diagnostics
// ============================================================================

mod diagnostics {
    use texview::diagnostics::check_latex;

    #[test]
    fn test_templates_check_clean() {
        for template in texview::templates::all() {
            let result = check_latex(template.source);
            assert!(
                result.is_clean(),
                "template '{}' reported issues: {:?}",
                template.id,
                result.diagnostics
            );
        }
    }

    #[test]
    fn test_unbalanced_input_reports_error() {
        let result = check_latex("\\begin{document}\\begin{center}oops\\end{document}");
        assert!(result.has_errors());
    }
}
