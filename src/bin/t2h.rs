//! Texview CLI - render LaTeX-subset resumes to HTML

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};
#[cfg(feature = "cli")]
use std::fs;
#[cfg(feature = "cli")]
use std::io::{self, Read};
#[cfg(feature = "cli")]
use texview::{
    diagnostics::{check_latex, format_diagnostics},
    render, templates, PreviewResult, RenderResult,
};

#[cfg(feature = "cli")]
#[derive(Parser)]
#[command(name = "t2h")]
#[command(version)]
#[command(about = "Texview - LaTeX-subset resume preview renderer (LaTeX -> HTML)", long_about = None)]
struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input file path (reads from stdin if not provided)
    input_file: Option<String>,

    /// Output file path (writes to stdout if not provided)
    #[arg(short, long)]
    output: Option<String>,

    /// Emit the render tree as JSON instead of HTML
    #[arg(long)]
    json: bool,

    /// Wrap the HTML fragment in a standalone page with preview styles
    #[arg(long)]
    standalone: bool,

    /// Strict mode: exit with error if any render warnings occur
    #[arg(long)]
    strict: bool,

    /// Quiet mode: suppress warning output to stderr
    #[arg(short, long)]
    quiet: bool,

    /// Embed warnings as comments in the output
    #[arg(long)]
    embed_warnings: bool,
}

#[cfg(feature = "cli")]
#[derive(Subcommand)]
enum Commands {
    /// Check a LaTeX source for preview issues
    Check {
        /// Input file to check (reads from stdin if not provided)
        input: Option<String>,
    },

    /// Render a file (default action)
    Convert {
        /// Input file path
        input: Option<String>,

        /// Output file path
        #[arg(short, long)]
        output: Option<String>,

        /// Emit the render tree as JSON instead of HTML
        #[arg(long)]
        json: bool,

        /// Wrap the HTML fragment in a standalone page
        #[arg(long)]
        standalone: bool,
    },

    /// List built-in templates, or print one by id
    Templates {
        /// Template id to print (lists all when omitted)
        id: Option<String>,
    },

    /// Show version and feature info
    Info,
}

#[cfg(feature = "cli")]
fn main() {
    let cli = Cli::parse();

    let exit_code = match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {}", e);
            1
        }
    };

    std::process::exit(exit_code);
}

#[cfg(feature = "cli")]
fn run(cli: Cli) -> PreviewResult<i32> {
    match cli.command {
        Some(Commands::Check { input }) => {
            let content = read_input(input.as_deref())?;
            let result = check_latex(&content);
            print!("{}", format_diagnostics(&result));
            Ok(if result.has_errors() { 1 } else { 0 })
        }

        Some(Commands::Convert {
            input,
            output,
            json,
            standalone,
        }) => convert(
            input.as_deref(),
            output.as_deref(),
            json,
            standalone,
            cli.strict,
            cli.quiet,
            cli.embed_warnings,
        ),

        Some(Commands::Templates { id }) => {
            match id {
                Some(id) => match templates::find(&id) {
                    Some(template) => println!("{}", template.source),
                    None => {
                        eprintln!("error: no template with id '{}'", id);
                        return Ok(1);
                    }
                },
                None => {
                    for template in templates::all() {
                        println!("{:<10} {} - {}", template.id, template.name, template.description);
                    }
                }
            }
            Ok(0)
        }

        Some(Commands::Info) => {
            println!("Texview - LaTeX-subset resume preview renderer");
            println!("Version: {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Features:");
            println!("  - LaTeX subset -> HTML rendering");
            println!("  - Structured render tree output (--json)");
            println!("  - Source diagnostics (check)");
            println!("  - Built-in resume templates (templates)");
            println!();
            println!("Recognized constructs:");
            println!("  \\section*, \\textbf, \\textit, \\small/\\normalsize, \\href,");
            println!("  \\hfill, \\vspace, \\medskip, \\hrulefill, itemize, center, justify");
            Ok(0)
        }

        None => convert(
            cli.input_file.as_deref(),
            cli.output.as_deref(),
            cli.json,
            cli.standalone,
            cli.strict,
            cli.quiet,
            cli.embed_warnings,
        ),
    }
}

#[cfg(feature = "cli")]
#[allow(clippy::too_many_arguments)]
fn convert(
    input: Option<&str>,
    output: Option<&str>,
    json: bool,
    standalone: bool,
    strict: bool,
    quiet: bool,
    embed_warnings: bool,
) -> PreviewResult<i32> {
    let content = read_input(input)?;
    let result = render(&content);

    if !quiet && result.has_warnings() {
        eprintln!("Render warnings ({}):", result.warnings.len());
        for warning in &result.warnings {
            eprintln!("  {}", warning);
        }
    }

    let rendered = if json {
        serde_json::to_string_pretty(&result)
            .map_err(|e| texview::PreviewError::internal(e.to_string()))?
    } else {
        let mut html = result.to_html();
        if embed_warnings && result.has_warnings() {
            html.push_str("\n<!-- render warnings:\n");
            for warning in &result.warnings {
                html.push_str(&format!("  {}\n", warning));
            }
            html.push_str("-->\n");
        }
        if standalone {
            wrap_standalone(&html, &result)
        } else {
            html
        }
    };

    match output {
        Some(path) => {
            fs::write(path, &rendered)?;
            eprintln!("output written to: {}", path);
        }
        None => println!("{}", rendered),
    }

    Ok(if strict && result.has_warnings() { 1 } else { 0 })
}

#[cfg(feature = "cli")]
fn read_input(path: Option<&str>) -> PreviewResult<String> {
    match path {
        Some(path) => Ok(fs::read_to_string(path)?),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            Ok(buffer)
        }
    }
}

/// Wrap a fragment in a minimal page carrying the preview styles.
#[cfg(feature = "cli")]
fn wrap_standalone(fragment: &str, result: &RenderResult) -> String {
    let title = result
        .plain_text()
        .lines()
        .next()
        .unwrap_or("Resume preview")
        .to_string();
    format!(
        "<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"UTF-8\">\n\
         <title>{}</title>\n<style>\n{}</style>\n</head>\n<body>\n\
         <div class=\"preview-paper\">\n{}</div>\n</body>\n</html>\n",
        texview::core::latex2html::node::escape_html(&title),
        PREVIEW_CSS,
        fragment
    )
}

#[cfg(feature = "cli")]
const PREVIEW_CSS: &str = "\
body { background: #e8e8e8; margin: 0; padding: 24px; }
.preview-paper {
  width: 794px; min-height: 1123px; margin: 0 auto; padding: 48px 56px;
  background: #fff; box-shadow: 0 2px 8px rgba(0, 0, 0, 0.15);
  font-family: Georgia, 'Times New Roman', serif; font-size: 11pt;
  line-height: 1.4; color: #1a1a1a;
}
.preview-placeholder { color: #666; text-align: center; margin-top: 40px; }
.resume-name { font-size: 28pt; margin: 0 0 4px; text-align: center; line-height: 1.2; }
.resume-section-title {
  font-size: 13pt; margin: 14px 0 4px; border-bottom: 1px solid #1a1a1a;
  text-transform: none;
}
.resume-text { margin: 0 0 8px; }
.resume-list { margin: 4px 0 10px 15px; padding-left: 12px; }
.resume-list li { margin-bottom: 4px; }
.small-text { font-size: 0.9em; }
.section-line { border: none; border-top: 1px solid #1a1a1a; margin: 2px 0 8px; }
.flex-row { margin-bottom: 4px; }
a { color: #0066cc; text-decoration: none; }
";

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Build with --features cli");
    eprintln!();
    eprintln!("Usage:");
    eprintln!("  cargo install texview --features cli");
    eprintln!("  t2h [OPTIONS] [INPUT_FILE]");
}
