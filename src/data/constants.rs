//! Static tables for the LaTeX subset
//!
//! The renderer only understands a fixed allow-list of commands. Everything
//! the preview needs to know about a command name lives here: what it means
//! (`CommandKind`) and how many brace arguments it consumes.

use phf::{phf_map, phf_set};

/// What a recognized command means to the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    /// `\section*{X}` or the résumé templates' custom `\ressection{X}`
    Section,
    /// `\Huge` / `\LARGE` size markers, only meaningful in the name-heading
    /// patterns (`{\Huge \textbf{X}}`, `\textbf{\Huge X}`)
    NameSize,
    /// `\textbf{X}`
    Bold,
    /// `\textit{X}`
    Italic,
    /// `\small`, opens a small-text run
    SmallOn,
    /// `\normalsize`, closes the enclosing small-text run
    SmallOff,
    /// `\href{url}{text}`
    Link,
    /// `\hfill`, splits the current line into a left/right flex row
    Hfill,
    /// `\par`, paragraph boundary
    Par,
    /// `\vspace{Npt}`
    Vspace,
    /// `\medskip`
    Medskip,
    /// `\hrulefill` and `\rule{w}{h}`
    Rule,
    /// `\item`, only meaningful inside `itemize`
    Item,
    /// `\noindent`, consumed silently
    Noindent,
}

/// The command allow-list. Names are stored without the leading backslash
/// and without a trailing star (`\section*` is looked up as `section`).
pub static COMMANDS: phf::Map<&'static str, CommandKind> = phf_map! {
    "section" => CommandKind::Section,
    "subsection" => CommandKind::Section,
    "ressection" => CommandKind::Section,
    "Huge" => CommandKind::NameSize,
    "LARGE" => CommandKind::NameSize,
    "textbf" => CommandKind::Bold,
    "textit" => CommandKind::Italic,
    "small" => CommandKind::SmallOn,
    "normalsize" => CommandKind::SmallOff,
    "href" => CommandKind::Link,
    "hfill" => CommandKind::Hfill,
    "par" => CommandKind::Par,
    "vspace" => CommandKind::Vspace,
    "medskip" => CommandKind::Medskip,
    "hrulefill" => CommandKind::Rule,
    "rule" => CommandKind::Rule,
    "item" => CommandKind::Item,
    "noindent" => CommandKind::Noindent,
};

/// Preamble commands that are stripped wholesale before structural parsing.
/// Used by the diagnostics pass to avoid reporting them as unknown.
pub static PREAMBLE_COMMANDS: phf::Set<&'static str> = phf_set! {
    "documentclass",
    "usepackage",
    "pagestyle",
    "thispagestyle",
    "pagenumbering",
    "setlength",
    "addtolength",
    "linespread",
    "setlist",
    "newcommand",
    "renewcommand",
    "providecommand",
    "raggedright",
};

/// Number of required brace arguments a command consumes.
pub fn command_arity(kind: CommandKind) -> usize {
    match kind {
        CommandKind::Section | CommandKind::Bold | CommandKind::Italic | CommandKind::Vspace => 1,
        CommandKind::Link => 2,
        // `\rule{w}{h}` takes two arguments, `\hrulefill` takes none; the
        // scanner consumes what is actually present, so two is the maximum.
        CommandKind::Rule => 2,
        _ => 0,
    }
}

// =============================================================================
// Layout constants
// =============================================================================

/// Nominal page width in layout units (A4 at 96 dpi).
pub const REFERENCE_PAGE_WIDTH: f32 = 794.0;

/// Horizontal margin subtracted from the container width by fit-to-width.
pub const FIT_MARGIN: f32 = 60.0;

/// Zoom bounds and step sizes.
pub const ZOOM_MIN: f32 = 0.3;
pub const ZOOM_MAX: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.1;
pub const WHEEL_ZOOM_STEP: f32 = 0.05;

/// Pointer movement is multiplied by this while panning.
pub const DRAG_GAIN: f32 = 1.5;

/// Height of a `\medskip` spacer, in points.
pub const MEDSKIP_PT: f32 = 6.0;

/// Scan budget: nesting deeper than this is absorbed as literal text, and a
/// scan that exceeds the step budget returns a partial tree plus a warning.
pub const MAX_SCAN_DEPTH: usize = 64;
pub const MAX_SCAN_STEPS: usize = 500_000;
