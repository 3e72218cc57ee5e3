//! Fixed LaTeX snippets for the transcribed study
//!
//! The source volumes carry the same declassification stamp and secrecy
//! marking on every page; these are reproduced as fixed blocks.

/// Stamp printed at the top of every declassified page
pub const DECLASSIFIED_BANNER: &str = "\\begin{spacing}{0.7}\n\\begin{center}\n\\begin{scriptsize}\\textbf{Declassified} per Executive Order 13526, Section 3.3\\\\NND Project Number: NND 63316. By: NWD Date: 2011\n\\vspace{2em}\n\\end{scriptsize}\n\\end{center}\n\\end{spacing}\n";

/// Secrecy marking repeated on the original pages
pub const TOP_SECRET_BANNER: &str =
    "\\begin{center}\n\\textbf{TOP SECRET -- Sensitive}\n\\end{center}\n";

/// Leading `easylist` properties shared by every outline
pub const LIST_PROPERTIES: &str = "Space=-2.3mm,Space*=-2.3mm,Hang=true,Progressive*=2em";

/// Smallest width fraction a narrowed table may take
pub const MIN_TABLE_WIDTH: f64 = 0.7;

/// Horizontal space per `:` indentation level, in em
pub const INDENT_UNIT_EM: u32 = 2;

/// Default `{{gap}}` width
pub const DEFAULT_GAP: &str = "2em";

/// Rule drawn for `----`
pub const HORIZONTAL_RULE: &str = "\\noindent\\rule{\\textwidth}{0.4pt}\n";

/// Templates the substitution helper knows how to render
pub const KNOWN_TEMPLATES: &[&str] = &[
    "u",
    "popup note",
    "gap",
    "nop",
    "xx-smaller",
    "x-smaller",
    "smaller",
    "small",
    "larger",
    "big",
    "x-larger",
    "xx-larger",
];

/// Whether a template name is rendered by the substitution helper
pub fn is_known_template(name: &str) -> bool {
    let name = name.trim().to_ascii_lowercase();
    KNOWN_TEMPLATES.iter().any(|&known| known == name)
}
