//! Character replacement tables
//!
//! Fixed mappings applied after template substitution: LaTeX reserved
//! characters, typographic characters of the transcriptions (dashes,
//! checkboxes, pipes), and accented letters.

use phf::phf_map;

/// LaTeX reserved characters and their escaped form
pub static RESERVED_CHARS: phf::Map<char, &'static str> = phf_map! {
    '\\' => "\\textbackslash{}",
    '&' => "\\&",
    '%' => "\\%",
    '$' => "\\$",
    '#' => "\\#",
    '_' => "\\_",
    '{' => "\\{",
    '}' => "\\}",
    '~' => "\\textasciitilde{}",
    '^' => "\\textasciicircum{}",
};

/// Typographic characters with a fixed LaTeX rendering
pub static CHAR_REPLACEMENTS: phf::Map<char, &'static str> = phf_map! {
    // Dashes
    '–' => "--",
    '—' => "---",
    // Checkboxes
    '□' => "\\Square~",
    '☐' => "\\Square~",
    '☑' => "\\CheckedBox~",
    '☒' => "\\XBox~",
    '✓' => "{\\checked}",
    '✔' => "{\\checked}",
    // Table leftovers
    '|' => "{\\textbar}",
    // Punctuation that OT1 would render wrongly
    '<' => "\\textless{}",
    '>' => "\\textgreater{}",
    '…' => "\\ldots{}",
    '“' => "``",
    '”' => "''",
    '‘' => "`",
    '’' => "'",
    '§' => "\\S{}",
    '°' => "\\textdegree{}",
    '\u{a0}' => "~",
};

/// Accented letters as compose codes
pub static ACCENTS: phf::Map<char, &'static str> = phf_map! {
    'é' => "\\'{e}",
    'É' => "\\'{E}",
    'è' => "\\`{e}",
    'ê' => "\\^{e}",
    'ë' => "\\\"{e}",
    'á' => "\\'{a}",
    'à' => "\\`{a}",
    'â' => "\\^{a}",
    'ä' => "\\\"{a}",
    'í' => "\\'{\\i}",
    'î' => "\\^{\\i}",
    'ï' => "\\\"{\\i}",
    'ó' => "\\'{o}",
    'ô' => "\\^{o}",
    'ö' => "\\\"{o}",
    'ú' => "\\'{u}",
    'û' => "\\^{u}",
    'ü' => "\\\"{u}",
    'ç' => "\\c{c}",
    'ñ' => "\\~{n}",
};

/// Escape for a reserved character, if it is one
#[inline]
pub fn reserved(c: char) -> Option<&'static str> {
    RESERVED_CHARS.get(&c).copied()
}

/// Fixed replacement for a typographic character, if it has one
#[inline]
pub fn replacement(c: char) -> Option<&'static str> {
    CHAR_REPLACEMENTS.get(&c).copied()
}

/// Compose code for an accented letter, if it has one
#[inline]
pub fn accent(c: char) -> Option<&'static str> {
    ACCENTS.get(&c).copied()
}
