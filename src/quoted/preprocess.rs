//! Line-oriented text transform applied before tokenizing.

/// First characters that mark a full-line comment.
pub const COMMENT_CHARS: [char; 2] = ['#', ';'];

/// A physical line that survived comment stripping, already escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedLine {
    /// 1-based line number in the original text.
    pub number: usize,
    pub text: String,
}

/// Whether a line carries no data: blank, or a comment after leading whitespace.
pub fn is_ignorable(line: &str) -> bool {
    let trimmed = line.trim();
    trimmed.is_empty() || trimmed.starts_with(COMMENT_CHARS)
}

/// Rewrite a line from the doubled-quote convention to the backslash one.
///
/// Backslashes are doubled first so that literal backslashes survive the
/// tokenizer, then every `""` pair becomes `\"`.
pub fn escape_line(line: &str) -> String {
    line.replace('\\', "\\\\").replace("\"\"", "\\\"")
}

/// Lazily yield the prepared lines of `content`.
///
/// Lines are split on `\n`; a trailing `\r` is dropped.
pub fn prepare_lines(content: &str) -> impl Iterator<Item = PreparedLine> + '_ {
    content.split('\n').enumerate().filter_map(|(idx, raw)| {
        let line = raw.strip_suffix('\r').unwrap_or(raw);
        if is_ignorable(line) {
            return None;
        }
        Some(PreparedLine { number: idx + 1, text: escape_line(line) })
    })
}
