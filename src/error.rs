use thiserror::Error;

/// Number of characters kept before the failure point in [`ParseError::window`].
const CONTEXT_WINDOW: usize = 50;

/// What went wrong while parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseErrorKind {
    /// An operator, or the end of input, where the grammar expected something else
    #[error("Unexpected token '{found}'")]
    UnexpectedToken { found: String },

    /// A `:` (or `|`) with nothing after it
    #[error("Expected a value")]
    ExpectedValue,

    /// A quoted literal that runs to the end of input
    #[error("Unterminated string, missing closing {quote}")]
    UnterminatedString { quote: char },

    /// Blocks nested deeper than `ParserConfig::max_depth`
    #[error("Nesting deeper than {limit} blocks")]
    DepthLimitExceeded { limit: usize },
}

/// Error raised at the first malformed construct. Parsing is all-or-nothing,
/// so no partial tree accompanies it.
///
/// The display form shows the source leading up to the failure with a caret
/// under the offending character:
///
/// ```text
/// Unexpected token '}' at line 1, column 14:
///  root: Member{}
///               ^
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind} at line {line}, column {column}:\n{}", excerpt(.window, .marker))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset of the failure point
    pub offset: usize,
    /// 1-based line of the failure point
    pub line: usize,
    /// 1-based column (in characters) of the failure point
    pub column: usize,
    /// Source text preceding and including the failure point, trimmed. May
    /// span several lines.
    pub window: String,
    /// Caret line aligned under the last character of `window`'s last line
    pub marker: String,
}

impl ParseError {
    /// Category tag shared by every parse failure.
    pub const CATEGORY: &'static str = "TokenParseError";

    pub fn new(kind: ParseErrorKind, input: &str, offset: usize) -> Self {
        let offset = clamp_to_boundary(input, offset);
        let before = &input[..offset];
        let line = before.matches('\n').count() + 1;
        let column = match before.rfind('\n') {
            Some(pos) => before[pos + 1..].chars().count() + 1,
            None => before.chars().count() + 1,
        };

        let (window, marker) = context_window(input, offset);

        ParseError {
            kind,
            offset,
            line,
            column,
            window,
            marker,
        }
    }

    pub fn category(&self) -> &'static str {
        Self::CATEGORY
    }
}

fn clamp_to_boundary(input: &str, offset: usize) -> usize {
    let mut offset = offset.min(input.len());
    while !input.is_char_boundary(offset) {
        offset -= 1;
    }
    offset
}

/// Up to [`CONTEXT_WINDOW`] characters before `offset`, across line breaks,
/// plus the character at `offset`, trimmed, and a caret line pointing at the
/// last character.
fn context_window(input: &str, offset: usize) -> (String, String) {
    let end = input[offset..]
        .chars()
        .next()
        .map_or(offset, |ch| offset + ch.len_utf8());
    let prefix = &input[..end];
    let skip = prefix.chars().count().saturating_sub(CONTEXT_WINDOW + 1);
    let start = prefix
        .char_indices()
        .nth(skip)
        .map_or(prefix.len(), |(idx, _)| idx);

    let window = prefix[start..].trim().to_string();
    let last_line = window.rsplit('\n').next().unwrap_or_default();
    let width = last_line.chars().count().saturating_sub(1);
    let marker = format!("{}^", " ".repeat(width));
    (window, marker)
}

/// Indents every window line by one space, then the caret line.
fn excerpt(window: &str, marker: &str) -> String {
    let mut out = String::new();
    for line in window.lines() {
        out.push(' ');
        out.push_str(line);
        out.push('\n');
    }
    if window.is_empty() {
        out.push_str(" \n");
    }
    out.push(' ');
    out.push_str(marker);
    out
}

#[test]
fn test_position_on_second_line() {
    let input = "a: B,\nc: D)";
    let err = ParseError::new(
        ParseErrorKind::UnexpectedToken { found: ")".into() },
        input,
        10,
    );
    assert_eq!(err.line, 2);
    assert_eq!(err.column, 5);
    assert_eq!(err.window, "a: B,\nc: D)");
    assert_eq!(err.marker, "    ^");
    assert_eq!(
        err.to_string(),
        "Unexpected token ')' at line 2, column 5:\n a: B,\n c: D)\n     ^"
    );
}

#[test]
fn test_window_at_start_of_line() {
    let input = "root: Member {\n  a: b\n";
    let err = ParseError::new(
        ParseErrorKind::UnexpectedToken { found: "end of input".into() },
        input,
        input.len(),
    );
    assert_eq!(err.line, 3);
    assert_eq!(err.column, 1);
    assert_eq!(err.window, "root: Member {\n  a: b");
    assert_eq!(err.marker, "     ^");
}

#[test]
fn test_window_crosses_line_start() {
    let input = format!("{}\n)", "x".repeat(80));
    let err = ParseError::new(ParseErrorKind::ExpectedValue, &input, 81);
    assert_eq!(err.column, 1);
    assert_eq!(err.window, format!("{}\n)", "x".repeat(CONTEXT_WINDOW - 1)));
    assert_eq!(err.marker, "^");
}

#[test]
fn test_window_is_capped() {
    let input = format!("{}!", "x".repeat(80));
    let err = ParseError::new(ParseErrorKind::ExpectedValue, &input, 80);
    assert_eq!(err.window.chars().count(), CONTEXT_WINDOW + 1);
    assert!(err.window.ends_with('!'));
    assert_eq!(err.marker.len(), CONTEXT_WINDOW + 1);
    assert!(err.marker.ends_with('^'));
}

#[test]
fn test_display_format() {
    let err = ParseError::new(
        ParseErrorKind::UnexpectedToken { found: "}".into() },
        "root: Member{}",
        13,
    );
    assert_eq!(
        err.to_string(),
        format!(
            "Unexpected token '}}' at line 1, column 14:\n root: Member{{}}\n {}^",
            " ".repeat(13)
        )
    );
    assert_eq!(err.category(), "TokenParseError");
}

#[test]
fn test_offset_past_end() {
    let err = ParseError::new(ParseErrorKind::ExpectedValue, "a:", 10);
    assert_eq!(err.offset, 2);
    assert_eq!(err.window, "a:");
    assert_eq!(err.marker, " ^");
}
