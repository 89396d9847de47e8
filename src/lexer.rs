use crate::ast::Token;
use crate::error::{ParseError, ParseErrorKind};

/// Peekable cursor over SimpleQL source text.
///
/// The lexer does not split the input into a token list up front. The parser
/// drives it one decision at a time: look at the next structural operator,
/// consume it, or read the raw value run starting at the cursor.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    /// Offset of the most recently returned token, used for error positions
    token_start: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            position: 0,
            token_start: 0,
        }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    /// Current byte offset.
    pub fn position(&self) -> usize {
        self.position
    }

    fn current_char(&self) -> Option<char> {
        self.input[self.position..].chars().next()
    }

    /// Character `offset` places past the cursor, without consuming anything.
    pub fn peek_char(&self, offset: usize) -> Option<char> {
        self.input[self.position..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(ch) = self.current_char() {
            self.position += ch.len_utf8();
        }
    }

    /// Skips all whitespace, newlines included.
    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.current_char() {
            if ch.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Offset of the first character that is an operator or not whitespace.
    /// A newline is an operator, so it stops the scan.
    fn significant_offset(&self) -> usize {
        let rest = &self.input[self.position..];
        rest.char_indices()
            .find(|&(_, ch)| Token::is_operator(ch) || !ch.is_whitespace())
            .map_or(self.input.len(), |(idx, _)| self.position + idx)
    }

    /// First significant character, without consuming anything.
    pub fn peek_significant(&self) -> Option<char> {
        self.input[self.significant_offset()..].chars().next()
    }

    /// Next significant token, without consuming anything.
    pub fn peek_token(&self) -> Token {
        classify(self.peek_significant())
    }

    /// Consumes and returns the next structural operator.
    ///
    /// Insignificant whitespace before it is skipped. A comma also absorbs the
    /// whitespace and line breaks that follow it. [`Token::Text`] and
    /// [`Token::Eof`] are reported without consuming anything, so the value
    /// run stays available to [`Lexer::read_value`].
    pub fn next_token(&mut self) -> Token {
        let start = self.significant_offset();
        self.token_start = start;
        self.position = start;

        let token = classify(self.current_char());
        match token {
            Token::Text(_) | Token::Eof => {}
            Token::Comma => {
                self.advance();
                self.skip_whitespace();
            }
            _ => self.advance(),
        }
        token
    }

    /// Reads the raw value run starting at the next non-whitespace character,
    /// up to the next operator or the end of input, and returns it trimmed.
    ///
    /// Returns an empty string only at the end of input. Fails when the first
    /// significant character is an operator.
    pub fn read_value(&mut self) -> Result<String, ParseError> {
        self.skip_whitespace();
        self.token_start = self.position;

        match self.current_char() {
            None => return Ok(String::new()),
            Some(ch) if Token::is_operator(ch) => {
                let token = classify(Some(ch));
                return Err(self.unexpected(token));
            }
            Some(_) => {}
        }

        let start = self.position;
        while let Some(ch) = self.current_char() {
            if Token::is_operator(ch) {
                break;
            }
            self.advance();
        }
        Ok(self.input[start..self.position].trim().to_string())
    }

    /// Reads a quoted literal verbatim, delimiters included.
    ///
    /// The cursor must sit before the opening quote (whitespace allowed).
    /// Nothing inside the literal is interpreted: operators, line breaks and
    /// backslashes are copied as-is up to the next matching quote.
    pub fn read_quoted_string(&mut self) -> Result<String, ParseError> {
        let start = self.significant_offset();
        self.position = start;
        self.token_start = start;

        let quote = match self.current_char() {
            Some(ch @ ('"' | '\'')) => ch,
            other => return Err(self.unexpected(classify(other))),
        };
        self.advance(); // Consume opening quote

        while let Some(ch) = self.current_char() {
            self.advance();
            if ch == quote {
                return Ok(self.input[start..self.position].to_string());
            }
        }

        Err(self.error_at(ParseErrorKind::UnterminatedString { quote }, self.position))
    }

    /// Error for `token` found at the most recent token position.
    pub fn unexpected(&self, token: Token) -> ParseError {
        self.error_at(
            ParseErrorKind::UnexpectedToken {
                found: token.to_string(),
            },
            self.token_start,
        )
    }

    /// Error at the current cursor position.
    pub fn error(&self, kind: ParseErrorKind) -> ParseError {
        self.error_at(kind, self.position)
    }

    fn error_at(&self, kind: ParseErrorKind, offset: usize) -> ParseError {
        ParseError::new(kind, self.input, offset)
    }
}

fn classify(ch: Option<char>) -> Token {
    match ch {
        None => Token::Eof,
        Some(ch) => Token::from_char(ch).unwrap_or(Token::Text(ch)),
    }
}

#[test]
fn test_peek_does_not_consume() {
    let lexer = Lexer::new("  \t{ a }");
    assert_eq!(lexer.peek_token(), Token::LBrace);
    assert_eq!(lexer.peek_token(), Token::LBrace);
    assert_eq!(lexer.position(), 0);
}

#[test]
fn test_newline_is_significant() {
    let mut lexer = Lexer::new("  \n  }");
    assert_eq!(lexer.next_token(), Token::Newline);
    assert_eq!(lexer.next_token(), Token::RBrace);
    assert_eq!(lexer.next_token(), Token::Eof);
}

#[test]
fn test_comma_absorbs_line_break() {
    let mut lexer = Lexer::new(",\n\n  }");
    assert_eq!(lexer.next_token(), Token::Comma);
    assert_eq!(lexer.peek_char(0), Some('}'));
}

#[test]
fn test_read_value_stops_at_operator() {
    let mut lexer = Lexer::new("\n  $root :Member");
    assert_eq!(lexer.read_value().unwrap(), "$root");
    assert_eq!(lexer.next_token(), Token::Colon);
    assert_eq!(lexer.read_value().unwrap(), "Member");
    assert_eq!(lexer.read_value().unwrap(), "");
}

#[test]
fn test_read_quoted_string_keeps_quotes() {
    let mut lexer = Lexer::new(" 'a, (b)' )");
    assert_eq!(lexer.read_quoted_string().unwrap(), "'a, (b)'");
    assert_eq!(lexer.next_token(), Token::RParen);
}
