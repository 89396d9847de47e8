use std::fmt;

/// Structural token produced by the lexer.
///
/// Every token except [`Token::Text`] and [`Token::Eof`] is a single
/// operator character. Raw values are not tokenized; the lexer reports where
/// a value run starts and the parser reads it with `Lexer::read_value`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    /// Separates a name from its right-hand side, or a key from its value (`:`)
    Colon,

    /// Opens a nested statement block (`{`)
    LBrace,

    /// Closes a nested statement block (`}`)
    RBrace,

    /// Statement or parameter separator (`,`)
    Comma,

    /// Statement separator, interchangeable with `,`
    Newline,

    /// Introduces a processor in a pipeline (`|`)
    Pipe,

    /// Opens a parameter list (`(`)
    LParen,

    /// Closes a parameter list (`)`)
    RParen,

    /// Opens an indexed reference (`[`)
    LBracket,

    /// Closes an indexed reference (`]`)
    RBracket,

    /// Start of a raw value run. Carries its first character.
    Text(char),

    /// End of input
    Eof,
}

impl Token {
    /// Maps an operator character onto its token.
    pub fn from_char(ch: char) -> Option<Token> {
        match ch {
            ':' => Some(Token::Colon),
            '{' => Some(Token::LBrace),
            '}' => Some(Token::RBrace),
            ',' => Some(Token::Comma),
            '\n' => Some(Token::Newline),
            '|' => Some(Token::Pipe),
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            _ => None,
        }
    }

    /// Whether `ch` is one of the structural operator characters.
    pub fn is_operator(ch: char) -> bool {
        Token::from_char(ch).is_some()
    }

    /// True for the two interchangeable statement separators.
    pub fn is_separator(&self) -> bool {
        matches!(self, Token::Comma | Token::Newline)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Colon => write!(f, ":"),
            Token::LBrace => write!(f, "{{"),
            Token::RBrace => write!(f, "}}"),
            Token::Comma => write!(f, ","),
            Token::Newline => write!(f, "\\n"),
            Token::Pipe => write!(f, "|"),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::LBracket => write!(f, "["),
            Token::RBracket => write!(f, "]"),
            Token::Text(ch) => write!(f, "{}", ch),
            Token::Eof => write!(f, "end of input"),
        }
    }
}
