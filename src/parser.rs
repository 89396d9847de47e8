use crate::{
    ast::{AstTree, Param, ParamValue, ProcessorCall, Source, Token, TypeSpec},
    error::{ParseError, ParseErrorKind},
    lexer::Lexer,
};
use tracing::{debug, trace};

/// Parser settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum number of nested `{ ... }` blocks
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig { max_depth: 64 }
    }
}

/// Recursive-descent parser producing the statement tree of a document.
///
/// Every grammar decision uses at most one token of lookahead, and the first
/// violation aborts the whole parse.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    config: ParserConfig,
    depth: usize,
}

/// Outcome of one statement within a list.
struct Step {
    node: Option<AstTree>,
    /// The enclosing list is finished
    ended: bool,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>) -> Self {
        Self::with_config(lexer, ParserConfig::default())
    }

    pub fn with_config(lexer: Lexer<'a>, config: ParserConfig) -> Self {
        Parser {
            lexer,
            config,
            depth: 0,
        }
    }

    /// Parses the whole input into its root-level statements.
    pub fn parse(&mut self) -> Result<Vec<AstTree>, ParseError> {
        debug!(len = self.lexer.input().len(), "parsing document");

        let result = self.parse_document().and_then(|nodes| {
            // The root list only stops early on a `}` nobody opened
            match self.lexer.next_token() {
                Token::Eof => Ok(nodes),
                token => Err(self.lexer.unexpected(token)),
            }
        });

        match &result {
            Ok(nodes) => debug!(statements = nodes.len(), "parsed document"),
            Err(e) => debug!(line = e.line, column = e.column, error = %e.kind, "parse failed"),
        }
        result
    }

    /// `Document := Statement*`
    fn parse_document(&mut self) -> Result<Vec<AstTree>, ParseError> {
        let mut nodes = Vec::new();
        loop {
            let step = self.parse_statement()?;
            if let Some(node) = step.node {
                nodes.push(node);
            }
            if step.ended {
                return Ok(nodes);
            }
        }
    }

    /// `Statement := name [':' TypeOrField] ['{' Document '}'] [separator]`
    fn parse_statement(&mut self) -> Result<Step, ParseError> {
        let name = self.lexer.read_value()?;
        if name.is_empty() {
            return Ok(Step {
                node: None,
                ended: true,
            });
        }
        trace!(name = %name, depth = self.depth, "statement");

        let mut node = AstTree::new(name);

        if self.lexer.peek_token() == Token::Colon {
            self.lexer.next_token();
            node.source = Some(self.parse_type_or_field()?);
        }

        // A closing brace belongs to the enclosing block
        if self.lexer.peek_token() == Token::RBrace {
            return Ok(Step {
                node: Some(node),
                ended: true,
            });
        }

        let ended = match self.lexer.next_token() {
            Token::LBrace => {
                node.props = Some(self.parse_block()?);
                self.finish_statement()
            }
            Token::Comma | Token::Newline => self.finish_statement(),
            // No separator: the next statement starts right here
            _ => false,
        };

        Ok(Step {
            node: Some(node),
            ended,
        })
    }

    /// Body of a `{ ... }` block, after the opening brace. Consumes the
    /// closing brace.
    fn parse_block(&mut self) -> Result<Vec<AstTree>, ParseError> {
        if self.depth >= self.config.max_depth {
            return Err(self.lexer.error(ParseErrorKind::DepthLimitExceeded {
                limit: self.config.max_depth,
            }));
        }

        self.depth += 1;
        let props = self.parse_document()?;
        self.depth -= 1;

        match self.lexer.next_token() {
            Token::RBrace => Ok(props),
            token => Err(self.lexer.unexpected(token)),
        }
    }

    /// Collapses any run of separators, then reports whether the enclosing
    /// block closes next.
    fn finish_statement(&mut self) -> bool {
        while self.lexer.peek_token().is_separator() {
            self.lexer.next_token();
        }
        self.lexer.peek_token() == Token::RBrace
    }

    /// Right-hand side of `name: ...`.
    fn parse_type_or_field(&mut self) -> Result<Source, ParseError> {
        let value = self.lexer.read_value()?;

        let first = match value.chars().next() {
            Some(ch) => ch,
            None => return Err(self.lexer.error(ParseErrorKind::ExpectedValue)),
        };

        // Plain code point comparison: `b`..`z` (and anything above) start a
        // field, everything else, including `a`, starts a type.
        if first > 'a' {
            return Ok(Source::Field(value));
        }

        let mut spec = TypeSpec::new(value);

        match self.lexer.peek_token() {
            Token::LParen => {
                self.lexer.next_token();
                spec.params = Some(self.parse_params()?);
                if self.lexer.peek_token() == Token::Pipe {
                    spec.processors = Some(self.parse_processors()?);
                }
            }
            Token::Pipe => {
                spec.processors = Some(self.parse_processors()?);
            }
            Token::LBrace | Token::RBrace | Token::Comma | Token::Newline | Token::Eof => {}
            _ => {
                let token = self.lexer.next_token();
                return Err(self.lexer.unexpected(token));
            }
        }

        Ok(Source::Type(spec))
    }

    /// Keyed parameters `key: value, key, ...` after the opening parenthesis.
    /// Consumes the closing parenthesis.
    fn parse_params(&mut self) -> Result<Vec<Param>, ParseError> {
        let mut params = Vec::new();

        loop {
            let key = self.lexer.read_value()?;

            match self.lexer.next_token() {
                Token::RParen => {
                    params.push(Param { key, value: None });
                    return Ok(params);
                }
                Token::Colon => {
                    let value = self.parse_reference_value()?;
                    params.push(Param {
                        key,
                        value: Some(value),
                    });

                    match self.lexer.next_token() {
                        Token::Comma => continue,
                        Token::RParen => return Ok(params),
                        token => return Err(self.lexer.unexpected(token)),
                    }
                }
                token => return Err(self.lexer.unexpected(token)),
            }
        }
    }

    /// `'|' name ['(' values ')'] ('|' name ['(' values ')'])*`
    fn parse_processors(&mut self) -> Result<Vec<ProcessorCall>, ParseError> {
        let mut processors = Vec::new();
        self.lexer.next_token(); // Consume '|'

        loop {
            // Empty only at end of input, kept as a nameless stage
            let name = self.lexer.read_value()?;
            let mut processor = ProcessorCall::new(name, Vec::new());
            if self.lexer.peek_token() == Token::LParen {
                self.lexer.next_token();
                processor.params = self.parse_processor_params()?;
            }
            processors.push(processor);

            if self.lexer.peek_token() == Token::Pipe {
                self.lexer.next_token();
            } else {
                return Ok(processors);
            }
        }
    }

    /// Positional values `value, value, ...` after the opening parenthesis.
    /// Consumes the closing parenthesis.
    fn parse_processor_params(&mut self) -> Result<Vec<ParamValue>, ParseError> {
        let mut params = vec![self.parse_reference_value()?];

        loop {
            match self.lexer.next_token() {
                Token::RParen => return Ok(params),
                Token::Comma => params.push(self.parse_reference_value()?),
                token => return Err(self.lexer.unexpected(token)),
            }
        }
    }

    /// A quoted literal, a plain value, or a one-level `base[index]` reference.
    fn parse_reference_value(&mut self) -> Result<ParamValue, ParseError> {
        if matches!(self.lexer.peek_significant(), Some('"' | '\'')) {
            return Ok(ParamValue::Scalar(self.lexer.read_quoted_string()?));
        }

        let base = self.lexer.read_value()?;
        if self.lexer.peek_token() != Token::LBracket {
            return Ok(ParamValue::Scalar(base));
        }

        self.lexer.next_token(); // Consume '['
        let index = self.lexer.read_value()?;
        match self.lexer.next_token() {
            Token::RBracket => Ok(ParamValue::Indexed { base, index }),
            token => Err(self.lexer.unexpected(token)),
        }
    }
}
