pub mod ast;
pub mod cli;
pub mod error;
pub mod lexer;
pub mod output;
pub mod parser;

pub use ast::{AstTree, Param, ParamValue, ProcessorCall, Source, Token, TypeSpec};
pub use error::{ParseError, ParseErrorKind};
pub use lexer::Lexer;
pub use output::{to_json, to_json_pretty, to_value};
pub use parser::{Parser, ParserConfig};

/// Parses a SimpleQL document into its root-level statements.
///
/// ```
/// let tree = simpleql::parse("a: B { c: d }").unwrap();
/// assert_eq!(tree[0].type_spec().unwrap().name, "B");
/// assert_eq!(tree[0].props.as_ref().unwrap()[0].field(), Some("d"));
/// ```
pub fn parse(input: &str) -> Result<Vec<AstTree>, ParseError> {
    parse_with_config(input, ParserConfig::default())
}

/// Like [`parse`], with explicit parser settings.
pub fn parse_with_config(input: &str, config: ParserConfig) -> Result<Vec<AstTree>, ParseError> {
    Parser::with_config(Lexer::new(input), config).parse()
}
