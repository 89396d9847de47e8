//! Grammar reference for the simpleql CLI

use super::CliError;

/// Available documentation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocCategory {
    Statements,
    Types,
    Parameters,
    Processors,
    Errors,
}

impl DocCategory {
    /// Parse category name from string
    pub fn from_name(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "statements" | "statement" | "fields" => Some(Self::Statements),
            "types" | "type" | "providers" => Some(Self::Types),
            "parameters" | "params" | "param" => Some(Self::Parameters),
            "processors" | "processor" | "pipes" => Some(Self::Processors),
            "errors" | "error" => Some(Self::Errors),
            _ => None,
        }
    }
}

/// Get the docs overview (category listing)
pub fn get_docs_overview() -> &'static str {
    r#"SIMPLEQL DOCUMENTATION

SimpleQL describes how output fields are sourced from named data providers.
Each statement names an output key and says where its value comes from.

DOCUMENTATION CATEGORIES

  statements        Statements, separators and nested blocks
  types             Field mappings vs provider/type references
  parameters        Keyed parameters, quoted literals and indexed references
  processors        Processor pipelines introduced with |
  errors            What the parser rejects and how errors are reported

QUICK REFERENCE

  name              Pass a field through unchanged
  name: field       Map a lowercase-leading source field
  name: Type        Read from a provider
  name: Type { }    Nested mappings scoped to the provider
  Type(k: v)        Keyed parameters
  $foo[$$bar.baz]   Indexed reference
  Type | P(x) | Q   Processor pipeline

Run 'simpleql doc <category>' for detailed documentation.
"#
}

/// Get documentation for a specific category
pub fn get_doc_category(name: &str) -> Result<&'static str, CliError> {
    match DocCategory::from_name(name) {
        Some(DocCategory::Statements) => Ok(STATEMENTS_DOC),
        Some(DocCategory::Types) => Ok(TYPES_DOC),
        Some(DocCategory::Parameters) => Ok(PARAMETERS_DOC),
        Some(DocCategory::Processors) => Ok(PROCESSORS_DOC),
        Some(DocCategory::Errors) => Ok(ERRORS_DOC),
        None => Err(CliError::UnknownCategory(name.to_string())),
    }
}

const STATEMENTS_DOC: &str = r#"STATEMENTS

A document is a list of statements:

  name [: type-or-field] [{ statements }]

SEPARATORS
  Statements are separated by ',' or a line break. The two are
  interchangeable, and a comma swallows the line break after it.
  Trailing separators before '}' or the end of input are ignored.

    a: b, c: d
    a: b
    c: d

NESTED BLOCKS
  A block scopes its statements to the enclosing statement. Blocks may
  not be empty.

    $root: Member {
      honourMember: member,
      payerStatus,
    },
    foo: All
"#;

const TYPES_DOC: &str = r#"FIELDS AND TYPES

The right-hand side of 'name: value' is classified by its first character:

  b..z and above    Field mapping, e.g. 'status: payerStatus'
  anything else     Type reference, e.g. 'foo: All', 'x: $ctx'

Note that a value starting with 'a' is a type reference.

A type reference may take keyed parameters and a processor pipeline:

  clause: Fengdie(path: insmutual_clause, base: $foo) | Trim
"#;

const PARAMETERS_DOC: &str = r#"PARAMETERS

Keyed parameters follow a type name in parentheses:

  Fengdie(path: insmutual_clause, base: $foo)
  Fengdie(insxhbbff_old_upgrade)              Key without a value

VALUES
  plain             insmutual_clause, $foo
  quoted            "x > 1", 'a, b'           Kept with their quotes
  indexed           $code[$$foo.bar]          One level of [ ] only
"#;

const PROCESSORS_DOC: &str = r#"PROCESSORS

A pipeline runs the output of a type reference through named processors,
left to right:

  list: Items(id: $id) | Filter("x > 1") | Take(10)
  name: User | Trim

Processor parameters are positional and use the same value forms as
keyed parameters. A processor with parentheses needs at least one value.
"#;

const ERRORS_DOC: &str = r#"ERRORS

Parsing stops at the first problem. Nothing is returned for the rest of
the document. Rejected input includes:

  root: Member { a: b              Missing closing brace
  root: Member{}                   Empty block
  root: Member($if: "a > 1)        Unterminated string
  root: Member(code: $c[$$f.bar)   Missing closing bracket
  root: Member(k, v)               Missing ':' after a key

Errors show the line and column plus the text leading up to the problem:

  Unexpected token '}' at line 1, column 14:
   root: Member{}
                ^
"#;

#[test]
fn test_category_aliases() {
    assert_eq!(DocCategory::from_name("Params"), Some(DocCategory::Parameters));
    assert_eq!(DocCategory::from_name("pipes"), Some(DocCategory::Processors));
    assert_eq!(DocCategory::from_name("nope"), None);
}
