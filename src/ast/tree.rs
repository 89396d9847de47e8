use crate::ast::TypeSpec;

/// One statement: `name [: type-or-field] [{ props }]`.
///
/// A document parses into an ordered list of these, and a `{ ... }` body
/// nests another list under [`AstTree::props`].
///
/// # Example
/// ```text
/// $root: Member {
///   honourMember: member
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AstTree {
    /// Output key (left-hand identifier)
    pub name: String,

    /// Right-hand side, absent for a bare pass-through such as `payerStatus`
    pub source: Option<Source>,

    /// Nested statements, present only when a brace block was written
    pub props: Option<Vec<AstTree>>,
}

/// Right-hand side of a statement. A statement maps either a field or a type,
/// never both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Direct mapping from a lowercase-leading source field
    Field(String),

    /// Provider/type reference
    Type(TypeSpec),
}

impl AstTree {
    pub fn new(name: impl Into<String>) -> Self {
        AstTree {
            name: name.into(),
            source: None,
            props: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.source = Some(Source::Field(field.into()));
        self
    }

    pub fn with_type(mut self, type_spec: TypeSpec) -> Self {
        self.source = Some(Source::Type(type_spec));
        self
    }

    pub fn with_props(mut self, props: Vec<AstTree>) -> Self {
        self.props = Some(props);
        self
    }

    pub fn field(&self) -> Option<&str> {
        match &self.source {
            Some(Source::Field(field)) => Some(field),
            _ => None,
        }
    }

    pub fn type_spec(&self) -> Option<&TypeSpec> {
        match &self.source {
            Some(Source::Type(spec)) => Some(spec),
            _ => None,
        }
    }
}
