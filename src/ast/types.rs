/// A provider/type reference on the right-hand side of a statement.
///
/// # Example
/// ```text
/// Fengdie(path: insmutual_clause) | Split(",") | First
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSpec {
    /// Provider identifier
    pub name: String,

    /// Keyed parameters, present when a `( ... )` list was written
    pub params: Option<Vec<Param>>,

    /// Processor pipeline, in the order written
    pub processors: Option<Vec<ProcessorCall>>,
}

impl TypeSpec {
    pub fn new(name: impl Into<String>) -> Self {
        TypeSpec {
            name: name.into(),
            params: None,
            processors: None,
        }
    }

    pub fn with_params(mut self, params: Vec<Param>) -> Self {
        self.params = Some(params);
        self
    }

    pub fn with_processors(mut self, processors: Vec<ProcessorCall>) -> Self {
        self.processors = Some(processors);
        self
    }
}

/// Keyed parameter (`key` or `key: value`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub key: String,
    pub value: Option<ParamValue>,
}

impl Param {
    /// A bare key with no value, as in `Fengdie(insxhbbff_old_upgrade)`.
    pub fn key(key: impl Into<String>) -> Self {
        Param {
            key: key.into(),
            value: None,
        }
    }

    pub fn with_value(key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        Param {
            key: key.into(),
            value: Some(value.into()),
        }
    }
}

/// One stage of a processor pipeline. Parameters are positional.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessorCall {
    pub name: String,
    pub params: Vec<ParamValue>,
}

impl ProcessorCall {
    pub fn new(name: impl Into<String>, params: Vec<ParamValue>) -> Self {
        ProcessorCall {
            name: name.into(),
            params,
        }
    }
}

/// Value of a keyed or positional parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Plain value, or a quoted literal with its quotes retained
    ///
    /// # Examples
    /// ```text
    /// insmutual_clause
    /// $foo
    /// "x > 1"
    /// ```
    Scalar(String),

    /// One-level indexed reference
    ///
    /// # Example
    /// ```text
    /// $foo[$$bar.baz]
    /// ```
    Indexed { base: String, index: String },
}

impl ParamValue {
    pub fn indexed(base: impl Into<String>, index: impl Into<String>) -> Self {
        ParamValue::Indexed {
            base: base.into(),
            index: index.into(),
        }
    }

    /// The scalar text, if this is not an indexed reference.
    pub fn as_scalar(&self) -> Option<&str> {
        match self {
            ParamValue::Scalar(s) => Some(s),
            ParamValue::Indexed { .. } => None,
        }
    }

    /// True for scalars written as `"..."` or `'...'`.
    pub fn is_quoted(&self) -> bool {
        match self {
            ParamValue::Scalar(s) => {
                s.len() >= 2
                    && (s.starts_with('"') && s.ends_with('"')
                        || s.starts_with('\'') && s.ends_with('\''))
            }
            ParamValue::Indexed { .. } => false,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Scalar(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Scalar(s)
    }
}
