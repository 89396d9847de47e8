// tests/parser_tests.rs

use pretty_assertions::assert_eq;
use simpleql::ast::{AstTree, Param, ParamValue, ProcessorCall, TypeSpec};
use simpleql::error::{ParseError, ParseErrorKind};
use simpleql::{parse, parse_with_config, ParserConfig};

fn parse_ok(input: &str) -> Vec<AstTree> {
    match parse(input) {
        Ok(tree) => tree,
        Err(e) => panic!("Failed to parse {:?}:\n{}", input, e),
    }
}

fn parse_err(input: &str) -> ParseError {
    match parse(input) {
        Ok(tree) => panic!("Expected {:?} to fail, got {:?}", input, tree),
        Err(e) => e,
    }
}

fn unexpected(found: &str) -> ParseErrorKind {
    ParseErrorKind::UnexpectedToken {
        found: found.to_string(),
    }
}

// ============================================================================
// Statements
// ============================================================================

#[test]
fn test_empty_input() {
    assert_eq!(parse_ok(""), vec![]);
    assert_eq!(parse_ok("  \n\t \n"), vec![]);
}

#[test]
fn test_field_mapping() {
    let tree = parse_ok("name: lower");
    assert_eq!(tree, vec![AstTree::new("name").with_field("lower")]);
    assert_eq!(tree[0].field(), Some("lower"));
    assert!(tree[0].type_spec().is_none());
}

#[test]
fn test_type_reference() {
    let tree = parse_ok("name: Upper");
    assert_eq!(tree, vec![AstTree::new("name").with_type(TypeSpec::new("Upper"))]);
    assert!(tree[0].field().is_none());
}

#[test]
fn test_bare_pass_through() {
    assert_eq!(parse_ok("payerStatus"), vec![AstTree::new("payerStatus")]);
}

#[test]
fn test_type_or_field_classification() {
    let cases = vec![
        ("x: b", true),
        ("x: zed", true),
        ("x: été", true),
        ("x: a", false),
        ("x: abc", false),
        ("x: All", false),
        ("x: $foo", false),
        ("x: 42", false),
        ("x: _private", false),
    ];

    for (input, is_field) in cases {
        let tree = parse_ok(input);
        assert_eq!(tree[0].field().is_some(), is_field, "Failed for input: {}", input);
        assert_eq!(tree[0].type_spec().is_some(), !is_field, "Failed for input: {}", input);
    }
}

#[test]
fn test_nested_braces() {
    assert_eq!(
        parse_ok("a: B { c: d }"),
        vec![AstTree::new("a")
            .with_type(TypeSpec::new("B"))
            .with_props(vec![AstTree::new("c").with_field("d")])]
    );
}

#[test]
fn test_nested_type_without_separator() {
    assert_eq!(
        parse_ok("a: B { c: D }"),
        vec![AstTree::new("a")
            .with_type(TypeSpec::new("B"))
            .with_props(vec![AstTree::new("c").with_type(TypeSpec::new("D"))])]
    );
}

#[test]
fn test_block_without_type() {
    assert_eq!(
        parse_ok("a { b }"),
        vec![AstTree::new("a").with_props(vec![AstTree::new("b")])]
    );
}

#[test]
fn test_deeply_nested_blocks() {
    let tree = parse_ok("a: A { b: B { c: C { d } } }");
    let b = &tree[0].props.as_ref().unwrap()[0];
    let c = &b.props.as_ref().unwrap()[0];
    let d = &c.props.as_ref().unwrap()[0];
    assert_eq!(c.type_spec().unwrap().name, "C");
    assert_eq!(d, &AstTree::new("d"));
}

#[test]
fn test_member_document() {
    let tree = parse_ok(
        r#"
      $root: Member {
        honourMember: member,
        payerStatus,
      },
      foo: All,
      clause: Fengdie(path: insmutual_clause, base: $foo),
      latest: Fengdie(insxhbbff_old_upgrade),
    "#,
    );

    assert_eq!(
        tree,
        vec![
            AstTree::new("$root")
                .with_type(TypeSpec::new("Member"))
                .with_props(vec![
                    AstTree::new("honourMember").with_field("member"),
                    AstTree::new("payerStatus"),
                ]),
            AstTree::new("foo").with_type(TypeSpec::new("All")),
            AstTree::new("clause").with_type(TypeSpec::new("Fengdie").with_params(vec![
                Param::with_value("path", "insmutual_clause"),
                Param::with_value("base", "$foo"),
            ])),
            AstTree::new("latest").with_type(
                TypeSpec::new("Fengdie").with_params(vec![Param::key("insxhbbff_old_upgrade")])
            ),
        ]
    );
}

// ============================================================================
// Separators
// ============================================================================

#[test]
fn test_separators_are_interchangeable() {
    let with_commas = parse_ok("a: b, c: D, e");
    let with_newlines = parse_ok("a: b\nc: D\ne");
    let mixed = parse_ok("a: b,\nc: D\n\ne,");
    assert_eq!(with_commas, with_newlines);
    assert_eq!(with_commas, mixed);
    assert_eq!(with_commas.len(), 3);
}

#[test]
fn test_separators_collapse_before_closing_brace() {
    let expected = parse_ok("a { b }");
    assert_eq!(parse_ok("a { b, }"), expected);
    assert_eq!(parse_ok("a {\n  b\n}"), expected);
    assert_eq!(parse_ok("a {\n  b\n\n\n}"), expected);
    assert_eq!(parse_ok("a { b,\n,\n }"), expected);
}

#[test]
fn test_trailing_separator_after_block() {
    let with_comma = parse_ok("x { a: B { c: d }, }");
    let without = parse_ok("x { a: B { c: d } }");
    let with_newline = parse_ok("x {\n a: B { c: d }\n}");
    assert_eq!(with_comma, without);
    assert_eq!(with_comma, with_newline);
}

#[test]
fn test_statements_after_block() {
    let tree = parse_ok("a { b }, c: d\ne { f }\ng");
    let names: Vec<_> = tree.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["a", "c", "e", "g"]);
}

#[test]
fn test_juxtaposed_statements_after_params() {
    assert_eq!(
        parse_ok("a: B(k) c: d"),
        vec![
            AstTree::new("a").with_type(TypeSpec::new("B").with_params(vec![Param::key("k")])),
            AstTree::new("c").with_field("d"),
        ]
    );
}

// ============================================================================
// Keyed Parameters
// ============================================================================

#[test]
fn test_keyed_param_with_value() {
    assert_eq!(
        parse_ok("a: B(k: v)"),
        vec![AstTree::new("a").with_type(TypeSpec::new("B").with_params(vec![Param::with_value("k", "v")]))]
    );
}

#[test]
fn test_keyed_param_without_value() {
    let tree = parse_ok("a: B(k)");
    let params = tree[0].type_spec().unwrap().params.as_ref().unwrap();
    assert_eq!(params, &vec![Param::key("k")]);
    assert!(params[0].value.is_none());
}

#[test]
fn test_keyed_params_across_lines() {
    let tree = parse_ok("a: B(\n  x: 1,\n  y: 2)");
    assert_eq!(
        tree[0].type_spec().unwrap().params,
        Some(vec![Param::with_value("x", "1"), Param::with_value("y", "2")])
    );
}

#[test]
fn test_quoted_keyed_param() {
    let tree = parse_ok("root: Member($if: 'a > 1')");
    assert_eq!(
        tree[0].type_spec().unwrap().params,
        Some(vec![Param::with_value("$if", "'a > 1'")])
    );
}

#[test]
fn test_indexed_reference() {
    let tree = parse_ok("a: B(k: $c[$$d.e])");
    let params = tree[0].type_spec().unwrap().params.as_ref().unwrap();
    assert_eq!(params[0].value, Some(ParamValue::indexed("$c", "$$d.e")));
}

#[test]
fn test_typed_block_with_params() {
    let tree = parse_ok("user: User(id: $uid) {\n  nick: nickname\n}");
    assert_eq!(
        tree,
        vec![AstTree::new("user")
            .with_type(TypeSpec::new("User").with_params(vec![Param::with_value("id", "$uid")]))
            .with_props(vec![AstTree::new("nick").with_field("nickname")])]
    );
}

// ============================================================================
// Processors
// ============================================================================

#[test]
fn test_processor_pipeline_order() {
    let tree = parse_ok("a: B | P1(x) | P2");
    assert_eq!(
        tree[0].type_spec().unwrap().processors,
        Some(vec![
            ProcessorCall::new("P1", vec!["x".into()]),
            ProcessorCall::new("P2", vec![]),
        ])
    );
    assert!(tree[0].type_spec().unwrap().params.is_none());
}

#[test]
fn test_params_then_processors() {
    let tree = parse_ok("a: B(k: v) | Trim | Join(',', $sep[$$ctx.sep])");
    let spec = tree[0].type_spec().unwrap();
    assert_eq!(spec.params, Some(vec![Param::with_value("k", "v")]));
    assert_eq!(
        spec.processors,
        Some(vec![
            ProcessorCall::new("Trim", vec![]),
            ProcessorCall::new(
                "Join",
                vec!["','".into(), ParamValue::indexed("$sep", "$$ctx.sep")]
            ),
        ])
    );
}

#[test]
fn test_quoted_processor_param_passthrough() {
    let tree = parse_ok(r#"a: B | P("x > 1")"#);
    let processors = tree[0].type_spec().unwrap().processors.as_ref().unwrap();
    assert_eq!(processors[0].params, vec![ParamValue::Scalar("\"x > 1\"".to_string())]);
    assert!(processors[0].params[0].is_quoted());
}

#[test]
fn test_processor_before_block() {
    let tree = parse_ok("list: Items | Take(10) { id }");
    assert_eq!(
        tree,
        vec![AstTree::new("list")
            .with_type(TypeSpec::new("Items").with_processors(vec![ProcessorCall::new("Take", vec!["10".into()])]))
            .with_props(vec![AstTree::new("id")])]
    );
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_unclosed_brace() {
    let err = parse_err("root: Member { a: b ");
    assert_eq!(err.kind, unexpected("end of input"));
}

#[test]
fn test_empty_brace_body() {
    let err = parse_err("root: Member{}");
    assert_eq!(err.kind, unexpected("}"));
    assert_eq!(err.offset, 13);
    assert_eq!(err.column, 14);
}

#[test]
fn test_unterminated_quoted_param() {
    let err = parse_err(r#"root: Member($if: "a > 1)"#);
    assert_eq!(err.kind, ParseErrorKind::UnterminatedString { quote: '"' });
}

#[test]
fn test_unterminated_bracket_index() {
    let err = parse_err("root: Member(code: $code[$$foo.bar)");
    assert_eq!(err.kind, unexpected(")"));
}

#[test]
fn test_colon_without_value() {
    assert_eq!(parse_err("a:").kind, ParseErrorKind::ExpectedValue);
    assert_eq!(parse_err("a: }").kind, unexpected("}"));
}

#[test]
fn test_missing_colon_after_key() {
    assert_eq!(parse_err("a: B(k, v)").kind, unexpected(","));
}

#[test]
fn test_unexpected_token_after_param_value() {
    assert_eq!(parse_err("a: B(k: v: w)").kind, unexpected(":"));
}

#[test]
fn test_unexpected_token_after_type() {
    assert_eq!(parse_err("a: B]").kind, unexpected("]"));
}

#[test]
fn test_line_break_inside_param_list() {
    assert_eq!(parse_err("a: B(x: 1\n)").kind, unexpected("\\n"));
}

#[test]
fn test_unclosed_param_list() {
    assert_eq!(parse_err("a: B(k: v").kind, unexpected("end of input"));
}

#[test]
fn test_empty_param_lists() {
    assert_eq!(parse_err("a: B()").kind, unexpected(")"));
    assert_eq!(parse_err("a: B | P()").kind, unexpected(")"));
}

#[test]
fn test_trailing_pipe_at_end_of_input() {
    let tree = parse_ok("a: B |");
    assert_eq!(
        tree[0].type_spec().unwrap().processors,
        Some(vec![ProcessorCall::new("", vec![])])
    );
    assert_eq!(parse_err("a: B | }").kind, unexpected("}"));
}

#[test]
fn test_stray_closing_brace() {
    assert_eq!(parse_err("a: b }").kind, unexpected("}"));
    assert_eq!(parse_err("a { b } }").kind, unexpected("}"));
}

#[test]
fn test_error_message_has_context() {
    let err = parse_err("first: b,\nroot: Member(code: $code[$$foo.bar)");
    assert_eq!(err.line, 2);
    assert_eq!(err.window, "first: b,\nroot: Member(code: $code[$$foo.bar)");
    assert!(err.marker.ends_with('^'));
    assert_eq!(err.marker.len(), "root: Member(code: $code[$$foo.bar)".len());
    assert!(err.to_string().starts_with("Unexpected token ')' at line 2"));
}

#[test]
fn test_error_context_at_end_of_input() {
    let err = parse_err("root: Member {\n  a: b\n");
    assert_eq!(err.kind, unexpected("end of input"));
    assert_eq!((err.line, err.column), (3, 1));
    assert_eq!(err.window, "root: Member {\n  a: b");
    assert_eq!(err.marker, "     ^");
    assert!(err.to_string().ends_with("\n root: Member {\n   a: b\n      ^"));
}

#[test]
fn test_depth_limit() {
    let config = ParserConfig { max_depth: 2 };
    assert!(parse_with_config("a { b { c } }", config).is_ok());

    let err = parse_with_config("a { b { c { d } } }", config).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::DepthLimitExceeded { limit: 2 });
}

#[test]
fn test_default_depth_limit_rejects_pathological_input() {
    let depth = ParserConfig::default().max_depth + 1;
    let input = format!("{}x{}", "a {".repeat(depth), "}".repeat(depth));
    let err = parse(&input).unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::DepthLimitExceeded { .. }));
}
