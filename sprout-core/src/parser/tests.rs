use crate::{
    environment::prelude::ScopeId,
    lexer::prelude::{LexicalErrorType, TokenStream},
    parser::prelude::{
        parse_module, parse_module_with_config, Node, NodeKind, ParseError, ParseErrorType,
        ParseWarning, Parser, ParserConfig, ParserState
    },
    utils::prelude::{Error, ErrorKind, SrcSpan}
};

fn integers(nodes: &[Node]) -> Vec<i64> {
    nodes.iter()
        .map(|node| node.as_integer().expect("integer node"))
        .collect()
}

fn fails_with(input: &str) -> ParseError {
    match parse_module(input) {
        Ok(parsed) => panic!("`{input}` parsed as {}", parsed.program),
        Err(err) => err,
    }
}

#[test]
fn test_integer_literal() -> Result<(), ParseError> {
    let parsed = parse_module("42")?;

    assert_eq!(parsed.program.root().kind(), NodeKind::Program);
    assert_eq!(parsed.program.children().len(), 1);

    let child = &parsed.program.children()[0];
    assert_eq!(child.kind(), NodeKind::Integer);
    assert_eq!(child.as_integer(), Ok(42));
    assert_eq!(child.location(), SrcSpan::from(0, 2));

    Ok(())
}

#[test]
fn test_signed_integers() -> Result<(), ParseError> {
    let parsed = parse_module("-7 +7 0 -9223372036854775808")?;

    assert_eq!(integers(parsed.program.children()), vec![-7, 7, 0, i64::MIN]);

    Ok(())
}

#[test]
fn test_grouped_expression() -> Result<(), ParseError> {
    let parsed = parse_module("(1 2 3)")?;

    assert_eq!(parsed.program.children().len(), 1);

    let group = &parsed.program.children()[0];
    assert_eq!(group.kind(), NodeKind::Group);
    assert_eq!(integers(group.children()), vec![1, 2, 3]);
    assert_eq!(group.location(), SrcSpan::from(0, 7));

    Ok(())
}

#[test]
fn test_nested_groups() -> Result<(), ParseError> {
    let parsed = parse_module("(1 (2 (3)) ()) 4")?;

    assert_eq!(parsed.program.to_string(), "(1 (2 (3)) ())\n4");

    let outer = &parsed.program.children()[0];
    let inner = &outer.children()[1];
    assert_eq!(inner.children()[0].as_integer(), Ok(2));
    assert_eq!(outer.children()[2].children().len(), 0);

    Ok(())
}

#[test]
fn test_unmatched_paren() {
    let err = fails_with("(1 2");

    assert_eq!(err.error, ParseErrorType::UnclosedGroup);
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.span, SrcSpan::from(0, 1));

    let err = fails_with("((1) 2");
    assert_eq!(err.error, ParseErrorType::UnclosedGroup);
}

#[test]
fn test_dangling_close_paren() {
    let err = fails_with("1 2)");

    assert_eq!(err.error, ParseErrorType::UnmatchedCloseParen);
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.span, SrcSpan::from(3, 4));
}

#[test]
fn test_binding() -> Result<(), ParseError> {
    let parsed = parse_module("x: 5")?;

    let value = parsed.environment.lookup(ScopeId::ROOT, "x").expect("x is bound");
    assert_eq!(value.kind(), NodeKind::Integer);
    assert_eq!(value.as_integer(), Ok(5));

    let binding = &parsed.program.children()[0];
    let (name, bound) = binding.as_binding().expect("binding node");
    assert_eq!(name, "x");
    assert_eq!(bound, value);
    assert_eq!(binding.location(), SrcSpan::from(0, 4));

    assert!(parsed.warnings.is_empty());

    Ok(())
}

#[test]
fn test_binding_without_spaces() -> Result<(), ParseError> {
    let parsed = parse_module("answer:42")?;

    assert_eq!(
        parsed.environment.lookup(ScopeId::ROOT, "answer").map(Node::as_integer),
        Some(Ok(42))
    );

    Ok(())
}

#[test]
fn test_binding_to_group_and_chain() -> Result<(), ParseError> {
    let parsed = parse_module("pair: (1 2)\nx: y: 3")?;
    let env = &parsed.environment;

    let pair = env.lookup(ScopeId::ROOT, "pair").expect("pair is bound");
    assert_eq!(integers(pair.children()), vec![1, 2]);

    assert_eq!(env.lookup(ScopeId::ROOT, "y").map(Node::as_integer), Some(Ok(3)));

    let x = env.lookup(ScopeId::ROOT, "x").expect("x is bound");
    assert_eq!(x.kind(), NodeKind::Binding);
    assert_eq!(x.to_string(), "y: 3");

    let names = env.root().bindings().iter()
        .map(|binding| binding.name.as_str())
        .collect::<Vec<&str>>();
    assert_eq!(names, vec!["pair", "y", "x"]);

    Ok(())
}

#[test]
fn test_groups_open_scopes() -> Result<(), ParseError> {
    let parsed = parse_module("top: 1 (inner: 2 (deep: 3))")?;
    let env = &parsed.environment;

    let outer = &parsed.program.children()[1];
    let outer_scope = outer.scope().expect("group scope");
    let deep_scope = outer.children()[1].scope().expect("group scope");

    assert_eq!(env.parent(outer_scope), Some(ScopeId::ROOT));
    assert_eq!(env.parent(deep_scope), Some(outer_scope));

    assert_eq!(env.lookup(deep_scope, "top").map(Node::as_integer), Some(Ok(1)));
    assert_eq!(env.lookup(deep_scope, "inner").map(Node::as_integer), Some(Ok(2)));
    assert_eq!(env.lookup(outer_scope, "deep"), None);
    assert_eq!(env.lookup(ScopeId::ROOT, "inner"), None);
    assert_eq!(env.len(), 3);

    Ok(())
}

#[test]
fn test_shadowing_in_same_frame() -> Result<(), ParseError> {
    let parsed = parse_module("x: 1 x: 2")?;

    assert_eq!(parsed.environment.lookup(ScopeId::ROOT, "x").map(Node::as_integer), Some(Ok(2)));
    assert_eq!(parsed.warnings, vec![ParseWarning::ShadowedBinding {
        name: "x".into(),
        location: SrcSpan::from(5, 9),
        previous: SrcSpan::from(0, 4),
    }]);

    let parsed = parse_module("x: 1 (x: 2)")?;
    assert!(parsed.warnings.is_empty());

    Ok(())
}

#[test]
fn test_binding_errors() {
    let err = fails_with("x:");
    assert_eq!(err.error, ParseErrorType::MissingBindingValue { name: "x".into() });
    assert_eq!(err.span, SrcSpan::from(0, 2));

    let err = fails_with("(x: )");
    assert_eq!(err.error, ParseErrorType::MissingBindingValue { name: "x".into() });

    let err = fails_with(": 5");
    assert_eq!(err.error, ParseErrorType::MissingBindingName);
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_unrecognized_token() {
    let err = fails_with("1 $$ 2");

    assert_eq!(err.error, ParseErrorType::UnexpectedToken { token: "$$".into() });
    assert_eq!(err.token(), Some("$$"));
    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert_eq!(err.span, SrcSpan::from(2, 4));

    let err = fails_with("12abc");
    assert_eq!(err.token(), Some("12abc"));
}

#[test]
fn test_integer_overflow() {
    let err = fails_with("99999999999999999999");

    assert_eq!(err.error, ParseErrorType::IntegerOverflow { token: "99999999999999999999".into() });
    assert_eq!(err.kind(), ErrorKind::Syntax);
}

#[test]
fn test_not_implemented_constructs() {
    let err = fails_with("foo");
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
    assert_eq!(err.token(), Some("foo"));

    let err = fails_with("(1, 2)");
    assert_eq!(err.kind(), ErrorKind::NotImplemented);
    assert_eq!(err.token(), Some(","));
}

#[test]
fn test_empty_source() {
    let err = fails_with("");

    assert_eq!(err.kind(), ErrorKind::Argument);
    assert!(matches!(
        err.error,
        ParseErrorType::LexError { error } if error.error == LexicalErrorType::EmptySource
    ));
}

#[test]
fn test_whitespace_only_source() -> Result<(), ParseError> {
    let parsed = parse_module(" \r\n ")?;

    assert_eq!(parsed.program.children().len(), 0);
    assert!(parsed.environment.is_empty());

    Ok(())
}

#[test]
fn test_nesting_limit() {
    let config = ParserConfig { max_depth: 3 };

    assert!(parse_module_with_config("(((1)))", config).is_ok());

    let err = parse_module_with_config("((((1))))", config).unwrap_err();
    assert_eq!(err.error, ParseErrorType::NestingTooDeep { limit: 3 });
    assert_eq!(err.span, SrcSpan::from(3, 4));

    let err = parse_module_with_config("a: b: c: d: 1", config).unwrap_err();
    assert_eq!(err.error, ParseErrorType::NestingTooDeep { limit: 3 });
}

#[test]
fn test_deep_input_does_not_overflow() {
    let input = format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000));

    let err = parse_module(&input).unwrap_err();
    assert!(matches!(err.error, ParseErrorType::NestingTooDeep { .. }));
}

#[test]
fn test_parser_states() -> Result<(), ParseError> {
    let mut parser = Parser::new(TokenStream::tokenize("(1 x: 2)")?, ParserConfig::default());
    assert_eq!(parser.state(), ParserState::AwaitingExpr);
    assert!(parser.parse().is_ok());
    assert_eq!(parser.state(), ParserState::Done);

    let mut parser = Parser::new(TokenStream::tokenize("(1")?, ParserConfig::default());
    assert!(parser.parse().is_err());
    assert_eq!(parser.state(), ParserState::Failed);

    Ok(())
}

#[test]
fn test_payload_under_wrong_kind() -> Result<(), ParseError> {
    let parsed = parse_module("(1)")?;
    let group = &parsed.program.children()[0];

    assert_eq!(
        group.as_integer(),
        Err(Error::Type { expected: NodeKind::Integer, found: NodeKind::Group })
    );
    assert!(group.as_binding().is_err());
    assert!(group.children()[0].scope().is_err());
    assert!(Node::None.as_integer().is_err());
    assert!(Node::default().is_none());
    assert_eq!(Node::None.children().len(), 0);

    Ok(())
}
