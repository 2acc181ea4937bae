use std::{path::PathBuf, rc::Rc};

use crate::{
    environment::prelude::ScopeId,
    parser::prelude::{NodeKind, ParseWarning, ParserConfig},
    utils::prelude::{Error, ErrorKind, NullWarningEmitterIO, VectorWarningEmitterIO, Warning}
};

use super::{parse_source, tokenize_source};

#[test]
fn test_parse_source_emits_warnings() -> Result<(), Error> {
    let warnings = VectorWarningEmitterIO::new();
    let src = "x: 1\nx: 2\n";

    let parsed = parse_source(
        PathBuf::from("shadow.sp"),
        src,
        ParserConfig::default(),
        Rc::new(warnings.clone())
    )?;

    assert_eq!(parsed.environment.lookup(ScopeId::ROOT, "x").map(|node| node.kind()), Some(NodeKind::Integer));

    let emitted = warnings.take();
    assert_eq!(emitted.len(), 1);

    let Warning::Parse { path, warning, .. } = &emitted[0];
    assert_eq!(path, &PathBuf::from("shadow.sp"));
    assert!(matches!(warning, ParseWarning::ShadowedBinding { name, .. } if name == "x"));

    let pretty = emitted[0].pretty_string();
    assert!(pretty.contains("Shadowed binding"), "{pretty}");
    assert!(pretty.contains("First bound here"), "{pretty}");

    Ok(())
}

#[test]
fn test_syntax_error_is_wrapped() {
    let err = parse_source(
        PathBuf::from("broken.sp"),
        "(1 2",
        ParserConfig::default(),
        Rc::new(NullWarningEmitterIO)
    ).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Syntax);
    assert!(matches!(&err, Error::Parse { path, .. } if path == &PathBuf::from("broken.sp")));

    let pretty = err.pretty_string();
    assert!(pretty.contains("Invalid syntax"), "{pretty}");
    assert!(pretty.contains("never closed"), "{pretty}");
    assert!(pretty.contains("broken.sp"), "{pretty}");
}

#[test]
fn test_not_implemented_is_classified() {
    let err = parse_source(
        PathBuf::from("todo.sp"),
        "name",
        ParserConfig::default(),
        Rc::new(NullWarningEmitterIO)
    ).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::NotImplemented);
    assert_eq!(err.kind().classification(), Some("TODO (not implemented)"));
    assert_eq!(err.message().as_deref(), Some("Not supported yet"));
}

#[test]
fn test_tokenize_source() -> Result<(), Error> {
    let stream = tokenize_source(PathBuf::from("tokens.sp"), "(a: 1)")?;
    assert_eq!(stream.len(), 6);

    let err = tokenize_source(PathBuf::from("empty.sp"), "").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Argument);
    assert!(err.pretty_string().contains("Invalid arguments"));

    Ok(())
}

#[test]
fn test_generic_and_type_errors() {
    let err = Error::Generic { message: "something broke".into() };
    assert_eq!(err.kind(), ErrorKind::Generic);
    assert_eq!(err.kind().classification(), None);
    assert!(err.pretty_string().contains("something broke"));

    let err = Error::Type { expected: NodeKind::Integer, found: NodeKind::Program };
    assert_eq!(err.kind(), ErrorKind::Type);
    assert!(err.pretty_string().contains("Mismatched types"));
    assert_eq!(err.to_string(), "expected Integer node, found Program node");
}
