use std::fmt::Display;
use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    environment::prelude::ScopeId,
    lexer::prelude::LexicalError,
    parser::prelude::{NodeKind, ParseError, ParseErrorType},
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

/// Classification shared by every failure the front end reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Invalid or missing input to a core operation.
    Argument,
    /// A node payload read under the wrong kind.
    Type,
    /// The token stream does not match the grammar.
    Syntax,
    /// A recognized construct the grammar does not support yet.
    NotImplemented,
    Generic,
}

impl ErrorKind {
    /// One-line description; generic errors only have their message.
    pub fn classification(&self) -> Option<&'static str> {
        match self {
            ErrorKind::Argument => Some("Invalid arguments"),
            ErrorKind::Type => Some("Mismatched types"),
            ErrorKind::Syntax => Some("Invalid syntax"),
            ErrorKind::NotImplemented => Some("TODO (not implemented)"),
            ErrorKind::Generic => None,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.classification().unwrap_or("Error"))
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to lex source code")]
    Lex {
        path: PathBuf,
        src: String,
        error: LexicalError
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("expected {expected} node, found {found} node")]
    Type {
        expected: NodeKind,
        found: NodeKind
    },
    #[error("scope {scope} does not exist in this environment")]
    UnknownScope {
        scope: ScopeId
    },
    #[error("IO operation failed")]
    StdIo {
        err: std::io::ErrorKind
    },
    #[error("{message}")]
    Generic {
        message: String
    }
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex { error, .. } => error.kind(),
            Error::Parse { error, .. } => error.kind(),
            Error::Type { .. } => ErrorKind::Type,
            Error::UnknownScope { .. } => ErrorKind::Argument,
            Error::StdIo { .. } | Error::Generic { .. } => ErrorKind::Generic,
        }
    }

    /// Detail text printed after the classification line.
    pub fn message(&self) -> Option<String> {
        match self {
            Error::Lex { error, .. } => Some(error.details().0.to_string()),
            Error::Parse { error, .. } => Some(error.details().0.to_string()),
            Error::Type { .. } | Error::UnknownScope { .. } | Error::Generic { .. } => {
                Some(self.to_string())
            },
            Error::StdIo { err } => Some(format!("{err}")),
        }
    }

    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        let title = self.kind()
            .classification()
            .map(str::to_string)
            .or_else(|| self.message())
            .unwrap_or_default();

        match self {
            Error::Lex { path, src, error } => {
                let (label, extra) = error.details();

                vec![Diagnostic {
                    title,
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src: src.as_str(),
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: clamp(error.location, src),
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::Parse { path, src, error } => {
                let (label, extra) = error.details();

                let adjusted_location = match error.error {
                    ParseErrorType::UnexpectedEof => SrcSpan {
                        start: src.len() as u32,
                        end: src.len() as u32,
                    },
                    _ => clamp(error.span, src)
                };

                vec![Diagnostic {
                    title,
                    text: extra.join("\n"),
                    level: Level::Error,
                    location: Some(Location {
                        src: src.as_str(),
                        path: path.clone(),
                        label: Label {
                            text: Some(label.to_string()),
                            span: adjusted_location,
                        },
                        extra_labels: vec![],
                    }),
                }]
            },
            Error::Type { .. } | Error::UnknownScope { .. } => {
                vec![Diagnostic {
                    title,
                    text: self.to_string(),
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::StdIo { err } => {
                vec![Diagnostic {
                    title: "Standard IO error".into(),
                    text: format!("{err}"),
                    level: Level::Error,
                    location: None,
                }]
            },
            Error::Generic { .. } => {
                vec![Diagnostic {
                    title,
                    text: "".into(),
                    level: Level::Error,
                    location: None,
                }]
            }
        }
    }
}

/// Keeps a span inside the source and on character boundaries.
fn clamp(span: SrcSpan, src: &str) -> SrcSpan {
    let fit = |position: u32| {
        let mut position = (position as usize).min(src.len());
        while !src.is_char_boundary(position) {
            position -= 1;
        }
        position as u32
    };

    SrcSpan {
        start: fit(span.start),
        end: fit(span.end),
    }
}
