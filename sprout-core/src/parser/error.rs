use crate::{lexer::prelude::LexicalError, utils::prelude::{ErrorKind, SrcSpan}};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    UnexpectedToken { token: String },
    UnmatchedCloseParen,
    UnclosedGroup,
    UnexpectedEof,
    MissingBindingName,
    MissingBindingValue { name: String },
    IntegerOverflow { token: String },
    NestingTooDeep { limit: usize },
    NotImplemented {
        construct: &'static str,
        token: String,
    },
    LexError { error: LexicalError },
    Internal { message: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn kind(&self) -> ErrorKind {
        match &self.error {
            ParseErrorType::NotImplemented { .. } => ErrorKind::NotImplemented,
            ParseErrorType::LexError { error } => error.kind(),
            ParseErrorType::Internal { .. } => ErrorKind::Generic,
            _ => ErrorKind::Syntax,
        }
    }

    /// Offending token text, when the error is about a single token.
    pub fn token(&self) -> Option<&str> {
        match &self.error {
            ParseErrorType::UnexpectedToken { token }
            | ParseErrorType::IntegerOverflow { token }
            | ParseErrorType::NotImplemented { token, .. } => Some(token),
            _ => None,
        }
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { token } => ("Not expected this", vec![
                format!("Found `{token}`, expected one of: "),
                "- an integer".to_string(),
                "- `(`".to_string(),
                "- a binding like `name: value`".to_string(),
            ]),
            ParseErrorType::UnmatchedCloseParen => ("Unmatched `)`", vec![]),
            ParseErrorType::UnclosedGroup => ("This `(` is never closed", vec![]),
            ParseErrorType::UnexpectedEof => ("Unexpected end of file", vec![]),
            ParseErrorType::MissingBindingName => ("Expected a name before `:`", vec![]),
            ParseErrorType::MissingBindingValue { name } => ("Expected a value after `:`", vec![
                format!("`{name}` is bound to nothing.")
            ]),
            ParseErrorType::IntegerOverflow { token } => ("Integer literal out of range", vec![
                format!("`{token}` does not fit in {} to {}.", i64::MIN, i64::MAX)
            ]),
            ParseErrorType::NestingTooDeep { limit } => ("Groups are nested too deeply", vec![
                format!("At most {limit} nested groups are allowed.")
            ]),
            ParseErrorType::NotImplemented { construct, token } => ("Not supported yet", vec![
                format!("Found `{token}`: {construct} are not supported yet.")
            ]),
            ParseErrorType::LexError { error } => error.details(),
            ParseErrorType::Internal { message } => ("Internal parser error", vec![message.clone()]),
        }
    }
}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        Self {
            span: error.location,
            error: ParseErrorType::LexError { error },
        }
    }
}

/// Problems that do not stop a parse.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseWarning {
    ShadowedBinding {
        name: String,
        location: SrcSpan,
        previous: SrcSpan,
    },
}
