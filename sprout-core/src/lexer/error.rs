use crate::utils::prelude::{ErrorKind, SrcSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    EmptySource,
    SourceTooLarge { len: usize },
    PositionOutOfBounds { position: u32, len: u32 },
    NotCharBoundary { position: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan
}

impl LexicalError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Argument
    }

    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::EmptySource => {
                ("Cannot lex empty source", vec![])
            },
            LexicalErrorType::SourceTooLarge { len } => {
                ("Source is too large to lex", vec![
                    format!("The source is {len} bytes long, at most {} are supported.", u32::MAX)
                ])
            },
            LexicalErrorType::PositionOutOfBounds { position, len } => {
                ("Lexer position is past the end of the source", vec![
                    format!("Position {position} was requested, the source is {len} bytes long.")
                ])
            },
            LexicalErrorType::NotCharBoundary { position } => {
                ("Lexer position splits a character", vec![
                    format!("Position {position} is not on a UTF-8 character boundary.")
                ])
            }
        }
    }
}
