use std::fmt::Display;

use crate::utils::prelude::SrcSpan;

/// Characters skipped before a token starts.
pub const WHITESPACE: &[char] = &[' ', '\r', '\n'];

/// Characters that end a token without being part of it.
pub const DELIMITERS: &[char] = &[' ', '\r', '\n', ',', '(', ')', ':'];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // [+|-]<цифра>{<цифра>}
    Integer,
    // (<буква>|_){<буква>|<цифра>|_|-|?|!}
    Ident,
    LParen, // (
    RParen, // )
    Colon, // :
    Comma, // ,
    Invalid,
    Eof,
}

impl TokenKind {
    pub fn classify(text: &str) -> Self {
        match text {
            "" => Self::Eof,
            "(" => Self::LParen,
            ")" => Self::RParen,
            ":" => Self::Colon,
            "," => Self::Comma,
            _ if is_integer_literal(text) => Self::Integer,
            _ if is_identifier(text) => Self::Ident,
            _ => Self::Invalid,
        }
    }

    pub fn is_delimiter(&self) -> bool {
        matches!(self, Self::LParen | Self::RParen | Self::Colon | Self::Comma)
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            Self::Integer => "an integer",
            Self::Ident => "an identifier",
            Self::LParen => "`(`",
            Self::RParen => "`)`",
            Self::Colon => "`:`",
            Self::Comma => "`,`",
            Self::Invalid => "an invalid token",
            Self::Eof => "end of input",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

pub fn is_integer_literal(text: &str) -> bool {
    let digits = text.strip_prefix(|c: char| c == '+' || c == '-').unwrap_or(text);

    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

pub fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();

    match chars.next() {
        Some(ch) if ch.is_ascii_alphabetic() || ch == '_' => {
            chars.all(|ch| ch.is_ascii_alphanumeric() || matches!(ch, '_' | '-' | '?' | '!'))
        },
        _ => false
    }
}

/// A view into the source buffer. Tokens never own their characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'s> {
    pub start: u32,
    pub end: u32,
    pub text: &'s str,
}

impl<'s> Token<'s> {
    pub fn kind(&self) -> TokenKind {
        TokenKind::classify(self.text)
    }

    /// The zero-length token only ever marks the end of input.
    pub fn is_eof(&self) -> bool {
        self.start == self.end
    }

    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.is_eof()
    }

    pub fn span(&self) -> SrcSpan {
        SrcSpan::from(self.start, self.end)
    }
}

impl PartialEq<str> for Token<'_> {
    fn eq(&self, other: &str) -> bool {
        self.text == other
    }
}

impl PartialEq<&str> for Token<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.text == *other
    }
}

impl Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.text)
    }
}
