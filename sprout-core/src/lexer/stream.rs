use std::fmt::Display;

use tracing::debug;

use super::error::LexicalError;
use super::lexer::Lexer;
use super::token::Token;

/// Every token of a source buffer, in source order.
///
/// The last element is always the zero-length end-of-input token.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream<'s> {
    source: &'s str,
    tokens: Vec<Token<'s>>,
}

impl<'s> TokenStream<'s> {
    pub fn tokenize(source: &'s str) -> Result<Self, LexicalError> {
        let lexer = Lexer::new(source)?;
        let mut tokens = vec![];
        let mut position = 0;

        loop {
            let token = lexer.lex(position)?;
            tokens.push(token);

            if token.is_eof() {
                break;
            }

            position = token.end;
        }

        debug!(count = tokens.len(), len = source.len(), "tokenized source");

        Ok(Self { source, tokens })
    }

    pub fn source(&self) -> &'s str {
        self.source
    }

    pub fn tokens(&self) -> &[Token<'s>] {
        &self.tokens
    }

    /// Out of range indices resolve to the end-of-input token.
    pub fn get(&self, idx: usize) -> Token<'s> {
        match self.tokens.get(idx) {
            Some(token) => *token,
            None => self.eof(),
        }
    }

    pub fn eof(&self) -> Token<'s> {
        match self.tokens.last() {
            Some(token) => *token,
            None => {
                let end = self.source.len() as u32;
                Token { start: end, end, text: "" }
            }
        }
    }

    /// Number of tokens, the end-of-input token included.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the source held nothing but whitespace.
    pub fn is_empty(&self) -> bool {
        self.tokens.iter().all(|token| token.is_eof())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Token<'s>> {
        self.tokens.iter()
    }

    /// The skipped text in front of each token.
    pub fn separators(&self) -> Vec<&'s str> {
        let mut previous = 0;

        self.tokens.iter()
            .map(|token| {
                let separator = &self.source[previous as usize..token.start as usize];
                previous = token.end;
                separator
            })
            .collect()
    }

    /// Glues separators and token texts back together.
    pub fn reconstruct(&self) -> String {
        let mut out = String::with_capacity(self.source.len());

        for (separator, token) in self.separators().into_iter().zip(self.tokens.iter()) {
            out.push_str(separator);
            out.push_str(token.text);
        }

        out
    }
}

impl<'a, 's> IntoIterator for &'a TokenStream<'s> {
    type Item = &'a Token<'s>;
    type IntoIter = std::slice::Iter<'a, Token<'s>>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}

impl Display for TokenStream<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (idx, token) in self.tokens.iter().filter(|token| !token.is_eof()).enumerate() {
            writeln!(f, "Token {idx}: {token}")?;
        }

        Ok(())
    }
}
