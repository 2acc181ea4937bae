use super::error::{LexicalError, LexicalErrorType};
use super::token::{Token, DELIMITERS, WHITESPACE};
use std::fmt::Display;
use tracing::trace;
use crate::utils::prelude::SrcSpan;

pub type LexResult<'s> = std::result::Result<Token<'s>, LexicalError>;

/// Splits a borrowed source buffer into tokens.
///
/// [`Lexer::lex`] keeps no state between calls: the caller threads the
/// position through, starting the next call at the previous token's `end`.
/// Iterating a `Lexer` does exactly that and stops after the end-of-input
/// token or the first error.
#[derive(Debug, Clone)]
pub struct Lexer<'s> {
	source: &'s str,
	position: u32,
	finished: bool,
}

impl<'s> Display for Lexer<'s> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tposition: {},\n\tlen: {}, finished: {}\n}}",
			self.position, self.source.len(), self.finished
		)
	}
}

impl<'s> Lexer<'s> {
	pub fn new(source: &'s str) -> Result<Self, LexicalError> {
		if source.is_empty() {
			return Err(LexicalError {
				error: LexicalErrorType::EmptySource,
				location: SrcSpan::from(0, 0)
			});
		}

		if u32::try_from(source.len()).is_err() {
			return Err(LexicalError {
				error: LexicalErrorType::SourceTooLarge { len: source.len() },
				location: SrcSpan::from(0, 0)
			});
		}

		Ok(Self {
			source,
			position: 0,
			finished: false,
		})
	}

	pub fn source(&self) -> &'s str {
		self.source
	}

	pub fn lex(&self, position: u32) -> LexResult<'s> {
		let len = self.source.len() as u32;

		if position > len {
			return Err(LexicalError {
				error: LexicalErrorType::PositionOutOfBounds { position, len },
				location: SrcSpan::from(len, len)
			});
		}

		if !self.source.is_char_boundary(position as usize) {
			return Err(LexicalError {
				error: LexicalErrorType::NotCharBoundary { position },
				location: SrcSpan::from(position, position)
			});
		}

		let rest = &self.source[position as usize..];
		let trimmed = rest.trim_start_matches(WHITESPACE);
		let start = position + (rest.len() - trimmed.len()) as u32;

		let width = match trimmed.chars().next() {
			None => 0,
			// a token made only of a delimiter would be empty, take the delimiter itself
			Some(ch) if DELIMITERS.contains(&ch) => ch.len_utf8(),
			Some(_) => trimmed.find(DELIMITERS).unwrap_or(trimmed.len()),
		};

		let end = start + width as u32;
		let token = Token {
			start,
			end,
			text: &trimmed[..width],
		};

		trace!(start, end, text = token.text, "lexed token");

		Ok(token)
	}
}

impl<'s> Iterator for Lexer<'s> {
	type Item = LexResult<'s>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.finished {
			return None;
		}

		let token = self.lex(self.position);

		match &token {
			Ok(tok) if !tok.is_eof() => self.position = tok.end,
			_ => self.finished = true,
		}

		Some(token)
	}
}
