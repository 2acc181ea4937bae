pub mod error;
pub mod token;
pub mod lexer;
pub mod stream;

pub mod prelude {
	pub use super::{
		error::*,
		token::*,
		lexer::*,
		stream::*
	};
}

#[cfg(test)]
mod property_tests;
