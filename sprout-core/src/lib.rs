pub mod lexer;
pub mod parser;
pub mod environment;
pub mod driver;
pub mod utils;
