use std::io::Write;

use sprout_core::lexer::prelude::Lexer;

const PROMPT: &str = ">> ";

pub fn start() -> std::io::Result<()> {
	let stdin = std::io::stdin();

	loop {
		let mut input = String::from("");

		print!("{}", PROMPT);
		std::io::stdout().flush()?;
		if stdin.read_line(&mut input)? == 0 {
			return Ok(());
		}

		if let Some('\n') = input.chars().next_back() {
			input.pop();
		}
		if let Some('\r') = input.chars().next_back() {
			input.pop();
		}

		match input.as_str() {
			"" => {},
			".exit" => return Ok(()),
			_ => {
				let lexer = match Lexer::new(&input) {
					Ok(lexer) => lexer,
					Err(err) => {
						println!("Lexical Error: {}", err.details().0);
						continue;
					}
				};

				for (idx, res) in lexer.enumerate() {
					match res {
						Ok(token) if token.is_eof() => break,
						Ok(token) => {
							println!("Token {idx}: {token} ({}, {})", token.kind(), token.span());
						},
						Err(err) => {
							let (message, extra) = err.details();
							println!("[at {}] Lexical Error: {}", err.location.start, message);
							if !extra.is_empty() {
								println!("{}", extra.join("\n"));
							}
							break;
						}
					}
				}
			}
		}
	}
}
