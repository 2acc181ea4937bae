use std::io::Write;

use sprout_core::parser::prelude::{parse_module_with_config, ParserConfig};

const PROMPT: &str = ">> ";

pub fn start(config: ParserConfig) -> std::io::Result<()> {
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
				match parse_module_with_config(&input, config) {
					Ok(parsed) => {
						println!("{}", parsed.program);
						if !parsed.environment.is_empty() {
							print!("{}", parsed.environment);
						}
					},
					Err(err) => {
						let (message, messages) = err.details();
						let classification = err.kind().classification().unwrap_or("Error");

						println!("{classification}: {message}.");
						if !messages.is_empty() {
							println!("\t{}", messages.join(";\n\t"));
						}
					}
				}
			}
		}
	}
}
