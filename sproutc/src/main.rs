mod cli;
mod rlpl;
mod rppl;

use std::{path::{Path, PathBuf}, process::ExitCode, rc::Rc};

use clap::{ArgAction, Parser};
use cli::{print_lexing, print_parsed, print_parsing};
use sprout_core::{
    driver::{parse_source, tokenize_source},
    parser::prelude::{ParserConfig, DEFAULT_MAX_DEPTH},
    utils::prelude::{Error, Warning, WarningEmitterIO}
};
use tracing::debug;
use utf8_chars::BufReadCharsExt;

#[derive(Parser)]
#[command(name = "sproutc", about = "Lexer and parser front end for sprout programs")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Lexes and parses a source file
    Parse {
        /// Path of source file
        path: PathBuf,
        /// Do not print parsed source code
        #[arg(short, long, default_value_t = false)]
        no_output: bool,
        /// Print ast instead of parsed source code
        #[arg(long, default_value_t = false)]
        print_ast: bool,
        /// Print the bindings collected in every scope
        #[arg(short = 'e', long, default_value_t = false)]
        print_env: bool,
        /// Deepest allowed nesting of groups and binding values
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Prints the token stream of a source file
    Tokens {
        /// Path of source file
        path: PathBuf,
    },
    /// Runs Read Lex Print Loop
    Rlpl,
    /// Runs Read Parse Print Loop
    Rppl {
        /// Deepest allowed nesting of groups and binding values
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    cli::init_tracing(cli.verbose);

    if let Err(err) = ctrlc::set_handler(|| std::process::exit(130)) {
        debug!(%err, "could not install interrupt handler");
    }

    let result = match cli.command {
        Command::Parse { path, no_output, print_ast, print_env, max_depth } => {
            print_parsing(&path.display().to_string());
            let start = std::time::Instant::now();

            let config = ParserConfig { max_depth };
            let parsed = read_source(&path)
                .and_then(|src| parse_source(path.clone(), &src, config, Rc::new(ConsoleWarningEmitter)));

            parsed.map(|parsed| {
                if !no_output {
                    if print_ast {
                        println!("{:#?}", parsed.program);
                    } else {
                        println!("{}", parsed.program);
                    }
                }

                if print_env {
                    print!("{}", parsed.environment);
                }

                print_parsed(std::time::Instant::now() - start);
            })
        },
        Command::Tokens { path } => {
            print_lexing(&path.display().to_string());

            read_source(&path).and_then(|src| {
                let stream = tokenize_source(path.clone(), &src)?;
                print!("{stream}");

                Ok(())
            })
        },
        Command::Rlpl => rlpl::start().map_err(|err| Error::StdIo { err: err.kind() }),
        Command::Rppl { max_depth } => {
            rppl::start(ParserConfig { max_depth }).map_err(|err| Error::StdIo { err: err.kind() })
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let buf_writer = cli::stderr_buffer_writer();
            let mut buf = buf_writer.buffer();

            err.pretty(&mut buf);
            buf_writer
                .print(&buf)
                .expect("Writing error to stderr");

            ExitCode::FAILURE
        }
    }
}

/// Reads a whole file as UTF-8 text.
fn read_source(path: &Path) -> Result<String, Error> {
    let file = std::fs::File::open(path).map_err(|err| Error::StdIo { err: err.kind() })?;

    let file_size = file.metadata()
        .map_err(|err| Error::StdIo { err: err.kind() })?.len() as usize;

    let mut src = String::with_capacity(file_size);
    let mut reader = std::io::BufReader::new(file);

    for ch in reader.chars() {
        src.push(ch.map_err(|err| Error::StdIo { err: err.kind() })?);
    }

    debug!(path = %path.display(), len = src.len(), "read source");

    Ok(src)
}

#[derive(Debug, Clone, Copy)]
pub struct ConsoleWarningEmitter;

impl WarningEmitterIO for ConsoleWarningEmitter {
    fn emit_warning(&self, warning: Warning) {
        let buffer_writer = crate::cli::stderr_buffer_writer();
        let mut buffer = buffer_writer.buffer();
        warning.pretty(&mut buffer);
        buffer_writer
            .print(&buffer)
            .expect("Writing warning to stderr");
    }
}
