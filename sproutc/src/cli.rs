use std::{
    io::{IsTerminal, Write},
    time::Duration,
};
use termcolor::{BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};
use tracing_subscriber::EnvFilter;

pub(crate) fn print_parsing(text: &str) {
    print_colourful_prefix("Parsing", Color::Magenta, text)
}

pub(crate) fn print_parsed(duration: Duration) {
    print_colourful_prefix("Parsed", Color::Green, &format!("in {}", seconds(duration)))
}

pub(crate) fn print_lexing(text: &str) {
    print_colourful_prefix("Lexing", Color::Cyan, text)
}

pub fn seconds(duration: Duration) -> String {
    format!("{:.2}s", duration.as_millis() as f32 / 1000.)
}

pub fn print_colourful_prefix(prefix: &str, color: Color, text: &str) {
    let buffer_writer = stderr_buffer_writer();
    let mut buffer = buffer_writer.buffer();
    buffer
        .set_color(
            ColorSpec::new()
                .set_intense(true)
                .set_bold(true)
                .set_fg(Some(color)),
        )
        .expect("print_colourful_prefix");
    write!(buffer, "{prefix: >11}").expect("print_colourful_prefix");
    buffer
        .set_color(&ColorSpec::new())
        .expect("print_colourful_prefix");
    writeln!(buffer, " {text}").expect("print_colourful_prefix");
    buffer_writer.print(&buffer).expect("print_colourful_prefix");
}

pub fn stderr_buffer_writer() -> BufferWriter {
    BufferWriter::stderr(color_choice())
}

/// Logs go to stderr; `RUST_LOG` wins over the verbosity flag.
pub(crate) fn init_tracing(verbose: u8) {
    let directive = match verbose {
        0 => "sproutc=warn,sprout_core=warn",
        1 => "sproutc=debug,sprout_core=debug",
        _ => "sproutc=trace,sprout_core=trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive)),
        )
        .with_ansi(color_choice() != ColorChoice::Never)
        .with_writer(std::io::stderr)
        .init();
}

fn colour_forced() -> bool {
    if let Ok(force) = std::env::var("FORCE_COLOR") {
        !force.is_empty()
    } else {
        false
    }
}

fn color_choice() -> ColorChoice {
    if colour_forced() {
        ColorChoice::Always
    } else if std::io::stderr().is_terminal() {
        ColorChoice::Auto
    } else {
        ColorChoice::Never
    }
}
