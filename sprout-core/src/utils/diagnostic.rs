use std::io::Write;
use std::path::PathBuf;

pub use codespan_reporting::diagnostic::{LabelStyle, Severity};
use codespan_reporting::{diagnostic::Label as CodespanLabel, files::SimpleFile, term};
use termcolor::{Color, ColorSpec, WriteColor};

use super::src_span::SrcSpan;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Warning,
    Error,
}

impl Level {
    fn severity(&self) -> Severity {
        match self {
            Level::Error => Severity::Error,
            Level::Warning => Severity::Warning,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Label {
    pub text: Option<String>,
    pub span: SrcSpan
}

impl Label {
    pub fn to_codespan_label(&self, label_style: LabelStyle) -> CodespanLabel<()> {
        let label = CodespanLabel::new(
            label_style,
            (),
            (self.span.start as usize)..(self.span.end as usize),
        );

        match &self.text {
            None => label,
            Some(text) => label.with_message(text.clone()),
        }
    }
}

pub struct Location<'a> {
    pub src: &'a str,
    pub path: PathBuf,
    pub label: Label,
    pub extra_labels: Vec<Label>,
}

/// A renderable report: a titled source snippet when a location is known,
/// a colored title line otherwise.
pub struct Diagnostic<'a> {
    pub title: String,
    pub text: String,
    pub level: Level,
    pub location: Option<Location<'a>>
}

impl<'a> Diagnostic<'a> {
    pub fn write<W: WriteColor>(&self, buf: &mut W) {
        match &self.location {
            Some(location) => self.write_span(location, buf),
            None => self.write_title(buf),
        }

        if !self.text.is_empty() {
            writeln!(buf, "{}", self.text).expect("text write")
        }
    }

    fn write_span<W: WriteColor>(&self, location: &Location, buf: &mut W) {
        let file = SimpleFile::new(location.path.display().to_string(), location.src);

        let labels = std::iter::once(location.label.to_codespan_label(LabelStyle::Primary))
            .chain(location.extra_labels.iter()
                .map(|label| label.to_codespan_label(LabelStyle::Secondary)))
            .collect();

        let diagnostic = codespan_reporting::diagnostic::Diagnostic::new(self.level.severity())
            .with_message(&self.title)
            .with_labels(labels);

        let config = term::Config::default();
        term::emit(buf, &config, &file, &diagnostic)
            .expect("write_diagnostic");
    }

    fn write_title<W: WriteColor>(&self, buf: &mut W) {
        let (kind, colour) = match self.level {
            Level::Error => ("error", Color::Red),
            Level::Warning => ("warning", Color::Yellow),
        };

        buf.set_color(ColorSpec::new().set_bold(true).set_fg(Some(colour)))
            .expect("write_title_color1");
        write!(buf, "{kind}").expect("write_title_kind");

        buf.set_color(ColorSpec::new().set_bold(true))
            .expect("write_title_color2");
        write!(buf, ": {}\n\n", self.title).expect("write_title_title");

        buf.set_color(&ColorSpec::new())
            .expect("write_title_reset");
    }
}
