use std::{path::PathBuf, rc::Rc, sync::{atomic::{AtomicUsize, Ordering}, Arc, RwLock}};

use termcolor::Buffer;

use crate::parser::prelude::ParseWarning;
use super::diagnostic::{Diagnostic, Label, Level, Location};

pub trait WarningEmitterIO {
    fn emit_warning(&self, warning: Warning);
}

#[derive(Debug, Clone, Copy)]
pub struct NullWarningEmitterIO;

impl WarningEmitterIO for NullWarningEmitterIO {
    fn emit_warning(&self, _warning: Warning) {}
}

/// Collects warnings in memory, mostly for tests and tooling.
#[derive(Debug, Default, Clone)]
pub struct VectorWarningEmitterIO {
    pub warnings: Arc<RwLock<Vec<Warning>>>
}

impl VectorWarningEmitterIO {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&self) -> Vec<Warning> {
        let mut warnings = self.write_lock();
        std::mem::take(&mut *warnings)
    }

    pub fn len(&self) -> usize {
        self.warnings.read().expect("Vector lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn write_lock(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Warning>> {
        self.warnings.write().expect("Vector lock poisoned")
    }
}

impl WarningEmitterIO for VectorWarningEmitterIO {
    fn emit_warning(&self, warning: Warning) {
        let mut warnings = self.write_lock();

        warnings.push(warning);
    }
}

pub struct WarningEmitter {
    count: Arc<AtomicUsize>,
    emitter: Rc<dyn WarningEmitterIO>
}

impl WarningEmitter {
    pub fn new(emitter: Rc<dyn WarningEmitterIO>) -> Self {
        Self {
            count: Arc::new(AtomicUsize::new(0)),
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(Rc::new(NullWarningEmitterIO))
    }

    pub fn count(&self) -> usize {
        self.count.load(Ordering::Relaxed)
    }

    pub fn emit(&self, warning: Warning) {
        _ = self.count.fetch_add(1, Ordering::Relaxed);
        self.emitter.emit_warning(warning);
    }
}

/// Attaches the source a warning was found in before handing it on.
pub struct SourceWarningEmitter {
    path: PathBuf,
    src: String,
    emitter: WarningEmitter,
}

impl SourceWarningEmitter {
    pub fn new(
        path: PathBuf,
        src: String,
        emitter: WarningEmitter
    ) -> Self {
        Self {
            path,
            src,
            emitter,
        }
    }

    pub fn null() -> Self {
        Self::new(PathBuf::new(), String::new(), WarningEmitter::null())
    }

    pub fn count(&self) -> usize {
        self.emitter.count()
    }

    pub fn emit(&self, warning: ParseWarning) {
        self.emitter.emit(Warning::Parse {
            path: self.path.clone(),
            src: self.src.clone(),
            warning,
        });
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    Parse {
        path: PathBuf,
        src: String,
        warning: ParseWarning
    }
}

impl Warning {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        self.to_diagnostic().write(buf);
        buf.write_all(b"\n")
            .expect("error pretty buffer write space after");
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            Warning::Parse {
                path,
                src,
                warning
            } => match warning {
                ParseWarning::ShadowedBinding { name, location, previous } => {
                    Diagnostic {
                        title: "Shadowed binding".into(),
                        text: format!("`{name}` is already bound in this scope, lookups will see the newer value."),
                        level: Level::Warning,
                        location: Some(Location {
                            src: src.as_str(),
                            path: path.to_path_buf(),
                            label: Label {
                                text: Some("Bound again here".into()),
                                span: *location,
                            },
                            extra_labels: vec![Label {
                                text: Some("First bound here".into()),
                                span: *previous,
                            }]
                        }),
                    }
                }
            }
        }
    }
}
