use std::fmt::Display;

use tracing::trace;

use crate::parser::prelude::Node;
use crate::utils::prelude::{Error, SrcSpan};

/// Handle to a frame inside an [`Environment`]. It does not own the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(usize);

impl ScopeId {
    pub const ROOT: ScopeId = ScopeId(0);

    pub fn index(&self) -> usize {
        self.0
    }
}

impl Display for ScopeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub name: String,
    pub value: Node,
    pub location: SrcSpan,
}

/// One lexical scope: its own bindings plus a handle to the enclosing scope.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Frame {
    parent: Option<ScopeId>,
    bindings: Vec<Binding>,
}

impl Frame {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Most recently inserted binding for `name` in this frame only.
    pub fn lookup_local(&self, name: &str) -> Option<&Binding> {
        self.bindings.iter().rev().find(|binding| binding.name == name)
    }
}

/// Every scope frame opened while building a program.
///
/// Frames are addressed by [`ScopeId`]; the frame at [`ScopeId::ROOT`] is the
/// top level and always exists. Dropping the environment drops all frames.
#[derive(Debug, Clone, PartialEq)]
pub struct Environment {
    frames: Vec<Frame>,
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment {
    pub fn new() -> Self {
        Self {
            frames: vec![Frame::default()]
        }
    }

    pub fn root(&self) -> &Frame {
        &self.frames[ScopeId::ROOT.0]
    }

    pub fn frame(&self, scope: ScopeId) -> Option<&Frame> {
        self.frames.get(scope.0)
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.frame(scope).and_then(Frame::parent)
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.iter().all(Frame::is_empty)
    }

    pub fn scopes(&self) -> impl Iterator<Item = (ScopeId, &Frame)> {
        self.frames.iter().enumerate().map(|(idx, frame)| (ScopeId(idx), frame))
    }

    /// Opens a child scope of `parent`.
    pub fn push_scope(&mut self, parent: ScopeId) -> Result<ScopeId, Error> {
        self.frame(parent).ok_or(Error::UnknownScope { scope: parent })?;

        let scope = ScopeId(self.frames.len());
        self.frames.push(Frame {
            parent: Some(parent),
            bindings: vec![],
        });

        trace!(%scope, %parent, "opened scope");

        Ok(scope)
    }

    /// Binds `name` in `scope`. Returns where `name` was previously bound in
    /// that same frame, if it was.
    pub fn bind(
        &mut self,
        scope: ScopeId,
        name: String,
        value: Node,
        location: SrcSpan
    ) -> Result<Option<SrcSpan>, Error> {
        let frame = self.frames.get_mut(scope.0).ok_or(Error::UnknownScope { scope })?;

        let previous = frame.lookup_local(&name).map(|binding| binding.location);

        trace!(%scope, name = name.as_str(), "bound name");
        frame.bindings.push(Binding { name, value, location });

        Ok(previous)
    }

    /// Walks from `scope` outward and returns the binding that `name`
    /// resolves to, with the scope it lives in.
    pub fn lookup_binding(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, &Binding)> {
        let mut current = Some(scope);

        while let Some(scope) = current {
            let frame = self.frame(scope)?;

            if let Some(binding) = frame.lookup_local(name) {
                return Some((scope, binding));
            }

            current = frame.parent;
        }

        None
    }

    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<&Node> {
        self.lookup_binding(scope, name).map(|(_, binding)| &binding.value)
    }
}

impl Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (scope, frame) in self.scopes() {
            match frame.parent {
                Some(parent) => writeln!(f, "scope {scope} (parent {parent}):")?,
                None => writeln!(f, "scope {scope}:")?,
            }

            for binding in frame.bindings.iter() {
                writeln!(f, "    {} = {}", binding.name, binding.value)?;
            }
        }

        Ok(())
    }
}
