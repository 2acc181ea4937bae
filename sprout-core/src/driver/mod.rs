//! Entry points for callers that have the whole source text in hand.
//!
//! These wrap phase errors together with the path and text they came from,
//! so [`Error::pretty`] can render a labelled snippet, and forward parse
//! warnings to a [`WarningEmitterIO`].

use std::{path::PathBuf, rc::Rc};

use tracing::{debug, info};

use crate::{
    lexer::prelude::TokenStream,
    parser::prelude::{parse_module_with_config, Parsed, ParserConfig},
    utils::prelude::{Error, SourceWarningEmitter, WarningEmitter, WarningEmitterIO}
};

pub fn tokenize_source<'s>(path: PathBuf, src: &'s str) -> Result<TokenStream<'s>, Error> {
    match TokenStream::tokenize(src) {
        Ok(stream) => Ok(stream),
        Err(error) => Err(Error::Lex { path, src: src.to_string(), error })
    }
}

pub fn parse_source(
    path: PathBuf,
    src: &str,
    config: ParserConfig,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Parsed, Error> {
    debug!(path = %path.display(), len = src.len(), "parsing source");

    let parsed = match parse_module_with_config(src, config) {
        Ok(parsed) => parsed,
        Err(error) => {
            return Err(Error::Parse { path, src: src.to_string(), error })
        }
    };

    let emitter = SourceWarningEmitter::new(
        path.clone(),
        src.to_string(),
        WarningEmitter::new(warnings)
    );

    for warning in parsed.warnings.iter() {
        emitter.emit(warning.clone());
    }

    info!(
        path = %path.display(),
        expressions = parsed.program.children().len(),
        warnings = emitter.count(),
        "parsed source"
    );

    Ok(parsed)
}

#[cfg(test)]
mod tests;
