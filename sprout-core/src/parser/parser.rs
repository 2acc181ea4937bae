use tracing::debug;

use crate::{
    environment::prelude::{Environment, ScopeId},
    lexer::prelude::{Token, TokenKind, TokenStream},
    utils::prelude::{Error, SrcSpan}
};
use super::error::{ParseError, ParseErrorType, ParseWarning};
use super::ast::{Node, Parsed, Program};

pub const DEFAULT_MAX_DEPTH: usize = 256;

pub trait Parse<'s>
    where Self: Sized,
{
    fn parse(parser: &mut Parser<'s>) -> Result<Self, ParseError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Deepest allowed nesting of groups and binding values.
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    AwaitingExpr,
    InGroup(usize),
    AwaitingBindingValue,
    Done,
    Failed,
}

/// Builds a [`Program`] from a token stream, left to right with one token of
/// lookahead.
pub struct Parser<'s> {
    stream: TokenStream<'s>,
    cursor: usize,
    config: ParserConfig,
    state: ParserState,
    /// Innermost scope last; the root scope is never popped.
    scopes: Vec<ScopeId>,
    nesting: usize,
    environment: Environment,
    warnings: Vec<ParseWarning>,
}

impl<'s> Parser<'s> {
    pub fn new(stream: TokenStream<'s>, config: ParserConfig) -> Self {
        Self {
            stream,
            cursor: 0,
            config,
            state: ParserState::AwaitingExpr,
            scopes: vec![ScopeId::ROOT],
            nesting: 0,
            environment: Environment::new(),
            warnings: vec![],
        }
    }

    pub fn state(&self) -> ParserState {
        self.state
    }

    pub fn set_state(&mut self, state: ParserState) {
        self.state = state;
    }

    pub fn current(&self) -> Token<'s> {
        self.stream.get(self.cursor)
    }

    pub fn peek(&self) -> Token<'s> {
        self.stream.get(self.cursor + 1)
    }

    /// Returns the current token and moves past it. Never moves past the end.
    pub fn step(&mut self) -> Token<'s> {
        let token = self.current();

        if !token.is_eof() {
            self.cursor += 1;
        }

        token
    }

    pub fn expect_one(&mut self, kind: TokenKind) -> Result<(u32, u32), ParseError> {
        let token = self.current();

        if token.kind() == kind {
            self.step();
            return Ok((token.start, token.end));
        }

        match token.kind() {
            TokenKind::Eof => parse_error(ParseErrorType::UnexpectedEof, token.span()),
            _ => parse_error(
                ParseErrorType::UnexpectedToken { token: token.text.to_string() },
                token.span()
            )
        }
    }

    pub fn depth(&self) -> usize {
        self.scopes.len() - 1
    }

    pub fn scope(&self) -> ScopeId {
        self.scopes.last().copied().unwrap_or(ScopeId::ROOT)
    }

    /// Goes one level deeper into the tree, failing past the configured limit.
    pub fn descend(&mut self, location: SrcSpan) -> Result<(), ParseError> {
        if self.nesting >= self.config.max_depth {
            return parse_error(
                ParseErrorType::NestingTooDeep { limit: self.config.max_depth },
                location
            );
        }

        self.nesting += 1;

        Ok(())
    }

    pub fn ascend(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Opens the scope of a group that starts at `location`.
    pub fn enter_group(&mut self, location: SrcSpan) -> Result<ScopeId, ParseError> {
        self.descend(location)?;

        let scope = self.environment.push_scope(self.scope())
            .map_err(|err| internal_error(err, location))?;
        self.scopes.push(scope);
        self.state = ParserState::InGroup(self.depth());

        Ok(scope)
    }

    pub fn leave_group(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }

        self.ascend();

        self.state = match self.depth() {
            0 => ParserState::AwaitingExpr,
            depth => ParserState::InGroup(depth),
        };
    }

    /// Binds `name` in the innermost open scope.
    pub fn bind(&mut self, name: &str, value: Node, location: SrcSpan) -> Result<(), ParseError> {
        let previous = self.environment.bind(self.scope(), name.to_string(), value, location)
            .map_err(|err| internal_error(err, location))?;

        if let Some(previous) = previous {
            self.warnings.push(ParseWarning::ShadowedBinding {
                name: name.to_string(),
                location,
                previous,
            });
        }

        Ok(())
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        match Program::parse(self) {
            Ok(program) => {
                self.state = ParserState::Done;

                debug!(
                    children = program.children().len(),
                    scopes = self.environment.len(),
                    warnings = self.warnings.len(),
                    "parsed program"
                );

                Ok(Parsed {
                    program,
                    environment: std::mem::take(&mut self.environment),
                    warnings: std::mem::take(&mut self.warnings),
                })
            },
            Err(err) => {
                self.state = ParserState::Failed;

                debug!(error = ?err.error, span = %err.span, "parse failed");

                Err(err)
            }
        }
    }
}

pub fn parse_module(src: &str) -> Result<Parsed, ParseError> {
    parse_module_with_config(src, ParserConfig::default())
}

pub fn parse_module_with_config(src: &str, config: ParserConfig) -> Result<Parsed, ParseError> {
    let stream = TokenStream::tokenize(src)?;
    let mut parser = Parser::new(stream, config);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}

fn internal_error(err: Error, span: SrcSpan) -> ParseError {
    ParseError {
        error: ParseErrorType::Internal { message: err.to_string() },
        span
    }
}
