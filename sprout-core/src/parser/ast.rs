use std::fmt::Display;

use crate::{
    environment::prelude::{Environment, ScopeId},
    lexer::prelude::TokenKind,
    parser::prelude::{parse_error, Parse, ParseError, ParseErrorType, ParseWarning, Parser, ParserState},
    utils::prelude::{Error, SrcSpan}
};

#[derive(Debug)]
pub struct Parsed {
    pub program: Program,
    pub environment: Environment,
    pub warnings: Vec<ParseWarning>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    None,
    Integer,
    Group,
    Binding,
    Program,
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::None => "None",
            NodeKind::Integer => "Integer",
            NodeKind::Group => "Group",
            NodeKind::Binding => "Binding",
            NodeKind::Program => "Program",
        };

        write!(f, "{name}")
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub enum Node {
    /// Placeholder for something not parsed yet. A failed parse is an error,
    /// never a `None` node.
    #[default]
    None,
    Integer {
        value: i64,
        location: SrcSpan
    },
    // ( <expr>* )
    Group {
        children: Vec<Node>,
        scope: ScopeId,
        location: SrcSpan
    },
    // <ident> : <expr>
    Binding {
        name: String,
        value: Box<Node>,
        location: SrcSpan
    },
    Program {
        children: Vec<Node>,
        location: SrcSpan
    },
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::None => NodeKind::None,
            Node::Integer { .. } => NodeKind::Integer,
            Node::Group { .. } => NodeKind::Group,
            Node::Binding { .. } => NodeKind::Binding,
            Node::Program { .. } => NodeKind::Program,
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Node::None)
    }

    pub fn location(&self) -> SrcSpan {
        match self {
            Node::None => SrcSpan::default(),
            Node::Integer { location, .. }
            | Node::Group { location, .. }
            | Node::Binding { location, .. }
            | Node::Program { location, .. } => *location,
        }
    }

    /// Ordered children; empty for leaf kinds. A binding's value is its only child.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Group { children, .. } | Node::Program { children, .. } => children,
            Node::Binding { value, .. } => std::slice::from_ref(&**value),
            Node::None | Node::Integer { .. } => &[],
        }
    }

    pub fn as_integer(&self) -> Result<i64, Error> {
        match self {
            Node::Integer { value, .. } => Ok(*value),
            _ => Err(self.mismatch(NodeKind::Integer)),
        }
    }

    pub fn as_binding(&self) -> Result<(&str, &Node), Error> {
        match self {
            Node::Binding { name, value, .. } => Ok((name, value)),
            _ => Err(self.mismatch(NodeKind::Binding)),
        }
    }

    pub fn scope(&self) -> Result<ScopeId, Error> {
        match self {
            Node::Group { scope, .. } => Ok(*scope),
            Node::Program { .. } => Ok(ScopeId::ROOT),
            _ => Err(self.mismatch(NodeKind::Group)),
        }
    }

    fn mismatch(&self, expected: NodeKind) -> Error {
        Error::Type {
            expected,
            found: self.kind()
        }
    }
}

impl<'s> Parse<'s> for Node {
    fn parse(parser: &mut Parser<'s>) -> Result<Self, ParseError> {
        let token = parser.current();

        match token.kind() {
            TokenKind::Integer => {
                parser.step();

                match token.text.parse::<i64>() {
                    Ok(value) => Ok(Node::Integer { value, location: token.span() }),
                    Err(_) => parse_error(
                        ParseErrorType::IntegerOverflow { token: token.text.to_string() },
                        token.span()
                    )
                }
            },
            TokenKind::LParen => parse_group(parser),
            TokenKind::Ident => match parser.peek().kind() {
                TokenKind::Colon => parse_binding(parser),
                _ => parse_error(
                    ParseErrorType::NotImplemented {
                        construct: "symbol references",
                        token: token.text.to_string()
                    },
                    token.span()
                )
            },
            TokenKind::Comma => parse_error(
                ParseErrorType::NotImplemented {
                    construct: "`,` separators",
                    token: token.text.to_string()
                },
                token.span()
            ),
            TokenKind::Colon => parse_error(ParseErrorType::MissingBindingName, token.span()),
            TokenKind::RParen => parse_error(ParseErrorType::UnmatchedCloseParen, token.span()),
            TokenKind::Eof => parse_error(ParseErrorType::UnexpectedEof, token.span()),
            TokenKind::Invalid => parse_error(
                ParseErrorType::UnexpectedToken { token: token.text.to_string() },
                token.span()
            ),
        }
    }
}

fn parse_group(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    let (start, open_end) = parser.expect_one(TokenKind::LParen)?;
    let scope = parser.enter_group(SrcSpan::from(start, open_end))?;

    let mut children = vec![];

    loop {
        let token = parser.current();

        match token.kind() {
            TokenKind::RParen => break,
            TokenKind::Eof => return parse_error(
                ParseErrorType::UnclosedGroup,
                SrcSpan::from(start, open_end)
            ),
            _ => {
                children.push(Node::parse(parser)?);
                parser.set_state(ParserState::InGroup(parser.depth()));
            }
        }
    }

    let (_, end) = parser.expect_one(TokenKind::RParen)?;
    parser.leave_group();

    Ok(Node::Group {
        children,
        scope,
        location: SrcSpan::from(start, end)
    })
}

fn parse_binding(parser: &mut Parser<'_>) -> Result<Node, ParseError> {
    let name = parser.step();
    let (_, colon_end) = parser.expect_one(TokenKind::Colon)?;

    parser.set_state(ParserState::AwaitingBindingValue);

    if matches!(parser.current().kind(), TokenKind::Eof | TokenKind::RParen) {
        return parse_error(
            ParseErrorType::MissingBindingValue { name: name.text.to_string() },
            SrcSpan::from(name.start, colon_end)
        );
    }

    parser.descend(SrcSpan::from(name.start, colon_end))?;
    let value = Node::parse(parser)?;
    parser.ascend();

    let location = name.span().merge(value.location());

    parser.bind(name.text, value.clone(), location)?;

    Ok(Node::Binding {
        name: name.text.to_string(),
        value: Box::new(value),
        location
    })
}

impl Display for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::None => write!(f, "<none>"),
            Node::Integer { value, .. } => write!(f, "{value}"),
            Node::Group { children, .. } => {
                let children = children.iter()
                    .map(|child| format!("{child}"))
                    .collect::<Vec<String>>();

                write!(f, "({})", children.join(" "))
            },
            Node::Binding { name, value, .. } => write!(f, "{name}: {value}"),
            Node::Program { children, .. } => {
                let children = children.iter()
                    .map(|child| format!("{child}"))
                    .collect::<Vec<String>>();

                write!(f, "{}", children.join("\n"))
            }
        }
    }
}

// program -> {<expr>} EOF
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    root: Node,
}

impl Program {
    pub fn new(children: Vec<Node>, location: SrcSpan) -> Self {
        Self {
            root: Node::Program { children, location }
        }
    }

    /// Always a [`Node::Program`].
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    pub fn children(&self) -> &[Node] {
        self.root.children()
    }

    pub fn location(&self) -> SrcSpan {
        self.root.location()
    }
}

impl<'s> Parse<'s> for Program {
    fn parse(parser: &mut Parser<'s>) -> Result<Self, ParseError> {
        let start = parser.current().start;
        let mut children = vec![];

        loop {
            parser.set_state(ParserState::AwaitingExpr);
            let token = parser.current();

            match token.kind() {
                TokenKind::Eof => break,
                _ => children.push(Node::parse(parser)?),
            }
        }

        let end = parser.current().end;

        Ok(Program::new(children, SrcSpan::from(start, end)))
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.root)
    }
}
