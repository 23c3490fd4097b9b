//! Recursive-descent parser for the circuit notation.

use super::ast::*;
use super::lexer::{parse_value, Lexer, Token, TokenKind};
use crate::error::{DipoleError, Result};
use crate::filters::{RcKind, RlcKind};

/// Parser for circuit notation.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a single expression spanning the whole input.
    pub fn parse(&mut self) -> Result<Expr> {
        if self.current.kind == TokenKind::Eof {
            return Err(DipoleError::parse(self.current.line, "empty input"));
        }
        let expr = self.parse_expr()?;
        if self.current.kind != TokenKind::Eof {
            return Err(DipoleError::parse(
                self.current.line,
                format!("unexpected trailing input: {:?}", self.current.text),
            ));
        }
        Ok(expr)
    }

    /// Parse an expression that must denote a filter.
    pub fn parse_filter(&mut self) -> Result<FilterExpr> {
        let line = self.current.line;
        match self.parse()? {
            Expr::Filter(filter) => Ok(filter),
            Expr::Element(element) => Self::element_as_filter(element, line),
        }
    }

    /// Parse an expression that must denote an element.
    pub fn parse_element(&mut self) -> Result<ElementExpr> {
        let line = self.current.line;
        match self.parse()? {
            Expr::Element(element) => Ok(element),
            Expr::Filter(_) => Err(DipoleError::parse(line, "expected an element, found a filter")),
        }
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(DipoleError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    fn parse_expr(&mut self) -> Result<Expr> {
        let head = self.expect(TokenKind::Identifier)?;
        let line = head.line;
        let keyword = Keyword::from_name(&head.text).ok_or_else(|| DipoleError::UnknownKind {
            kind: head.text.clone(),
            line,
        })?;
        self.expect(TokenKind::OpenParen)?;

        let expr = match keyword {
            Keyword::Leaf(kind) => {
                let name = self.parse_name()?;
                self.expect(TokenKind::Comma)?;
                let value = self.parse_quantity(kind)?;
                Expr::Element(ElementExpr::Leaf {
                    kind,
                    name,
                    value,
                    line,
                })
            }
            Keyword::Composite(kind) => {
                let name = self.parse_name()?;
                let mut children = Vec::new();
                while self.current.kind == TokenKind::Comma {
                    self.advance()?;
                    children.push(self.parse_child_element()?);
                }
                if children.is_empty() {
                    return Err(DipoleError::parse(
                        line,
                        format!("'{}' needs at least one element", name),
                    ));
                }
                if kind == CompositeKind::Divider && children.len() != 2 {
                    return Err(DipoleError::parse(
                        line,
                        format!("divider '{}' takes exactly two elements, got {}", name, children.len()),
                    ));
                }
                Expr::Element(ElementExpr::Composite {
                    kind,
                    name,
                    children,
                    line,
                })
            }
            Keyword::Rc => {
                let ohms = self.parse_quantity(LeafKind::Resistor)?;
                self.expect(TokenKind::Comma)?;
                let farads = self.parse_quantity(LeafKind::Capacitor)?;
                self.expect(TokenKind::Comma)?;
                let kind: RcKind = self.expect(TokenKind::Identifier)?.text.parse()?;
                Expr::Filter(FilterExpr::Rc { ohms, farads, kind })
            }
            Keyword::Rlc => {
                let ohms = self.parse_quantity(LeafKind::Resistor)?;
                self.expect(TokenKind::Comma)?;
                let farads = self.parse_quantity(LeafKind::Capacitor)?;
                self.expect(TokenKind::Comma)?;
                let henrys = self.parse_quantity(LeafKind::Inductor)?;
                self.expect(TokenKind::Comma)?;
                let kind: RlcKind = self.expect(TokenKind::Identifier)?.text.parse()?;
                Expr::Filter(FilterExpr::Rlc {
                    ohms,
                    farads,
                    henrys,
                    kind,
                })
            }
            Keyword::Cascade => Expr::Filter(FilterExpr::Cascade(self.parse_filter_list()?)),
            Keyword::Sum => Expr::Filter(FilterExpr::Sum(self.parse_filter_list()?)),
        };

        self.expect(TokenKind::CloseParen)?;
        Ok(expr)
    }

    fn parse_name(&mut self) -> Result<String> {
        match self.current.kind {
            TokenKind::Identifier | TokenKind::Str => {
                let text = self.current.text.clone();
                self.advance()?;
                Ok(text)
            }
            _ => Err(DipoleError::parse(
                self.current.line,
                format!("expected a name, got {:?}", self.current.text),
            )),
        }
    }

    /// A number with optional multiplier suffix and optional unit symbol.
    fn parse_quantity(&mut self, unit_of: LeafKind) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        let value = parse_value(&tok.text)
            .ok_or_else(|| DipoleError::parse(tok.line, format!("invalid number: {}", tok.text)))?;

        if self.current.kind == TokenKind::Identifier {
            if unit_of.accepts_unit(&self.current.text) {
                self.advance()?;
            } else {
                return Err(DipoleError::parse(
                    self.current.line,
                    format!("unexpected unit '{}'", self.current.text),
                ));
            }
        }
        Ok(value)
    }

    fn parse_child_element(&mut self) -> Result<ElementExpr> {
        let line = self.current.line;
        match self.parse_expr()? {
            Expr::Element(element) => Ok(element),
            Expr::Filter(_) => Err(DipoleError::parse(
                line,
                "filters cannot be used as circuit elements",
            )),
        }
    }

    fn parse_filter_list(&mut self) -> Result<Vec<FilterExpr>> {
        let mut stages = Vec::new();
        loop {
            let line = self.current.line;
            let stage = match self.parse_expr()? {
                Expr::Filter(filter) => filter,
                Expr::Element(element) => Self::element_as_filter(element, line)?,
            };
            stages.push(stage);
            if self.current.kind != TokenKind::Comma {
                break;
            }
            self.advance()?;
        }
        Ok(stages)
    }

    fn element_as_filter(element: ElementExpr, line: usize) -> Result<FilterExpr> {
        if element.is_divider() {
            Ok(FilterExpr::Divider(element))
        } else {
            Err(DipoleError::parse(
                line,
                "only dividers can be used as filters",
            ))
        }
    }
}
