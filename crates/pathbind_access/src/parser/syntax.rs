use super::ast::{BinaryOp, Expr, ExprKind, UnaryOp};
use super::lexer::{Token, TokenKind, tokenize};
use crate::ParseError;

/// Parses a closure `|x| body` or a rooted path `.a[1]` into an expression.
pub(crate) fn parse(path: &str) -> Result<Expr, ParseError> {
    let mut parser = Parser {
        path,
        tokens: tokenize(path)?,
        pos: 0,
        param: None,
        implicit_root: false,
    };
    parser.path()
}

struct Parser<'p> {
    path: &'p str,
    tokens: Vec<Token>,
    pos: usize,
    param: Option<String>,
    implicit_root: bool,
}

impl Parser<'_> {
    // -------------------------------------------------------------------------
    // Token helpers

    #[inline]
    fn peek(&self) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[self.pos.min(last)]
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().kind == *kind {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, keyword: &str) -> bool {
        match &self.peek().kind {
            TokenKind::Ident(name) if name == keyword => {
                self.pos += 1;
                true
            }
            _ => false,
        }
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> ParseError {
        ParseError {
            offset,
            path: self.path.to_owned(),
            message: message.into(),
        }
    }

    fn unexpected(&self, expected: &str) -> ParseError {
        let token = self.peek();
        let message = format!("expected {expected}, found {}", token.kind.describe());
        self.error(token.offset, message)
    }

    fn expect(&mut self, kind: &TokenKind, expected: &str) -> Result<(), ParseError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    fn expect_ident(&mut self, expected: &str) -> Result<String, ParseError> {
        match self.peek().kind.clone() {
            TokenKind::Ident(name) => {
                self.pos += 1;
                Ok(name)
            }
            _ => Err(self.unexpected(expected)),
        }
    }

    // -------------------------------------------------------------------------
    // Grammar

    fn path(&mut self) -> Result<Expr, ParseError> {
        if self.eat(&TokenKind::Pipe) {
            let param = self.expect_ident("a parameter name")?;
            if self.eat(&TokenKind::Colon) {
                self.type_text()?;
            }
            self.expect(&TokenKind::Pipe, "`|`")?;
            self.param = Some(param);
        } else if matches!(self.peek().kind, TokenKind::Dot | TokenKind::LBracket) {
            self.implicit_root = true;
        } else {
            return Err(self.unexpected("`|` or a rooted path starting with `.` or `[`"));
        }

        let body = self.expr()?;
        self.expect(&TokenKind::Eof, "end of path")?;
        Ok(body)
    }

    fn expr(&mut self) -> Result<Expr, ParseError> {
        self.or()
    }

    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
        Expr {
            offset: lhs.offset,
            kind: ExprKind::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            },
        }
    }

    fn or(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.and()?;
        while self.eat(&TokenKind::OrOr) {
            let rhs = self.and()?;
            lhs = Self::binary(BinaryOp::Or, lhs, rhs);
        }
        Ok(lhs)
    }

    fn and(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.comparison()?;
        while self.eat(&TokenKind::AndAnd) {
            let rhs = self.comparison()?;
            lhs = Self::binary(BinaryOp::And, lhs, rhs);
        }
        Ok(lhs)
    }

    fn comparison_op(&self) -> Option<BinaryOp> {
        match self.peek().kind {
            TokenKind::EqEq => Some(BinaryOp::Eq),
            TokenKind::NotEq => Some(BinaryOp::Ne),
            TokenKind::Lt => Some(BinaryOp::Lt),
            TokenKind::Le => Some(BinaryOp::Le),
            TokenKind::Gt => Some(BinaryOp::Gt),
            TokenKind::Ge => Some(BinaryOp::Ge),
            _ => None,
        }
    }

    fn comparison(&mut self) -> Result<Expr, ParseError> {
        let lhs = self.additive()?;
        let Some(op) = self.comparison_op() else {
            return Ok(lhs);
        };
        self.pos += 1;
        let rhs = self.additive()?;

        if self.comparison_op().is_some() {
            let offset = self.peek().offset;
            return Err(self.error(offset, "comparison operators cannot be chained"));
        }
        Ok(Self::binary(op, lhs, rhs))
    }

    fn additive(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.multiplicative()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinaryOp::Add,
                TokenKind::Minus => BinaryOp::Sub,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.multiplicative()?;
            lhs = Self::binary(op, lhs, rhs);
        }
    }

    fn multiplicative(&mut self) -> Result<Expr, ParseError> {
        let mut lhs = self.cast()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Star => BinaryOp::Mul,
                TokenKind::Slash => BinaryOp::Div,
                TokenKind::Percent => BinaryOp::Rem,
                _ => return Ok(lhs),
            };
            self.pos += 1;
            let rhs = self.cast()?;
            lhs = Self::binary(op, lhs, rhs);
        }
    }

    fn cast(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.unary()?;
        loop {
            let offset = expr.offset;
            if self.eat_keyword("as") {
                let ty = self.type_text()?;
                expr = Expr {
                    offset,
                    kind: ExprKind::Cast {
                        expr: Box::new(expr),
                        ty,
                    },
                };
            } else if self.eat_keyword("is") {
                let ty = self.type_text()?;
                expr = Expr {
                    offset,
                    kind: ExprKind::TypeTest {
                        expr: Box::new(expr),
                        ty,
                    },
                };
            } else {
                return Ok(expr);
            }
        }
    }

    fn unary(&mut self) -> Result<Expr, ParseError> {
        let offset = self.peek().offset;
        let op = match self.peek().kind {
            TokenKind::Minus => UnaryOp::Neg,
            TokenKind::Bang => UnaryOp::Not,
            _ => return self.postfix(),
        };
        self.pos += 1;
        let operand = self.unary()?;
        Ok(Expr {
            offset,
            kind: ExprKind::Unary {
                op,
                operand: Box::new(operand),
            },
        })
    }

    fn postfix(&mut self) -> Result<Expr, ParseError> {
        let mut expr = self.primary()?;
        loop {
            let offset = expr.offset;
            if self.eat(&TokenKind::Dot) {
                let name = self.expect_ident("a member name")?;
                let kind = if self.eat(&TokenKind::LParen) {
                    ExprKind::Call {
                        base: Box::new(expr),
                        name,
                        args: self.arguments()?,
                    }
                } else {
                    ExprKind::Field {
                        base: Box::new(expr),
                        name,
                    }
                };
                expr = Expr { offset, kind };
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.expr()?;
                self.expect(&TokenKind::RBracket, "`]`")?;
                expr = Expr {
                    offset,
                    kind: ExprKind::Index {
                        base: Box::new(expr),
                        index: Box::new(index),
                    },
                };
            } else {
                return Ok(expr);
            }
        }
    }

    /// Arguments after the opening parenthesis.
    fn arguments(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = Vec::new();
        while !self.eat(&TokenKind::RParen) {
            args.push(self.expr()?);
            if !self.eat(&TokenKind::Comma) {
                self.expect(&TokenKind::RParen, "`,` or `)`")?;
                break;
            }
        }
        Ok(args)
    }

    fn primary(&mut self) -> Result<Expr, ParseError> {
        let offset = self.peek().offset;

        if self.implicit_root {
            self.implicit_root = false;
            return Ok(Expr {
                kind: ExprKind::Root,
                offset,
            });
        }

        let kind = match self.peek().kind.clone() {
            TokenKind::Int(value) => ExprKind::Int(value),
            TokenKind::Str(value) => ExprKind::Str(value),
            TokenKind::Ident(name) => match name.as_str() {
                "true" => ExprKind::Bool(true),
                "false" => ExprKind::Bool(false),
                _ if self.param.as_deref() == Some(name.as_str()) => ExprKind::Root,
                _ => ExprKind::Ident(name),
            },
            TokenKind::LParen => {
                self.pos += 1;
                let inner = self.expr()?;
                self.expect(&TokenKind::RParen, "`)`")?;
                return Ok(inner);
            }
            _ => return Err(self.unexpected("an expression")),
        };
        self.pos += 1;
        Ok(Expr { kind, offset })
    }

    /// A type after `as`, `is` or a parameter annotation, as written.
    fn type_text(&mut self) -> Result<String, ParseError> {
        let offset = self.peek().offset;
        let mut text = String::new();
        let mut depth = 0_usize;

        loop {
            match &self.peek().kind {
                TokenKind::Ident(name) => {
                    if text.ends_with(|c: char| c.is_ascii_alphanumeric() || c == '_') {
                        text.push(' ');
                    }
                    text.push_str(name);
                }
                TokenKind::Amp => text.push('&'),
                TokenKind::ColonColon => text.push_str("::"),
                TokenKind::Lt | TokenKind::LBracket => {
                    depth += 1;
                    text.push(if self.peek().kind == TokenKind::Lt { '<' } else { '[' });
                }
                TokenKind::Gt | TokenKind::RBracket if depth > 0 => {
                    depth -= 1;
                    text.push(if self.peek().kind == TokenKind::Gt { '>' } else { ']' });
                }
                TokenKind::Comma if depth > 0 => text.push_str(", "),
                TokenKind::Semi if depth > 0 => text.push_str("; "),
                TokenKind::Int(value) if depth > 0 => text.push_str(&value.to_string()),
                _ => break,
            }
            self.pos += 1;
        }

        if text.is_empty() || depth != 0 {
            return Err(self.error(offset, "expected a type"));
        }
        Ok(text)
    }
}

// -----------------------------------------------------------------------------
// Tests
