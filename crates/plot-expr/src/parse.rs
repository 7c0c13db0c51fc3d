// File: crates/plot-expr/src/parse.rs
// Summary: Precedence-climbing parser from tokens to `Expr`, resolving names against a `SymbolTable`.
//
// Precedence (highest to lowest):
// - function calls, parentheses
// - power `^` / `**` (right associative)
// - unary `+` / `-`
// - `*`, `/`, `%`
// - `+`, `-`

use crate::ast::{BinOp, Expr, PREFIX_PRECEDENCE};
use crate::error::ExprError;
use crate::symbols::{Function, Symbol, SymbolTable};
use crate::token::{Token, TokenKind};

/// Maximum nesting of parentheses, calls and prefix operators.
pub const MAX_DEPTH: usize = 128;

pub struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    depth: usize,
    symbols: &'a SymbolTable,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], symbols: &'a SymbolTable) -> Self {
        Self { tokens, pos: 0, depth: 0, symbols }
    }

    /// Parse the whole token stream as one expression.
    pub fn parse(mut self) -> Result<Expr, ExprError> {
        if matches!(self.peek().kind, TokenKind::End) {
            return Err(ExprError::Empty);
        }
        let expr = self.parse_expr(0)?;
        let tok = self.peek();
        if !matches!(tok.kind, TokenKind::End) {
            return Err(ExprError::syntax(tok.pos, format!("unexpected {}", describe(&tok.kind))));
        }
        Ok(expr)
    }

    fn peek(&self) -> &'a Token {
        // tokenize() always terminates the stream with End
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[self.pos.min(last)]
    }

    fn advance(&mut self) -> &'a Token {
        let tok = self.peek();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), ExprError> {
        let tok = self.peek();
        if tok.kind == kind {
            self.advance();
            Ok(())
        } else {
            Err(ExprError::syntax(tok.pos, format!("expected {what}, found {}", describe(&tok.kind))))
        }
    }

    fn enter(&mut self) -> Result<(), ExprError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(ExprError::TooDeep { limit: MAX_DEPTH });
        }
        Ok(())
    }

    fn parse_expr(&mut self, min_prec: u8) -> Result<Expr, ExprError> {
        let mut left = self.parse_prefix()?;

        loop {
            let op = match self.peek().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Rem,
                TokenKind::Caret => BinOp::Pow,
                _ => break,
            };
            let prec = op.precedence();
            if prec < min_prec {
                break;
            }
            self.advance();
            let next_min = if op.is_right_assoc() { prec } else { prec + 1 };
            // right-associative chains recurse here, not through a prefix
            self.enter()?;
            let right = self.parse_expr(next_min)?;
            self.depth -= 1;
            left = Expr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_prefix(&mut self) -> Result<Expr, ExprError> {
        self.enter()?;
        let expr = match self.peek().kind {
            TokenKind::Minus => {
                self.advance();
                Expr::Neg(Box::new(self.parse_expr(PREFIX_PRECEDENCE)?))
            }
            TokenKind::Plus => {
                self.advance();
                self.parse_expr(PREFIX_PRECEDENCE)?
            }
            _ => self.parse_atom()?,
        };
        self.depth -= 1;
        Ok(expr)
    }

    fn parse_atom(&mut self) -> Result<Expr, ExprError> {
        let tok = self.advance();
        match &tok.kind {
            TokenKind::Num(n) => Ok(Expr::Num(*n)),
            TokenKind::LParen => {
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(inner)
            }
            TokenKind::Ident(name) => {
                let symbol = self
                    .symbols
                    .lookup(name)
                    .ok_or_else(|| ExprError::DisallowedIdentifier { name: name.clone(), pos: tok.pos })?;
                let is_call = matches!(self.peek().kind, TokenKind::LParen);
                match (symbol, is_call) {
                    (Symbol::Function(func), true) => self.parse_call(name, func),
                    (Symbol::Function(_), false) => Err(ExprError::NotAValue { name: name.clone() }),
                    (_, true) => Err(ExprError::NotCallable { name: name.clone() }),
                    (Symbol::Variable, false) => Ok(Expr::Var),
                    (Symbol::Constant(value), false) => Ok(Expr::Const { name: name.clone(), value }),
                }
            }
            other => Err(ExprError::syntax(tok.pos, format!("unexpected {}", describe(other)))),
        }
    }

    fn parse_call(&mut self, name: &str, func: Function) -> Result<Expr, ExprError> {
        self.advance(); // (
        let mut args = Vec::new();
        if !matches!(self.peek().kind, TokenKind::RParen) {
            loop {
                args.push(self.parse_expr(0)?);
                if matches!(self.peek().kind, TokenKind::Comma) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        self.expect(TokenKind::RParen, "')' after function arguments")?;
        if args.len() != func.arity() {
            return Err(ExprError::Arity { name: name.to_string(), expected: func.arity(), got: args.len() });
        }
        Ok(Expr::Call { name: name.to_string(), func, args })
    }
}

fn describe(kind: &TokenKind) -> String {
    match kind {
        TokenKind::Num(n) => format!("number {n}"),
        TokenKind::Ident(name) => format!("name '{name}'"),
        TokenKind::Plus => "'+'".into(),
        TokenKind::Minus => "'-'".into(),
        TokenKind::Star => "'*'".into(),
        TokenKind::Slash => "'/'".into(),
        TokenKind::Percent => "'%'".into(),
        TokenKind::Caret => "power operator".into(),
        TokenKind::LParen => "'('".into(),
        TokenKind::RParen => "')'".into(),
        TokenKind::Comma => "','".into(),
        TokenKind::End => "end of expression".into(),
    }
}
