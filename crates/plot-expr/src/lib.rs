// File: crates/plot-expr/src/lib.rs
// Summary: Sandboxed expression language for plotting: allow-listed names, dedicated grammar, f64 sampling.
//
// Expressions are never handed to a general evaluator. Text is tokenized,
// screened against a `SymbolTable`, parsed into an `Expr` tree and evaluated
// directly.

pub mod ast;
pub mod error;
pub mod parse;
pub mod sample;
pub mod symbols;
pub mod token;

pub use ast::{BinOp, Expr};
pub use error::ExprError;
pub use parse::Parser;
pub use sample::{linspace, sample, Domain, SampledCurve};
pub use symbols::{Function, Symbol, SymbolTable, VARIABLE};
pub use token::{tokenize, Token, TokenKind};

/// Tokenize and screen identifiers without building a tree.
/// Fails on any character outside the grammar or any name not in `symbols`.
pub fn screen(source: &str, symbols: &SymbolTable) -> Result<(), ExprError> {
    let tokens = tokenize(source)?;
    symbols.screen(&tokens)
}

/// A parsed expression bound to the table it was resolved against.
#[derive(Clone, Debug)]
pub struct Expression {
    ast: Expr,
}

impl Expression {
    pub fn parse(source: &str, symbols: &SymbolTable) -> Result<Self, ExprError> {
        let tokens = tokenize(source)?;
        let ast = Parser::new(&tokens, symbols).parse()?;
        tracing::trace!(source, tree = %ast, "parsed expression");
        Ok(Self { ast })
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.ast.eval(x)
    }

    pub fn sample(&self, domain: &Domain) -> SampledCurve {
        sample(&self.ast, domain)
    }
}
