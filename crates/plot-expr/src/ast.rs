// File: crates/plot-expr/src/ast.rs
// Summary: Expression tree and its evaluation over f64 (IEEE semantics, never panics).

use std::fmt;

use crate::symbols::Function;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

/// Binding power of unary minus: above `*`, below `^` so `-x^2 == -(x^2)`.
pub const PREFIX_PRECEDENCE: u8 = 3;

impl BinOp {
    pub fn precedence(self) -> u8 {
        match self {
            BinOp::Add | BinOp::Sub => 1,
            BinOp::Mul | BinOp::Div | BinOp::Rem => 2,
            BinOp::Pow => 4,
        }
    }

    pub fn is_right_assoc(self) -> bool {
        matches!(self, BinOp::Pow)
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Rem => "%",
            BinOp::Pow => "^",
        }
    }

    pub fn apply(self, a: f64, b: f64) -> f64 {
        match self {
            BinOp::Add => a + b,
            BinOp::Sub => a - b,
            BinOp::Mul => a * b,
            BinOp::Div => a / b,
            // floored modulo: sign follows the divisor
            BinOp::Rem => a - b * (a / b).floor(),
            BinOp::Pow => a.powf(b),
        }
    }
}

#[derive(Clone, Debug)]
pub enum Expr {
    Num(f64),
    Var,
    Const { name: String, value: f64 },
    Neg(Box<Expr>),
    Binary { op: BinOp, lhs: Box<Expr>, rhs: Box<Expr> },
    Call { name: String, func: Function, args: Vec<Expr> },
}

impl Expr {
    pub fn binary(op: BinOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary { op, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    /// Evaluate at `x`. Domain errors come back as NaN or infinities.
    pub fn eval(&self, x: f64) -> f64 {
        match self {
            Expr::Num(n) => *n,
            Expr::Var => x,
            Expr::Const { value, .. } => *value,
            Expr::Neg(inner) => -inner.eval(x),
            Expr::Binary { op, lhs, rhs } => op.apply(lhs.eval(x), rhs.eval(x)),
            // arity is checked by the parser
            Expr::Call { func, args, .. } => match (func, args.as_slice()) {
                (Function::Unary(f), [a]) => f(a.eval(x)),
                (Function::Binary(f), [a, b]) => f(a.eval(x), b.eval(x)),
                _ => f64::NAN,
            },
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{n}"),
            Expr::Var => f.write_str(crate::symbols::VARIABLE),
            Expr::Const { name, .. } => f.write_str(name),
            Expr::Neg(inner) => write!(f, "(-{inner})"),
            Expr::Binary { op, lhs, rhs } => write!(f, "({lhs} {} {rhs})", op.symbol()),
            Expr::Call { name, args, .. } => {
                write!(f, "{name}(")?;
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{a}")?;
                }
                f.write_str(")")
            }
        }
    }
}
