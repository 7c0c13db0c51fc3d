// File: crates/plot-expr/src/symbols.rs
// Summary: Allow-listed symbol table (the evaluation context) and the identifier screen.

use std::collections::BTreeMap;

use crate::error::ExprError;
use crate::token::{Token, TokenKind};

/// Name of the single free variable.
pub const VARIABLE: &str = "x";

#[derive(Clone, Copy, Debug)]
pub enum Function {
    Unary(fn(f64) -> f64),
    Binary(fn(f64, f64) -> f64),
}

impl Function {
    pub fn arity(&self) -> usize {
        match self {
            Function::Unary(_) => 1,
            Function::Binary(_) => 2,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub enum Symbol {
    Variable,
    Constant(f64),
    Function(Function),
}

const CONSTANTS: &[(&str, f64)] = &[
    ("pi", std::f64::consts::PI),
    ("e", std::f64::consts::E),
    ("tau", std::f64::consts::TAU),
];

const UNARY: &[(&str, fn(f64) -> f64)] = &[
    ("sin", f64::sin),
    ("cos", f64::cos),
    ("tan", f64::tan),
    ("arcsin", f64::asin),
    ("asin", f64::asin),
    ("arccos", f64::acos),
    ("acos", f64::acos),
    ("arctan", f64::atan),
    ("atan", f64::atan),
    ("sinh", f64::sinh),
    ("cosh", f64::cosh),
    ("tanh", f64::tanh),
    ("exp", f64::exp),
    ("log", f64::ln),
    ("log10", f64::log10),
    ("log2", f64::log2),
    ("sqrt", f64::sqrt),
    ("abs", f64::abs),
    ("floor", f64::floor),
    ("ceil", f64::ceil),
];

const BINARY: &[(&str, fn(f64, f64) -> f64)] = &[
    ("pow", f64::powf),
    ("arctan2", f64::atan2),
    ("atan2", f64::atan2),
];

/// Immutable mapping from allowed names to what they mean.
///
/// Anything not in the table is rejected; there is no fallback lookup.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    entries: BTreeMap<&'static str, Symbol>,
}

impl SymbolTable {
    /// Variable `x`, the constants and every built-in function.
    pub fn standard() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(VARIABLE, Symbol::Variable);
        for &(name, value) in CONSTANTS {
            entries.insert(name, Symbol::Constant(value));
        }
        for &(name, f) in UNARY {
            entries.insert(name, Symbol::Function(Function::Unary(f)));
        }
        for &(name, f) in BINARY {
            entries.insert(name, Symbol::Function(Function::Binary(f)));
        }
        Self { entries }
    }

    /// Standard table narrowed to the named functions. Variable and constants stay.
    /// Every name must be a built-in function; this can only shrink the table.
    pub fn with_functions<S: AsRef<str>>(names: &[S]) -> Result<Self, ExprError> {
        let standard = Self::standard();
        let mut entries: BTreeMap<&'static str, Symbol> = standard
            .entries
            .iter()
            .filter(|(_, sym)| !matches!(sym, Symbol::Function(_)))
            .map(|(&k, &v)| (k, v))
            .collect();
        for name in names {
            let name = name.as_ref();
            let Some((&key, &sym)) = standard.entries.get_key_value(name) else {
                return Err(ExprError::UnknownFunction(name.to_string()));
            };
            if !matches!(sym, Symbol::Function(_)) {
                return Err(ExprError::UnknownFunction(name.to_string()));
            }
            entries.insert(key, sym);
        }
        Ok(Self { entries })
    }

    pub fn lookup(&self, name: &str) -> Option<Symbol> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn function_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries
            .iter()
            .filter(|(_, sym)| matches!(sym, Symbol::Function(_)))
            .map(|(&name, _)| name)
    }

    /// Deny-by-default screen: every identifier token must be in the table.
    pub fn screen(&self, tokens: &[Token]) -> Result<(), ExprError> {
        for tok in tokens {
            if let TokenKind::Ident(name) = &tok.kind {
                if !self.contains(name) {
                    tracing::debug!(identifier = %name, pos = tok.pos, "identifier rejected");
                    return Err(ExprError::DisallowedIdentifier { name: name.clone(), pos: tok.pos });
                }
            }
        }
        Ok(())
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::standard()
    }
}
