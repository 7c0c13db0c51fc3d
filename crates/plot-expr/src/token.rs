// File: crates/plot-expr/src/token.rs
// Summary: Tokenizer for the plot expression grammar.
// Notes:
// - Only characters that belong to the grammar are accepted. Quotes, brackets,
//   '=', '<', ';' and friends fail here, before any identifier is looked up.
// - '.' is only valid inside a number; '.' right after a name or ')' is
//   reported as attribute access.

use crate::error::ExprError;

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    Num(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `^` or `**`.
    Caret,
    LParen,
    RParen,
    Comma,
    End,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset of the first character of the token.
    pub pos: usize,
}

impl Token {
    fn new(kind: TokenKind, pos: usize) -> Self {
        Self { kind, pos }
    }
}

/// Split `input` into tokens, always terminated by `TokenKind::End`.
pub fn tokenize(input: &str) -> Result<Vec<Token>, ExprError> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens: Vec<Token> = Vec::new();
    let mut i = 0usize;

    let peek = |k: usize| chars.get(k).map(|&(_, c)| c);

    while i < chars.len() {
        let (pos, ch) = chars[i];
        match ch {
            ' ' | '\t' | '\n' | '\r' => {
                i += 1;
            }
            '.' if !peek(i + 1).is_some_and(|c| c.is_ascii_digit()) => {
                let name = match tokens.last().map(|t| &t.kind) {
                    Some(TokenKind::Ident(name)) => name.clone(),
                    Some(TokenKind::RParen) => ")".to_string(),
                    _ => return Err(ExprError::UnexpectedChar { ch, pos }),
                };
                return Err(ExprError::AttributeAccess { name, pos });
            }
            '0'..='9' | '.' => {
                let start = i;
                while peek(i).is_some_and(|c| c.is_ascii_digit() || c == '.') {
                    i += 1;
                }
                // exponent: only when a digit follows, so `2e` stays `2` then `e`
                if matches!(peek(i), Some('e' | 'E')) {
                    let digit_at = if matches!(peek(i + 1), Some('+' | '-')) { i + 2 } else { i + 1 };
                    if peek(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                        i = digit_at;
                        while peek(i).is_some_and(|c| c.is_ascii_digit()) {
                            i += 1;
                        }
                    }
                }
                let end = chars.get(i).map(|&(p, _)| p).unwrap_or(input.len());
                let text = &input[pos..end];
                let value: f64 = text
                    .parse()
                    .map_err(|_| ExprError::InvalidNumber { text: text.to_string(), pos })?;
                tokens.push(Token::new(TokenKind::Num(value), chars[start].0));
            }
            'a'..='z' | 'A'..='Z' | '_' => {
                while peek(i).is_some_and(|c| c.is_ascii_alphanumeric() || c == '_') {
                    i += 1;
                }
                let end = chars.get(i).map(|&(p, _)| p).unwrap_or(input.len());
                tokens.push(Token::new(TokenKind::Ident(input[pos..end].to_string()), pos));
            }
            '*' if peek(i + 1) == Some('*') => {
                tokens.push(Token::new(TokenKind::Caret, pos));
                i += 2;
            }
            _ => {
                let kind = match ch {
                    '+' => TokenKind::Plus,
                    '-' => TokenKind::Minus,
                    '*' => TokenKind::Star,
                    '/' => TokenKind::Slash,
                    '%' => TokenKind::Percent,
                    '^' => TokenKind::Caret,
                    '(' => TokenKind::LParen,
                    ')' => TokenKind::RParen,
                    ',' => TokenKind::Comma,
                    _ => return Err(ExprError::UnexpectedChar { ch, pos }),
                };
                tokens.push(Token::new(kind, pos));
                i += 1;
            }
        }
    }

    tokens.push(Token::new(TokenKind::End, input.len()));
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<TokenKind> {
        tokenize(input).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn numbers_and_exponents() {
        assert_eq!(
            kinds("1.5e3 + .25"),
            vec![TokenKind::Num(1500.0), TokenKind::Plus, TokenKind::Num(0.25), TokenKind::End]
        );
        assert_eq!(kinds("2e-1"), vec![TokenKind::Num(0.2), TokenKind::End]);
    }

    #[test]
    fn trailing_e_is_an_identifier() {
        assert_eq!(
            kinds("2e"),
            vec![TokenKind::Num(2.0), TokenKind::Ident("e".into()), TokenKind::End]
        );
    }

    #[test]
    fn double_star_is_power() {
        assert_eq!(
            kinds("x**2"),
            vec![TokenKind::Ident("x".into()), TokenKind::Caret, TokenKind::Num(2.0), TokenKind::End]
        );
    }

    #[test]
    fn malformed_number() {
        assert!(matches!(tokenize("1.2.3"), Err(ExprError::InvalidNumber { .. })));
    }

    #[test]
    fn rejects_quotes_and_assignment() {
        assert!(matches!(tokenize("open('f')"), Err(ExprError::UnexpectedChar { ch: '\'', pos: 5 })));
        assert!(matches!(tokenize("x = 1"), Err(ExprError::UnexpectedChar { ch: '=', .. })));
        assert!(matches!(tokenize("x[0]"), Err(ExprError::UnexpectedChar { ch: '[', .. })));
    }

    #[test]
    fn rejects_attribute_access() {
        match tokenize("np.sin(x)") {
            Err(ExprError::AttributeAccess { name, pos }) => {
                assert_eq!(name, "np");
                assert_eq!(pos, 2);
            }
            other => panic!("expected attribute access error, got {other:?}"),
        }
        assert!(matches!(tokenize("(x).real"), Err(ExprError::AttributeAccess { .. })));
    }

    #[test]
    fn end_token_sits_at_input_length() {
        let toks = tokenize("sin(x)").unwrap();
        assert_eq!(toks.last().unwrap().pos, 6);
    }
}
