//! Parser for textual shape expressions such as `map<string, list<i32?>>`.
//!
//! Grammar:
//!
//! ```text
//! expr    := primary suffix*
//! primary := IDENT ( '<' expr ( ',' expr )* '>' )?
//! suffix  := '[' ']' | '?'
//! ```
//!
//! Names are resolved later against a [`crate::document::ShapeCatalog`].

use crate::error::{Error, Result};

/// Unresolved syntax tree of a shape expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShapeExpr {
    Named(String),
    Generic { name: String, arguments: Vec<ShapeExpr> },
    Array(Box<ShapeExpr>),
    Optional(Box<ShapeExpr>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Ident(String),
    Less,
    Greater,
    Comma,
    OpenBracket,
    CloseBracket,
    Question,
}

pub fn parse_shape_expr(input: &str) -> Result<ShapeExpr> {
    let tokens = tokenize(input)?;
    let mut parser = Parser {
        input,
        tokens,
        pos: 0,
    };
    let expr = parser.expr()?;
    if parser.pos != parser.tokens.len() {
        return Err(parser.error("unexpected trailing input"));
    }
    Ok(expr)
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();
    while let Some((start, ch)) = chars.next() {
        let token = match ch {
            c if c.is_whitespace() => continue,
            '<' => Token::Less,
            '>' => Token::Greater,
            ',' => Token::Comma,
            '[' => Token::OpenBracket,
            ']' => Token::CloseBracket,
            '?' => Token::Question,
            c if c.is_alphabetic() || c == '_' => {
                let mut end = start + c.len_utf8();
                while let Some(&(idx, next)) = chars.peek() {
                    if next.is_alphanumeric() || next == '_' || next == '.' || next == ':' {
                        end = idx + next.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                Token::Ident(input[start..end].to_string())
            }
            other => {
                return Err(Error::InvalidExpression {
                    expr: input.to_string(),
                    message: format!("unexpected character '{other}' at offset {start}"),
                });
            }
        };
        tokens.push(token);
    }
    Ok(tokens)
}

struct Parser<'a> {
    input: &'a str,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser<'_> {
    fn expr(&mut self) -> Result<ShapeExpr> {
        let mut expr = self.primary()?;
        loop {
            match self.peek() {
                Some(Token::OpenBracket) => {
                    self.pos += 1;
                    self.expect(Token::CloseBracket, "expected ']'")?;
                    expr = ShapeExpr::Array(Box::new(expr));
                }
                Some(Token::Question) => {
                    self.pos += 1;
                    expr = ShapeExpr::Optional(Box::new(expr));
                }
                _ => return Ok(expr),
            }
        }
    }

    fn primary(&mut self) -> Result<ShapeExpr> {
        let name = match self.next() {
            Some(Token::Ident(name)) => name,
            Some(_) => return Err(self.error("expected a type name")),
            None => return Err(self.error("unexpected end of input")),
        };
        if self.peek() != Some(&Token::Less) {
            return Ok(ShapeExpr::Named(name));
        }
        self.pos += 1;
        let mut arguments = vec![self.expr()?];
        loop {
            match self.next() {
                Some(Token::Comma) => arguments.push(self.expr()?),
                Some(Token::Greater) => break,
                _ => return Err(self.error("expected ',' or '>'")),
            }
        }
        Ok(ShapeExpr::Generic { name, arguments })
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    fn expect(&mut self, expected: Token, message: &str) -> Result<()> {
        if self.next().as_ref() == Some(&expected) {
            Ok(())
        } else {
            Err(self.error(message))
        }
    }

    fn error(&self, message: &str) -> Error {
        Error::InvalidExpression {
            expr: self.input.to_string(),
            message: message.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ShapeExpr {
        ShapeExpr::Named(name.to_string())
    }

    #[test]
    fn parses_nested_generics_and_suffixes() {
        let expr = parse_shape_expr("map<string, list<i32?>>[]").unwrap();
        assert_eq!(
            expr,
            ShapeExpr::Array(Box::new(ShapeExpr::Generic {
                name: "map".to_string(),
                arguments: vec![
                    named("string"),
                    ShapeExpr::Generic {
                        name: "list".to_string(),
                        arguments: vec![ShapeExpr::Optional(Box::new(named("i32")))],
                    },
                ],
            }))
        );
    }

    #[test]
    fn rejects_malformed_expressions() {
        assert!(parse_shape_expr("").is_err());
        assert!(parse_shape_expr("list<i32").is_err());
        assert!(parse_shape_expr("i32[").is_err());
        assert!(parse_shape_expr("i32 i64").is_err());
        assert!(parse_shape_expr("map<,>").is_err());
        assert!(parse_shape_expr("i32#").is_err());
    }
}
