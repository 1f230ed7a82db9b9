// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use crate::errors::ExpressionError;
use std::fmt;

/// A boolean operator keyword.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operator {
    Or,
    And,
    Xor,
    Not,
    Nand,
}

impl Operator {
    pub const ALL: [Operator; 5] = [
        Operator::Or,
        Operator::And,
        Operator::Xor,
        Operator::Not,
        Operator::Nand,
    ];

    /// Matches a keyword case-insensitively.
    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|op| op.keyword().eq_ignore_ascii_case(word))
    }

    #[inline]
    pub fn keyword(self) -> &'static str {
        match self {
            Operator::Or => "or",
            Operator::And => "and",
            Operator::Xor => "xor",
            Operator::Not => "not",
            Operator::Nand => "nand",
        }
    }

    /// Binding strength, low to high: `or` < `and` < `xor` < `not` < `nand`.
    #[inline]
    pub fn precedence(self) -> u8 {
        match self {
            Operator::Or => 1,
            Operator::And => 2,
            Operator::Xor => 3,
            Operator::Not => 4,
            Operator::Nand => 5,
        }
    }

    #[inline]
    pub fn is_unary(self) -> bool {
        matches!(self, Operator::Not)
    }

    /// Applies a binary operator. `not` ignores `lhs` and negates `rhs`.
    #[inline]
    pub fn apply(self, lhs: bool, rhs: bool) -> bool {
        match self {
            Operator::Or => lhs || rhs,
            Operator::And => lhs && rhs,
            Operator::Xor => lhs ^ rhs,
            Operator::Not => !rhs,
            Operator::Nand => !(lhs && rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Variable(char),
    Operator(Operator),
    LeftParen,
    RightParen,
}

/// A token along with the byte offset it starts at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub position: usize,
}

/// Splits an expression into tokens.
///
/// Runs of ASCII letters are either an operator keyword (matched case-insensitively) or a
/// single-letter variable. Whitespace separates tokens and is otherwise ignored. Anything
/// else, including a multi-letter word that isn't a keyword, is a
/// [`ExpressionError::Token`].
pub fn tokenize(expr: &str) -> Result<Vec<Token>, ExpressionError> {
    let mut tokens = Vec::new();
    let mut chars = expr.char_indices().peekable();

    while let Some((position, ch)) = chars.next() {
        let kind = match ch {
            c if c.is_whitespace() => continue,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            c if c.is_ascii_alphabetic() => {
                let mut end = position + c.len_utf8();
                while let Some(&(next_pos, next)) = chars.peek() {
                    if !next.is_ascii_alphabetic() {
                        break;
                    }
                    end = next_pos + next.len_utf8();
                    chars.next();
                }

                let word = &expr[position..end];
                if let Some(op) = Operator::from_keyword(word) {
                    TokenKind::Operator(op)
                } else if word.len() == 1 {
                    TokenKind::Variable(c)
                } else {
                    return Err(ExpressionError::Token {
                        token: word.to_owned(),
                        position,
                    });
                }
            }
            other => {
                return Err(ExpressionError::Token {
                    token: other.to_string(),
                    position,
                })
            }
        };
        tokens.push(Token { kind, position });
    }

    Ok(tokens)
}
