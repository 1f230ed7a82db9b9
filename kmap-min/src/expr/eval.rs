// Copyright (c) The kmap-min Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::token::{Operator, Token, TokenKind};
use crate::errors::ExpressionError;
use log::trace;

#[derive(Clone, Copy, Debug)]
enum StackOp {
    LeftParen { position: usize },
    Operator(Operator),
}

/// Operator-precedence evaluator with an operand stack and an operator stack.
#[derive(Debug, Default)]
pub(super) struct StackMachine {
    operands: Vec<bool>,
    operators: Vec<StackOp>,
}

impl StackMachine {
    pub(super) fn run(
        mut self,
        tokens: &[Token],
        lookup: impl Fn(char) -> Option<bool>,
    ) -> Result<bool, ExpressionError> {
        // Operands and binary operators must alternate; prefix operators and `(` come
        // where an operand is expected.
        let mut expect_operand = true;
        let mut previous: Option<TokenKind> = None;

        for token in tokens {
            match token.kind {
                TokenKind::Variable(var) => {
                    if !expect_operand {
                        return Err(ExpressionError::UnexpectedOperand);
                    }
                    let value = lookup(var).ok_or(ExpressionError::UnboundVariable(var))?;
                    trace!("push {} = {}", var, value as u8);
                    self.operands.push(value);
                    expect_operand = false;
                }
                TokenKind::LeftParen => {
                    if !expect_operand {
                        return Err(ExpressionError::UnexpectedOperand);
                    }
                    self.operators.push(StackOp::LeftParen {
                        position: token.position,
                    });
                }
                TokenKind::RightParen => {
                    if expect_operand {
                        match previous {
                            Some(TokenKind::LeftParen) => {
                                return Err(ExpressionError::EmptyExpression)
                            }
                            Some(TokenKind::Operator(op)) => {
                                return Err(ExpressionError::MissingOperand {
                                    operator: op.keyword(),
                                })
                            }
                            _ => {}
                        }
                    }
                    self.close_paren(token.position)?;
                    expect_operand = false;
                }
                TokenKind::Operator(op) if op.is_unary() => {
                    if !expect_operand {
                        return Err(unexpected_operator(op, token.position));
                    }
                    // Prefix operators wait for their operand.
                    self.operators.push(StackOp::Operator(op));
                }
                TokenKind::Operator(op) => {
                    if expect_operand {
                        return Err(unexpected_operator(op, token.position));
                    }
                    while let Some(&StackOp::Operator(top)) = self.operators.last() {
                        if top.precedence() < op.precedence() {
                            break;
                        }
                        self.operators.pop();
                        self.apply(top)?;
                    }
                    self.operators.push(StackOp::Operator(op));
                    expect_operand = true;
                }
            }
            previous = Some(token.kind);
        }

        if let (true, Some(TokenKind::Operator(op))) = (expect_operand, previous) {
            return Err(ExpressionError::MissingOperand {
                operator: op.keyword(),
            });
        }

        while let Some(stack_op) = self.operators.pop() {
            match stack_op {
                StackOp::LeftParen { position } => {
                    return Err(ExpressionError::UnmatchedParen { position });
                }
                StackOp::Operator(op) => self.apply(op)?,
            }
        }

        match self.operands.len() {
            0 => Err(ExpressionError::EmptyExpression),
            1 => Ok(self.operands[0]),
            _ => Err(ExpressionError::UnexpectedOperand),
        }
    }

    fn close_paren(&mut self, position: usize) -> Result<(), ExpressionError> {
        loop {
            match self.operators.pop() {
                Some(StackOp::LeftParen { .. }) => return Ok(()),
                Some(StackOp::Operator(op)) => self.apply(op)?,
                None => return Err(ExpressionError::UnmatchedParen { position }),
            }
        }
    }

    fn apply(&mut self, op: Operator) -> Result<(), ExpressionError> {
        let missing = || ExpressionError::MissingOperand {
            operator: op.keyword(),
        };

        let rhs = self.operands.pop().ok_or_else(missing)?;
        let result = if op.is_unary() {
            let result = op.apply(false, rhs);
            trace!("{} {} = {}", op, rhs as u8, result as u8);
            result
        } else {
            let lhs = self.operands.pop().ok_or_else(missing)?;
            let result = op.apply(lhs, rhs);
            trace!("{} {} {} = {}", lhs as u8, op, rhs as u8, result as u8);
            result
        };
        self.operands.push(result);
        Ok(())
    }
}

fn unexpected_operator(op: Operator, position: usize) -> ExpressionError {
    ExpressionError::UnexpectedOperator {
        operator: op.keyword(),
        position,
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        errors::ExpressionError,
        expr::{evaluate, Assignment, Expression},
    };
    use proptest::prelude::*;

    fn assign(pairs: &[(char, bool)]) -> Assignment {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_and_scenario() {
        assert_eq!(
            evaluate("A and B", &assign(&[('A', true), ('B', false)])),
            Ok(false)
        );
        assert_eq!(
            evaluate("A and B", &assign(&[('A', true), ('B', true)])),
            Ok(true)
        );
    }

    #[test]
    fn test_operator_semantics() {
        let cases = [
            ("A or B", [false, true, true, true]),
            ("A and B", [false, false, false, true]),
            ("A xor B", [false, true, true, false]),
            ("A nand B", [true, true, true, false]),
        ];
        for (expr, expected) in cases {
            for (ix, &expected) in expected.iter().enumerate() {
                let a = ix & 2 != 0;
                let b = ix & 1 != 0;
                assert_eq!(
                    evaluate(expr, &assign(&[('A', a), ('B', b)])),
                    Ok(expected),
                    "{} with A = {}, B = {}",
                    expr,
                    a,
                    b
                );
            }
        }
    }

    #[test]
    fn test_precedence() {
        // or < and: A or (B and C)
        let a = assign(&[('A', true), ('B', false), ('C', false)]);
        assert_eq!(evaluate("A or B and C", &a), Ok(true));
        assert_eq!(evaluate("(A or B) and C", &a), Ok(false));

        // and < xor: A and (B xor C)
        let a = assign(&[('A', false), ('B', true), ('C', false)]);
        assert_eq!(evaluate("A and B xor C", &a), Ok(false));
        assert_eq!(evaluate("(A and B) xor C", &a), Ok(false));
        let a = assign(&[('A', true), ('B', true), ('C', true)]);
        assert_eq!(evaluate("A and B xor C", &a), Ok(false));
        assert_eq!(evaluate("(A and B) xor C", &a), Ok(false));
        let a = assign(&[('A', false), ('B', false), ('C', true)]);
        assert_eq!(evaluate("A and B xor C", &a), Ok(false));
        assert_eq!(evaluate("(A and B) xor C", &a), Ok(true));

        // xor < nand: A xor (B nand C)
        let a = assign(&[('A', true), ('B', true), ('C', true)]);
        assert_eq!(evaluate("A xor B nand C", &a), Ok(true));
        assert_eq!(evaluate("(A xor B) nand C", &a), Ok(true));
        let a = assign(&[('A', true), ('B', false), ('C', true)]);
        assert_eq!(evaluate("A xor B nand C", &a), Ok(false));
    }

    #[test]
    fn test_left_associative() {
        // (A nand B) nand C differs from A nand (B nand C) when A = B = 0, C = 1.
        let a = assign(&[('A', false), ('B', false), ('C', true)]);
        assert_eq!(evaluate("A nand B nand C", &a), Ok(false));
        assert_eq!(evaluate("A nand (B nand C)", &a), Ok(true));
    }

    #[test]
    fn test_not() {
        let a = assign(&[('A', true), ('B', false)]);
        assert_eq!(evaluate("not A", &a), Ok(false));
        assert_eq!(evaluate("not not A", &a), Ok(true));
        assert_eq!(evaluate("A and not B", &a), Ok(true));
        assert_eq!(evaluate("not A or B", &a), Ok(false));
        assert_eq!(evaluate("not (A and B)", &a), Ok(true));
        // nand binds tighter than not.
        let a = assign(&[('A', false), ('B', false)]);
        assert_eq!(evaluate("not A nand B", &a), Ok(false));
    }

    #[test]
    fn test_nested_parens() {
        let a = assign(&[('A', true), ('B', false), ('C', true), ('D', false)]);
        assert_eq!(evaluate("((A or B) and (C xor D))", &a), Ok(true));
        assert_eq!(evaluate("(((A)))", &a), Ok(true));
    }

    #[test]
    fn test_errors() {
        let a = assign(&[('A', true), ('B', false)]);
        assert_eq!(
            evaluate("A and C", &a),
            Err(ExpressionError::UnboundVariable('C'))
        );
        assert_eq!(
            evaluate("A and B)", &a),
            Err(ExpressionError::UnmatchedParen { position: 7 })
        );
        assert_eq!(
            evaluate("(A and B", &a),
            Err(ExpressionError::UnmatchedParen { position: 0 })
        );
        assert_eq!(evaluate("", &a), Err(ExpressionError::EmptyExpression));
        assert_eq!(evaluate("()", &a), Err(ExpressionError::EmptyExpression));
        assert_eq!(
            evaluate("A and", &a),
            Err(ExpressionError::MissingOperand { operator: "and" })
        );
        assert_eq!(
            evaluate("not", &a),
            Err(ExpressionError::MissingOperand { operator: "not" })
        );
        assert_eq!(
            evaluate("A (B)", &a),
            Err(ExpressionError::UnexpectedOperand)
        );
        assert_eq!(
            evaluate("(A and)", &a),
            Err(ExpressionError::MissingOperand { operator: "and" })
        );
        assert_eq!(evaluate(")", &a), Err(ExpressionError::UnmatchedParen { position: 0 }));
        assert!(matches!(
            evaluate("A + B", &a),
            Err(ExpressionError::Token { .. })
        ));
    }

    #[test]
    fn test_misplaced_tokens() {
        let a = assign(&[('A', true), ('B', false)]);
        let unexpected = |operator, position| ExpressionError::UnexpectedOperator {
            operator,
            position,
        };
        assert_eq!(evaluate("A not", &a), Err(unexpected("not", 2)));
        assert_eq!(evaluate("A not and B", &a), Err(unexpected("not", 2)));
        assert_eq!(evaluate("and A B", &a), Err(unexpected("and", 0)));
        assert_eq!(evaluate("A or or B", &a), Err(unexpected("or", 5)));
        assert_eq!(evaluate("not and A", &a), Err(unexpected("and", 4)));
        assert_eq!(evaluate("(or A)", &a), Err(unexpected("or", 1)));
        assert_eq!(
            evaluate("A B and", &a),
            Err(ExpressionError::UnexpectedOperand)
        );
        assert_eq!(
            evaluate("A B or", &a),
            Err(ExpressionError::UnexpectedOperand)
        );
        assert_eq!(
            evaluate("(A) B", &a),
            Err(ExpressionError::UnexpectedOperand)
        );
        assert_eq!(
            evaluate("A xor not", &a),
            Err(ExpressionError::MissingOperand { operator: "not" })
        );
    }

    proptest! {
        #[test]
        fn proptest_evaluate_deterministic(a: bool, b: bool, c: bool, d: bool) {
            let expr = Expression::parse("(A xor B) or not (C nand D) and A").unwrap();
            let assignment = assign(&[('A', a), ('B', b), ('C', c), ('D', d)]);
            let first = expr.evaluate(&assignment);
            prop_assert_eq!(&first, &expr.evaluate(&assignment));
            prop_assert_eq!(
                first,
                Ok((a ^ b) || (c && d && a)),
                "matches native evaluation",
            );
        }
    }
}
