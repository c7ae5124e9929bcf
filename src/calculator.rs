//! Arithmetic calculator.
//!
//! Input is parsed by a fixed grammar of numbers, `+ - * / %`, power (`^` or
//! `**`), unary sign and parentheses. Nothing else is accepted, so user text can never do more
//! than arithmetic.

#![allow(clippy::redundant_closure_call)]

use std::io::{BufRead, Write};

use tracing::debug;

use crate::controller::Console;
use crate::error::{AssistantError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Negate(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Self {
        Expr::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    pub fn eval(&self) -> Result<f64> {
        let value = match self {
            Expr::Number(n) => *n,
            Expr::Negate(inner) => -inner.eval()?,
            Expr::Binary(op, lhs, rhs) => {
                let (a, b) = (lhs.eval()?, rhs.eval()?);
                match op {
                    BinaryOp::Add => a + b,
                    BinaryOp::Subtract => a - b,
                    BinaryOp::Multiply => a * b,
                    BinaryOp::Divide | BinaryOp::Modulo if b == 0.0 => {
                        return Err(AssistantError::Expression("division by zero".to_string()))
                    }
                    BinaryOp::Divide => a / b,
                    BinaryOp::Modulo => a % b,
                    BinaryOp::Power => a.powf(b),
                }
            }
        };

        if value.is_finite() {
            Ok(value)
        } else {
            Err(AssistantError::Expression("result is not a finite number".to_string()))
        }
    }
}

peg::parser! {
    grammar arithmetic() for str {
        rule _()
            = [' ' | '\t']*

        // e.g. '42', '3.14', '.5', '2.'
        rule number() -> f64
            = n:$(['0'..='9']+ ("." ['0'..='9']*)? / "." ['0'..='9']+) {?
                n.parse().or(Err("number"))
            }

        rule term() -> Expr
            = precedence!{
                a:(@) _ "+" _ b:@ { Expr::binary(BinaryOp::Add, a, b) }
                a:(@) _ "-" _ b:@ { Expr::binary(BinaryOp::Subtract, a, b) }
                --
                a:(@) _ "*" _ b:@ { Expr::binary(BinaryOp::Multiply, a, b) }
                a:(@) _ "/" _ b:@ { Expr::binary(BinaryOp::Divide, a, b) }
                a:(@) _ "%" _ b:@ { Expr::binary(BinaryOp::Modulo, a, b) }
                --
                u:unary() { u }
            }

        // Sign binds looser than power: -2^2 is -(2^2), 2^-1 is 2^(-1).
        rule unary() -> Expr
            = "-" _ e:unary() { Expr::Negate(Box::new(e)) }
            / "+" _ e:unary() { e }
            / power()

        rule power() -> Expr
            = a:atom() _ ("**" / "^") _ b:unary() { Expr::binary(BinaryOp::Power, a, b) }
            / atom()

        rule atom() -> Expr
            = n:number() { Expr::Number(n) }
            / "(" _ e:term() _ ")" { e }

        pub rule expression() -> Expr
            = _ e:term() _ { e }
    }
}

pub fn parse(input: &str) -> Result<Expr> {
    arithmetic::expression(input).map_err(|e| AssistantError::Expression(e.to_string()))
}

pub fn evaluate(input: &str) -> Result<f64> {
    parse(input)?.eval()
}

/// Read and evaluate expressions until `exit`.
pub fn run<R: BufRead, W: Write>(console: &mut Console<R, W>) -> Result<()> {
    console.say("Calculator: enter an expression, or 'exit' to leave.")?;
    loop {
        let line = console.prompt("Expression: ")?;
        if line.trim().eq_ignore_ascii_case("exit") {
            return Ok(());
        }

        match evaluate(&line) {
            Ok(value) => console.say(format!("Result: {}", value))?,
            Err(e) => {
                debug!(input = %line, error = %e, "calculator rejected input");
                console.say(format!("Error: {}", e))?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::testing::{output, scripted};

    #[test]
    fn test_precedence() {
        assert_eq!(evaluate("2 + 3 * 4").unwrap(), 14.0);
        assert_eq!(evaluate("(2 + 3) * 4").unwrap(), 20.0);
        assert_eq!(evaluate("10 - 4 - 3").unwrap(), 3.0);
        assert_eq!(evaluate("2 ^ 3 ^ 2").unwrap(), 512.0);
        assert_eq!(evaluate("7 % 4").unwrap(), 3.0);
    }

    #[test]
    fn test_unary_sign() {
        assert_eq!(evaluate("-3 + 5").unwrap(), 2.0);
        assert_eq!(evaluate("-2 ^ 2").unwrap(), -4.0);
        assert_eq!(evaluate("4 * -2").unwrap(), -8.0);
        assert_eq!(evaluate("+1.5").unwrap(), 1.5);
    }

    #[test]
    fn test_signed_exponent_and_double_star() {
        assert_eq!(evaluate("2 ^ -1").unwrap(), 0.5);
        assert_eq!(evaluate("2 ** 3").unwrap(), 8.0);
        assert_eq!(evaluate("2 ** -2 ^ 2").unwrap(), 2f64.powf(-4.0));
        assert_eq!(evaluate("-2 ** 2").unwrap(), -4.0);
        assert_eq!(evaluate("3 * 2 ** 2").unwrap(), 12.0);
    }

    #[test]
    fn test_decimals_and_whitespace() {
        assert_eq!(evaluate("  .5 +\t2. ").unwrap(), 2.5);
        assert_eq!(evaluate("1/4").unwrap(), 0.25);
    }

    #[test]
    fn test_division_by_zero() {
        assert!(matches!(evaluate("1 / 0"), Err(AssistantError::Expression(_))));
        assert!(matches!(evaluate("1 % (2 - 2)"), Err(AssistantError::Expression(_))));
    }

    #[test]
    fn test_rejects_non_arithmetic() {
        for input in ["", "__import__('os')", "2 +", "abs(3)", "1 2", "(1"] {
            assert!(
                matches!(evaluate(input), Err(AssistantError::Expression(_))),
                "accepted {:?}",
                input
            );
        }
    }

    #[test]
    fn test_overflow_is_error() {
        assert!(evaluate("10 ^ 1000").is_err());
    }

    #[test]
    fn test_run_until_exit() {
        let mut console = scripted(&["1 + 1", "oops", "EXIT", "2 * 2"]);
        run(&mut console).unwrap();

        let out = output(console);
        assert!(out.contains("Result: 2"));
        assert!(out.contains("Error: Expression error"));
        assert!(!out.contains("Result: 4"));
    }
}
