//! Infix arithmetic over numbers, `e`, and `pi`, with parenthesised groups

use std::f64::consts;
use std::fmt;
use tracing::debug;

use crate::parsing::{any_of, lazy, literal, literals, optional, regex, separated_by, whitespace};
use crate::parsing::{Parser, Value};

/// Operators in the order they are tried. `**` has to come before `*`.
pub const OPERATORS: [&str; 6] = ["**", "*", "/", "+", "-", "%"];

/// A whole expression: values separated by operators. The result is the
/// flat list `[value, operator, value, ...]`; a parenthesised group
/// appears as a nested list.
pub fn expression() -> Parser {
    separated_by(operator(), value()).named("expression")
}

/// One of the binary operators, with any whitespace either side.
pub fn operator() -> Parser {
    literals(OPERATORS)
        .enclosed_by(&optional(whitespace()))
        .named("operator")
}

/// A single operand.
pub fn value() -> Parser {
    any_of([
        lazy(expression).between(&literal("("), &literal(")")),
        number(),
        literal("e"),
        literal("pi"),
    ])
    .named("value")
}

pub fn number() -> Parser {
    regex("[0-9]+(\\.[0-9]+)?").named("number")
}

#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationError {
    Empty,
    UnknownOperand(String),
    UnknownOperator(String),
    Malformed(String),
    DivisionByZero,
}

impl fmt::Display for EvaluationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationError::Empty => write!(f, "Nothing to evaluate"),
            EvaluationError::UnknownOperand(text) => write!(f, "Unknown operand '{}'", text),
            EvaluationError::UnknownOperator(text) => write!(f, "Unknown operator '{}'", text),
            EvaluationError::Malformed(text) => write!(f, "Malformed expression {}", text),
            EvaluationError::DivisionByZero => write!(f, "Division by zero"),
        }
    }
}

impl std::error::Error for EvaluationError {}

/// Compute the value of a tree produced by expression(). `**` binds
/// tightest and groups to the right; then `*`, `/`, and `%`; then `+` and
/// `-`, both left to right.
pub fn evaluate(value: &Value) -> Result<f64, EvaluationError> {
    match value {
        Value::Number(number) => Ok(*number),
        Value::Text(text) => operand(text),
        Value::List(values) => {
            if values.is_empty() {
                return Err(EvaluationError::Empty);
            }
            if values.len() % 2 == 0 {
                return Err(EvaluationError::Malformed(value.to_string()));
            }

            let mut operands = Vec::with_capacity(values.len() / 2 + 1);
            let mut operators = Vec::with_capacity(values.len() / 2);

            for (i, element) in values
                .iter()
                .enumerate()
            {
                if i % 2 == 0 {
                    operands.push(evaluate(element)?);
                } else {
                    match element.as_text() {
                        Some(symbol) if OPERATORS.contains(&symbol) => operators.push(symbol),
                        Some(symbol) => {
                            return Err(EvaluationError::UnknownOperator(symbol.to_string()))
                        }
                        None => return Err(EvaluationError::Malformed(value.to_string())),
                    }
                }
            }

            // right to left, so that 2**3**2 is 2**(3**2)
            let mut i = operators.len();
            while i > 0 {
                i -= 1;
                if operators[i] == "**" {
                    let right = operands.remove(i + 1);
                    operands[i] = operands[i].powf(right);
                    operators.remove(i);
                }
            }

            reduce(&mut operands, &mut operators, &["*", "/", "%"])?;
            reduce(&mut operands, &mut operators, &["+", "-"])?;

            debug!("evaluate: {} = {}", value, operands[0]);

            Ok(operands[0])
        }
    }
}

// Fold the operators in `level` left to right, leaving any others.
fn reduce(
    operands: &mut Vec<f64>,
    operators: &mut Vec<&str>,
    level: &[&str],
) -> Result<(), EvaluationError> {
    let mut i = 0;
    while i < operators.len() {
        if !level
            .iter()
            .any(|symbol| *symbol == operators[i])
        {
            i += 1;
            continue;
        }

        let right = operands.remove(i + 1);
        let left = operands[i];
        operands[i] = apply(operators[i], left, right)?;
        operators.remove(i);
    }
    Ok(())
}

fn apply(symbol: &str, left: f64, right: f64) -> Result<f64, EvaluationError> {
    match symbol {
        "**" => Ok(left.powf(right)),
        "*" => Ok(left * right),
        "/" | "%" if right == 0.0 => Err(EvaluationError::DivisionByZero),
        "/" => Ok(left / right),
        "%" => Ok(left % right),
        "+" => Ok(left + right),
        "-" => Ok(left - right),
        _ => Err(EvaluationError::UnknownOperator(symbol.to_string())),
    }
}

fn operand(text: &str) -> Result<f64, EvaluationError> {
    match text {
        "e" => Ok(consts::E),
        "pi" => Ok(consts::PI),
        _ => text
            .parse::<f64>()
            .map_err(|_| EvaluationError::UnknownOperand(text.to_string())),
    }
}
