//! Аргументы командной строки и разовое вычисление.
//!
//! ```text
//! cli-calculator <operation> <num1> [num2]
//! ```
//!
//! # Пример
//!
//! ```
//! use cli_calculator::cli::evaluate;
//!
//! assert_eq!(evaluate("add", &["5", "3"]).unwrap(), "5 + 3 = 8");
//! assert_eq!(evaluate("sqrt", &["16"]).unwrap(), "√16 = 4");
//! assert!(evaluate("divide", &["1", "0"]).is_err());
//! ```

use clap::Parser as ClapParser;

use crate::CalcError;
use crate::arithmetic::{self, Operator};

/// Справка, которая печатается без аргументов, по `help` и `--help`.
pub const USAGE: &str = "\
CLI Calculator

Supported Operations:
  - Addition (+)
  - Subtraction (-)
  - Multiplication (×)
  - Division (÷)
  - Modulo (%)
  - Power (^)
  - Square root (√)

Usage:
  cli-calculator <operation> <number1> [number2]

Examples:
  cli-calculator add 5 3           # Output: 5 + 3 = 8
  cli-calculator subtract 10 4     # Output: 10 - 4 = 6
  cli-calculator multiply 6 7      # Output: 6 × 7 = 42
  cli-calculator divide 20 4       # Output: 20 ÷ 4 = 5
  cli-calculator modulo 7 3        # Output: 7 % 3 = 1
  cli-calculator power 2 8         # Output: 2 ^ 8 = 256
  cli-calculator sqrt 16           # Output: √16 = 4
  cli-calculator + 5 3             # Output: 5 + 3 = 8
  cli-calculator x 6 7             # Output: 6 × 7 = 42

Interactive Mode:
  cli-calculator interactive       # Start interactive calculator mode

Logging:
  RUST_LOG=debug cli-calculator interactive
";

/// Аргументы командной строки.
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None, override_help = USAGE)]
pub struct Args {
    /// Операция: add, subtract, multiply, divide, modulo, power, sqrt,
    /// их символы, `interactive` или `help`.
    pub operation: Option<String>,

    /// Операнды.
    #[arg(allow_negative_numbers = true)]
    pub operands: Vec<String>,
}

/// Что делать с разобранными аргументами.
#[derive(Debug, PartialEq, Eq)]
pub enum Mode<'a> {
    /// Напечатать справку.
    Usage,
    /// Интерактивный режим.
    Interactive,
    /// Разовое вычисление.
    OneShot {
        /// Операция как её ввёл пользователь.
        operation: &'a str,
        /// Операнды.
        operands: Vec<&'a str>,
    },
}

impl Args {
    /// Режим работы по аргументам.
    #[must_use]
    pub fn mode(&self) -> Mode<'_> {
        let Some(operation) = self.operation.as_deref() else {
            return Mode::Usage;
        };

        match operation.to_lowercase().as_str() {
            "help" => Mode::Usage,
            "interactive" => Mode::Interactive,
            _ => Mode::OneShot {
                operation,
                operands: self.operands.iter().map(String::as_str).collect(),
            },
        }
    }
}

/// Разовое вычисление: `"<num1> <symbol> <num2> = <result>"` для бинарных
/// операций и `"√<num1> = <result>"` для корня. Операнды выводятся так, как
/// их ввёл пользователь. Лишние операнды игнорируются.
///
/// # Ошибки
///
/// - [`CalcError::UnknownCommand`] для неизвестной операции;
/// - [`CalcError::MissingOperand`], если операндов не хватает;
/// - [`CalcError::InvalidArgument`], если операнд не число;
/// - [`CalcError::Arithmetic`] при ошибке вычисления.
pub fn evaluate(operation: &str, operands: &[&str]) -> Result<String, CalcError> {
    let name = operation.to_lowercase();

    if name == "sqrt" || name == "√" {
        let [text, ..] = operands else {
            return Err(CalcError::MissingOperand {
                operation: "sqrt",
                expected: 1,
            });
        };
        let root = arithmetic::square_root(parse_number(text)?)?;
        return Ok(format!("√{text} = {}", arithmetic::format_number(root)));
    }

    let operator =
        Operator::from_name(&name).ok_or_else(|| CalcError::UnknownCommand(operation.to_owned()))?;

    let [left, right, ..] = operands else {
        return Err(CalcError::MissingOperand {
            operation: operator_name(operator),
            expected: 2,
        });
    };

    log::debug!("one-shot {left} {operator} {right}");
    let result = operator.apply(parse_number(left)?, parse_number(right)?)?;
    Ok(format!(
        "{left} {operator} {right} = {}",
        arithmetic::format_number(result)
    ))
}

fn operator_name(operator: Operator) -> &'static str {
    match operator {
        Operator::Add => "add",
        Operator::Subtract => "subtract",
        Operator::Multiply => "multiply",
        Operator::Divide => "divide",
        Operator::Modulo => "modulo",
        Operator::Power => "power",
    }
}

/// Операнд командной строки: конечное число.
fn parse_number(text: &str) -> Result<f64, CalcError> {
    text.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| CalcError::InvalidArgument {
            value: text.to_owned(),
        })
}
