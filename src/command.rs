//! Разбор строки интерактивного режима.
//!
//! Строка делится по пробелам; первое слово выбирает команду, второе
//! (для операторов) задаёт операнд.
//!
//! # Пример
//!
//! ```
//! use cli_calculator::command::{parse_command, Command};
//! use cli_calculator::arithmetic::Operator;
//!
//! assert_eq!(
//!     parse_command("add 5").unwrap(),
//!     Command::Operation { operator: Operator::Add, operand: 5 }
//! );
//! assert_eq!(parse_command("=").unwrap(), Command::Equals);
//! ```

use thiserror::Error;

use crate::arithmetic::Operator;

/// Событие, полученное из одной строки ввода.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Пустая строка.
    Empty,
    /// Оператор с правым операндом: `add 5`, `× 3`.
    Operation {
        /// Оператор.
        operator: Operator,
        /// Операнд, вводится по цифрам.
        operand: u64,
    },
    /// `equals` или `=`.
    Equals,
    /// `clear` или `c`.
    Clear,
    /// `sqrt` или `√`, корень из значения на дисплее.
    SquareRoot,
    /// Число без команды.
    Number(u64),
    /// `help`.
    Help,
    /// `exit` или `quit`.
    Exit,
}

/// Ошибка разбора строки.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Первое слово не является ни командой, ни числом.
    #[error("Invalid command: {0}")]
    Unknown(String),
    /// Операнд отсутствует или не является числом.
    #[error("Please provide a valid number")]
    InvalidNumber(String),
    /// Операнд отрицательный или слишком большой.
    #[error("Number out of range: {0}")]
    OutOfRange(String),
}

/// Разбирает строку в [`Command`]. Регистр слов не важен, лишние слова
/// игнорируются.
///
/// # Ошибки
///
/// [`CommandError`], если строка не распознана или операнд некорректен.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let mut words = line.split_whitespace();
    let Some(first) = words.next() else {
        return Ok(Command::Empty);
    };

    let command = match first.to_lowercase().as_str() {
        "exit" | "quit" => Command::Exit,
        "clear" | "c" => Command::Clear,
        "equals" | "=" => Command::Equals,
        "sqrt" | "√" => Command::SquareRoot,
        "help" => Command::Help,
        word => {
            if let Some(operator) = Operator::from_name(word) {
                let operand = parse_operand(words.next().unwrap_or_default())?;
                Command::Operation { operator, operand }
            } else if word.parse::<f64>().is_ok() {
                Command::Number(parse_operand(word)?)
            } else {
                return Err(CommandError::Unknown(first.to_owned()));
            }
        }
    };

    Ok(command)
}

/// Операнд округляется вниз до целого и должен помещаться в `u64`.
fn parse_operand(text: &str) -> Result<u64, CommandError> {
    let value: f64 = text
        .parse()
        .map_err(|_| CommandError::InvalidNumber(text.to_owned()))?;

    if !value.is_finite() {
        return Err(CommandError::InvalidNumber(text.to_owned()));
    }

    let whole = value.floor();
    // u64::MAX as f64 == 2^64
    if whole < 0.0 || whole >= u64::MAX as f64 {
        return Err(CommandError::OutOfRange(text.to_owned()));
    }

    Ok(whole as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords() {
        assert_eq!(parse_command("exit"), Ok(Command::Exit));
        assert_eq!(parse_command("QUIT"), Ok(Command::Exit));
        assert_eq!(parse_command("clear"), Ok(Command::Clear));
        assert_eq!(parse_command("c"), Ok(Command::Clear));
        assert_eq!(parse_command("equals"), Ok(Command::Equals));
        assert_eq!(parse_command("="), Ok(Command::Equals));
        assert_eq!(parse_command("sqrt"), Ok(Command::SquareRoot));
        assert_eq!(parse_command("help"), Ok(Command::Help));
    }

    #[test]
    fn empty_line() {
        assert_eq!(parse_command(""), Ok(Command::Empty));
        assert_eq!(parse_command("   \t"), Ok(Command::Empty));
    }

    #[test]
    fn operators_with_operand() {
        let cases = [
            ("add 5", Operator::Add, 5),
            ("+ 5", Operator::Add, 5),
            ("subtract 4", Operator::Subtract, 4),
            ("- 4", Operator::Subtract, 4),
            ("multiply 6", Operator::Multiply, 6),
            ("x 6", Operator::Multiply, 6),
            ("× 6", Operator::Multiply, 6),
            ("divide 2", Operator::Divide, 2),
            ("÷ 2", Operator::Divide, 2),
            ("mod 3", Operator::Modulo, 3),
            ("pow 8", Operator::Power, 8),
            ("  Add   12  extra", Operator::Add, 12),
        ];
        for (line, operator, operand) in cases {
            assert_eq!(
                parse_command(line),
                Ok(Command::Operation { operator, operand }),
                "{line:?}"
            );
        }
    }

    #[test]
    fn fractional_operand_is_floored() {
        assert_eq!(
            parse_command("add 3.9"),
            Ok(Command::Operation {
                operator: Operator::Add,
                operand: 3
            })
        );
        assert_eq!(parse_command("7.5"), Ok(Command::Number(7)));
    }

    #[test]
    fn operator_without_number() {
        assert_eq!(
            parse_command("add"),
            Err(CommandError::InvalidNumber(String::new()))
        );
        assert_eq!(
            parse_command("add five"),
            Err(CommandError::InvalidNumber("five".into()))
        );
    }

    #[test]
    fn negative_operand_out_of_range() {
        assert_eq!(
            parse_command("add -3"),
            Err(CommandError::OutOfRange("-3".into()))
        );
        assert_eq!(
            parse_command("-3"),
            Err(CommandError::OutOfRange("-3".into()))
        );
    }

    #[test]
    fn bare_number() {
        assert_eq!(parse_command("42"), Ok(Command::Number(42)));
        assert_eq!(parse_command("0"), Ok(Command::Number(0)));
    }

    #[test]
    fn unknown_word() {
        assert_eq!(
            parse_command("Hello world"),
            Err(CommandError::Unknown("Hello".into()))
        );
        assert_eq!(
            CommandError::Unknown("foo".into()).to_string(),
            "Invalid command: foo"
        );
    }
}
