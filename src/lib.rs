//! # cli_calculator
//!
//! Консольный калькулятор с разовым и интерактивным режимами.
//!
//! Состоит из:
//! - [`arithmetic`]: чистые функции `+`, `-`, `×`, `÷`, `%`, `^`, `√` над `f64`;
//! - [`calculator`]: конечный автомат с дисплеем и отложенной операцией;
//! - [`command`]: разбор строки интерактивного режима в событие;
//! - [`cli`]: аргументы командной строки и разовое вычисление.
//!
//! # Пример использования
//!
//! ```
//! use cli_calculator::Calculator;
//! use cli_calculator::arithmetic::Operator;
//!
//! let mut calc = Calculator::new();
//! calc.input_digit(5).unwrap();
//! calc.set_operation(Operator::Add).unwrap();
//! calc.input_digit(3).unwrap();
//! calc.set_operation(Operator::Multiply).unwrap();
//! calc.input_digit(2).unwrap();
//! assert_eq!(calc.equals().unwrap(), "16");
//! ```

pub mod arithmetic;
pub mod calculator;
pub mod cli;
pub mod command;

use std::io::{self, BufRead, Write};

pub use calculator::Calculator;
pub use command::{Command, CommandError};

use arithmetic::ArithmeticError;

/// Общий тип ошибки калькулятора.
#[derive(Debug, thiserror::Error)]
pub enum CalcError {
    /// Ошибка вычисления (деление на ноль, корень из отрицательного и т.п.).
    #[error("{0}")]
    Arithmetic(#[from] ArithmeticError),

    /// Строка интерактивного режима не распознана.
    #[error("{0}")]
    Command(#[from] CommandError),

    /// Операнд не является конечным числом.
    #[error("Invalid number: {value:?}")]
    InvalidArgument {
        /// Исходный текст операнда.
        value: String,
    },

    /// Операндов меньше, чем нужно операции.
    #[error("{operation} requires {}", numbers(.expected))]
    MissingOperand {
        /// Имя операции.
        operation: &'static str,
        /// Сколько операндов нужно.
        expected: usize,
    },

    /// Цифра вне диапазона `0..=9`.
    #[error("Invalid digit: {0}")]
    InvalidDigit(u8),

    /// Неизвестная операция в разовом режиме.
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}

fn numbers(count: &usize) -> String {
    if *count == 1 {
        String::from("1 number")
    } else {
        format!("{count} numbers")
    }
}

/// Список команд интерактивного режима.
pub const COMMANDS: &str =
    "Commands: add, subtract, multiply, divide, modulo, power, sqrt, equals, clear, help, exit";

const INVALID_COMMAND: &str =
    "Invalid command. Try: add, subtract, multiply, divide, modulo, power, sqrt, equals, clear, help, or exit";

/// Запускает интерактивный калькулятор на stdin/stdout/stderr.
///
/// # Ошибки
///
/// Возвращает [`io::Error`] при ошибках чтения/записи.
pub fn run() -> io::Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let stderr = io::stderr();
    run_session(stdin.lock(), &mut stdout.lock(), &mut stderr.lock())
}

/// Интерактивная сессия над произвольными потоками.
///
/// Читает по одной строке, превращает её в [`Command`] и применяет к
/// одному [`Calculator`]. Ошибки вычисления и разбора печатаются в
/// `errors` как `Error: <сообщение>`, после чего цикл продолжается.
/// Сессия завершается командой `exit`/`quit` или концом ввода.
///
/// # Ошибки
///
/// Возвращает [`io::Error`] при ошибках чтения/записи.
pub fn run_session<R, W, E>(input: R, output: &mut W, errors: &mut E) -> io::Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut calc = Calculator::new();

    writeln!(output, "Interactive Calculator Mode")?;
    writeln!(output, "{COMMANDS}")?;
    writeln!(output)?;
    prompt(output, &calc)?;

    for line in input.lines() {
        let line = line?;

        let reply = command::parse_command(&line)
            .map_err(CalcError::from)
            .and_then(|cmd| apply(&mut calc, cmd));

        match reply {
            Ok(Reply::Silent) => {}
            Ok(Reply::Line(text)) => writeln!(output, "{text}")?,
            Ok(Reply::Exit) => break,
            Err(CalcError::Command(CommandError::Unknown(word))) => {
                log::debug!("unknown command {word:?}");
                writeln!(output, "{INVALID_COMMAND}")?;
            }
            Err(e) => writeln!(errors, "Error: {e}")?,
        }

        prompt(output, &calc)?;
    }

    writeln!(output, "Goodbye!")?;
    Ok(())
}

/// Отклик сессии на одну команду.
enum Reply {
    Silent,
    Line(String),
    Exit,
}

fn apply(calc: &mut Calculator, cmd: Command) -> Result<Reply, CalcError> {
    let reply = match cmd {
        Command::Empty => Reply::Silent,
        Command::Exit => Reply::Exit,
        Command::Help => Reply::Line(COMMANDS.to_owned()),
        Command::Clear => Reply::Line(format!("Cleared. Display: {}", calc.clear())),
        Command::Operation { operator, operand } => {
            calc.set_operation(operator)?;
            calc.input_number(operand)?;
            Reply::Silent
        }
        Command::Equals => Reply::Line(format!("Result: {}", calc.equals()?)),
        Command::SquareRoot => Reply::Line(format!("Result: {}", calc.square_root()?)),
        Command::Number(n) => Reply::Line(format!("Input: {}", calc.input_number(n)?)),
    };
    Ok(reply)
}

fn prompt<W: Write>(output: &mut W, calc: &Calculator) -> io::Result<()> {
    write!(output, "Display: {}\n> ", calc.display())?;
    output.flush()
}
