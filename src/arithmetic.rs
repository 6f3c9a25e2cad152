//! Арифметическое ядро калькулятора.
//!
//! Чистые функции над `f64` и перечисление [`Operator`] для бинарных
//! операций, которые умеет откладывать конечный автомат калькулятора.
//!
//! # Примеры
//!
//! ```
//! use cli_calculator::arithmetic::{calculate, divide, Operator};
//!
//! assert_eq!(Operator::Add.apply(2.0, 3.0), Ok(5.0));
//! assert_eq!(divide(20.0, 4.0), Ok(5.0));
//! assert!(divide(1.0, 0.0).is_err());
//!
//! // Неизвестный символ оператора: возвращается второй операнд.
//! assert_eq!(calculate(5.0, 3.0, '?'), Ok(3.0));
//! ```

use std::fmt::Display;

use thiserror::Error;

/// Ошибки арифметических операций.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticError {
    /// Деление на ноль.
    #[error("Cannot divide by zero")]
    DivideByZero,
    /// Остаток от деления на ноль.
    #[error("Cannot take modulo by zero")]
    ModuloByZero,
    /// Квадратный корень из отрицательного числа.
    #[error("Cannot take square root of a negative number")]
    NegativeRoot,
    /// Отрицательное основание в дробной степени.
    #[error("Result is not a real number")]
    NonRealResult,
    /// Результат не помещается в конечное `f64`.
    #[error("Result is too large")]
    Overflow,
}

/// Сложение.
#[must_use]
pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

/// Вычитание.
#[must_use]
pub fn subtract(a: f64, b: f64) -> f64 {
    a - b
}

/// Умножение.
#[must_use]
pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Деление.
///
/// # Ошибки
///
/// [`ArithmeticError::DivideByZero`], если `b == 0`.
pub fn divide(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::DivideByZero);
    }
    Ok(a / b)
}

/// Остаток от деления. Знак результата совпадает со знаком делимого
/// (`-7 % 3 == -1`), это не математический модуль.
///
/// # Ошибки
///
/// [`ArithmeticError::ModuloByZero`], если `b == 0`.
pub fn modulo(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if b == 0.0 {
        return Err(ArithmeticError::ModuloByZero);
    }
    Ok(a % b)
}

/// Возведение `a` в степень `b`. Показатель может быть отрицательным,
/// нулевым или дробным.
///
/// # Ошибки
///
/// [`ArithmeticError::NonRealResult`] для отрицательного основания с дробным
/// показателем: вещественного результата нет, и `NaN` наружу не отдаём.
pub fn power(a: f64, b: f64) -> Result<f64, ArithmeticError> {
    if a < 0.0 && b.fract() != 0.0 {
        return Err(ArithmeticError::NonRealResult);
    }
    Ok(a.powf(b))
}

/// Неотрицательный квадратный корень.
///
/// # Ошибки
///
/// [`ArithmeticError::NegativeRoot`], если `a < 0`.
pub fn square_root(a: f64) -> Result<f64, ArithmeticError> {
    if a < 0.0 {
        return Err(ArithmeticError::NegativeRoot);
    }
    Ok(a.sqrt())
}

/// Бинарные операции, которые можно отложить до следующего операнда.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// Сложение `+`.
    Add,
    /// Вычитание `-`.
    Subtract,
    /// Умножение `×`.
    Multiply,
    /// Деление `÷`.
    Divide,
    /// Остаток `%`.
    Modulo,
    /// Степень `^`.
    Power,
}

impl Operator {
    /// Все операторы в порядке объявления.
    pub const ALL: [Self; 6] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Modulo,
        Self::Power,
    ];

    /// Символ оператора для вывода.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Add => '+',
            Self::Subtract => '-',
            Self::Multiply => '×',
            Self::Divide => '÷',
            Self::Modulo => '%',
            Self::Power => '^',
        }
    }

    /// Оператор по его символу (обратное к [`Operator::symbol`]).
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Оператор по имени команды или её короткой форме, без учёта регистра:
    /// `add`/`+`, `subtract`/`-`, `multiply`/`x`/`×`, `divide`/`÷`,
    /// `modulo`/`mod`/`%`, `power`/`pow`/`^`.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let op = match name.to_lowercase().as_str() {
            "add" | "+" => Self::Add,
            "subtract" | "-" => Self::Subtract,
            "multiply" | "x" | "×" => Self::Multiply,
            "divide" | "÷" => Self::Divide,
            "modulo" | "mod" | "%" => Self::Modulo,
            "power" | "pow" | "^" => Self::Power,
            _ => return None,
        };
        Some(op)
    }

    /// Применить операцию к операндам.
    ///
    /// # Ошибки
    ///
    /// - [`ArithmeticError::DivideByZero`], [`ArithmeticError::ModuloByZero`],
    ///   [`ArithmeticError::NonRealResult`] от соответствующих функций.
    /// - [`ArithmeticError::Overflow`], если результат не конечен.
    pub fn apply(self, left: f64, right: f64) -> Result<f64, ArithmeticError> {
        let result = match self {
            Self::Add => add(left, right),
            Self::Subtract => subtract(left, right),
            Self::Multiply => multiply(left, right),
            Self::Divide => divide(left, right)?,
            Self::Modulo => modulo(left, right)?,
            Self::Power => power(left, right)?,
        };

        if result.is_finite() {
            Ok(result)
        } else {
            Err(ArithmeticError::Overflow)
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Диспетчер по символу оператора.
///
/// Неизвестный символ не считается ошибкой: возвращается `current` без
/// изменений. Это поведение сохранено ради совместимости.
///
/// # Ошибки
///
/// Те же, что у [`Operator::apply`].
pub fn calculate(previous: f64, current: f64, symbol: char) -> Result<f64, ArithmeticError> {
    match Operator::from_symbol(symbol) {
        Some(op) => op.apply(previous, current),
        None => {
            log::debug!("unknown operator {symbol:?}, keeping {current}");
            Ok(current)
        }
    }
}

/// Текстовая форма числа для дисплея. Отрицательный ноль выводится как `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    // -0.0 + 0.0 == +0.0
    (value + 0.0).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPERANDS: [f64; 9] = [0.0, 1.0, -1.0, 2.5, -7.0, 3.0, 45.0, 1e-3, -123.456];

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn basic_operations() {
        assert_eq!(add(5.0, 3.0), 8.0);
        assert_eq!(subtract(10.0, 4.0), 6.0);
        assert_eq!(multiply(6.0, 7.0), 42.0);
        assert_eq!(divide(20.0, 4.0), Ok(5.0));
        assert_eq!(modulo(7.0, 3.0), Ok(1.0));
        assert_eq!(power(2.0, 10.0), Ok(1024.0));
        assert_eq!(square_root(81.0), Ok(9.0));
    }

    #[test]
    fn divide_then_multiply_restores_dividend() {
        for a in OPERANDS {
            for b in OPERANDS.into_iter().filter(|&b| b != 0.0) {
                let q = divide(a, b).unwrap();
                assert!(approx_eq(q * b, a), "{a} / {b} = {q}");
            }
        }
    }

    #[test]
    fn modulo_follows_dividend_sign() {
        assert_eq!(modulo(-7.0, 3.0), Ok(-1.0));
        assert_eq!(modulo(7.0, -3.0), Ok(1.0));

        for a in OPERANDS {
            for b in OPERANDS.into_iter().filter(|&b| b != 0.0) {
                let r = modulo(a, b).unwrap();
                assert!(r == 0.0 || r.signum() == a.signum(), "{a} % {b} = {r}");
            }
        }
    }

    #[test]
    fn zero_divisor_fails() {
        for a in OPERANDS {
            assert_eq!(divide(a, 0.0), Err(ArithmeticError::DivideByZero));
            assert_eq!(modulo(a, 0.0), Err(ArithmeticError::ModuloByZero));
        }
    }

    #[test]
    fn power_exponents() {
        for a in OPERANDS.into_iter().filter(|&a| a != 0.0) {
            assert_eq!(power(a, 0.0), Ok(1.0));
        }
        assert_eq!(power(2.0, -2.0), Ok(0.25));
        assert!(approx_eq(power(9.0, 0.5).unwrap(), 3.0));
        assert_eq!(power(-2.0, 3.0), Ok(-8.0));
    }

    #[test]
    fn power_negative_base_fractional_exponent_rejected() {
        assert_eq!(power(-8.0, 0.5), Err(ArithmeticError::NonRealResult));
        assert_eq!(power(-1.0, -1.5), Err(ArithmeticError::NonRealResult));
    }

    #[test]
    fn square_root_squares_back() {
        for x in [0.0, 1.0, 2.0, 0.25, 1e6, 123.456] {
            let r = square_root(x).unwrap();
            assert!(r >= 0.0);
            assert!(approx_eq(r * r, x), "sqrt({x}) = {r}");
        }
    }

    #[test]
    fn square_root_of_negative_fails() {
        for x in [-1.0, -0.5, -1e9] {
            assert_eq!(square_root(x), Err(ArithmeticError::NegativeRoot));
        }
    }

    #[test]
    fn operator_symbols_roundtrip() {
        for op in Operator::ALL {
            assert_eq!(Operator::from_symbol(op.symbol()), Some(op));
        }
        assert_eq!(Operator::from_symbol('?'), None);
        assert_eq!(Operator::Multiply.to_string(), "×");
    }

    #[test]
    fn operator_names() {
        assert_eq!(Operator::from_name("add"), Some(Operator::Add));
        assert_eq!(Operator::from_name("ADD"), Some(Operator::Add));
        assert_eq!(Operator::from_name("-"), Some(Operator::Subtract));
        assert_eq!(Operator::from_name("x"), Some(Operator::Multiply));
        assert_eq!(Operator::from_name("×"), Some(Operator::Multiply));
        assert_eq!(Operator::from_name("÷"), Some(Operator::Divide));
        assert_eq!(Operator::from_name("mod"), Some(Operator::Modulo));
        assert_eq!(Operator::from_name("^"), Some(Operator::Power));
        assert_eq!(Operator::from_name("equals"), None);
    }

    #[test]
    fn apply_reports_overflow() {
        assert_eq!(
            Operator::Power.apply(10.0, 400.0),
            Err(ArithmeticError::Overflow)
        );
        assert_eq!(
            Operator::Multiply.apply(f64::MAX, 2.0),
            Err(ArithmeticError::Overflow)
        );
    }

    #[test]
    fn calculate_dispatches_by_symbol() {
        assert_eq!(calculate(5.0, 3.0, '+'), Ok(8.0));
        assert_eq!(calculate(5.0, 3.0, '-'), Ok(2.0));
        assert_eq!(calculate(5.0, 3.0, '×'), Ok(15.0));
        assert_eq!(calculate(6.0, 3.0, '÷'), Ok(2.0));
        assert_eq!(calculate(5.0, 3.0, '%'), Ok(2.0));
        assert_eq!(calculate(5.0, 3.0, '^'), Ok(125.0));
        assert_eq!(calculate(5.0, 0.0, '÷'), Err(ArithmeticError::DivideByZero));
    }

    #[test]
    fn calculate_unknown_symbol_returns_current() {
        assert_eq!(calculate(5.0, 3.0, '?'), Ok(3.0));
        assert_eq!(calculate(5.0, 0.0, '/'), Ok(0.0));
    }

    #[test]
    fn format_number_native_text() {
        assert_eq!(format_number(5.0), "5");
        assert_eq!(format_number(2.5), "2.5");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
    }
}
