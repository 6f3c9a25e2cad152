//! Конечный автомат калькулятора.
//!
//! Хранит текст дисплея, отложенную операцию и флаг ожидания нового
//! операнда. Каждое событие (цифра, оператор, равно, сброс) обрабатывается
//! целиком и возвращает новое содержимое дисплея.
//!
//! Операторы сворачиваются слева направо, без приоритетов: `5 + 3 × 2`
//! даёт `16`.
//!
//! # Примеры
//!
//! ```
//! use cli_calculator::Calculator;
//! use cli_calculator::arithmetic::Operator;
//!
//! let mut calc = Calculator::new();
//! calc.input_digit(2).unwrap();
//! calc.set_operation(Operator::Add).unwrap();
//! calc.input_digit(3).unwrap();
//! assert_eq!(calc.equals().unwrap(), "5");
//! ```

use log::{debug, trace};

use crate::CalcError;
use crate::arithmetic::{self, ArithmeticError, Operator};

/// Операнд, запомненный при выборе оператора, и сам оператор.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PendingOperation {
    /// Левый операнд.
    pub value: f64,
    /// Выбранный оператор.
    pub operator: Operator,
}

/// Состояние одной сессии калькулятора.
///
/// Отложенный операнд и оператор хранятся вместе, поэтому оператор без
/// операнда невозможен.
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    pending: Option<PendingOperation>,
    waiting_for_new_value: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: String::from("0"),
            pending: None,
            waiting_for_new_value: false,
        }
    }
}

impl Calculator {
    /// Создаёт калькулятор в начальном состоянии (дисплей `0`).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Текущее содержимое дисплея.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Операнд, запомненный при выборе оператора.
    #[must_use]
    pub fn previous_value(&self) -> Option<f64> {
        self.pending.map(|p| p.value)
    }

    /// Отложенный оператор.
    #[must_use]
    pub fn operation(&self) -> Option<Operator> {
        self.pending.map(|p| p.operator)
    }

    /// Начнёт ли следующая цифра новый операнд.
    #[must_use]
    pub const fn is_waiting_for_new_value(&self) -> bool {
        self.waiting_for_new_value
    }

    /// Ввод одной цифры `0..=9`.
    ///
    /// После оператора или `=` цифра начинает новый операнд, иначе
    /// дописывается к дисплею. Ведущий ноль заменяется.
    ///
    /// # Ошибки
    ///
    /// - [`CalcError::InvalidDigit`], если `digit > 9`;
    /// - [`ArithmeticError::Overflow`], если с новой цифрой дисплей перестаёт
    ///   быть конечным числом.
    ///
    /// В обоих случаях состояние не меняется.
    pub fn input_digit(&mut self, digit: u8) -> Result<&str, CalcError> {
        if digit > 9 {
            return Err(CalcError::InvalidDigit(digit));
        }
        self.push_digit(char::from(b'0' + digit))?;
        Ok(&self.display)
    }

    /// Ввод многозначного числа: каждая десятичная цифра подаётся как
    /// отдельное событие [`Calculator::input_digit`].
    ///
    /// # Ошибки
    ///
    /// [`ArithmeticError::Overflow`], если дисплей перестаёт быть конечным
    /// числом. Число тогда не вводится целиком.
    pub fn input_number(&mut self, number: u64) -> Result<&str, CalcError> {
        let mut next = self.clone();
        for ch in number.to_string().chars() {
            next.push_digit(ch)?;
        }
        *self = next;
        Ok(&self.display)
    }

    fn push_digit(&mut self, ch: char) -> Result<(), CalcError> {
        trace!("digit {ch} (display {:?})", self.display);

        let display = if self.waiting_for_new_value || self.display == "0" {
            ch.to_string()
        } else {
            format!("{}{ch}", self.display)
        };

        // Слишком длинная строка цифр разбирается в бесконечность.
        if !display.parse::<f64>().is_ok_and(f64::is_finite) {
            debug!("digit {ch} rejected: display would overflow");
            return Err(ArithmeticError::Overflow.into());
        }

        self.display = display;
        self.waiting_for_new_value = false;
        Ok(())
    }

    /// Выбор оператора.
    ///
    /// Если операция уже отложена, она сразу сворачивается с текущим
    /// операндом, и результат становится новым левым операндом.
    ///
    /// # Ошибки
    ///
    /// Арифметическая ошибка свёртки. Состояние при этом не меняется.
    pub fn set_operation(&mut self, operator: Operator) -> Result<&str, CalcError> {
        trace!("operator {operator} (display {:?})", self.display);
        let current = self.current_value()?;

        let value = match self.pending {
            None => current,
            Some(pending) => {
                let result = Self::fold(pending, current)?;
                self.display = arithmetic::format_number(result);
                result
            }
        };

        self.pending = Some(PendingOperation { value, operator });
        self.waiting_for_new_value = true;
        Ok(&self.display)
    }

    /// Завершение вычисления.
    ///
    /// Без отложенной операции ничего не делает, поэтому повторное `=`
    /// оставляет дисплей прежним.
    ///
    /// # Ошибки
    ///
    /// Арифметическая ошибка свёртки. Состояние при этом не меняется.
    pub fn equals(&mut self) -> Result<&str, CalcError> {
        trace!("equals (display {:?})", self.display);
        let Some(pending) = self.pending else {
            return Ok(&self.display);
        };

        let current = self.current_value()?;
        let result = Self::fold(pending, current)?;

        self.display = arithmetic::format_number(result);
        self.pending = None;
        self.waiting_for_new_value = true;
        Ok(&self.display)
    }

    /// Квадратный корень из значения на дисплее. Отложенная операция
    /// сохраняется, корень становится её правым операндом.
    ///
    /// # Ошибки
    ///
    /// [`ArithmeticError::NegativeRoot`] для отрицательного значения.
    pub fn square_root(&mut self) -> Result<&str, CalcError> {
        trace!("square root (display {:?})", self.display);
        let current = self.current_value()?;
        let root = arithmetic::square_root(current).inspect_err(|err| {
            debug!("square root of {current} failed: {err}");
        })?;

        self.display = arithmetic::format_number(root);
        self.waiting_for_new_value = true;
        Ok(&self.display)
    }

    /// Сброс в начальное состояние.
    pub fn clear(&mut self) -> &str {
        trace!("clear");
        *self = Self::default();
        &self.display
    }

    fn current_value(&self) -> Result<f64, CalcError> {
        self.display
            .parse()
            .map_err(|_| CalcError::InvalidArgument {
                value: self.display.clone(),
            })
    }

    fn fold(pending: PendingOperation, current: f64) -> Result<f64, CalcError> {
        let PendingOperation { value, operator } = pending;

        match operator.apply(value, current) {
            Ok(result) => {
                debug!("fold {value} {operator} {current} = {result}");
                Ok(result)
            }
            Err(err) => {
                debug!("fold {value} {operator} {current} failed: {err}");
                Err(err.into())
            }
        }
    }
}
