//! Toy calculator behind the DevOps demo's `/api/calculate` route.

use serde_json::{Number, Value};

/// Result text returned instead of a number when dividing by zero.
pub const DIVISION_BY_ZERO: &str = "Error: Division by zero";

// Largest integer an f64 represents exactly
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "add" => Some(Operation::Add),
            "subtract" => Some(Operation::Subtract),
            "multiply" => Some(Operation::Multiply),
            "divide" => Some(Operation::Divide),
            _ => None,
        }
    }
}

/// Apply `op` to two JSON numbers.
///
/// Integer inputs stay integers where the result is exact; division by zero
/// yields [`DIVISION_BY_ZERO`] as a string and non-finite results become `null`.
pub fn calculate(op: Operation, a: &Number, b: &Number) -> Value {
    if let (Some(x), Some(y)) = (a.as_i64(), b.as_i64()) {
        let exact = match op {
            Operation::Add => x.checked_add(y),
            Operation::Subtract => x.checked_sub(y),
            Operation::Multiply => x.checked_mul(y),
            Operation::Divide if y != 0 && x.checked_rem(y) == Some(0) => x.checked_div(y),
            Operation::Divide => None,
        };
        if let Some(result) = exact {
            return Value::from(result);
        }
    }

    let x = a.as_f64().unwrap_or(f64::NAN);
    let y = b.as_f64().unwrap_or(f64::NAN);

    let result = match op {
        Operation::Add => x + y,
        Operation::Subtract => x - y,
        Operation::Multiply => x * y,
        Operation::Divide if y == 0.0 => return Value::from(DIVISION_BY_ZERO),
        Operation::Divide => x / y,
    };

    number_value(result)
}

fn number_value(n: f64) -> Value {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < MAX_EXACT_INT {
        // Exact conversion: integral and within the 53-bit mantissa
        return Value::from(n as i64);
    }
    Number::from_f64(n).map_or(Value::Null, Value::Number)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(v: f64) -> Number {
        Number::from_f64(v).unwrap()
    }

    fn i(v: i64) -> Number {
        Number::from(v)
    }

    #[test]
    fn test_integer_operations() {
        assert_eq!(calculate(Operation::Add, &i(5), &i(3)), Value::from(8));
        assert_eq!(calculate(Operation::Subtract, &i(5), &i(8)), Value::from(-3));
        assert_eq!(calculate(Operation::Multiply, &i(4), &i(5)), Value::from(20));
        assert_eq!(calculate(Operation::Divide, &i(10), &i(2)), Value::from(5));
    }

    #[test]
    fn test_inexact_division_is_fractional() {
        assert_eq!(calculate(Operation::Divide, &i(7), &i(2)), Value::from(3.5));
    }

    #[test]
    fn test_division_by_zero() {
        assert_eq!(
            calculate(Operation::Divide, &i(10), &i(0)),
            Value::from(DIVISION_BY_ZERO)
        );
        assert_eq!(
            calculate(Operation::Divide, &n(1.5), &n(0.0)),
            Value::from(DIVISION_BY_ZERO)
        );
    }

    #[test]
    fn test_float_results_normalized() {
        assert_eq!(calculate(Operation::Add, &n(0.5), &n(0.5)), Value::from(1));
        assert_eq!(calculate(Operation::Multiply, &n(1.5), &i(3)), Value::from(4.5));
    }

    #[test]
    fn test_overflow_falls_back_to_float() {
        let result = calculate(Operation::Multiply, &i(i64::MAX), &i(2));
        assert!(result.as_f64().unwrap() > 1e18);
    }

    #[test]
    fn test_non_finite_result_is_null() {
        assert_eq!(calculate(Operation::Multiply, &n(1e308), &n(10.0)), Value::Null);
    }

    #[test]
    fn test_parse_operation() {
        assert_eq!(Operation::parse("divide"), Some(Operation::Divide));
        assert_eq!(Operation::parse("Divide"), None);
        assert_eq!(Operation::parse("invalid"), None);
    }
}
