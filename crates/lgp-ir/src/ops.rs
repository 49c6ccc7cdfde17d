//! Built-in operations.
//!
//! Every operation here is total: fallbacks replace results that would be
//! undefined, so an evolved program always produces a register state.

use crate::operation::Operation;

pub fn add() -> Operation {
    Operation::new("add", 2, |_, args| args[0] + args[1]).with_infix("+")
}

pub fn sub() -> Operation {
    Operation::new("sub", 2, |_, args| args[0] - args[1]).with_infix("-")
}

pub fn mul() -> Operation {
    Operation::new("mul", 2, |_, args| args[0] * args[1]).with_infix("*")
}

/// Protected division: zero when the divisor is zero
pub fn div() -> Operation {
    Operation::new("div", 2, |_, args| {
        if args[1] == 0.0 {
            0.0
        } else {
            args[0] / args[1]
        }
    })
    .with_infix("/")
}

/// 1.0 when both arguments are equal, 0.0 otherwise
pub fn eq() -> Operation {
    Operation::new("eq", 2, |_, args| if args[0] == args[1] { 1.0 } else { 0.0 })
}

/// Protected power: zero when the result is not finite
pub fn pow() -> Operation {
    Operation::new("pow", 2, |_, args| {
        let out = args[0].powf(args[1]);
        if out.is_finite() {
            out
        } else {
            0.0
        }
    })
}

pub fn min() -> Operation {
    Operation::new("min", 2, |_, args| args[0].min(args[1]))
}

pub fn max() -> Operation {
    Operation::new("max", 2, |_, args| args[0].max(args[1]))
}

pub fn neg() -> Operation {
    Operation::new("neg", 1, |_, args| -args[0])
}

pub fn abs() -> Operation {
    Operation::new("abs", 1, |_, args| args[0].abs())
}

/// The four arithmetic operations: add, sub, mul and protected div
pub fn arithmetic() -> Vec<Operation> {
    vec![add(), sub(), mul(), div()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(op: Operation, args: &[f64]) -> f64 {
        op.eval(&[0.0; 2], args)
    }

    #[test]
    fn test_arithmetic() {
        assert_eq!(eval(add(), &[2.0, 3.0]), 5.0);
        assert_eq!(eval(sub(), &[2.0, 3.0]), -1.0);
        assert_eq!(eval(mul(), &[2.0, 3.0]), 6.0);
        assert_eq!(eval(div(), &[3.0, 2.0]), 1.5);
        assert_eq!(arithmetic().len(), 4);
    }

    #[test]
    fn test_division_by_zero_returns_zero() {
        assert_eq!(eval(div(), &[3.0, 0.0]), 0.0);
        assert_eq!(eval(div(), &[0.0, 0.0]), 0.0);
    }

    #[test]
    fn test_pow_fallback() {
        assert_eq!(eval(pow(), &[2.0, 3.0]), 8.0);
        assert_eq!(eval(pow(), &[0.0, -1.0]), 0.0);
        assert_eq!(eval(pow(), &[-8.0, 0.5]), 0.0);
    }

    #[test]
    fn test_comparison_and_unary() {
        assert_eq!(eval(eq(), &[1.0, 1.0]), 1.0);
        assert_eq!(eval(eq(), &[1.0, 2.0]), 0.0);
        assert_eq!(eval(min(), &[1.0, 2.0]), 1.0);
        assert_eq!(eval(max(), &[1.0, 2.0]), 2.0);
        assert_eq!(eval(neg(), &[4.0]), -4.0);
        assert_eq!(eval(abs(), &[-4.0]), 4.0);
    }

    #[test]
    fn test_infix_symbols() {
        assert_eq!(add().infix(), Some("+"));
        assert_eq!(div().infix(), Some("/"));
        assert_eq!(pow().infix(), None);
    }
}
