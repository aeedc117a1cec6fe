use arch::cmp::{vcmp, Cmp};
use arch::reg::Reg;

/// Integer operand: a register or an embedded constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Value {
    Reg(Reg),
    Imm(i32),
}

/// Result of a comparison, consumed by a conditional branch.
///
/// Comparisons are not materialized; each branch on a condition becomes a
/// single compare-and-branch instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cond {
    Test(Cmp, Reg, Value),
    Const(bool),
}

impl Cond {
    pub(crate) fn new(op: Cmp, a: Value, b: Value) -> Cond {
        match (a, b) {
            (Value::Imm(x), Value::Imm(y)) => Cond::Const(vcmp(op, x, y)),
            (Value::Reg(r), rhs) => Cond::Test(op, r, rhs),
            (lhs @ Value::Imm(_), Value::Reg(r)) => Cond::Test(op.swap(), r, lhs),
        }
    }

    pub fn negate(self) -> Cond {
        match self {
            Cond::Test(op, r, rhs) => Cond::Test(op.negate(), r, rhs),
            Cond::Const(b) => Cond::Const(!b),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constants_fold() {
        assert_eq!(
            Cond::new(Cmp::GT, Value::Imm(3), Value::Imm(2)),
            Cond::Const(true)
        );
        assert_eq!(
            Cond::new(Cmp::EQ, Value::Imm(3), Value::Imm(2)).negate(),
            Cond::Const(true)
        );
    }

    #[test]
    fn register_moves_left() {
        assert_eq!(
            Cond::new(Cmp::GT, Value::Imm(5), Value::Reg(Reg::A0)),
            Cond::Test(Cmp::LT, Reg::A0, Value::Imm(5))
        );
        assert_eq!(
            Cond::new(Cmp::GT, Value::Reg(Reg::A0), Value::Imm(5)).negate(),
            Cond::Test(Cmp::LE, Reg::A0, Value::Imm(5))
        );
    }
}
