use num_enum::{IntoPrimitive, TryFromPrimitive};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Comparison performed by a conditional branch.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Default,
    TryFromPrimitive,
    IntoPrimitive,
    EnumString,
    Display,
)]
#[repr(u8)]
#[strum(serialize_all = "lowercase")]
pub enum Cmp {
    #[default]
    EQ,
    NE,
    GT,
    LE,
    LT,
    GE,
}

impl Cmp {
    /// Comparison that holds exactly when `self` does not.
    pub fn negate(self) -> Self {
        use Cmp::*;
        match self {
            EQ => NE,
            NE => EQ,
            GT => LE,
            LE => GT,
            LT => GE,
            GE => LT,
        }
    }

    /// Comparison with its operands exchanged: `a op b == b op.swap() a`.
    pub fn swap(self) -> Self {
        use Cmp::*;
        match self {
            EQ => EQ,
            NE => NE,
            GT => LT,
            LE => GE,
            LT => GT,
            GE => LE,
        }
    }
}

pub fn vcmp<T: Into<Cmp>>(op: T, a: i32, b: i32) -> bool {
    use Cmp::*;
    match op.into() {
        EQ => a == b,
        NE => a != b,
        GT => a > b,
        LE => a <= b,
        LT => a < b,
        GE => a >= b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Cmp; 6] = [Cmp::EQ, Cmp::NE, Cmp::GT, Cmp::LE, Cmp::LT, Cmp::GE];
    const SAMPLES: [(i32, i32); 5] = [(0, 0), (1, 2), (2, 1), (i32::MIN, i32::MAX), (-1, -1)];

    #[test]
    fn negate_is_complement() {
        for op in ALL {
            for (a, b) in SAMPLES {
                assert_ne!(vcmp(op, a, b), vcmp(op.negate(), a, b), "{op} {a} {b}");
            }
            assert_eq!(op.negate().negate(), op);
        }
    }

    #[test]
    fn swap_exchanges_operands() {
        for op in ALL {
            for (a, b) in SAMPLES {
                assert_eq!(vcmp(op, a, b), vcmp(op.swap(), b, a), "{op} {a} {b}");
            }
        }
    }

    #[test]
    fn mnemonic_round_trip() {
        assert_eq!("gt".parse::<Cmp>(), Ok(Cmp::GT));
        assert_eq!(Cmp::LE.to_string(), "le");
    }
}
