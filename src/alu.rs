use ls8lib::Opcode;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AluOp {
    Add,
    Mul,
    Mod,
    And,
    Or,
    Xor,
    Not,
    Shl,
    Shr,
}

impl AluOp {

    /// The ALU operation an instruction performs on its two register operands, if any.
    /// `ADDI` is not included because its first operand is an immediate.
    pub fn from_opcode(opcode: Opcode) -> Option<Self> {
        Some(match opcode {
            Opcode::Add => Self::Add,
            Opcode::Mul => Self::Mul,
            Opcode::Mod => Self::Mod,
            Opcode::And => Self::And,
            Opcode::Or => Self::Or,
            Opcode::Xor => Self::Xor,
            Opcode::Not => Self::Not,
            Opcode::Shl => Self::Shl,
            Opcode::Shr => Self::Shr,
            _ => return None
        })
    }

}


/// Compute `a <op> b` with unsigned 8-bit wrapping semantics. `Not` ignores `b`.
/// Shifting by 8 or more yields 0.
///
/// Returns `None` only for `Mod` with a zero divisor.
pub fn execute(op: AluOp, a: u8, b: u8) -> Option<u8> {
    Some(match op {
        AluOp::Add => a.wrapping_add(b),
        AluOp::Mul => a.wrapping_mul(b),
        AluOp::Mod => a.checked_rem(b)?,
        AluOp::And => a & b,
        AluOp::Or => a | b,
        AluOp::Xor => a ^ b,
        AluOp::Not => !a,
        AluOp::Shl => a.checked_shl(b as u32).unwrap_or(0),
        AluOp::Shr => a.checked_shr(b as u32).unwrap_or(0),
    })
}


#[cfg(test)]
mod tests {

    use super::*;

    use proptest::prelude::*;


    #[test]
    fn arithmetic_wraps_around() {
        assert_eq!(execute(AluOp::Add, 250, 10), Some(4));
        assert_eq!(execute(AluOp::Add, 200, 100), Some(44));
        assert_eq!(execute(AluOp::Mul, 200, 2), Some(144));
    }


    #[test]
    fn bitwise_operations() {
        assert_eq!(execute(AluOp::And, 0b1100, 0b1010), Some(0b1000));
        assert_eq!(execute(AluOp::Or, 0b1100, 0b1010), Some(0b1110));
        assert_eq!(execute(AluOp::Xor, 0b1100, 0b1010), Some(0b0110));
        assert_eq!(execute(AluOp::Not, 0b1111_0000, 0xFF), Some(0b0000_1111));
    }


    #[test]
    fn shifts_saturate_to_zero() {
        assert_eq!(execute(AluOp::Shl, 0b0000_0011, 2), Some(0b0000_1100));
        assert_eq!(execute(AluOp::Shl, 0b1000_0001, 1), Some(0b0000_0010));
        assert_eq!(execute(AluOp::Shr, 0b1000_0000, 7), Some(1));
        assert_eq!(execute(AluOp::Shl, 0xFF, 8), Some(0));
        assert_eq!(execute(AluOp::Shr, 0xFF, 200), Some(0));
    }


    #[test]
    fn modulo_by_zero_is_undefined() {
        assert_eq!(execute(AluOp::Mod, 17, 5), Some(2));
        assert_eq!(execute(AluOp::Mod, 17, 0), None);
    }


    #[test]
    fn opcode_mapping() {
        assert_eq!(AluOp::from_opcode(Opcode::Shr), Some(AluOp::Shr));
        assert_eq!(AluOp::from_opcode(Opcode::Addi), None);
        assert_eq!(AluOp::from_opcode(Opcode::Cmp), None);
    }


    proptest! {

        #[test]
        fn add_and_mul_are_modulo_256(a in any::<u8>(), b in any::<u8>()) {
            prop_assert_eq!(execute(AluOp::Add, a, b), Some(((a as u32 + b as u32) % 256) as u8));
            prop_assert_eq!(execute(AluOp::Mul, a, b), Some(((a as u32 * b as u32) % 256) as u8));
        }

    }

}
