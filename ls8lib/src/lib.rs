mod disasm;

use std::fmt;

use static_assertions::{const_assert, const_assert_eq};

pub use disasm::{disassemble, DisassembledLine};


pub type Address = usize;

/// Number of byte cells in the emulated memory.
pub const MEMORY_SIZE: usize = 128;
/// Number of byte-wide general purpose registers.
pub const REGISTER_COUNT: usize = 8;
/// Index of the register reserved as stack pointer. Nothing prevents other instructions from writing it.
pub const STACK_POINTER: u8 = 7;
/// Stack pointer value of an empty stack. The first push writes the cell right below it.
pub const STACK_SENTINEL: u8 = 0x80;
/// The top two bits of an instruction byte hold the number of operand bytes that follow it.
pub const OPERAND_COUNT_SHIFT: u32 = 6;
pub const MAX_OPERANDS: usize = 3;

const_assert!(MEMORY_SIZE <= u8::MAX as usize + 1);
const_assert!((STACK_POINTER as usize) < REGISTER_COUNT);
const_assert!(STACK_SENTINEL as usize <= MEMORY_SIZE);
const_assert_eq!(u8::MAX >> OPERAND_COUNT_SHIFT, MAX_OPERANDS as u8);


pub type ByteCode<'a> = &'a [u8];


/// Number of operand bytes that follow the given instruction byte.
#[inline]
pub const fn operand_count(instruction: u8) -> usize {
    (instruction >> OPERAND_COUNT_SHIFT) as usize
}


/// How an operand byte is interpreted by its instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// Index into the register file.
    Register,
    /// Raw value.
    Immediate,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {

    #[error("unknown instruction {byte} ({byte:#010b})")]
    UnknownOpcode { byte: u8 },

}


macro_rules! count_operands {
    () => { 0usize };
    ($head:ident $($tail:ident)*) => { 1usize + count_operands!($($tail)*) };
}


macro_rules! declare_instructions {
    ($($name:ident $asm_name:literal $byte:literal [$($kind:ident),*]),+) => {

/// LS-8 instructions. Each instruction is represented by one byte whose top two bits
/// are the operand count tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Opcode {
    $($name = $byte),+
}

// The operand count tag of every instruction byte must agree with its operand list.
$(
    const_assert_eq!(operand_count($byte), count_operands!($($kind)*));
)+

impl TryFrom<u8> for Opcode {
    type Error = DecodeError;

    fn try_from(byte: u8) -> Result<Self, Self::Error> {
        match byte {
            $($byte => Ok(Self::$name),)+
            _ => Err(DecodeError::UnknownOpcode { byte })
        }
    }
}

impl Opcode {

    pub fn mnemonic(self) -> &'static str {
        match self {
            $(Self::$name => $asm_name,)+
        }
    }


    /// Operand layout of the instruction, in encoding order.
    pub fn operands(self) -> &'static [OperandKind] {
        match self {
            $(Self::$name => &[$(OperandKind::$kind),*],)+
        }
    }


    pub fn all() -> &'static [Opcode] {
        &[$(Self::$name),+]
    }

}

    };
}

declare_instructions! {

    Hlt "hlt" 0b00000001 [],
    Ret "ret" 0b00010001 [],

    Prn "prn" 0b01000111 [Register],
    Push "push" 0b01000101 [Register],
    Pop "pop" 0b01000110 [Register],
    Not "not" 0b01101001 [Register],

    Call "call" 0b01010000 [Register],
    Jmp "jmp" 0b01010100 [Register],
    Jeq "jeq" 0b01010101 [Register],
    Jne "jne" 0b01010110 [Register],

    Ldi "ldi" 0b10000010 [Register, Immediate],

    Add "add" 0b10100000 [Register, Register],
    Mul "mul" 0b10100010 [Register, Register],
    Mod "mod" 0b10100100 [Register, Register],
    Cmp "cmp" 0b10100111 [Register, Register],
    And "and" 0b10101000 [Register, Register],
    Or "or" 0b10101010 [Register, Register],
    Xor "xor" 0b10101011 [Register, Register],
    Shl "shl" 0b10101100 [Register, Register],
    Shr "shr" 0b10101110 [Register, Register],

    // Extension: adds an immediate to a register.
    Addi "addi" 0b10101101 [Immediate, Register]

}

impl Opcode {

    #[inline]
    pub fn byte(self) -> u8 {
        self as u8
    }


    #[inline]
    pub fn operand_count(self) -> usize {
        operand_count(self as u8)
    }

}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.mnemonic().to_uppercase())
    }
}
