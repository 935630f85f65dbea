//! Disassembler for LS-8 memory images.
//!
//! The image is walked from address 0 using the operand count tag of each instruction byte.
//! Bytes that do not decode to an instruction, or instructions whose operands run past the
//! end of the image, are rendered as raw data and skipped one byte at a time.

use std::fmt;

use crate::{Address, ByteCode, OperandKind, Opcode};


#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisassembledLine {

    Instruction {
        address: Address,
        opcode: Opcode,
        operands: Vec<u8>,
    },

    Data {
        address: Address,
        byte: u8,
    },

}

impl DisassembledLine {

    pub fn address(&self) -> Address {
        match self {
            Self::Instruction { address, .. } | Self::Data { address, .. } => *address,
        }
    }


    /// Number of image bytes covered by this line.
    pub fn size(&self) -> usize {
        match self {
            Self::Instruction { operands, .. } => 1 + operands.len(),
            Self::Data { .. } => 1,
        }
    }

}

impl fmt::Display for DisassembledLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {

            Self::Instruction { address, opcode, operands } => {
                write!(f, "{address:>3}: {opcode}")?;
                for (i, (kind, value)) in opcode.operands().iter().zip(operands).enumerate() {
                    let separator = if i == 0 { " " } else { ", " };
                    match kind {
                        OperandKind::Register => write!(f, "{separator}R{value}")?,
                        OperandKind::Immediate => write!(f, "{separator}{value}")?,
                    }
                }
                Ok(())
            },

            Self::Data { address, byte } => write!(f, "{address:>3}: .byte {byte:#010b}"),

        }
    }
}


pub fn disassemble(code: ByteCode<'_>) -> Vec<DisassembledLine> {

    let mut lines = Vec::new();
    let mut address = 0;

    while let Some(&byte) = code.get(address) {

        let line = match Opcode::try_from(byte) {
            Ok(opcode) => {
                let end = address + 1 + opcode.operand_count();
                match code.get(address + 1..end) {
                    Some(operands) => DisassembledLine::Instruction {
                        address,
                        opcode,
                        operands: operands.to_vec(),
                    },
                    None => DisassembledLine::Data { address, byte },
                }
            },
            Err(_) => DisassembledLine::Data { address, byte },
        };

        address += line.size();
        lines.push(line);
    }

    lines
}
