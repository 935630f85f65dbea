use std::cmp::Ordering;
use std::io::Write;

use log::{debug, trace};

use ls8lib::{Address, ByteCode, Opcode, MAX_OPERANDS, STACK_SENTINEL};

use crate::alu::{self, AluOp};
use crate::errors::{ExecError, LoadError};
use crate::memory::Memory;
use crate::registers::RegisterFile;


/// Result of the last `CMP`. Only read by conditional jumps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Flag {
    #[default]
    Equal,
    Greater,
    Less,
}


#[derive(Debug, Clone, Copy, Default)]
pub struct ExecConfig {
    /// Treat popping an empty stack as a fatal error instead of reporting it and moving on.
    pub strict_stack: bool,
}


/// What the engine does with the program counter after an instruction handler ran.
enum Flow {
    /// Advance past the instruction and its operands.
    Next,
    /// Continue at the given absolute address.
    Jump(Address),
    Halt,
}


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Continue,
    Halted,
}


pub struct Cpu {

    memory: Memory,
    registers: RegisterFile,
    /// Address of the next instruction to fetch.
    pc: Address,
    flag: Flag,
    /// Number of instructions executed so far.
    steps: u64,
    config: ExecConfig,

}

impl Cpu {

    pub fn new(config: ExecConfig) -> Self {
        Self {
            memory: Memory::new(),
            registers: RegisterFile::new(),
            pc: 0,
            flag: Flag::default(),
            steps: 0,
            config,
        }
    }


    pub fn with_program(program: ByteCode<'_>, config: ExecConfig) -> Result<Self, LoadError> {
        let mut cpu = Self::new(config);
        cpu.memory.load(program)?;
        Ok(cpu)
    }


    pub fn memory(&self) -> &Memory {
        &self.memory
    }


    pub fn registers(&self) -> &RegisterFile {
        &self.registers
    }


    pub fn pc(&self) -> Address {
        self.pc
    }


    pub fn flag(&self) -> Flag {
        self.flag
    }


    pub fn steps(&self) -> u64 {
        self.steps
    }


    /// Execute instructions until `HLT`. `PRN` output is written to `out`, which is flushed
    /// before returning, also when execution faults.
    pub fn run(&mut self, out: &mut impl Write) -> Result<(), ExecError> {

        let halted = self.run_until_halt(out);
        let flushed = out.flush();

        halted?;
        flushed?;

        debug!(
            "Halted at pc={} after {} steps. flag={:?} registers={:?}",
            self.pc, self.steps, self.flag, self.registers.as_slice()
        );

        Ok(())
    }


    fn run_until_halt(&mut self, out: &mut impl Write) -> Result<(), ExecError> {
        while self.step(out)? == Step::Continue {}
        Ok(())
    }


    /// Fetch, decode and execute a single instruction.
    pub fn step(&mut self, out: &mut impl Write) -> Result<Step, ExecError> {

        let address = self.pc;
        let instruction = self.memory.read(address)?;

        // Decoding only needs the instruction byte, so an undefined byte is reported even
        // when its operand count tag reaches past the end of memory.
        let opcode = Opcode::try_from(instruction)
            .map_err(|_| ExecError::UnknownInstruction { address, byte: instruction })?;

        let operand_count = opcode.operand_count();
        let mut operands = [0u8; MAX_OPERANDS];
        for (i, operand) in operands[..operand_count].iter_mut().enumerate() {
            *operand = self.memory.read(address + 1 + i)?;
        }
        let operands = &operands[..operand_count];

        debug!("{address:>3}: {opcode} {operands:?}");
        self.steps += 1;

        let flow = self.execute(opcode, operands, out)?;

        match flow {
            Flow::Next => self.pc = address + 1 + operand_count,
            Flow::Jump(target) => self.pc = target,
            Flow::Halt => {
                self.pc = address + 1 + operand_count;
                return Ok(Step::Halted);
            },
        }

        Ok(Step::Continue)
    }


    fn execute(&mut self, opcode: Opcode, operands: &[u8], out: &mut impl Write) -> Result<Flow, ExecError> {

        // The operand count tag of every opcode matches its operand list, so indexing
        // `operands` within the arity of the instruction is always in range.
        match opcode {

            Opcode::Hlt => return Ok(Flow::Halt),

            Opcode::Ldi => {
                self.registers.set(operands[0], operands[1])?;
            },

            Opcode::Prn => {
                let value = self.registers.get(operands[0])?;
                writeln!(out, "{value}")?;
            },

            Opcode::Add | Opcode::Mul | Opcode::Mod
            | Opcode::And | Opcode::Or | Opcode::Xor
            | Opcode::Not | Opcode::Shl | Opcode::Shr => {
                let op = AluOp::from_opcode(opcode)
                    .ok_or(ExecError::UnknownInstruction { address: self.pc, byte: opcode.byte() })?;
                let reg_a = operands[0];
                let a = self.registers.get(reg_a)?;
                let b = match operands.get(1) {
                    Some(&reg_b) => self.registers.get(reg_b)?,
                    None => 0,
                };
                let result = alu::execute(op, a, b)
                    .ok_or(ExecError::DivisionByZero { address: self.pc })?;
                self.registers.set(reg_a, result)?;
            },

            Opcode::Addi => {
                let (immediate, reg) = (operands[0], operands[1]);
                let value = self.registers.get(reg)?;
                self.registers.set(reg, value.wrapping_add(immediate))?;
            },

            Opcode::Push => {
                let value = self.registers.get(operands[0])?;
                self.push(value)?;
            },

            Opcode::Pop => {
                // Validate the destination before touching the stack.
                let reg = operands[0];
                self.registers.get(reg)?;
                // The register is written before SP moves, so `POP R7` leaves SP one past the value.
                self.pop_with(|cpu, value| cpu.registers.set(reg, value))?;
            },

            Opcode::Call => {
                let target = self.registers.get(operands[0])?;
                let resume = self.pc + 1 + opcode.operand_count();
                let resume = u8::try_from(resume)
                    .map_err(|_| ExecError::AddressOverflow { address: resume })?;
                self.push(resume)?;
                return Ok(Flow::Jump(target as Address));
            },

            Opcode::Ret => {
                if let Some(target) = self.pop_with(|_, value| Ok(value))? {
                    return Ok(Flow::Jump(target as Address));
                }
            },

            Opcode::Cmp => {
                let a = self.registers.get(operands[0])?;
                let b = self.registers.get(operands[1])?;
                self.flag = match a.cmp(&b) {
                    Ordering::Equal => Flag::Equal,
                    Ordering::Greater => Flag::Greater,
                    Ordering::Less => Flag::Less,
                };
            },

            Opcode::Jmp => {
                let target = self.registers.get(operands[0])?;
                return Ok(Flow::Jump(target as Address));
            },

            Opcode::Jeq => {
                let target = self.registers.get(operands[0])?;
                if self.flag == Flag::Equal {
                    return Ok(Flow::Jump(target as Address));
                }
            },

            Opcode::Jne => {
                let target = self.registers.get(operands[0])?;
                if self.flag != Flag::Equal {
                    return Ok(Flow::Jump(target as Address));
                }
            },

        }

        Ok(Flow::Next)
    }


    /// Push a byte onto the stack. The stack pointer is initialized to the sentinel on first use.
    fn push(&mut self, value: u8) -> Result<(), ExecError> {

        let mut sp = self.registers.sp();
        if sp == 0 {
            sp = STACK_SENTINEL;
        }
        sp -= 1;

        self.memory.write(sp as Address, value)?;
        self.registers.set_sp(sp);
        trace!("push {value} -> sp={sp}");

        Ok(())
    }


    /// Pop a byte off the stack and hand it to `store`. SP is incremented after `store` ran.
    ///
    /// An empty stack is reported on stderr and yields `None` without calling `store`, unless
    /// the stack is strict, in which case it is an error.
    fn pop_with<T>(
        &mut self,
        store: impl FnOnce(&mut Self, u8) -> Result<T, ExecError>
    ) -> Result<Option<T>, ExecError> {

        let sp = self.registers.sp();
        if sp == 0 || sp == STACK_SENTINEL {
            let err = ExecError::StackUnderflow { address: self.pc };
            if self.config.strict_stack {
                return Err(err);
            }
            debug!("{err}, continuing");
            eprintln!("warning: {err}");
            return Ok(None);
        }

        let value = self.memory.read(sp as Address)?;
        let stored = store(self, value)?;
        self.registers.set_sp(self.registers.sp().wrapping_add(1));
        trace!("pop {value} <- sp={sp}");

        Ok(Some(stored))
    }

}
