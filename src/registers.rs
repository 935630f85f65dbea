use ls8lib::{REGISTER_COUNT, STACK_POINTER};

use crate::errors::ExecError;


/// Byte-wide general purpose registers. Register `STACK_POINTER` doubles as the stack pointer
/// by convention only: instructions are free to overwrite it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterFile {
    cells: [u8; REGISTER_COUNT],
}

impl RegisterFile {

    pub fn new() -> Self {
        Self::default()
    }


    pub fn get(&self, index: u8) -> Result<u8, ExecError> {
        self.cells.get(index as usize)
            .copied()
            .ok_or(ExecError::InvalidRegister { index })
    }


    pub fn set(&mut self, index: u8, value: u8) -> Result<(), ExecError> {
        let cell = self.cells.get_mut(index as usize)
            .ok_or(ExecError::InvalidRegister { index })?;
        *cell = value;
        Ok(())
    }


    #[inline]
    pub fn sp(&self) -> u8 {
        self.cells[STACK_POINTER as usize]
    }


    #[inline]
    pub fn set_sp(&mut self, value: u8) {
        self.cells[STACK_POINTER as usize] = value;
    }


    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

}
