use ls8lib::{Address, ByteCode, MEMORY_SIZE};

use crate::errors::{ExecError, LoadError};


/// Flat byte-addressable memory. Every access is bounds-checked.
pub struct Memory {
    cells: [u8; MEMORY_SIZE],
}

impl Memory {

    pub fn new() -> Self {
        Self {
            cells: [0; MEMORY_SIZE],
        }
    }


    /// Copy a program image into memory starting at address 0.
    pub fn load(&mut self, program: ByteCode<'_>) -> Result<(), LoadError> {
        if program.len() > MEMORY_SIZE {
            return Err(LoadError::ProgramTooLarge { size: program.len(), capacity: MEMORY_SIZE });
        }
        self.cells[..program.len()].copy_from_slice(program);
        Ok(())
    }


    pub fn read(&self, address: Address) -> Result<u8, ExecError> {
        self.cells.get(address)
            .copied()
            .ok_or(ExecError::MemoryOutOfBounds { address })
    }


    pub fn write(&mut self, address: Address, value: u8) -> Result<(), ExecError> {
        let cell = self.cells.get_mut(address)
            .ok_or(ExecError::MemoryOutOfBounds { address })?;
        *cell = value;
        Ok(())
    }


    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

}

impl Default for Memory {
    fn default() -> Self {
        Self::new()
    }
}


#[cfg(test)]
mod tests {

    use super::*;


    #[test]
    fn load_places_program_at_address_zero() {
        let mut memory = Memory::new();
        memory.load(&[1, 2, 3]).unwrap();
        assert_eq!(&memory.as_bytes()[..4], &[1, 2, 3, 0]);
    }


    #[test]
    fn oversized_program_is_rejected() {
        let mut memory = Memory::new();
        let program = vec![1; MEMORY_SIZE + 1];
        assert!(matches!(
            memory.load(&program),
            Err(LoadError::ProgramTooLarge { size, capacity: MEMORY_SIZE }) if size == MEMORY_SIZE + 1
        ));
        assert!(memory.load(&program[..MEMORY_SIZE]).is_ok());
    }


    #[test]
    fn accesses_past_the_end_fail() {
        let mut memory = Memory::new();
        memory.write(MEMORY_SIZE - 1, 0xAB).unwrap();
        assert_eq!(memory.read(MEMORY_SIZE - 1).unwrap(), 0xAB);
        assert!(matches!(memory.read(MEMORY_SIZE), Err(ExecError::MemoryOutOfBounds { address: MEMORY_SIZE })));
        assert!(matches!(memory.write(0xF4, 1), Err(ExecError::MemoryOutOfBounds { address: 0xF4 })));
    }

}
