use std::io;
use std::path::PathBuf;
use std::process;

use ls8lib::Address;


/// Failures while reading a program file into memory. All of them are fatal.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {

    #[error("could not open \"{}\": {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("program is {size} bytes long but memory only holds {capacity}")]
    ProgramTooLarge { size: usize, capacity: usize },

}

impl LoadError {
    pub const EXIT_CODE: i32 = 2;
}


/// Faults raised while executing a program.
#[derive(Debug, thiserror::Error)]
pub enum ExecError {

    #[error("unknown instruction at address {address}: {byte} ({byte:#010b})")]
    UnknownInstruction { address: Address, byte: u8 },

    #[error("memory access out of bounds at address {address}")]
    MemoryOutOfBounds { address: Address },

    #[error("invalid register index {index}")]
    InvalidRegister { index: u8 },

    #[error("stack underflow at address {address}: no items in stack")]
    StackUnderflow { address: Address },

    #[error("division by zero at address {address}")]
    DivisionByZero { address: Address },

    #[error("return address {address} does not fit in a register")]
    AddressOverflow { address: Address },

    #[error("could not write program output: {0}")]
    Output(#[from] io::Error),

}

impl ExecError {
    pub const EXIT_CODE: i32 = 1;
}


/// Exit code for command line errors.
pub const USAGE_EXIT_CODE: i32 = 1;


pub fn usage_error(err: clap::Error) -> ! {
    // Help and version requests are not errors and keep clap's own behavior.
    if !err.use_stderr() {
        err.exit();
    }
    let _ = err.print();
    process::exit(USAGE_EXIT_CODE);
}


pub fn load_error(err: LoadError) -> ! {
    eprintln!("error: {err}");
    process::exit(LoadError::EXIT_CODE);
}


pub fn exec_error(err: ExecError) -> ! {
    eprintln!("error: {err}");
    process::exit(ExecError::EXIT_CODE);
}
