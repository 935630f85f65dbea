//! LS-8: an 8-bit virtual machine with 128 bytes of memory and eight registers.

pub mod alu;
pub mod errors;
pub mod exec;
pub mod files;
pub mod memory;
pub mod registers;

pub use errors::{ExecError, LoadError};
pub use exec::{Cpu, ExecConfig, Flag, Step};
