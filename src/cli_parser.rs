use std::path::PathBuf;

use clap::Parser;


#[derive(Parser)]
#[clap(author, about, version)]
pub struct CliParser {

    /// The program file to execute, one binary-encoded byte per line.
    #[clap(required = true)]
    pub input_file: PathBuf,

    /// Execute in verbose mode, tracing every instruction.
    #[clap(short='v', long)]
    pub verbose: bool,

    /// Treat popping an empty stack as a fatal error.
    #[clap(short='s', long)]
    pub strict_stack: bool,

    /// Print the disassembled program instead of executing it.
    #[clap(short='d', long)]
    pub disassemble: bool,

}
