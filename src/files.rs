use std::fs;
use std::path::Path;

use log::debug;

use crate::errors::LoadError;


/// Parse one line of a program file. The value is the run of binary digits at the start of
/// the line, after any leading whitespace. Anything after the digits is a comment.
/// Values wider than a byte keep their low 8 bits.
fn parse_line(line: &str) -> Option<u8> {

    let digits = line.trim_start();
    let length = digits.bytes()
        .take_while(|b| matches!(b, b'0' | b'1'))
        .count();

    if length == 0 {
        // No digits found, this is a blank or comment line.
        return None;
    }

    Some(digits[..length].bytes().fold(0u8, |value, digit| (value << 1) | (digit - b'0')))
}


pub fn parse_program(source: &str) -> Vec<u8> {
    source.lines().filter_map(parse_line).collect()
}


pub fn load_program(file_path: &Path) -> Result<Vec<u8>, LoadError> {

    let source = fs::read_to_string(file_path)
        .map_err(|source| LoadError::Io { path: file_path.to_path_buf(), source })?;

    let program = parse_program(&source);
    debug!("Loaded {} bytes from \"{}\"", program.len(), file_path.display());

    Ok(program)
}
