mod cli_parser;

use std::io;

use clap::Parser;
use cli_parser::CliParser;
use log::LevelFilter;

use ls8::{errors, files, Cpu, ExecConfig};


fn init_logger(verbose: bool) {
    let level = if verbose { LevelFilter::Debug } else { LevelFilter::Warn };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}


fn main() {

    let args = CliParser::try_parse()
        .unwrap_or_else(|err| errors::usage_error(err));

    init_logger(args.verbose);

    let program = files::load_program(&args.input_file)
        .unwrap_or_else(|err| errors::load_error(err));

    if args.disassemble {
        for line in ls8lib::disassemble(&program) {
            println!("{line}");
        }
        return;
    }

    let config = ExecConfig {
        strict_stack: args.strict_stack,
    };
    let mut cpu = Cpu::with_program(&program, config)
        .unwrap_or_else(|err| errors::load_error(err));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(err) = cpu.run(&mut out) {
        errors::exec_error(err);
    }

}
