use clap::Args;
use std::io::{self, Write};
use crate::cli_util::print_turtle_error;
use crate::commands::{read_source, select_path};
use crate::parser::parse;

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct CheckArgs {
    /// Read instructions from PATH instead of the positional argument
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<String>,

    /// Instruction file to check
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Only report errors; print nothing on success
    #[arg(short = 'q', long = "quiet")]
    pub quiet: bool,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: CheckArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let CheckArgs { file, path, quiet, .. } = args;

    let path = match select_path(program, file, path) {
        Ok(p) => p,
        Err(code) => usage_and_exit(program, code),
    };
    let Some(source) = read_source(program, &path) else {
        return 1;
    };

    let instructions = match parse(&source) {
        Ok(p) => p,
        Err(err) => {
            print_turtle_error(Some(program), &source, &err);
            return 1;
        }
    };

    if !quiet {
        let count = instructions.len();
        for (i, instr) in instructions.into_iter().enumerate() {
            println!("{i:>4}  {instr}");
        }
        println!("{path}: ok ({count} instructions)");
        let _ = io::stdout().flush();
    }
    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} check [--quiet|-q] <PATH>
  {0} check [--quiet|-q] --file <PATH>

Options:
  --file,  -f <PATH>  Read instructions from PATH instead of the positional argument
  --quiet, -q   Only report errors; print nothing on success
  --help,  -h   Show this help

Notes:
- Instructions are the 5-character keywords E_ROR, E_ROL, E_FWD, E_SET, E_CLR,
  separated by whitespace. The end of the file terminates the program.
- Any other text results in a parse error pointing at the offending offset.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
