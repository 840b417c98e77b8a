use clap::{Parser, Subcommand};
use rust_turtle::commands::{check, run, view};
use std::env;
use std::io::{self, Write};

fn print_top_usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} check [--quiet|-q] <PATH>   # Parse an instruction file and list its instructions
  {0} run   [OPTIONS] <PATH>      # Run a program to completion and print the grid
  {0} view  [OPTIONS] <PATH>      # Animate a program in the terminal

Run "{0} <subcommand> --help" for more info.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}

#[derive(Parser, Debug)]
#[command(name = "turtle", disable_help_flag = true, disable_help_subcommand = true)]
struct Cli {
    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    help: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    Check(check::CheckArgs),
    Run(run::RunArgs),
    View(view::ViewArgs),
}

fn main() {
    // We still pull the program name for help rendering consistency
    let program = env::args().next().unwrap_or_else(|| String::from("turtle"));

    rust_turtle::init_tracing();

    let cli = Cli::parse();

    let Some(command) = cli.command.filter(|_| !cli.help) else {
        print_top_usage_and_exit(&program, if cli.help { 0 } else { 2 });
    };

    let code = match command {
        Command::Check(args) => check::run(&program, args),
        Command::Run(args) => run::run(&program, args),
        Command::View(args) => view::run(&program, args),
    };

    std::process::exit(code);
}
