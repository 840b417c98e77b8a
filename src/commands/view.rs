use std::io::{self, Write};
use std::time::Duration;
use clap::Args;
use crate::cli_util::print_turtle_error;
use crate::commands::{GridArgs, read_source, select_path};
use crate::config;
use crate::engine::Turtle;
use crate::parser::parse;
use crate::tui::{self, App};

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct ViewArgs {
    /// Read instructions from PATH instead of the positional argument
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<String>,

    /// Instruction file to animate
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Milliseconds between steps (config `grid.delay_ms`; default 1000)
    #[arg(long = "delay", value_name = "MS")]
    pub delay_ms: Option<u64>,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

// Public entry point for the viewer from main.rs
pub fn run(program: &str, args: ViewArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let ViewArgs { file, path, delay_ms, grid, .. } = args;

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

    let cfg = config::settings();
    let settings = grid.resolve(&cfg.grid);
    let turtle = match Turtle::new(settings.dims(), settings.start(), instructions) {
        Ok(t) => t,
        Err(err) => {
            print_turtle_error(Some(program), &source, &err);
            return 1;
        }
    };

    let delay = Duration::from_millis(delay_ms.unwrap_or(settings.delay_ms));
    let app = App::new(turtle, path, delay, cfg.colors.clone());
    if let Err(e) = tui::run(app) {
        eprintln!("{program}: viewer error: {e}");
        let _ = io::stderr().flush();
        return 1;
    }
    0
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} view [OPTIONS] <PATH>   # Animate a turtle program in the terminal

Options:
  --file,   -f <PATH>  Read instructions from PATH instead of the positional argument
  --delay <MS>         Milliseconds between steps (default 1000)
  --width <W>          Grid width (default 9)
  --height <H>         Grid height (default 9)
  --start-x <X>        Starting column (default 3)
  --start-y <Y>        Starting row (default 3)
  --help,   -h         Show this help

Notes:
    - Space pauses and resumes; n steps once while paused.
    - q, Esc or Ctrl+C exits the viewer.
    - A failed step is shown in the status line and stepping stops.
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
