use clap::Args;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use crate::cli_util::print_turtle_error;
use crate::commands::{GridArgs, read_source, select_path};
use crate::config;
use crate::engine::{StepControl, Turtle};
use crate::parser::parse;
use crate::render::{render_grid, status_line};

/// Environment fallback for `--max-steps`.
pub const MAX_STEPS_ENV: &str = "TURTLE_MAX_STEPS";

#[derive(Args, Debug)]
#[command(disable_help_flag = true)]
pub struct RunArgs {
    /// Print a step-by-step table of operations instead of grids
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Print the grid after every step, not just at the end
    #[arg(long = "frames")]
    pub frames: bool,

    /// Disable ANSI colors even when stdout is a terminal
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Read instructions from PATH instead of the positional argument
    #[arg(short = 'f', long = "file", value_name = "PATH")]
    pub file: Option<String>,

    /// Instruction file to run
    #[arg(value_name = "PATH")]
    pub path: Option<String>,

    /// Maximum steps before abort (fallback TURTLE_MAX_STEPS; default unlimited)
    #[arg(long = "max-steps", value_name = "N")]
    pub max_steps: Option<usize>,

    #[command(flatten)]
    pub grid: GridArgs,

    /// Show this help
    #[arg(short = 'h', long = "help", action = clap::ArgAction::SetTrue)]
    pub help: bool,
}

pub fn run(program: &str, args: RunArgs) -> i32 {
    if args.help {
        usage_and_exit(program, 0);
    }

    let RunArgs {
        debug,
        frames,
        no_color,
        file,
        path,
        max_steps,
        grid,
        ..
    } = args;

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

    let settings = grid.resolve(&config::settings().grid);
    let mut turtle = match Turtle::new(settings.dims(), settings.start(), instructions) {
        Ok(t) => t,
        Err(err) => {
            print_turtle_error(Some(program), &source, &err);
            return 1;
        }
    };

    // Resolve limits: flags -> env -> unlimited
    let max_steps = max_steps
        .or_else(|| std::env::var(MAX_STEPS_ENV).ok().and_then(|s| s.parse::<usize>().ok()));

    let cancel = Arc::new(AtomicBool::new(false));
    let cancel_handler = cancel.clone();
    if let Err(e) = ctrlc::set_handler(move || cancel_handler.store(true, Ordering::Relaxed)) {
        tracing::warn!("failed to set ctrl+c handler: {e}");
    }
    let ctrl = StepControl::new(max_steps, cancel);

    let color = !no_color && io::stdout().is_terminal();

    if debug {
        println!("STEP | POS      | DIR   | INSTR | ACTION");
        println!("-----+----------+-------+-------+------------------------------------------");
    }

    let result = turtle.run(Some(&ctrl), |t, record| {
        if debug {
            println!(
                "{:<4} | {:<8} | {:<5} | {} | {}",
                record.index,
                t.position().to_string(),
                t.heading().to_string(),
                record.instruction,
                record.effect
            );
        } else if frames {
            println!("{}", status_line(t));
            print!("{}", render_grid(t, color));
            println!();
        }
    });

    let exit_code = match result {
        Ok(_) => 0,
        Err(err) => {
            print_turtle_error(Some(program), &source, &err);
            1
        }
    };

    if !debug && !frames {
        println!("{}", status_line(&turtle));
        print!("{}", render_grid(&turtle, color));
    }
    let _ = io::stdout().flush();
    exit_code
}

fn usage_and_exit(program: &str, code: i32) -> ! {
    eprintln!(
        r#"Usage:
  {0} run [OPTIONS] <PATH>
  {0} run [OPTIONS] --file <PATH>

Options:
  --file,  -f <PATH>  Read instructions from PATH instead of the positional argument
  --debug, -d         Print a step-by-step table of operations instead of grids
  --frames            Print the grid after every step
  --no-color          Disable ANSI colors
  --max-steps <N>     Abort after N steps (fallback TURTLE_MAX_STEPS)
  --width <W>         Grid width (default 9)
  --height <H>        Grid height (default 9)
  --start-x <X>       Starting column (default 3)
  --start-y <Y>       Starting row (default 3)
  --help,  -h         Show this help

Notes:
- The turtle starts facing east; y grows downward.
- Moving off the grid stops the run with an error; the grid as it was is still printed.
- Defaults can be set in $XDG_CONFIG_HOME/turtle.toml under [grid].

Examples:
    {0} run ./square.tur
    {0} run --debug --width 3 --height 3 --start-x 1 --start-y 1 ./square.tur
"#,
        program
    );
    let _ = io::stderr().flush();
    std::process::exit(code);
}
