use clap::Parser;
use linecalc::{Config, ErrorMode, Executor, Program, RunSummary};
use log::info;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

/// linecalc evaluates a line-oriented integer arithmetic program, printing
/// the value of every bare expression.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to run, or `-` for standard input
    file: PathBuf,

    /// Report failing statements and continue with the next line
    #[arg(short, long)]
    keep_going: bool,

    /// Maximum parenthesis nesting depth (0 disables the limit)
    #[arg(long, default_value_t = linecalc::config::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Print the final variable bindings to stderr
    #[arg(long)]
    dump_env: bool,
}

impl Args {
    fn config(&self) -> Config {
        let error_mode = if self.keep_going {
            ErrorMode::Continue
        } else {
            ErrorMode::Halt
        };
        let max_depth = (self.max_depth > 0).then_some(self.max_depth);

        Config::new()
            .with_error_mode(error_mode)
            .with_max_depth(max_depth)
    }
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    match run(&args) {
        Ok(summary) => {
            if args.dump_env {
                dump_environment(&summary);
            }
            for err in &summary.errors {
                eprintln!("error: {}", err);
            }
            if summary.is_clean() {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> linecalc::Result<RunSummary> {
    let program = Program::from_path(&args.file)?;
    info!("loaded {} ({} lines)", program.name(), program.line_count());

    let executor = Executor::new(args.config());
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    let result = executor.run_program(&program, &mut out);
    // Values printed before a failure still reach the console
    out.flush()?;
    result
}

fn dump_environment(summary: &RunSummary) {
    for (name, value) in summary.environment.iter_sorted() {
        eprintln!("{} = {}", name, value);
    }
}
