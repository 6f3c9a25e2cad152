use clap::Parser as ClapParser;

use cli_calculator::CalcError;
use cli_calculator::cli::{self, Args, Mode, USAGE};

fn main() {
    env_logger::init();

    let args = Args::parse();

    match args.mode() {
        Mode::Usage => print!("{USAGE}"),
        Mode::Interactive => {
            if let Err(e) = cli_calculator::run() {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
        Mode::OneShot {
            operation,
            operands,
        } => match cli::evaluate(operation, &operands) {
            Ok(line) => println!("{line}"),
            Err(e @ CalcError::UnknownCommand(_)) => {
                eprintln!("Error: {e}");
                eprint!("{USAGE}");
                std::process::exit(1);
            }
            Err(e) => {
                log::debug!("one-shot {operation} failed: {e:?}");
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        },
    }
}
