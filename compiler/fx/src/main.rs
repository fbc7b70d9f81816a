//! Formula tokenizer CLI.

use fx::args::{parse_args, USAGE};
use fx::commands::run;

fn main() {
    fx::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || matches!(args[0].as_str(), "help" | "--help" | "-h") {
        print!("{USAGE}");
        return;
    }

    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("error: {e}");
            eprintln!();
            eprint!("{USAGE}");
            std::process::exit(2);
        }
    };

    match run(&options) {
        Ok(outcome) => {
            print!("{}", outcome.output);
            std::process::exit(outcome.exit_code);
        }
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    }
}
