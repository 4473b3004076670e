//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use routewise_cli::CliError;

fn main() {
    if let Err(err) = routewise_cli::run() {
        if let CliError::ArgumentParsing(clap_err) = &err {
            clap_err.exit();
        }
        eprintln!("routewise: {err}");
        std::process::exit(1);
    }
}
