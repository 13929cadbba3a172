use clap::Parser;
use std::process::ExitCode;

use jyt::cli::{handle_error, Args, CliUtils};

fn main() -> ExitCode {
    let args = Args::parse();

    // When converted data goes to stdout, the success line would corrupt it
    let data_on_stdout = args.input.is_none() && args.output.is_none();

    match jyt::transform(args.into_raw_options()) {
        Ok(message) => {
            if !data_on_stdout {
                CliUtils::show_success(&message);
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            handle_error(&error);
            ExitCode::FAILURE
        }
    }
}
