use std::process::ExitCode;
use clap::Parser as ClapParser;
use when_lang::Config;

fn main() -> ExitCode {
    let config: Config = Config::parse();
    when_lang::init_tracing(config.verbose);

    match when_lang::run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}
