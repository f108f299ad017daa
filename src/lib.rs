pub mod util;
pub mod interpreter;

use std::io::Write;
use std::path::{Path, PathBuf};
use clap::Parser as ClapParser;
use thiserror::Error;
use crate::interpreter::ast::Node;
use crate::interpreter::executor::Executor;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::parser::Parser;
use crate::interpreter::symbol_table::SymbolTable;

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Source file to run")]
    pub input: PathBuf,
    #[clap(long, help = "Print the parsed syntax tree to stderr before running")]
    pub print_ast: bool,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Could not open file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{count} syntax error(s) in {}", .path.display())]
    Syntax {
        path: PathBuf,
        count: usize,
    },
}

/// What a finished program leaves behind.
#[derive(Debug)]
pub struct Outcome<W> {
    pub output: W,
    pub runtime_errors: usize,
    pub symbols: SymbolTable,
}

/// Installs the stderr log subscriber. `RUST_LOG` picks the filter unless `verbose` forces `debug`.
pub fn init_tracing(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed, e.g. by a test harness
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(true).with_level(true))
        .with(filter)
        .try_init();
}

pub fn parse_source(source: &str, path: &Path) -> Result<Node, Error> {
    let lexer = Lexer::new(source);
    let mut parser = Parser::new(lexer, path.to_path_buf());
    let program = parser.parse();

    if parser.had_error() {
        return Err(Error::Syntax { path: path.to_path_buf(), count: parser.error_count() });
    }

    Ok(program)
}

pub fn execute<W: Write>(program: &Node, output: W) -> Outcome<W> {
    let mut symbols = SymbolTable::new();
    let mut executor = Executor::new(output);
    executor.run(Some(program), &mut symbols);

    if tracing::enabled!(tracing::Level::DEBUG) {
        let mut bindings: Vec<(&str, i32)> = symbols.iter().collect();
        bindings.sort_unstable();

        for (name, value) in bindings {
            tracing::debug!(name, value, "final binding");
        }
    }

    Outcome {
        runtime_errors: executor.error_count(),
        output: executor.into_output(),
        symbols,
    }
}

pub fn interpret<W: Write>(source: &str, path: &Path, output: W) -> Result<Outcome<W>, Error> {
    let program = parse_source(source, path)?;
    Ok(execute(&program, output))
}

pub fn run(config: &Config) -> Result<(), Error> {
    let source = std::fs::read_to_string(&config.input)
        .map_err(|source| Error::Io { path: config.input.clone(), source })?;

    let program = parse_source(&source, &config.input)?;

    if config.print_ast {
        eprintln!("{}", program);
    }

    let stdout = std::io::stdout();
    let outcome = execute(&program, stdout.lock());

    if outcome.runtime_errors > 0 {
        tracing::warn!(count = outcome.runtime_errors, "statements failed during execution");
    }

    Ok(())
}
