//! A git-like command line with two commands.
//!
//! ```text
//! RUST_LOG=optgraph_parser=trace cargo run --example git -- checkout -b topic
//! cargo run --example git -- clone -Dcore.autocrlf=false -u https://example.org/repo.git
//! ```

use std::process::ExitCode;

use optgraph_parser::{
    ArgumentBuilder, Command, ConfigError, ExclusiveGroupBuilder, OptionBuilder, Parser,
    ParserBuilder,
};
use tracing_subscriber::EnvFilter;

fn checkout() -> Result<Parser, ConfigError> {
    let mut builder = ParserBuilder::new();

    let branch = builder.declare(
        OptionBuilder::single("-b")
            .description("Create a new branch")
            .argument(ArgumentBuilder::new("branch")),
    );
    let detach = builder.declare(OptionBuilder::new("-d", "--detach"));
    builder.group(ExclusiveGroupBuilder::new().option(branch).option(detach));

    builder.option(OptionBuilder::new("-f", "--force").description("Throw away local changes"));
    builder.build()
}

fn clone() -> Result<Parser, ConfigError> {
    let mut builder = ParserBuilder::new();

    builder.option(OptionBuilder::property("-D").description("Set a configuration variable"));
    let depth = builder.option(
        OptionBuilder::single("--depth").argument(ArgumentBuilder::new("depth").validator(
            |value: &str| {
                value
                    .parse::<u32>()
                    .map(drop)
                    .map_err(|_| optgraph_parser::ValidationError::new("depth must be a number"))
            },
        )),
    );
    builder.option(OptionBuilder::single("--shallow-submodules").requires(depth));
    builder.option(
        OptionBuilder::new("-u", "--url")
            .mandatory(true)
            .argument(ArgumentBuilder::new("url")),
    );
    builder.build()
}

fn git() -> Result<Parser, ConfigError> {
    let mut builder = ParserBuilder::new();
    builder
        .command(Command::new("co", "checkout", checkout()?).with_description("Switch branches"))
        .command(Command::single("clone", clone()?).with_description("Clone a repository"));
    builder.build()
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let parser = match git() {
        Ok(parser) => parser,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            return ExitCode::FAILURE;
        }
    };

    match parser.parse(std::env::args().skip(1)) {
        Ok(args) => {
            println!("{args:#?}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            for command in parser.commands() {
                eprintln!("  {command}");
                for entry in command.parser().entries() {
                    eprintln!("    {entry}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
