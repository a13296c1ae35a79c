use std::{
    io::Read,
    path::{Path, PathBuf},
};

mod batch;
mod corequisites;
mod parse;
mod terminal;
mod validate;

use anyhow::Context;
use batch::Batch;
use clap::ArgAction;
use corequisites::Corequisites;
use parse::Parse;
use prereqs::{ParserConfig, PrerequisiteParser};
use tracing::instrument;
use validate::Validate;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Path to a parser configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let parser = load_parser(self.config.as_deref())?;
        self.command.run(&parser)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        // stdout carries results, so diagnostics go to stderr
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

#[instrument]
fn load_parser(path: Option<&Path>) -> anyhow::Result<PrerequisiteParser> {
    let config = match path {
        Some(path) => ParserConfig::load(path)
            .with_context(|| format!("failed to load parser configuration from {}", path.display()))?,
        None => ParserConfig::default(),
    };
    tracing::debug!(?config, "parser configured");
    Ok(PrerequisiteParser::new(config))
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Parse prerequisite text into a logical tree
    Parse(Parse),

    /// Extract corequisite course codes from text
    Corequisites(Corequisites),

    /// Parse a file of prerequisite texts, one per line
    ///
    /// Lines are parsed in parallel and written out in input order.
    Batch(Batch),

    /// Check the parser against a file of expected records
    ///
    /// Each line is a JSON prerequisite record. The text is parsed again and
    /// the result compared to the recorded tree and parsed flag.
    Validate(Validate),
}

impl Command {
    fn run(self, parser: &PrerequisiteParser) -> anyhow::Result<()> {
        match self {
            Self::Parse(command) => command.run(parser)?,
            Self::Corequisites(command) => command.run()?,
            Self::Batch(command) => command.run(parser)?,
            Self::Validate(command) => command.run(parser)?,
        }
        Ok(())
    }
}

/// Returns `text`, or everything on standard input when it is absent.
fn text_or_stdin(text: Option<String>) -> anyhow::Result<String> {
    match text {
        Some(text) => Ok(text),
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("failed to read prerequisite text from stdin")?;
            Ok(buffer)
        }
    }
}

/// Reads a whole input file, where `-` means standard input.
fn read_input(path: &Path) -> anyhow::Result<String> {
    if path == Path::new("-") {
        return text_or_stdin(None);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}
