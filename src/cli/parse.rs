use std::io::Write;

use clap::Parser;
use prereqs::{ParseResult, PrerequisiteParser, PrerequisiteRecord};
use tracing::instrument;

use super::{terminal::Paint, text_or_stdin};

#[derive(Debug, Parser)]
#[command(about = "Parse prerequisite text into a logical tree")]
pub struct Parse {
    /// The prerequisite text. Read from stdin if omitted.
    pub(super) text: Option<String>,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "json")]
    pub(super) output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub(super) enum OutputFormat {
    /// The full prerequisite record as JSON
    #[default]
    Json,
    /// A human-readable summary
    Text,
}

impl Parse {
    #[instrument(skip(parser))]
    pub fn run(self, parser: &PrerequisiteParser) -> anyhow::Result<()> {
        self.write(parser, &mut std::io::stdout().lock())
    }

    pub(super) fn write(self, parser: &PrerequisiteParser, out: &mut impl Write) -> anyhow::Result<()> {
        let text = text_or_stdin(self.text)?;
        let text = text.trim_end_matches(['\r', '\n']);
        let result = parser.parse(text);

        match self.output {
            OutputFormat::Json => {
                let record = PrerequisiteRecord::from_result(parser, text, result);
                writeln!(out, "{}", serde_json::to_string_pretty(&record)?)?;
            }
            OutputFormat::Text => {
                Self::write_outcome(&result, out)?;
                let record = PrerequisiteRecord::from_result(parser, text, result);
                if !record.corequisites.is_empty() {
                    let corequisites: Vec<String> =
                        record.corequisites.iter().map(ToString::to_string).collect();
                    writeln!(out, "Corequisites: {}", corequisites.join(", "))?;
                }
                if !record.restrictions.is_empty() {
                    writeln!(out, "Restrictions: {}", record.restrictions.join(", "))?;
                }
                if let Some(grade) = record.minimum_grade {
                    writeln!(out, "Minimum grade: {grade}")?;
                }
            }
        }

        Ok(())
    }

    fn write_outcome(result: &ParseResult, out: &mut impl Write) -> std::io::Result<()> {
        match result {
            ParseResult::Empty => writeln!(out, "{}", "No prerequisites".muted()),
            ParseResult::Parsed(expr) => writeln!(out, "{} {expr}", "Parsed:".good()),
            ParseResult::Unparsed(reason) => {
                writeln!(out, "{} {reason}", "Unparsed:".caution())?;
                writeln!(out, "{}", "Keep the raw text for manual review.".muted())
            }
        }
    }
}
