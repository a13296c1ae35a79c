use std::{io::Write, path::PathBuf};

use clap::Parser;
use prereqs::{ParseStats, PrerequisiteParser, PrerequisiteRecord};
use tracing::instrument;

use super::{read_input, terminal::Paint};

#[derive(Debug, Parser)]
#[command(about = "Parse a file of prerequisite texts, one per line")]
pub struct Batch {
    /// Input file, or `-` for stdin
    pub(super) file: PathBuf,

    /// Output format
    #[arg(long, value_name = "FORMAT", default_value = "jsonl")]
    pub(super) output: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub(super) enum OutputFormat {
    /// One JSON record per line
    #[default]
    Jsonl,
    /// Parse statistics only
    Summary,
    /// Parse statistics as JSON
    Json,
}

impl Batch {
    #[instrument(skip(parser))]
    pub fn run(self, parser: &PrerequisiteParser) -> anyhow::Result<()> {
        self.write(parser, &mut std::io::stdout().lock())
    }

    pub(super) fn write(self, parser: &PrerequisiteParser, out: &mut impl Write) -> anyhow::Result<()> {
        let input = read_input(&self.file)?;
        let texts: Vec<&str> = input.lines().collect();

        let (records, stats) = PrerequisiteRecord::batch(parser, texts.as_slice());
        tracing::info!(
            total = stats.total(),
            success_rate = stats.success_rate(),
            "parsed batch"
        );

        match self.output {
            OutputFormat::Jsonl => {
                for record in &records {
                    writeln!(out, "{}", serde_json::to_string(record)?)?;
                }
            }
            OutputFormat::Summary => Self::write_summary(&stats, out)?,
            OutputFormat::Json => writeln!(out, "{}", serde_json::to_string_pretty(&stats)?)?,
        }

        Ok(())
    }

    fn write_summary(stats: &ParseStats, out: &mut impl Write) -> std::io::Result<()> {
        writeln!(out, "Prerequisite parsing")?;
        writeln!(out, "{}", "────────────────────".muted())?;
        writeln!(out, "{:<10} {}", "Parsed", stats.parsed)?;
        writeln!(out, "{:<10} {}", "Empty", stats.empty)?;
        writeln!(out, "{:<10} {}", "Unparsed", stats.unparsed)?;
        writeln!(out, "{:<10} {}", "Total", stats.total())?;
        writeln!(out)?;

        let rate = format!("{:.1}%", stats.success_rate());
        if stats.unparsed == 0 {
            writeln!(out, "Success rate: {} ✅", rate.good())?;
        } else {
            writeln!(out, "Success rate: {} ⚠️", rate.caution())?;
            for (reason, count) in &stats.reasons {
                writeln!(out, "  - {reason}: {count}")?;
            }
            writeln!(out, "{}", "Unparsed texts keep their raw text for review.".muted())?;
        }
        Ok(())
    }
}
