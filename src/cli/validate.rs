use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::Parser;
use prereqs::{PrerequisiteParser, PrerequisiteRecord};
use tracing::instrument;

use super::{read_input, terminal::Paint};

#[derive(Debug, Parser)]
#[command(about = "Check the parser against a file of expected records")]
pub struct Validate {
    /// JSON lines file of expected records, or `-` for stdin
    pub(super) file: PathBuf,

    /// Show every mismatch rather than the first few
    #[arg(long)]
    pub(super) all: bool,

    /// Suppress all output except errors
    #[arg(long, short)]
    pub(super) quiet: bool,
}

/// A record whose re-parsed result differs from the expectation.
#[derive(Debug)]
pub(super) struct Mismatch {
    pub(super) line: usize,
    pub(super) expected: PrerequisiteRecord,
    pub(super) actual: PrerequisiteRecord,
}

/// Expected records checked against the parser.
#[derive(Debug)]
pub(super) struct Comparison {
    pub(super) total: usize,
    pub(super) mismatches: Vec<Mismatch>,
}

impl Comparison {
    /// Parses every record's text again and collects the records whose tree
    /// or parsed flag differ. Blank lines are skipped.
    pub(super) fn of(parser: &PrerequisiteParser, input: &str) -> anyhow::Result<Self> {
        let expected = input
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(i, line)| {
                serde_json::from_str::<PrerequisiteRecord>(line)
                    .map(|record| (i + 1, record))
                    .with_context(|| format!("invalid record on line {}", i + 1))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;

        let texts: Vec<&str> = expected
            .iter()
            .map(|(_, record)| record.prerequisites_text.as_str())
            .collect();
        let (actual, _) = PrerequisiteRecord::batch(parser, texts.as_slice());

        let total = expected.len();
        let mismatches = expected
            .into_iter()
            .zip(actual)
            .filter(|((_, expected), actual)| {
                expected.prerequisites != actual.prerequisites
                    || expected.prerequisites_parsed != actual.prerequisites_parsed
            })
            .map(|((line, expected), actual)| Mismatch {
                line,
                expected,
                actual,
            })
            .collect();

        Ok(Self { total, mismatches })
    }

    /// Percentage of records that matched, `0.0` when there were none.
    pub(super) fn accuracy(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        #[allow(clippy::cast_precision_loss)]
        let rate = (self.total - self.mismatches.len()) as f64 / self.total as f64;
        rate * 100.0
    }
}

impl Validate {
    #[instrument(skip(parser))]
    pub fn run(self, parser: &PrerequisiteParser) -> anyhow::Result<()> {
        let comparison = self.check(parser, &mut std::io::stdout().lock())?;

        if !comparison.mismatches.is_empty() {
            std::process::exit(1);
        }
        Ok(())
    }

    /// Compares the file against the parser and writes the report.
    pub(super) fn check(
        &self,
        parser: &PrerequisiteParser,
        out: &mut impl Write,
    ) -> anyhow::Result<Comparison> {
        const MAX_MISMATCH_DISPLAY: usize = 10;

        let comparison = Comparison::of(parser, &read_input(&self.file)?)?;
        tracing::info!(
            total = comparison.total,
            mismatches = comparison.mismatches.len(),
            "validated records"
        );

        if !self.quiet {
            let limit = if self.all {
                usize::MAX
            } else {
                MAX_MISMATCH_DISPLAY
            };
            Self::write_report(&comparison, limit, out)?;
        }
        Ok(comparison)
    }

    fn write_report(
        comparison: &Comparison,
        limit: usize,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let Comparison { total, mismatches } = comparison;
        let matching = total - mismatches.len();
        let summary = format!("{matching}/{total} ({:.1}%)", comparison.accuracy());

        if mismatches.is_empty() {
            writeln!(out, "Matching records: {} ✅", summary.good())?;
            return Ok(());
        }

        writeln!(out, "Matching records: {} ⚠️", summary.caution())?;
        for mismatch in mismatches.iter().take(limit) {
            writeln!(out)?;
            writeln!(
                out,
                "line {}: {}",
                mismatch.line, mismatch.expected.prerequisites_text
            )?;
            writeln!(
                out,
                "  expected: {} (parsed: {})",
                serde_json::to_string(&mismatch.expected.prerequisites)?,
                mismatch.expected.prerequisites_parsed
            )?;
            writeln!(
                out,
                "  actual:   {} (parsed: {})",
                serde_json::to_string(&mismatch.actual.prerequisites)?,
                mismatch.actual.prerequisites_parsed
            )?;
        }
        if mismatches.len() > limit {
            writeln!(out)?;
            writeln!(
                out,
                "{}",
                format!("... and {} more mismatches", mismatches.len() - limit).muted()
            )?;
        }
        Ok(())
    }
}
