use clap::Parser;
use prereqs::extract_corequisites;
use tracing::instrument;

use super::text_or_stdin;

#[derive(Debug, Parser)]
#[command(about = "Extract corequisite course codes from text")]
pub struct Corequisites {
    /// The course description text. Read from stdin if omitted.
    text: Option<String>,

    /// Print the codes as a JSON array
    #[arg(long)]
    json: bool,
}

impl Corequisites {
    #[instrument]
    pub fn run(self) -> anyhow::Result<()> {
        let text = text_or_stdin(self.text)?;
        let corequisites = extract_corequisites(&text);
        tracing::debug!(count = corequisites.len(), "extracted corequisites");

        if self.json {
            println!("{}", serde_json::to_string(&corequisites)?);
        } else {
            for code in &corequisites {
                println!("{code}");
            }
        }
        Ok(())
    }
}
