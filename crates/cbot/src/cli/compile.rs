use std::{
    fs,
    io::{self, Read},
    path::{Path, PathBuf},
};

use anyhow::Context;
use cbot_core::{
    compile, compile_at, render::render, FormSelections, Format, SelectionsRequest,
};
use chrono::{DateTime, Utc};
use tracing::instrument;

use super::terminal::Colorize;

#[derive(Debug, clap::Parser)]
pub struct Command {
    /// Questionnaire answers as JSON. Reads stdin when omitted or `-`
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output format (html, markdown or json). Defaults to the extension of
    /// --output, or html
    #[arg(short, long, value_name = "FORMAT")]
    format: Option<Format>,

    /// Write the report to this file instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Timestamp to stamp the report with (RFC 3339). Defaults to now
    #[arg(long, value_name = "TIMESTAMP")]
    generated_at: Option<DateTime<Utc>>,
}

impl Command {
    #[instrument(level = "debug", skip(self))]
    pub fn run(self) -> anyhow::Result<()> {
        let json = self.read_input()?;
        let request: SelectionsRequest =
            serde_json::from_str(&json).context("failed to parse questionnaire answers")?;
        let selections =
            FormSelections::try_from(request).context("invalid questionnaire answers")?;

        let report = self
            .generated_at
            .map_or_else(|| compile(&selections), |at| compile_at(&selections, at));

        for warning in report.warnings() {
            eprintln!("{} {warning}", "warning:".warning());
        }

        let format = self.resolve_format();
        let rendered = render(&report, format);

        match &self.output {
            Some(path) => {
                fs::write(path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?;
                eprintln!(
                    "{} {} report to {}",
                    "Wrote".success(),
                    format,
                    path.display()
                );
            }
            None => print!("{rendered}"),
        }

        Ok(())
    }

    fn read_input(&self) -> anyhow::Result<String> {
        match self.input.as_deref() {
            None => read_stdin(),
            Some(path) if path == Path::new("-") => read_stdin(),
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display())),
        }
    }

    fn resolve_format(&self) -> Format {
        self.format
            .or_else(|| {
                self.output
                    .as_deref()
                    .and_then(Path::extension)
                    .and_then(|ext| ext.to_str())
                    .and_then(|ext| ext.parse().ok())
            })
            .unwrap_or_default()
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read stdin")?;
    Ok(buffer)
}
