use std::fmt;

use super::{dns_cells, generated_on, hardware_cells, DNS_HEADERS, HARDWARE_HEADERS};
use crate::report::{Block, NoteLevel, ReportDocument};

/// Backslash-escapes characters with inline meaning in Markdown.
#[must_use]
pub fn escape_markdown(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '|' | '#') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Displays a report as a Markdown document.
#[derive(Debug, Clone, Copy)]
pub struct Markdown<'a>(pub &'a ReportDocument);

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.0;

        writeln!(f, "# {}", escape_markdown(&document.title))?;
        writeln!(f)?;
        writeln!(f, "Generated: {}", generated_on(document))?;

        for section in &document.sections {
            writeln!(f)?;
            writeln!(f, "## {}", escape_markdown(&section.heading()))?;
            for block in &section.blocks {
                writeln!(f)?;
                write_block(f, block)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "---")?;
        writeln!(f)?;
        writeln!(f, "{}", escape_markdown(&document.footer))?;
        writeln!(f)?;
        writeln!(f, "Fingerprint: `{}`", document.fingerprint)
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block) -> fmt::Result {
    match block {
        Block::Fields { items } => {
            for field in items {
                writeln!(
                    f,
                    "- **{}:** {}",
                    escape_markdown(&field.label),
                    escape_markdown(&field.value)
                )?;
            }
            Ok(())
        }
        Block::List { items } => {
            for item in items {
                writeln!(f, "- {}", escape_markdown(item))?;
            }
            Ok(())
        }
        Block::Paragraph { text } => writeln!(f, "{}", escape_markdown(text)),
        Block::Subheading { text } => writeln!(f, "### {}", escape_markdown(text)),
        Block::Note { level, text } => {
            let label = match level {
                NoteLevel::Info => "Note",
                NoteLevel::Warning => "Warning",
            };
            writeln!(f, "> **{label}:** {}", escape_markdown(text))
        }
        Block::Hardware { rows } => {
            write_table(f, &HARDWARE_HEADERS, rows.iter().map(hardware_cells))
        }
        Block::Dns { records } => write_table(f, &DNS_HEADERS, records.iter().map(dns_cells)),
        Block::Placeholder { text } => writeln!(f, "_{}_", escape_markdown(text)),
    }
}

fn write_table<const N: usize>(
    f: &mut fmt::Formatter<'_>,
    headers: &[&str; N],
    rows: impl Iterator<Item = [String; N]>,
) -> fmt::Result {
    writeln!(f, "| {} |", headers.join(" | "))?;
    writeln!(f, "|{}", "---|".repeat(N))?;
    for row in rows {
        let cells: Vec<_> = row.iter().map(|cell| escape_markdown(cell)).collect();
        writeln!(f, "| {} |", cells.join(" | "))?;
    }
    Ok(())
}
