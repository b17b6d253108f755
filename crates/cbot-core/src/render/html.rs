use std::fmt;

use super::{dns_cells, generated_on, hardware_cells, DNS_HEADERS, HARDWARE_HEADERS};
use crate::report::{Block, NoteLevel, ReportDocument};

const STYLE: &str = "body{font-family:Arial,sans-serif;margin:40px;color:#333}\
h1{color:#1a237e;border-bottom:2px solid #1a237e;padding-bottom:8px}\
.section h3{color:#283593;margin-top:32px}\
table{border-collapse:collapse;width:100%;margin:12px 0}\
th,td{border:1px solid #ccc;padding:8px;text-align:left}\
th{background:#e8eaf6}\
.info,.warning{padding:10px;border-radius:4px}\
.info{background:#e3f2fd}\
.warning{background:#fff3e0;border-left:4px solid #ef6c00}\
.placeholder{padding:24px;border:1px dashed #999;text-align:center;color:#777}\
footer{margin-top:40px;font-size:.9em;color:#666}";

/// Escapes text for inclusion in HTML element content or attribute values.
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Displays a report as a standalone HTML page.
#[derive(Debug, Clone, Copy)]
pub struct Html<'a>(pub &'a ReportDocument);

impl fmt::Display for Html<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let document = self.0;
        let title = escape_html(&document.title);

        writeln!(f, "<!DOCTYPE html>")?;
        writeln!(f, "<html lang=\"en\">")?;
        writeln!(f, "<head>")?;
        writeln!(f, "<meta charset=\"utf-8\">")?;
        writeln!(f, "<title>{title}</title>")?;
        writeln!(f, "<style>{STYLE}</style>")?;
        writeln!(f, "</head>")?;
        writeln!(f, "<body>")?;
        writeln!(f, "<h1>{title}</h1>")?;
        writeln!(f, "<div class=\"requirements-document\">")?;
        writeln!(f, "<p>Generated: {}</p>", generated_on(document))?;

        for section in &document.sections {
            writeln!(f, "<div class=\"section\">")?;
            writeln!(f, "<h3>{}</h3>", escape_html(&section.heading()))?;
            for block in &section.blocks {
                write_block(f, block)?;
            }
            writeln!(f, "</div>")?;
        }
        writeln!(f, "</div>")?;

        writeln!(f, "<footer>")?;
        writeln!(f, "<p>{}</p>", escape_html(&document.footer))?;
        writeln!(f, "<p>Fingerprint: <code>{}</code></p>", document.fingerprint)?;
        writeln!(f, "</footer>")?;
        writeln!(f, "</body>")?;
        writeln!(f, "</html>")
    }
}

fn write_block(f: &mut fmt::Formatter<'_>, block: &Block) -> fmt::Result {
    match block {
        Block::Fields { items } => {
            writeln!(f, "<ul>")?;
            for field in items {
                writeln!(
                    f,
                    "<li><strong>{}:</strong> {}</li>",
                    escape_html(&field.label),
                    escape_html(&field.value)
                )?;
            }
            writeln!(f, "</ul>")
        }
        Block::List { items } => {
            writeln!(f, "<ul>")?;
            for item in items {
                writeln!(f, "<li>{}</li>", escape_html(item))?;
            }
            writeln!(f, "</ul>")
        }
        Block::Paragraph { text } => writeln!(f, "<p>{}</p>", escape_html(text)),
        Block::Subheading { text } => writeln!(f, "<h4>{}</h4>", escape_html(text)),
        Block::Note { level, text } => {
            let (class, label) = match level {
                NoteLevel::Info => ("info", "Note"),
                NoteLevel::Warning => ("warning", "Warning"),
            };
            writeln!(
                f,
                "<p class=\"{class}\"><strong>{label}:</strong> {}</p>",
                escape_html(text)
            )
        }
        Block::Hardware { rows } => {
            write_table(f, &HARDWARE_HEADERS, rows.iter().map(hardware_cells))
        }
        Block::Dns { records } => write_table(f, &DNS_HEADERS, records.iter().map(dns_cells)),
        Block::Placeholder { text } => {
            writeln!(f, "<div class=\"placeholder\">{}</div>", escape_html(text))
        }
    }
}

fn write_table<const N: usize>(
    f: &mut fmt::Formatter<'_>,
    headers: &[&str; N],
    rows: impl Iterator<Item = [String; N]>,
) -> fmt::Result {
    writeln!(f, "<table>")?;
    write!(f, "<tr>")?;
    for header in headers {
        write!(f, "<th>{header}</th>")?;
    }
    writeln!(f, "</tr>")?;
    for row in rows {
        write!(f, "<tr>")?;
        for cell in &row {
            write!(f, "<td>{}</td>", escape_html(cell))?;
        }
        writeln!(f, "</tr>")?;
    }
    writeln!(f, "</table>")
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use test_case::test_case;

    use super::*;
    use crate::{
        compile_at,
        domain::{
            CoreModule, Database, Environment, EnvironmentType, FormSelections, LdapDetails,
        },
    };

    #[test_case("plain", "plain"; "nothing to escape")]
    #[test_case("<script>", "&lt;script&gt;"; "tags")]
    #[test_case("a & b", "a &amp; b"; "ampersand")]
    #[test_case("\"x\" 'y'", "&quot;x&quot; &#39;y&#39;"; "quotes")]
    fn escape(input: &str, expected: &str) {
        assert_eq!(escape_html(input), expected);
    }

    fn page(selections: &FormSelections) -> String {
        let report = compile_at(selections, Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap());
        Html(&report).to_string()
    }

    #[test]
    fn page_has_headings_and_tables() {
        let html = page(
            &FormSelections::new(Environment::Both, EnvironmentType::OnPrem, Database::Mongodb)
                .with_module(CoreModule::Classifier)
                .with_module(CoreModule::Core),
        );

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<div class=\"requirements-document\">"));
        assert!(html.contains("<h3>1. Environment Information</h3>"));
        assert!(html.contains("<h3>7. Installation Topology</h3>"));
        assert!(html.contains("<th>Operating System</th>"));
        assert!(html.contains("<td>cbot-socket-test</td>"));
        assert!(html.contains("<p class=\"warning\"><strong>Warning:</strong> "));
        assert!(html.contains("Generated: 2024-03-01 12:00 UTC"));
    }

    #[test]
    fn user_text_is_escaped() {
        let details =
            LdapDetails::new("", "", "", "(&(objectClass=user)(cn=<x>))").unwrap();
        let html = page(
            &FormSelections::new(Environment::Live, EnvironmentType::Cloud, Database::Mssql)
                .with_ldap(details),
        );
        assert!(html.contains("(&amp;(objectClass=user)(cn=&lt;x&gt;))"));
        assert!(!html.contains("<x>"));
    }
}
