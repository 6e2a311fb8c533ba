//! Output formatting

use miette::{IntoDiagnostic, Result};
use sqlprobe_core::{Completion, Diagnostic, Severity};

use crate::args::OutputFormat;

/// Output formatter for diagnostics and completions
pub struct OutputFormatter {
    format: OutputFormat,
    file_name: String,
}

impl OutputFormatter {
    pub fn new(format: OutputFormat, file_name: String) -> Self {
        Self { format, file_name }
    }

    /// Print diagnostics in the configured format
    pub fn print_diagnostics(&self, diagnostics: &[Diagnostic], source: &str) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                eprint!("{}", self.render_human(diagnostics, source));
                Ok(())
            }
            OutputFormat::Json => print_json(&self.json(diagnostics)),
            OutputFormat::Sarif => print_json(&self.sarif(diagnostics)),
        }
    }

    /// Print a completion list; SARIF has no completion form and falls back to JSON
    pub fn print_completions(&self, completions: &[Completion<'_>]) -> Result<()> {
        match self.format {
            OutputFormat::Human => {
                for completion in completions {
                    let suggestion = completion.suggestion;
                    println!(
                        "{:<10} {:<36} {}",
                        suggestion.kind, suggestion.label, suggestion.detail
                    );
                }
                Ok(())
            }
            OutputFormat::Json | OutputFormat::Sarif => print_json(&serde_json::json!({
                "file": self.file_name,
                "completions": completions,
            })),
        }
    }

    fn render_human(&self, diagnostics: &[Diagnostic], source: &str) -> String {
        let mut out = String::new();
        for diag in diagnostics {
            let severity_str = match diag.severity {
                Severity::Error => "\x1b[31merror\x1b[0m",
            };

            // Print main message
            out.push_str(&format!(
                "{}[{}]: {}\n",
                severity_str,
                diag.code(),
                diag.message
            ));

            let span = &diag.span;
            out.push_str(&format!(
                "  --> {}:{}:{}\n",
                self.file_name, span.line, span.column
            ));

            // Print source line with annotation
            if let Some(source_line) = sqlprobe_core::position::line_at(source, span.line) {
                out.push_str("   |\n");
                out.push_str(&format!("{:>3} | {}\n", span.line, source_line));

                let padding = " ".repeat(span.column.saturating_sub(1));
                let underline = "^".repeat(span.length.max(1));
                out.push_str(&format!("   | {}{}\n", padding, underline));
            }

            out.push('\n');
        }
        out
    }

    fn json(&self, diagnostics: &[Diagnostic]) -> serde_json::Value {
        serde_json::json!({
            "file": self.file_name,
            "diagnostics": diagnostics
        })
    }

    fn sarif(&self, diagnostics: &[Diagnostic]) -> serde_json::Value {
        let results: Vec<serde_json::Value> = diagnostics
            .iter()
            .map(|d| {
                serde_json::json!({
                    "ruleId": d.code(),
                    "level": match d.severity {
                        Severity::Error => "error",
                    },
                    "message": {
                        "text": d.message
                    },
                    "locations": [{
                        "physicalLocation": {
                            "artifactLocation": {
                                "uri": self.file_name
                            },
                            "region": {
                                "startLine": d.span.line,
                                "startColumn": d.span.column,
                                "endColumn": d.span.end_column()
                            }
                        }
                    }]
                })
            })
            .collect();

        serde_json::json!({
            "$schema": "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json",
            "version": "2.1.0",
            "runs": [{
                "tool": {
                    "driver": {
                        "name": "sqlprobe",
                        "version": env!("CARGO_PKG_VERSION")
                    }
                },
                "results": results
            }]
        })
    }
}

fn print_json(value: &serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value).into_diagnostic()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlprobe_core::Analyzer;

    #[test]
    fn test_human_output_underlines_span() {
        let source = "SELECT id\n  FROM";
        let diagnostics = Analyzer::new().analyze(source);
        let formatter = OutputFormatter::new(OutputFormat::Human, "q.sql".to_string());
        let out = formatter.render_human(&diagnostics, source);

        assert!(out.contains("[S0005]: Missing table name after FROM"));
        assert!(out.contains("--> q.sql:2:3"));
        assert!(out.contains("  2 |   FROM\n   |   ^^^^\n"));
    }

    #[test]
    fn test_sarif_region() {
        let diagnostics = Analyzer::new().analyze("FROM SELECT * users");
        let formatter = OutputFormatter::new(OutputFormat::Sarif, "q.sql".to_string());
        let sarif = formatter.sarif(&diagnostics);
        let result = &sarif["runs"][0]["results"][0];

        assert_eq!(result["ruleId"], "S0004");
        assert_eq!(result["level"], "error");
        let region = &result["locations"][0]["physicalLocation"]["region"];
        assert_eq!(region["startLine"], 1);
        assert_eq!(region["startColumn"], 6);
        assert_eq!(region["endColumn"], 12);
    }
}
