//! sqlprobe CLI - SQL checks, completions and hover from the command line

mod args;
mod config;
mod output;

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use sqlprobe_core::{Analyzer, Catalog, DiagnosticKind, EditorService, Position};

use crate::args::{Args, Command};
use crate::config::Config;
use crate::output::OutputFormatter;

fn main() -> ExitCode {
    let args = Args::parse();

    // Initialize tracing
    let level = match (args.quiet, args.verbose) {
        (true, _) => tracing::Level::ERROR,
        (false, 0) => tracing::Level::WARN,
        (false, 1) => tracing::Level::DEBUG,
        (false, _) => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();

    match run(args) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            eprintln!("Error: {:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(args: Args) -> Result<bool> {
    let quiet = args.quiet;
    match args.command {
        Command::Check {
            files,
            config: config_path,
            disable,
            format,
        } => {
            let config = Config::load(config_path.as_deref())?
                .merge_with_args(None, &files, format, &disable);
            let output_format = config.output_format()?;
            let analyzer = Analyzer::with_disabled(disabled_rules(&config.disable)?);

            let query_files = collect_files(&config.files)?;
            if query_files.is_empty() {
                miette::bail!("No query files specified. Use positional arguments or configure in sqlprobe.toml");
            }

            let mut total_errors = 0;

            for query_file in &query_files {
                let content = fs::read_to_string(query_file).into_diagnostic()?;
                let diagnostics = analyzer.analyze(&content);

                if !diagnostics.is_empty() {
                    let formatter =
                        OutputFormatter::new(output_format, query_file.display().to_string());
                    formatter.print_diagnostics(&diagnostics, &content)?;
                    total_errors += diagnostics.len();
                }
            }

            // Print summary
            if !quiet {
                if total_errors > 0 {
                    eprintln!(
                        "Found {} error(s) in {} file(s)",
                        total_errors,
                        query_files.len()
                    );
                } else {
                    eprintln!("All {} file(s) passed validation", query_files.len());
                }
            }

            Ok(total_errors > 0)
        }

        Command::Complete {
            file,
            schema,
            line,
            column,
            format,
        } => {
            let config = Config::load(None)?.merge_with_args(schema.as_ref(), &[], format, &[]);
            let service = EditorService::from_catalog(load_catalog(&config)?);
            let content = fs::read_to_string(&file).into_diagnostic()?;

            let completions = service.provide_completions(&content, Position::new(line, column));
            OutputFormatter::new(config.output_format()?, file.display().to_string())
                .print_completions(&completions)?;
            Ok(false)
        }

        Command::Hover {
            word,
            schema,
            file,
            line,
            column,
        } => {
            let config = Config::load(None)?.merge_with_args(schema.as_ref(), &[], None, &[]);
            let service = EditorService::from_catalog(load_catalog(&config)?);

            let contents = match (word, file, line, column) {
                (Some(word), _, _, _) => service.provide_hover(&word),
                (None, Some(file), Some(line), Some(column)) => {
                    let content = fs::read_to_string(&file).into_diagnostic()?;
                    service
                        .hover_at(&content, Position::new(line, column))
                        .map(|hover| hover.contents)
                }
                _ => miette::bail!("Pass a word, or --file with --line and --column"),
            };

            match contents {
                Some(contents) => println!("{}", contents),
                None if !quiet => eprintln!("No table or column matches"),
                None => {}
            }
            Ok(false)
        }

        Command::Schema { file } => {
            let config = Config::load(None)?.merge_with_args(file.as_ref(), &[], None, &[]);
            let catalog = load_catalog(&config)?;

            println!("Schema Information:");
            println!("==================");
            for table in catalog.tables() {
                println!("\nTable: {} ({} sample rows)", table.name, table.row_count());
                for col in &table.columns {
                    println!("    - {} {}", col.name, col.data_type);
                }
            }

            Ok(false)
        }
    }
}

/// Load the configured assignment schema, or an empty catalog if none is set
fn load_catalog(config: &Config) -> Result<Catalog> {
    let Some(path) = &config.schema else {
        tracing::warn!("no schema configured; completions and hover use keywords only");
        return Ok(Catalog::default());
    };
    let content = fs::read_to_string(Path::new(path)).into_diagnostic()?;
    let catalog = Catalog::from_json(&content)?;
    tracing::debug!(path = %path, tables = catalog.len(), "loaded schema");
    Ok(catalog)
}

/// Expand file arguments, treating any containing `*` as a glob pattern
fn collect_files(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for pattern in patterns {
        if pattern.contains('*') {
            for path in glob::glob(pattern).into_diagnostic()?.flatten() {
                files.push(path);
            }
        } else {
            files.push(PathBuf::from(pattern));
        }
    }
    Ok(files)
}

fn disabled_rules(codes: &[String]) -> Result<Vec<DiagnosticKind>> {
    codes
        .iter()
        .map(|code| {
            DiagnosticKind::from_code(code)
                .ok_or_else(|| miette::miette!("Unknown rule '{}'. Rules are S0001-S0006.", code))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_rules() {
        let rules = disabled_rules(&["s0001".to_string(), "missing-table-name".to_string()])
            .unwrap();
        assert_eq!(
            rules,
            vec![
                DiagnosticKind::UnmatchedParentheses,
                DiagnosticKind::MissingTableName
            ]
        );
        assert!(disabled_rules(&["E0001".to_string()]).is_err());
    }

    #[test]
    fn test_collect_files_expands_globs() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.sql"), "SELECT 1").unwrap();
        fs::write(dir.path().join("b.sql"), "SELECT 2").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let pattern = format!("{}/*.sql", dir.path().display());
        let explicit = dir.path().join("c.sql").display().to_string();
        let files = collect_files(&[pattern, explicit.clone()]).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|f| f.extension().is_some_and(|e| e == "sql")));
        assert_eq!(files[2], PathBuf::from(explicit));
    }

    #[test]
    fn test_load_catalog_from_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("assignment.json");
        fs::write(
            &path,
            r#"{ "sampleTables": [{ "tableName": "users", "columns": [] }] }"#,
        )
        .unwrap();

        let config = Config {
            schema: Some(path.display().to_string()),
            ..Config::default()
        };
        assert_eq!(load_catalog(&config).unwrap().table_names(), vec!["users"]);
        assert!(load_catalog(&Config::default()).unwrap().is_empty());
    }
}
