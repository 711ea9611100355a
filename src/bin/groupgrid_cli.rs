//! CLI tool for groupgrid - groups JSON rows and prints the render window
//!
//! Usage:
//!   groupgrid_cli <rows.json>                       # Ungrouped window at scroll 0
//!   groupgrid_cli <rows.json> -g country,city       # Group by fields
//!   groupgrid_cli <rows.json> -g country -e Norway  # Expand a group (repeatable)
//!   groupgrid_cli <rows.json> -c config.json -s 700 --expand-all -v

#![allow(clippy::exit)]

use std::env;
use std::fs;
use std::io::{self, Write};

use log::{debug, LevelFilter, SetLoggerError};
use serde::Serialize;
use serde_json::Value;
use simplelog::{Config, WriteLogger};

use groupgrid::layout::RowRange;
use groupgrid::{GridConfig, GridError, JsonFieldGrouper, RenderedRow, ViewportRows};

const USAGE: &str = "Usage: groupgrid_cli <rows.json> [-c config.json] [-g field,field] \
                     [-e group_id]... [--expand-all] [-s scroll_top] [-v]";

struct Args {
    rows_path: String,
    config_path: Option<String>,
    group_by: Option<Vec<String>>,
    expand: Vec<String>,
    expand_all: bool,
    scroll_top: f64,
    verbose: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    range: Option<RowRange>,
    row_count: usize,
    rows_count: usize,
    total_height: f64,
    rows: Vec<RenderedRow<'a, Value>>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut iter = args.iter().skip(1);
    let mut rows_path = None;
    let mut parsed = Args {
        rows_path: String::new(),
        config_path: None,
        group_by: None,
        expand: Vec::new(),
        expand_all: false,
        scroll_top: 0.0,
        verbose: false,
    };

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "-c" | "--config" => {
                parsed.config_path = Some(iter.next().ok_or("missing value for -c")?.clone());
            }
            "-g" | "--group-by" => {
                let fields = iter.next().ok_or("missing value for -g")?;
                parsed.group_by = Some(
                    fields
                        .split(',')
                        .map(str::trim)
                        .filter(|f| !f.is_empty())
                        .map(str::to_string)
                        .collect(),
                );
            }
            "-e" | "--expand" => {
                parsed
                    .expand
                    .push(iter.next().ok_or("missing value for -e")?.clone());
            }
            "--expand-all" => parsed.expand_all = true,
            "-s" | "--scroll-top" => {
                let value = iter.next().ok_or("missing value for -s")?;
                parsed.scroll_top = value
                    .parse()
                    .map_err(|e| format!("invalid scroll top {value:?}: {e}"))?;
            }
            "-v" | "--verbose" => parsed.verbose = true,
            other if rows_path.is_none() && !other.starts_with('-') => {
                rows_path = Some(other.to_string());
            }
            other => return Err(format!("unexpected argument {other:?}")),
        }
    }

    parsed.rows_path = rows_path.ok_or("missing <rows.json>")?;
    Ok(parsed)
}

fn run(args: &Args) -> Result<String, GridError> {
    let mut config = match &args.config_path {
        Some(path) => GridConfig::from_json(&fs::read_to_string(path)?)?,
        None => GridConfig::default(),
    };
    if let Some(group_by) = &args.group_by {
        config.group_by.clone_from(group_by);
    }
    config.expanded_group_ids.extend(args.expand.iter().cloned());

    let rows: Vec<Value> = serde_json::from_str(&fs::read_to_string(&args.rows_path)?)?;
    debug!("loaded {} rows from {}", rows.len(), args.rows_path);

    let mut expanded = config.expanded_groups();
    let mut view = ViewportRows::new(rows, &config)?.with_grouper(JsonFieldGrouper);

    if args.expand_all {
        if let Some(tree) = view.compute(&expanded).tree() {
            expanded.expand_all(tree);
        }
    }

    view.set_scroll_top(args.scroll_top);

    let window = view.compute(&expanded);
    let output = Output {
        range: window.range(),
        row_count: window.len(),
        rows_count: window.rows_count(),
        total_height: window.total_height(),
        rows: window.rendered_rows().collect(),
    };
    Ok(serde_json::to_string_pretty(&output)?)
}

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

/// Install the stderr logger. Fails if a logger is already set.
fn init_logging(verbose: bool) -> Result<(), SetLoggerError> {
    WriteLogger::init(log_level(verbose), Config::default(), io::stderr())
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let args = match parse_args(&args) {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Error: {e}");
            eprintln!("{USAGE}");
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logging(args.verbose) {
        eprintln!("Warning: failed to initialize logging: {e}");
    }

    let json = match run(&args) {
        Ok(j) => j,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    let mut stdout = io::stdout();
    if let Err(e) = writeln!(stdout, "{json}") {
        eprintln!("Error writing output: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("groupgrid_cli")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn test_log_level() {
        assert_eq!(log_level(true), LevelFilter::Debug);
        assert_eq!(log_level(false), LevelFilter::Warn);
    }

    #[test]
    fn test_second_logger_init_is_reported() {
        // The first call may already fail if another test installed a logger
        let _first = init_logging(false);
        assert!(init_logging(true).is_err());
    }

    #[test]
    fn test_parse_args() {
        let parsed = parse_args(&args(&["rows.json", "-g", "a, b", "-e", "x", "-s", "70", "-v"]))
            .unwrap();
        assert_eq!(parsed.rows_path, "rows.json");
        assert_eq!(parsed.group_by, Some(vec!["a".to_string(), "b".to_string()]));
        assert_eq!(parsed.expand, vec!["x".to_string()]);
        assert!(parsed.verbose);
        assert!(parse_args(&args(&["-s"])).is_err());
        assert!(parse_args(&args(&[])).is_err());
    }
}
