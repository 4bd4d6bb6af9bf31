// phraser-cli: shared utilities for CLI tools.

use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use phraser::{PhraseConfig, PhraseModel};
use serde_json::Value;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "PHRASER_LOG";

/// Environment variable holding the default model path.
pub const MODEL_ENV: &str = "PHRASER_MODEL";

/// Log to stderr, filtered by `PHRASER_LOG` (default: `warn`).
pub fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Parse a `--long=VALUE`, `--long VALUE` or `-s VALUE` option.
///
/// Returns `(value, remaining_args)`. The last occurrence wins.
pub fn parse_option(
    args: &[String],
    long: &str,
    short: Option<&str>,
) -> Result<(Option<String>, Vec<String>), String> {
    let long_eq = format!("{long}=");
    let mut value = None;
    let mut remaining = Vec::new();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        if let Some(val) = arg.strip_prefix(&long_eq) {
            value = Some(val.to_string());
        } else if arg == long || short == Some(arg.as_str()) {
            match iter.next() {
                Some(val) => value = Some(val.clone()),
                None => return Err(format!("{arg} requires a value")),
            }
        } else {
            remaining.push(arg.clone());
        }
    }

    Ok((value, remaining))
}

/// Remove a boolean `--flag` from the args.
///
/// Returns `(present, remaining_args)`.
pub fn parse_flag(args: &[String], flag: &str) -> (bool, Vec<String>) {
    let present = args.iter().any(|a| a == flag);
    let remaining = args.iter().filter(|a| *a != flag).cloned().collect();
    (present, remaining)
}

/// Parse an option value, naming the option in the error.
pub fn parse_value<T>(name: &str, value: &str) -> Result<T, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| format!("invalid value {value:?} for {name}: {e}"))
}

/// Read a JSON Lines file: one JSON object per non-blank line.
pub fn read_records(path: &Path) -> Result<Vec<Value>, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_records(&contents).map_err(|e| format!("{}: {}", path.display(), e))
}

/// Parse JSON Lines text.
pub fn parse_records(contents: &str) -> Result<Vec<Value>, String> {
    let mut records = Vec::new();
    for (i, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let record: Value =
            serde_json::from_str(line).map_err(|e| format!("line {}: {}", i + 1, e))?;
        if !record.is_object() {
            return Err(format!("line {}: expected a JSON object", i + 1));
        }
        records.push(record);
    }
    Ok(records)
}

/// Model path from `-m` or, failing that, `PHRASER_MODEL`.
pub fn resolve_model_path(explicit: Option<&str>) -> Result<PathBuf, String> {
    pick_model_path(explicit, std::env::var(MODEL_ENV).ok().as_deref())
}

fn pick_model_path(explicit: Option<&str>, from_env: Option<&str>) -> Result<PathBuf, String> {
    explicit
        .or(from_env)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .ok_or_else(|| format!("no model given: pass -m MODEL or set {MODEL_ENV}"))
}

/// Load a saved model for application.
pub fn load_model(config: PhraseConfig, path: &Path) -> Result<PhraseModel, String> {
    PhraseModel::from_file(config, path)
        .map_err(|e| format!("failed to load model {}: {}", path.display(), e))
}

/// Print an error message and exit with code 1.
pub fn fatal(msg: &str) -> ! {
    eprintln!("error: {msg}");
    process::exit(1);
}

/// Check if `--help` or `-h` is in the args.
pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "--help" || a == "-h")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn option_forms() {
        let (v, rest) = parse_option(&args(&["-m", "a.bin", "x"]), "--model", Some("-m")).unwrap();
        assert_eq!(v.as_deref(), Some("a.bin"));
        assert_eq!(rest, args(&["x"]));

        let (v, rest) = parse_option(&args(&["--model=b.bin"]), "--model", Some("-m")).unwrap();
        assert_eq!(v.as_deref(), Some("b.bin"));
        assert!(rest.is_empty());

        let (v, rest) = parse_option(&args(&["x", "--model", "c.bin"]), "--model", None).unwrap();
        assert_eq!(v.as_deref(), Some("c.bin"));
        assert_eq!(rest, args(&["x"]));
    }

    #[test]
    fn option_absent_or_missing_value() {
        let (v, rest) = parse_option(&args(&["x", "y"]), "--column", None).unwrap();
        assert_eq!(v, None);
        assert_eq!(rest, args(&["x", "y"]));
        assert!(parse_option(&args(&["--column"]), "--column", None).is_err());
    }

    #[test]
    fn flag() {
        let (on, rest) = parse_flag(&args(&["--jsonl", "a"]), "--jsonl");
        assert!(on);
        assert_eq!(rest, args(&["a"]));
        let (on, _) = parse_flag(&args(&["a"]), "--jsonl");
        assert!(!on);
    }

    #[test]
    fn values() {
        assert_eq!(parse_value::<u64>("--min-count", "5").unwrap(), 5);
        let err = parse_value::<f64>("--threshold", "high").unwrap_err();
        assert!(err.contains("--threshold"));
    }

    #[test]
    fn json_lines() {
        let records = parse_records("{\"clean_body\": \"a\"}\n\n{\"clean_body\": \"b\"}\n").unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1]["clean_body"], "b");

        let err = parse_records("{\"a\": 1}\nnot json\n").unwrap_err();
        assert!(err.starts_with("line 2"));
        assert!(parse_records("[1, 2]").is_err());
    }

    #[test]
    fn json_lines_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.jsonl");
        std::fs::write(&path, "{\"clean_body\": \"bonjour\"}\n").unwrap();
        assert_eq!(read_records(&path).unwrap().len(), 1);
        assert!(read_records(&dir.path().join("missing.jsonl")).is_err());
    }

    #[test]
    fn model_path_resolution() {
        assert_eq!(
            pick_model_path(Some("a.bin"), Some("b.bin")).unwrap(),
            PathBuf::from("a.bin")
        );
        assert_eq!(
            pick_model_path(None, Some("b.bin")).unwrap(),
            PathBuf::from("b.bin")
        );
        assert!(pick_model_path(None, None).is_err());
        assert!(pick_model_path(None, Some("")).is_err());
    }

    #[test]
    fn help() {
        assert!(wants_help(&args(&["-h"])));
        assert!(wants_help(&args(&["x", "--help"])));
        assert!(!wants_help(&args(&["x"])));
    }
}
