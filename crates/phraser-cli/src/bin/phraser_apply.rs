// phraser-apply: Apply a phrase model to text from stdin.
//
// Plain mode phrases each stdin line. With --jsonl each line is a JSON
// object whose text column is replaced by its phrased version.
//
// Usage:
//   phraser-apply [-m MODEL] [--column NAME] [--policy POLICY] [--jsonl]
//
// Options:
//   -m, --model PATH       Model file (default: $PHRASER_MODEL)
//   -c, --column NAME      Column to phrase in --jsonl mode (default: clean_body)
//   --policy POLICY        legacy, fallback or strict (default: fallback)
//   --jsonl                Read and write JSON Lines
//   -h, --help             Print help

use std::io::{self, BufRead, Write};

use phraser::{DiscrepancyPolicy, PhraseConfig, PhraseModel};
use phraser_cli::{fatal, parse_option, parse_value};
use serde_json::Value;
use tracing::warn;

fn main() {
    phraser_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if phraser_cli::wants_help(&args) {
        println!("phraser-apply: Apply a phrase model to text from stdin.");
        println!();
        println!("Usage: phraser-apply [-m MODEL] [--column NAME] [--policy POLICY] [--jsonl]");
        println!();
        println!("Reads text from stdin (one text per line) and prints the phrased text.");
        println!();
        println!("Options:");
        println!("  -m, --model PATH       Model file (default: $PHRASER_MODEL)");
        println!("  -c, --column NAME      Column to phrase in --jsonl mode (default: clean_body)");
        println!("  --policy POLICY        legacy, fallback or strict (default: fallback)");
        println!("  --jsonl                Read and write JSON Lines");
        println!("  -h, --help             Print this help");
        return;
    }

    let (model_path, args) = parse_option(&args, "--model", Some("-m")).unwrap_or_else(|e| fatal(&e));
    let (column, args) = parse_option(&args, "--column", Some("-c")).unwrap_or_else(|e| fatal(&e));
    let (policy, args) = parse_option(&args, "--policy", None).unwrap_or_else(|e| fatal(&e));
    let (jsonl, args) = phraser_cli::parse_flag(&args, "--jsonl");
    if !args.is_empty() {
        fatal(&format!("unexpected arguments: {}", args.join(" ")));
    }

    let mut config = PhraseConfig::default();
    if let Some(column) = column {
        config = config.with_input_column(column);
    }
    if let Some(p) = policy {
        let policy: DiscrepancyPolicy = parse_value("--policy", &p).unwrap_or_else(|e| fatal(&e));
        config = config.with_discrepancy(policy);
    }

    let path = phraser_cli::resolve_model_path(model_path.as_deref()).unwrap_or_else(|e| fatal(&e));
    let model = phraser_cli::load_model(config, &path).unwrap_or_else(|e| fatal(&e));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for (i, line) in stdin.lock().lines().enumerate() {
        let line = match line {
            Ok(l) => l,
            Err(e) => fatal(&format!("error reading stdin: {e}")),
        };
        let phrased = if jsonl {
            if line.trim().is_empty() {
                continue;
            }
            phrase_row(&line, &model).map_err(|e| format!("line {}: {}", i + 1, e))
        } else {
            model.apply(&line).map_err(|e| format!("line {}: {}", i + 1, e))
        };
        match phrased {
            Ok(text) => {
                if writeln!(out, "{text}").is_err() {
                    return;
                }
            }
            Err(e) => fatal(&e),
        }
    }
    if let Err(e) = out.flush() {
        warn!(error = %e, "failed to flush stdout");
    }
}

/// Replace the model's column of one JSON row by its phrased text.
fn phrase_row(line: &str, model: &PhraseModel) -> Result<String, String> {
    let mut row: Value = serde_json::from_str(line).map_err(|e| e.to_string())?;
    let column = model.config().input_column.as_str();
    let phrased = phraser::phrase_on_field(&row, column, model).map_err(|e| e.to_string())?;
    if let Some(object) = row.as_object_mut() {
        object.insert(column.to_string(), Value::String(phrased));
    }
    Ok(row.to_string())
}
