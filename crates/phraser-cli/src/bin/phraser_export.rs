// phraser-export: Print the phrasegrams of a model.
//
// One `phrase<TAB>score` line per phrasegram, best score first.
//
// Usage:
//   phraser-export [-m MODEL] [--limit N]
//
// Options:
//   -m, --model PATH       Model file (default: $PHRASER_MODEL)
//   -n, --limit N          Print only the N best phrasegrams
//   -h, --help             Print help

use std::io::{self, Write};

use phraser::PhraseConfig;
use phraser_cli::{fatal, parse_option, parse_value};

fn main() {
    phraser_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if phraser_cli::wants_help(&args) {
        println!("phraser-export: Print the phrasegrams of a model.");
        println!();
        println!("Usage: phraser-export [-m MODEL] [--limit N]");
        println!();
        println!("Options:");
        println!("  -m, --model PATH       Model file (default: $PHRASER_MODEL)");
        println!("  -n, --limit N          Print only the N best phrasegrams");
        println!("  -h, --help             Print this help");
        return;
    }

    let (model_path, args) = parse_option(&args, "--model", Some("-m")).unwrap_or_else(|e| fatal(&e));
    let (limit, args) = parse_option(&args, "--limit", Some("-n")).unwrap_or_else(|e| fatal(&e));
    if !args.is_empty() {
        fatal(&format!("unexpected arguments: {}", args.join(" ")));
    }
    let limit: usize = match limit {
        Some(n) => parse_value("--limit", &n).unwrap_or_else(|e| fatal(&e)),
        None => usize::MAX,
    };

    let path = phraser_cli::resolve_model_path(model_path.as_deref()).unwrap_or_else(|e| fatal(&e));
    let model = phraser_cli::load_model(PhraseConfig::default(), &path).unwrap_or_else(|e| fatal(&e));
    let phraser = model.phraser().unwrap_or_else(|e| fatal(&e.to_string()));

    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let _ = writeln!(
        out,
        "# {} phrasegrams, {} scoring, threshold {}, min_count {}",
        phraser.len(),
        phraser.scoring(),
        phraser.threshold(),
        phraser.min_count()
    );
    for (phrase, score) in phraser.phrasegrams().into_iter().take(limit) {
        if writeln!(out, "{phrase}\t{score:.4}").is_err() {
            return;
        }
    }
}
