// phraser-train: Train a phrase model on a JSON Lines corpus.
//
// Reads one JSON object per line, trains on the text of one column and
// writes the model to the output path.
//
// Usage:
//   phraser-train -o MODEL [OPTIONS] CORPUS.jsonl
//
// Options:
//   -o, --output PATH      Model file to write
//   -c, --column NAME      Text column to train on (default: clean_body)
//   --threshold T          Minimum score to join two tokens (default: 350)
//   --min-count N          Minimum joint occurrences (default: 200)
//   --scoring NAME         default or npmi (default: default)
//   --stopwords FILE       Stopword list, one per line (default: built-in)
//   --names FILE           Name list, one per line (default: built-in)
//   -h, --help             Print help

use std::path::Path;

use phraser::{CommonTerms, PhraseConfig, PhraseModel, Scoring};
use phraser_cli::{fatal, parse_option, parse_value};
use phraser_core::terms::load_word_list;
use tracing::info;

fn main() {
    phraser_cli::init_logging();
    let args: Vec<String> = std::env::args().skip(1).collect();

    if phraser_cli::wants_help(&args) {
        println!("phraser-train: Train a phrase model on a JSON Lines corpus.");
        println!();
        println!("Usage: phraser-train -o MODEL [OPTIONS] CORPUS.jsonl");
        println!();
        println!("Options:");
        println!("  -o, --output PATH      Model file to write");
        println!("  -c, --column NAME      Text column to train on (default: clean_body)");
        println!("  --threshold T          Minimum score to join two tokens (default: 350)");
        println!("  --min-count N          Minimum joint occurrences (default: 200)");
        println!("  --scoring NAME         default or npmi (default: default)");
        println!("  --stopwords FILE       Stopword list, one per line (default: built-in)");
        println!("  --names FILE           Name list, one per line (default: built-in)");
        println!("  -h, --help             Print this help");
        return;
    }

    let (output, args) = parse_option(&args, "--output", Some("-o")).unwrap_or_else(|e| fatal(&e));
    let (column, args) = parse_option(&args, "--column", Some("-c")).unwrap_or_else(|e| fatal(&e));
    let (threshold, args) = parse_option(&args, "--threshold", None).unwrap_or_else(|e| fatal(&e));
    let (min_count, args) = parse_option(&args, "--min-count", None).unwrap_or_else(|e| fatal(&e));
    let (scoring, args) = parse_option(&args, "--scoring", None).unwrap_or_else(|e| fatal(&e));
    let (stopwords, args) = parse_option(&args, "--stopwords", None).unwrap_or_else(|e| fatal(&e));
    let (names, args) = parse_option(&args, "--names", None).unwrap_or_else(|e| fatal(&e));

    let output = output.unwrap_or_else(|| fatal("missing -o MODEL"));
    let corpus_path = match args.as_slice() {
        [path] => path.clone(),
        [] => fatal("missing CORPUS.jsonl"),
        _ => fatal(&format!("unexpected arguments: {}", args.join(" "))),
    };

    let mut config = PhraseConfig::default().with_common_terms(
        common_terms(stopwords.as_deref(), names.as_deref()).unwrap_or_else(|e| fatal(&e)),
    );
    if let Some(column) = column {
        config = config.with_input_column(column);
    }
    if let Some(t) = threshold {
        config = config.with_threshold(parse_value("--threshold", &t).unwrap_or_else(|e| fatal(&e)));
    }
    if let Some(n) = min_count {
        config = config.with_min_count(parse_value("--min-count", &n).unwrap_or_else(|e| fatal(&e)));
    }
    if let Some(s) = scoring {
        let scoring: Scoring = parse_value("--scoring", &s).unwrap_or_else(|e| fatal(&e));
        config = config.with_scoring(scoring);
    }

    let records = phraser_cli::read_records(Path::new(&corpus_path)).unwrap_or_else(|e| fatal(&e));
    info!(path = %corpus_path, rows = records.len(), "read corpus");

    let mut model = PhraseModel::new(config).unwrap_or_else(|e| fatal(&e.to_string()));
    model
        .train(&records)
        .and_then(|m| m.save(&output))
        .unwrap_or_else(|e| fatal(&e.to_string()));

    let phrasegrams = model.phraser().map(|p| p.len()).unwrap_or(0);
    println!("{phrasegrams} phrasegrams learned from {} rows, saved to {output}", records.len());
}

/// Connector terms from the given lists, built-in lists for the others.
fn common_terms(stopwords: Option<&str>, names: Option<&str>) -> Result<CommonTerms, String> {
    let load = |path: &str| -> Result<CommonTerms, String> {
        load_word_list(Path::new(path))
            .map(CommonTerms::from_words)
            .map_err(|e| e.to_string())
    };
    let stopwords = match stopwords {
        Some(path) => load(path)?,
        None => CommonTerms::builtin_stopwords(),
    };
    let names = match names {
        Some(path) => load(path)?,
        None => CommonTerms::builtin_names(),
    };
    Ok(stopwords.union(&names))
}
