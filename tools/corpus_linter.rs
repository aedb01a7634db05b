/// Corpus Linter — validates corpus tables and reports pool coverage.
///
/// Usage: corpus_linter <corpus_path>
use resonance_engine::core::corpus::{AtmosphereTag, CorpusSet, SensationTag};
use resonance_engine::schema::coordinate::Quadrant;
use std::path::Path;
use std::process;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 || args[1] == "--help" || args[1] == "-h" {
        println!("Usage: corpus_linter <corpus_path>");
        println!("  corpus_path: a .ron corpus file, or a directory of them");
        process::exit(0);
    }

    let path = Path::new(&args[1]);
    let mut corpora: Vec<(String, CorpusSet)> = Vec::new();

    if path.is_file() {
        load_corpus(path, &mut corpora);
    } else if path.is_dir() {
        load_corpora_from_dir(path, &mut corpora);
    } else {
        eprintln!("ERROR: Path '{}' does not exist", args[1]);
        process::exit(1);
    }

    if corpora.is_empty() {
        eprintln!("ERROR: No corpus files loaded");
        process::exit(1);
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    for (name, corpus) in &corpora {
        lint_corpus(name, corpus, &mut errors, &mut warnings);
    }

    println!("\n=== Corpus Lint Report ===\n");

    if errors.is_empty() && warnings.is_empty() {
        println!("All checks passed!");
    }

    for warning in &warnings {
        println!("WARNING: {}", warning);
    }

    for error in &errors {
        println!("ERROR: {}", error);
    }

    println!(
        "\nSummary: {} errors, {} warnings",
        errors.len(),
        warnings.len()
    );

    if errors.is_empty() {
        process::exit(0);
    } else {
        process::exit(1);
    }
}

fn load_corpus(path: &Path, corpora: &mut Vec<(String, CorpusSet)>) {
    match CorpusSet::load_from_ron(path) {
        Ok(corpus) => {
            println!("  Loaded: {}", path.display());
            corpora.push((path.display().to_string(), corpus));
        }
        Err(e) => {
            eprintln!("  ERROR loading {}: {}", path.display(), e);
        }
    }
}

fn load_corpora_from_dir(dir: &Path, corpora: &mut Vec<(String, CorpusSet)>) {
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) == Some("ron") {
                load_corpus(&path, corpora);
            }
        }
    }
}

fn lint_corpus(
    name: &str,
    corpus: &CorpusSet,
    errors: &mut Vec<String>,
    warnings: &mut Vec<String>,
) {
    println!(
        "{}: {} sensations, {} atmospheres, {} traces",
        name,
        corpus.sensations.len(),
        corpus.atmospheres.len(),
        corpus.traces.len()
    );

    if let Err(e) = corpus.validate() {
        errors.push(format!("{}: {}", name, e));
    }

    // Variety checks: a pool the generator draws from should offer choice
    for tag in SensationTag::ALL {
        let pool = corpus.sensation_pool(tag);
        if pool.len() < 3 {
            warnings.push(format!(
                "{}: sensation pool '{}' has only {} entries (minimum 3 recommended)",
                name,
                tag.tag(),
                pool.len()
            ));
        }
    }
    for tag in AtmosphereTag::ALL {
        let pool = corpus.atmosphere_pool(tag);
        if pool.len() < 3 {
            warnings.push(format!(
                "{}: atmosphere pool '{}' has only {} entries (minimum 3 recommended)",
                name,
                tag.tag(),
                pool.len()
            ));
        }
    }
    if corpus.traces.len() < 3 {
        warnings.push(format!(
            "{}: trace pool has only {} entries (minimum 3 recommended)",
            name,
            corpus.traces.len()
        ));
    }

    // Duplicate ids confuse curation even though the engine ignores them
    let mut seen = std::collections::HashSet::new();
    for id in corpus
        .sensations
        .iter()
        .map(|i| &i.id)
        .chain(corpus.atmospheres.iter().map(|i| &i.id))
    {
        if !seen.insert(id.clone()) {
            errors.push(format!("{}: duplicate fragment id '{}'", name, id));
        }
    }

    // Notes should differ per quadrant or the reading loses its signal
    for (i, a) in Quadrant::ALL.iter().enumerate() {
        for b in &Quadrant::ALL[i + 1..] {
            if corpus.notes.for_quadrant(*a) == corpus.notes.for_quadrant(*b) {
                warnings.push(format!(
                    "{}: quadrants '{}' and '{}' share a tasting note",
                    name,
                    a.key(),
                    b.key()
                ));
            }
        }
    }
}
