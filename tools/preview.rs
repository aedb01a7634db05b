/// Preview — interactive headless shell for driving a resonance session.
///
/// Usage: preview [--corpus <path>] [--seed <n>]
///
/// Commands:
///   names <user> <target>  — fill the covenant and wait out the link
///   goto <x> <y>           — move the pointer (normalized [-1,1] coords)
///   hold                   — sustain the hold through to completion
///   state                  — print phase, names, coordinate, link status
///   report                 — print the current reading
///   restart                — restart the session
///   seed <n>               — rebuild the session with a new seed
///   bulk <n>               — n draws at the current coordinate, variety stats
///   help                   — list commands
///   quit                   — exit
use resonance_engine::core::corpus::CorpusSet;
use resonance_engine::core::flow::{
    Phase, ResonanceFlow, HOLD_DURATION_MS, LINK_CROSSING_MS, LINK_SETTLE_MS,
};
use resonance_engine::core::report::compose;
use resonance_engine::schema::coordinate::{BoundingRect, Coordinate};
use resonance_engine::schema::covenant::CovenantField;
use resonance_engine::schema::event::InputEvent;
use resonance_engine::schema::report::ResonanceReport;
use std::collections::HashSet;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Pointer events map through a unit rectangle centered on the origin, so
/// `goto` arguments pass straight through as normalized coordinates.
const UNIT_BOUNDS: BoundingRect = BoundingRect {
    left: -1.0,
    top: -1.0,
    width: 2.0,
    height: 2.0,
};

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let mut corpus_path = None;
    let mut seed: u64 = 42;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--corpus" if i + 1 < args.len() => {
                i += 1;
                corpus_path = Some(args[i].clone());
            }
            "--seed" if i + 1 < args.len() => {
                i += 1;
                seed = args[i].parse().unwrap_or(42);
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            _ => {
                eprintln!("Unknown argument: {}", args[i]);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let corpus = match corpus_path {
        Some(ref path) => CorpusSet::load_from_ron(Path::new(path)).expect("Failed to load corpus"),
        None => CorpusSet::builtin().expect("Failed to parse builtin corpus"),
    };

    let mut current_seed = seed;
    let mut now_ms: u64 = 0;
    let mut flow = build_flow(corpus.clone(), current_seed);

    println!(
        "Corpus: {} sensations, {} atmospheres, {} traces",
        corpus.sensations.len(),
        corpus.atmospheres.len(),
        corpus.traces.len()
    );
    println!("Seed: {}", current_seed);
    println!("Type 'help' for commands.\n");

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("preview> ");
        stdout.flush().ok();

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).is_err() || line.is_empty() {
            break;
        }
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split_whitespace().collect();
        let cmd = parts[0].to_lowercase();

        match cmd.as_str() {
            "quit" | "exit" | "q" => {
                println!("Goodbye.");
                break;
            }
            "help" | "h" | "?" => {
                print_help();
            }
            "names" => {
                if parts.len() < 3 {
                    println!("Usage: names <user> <target>");
                    continue;
                }
                flow.apply(
                    now_ms,
                    InputEvent::TextChanged {
                        field: CovenantField::UserName,
                        value: parts[1].to_string(),
                    },
                );
                flow.apply(
                    now_ms,
                    InputEvent::TextChanged {
                        field: CovenantField::TargetName,
                        value: parts[2].to_string(),
                    },
                );
                now_ms = run_for(&mut flow, now_ms, LINK_SETTLE_MS + LINK_CROSSING_MS);
                println!("Phase: {}", flow.phase().name());
            }
            "goto" => {
                let coords = match parse_coords(&parts) {
                    Some(c) => c,
                    None => {
                        println!("Usage: goto <x> <y> (each in [-1, 1])");
                        continue;
                    }
                };
                flow.apply(
                    now_ms,
                    InputEvent::PointerMoved {
                        x: coords.x,
                        y: -coords.y,
                        bounds: UNIT_BOUNDS,
                    },
                );
                let current = flow.coordinate();
                println!(
                    "Coordinate: ({:.2}, {:.2}) — {}",
                    current.x,
                    current.y,
                    current.quadrant().key()
                );
            }
            "hold" => {
                if flow.phase() != Phase::Navigating {
                    println!("Hold only applies while navigating.");
                    continue;
                }
                flow.apply(now_ms, InputEvent::HoldStarted);
                now_ms = run_for(&mut flow, now_ms, HOLD_DURATION_MS);
                println!("Phase: {}", flow.phase().name());
                if let Some(report) = flow.report() {
                    print_report(report);
                }
            }
            "state" => {
                let covenant = flow.covenant();
                let coords = flow.coordinate();
                println!("Phase:      {}", flow.phase().name());
                println!(
                    "Names:      '{}' × '{}'",
                    covenant.user_name, covenant.target_name
                );
                println!(
                    "Coordinate: ({:.2}, {:.2}) — {}",
                    coords.x,
                    coords.y,
                    coords.quadrant().key()
                );
                println!("Linked:     {}", flow.is_linked());
                println!("Clock:      {} ms", now_ms);
            }
            "report" => match flow.report() {
                Some(report) => print_report(report),
                None => println!("No report yet; complete a hold first."),
            },
            "restart" => {
                flow.apply(now_ms, InputEvent::Restart);
                println!("Phase: {}", flow.phase().name());
            }
            "seed" => {
                if parts.len() < 2 {
                    println!("Usage: seed <n>");
                    continue;
                }
                match parts[1].parse::<u64>() {
                    Ok(n) => {
                        current_seed = n;
                        now_ms = 0;
                        flow = build_flow(corpus.clone(), current_seed);
                        println!("Rebuilt session with seed {}.", current_seed);
                    }
                    Err(_) => println!("Not a number: {}", parts[1]),
                }
            }
            "bulk" => {
                let count: usize = parts
                    .get(1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10)
                    .min(10_000);
                bulk_stats(&corpus, flow.coordinate(), current_seed, count);
            }
            _ => {
                println!("Unknown command: {} (try 'help')", cmd);
            }
        }
    }
}

fn build_flow(corpus: CorpusSet, seed: u64) -> ResonanceFlow {
    ResonanceFlow::builder()
        .seed(seed)
        .with_corpus(corpus)
        .build()
        .expect("Failed to build flow")
}

/// Tick the flow forward in 16 ms frames; returns the new clock value.
fn run_for(flow: &mut ResonanceFlow, mut now_ms: u64, duration_ms: u64) -> u64 {
    let end = now_ms + duration_ms;
    while now_ms < end {
        now_ms = (now_ms + 16).min(end);
        if let Err(e) = flow.tick(now_ms) {
            eprintln!("ERROR: {}", e);
            break;
        }
    }
    now_ms
}

fn parse_coords(parts: &[&str]) -> Option<Coordinate> {
    let x = parts.get(1)?.parse().ok()?;
    let y = parts.get(2)?.parse().ok()?;
    Some(Coordinate::new(x, y))
}

fn print_report(report: &ResonanceReport) {
    println!("\n--- Resonance Analysis ---");
    for entry in &report.composition {
        println!(
            "  {:>3}%  {}  [{}]",
            entry.percentage,
            entry.element,
            entry.kind.label()
        );
    }
    println!("  Note: {}\n", report.tasting_note);
}

fn bulk_stats(corpus: &CorpusSet, coords: Coordinate, seed: u64, count: usize) {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    let mut sensations = HashSet::new();
    let mut atmospheres = HashSet::new();
    let mut traces = HashSet::new();
    let mut p1_min = u8::MAX;
    let mut p1_max = u8::MIN;

    for i in 0..count {
        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
        match compose(corpus, coords, &mut rng) {
            Ok(report) => {
                sensations.insert(report.composition[0].element.clone());
                atmospheres.insert(report.composition[1].element.clone());
                traces.insert(report.composition[2].element.clone());
                p1_min = p1_min.min(report.composition[0].percentage);
                p1_max = p1_max.max(report.composition[0].percentage);
            }
            Err(e) => {
                eprintln!("ERROR: {}", e);
                return;
            }
        }
    }

    println!(
        "{} draws at ({:.2}, {:.2}) — {}",
        count,
        coords.x,
        coords.y,
        coords.quadrant().key()
    );
    println!(
        "  distinct: {} sensations, {} atmospheres, {} traces",
        sensations.len(),
        atmospheres.len(),
        traces.len()
    );
    println!("  sensation share range: {}..{}", p1_min, p1_max);
}

fn print_usage() {
    println!("Usage: preview [--corpus <path>] [--seed <n>]");
}

fn print_help() {
    println!("Commands:");
    println!("  names <user> <target>  — fill the covenant and wait out the link");
    println!("  goto <x> <y>           — move the pointer (normalized [-1,1] coords)");
    println!("  hold                   — sustain the hold through to completion");
    println!("  state                  — print phase, names, coordinate, link status");
    println!("  report                 — print the current reading");
    println!("  restart                — restart the session");
    println!("  seed <n>               — rebuild the session with a new seed");
    println!("  bulk <n>               — n draws at the current coordinate, variety stats");
    println!("  quit                   — exit");
}
